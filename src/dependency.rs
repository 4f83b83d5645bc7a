//! Claim dependency graph and element inheritance.

use std::collections::{BTreeMap, BTreeSet};

use pathfinding::prelude::bfs_reach;

use crate::{AnalysisContext, ClaimElements, ClaimRecord, DiagnosticKind};

/// Where an element was first introduced, as seen from one claim.
///
/// `Inherited` sorts before every offset: an inherited element is introduced
/// before anything in the claim's own text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IntroducedAt {
    Inherited,
    Offset(usize),
}

/// Element phrases known to a claim, with their first introduction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimElementMap {
    entries: BTreeMap<String, IntroducedAt>,
}

impl ClaimElementMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an introduction. Returns `false`, keeping the earlier entry,
    /// when the phrase is already known.
    pub fn introduce(&mut self, phrase: &str, at: IntroducedAt) -> bool {
        if self.entries.contains_key(phrase) {
            return false;
        }
        self.entries.insert(phrase.to_string(), at);
        true
    }

    pub fn get(&self, phrase: &str) -> Option<IntroducedAt> {
        self.entries.get(phrase).copied()
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.entries.contains_key(phrase)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, IntroducedAt)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn phrase_set(&self) -> BTreeSet<String> {
        self.entries.keys().cloned().collect()
    }

    /// This map as seen by a dependent claim.
    pub fn inherited(&self) -> ClaimElementMap {
        ClaimElementMap {
            entries: self
                .entries
                .keys()
                .map(|k| (k.clone(), IntroducedAt::Inherited))
                .collect(),
        }
    }
}

/// Validated parent links between claims.
///
/// Every link points from a claim to a lower-numbered claim already in the
/// graph, so the graph is acyclic by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    parents: BTreeMap<u32, u32>,
    children: BTreeMap<u32, Vec<u32>>,
    independent: BTreeSet<u32>,
    claims: BTreeSet<u32>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: &[ClaimRecord]) -> Self {
        let mut graph = Self::new();
        for record in records {
            graph.insert(record);
        }
        graph
    }

    /// Add a claim, returning its parent if the link is valid.
    pub fn insert(&mut self, record: &ClaimRecord) -> Option<u32> {
        self.claims.insert(record.number);
        if record.is_independent() {
            self.independent.insert(record.number);
            return None;
        }
        let parent = record
            .parent_number
            .filter(|p| *p < record.number && self.claims.contains(p))?;
        self.parents.insert(record.number, parent);
        self.children.entry(parent).or_default().push(record.number);
        Some(parent)
    }

    pub fn parent_of(&self, claim: u32) -> Option<u32> {
        self.parents.get(&claim).copied()
    }

    pub fn children_of(&self, claim: u32) -> &[u32] {
        self.children.get(&claim).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_independent(&self, claim: u32) -> bool {
        self.independent.contains(&claim)
    }

    pub fn independent_claims(&self) -> impl Iterator<Item = u32> + '_ {
        self.independent.iter().copied()
    }

    pub fn independent_count(&self) -> usize {
        self.independent.len()
    }

    pub fn dependent_count(&self) -> usize {
        self.claims.len() - self.independent.len()
    }

    /// Independent claim at the top of `claim`'s parent chain.
    pub fn root_of(&self, claim: u32) -> Option<u32> {
        let mut current = claim;
        loop {
            if self.is_independent(current) {
                return Some(current);
            }
            current = self.parent_of(current)?;
        }
    }

    /// `root` followed by every claim depending on it, directly or not.
    pub fn group(&self, root: u32) -> Vec<u32> {
        let mut group: Vec<u32> =
            bfs_reach(root, |claim| self.children_of(*claim).to_vec()).collect();
        group.sort_unstable();
        group
    }
}

/// Propagates element knowledge down the dependency graph.
#[derive(Debug, Clone, Default)]
pub struct DependencyResolver {
    graph: DependencyGraph,
    effective: BTreeMap<u32, ClaimElementMap>,
    own: BTreeMap<u32, BTreeSet<String>>,
}

impl DependencyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, record: &ClaimRecord) -> Option<u32> {
        self.graph.insert(record)
    }

    /// Elements a registered claim inherits from its parent chain.
    ///
    /// A dependent claim without a resolved parent is analyzed with nothing
    /// inherited, which is announced because every reference in it will
    /// then look unsupported.
    pub fn inherited_for(&self, record: &ClaimRecord, ctx: &mut AnalysisContext) -> ClaimElementMap {
        if record.is_independent() {
            return ClaimElementMap::new();
        }
        match self
            .graph
            .parent_of(record.number)
            .and_then(|parent| self.effective.get(&parent))
        {
            Some(parent) => parent.inherited(),
            None => {
                ctx.warn(
                    record.number,
                    DiagnosticKind::Dependency,
                    format!(
                        "Claim {} is analyzed without inherited claim elements because its parent claim could not be resolved.",
                        record.number
                    ),
                );
                ClaimElementMap::new()
            }
        }
    }

    pub fn record(&mut self, claim: u32, elements: &ClaimElements) {
        self.own.insert(claim, elements.own.phrase_set());
        self.effective.insert(claim, elements.effective.clone());
    }

    pub fn effective(&self, claim: u32) -> Option<&ClaimElementMap> {
        self.effective.get(&claim)
    }

    pub fn own(&self, claim: u32) -> Option<&BTreeSet<String>> {
        self.own.get(&claim)
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn into_graph(self) -> DependencyGraph {
        self.graph
    }

    /// Per independent claim, the new elements of its whole dependent subtree.
    pub fn claim_group_elements(&self) -> BTreeMap<u32, BTreeSet<String>> {
        self.graph
            .independent_claims()
            .map(|root| {
                let elements = self
                    .graph
                    .group(root)
                    .into_iter()
                    .filter_map(|claim| self.own.get(&claim))
                    .flatten()
                    .cloned()
                    .collect();
                (root, elements)
            })
            .collect()
    }
}
