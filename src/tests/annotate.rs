use crate::{
    clean_claim_text, AnalysisContext, AnnotatedClaim, AnnotationError, Annotator, DiagnosticKind,
    MarkedClaimDisplay, PhraseTable, SpanKind,
};

fn annotate_with(text: &str, inherited: &[&str]) -> Result<AnnotatedClaim, AnnotationError> {
    let mut ctx = AnalysisContext::new();
    Annotator::default().annotate(1, text, inherited.iter().copied(), &mut ctx)
}

fn mark(text: &str) -> String {
    annotate_with(text, &[]).unwrap().marked
}

#[test]
fn test_author_marked_contraption() {
    let marked = mark("A contraption} comprising: an enclosure, a display, at least one button, and at least one widget} mounted on the enclosure, wherein the enclosure] is green, the at least one button] is yellow, and the at least one widget] is blue.");
    insta::assert_snapshot!(marked, @"A {contraption} comprising: an {enclosure}, a {display}, {at least one button}, and {at least one widget} mounted on the [enclosure], wherein the [enclosure] is green, the [at least one button] is yellow, and the [at least one widget] is blue.");
}

#[test]
fn test_unmarked_contraption() {
    let marked = mark("A contraption comprising: an enclosure, a display, at least one button, and at least one widget mounted on the enclosure, wherein the enclosure is green, the at least one button is yellow, and the at least one widget is blue.");
    insta::assert_snapshot!(marked, @"A {contraption} comprising: an {enclosure}, a {display}, {at least one button}, and {at least one widget} mounted on the [enclosure], wherein the [enclosure] is green, the [at least one button] is yellow, and the [at least one widget] is blue.");
}

#[test]
fn test_inherited_elements_close_references() {
    let marked = annotate_with(
        "The fastening system of claim 1, wherein the lever is attached to the motor.",
        &["fastening system", "frame", "motor"],
    )
    .unwrap()
    .marked;
    insta::assert_snapshot!(marked, @"The [fastening system] of claim 1, wherein the [lever] is attached to the [motor].");
}

#[test]
fn test_span_offsets() {
    let annotated = annotate_with("A frame; and a motor coupled to the frame.", &[]).unwrap();

    let new: Vec<(&str, usize)> = annotated
        .new_elements
        .iter()
        .map(|s| (s.text.as_str(), s.start_offset))
        .collect();
    assert_eq!(new, vec![("frame", 3), ("motor", 18)]);

    assert_eq!(annotated.old_elements.len(), 1);
    let old = &annotated.old_elements[0];
    assert_eq!((old.text.as_str(), old.kind), ("frame", SpanKind::Old));
    assert_eq!(&annotated.marked[old.start_offset..old.start_offset + 5], "frame");
}

#[test]
fn test_quantifier_phrases() {
    assert_eq!(
        mark("A rack comprising two or more shelves and a frame."),
        "A {rack} comprising {two or more shelves} and a {frame}."
    );
}

#[test]
fn test_author_directives() {
    assert_eq!(
        mark("A nut,~ bolt assembly| comprising a frame."),
        "A {nut, bolt assembly} comprising a {frame}."
    );
    assert_eq!(
        mark("A widget comprising #a lot of rivets."),
        "A {widget} comprising a lot of rivets."
    );
    assert_eq!(
        mark("A widget` and a gear` comprising a frame."),
        "A {widget} comprising a {frame}."
    );
}

#[test]
fn test_manual_marking_skips_correlation() {
    let text = "A frame; wherein the frame rotates.";
    assert_eq!(mark(text), "A {frame}; wherein the [frame] rotates.");

    let mut ctx = AnalysisContext::new();
    let manual = Annotator::default()
        .with_manual_marking(true)
        .annotate(1, text, std::iter::empty(), &mut ctx)
        .unwrap();
    assert_eq!(manual.marked, "A {frame}; wherein the [frame rotates].");
}

#[test]
fn test_prefix_elements_warn() {
    let mut ctx = AnalysisContext::new();
    let annotated = Annotator::default()
        .annotate(
            1,
            "A frame and a frame member, wherein the frame member is attached to the frame.",
            std::iter::empty(),
            &mut ctx,
        )
        .unwrap();

    assert_eq!(
        annotated.marked,
        "A {frame} and a {frame member}, wherein the [frame member] is attached to the [frame]."
    );
    let kinds: Vec<DiagnosticKind> = ctx.diagnostics().iter().map(|d| d.kind).collect();
    assert_eq!(kinds, vec![DiagnosticKind::ConflictingElements]);
}

#[test]
fn test_nested_openers_are_fatal() {
    let err = annotate_with("A {widget {frame}.", &[]).unwrap_err();
    assert_eq!(
        err,
        AnnotationError::NestedSpan {
            kind: SpanKind::New,
            open: SpanKind::New,
            offset: 10,
            window: "A {widget {frame}.".to_string(),
        }
    );
}

#[test]
fn test_leftover_terminator_is_fatal() {
    let err = annotate_with("A widget comprising| a frame.", &[]).unwrap_err();
    assert!(matches!(err, AnnotationError::StrayTerminator { offset: 21, .. }));
}

#[test]
fn test_unpaired_escape_is_fatal() {
    assert_eq!(
        annotate_with("A `widget.", &[]).unwrap_err(),
        AnnotationError::UnpairedEscape
    );
}

#[test]
fn test_markers_strip_back_to_clean_text() {
    let claims = [
        "A fastening system comprising: a frame; and a motor coupled to the frame.",
        "The fastening system of claim 1, wherein the lever is attached to the motor.",
        "A method comprising: heating two or more solutions; and mixing the two or more solutions.",
        "An apparatus having a housing, the housing being mounted on a base.",
    ];
    for claim in claims {
        let marked = mark(claim);
        let stripped: String = marked
            .chars()
            .filter(|c| !matches!(c, '{' | '}' | '[' | ']'))
            .collect();
        assert_eq!(stripped, clean_claim_text(claim).unwrap());

        let opens = marked.chars().filter(|c| matches!(c, '{' | '[')).count();
        let closes = marked.chars().filter(|c| matches!(c, '}' | ']')).count();
        assert_eq!(opens, closes, "{}", marked);
    }
}

#[test]
fn test_display() {
    let annotated = annotate_with("A widget comprising a frame.", &[]).unwrap();
    insta::assert_snapshot!(MarkedClaimDisplay::new(&annotated), @r###"
        A {widget} comprising a {frame}.
           ╰────╯ new
                                 ╰───╯ new
        "###);
}

#[test]
fn test_continued_element_is_referenced_whole() {
    let marked = mark("A widget,~ gadget; the widget,~ gadget.");
    insta::assert_snapshot!(marked, @"A {widget, gadget}; the [widget, gadget].");
}

#[test]
fn test_referenced_quantifier_is_not_split() {
    let table = PhraseTable::standard().with_boundaries(vec!["or".to_string()]);
    let mut ctx = AnalysisContext::new();
    let annotated = Annotator::new(&table)
        .unwrap()
        .annotate(1, "A widget, the one or more pins.", std::iter::empty(), &mut ctx)
        .unwrap();

    assert_eq!(annotated.marked, "A {widget}, the [one or more pins].");
    assert_eq!(annotated.old_elements[0].text, "one or more pins");
}

#[test]
fn test_conjunction_inside_element() {
    assert_eq!(
        mark("A nut and bolt assembly; and a washer."),
        "A {nut and bolt assembly}; and a {washer}."
    );
}
