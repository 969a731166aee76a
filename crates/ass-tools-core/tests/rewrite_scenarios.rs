//! Split and shift scenarios over parsed scripts

use ass_tools_core::{
    policies::{shift_document, split_document},
    AffineShift, CoreError, DiagnosticKind, Document, EventRewriter, FormatConfig, SectionKind,
    SplitAtCut,
};
use pretty_assertions::assert_eq;

fn script(events: &[&str]) -> Document {
    let mut text = String::from(
        "[Script Info]\nTitle: Scenario\n\n[V4+ Styles]\nFormat: Name\nStyle: Default\n\n[Events]\nFormat: Layer, Start, End, Style, Text\n",
    );
    for event in events {
        text.push_str(event);
        text.push('\n');
    }
    Document::parse(&text).unwrap()
}

fn event_lines(document: &Document) -> Vec<String> {
    document
        .section(SectionKind::Events)
        .unwrap_or_default()
        .iter()
        .skip(1)
        .map(ToString::to_string)
        .collect()
}

#[test]
fn straddling_event_stays_in_first_part() {
    let document = script(&["Dialogue: 0,0:00:05.00,0:00:15.00,Default,Hi"]);
    let outcome = split_document(&document, 1000).unwrap();

    assert_eq!(
        event_lines(&outcome.documents[0]),
        vec!["Dialogue: 0,0:00:05.00,0:00:15.00,Default,Hi"]
    );
    assert!(event_lines(&outcome.documents[1]).is_empty());
    assert_eq!(outcome.diagnostics.count(DiagnosticKind::LossySplit), 1);
}

#[test]
fn late_event_moves_to_second_part() {
    let document = script(&["Dialogue: 0,0:00:15.00,0:00:25.00,Default,Later"]);
    let outcome = split_document(&document, 1000).unwrap();

    assert!(event_lines(&outcome.documents[0]).is_empty());
    assert_eq!(
        event_lines(&outcome.documents[1]),
        vec!["Dialogue: 0,0:00:05.00,0:00:15.00,Default,Later"]
    );
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn both_parts_keep_other_sections_and_format() {
    let document = script(&[
        "Dialogue: 0,0:00:01.00,0:00:02.00,Default,a",
        "Dialogue: 0,0:00:11.00,0:00:12.00,Default,b",
    ]);
    let outcome = split_document(&document, 1000).unwrap();

    for part in &outcome.documents {
        assert_eq!(part.section(SectionKind::Styles), document.section(SectionKind::Styles));
        assert_eq!(part.section(SectionKind::Events).unwrap()[0].record_type, "Format");
    }
}

#[test]
fn event_without_start_goes_to_both_parts() {
    let document = script(&["Comment: 0,,0:00:09.00,Default,marker"]);
    let outcome = split_document(&document, 1000).unwrap();

    let expected = vec!["Comment: 0,,,Default,marker".to_string()];
    assert_eq!(event_lines(&outcome.documents[0]), expected);
    assert_eq!(event_lines(&outcome.documents[1]), expected);
}

#[test]
fn command_end_is_cleared() {
    let document = script(&["Command: 0,0:00:12.00,0:00:30.00,Default,cmd"]);
    let outcome = split_document(&document, 1000).unwrap();
    assert_eq!(
        event_lines(&outcome.documents[1]),
        vec!["Command: 0,0:00:02.00,,Default,cmd"]
    );
}

#[test]
fn affine_shift_scales_then_offsets() {
    let document = script(&[
        "Dialogue: 0,0:00:01.00,,Default,open",
        "Dialogue: 0,0:00:02.00,0:00:03.00,Default,closed",
    ]);
    let outcome = shift_document(&document, 200, 2.0).unwrap();

    assert_eq!(
        event_lines(&outcome.documents[0]),
        vec![
            "Dialogue: 0,0:00:04.00,,Default,open",
            "Dialogue: 0,0:00:06.00,0:00:08.00,Default,closed",
        ]
    );
}

#[test]
fn negative_shift_fails_the_run() {
    let document = script(&["Dialogue: 0,0:00:05.00,0:00:06.00,Default,x"]);
    let err = shift_document(&document, -1000, 1.0).unwrap_err();
    assert!(matches!(err, CoreError::Value(_)));
}

#[test]
fn shift_beyond_ten_hours_fails() {
    let document = script(&["Dialogue: 0,9:59:00.00,9:59:30.00,Default,x"]);
    let err = shift_document(&document, 6000, 1.0).unwrap_err();
    assert!(matches!(err, CoreError::InvalidTime(_)));
}

#[test]
fn missing_events_is_only_a_warning() {
    let document = Document::parse("[Script Info]\nTitle: Empty\n").unwrap();
    let config = FormatConfig::standard();
    let outcome = EventRewriter::new(&config)
        .rewrite(&document, &mut AffineShift::offset_only(100))
        .unwrap();

    assert_eq!(outcome.documents, vec![document]);
    assert!(outcome.diagnostics.contains(DiagnosticKind::MissingEvents));
}

#[test]
fn format_errors_abort_the_run() {
    let text = "[Script Info]\nTitle: Bad\n\n[Events]\nFormat: Layer, Start, Text, End\nDialogue: 0,0:00:01.00,x,0:00:02.00\n";
    let document = Document::parse(text).unwrap();
    let err = split_document(&document, 100).unwrap_err();
    assert_eq!(
        err,
        CoreError::Format("'Text' field must appear in last place".to_string())
    );

    let config = FormatConfig::standard();
    let mut policy = SplitAtCut::new(100);
    assert!(EventRewriter::new(&config).rewrite(&document, &mut policy).is_err());
}
