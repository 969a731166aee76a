//! Parse/serialize round trips over whole scripts

use ass_tools_core::{Document, LineBreak, SectionKind};
use pretty_assertions::assert_eq;

const FULL_SCRIPT: &str = "[Script Info]
Title: Round trip
ScriptType: v4.00+
WrapStyle: 0

[V4+ Styles]
Format: Name, Fontname, Fontsize, PrimaryColour, Bold
Style: Default,Arial,20,&H00FFFFFF,0
Style: Sign,  Verdana ,32,&H0000FFFF,-1

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
Dialogue: 0,0:00:00.00,0:00:05.00,Default,,0,0,0,,Hello World!
Comment: 0,0:00:05.00,0:00:10.00,Default,,0,0,0,,{\\i1}note{\\i0}
Dialogue: 1,0:01:02.34,0:01:05.67,Sign,,0,0,0,,A, B, C
";

#[test]
fn lf_script_is_reproduced() {
    let document = Document::parse(FULL_SCRIPT).unwrap();
    assert!(!document.has_bom());
    assert_eq!(document.line_break(), LineBreak::Lf);
    assert_eq!(document.serialize().unwrap(), FULL_SCRIPT);
}

#[test]
fn crlf_script_with_bom_is_reproduced() {
    let input = format!("\u{FEFF}{}", FULL_SCRIPT.replace('\n', "\r\n"));
    let document = Document::parse(&input).unwrap();

    assert!(document.has_bom());
    assert_eq!(document.line_break(), LineBreak::CrLf);
    assert_eq!(document.serialize().unwrap(), input);
}

#[test]
fn sections_are_written_in_canonical_order() {
    let input = "[Script Info]
Title: Order

[Events]
Format: Start, End, Text
Dialogue: 0:00:01.00,0:00:02.00,x

[V4+ Styles]
Format: Name
Style: Default
";
    let expected = "[Script Info]
Title: Order

[V4+ Styles]
Format: Name
Style: Default

[Events]
Format: Start, End, Text
Dialogue: 0:00:01.00,0:00:02.00,x
";
    let document = Document::parse(input).unwrap();
    let membership: Vec<_> = document.sections().collect();
    assert_eq!(
        membership,
        vec![SectionKind::ScriptInfo, SectionKind::Events, SectionKind::Styles]
    );
    assert_eq!(document.serialize().unwrap(), expected);
}

#[test]
fn comments_blanks_and_unknown_sections_are_dropped() {
    let input = "[Script Info]
; a comment
Title: Drop

[Aegisub Project Garbage]
Last Style Storage: Default

[Events]
Format: Start, End, Text

Dialogue: 0:00:01.00,0:00:02.00,x
";
    let expected = "[Script Info]
Title: Drop

[Events]
Format: Start, End, Text
Dialogue: 0:00:01.00,0:00:02.00,x
";
    assert_eq!(Document::parse(input).unwrap().serialize().unwrap(), expected);
}

#[test]
fn embedded_font_survives() {
    let line = "M".repeat(80);
    let input = format!(
        "[Script Info]\nTitle: Fonts\n\n[Fonts]\nfontname: demo_0.ttf\n{line}\n{line}\nTAIL\n\n[Events]\nFormat: Start, End, Text\n"
    );

    let document = Document::parse(&input).unwrap();
    let fonts = document.section(SectionKind::Fonts).unwrap();
    assert_eq!(fonts.len(), 1);
    assert_eq!(fonts[0].data, format!(" demo_0.ttf\n{line}\n{line}\nTAIL"));

    assert_eq!(document.serialize().unwrap(), input);
}

#[test]
fn header_comment_follows_script_info_header() {
    let mut document = Document::parse(FULL_SCRIPT).unwrap();
    document.set_header_comment("; generated\n; by test");

    let text = document.serialize().unwrap();
    assert!(text.starts_with("[Script Info]\n; generated\n; by test\nTitle: Round trip\n"));

    // comment lines are not read back
    let reparsed = Document::parse(&text).unwrap();
    assert_eq!(reparsed.header_comment(), "");
    assert_eq!(reparsed.serialize().unwrap(), FULL_SCRIPT);
}

#[test]
fn invalid_inputs_are_rejected() {
    assert!(Document::parse("").is_err());
    assert!(Document::parse("[Events]\nFormat: Text\n").is_err());
    assert!(Document::parse("[Script Info]\nno delimiter here\n").is_err());
}
