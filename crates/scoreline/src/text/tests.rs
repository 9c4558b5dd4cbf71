//! Unit tests for the text model and line splitting.

use rstest::rstest;
use serde_json::json;

use super::*;

const PLACEHOLDER: &str = "§0§r";

// ---------------------------------------------------------------------------
// Parsing and normalization
// ---------------------------------------------------------------------------

#[rstest]
#[case::duplicate_colour("§a§aHello", "§aHello")]
#[case::split_run("§aHel§alo", "§aHello")]
#[case::empty_span("§c§aHello", "§aHello")]
#[case::reset_at_start("§rHello", "Hello")]
#[case::upper_case_code("§AHello", "§aHello")]
fn equivalent_spellings_are_equal(#[case] left: &str, #[case] right: &str) {
    assert_eq!(Text::parse_legacy(left), Text::parse_legacy(right));
}

#[test]
fn different_styles_are_not_equal() {
    assert_ne!(Text::parse_legacy("§aHello"), Text::parse_legacy("§bHello"));
}

#[test]
fn colour_code_clears_decorations() {
    let text = Text::parse_legacy("§lBold§aPlain");
    let spans = text.spans();
    assert_eq!(spans.len(), 2);
    assert!(spans[0].style().bold);
    assert_eq!(spans[1].style(), Style::colored(Color::Green));
}

#[test]
fn unknown_codes_stay_literal() {
    let text = Text::parse_legacy("§zA§");
    assert_eq!(text.plain_text(), "§zA§");
}

#[test]
fn only_codes_is_empty() {
    assert!(Text::parse_legacy("§a§l§r").is_empty());
    assert!(Text::parse_legacy("").is_empty());
    assert!(!Text::parse_legacy(" ").is_empty());
}

#[rstest]
#[case::plain("Hello", "Hello")]
#[case::coloured("§aHello §bWorld", "§aHello §bWorld")]
#[case::added_decoration("§aHello §lWorld", "§aHello §lWorld")]
#[case::dropped_decoration("§a§lHello §aWorld", "§a§lHello §aWorld")]
#[case::back_to_default("§aHello§r World", "§aHello§r World")]
fn legacy_rendering_is_canonical(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(Text::parse_legacy(input).to_legacy(), expected);
}

#[test]
fn append_merges_matching_seam() {
    let joined = Text::parse_legacy("§aHel").append(&Text::parse_legacy("§alo"));
    assert_eq!(joined, Text::parse_legacy("§aHello"));
    assert_eq!(joined.spans().len(), 1);
}

#[test]
fn styled_takes_content_literally() {
    let text = Text::styled(Style::colored(Color::Red), "§a");
    assert_eq!(text.plain_text(), "§a");
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

#[test]
fn empty_component_has_blank_text() {
    assert_eq!(Text::empty().to_component(), json!({ "text": "" }));
}

#[test]
fn component_lists_styled_runs() {
    let component = Text::parse_legacy("§aKills: §l3").to_component();
    assert_eq!(
        component,
        json!({
            "text": "",
            "extra": [
                { "text": "Kills: ", "color": "green" },
                { "text": "3", "color": "green", "bold": true }
            ]
        })
    );
}

// ---------------------------------------------------------------------------
// Splitting
// ---------------------------------------------------------------------------

#[test]
fn empty_line_uses_placeholder() {
    assert_eq!(
        split_line("", 16, PLACEHOLDER),
        SplitLine::new(PLACEHOLDER, "")
    );
}

#[test]
fn short_line_is_kept_whole() {
    assert_eq!(
        split_line("Hello", 16, PLACEHOLDER),
        SplitLine::new("Hello", "")
    );
}

#[test]
fn line_at_limit_is_kept_whole() {
    let line = "x".repeat(16);
    assert_eq!(
        split_line(&line, 16, PLACEHOLDER),
        SplitLine::new(line.clone(), "")
    );
}

#[test]
fn suffix_inherits_active_colour() {
    let line = format!("§a{}XYZ", "A".repeat(14));
    let split = split_line(&line, 16, PLACEHOLDER);
    assert_eq!(split.prefix(), format!("§a{}", "A".repeat(14)));
    assert_eq!(split.suffix(), "§aXYZ");
}

#[test]
fn uncoloured_suffix_starts_with_reset() {
    let split = split_line(&"x".repeat(20), 16, PLACEHOLDER);
    assert_eq!(split.prefix(), "x".repeat(16));
    assert_eq!(split.suffix(), "§rxxxx");
}

#[test]
fn cut_never_separates_format_char_from_code() {
    let line = format!("§a{}§bBBBB", "A".repeat(13));
    let split = split_line(&line, 16, PLACEHOLDER);
    assert_eq!(split.prefix(), format!("§a{}", "A".repeat(13)));
    assert_eq!(split.suffix(), "§bBBBB");
}

#[test]
fn suffix_starting_with_decoration_still_inherits_colour() {
    let line = format!("§a{}§lXY", "A".repeat(14));
    let split = split_line(&line, 16, PLACEHOLDER);
    assert_eq!(split.suffix(), "§a§lXY");
}

#[test]
fn overlong_halves_are_truncated() {
    let split = split_line(&"x".repeat(40), 16, PLACEHOLDER);
    assert_eq!(split.prefix().chars().count(), 16);
    assert_eq!(split.suffix().chars().count(), 16);
    assert!(split.suffix().starts_with("§r"));
}

#[rstest]
#[case(17)]
#[case(20)]
#[case(24)]
#[case(30)]
fn halves_never_exceed_limit(#[case] length: usize) {
    let line = format!("§c{}", "y".repeat(length - 2));
    let split = split_line(&line, 16, PLACEHOLDER);
    assert!(split.prefix().chars().count() <= 16);
    assert!(split.suffix().chars().count() <= 16);
}

#[rstest]
#[case::colour_then_bold("§a§lHi", "§a§l")]
#[case::reset_stops_scan("§l§rHi", "§r")]
#[case::colour_wins("§l§aHi", "§a")]
#[case::none("Hi", "")]
fn last_codes_stop_at_colour_or_reset(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(last_format_codes(input), expected);
}
