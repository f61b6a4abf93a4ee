use kpi_threshold_chart::presentation::format::{
    contrast_color, format_currency, normalize_threshold_name, parse_threshold_value, threshold_caption,
};
use kpi_threshold_chart::presentation::threshold_controls::{ThresholdColor, draft_from_input};
use strum::IntoEnumIterator;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn currency() {
    assert_eq!(format_currency(1_234_567.0), "$1,234,567");
    assert_eq!(format_currency(575_000.0), "$575,000");
    assert_eq!(format_currency(999.0), "$999");
    assert_eq!(format_currency(-500.0), "-$500");
    assert_eq!(format_currency(0.0), "$0");
    assert_eq!(format_currency(f64::NAN), "$0");
}

#[wasm_bindgen_test]
fn contrast() {
    assert_eq!(contrast_color("#ffffff"), "#000000");
    assert_eq!(contrast_color("#eab308"), "#000000");
    assert_eq!(contrast_color("#1e3a8a"), "#ffffff");
    assert_eq!(contrast_color("red"), "#ffffff");
}

#[wasm_bindgen_test]
fn threshold_input() {
    assert_eq!(parse_threshold_value("$600,000"), Some(600_000.0));
    assert_eq!(parse_threshold_value("abc"), None);
    assert_eq!(normalize_threshold_name("  Stretch  "), Some("Stretch".to_string()));
    assert_eq!(normalize_threshold_name("   "), None);

    let draft = draft_from_input(" Stretch Goal ", "650,000", ThresholdColor::Blue).unwrap();
    assert_eq!(draft.name, "Stretch Goal");
    assert_eq!(draft.value, 650_000.0);
    assert_eq!(draft.color, "#3b82f6");
    assert!(draft.is_visible && !draft.is_locked);

    assert!(draft_from_input("", "1", ThresholdColor::Red).is_none());
    assert!(draft_from_input("Name", "n/a", ThresholdColor::Red).is_none());
}

#[wasm_bindgen_test]
fn palette() {
    let hexes: Vec<_> = ThresholdColor::iter().map(ThresholdColor::hex).collect();
    assert_eq!(hexes.len(), 8);
    assert_eq!(hexes[0], "#ef4444");
    assert!(hexes.iter().all(|h| h.len() == 7 && h.starts_with('#')));
}

#[wasm_bindgen_test]
fn handle_caption() {
    assert_eq!(threshold_caption("Performance Target", 575_000.0, false), "Performance Target: $575,000");
    assert_eq!(threshold_caption("Floor", 300_000.0, true), "Floor: $300,000 (Locked)");
}
