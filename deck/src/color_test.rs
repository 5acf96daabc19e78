#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn parse_supports_short_and_long_forms() {
    assert_eq!(Rgb::parse("#ABC"), Some(Rgb::new(170, 187, 204)));
    assert_eq!(Rgb::parse("  #a1B2c3 "), Some(Rgb::new(161, 178, 195)));
}

#[test]
fn parse_rejects_invalid_inputs() {
    assert_eq!(Rgb::parse("AABBCC"), None);
    assert_eq!(Rgb::parse("#12"), None);
    assert_eq!(Rgb::parse("#abcd"), None);
    assert_eq!(Rgb::parse("#12GG34"), None);
}

#[test]
fn parse_or_default_falls_back_to_item_blue() {
    assert_eq!(Rgb::parse_or_default(None), Rgb::new(0x34, 0x98, 0xdb));
    assert_eq!(Rgb::parse_or_default(Some("teal")), Rgb::new(0x34, 0x98, 0xdb));
    assert_eq!(Rgb::parse_or_default(Some("#ff0000")), Rgb::new(255, 0, 0));
}

#[test]
fn packed_value_round_trips() {
    let c = Rgb::from_u32(0x12_34_56);
    assert_eq!(c, Rgb::new(0x12, 0x34, 0x56));
    assert_eq!(c.to_u32(), 0x12_34_56);
}

#[test]
fn to_hex_is_lowercase() {
    assert_eq!(Rgb::new(0xAB, 0xCD, 0xEF).to_hex(), "#abcdef");
    assert_eq!(Rgb::new(1, 2, 3).to_string(), "#010203");
}

// --- lighten / darken ---

#[test]
fn zero_percent_is_identity() {
    let c = Rgb::from_u32(0x34_98_db);
    assert_eq!(lighten(c, 0.0), c);
    assert_eq!(darken(c, 0.0), c);
}

#[test]
fn lighten_adds_rounded_delta() {
    // round(2.55 * 15) = 38
    let c = lighten(Rgb::new(0x34, 0x98, 0xdb), 15.0);
    assert_eq!(c, Rgb::new(0x34 + 38, 0x98 + 38, 0xdb + 36));
}

#[test]
fn darken_subtracts_rounded_delta() {
    // round(2.55 * 30) = 77
    let c = darken(Rgb::new(100, 200, 50), 30.0);
    assert_eq!(c, Rgb::new(23, 123, 0));
}

#[test]
fn lighten_clamps_at_white() {
    assert_eq!(lighten(Rgb::new(250, 250, 250), 50.0), Rgb::new(255, 255, 255));
}

#[test]
fn darken_clamps_at_black() {
    assert_eq!(darken(Rgb::new(5, 5, 5), 50.0), Rgb::new(0, 0, 0));
}

// --- contrast ---

#[test]
fn contrast_for_white_is_dark_text() {
    assert_eq!(contrast_color(Rgb::from_u32(0xFF_FF_FF)), DARK_TEXT);
}

#[test]
fn contrast_for_black_is_light_text() {
    assert_eq!(contrast_color(Rgb::from_u32(0x00_00_00)), LIGHT_TEXT);
}

#[test]
fn contrast_uses_weighted_luminance() {
    // Pure green is bright (149.7), pure blue is dark (29.1).
    assert_eq!(contrast_color(Rgb::new(0, 255, 0)), DARK_TEXT);
    assert_eq!(contrast_color(Rgb::new(0, 0, 255)), LIGHT_TEXT);
}

// --- Rgba ---

#[test]
fn rgba_css_uses_hex_when_opaque() {
    assert_eq!(Rgba::new(0xe0, 0xe0, 0xe0, 1.0).to_css(), "#e0e0e0");
}

#[test]
fn rgba_css_uses_rgba_when_translucent() {
    assert_eq!(DECK_FILL.to_css(), "rgba(240, 240, 240, 0.5)");
}
