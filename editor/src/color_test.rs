use serde_json::json;

use super::*;

#[test]
fn parse_hex_rgb_supports_short_and_long_forms() {
    assert_eq!(parse_hex_rgb("#ABC"), Some((170, 187, 204)));
    assert_eq!(parse_hex_rgb("  #a1B2c3 "), Some((161, 178, 195)));
    assert_eq!(parse_hex_rgb("#ff0000"), Some((255, 0, 0)));
}

#[test]
fn parse_hex_rgb_rejects_invalid_inputs() {
    assert_eq!(parse_hex_rgb("AABBCC"), None);
    assert_eq!(parse_hex_rgb("#12"), None);
    assert_eq!(parse_hex_rgb("#abcd"), None);
    assert_eq!(parse_hex_rgb("#12GG34"), None);
    assert_eq!(parse_hex_rgb("#ééé"), None);
}

#[test]
fn to_hex_is_lowercase() {
    assert_eq!(to_hex((170, 187, 204)), "#aabbcc");
}

#[test]
fn unit_rgba_normalizes_and_forces_opaque() {
    assert_eq!(unit_rgba((255, 0, 0)), [1.0, 0.0, 0.0, 1.0]);
    let [r, g, b, a] = unit_rgba((51, 102, 0));
    assert!((r - 0.2).abs() < 1e-9);
    assert!((g - 0.4).abs() < 1e-9);
    assert!(b.abs() < f64::EPSILON);
    assert!((a - 1.0).abs() < f64::EPSILON);
}

#[test]
fn hex_from_unit_rgba_reads_static_colors() {
    assert_eq!(hex_from_unit_rgba(&json!([1, 0, 0, 1])).as_deref(), Some("#ff0000"));
    assert_eq!(hex_from_unit_rgba(&json!([0.2, 0.4, 0.6, 0.5])).as_deref(), Some("#336699"));
}

#[test]
fn hex_from_unit_rgba_rejects_other_shapes() {
    assert_eq!(hex_from_unit_rgba(&json!([1, 0, 0])), None);
    assert_eq!(hex_from_unit_rgba(&json!([{ "t": 0 }, {}, {}, {}])), None);
    assert_eq!(hex_from_unit_rgba(&json!("#ff0000")), None);
}
