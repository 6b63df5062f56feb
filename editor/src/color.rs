//! Color helpers: hex parsing and Lottie's normalized RGBA form.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use serde_json::Value;

/// Parse `#RGB` or `#RRGGBB` values into RGB channels.
#[must_use]
pub fn parse_hex_rgb(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16);
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16);
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16);
            match (r, g, b) {
                (Ok(r), Ok(g), Ok(b)) => Some((r, g, b)),
                _ => None,
            }
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16);
            let g = u8::from_str_radix(&hex[2..4], 16);
            let b = u8::from_str_radix(&hex[4..6], 16);
            match (r, g, b) {
                (Ok(r), Ok(g), Ok(b)) => Some((r, g, b)),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Canonical lowercase `#rrggbb`.
#[must_use]
pub fn to_hex((r, g, b): (u8, u8, u8)) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Lottie color value for an opaque RGB color: each channel divided by 255,
/// alpha fixed at 1.
#[must_use]
pub fn unit_rgba((r, g, b): (u8, u8, u8)) -> [f64; 4] {
    [f64::from(r) / 255.0, f64::from(g) / 255.0, f64::from(b) / 255.0, 1.0]
}

/// Read a static Lottie color (`[r, g, b, a]` in 0..=1) back as hex, for
/// seeding a color picker. Alpha is ignored.
#[must_use]
pub fn hex_from_unit_rgba(k: &Value) -> Option<String> {
    let channels = k.as_array()?;
    if channels.len() != 4 {
        return None;
    }
    let mut rgb = [0u8; 3];
    for (slot, channel) in rgb.iter_mut().zip(channels) {
        *slot = unit_to_byte(channel.as_f64()?);
    }
    Some(to_hex((rgb[0], rgb[1], rgb[2])))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn unit_to_byte(unit: f64) -> u8 {
    // 0..=255 after the clamp.
    (unit.clamp(0.0, 1.0) * 255.0).round() as u8
}
