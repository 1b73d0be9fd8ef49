//! Hex color helpers.

use thiserror::Error;


#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    #[error("invalid hex color {0:?}")]
    InvalidHex(String),

    #[error("opacity {0} is outside 0..=1")]
    InvalidOpacity(f64),
}


/// Convert `#rrggbb` or `#rgb` to an RGB tuple.
pub fn hex_to_rgb(hex: &str) -> Result<(u8, u8, u8), ColorError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    let invalid = || ColorError::InvalidHex(hex.to_string());

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

    match digits.len() {
        6 => Ok((channel(&digits[0..2])?, channel(&digits[2..4])?, channel(&digits[4..6])?)),
        3 => {
            let (r, g, b) = (channel(&digits[0..1])?, channel(&digits[1..2])?, channel(&digits[2..3])?);
            Ok((r * 17, g * 17, b * 17))
        }
        _ => Err(invalid()),
    }
}


/// Translucent fill color for a base hex color, e.g. `rgba(31, 119, 180, 0.2)`.
pub fn hex_to_rgba(hex: &str, opacity: f64) -> Result<String, ColorError> {
    if !(0.0..=1.0).contains(&opacity) {
        return Err(ColorError::InvalidOpacity(opacity));
    }

    let (r, g, b) = hex_to_rgb(hex)?;
    Ok(format!("rgba({}, {}, {}, {})", r, g, b, opacity))
}
