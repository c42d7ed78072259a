//! Hex color values as edited by the parameter panel.
//!
//! Colors are stored as strings (`"#ff6030"`) in [`FieldParameters`] and only
//! interpreted when the generator mixes them. Parsing yields sRGB bytes;
//! [`resolve`] converts them into the linear working space used for vertex
//! colors, since the render target is an sRGB surface.
//!
//! [`FieldParameters`]: crate::config::FieldParameters

use crate::error::FieldError;
use glam::Vec3;

/// Parse `#rrggbb`, `#rgb` or `0xrrggbb` into sRGB bytes.
pub fn parse_hex(value: &str) -> Option<[u8; 3]> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"))?;

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    match digits.len() {
        6 => {
            let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
            let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
            let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
            Some([r, g, b])
        }
        3 => {
            // #abc expands to #aabbcc
            let mut out = [0u8; 3];
            for (slot, c) in out.iter_mut().zip(digits.chars()) {
                let nibble = c.to_digit(16)? as u8;
                *slot = nibble * 17;
            }
            Some(out)
        }
        _ => None,
    }
}

/// Format sRGB bytes as `#rrggbb`.
pub fn to_hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// Convert one sRGB-encoded channel in `[0, 1]` to linear.
#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.0773993808
    } else {
        (c * 0.9478672986 + 0.0521327014).powf(2.4)
    }
}

/// Parse a color parameter into a linear RGB vector with channels in `[0, 1]`.
///
/// `parameter` names the option for the error message.
pub fn resolve(parameter: &'static str, value: &str) -> Result<Vec3, FieldError> {
    let [r, g, b] = parse_hex(value).ok_or_else(|| FieldError::InvalidConfiguration {
        parameter,
        value: value.to_string(),
    })?;

    Ok(Vec3::new(
        srgb_to_linear(r as f32 / 255.0),
        srgb_to_linear(g as f32 / 255.0),
        srgb_to_linear(b as f32 / 255.0),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_and_short_forms() {
        assert_eq!(parse_hex("#ff6030"), Some([0xff, 0x60, 0x30]));
        assert_eq!(parse_hex("0x1b3984"), Some([0x1b, 0x39, 0x84]));
        assert_eq!(parse_hex("#fa0"), Some([0xff, 0xaa, 0x00]));
        assert_eq!(parse_hex("  #FFFFFF "), Some([255, 255, 255]));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_hex("ff6030"), None);
        assert_eq!(parse_hex("#ff603"), None);
        assert_eq!(parse_hex("#gg6030"), None);
        assert_eq!(parse_hex("#+f6030"), None);
        assert_eq!(parse_hex(""), None);
    }

    #[test]
    fn test_hex_formatting() {
        assert_eq!(to_hex([0xff, 0x60, 0x30]), "#ff6030");
        assert_eq!(parse_hex(&to_hex([1, 2, 3])), Some([1, 2, 3]));
    }

    #[test]
    fn test_linear_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-5);
        // Mid-grey is darker in linear space
        assert!(srgb_to_linear(0.5) < 0.25);
    }

    #[test]
    fn test_resolve_reports_parameter() {
        let err = resolve("outsideColor", "blue").unwrap_err();
        assert_eq!(
            err,
            FieldError::InvalidConfiguration {
                parameter: "outsideColor",
                value: "blue".into()
            }
        );

        let white = resolve("insideColor", "#ffffff").unwrap();
        assert!((white - Vec3::ONE).abs().max_element() < 1e-5);
    }
}
