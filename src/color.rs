//! Deterministic region colors and hex color handling
//!
//! Region identifiers that carry no explicit color get one derived from a
//! fixed string hash, so the renderer and the extractor agree on the color
//! for the same region without coordinating.

use image::Rgba;

use crate::error::MapError;

/// Alpha suffix giving 30% opacity, appended to colors that lack one.
pub const DEFAULT_ALPHA_SUFFIX: &str = "4D";

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a over the identifier's UTF-8 bytes. Must stay a fixed, portable
/// hash: the generated color has to match across runs and processes.
fn fnv1a(s: &str) -> u64 {
    s.bytes()
        .fold(FNV_OFFSET, |h, b| (h ^ b as u64).wrapping_mul(FNV_PRIME))
}

/// Generate a `#RRGGBB` color for a region identifier.
///
/// Red, green, and blue come from the low 24 bits of the hash
/// (masks 0xFF0000, 0x00FF00, 0x0000FF).
pub fn generate_color(region_id: &str) -> String {
    let h = fnv1a(region_id);
    let r = (h & 0xFF0000) >> 16;
    let g = (h & 0x00FF00) >> 8;
    let b = h & 0x0000FF;
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// Generated color with the 30% alpha suffix, the form written into
/// extracted configs and used for translucent layers.
pub fn generate_layer_color(region_id: &str) -> String {
    format!("{}{}", generate_color(region_id), DEFAULT_ALPHA_SUFFIX)
}

/// Append the 30% alpha suffix to a `#RRGGBB` color; colors that already
/// carry an alpha channel pass through unchanged.
pub fn normalize_alpha(hex: &str) -> String {
    if hex.len() == 7 {
        format!("{}{}", hex, DEFAULT_ALPHA_SUFFIX)
    } else {
        hex.to_string()
    }
}

/// Parse a `#RRGGBB` or `#RRGGBBAA` color string. A missing alpha channel
/// defaults to fully opaque.
pub fn parse_hex(hex: &str) -> Result<Rgba<u8>, MapError> {
    let bad = || MapError::Config(format!("invalid color string: {:?}", hex));

    if !hex.starts_with('#') || (hex.len() != 7 && hex.len() != 9) {
        return Err(bad());
    }
    // Byte-indexed slicing, so multibyte characters must not panic here
    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .ok_or_else(bad)
    };

    let r = channel(1)?;
    let g = channel(3)?;
    let b = channel(5)?;
    let a = if hex.len() == 9 { channel(7)? } else { 0xFF };
    Ok(Rgba([r, g, b, a]))
}

/// Resolve a region's fill color: the explicit config color when present,
/// otherwise a generated one, always carrying an alpha channel.
pub fn resolve(region_id: &str, explicit: Option<&str>) -> Result<Rgba<u8>, MapError> {
    let hex = match explicit {
        Some(c) => normalize_alpha(c),
        None => generate_layer_color(region_id),
    };
    parse_hex(&hex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_is_deterministic() {
        let a = generate_color("Ascadian Isles Region");
        let b = generate_color("Ascadian Isles Region");
        assert_eq!(a, b);
        // Fixed hash, so the value is stable across builds too
        assert_eq!(a.len(), 7);
        assert!(a.starts_with('#'));
    }

    #[test]
    fn test_distinct_ids_usually_differ() {
        assert_ne!(generate_color("Sheogorad"), generate_color("West Gash"));
    }

    #[test]
    fn test_channels_come_from_low_hash_bits() {
        let h = fnv1a("Sheogorad");
        let expected = format!(
            "#{:02X}{:02X}{:02X}",
            (h & 0xFF0000) >> 16,
            (h & 0x00FF00) >> 8,
            h & 0x0000FF
        );
        assert_eq!(generate_color("Sheogorad"), expected);
    }

    #[test]
    fn test_layer_color_has_alpha_suffix() {
        let c = generate_layer_color("Sheogorad");
        assert_eq!(c.len(), 9);
        assert!(c.ends_with("4D"));
        assert_eq!(&c[..7], generate_color("Sheogorad"));
    }

    #[test]
    fn test_normalize_alpha() {
        assert_eq!(normalize_alpha("#112233"), "#1122334D");
        assert_eq!(normalize_alpha("#11223380"), "#11223380");
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#112233").unwrap(), Rgba([0x11, 0x22, 0x33, 0xFF]));
        assert_eq!(
            parse_hex("#1122334D").unwrap(),
            Rgba([0x11, 0x22, 0x33, 0x4D])
        );
        assert!(parse_hex("112233").is_err());
        assert!(parse_hex("#11223").is_err());
        assert!(parse_hex("#11ZZ33").is_err());
    }

    #[test]
    fn test_parse_hex_multibyte_input_is_an_error() {
        // 7 bytes but not 7 chars; byte slicing must not panic mid-char
        let err = parse_hex("#1\u{e9}233").unwrap_err();
        assert!(matches!(err, crate::error::MapError::Config(_)));
        assert!(parse_hex("#12345\u{e9}7").is_err());
    }

    #[test]
    fn test_resolve_explicit_and_generated() {
        let explicit = resolve("R1", Some("#FF0000")).unwrap();
        assert_eq!(explicit, Rgba([0xFF, 0x00, 0x00, 0x4D]));

        let passthrough = resolve("R1", Some("#FF000080")).unwrap();
        assert_eq!(passthrough, Rgba([0xFF, 0x00, 0x00, 0x80]));

        let generated = resolve("R1", None).unwrap();
        assert_eq!(generated, parse_hex(&generate_layer_color("R1")).unwrap());
        assert_eq!(generated.0[3], 0x4D);
    }
}
