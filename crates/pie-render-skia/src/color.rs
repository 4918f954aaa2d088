// File: crates/pie-render-skia/src/color.rs
// Summary: CSS-style colour strings to Skia colours, plus the fallback slice palette.

use skia_safe as skia;

/// Slice colours used when a slice has no explicit colour, cycled by index.
pub const PALETTE: [skia::Color; 9] = [
    skia::Color::new(0xFF54_70C6),
    skia::Color::new(0xFF91_CC75),
    skia::Color::new(0xFFFA_C858),
    skia::Color::new(0xFFEE_6666),
    skia::Color::new(0xFF73_C0DE),
    skia::Color::new(0xFF3B_A272),
    skia::Color::new(0xFFFC_8452),
    skia::Color::new(0xFF9A_60B4),
    skia::Color::new(0xFFEA_7CCC),
];

pub fn palette(index: usize) -> skia::Color {
    PALETTE[index % PALETTE.len()]
}

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`. Anything else is `None`.
pub fn parse_hex(s: &str) -> Option<skia::Color> {
    let hex = s.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            let nib = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some(skia::Color::from_argb(255, nib(0)?, nib(1)?, nib(2)?))
        }
        6 => Some(skia::Color::from_argb(255, byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(skia::Color::from_argb(byte(6)?, byte(0)?, byte(2)?, byte(4)?)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_long_and_alpha_forms() {
        assert_eq!(parse_hex("#fff"), Some(skia::Color::from_argb(255, 255, 255, 255)));
        assert_eq!(parse_hex("#e58f8f"), Some(skia::Color::from_argb(255, 0xe5, 0x8f, 0x8f)));
        assert_eq!(parse_hex("#00000080"), Some(skia::Color::from_argb(0x80, 0, 0, 0)));
        assert_eq!(parse_hex("red"), None);
        assert_eq!(parse_hex("#12345"), None);
    }

    #[test]
    fn palette_cycles() {
        assert_eq!(palette(0), palette(PALETTE.len()));
    }
}
