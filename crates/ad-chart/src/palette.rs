//! Discrete pastel palette.

/// Ordered category colors; category `i` gets entry `i % len`.
pub const PASTEL_PALETTE: [&str; 10] = [
    "#D1BAFF", // lavender
    "#FFDFBA", // orange
    "#BAFFC9", // green
    "#FFFFBA", // yellow
    "#BAE1FF", // blue
    "#E1BAFF", // purple
    "#FFC9DE", // pink
    "#C9FFD5", // mint
    "#FFD1DC", // peach
    "#FFB3BA", // red
];

pub fn palette_color(index: usize) -> &'static str {
    PASTEL_PALETTE[index % PASTEL_PALETTE.len()]
}

/// Parse `#RRGGBB`.
pub fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles() {
        assert_eq!(palette_color(0), "#D1BAFF");
        assert_eq!(palette_color(10), palette_color(0));
        assert_eq!(palette_color(23), palette_color(3));
    }

    #[test]
    fn every_entry_parses() {
        for hex in PASTEL_PALETTE {
            assert!(parse_hex(hex).is_some(), "{hex}");
        }
        assert_eq!(parse_hex("#FFB3BA"), Some([0xFF, 0xB3, 0xBA]));
        assert_eq!(parse_hex("FFB3BA"), None);
        assert_eq!(parse_hex("#FFB3"), None);
    }
}
