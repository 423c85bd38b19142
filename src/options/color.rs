//! Color parsing: hex (#RGB, #RRGGBB, #AARRGGBB) and platform color names.

use crate::overlay::Color;

/// Parse a color string (hex or named) into a [`Color`].
///
/// Accepts:
/// - `#RGB` / `RGB`: 3-digit hex, opaque
/// - `#RRGGBB` / `RRGGBB`: 6-digit hex, opaque
/// - `#AARRGGBB` / `AARRGGBB`: 8-digit hex, alpha first
/// - platform color names (case-insensitive): `red`, `darkgray`, etc.
///
/// ```
/// use scanframe::{options::parse_color, overlay::Color};
///
/// assert_eq!(parse_color("#008ED6"), Some(Color::rgb(0x00, 0x8E, 0xD6)));
/// assert_eq!(parse_color("#80ff0000").map(|c| c.a), Some(0x80));
/// assert_eq!(parse_color("Teal"), Some(Color::rgb(0x00, 0x80, 0x80)));
/// ```
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let hex = s.strip_prefix('#').unwrap_or(s);
    if let Some(c) = parse_hex(hex) {
        return Some(c);
    }

    lookup_named(s)
}

fn parse_hex(hex: &str) -> Option<Color> {
    // from_str_radix would also take a sign.
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let v = u32::from_str_radix(hex, 16).ok()?;
    match hex.len() {
        3 => {
            let nibble = |shift: u32| ((v >> shift) & 0xF) as u8 * 0x11;
            Some(Color::rgb(nibble(8), nibble(4), nibble(0)))
        }
        6 => Some(Color::from_argb(0xFF00_0000 | v)),
        8 => Some(Color::from_argb(v)),
        _ => None,
    }
}

/// Two ASCII hex digits as one byte.
pub(super) fn hex_byte(hi: u8, lo: u8) -> Option<u8> {
    let digit = |b: u8| char::from(b).to_digit(16);
    Some((digit(hi)? << 4 | digit(lo)?) as u8)
}

fn lookup_named(name: &str) -> Option<Color> {
    let lower = name.bytes().map(|b| b.to_ascii_lowercase());
    NAMED_COLORS
        .binary_search_by(|&(n, _)| n.bytes().cmp(lower.clone()))
        .ok()
        .map(|idx| Color::from_argb(NAMED_COLORS[idx].1))
}

/// Named colors the platform's color parser accepts, sorted for binary
/// search. Format: (name, 0xAARRGGBB)
const NAMED_COLORS: &[(&str, u32)] = &[
    ("aqua", 0xFF00FFFF),
    ("black", 0xFF000000),
    ("blue", 0xFF0000FF),
    ("cyan", 0xFF00FFFF),
    ("darkgray", 0xFF444444),
    ("darkgrey", 0xFF444444),
    ("fuchsia", 0xFFFF00FF),
    ("gray", 0xFF888888),
    ("green", 0xFF00FF00),
    ("grey", 0xFF888888),
    ("lightgray", 0xFFCCCCCC),
    ("lightgrey", 0xFFCCCCCC),
    ("lime", 0xFF00FF00),
    ("magenta", 0xFFFF00FF),
    ("maroon", 0xFF800000),
    ("navy", 0xFF000080),
    ("olive", 0xFF808000),
    ("purple", 0xFF800080),
    ("red", 0xFFFF0000),
    ("silver", 0xFFC0C0C0),
    ("teal", 0xFF008080),
    ("white", 0xFFFFFFFF),
    ("yellow", 0xFFFFFF00),
];
