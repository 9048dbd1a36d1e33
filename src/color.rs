// SPDX-License-Identifier: PMPL-1.0-or-later
//! Color parsing and WCAG luminance math.
//!
//! Accepts the color notations that show up in inline style declarations:
//! - hex: `#fff`, `#ffffff` (a leading `#` is optional for bare 3/6 digit values)
//! - functional: `rgb(r, g, b)` and `rgba(r, g, b, a)` (alpha is ignored)
//! - a closed set of common named colors
//!
//! Unknown names and the CSS-wide keywords resolve to `None`. A `#` value with
//! the wrong number of digits resolves to black instead of failing.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static RGB_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgba?\(\s*(\d+)\s*(?:,\s*|\s+)(\d+)\s*(?:,\s*|\s+)(\d+)").expect("valid regex")
});

/// Values that mean "no color of its own" for contrast purposes
const KEYWORDS_WITHOUT_COLOR: &[&str] = &["transparent", "inherit", "initial", "unset"];

/// An opaque sRGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn red(&self) -> u8 {
        self.r
    }

    pub fn green(&self) -> u8 {
        self.g
    }

    pub fn blue(&self) -> u8 {
        self.b
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Parse any supported CSS color value
pub fn parse_color(value: &str) -> Option<Color> {
    let trimmed = value.trim().to_lowercase();
    if trimmed.is_empty() || KEYWORDS_WITHOUT_COLOR.contains(&trimmed.as_str()) {
        return None;
    }

    if let Some(digits) = trimmed.strip_prefix('#') {
        Some(parse_hex_digits(digits).unwrap_or(Color::BLACK))
    } else if trimmed.starts_with("rgb") {
        parse_rgb_color(&trimmed)
    } else {
        parse_named_color(&trimmed).or_else(|| parse_hex_digits(&trimmed))
    }
}

/// Parse 3 or 6 hex digits (no `#`); anything else is rejected
fn parse_hex_digits(digits: &str) -> Option<Color> {
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match digits.len() {
        3 => Some(Color::rgb(
            channel(&digits[0..1].repeat(2))?,
            channel(&digits[1..2].repeat(2))?,
            channel(&digits[2..3].repeat(2))?,
        )),
        6 => Some(Color::rgb(
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        _ => None,
    }
}

/// Parse an `rgb()` or `rgba()` color; channels above 255 are clamped
pub fn parse_rgb_color(value: &str) -> Option<Color> {
    let caps = RGB_FUNCTION.captures(value.trim())?;
    let channel = |i: usize| -> Option<u8> {
        let v: u32 = caps[i].parse().ok()?;
        Some(v.min(255) as u8)
    };
    Some(Color::rgb(channel(1)?, channel(2)?, channel(3)?))
}

/// Look up a named CSS color
pub fn parse_named_color(name: &str) -> Option<Color> {
    let (r, g, b) = match name {
        "white" => (255, 255, 255),
        "black" => (0, 0, 0),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "cyan" | "aqua" => (0, 255, 255),
        "magenta" | "fuchsia" => (255, 0, 255),
        "gray" | "grey" => (128, 128, 128),
        "silver" => (192, 192, 192),
        "maroon" => (128, 0, 0),
        "olive" => (128, 128, 0),
        "lime" => (0, 255, 0),
        "teal" => (0, 128, 128),
        "navy" => (0, 0, 128),
        "purple" => (128, 0, 128),
        "orange" => (255, 165, 0),
        _ => return None,
    };
    Some(Color::rgb(r, g, b))
}

/// Lowercase `#rrggbb` form of a color
pub fn to_hex(color: Color) -> String {
    color.to_string()
}

/// Calculate relative luminance per WCAG 2.1
/// <https://www.w3.org/TR/WCAG21/#dfn-relative-luminance>
pub fn relative_luminance(color: Color) -> f64 {
    let [r, g, b] = [color.r, color.g, color.b].map(|c| {
        let v = c as f64 / 255.0;
        if v <= 0.03928 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    });
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// Contrast ratio between two colors, in `[1, 21]` and independent of argument order
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let l1 = relative_luminance(a);
    let l2 = relative_luminance(b);
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_color("#fff"), Some(Color::WHITE));
        assert_eq!(parse_color("#000"), Some(Color::BLACK));
        assert_eq!(parse_color("#FF0000"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(parse_color("00ff00"), Some(Color::rgb(0, 255, 0)));
        assert_eq!(parse_color("  #AbC  "), Some(Color::rgb(0xaa, 0xbb, 0xcc)));
    }

    #[test]
    fn test_malformed_hex_is_black() {
        assert_eq!(parse_color("#ab"), Some(Color::BLACK));
        assert_eq!(parse_color("#abcd"), Some(Color::BLACK));
        assert_eq!(parse_color("#1234567"), Some(Color::BLACK));
        assert_eq!(parse_color("#zzzzzz"), Some(Color::BLACK));
    }

    #[test]
    fn test_parse_rgb_color() {
        assert_eq!(parse_color("rgb(255, 0, 0)"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(parse_color("rgba(0, 128, 0, 0.5)"), Some(Color::rgb(0, 128, 0)));
        assert_eq!(parse_color("RGB(10 20 30)"), Some(Color::rgb(10, 20, 30)));
        assert_eq!(parse_color("rgb(300, 0, 0)"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(parse_color("rgb(oops)"), None);
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(parse_color("White"), Some(Color::WHITE));
        assert_eq!(parse_color("grey"), parse_color("gray"));
        assert_eq!(parse_color("orange"), Some(Color::rgb(255, 165, 0)));
        assert_eq!(parse_color("rebeccapurple"), None);
    }

    #[test]
    fn test_keywords_without_color() {
        for keyword in ["transparent", "inherit", "initial", "UNSET", ""] {
            assert_eq!(parse_color(keyword), None, "{keyword:?} should not parse");
        }
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(Color::rgb(0, 10, 255)), "#000aff");
        assert_eq!(to_hex(Color::WHITE), "#ffffff");
    }

    #[test]
    fn test_relative_luminance() {
        assert!((relative_luminance(Color::WHITE) - 1.0).abs() < 1e-9);
        assert!(relative_luminance(Color::BLACK).abs() < 1e-9);
    }

    #[test]
    fn test_contrast_ratio_black_white() {
        let ratio = contrast_ratio(Color::BLACK, Color::WHITE);
        assert!((ratio - 21.0).abs() < 1e-3, "Black on white should be 21:1, got {:.3}", ratio);
    }

    #[test]
    fn test_contrast_ratio_mid_gray() {
        let ratio = contrast_ratio(Color::rgb(0x77, 0x77, 0x77), Color::WHITE);
        assert!((ratio - 4.48).abs() < 0.01, "got {:.3}", ratio);
    }

    fn any_color() -> impl Strategy<Value = Color> {
        (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Color::rgb(r, g, b))
    }

    proptest! {
        #[test]
        fn contrast_is_symmetric(a in any_color(), b in any_color()) {
            prop_assert_eq!(contrast_ratio(a, b), contrast_ratio(b, a));
        }

        #[test]
        fn contrast_with_self_is_one(c in any_color()) {
            prop_assert!((contrast_ratio(c, c) - 1.0).abs() < 1e-12);
        }

        #[test]
        fn contrast_is_bounded(a in any_color(), b in any_color()) {
            let ratio = contrast_ratio(a, b);
            prop_assert!((1.0..=21.0 + 1e-9).contains(&ratio));
        }

        #[test]
        fn long_hex_round_trips(c in any_color(), upper in any::<bool>(), hash in any::<bool>()) {
            let hex = to_hex(c);
            let mut input = if upper { hex.to_uppercase() } else { hex.clone() };
            if !hash {
                input.remove(0);
            }
            prop_assert_eq!(parse_color(&input).map(to_hex), Some(hex));
        }

        #[test]
        fn short_hex_expands(r in 0u8..16, g in 0u8..16, b in 0u8..16) {
            let short = format!("#{:x}{:x}{:x}", r, g, b);
            let expected = format!("#{0:x}{0:x}{1:x}{1:x}{2:x}{2:x}", r, g, b);
            prop_assert_eq!(parse_color(&short).map(to_hex), Some(expected));
        }
    }
}
