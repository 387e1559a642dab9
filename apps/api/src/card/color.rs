//! Text colour resolution against the card background.
//!
//! Every contrast decision on the card goes through [`resolve_colors`], so
//! the headline, bio and link captions always agree on light vs dark.

use serde::{Deserialize, Serialize};

/// Backgrounds below a perceived brightness of 128 get light text. Kept in
/// thousandths so the comparison is exact integer math.
const DARK_THRESHOLD_MILLI: u32 = 128_000;

const LIGHT_TEXT: &str = "#ffffff";
const LIGHT_MUTED_TEXT: &str = "rgba(255, 255, 255, 0.7)";
const DARK_TEXT: &str = "#1f2937";
const DARK_MUTED_TEXT: &str = "rgba(31, 41, 55, 0.7)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Perceived brightness `0.299R + 0.587G + 0.114B`, scaled by 1000.
    fn brightness_milli(&self) -> u32 {
        299 * self.r as u32 + 587 * self.g as u32 + 114 * self.b as u32
    }

    pub fn is_dark(&self) -> bool {
        self.brightness_milli() < DARK_THRESHOLD_MILLI
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorScheme {
    pub is_dark: bool,
    pub text_color: String,
    pub muted_text_color: String,
}

/// Picks text colours for `background`. Total: anything that is not
/// `#RRGGBB` or `rgb(r, g, b)` resolves as a light background.
pub fn resolve_colors(background: &str) -> ColorScheme {
    let is_dark = parse_color(background)
        .map(|rgb| rgb.is_dark())
        .unwrap_or(false);

    let (text, muted) = if is_dark {
        (LIGHT_TEXT, LIGHT_MUTED_TEXT)
    } else {
        (DARK_TEXT, DARK_MUTED_TEXT)
    };

    ColorScheme {
        is_dark,
        text_color: text.to_string(),
        muted_text_color: muted.to_string(),
    }
}

/// Parses `#RRGGBB` or `rgb(r, g, b)`. Short hex, named colours and alpha
/// forms are not recognised.
pub fn parse_color(input: &str) -> Option<Rgb> {
    let s = input.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    parse_rgb_function(s)
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

fn parse_rgb_function(s: &str) -> Option<Rgb> {
    let lower = s.to_ascii_lowercase();
    let inner = lower.strip_prefix("rgb(")?.strip_suffix(')')?;

    let mut parts = inner.split(',').map(|p| p.trim().parse::<u8>());
    let r = parts.next()?.ok()?;
    let g = parts.next()?.ok()?;
    let b = parts.next()?.ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Rgb { r, g, b })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_is_dark_with_white_text() {
        let scheme = resolve_colors("#000000");
        assert!(scheme.is_dark);
        assert_eq!(scheme.text_color, "#ffffff");
        assert_eq!(scheme.muted_text_color, "rgba(255, 255, 255, 0.7)");
    }

    #[test]
    fn test_white_is_light_with_gray_text() {
        let scheme = resolve_colors("#FFFFFF");
        assert!(!scheme.is_dark);
        assert_eq!(scheme.text_color, "#1f2937");
        assert_eq!(scheme.muted_text_color, "rgba(31, 41, 55, 0.7)");
    }

    #[test]
    fn test_default_card_background_is_dark() {
        assert!(resolve_colors("#1a1f2e").is_dark);
    }

    #[test]
    fn test_threshold_boundary() {
        // 128 on every channel is exactly Y = 128 → light
        assert!(!resolve_colors("rgb(128, 128, 128)").is_dark);
        assert!(resolve_colors("rgb(127,127,127)").is_dark);
    }

    #[test]
    fn test_brightness_weights_green_most() {
        let green = Rgb { r: 0, g: 255, b: 0 };
        let blue = Rgb { r: 0, g: 0, b: 255 };
        assert!(green.brightness_milli() > blue.brightness_milli());
        assert!(!resolve_colors("#00ff00").is_dark);
        assert!(resolve_colors("#0000ff").is_dark);
    }

    #[test]
    fn test_unrecognised_formats_fall_back_to_light() {
        let inputs = [
            "",
            "black",
            "#000",
            "#00000",
            "#0000000",
            "#gg0000",
            "rgb(0,0)",
            "rgb(0,0,0,0)",
            "rgb(300,0,0)",
            "rgba(0,0,0,1)",
            "#ääää",
        ];
        for input in inputs {
            let scheme = resolve_colors(input);
            assert!(!scheme.is_dark, "{input:?} should resolve light");
            assert_eq!(scheme.text_color, "#1f2937");
        }
    }

    #[test]
    fn test_rgb_function_tolerates_whitespace_and_case() {
        assert_eq!(
            parse_color("  RGB( 10 , 20 ,30 ) "),
            Some(Rgb { r: 10, g: 20, b: 30 })
        );
    }

    #[test]
    fn test_contrast_invariant_over_grayscale() {
        for v in 0..=255u8 {
            let scheme = resolve_colors(&format!("#{v:02x}{v:02x}{v:02x}"));
            assert_eq!(scheme.is_dark, v < 128, "gray {v}");
            let expected = if scheme.is_dark { "#ffffff" } else { "#1f2937" };
            assert_eq!(scheme.text_color, expected);
        }
    }
}
