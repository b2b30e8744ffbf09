use std::fmt;

use super::color::{DEFAULT_BACKGROUND, DEFAULT_DIGITS, Rgb, is_hex_triplet};

/// Backgrounds brighter than this get dark text.
pub const LUMINANCE_THRESHOLD: f64 = 0.5;

/// Foreground color chosen for legibility against a background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContrastColor {
    Black,
    White,
}

impl ContrastColor {
    pub const fn hex(self) -> &'static str {
        match self {
            ContrastColor::Black => "#000000",
            ContrastColor::White => "#ffffff",
        }
    }

    /// Strictly brighter than the threshold selects black; exactly 0.5 is dark.
    pub fn for_luminance(luminance: f64) -> Self {
        if luminance > LUMINANCE_THRESHOLD {
            ContrastColor::Black
        } else {
            ContrastColor::White
        }
    }
}

impl fmt::Display for ContrastColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}

/// Resolves the text color for any background string. Never fails: absent,
/// empty or malformed input is treated as the default white background.
pub fn contrast_color(background: Option<&str>) -> ContrastColor {
    let candidate = background
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_BACKGROUND);

    let digits = candidate.trim_start_matches('#');
    let digits = if is_hex_triplet(digits) {
        digits
    } else {
        DEFAULT_DIGITS
    };

    let rgb = Rgb::from_hex(digits).unwrap_or(Rgb::WHITE);
    ContrastColor::for_luminance(rgb.luminance())
}

/// The `(background, text)` pair handed to every rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemePalette {
    pub background: String,
    pub text: ContrastColor,
}

impl ThemePalette {
    pub fn resolve(background: String) -> Self {
        let text = contrast_color(Some(&background));
        Self { background, text }
    }
}
