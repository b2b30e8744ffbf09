use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Background applied when nothing valid has been persisted.
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

pub(crate) const DEFAULT_DIGITS: &str = "ffffff";

/// A validated `#RRGGBB` background color.
///
/// Only constructible through [`ThemeColor::parse`] (or `FromStr`), so a
/// value of this type always carries exactly six hex digits. The case of the
/// digits is kept as supplied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThemeColor {
    digits: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("'{0}' is not a 6-digit hex color")]
pub struct InvalidThemeColor(pub String);

impl ThemeColor {
    /// Accepts `RRGGBB` with any number of leading `#` characters.
    pub fn parse(candidate: &str) -> Option<Self> {
        let digits = candidate.trim_start_matches('#');
        is_hex_triplet(digits).then(|| Self {
            digits: digits.to_string(),
        })
    }

    pub fn default_background() -> Self {
        Self {
            digits: DEFAULT_DIGITS.to_string(),
        }
    }

    /// The six hex digits without the leading `#`.
    pub fn digits(&self) -> &str {
        &self.digits
    }
}

impl Default for ThemeColor {
    fn default() -> Self {
        Self::default_background()
    }
}

impl fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.digits)
    }
}

impl FromStr for ThemeColor {
    type Err = InvalidThemeColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidThemeColor(s.to_string()))
    }
}

/// 8-bit RGB components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        red: 0xff,
        green: 0xff,
        blue: 0xff,
    };

    /// Parses six bare hex digits. Returns `None` for anything else.
    pub fn from_hex(digits: &str) -> Option<Self> {
        if !is_hex_triplet(digits) {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(digits.get(range)?, 16).ok()
        };
        Some(Self {
            red: channel(0..2)?,
            green: channel(2..4)?,
            blue: channel(4..6)?,
        })
    }

    /// Perceptual luminance in `[0, 1]` (ITU-R BT.601 weights).
    pub fn luminance(&self) -> f64 {
        (0.299 * f64::from(self.red)
            + 0.587 * f64::from(self.green)
            + 0.114 * f64::from(self.blue))
            / 255.0
    }
}

pub(crate) fn is_hex_triplet(digits: &str) -> bool {
    digits.len() == 6 && digits.bytes().all(|b| b.is_ascii_hexdigit())
}
