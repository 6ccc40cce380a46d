use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::error::ConfigError;

// ── Color ─────────────────────────────────────────────────────────────────────

/// Straight-alpha RGBA color, one byte per channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const WHITE: Self = Self([0xff, 0xff, 0xff, 0xff]);
    pub const BLACK: Self = Self([0x00, 0x00, 0x00, 0xff]);
    pub const RED: Self = Self([0xff, 0x00, 0x00, 0xff]);
    pub const GREEN: Self = Self([0x00, 0xff, 0x00, 0xff]);
    pub const BLUE: Self = Self([0x00, 0x00, 0xff, 0xff]);
    pub const MAGENTA: Self = Self([0xff, 0x00, 0xff, 0xff]);
    pub const TRANSPARENT: Self = Self([0x00, 0x00, 0x00, 0x00]);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 0xff])
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba(self.0)
    }
}

impl From<image::Rgba<u8>> for Color {
    fn from(px: image::Rgba<u8>) -> Self {
        Self(px.0)
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    /// Parses `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidColor(s.to_string());
        let hex = s.trim().trim_start_matches('#');

        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let alpha = if hex.len() == 8 { channel(6)? } else { 0xff };

        Ok(Self([channel(0)?, channel(2)?, channel(4)?, alpha]))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")?;
        if a != 0xff {
            write!(f, "{a:02x}")?;
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ── Palette ───────────────────────────────────────────────────────────────────

/// Color used for words when no palette is configured.
pub const DEFAULT_WORD_COLOR: Color = Color::BLACK;

/// Ordered, non-empty list of word colors, handed out round-robin.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Returns `ConfigError::EmptyPalette` when `colors` is empty.
    pub fn new(colors: Vec<Color>) -> Result<Self, ConfigError> {
        if colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// Like [`Palette::new`], but an empty list becomes `[fallback]`.
    pub fn with_fallback(colors: Vec<Color>, fallback: Color) -> Self {
        if colors.is_empty() {
            Self { colors: vec![fallback] }
        } else {
            Self { colors }
        }
    }

    /// `colors[index mod len]`.
    #[inline]
    pub fn color_for(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self { colors: vec![DEFAULT_WORD_COLOR] }
    }
}
