// =============================================================================
// SIZING.RS — Rank → font size curves
// =============================================================================

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

pub const SIZE_FUNCTION_LINEAR: &str = "linear";
pub const SIZE_FUNCTION_SQRT: &str = "sqrt";
pub const SIZE_FUNCTION_SQRT_INVERSE: &str = "sqrtInverse";

/// How font size falls off from the heaviest word (rank 0) to the lightest.
///
/// Every curve maps rank 0 to the maximum size and the last rank to the
/// minimum size, and never increases in between.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SizeFunction {
    /// Size drops in even steps per rank.
    #[default]
    Linear,
    /// Size drops with `sqrt(rank / n)`: steep for the first ranks, flat
    /// through the tail.
    Sqrt,
    /// Size drops with `(rank / n)²`: flat across the head, spreading the
    /// tail.
    SqrtInverse,
}

impl SizeFunction {
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => SIZE_FUNCTION_LINEAR,
            Self::Sqrt => SIZE_FUNCTION_SQRT,
            Self::SqrtInverse => SIZE_FUNCTION_SQRT_INVERSE,
        }
    }

    /// Fraction of the `[min, max]` range to drop at relative rank `t ∈ [0, 1]`.
    #[inline]
    fn falloff(self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::Sqrt => t.sqrt(),
            Self::SqrtInverse => t * t,
        }
    }
}

impl FromStr for SizeFunction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            SIZE_FUNCTION_LINEAR => Ok(Self::Linear),
            SIZE_FUNCTION_SQRT => Ok(Self::Sqrt),
            SIZE_FUNCTION_SQRT_INVERSE => Ok(Self::SqrtInverse),
            other => Err(ConfigError::UnknownSizeFunction(other.to_string())),
        }
    }
}

impl fmt::Display for SizeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Font size for the word at `rank` out of `total_words`.
///
/// The relative rank is `rank / (total_words - 1)`, so the heaviest word
/// gets `font_max_size` and the lightest gets `font_min_size`.  A single
/// word gets the maximum.  Ranks past the end clamp to the minimum.
///
/// The result always lies in `[font_min_size, font_max_size]`.
pub fn compute_size(
    rank: usize,
    total_words: usize,
    font_min_size: f32,
    font_max_size: f32,
    curve: SizeFunction,
) -> f32 {
    let t = if total_words <= 1 {
        0.0
    } else {
        (rank as f32 / (total_words - 1) as f32).clamp(0.0, 1.0)
    };

    let span = font_max_size - font_min_size;
    let size = font_max_size - span * curve.falloff(t);

    // Float error must not push us outside the configured bounds.
    size.clamp(font_min_size, font_max_size)
}
