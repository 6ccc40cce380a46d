use std::fmt;

use crate::engine::RunState;

// ── ConfigError ───────────────────────────────────────────────────────────────

/// Fatal configuration problem, reported before any placement starts.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `sizeFunction` named a curve that does not exist.
    UnknownSizeFunction(String),
    /// Canvas width or height was zero.
    InvalidDimensions { width: u32, height: u32 },
    /// `font_min_size > font_max_size`, or a bound was not a positive number.
    InvalidFontRange { min: f32, max: f32 },
    /// Palette was empty and no fallback color was available.
    EmptyPalette,
    /// A color string was not `#rrggbb` or `#rrggbbaa`.
    InvalidColor(String),
    /// A search tuning constant was zero, negative or not finite.
    InvalidSearchParams(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSizeFunction(name) => write!(
                f,
                "no such size function {name:?} (expected \"linear\", \"sqrt\" or \"sqrtInverse\")"
            ),
            Self::InvalidDimensions { width, height } => {
                write!(f, "canvas must be non-empty, got {width}x{height}")
            }
            Self::InvalidFontRange { min, max } => {
                write!(f, "invalid font size range {min}..={max}")
            }
            Self::EmptyPalette => write!(f, "color palette is empty"),
            Self::InvalidColor(s) => write!(f, "invalid color {s:?}"),
            Self::InvalidSearchParams(field) => {
                write!(f, "search parameter {field} must be a positive finite number")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ── EngineError ───────────────────────────────────────────────────────────────

/// Misuse of a `PlacementEngine`'s run lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// `run` was called while the engine was not in `RunState::Ready`.
    NotReady(RunState),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady(state) => {
                write!(f, "placement engine is {state:?}; call reset() before running again")
            }
        }
    }
}

impl std::error::Error for EngineError {}

// ── Error ─────────────────────────────────────────────────────────────────────

/// Crate-level error covering configuration, placement and I/O.
#[derive(Debug)]
pub enum Error {
    Config(ConfigError),
    Engine(EngineError),
    Io(std::io::Error),
    Json(serde_json::Error),
    Image(image::ImageError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration error: {e}"),
            Self::Engine(e) => write!(f, "engine error: {e}"),
            Self::Io(e) => write!(f, "i/o error: {e}"),
            Self::Json(e) => write!(f, "json error: {e}"),
            Self::Image(e) => write!(f, "image error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Engine(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Image(e) => Some(e),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<EngineError> for Error {
    fn from(e: EngineError) -> Self {
        Self::Engine(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
