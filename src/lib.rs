pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod mask;
pub mod measure;
pub mod palette;
pub mod renderer;
pub mod search;
pub mod sizing;

pub use config::{Config, ConfigBuilder, PlacementMode};
pub use engine::{place_words, Layout, PlacedWord, PlacementEngine, RunState, UnplacedWord, Word};
pub use error::{ConfigError, EngineError, Error, Result};
pub use geometry::BoundingBox;
pub use mask::Mask;
pub use measure::Measurer;
pub use palette::{Color, Palette};
pub use sizing::SizeFunction;
