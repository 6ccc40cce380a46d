use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ConfigError, Result};
use crate::geometry::BoundingBox;
use crate::mask::Mask;
use crate::palette::{Color, Palette, DEFAULT_WORD_COLOR};
use crate::search::SearchParams;
use crate::sizing::SizeFunction;

pub const DEFAULT_FONT_MAX_SIZE: f32 = 500.0;
pub const DEFAULT_FONT_MIN_SIZE: f32 = 10.0;
pub const DEFAULT_WIDTH: u32 = 2048;
pub const DEFAULT_HEIGHT: u32 = 2048;
pub const DEFAULT_BACKGROUND: Color = Color::WHITE;
/// Grid cell edge, in canvas pixels, for image-derived masks.
pub const DEFAULT_MASK_CELL: u32 = 4;

// ── PlacementMode ─────────────────────────────────────────────────────────────

/// Which probe strategy the engine uses for every word.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlacementMode {
    /// Outward spiral from the canvas center; deterministic.
    #[default]
    Spiral,
    /// Uniform random probes; deterministic only with a fixed seed.
    Random,
}

// ── Config ────────────────────────────────────────────────────────────────────

/// Validated, immutable settings for one placement run.
///
/// Build one with [`Config::builder`]; every invariant is checked once in
/// [`ConfigBuilder::build`], so an engine never sees an invalid value.
/// `Config` is `Send + Sync` and can be shared between independent runs.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    font_min_size: f32,
    font_max_size: f32,
    width: u32,
    height: u32,
    palette: Palette,
    background_color: Color,
    mask: Mask,
    size_function: SizeFunction,
    placement: PlacementMode,
    debug: bool,
    font_file: Option<PathBuf>,
    seed: Option<u64>,
    search: SearchParams,
}

impl Default for Config {
    /// A fresh 2048 × 2048 spiral-mode configuration with sizes 10..=500,
    /// black words on white and no mask.
    fn default() -> Self {
        Self {
            font_min_size: DEFAULT_FONT_MIN_SIZE,
            font_max_size: DEFAULT_FONT_MAX_SIZE,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            palette: Palette::default(),
            background_color: DEFAULT_BACKGROUND,
            mask: Mask::default(),
            size_function: SizeFunction::default(),
            placement: PlacementMode::default(),
            debug: false,
            font_file: None,
            seed: None,
            search: SearchParams::default(),
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Parse a JSON configuration document.  Relative paths inside it
    /// (`fontFile`, `maskImage.path`) resolve against the working directory.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(json)?;
        Ok(file.into_builder(Path::new("."))?.build()?)
    }

    /// Read a JSON configuration file.  Relative paths inside it resolve
    /// against the file's own directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let file: ConfigFile = serde_json::from_str(&json)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(file.into_builder(base)?.build()?)
    }

    pub fn font_min_size(&self) -> f32 { self.font_min_size }
    pub fn font_max_size(&self) -> f32 { self.font_max_size }
    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }
    pub fn palette(&self) -> &Palette { &self.palette }
    pub fn background_color(&self) -> Color { self.background_color }
    pub fn mask(&self) -> &Mask { &self.mask }
    pub fn size_function(&self) -> SizeFunction { self.size_function }
    pub fn placement(&self) -> PlacementMode { self.placement }
    pub fn debug(&self) -> bool { self.debug }
    pub fn font_file(&self) -> Option<&Path> { self.font_file.as_deref() }
    pub fn seed(&self) -> Option<u64> { self.seed }
    pub fn search(&self) -> &SearchParams { &self.search }
}

// ── ConfigBuilder ─────────────────────────────────────────────────────────────

/// Accumulates options; [`build`](ConfigBuilder::build) validates them.
#[derive(Clone, Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
    colors: Option<Vec<Color>>,
    size_function_name: Option<String>,
}

impl ConfigBuilder {
    pub fn font_max_size(mut self, size: f32) -> Self {
        self.config.font_max_size = size;
        self
    }

    pub fn font_min_size(mut self, size: f32) -> Self {
        self.config.font_min_size = size;
        self
    }

    /// Place words randomly instead of along the spiral.
    pub fn random_placement(mut self, random: bool) -> Self {
        self.config.placement = if random { PlacementMode::Random } else { PlacementMode::Spiral };
        self
    }

    pub fn placement(mut self, mode: PlacementMode) -> Self {
        self.config.placement = mode;
        self
    }

    /// Font handed to the measurer/rasterizer; the engine never opens it.
    pub fn font_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.font_file = Some(path.into());
        self
    }

    /// Word colors.  An empty list falls back to a single black entry.
    pub fn colors(mut self, colors: Vec<Color>) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.config.background_color = color;
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.config.width = width;
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.config.height = height;
        self
    }

    /// Regions where no word may be placed.
    pub fn mask(mut self, mask: impl Into<Mask>) -> Self {
        self.config.mask = mask.into();
        self
    }

    pub fn size_function(mut self, curve: SizeFunction) -> Self {
        self.config.size_function = curve;
        self.size_function_name = None;
        self
    }

    /// Select a curve by name; an unknown name fails in `build`.
    pub fn size_function_name(mut self, name: impl Into<String>) -> Self {
        self.size_function_name = Some(name.into());
        self
    }

    /// Record every probe outline for a debug overlay.
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Fixed seed for random placement.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn search(mut self, params: SearchParams) -> Self {
        self.config.search = params;
        self
    }

    pub fn angle_step(mut self, radians: f32) -> Self {
        self.config.search.angle_step = radians;
        self
    }

    pub fn radius_step(mut self, pixels: f32) -> Self {
        self.config.search.radius_step = pixels;
        self
    }

    pub fn max_random_attempts(mut self, attempts: u32) -> Self {
        self.config.search.max_random_attempts = attempts;
        self
    }

    /// Validate and freeze the configuration.
    pub fn build(self) -> std::result::Result<Config, ConfigError> {
        let mut config = self.config;

        if let Some(name) = self.size_function_name {
            config.size_function = name.parse()?;
        }

        if config.width == 0 || config.height == 0 {
            return Err(ConfigError::InvalidDimensions { width: config.width, height: config.height });
        }

        let (min, max) = (config.font_min_size, config.font_max_size);
        if !(min.is_finite() && max.is_finite()) || min <= 0.0 || min > max {
            return Err(ConfigError::InvalidFontRange { min, max });
        }

        let search = &config.search;
        if !(search.angle_step.is_finite() && search.angle_step > 0.0) {
            return Err(ConfigError::InvalidSearchParams("angle_step"));
        }
        if !(search.radius_step.is_finite() && search.radius_step > 0.0) {
            return Err(ConfigError::InvalidSearchParams("radius_step"));
        }

        if let Some(colors) = self.colors {
            config.palette = Palette::with_fallback(colors, DEFAULT_WORD_COLOR);
        }

        Ok(config)
    }
}

// ── ConfigFile (JSON-facing) ──────────────────────────────────────────────────

/// On-disk configuration.  Every key is optional; missing keys keep the
/// defaults from [`Config::default`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    pub font_max_size: Option<f32>,
    pub font_min_size: Option<f32>,
    pub random_placement: Option<bool>,
    pub font_file: Option<PathBuf>,
    pub colors: Option<Vec<Color>>,
    pub background_color: Option<Color>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub mask: Option<Vec<BoundingBox>>,
    pub mask_image: Option<MaskImage>,
    pub size_function: Option<String>,
    pub debug: Option<bool>,
    pub seed: Option<u64>,
    pub angle_step: Option<f32>,
    pub radius_step: Option<f32>,
    pub max_random_attempts: Option<u32>,
}

/// Image whose non-`exclude` pixels become mask boxes.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaskImage {
    pub path: PathBuf,
    #[serde(default = "default_mask_exclude")]
    pub exclude: Color,
    #[serde(default = "default_mask_cell")]
    pub cell: u32,
}

fn default_mask_exclude() -> Color {
    Color::WHITE
}

fn default_mask_cell() -> u32 {
    DEFAULT_MASK_CELL
}

impl ConfigFile {
    /// Apply every present key to a fresh builder.
    ///
    /// A `maskImage` is loaded here and its boxes are appended after any
    /// explicit `mask` boxes, using the configured (or default) canvas size.
    pub fn into_builder(self, base_dir: &Path) -> Result<ConfigBuilder> {
        let mut b = Config::builder();

        if let Some(v) = self.font_max_size { b = b.font_max_size(v); }
        if let Some(v) = self.font_min_size { b = b.font_min_size(v); }
        if let Some(v) = self.random_placement { b = b.random_placement(v); }
        if let Some(v) = self.font_file { b = b.font_file(base_dir.join(v)); }
        if let Some(v) = self.colors { b = b.colors(v); }
        if let Some(v) = self.background_color { b = b.background_color(v); }
        if let Some(v) = self.width { b = b.width(v); }
        if let Some(v) = self.height { b = b.height(v); }
        if let Some(v) = self.size_function { b = b.size_function_name(v); }
        if let Some(v) = self.debug { b = b.debug(v); }
        if let Some(v) = self.seed { b = b.seed(v); }
        if let Some(v) = self.angle_step { b = b.angle_step(v); }
        if let Some(v) = self.radius_step { b = b.radius_step(v); }
        if let Some(v) = self.max_random_attempts { b = b.max_random_attempts(v); }

        let mut boxes = self.mask.unwrap_or_default();

        if let Some(spec) = self.mask_image {
            let width = self.width.unwrap_or(DEFAULT_WIDTH);
            let height = self.height.unwrap_or(DEFAULT_HEIGHT);
            let img = image::open(base_dir.join(&spec.path))?.to_rgba8();
            let derived = Mask::from_image(&img, width, height, spec.exclude, spec.cell);
            boxes.extend_from_slice(derived.boxes());
        }

        Ok(b.mask(boxes))
    }
}
