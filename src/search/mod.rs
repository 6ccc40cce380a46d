mod random;
mod spiral;

use rand::RngCore;

use crate::geometry::BoundingBox;
use crate::mask::Mask;

pub mod prelude {
    pub use crate::search::random::*;
    pub use crate::search::spiral::*;
    pub use crate::search::{find_position, OccupiedSet, SearchMode, SearchParams};
}

// =============================================================================
// SEARCH PARAMETERS
// =============================================================================

/// Angle advanced per spiral step, in radians (≈ 5.7°).
pub const DEFAULT_ANGLE_STEP: f32 = 0.1;
/// Radius gained per spiral step, in pixels.
pub const DEFAULT_RADIUS_STEP: f32 = 0.1;
/// Probes a random-mode search makes before giving up on a word.
pub const DEFAULT_MAX_RANDOM_ATTEMPTS: u32 = 2000;

/// Tunable probe-strategy constants.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SearchParams {
    pub angle_step: f32,
    pub radius_step: f32,
    pub max_random_attempts: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            angle_step: DEFAULT_ANGLE_STEP,
            radius_step: DEFAULT_RADIUS_STEP,
            max_random_attempts: DEFAULT_MAX_RANDOM_ATTEMPTS,
        }
    }
}

// =============================================================================
// OCCUPIED SET
// =============================================================================

/// Mask boxes plus every box placed so far in the current run.
///
/// The mask is borrowed for the lifetime of the run; placed boxes are owned
/// and only ever appended.
#[derive(Debug)]
pub struct OccupiedSet<'m> {
    mask: &'m Mask,
    placed: Vec<BoundingBox>,
}

impl<'m> OccupiedSet<'m> {
    pub fn new(mask: &'m Mask) -> Self {
        Self { mask, placed: Vec::new() }
    }

    /// True if `bbox` hits a mask box or a placed box.
    ///
    /// Placed boxes are checked newest first: a probe near the spiral start
    /// most often collides with the word placed just before it.
    pub fn collides(&self, bbox: &BoundingBox) -> bool {
        self.placed.iter().rev().any(|p| p.intersects(bbox)) || self.mask.overlaps(bbox)
    }

    pub fn insert(&mut self, bbox: BoundingBox) {
        self.placed.push(bbox);
    }

    pub fn placed(&self) -> &[BoundingBox] {
        &self.placed
    }

    pub fn mask(&self) -> &Mask {
        self.mask
    }

    /// Mask boxes plus placed boxes.
    pub fn len(&self) -> usize {
        self.mask.len() + self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every placed box, keeping the mask.
    pub fn clear(&mut self) {
        self.placed.clear();
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Which probe strategy to use for one word.
pub enum SearchMode<'a> {
    /// Outward Archimedean spiral from the canvas center.
    Spiral,
    /// Uniform random top-left corners drawn from the given generator.
    Random(&'a mut dyn RngCore),
}

/// Find a collision-free top-left corner for `bbox` on a
/// `canvas_width × canvas_height` canvas.
///
/// `on_probe` sees every in-canvas candidate box that is tested against the
/// occupied set, in probe order.  Returns `None` when the strategy runs out
/// of probes; the first free candidate wins.
pub fn find_position(
    bbox: &BoundingBox,
    occupied: &OccupiedSet<'_>,
    canvas_width: u32,
    canvas_height: u32,
    mode: SearchMode<'_>,
    params: &SearchParams,
    on_probe: &mut dyn FnMut(&BoundingBox),
) -> Option<(i32, i32)> {
    match mode {
        SearchMode::Spiral => spiral::spiral_search(
            bbox,
            occupied,
            canvas_width,
            canvas_height,
            params,
            on_probe,
        ),
        SearchMode::Random(rng) => random::random_search(
            bbox,
            occupied,
            canvas_width,
            canvas_height,
            params.max_random_attempts,
            rng,
            on_probe,
        ),
    }
}

/// A box that cannot fit on the canvas at any position.
#[inline]
fn exceeds_canvas(bbox: &BoundingBox, canvas_width: u32, canvas_height: u32) -> bool {
    canvas_width == 0 || canvas_height == 0 || bbox.width > canvas_width || bbox.height > canvas_height
}
