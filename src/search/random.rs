use rand::Rng;

use crate::geometry::BoundingBox;
use crate::search::{exceeds_canvas, OccupiedSet};

/// Sample uniformly random top-left corners that keep `bbox` on the canvas,
/// returning the first one that does not collide.
///
/// Gives up after `max_attempts` probes.  A box larger than the canvas fails
/// without drawing from `rng`.
pub fn random_search<R: Rng + ?Sized>(
    bbox: &BoundingBox,
    occupied: &OccupiedSet<'_>,
    canvas_width: u32,
    canvas_height: u32,
    max_attempts: u32,
    rng: &mut R,
    on_probe: &mut dyn FnMut(&BoundingBox),
) -> Option<(i32, i32)> {
    if exceeds_canvas(bbox, canvas_width, canvas_height) {
        return None;
    }

    // The origin must itself be on the canvas, even for zero-width boxes.
    let max_x = (canvas_width - bbox.width).min(canvas_width - 1);
    let max_y = (canvas_height - bbox.height).min(canvas_height - 1);

    for attempt in 0..max_attempts {
        let x = rng.gen_range(0..=max_x) as i32;
        let y = rng.gen_range(0..=max_y) as i32;
        let candidate = bbox.at(x, y);

        on_probe(&candidate);

        if !occupied.collides(&candidate) {
            log::trace!("random: placed {}x{} after {} probes", bbox.width, bbox.height, attempt + 1);
            return Some((x, y));
        }
    }

    log::trace!("random: gave up after {max_attempts} probes for {}x{}", bbox.width, bbox.height);
    None
}
