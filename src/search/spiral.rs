use glam::Vec2;

use crate::geometry::{half_diagonal, BoundingBox};
use crate::search::{exceeds_canvas, OccupiedSet, SearchParams};

// Keeps a zero or negative step from turning the walk into an endless loop.
const MIN_RADIUS_STEP: f32 = 1e-3;

// =============================================================================
// ARCHIMEDEAN SPIRAL
// =============================================================================

/// Points along an Archimedean spiral around `center`.
///
/// Step `i` sits at angle `i · angle_step` and radius `i · radius_step`.
/// The iterator ends once the radius passes `max_radius`.
#[derive(Clone, Debug)]
pub struct SpiralPoints {
    center: Vec2,
    angle_step: f32,
    radius_step: f32,
    max_radius: f32,
    step: u32,
}

impl SpiralPoints {
    pub fn new(center: (f32, f32), angle_step: f32, radius_step: f32, max_radius: f32) -> Self {
        Self {
            center: Vec2::new(center.0, center.1),
            angle_step,
            radius_step: radius_step.max(MIN_RADIUS_STEP),
            max_radius,
            step: 0,
        }
    }
}

impl Iterator for SpiralPoints {
    type Item = (f32, f32);

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.step as f32;
        let radius = i * self.radius_step;
        if radius > self.max_radius || self.step == u32::MAX {
            return None;
        }
        self.step += 1;

        let p = self.center + Vec2::from_angle(i * self.angle_step) * radius;
        Some((p.x, p.y))
    }
}

/// Walk the spiral from the canvas center, centering `bbox` on each point.
///
/// Candidates that leave the canvas are skipped without counting as a probe,
/// as are consecutive points that round to the same pixel position.  The
/// walk ends at half the canvas diagonal.
pub fn spiral_search(
    bbox: &BoundingBox,
    occupied: &OccupiedSet<'_>,
    canvas_width: u32,
    canvas_height: u32,
    params: &SearchParams,
    on_probe: &mut dyn FnMut(&BoundingBox),
) -> Option<(i32, i32)> {
    if exceeds_canvas(bbox, canvas_width, canvas_height) {
        return None;
    }

    let half_w = bbox.width as f32 / 2.0;
    let half_h = bbox.height as f32 / 2.0;
    let center = (canvas_width as f32 / 2.0, canvas_height as f32 / 2.0);
    let points = SpiralPoints::new(
        center,
        params.angle_step,
        params.radius_step,
        half_diagonal(canvas_width, canvas_height),
    );

    let mut last: Option<(i32, i32)> = None;
    let mut probes = 0u32;

    for (px, py) in points {
        let origin = ((px - half_w).round() as i32, (py - half_h).round() as i32);
        if last == Some(origin) {
            continue;
        }
        last = Some(origin);

        let candidate = bbox.at(origin.0, origin.1);
        if !candidate.contained_in(canvas_width, canvas_height) {
            continue;
        }

        probes += 1;
        on_probe(&candidate);

        if !occupied.collides(&candidate) {
            log::trace!("spiral: placed {}x{} after {probes} probes", bbox.width, bbox.height);
            return Some(origin);
        }
    }

    log::trace!("spiral: exhausted after {probes} probes for {}x{}", bbox.width, bbox.height);
    None
}
