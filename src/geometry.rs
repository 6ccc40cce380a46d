// =============================================================================
// GEOMETRY.RS — Axis-aligned boxes for word placement
//
// Everything the placement engine knows about a word is its bounding box:
// - Intersection tests (collision against the occupied set)
// - Containment tests (the box must stay on the canvas)
// - Translation (moving a measured box to a probe position)
// =============================================================================

use serde::Deserialize;

/// Axis-aligned rectangle in canvas pixel coordinates.
///
/// `x`/`y` is the top-left corner; the box covers the half-open ranges
/// `[x, x + width)` and `[y, y + height)`.  Width and height are unsigned so
/// a box can never have a negative extent.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// A `width × height` box with its top-left corner at the origin.
    pub const fn sized(width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, width, height }
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    #[inline]
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// True when the box covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Center point in floating-point pixel coordinates.
    pub fn center(&self) -> (f32, f32) {
        (
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }

    /// True iff both axis projections overlap.
    ///
    /// Empty boxes never intersect anything, themselves included, so a word
    /// that measures to nothing (e.g. only unknown glyphs) can always be
    /// placed and never blocks another word.
    #[inline]
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }

        (self.x as i64) < other.right()
            && (other.x as i64) < self.right()
            && (self.y as i64) < other.bottom()
            && (other.y as i64) < self.bottom()
    }

    /// True iff all four corners lie within `[0, width) × [0, height)`.
    pub fn contained_in(&self, canvas_width: u32, canvas_height: u32) -> bool {
        self.x >= 0
            && self.y >= 0
            && (self.x as i64) < canvas_width as i64
            && (self.y as i64) < canvas_height as i64
            && self.right() <= canvas_width as i64
            && self.bottom() <= canvas_height as i64
    }

    /// The same box shifted by `(dx, dy)`.
    #[inline]
    pub fn translated(&self, dx: i32, dy: i32) -> BoundingBox {
        BoundingBox {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..*self
        }
    }

    /// The same extent with its top-left corner moved to `(x, y)`.
    #[inline]
    pub fn at(&self, x: i32, y: i32) -> BoundingBox {
        BoundingBox { x, y, ..*self }
    }

    /// Smallest box covering both `self` and `other`.  Empty boxes are ignored.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }

        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());

        BoundingBox {
            x,
            y,
            width: (right - x as i64) as u32,
            height: (bottom - y as i64) as u32,
        }
    }
}

// =============================================================================
// DISTANCE HELPERS
// =============================================================================

/// Euclidean distance from a box's center to a point.
/// Used by tests and diagnostics to check how central a placement is.
pub fn center_distance(bbox: &BoundingBox, px: f32, py: f32) -> f32 {
    let (cx, cy) = bbox.center();
    glam::Vec2::new(cx, cy).distance(glam::Vec2::new(px, py))
}

/// Half of the canvas diagonal: the farthest a box center can sit from the
/// canvas center while still being on the canvas.
pub fn half_diagonal(canvas_width: u32, canvas_height: u32) -> f32 {
    glam::Vec2::new(canvas_width as f32, canvas_height as f32).length() / 2.0
}
