// =============================================================================
// MASK.RS — Forbidden canvas regions
//
// A mask is loaded once before a run and only ever read afterwards.  The
// engine borrows it for the whole run; probes never copy it.
// =============================================================================

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::geometry::BoundingBox;
use crate::palette::Color;

/// Immutable set of boxes no word may overlap.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mask {
    boxes: Vec<BoundingBox>,
}

impl Mask {
    pub fn new(boxes: Vec<BoundingBox>) -> Self {
        Self { boxes }
    }

    /// True if `bbox` intersects any mask box.
    #[inline]
    pub fn overlaps(&self, bbox: &BoundingBox) -> bool {
        self.boxes.iter().any(|m| m.intersects(bbox))
    }

    pub fn boxes(&self) -> &[BoundingBox] {
        &self.boxes
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Derive a mask from an image.
    ///
    /// The image is stretched to `width × height` (nearest neighbour) and cut
    /// into `cell × cell` squares.  Every cell holding at least one pixel that
    /// differs from `exclude` is forbidden; adjacent forbidden cells in a row
    /// are merged into one box, so a solid shape costs one box per cell row.
    ///
    /// Typical use: a white image with a black silhouette, `exclude = WHITE`,
    /// keeps words off the silhouette.
    pub fn from_image(img: &RgbaImage, width: u32, height: u32, exclude: Color, cell: u32) -> Self {
        if width == 0 || height == 0 || img.width() == 0 || img.height() == 0 {
            return Self::default();
        }

        let cell = cell.max(1);
        let scaled = if img.dimensions() == (width, height) {
            img.clone()
        } else {
            imageops::resize(img, width, height, FilterType::Nearest)
        };
        let exclude = exclude.to_rgba();

        let cell_blocked = |cx: u32, cy: u32| -> bool {
            let x_end = (cx + cell).min(width);
            let y_end = (cy + cell).min(height);
            (cy..y_end).any(|y| (cx..x_end).any(|x| *scaled.get_pixel(x, y) != exclude))
        };

        let mut boxes = Vec::new();

        for cy in (0..height).step_by(cell as usize) {
            let row_h = cell.min(height - cy);
            let mut run_start: Option<u32> = None;

            for cx in (0..width).step_by(cell as usize) {
                match (cell_blocked(cx, cy), run_start) {
                    (true, None) => run_start = Some(cx),
                    (false, Some(start)) => {
                        boxes.push(BoundingBox::new(start as i32, cy as i32, cx - start, row_h));
                        run_start = None;
                    }
                    _ => {}
                }
            }

            if let Some(start) = run_start {
                boxes.push(BoundingBox::new(start as i32, cy as i32, width - start, row_h));
            }
        }

        log::debug!(
            "mask: derived {} boxes from {}x{} image at cell size {cell}",
            boxes.len(),
            img.width(),
            img.height()
        );

        Self { boxes }
    }
}

impl From<Vec<BoundingBox>> for Mask {
    fn from(boxes: Vec<BoundingBox>) -> Self {
        Self::new(boxes)
    }
}
