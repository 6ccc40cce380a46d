pub mod text;

use image::{Rgba, RgbaImage};

use crate::engine::Layout;
use crate::geometry::BoundingBox;
use crate::palette::Color;

/// Outline color for probe candidates in the debug overlay.
pub const DEBUG_PROBE_COLOR: Color = Color([0x00, 0x00, 0xff, 0x18]);
/// Outline color for placed word boxes in the debug overlay.
pub const DEBUG_PLACED_COLOR: Color = Color::MAGENTA;

// ── GlyphRasterizer ───────────────────────────────────────────────────────────

/// Draws one word into its placed box.
pub trait GlyphRasterizer {
    fn draw_text(&self, canvas: &mut RgbaImage, text: &str, font_size: f32, bbox: &BoundingBox, color: Color);
}

/// Fills each word's box with its color.  Used when no font atlas is available.
#[derive(Copy, Clone, Debug, Default)]
pub struct BlockRasterizer;

impl GlyphRasterizer for BlockRasterizer {
    fn draw_text(&self, canvas: &mut RgbaImage, _text: &str, _font_size: f32, bbox: &BoundingBox, color: Color) {
        fill_box(canvas, bbox, color);
    }
}

// ── Canvas ────────────────────────────────────────────────────────────────────

/// Render sink: composites a [`Layout`] onto a solid background.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pub background: Color,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self { width, height, background }
    }

    /// Canvas matching the dimensions and background a layout was made for.
    pub fn for_layout(layout: &Layout) -> Self {
        Self::new(layout.width, layout.height, layout.background)
    }

    /// Draw every placed word in placement order.
    ///
    /// When the layout carries debug outlines, every probed candidate is
    /// outlined first, then each placed word's box on top of its glyphs.
    pub fn render(&self, layout: &Layout, rasterizer: &dyn GlyphRasterizer) -> RgbaImage {
        let mut img = RgbaImage::from_pixel(self.width, self.height, self.background.to_rgba());

        for outline in &layout.debug_outlines {
            draw_outline(&mut img, outline, DEBUG_PROBE_COLOR);
        }

        for word in &layout.placed {
            rasterizer.draw_text(&mut img, &word.text, word.font_size, &word.bbox, word.color);
        }

        if !layout.debug_outlines.is_empty() {
            for word in &layout.placed {
                draw_outline(&mut img, &word.bbox, DEBUG_PLACED_COLOR);
            }
        }

        img
    }
}

// ── Pixel helpers ─────────────────────────────────────────────────────────────

/// Source-over blend of `color`, scaled by `coverage / 255`, onto one pixel.
pub fn blend_pixel(img: &mut RgbaImage, x: u32, y: u32, color: Color, coverage: u8) {
    let [r, g, b, a] = color.0;
    let src_a = a as u32 * coverage as u32 / 255;
    if src_a == 0 {
        return;
    }

    let dst = img.get_pixel_mut(x, y);
    let [dr, dg, db, da] = dst.0;
    let inv = 255 - src_a;

    let out_a = src_a + da as u32 * inv / 255;
    let mix = |s: u8, d: u8| -> u8 {
        if out_a == 0 {
            return 0;
        }
        ((s as u32 * src_a + d as u32 * da as u32 * inv / 255) / out_a) as u8
    };

    *dst = Rgba([mix(r, dr), mix(g, dg), mix(b, db), out_a as u8]);
}

/// Blend `color` over every pixel of `bbox` that lies on the image.
pub fn fill_box(img: &mut RgbaImage, bbox: &BoundingBox, color: Color) {
    let Some((x0, y0, x1, y1)) = clip(img, bbox) else {
        return;
    };

    for y in y0..y1 {
        for x in x0..x1 {
            blend_pixel(img, x, y, color, 0xff);
        }
    }
}

/// 1px outline along the inside edge of `bbox`.
pub fn draw_outline(img: &mut RgbaImage, bbox: &BoundingBox, color: Color) {
    let Some((x0, y0, x1, y1)) = clip(img, bbox) else {
        return;
    };

    let left = bbox.x >= 0;
    let top = bbox.y >= 0;
    let right = bbox.right() <= img.width() as i64;
    let bottom = bbox.bottom() <= img.height() as i64;

    for x in x0..x1 {
        if top { blend_pixel(img, x, y0, color, 0xff); }
        if bottom && y1 - 1 != y0 { blend_pixel(img, x, y1 - 1, color, 0xff); }
    }
    for y in y0..y1 {
        if left && !(top && y == y0) && !(bottom && y == y1 - 1) {
            blend_pixel(img, x0, y, color, 0xff);
        }
        if right && x1 - 1 != x0 && !(top && y == y0) && !(bottom && y == y1 - 1) {
            blend_pixel(img, x1 - 1, y, color, 0xff);
        }
    }
}

/// Intersection of `bbox` with the image, as `(x0, y0, x1, y1)` with
/// exclusive ends, or `None` when nothing is visible.
fn clip(img: &RgbaImage, bbox: &BoundingBox) -> Option<(u32, u32, u32, u32)> {
    if bbox.is_empty() {
        return None;
    }

    let x0 = (bbox.x as i64).clamp(0, img.width() as i64);
    let y0 = (bbox.y as i64).clamp(0, img.height() as i64);
    let x1 = bbox.right().clamp(0, img.width() as i64);
    let y1 = bbox.bottom().clamp(0, img.height() as i64);

    if x0 >= x1 || y0 >= y1 {
        return None;
    }

    Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
}
