use std::collections::HashMap;
use std::fs;
use std::path::Path;

use image::RgbaImage;
use serde::Deserialize;

use crate::error::Result;
use crate::geometry::BoundingBox;
use crate::measure::Measurer;
use crate::palette::Color;
use crate::renderer::{blend_pixel, fill_box, GlyphRasterizer};

// ── GlyphQuad ─────────────────────────────────────────────────────────────────

/// Where one glyph lands, relative to the pen origin, at a given font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphQuad<'f> {
    pub glyph: &'f Glyph,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

// ── Glyph ────────────────────────────────────────────────────────────────────

/// Metrics for a single character in the bitmap font atlas.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// The Unicode character this glyph represents.
    pub id: char,
    /// Top-left pixel X of the glyph region in the atlas.
    pub x: u32,
    /// Top-left pixel Y of the glyph region in the atlas.
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Horizontal offset applied when rendering (may be negative).
    pub x_offset: i32,
    /// Vertical offset applied when rendering (may be negative).
    pub y_offset: i32,
    /// How far to advance the cursor after drawing this glyph.
    pub x_advance: u32,
}

// ── BitmapFont ───────────────────────────────────────────────────────────────

/// A bitmap font: glyph metrics from a JSON descriptor plus, optionally, the
/// PNG atlas the metrics point into.
///
/// Without an atlas the font can still measure text; drawing falls back to
/// filling each word's box.
pub struct BitmapFont {
    /// All glyphs in this font, keyed by character.
    pub glyphs: HashMap<char, Glyph>,
    /// Vertical distance between successive baselines in pixels.
    pub line_height: u32,
    pub texture_width: u32,
    pub texture_height: u32,
    pub atlas: Option<RgbaImage>,
}

impl BitmapFont {
    /// Deserialise glyph metrics from a JSON string (no atlas attached).
    ///
    /// Returns a `serde_json::Error` if the input is malformed or missing
    /// required fields.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let raw: RawFont = serde_json::from_str(json)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawFont) -> Self {
        let glyphs = raw
            .glyphs
            .into_iter()
            .filter_map(|g| {
                // Skip any code-point that isn't a valid Unicode scalar value.
                char::from_u32(g.id).map(|ch| {
                    (ch, Glyph {
                        id: ch,
                        x: g.x,
                        y: g.y,
                        width: g.width,
                        height: g.height,
                        x_offset: g.x_offset,
                        y_offset: g.y_offset,
                        x_advance: g.x_advance,
                    })
                })
            })
            .collect();

        Self {
            glyphs,
            line_height: raw.line_height,
            texture_width: raw.texture_width,
            texture_height: raw.texture_height,
            atlas: None,
        }
    }

    /// Deserialise a font from the char-keyed **atlas JSON** format:
    ///
    /// ```json
    /// { "A": { "x": 0, "y": 0, "w": 16, "h": 24 }, ... }
    /// ```
    ///
    /// `x_advance` defaults to the glyph width; both offsets are zero (suits
    /// uniform-grid atlas fonts).
    pub fn from_atlas_json(
        json: &str,
        texture_width: u32,
        texture_height: u32,
    ) -> std::result::Result<Self, serde_json::Error> {
        #[derive(Deserialize)]
        struct AtlasEntry { x: u32, y: u32, w: u32, h: u32 }

        let raw: HashMap<String, AtlasEntry> = serde_json::from_str(json)?;

        let line_height = raw.values().map(|e| e.h).max().unwrap_or(0);

        let glyphs = raw
            .into_iter()
            .filter_map(|(key, entry)| {
                // Only accept single-character keys.
                let mut chars = key.chars();
                let ch = chars.next()?;
                if chars.next().is_some() { return None; }

                Some((ch, Glyph {
                    id: ch,
                    x: entry.x,
                    y: entry.y,
                    width:    entry.w,
                    height:   entry.h,
                    x_offset: 0,
                    y_offset: 0,
                    x_advance: entry.w,
                }))
            })
            .collect();

        Ok(Self { glyphs, line_height, texture_width, texture_height, atlas: None })
    }

    /// Load a font descriptor from disk.  If it names an `atlas` PNG, that is
    /// loaded too, relative to the descriptor's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw: RawFont = serde_json::from_str(&fs::read_to_string(path)?)?;
        let atlas_path = raw.atlas.clone();
        let mut font = Self::from_raw(raw);

        if let Some(atlas) = atlas_path {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            font.atlas = Some(image::open(base.join(atlas))?.to_rgba8());
        }

        log::debug!(
            "font: loaded {} glyphs from {} (atlas: {})",
            font.glyphs.len(),
            path.display(),
            font.atlas.is_some()
        );

        Ok(font)
    }

    pub fn with_atlas(mut self, atlas: RgbaImage) -> Self {
        self.atlas = Some(atlas);
        self
    }

    /// Lay `text` out at `font_size` with the pen starting at `(0, 0)`.
    ///
    /// Glyph dimensions scale uniformly by `font_size / line_height`.  `'\n'`
    /// starts a new line; characters with no glyph are skipped.  Returns the
    /// quads plus the number of lines and the widest pen advance.
    pub fn layout(&self, text: &str, font_size: f32) -> (Vec<GlyphQuad<'_>>, u32, f32) {
        if self.line_height == 0 {
            return (Vec::new(), 0, 0.0);
        }

        let scale = font_size / self.line_height as f32;
        let line_advance = self.line_height as f32 * scale;

        let mut quads = Vec::new();
        let mut cursor_x = 0.0f32;
        let mut cursor_y = 0.0f32;
        let mut max_advance = 0.0f32;
        let mut lines = 1;

        for ch in text.chars() {
            if ch == '\n' {
                max_advance = max_advance.max(cursor_x);
                cursor_x = 0.0;
                cursor_y += line_advance;
                lines += 1;
                continue;
            }

            let Some(glyph) = self.glyphs.get(&ch) else {
                continue;
            };

            quads.push(GlyphQuad {
                glyph,
                x: cursor_x + glyph.x_offset as f32 * scale,
                y: cursor_y + glyph.y_offset as f32 * scale,
                width: glyph.width as f32 * scale,
                height: glyph.height as f32 * scale,
            });

            cursor_x += glyph.x_advance as f32 * scale;
        }

        (quads, lines, max_advance.max(cursor_x))
    }
}

impl Measurer for BitmapFont {
    /// Union of every glyph quad and the pen's advance box, rounded outward
    /// to whole pixels.  The box's origin is the offset of its top-left
    /// corner from the pen origin.
    fn measure(&self, text: &str, font_size: f32) -> BoundingBox {
        let (quads, lines, advance) = self.layout(text, font_size);
        if lines == 0 {
            return BoundingBox::default();
        }

        let line_extent = lines as f32 * font_size;
        let (mut x0, mut y0, mut x1, mut y1) = (0.0f32, 0.0f32, advance, line_extent);

        for q in &quads {
            x0 = x0.min(q.x);
            y0 = y0.min(q.y);
            x1 = x1.max(q.x + q.width);
            y1 = y1.max(q.y + q.height);
        }

        let (left, top) = (x0.floor(), y0.floor());
        BoundingBox::new(
            left as i32,
            top as i32,
            (x1.ceil() - left) as u32,
            (y1.ceil() - top) as u32,
        )
    }
}

impl GlyphRasterizer for BitmapFont {
    /// Blit each glyph from the atlas with nearest-neighbour scaling, using
    /// the atlas alpha as coverage for `color`.
    fn draw_text(&self, canvas: &mut RgbaImage, text: &str, font_size: f32, bbox: &BoundingBox, color: Color) {
        let Some(atlas) = &self.atlas else {
            fill_box(canvas, bbox, color);
            return;
        };

        // Pen origin that puts the measured box onto `bbox`.
        let measured = self.measure(text, font_size);
        let pen_x = (bbox.x - measured.x) as f32;
        let pen_y = (bbox.y - measured.y) as f32;
        let scale = font_size / self.line_height.max(1) as f32;

        let (quads, _, _) = self.layout(text, font_size);

        for q in quads {
            let g = q.glyph;
            if g.width == 0 || g.height == 0 {
                continue;
            }

            let dx0 = (pen_x + q.x).floor() as i64;
            let dy0 = (pen_y + q.y).floor() as i64;
            let dx1 = (pen_x + q.x + q.width).ceil() as i64;
            let dy1 = (pen_y + q.y + q.height).ceil() as i64;

            for dy in dy0..dy1 {
                for dx in dx0..dx1 {
                    if dx < 0 || dy < 0 || dx >= canvas.width() as i64 || dy >= canvas.height() as i64 {
                        continue;
                    }

                    // Sample the atlas at the destination pixel's center.
                    let u = ((dx as f32 + 0.5 - pen_x - q.x) / scale).floor();
                    let v = ((dy as f32 + 0.5 - pen_y - q.y) / scale).floor();
                    if u < 0.0 || v < 0.0 {
                        continue;
                    }
                    let sx = g.x + (u as u32).min(g.width - 1);
                    let sy = g.y + (v as u32).min(g.height - 1);
                    if sx >= atlas.width() || sy >= atlas.height() {
                        continue;
                    }

                    let coverage = atlas.get_pixel(sx, sy).0[3];
                    if coverage > 0 {
                        blend_pixel(canvas, dx as u32, dy as u32, color, coverage);
                    }
                }
            }
        }
    }
}

// ── Raw (JSON-facing) types ───────────────────────────────────────────────────
//
// Character IDs are stored as u32 in JSON (Unicode code points); we convert
// them to `char` when building the public `BitmapFont`.

#[derive(Deserialize)]
struct RawGlyph {
    /// Unicode code point (e.g. 65 for 'A').
    id: u32,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    x_offset: i32,
    y_offset: i32,
    x_advance: u32,
}

#[derive(Deserialize)]
struct RawFont {
    line_height: u32,
    texture_width: u32,
    texture_height: u32,
    glyphs: Vec<RawGlyph>,
    /// Atlas PNG, relative to the descriptor file.
    #[serde(default)]
    atlas: Option<String>,
}
