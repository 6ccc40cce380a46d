use crate::geometry::BoundingBox;

/// Text measurement capability the placement engine depends on.
///
/// `measure` returns the box `text` covers when drawn at `font_size`, relative
/// to the pen origin.  The engine only uses the box's extent; its offset is
/// for the rasterizer to line glyphs up with the placed box again.
pub trait Measurer {
    fn measure(&self, text: &str, font_size: f32) -> BoundingBox;
}

impl<F> Measurer for F
where
    F: Fn(&str, f32) -> BoundingBox,
{
    fn measure(&self, text: &str, font_size: f32) -> BoundingBox {
        self(text, font_size)
    }
}

/// Fixed-advance approximation used when no font is configured.
///
/// Every character advances `advance_ratio × font_size` pixels and the line
/// is `font_size` pixels tall.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EstimateMeasurer {
    pub advance_ratio: f32,
}

impl Default for EstimateMeasurer {
    fn default() -> Self {
        Self { advance_ratio: 0.6 }
    }
}

impl Measurer for EstimateMeasurer {
    fn measure(&self, text: &str, font_size: f32) -> BoundingBox {
        let chars = text.chars().filter(|c| !c.is_control()).count() as f32;
        let width = (chars * font_size * self.advance_ratio).ceil().max(0.0) as u32;
        let height = font_size.ceil().max(0.0) as u32;
        BoundingBox::sized(width, height)
    }
}
