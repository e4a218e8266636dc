//! The drawing seam between the renderer and whatever presents pixels.

use digirain_core::Rgb;

/// Surface dimensions in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Shadow-blur glow applied to a glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Rgb,
    /// Blur radius in pixels.
    pub blur: f32,
}

/// A single glyph draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphDraw {
    pub ch: char,
    /// Left edge in pixels.
    pub x: f64,
    /// Baseline in pixels.
    pub y: f64,
    pub font_size: u32,
    pub color: Rgb,
    pub alpha: f32,
    pub shadow: Option<Shadow>,
}

/// Something the renderer can paint on.
pub trait Surface {
    fn size(&self) -> SurfaceSize;

    /// Change the surface dimensions. Contents are unspecified afterwards.
    fn resize(&mut self, size: SurfaceSize);

    /// Paint every pixel with an opaque color.
    fn clear(&mut self, color: Rgb);

    /// Composite a translucent color over the whole surface.
    ///
    /// Alpha outside `[0, 1]` is clamped by the surface.
    fn fill(&mut self, color: Rgb, alpha: f32);

    fn draw_glyph(&mut self, glyph: &GlyphDraw);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn size(&self) -> SurfaceSize {
        (**self).size()
    }

    fn resize(&mut self, size: SurfaceSize) {
        (**self).resize(size)
    }

    fn clear(&mut self, color: Rgb) {
        (**self).clear(color)
    }

    fn fill(&mut self, color: Rgb, alpha: f32) {
        (**self).fill(color, alpha)
    }

    fn draw_glyph(&mut self, glyph: &GlyphDraw) {
        (**self).draw_glyph(glyph)
    }
}
