//! Outline font rasterization
//!
//! The atlas builder talks to fonts through [`OutlineFont`]. The production
//! implementation wraps a `fontdue` font.

use fontdue::{Font, FontSettings};

use super::font_atlas::{FontError, FontResult};

/// Glyph metrics reported by a rasterizer, in pixels
///
/// Coordinates follow the usual font convention: `y` grows upward from the
/// baseline, `xmin`/`ymin` locate the bottom-left corner of the ink bitmap
/// relative to the glyph origin.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RasterMetrics {
    /// Left edge of the ink relative to the origin
    pub xmin: i32,
    /// Bottom edge of the ink relative to the baseline
    pub ymin: i32,
    /// Ink bitmap width
    pub width: usize,
    /// Ink bitmap height
    pub height: usize,
    /// Horizontal advance to the next glyph origin
    pub advance_width: f32,
}

impl From<fontdue::Metrics> for RasterMetrics {
    fn from(metrics: fontdue::Metrics) -> Self {
        Self {
            xmin: metrics.xmin,
            ymin: metrics.ymin,
            width: metrics.width,
            height: metrics.height,
            advance_width: metrics.advance_width,
        }
    }
}

/// A scalable font that can be rasterized glyph by glyph
pub trait OutlineFont {
    /// Font-internal glyph index for a code point
    ///
    /// Code points the font does not map (and values that are not Unicode
    /// scalars) resolve to the font's default glyph, index 0.
    fn glyph_index(&self, code_point: u32) -> u16;

    /// Metrics of a glyph at `px` pixels per em, without rasterizing it
    fn metrics(&self, glyph: u16, px: f32) -> RasterMetrics;

    /// Rasterize a glyph into an 8-bit coverage bitmap, row-major, top row first
    fn rasterize(&self, glyph: u16, px: f32) -> (RasterMetrics, Vec<u8>);
}

/// `fontdue` backed outline font
pub struct FontdueFont {
    font: Font,
}

impl FontdueFont {
    /// Parse TrueType/OpenType font data
    pub fn from_bytes(font_data: &[u8]) -> FontResult<Self> {
        let font = Font::from_bytes(font_data, FontSettings::default())
            .map_err(|e| FontError::FontParse(format!("fontdue error: {e}")))?;
        log::debug!("Parsed outline font with {} glyphs", font.glyph_count());
        Ok(Self { font })
    }
}

impl OutlineFont for FontdueFont {
    fn glyph_index(&self, code_point: u32) -> u16 {
        char::from_u32(code_point).map_or(0, |ch| self.font.lookup_glyph_index(ch))
    }

    fn metrics(&self, glyph: u16, px: f32) -> RasterMetrics {
        self.font.metrics_indexed(glyph, px).into()
    }

    fn rasterize(&self, glyph: u16, px: f32) -> (RasterMetrics, Vec<u8>) {
        let (metrics, bitmap) = self.font.rasterize_indexed(glyph, px);
        (metrics.into(), bitmap)
    }
}
