//! Font atlas construction
//!
//! Rasterizes every code point of a [`RuneRangeTable`] into one RGBA image.
//! Each glyph gets the same cell size (the union of the ink extents of all
//! glyphs in the table), cells are laid out 16 per row, and the image is
//! rounded up to power-of-two dimensions.

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigError};

use super::font_config::FontConfig;
use super::glyph::{Charset, Glyph};
use super::rasterizer::{FontdueFont, OutlineFont, RasterMetrics};
use super::renderer::RenderError;
use super::rune_range::RuneRangeTable;

/// Glyph cells per atlas row
pub const GLYPHS_PER_ROW: u32 = 16;

/// Largest atlas edge the builder will produce, in pixels
pub const MAX_ATLAS_DIMENSION: u32 = 16384;

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;

/// Errors that can occur during font operations
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// Outline font data could not be parsed
    #[error("Failed to parse font: {0}")]
    FontParse(String),

    /// Two or more rune ranges overlap
    #[error("Rune range table contains overlapping ranges")]
    InvalidRangeTable,

    /// No rune ranges were configured, which would produce an empty atlas
    #[error("Rune range table is empty")]
    EmptyRangeTable,

    /// A rune range has its bounds inverted
    #[error("Invalid rune range: low {low:#x} is above high {high:#x}")]
    InvalidRange {
        /// Requested lower bound
        low: u32,
        /// Requested upper bound
        high: u32,
    },

    /// Point scale is zero, negative or not finite
    #[error("Invalid point scale: {0}")]
    InvalidPointScale(f32),

    /// The requested glyph set does not fit a single atlas
    #[error("Atlas of {width}x{height} exceeds the maximum atlas dimension")]
    AtlasTooLarge {
        /// Required width in pixels
        width: u64,
        /// Required height in pixels
        height: u64,
    },

    /// Scaling a font config by this factor overflows its pixel coordinates
    #[error("Scaling by {factor}x overflows atlas coordinates")]
    ScaleOverflow {
        /// Requested scale factor
        factor: u32,
    },

    /// A persisted font's glyph record does not match its range table or image
    #[error("Inconsistent font config: {0}")]
    InconsistentConfig(String),

    /// Reading or writing a persisted font failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding or decoding the atlas image failed
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Reading or writing the font record failed
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The renderer rejected an upload
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// Inputs for building an atlas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasSettings {
    /// Font size in points (pixels at 72 DPI) to rasterize at
    pub point_scale: f32,
    /// Code points to include
    pub ranges: RuneRangeTable,
    /// Log every glyph record as it is packed
    pub debug: bool,
}

impl Default for AtlasSettings {
    fn default() -> Self {
        Self {
            point_scale: 24.0,
            ranges: RuneRangeTable::ascii(),
            debug: false,
        }
    }
}

impl Config for AtlasSettings {}

/// Union of the ink extents of a set of glyphs, in baseline-relative pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CellBounds {
    xmin: i32,
    ymin: i32,
    xmax: i32,
    ymax: i32,
}

impl CellBounds {
    fn from_metrics(metrics: impl IntoIterator<Item = RasterMetrics>) -> Self {
        metrics
            .into_iter()
            .filter(|m| m.width > 0 && m.height > 0)
            .map(|m| Self {
                xmin: m.xmin,
                ymin: m.ymin,
                xmax: m.xmin + m.width as i32,
                ymax: m.ymin + m.height as i32,
            })
            .reduce(|a, b| Self {
                xmin: a.xmin.min(b.xmin),
                ymin: a.ymin.min(b.ymin),
                xmax: a.xmax.max(b.xmax),
                ymax: a.ymax.max(b.ymax),
            })
            .unwrap_or_default()
    }

    fn width(&self) -> u32 {
        (self.xmax - self.xmin).max(1) as u32
    }

    fn height(&self) -> u32 {
        (self.ymax - self.ymin).max(1) as u32
    }
}

/// Grid geometry of an atlas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasLayout {
    /// Width of every glyph cell
    pub cell_width: u32,
    /// Height of every glyph cell
    pub cell_height: u32,
    /// Number of cell rows
    pub rows: u32,
    /// Atlas image width (power of two)
    pub width: u32,
    /// Atlas image height (power of two)
    pub height: u32,
}

impl AtlasLayout {
    /// Lay out `glyph_count` cells of `cell_width x cell_height`
    pub fn new(cell_width: u32, cell_height: u32, glyph_count: usize) -> FontResult<Self> {
        let rows = (glyph_count as u64).div_ceil(u64::from(GLYPHS_PER_ROW));
        let raw_width = u64::from(cell_width) * u64::from(GLYPHS_PER_ROW);
        let raw_height = u64::from(cell_height) * rows;

        let width = raw_width.max(1).next_power_of_two();
        let height = raw_height.max(1).next_power_of_two();
        if width > u64::from(MAX_ATLAS_DIMENSION) || height > u64::from(MAX_ATLAS_DIMENSION) {
            return Err(FontError::AtlasTooLarge { width, height });
        }

        Ok(Self {
            cell_width,
            cell_height,
            rows: rows as u32,
            width: width as u32,
            height: height as u32,
        })
    }

    /// Top-left pixel of the cell for glyph `index`
    pub const fn cell_origin(&self, index: usize) -> (u32, u32) {
        let column = index as u32 % GLYPHS_PER_ROW;
        let row = index as u32 / GLYPHS_PER_ROW;
        (column * self.cell_width, row * self.cell_height)
    }
}

/// Builds a [`FontConfig`] by rasterizing an outline font into an atlas
pub struct AtlasBuilder {
    settings: AtlasSettings,
}

impl AtlasBuilder {
    /// Create a builder for the given settings
    pub fn new(settings: AtlasSettings) -> Self {
        Self { settings }
    }

    /// Settings this builder was created with
    pub fn settings(&self) -> &AtlasSettings {
        &self.settings
    }

    /// Parse TrueType/OpenType data and build its atlas
    ///
    /// The range table is checked before the font is parsed, so a bad table
    /// is reported without touching the font data.
    pub fn build(&self, font_data: &[u8]) -> FontResult<FontConfig> {
        self.check_settings()?;
        let font = FontdueFont::from_bytes(font_data)?;
        self.build_with(&font)
    }

    /// Build the atlas using an already loaded outline font
    pub fn build_with<F: OutlineFont + ?Sized>(&self, font: &F) -> FontResult<FontConfig> {
        self.check_settings()?;

        let ranges = &self.settings.ranges;
        let px = self.settings.point_scale;
        let glyph_ids: Vec<u16> = ranges.code_points().map(|cp| font.glyph_index(cp)).collect();

        let bounds = CellBounds::from_metrics(glyph_ids.iter().map(|&id| font.metrics(id, px)));
        let layout = AtlasLayout::new(bounds.width(), bounds.height(), glyph_ids.len())?;

        log::info!(
            "Rasterizing {} glyphs at {}pt into {}x{} atlas ({}x{} cells, {} rows)",
            glyph_ids.len(),
            px,
            layout.width,
            layout.height,
            layout.cell_width,
            layout.cell_height,
            layout.rows
        );

        // RgbaImage::new is zero-filled, i.e. fully transparent.
        let mut image = RgbaImage::new(layout.width, layout.height);
        let mut glyphs = Charset::new();

        for (index, (code_point, &glyph_id)) in ranges.code_points().zip(&glyph_ids).enumerate() {
            let (cell_x, cell_y) = layout.cell_origin(index);
            let (metrics, coverage) = font.rasterize(glyph_id, px);
            blit_coverage(&mut image, &layout, &bounds, (cell_x, cell_y), &metrics, &coverage);

            let glyph = Glyph {
                x: cell_x,
                y: cell_y,
                width: layout.cell_width,
                height: layout.cell_height,
                advance: metrics.advance_width.round().max(0.0) as u32,
            };
            if self.settings.debug {
                log::debug!("U+{code_point:04X} -> glyph {index}: {glyph:?}");
            }
            glyphs.push(glyph);
        }

        Ok(FontConfig::new(ranges.clone(), glyphs, image))
    }

    fn check_settings(&self) -> FontResult<()> {
        let ranges = &self.settings.ranges;
        if ranges.is_empty() {
            return Err(FontError::EmptyRangeTable);
        }
        if !ranges.validate() {
            return Err(FontError::InvalidRangeTable);
        }
        // Even 1x1 cells must fit before any glyph is measured.
        AtlasLayout::new(1, 1, ranges.glyph_count())?;
        let px = self.settings.point_scale;
        if !px.is_finite() || px <= 0.0 {
            return Err(FontError::InvalidPointScale(px));
        }
        Ok(())
    }
}

/// Copy a coverage bitmap into its cell as white with alpha = coverage
///
/// The bitmap is placed against the shared baseline and left edge of `bounds`
/// and clipped to the cell.
fn blit_coverage(
    image: &mut RgbaImage,
    layout: &AtlasLayout,
    bounds: &CellBounds,
    (cell_x, cell_y): (u32, u32),
    metrics: &RasterMetrics,
    coverage: &[u8],
) {
    let left = i64::from(metrics.xmin - bounds.xmin);
    let top = i64::from(bounds.ymax - (metrics.ymin + metrics.height as i32));

    for row in 0..metrics.height {
        let y = top + row as i64;
        if y < 0 || y >= i64::from(layout.cell_height) {
            continue;
        }
        for column in 0..metrics.width {
            let x = left + column as i64;
            if x < 0 || x >= i64::from(layout.cell_width) {
                continue;
            }
            let Some(&alpha) = coverage.get(row * metrics.width + column) else {
                continue;
            };
            if alpha > 0 {
                image.put_pixel(cell_x + x as u32, cell_y + y as u32, Rgba([255, 255, 255, alpha]));
            }
        }
    }
}

/// Grow an image to power-of-two dimensions, keeping it anchored top-left
///
/// Glyph coordinates stay valid because pixels are never moved.
pub fn pad_to_power_of_two(image: RgbaImage) -> RgbaImage {
    let (width, height) = image.dimensions();
    if width.is_power_of_two() && height.is_power_of_two() {
        return image;
    }
    let mut padded = RgbaImage::new(width.max(1).next_power_of_two(), height.max(1).next_power_of_two());
    image::imageops::replace(&mut padded, &image, 0, 0);
    padded
}
