//! Rasterized font description and its on-disk form
//!
//! A font directory holds `font.ron` (range table and glyph metrics) next to
//! `image.png` (the atlas). Either half alone is useless, so they are always
//! written and read together.

use std::path::Path;

use image::{ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::config::Config;

use super::font_atlas::{FontError, FontResult};
use super::glyph::Charset;
use super::rune_range::RuneRangeTable;

/// File name of the glyph record inside a font directory
pub const CONFIG_FILE: &str = "font.ron";

/// File name of the atlas image inside a font directory
pub const IMAGE_FILE: &str = "image.png";

/// Serialized part of a [`FontConfig`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct FontRecord {
    low: u32,
    high: u32,
    glyphs: Charset,
    rune_ranges: RuneRangeTable,
}

impl Config for FontRecord {}

/// Complete description of one rasterized font at one scale
#[derive(Debug, Clone, PartialEq)]
pub struct FontConfig {
    low: u32,
    high: u32,
    ranges: RuneRangeTable,
    glyphs: Charset,
    image: RgbaImage,
}

impl FontConfig {
    /// Assemble a config from its parts
    pub fn new(ranges: RuneRangeTable, glyphs: Charset, image: RgbaImage) -> Self {
        Self {
            low: ranges.low().unwrap_or(0),
            high: ranges.high().unwrap_or(0),
            ranges,
            glyphs,
            image,
        }
    }

    /// Lowest code point covered
    pub fn low(&self) -> u32 {
        self.low
    }

    /// Highest code point covered
    pub fn high(&self) -> u32 {
        self.high
    }

    /// Code-point ranges mapped onto [`glyphs`](Self::glyphs)
    pub fn ranges(&self) -> &RuneRangeTable {
        &self.ranges
    }

    /// Glyph metrics, indexed through the range table
    pub fn glyphs(&self) -> &Charset {
        &self.glyphs
    }

    /// Atlas image
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub(crate) fn set_image(&mut self, image: RgbaImage) {
        self.image = image;
    }

    /// Scale the atlas image and every glyph by an integer factor
    ///
    /// Every source pixel becomes a `factor x factor` block, so glyph cells
    /// land exactly on the scaled coordinates. Factors of 0 and 1 are ignored.
    ///
    /// Fails with [`FontError::ScaleOverflow`] when the scaled image or glyph
    /// coordinates do not fit in `u32`, leaving the config unchanged.
    pub fn scale(&mut self, factor: u32) -> FontResult<()> {
        if factor <= 1 {
            return Ok(());
        }
        let (width, height) = self.image.dimensions();
        let (Some(scaled_width), Some(scaled_height)) =
            (width.checked_mul(factor), height.checked_mul(factor))
        else {
            return Err(FontError::ScaleOverflow { factor });
        };

        let mut glyphs = self.glyphs.clone();
        glyphs.scale(factor)?;
        let image = RgbaImage::from_fn(scaled_width, scaled_height, |x, y| {
            *self.image.get_pixel(x / factor, y / factor)
        });
        self.image = image;
        self.glyphs = glyphs;
        log::debug!("Scaled font config by {}x to {:?}", factor, self.image.dimensions());
        Ok(())
    }

    /// Write `font.ron` and `image.png` into `dir`, creating it if needed
    pub fn save<P: AsRef<Path>>(&self, dir: P) -> FontResult<()> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let record = FontRecord {
            low: self.low,
            high: self.high,
            glyphs: self.glyphs.clone(),
            rune_ranges: self.ranges.clone(),
        };
        record.save_to_file(dir.join(CONFIG_FILE))?;
        self.image.save_with_format(dir.join(IMAGE_FILE), ImageFormat::Png)?;

        log::info!("Saved font config ({} glyphs) to {}", self.glyphs.len(), dir.display());
        Ok(())
    }

    /// Read a font directory written by [`save`](Self::save)
    pub fn load<P: AsRef<Path>>(dir: P) -> FontResult<Self> {
        let dir = dir.as_ref();
        let record = FontRecord::load_from_file(dir.join(CONFIG_FILE))?;
        let image = image::open(dir.join(IMAGE_FILE))?.to_rgba8();

        if !record.rune_ranges.validate() {
            return Err(FontError::InvalidRangeTable);
        }
        if record.rune_ranges.glyph_count() != record.glyphs.len() {
            return Err(FontError::InconsistentConfig(format!(
                "{} glyphs recorded for {} code points",
                record.glyphs.len(),
                record.rune_ranges.glyph_count()
            )));
        }
        let (width, height) = image.dimensions();
        if let Some(glyph) = record
            .glyphs
            .iter()
            .find(|g| {
                u64::from(g.x) + u64::from(g.width) > u64::from(width)
                    || u64::from(g.y) + u64::from(g.height) > u64::from(height)
            })
        {
            return Err(FontError::InconsistentConfig(format!(
                "glyph {glyph:?} lies outside the {width}x{height} atlas"
            )));
        }

        log::info!("Loaded font config ({} glyphs) from {}", record.glyphs.len(), dir.display());
        Ok(Self {
            low: record.low,
            high: record.high,
            ranges: record.rune_ranges,
            glyphs: record.glyphs,
            image,
        })
    }
}
