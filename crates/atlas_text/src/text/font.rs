//! Uploaded font ready for text layout
//!
//! A [`Font`] owns its [`FontConfig`], the renderer's handle to the atlas
//! texture, and the viewport size used to map pixel offsets to normalized
//! device coordinates. [`Text`](super::Text) values borrow the font, so it
//! cannot be released while any of them are alive.

use std::cell::Cell;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::foundation::math::{centered_orthographic, Mat4, Vec2};

use super::font_atlas::{pad_to_power_of_two, AtlasBuilder, AtlasSettings, FontResult};
use super::font_config::FontConfig;
use super::glyph::{Charset, Glyph};
use super::renderer::{RenderResult, TextRenderer, TextureHandle};
use super::rune_range::RuneRangeTable;

/// Options for creating a [`Font`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontOptions {
    /// Initial viewport width in pixels
    pub viewport_width: f32,
    /// Initial viewport height in pixels
    pub viewport_height: f32,
    /// Log geometry dumps for every laid-out string
    pub debug: bool,
}

impl Default for FontOptions {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 600.0,
            debug: false,
        }
    }
}

impl Config for FontOptions {}

/// Rasterized font with its atlas texture uploaded to a renderer
pub struct Font {
    config: FontConfig,
    texture: TextureHandle,
    atlas_width: f32,
    atlas_height: f32,
    max_glyph_size: (u32, u32),
    viewport: Cell<Vec2>,
    debug: bool,
}

impl Font {
    /// Upload a font config's atlas and wrap it
    ///
    /// Atlas images that are not power-of-two sized (e.g. hand-edited PNGs)
    /// are padded before upload; glyph coordinates are unaffected.
    pub fn new(
        mut config: FontConfig,
        renderer: &mut dyn TextRenderer,
        options: FontOptions,
    ) -> FontResult<Self> {
        let (width, height) = config.image().dimensions();
        if !(width.is_power_of_two() && height.is_power_of_two()) {
            log::warn!("Atlas image {width}x{height} is not power-of-two sized, padding");
            let padded = pad_to_power_of_two(config.image().clone());
            config.set_image(padded);
        }
        let (atlas_width, atlas_height) = config.image().dimensions();

        let texture = renderer.upload_texture(config.image())?;
        log::info!(
            "Font atlas {}x{} uploaded: {:?} ({} glyphs)",
            atlas_width,
            atlas_height,
            texture,
            config.glyphs().len()
        );

        Ok(Self {
            max_glyph_size: config.glyphs().max_glyph_size(),
            config,
            texture,
            atlas_width: atlas_width as f32,
            atlas_height: atlas_height as f32,
            viewport: Cell::new(Vec2::new(options.viewport_width, options.viewport_height)),
            debug: options.debug,
        })
    }

    /// Rasterize TrueType/OpenType data and upload the resulting atlas
    pub fn build(
        font_data: &[u8],
        settings: AtlasSettings,
        renderer: &mut dyn TextRenderer,
        options: FontOptions,
    ) -> FontResult<Self> {
        let config = AtlasBuilder::new(settings).build(font_data)?;
        Self::new(config, renderer, options)
    }

    /// Load a persisted font directory and upload its atlas
    pub fn load<P: AsRef<Path>>(
        dir: P,
        renderer: &mut dyn TextRenderer,
        options: FontOptions,
    ) -> FontResult<Self> {
        Self::new(FontConfig::load(dir)?, renderer, options)
    }

    /// Update the viewport after a window resize
    ///
    /// Texts pick up the new size the next time they are positioned or drawn.
    pub fn resize_window(&self, width: f32, height: f32) {
        self.viewport.set(Vec2::new(width, height));
    }

    /// Current viewport size in pixels
    pub fn viewport(&self) -> Vec2 {
        self.viewport.get()
    }

    /// Orthographic projection for the current viewport, centred on the origin
    pub fn orthographic_matrix(&self) -> Mat4 {
        let viewport = self.viewport.get();
        centered_orthographic(viewport.x, viewport.y)
    }

    /// Glyph for a code point, if the font covers it
    pub fn glyph(&self, code_point: u32) -> Option<&Glyph> {
        self.config
            .ranges()
            .glyph_index(code_point)
            .and_then(|index| self.config.glyphs().get(index))
    }

    /// Lowest code point covered
    pub fn low(&self) -> u32 {
        self.config.low()
    }

    /// Highest code point covered
    pub fn high(&self) -> u32 {
        self.config.high()
    }

    /// Glyph metrics
    pub fn glyphs(&self) -> &Charset {
        self.config.glyphs()
    }

    /// Code-point ranges covered
    pub fn ranges(&self) -> &RuneRangeTable {
        self.config.ranges()
    }

    /// Underlying font config
    pub fn config(&self) -> &FontConfig {
        &self.config
    }

    /// Largest glyph width and height, the biggest box one glyph can cover
    pub fn glyph_bounds(&self) -> (u32, u32) {
        self.max_glyph_size
    }

    /// Renderer handle of the atlas texture
    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    /// Atlas texture dimensions in pixels
    pub fn atlas_size(&self) -> (f32, f32) {
        (self.atlas_width, self.atlas_height)
    }

    /// Whether verbose layout logging was requested
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Free the atlas texture
    ///
    /// Consumes the font, so no text can still refer to it.
    pub fn release(self, renderer: &mut dyn TextRenderer) -> RenderResult<()> {
        renderer.release_texture(self.texture);
        log::debug!("Released font texture {:?}", self.texture);
        Ok(())
    }
}
