//! Fakes shared by the text tests

use std::cell::Cell;
use std::path::PathBuf;

use image::RgbaImage;

use super::font::{Font, FontOptions};
use super::font_config::FontConfig;
use super::glyph::{Charset, Glyph};
use super::rasterizer::{OutlineFont, RasterMetrics};
use super::renderer::{
    DrawUniforms, GeometryHandle, RenderError, RenderResult, TextRenderer, TextVertex,
    TextureHandle,
};
use super::rune_range::{RuneRange, RuneRangeTable};

/// Outline font whose every glyph is a solid `width` x `height` block
/// sitting on the baseline. Glyph ids are the code points themselves.
pub struct BlockFont {
    width: usize,
    height: usize,
    missing: Option<u32>,
    measured: Cell<usize>,
    rasterized: Cell<usize>,
}

impl BlockFont {
    pub const NOTDEF_ADVANCE: u32 = 3;

    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            missing: None,
            measured: Cell::new(0),
            rasterized: Cell::new(0),
        }
    }

    /// Leave `code_point` unmapped so it falls back to glyph 0
    pub fn with_missing(mut self, code_point: u32) -> Self {
        self.missing = Some(code_point);
        self
    }

    pub fn measured_count(&self) -> usize {
        self.measured.get()
    }

    pub fn rasterized_count(&self) -> usize {
        self.rasterized.get()
    }

    fn block_metrics(&self, glyph: u16) -> RasterMetrics {
        let advance_width = if glyph == 0 {
            Self::NOTDEF_ADVANCE as f32
        } else {
            (self.width + 1) as f32
        };
        RasterMetrics {
            xmin: 0,
            ymin: 0,
            width: self.width,
            height: self.height,
            advance_width,
        }
    }
}

impl OutlineFont for BlockFont {
    fn glyph_index(&self, code_point: u32) -> u16 {
        if Some(code_point) == self.missing {
            0
        } else {
            u16::try_from(code_point).unwrap_or(0)
        }
    }

    fn metrics(&self, glyph: u16, _px: f32) -> RasterMetrics {
        self.measured.set(self.measured.get() + 1);
        self.block_metrics(glyph)
    }

    fn rasterize(&self, glyph: u16, _px: f32) -> (RasterMetrics, Vec<u8>) {
        self.rasterized.set(self.rasterized.get() + 1);
        (self.block_metrics(glyph), vec![255; self.width * self.height])
    }
}

/// Renderer that records every call
#[derive(Default)]
pub struct RecordingRenderer {
    pub fail_uploads: bool,
    pub textures: Vec<TextureHandle>,
    pub uploaded_sizes: Vec<(u32, u32)>,
    pub released_textures: Vec<TextureHandle>,
    pub geometries: usize,
    pub vertex_uploads: Vec<usize>,
    pub index_uploads: Vec<usize>,
    pub draws: Vec<(GeometryHandle, TextureHandle, DrawUniforms, u32)>,
    pub released_geometries: Vec<GeometryHandle>,
    next_handle: u64,
}

impl RecordingRenderer {
    /// Renderer that rejects every texture upload
    pub fn failing() -> Self {
        Self { fail_uploads: true, ..Self::default() }
    }

    fn next_handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl TextRenderer for RecordingRenderer {
    fn upload_texture(&mut self, image: &RgbaImage) -> RenderResult<TextureHandle> {
        if self.fail_uploads {
            return Err(RenderError::ResourceCreationFailed("texture upload disabled".into()));
        }
        let handle = TextureHandle(self.next_handle());
        self.textures.push(handle);
        self.uploaded_sizes.push(image.dimensions());
        Ok(handle)
    }

    fn release_texture(&mut self, texture: TextureHandle) {
        self.released_textures.push(texture);
    }

    fn create_geometry(&mut self) -> RenderResult<GeometryHandle> {
        self.geometries += 1;
        Ok(GeometryHandle(self.next_handle()))
    }

    fn upload_vertex_data(&mut self, _geometry: GeometryHandle, vertices: &[TextVertex]) -> RenderResult<()> {
        self.vertex_uploads.push(vertices.len());
        Ok(())
    }

    fn upload_index_data(&mut self, _geometry: GeometryHandle, indices: &[u32]) -> RenderResult<()> {
        self.index_uploads.push(indices.len());
        Ok(())
    }

    fn draw(
        &mut self,
        geometry: GeometryHandle,
        texture: TextureHandle,
        uniforms: &DrawUniforms,
        index_count: u32,
    ) -> RenderResult<()> {
        self.draws.push((geometry, texture, uniforms.clone(), index_count));
        Ok(())
    }

    fn release_geometry(&mut self, geometry: GeometryHandle) {
        self.released_geometries.push(geometry);
    }
}

/// Font covering consecutive code points from `first`, one `(width, height,
/// advance)` per glyph, packed left to right along the atlas top row
pub fn font_from_glyphs(
    renderer: &mut RecordingRenderer,
    first: char,
    glyphs: &[(u32, u32, u32)],
    viewport: f32,
) -> Font {
    let low = u32::from(first);
    let high = low + glyphs.len() as u32 - 1;

    let mut x = 0;
    let charset: Charset = glyphs
        .iter()
        .map(|&(width, height, advance)| {
            let glyph = Glyph { x, y: 0, width, height, advance };
            x += width;
            glyph
        })
        .collect();
    let height = glyphs.iter().map(|g| g.1).max().unwrap_or(1);
    let image = RgbaImage::new(x.next_power_of_two(), height.next_power_of_two());

    let config = FontConfig::new(
        RuneRangeTable::new(vec![RuneRange::new(low, high).unwrap()]),
        charset,
        image,
    );
    let options = FontOptions {
        viewport_width: viewport,
        viewport_height: viewport,
        debug: true,
    };
    Font::new(config, renderer, options).unwrap()
}

/// Fresh directory under the system temp dir, unique per test name
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join(format!("atlas_text-{}", std::process::id()))
        .join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}
