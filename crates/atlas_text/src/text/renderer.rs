//! Renderer abstraction consumed by fonts and texts
//!
//! The layout engine never talks to a graphics API. Fonts and texts hand
//! atlas images, vertex data and per-draw uniforms to a [`TextRenderer`],
//! which owns all device resources behind opaque handles.

use bytemuck::{Pod, Zeroable};
use image::RgbaImage;

use crate::foundation::math::{Mat4, Vec2, Vec3};

/// Result type for renderer operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors reported by renderer implementations
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Texture or buffer creation failed
    #[error("Resource creation failed: {0}")]
    ResourceCreationFailed(String),

    /// A draw call failed
    #[error("Rendering failed: {0}")]
    RenderingFailed(String),

    /// A handle was used after release or never issued by this renderer
    #[error("Invalid handle: {0}")]
    InvalidHandle(u64),
}

/// Handle to an uploaded atlas texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Handle to a vertex/index buffer pair owned by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryHandle(pub u64);

/// Vertex data for text rendering
///
/// Positions are pixels relative to the text's centre; the renderer applies
/// scale, projection and final position as uniforms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct TextVertex {
    /// Centred position in pixels
    pub position: [f32; 2],
    /// UV texture coordinates
    pub uv: [f32; 2],
}

/// Per-draw values for the text shader
#[derive(Debug, Clone, PartialEq)]
pub struct DrawUniforms {
    /// Screen offset in normalized device coordinates, added after projection
    pub final_position: Vec2,
    /// Uniform scale around the text centre
    pub scale: Mat4,
    /// Origin-centred orthographic projection for the current viewport
    pub orthographic: Mat4,
    /// RGB text color multiplied with atlas coverage
    pub color: Vec3,
}

/// Graphics back end for atlas text
///
/// Implementations are expected to draw indexed triangles with alpha
/// blending, sampling the atlas texture at each vertex's UV.
pub trait TextRenderer {
    /// Upload an atlas image and return its texture handle
    fn upload_texture(&mut self, image: &RgbaImage) -> RenderResult<TextureHandle>;

    /// Free a texture
    fn release_texture(&mut self, texture: TextureHandle);

    /// Allocate an empty vertex/index buffer pair
    fn create_geometry(&mut self) -> RenderResult<GeometryHandle>;

    /// Replace the vertex data of a geometry
    fn upload_vertex_data(&mut self, geometry: GeometryHandle, vertices: &[TextVertex]) -> RenderResult<()>;

    /// Replace the index data of a geometry
    fn upload_index_data(&mut self, geometry: GeometryHandle, indices: &[u32]) -> RenderResult<()>;

    /// Draw the first `index_count` indices of a geometry
    fn draw(
        &mut self,
        geometry: GeometryHandle,
        texture: TextureHandle,
        uniforms: &DrawUniforms,
        index_count: u32,
    ) -> RenderResult<()>;

    /// Free a geometry
    fn release_geometry(&mut self, geometry: GeometryHandle);
}
