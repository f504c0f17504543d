//! Glyph atlases and text layout
//!
//! Building a font is a one-off step: [`AtlasBuilder`] rasterizes every code
//! point of a [`RuneRangeTable`] into a [`FontConfig`] (charset plus atlas
//! image), which can be saved and loaded again without the source font.
//! A [`Font`] uploads that atlas through a [`TextRenderer`], and [`Text`]
//! values lay strings out against it.

pub mod font;
pub mod font_atlas;
pub mod font_config;
pub mod glyph;
pub mod rasterizer;
pub mod renderer;
pub mod rune_range;
pub mod text_layout;

#[cfg(test)]
pub(crate) mod test_support;
#[cfg(test)]
mod tests;

pub use font::{Font, FontOptions};
pub use font_atlas::{
    pad_to_power_of_two, AtlasBuilder, AtlasLayout, AtlasSettings, FontError, FontResult,
    GLYPHS_PER_ROW, MAX_ATLAS_DIMENSION,
};
pub use font_config::{FontConfig, CONFIG_FILE, IMAGE_FILE};
pub use glyph::{Charset, Glyph};
pub use rasterizer::{FontdueFont, OutlineFont, RasterMetrics};
pub use renderer::{
    DrawUniforms, GeometryHandle, RenderError, RenderResult, TextRenderer, TextVertex,
    TextureHandle,
};
pub use rune_range::{RuneRange, RuneRangeTable};
pub use text_layout::{Align, CharacterSide, Text, TextBounds, TextState};
