//! # Atlas Text
//!
//! Bitmap-atlas text rendering: rasterize a scalable outline font into a
//! single power-of-two glyph texture, then turn runtime strings into
//! textured quads that a renderer can draw.
//!
//! ## Features
//!
//! - **Atlas construction**: every code point of a set of Unicode ranges packed
//!   into a uniform 16-column grid
//! - **Text layout**: origin-centred quads with UVs, bounding box tracking and
//!   character hit-testing
//! - **Scaling and alignment**: bounded uniform scale, left/right justification
//! - **Persistence**: font configs saved as RON plus a companion PNG
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use atlas_text::prelude::*;
//!
//! fn show(renderer: &mut dyn TextRenderer) -> Result<(), Box<dyn std::error::Error>> {
//!     let font_bytes = std::fs::read("resources/fonts/default.ttf")?;
//!     let font = Font::build(&font_bytes, AtlasSettings::default(), renderer, FontOptions::default())?;
//!
//!     let mut text = Text::new(&font, 1.0, 1.5);
//!     text.set_string("Hello World");
//!     text.set_position(0.0, 120.0);
//!     text.draw(renderer)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod text;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        foundation::math::{Mat4, Vec2, Vec3},
        text::{
            Align, AtlasBuilder, AtlasSettings, CharacterSide, Charset, DrawUniforms, Font,
            FontConfig, FontError, FontOptions, FontResult, GeometryHandle, Glyph, RenderError,
            RenderResult, RuneRange, RuneRangeTable, Text, TextBounds, TextRenderer, TextVertex,
            TextureHandle,
        },
    };
}
