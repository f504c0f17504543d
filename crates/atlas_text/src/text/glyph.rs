//! Glyph metrics and character sets
//!
//! A [`Glyph`] says where a character's bitmap lives in the atlas image and how
//! far the pen moves after drawing it. A [`Charset`] is the ordered list of
//! glyphs for a font, addressed by the index a
//! [`RuneRangeTable`](super::RuneRangeTable) hands out.

use serde::{Deserialize, Serialize};

use super::font_atlas::{FontError, FontResult};

/// Metrics for a single glyph in the atlas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Glyph {
    /// Left edge of the glyph cell in atlas pixels
    pub x: u32,
    /// Top edge of the glyph cell in atlas pixels
    pub y: u32,
    /// Width of the glyph cell in atlas pixels
    pub width: u32,
    /// Height of the glyph cell in atlas pixels
    pub height: u32,
    /// Horizontal distance to the next glyph's origin
    pub advance: u32,
}

impl Glyph {
    /// Normalized texture coordinates of the glyph's atlas rectangle
    ///
    /// Returns `(uv_min, uv_max)` where `uv_min = (x / atlas_w, y / atlas_h)` and
    /// `uv_max` is the opposite corner. Image rows grow downward, so `uv_min.y`
    /// is the *top* of the glyph.
    pub fn texture_rect(&self, atlas_width: f32, atlas_height: f32) -> ([f32; 2], [f32; 2]) {
        let x = self.x as f32;
        let y = self.y as f32;
        let uv_min = [x / atlas_width, y / atlas_height];
        let uv_max = [
            (x + self.width as f32) / atlas_width,
            (y + self.height as f32) / atlas_height,
        ];
        (uv_min, uv_max)
    }

    fn scaled(&self, factor: u32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_mul(factor)?,
            y: self.y.checked_mul(factor)?,
            width: self.width.checked_mul(factor)?,
            height: self.height.checked_mul(factor)?,
            advance: self.advance.checked_mul(factor)?,
        })
    }
}

/// Ordered set of glyph descriptors for a font
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Charset(Vec<Glyph>);

impl Charset {
    /// Create an empty charset
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Create a charset with `count` zeroed glyphs
    pub fn with_len(count: usize) -> Self {
        Self(vec![Glyph::default(); count])
    }

    /// Scale every glyph by an integer factor
    ///
    /// Used when the backing image is scaled by the same factor, so glyph
    /// geometry keeps matching the pixels. A factor of 0 would collapse every
    /// glyph and a factor of 1 changes nothing, so both are ignored.
    /// The charset is left untouched when any scaled field would overflow.
    pub fn scale(&mut self, factor: u32) -> FontResult<()> {
        if factor <= 1 {
            return Ok(());
        }
        let scaled = self
            .0
            .iter()
            .map(|glyph| glyph.scaled(factor))
            .collect::<Option<Vec<_>>>()
            .ok_or(FontError::ScaleOverflow { factor })?;
        self.0 = scaled;
        Ok(())
    }

    /// Largest glyph width and height in the set
    ///
    /// This is the largest box a single glyph can occupy on screen.
    pub fn max_glyph_size(&self) -> (u32, u32) {
        self.0.iter().fold((0, 0), |(w, h), glyph| {
            (w.max(glyph.width), h.max(glyph.height))
        })
    }

    /// Append a glyph
    pub fn push(&mut self, glyph: Glyph) {
        self.0.push(glyph);
    }

    /// Glyph at `index`
    pub fn get(&self, index: usize) -> Option<&Glyph> {
        self.0.get(index)
    }

    /// Mutable glyph at `index`
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Glyph> {
        self.0.get_mut(index)
    }

    /// Number of glyphs
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the set holds no glyphs
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate glyphs in index order
    pub fn iter(&self) -> std::slice::Iter<'_, Glyph> {
        self.0.iter()
    }

    /// Glyphs as a slice
    pub fn as_slice(&self) -> &[Glyph] {
        &self.0
    }
}

impl From<Vec<Glyph>> for Charset {
    fn from(glyphs: Vec<Glyph>) -> Self {
        Self(glyphs)
    }
}

impl FromIterator<Glyph> for Charset {
    fn from_iter<I: IntoIterator<Item = Glyph>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Charset {
    type Item = &'a Glyph;
    type IntoIter = std::slice::Iter<'a, Glyph>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::ops::Index<usize> for Charset {
    type Output = Glyph;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}
