//! Text layout engine
//!
//! Converts strings into positioned quads (vertices and indices) for
//! rendering. Geometry is built along a single baseline starting at the
//! origin, then re-centred so the text's bounding box is symmetric about
//! `(0, 0)`. Scaling is applied by the renderer around that centre, and the
//! screen position is a separate offset, so zooming a text never moves it.
//!
//! # Layout Coordinate System
//!
//! - Pixels, origin at the centre of the viewport
//! - +X axis points right
//! - +Y axis points up
//!
//! # Example
//!
//! ```no_run
//! # use atlas_text::prelude::*;
//! # fn demo(font: &Font) {
//! let mut text = Text::new(font, 1.0, 2.0);
//! text.set_string("Hello");
//! assert_eq!(text.vertices().len(), 20); // 5 chars x 4 vertices
//! assert_eq!(text.indices().len(), 30);  // 5 chars x 6 indices
//! text.set_position(-200.0, 100.0);
//! # }
//! ```

use crate::foundation::math::{uniform_scale, Mat4, Vec2, Vec3};

use super::font::Font;
use super::renderer::{DrawUniforms, GeometryHandle, RenderResult, TextRenderer, TextVertex};

/// Horizontal alignment relative to the requested position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Align {
    /// Left edge sits at the requested x
    Left,
    /// Right edge sits at the requested x
    Right,
    /// Centre sits at the requested x (the layout is already centred)
    Center,
}

/// Which half of a character a point falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterSide {
    /// Left half, e.g. a caret goes before the character
    Left,
    /// Right half, e.g. a caret goes after the character
    Right,
}

/// Lifecycle of a [`Text`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextState {
    /// No glyphs laid out yet
    Empty,
    /// Glyphs laid out around the origin
    LaidOut,
    /// Laid out and moved with [`Text::set_position`]
    Positioned,
}

/// Axis-aligned bounding box of laid-out text
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextBounds {
    /// Lower-left corner
    pub lower_left: Vec2,
    /// Upper-right corner
    pub upper_right: Vec2,
}

impl TextBounds {
    fn from_point(point: Vec2) -> Self {
        Self { lower_left: point, upper_right: point }
    }

    fn expand(&mut self, point: Vec2) {
        self.lower_left = self.lower_left.inf(&point);
        self.upper_right = self.upper_right.sup(&point);
    }

    /// Width of the bounding box
    pub fn width(&self) -> f32 {
        self.upper_right.x - self.lower_left.x
    }

    /// Height of the bounding box
    pub fn height(&self) -> f32 {
        self.upper_right.y - self.lower_left.y
    }

    /// Centre point
    pub fn center(&self) -> Vec2 {
        (self.lower_left + self.upper_right) / 2.0
    }

    /// The same box moved by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            lower_left: self.lower_left + offset,
            upper_right: self.upper_right + offset,
        }
    }

    /// True when `point` lies inside or on the edge of the box
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.lower_left.x
            && point.x <= self.upper_right.x
            && point.y >= self.lower_left.y
            && point.y <= self.upper_right.y
    }
}

/// Raw geometry for one string, before centring
struct GlyphRun {
    vertices: Vec<TextVertex>,
    indices: Vec<u32>,
    char_spacing: Vec<f32>,
    bounds: TextBounds,
}

impl GlyphRun {
    fn layout(font: &Font, chars: &[char]) -> Self {
        let (atlas_width, atlas_height) = font.atlas_size();
        let mut vertices = Vec::with_capacity(chars.len() * 4);
        let mut indices = Vec::with_capacity(chars.len() * 6);
        let mut char_spacing = Vec::with_capacity(chars.len());
        let mut bounds: Option<TextBounds> = None;

        let mut line_x = 0.0f32;
        let mut index_offset = 0u32;

        for &ch in chars {
            // Unresolved code points add neither a quad nor an advance.
            let Some(glyph) = font.glyph(u32::from(ch)) else {
                log::trace!("Skipping U+{:04X}, not covered by font", u32::from(ch));
                continue;
            };

            let advance = glyph.advance as f32;
            let width = glyph.width as f32;
            let height = glyph.height as f32;
            let (uv_min, uv_max) = glyph.texture_rect(atlas_width, atlas_height);

            // Counter-clockwise from bottom-left. Image rows grow downward, so
            // the quad's bottom samples the glyph's bottom row (uv_max.y).
            let quad = [
                TextVertex { position: [line_x, 0.0], uv: [uv_min[0], uv_max[1]] },
                TextVertex { position: [line_x + width, 0.0], uv: [uv_max[0], uv_max[1]] },
                TextVertex { position: [line_x + width, height], uv: [uv_max[0], uv_min[1]] },
                TextVertex { position: [line_x, height], uv: [uv_min[0], uv_min[1]] },
            ];
            for vertex in &quad {
                let point = Vec2::new(vertex.position[0], vertex.position[1]);
                match bounds.as_mut() {
                    Some(bounds) => bounds.expand(point),
                    None => bounds = Some(TextBounds::from_point(point)),
                }
            }
            vertices.extend_from_slice(&quad);
            indices.extend_from_slice(&[
                index_offset,
                index_offset + 1,
                index_offset + 2,
                index_offset,
                index_offset + 2,
                index_offset + 3,
            ]);
            index_offset += 4;

            char_spacing.push(advance);
            line_x += advance;
        }

        Self {
            vertices,
            indices,
            char_spacing,
            bounds: bounds.unwrap_or_default(),
        }
    }

    /// Move everything so the bounding box is centred on the origin
    fn center(&mut self) {
        // Raw geometry starts at the origin, so this is (-width/2, -height/2).
        let offset = -self.bounds.center();
        for vertex in &mut self.vertices {
            vertex.position[0] += offset.x;
            vertex.position[1] += offset.y;
        }
        self.bounds = self.bounds.translated(offset);
    }
}

/// One laid-out string drawn with a [`Font`]
///
/// The text borrows its font; the font must outlive every text created from
/// it, which the borrow checker enforces.
pub struct Text<'f> {
    font: &'f Font,

    vertices: Vec<TextVertex>,
    indices: Vec<u32>,
    char_spacing: Vec<f32>,

    // bounding box with centre (0, 0)
    centered_bounds: TextBounds,
    // requested screen position in pixels from the viewport centre
    position: Vec2,

    scale: f32,
    scale_min: f32,
    scale_max: f32,

    color: Vec3,
    string: String,
    rune_count: usize,
    max_rune_count: Option<usize>,
    state: TextState,

    geometry: Option<GeometryHandle>,
    needs_upload: bool,
}

impl<'f> Text<'f> {
    /// Create an empty text with scaling boundaries
    ///
    /// The resting scale of a text is `scale_min`, normally 1.0; the text
    /// starts at scale 1.0 when that lies within the bounds.
    pub fn new(font: &'f Font, scale_min: f32, scale_max: f32) -> Self {
        let (scale_min, scale_max) = if scale_min <= scale_max {
            (scale_min, scale_max)
        } else {
            log::warn!("Scale bounds {scale_min}..{scale_max} inverted, swapping");
            (scale_max, scale_min)
        };

        let mut text = Self {
            font,
            vertices: Vec::new(),
            indices: Vec::new(),
            char_spacing: Vec::new(),
            centered_bounds: TextBounds::default(),
            position: Vec2::zeros(),
            scale: scale_min,
            scale_min,
            scale_max,
            color: Vec3::new(1.0, 1.0, 1.0),
            string: String::new(),
            rune_count: 0,
            max_rune_count: None,
            state: TextState::Empty,
            geometry: None,
            needs_upload: false,
        };
        text.set_scale(1.0);
        text
    }

    /// Limit how many characters of future strings are laid out
    pub fn set_max_rune_count(&mut self, max: Option<usize>) {
        self.max_rune_count = max;
    }

    /// Lay out a new string, replacing all previous geometry
    ///
    /// Characters the font does not cover are skipped. A previously set
    /// position is kept. Returns the positioned bounding box.
    pub fn set_string(&mut self, text: &str) -> TextBounds {
        let chars: Vec<char> = text.chars().collect();
        self.set_chars(&chars)
    }

    /// Lay out already decoded characters, see [`set_string`](Self::set_string)
    pub fn set_chars(&mut self, chars: &[char]) -> TextBounds {
        let chars = match self.max_rune_count {
            Some(max) if chars.len() > max => &chars[..max],
            _ => chars,
        };

        let mut run = GlyphRun::layout(self.font, chars);
        run.center();

        // Swap everything in at once so no half-updated state is observable.
        self.vertices = run.vertices;
        self.indices = run.indices;
        self.char_spacing = run.char_spacing;
        self.centered_bounds = run.bounds;
        self.string = chars.iter().collect();
        self.rune_count = self.char_spacing.len();
        self.needs_upload = true;

        if self.font.debug() {
            log::debug!("text {:?} bounding box {:?}", self.string, self.centered_bounds);
            log::debug!("text vertices {:?}", self.vertices);
            log::debug!("text indices {:?}", self.indices);
        }

        // The stored position carries over, but a new string is only laid out.
        self.state = if self.rune_count == 0 { TextState::Empty } else { TextState::LaidOut };
        self.bounds()
    }

    /// Place the text's centre at `(x, y)` pixels from the viewport centre
    ///
    /// Only the logical bounding box and stored offset change; vertex data
    /// stays centred and the offset reaches the renderer as a uniform.
    pub fn set_position(&mut self, x: f32, y: f32) {
        if self.state == TextState::Empty && self.font.debug() {
            log::debug!("Positioning text with an unset bounding box");
        }
        self.position = Vec2::new(x, y);
        if self.state != TextState::Empty {
            self.state = TextState::Positioned;
        }
    }

    /// Requested position in pixels
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Position in normalized device coordinates for the shader
    pub fn final_position(&self) -> Vec2 {
        let viewport = self.font.viewport();
        let half = viewport / 2.0;
        Vec2::new(
            if half.x == 0.0 { 0.0 } else { self.position.x / half.x },
            if half.y == 0.0 { 0.0 } else { self.position.y / half.y },
        )
    }

    /// Set the uniform scale, rejecting values outside the scale bounds
    ///
    /// Returns true when the scale changed.
    pub fn set_scale(&mut self, scale: f32) -> bool {
        if !(self.scale_min..=self.scale_max).contains(&scale) {
            return false;
        }
        self.scale = scale;
        true
    }

    /// Change the scale by `delta`, with the same bounds as [`set_scale`](Self::set_scale)
    pub fn add_scale(&mut self, delta: f32) -> bool {
        self.set_scale(self.scale + delta)
    }

    /// Current uniform scale
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Allowed scale range `(min, max)`
    pub fn scale_bounds(&self) -> (f32, f32) {
        (self.scale_min, self.scale_max)
    }

    /// Scale matrix applied around the text centre
    pub fn scale_matrix(&self) -> Mat4 {
        uniform_scale(self.scale)
    }

    /// Align the text relative to its current position
    ///
    /// `Left` moves the text right by half its width so its left edge sits
    /// where the centre was, `Right` moves it left likewise, `Center` keeps it.
    pub fn justify(&mut self, align: Align) {
        if self.state == TextState::Empty {
            return;
        }
        let half_width = self.width() / 2.0;
        let shift = match align {
            Align::Left => half_width,
            Align::Right => -half_width,
            Align::Center => 0.0,
        };
        self.set_position(self.position.x + shift, self.position.y);
    }

    /// Character under an absolute horizontal screen coordinate
    ///
    /// Only checks x, so call it after confirming a bounding-box hit. Points
    /// left of the first character count as its left half and points right of
    /// the last character as its right half. Indices count laid-out glyphs.
    pub fn clicked_character(&self, x_pos: f32) -> Option<(usize, CharacterSide)> {
        // screen coordinates -> centre-origin coordinates
        let x = x_pos - self.font.viewport().x / 2.0;
        let last = self.char_spacing.len().checked_sub(1)?;

        let mut at = self.bounds().lower_left.x;
        for (index, &spacing) in self.char_spacing.iter().enumerate() {
            let start = at;
            at += spacing;
            if index == 0 && x <= start {
                return Some((index, CharacterSide::Left));
            }
            if index == last && x > at {
                return Some((index, CharacterSide::Right));
            }
            if x > start && x <= at {
                let side = if x - start > spacing / 2.0 {
                    CharacterSide::Right
                } else {
                    CharacterSide::Left
                };
                return Some((index, side));
            }
        }
        None
    }

    /// Left edge of glyph `index` in centre-origin coordinates
    ///
    /// Indices past the end give the right edge of the last glyph.
    pub fn char_position(&self, index: usize) -> f32 {
        let end = index.min(self.char_spacing.len());
        self.bounds().lower_left.x + self.char_spacing[..end].iter().sum::<f32>()
    }

    /// True when the font can lay out code point `cp`
    pub fn has_rune(&self, cp: u32) -> bool {
        self.font.ranges().contains(cp)
    }

    /// Set the text color
    pub fn set_color(&mut self, r: f32, g: f32, b: f32) {
        self.color = Vec3::new(r, g, b);
    }

    /// Current text color
    pub fn color(&self) -> Vec3 {
        self.color
    }

    /// Draw only the first `count` glyphs (typewriter effects)
    pub fn set_rune_count(&mut self, count: usize) {
        self.rune_count = count;
    }

    /// Number of glyphs that will be drawn
    pub fn rune_count(&self) -> usize {
        self.rune_count
    }

    /// Indices submitted per draw, never more than exist
    pub fn draw_count(&self) -> usize {
        self.rune_count.saturating_mul(6).min(self.indices.len())
    }

    /// Number of laid-out glyphs
    pub fn glyph_count(&self) -> usize {
        self.indices.len() / 6
    }

    /// Bounding box including the current position
    pub fn bounds(&self) -> TextBounds {
        self.centered_bounds.translated(self.position)
    }

    /// Lower-left corner of [`bounds`](Self::bounds)
    pub fn lower_left(&self) -> Vec2 {
        self.bounds().lower_left
    }

    /// Upper-right corner of [`bounds`](Self::bounds)
    pub fn upper_right(&self) -> Vec2 {
        self.bounds().upper_right
    }

    /// Width of the laid-out text
    pub fn width(&self) -> f32 {
        self.centered_bounds.width()
    }

    /// Height of the laid-out text
    pub fn height(&self) -> f32 {
        self.centered_bounds.height()
    }

    /// The string last passed to [`set_string`](Self::set_string), after truncation
    pub fn string(&self) -> &str {
        &self.string
    }

    /// Centred vertex data
    pub fn vertices(&self) -> &[TextVertex] {
        &self.vertices
    }

    /// Triangle indices, six per glyph
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Advance of every laid-out glyph, in order
    pub fn char_spacing(&self) -> &[f32] {
        &self.char_spacing
    }

    /// Lifecycle state
    pub fn state(&self) -> TextState {
        self.state
    }

    /// Font this text is drawn with
    pub fn font(&self) -> &'f Font {
        self.font
    }

    /// Uniform values for the next draw
    pub fn uniforms(&self) -> DrawUniforms {
        DrawUniforms {
            final_position: self.final_position(),
            scale: self.scale_matrix(),
            orthographic: self.font.orthographic_matrix(),
            color: self.color,
        }
    }

    /// Upload changed geometry and draw the text
    pub fn draw(&mut self, renderer: &mut dyn TextRenderer) -> RenderResult<()> {
        let count = self.draw_count();
        if count == 0 {
            return Ok(());
        }

        let geometry = match self.geometry {
            Some(geometry) => geometry,
            None => {
                let geometry = renderer.create_geometry()?;
                self.geometry = Some(geometry);
                geometry
            }
        };
        if self.needs_upload {
            renderer.upload_vertex_data(geometry, &self.vertices)?;
            renderer.upload_index_data(geometry, &self.indices)?;
            self.needs_upload = false;
        }

        renderer.draw(geometry, self.font.texture(), &self.uniforms(), count as u32)
    }

    /// Free this text's renderer buffers
    pub fn release(self, renderer: &mut dyn TextRenderer) {
        if let Some(geometry) = self.geometry {
            renderer.release_geometry(geometry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::test_support::{font_from_glyphs, RecordingRenderer};
    use approx::assert_relative_eq;

    fn bounds_symmetric(bounds: &TextBounds) {
        assert_relative_eq!(bounds.lower_left.x, -bounds.upper_right.x, epsilon = 1e-5);
        assert_relative_eq!(bounds.lower_left.y, -bounds.upper_right.y, epsilon = 1e-5);
    }

    #[test]
    fn test_empty_string() {
        let mut renderer = RecordingRenderer::default();
        let font = font_from_glyphs(&mut renderer, 'a', &[(10, 12, 10)], 100.0);
        let mut text = Text::new(&font, 1.0, 2.0);

        let bounds = text.set_string("");
        assert!(text.vertices().is_empty());
        assert!(text.indices().is_empty());
        assert_relative_eq!(bounds.width(), 0.0);
        assert_relative_eq!(bounds.height(), 0.0);
        assert_eq!(text.state(), TextState::Empty);
    }

    #[test]
    fn test_quads_and_indices() {
        let mut renderer = RecordingRenderer::default();
        let font = font_from_glyphs(&mut renderer, 'a', &[(8, 16, 6), (8, 16, 7)], 100.0);
        let mut text = Text::new(&font, 1.0, 2.0);
        text.set_string("ab");

        assert_eq!(text.vertices().len(), 8);
        assert_eq!(text.indices(), &[0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);
        assert_eq!(text.char_spacing(), &[6.0, 7.0]);
        assert_eq!(text.glyph_count(), 2);

        // Raw extent 0..14 x 0..16, centred by (-7, -8).
        let v = text.vertices();
        assert_eq!(v[0].position, [-7.0, -8.0]);
        assert_eq!(v[1].position, [1.0, -8.0]);
        assert_eq!(v[2].position, [1.0, 8.0]);
        assert_eq!(v[3].position, [-7.0, 8.0]);
        assert_eq!(v[4].position, [-1.0, -8.0]);
        assert_eq!(v[5].position, [7.0, -8.0]);

        // Second glyph sits at x = 8 in a 16 x 16 atlas.
        let (atlas_w, atlas_h) = font.atlas_size();
        assert_relative_eq!(v[4].uv[0], 8.0 / atlas_w);
        assert_relative_eq!(v[4].uv[1], 16.0 / atlas_h);
        assert_relative_eq!(v[6].uv[0], 16.0 / atlas_w);
        assert_relative_eq!(v[6].uv[1], 0.0);

        let bounds = text.bounds();
        assert_relative_eq!(bounds.width(), 14.0);
        assert_relative_eq!(bounds.height(), 16.0);
        bounds_symmetric(&bounds);
    }

    #[test]
    fn test_unresolved_code_points_are_skipped() {
        let mut renderer = RecordingRenderer::default();
        let font = font_from_glyphs(&mut renderer, 'a', &[(10, 12, 10), (10, 12, 10)], 100.0);
        let mut text = Text::new(&font, 1.0, 2.0);

        text.set_string("a?b\u{1F600}");
        assert_eq!(text.glyph_count(), 2);
        assert_eq!(text.char_spacing(), &[10.0, 10.0]);
        assert_relative_eq!(text.width(), 20.0);
        assert_eq!(text.string(), "a?b\u{1F600}");
        assert!(text.has_rune('a' as u32));
        assert!(!text.has_rune('?' as u32));
    }

    #[test]
    fn test_position_is_idempotent_and_survives_set_string() {
        let mut renderer = RecordingRenderer::default();
        let font = font_from_glyphs(&mut renderer, 'a', &[(10, 12, 10)], 200.0);
        let mut text = Text::new(&font, 1.0, 2.0);
        text.set_string("aa");
        assert_eq!(text.state(), TextState::LaidOut);
        bounds_symmetric(&text.bounds());

        text.set_position(50.0, -30.0);
        text.set_position(50.0, -30.0);
        assert_eq!(text.state(), TextState::Positioned);
        assert_relative_eq!(text.lower_left(), Vec2::new(40.0, -36.0));
        assert_relative_eq!(text.upper_right(), Vec2::new(60.0, -24.0));

        // 200 x 200 viewport, half extents 100.
        assert_relative_eq!(text.final_position(), Vec2::new(0.5, -0.3));

        // Vertex data stays centred.
        assert_eq!(text.vertices()[0].position, [-10.0, -6.0]);

        let bounds = text.set_string("aaaa");
        assert_eq!(text.state(), TextState::LaidOut);
        assert_relative_eq!(bounds.lower_left, Vec2::new(30.0, -36.0));
        assert_relative_eq!(bounds.upper_right, Vec2::new(70.0, -24.0));
    }

    #[test]
    fn test_scale_bounds() {
        let mut renderer = RecordingRenderer::default();
        let font = font_from_glyphs(&mut renderer, 'a', &[(10, 12, 10)], 100.0);
        let mut text = Text::new(&font, 1.0, 2.0);
        assert_relative_eq!(text.scale(), 1.0);

        assert!(text.set_scale(1.5));
        assert!(!text.set_scale(2.5));
        assert!(!text.set_scale(0.5));
        assert_relative_eq!(text.scale(), 1.5);
        assert_relative_eq!(text.scale_matrix()[(0, 0)], 1.5);

        assert!(text.set_scale(2.0));
        assert!(!text.add_scale(0.1));
        assert_relative_eq!(text.scale(), 2.0);
        assert!(text.add_scale(-0.5));
        assert_relative_eq!(text.scale(), 1.5);
    }

    #[test]
    fn test_non_finite_scale_rejected() {
        let mut renderer = RecordingRenderer::default();
        let font = font_from_glyphs(&mut renderer, 'a', &[(10, 12, 10)], 100.0);
        let mut text = Text::new(&font, 1.0, 2.0);

        assert!(!text.set_scale(f32::NAN));
        assert!(!text.set_scale(f32::INFINITY));
        assert!(!text.add_scale(f32::NAN));
        assert_relative_eq!(text.scale(), 1.0);
        assert!(text.add_scale(0.5));
        assert_relative_eq!(text.scale(), 1.5);
    }

    #[test]
    fn test_scale_starts_at_min_when_one_is_out_of_bounds() {
        let mut renderer = RecordingRenderer::default();
        let font = font_from_glyphs(&mut renderer, 'a', &[(10, 12, 10)], 100.0);

        let text = Text::new(&font, 1.5, 3.0);
        assert_relative_eq!(text.scale(), 1.5);

        let swapped = Text::new(&font, 2.0, 0.5);
        assert_eq!(swapped.scale_bounds(), (0.5, 2.0));
        assert_relative_eq!(swapped.scale(), 1.0);
    }

    #[test]
    fn test_justify() {
        let mut renderer = RecordingRenderer::default();
        let font = font_from_glyphs(&mut renderer, 'a', &[(10, 12, 10)], 100.0);
        let mut text = Text::new(&font, 1.0, 2.0);
        text.set_string("aaa");

        text.set_position(100.0, 20.0);
        text.justify(Align::Left);
        assert_relative_eq!(text.lower_left().x, 100.0);
        assert_relative_eq!(text.position(), Vec2::new(115.0, 20.0));

        text.set_position(100.0, 20.0);
        text.justify(Align::Right);
        assert_relative_eq!(text.upper_right().x, 100.0);

        text.set_position(100.0, 20.0);
        text.justify(Align::Center);
        assert_relative_eq!(text.position(), Vec2::new(100.0, 20.0));
        bounds_symmetric(&text.bounds().translated(-text.position()));
    }

    #[test]
    fn test_clicked_character() {
        let mut renderer = RecordingRenderer::default();
        let font = font_from_glyphs(&mut renderer, 'a', &[(10, 12, 10), (20, 12, 20), (10, 12, 10)], 100.0);
        let mut text = Text::new(&font, 1.0, 2.0);
        text.set_string("abc");
        assert_relative_eq!(text.lower_left().x, -20.0);

        assert_eq!(text.clicked_character(51.0), Some((1, CharacterSide::Right)));
        assert_eq!(text.clicked_character(45.0), Some((1, CharacterSide::Left)));
        assert_eq!(text.clicked_character(36.0), Some((0, CharacterSide::Right)));
        assert_eq!(text.clicked_character(10.0), Some((0, CharacterSide::Left)));
        assert_eq!(text.clicked_character(64.0), Some((2, CharacterSide::Left)));
        assert_eq!(text.clicked_character(66.0), Some((2, CharacterSide::Right)));
        assert_eq!(text.clicked_character(99.0), Some((2, CharacterSide::Right)));
    }

    #[test]
    fn test_clicked_character_empty() {
        let mut renderer = RecordingRenderer::default();
        let font = font_from_glyphs(&mut renderer, 'a', &[(10, 12, 10)], 100.0);
        let text = Text::new(&font, 1.0, 2.0);
        assert_eq!(text.clicked_character(50.0), None);
    }

    #[test]
    fn test_char_position() {
        let mut renderer = RecordingRenderer::default();
        let font = font_from_glyphs(&mut renderer, 'a', &[(10, 12, 10), (20, 12, 20), (10, 12, 10)], 100.0);
        let mut text = Text::new(&font, 1.0, 2.0);
        text.set_string("abc");
        text.set_position(5.0, 0.0);

        assert_relative_eq!(text.char_position(0), -15.0);
        assert_relative_eq!(text.char_position(1), -5.0);
        assert_relative_eq!(text.char_position(2), 15.0);
        assert_relative_eq!(text.char_position(10), 25.0);
    }

    #[test]
    fn test_max_rune_count_and_draw_prefix() {
        let mut renderer = RecordingRenderer::default();
        let font = font_from_glyphs(&mut renderer, 'a', &[(10, 12, 10)], 100.0);
        let mut text = Text::new(&font, 1.0, 2.0);

        text.set_max_rune_count(Some(3));
        text.set_string("aaaaa");
        assert_eq!(text.string(), "aaa");
        assert_eq!(text.glyph_count(), 3);
        assert_eq!(text.draw_count(), 18);

        text.set_rune_count(1);
        assert_eq!(text.draw_count(), 6);
        text.set_rune_count(100);
        assert_eq!(text.draw_count(), 18);
    }

    #[test]
    fn test_draw_uploads_only_after_changes() {
        let mut renderer = RecordingRenderer::default();
        let font = font_from_glyphs(&mut renderer, 'a', &[(10, 12, 10)], 100.0);
        let mut text = Text::new(&font, 1.0, 2.0);

        text.draw(&mut renderer).unwrap();
        assert!(renderer.draws.is_empty());

        text.set_string("aa");
        text.set_color(1.0, 0.0, 0.5);
        text.draw(&mut renderer).unwrap();
        text.draw(&mut renderer).unwrap();
        assert_eq!(renderer.geometries, 1);
        assert_eq!(renderer.vertex_uploads, vec![8]);
        assert_eq!(renderer.index_uploads, vec![12]);
        assert_eq!(renderer.draws.len(), 2);

        let (_, texture, uniforms, count) = &renderer.draws[1];
        assert_eq!(*texture, font.texture());
        assert_eq!(*count, 12);
        assert_eq!(uniforms.color, Vec3::new(1.0, 0.0, 0.5));

        text.set_string("a");
        text.draw(&mut renderer).unwrap();
        assert_eq!(renderer.vertex_uploads, vec![8, 4]);

        text.release(&mut renderer);
        assert_eq!(renderer.released_geometries.len(), 1);
    }
}
