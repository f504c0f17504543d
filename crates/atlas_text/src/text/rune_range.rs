//! Unicode code-point ranges mapped onto a charset
//!
//! A font covers one or more inclusive code-point ranges. Glyphs for all ranges
//! are stored back to back in a single [`Charset`](super::Charset): the glyph
//! for code point `cp` inside range `k` lives at
//! `size(range_0) + .. + size(range_{k-1}) + (cp - range_k.low)`.

use serde::{Deserialize, Serialize};

use super::font_atlas::{FontError, FontResult};

/// Inclusive range of Unicode code points
///
/// `low <= high` always holds, including for ranges read from disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RangeBounds")]
pub struct RuneRange {
    low: u32,
    high: u32,
}

// Unchecked wire form of a range
#[derive(Deserialize)]
struct RangeBounds {
    low: u32,
    high: u32,
}

impl TryFrom<RangeBounds> for RuneRange {
    type Error = FontError;

    fn try_from(bounds: RangeBounds) -> FontResult<Self> {
        Self::new(bounds.low, bounds.high)
    }
}

impl RuneRange {
    /// Create a range, rejecting `low > high`
    pub fn new(low: u32, high: u32) -> FontResult<Self> {
        if low > high {
            return Err(FontError::InvalidRange { low, high });
        }
        Ok(Self { low, high })
    }

    /// Lowest code point in the range
    pub const fn low(&self) -> u32 {
        self.low
    }

    /// Highest code point in the range
    pub const fn high(&self) -> u32 {
        self.high
    }

    /// Printable ASCII, space through tilde
    pub const fn ascii() -> Self {
        Self { low: 32, high: 126 }
    }

    /// Number of code points in the range
    pub const fn len(&self) -> usize {
        (self.high - self.low) as usize + 1
    }

    /// Ranges always hold at least one code point
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// True when `cp` lies inside the range
    pub const fn contains(&self, cp: u32) -> bool {
        cp >= self.low && cp <= self.high
    }

    /// True when the two ranges share any code point
    pub const fn overlaps(&self, other: &Self) -> bool {
        !(self.high < other.low || other.high < self.low)
    }
}

/// Ordered set of code-point ranges covered by a font
///
/// Ranges are kept sorted by `low`, so table order, atlas packing order and
/// glyph indices always agree. Overlaps are allowed while building the table
/// and reported by [`validate`](Self::validate).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<RuneRange>", into = "Vec<RuneRange>")]
pub struct RuneRangeTable {
    ranges: Vec<RuneRange>,
    // offsets[i] = glyph index of ranges[i].low
    offsets: Vec<usize>,
}

impl RuneRangeTable {
    /// Create a table from ranges in any order
    pub fn new(mut ranges: Vec<RuneRange>) -> Self {
        ranges.sort_by_key(|range| (range.low, range.high));
        let mut table = Self { ranges, offsets: Vec::new() };
        table.rebuild_offsets();
        table
    }

    /// Table holding only printable ASCII
    pub fn ascii() -> Self {
        Self::new(vec![RuneRange::ascii()])
    }

    /// Insert a range at its sorted position
    pub fn push(&mut self, range: RuneRange) {
        let at = self
            .ranges
            .partition_point(|existing| (existing.low, existing.high) <= (range.low, range.high));
        self.ranges.insert(at, range);
        self.rebuild_offsets();
    }

    fn rebuild_offsets(&mut self) {
        self.offsets.clear();
        let mut next = 0;
        for range in &self.ranges {
            self.offsets.push(next);
            next += range.len();
        }
    }

    /// True when no two ranges overlap
    pub fn validate(&self) -> bool {
        // Sorted by low, so only neighbours can overlap.
        self.ranges.windows(2).all(|pair| pair[0].high < pair[1].low)
    }

    /// Charset index for code point `cp`, or `None` when no range holds it
    pub fn glyph_index(&self, cp: u32) -> Option<usize> {
        let candidate = self.ranges.partition_point(|range| range.low <= cp).checked_sub(1)?;
        let range = self.ranges[candidate];
        range
            .contains(cp)
            .then(|| self.offsets[candidate] + (cp - range.low) as usize)
    }

    /// True when some range holds `cp`
    pub fn contains(&self, cp: u32) -> bool {
        self.glyph_index(cp).is_some()
    }

    /// Total number of glyphs across all ranges
    pub fn glyph_count(&self) -> usize {
        self.ranges.iter().map(RuneRange::len).sum()
    }

    /// Lowest code point covered, if any
    pub fn low(&self) -> Option<u32> {
        self.ranges.first().map(|range| range.low)
    }

    /// Highest code point covered, if any
    pub fn high(&self) -> Option<u32> {
        self.ranges.iter().map(|range| range.high).max()
    }

    /// Every covered code point in charset order
    pub fn code_points(&self) -> impl Iterator<Item = u32> + '_ {
        self.ranges.iter().flat_map(|range| range.low..=range.high)
    }

    /// Ranges in sorted order
    pub fn ranges(&self) -> &[RuneRange] {
        &self.ranges
    }

    /// Number of ranges
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// True when the table holds no ranges
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

impl From<Vec<RuneRange>> for RuneRangeTable {
    fn from(ranges: Vec<RuneRange>) -> Self {
        Self::new(ranges)
    }
}

impl From<RuneRangeTable> for Vec<RuneRange> {
    fn from(table: RuneRangeTable) -> Self {
        table.ranges
    }
}

impl FromIterator<RuneRange> for RuneRangeTable {
    fn from_iter<I: IntoIterator<Item = RuneRange>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
