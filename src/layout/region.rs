//! Regions being filled and the fragments placed in them

use crate::layout::line_break::LineLayout;
use serde::{Deserialize, Serialize};

/// Slack allowed when comparing heights, absorbs float accumulation error
pub const FIT_EPSILON: f32 = 0.01;

/// What part of a block a fragment carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Fragment {
    /// A run of consecutive lines of a paragraph
    #[serde(rename_all = "camelCase")]
    Paragraph {
        start_line: usize,
        lines: Vec<LineLayout>,
    },
    /// A whole table; `overflow` marks an estimate taller than an empty region
    #[serde(rename_all = "camelCase")]
    Table { row_count: usize, overflow: bool },
}

/// One placed piece of a block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedContent {
    pub section_index: usize,
    pub block_index: usize,
    /// Column the fragment sits in, 0 outside multi-column sections
    pub column: usize,
    /// Offsets from the page's content origin
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Not the first fragment of its block
    pub is_continuation: bool,
    pub continues_on_next_page: bool,
    pub continues_on_next_column: bool,
    pub fragment: Fragment,
}

impl PositionedContent {
    pub fn is_paragraph(&self) -> bool {
        matches!(self.fragment, Fragment::Paragraph { .. })
    }

    pub fn is_table(&self) -> bool {
        matches!(self.fragment, Fragment::Table { .. })
    }

    /// Lines carried by a paragraph fragment
    pub fn lines(&self) -> &[LineLayout] {
        match &self.fragment {
            Fragment::Paragraph { lines, .. } => lines,
            Fragment::Table { .. } => &[],
        }
    }

    /// Index of the first carried line within its paragraph
    pub fn start_line(&self) -> Option<usize> {
        match self.fragment {
            Fragment::Paragraph { start_line, .. } => Some(start_line),
            Fragment::Table { .. } => None,
        }
    }

    /// Whether more of this block follows in a later region
    pub fn continues(&self) -> bool {
        self.continues_on_next_page || self.continues_on_next_column
    }
}

/// Where a block goes once its current region is full
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    NextColumn,
    NextPage,
}

/// Extent of a requested break
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakScope {
    /// The next region: a column, or a page outside columns
    Region,
    /// A fresh page
    Page,
}

/// A rectangle being filled top to bottom: a page's content area or a column
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub index: usize,
    pub x: f32,
    /// Offset of the region's top from the content origin
    pub top: f32,
    pub width: f32,
    /// Height budget
    pub height: f32,
    /// Height already filled
    pub cursor: f32,
    /// Page content sits above this region
    pub preceded: bool,
    pub content: Vec<PositionedContent>,
}

impl Region {
    pub fn new(index: usize, x: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            index,
            x,
            top,
            width,
            height,
            cursor: 0.0,
            preceded: false,
            content: Vec::new(),
        }
    }

    /// A page-sized region
    pub fn page(width: f32, height: f32) -> Self {
        Self::new(0, 0.0, 0.0, width, height)
    }

    pub fn remaining(&self) -> f32 {
        (self.height - self.cursor).max(0.0)
    }

    /// Whether anything already occupies the region or the page above it
    pub fn is_occupied(&self) -> bool {
        self.preceded || !self.content.is_empty()
    }

    pub fn fits(&self, height: f32) -> bool {
        height <= self.remaining() + FIT_EPSILON
    }

    /// Y of the next fragment, relative to the content origin
    pub fn next_y(&self) -> f32 {
        self.top + self.cursor
    }

    /// Append a fragment at the cursor and advance past it
    pub fn push(&mut self, fragment: PositionedContent) {
        self.cursor = (self.cursor + fragment.height).min(self.height);
        self.content.push(fragment);
    }

    /// Empty the region, keeping its geometry
    pub fn reset(&mut self) {
        self.cursor = 0.0;
        self.preceded = false;
        self.content.clear();
    }
}

/// A sequence of regions the placer fills in order
pub trait Flow {
    /// Region currently being filled
    fn region(&mut self) -> &mut Region;

    /// Whether the current page holds any content
    fn page_occupied(&self) -> bool;

    /// Where a block continues when the current region fills up
    fn continuation(&self) -> Continuation;

    /// Move to a fresh region. Returns false when the flow cannot provide
    /// one and the caller has to open a new page.
    fn advance(&mut self, scope: BreakScope) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_fragment(height: f32) -> PositionedContent {
        PositionedContent {
            section_index: 0,
            block_index: 0,
            column: 0,
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height,
            is_continuation: false,
            continues_on_next_page: false,
            continues_on_next_column: false,
            fragment: Fragment::Table {
                row_count: 1,
                overflow: false,
            },
        }
    }

    #[test]
    fn test_region_fill() {
        let mut region = Region::new(1, 10.0, 50.0, 100.0, 200.0);
        assert!(!region.is_occupied());
        assert_eq!(region.next_y(), 50.0);

        region.push(table_fragment(80.0));
        assert!(region.is_occupied());
        assert_eq!(region.remaining(), 120.0);
        assert_eq!(region.next_y(), 130.0);
        assert!(region.fits(120.0));
        assert!(!region.fits(121.0));
    }

    #[test]
    fn test_cursor_clamped_to_height() {
        let mut region = Region::page(100.0, 100.0);
        region.push(table_fragment(250.0));
        assert_eq!(region.cursor, 100.0);
        assert_eq!(region.remaining(), 0.0);

        region.reset();
        assert!(!region.is_occupied());
        assert_eq!(region.remaining(), 100.0);
    }

    #[test]
    fn test_preceded_region_is_occupied() {
        let mut region = Region::page(100.0, 100.0);
        region.preceded = true;
        assert!(region.is_occupied());
    }

    #[test]
    fn test_fragment_accessors() {
        let table = table_fragment(10.0);
        assert!(table.is_table());
        assert!(table.lines().is_empty());
        assert_eq!(table.start_line(), None);
        assert!(!table.continues());
    }
}
