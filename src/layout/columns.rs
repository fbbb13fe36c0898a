//! Multi-column distribution of a section's blocks on one page

use crate::document::{Block, ColumnConfig, MIN_CONTENT_EXTENT};
use crate::layout::line_break::LineBreaker;
use crate::layout::placer::{place_block, Placement, PlacementContext};
use crate::layout::region::{BreakScope, Continuation, Flow, PositionedContent, Region};

/// Position in a section's block list: a block, and a line within it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlowPosition {
    pub block: usize,
    pub line: usize,
}

impl FlowPosition {
    pub fn new(block: usize, line: usize) -> Self {
        Self { block, line }
    }
}

/// The part of a page the columns share
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnArea {
    /// Offset of the columns' top from the content origin
    pub top: f32,
    pub width: f32,
    pub height: f32,
    /// Page content sits above the columns
    pub preceded: bool,
}

/// Compute `(x, width)` of every column, relative to the content origin
pub fn column_geometry(config: &ColumnConfig, content_width: f32) -> Vec<(f32, f32)> {
    if !config.equal_width && !config.columns.is_empty() {
        let mut x = 0.0;
        return config
            .columns
            .iter()
            .map(|column| {
                let result = (x, column.width.max(MIN_CONTENT_EXTENT));
                x += result.1 + column.space.max(0.0);
                result
            })
            .collect();
    }

    let count = config.effective_count();
    let space = config.space.max(0.0);
    let width = ((content_width - space * (count - 1) as f32) / count as f32)
        .max(MIN_CONTENT_EXTENT);
    (0..count)
        .map(|i| (i as f32 * (width + space), width))
        .collect()
}

/// Result of filling one page's columns
#[derive(Debug, Clone)]
pub struct ColumnLayout<'d> {
    pub columns: Vec<Region>,
    pub has_overflow: bool,
    /// The block that did not fit and every later block of the section
    pub overflow_content: &'d [Block],
    /// Section index of the first block in `overflow_content`
    pub overflow_start_index: Option<usize>,
    /// First unplaced line of that block, non-zero when a paragraph was split
    pub overflow_start_line: usize,
}

impl<'d> ColumnLayout<'d> {
    /// Where distribution continues on the next page
    pub fn resume_position(&self) -> Option<FlowPosition> {
        self.overflow_start_index
            .map(|block| FlowPosition::new(block, self.overflow_start_line))
    }

    /// Height of the tallest column
    pub fn used_height(&self) -> f32 {
        self.columns
            .iter()
            .map(|c| c.cursor)
            .fold(0.0, f32::max)
    }

    /// Fragments of all columns, column by column
    pub fn into_content(self) -> Vec<PositionedContent> {
        self.columns.into_iter().flat_map(|c| c.content).collect()
    }
}

/// Columns of one page filled left to right
struct ColumnFlow {
    columns: Vec<Region>,
    current: usize,
    preceded: bool,
}

impl Flow for ColumnFlow {
    fn region(&mut self) -> &mut Region {
        &mut self.columns[self.current]
    }

    fn page_occupied(&self) -> bool {
        self.preceded || self.columns.iter().any(|c| !c.content.is_empty())
    }

    fn continuation(&self) -> Continuation {
        if self.current + 1 < self.columns.len() {
            Continuation::NextColumn
        } else {
            Continuation::NextPage
        }
    }

    fn advance(&mut self, scope: BreakScope) -> bool {
        match scope {
            BreakScope::Page => false,
            BreakScope::Region if self.current + 1 < self.columns.len() => {
                self.current += 1;
                true
            }
            BreakScope::Region => false,
        }
    }
}

/// Distribute `blocks` from `start` into the columns of one page.
///
/// Stops at the first block that finds no column left; the caller opens a
/// new page and resumes from [`ColumnLayout::resume_position`].
pub fn distribute<'d, B: LineBreaker>(
    ctx: &mut PlacementContext<'_, B>,
    blocks: &'d [Block],
    start: FlowPosition,
    config: &ColumnConfig,
    area: ColumnArea,
) -> Result<ColumnLayout<'d>, B::Error> {
    let columns = column_geometry(config, area.width)
        .into_iter()
        .enumerate()
        .map(|(index, (x, width))| {
            let mut column = Region::new(index, x, area.top, width, area.height);
            column.preceded = area.preceded;
            column
        })
        .collect();
    let mut flow = ColumnFlow {
        columns,
        current: 0,
        preceded: area.preceded,
    };

    let mut start_line = start.line;
    for (index, block) in blocks.iter().enumerate().skip(start.block) {
        let placement = place_block(
            &mut flow,
            ctx,
            index,
            block,
            blocks.get(index + 1),
            start_line,
        )?;
        start_line = 0;

        if let Placement::Overflow { line } = placement {
            log::debug!(
                "columns full at block {} line {} of section {}",
                index,
                line,
                ctx.section_index()
            );
            return Ok(ColumnLayout {
                columns: flow.columns,
                has_overflow: true,
                overflow_content: &blocks[index..],
                overflow_start_index: Some(index),
                overflow_start_line: line,
            });
        }
    }

    Ok(ColumnLayout {
        columns: flow.columns,
        has_overflow: false,
        overflow_content: &[],
        overflow_start_index: None,
        overflow_start_line: 0,
    })
}
