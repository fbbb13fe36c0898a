//! Placing single paragraphs and tables into a flow of regions

use crate::document::{Block, DefaultFormatting, Paragraph, Table, MIN_CONTENT_EXTENT};
use crate::layout::font::Theme;
use crate::layout::line_break::{LineBreaker, LineConstraints, ParagraphLayout};
use crate::layout::region::{
    BreakScope, Continuation, Flow, Fragment, PositionedContent, Region, FIT_EPSILON,
};
use rustc_hash::FxHashMap;
use std::rc::Rc;

/// Estimated height of one table row, in pixels
pub const DEFAULT_TABLE_ROW_HEIGHT: f32 = 24.0;

/// Outcome of placing one block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The whole block (or its remaining lines) is placed
    Done,
    /// The flow ran out of regions; placement resumes at `line` on a new page
    Overflow { line: usize },
}

/// A paragraph measurement and the width it was measured at
#[derive(Debug, Clone)]
struct Measured {
    width: f32,
    layout: Rc<ParagraphLayout>,
}

/// Shared inputs of block placement within one section
pub struct PlacementContext<'a, B: LineBreaker> {
    breaker: &'a B,
    theme: &'a Theme,
    defaults: &'a DefaultFormatting,
    table_row_height: f32,
    section_index: usize,
    /// Per-block measurements of the current section
    measured: FxHashMap<usize, Measured>,
}

impl<'a, B: LineBreaker> PlacementContext<'a, B> {
    pub fn new(
        breaker: &'a B,
        theme: &'a Theme,
        defaults: &'a DefaultFormatting,
        table_row_height: f32,
    ) -> Self {
        Self {
            breaker,
            theme,
            defaults,
            table_row_height: table_row_height.max(0.0),
            section_index: 0,
            measured: FxHashMap::default(),
        }
    }

    /// Start placing the blocks of another section
    pub fn begin_section(&mut self, section_index: usize) {
        self.section_index = section_index;
        self.measured.clear();
    }

    pub fn section_index(&self) -> usize {
        self.section_index
    }

    /// Estimated height of a table
    pub fn table_height(&self, table: &Table) -> f32 {
        table.row_count() as f32 * self.table_row_height
    }

    /// Break a paragraph into lines for a region of the given width.
    ///
    /// A paragraph resumed after a region break keeps the lines it was
    /// first measured with, whatever the width of the new region.
    pub fn measure(
        &mut self,
        index: usize,
        paragraph: &Paragraph,
        region_width: f32,
        resumed: bool,
    ) -> Result<Rc<ParagraphLayout>, B::Error> {
        let indentation = &paragraph.format.indentation;
        let width =
            (region_width - indentation.left - indentation.right).max(MIN_CONTENT_EXTENT);

        if let Some(measured) = self.measured.get(&index) {
            if resumed || measured.width == width {
                return Ok(Rc::clone(&measured.layout));
            }
        }

        let constraints = LineConstraints {
            max_width: width,
            first_line_indent: indentation.first_line,
            tab_stops: &paragraph.format.tab_stops,
            theme: self.theme,
            defaults: self.defaults,
        };
        let layout = Rc::new(self.breaker.break_lines(paragraph, &constraints)?);
        self.measured.insert(
            index,
            Measured {
                width,
                layout: Rc::clone(&layout),
            },
        );
        Ok(layout)
    }

    /// Height a block needs at the top of a region before it can start
    fn leading_height(
        &mut self,
        index: usize,
        block: &Block,
        region_width: f32,
    ) -> Result<f32, B::Error> {
        match block {
            Block::Paragraph(paragraph) => {
                let layout = self.measure(index, paragraph, region_width, false)?;
                let first_line = layout.lines.first().map(|l| l.height).unwrap_or(0.0);
                Ok(paragraph.format.spacing.before.max(0.0) + first_line)
            }
            Block::Table(table) => Ok(self.table_height(table)),
        }
    }

    fn positioned(
        &self,
        region: &Region,
        index: usize,
        height: f32,
        fragment: Fragment,
    ) -> PositionedContent {
        PositionedContent {
            section_index: self.section_index,
            block_index: index,
            column: region.index,
            x: region.x,
            y: region.next_y(),
            width: region.width,
            height,
            is_continuation: false,
            continues_on_next_page: false,
            continues_on_next_column: false,
            fragment,
        }
    }
}

/// Place one block, or the remaining lines of a paragraph from `start_line`.
///
/// `next` is the following block of the section, consulted for
/// keep-with-next.
pub fn place_block<F: Flow, B: LineBreaker>(
    flow: &mut F,
    ctx: &mut PlacementContext<'_, B>,
    index: usize,
    block: &Block,
    next: Option<&Block>,
    start_line: usize,
) -> Result<Placement, B::Error> {
    match block {
        Block::Paragraph(paragraph) => {
            place_paragraph(flow, ctx, index, paragraph, next, start_line)
        }
        Block::Table(table) => Ok(place_table(flow, ctx, index, table)),
    }
}

/// Place a paragraph, splitting it across regions when it does not fit
pub fn place_paragraph<F: Flow, B: LineBreaker>(
    flow: &mut F,
    ctx: &mut PlacementContext<'_, B>,
    index: usize,
    paragraph: &Paragraph,
    next: Option<&Block>,
    start_line: usize,
) -> Result<Placement, B::Error> {
    let format = &paragraph.format;

    if start_line == 0 {
        if format.page_break_before
            && flow.page_occupied()
            && !flow.advance(BreakScope::Page)
        {
            return Ok(Placement::Overflow { line: 0 });
        }
        if format.column_break_before
            && flow.region().is_occupied()
            && !flow.advance(BreakScope::Region)
        {
            return Ok(Placement::Overflow { line: 0 });
        }
    }

    let region_width = flow.region().width;
    let layout = ctx.measure(index, paragraph, region_width, start_line > 0)?;
    let lines = &layout.lines;
    let before = format.spacing.before.max(0.0);
    let after = format.spacing.after.max(0.0);

    if start_line == 0 {
        let total = before + layout.total_height + after;

        if flow.region().fits(total) || lines.is_empty() {
            if format.keep_with_next && flow.region().is_occupied() {
                if let Some(next) = next {
                    let needed = total + ctx.leading_height(index + 1, next, region_width)?;
                    let region = flow.region();
                    if !region.fits(needed)
                        && needed <= region.height + FIT_EPSILON
                        && !flow.advance(BreakScope::Region)
                    {
                        return Ok(Placement::Overflow { line: 0 });
                    }
                }
            }

            let region = flow.region();
            let height = total.min(region.remaining().max(layout.total_height));
            let fragment = ctx.positioned(
                region,
                index,
                height,
                Fragment::Paragraph {
                    start_line: 0,
                    lines: lines.clone(),
                },
            );
            log::trace!(
                "placed paragraph {} whole at y={} in region {}",
                index,
                fragment.y,
                region.index
            );
            region.push(fragment);
            return Ok(Placement::Done);
        }

        if format.keep_lines_together
            && flow.region().is_occupied()
            && !flow.advance(BreakScope::Region)
        {
            return Ok(Placement::Overflow { line: 0 });
        }
    }

    let mut next_line = start_line.min(lines.len());
    while next_line < lines.len() {
        let continuation = flow.continuation();
        let region = flow.region();
        let leading = if next_line == 0 {
            before.min(region.remaining())
        } else {
            0.0
        };
        let room = region.remaining() - leading;

        let mut used = 0.0;
        let mut count = 0;
        for line in &lines[next_line..] {
            if used + line.height > room + FIT_EPSILON {
                break;
            }
            used += line.height;
            count += 1;
        }

        if count == 0 {
            if region.is_occupied() {
                if !flow.advance(BreakScope::Region) {
                    return Ok(Placement::Overflow { line: next_line });
                }
                continue;
            }
            // Nothing fits an empty region: take one line anyway
            log::warn!(
                "line {} of paragraph {} is taller than an empty region ({} > {})",
                next_line,
                index,
                lines[next_line].height,
                room
            );
            count = 1;
            used = lines[next_line].height;
        }

        let end = next_line + count;
        let last = end == lines.len();
        let trailing = if last {
            after.min((room - used).max(0.0))
        } else {
            0.0
        };

        let mut fragment = ctx.positioned(
            region,
            index,
            leading + used + trailing,
            Fragment::Paragraph {
                start_line: next_line,
                lines: lines[next_line..end].to_vec(),
            },
        );
        fragment.is_continuation = next_line > 0;
        fragment.continues_on_next_page = !last && continuation == Continuation::NextPage;
        fragment.continues_on_next_column = !last && continuation == Continuation::NextColumn;
        log::trace!(
            "placed lines {}..{} of paragraph {} in region {}",
            next_line,
            end,
            index,
            region.index
        );
        region.push(fragment);

        next_line = end;
        if !last && !flow.advance(BreakScope::Region) {
            return Ok(Placement::Overflow { line: next_line });
        }
    }

    Ok(Placement::Done)
}

/// Place a table as one unit; tables are never split
pub fn place_table<F: Flow, B: LineBreaker>(
    flow: &mut F,
    ctx: &PlacementContext<'_, B>,
    index: usize,
    table: &Table,
) -> Placement {
    let height = ctx.table_height(table);
    let row_count = table.row_count();

    loop {
        let region = flow.region();
        if region.fits(height) {
            let fragment = ctx.positioned(
                region,
                index,
                height,
                Fragment::Table {
                    row_count,
                    overflow: false,
                },
            );
            log::trace!(
                "placed table {} at y={} in region {}",
                index,
                fragment.y,
                region.index
            );
            region.push(fragment);
            return Placement::Done;
        }

        if region.is_occupied() {
            if !flow.advance(BreakScope::Region) {
                return Placement::Overflow { line: 0 };
            }
            continue;
        }

        log::warn!(
            "table {} with {} rows ({}px) exceeds an empty region of {}px",
            index,
            row_count,
            height,
            region.height
        );
        let mut fragment = ctx.positioned(
            region,
            index,
            height,
            Fragment::Table {
                row_count,
                overflow: true,
            },
        );
        fragment.continues_on_next_page = true;
        region.push(fragment);
        return Placement::Done;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ParagraphFormat;
    use crate::layout::font::{FontLibrary, FontMetrics};
    use crate::layout::line_break::GreedyLineBreaker;

    /// Regions of a fixed size, up to a limit
    struct StackFlow {
        regions: Vec<Region>,
        limit: usize,
        height: f32,
    }

    impl StackFlow {
        fn new(height: f32, limit: usize) -> Self {
            Self {
                regions: vec![Region::new(0, 0.0, 0.0, 500.0, height)],
                limit,
                height,
            }
        }
    }

    impl Flow for StackFlow {
        fn region(&mut self) -> &mut Region {
            let last = self.regions.len() - 1;
            &mut self.regions[last]
        }

        fn page_occupied(&self) -> bool {
            self.regions.iter().any(|r| !r.content.is_empty())
        }

        fn continuation(&self) -> Continuation {
            Continuation::NextColumn
        }

        fn advance(&mut self, _scope: BreakScope) -> bool {
            if self.regions.len() >= self.limit {
                return false;
            }
            let index = self.regions.len();
            self.regions.push(Region::new(index, 0.0, 0.0, 500.0, self.height));
            true
        }
    }

    fn theme() -> Theme {
        Theme::new(FontLibrary::with_default(FontMetrics::monospace(20.0, 5.0)))
    }

    fn lines(count: usize) -> String {
        vec!["line"; count].join("\n")
    }

    fn para(count: usize, format: ParagraphFormat) -> Block {
        Paragraph::new(lines(count)).with_format(format).into()
    }

    fn place(flow: &mut StackFlow, blocks: &[Block]) -> Vec<Placement> {
        let theme = theme();
        let defaults = DefaultFormatting::default();
        let breaker = GreedyLineBreaker::new();
        let mut ctx = PlacementContext::new(
            &breaker,
            &theme,
            &defaults,
            DEFAULT_TABLE_ROW_HEIGHT,
        );
        blocks
            .iter()
            .enumerate()
            .map(|(i, block)| {
                place_block(flow, &mut ctx, i, block, blocks.get(i + 1), 0).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_whole_paragraph() {
        let mut flow = StackFlow::new(100.0, 3);
        let result = place(&mut flow, &[para(3, ParagraphFormat::default())]);

        assert_eq!(result, vec![Placement::Done]);
        assert_eq!(flow.regions.len(), 1);
        let fragment = &flow.regions[0].content[0];
        assert_eq!(fragment.height, 60.0);
        assert!(!fragment.is_continuation);
        assert!(!fragment.continues());
        assert_eq!(flow.regions[0].cursor, 60.0);
    }

    #[test]
    fn test_spacing_counts_toward_height() {
        let mut format = ParagraphFormat::default();
        format.spacing.before = 10.0;
        format.spacing.after = 5.0;
        let mut flow = StackFlow::new(100.0, 3);
        place(&mut flow, &[para(2, format.clone()), para(1, format)]);

        let content = &flow.regions[0].content;
        assert_eq!(content[0].height, 55.0);
        assert_eq!(content[1].y, 55.0);
    }

    #[test]
    fn test_split_across_regions() {
        let mut flow = StackFlow::new(100.0, 3);
        let result = place(&mut flow, &[para(12, ParagraphFormat::default())]);

        assert_eq!(result, vec![Placement::Done]);
        assert_eq!(flow.regions.len(), 3);
        let starts: Vec<_> = flow
            .regions
            .iter()
            .map(|r| r.content[0].start_line().unwrap())
            .collect();
        assert_eq!(starts, vec![0, 5, 10]);
        assert!(flow.regions[0].content[0].continues_on_next_column);
        assert!(flow.regions[1].content[0].is_continuation);
        assert!(!flow.regions[2].content[0].continues());
        assert_eq!(flow.regions[2].content[0].lines().len(), 2);
    }

    #[test]
    fn test_overflow_reports_resume_line() {
        let mut flow = StackFlow::new(100.0, 2);
        let result = place(&mut flow, &[para(12, ParagraphFormat::default())]);

        assert_eq!(result, vec![Placement::Overflow { line: 10 }]);
    }

    #[test]
    fn test_forced_line_on_empty_region() {
        let mut flow = StackFlow::new(15.0, 1);
        let result = place(&mut flow, &[para(1, ParagraphFormat::default())]);

        assert_eq!(result, vec![Placement::Done]);
        assert_eq!(flow.regions[0].content.len(), 1);
        assert_eq!(flow.regions[0].content[0].lines().len(), 1);
    }

    #[test]
    fn test_keep_lines_together_moves_paragraph() {
        let format = ParagraphFormat {
            keep_lines_together: true,
            ..ParagraphFormat::default()
        };
        let mut flow = StackFlow::new(100.0, 3);
        place(
            &mut flow,
            &[para(3, ParagraphFormat::default()), para(4, format)],
        );

        assert_eq!(flow.regions.len(), 2);
        assert_eq!(flow.regions[0].content.len(), 1);
        let moved = &flow.regions[1].content[0];
        assert_eq!(moved.block_index, 1);
        assert_eq!(moved.lines().len(), 4);
        assert!(!moved.is_continuation);
    }

    #[test]
    fn test_keep_with_next() {
        let format = ParagraphFormat {
            keep_with_next: true,
            ..ParagraphFormat::default()
        };
        let mut flow = StackFlow::new(100.0, 3);
        place(
            &mut flow,
            &[
                para(4, ParagraphFormat::default()),
                para(1, format),
                para(2, ParagraphFormat::default()),
            ],
        );

        // The heading-like paragraph would fit, its successor's first line would not
        assert_eq!(flow.regions[0].content.len(), 1);
        assert_eq!(flow.regions[1].content[0].block_index, 1);
        assert_eq!(flow.regions[1].content[1].block_index, 2);
    }

    #[test]
    fn test_page_break_before() {
        let format = ParagraphFormat {
            page_break_before: true,
            ..ParagraphFormat::default()
        };
        let mut flow = StackFlow::new(100.0, 3);
        place(&mut flow, &[para(1, ParagraphFormat::default()), para(1, format)]);

        assert_eq!(flow.regions.len(), 2);
        assert_eq!(flow.regions[1].content[0].block_index, 1);
    }

    #[test]
    fn test_page_break_on_empty_flow_is_ignored() {
        let format = ParagraphFormat {
            page_break_before: true,
            ..ParagraphFormat::default()
        };
        let mut flow = StackFlow::new(100.0, 3);
        place(&mut flow, &[para(1, format)]);

        assert_eq!(flow.regions.len(), 1);
    }

    #[test]
    fn test_table_moves_to_fresh_region() {
        let mut flow = StackFlow::new(100.0, 3);
        place(
            &mut flow,
            &[para(3, ParagraphFormat::default()), Table::with_rows(3, 2).into()],
        );

        assert_eq!(flow.regions.len(), 2);
        let table = &flow.regions[1].content[0];
        assert_eq!(table.height, 72.0);
        assert_eq!(
            table.fragment,
            Fragment::Table {
                row_count: 3,
                overflow: false
            }
        );
    }

    #[test]
    fn test_oversized_table_flags_overflow() {
        let mut flow = StackFlow::new(100.0, 3);
        let result = place(&mut flow, &[Table::with_rows(10, 1).into()]);

        assert_eq!(result, vec![Placement::Done]);
        let table = &flow.regions[0].content[0];
        assert!(table.continues_on_next_page);
        assert_eq!(
            table.fragment,
            Fragment::Table {
                row_count: 10,
                overflow: true
            }
        );
    }

    #[test]
    fn test_negative_row_height_clamped() {
        let theme = theme();
        let defaults = DefaultFormatting::default();
        let breaker = GreedyLineBreaker::new();
        let ctx = PlacementContext::new(&breaker, &theme, &defaults, -50.0);

        assert_eq!(ctx.table_height(&Table::with_rows(2, 1)), 0.0);
    }

    #[test]
    fn test_table_overflow_when_out_of_regions() {
        let mut flow = StackFlow::new(100.0, 1);
        let result = place(
            &mut flow,
            &[para(3, ParagraphFormat::default()), Table::with_rows(3, 1).into()],
        );

        assert_eq!(result, vec![Placement::Done, Placement::Overflow { line: 0 }]);
    }
}
