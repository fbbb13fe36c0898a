//! Page layout engine: walks sections and blocks and emits pages

use crate::document::{Document, Section, SectionProperties};
use crate::layout::columns::{distribute, ColumnArea, ColumnLayout, FlowPosition};
use crate::layout::font::Theme;
use crate::layout::header_footer::{self, HeaderFooterMap};
use crate::layout::line_break::LineBreaker;
use crate::layout::pagination::{Page, PageGeometry, PageLayoutResult};
use crate::layout::placer::{place_block, Placement, PlacementContext, DEFAULT_TABLE_ROW_HEIGHT};
use crate::layout::region::{BreakScope, Continuation, Flow, Region};
use serde::{Deserialize, Serialize};

/// Inputs of a layout run besides the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutOptions {
    pub theme: Theme,
    pub headers: HeaderFooterMap,
    pub footers: HeaderFooterMap,
    /// Estimated height of one table row
    pub table_row_height: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            headers: HeaderFooterMap::default(),
            footers: HeaderFooterMap::default(),
            table_row_height: DEFAULT_TABLE_ROW_HEIGHT,
        }
    }
}

impl LayoutOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_headers(mut self, headers: HeaderFooterMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_footers(mut self, footers: HeaderFooterMap) -> Self {
        self.footers = footers;
        self
    }

    pub fn with_table_row_height(mut self, height: f32) -> Self {
        self.table_row_height = height.max(0.0);
        self
    }

    /// Parse options from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Accumulator threaded through a layout run.
///
/// Section transitions consume the state and hand back the next one; block
/// placement borrows it as the page [`Flow`].
#[derive(Debug)]
pub struct LayoutState<'a> {
    options: &'a LayoutOptions,
    /// Number of the page in progress
    page_number: usize,
    section_index: usize,
    section: SectionProperties,
    first_page_of_section: bool,
    /// Content area of the page in progress
    region: Region,
    pages: Vec<Page>,
}

impl<'a> LayoutState<'a> {
    pub fn new(options: &'a LayoutOptions) -> Self {
        let section = SectionProperties::default();
        let region = Region::page(section.content_width(), section.content_height());
        Self {
            options,
            page_number: 1,
            section_index: 0,
            section,
            first_page_of_section: true,
            region,
            pages: Vec::new(),
        }
    }

    /// Switch to a section, breaking the page as its start type demands
    pub fn begin_section(mut self, index: usize, props: &SectionProperties) -> Self {
        let occupied = self.region.is_occupied();
        // A change of page size or margins always starts a new page
        let shares_page = index > 0
            && !props.start.forces_page_break()
            && self.section.same_page_setup(props);

        if shares_page {
            log::debug!(
                "section {} continues page {} at y={}",
                index,
                self.page_number,
                self.region.cursor
            );
            self.first_page_of_section = !occupied;
        } else {
            if occupied {
                self.finalize_page();
            }
            log::debug!(
                "section {} starts on page {} ({:?})",
                index,
                self.page_number,
                props.start
            );
            self.region = Region::page(props.content_width(), props.content_height());
            self.first_page_of_section = true;
        }

        self.section_index = index;
        self.section = props.clone();
        self
    }

    /// Place every block of a single-column section
    pub fn place_blocks<B: LineBreaker>(
        mut self,
        ctx: &mut PlacementContext<'_, B>,
        section: &Section,
    ) -> Result<Self, B::Error> {
        for (index, block) in section.blocks.iter().enumerate() {
            let next = section.blocks.get(index + 1);
            let mut start_line = 0;
            while let Placement::Overflow { line } =
                place_block(&mut self, ctx, index, block, next, start_line)?
            {
                self.finalize_page();
                start_line = line;
            }
        }
        Ok(self)
    }

    /// Place the blocks of a multi-column section, page by page
    pub fn place_columns<B: LineBreaker>(
        mut self,
        ctx: &mut PlacementContext<'_, B>,
        section: &Section,
    ) -> Result<Self, B::Error> {
        let mut position = FlowPosition::default();
        loop {
            let outcome = distribute(
                ctx,
                &section.blocks,
                position,
                &section.properties.columns,
                self.column_area(),
            )?;
            let resume = outcome.resume_position();
            self.absorb(outcome);

            match resume {
                Some(next) => {
                    self.finalize_page();
                    position = next;
                }
                None => return Ok(self),
            }
        }
    }

    /// Space left on the page in progress, shared by a section's columns
    fn column_area(&self) -> ColumnArea {
        ColumnArea {
            top: self.region.cursor,
            width: self.region.width,
            height: self.region.remaining(),
            preceded: self.region.is_occupied(),
        }
    }

    /// Fold a page's filled columns into the page in progress
    fn absorb(&mut self, columns: ColumnLayout<'_>) {
        let used = columns.used_height();
        self.region.cursor = (self.region.cursor + used).min(self.region.height);
        self.region.content.extend(columns.into_content());
    }

    /// Snapshot the page in progress and start a fresh one
    pub fn finalize_page(&mut self) {
        let options = self.options;
        let header = header_footer::resolve(
            self.page_number,
            self.first_page_of_section,
            self.section_index,
            &options.headers,
            &self.section,
        )
        .cloned();
        let footer = header_footer::resolve(
            self.page_number,
            self.first_page_of_section,
            self.section_index,
            &options.footers,
            &self.section,
        )
        .cloned();

        let page = Page {
            page_number: self.page_number,
            section_index: self.section_index,
            section: self.section.clone(),
            content: std::mem::take(&mut self.region.content),
            header,
            footer,
            is_first_page_of_section: self.first_page_of_section,
            is_last_page: false,
            geometry: PageGeometry::from_section(&self.section),
        };
        log::debug!(
            "finalized page {} of section {} with {} fragments",
            page.page_number,
            page.section_index,
            page.content.len()
        );

        self.pages.push(page);
        self.region.reset();
        self.page_number += 1;
        self.first_page_of_section = false;
    }

    /// Emit the last page and produce the result
    pub fn finish(mut self) -> PageLayoutResult {
        if self.region.is_occupied() || self.pages.is_empty() {
            self.finalize_page();
        }
        if let Some(last) = self.pages.last_mut() {
            last.is_last_page = true;
        }
        PageLayoutResult::new(self.pages)
    }
}

impl Flow for LayoutState<'_> {
    fn region(&mut self) -> &mut Region {
        &mut self.region
    }

    fn page_occupied(&self) -> bool {
        self.region.is_occupied()
    }

    fn continuation(&self) -> Continuation {
        Continuation::NextPage
    }

    fn advance(&mut self, _scope: BreakScope) -> bool {
        self.finalize_page();
        true
    }
}

/// Lay out a document into pages.
///
/// Pure and deterministic: the same document, options and line breaker
/// always produce the same pages. Line breaker errors are returned as is.
pub fn layout<B: LineBreaker>(
    document: &Document,
    options: &LayoutOptions,
    breaker: &B,
) -> Result<PageLayoutResult, B::Error> {
    let mut ctx = PlacementContext::new(
        breaker,
        &options.theme,
        &document.defaults,
        options.table_row_height,
    );
    let mut state = LayoutState::new(options);

    for (index, section) in document.sections.iter().enumerate() {
        ctx.begin_section(index);
        state = state.begin_section(index, &section.properties);
        state = if section.properties.columns.is_multi_column() {
            state.place_columns(&mut ctx, section)?
        } else {
            state.place_blocks(&mut ctx, section)?
        };
    }

    let result = state.finish();
    log::debug!(
        "laid out {} sections into {} pages",
        document.sections.len(),
        result.total_pages
    );
    Ok(result)
}
