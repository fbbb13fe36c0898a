//! Pages produced by the layout engine and queries over them

use crate::document::SectionProperties;
use crate::layout::header_footer::HeaderFooter;
use crate::layout::region::PositionedContent;
use serde::{Deserialize, Serialize};

/// Page and content-area geometry in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub content_width: f32,
    pub content_height: f32,
    /// Content origin offsets from the page's top-left corner
    pub content_x: f32,
    pub content_y: f32,
    /// Top of the header area
    pub header_y: f32,
    /// Bottom of the footer area
    pub footer_y: f32,
}

impl PageGeometry {
    pub fn from_section(props: &SectionProperties) -> Self {
        Self {
            page_width: props.page_width,
            page_height: props.page_height,
            content_width: props.content_width(),
            content_height: props.content_height(),
            content_x: props.margin_left,
            content_y: props.margin_top,
            header_y: props.header_distance,
            footer_y: props.page_height - props.footer_distance,
        }
    }
}

/// One laid-out page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Page number (1-based)
    pub page_number: usize,
    pub section_index: usize,
    pub section: SectionProperties,
    pub content: Vec<PositionedContent>,
    pub header: Option<HeaderFooter>,
    pub footer: Option<HeaderFooter>,
    pub is_first_page_of_section: bool,
    pub is_last_page: bool,
    pub geometry: PageGeometry,
}

impl Page {
    /// Check if this page holds a fragment of the given block
    pub fn contains_block(&self, section: usize, block: usize) -> bool {
        self.content
            .iter()
            .any(|c| c.section_index == section && c.block_index == block)
    }

    /// Fragments of one block on this page
    pub fn fragments_of(
        &self,
        section: usize,
        block: usize,
    ) -> impl Iterator<Item = &PositionedContent> {
        self.content
            .iter()
            .filter(move |c| c.section_index == section && c.block_index == block)
    }

    /// Height filled in the fullest column
    pub fn placed_height(&self) -> f32 {
        let columns = self.content.iter().map(|c| c.column).max().map_or(0, |m| m + 1);
        (0..columns)
            .map(|column| {
                self.content
                    .iter()
                    .filter(|c| c.column == column)
                    .map(|c| c.height)
                    .sum::<f32>()
            })
            .fold(0.0, f32::max)
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Output of a layout run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayoutResult {
    pub pages: Vec<Page>,
    pub total_pages: usize,
}

impl PageLayoutResult {
    pub fn new(pages: Vec<Page>) -> Self {
        let total_pages = pages.len();
        Self { pages, total_pages }
    }

    /// Get page by 1-based number
    pub fn page(&self, page_number: usize) -> Option<&Page> {
        page_number.checked_sub(1).and_then(|i| self.pages.get(i))
    }

    /// Pages holding content of a section, or owned by it
    pub fn pages_for_section(&self, section: usize) -> impl Iterator<Item = &Page> {
        self.pages.iter().filter(move |page| {
            page.section_index == section || page.content.iter().any(|c| c.section_index == section)
        })
    }

    /// Numbers of the pages a block has fragments on, in order
    pub fn page_numbers_for_block(&self, section: usize, block: usize) -> Vec<usize> {
        self.pages
            .iter()
            .filter(|page| page.contains_block(section, block))
            .map(|page| page.page_number)
            .collect()
    }

    /// Whether a block is split over more than one page
    pub fn block_spans_pages(&self, section: usize, block: usize) -> bool {
        self.page_numbers_for_block(section, block).len() > 1
    }

    /// Height of all pages stacked with `gap` between consecutive pages
    pub fn total_height(&self, gap: f32) -> f32 {
        let pages: f32 = self.pages.iter().map(|p| p.geometry.page_height).sum();
        pages + gap * self.pages.len().saturating_sub(1) as f32
    }

    /// Top offset of a page in the stacked view
    pub fn page_offset(&self, page_number: usize, gap: f32) -> Option<f32> {
        let index = page_number.checked_sub(1)?;
        if index >= self.pages.len() {
            return None;
        }
        Some(
            self.pages[..index]
                .iter()
                .map(|p| p.geometry.page_height + gap)
                .sum(),
        )
    }

    /// Page shown at a scroll offset in the stacked view.
    ///
    /// The gap below a page counts toward that page; offsets past the end
    /// resolve to the last page.
    pub fn page_at_offset(&self, offset: f32, gap: f32) -> Option<usize> {
        let mut top = 0.0;
        for page in &self.pages {
            top += page.geometry.page_height + gap;
            if offset < top {
                return Some(page.page_number);
            }
        }
        self.pages.last().map(|p| p.page_number)
    }

    /// Serialize to JSON for the presentation layer
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
