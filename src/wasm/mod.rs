//! WASM bindings for the layout engine

use crate::document::Document;
use crate::layout::{layout, GreedyLineBreaker, LayoutOptions, PageLayoutResult};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Gap between stacked pages in the default view, in pixels
pub const DEFAULT_PAGE_GAP: f32 = 16.0;

impl From<crate::Error> for JsValue {
    fn from(err: crate::Error) -> Self {
        JsError::new(&err.to_string()).into()
    }
}

/// Lay out a JSON document and return the pages as JSON
#[wasm_bindgen(js_name = layoutDocument)]
pub fn layout_document(document_json: &str, options_json: &str) -> Result<String, JsValue> {
    Ok(crate::layout_json(document_json, options_json)?)
}

/// Per-page summary handed to the host for scroll bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    pub page_number: usize,
    pub section_index: usize,
    pub width: f32,
    pub height: f32,
    pub y_offset: f32,
    pub fragment_count: usize,
    pub has_header: bool,
    pub has_footer: bool,
}

/// WASM-exposed paginator holding one layout result
#[wasm_bindgen]
pub struct WasmPaginator {
    result: PageLayoutResult,
    gap: f32,
}

#[wasm_bindgen]
impl WasmPaginator {
    /// Lay out a JSON document; `options_json` may be empty
    #[wasm_bindgen(constructor)]
    pub fn new(document_json: &str, options_json: &str) -> Result<WasmPaginator, JsValue> {
        let document = Document::from_json(document_json)?;
        let options = if options_json.trim().is_empty() {
            LayoutOptions::default()
        } else {
            LayoutOptions::from_json(options_json)?
        };
        let result = layout(&document, &options, &GreedyLineBreaker::new())?;
        Ok(Self::from_result(result))
    }

    /// Set the gap between stacked pages
    #[wasm_bindgen(js_name = setPageGap)]
    pub fn set_page_gap(&mut self, gap: f32) {
        self.gap = gap.max(0.0);
    }

    /// Get page count
    #[wasm_bindgen(js_name = pageCount)]
    pub fn page_count(&self) -> usize {
        self.result.total_pages
    }

    /// Height of all pages stacked with the page gap
    #[wasm_bindgen(js_name = totalHeight)]
    pub fn total_height(&self) -> f32 {
        self.result.total_height(self.gap)
    }

    /// Page number shown at a scroll offset, 0 when there are no pages
    #[wasm_bindgen(js_name = pageAtOffset)]
    pub fn page_at_offset(&self, offset: f32) -> usize {
        self.result.page_at_offset(offset, self.gap).unwrap_or(0)
    }

    /// Top offset of a page, or -1 for an unknown page number
    #[wasm_bindgen(js_name = pageOffset)]
    pub fn page_offset(&self, page_number: usize) -> f32 {
        self.result.page_offset(page_number, self.gap).unwrap_or(-1.0)
    }

    /// Top offsets of every page, in page order
    #[wasm_bindgen(js_name = pageOffsets)]
    pub fn page_offsets(&self) -> js_sys::Float32Array {
        let offsets = self.offsets();
        js_sys::Float32Array::from(offsets.as_slice())
    }

    /// Get the full layout result as JSON
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        Ok(self.result.to_json()?)
    }

    /// Get one page as JSON, `undefined` for an unknown page number
    #[wasm_bindgen(js_name = pageJson)]
    pub fn page_json(&self, page_number: usize) -> Result<Option<String>, JsValue> {
        self.result
            .page(page_number)
            .map(|page| serde_json::to_string(page).map_err(crate::Error::from))
            .transpose()
            .map_err(JsValue::from)
    }

    /// Get per-page summaries as JSON
    #[wasm_bindgen(js_name = summaryJson)]
    pub fn summary_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.summaries())
            .map_err(crate::Error::from)
            .map_err(JsValue::from)
    }
}

impl WasmPaginator {
    pub fn from_result(result: PageLayoutResult) -> Self {
        Self {
            result,
            gap: DEFAULT_PAGE_GAP,
        }
    }

    pub fn result(&self) -> &PageLayoutResult {
        &self.result
    }

    fn offsets(&self) -> Vec<f32> {
        let mut top = 0.0;
        self.result
            .pages
            .iter()
            .map(|page| {
                let offset = top;
                top += page.geometry.page_height + self.gap;
                offset
            })
            .collect()
    }

    /// Summaries of every page, in page order
    pub fn summaries(&self) -> Vec<PageSummary> {
        self.result
            .pages
            .iter()
            .zip(self.offsets())
            .map(|(page, y_offset)| PageSummary {
                page_number: page.page_number,
                section_index: page.section_index,
                width: page.geometry.page_width,
                height: page.geometry.page_height,
                y_offset,
                fragment_count: page.content.len(),
                has_header: page.header.is_some(),
                has_footer: page.footer.is_some(),
            })
            .collect()
    }
}
