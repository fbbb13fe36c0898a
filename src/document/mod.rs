//! Read-only document model consumed by the layout engine

mod block;
mod section;

pub use block::{
    Alignment, Block, Indentation, Paragraph, ParagraphFormat, Spacing, StyleSpan, TabAlignment,
    TabStop, TabStops, Table, TableCell, TableRow,
};
pub use section::{
    ColumnConfig, ColumnDef, SectionProperties, SectionStart, MIN_CONTENT_EXTENT,
};

use crate::layout::font::FontId;
use serde::{Deserialize, Serialize};

/// Document-wide formatting defaults
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DefaultFormatting {
    /// Font used where no style span applies
    pub font: FontId,
    /// Line height multiplier applied on top of paragraph spacing
    pub line_spacing: f32,
}

impl Default for DefaultFormatting {
    fn default() -> Self {
        Self {
            font: FontId(0),
            line_spacing: 1.0,
        }
    }
}

/// A run of blocks sharing one page setup
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Section {
    pub properties: SectionProperties,
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn new(properties: SectionProperties) -> Self {
        Self {
            properties,
            blocks: Vec::new(),
        }
    }

    /// Append a block
    pub fn with_block(mut self, block: impl Into<Block>) -> Self {
        self.blocks.push(block.into());
        self
    }

    pub fn push(&mut self, block: impl Into<Block>) {
        self.blocks.push(block.into());
    }
}

/// The main document structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub sections: Vec<Section>,
    pub defaults: DefaultFormatting,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a single-section document, one paragraph per line of text
    pub fn from_text(text: &str) -> Self {
        let mut section = Section::default();
        for line in text.split('\n') {
            section.push(Paragraph::new(line));
        }
        Self {
            sections: vec![section],
            defaults: DefaultFormatting::default(),
        }
    }

    /// Append a section
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Parse a document from JSON
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Total block count across sections
    pub fn block_count(&self) -> usize {
        self.sections.iter().map(|s| s.blocks.len()).sum()
    }

    /// Get a block by section and index
    pub fn block(&self, section: usize, index: usize) -> Option<&Block> {
        self.sections.get(section)?.blocks.get(index)
    }

    /// Check if document has no content
    pub fn is_empty(&self) -> bool {
        self.block_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.section_count(), 0);
    }

    #[test]
    fn test_from_text() {
        let doc = Document::from_text("Hello\nWorld");
        assert_eq!(doc.section_count(), 1);
        assert_eq!(doc.block_count(), 2);
        assert_eq!(
            doc.block(0, 1).and_then(Block::as_paragraph).map(|p| p.text.as_str()),
            Some("World")
        );
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "sections": [
                {
                    "properties": {"columns": {"count": 2}},
                    "blocks": [
                        {"type": "paragraph", "text": "One"},
                        {"type": "table", "rows": [{"cells": []}, {"cells": []}]}
                    ]
                }
            ]
        }"#;
        let doc = Document::from_json(json).unwrap();
        assert_eq!(doc.block_count(), 2);
        assert!(doc.sections[0].properties.columns.is_multi_column());
        match doc.block(0, 1) {
            Some(Block::Table(t)) => assert_eq!(t.row_count(), 2),
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(Document::from_json("not json").is_err());
    }
}
