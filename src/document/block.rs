//! Block-level content: paragraphs and tables

use crate::layout::font::FontId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Horizontal alignment of a paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// Alignment of text at a tab stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TabAlignment {
    #[default]
    Left,
    Center,
    Right,
    Decimal,
}

/// A custom tab stop, measured from the paragraph's left indent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabStop {
    pub position: f32,
    #[serde(default)]
    pub alignment: TabAlignment,
}

/// Inline tab stops; most paragraphs declare at most a handful
pub type TabStops = SmallVec<[TabStop; 4]>;

/// Vertical spacing around and within a paragraph
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Spacing {
    /// Space above the first line
    pub before: f32,
    /// Space below the last line
    pub after: f32,
    /// Line height multiplier
    pub line: f32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            before: 0.0,
            after: 0.0,
            line: 1.0,
        }
    }
}

/// Paragraph indentation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Indentation {
    pub left: f32,
    pub right: f32,
    /// Extra indent of the first line; negative for a hanging indent
    pub first_line: f32,
}

/// Paragraph formatting relevant to layout
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParagraphFormat {
    pub alignment: Alignment,
    pub spacing: Spacing,
    pub indentation: Indentation,
    pub tab_stops: TabStops,
    /// Keep on the same page as the following block
    pub keep_with_next: bool,
    /// Avoid splitting the paragraph's lines across regions
    pub keep_lines_together: bool,
    /// Start on a new page
    pub page_break_before: bool,
    /// Start in the next column
    pub column_break_before: bool,
}

/// A font applied to a byte range of the paragraph text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSpan {
    pub start: usize,
    pub end: usize,
    pub font_id: FontId,
}

impl StyleSpan {
    pub fn contains(&self, byte_offset: usize) -> bool {
        byte_offset >= self.start && byte_offset < self.end
    }
}

/// A paragraph: inline text plus formatting
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Paragraph {
    pub text: String,
    pub styles: Vec<StyleSpan>,
    pub format: ParagraphFormat,
}

impl Paragraph {
    /// Create a plain paragraph with default formatting
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the formatting
    pub fn with_format(mut self, format: ParagraphFormat) -> Self {
        self.format = format;
        self
    }

    /// Font applied at a byte offset, if any span covers it
    pub fn font_at(&self, byte_offset: usize) -> Option<FontId> {
        self.styles
            .iter()
            .find(|s| s.contains(byte_offset))
            .map(|s| s.font_id)
    }
}

/// A table cell
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableCell {
    pub paragraphs: Vec<Paragraph>,
}

/// A table row
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

/// A table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Table {
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Create a table of empty rows, `columns` cells wide
    pub fn with_rows(rows: usize, columns: usize) -> Self {
        let row = TableRow {
            cells: vec![TableCell::default(); columns],
        };
        Self {
            rows: vec![row; rows],
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// A block-level element of a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

impl Block {
    /// Check if this is a paragraph
    pub fn is_paragraph(&self) -> bool {
        matches!(self, Block::Paragraph(_))
    }

    /// Check if this is a table
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }

    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        }
    }
}

impl From<Paragraph> for Block {
    fn from(paragraph: Paragraph) -> Self {
        Block::Paragraph(paragraph)
    }
}

impl From<Table> for Block {
    fn from(table: Table) -> Self {
        Block::Table(table)
    }
}
