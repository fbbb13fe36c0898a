//! Section geometry and page setup

use crate::units::inches_to_px;
use serde::{Deserialize, Serialize};

/// Smallest usable content width or height, in pixels
pub const MIN_CONTENT_EXTENT: f32 = 24.0;

/// How a section begins relative to the previous one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionStart {
    #[default]
    NextPage,
    Continuous,
    OddPage,
    EvenPage,
    NextColumn,
}

impl SectionStart {
    /// Whether this section must open on a new page
    pub fn forces_page_break(self) -> bool {
        !matches!(self, SectionStart::Continuous)
    }
}

/// Explicit width and trailing gap of one column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    pub width: f32,
    #[serde(default)]
    pub space: f32,
}

/// Column setup of a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnConfig {
    pub count: u16,
    pub equal_width: bool,
    /// Gap between equal-width columns
    pub space: f32,
    /// Explicit columns, used when `equal_width` is off
    pub columns: Vec<ColumnDef>,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            count: 1,
            equal_width: true,
            space: inches_to_px(0.5),
            columns: Vec::new(),
        }
    }
}

impl ColumnConfig {
    /// Equal-width columns with the given gap
    pub fn equal(count: u16, space: f32) -> Self {
        Self {
            count,
            equal_width: true,
            space,
            columns: Vec::new(),
        }
    }

    /// Number of columns actually laid out
    pub fn effective_count(&self) -> usize {
        if !self.equal_width && !self.columns.is_empty() {
            self.columns.len()
        } else {
            usize::from(self.count.max(1))
        }
    }

    pub fn is_multi_column(&self) -> bool {
        self.effective_count() > 1
    }
}

/// Page setup shared by all pages of a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionProperties {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    /// Distance from the top edge to the header
    pub header_distance: f32,
    /// Distance from the bottom edge to the footer
    pub footer_distance: f32,
    pub columns: ColumnConfig,
    pub start: SectionStart,
    /// Distinct header/footer on the first page of the section
    pub title_page: bool,
    /// Distinct header/footer on even pages
    pub even_and_odd_headers: bool,
}

impl Default for SectionProperties {
    fn default() -> Self {
        // US Letter portrait, 1 inch margins
        Self {
            page_width: inches_to_px(8.5),
            page_height: inches_to_px(11.0),
            margin_top: inches_to_px(1.0),
            margin_bottom: inches_to_px(1.0),
            margin_left: inches_to_px(1.0),
            margin_right: inches_to_px(1.0),
            header_distance: inches_to_px(0.5),
            footer_distance: inches_to_px(0.5),
            columns: ColumnConfig::default(),
            start: SectionStart::NextPage,
            title_page: false,
            even_and_odd_headers: false,
        }
    }
}

impl SectionProperties {
    /// Page of the given size with uniform margins
    pub fn with_page(page_width: f32, page_height: f32, margin: f32) -> Self {
        Self {
            page_width,
            page_height,
            margin_top: margin,
            margin_bottom: margin,
            margin_left: margin,
            margin_right: margin,
            ..Self::default()
        }
    }

    /// Get usable content width, clamped to a usable minimum
    pub fn content_width(&self) -> f32 {
        (self.page_width - self.margin_left - self.margin_right).max(MIN_CONTENT_EXTENT)
    }

    /// Get usable content height per page, clamped to a usable minimum
    pub fn content_height(&self) -> f32 {
        (self.page_height - self.margin_top - self.margin_bottom).max(MIN_CONTENT_EXTENT)
    }

    /// Whether two sections can share a page: same size and margins
    pub fn same_page_setup(&self, other: &SectionProperties) -> bool {
        self.page_width == other.page_width
            && self.page_height == other.page_height
            && self.margin_top == other.margin_top
            && self.margin_bottom == other.margin_bottom
            && self.margin_left == other.margin_left
            && self.margin_right == other.margin_right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_properties() {
        let props = SectionProperties::default();
        assert_eq!(props.page_width, 816.0);
        assert_eq!(props.page_height, 1056.0);
        assert_eq!(props.content_width(), 624.0); // 816 - 96 - 96
        assert_eq!(props.content_height(), 864.0); // 1056 - 96 - 96
        assert!(!props.columns.is_multi_column());
    }

    #[test]
    fn test_degenerate_geometry_clamped() {
        let props = SectionProperties::with_page(100.0, 100.0, 60.0);
        assert_eq!(props.content_width(), MIN_CONTENT_EXTENT);
        assert_eq!(props.content_height(), MIN_CONTENT_EXTENT);
    }

    #[test]
    fn test_section_start() {
        assert!(SectionStart::NextPage.forces_page_break());
        assert!(SectionStart::OddPage.forces_page_break());
        assert!(SectionStart::EvenPage.forces_page_break());
        assert!(SectionStart::NextColumn.forces_page_break());
        assert!(!SectionStart::Continuous.forces_page_break());
    }

    #[test]
    fn test_effective_column_count() {
        assert_eq!(ColumnConfig::equal(0, 10.0).effective_count(), 1);
        assert_eq!(ColumnConfig::equal(3, 10.0).effective_count(), 3);

        let explicit = ColumnConfig {
            count: 3,
            equal_width: false,
            space: 0.0,
            columns: vec![
                ColumnDef { width: 100.0, space: 10.0 },
                ColumnDef { width: 200.0, space: 0.0 },
            ],
        };
        assert_eq!(explicit.effective_count(), 2);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let props: SectionProperties =
            serde_json::from_str(r#"{"pageWidth":500,"start":"continuous"}"#).unwrap();
        assert_eq!(props.page_width, 500.0);
        assert_eq!(props.page_height, 1056.0);
        assert_eq!(props.start, SectionStart::Continuous);
    }

    #[test]
    fn test_same_page_setup() {
        let letter = SectionProperties::default();
        let continuous = SectionProperties {
            start: SectionStart::Continuous,
            columns: ColumnConfig::equal(2, 20.0),
            ..SectionProperties::default()
        };
        assert!(letter.same_page_setup(&continuous));

        let landscape = SectionProperties {
            page_width: letter.page_height,
            page_height: letter.page_width,
            ..SectionProperties::default()
        };
        assert!(!letter.same_page_setup(&landscape));

        let narrow = SectionProperties {
            margin_left: 200.0,
            ..SectionProperties::default()
        };
        assert!(!letter.same_page_setup(&narrow));
    }
}
