//! Header and footer selection per page

use crate::document::{Block, SectionProperties};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Which header/footer definition a page uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HeaderFooterKind {
    Default,
    First,
    Even,
}

/// Content of one header or footer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderFooter {
    pub blocks: Vec<Block>,
}

impl HeaderFooter {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }
}

/// The header (or footer) variants defined for one section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderFooterSet {
    pub default: Option<HeaderFooter>,
    pub first: Option<HeaderFooter>,
    pub even: Option<HeaderFooter>,
}

impl HeaderFooterSet {
    pub fn get(&self, kind: HeaderFooterKind) -> Option<&HeaderFooter> {
        match kind {
            HeaderFooterKind::Default => self.default.as_ref(),
            HeaderFooterKind::First => self.first.as_ref(),
            HeaderFooterKind::Even => self.even.as_ref(),
        }
    }

    pub fn set(&mut self, kind: HeaderFooterKind, content: HeaderFooter) {
        let slot = match kind {
            HeaderFooterKind::Default => &mut self.default,
            HeaderFooterKind::First => &mut self.first,
            HeaderFooterKind::Even => &mut self.even,
        };
        *slot = Some(content);
    }
}

/// Headers (or footers) of every section, keyed by section index
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderFooterMap {
    sections: FxHashMap<usize, HeaderFooterSet>,
}

impl HeaderFooterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a variant for a section
    pub fn insert(&mut self, section: usize, kind: HeaderFooterKind, content: HeaderFooter) {
        self.sections.entry(section).or_default().set(kind, content);
    }

    /// Builder form of [`HeaderFooterMap::insert`]
    pub fn with(mut self, section: usize, kind: HeaderFooterKind, content: HeaderFooter) -> Self {
        self.insert(section, kind, content);
        self
    }

    pub fn section(&self, section: usize) -> Option<&HeaderFooterSet> {
        self.sections.get(&section)
    }

    pub fn get(&self, section: usize, kind: HeaderFooterKind) -> Option<&HeaderFooter> {
        self.section(section)?.get(kind)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Variant a page should use, before checking what the section defines.
///
/// First match wins: title-page first page, then even pages, then default.
pub fn candidate_kinds(
    page_number: usize,
    is_first_page_of_section: bool,
    props: &SectionProperties,
) -> impl Iterator<Item = HeaderFooterKind> {
    let first = (props.title_page && is_first_page_of_section).then_some(HeaderFooterKind::First);
    let even = (props.even_and_odd_headers && page_number % 2 == 0).then_some(HeaderFooterKind::Even);
    first
        .into_iter()
        .chain(even)
        .chain(std::iter::once(HeaderFooterKind::Default))
}

/// Choose the header or footer for a page
pub fn resolve<'m>(
    page_number: usize,
    is_first_page_of_section: bool,
    section_index: usize,
    map: &'m HeaderFooterMap,
    props: &SectionProperties,
) -> Option<&'m HeaderFooter> {
    let set = map.section(section_index)?;
    candidate_kinds(page_number, is_first_page_of_section, props).find_map(|kind| set.get(kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Paragraph;

    fn content(text: &str) -> HeaderFooter {
        HeaderFooter::new(vec![Paragraph::new(text).into()])
    }

    fn text_of(hf: Option<&HeaderFooter>) -> Option<&str> {
        hf?.blocks.first()?.as_paragraph().map(|p| p.text.as_str())
    }

    #[test]
    fn test_default_only() {
        let map = HeaderFooterMap::new().with(0, HeaderFooterKind::Default, content("D"));
        let props = SectionProperties::default();

        for page in 1..=4 {
            assert_eq!(text_of(resolve(page, page == 1, 0, &map, &props)), Some("D"));
        }
    }

    #[test]
    fn test_even_and_odd() {
        let map = HeaderFooterMap::new()
            .with(0, HeaderFooterKind::Default, content("D"))
            .with(0, HeaderFooterKind::Even, content("E"));
        let props = SectionProperties {
            even_and_odd_headers: true,
            ..SectionProperties::default()
        };

        assert_eq!(text_of(resolve(1, true, 0, &map, &props)), Some("D"));
        assert_eq!(text_of(resolve(2, false, 0, &map, &props)), Some("E"));
        assert_eq!(text_of(resolve(3, false, 0, &map, &props)), Some("D"));
    }

    #[test]
    fn test_even_variant_ignored_without_flag() {
        let map = HeaderFooterMap::new()
            .with(0, HeaderFooterKind::Default, content("D"))
            .with(0, HeaderFooterKind::Even, content("E"));
        let props = SectionProperties::default();

        assert_eq!(text_of(resolve(2, false, 0, &map, &props)), Some("D"));
    }

    #[test]
    fn test_title_page_wins_over_even() {
        let map = HeaderFooterMap::new()
            .with(1, HeaderFooterKind::Default, content("D"))
            .with(1, HeaderFooterKind::First, content("F"))
            .with(1, HeaderFooterKind::Even, content("E"));
        let props = SectionProperties {
            title_page: true,
            even_and_odd_headers: true,
            ..SectionProperties::default()
        };

        assert_eq!(text_of(resolve(4, true, 1, &map, &props)), Some("F"));
        assert_eq!(text_of(resolve(4, false, 1, &map, &props)), Some("E"));
        assert_eq!(text_of(resolve(5, false, 1, &map, &props)), Some("D"));
    }

    #[test]
    fn test_title_page_without_first_variant_falls_back() {
        let map = HeaderFooterMap::new().with(0, HeaderFooterKind::Default, content("D"));
        let props = SectionProperties {
            title_page: true,
            ..SectionProperties::default()
        };

        assert_eq!(text_of(resolve(1, true, 0, &map, &props)), Some("D"));
    }

    #[test]
    fn test_missing_section_or_variant() {
        let map = HeaderFooterMap::new().with(0, HeaderFooterKind::Even, content("E"));
        let props = SectionProperties::default();

        assert!(resolve(1, true, 0, &map, &props).is_none());
        assert!(resolve(1, true, 3, &map, &props).is_none());
    }

    #[test]
    fn test_candidate_order() {
        let props = SectionProperties {
            title_page: true,
            even_and_odd_headers: true,
            ..SectionProperties::default()
        };
        let kinds: Vec<_> = candidate_kinds(2, true, &props).collect();
        assert_eq!(
            kinds,
            vec![
                HeaderFooterKind::First,
                HeaderFooterKind::Even,
                HeaderFooterKind::Default
            ]
        );
    }
}
