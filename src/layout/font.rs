//! Font metrics and theme consumed by line breaking

use crate::units::points_to_px;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Single line spacing as a multiple of the font size
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Advances and line height of one font face at one size, in pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontMetrics {
    /// Height of a single-spaced line
    pub line_height: f32,
    /// Advances of the ASCII range, indexed by code point
    #[serde(default)]
    pub ascii_advances: Vec<f32>,
    /// Advance of characters outside the table
    pub fallback_advance: f32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        // 14px text at 1.2 line height, 8.41px monospace advance
        Self::monospace(16.8, 8.41)
    }
}

impl FontMetrics {
    pub fn new(line_height: f32, ascii_advances: Vec<f32>, fallback_advance: f32) -> Self {
        Self {
            line_height,
            ascii_advances,
            fallback_advance,
        }
    }

    /// Every character has the same advance
    pub fn monospace(line_height: f32, advance: f32) -> Self {
        Self::new(line_height, vec![advance; 128], advance)
    }

    /// Approximate metrics for a run size in points, with an average
    /// advance given as a fraction of the em
    pub fn for_point_size(points: f32, average_advance_em: f32) -> Self {
        let em = points_to_px(points);
        Self::new(em * LINE_HEIGHT_FACTOR, Vec::new(), em * average_advance_em)
    }

    /// Horizontal advance of a character
    pub fn advance(&self, c: char) -> f32 {
        u8::try_from(c)
            .ok()
            .filter(u8::is_ascii)
            .and_then(|b| self.ascii_advances.get(usize::from(b)))
            .copied()
            .unwrap_or(self.fallback_advance)
    }
}

/// Handle of a face registered in a [`FontLibrary`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FontId(pub u32);

/// Faces available to the line breaker; `FontId(0)` is the document default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FontLibrary {
    fonts: FxHashMap<FontId, FontMetrics>,
    /// Face names as they appear in run properties
    names: FxHashMap<String, FontId>,
    next_id: u32,
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::with_default(FontMetrics::default())
    }
}

impl FontLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Library holding only the given default face
    pub fn with_default(metrics: FontMetrics) -> Self {
        let mut fonts = FxHashMap::default();
        fonts.insert(FontId(0), metrics);
        Self {
            fonts,
            names: FxHashMap::default(),
            next_id: 1,
        }
    }

    /// Register a face under the next free id
    pub fn add(&mut self, metrics: FontMetrics) -> FontId {
        let id = FontId(self.next_id);
        self.set(id, metrics);
        id
    }

    /// Register a face and make it reachable by name
    pub fn add_named(&mut self, name: impl Into<String>, metrics: FontMetrics) -> FontId {
        let id = self.add(metrics);
        self.names.insert(name.into(), id);
        id
    }

    /// Register or replace the face at `id`
    pub fn set(&mut self, id: FontId, metrics: FontMetrics) {
        self.next_id = self.next_id.max(id.0.saturating_add(1));
        self.fonts.insert(id, metrics);
    }

    pub fn get(&self, id: FontId) -> Option<&FontMetrics> {
        self.fonts.get(&id)
    }

    /// Id of a named face
    pub fn by_name(&self, name: &str) -> Option<FontId> {
        self.names.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

/// Typographic theme handed to the line breaker
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    pub fonts: FontLibrary,
}

impl Theme {
    pub fn new(fonts: FontLibrary) -> Self {
        Self { fonts }
    }
}
