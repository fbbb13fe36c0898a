//! Line breaking: the seam between paragraphs and pagination
//!
//! The engine only consumes line heights and counts; anything that can turn a
//! paragraph and a width into measured lines can drive it.

use crate::document::{DefaultFormatting, Paragraph, TabStop};
use crate::layout::font::{FontMetrics, Theme};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use unicode_linebreak::{linebreaks, BreakOpportunity};
use unicode_segmentation::UnicodeSegmentation;

/// Baseline position as a fraction of the line height
pub const BASELINE_RATIO: f32 = 0.8;

/// Width of a tab when no tab stop lies ahead, in default advances
const DEFAULT_TAB_ADVANCES: f32 = 4.0;

/// Layout result for a single line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineLayout {
    /// Byte range within paragraph this line covers
    pub byte_range: Range<usize>,
    /// Line height
    pub height: f32,
    /// Baseline offset from top of line
    pub baseline: f32,
    /// Actual width of content
    pub width: f32,
}

impl LineLayout {
    pub fn new(byte_range: Range<usize>, height: f32, width: f32) -> Self {
        Self {
            byte_range,
            height,
            baseline: height * BASELINE_RATIO,
            width,
        }
    }
}

/// Measured lines of one paragraph
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphLayout {
    /// Lines produced by line breaking
    pub lines: Vec<LineLayout>,
    /// Sum of line heights, excluding paragraph spacing
    pub total_height: f32,
}

impl ParagraphLayout {
    pub fn new(lines: Vec<LineLayout>) -> Self {
        let total_height = lines.iter().map(|l| l.height).sum();
        Self {
            lines,
            total_height,
        }
    }

    /// Get total line count
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Everything a line breaker may use besides the paragraph itself
#[derive(Debug, Clone, Copy)]
pub struct LineConstraints<'a> {
    /// Width available between the paragraph's indents
    pub max_width: f32,
    pub first_line_indent: f32,
    pub tab_stops: &'a [TabStop],
    pub theme: &'a Theme,
    pub defaults: &'a DefaultFormatting,
}

/// Turns a paragraph into measured lines.
///
/// Implementations must be deterministic: the same paragraph and constraints
/// always produce the same lines.
pub trait LineBreaker {
    type Error;

    fn break_lines(
        &self,
        paragraph: &Paragraph,
        constraints: &LineConstraints<'_>,
    ) -> std::result::Result<ParagraphLayout, Self::Error>;
}

/// Greedy grapheme-based line breaker over per-font advance tables
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyLineBreaker;

/// A measured grapheme cluster on the line being built
#[derive(Debug, Clone, Copy)]
struct Cluster {
    byte_offset: usize,
    x: f32,
    width: f32,
    height: f32,
}

impl GreedyLineBreaker {
    pub fn new() -> Self {
        Self
    }

    /// Metrics for the font at a byte offset, falling back to the default font
    fn metrics_at<'t>(
        paragraph: &Paragraph,
        constraints: &LineConstraints<'t>,
        byte_offset: usize,
    ) -> Result<&'t FontMetrics> {
        let theme: &'t Theme = constraints.theme;
        let fonts = &theme.fonts;
        let default_font = constraints.defaults.font;
        paragraph
            .font_at(byte_offset)
            .and_then(|id| fonts.get(id))
            .or_else(|| fonts.get(default_font))
            .ok_or(Error::MissingFont(default_font))
    }

    /// Advance of a tab starting at `x`
    fn tab_width(x: f32, tab_stops: &[TabStop], metrics: &FontMetrics) -> f32 {
        tab_stops
            .iter()
            .find(|stop| stop.position > x)
            .map(|stop| stop.position - x)
            .unwrap_or(metrics.fallback_advance * DEFAULT_TAB_ADVANCES)
    }
}

impl LineBreaker for GreedyLineBreaker {
    type Error = Error;

    fn break_lines(
        &self,
        paragraph: &Paragraph,
        constraints: &LineConstraints<'_>,
    ) -> Result<ParagraphLayout> {
        let text = paragraph.text.as_str();
        let multiplier = match paragraph.format.spacing.line * constraints.defaults.line_spacing {
            m if m > 0.0 => m,
            _ => 1.0,
        };
        let default_height = Self::metrics_at(paragraph, constraints, usize::MAX)?.line_height;

        if text.is_empty() {
            // Empty paragraph still has one line
            let line = LineLayout::new(0..0, default_height * multiplier, 0.0);
            return Ok(ParagraphLayout::new(vec![line]));
        }

        let allowed: Vec<usize> = linebreaks(text)
            .filter(|(_, opportunity)| *opportunity == BreakOpportunity::Allowed)
            .map(|(offset, _)| offset)
            .collect();

        let mut lines = Vec::new();
        let mut line_start: usize = 0;
        let mut x: f32 = 0.0;
        let mut clusters: Vec<Cluster> = Vec::new();
        let mut last_break: Option<(usize, f32)> = None;

        for (byte_idx, grapheme) in text.grapheme_indices(true) {
            let metrics = Self::metrics_at(paragraph, constraints, byte_idx)?;

            // Check for explicit line break
            if grapheme == "\n" || grapheme == "\r\n" {
                let height = line_height(&clusters).unwrap_or(metrics.line_height);
                lines.push(LineLayout::new(line_start..byte_idx, height * multiplier, x));
                clusters.clear();
                line_start = byte_idx + grapheme.len();
                x = 0.0;
                last_break = None;
                continue;
            }

            let indent = if lines.is_empty() {
                constraints.first_line_indent
            } else {
                0.0
            };
            let available = (constraints.max_width - indent).max(1.0);

            let cluster_width = if grapheme == "\t" {
                Self::tab_width(x + indent, constraints.tab_stops, metrics)
            } else if grapheme.chars().all(|c| c.is_control()) {
                0.0
            } else {
                grapheme.chars().map(|c| metrics.advance(c)).sum()
            };

            if byte_idx > line_start && allowed.binary_search(&byte_idx).is_ok() {
                last_break = Some((byte_idx, x));
            }

            // Check for soft wrap
            if x + cluster_width > available && !clusters.is_empty() {
                // Break at last break point if available, else mid-word
                let (break_offset, break_x) = last_break.unwrap_or((byte_idx, x));

                let split = clusters
                    .iter()
                    .position(|c| c.byte_offset >= break_offset)
                    .unwrap_or(clusters.len());
                let rest = clusters.split_off(split);
                let line_width = clusters.last().map(|c| c.x + c.width).unwrap_or(0.0);
                let height = line_height(&clusters).unwrap_or(metrics.line_height);

                lines.push(LineLayout::new(
                    line_start..break_offset,
                    height * multiplier,
                    line_width,
                ));

                clusters = rest;
                for cluster in &mut clusters {
                    cluster.x -= break_x;
                }

                line_start = break_offset;
                x -= break_x;
                last_break = None;
            }

            clusters.push(Cluster {
                byte_offset: byte_idx,
                x,
                width: cluster_width,
                height: metrics.line_height,
            });
            x += cluster_width;
        }

        // Final line; empty when the text ended with a newline
        let height = line_height(&clusters).unwrap_or(default_height);
        lines.push(LineLayout::new(line_start..text.len(), height * multiplier, x));

        Ok(ParagraphLayout::new(lines))
    }
}

/// Tallest cluster on a line
fn line_height(clusters: &[Cluster]) -> Option<f32> {
    clusters.iter().map(|c| c.height).reduce(f32::max)
}
