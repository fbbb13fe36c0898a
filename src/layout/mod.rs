//! Pagination and layout engine

pub mod columns;
mod engine;
pub mod font;
pub mod header_footer;
pub mod line_break;
mod pagination;
pub mod placer;
pub mod region;

pub use columns::{column_geometry, distribute, ColumnArea, ColumnLayout, FlowPosition};
pub use engine::{layout, LayoutOptions, LayoutState};
pub use font::{FontId, FontLibrary, FontMetrics, Theme};
pub use header_footer::{HeaderFooter, HeaderFooterKind, HeaderFooterMap, HeaderFooterSet};
pub use line_break::{
    GreedyLineBreaker, LineBreaker, LineConstraints, LineLayout, ParagraphLayout,
};
pub use pagination::{Page, PageGeometry, PageLayoutResult};
pub use placer::{place_block, Placement, PlacementContext, DEFAULT_TABLE_ROW_HEIGHT};
pub use region::{
    BreakScope, Continuation, Flow, Fragment, PositionedContent, Region, FIT_EPSILON,
};
