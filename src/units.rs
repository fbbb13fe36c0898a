//! Length unit conversion
//!
//! Document geometry is authored in OOXML units (twips, EMUs, half-points)
//! and laid out in CSS pixels at 96 dpi.

/// Pixels per inch of the rendering surface
pub const PX_PER_INCH: f32 = 96.0;

/// Twentieths of a point per inch
pub const TWIPS_PER_INCH: f32 = 1440.0;

/// English metric units per inch
pub const EMU_PER_INCH: f32 = 914_400.0;

/// Points per inch
pub const POINTS_PER_INCH: f32 = 72.0;

/// Convert twips (dxa) to pixels
pub fn twips_to_px(twips: f32) -> f32 {
    twips * PX_PER_INCH / TWIPS_PER_INCH
}

/// Convert pixels to twips
pub fn px_to_twips(px: f32) -> f32 {
    px * TWIPS_PER_INCH / PX_PER_INCH
}

/// Convert EMUs (drawing units) to pixels
pub fn emu_to_px(emu: f32) -> f32 {
    emu * PX_PER_INCH / EMU_PER_INCH
}

/// Convert points to pixels
pub fn points_to_px(points: f32) -> f32 {
    points * PX_PER_INCH / POINTS_PER_INCH
}

/// Convert half-points (font sizes) to pixels
pub fn half_points_to_px(half_points: f32) -> f32 {
    points_to_px(half_points / 2.0)
}

/// Convert inches to pixels
pub fn inches_to_px(inches: f32) -> f32 {
    inches * PX_PER_INCH
}
