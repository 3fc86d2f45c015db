//! Twip geometry: the fixed-point unit all layout math runs in.
//!
//! One twip is 1/20 of a point (1/1440 inch). Fractional inputs are scaled
//! in f32 and truncated toward zero, so conversions are reproducible and
//! rounding error stays below one twip per operation.

/// Layout unit: 1/20 point.
pub type Twips = i32;

/// Twips per typographic point.
pub const TWIPS_PER_POINT: Twips = 20;

/// Convert points to twips, truncating the fraction.
#[must_use]
pub fn from_points(points: f32) -> Twips {
    (points * TWIPS_PER_POINT as f32) as Twips
}

/// Take a percentage of a twip total, truncating the fraction.
#[must_use]
pub fn percent_of(total: Twips, percent: f32) -> Twips {
    (total as f32 * percent / 100.0) as Twips
}
