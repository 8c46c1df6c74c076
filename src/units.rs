//! # Unit Conversion
//!
//! Every pixel measurement in a box mark derives from one conversion factor:
//! pixels per centimeter, written `dpi` throughout the crate for historical
//! reasons (it is *not* dots per inch).
//!
//! ## Calculations
//!
//! ```text
//! dpi      = ppi / 2.54          (pixels per centimeter)
//! px       = round(cm * dpi)
//! inches   = cm / 2.54
//!
//! At 150 PPI:
//!   dpi = 59.055...
//!   77 cm -> 4547 px
//! ```
//!
//! Panels that share an edge on the die-line must agree to the pixel, so all
//! conversions go through [`cm_to_px`] and nothing rounds on its own.

/// Centimeters per inch.
pub const CM_PER_INCH: f64 = 2.54;

/// PDF points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Pixels per centimeter for a given print resolution.
///
/// ## Example
///
/// ```
/// use boxmark::units::dpi;
///
/// assert!((dpi(254) - 100.0).abs() < 1e-9);
/// ```
#[inline]
pub fn dpi(ppi: u32) -> f64 {
    ppi as f64 / CM_PER_INCH
}

/// Convert centimeters to whole pixels.
///
/// Rounds to the nearest pixel. Negative inputs are allowed (offsets) and
/// round symmetrically.
#[inline]
pub fn cm_to_px(value_cm: f64, dpi: f64) -> i32 {
    (value_cm * dpi).round() as i32
}

/// Convert pixels back to centimeters.
#[inline]
pub fn px_to_cm(px: u32, dpi: f64) -> f64 {
    px as f64 / dpi
}

/// Convert centimeters to inches.
#[inline]
pub fn cm_to_in(value_cm: f64) -> f64 {
    value_cm / CM_PER_INCH
}

/// Convert a pixel extent at `ppi` to PDF points.
#[inline]
pub fn px_to_pt(px: u32, ppi: u32) -> f64 {
    px as f64 / ppi as f64 * POINTS_PER_INCH
}
