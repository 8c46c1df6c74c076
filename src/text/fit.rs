//! Largest-size text fitting.
//!
//! One algorithm serves every call site: a binary search over integer sizes
//! in `[min_size, max_size]`, measuring the ink box through [`Face::measure`]
//! (the same glyph path used to draw). When nothing fits, the floor size is
//! returned with `fits == false` and the caller accepts the overflow.

use super::face::Face;

/// Search bounds for [`fit_text`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitBounds {
    pub max_width: u32,
    pub max_height: Option<u32>,
    pub min_size: u32,
    pub max_size: u32,
}

impl FitBounds {
    /// Width-only bounds with the default size range `[10, 1000]`.
    pub fn width(max_width: u32) -> Self {
        Self {
            max_width,
            max_height: None,
            min_size: 10,
            max_size: 1000,
        }
    }

    /// Width and height bounds with the default size range.
    pub fn boxed(max_width: u32, max_height: u32) -> Self {
        Self {
            max_height: Some(max_height),
            ..Self::width(max_width)
        }
    }

    /// Bounds whose size range follows the target height: 15% to 120% of it.
    pub fn height_guided(max_width: u32, max_height: u32) -> Self {
        let h = max_height as f64;
        Self {
            max_width,
            max_height: Some(max_height),
            min_size: ((h * 0.15) as u32).max(1),
            max_size: ((h * 1.2) as u32).max(1),
        }
    }

    pub fn with_range(mut self, min_size: u32, max_size: u32) -> Self {
        self.min_size = min_size;
        self.max_size = max_size.max(min_size);
        self
    }
}

/// Outcome of a fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fit {
    /// Chosen size (em pixels).
    pub size: u32,
    /// False when even `min_size` overflows the bounds.
    pub fits: bool,
    /// Measured ink width at `size`.
    pub width: u32,
    /// Measured ink height at `size`.
    pub height: u32,
}

impl Fit {
    pub fn size_f32(&self) -> f32 {
        self.size as f32
    }
}

fn accepts(width: u32, height: u32, bounds: &FitBounds) -> bool {
    width <= bounds.max_width && bounds.max_height.is_none_or(|mh| height <= mh)
}

/// Largest size in `[min_size, max_size]` whose measured box fits `bounds`.
///
/// Empty text trivially fits at `max_size`.
pub fn fit_text(face: &Face, text: &str, bounds: FitBounds) -> Fit {
    if text.is_empty() {
        return Fit {
            size: bounds.max_size,
            fits: true,
            width: 0,
            height: 0,
        };
    }

    let mut lo = bounds.min_size as i64;
    let mut hi = bounds.max_size as i64;
    let mut best: Option<Fit> = None;

    while lo <= hi {
        let mid = (lo + hi) / 2;
        let m = face.measure(text, mid as f32);
        let (w, h) = (m.width(), m.height());
        if accepts(w, h, &bounds) {
            best = Some(Fit {
                size: mid as u32,
                fits: true,
                width: w,
                height: h,
            });
            lo = mid + 1;
        } else {
            hi = mid - 1;
        }
    }

    let fit = best.unwrap_or_else(|| {
        let m = face.measure(text, bounds.min_size as f32);
        Fit {
            size: bounds.min_size,
            fits: false,
            width: m.width(),
            height: m.height(),
        }
    });
    log::debug!(
        "fit '{}' into {}x{:?}: size {} ({}x{}, fits={})",
        text,
        bounds.max_width,
        bounds.max_height,
        fit.size,
        fit.width,
        fit.height,
        fit.fits
    );
    fit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fits_at(face: &Face, text: &str, size: u32, b: &FitBounds) -> bool {
        let m = face.measure(text, size as f32);
        accepts(m.width(), m.height(), b)
    }

    #[test]
    fn test_fit_is_maximal() {
        let face = Face::builtin();
        for (text, w, h) in [
            ("CA-6160-OE678BR-1", 2000, None),
            ("Lift Recliner", 900, Some(120)),
            ("X", 57, Some(1000)),
            ("BOX 1 OF 3", 333, Some(40)),
        ] {
            let bounds = FitBounds { max_height: h, ..FitBounds::width(w) };
            let fit = fit_text(&face, text, bounds);
            assert!(fit.fits, "{} should fit", text);
            assert!(fits_at(&face, text, fit.size, &bounds));
            assert!(
                fit.size == bounds.max_size || !fits_at(&face, text, fit.size + 1, &bounds),
                "{} at {} is not maximal",
                text,
                fit.size
            );
        }
    }

    #[test]
    fn test_width_only() {
        let face = Face::builtin();
        // Builtin cell is size/2 wide: 10 chars at 100 = 500 px
        let fit = fit_text(&face, "0123456789", FitBounds::width(500));
        assert_eq!(fit.size, 100);
        assert_eq!(fit.width, 500);
    }

    #[test]
    fn test_height_constraint_binds() {
        let face = Face::builtin();
        let fit = fit_text(&face, "AB", FitBounds::boxed(10_000, 64));
        assert_eq!(fit.size, 64);
        assert_eq!(fit.height, 64);
    }

    #[test]
    fn test_caps_at_max_size() {
        let face = Face::builtin();
        let fit = fit_text(&face, "A", FitBounds::width(100_000));
        assert_eq!(fit.size, 1000);
        assert!(fit.fits);
    }

    #[test]
    fn test_overflow_degrades_to_floor() {
        let face = Face::builtin();
        let long = "W".repeat(400);
        let fit = fit_text(&face, &long, FitBounds::width(300));
        assert_eq!(fit.size, 10);
        assert!(!fit.fits);
        assert!(fit.width > 300);
    }

    #[test]
    fn test_empty_text_is_max() {
        let face = Face::builtin();
        let fit = fit_text(&face, "", FitBounds::boxed(1, 1));
        assert_eq!(fit, Fit { size: 1000, fits: true, width: 0, height: 0 });
    }

    #[test]
    fn test_deterministic() {
        let face = Face::builtin();
        let b = FitBounds::boxed(1234, 321);
        assert_eq!(fit_text(&face, "SKU-42", b), fit_text(&face, "SKU-42", b));
    }

    #[test]
    fn test_height_guided_range() {
        let b = FitBounds::height_guided(500, 200);
        assert_eq!((b.min_size, b.max_size), (30, 240));
        let fit = fit_text(&Face::builtin(), "AB", b);
        assert_eq!(fit.size, 200);
    }

    #[test]
    fn test_with_range_orders_bounds() {
        let b = FitBounds::width(10).with_range(50, 20);
        assert_eq!((b.min_size, b.max_size), (50, 50));
    }
}
