//! # Ornaments
//!
//! Decorative elements shared by several carton designs.
//!
//! | Ornament | Used for |
//! |----------|----------|
//! | [`draw_stepped_bar`] | Two-height black base bar with a smoothstep transition |
//! | [`draw_badge`] / [`text_badge`] | Rounded-rect backgrounds behind short labels |
//! | [`draw_smooth_ellipse`] | Anti-aliased accent under product names |
//! | [`draw_diagonal_stripes`] | Hazard-style stripe band near panel bottoms |
//!
//! All measurements are in pixels; callers convert centimeters first.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::raster::{fill_box, fill_ellipse, fill_polygon, fill_rounded_box, paste};
use crate::text::{Anchor, Face};

/// Number of segments in the base-bar transition curve.
pub const CURVE_SEGMENTS: usize = 20;

/// Cubic smoothstep `t^2 (3 - 2t)`.
#[inline]
pub fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// Sampled S-curve from `(x_from, y_from)` to `(x_to, y_to)`.
///
/// x advances linearly, y follows [`smoothstep`]. Returns
/// `CURVE_SEGMENTS + 1` points including both ends.
pub fn transition_curve(x_from: f64, y_from: f64, x_to: f64, y_to: f64) -> Vec<(f32, f32)> {
    (0..=CURVE_SEGMENTS)
        .map(|i| {
            let t = i as f64 / CURVE_SEGMENTS as f64;
            let x = x_from + (x_to - x_from) * t;
            let y = y_from + (y_to - y_from) * smoothstep(t);
            (x as f32, y as f32)
        })
        .collect()
}

/// Bottom-anchored bar: `left_h` tall on `[0, x_start)`, `right_h` tall on
/// `[x_end, width)`, joined by a smoothstep curve over `[x_start, x_end]`.
pub fn draw_stepped_bar(
    img: &mut RgbaImage,
    left_h: i32,
    right_h: i32,
    x_start: i32,
    x_end: i32,
    color: Rgba<u8>,
) {
    let w = img.width() as i32;
    let h = img.height() as i32;
    fill_box(img, 0, h - left_h, x_start, h, color);
    fill_box(img, x_end, h - right_h, w, h, color);

    let mut path = transition_curve(
        x_start as f64,
        (h - left_h) as f64,
        x_end as f64,
        (h - right_h) as f64,
    );
    path.push((x_end as f32, h as f32));
    path.push((x_start as f32, h as f32));
    fill_polygon(img, &path, color);
}

/// Rectangle drawn behind a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Badge {
    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }
}

/// Rounded rectangle around a text box whose top-left is `(x, y)`.
///
/// Horizontal padding is `pad_x` on both sides. Vertical padding is skewed
/// to centre caps optically: 0.7 `pad_y` above, 1.4 `pad_y` below.
#[allow(clippy::too_many_arguments)]
pub fn draw_badge(
    img: &mut RgbaImage,
    x: i32,
    y: i32,
    text_w: u32,
    text_h: u32,
    pad_x: i32,
    pad_y: i32,
    radius: i32,
    color: Rgba<u8>,
) -> Badge {
    let pad_top = (pad_y as f64 * 0.7) as i32;
    let pad_bottom = (pad_y as f64 * 1.4) as i32;
    let badge = Badge {
        x0: x - pad_x,
        y0: y - pad_top,
        x1: x + text_w as i32 + pad_x,
        y1: y + text_h as i32 + pad_bottom,
    };
    fill_rounded_box(img, badge.x0, badge.y0, badge.x1, badge.y1, radius, color);
    badge
}

/// Badge plus the text on top of it.
#[allow(clippy::too_many_arguments)]
pub fn text_badge(
    img: &mut RgbaImage,
    face: &Face,
    text: &str,
    size: f32,
    x: i32,
    y: i32,
    pad: (i32, i32),
    radius: i32,
    bg: Rgba<u8>,
    fg: Rgba<u8>,
) -> Badge {
    let m = face.measure(text, size);
    let badge = draw_badge(img, x, y, m.width(), m.height(), pad.0, pad.1, radius, bg);
    face.draw(img, x, y, text, size, fg, Anchor::LeftTop);
    badge
}

/// Supersampled ellipse inscribed in `[x0, x1) x [y0, y1)`.
///
/// Rasterized at `scale`x into a transparent layer, then Lanczos-downsampled
/// and alpha-composited.
pub fn draw_smooth_ellipse(
    img: &mut RgbaImage,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Rgba<u8>,
    scale: u32,
) {
    let w = (x1 - x0).max(0) as u32;
    let h = (y1 - y0).max(0) as u32;
    if w == 0 || h == 0 {
        return;
    }
    let scale = scale.max(1);
    let mut layer = RgbaImage::new(w * scale, h * scale);
    fill_ellipse(&mut layer, 0, 0, (w * scale) as i32, (h * scale) as i32, color);
    let smooth = imageops::resize(&layer, w, h, FilterType::Lanczos3);
    paste(img, &smooth, x0 as i64, y0 as i64);
}

/// Diagonal stripe band.
#[derive(Debug, Clone, Copy)]
pub struct Stripes {
    /// Band height in pixels.
    pub height: i32,
    /// Gap between the band and the bottom edge.
    pub bottom_margin: i32,
    /// Width of each stripe; stripes repeat every 1.5 widths.
    pub stripe_width: i32,
    pub stripe_color: Rgba<u8>,
    pub background: Rgba<u8>,
}

/// Fill a full-width band above the bottom margin with parallelogram stripes.
///
/// Returns the band's top edge.
pub fn draw_diagonal_stripes(img: &mut RgbaImage, stripes: &Stripes) -> i32 {
    let w = img.width() as i32;
    let h = img.height() as i32;
    let y_end = h - stripes.bottom_margin;
    let y_start = y_end - stripes.height;
    fill_box(img, 0, y_start, w, y_end, stripes.background);

    let sw = stripes.stripe_width.max(1);
    let sh = stripes.height;
    let offset = ((sw as f64 * 1.5) as i32).max(1);
    let count = (w + sh) / offset + 2;
    for i in 0..count {
        let sx = (i * offset - sh) as f32;
        let quad = [
            (sx, y_end as f32),
            (sx + sw as f32, y_end as f32),
            (sx + (sw + sh) as f32, y_start as f32),
            (sx + sh as f32, y_start as f32),
        ];
        fill_polygon(img, &quad, stripes.stripe_color);
    }
    y_start
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{BLACK, WHITE, solid};

    #[test]
    fn test_smoothstep_endpoints() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert!((smoothstep(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_curve_is_monotonic() {
        let pts = transition_curve(100.0, 500.0, 700.0, 200.0);
        assert_eq!(pts.len(), 21);
        assert_eq!(pts[0], (100.0, 500.0));
        assert_eq!(pts[20], (700.0, 200.0));
        for pair in pts.windows(2) {
            assert!(pair[1].0 > pair[0].0);
            assert!(pair[1].1 <= pair[0].1);
        }
    }

    #[test]
    fn test_stepped_bar_heights() {
        let mut img = solid(400, 200, WHITE);
        draw_stepped_bar(&mut img, 40, 100, 100, 200, BLACK);
        // short section
        assert_eq!(img.get_pixel(50, 199)[0], 0);
        assert_eq!(img.get_pixel(50, 160)[0], 0);
        assert_eq!(img.get_pixel(50, 150)[0], 255);
        // tall section
        assert_eq!(img.get_pixel(300, 100)[0], 0);
        assert_eq!(img.get_pixel(300, 99)[0], 255);
        // transition midpoint height is between both
        assert_eq!(img.get_pixel(150, 135)[0], 0);
        assert_eq!(img.get_pixel(150, 125)[0], 255);
    }

    #[test]
    fn test_stepped_bar_clips_negative_start() {
        let mut img = solid(100, 50, WHITE);
        draw_stepped_bar(&mut img, 10, 30, -40, 20, BLACK);
        assert_eq!(img.get_pixel(90, 25)[0], 0);
    }

    #[test]
    fn test_badge_geometry() {
        let mut img = solid(300, 200, WHITE);
        let badge = draw_badge(&mut img, 100, 100, 50, 20, 10, 10, 4, BLACK);
        assert_eq!(badge, Badge { x0: 90, y0: 93, x1: 160, y1: 134 });
        assert_eq!(img.get_pixel(125, 110)[0], 0);
        assert_eq!(img.get_pixel(80, 110)[0], 255);
    }

    #[test]
    fn test_text_badge_draws_text_in_fg() {
        let mut img = solid(400, 200, BLACK);
        let face = Face::builtin();
        let badge = text_badge(&mut img, &face, "BOX", 40.0, 50, 50, (10, 10), 6, BLACK, WHITE);
        assert!(badge.width() > 60);
        let white = img.pixels().filter(|p| p[0] == 255).count();
        assert!(white > 0);
    }

    #[test]
    fn test_smooth_ellipse_has_soft_edges() {
        let mut img = RgbaImage::new(100, 40);
        draw_smooth_ellipse(&mut img, 0, 0, 100, 40, BLACK, 4);
        assert!(img.get_pixel(50, 20)[3] >= 250);
        assert!(img.get_pixel(0, 0)[3] <= 5);
        assert!(img.pixels().any(|p| p[3] > 0 && p[3] < 255));
    }

    #[test]
    fn test_stripes_cover_band_only() {
        let mut img = solid(300, 100, Rgba([9, 9, 9, 255]));
        let top = draw_diagonal_stripes(
            &mut img,
            &Stripes {
                height: 30,
                bottom_margin: 10,
                stripe_width: 20,
                stripe_color: BLACK,
                background: WHITE,
            },
        );
        assert_eq!(top, 60);
        assert_eq!(*img.get_pixel(150, 59), Rgba([9, 9, 9, 255]));
        assert_eq!(*img.get_pixel(150, 95), Rgba([9, 9, 9, 255]));
        let band: Vec<_> = (60..90).flat_map(|y| (0..300).map(move |x| (x, y))).collect();
        let black = band.iter().filter(|(x, y)| img.get_pixel(*x, *y)[0] == 0).count();
        let white = band.iter().filter(|(x, y)| img.get_pixel(*x, *y)[0] == 255).count();
        assert_eq!(black + white, band.len());
        assert!(black > band.len() / 2 && white > band.len() / 5);
    }
}
