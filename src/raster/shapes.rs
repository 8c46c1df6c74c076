//! Filled shapes.
//!
//! Box coordinates are half-open: `x0..x1`, `y0..y1`. Pixels are sampled at
//! their centres, so adjacent shapes sharing an edge never double-cover.

use image::{Rgba, RgbaImage};

use super::blend_pixel;

fn clip_span(lo: i32, hi: i32, limit: u32) -> (i32, i32) {
    (lo.max(0), hi.min(limit as i32))
}

/// Fill the half-open box `[x0, x1) x [y0, y1)`.
pub fn fill_box(img: &mut RgbaImage, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba<u8>) {
    let (x0, x1) = clip_span(x0, x1, img.width());
    let (y0, y1) = clip_span(y0, y1, img.height());
    for y in y0..y1 {
        for x in x0..x1 {
            blend_pixel(img, x, y, color, 1.0);
        }
    }
}

/// Stroke the inside of a box with a border `width` pixels thick.
pub fn outline_box(
    img: &mut RgbaImage,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    width: i32,
    color: Rgba<u8>,
) {
    let w = width.max(1);
    fill_box(img, x0, y0, x1, (y0 + w).min(y1), color);
    fill_box(img, x0, (y1 - w).max(y0), x1, y1, color);
    fill_box(img, x0, y0 + w, (x0 + w).min(x1), y1 - w, color);
    fill_box(img, (x1 - w).max(x0), y0 + w, x1, y1 - w, color);
}

/// Fill a box with quarter-circle corners of `radius`.
pub fn fill_rounded_box(
    img: &mut RgbaImage,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    radius: i32,
    color: Rgba<u8>,
) {
    if x1 <= x0 || y1 <= y0 {
        return;
    }
    let r = radius.max(0).min((x1 - x0) / 2).min((y1 - y0) / 2) as f32;
    let (cx0, cx1) = (x0 as f32 + r, x1 as f32 - r);
    let (cy0, cy1) = (y0 as f32 + r, y1 as f32 - r);
    let (sx0, sx1) = clip_span(x0, x1, img.width());
    let (sy0, sy1) = clip_span(y0, y1, img.height());
    for y in sy0..sy1 {
        let py = y as f32 + 0.5;
        for x in sx0..sx1 {
            let px = x as f32 + 0.5;
            let dx = if px < cx0 { cx0 - px } else if px > cx1 { px - cx1 } else { 0.0 };
            let dy = if py < cy0 { cy0 - py } else if py > cy1 { py - cy1 } else { 0.0 };
            if dx * dx + dy * dy <= r * r {
                blend_pixel(img, x, y, color, 1.0);
            }
        }
    }
}

/// Fill the ellipse inscribed in `[x0, x1) x [y0, y1)`.
pub fn fill_ellipse(img: &mut RgbaImage, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba<u8>) {
    if x1 <= x0 || y1 <= y0 {
        return;
    }
    let rx = (x1 - x0) as f32 / 2.0;
    let ry = (y1 - y0) as f32 / 2.0;
    let cx = x0 as f32 + rx;
    let cy = y0 as f32 + ry;
    let (sx0, sx1) = clip_span(x0, x1, img.width());
    let (sy0, sy1) = clip_span(y0, y1, img.height());
    for y in sy0..sy1 {
        let ny = (y as f32 + 0.5 - cy) / ry;
        for x in sx0..sx1 {
            let nx = (x as f32 + 0.5 - cx) / rx;
            if nx * nx + ny * ny <= 1.0 {
                blend_pixel(img, x, y, color, 1.0);
            }
        }
    }
}

/// Even-odd scanline fill of a closed polygon.
pub fn fill_polygon(img: &mut RgbaImage, points: &[(f32, f32)], color: Rgba<u8>) {
    if points.len() < 3 {
        return;
    }
    let min_y = points.iter().map(|p| p.1).fold(f32::INFINITY, f32::min).floor().max(0.0) as i32;
    let max_y = points
        .iter()
        .map(|p| p.1)
        .fold(f32::NEG_INFINITY, f32::max)
        .ceil()
        .min(img.height() as f32) as i32;

    let mut crossings: Vec<f32> = Vec::with_capacity(points.len());
    for y in min_y..max_y {
        let sy = y as f32 + 0.5;
        crossings.clear();
        for i in 0..points.len() {
            let (ax, ay) = points[i];
            let (bx, by) = points[(i + 1) % points.len()];
            if (ay <= sy && by > sy) || (by <= sy && ay > sy) {
                crossings.push(ax + (sy - ay) / (by - ay) * (bx - ax));
            }
        }
        crossings.sort_by(f32::total_cmp);
        for pair in crossings.chunks_exact(2) {
            // pixel x is inside when its centre lies in [left, right)
            let start = (pair[0] - 0.5).ceil() as i32;
            let end = (pair[1] - 0.5).ceil() as i32;
            let (start, end) = clip_span(start, end, img.width());
            for x in start..end {
                blend_pixel(img, x, y, color, 1.0);
            }
        }
    }
}

/// Horizontal dashed rule centred on `y`.
#[allow(clippy::too_many_arguments)]
pub fn dashed_hline(
    img: &mut RgbaImage,
    x0: i32,
    x1: i32,
    y: i32,
    dash: i32,
    gap: i32,
    width: i32,
    color: Rgba<u8>,
) {
    let step = (dash + gap).max(1);
    let top = y - width / 2;
    let mut x = x0;
    while x < x1 {
        fill_box(img, x, top, (x + dash).min(x1), top + width.max(1), color);
        x += step;
    }
}
