//! # Raster Primitives
//!
//! Everything renders into straight-alpha `RgbaImage` buffers. This module
//! holds the capability the panel renderers call into: pixel blending,
//! aspect-preserving scaling, alpha pasting and rotation. Filled shapes live
//! in [`shapes`].
//!
//! Scaling always uses Lanczos3, matching print-quality resampling.

pub mod shapes;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

pub use shapes::{dashed_hline, fill_box, fill_ellipse, fill_polygon, fill_rounded_box, outline_box};

/// Opaque black ink.
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
/// Opaque white.
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
/// Fully transparent.
pub const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Source-over blend of `color` scaled by `coverage` into one pixel.
///
/// Out-of-bounds coordinates are ignored.
#[inline]
pub fn blend_pixel(img: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>, coverage: f32) {
    if x < 0 || y < 0 || x as u32 >= img.width() || y as u32 >= img.height() {
        return;
    }
    let sa = (color[3] as f32 / 255.0) * coverage.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return;
    }
    let dst = img.get_pixel_mut(x as u32, y as u32);
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        *dst = CLEAR;
        return;
    }
    for c in 0..3 {
        let s = color[c] as f32;
        let d = dst[c] as f32;
        dst[c] = ((s * sa + d * da * (1.0 - sa)) / out_a).round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round() as u8;
}

/// New image filled with one colour.
pub fn solid(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_pixel(width.max(1), height.max(1), color)
}

/// Alpha-composite `top` onto `base` at `(x, y)`, clipping at the edges.
pub fn paste(base: &mut RgbaImage, top: &RgbaImage, x: i64, y: i64) {
    imageops::overlay(base, top, x, y);
}

/// Paste `top` centred on `base` in both axes.
pub fn paste_centered(base: &mut RgbaImage, top: &RgbaImage) {
    let x = (base.width() as i64 - top.width() as i64) / 2;
    let y = (base.height() as i64 - top.height() as i64) / 2;
    paste(base, top, x, y);
}

/// Scale preserving aspect ratio so the height equals `height`.
pub fn scale_to_height(img: &RgbaImage, height: u32) -> RgbaImage {
    let height = height.max(1);
    let width = (img.width() as f64 * height as f64 / img.height().max(1) as f64).round() as u32;
    imageops::resize(img, width.max(1), height, FilterType::Lanczos3)
}

/// Scale preserving aspect ratio so the width equals `width`.
pub fn scale_to_width(img: &RgbaImage, width: u32) -> RgbaImage {
    let width = width.max(1);
    let height = (img.height() as f64 * width as f64 / img.width().max(1) as f64).round() as u32;
    imageops::resize(img, width, height.max(1), FilterType::Lanczos3)
}

/// Scale preserving aspect ratio to the largest size inside `max_w` x `max_h`.
pub fn scale_to_fit(img: &RgbaImage, max_w: u32, max_h: u32) -> RgbaImage {
    let by_w = max_w as f64 / img.width().max(1) as f64;
    let by_h = max_h as f64 / img.height().max(1) as f64;
    if by_w < by_h {
        scale_to_width(img, max_w)
    } else {
        scale_to_height(img, max_h)
    }
}

/// Exact resize (may distort).
pub fn resize_exact(img: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    imageops::resize(img, width.max(1), height.max(1), FilterType::Lanczos3)
}

/// Quarter-turn rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// 90 degrees clockwise.
    Cw,
    /// 90 degrees counter-clockwise.
    Ccw,
    Half,
}

pub fn rotate(img: &RgbaImage, turn: Turn) -> RgbaImage {
    match turn {
        Turn::Cw => imageops::rotate90(img),
        Turn::Ccw => imageops::rotate270(img),
        Turn::Half => imageops::rotate180(img),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_to_height_round_trip() {
        let img = solid(300, 120, BLACK);
        for h in [1, 7, 60, 240, 999] {
            let scaled = scale_to_height(&img, h);
            assert_eq!(scaled.height(), h);
            let expected = (300.0 * h as f64 / 120.0).round() as u32;
            assert!((scaled.width() as i64 - expected.max(1) as i64).abs() <= 1);
        }
    }

    #[test]
    fn test_scale_to_width_preserves_aspect() {
        let img = solid(400, 100, BLACK);
        let scaled = scale_to_width(&img, 200);
        assert_eq!(scaled.dimensions(), (200, 50));
    }

    #[test]
    fn test_scale_to_fit_picks_binding_axis() {
        let img = solid(400, 100, BLACK);
        assert_eq!(scale_to_fit(&img, 200, 200).dimensions(), (200, 50));
        assert_eq!(scale_to_fit(&img, 2000, 50).dimensions(), (200, 50));
    }

    #[test]
    fn test_blend_pixel_over_opaque() {
        let mut img = solid(2, 2, WHITE);
        blend_pixel(&mut img, 0, 0, BLACK, 0.5);
        let p = img.get_pixel(0, 0);
        assert!((p[0] as i32 - 128).abs() <= 1);
        assert_eq!(p[3], 255);
        blend_pixel(&mut img, -1, 5, BLACK, 1.0);
    }

    #[test]
    fn test_blend_pixel_onto_clear() {
        let mut img = RgbaImage::new(1, 1);
        blend_pixel(&mut img, 0, 0, Rgba([200, 10, 10, 255]), 1.0);
        assert_eq!(*img.get_pixel(0, 0), Rgba([200, 10, 10, 255]));
    }

    #[test]
    fn test_paste_respects_alpha() {
        let mut base = solid(4, 4, WHITE);
        let mut top = RgbaImage::new(2, 2);
        top.put_pixel(0, 0, BLACK);
        paste(&mut base, &top, 1, 1);
        assert_eq!(*base.get_pixel(1, 1), BLACK);
        assert_eq!(*base.get_pixel(2, 2), WHITE);
    }

    #[test]
    fn test_rotations() {
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(0, 0, BLACK);
        let cw = rotate(&img, Turn::Cw);
        assert_eq!(cw.dimensions(), (2, 3));
        assert_eq!(*cw.get_pixel(1, 0), BLACK);
        let ccw = rotate(&img, Turn::Ccw);
        assert_eq!(*ccw.get_pixel(0, 2), BLACK);
        let half = rotate(&img, Turn::Half);
        assert_eq!(*half.get_pixel(2, 1), BLACK);
    }
}
