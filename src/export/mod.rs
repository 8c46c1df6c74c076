//! # Export
//!
//! Final stage: print colour approximation, PDF serialization and on-screen
//! previews. Nothing here draws; it only converts the finished canvas.
//!
//! | Function | Output |
//! |----------|--------|
//! | [`print_round_trip`] | Canvas pushed through 8-bit CMYK and back |
//! | [`pdf::write_pdf`] | Single-page PDF, page size `px / ppi` inches |
//! | [`preview`] | Lanczos-downscaled copy no wider than a cap |
//! | [`encode_png`] | PNG bytes |

pub mod pdf;

use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

use crate::error::BoxmarkError;

pub use pdf::write_pdf;

/// Default preview width cap in pixels.
pub const PREVIEW_MAX_WIDTH: u32 = 2000;

/// Naive RGB to CMYK: `K = 1 - max(R, G, B)`, remaining inks scaled by `1 - K`.
pub fn rgb_to_cmyk(rgb: [u8; 3]) -> [u8; 4] {
    let max = rgb.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return [0, 0, 0, 255];
    }
    let k = 255 - max;
    let ink = |c: u8| (((max - c) as u32 * 255 + max as u32 / 2) / max as u32) as u8;
    [ink(rgb[0]), ink(rgb[1]), ink(rgb[2]), k]
}

/// Inverse of [`rgb_to_cmyk`]: `R = 255 (1 - C)(1 - K)`.
pub fn cmyk_to_rgb(cmyk: [u8; 4]) -> [u8; 3] {
    let white = 255 - cmyk[3] as u32;
    let chan = |c: u8| (((255 - c as u32) * white + 127) / 255) as u8;
    [chan(cmyk[0]), chan(cmyk[1]), chan(cmyk[2])]
}

/// Approximate print colour by converting every pixel to CMYK and back.
///
/// Alpha is kept as is.
pub fn print_round_trip(canvas: &RgbaImage) -> RgbaImage {
    let mut out = canvas.clone();
    for p in out.pixels_mut() {
        let [r, g, b] = cmyk_to_rgb(rgb_to_cmyk([p[0], p[1], p[2]]));
        *p = Rgba([r, g, b, p[3]]);
    }
    out
}

/// Downscale to at most `max_width` pixels wide, keeping the aspect ratio.
///
/// Narrower canvases are returned unchanged.
pub fn preview(canvas: &RgbaImage, max_width: u32) -> RgbaImage {
    let (w, h) = canvas.dimensions();
    if max_width == 0 || w <= max_width {
        return canvas.clone();
    }
    let new_h = ((h as f64 * max_width as f64 / w as f64).round() as u32).max(1);
    log::debug!("preview {}x{} -> {}x{}", w, h, max_width, new_h);
    imageops::resize(canvas, max_width, new_h, FilterType::Lanczos3)
}

/// PNG-encode an image.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, BoxmarkError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}
