//! # Barcodes
//!
//! Code 128 symbols rendered to transparent rasters of an exact size.
//!
//! ## Pipeline
//!
//! 1. Encode with `barcoders` (character set B, so mixed-case SKUs work)
//! 2. Draw modules black-on-white with a 5-module quiet zone
//! 3. Knock out near-white pixels (every channel above 250) to transparency
//! 4. Lanczos-resize to the requested width and height
//!
//! Encoding failures are returned as [`BoxmarkError::Barcode`]; panel code
//! decides whether to fall back to plain text.

use barcoders::sym::code128::Code128;
use image::RgbaImage;

use crate::error::BoxmarkError;
use crate::raster::{BLACK, CLEAR, WHITE, fill_box, resize_exact};

/// Quiet zone on each side, in modules.
pub const QUIET_ZONE: u32 = 5;

/// Channel value above which a pixel counts as background.
pub const WHITE_THRESHOLD: u8 = 250;

/// Pixels per module in the intermediate raster.
const MODULE_PX: u32 = 4;

/// Encode `data` as Code 128 modules (1 = bar, 0 = space).
pub fn encode_code128(data: &str) -> Result<Vec<u8>, BoxmarkError> {
    if data.is_empty() {
        return Err(BoxmarkError::Barcode("empty payload".into()));
    }
    // Character set B: upper and lower case, digits, punctuation
    let prefixed = format!("\u{0181}{}", data);
    let symbol =
        Code128::new(&prefixed).map_err(|e| BoxmarkError::Barcode(format!("{}: {:?}", data, e)))?;
    Ok(symbol.encode())
}

/// Make near-white pixels fully transparent.
pub fn knock_out_white(img: &mut RgbaImage, threshold: u8) {
    for px in img.pixels_mut() {
        if px[0] > threshold && px[1] > threshold && px[2] > threshold {
            *px = CLEAR;
        }
    }
}

/// Render `data` as a Code 128 symbol of exactly `width` x `height` pixels.
pub fn render_code128(data: &str, width: u32, height: u32) -> Result<RgbaImage, BoxmarkError> {
    let modules = encode_code128(data)?;
    let total = modules.len() as u32 + 2 * QUIET_ZONE;
    let raster_h = height.clamp(1, 2048);
    let mut img = RgbaImage::from_pixel(total * MODULE_PX, raster_h, WHITE);
    for (i, m) in modules.iter().enumerate() {
        if *m == 1 {
            let x = ((i as u32 + QUIET_ZONE) * MODULE_PX) as i32;
            fill_box(&mut img, x, 0, x + MODULE_PX as i32, raster_h as i32, BLACK);
        }
    }
    knock_out_white(&mut img, WHITE_THRESHOLD);
    Ok(resize_exact(&img, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_has_bars() {
        let modules = encode_code128("CA-6160-OE678BR-1").unwrap();
        assert!(!modules.is_empty());
        assert!(modules.iter().any(|&m| m == 1));
        assert!(modules.iter().any(|&m| m == 0));
    }

    #[test]
    fn test_render_exact_size() {
        let img = render_code128("08429381073953", 640, 180).unwrap();
        assert_eq!(img.dimensions(), (640, 180));
    }

    #[test]
    fn test_render_transparent_background() {
        let img = render_code128("ABC-123", 400, 50).unwrap();
        // quiet zone is transparent
        assert_eq!(img.get_pixel(0, 25)[3], 0);
        assert!(img.pixels().any(|p| p[3] > 200 && p[0] < 50));
    }

    #[test]
    fn test_empty_payload_fails() {
        assert!(matches!(encode_code128(""), Err(BoxmarkError::Barcode(_))));
    }

    #[test]
    fn test_unencodable_payload_fails() {
        assert!(render_code128("货号", 100, 40).is_err());
    }

    #[test]
    fn test_knock_out_threshold() {
        let mut img = RgbaImage::from_pixel(3, 1, WHITE);
        img.put_pixel(1, 0, image::Rgba([250, 255, 255, 255]));
        img.put_pixel(2, 0, image::Rgba([251, 251, 251, 255]));
        knock_out_white(&mut img, WHITE_THRESHOLD);
        assert_eq!(img.get_pixel(0, 0)[3], 0);
        assert_eq!(img.get_pixel(1, 0)[3], 255);
        assert_eq!(img.get_pixel(2, 0)[3], 0);
    }
}
