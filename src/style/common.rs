//! Helpers shared by the panel renderers.

use image::{Rgba, RgbaImage};

use crate::barcode::render_code128;
use crate::compose::RenderWarning;
use crate::config::BoxConfig;
use crate::layout::Layout;
use crate::raster::{BLACK, paste, paste_centered, scale_to_height, solid};
use crate::text::{Anchor, Face, Fit, FitBounds, fit_text};

/// Region names of the four-panel wrap.
pub(crate) const FLAP_TOP_FRONT1: &str = "flap_top_front1";
pub(crate) const FLAP_TOP_SIDE1: &str = "flap_top_side1";
pub(crate) const FLAP_TOP_FRONT2: &str = "flap_top_front2";
pub(crate) const FLAP_TOP_SIDE2: &str = "flap_top_side2";
pub(crate) const PANEL_FRONT1: &str = "panel_front1";
pub(crate) const PANEL_SIDE1: &str = "panel_side1";
pub(crate) const PANEL_FRONT2: &str = "panel_front2";
pub(crate) const PANEL_SIDE2: &str = "panel_side2";
pub(crate) const FLAP_BTM_FRONT1: &str = "flap_btm_front1";
pub(crate) const FLAP_BTM_SIDE1: &str = "flap_btm_side1";
pub(crate) const FLAP_BTM_FRONT2: &str = "flap_btm_front2";
pub(crate) const FLAP_BTM_SIDE2: &str = "flap_btm_side2";

/// Four-panel wrap: columns `l, w, l, w`; rows `flap_h, h, flap_h`.
pub(crate) fn wrap_layout(cfg: &BoxConfig, flap_h: u32) -> Layout {
    let (l, w, h, f) = (
        cfg.l_px() as i32,
        cfg.w_px() as i32,
        cfg.h_px() as i32,
        flap_h as i32,
    );
    let (x1, x2, x3) = (l, l + w, 2 * l + w);
    let (y1, y2) = (f, f + h);
    Layout::new()
        .region(FLAP_TOP_FRONT1, 0, 0, l, f)
        .region(FLAP_TOP_SIDE1, x1, 0, w, f)
        .region(FLAP_TOP_FRONT2, x2, 0, l, f)
        .region(FLAP_TOP_SIDE2, x3, 0, w, f)
        .region(PANEL_FRONT1, 0, y1, l, h)
        .region(PANEL_SIDE1, x1, y1, w, h)
        .region(PANEL_FRONT2, x2, y1, l, h)
        .region(PANEL_SIDE2, x3, y1, w, h)
        .region(FLAP_BTM_FRONT1, 0, y2, l, f)
        .region(FLAP_BTM_SIDE1, x1, y2, w, f)
        .region(FLAP_BTM_FRONT2, x2, y2, l, f)
        .region(FLAP_BTM_SIDE2, x3, y2, w, f)
}

/// Panel canvas filled with the configured background.
pub(crate) fn blank(cfg: &BoxConfig, width: u32, height: u32) -> RgbaImage {
    solid(width, height, cfg.background())
}

/// Fit text and record an overflow warning when even the floor size is too wide.
pub(crate) fn fit_or_warn(
    face: &Face,
    text: &str,
    bounds: FitBounds,
    panel: &'static str,
    warnings: &mut Vec<RenderWarning>,
) -> Fit {
    let fit = fit_text(face, text, bounds);
    if !fit.fits {
        warnings.push(RenderWarning::TextOverflow {
            panel,
            text: text.to_string(),
            width: fit.width,
            max_width: bounds.max_width,
        });
    }
    fit
}

/// Percentage-of-extent font size.
pub(crate) fn ratio_size(extent: u32, ratio: f64) -> f32 {
    ((extent as f64 * ratio) as u32).max(1) as f32
}

/// Draw text with its advance centred on `cx` and its top at `y`.
pub(crate) fn draw_centered_x(
    img: &mut RgbaImage,
    face: &Face,
    text: &str,
    size: f32,
    cx: i32,
    y: i32,
    color: Rgba<u8>,
) {
    let x = cx - (face.advance(text, size) / 2.0) as i32;
    face.draw(img, x, y, text, size, color, Anchor::LeftTop);
}

/// Scale artwork to `height` and paste it centred on `img`.
pub(crate) fn paste_center_with_height(img: &mut RgbaImage, art: &RgbaImage, height: u32) {
    let scaled = scale_to_height(art, height);
    paste_centered(img, &scaled);
}

/// LeftTop draw origin that centres the ink box of `text` in the given box.
pub(crate) fn centred_ink_origin(
    face: &Face,
    text: &str,
    size: f32,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
) -> (i32, i32) {
    let ink = face.measure(text, size);
    (
        x + (width as i32 - ink.width() as i32) / 2 - ink.left,
        y + (height as i32 - ink.height() as i32) / 2 - ink.top,
    )
}

/// Paste a Code 128 symbol of `width` x `height` at `(x, y)`.
///
/// When the payload cannot be encoded, the payload text is fitted into the
/// same box instead and a warning is recorded.
#[allow(clippy::too_many_arguments)]
pub(crate) fn barcode_or_text(
    img: &mut RgbaImage,
    face: &Face,
    payload: &str,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    warnings: &mut Vec<RenderWarning>,
) {
    match render_code128(payload, width, height) {
        Ok(symbol) => paste(img, &symbol, x as i64, y as i64),
        Err(e) => {
            log::warn!("barcode '{}' failed: {}", payload, e);
            let fit = fit_text(face, payload, FitBounds::boxed(width, height));
            let (tx, ty) = centred_ink_origin(face, payload, fit.size_f32(), x, y, width, height);
            face.draw(img, tx, ty, payload, fit.size_f32(), BLACK, Anchor::LeftTop);
            warnings.push(RenderWarning::BarcodeFallback {
                payload: payload.to_string(),
                reason: e.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoxSpec;

    fn cfg() -> BoxConfig {
        let mut spec = BoxSpec::new("T-1", 60.0, 40.0, 30.0);
        spec.ppi = 72;
        BoxConfig::from_spec(spec).unwrap()
    }

    #[test]
    fn test_wrap_layout_tiles() {
        let cfg = cfg();
        let layout = wrap_layout(&cfg, cfg.half_w_px());
        assert_eq!(layout.len(), 12);
        assert!(layout.is_tiling());
        assert_eq!(
            layout.extent(),
            (2 * cfg.l_px() + 2 * cfg.w_px(), cfg.h_px() + 2 * cfg.half_w_px())
        );
    }

    #[test]
    fn test_barcode_fallback_records_warning() {
        let face = Face::builtin();
        let mut img = solid(400, 100, Rgba([255, 255, 255, 255]));
        let mut warnings = Vec::new();
        barcode_or_text(&mut img, &face, "编号", 0, 0, 400, 100, &mut warnings);
        assert_eq!(warnings.len(), 1);
        assert!(matches!(warnings[0], RenderWarning::BarcodeFallback { .. }));
    }

    #[test]
    fn test_fallback_caption_centred_on_ink() {
        let face = Face::builtin();
        let size = 20.0;
        let ink = face.measure("SN 42", size);
        let (tx, ty) = centred_ink_origin(&face, "SN 42", size, 100, 50, 400, 100);
        let left_gap = tx + ink.left - 100;
        let right_gap = 500 - (tx + ink.right);
        let top_gap = ty + ink.top - 50;
        let bottom_gap = 150 - (ty + ink.bottom);
        assert!((left_gap - right_gap).abs() <= 1, "{} vs {}", left_gap, right_gap);
        assert!((top_gap - bottom_gap).abs() <= 1, "{} vs {}", top_gap, bottom_gap);
    }

    #[test]
    fn test_centred_origin_subtracts_ink_offset() {
        let face = Face::builtin();
        let ink = face.measure("AB", 24.0);
        let (tx, _) = centred_ink_origin(&face, "AB", 24.0, 0, 0, 200, 40);
        assert_eq!(tx, (200 - ink.width() as i32) / 2 - ink.left);
    }

    #[test]
    fn test_barcode_draws_symbol() {
        let face = Face::builtin();
        let mut img = solid(400, 100, Rgba([255, 255, 255, 255]));
        let mut warnings = Vec::new();
        barcode_or_text(&mut img, &face, "SKU-1", 0, 0, 400, 100, &mut warnings);
        assert!(warnings.is_empty());
        assert!(img.pixels().any(|p| p[0] < 50));
    }

    #[test]
    fn test_fit_or_warn_overflow() {
        let mut warnings = Vec::new();
        let fit = fit_or_warn(&Face::builtin(), "WWWWWWWW", FitBounds::width(5), "front", &mut warnings);
        assert!(!fit.fits);
        assert!(matches!(warnings[0], RenderWarning::TextOverflow { panel: "front", .. }));
    }
}
