//! # MCombo standard
//!
//! Regular slotted carton on the four-panel wrap with half-width flaps.
//!
//! ```text
//! +-----------+--------+-----------+--------+
//! | left_up   |        | right_up  |        |   flaps (w/2)
//! +-----------+--------+-----------+--------+
//! | front     | side   | front     | side   |   body (h)
//! +-----------+--------+-----------+--------+
//! | left_down |        | right_down|        |   flaps (w/2)
//! +-----------+--------+-----------+--------+
//!     l          w         l          w
//! ```
//!
//! The side flaps stay unprinted kraft.
//!
//! ## Front panel
//!
//! Trademark across the top third, product name with an ellipse underline
//! and size note centred in the free band, colour badge top right, and a
//! black base bar that steps up from a short left section (company
//! artwork, box number) to a tall right section carrying the fitted SKU.
//!
//! ## Side panel
//!
//! Mirror-image base bar (tall left, short right) whose tall section lines
//! up with the front's when the carton is folded; label box and logo at the
//! top; optional foam certificate and the info table with weights, box size
//! and two barcodes.

use image::RgbaImage;

use super::common::{
    FLAP_BTM_FRONT1, FLAP_BTM_FRONT2, FLAP_TOP_FRONT1, FLAP_TOP_FRONT2, PANEL_FRONT1,
    PANEL_FRONT2, PANEL_SIDE1, PANEL_SIDE2, barcode_or_text, blank, draw_centered_x, fit_or_warn,
    paste_center_with_height, ratio_size, wrap_layout,
};
use super::{PanelSet, Style, StyleEntry};
use crate::assets::{AssetSource, Artwork, FontFile, Resources};
use crate::compose::RenderWarning;
use crate::config::{BoxConfig, Param};
use crate::error::BoxmarkError;
use crate::layout::{Layout, PanelMapping};
use crate::ornament::{draw_smooth_ellipse, draw_stepped_bar, text_badge};
use crate::raster::{BLACK, Turn, paste, rotate, scale_to_height};
use crate::text::{Anchor, FitBounds};

pub const NAME: &str = "mcombo_standard";
pub const DESCRIPTION: &str = "MCombo standard carton: four-panel wrap, stepped base bar, barcode info table";
pub const PARAMS: &[Param] = &[
    Param::Color,
    Param::Product,
    Param::Size,
    Param::SideText,
    Param::BoxNumber,
    Param::SpongeVerified,
];

pub const ENTRY: StyleEntry = StyleEntry::new(NAME, DESCRIPTION, PARAMS, build);

fn build(assets: &dyn AssetSource) -> Result<Box<dyn Style>, BoxmarkError> {
    Ok(Box::new(McomboStandard::load(assets)?))
}

const ARTWORK: &[Artwork] = &[
    Artwork::new("left_2", "flap_left_2.png", (1400, 1000)),
    Artwork::new("left_3", "flap_left_3.png", (1400, 1000)),
    Artwork::new("right_2", "flap_right_2-1.png", (1300, 900)),
    Artwork::new("right_3", "flap_right_3-1.png", (1300, 900)),
    Artwork::new("trademark", "trademark.png", (1800, 900)),
    Artwork::new("company", "company.png", (1000, 190)),
    Artwork::new("box_number_1", "box_1.png", (800, 150)),
    Artwork::new("box_number_2", "box_2.png", (800, 150)),
    Artwork::new("box_number_3", "box_3.png", (800, 150)),
    Artwork::new("side_label_box", "side_label_box.png", (1100, 500)),
    Artwork::new("side_logo", "side_logo.png", (900, 500)),
    Artwork::new("side_text_box", "side_text_box.png", (2200, 800)),
    Artwork::new("side_sponge", "sponge.png", (600, 800)),
];

const FONTS: &[FontFile] = &[
    FontFile::new("calibri_bold", "calibri_bold.ttf"),
    FontFile::new("itc_demi", "itc_avant_garde_demi.ttf"),
];

/// Box-count artwork variants available for the flaps.
const FLAP_VARIANTS: &[u32] = &[2, 3];
/// Box-index artwork variants available for the front.
const BOX_NUMBER_VARIANTS: &[u32] = &[1, 2, 3];

/// Font sizes as fractions of the panel height.
const COLOR_RATIO: f64 = 51.0 / 1332.0;
const PRODUCT_RATIO: f64 = 180.0 / 1332.0;
const SIZE_RATIO: f64 = 60.0 / 1332.0;

/// Underline ellipse thickness in pixels.
const UNDERLINE_H: f64 = 7.0 / 0.74;

/// Centimeter geometry shared by both base-bar variants.
const COMPANY_H_CM: f64 = 1.6;
const TRANSITION_CM: f64 = 10.0;
const SKU_MAX_H_CM: f64 = 8.0;
const SKU_DROP_CM: f64 = 0.3;

pub struct McomboStandard {
    res: Resources,
}

impl McomboStandard {
    pub fn load(assets: &dyn AssetSource) -> Result<Self, BoxmarkError> {
        Ok(Self {
            res: Resources::load(assets, NAME, ARTWORK, FONTS)?,
        })
    }

    /// Nearest available variant, with a warning when it differs.
    fn variant(
        wanted: u32,
        available: &[u32],
        panel: &'static str,
        warnings: &mut Vec<RenderWarning>,
    ) -> u32 {
        if available.contains(&wanted) {
            return wanted;
        }
        let chosen = available
            .iter()
            .copied()
            .min_by_key(|v| v.abs_diff(wanted))
            .unwrap_or(wanted);
        warnings.push(RenderWarning::ArtworkFallback {
            panel,
            detail: format!("no artwork for {}, using {}", wanted, chosen),
        });
        chosen
    }

    fn flap_art(&self, side: &str, total: u32, warnings: &mut Vec<RenderWarning>) -> Result<&RgbaImage, BoxmarkError> {
        let v = Self::variant(total, FLAP_VARIANTS, "flap", warnings);
        self.res.image(&format!("{}_{}", side, v))
    }

    /// Box-count flap pair: upright and 180-degree copies, 10 cm tall.
    fn left_panels(&self, cfg: &BoxConfig, warnings: &mut Vec<RenderWarning>) -> Result<(RgbaImage, RgbaImage), BoxmarkError> {
        let art = self.flap_art("left", cfg.box_number()?.total_boxes, warnings)?;
        let h = cfg.cm(10.0).max(1) as u32;
        let mut up = blank(cfg, cfg.l_px(), cfg.half_w_px());
        let mut down = up.clone();
        paste_center_with_height(&mut up, art, h);
        paste_center_with_height(&mut down, &rotate(art, Turn::Half), h);
        Ok((up, down))
    }

    /// Box-index flap pair, 9 cm tall; the top copy is the rotated one.
    fn right_panels(&self, cfg: &BoxConfig, warnings: &mut Vec<RenderWarning>) -> Result<(RgbaImage, RgbaImage), BoxmarkError> {
        let art = self.flap_art("right", cfg.box_number()?.total_boxes, warnings)?;
        let h = cfg.cm(9.0).max(1) as u32;
        let mut up = blank(cfg, cfg.l_px(), cfg.half_w_px());
        let mut down = up.clone();
        paste_center_with_height(&mut up, &rotate(art, Turn::Half), h);
        paste_center_with_height(&mut down, art, h);
        Ok((up, down))
    }

    fn front_panel(&self, cfg: &BoxConfig, warnings: &mut Vec<RenderWarning>) -> Result<RgbaImage, BoxmarkError> {
        let (w, h) = (cfg.l_px(), cfg.h_px());
        let mut img = blank(cfg, w, h);
        let calibri = self.res.font("calibri_bold")?;
        let demi = self.res.font("itc_demi")?;

        // Trademark across the top third
        let trademark = scale_to_height(self.res.image("trademark")?, (h / 3).max(1));
        let trademark_h = trademark.height() as i32;
        paste(&mut img, &trademark, (w as i64 - trademark.width() as i64) / 2, 0);

        self.front_base_bar(cfg, &mut img, warnings)?;

        // Colour badge, top right
        let color = cfg.color()?;
        let color_size = ratio_size(h, COLOR_RATIO);
        let color_w = calibri.measure(color, color_size).width() as i32;
        text_badge(
            &mut img,
            calibri,
            color,
            color_size,
            w as i32 - color_w - cfg.cm(4.0),
            cfg.cm(4.0),
            (cfg.cm(0.8), cfg.cm(0.4)),
            16,
            BLACK,
            cfg.background(),
        );

        // Product name, underline, size note
        let product = cfg.product()?;
        let size_text = cfg.size()?;
        let base_product = ratio_size(h, PRODUCT_RATIO);
        let product_fit = fit_or_warn(
            demi,
            product,
            FitBounds::width((w as f64 * 0.9) as u32).with_range(10, base_product as u32),
            "front",
            warnings,
        );
        let product_size = product_fit.size_f32();
        let size_size = ratio_size(h, SIZE_RATIO);
        let product_w = demi.measure(product, product_size).width() as i32;
        let size_w = calibri.measure(size_text, size_size).width() as i32;

        let gap = cfg.cm(1.0);
        let line_w = (product_w as f64 * 0.85) as i32;
        let group_h = product_size as f64 + UNDERLINE_H + size_size as f64 + 2.0 * gap as f64;
        let free = h as i32 - trademark_h - cfg.base_bar_px() as i32;
        let top = trademark_h + ((free as f64 - group_h) / 2.0) as i32;

        let ascent = demi.ascent(product_size).round() as i32;
        demi.draw(
            &mut img,
            (w as i32 - product_w) / 2,
            top + ascent,
            product,
            product_size,
            BLACK,
            Anchor::LeftBaseline,
        );

        let line_top = top + product_size as i32 + gap;
        let line_x0 = (w as i32 - line_w) / 2;
        draw_smooth_ellipse(
            &mut img,
            line_x0,
            line_top,
            line_x0 + line_w,
            line_top + UNDERLINE_H.round() as i32,
            BLACK,
            4,
        );

        calibri.draw(
            &mut img,
            (w as i32 - size_w) / 2,
            line_top + gap + UNDERLINE_H as i32,
            size_text,
            size_size,
            BLACK,
            Anchor::LeftTop,
        );
        Ok(img)
    }

    /// Short-left / tall-right bar with company artwork, box number and SKU.
    fn front_base_bar(&self, cfg: &BoxConfig, img: &mut RgbaImage, warnings: &mut Vec<RenderWarning>) -> Result<(), BoxmarkError> {
        let (w, h) = (img.width() as i32, img.height() as i32);
        let tall = cfg.base_bar_px() as i32;
        let short = tall / 2;

        let company = scale_to_height(self.res.image("company")?, cfg.cm(COMPANY_H_CM).max(1) as u32);
        let company_w = company.width() as i32;
        let left_section = cfg.cm(1.0) + company_w + cfg.cm(4.0);
        draw_stepped_bar(img, short, tall, left_section - cfg.cm(TRANSITION_CM), left_section, BLACK);

        paste(img, &company, cfg.cm(1.0) as i64, (h - tall) as i64);

        let current = cfg.box_number()?.current_box;
        let variant = Self::variant(current, BOX_NUMBER_VARIANTS, "front", warnings);
        let box_art = scale_to_height(
            self.res.image(&format!("box_number_{}", variant))?,
            (tall / 4).max(1) as u32,
        );
        let box_y = h - short + (short - box_art.height() as i32) / 2;
        paste(img, &box_art, cfg.cm(1.0) as i64, box_y as i64);

        let area_left = cfg.cm(1.0) + company_w + cfg.cm(3.0);
        let area_right = w - cfg.cm(3.0);
        let max_w = (w - (cfg.cm(1.0) + company_w) - cfg.cm(3.0)).max(1) as u32;
        let max_h = cfg.cm(SKU_MAX_H_CM).max(1) as u32;
        self.draw_sku(
            cfg,
            img,
            max_w,
            max_h,
            (area_left + area_right) / 2,
            h - tall / 2 + cfg.cm(SKU_DROP_CM),
            "front",
            warnings,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_sku(
        &self,
        cfg: &BoxConfig,
        img: &mut RgbaImage,
        max_w: u32,
        max_h: u32,
        cx: i32,
        cy: i32,
        panel: &'static str,
        warnings: &mut Vec<RenderWarning>,
    ) -> Result<(), BoxmarkError> {
        let face = self.res.font("calibri_bold")?;
        let sku = cfg.sku_name();
        let fit = fit_or_warn(face, sku, FitBounds::height_guided(max_w, max_h), panel, warnings);
        face.draw(img, cx, cy, sku, fit.size_f32(), cfg.background(), Anchor::Middle);
        Ok(())
    }

    /// Top-left corner of the info table on the side panel.
    ///
    /// With the foam certificate the table moves right by the certificate's
    /// scaled width plus 0.6 cm.
    pub fn info_block_origin(&self, cfg: &BoxConfig) -> Result<(i32, i32), BoxmarkError> {
        let table_h = cfg.cm(8.0);
        let mut x = cfg.cm(4.0);
        let y = cfg.h_px() as i32 - cfg.base_bar_px() as i32 - cfg.cm(3.0) - table_h;
        if cfg.sponge_verified() {
            let sponge = scale_to_height(self.res.image("side_sponge")?, table_h.max(1) as u32);
            x += sponge.width() as i32 + cfg.cm(0.6);
        }
        Ok((x, y))
    }

    fn side_panel(&self, cfg: &BoxConfig, warnings: &mut Vec<RenderWarning>) -> Result<RgbaImage, BoxmarkError> {
        let (w, h) = (cfg.w_px(), cfg.h_px());
        let mut img = blank(cfg, w, h);

        self.side_base_bar(cfg, &mut img, warnings)?;

        let label = scale_to_height(self.res.image("side_label_box")?, cfg.cm(5.0).max(1) as u32);
        paste(&mut img, &label, cfg.cm(3.0) as i64, cfg.cm(4.0) as i64);

        let logo = scale_to_height(self.res.image("side_logo")?, cfg.cm(5.0).max(1) as u32);
        let logo_x = w as i32 - logo.width() as i32 - cfg.cm(4.0);
        paste(&mut img, &logo, logo_x as i64, cfg.cm(4.0) as i64);

        let table_h = cfg.cm(8.0).max(1) as u32;
        if cfg.sponge_verified() {
            let sponge = scale_to_height(self.res.image("side_sponge")?, table_h);
            let y = h as i32 - cfg.base_bar_px() as i32 - cfg.cm(3.0) - table_h as i32;
            paste(&mut img, &sponge, cfg.cm(4.0) as i64, y as i64);
        }
        let mut table = scale_to_height(self.res.image("side_text_box")?, table_h);
        self.fill_info_table(cfg, &mut table, warnings)?;
        let (tx, ty) = self.info_block_origin(cfg)?;
        paste(&mut img, &table, tx as i64, ty as i64);
        Ok(img)
    }

    /// Tall-left / short-right bar. The tall section spans what is left of
    /// the front's right section once the carton is folded.
    fn side_base_bar(&self, cfg: &BoxConfig, img: &mut RgbaImage, warnings: &mut Vec<RenderWarning>) -> Result<(), BoxmarkError> {
        let (w, h) = (img.width() as i32, img.height() as i32);
        let tall = cfg.base_bar_px() as i32;
        let short = tall / 2;

        let company = scale_to_height(self.res.image("company")?, cfg.cm(COMPANY_H_CM).max(1) as u32);
        let requested = cfg.l_px() as i32 - (cfg.cm(1.0) + company.width() as i32 + cfg.cm(4.0));
        let limit = (w - cfg.cm(TRANSITION_CM) - cfg.cm(4.0)).max(0);
        let left_section = requested.clamp(0, limit);
        if left_section != requested {
            log::warn!(
                "side base bar clamped to {:.1} cm",
                left_section as f64 / cfg.dpi()
            );
            warnings.push(RenderWarning::BaseBarClamped {
                panel: "side",
                requested_px: requested,
                clamped_px: left_section,
            });
        }
        let x_end = (left_section + cfg.cm(TRANSITION_CM)).min(w - cfg.cm(1.0));
        draw_stepped_bar(img, tall, short, left_section, x_end, BLACK);

        self.draw_sku(
            cfg,
            img,
            left_section.max(1) as u32,
            cfg.cm(SKU_MAX_H_CM).max(1) as u32,
            (cfg.cm(3.0) + left_section) / 2,
            h - tall / 2 + cfg.cm(SKU_DROP_CM),
            "side",
            warnings,
        )
    }

    /// Weights, box size, SKU and SN barcodes and origin line, placed by
    /// fractions of the table size.
    fn fill_info_table(&self, cfg: &BoxConfig, table: &mut RgbaImage, warnings: &mut Vec<RenderWarning>) -> Result<(), BoxmarkError> {
        let (tw, th) = (table.width() as f64, table.height());
        let label_face = self.res.font("itc_demi")?;
        let bold_face = self.res.font("calibri_bold")?;
        let label_size = ratio_size(th, 0.081);
        let bold_size = ratio_size(th, 0.095);
        let caption_size = ratio_size(th, 0.058);
        let th = th as f64;
        let side = cfg.side_text()?;

        let text_x = (tw * 0.651) as i32;
        let weight = format!("G.W./N.W.: {} / {} lbs", side.gw_value, side.nw_value);
        label_face.draw(table, text_x, (th * 0.044) as i32, &weight, label_size, BLACK, Anchor::LeftTop);
        label_face.draw(
            table,
            text_x,
            (th * 0.214) as i32,
            &cfg.dimension_text(),
            label_size,
            BLACK,
            Anchor::LeftTop,
        );

        let bar_y = (th * 0.42) as i32;
        let bar_h = (th * 0.35) as u32;
        let caption_y = (th * 0.76) as i32;
        for (payload, centre, width) in [
            (cfg.sku_name(), tw * 0.46, tw * 0.46),
            (side.sn_code.as_str(), tw * 0.847, tw * 0.28),
        ] {
            let x = (centre - width / 2.0) as i32;
            barcode_or_text(table, bold_face, payload, x, bar_y, width as u32, bar_h, warnings);
            draw_centered_x(table, bold_face, payload, caption_size, centre as i32, caption_y, BLACK);
        }

        bold_face.draw(
            table,
            (tw * 0.51) as i32,
            (th * 0.87) as i32,
            cfg.origin_text(),
            bold_size,
            BLACK,
            Anchor::LeftTop,
        );
        Ok(())
    }
}

impl Style for McomboStandard {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        DESCRIPTION
    }

    fn required_params(&self) -> &'static [Param] {
        PARAMS
    }

    fn layout(&self, cfg: &BoxConfig) -> Layout {
        wrap_layout(cfg, cfg.half_w_px())
    }

    fn panel_mapping(&self, _cfg: &BoxConfig) -> PanelMapping {
        PanelMapping::new()
            .map(FLAP_TOP_FRONT1, "left_up")
            .map(FLAP_TOP_FRONT2, "right_up")
            .map(PANEL_FRONT1, "front")
            .map(PANEL_SIDE1, "side")
            .map(PANEL_FRONT2, "front")
            .map(PANEL_SIDE2, "side")
            .map(FLAP_BTM_FRONT1, "left_down")
            .map(FLAP_BTM_FRONT2, "right_down")
    }

    fn generate_panels(&self, cfg: &BoxConfig) -> Result<PanelSet, BoxmarkError> {
        let mut warnings = Vec::new();
        let (left_up, left_down) = self.left_panels(cfg, &mut warnings)?;
        let (right_up, right_down) = self.right_panels(cfg, &mut warnings)?;
        let front = self.front_panel(cfg, &mut warnings)?;
        let side = self.side_panel(cfg, &mut warnings)?;

        let mut set = PanelSet::new();
        set.insert("left_up", left_up);
        set.insert("left_down", left_down);
        set.insert("right_up", right_up);
        set.insert("right_down", right_down);
        set.insert("front", front);
        set.insert("side", side);
        set.extend_warnings(warnings);
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::DraftSource;
    use crate::config::{BoxNumber, BoxSpec, LabelAttrs, SideText};

    fn spec(l: f64, w: f64, h: f64, sponge: bool) -> BoxSpec {
        let mut spec = BoxSpec::new("CA-6160-OE678BR-1", l, w, h);
        spec.ppi = 72;
        spec.attrs = LabelAttrs {
            color: Some("Beige".into()),
            product: Some("Lift Recliner".into()),
            size: Some("(Oversize)".into()),
            side_text: Some(SideText {
                gw_value: 106.9,
                nw_value: 94.4,
                sn_code: "08429381073953".into(),
                origin_text: None,
                dimension_text: None,
            }),
            box_number: Some(BoxNumber { current_box: 1, total_boxes: 3 }),
            sponge_verified: sponge,
        };
        spec
    }

    fn style() -> McomboStandard {
        McomboStandard::load(&DraftSource).unwrap()
    }

    #[test]
    fn test_panels_match_regions() {
        let cfg = BoxConfig::from_spec(spec(77.0, 67.5, 47.0, true)).unwrap();
        let style = style();
        let panels = style.generate_panels(&cfg).unwrap();
        let layout = style.layout(&cfg);
        for (region, key) in style.panel_mapping(&cfg).iter() {
            let rect = layout.get(region).unwrap();
            let panel = panels.get(key).unwrap();
            assert_eq!(panel.dimensions(), (rect.width, rect.height), "{} / {}", region, key);
        }
    }

    #[test]
    fn test_sponge_shifts_info_block() {
        let style = style();
        let with = BoxConfig::from_spec(spec(77.0, 67.5, 47.0, true)).unwrap();
        let without = BoxConfig::from_spec(spec(77.0, 67.5, 47.0, false)).unwrap();
        let (x_with, y_with) = style.info_block_origin(&with).unwrap();
        let (x_without, y_without) = style.info_block_origin(&without).unwrap();
        let sponge_w = scale_to_height(style.res.image("side_sponge").unwrap(), with.cm(8.0) as u32).width() as i32;
        assert_eq!(x_with - x_without, sponge_w + with.cm(0.6));
        assert_eq!(x_without, with.cm(4.0));
        assert_eq!(y_with, y_without);
    }

    /// First column at or after `from` on row `y` darker than the kraft background.
    fn first_dark_column(img: &RgbaImage, y: u32, from: u32) -> Option<u32> {
        (from..img.width()).find(|&x| img.get_pixel(x, y)[0] < 100)
    }

    #[test]
    fn test_sponge_moves_drawn_table() {
        let style = style();
        let plain = BoxConfig::from_spec(spec(77.0, 67.5, 47.0, false)).unwrap();
        let sponged = BoxConfig::from_spec(spec(77.0, 67.5, 47.0, true)).unwrap();
        let plain_side = style.generate_panels(&plain).unwrap().get("side").unwrap().clone();
        let sponged_side = style.generate_panels(&sponged).unwrap().get("side").unwrap().clone();

        let table_h = plain.cm(8.0).max(1) as u32;
        let sponge_w = scale_to_height(style.res.image("side_sponge").unwrap(), table_h).width();
        let (table_x, table_y) = style.info_block_origin(&plain).unwrap();
        // between the weight lines and the barcodes
        let row = table_y as u32 + table_h * 35 / 100;
        let left = plain.cm(4.0) as u32;

        // without the certificate the table frame is the first ink on the row
        assert_eq!(first_dark_column(&plain_side, row, 0), Some(table_x as u32));
        assert_eq!(table_x as u32, left);

        // with it, the certificate frame comes first and the table follows
        assert_eq!(first_dark_column(&sponged_side, row, 0), Some(left));
        let after_sponge = left + sponge_w + plain.cm(0.3) as u32;
        let moved = first_dark_column(&sponged_side, row, after_sponge).unwrap();
        assert_eq!(moved - table_x as u32, sponge_w + plain.cm(0.6) as u32);

        // right frame edge of the certificate only exists when it is drawn
        let sponge_edge = left + sponge_w - 1;
        assert!(sponged_side.get_pixel(sponge_edge, row)[0] < 100);
        assert!(plain_side.get_pixel(sponge_edge, row)[0] >= 100);
    }

    #[test]
    fn test_side_bar_clamps_for_long_front() {
        let cfg = BoxConfig::from_spec(spec(160.0, 30.0, 40.0, false)).unwrap();
        let panels = style().generate_panels(&cfg).unwrap();
        assert!(panels.warnings().iter().any(|w| matches!(
            w,
            RenderWarning::BaseBarClamped { panel: "side", .. }
        )));
    }

    #[test]
    fn test_no_clamp_for_wide_side() {
        let cfg = BoxConfig::from_spec(spec(40.0, 60.0, 40.0, true)).unwrap();
        let panels = style().generate_panels(&cfg).unwrap();
        assert!(!panels
            .warnings()
            .iter()
            .any(|w| matches!(w, RenderWarning::BaseBarClamped { .. })));
    }

    #[test]
    fn test_unknown_box_count_falls_back() {
        let mut s = spec(77.0, 67.5, 47.0, true);
        s.attrs.box_number = Some(BoxNumber { current_box: 5, total_boxes: 6 });
        let cfg = BoxConfig::from_spec(s).unwrap();
        let panels = style().generate_panels(&cfg).unwrap();
        let fallbacks = panels
            .warnings()
            .iter()
            .filter(|w| matches!(w, RenderWarning::ArtworkFallback { .. }))
            .count();
        // left flap, right flap, front box number
        assert_eq!(fallbacks, 3);
    }

    #[test]
    fn test_front_has_black_bar_at_bottom_right() {
        let cfg = BoxConfig::from_spec(spec(77.0, 67.5, 47.0, true)).unwrap();
        let panels = style().generate_panels(&cfg).unwrap();
        let front = panels.get("front").unwrap();
        let (w, h) = front.dimensions();
        assert_eq!(*front.get_pixel(w - 2, h - 2), BLACK);
        // above the tall section is background
        let above = h - cfg.base_bar_px() - 2;
        assert_eq!(*front.get_pixel(w - 2, above), cfg.background());
    }

    #[test]
    fn test_missing_attribute_is_error() {
        let mut s = spec(77.0, 67.5, 47.0, true);
        s.attrs.side_text = None;
        let cfg = BoxConfig::from_spec(s).unwrap();
        assert!(matches!(
            style().generate_panels(&cfg),
            Err(BoxmarkError::MissingParam("side_text"))
        ));
    }
}
