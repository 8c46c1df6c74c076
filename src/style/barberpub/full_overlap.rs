//! Full-overlap carton.
//!
//! Four-panel wrap whose flaps are a full box width deep. The printed flap
//! switches layout on box width: above [`STACKED_MIN_CM`] the notice, logo,
//! SKU, rule and info row stack vertically; otherwise the logo takes a left
//! column and the text block the right. The diagonally opposite flap is the
//! same artwork turned 180 degrees so it reads upright from the other side.

use image::RgbaImage;

use super::{
    BarcodePair, BarcodeSlot, BoxTag, FONTS, FrontGeometry, InfoRow, PARAMS, SloganSize,
    draw_barcode_pair, draw_front, draw_info_row, frac_px,
};
use crate::assets::{AssetSource, Artwork, Resources};
use crate::compose::RenderWarning;
use crate::config::{BoxConfig, Param};
use crate::error::BoxmarkError;
use crate::layout::{Layout, PanelMapping};
use crate::raster::{BLACK, Turn, dashed_hline, fill_box, paste, rotate, scale_to_height, scale_to_width};
use crate::style::common::{
    FLAP_BTM_FRONT1, FLAP_BTM_FRONT2, FLAP_BTM_SIDE1, FLAP_BTM_SIDE2, FLAP_TOP_FRONT1,
    FLAP_TOP_FRONT2, FLAP_TOP_SIDE1, FLAP_TOP_SIDE2, PANEL_FRONT1, PANEL_FRONT2, PANEL_SIDE1,
    PANEL_SIDE2, blank, draw_centered_x, fit_or_warn, ratio_size, wrap_layout,
};
use crate::style::{PanelSet, Style, StyleEntry};
use crate::text::{Anchor, FitBounds};

pub const NAME: &str = "barberpub_fulloverlap";
pub const DESCRIPTION: &str = "Barberpub full-overlap carton: printed flaps, rotated side label";

pub const ENTRY: StyleEntry = StyleEntry::new(NAME, DESCRIPTION, PARAMS, build);

fn build(assets: &dyn AssetSource) -> Result<Box<dyn Style>, BoxmarkError> {
    Ok(Box::new(FullOverlap::load(assets)?))
}

const ARTWORK: &[Artwork] = &[
    Artwork::new("logo", "front_logo.png", (1200, 400)),
    Artwork::new("attention", "opening_notice.png", (2000, 260)),
    Artwork::new("company", "company.png", (900, 200)),
    Artwork::new("website", "website.png", (1600, 220)),
    Artwork::new("side_label", "side_label_narrow.png", (1200, 800)),
    Artwork::new("slogan", "slogan.png", (1400, 120)),
];

pub(crate) const FRONT: FrontGeometry = FrontGeometry {
    logo_h: 0.11,
    company_h: 0.048,
    margin_top_cm: 3.0,
    margin_left_cm: 3.0,
    margin_right_cm: 2.7,
    product_w: 0.78,
    product_h: 0.28,
    slogan: SloganSize::Width(0.38),
    slogan_gap_cm: 2.0,
    headline_center: 0.48,
    stripe_cm: 1.6,
    stripe_bottom_cm: 1.2,
    sku_w: 0.715,
    sku_bottom_cm: 5.0,
    sku_lift_cm: 1.4,
    sku_shift_cm: 0.6,
    color_in_parens: false,
    box_tag: BoxTag::Badge {
        height: 0.048,
        width: Some(0.155),
        pad_cm: (0.5, 0.9),
        radius: 16,
    },
};

/// Boxes wider than this get the stacked flap layout.
pub const STACKED_MIN_CM: f64 = 30.0;

/// Dashed rule under the flap SKU.
const DASH_PX: i32 = 20;
const DASH_GAP_PX: i32 = 15;
const DASH_WIDTH_PX: i32 = 3;

/// Flap arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlapLayout {
    Stacked,
    TwoColumn,
}

impl FlapLayout {
    pub fn for_config(cfg: &BoxConfig) -> Self {
        if cfg.width_cm() > STACKED_MIN_CM {
            FlapLayout::Stacked
        } else {
            FlapLayout::TwoColumn
        }
    }
}

pub struct FullOverlap {
    res: Resources,
}

impl FullOverlap {
    pub fn load(assets: &dyn AssetSource) -> Result<Self, BoxmarkError> {
        Ok(Self {
            res: Resources::load(assets, NAME, ARTWORK, FONTS)?,
        })
    }

    /// Opening notice across the top; returns its bottom edge.
    fn draw_notice(&self, img: &mut RgbaImage) -> Result<i32, BoxmarkError> {
        let w = img.width();
        let notice = scale_to_width(self.res.image("attention")?, frac_px(w, 0.95));
        let y = notice.height() as i32 / 2;
        paste(img, &notice, ((w - notice.width()) / 2) as i64, y as i64);
        Ok(y + notice.height() as i32)
    }

    /// SKU at `(x, y)` with a dashed rule `rule_gap` below it. Returns the rule's y.
    #[allow(clippy::too_many_arguments)]
    fn draw_sku_with_rule(
        &self,
        cfg: &BoxConfig,
        img: &mut RgbaImage,
        max_w: u32,
        max_h: u32,
        place: impl Fn(u32, u32) -> (i32, i32),
        rule_gap: i32,
        warnings: &mut Vec<RenderWarning>,
    ) -> Result<(i32, i32), BoxmarkError> {
        let serif = self.res.font("serif")?;
        let sku = cfg.sku_name();
        let fit = fit_or_warn(serif, sku, FitBounds::boxed(max_w, max_h.max(1)), "flap", warnings);
        let sku_w = serif.advance(sku, fit.size_f32()) as i32;
        let (x, y) = place(sku_w as u32, fit.height);
        serif.draw(img, x, y, sku, fit.size_f32(), BLACK, Anchor::LeftTop);
        let rule_y = y + fit.height as i32 + rule_gap;
        dashed_hline(img, x, x + sku_w, rule_y, DASH_PX, DASH_GAP_PX, DASH_WIDTH_PX, BLACK);
        Ok((x, rule_y))
    }

    /// Printed flap, upright for the first front.
    pub fn flap_panel(&self, cfg: &BoxConfig, warnings: &mut Vec<RenderWarning>) -> Result<RgbaImage, BoxmarkError> {
        let (w, h) = (cfg.l_px(), cfg.w_px());
        let (wi, hi) = (w as i32, h as i32);
        let mut img = blank(cfg, w, h);
        let serif = self.res.font("serif")?;
        let notice_bottom = self.draw_notice(&mut img)?;
        let margin_bottom = (h as f64 * 0.10) as i32;

        match FlapLayout::for_config(cfg) {
            FlapLayout::Stacked => {
                let logo = scale_to_height(self.res.image("logo")?, frac_px(h, 0.16));
                let logo_y = notice_bottom + cfg.cm(3.0);
                paste(&mut img, &logo, ((w - logo.width().min(w)) / 2) as i64, logo_y as i64);
                let logo_bottom = logo_y + logo.height() as i32;

                let label_size = ratio_size(w, 0.030);
                let value_size = ratio_size(w, 0.025);
                let info_h = margin_bottom + label_size as i32 + cfg.cm(0.5);
                let available = (hi - logo_bottom - info_h - cfg.cm(4.0)).max(1);
                self.draw_sku_with_rule(
                    cfg,
                    &mut img,
                    frac_px(w, 0.90),
                    (available as f64 * 0.6) as u32,
                    |sku_w, sku_h| {
                        let x = (wi - sku_w as i32) / 2;
                        let y = logo_bottom + ((available - sku_h as i32) as f64 * 0.35) as i32;
                        (x, y)
                    },
                    (h as f64 * 0.10) as i32,
                    warnings,
                )?;

                let row = InfoRow {
                    y: hi - margin_bottom - label_size as i32,
                    weight_x: (w as f64 * 0.09) as i32,
                    size_x: (w as f64 * 0.54) as i32,
                    label_size,
                    value_size,
                    pad: (cfg.cm(0.7), cfg.cm(0.6)),
                    gap: cfg.cm(1.8),
                };
                draw_info_row(&mut img, serif, cfg, &row)?;
            }
            FlapLayout::TwoColumn => {
                let content_top = notice_bottom + cfg.cm(1.5);
                let left_w = (w as f64 * 0.25) as i32;
                let right_w = (w as f64 * 0.75) as i32;
                let available = (hi - content_top).max(1);

                let logo = scale_to_height(self.res.image("logo")?, frac_px(available as u32, 0.40));
                let logo_x = (left_w - logo.width() as i32) / 2;
                let logo_y = content_top + (available - logo.height() as i32) / 2;
                paste(&mut img, &logo, logo_x as i64, logo_y as i64);

                let label_size = ratio_size(w, 0.022);
                let value_size = ratio_size(w, 0.018);
                let info_h = margin_bottom + label_size as i32 + cfg.cm(0.3);
                let (sku_x, rule_y) = self.draw_sku_with_rule(
                    cfg,
                    &mut img,
                    frac_px(right_w.max(1) as u32, 0.90),
                    ((available - info_h).max(1) as f64 * 0.45) as u32,
                    |sku_w, _| {
                        let x = left_w + ((right_w - sku_w as i32) as f64 * 0.35) as i32;
                        (x, content_top + (available as f64 * 0.10) as i32)
                    },
                    (h as f64 * 0.12) as i32,
                    warnings,
                )?;

                let row = InfoRow {
                    y: rule_y + (h as f64 * 0.07) as i32,
                    weight_x: sku_x + (right_w as f64 * 0.07) as i32,
                    size_x: left_w + (right_w as f64 * 0.52) as i32,
                    label_size,
                    value_size,
                    pad: (cfg.cm(0.5), cfg.cm(0.8)),
                    gap: cfg.cm(0.8),
                };
                draw_info_row(&mut img, serif, cfg, &row)?;
            }
        }
        Ok(img)
    }

    fn front_panel(&self, cfg: &BoxConfig, warnings: &mut Vec<RenderWarning>) -> Result<RgbaImage, BoxmarkError> {
        let mut img = blank(cfg, cfg.l_px(), cfg.h_px());
        draw_front(&self.res, cfg, &mut img, &FRONT, "front", warnings)?;
        Ok(img)
    }

    /// Drawn landscape (`h x w`) then turned a quarter counter-clockwise.
    ///
    /// SKU on top; website strip and barcode label side by side below it,
    /// the whole group centred slightly low.
    fn side_panel(&self, cfg: &BoxConfig, warnings: &mut Vec<RenderWarning>) -> Result<RgbaImage, BoxmarkError> {
        let (w, h) = (cfg.h_px(), cfg.w_px());
        let mut img = blank(cfg, w, h);
        let serif = self.res.font("serif")?;

        let sku = cfg.sku_name();
        let fit = fit_or_warn(
            serif,
            sku,
            FitBounds::boxed(frac_px(w, 0.92), frac_px(h, 0.55)),
            "side",
            warnings,
        );
        let web = scale_to_width(self.res.image("website")?, frac_px(w, 0.57));
        let mut label = scale_to_width(self.res.image("side_label")?, frac_px(w, 0.28));
        self.fill_label(cfg, &mut label, warnings)?;

        let gap = ((h as f64 * 0.22) as i32).max(cfg.cm(7.0));
        let icons_h = web.height().max(label.height()) as i32;
        let total = fit.height as i32 + gap + icons_h;
        let sku_y = ((h as f64 * 1.1 - total as f64) / 2.0) as i32;
        let sku_w = serif.advance(sku, fit.size_f32()) as i32;
        serif.draw(&mut img, (w as i32 - sku_w) / 2, sku_y, sku, fit.size_f32(), BLACK, Anchor::LeftTop);

        let margin = cfg.cm(3.0);
        let web_y = sku_y + fit.height as i32 + gap;
        paste(&mut img, &web, margin as i64, web_y as i64);
        let label_x = w as i32 - label.width() as i32 - margin;
        let label_y = web_y + (web.height() as i32 - label.height() as i32) / 2;
        paste(&mut img, &label, label_x as i64, label_y as i64);

        Ok(rotate(&img, Turn::Ccw))
    }

    /// Barcode pair on top, origin band along the bottom edge.
    fn fill_label(&self, cfg: &BoxConfig, label: &mut RgbaImage, warnings: &mut Vec<RenderWarning>) -> Result<(), BoxmarkError> {
        let (lw, lh) = label.dimensions();
        let serif = self.res.font("serif")?;
        let sn_w = frac_px(lw, 0.36);
        let pair = BarcodePair {
            y: (lh as f64 * 0.04) as i32,
            height: frac_px(lh, 0.28),
            sku: BarcodeSlot {
                x: (lw as f64 * 0.05) as i32,
                width: frac_px(lw, 0.533),
            },
            sn: BarcodeSlot {
                x: lw as i32 - sn_w as i32 - (lw as f64 * 0.04) as i32,
                width: sn_w,
            },
            caption_size: ratio_size(lh, 0.04),
            caption_gap: (lh as f64 * 0.002) as i32,
        };
        draw_barcode_pair(label, serif, cfg, &pair, warnings)?;

        let band_h = frac_px(lh, 0.12) as i32;
        let band_y = lh as i32 - band_h;
        fill_box(label, 0, band_y, lw as i32, lh as i32, BLACK);
        draw_centered_x(
            label,
            serif,
            cfg.origin_text(),
            ratio_size(band_h as u32, 0.5),
            lw as i32 / 2,
            band_y + (band_h as f64 * 0.20) as i32,
            cfg.background(),
        );
        Ok(())
    }
}

impl Style for FullOverlap {
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
        wrap_layout(cfg, cfg.w_px())
    }

    fn panel_mapping(&self, _cfg: &BoxConfig) -> PanelMapping {
        PanelMapping::new()
            .map(FLAP_TOP_FRONT1, "left_up")
            .map(FLAP_TOP_SIDE1, "blank")
            .map(FLAP_TOP_FRONT2, "right_up")
            .map(FLAP_TOP_SIDE2, "blank")
            .map(PANEL_FRONT1, "front")
            .map(PANEL_SIDE1, "side")
            .map(PANEL_FRONT2, "front")
            .map(PANEL_SIDE2, "side")
            .map(FLAP_BTM_FRONT1, "left_down")
            .map(FLAP_BTM_SIDE1, "blank")
            .map(FLAP_BTM_FRONT2, "right_down")
            .map(FLAP_BTM_SIDE2, "blank")
    }

    fn generate_panels(&self, cfg: &BoxConfig) -> Result<PanelSet, BoxmarkError> {
        let mut warnings = Vec::new();
        let flap = self.flap_panel(cfg, &mut warnings)?;
        let mut set = PanelSet::new();
        set.insert("right_down", rotate(&flap, Turn::Half));
        set.insert("left_up", flap);
        set.insert("left_down", blank(cfg, cfg.l_px(), cfg.w_px()));
        set.insert("right_up", blank(cfg, cfg.l_px(), cfg.w_px()));
        set.insert("front", self.front_panel(cfg, &mut warnings)?);
        set.insert("side", self.side_panel(cfg, &mut warnings)?);
        set.insert("blank", blank(cfg, cfg.w_px(), cfg.w_px()));
        set.extend_warnings(warnings);
        Ok(set)
    }
}
