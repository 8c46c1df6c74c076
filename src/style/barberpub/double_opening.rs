//! Double-opening regular slotted carton.
//!
//! Four-panel wrap with half-width flaps. The first front's top flap carries
//! the lid logo, the second front's top flap the opening notice; bottom and
//! side flaps stay blank. The side panel chooses a wide or narrow barcode
//! label by box width.

use image::RgbaImage;

use super::{
    BarcodePair, BarcodeSlot, BoxTag, FONTS, FrontGeometry, PARAMS, SloganSize, draw_barcode_pair,
    draw_front, frac_px,
};
use crate::assets::{AssetSource, Artwork, Resources};
use crate::compose::RenderWarning;
use crate::config::{BoxConfig, Param};
use crate::error::BoxmarkError;
use crate::layout::{Layout, PanelMapping};
use crate::raster::{paste, paste_centered, scale_to_fit, scale_to_width};
use crate::style::common::{
    FLAP_BTM_FRONT1, FLAP_BTM_FRONT2, FLAP_BTM_SIDE1, FLAP_BTM_SIDE2, FLAP_TOP_FRONT1,
    FLAP_TOP_FRONT2, FLAP_TOP_SIDE1, FLAP_TOP_SIDE2, PANEL_FRONT1, PANEL_FRONT2, PANEL_SIDE1,
    PANEL_SIDE2, blank, ratio_size, wrap_layout,
};
use crate::style::{PanelSet, Style, StyleEntry};

pub const NAME: &str = "barberpub_doubleopening";
pub const DESCRIPTION: &str = "Barberpub double-opening carton: logo, slogan, stripes, barcode side label";

pub const ENTRY: StyleEntry = StyleEntry::new(NAME, DESCRIPTION, PARAMS, build);

fn build(assets: &dyn AssetSource) -> Result<Box<dyn Style>, BoxmarkError> {
    Ok(Box::new(DoubleOpening::load(assets)?))
}

const ARTWORK: &[Artwork] = &[
    Artwork::new("logo", "front_logo.png", (1200, 400)),
    Artwork::new("top_logo", "lid_logo.png", (1600, 500)),
    Artwork::new("attention", "opening_notice.png", (2000, 420)),
    Artwork::new("company", "company.png", (900, 200)),
    Artwork::new("website", "website.png", (1600, 220)),
    Artwork::new("label_wide", "side_label_wide.png", (2000, 700)),
    Artwork::new("label_narrow", "side_label_narrow.png", (1200, 800)),
    Artwork::new("slogan", "slogan.png", (1400, 120)),
    Artwork::new("line_drawing", "line_drawing.png", (900, 900)),
];

pub(crate) const FRONT: FrontGeometry = FrontGeometry {
    logo_h: 0.14,
    company_h: 0.06,
    margin_top_cm: 3.0,
    margin_left_cm: 3.0,
    margin_right_cm: 2.7,
    product_w: 0.63,
    product_h: 0.28,
    slogan: SloganSize::Height(0.05),
    slogan_gap_cm: 1.3,
    headline_center: 0.48,
    stripe_cm: 1.2,
    stripe_bottom_cm: 0.6,
    sku_w: 0.715,
    sku_bottom_cm: 3.2,
    sku_lift_cm: 0.5,
    sku_shift_cm: 0.6,
    color_in_parens: false,
    box_tag: BoxTag::Badge {
        height: 0.038,
        width: None,
        pad_cm: (0.5, 0.7),
        radius: 12,
    },
};

/// Boxes at least this wide get the wide side label.
pub const WIDE_LABEL_MIN_CM: f64 = 40.0;

pub struct DoubleOpening {
    res: Resources,
}

impl DoubleOpening {
    pub fn load(assets: &dyn AssetSource) -> Result<Self, BoxmarkError> {
        Ok(Self {
            res: Resources::load(assets, NAME, ARTWORK, FONTS)?,
        })
    }

    #[cfg(test)]
    pub(crate) fn resources(&self) -> &Resources {
        &self.res
    }

    /// Upper flaps with centred artwork; the matching lower flaps are blank.
    fn flap(&self, cfg: &BoxConfig, key: &str, width_ratio: f64) -> Result<RgbaImage, BoxmarkError> {
        let mut img = blank(cfg, cfg.l_px(), cfg.half_w_px());
        let art = scale_to_width(self.res.image(key)?, frac_px(cfg.l_px(), width_ratio));
        paste_centered(&mut img, &art);
        Ok(img)
    }

    fn front_panel(&self, cfg: &BoxConfig, warnings: &mut Vec<RenderWarning>) -> Result<RgbaImage, BoxmarkError> {
        let mut img = blank(cfg, cfg.l_px(), cfg.h_px());
        draw_front(&self.res, cfg, &mut img, &FRONT, "front", warnings)?;
        Ok(img)
    }

    pub fn uses_wide_label(cfg: &BoxConfig) -> bool {
        cfg.width_cm() >= WIDE_LABEL_MIN_CM
    }

    /// Website strip on top, line drawing in the middle, barcode label at the bottom.
    fn side_panel(&self, cfg: &BoxConfig, warnings: &mut Vec<RenderWarning>) -> Result<RgbaImage, BoxmarkError> {
        let (w, h) = (cfg.w_px(), cfg.h_px());
        let mut img = blank(cfg, w, h);
        let margin = cfg.cm(3.0);

        let web = scale_to_width(self.res.image("website")?, frac_px(w, 0.5));
        paste(&mut img, &web, ((w - web.width()) / 2) as i64, margin as i64);

        let drawing = scale_to_fit(self.res.image("line_drawing")?, frac_px(w, 0.6), frac_px(h, 0.35));
        let drawing_y = (h as f64 * 0.42) as i32 - drawing.height() as i32 / 2;
        paste(&mut img, &drawing, ((w - drawing.width()) / 2) as i64, drawing_y as i64);

        let (key, width_ratio) = if Self::uses_wide_label(cfg) {
            ("label_wide", 0.8)
        } else {
            ("label_narrow", 0.6)
        };
        let mut label = scale_to_fit(self.res.image(key)?, frac_px(w, width_ratio), frac_px(h, 0.3));
        self.fill_label(cfg, &mut label, warnings)?;
        let label_y = h as i32 - margin - label.height() as i32;
        paste(&mut img, &label, ((w - label.width()) / 2) as i64, label_y as i64);
        Ok(img)
    }

    /// Barcodes across the top 35% of the label.
    fn fill_label(&self, cfg: &BoxConfig, label: &mut RgbaImage, warnings: &mut Vec<RenderWarning>) -> Result<(), BoxmarkError> {
        let (lw, lh) = label.dimensions();
        let zone = frac_px(lh, 0.35);
        let pair = BarcodePair {
            y: (zone as f64 * 0.10) as i32,
            height: frac_px(zone, 0.78),
            sku: BarcodeSlot {
                x: (lw as f64 * 0.01) as i32,
                width: frac_px(lw, 0.52),
            },
            sn: BarcodeSlot {
                x: (lw as f64 * 0.56) as i32,
                width: frac_px(lw, 0.42),
            },
            caption_size: ratio_size(zone, 0.2),
            caption_gap: 1,
        };
        draw_barcode_pair(label, self.res.font("serif")?, cfg, &pair, warnings)
    }
}

impl Style for DoubleOpening {
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
        let mut set = PanelSet::new();
        set.insert("left_up", self.flap(cfg, "top_logo", 0.55)?);
        set.insert("right_up", self.flap(cfg, "attention", 0.86)?);
        set.insert("left_down", blank(cfg, cfg.l_px(), cfg.half_w_px()));
        set.insert("right_down", blank(cfg, cfg.l_px(), cfg.half_w_px()));
        set.insert("front", self.front_panel(cfg, &mut warnings)?);
        set.insert("side", self.side_panel(cfg, &mut warnings)?);
        set.insert("blank", blank(cfg, cfg.w_px(), cfg.half_w_px()));
        set.extend_warnings(warnings);
        Ok(set)
    }
}
