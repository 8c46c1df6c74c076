//! Telescope (top-and-bottom lid) carton.
//!
//! The lid's die-line is a cross around the top panel:
//!
//! ```text
//!          +--------+
//!          |  back  |          h
//! +--------+--------+--------+
//! |  left  |  top   | right  |  w
//! +--------+--------+--------+
//!          | front  |          h
//!          +--------+
//!     h        l        h
//! ```
//!
//! The four corner squares are off-cuts. They are named regions without a
//! panel so the layout still tiles its bounding box.

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
use crate::raster::{BLACK, Turn, paste, rotate, scale_to_height, scale_to_width};
use crate::style::common::{blank, fit_or_warn, ratio_size};
use crate::style::{PanelSet, Style, StyleEntry};
use crate::text::{Anchor, FitBounds};

pub const NAME: &str = "barberpub_topandbottom";
pub const DESCRIPTION: &str = "Barberpub telescope lid: cross-shaped top with four printed walls";

pub const ENTRY: StyleEntry = StyleEntry::new(NAME, DESCRIPTION, PARAMS, build);

fn build(assets: &dyn AssetSource) -> Result<Box<dyn Style>, BoxmarkError> {
    Ok(Box::new(TopAndBottom::load(assets)?))
}

pub const BACK_SIDE: &str = "back_side_panel";
pub const LEFT_SIDE: &str = "left_side_panel";
pub const TOP: &str = "top_panel";
pub const RIGHT_SIDE: &str = "right_side_panel";
pub const FRONT_SIDE: &str = "front_side_panel";
pub const CORNERS: [&str; 4] = ["corner_top_left", "corner_top_right", "corner_bottom_left", "corner_bottom_right"];

const ARTWORK: &[Artwork] = &[
    Artwork::new("logo", "front_logo.png", (1200, 400)),
    Artwork::new("company", "company.png", (900, 200)),
    Artwork::new("website", "website.png", (1600, 220)),
    Artwork::new("side_label", "side_label.png", (1400, 700)),
    Artwork::new("slogan", "slogan.png", (1400, 120)),
    Artwork::new("box_info", "box_info.png", (900, 420)),
];

pub(crate) const TOP_GEOMETRY: FrontGeometry = FrontGeometry {
    logo_h: 0.16,
    company_h: 0.06,
    margin_top_cm: 2.0,
    margin_left_cm: 3.0,
    margin_right_cm: 3.0,
    product_w: 0.65,
    product_h: 0.20,
    slogan: SloganSize::Height(0.05),
    slogan_gap_cm: 1.0,
    headline_center: 0.45,
    stripe_cm: 1.5,
    stripe_bottom_cm: 1.0,
    sku_w: 0.52,
    sku_bottom_cm: 3.5,
    sku_lift_cm: 1.8,
    sku_shift_cm: 0.0,
    color_in_parens: true,
    box_tag: BoxTag::Artwork {
        height: 0.10,
        lift_cm: 0.5,
    },
};

pub struct TopAndBottom {
    res: Resources,
}

impl TopAndBottom {
    pub fn load(assets: &dyn AssetSource) -> Result<Self, BoxmarkError> {
        Ok(Self {
            res: Resources::load(assets, NAME, ARTWORK, FONTS)?,
        })
    }

    /// Front wall; the back wall is the same artwork turned 180 degrees.
    fn front_and_back(&self, cfg: &BoxConfig, warnings: &mut Vec<RenderWarning>) -> Result<(RgbaImage, RgbaImage), BoxmarkError> {
        let (w, h) = (cfg.l_px(), cfg.h_px());
        let mut img = blank(cfg, w, h);
        let serif = self.res.font("serif")?;

        let margin_top = cfg.cm(2.5);
        let logo_h = frac_px(h, 0.26);
        let logo = scale_to_height(self.res.image("logo")?, logo_h);
        paste(&mut img, &logo, (w as i64 - logo.width() as i64) / 2, margin_top as i64);

        let sku = cfg.sku_name();
        let fit = fit_or_warn(serif, sku, FitBounds::width(frac_px(w, 0.85)), "front_side", warnings);
        let sku_w = serif.advance(sku, fit.size_f32()) as i32;
        let sku_y = margin_top + logo_h as i32 + cfg.cm(1.0);
        serif.draw(&mut img, (w as i32 - sku_w) / 2, sku_y, sku, fit.size_f32(), BLACK, Anchor::LeftTop);

        let label_size = ratio_size(h, 0.07);
        let row = InfoRow {
            y: h as i32 - cfg.cm(2.4) - label_size as i32,
            weight_x: cfg.cm(10.0),
            size_x: w as i32 / 2 + cfg.cm(2.5),
            label_size,
            value_size: ratio_size(h, 0.06),
            pad: (cfg.cm(0.7), cfg.cm(0.6)),
            gap: cfg.cm(1.8),
        };
        draw_info_row(&mut img, serif, cfg, &row)?;

        let back = rotate(&img, Turn::Half);
        Ok((img, back))
    }

    /// Drawn landscape (`w x h`) and turned a quarter each way for the two ends.
    fn left_and_right(&self, cfg: &BoxConfig, warnings: &mut Vec<RenderWarning>) -> Result<(RgbaImage, RgbaImage), BoxmarkError> {
        let (w, h) = (cfg.w_px(), cfg.h_px());
        let mut img = blank(cfg, w, h);
        let serif = self.res.font("serif")?;

        let sku = cfg.sku_name();
        let fit = fit_or_warn(
            serif,
            sku,
            FitBounds::boxed(frac_px(w, 0.9), frac_px(h, 0.55)),
            "end",
            warnings,
        );
        let sku_w = serif.advance(sku, fit.size_f32()) as i32;
        let sku_y = (h as f64 * 0.37) as i32 - fit.height as i32 / 2;
        serif.draw(&mut img, (w as i32 - sku_w) / 2, sku_y, sku, fit.size_f32(), BLACK, Anchor::LeftTop);

        let web = scale_to_width(self.res.image("website")?, frac_px(w, 0.53));
        let mut label = scale_to_height(self.res.image("side_label")?, frac_px(h, 0.22));
        self.fill_label(cfg, &mut label, warnings)?;

        let margin_side = cfg.cm(3.0);
        let margin_bottom = cfg.cm(5.5);
        let web_y = h as i32 - margin_bottom - web.height() as i32 - (label.height() as f64 * 0.4) as i32;
        paste(&mut img, &web, margin_side as i64, web_y as i64);
        let label_x = w as i32 - label.width() as i32 - margin_side;
        let label_y = h as i32 - label.height() as i32 - margin_bottom;
        paste(&mut img, &label, label_x as i64, label_y as i64);

        Ok((rotate(&img, Turn::Cw), rotate(&img, Turn::Ccw)))
    }

    /// Barcodes in the top 35% of the label; the shipping marks below are artwork.
    fn fill_label(&self, cfg: &BoxConfig, label: &mut RgbaImage, warnings: &mut Vec<RenderWarning>) -> Result<(), BoxmarkError> {
        let (lw, lh) = label.dimensions();
        let zone = frac_px(lh, 0.35);
        let pair = BarcodePair {
            y: (zone as f64 * 0.10) as i32,
            height: frac_px(zone, 0.89),
            sku: BarcodeSlot {
                x: (lw as f64 * 0.01) as i32,
                width: frac_px(lw, 0.52),
            },
            sn: BarcodeSlot {
                x: (lw as f64 * 0.56) as i32,
                width: frac_px(lw, 0.42),
            },
            caption_size: ratio_size(zone, 0.22),
            caption_gap: (zone as f64 * 0.01) as i32,
        };
        draw_barcode_pair(label, self.res.font("serif")?, cfg, &pair, warnings)
    }

    fn top_panel(&self, cfg: &BoxConfig, warnings: &mut Vec<RenderWarning>) -> Result<RgbaImage, BoxmarkError> {
        let mut img = blank(cfg, cfg.l_px(), cfg.w_px());
        draw_front(&self.res, cfg, &mut img, &TOP_GEOMETRY, "top", warnings)?;
        Ok(img)
    }
}

impl Style for TopAndBottom {
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
        let (l, w, h) = (cfg.l_px() as i32, cfg.w_px() as i32, cfg.h_px() as i32);
        let (x1, x2) = (h, h + l);
        let (y1, y2) = (h, h + w);
        Layout::new()
            .region(CORNERS[0], 0, 0, h, h)
            .region(BACK_SIDE, x1, 0, l, h)
            .region(CORNERS[1], x2, 0, h, h)
            .region(LEFT_SIDE, 0, y1, h, w)
            .region(TOP, x1, y1, l, w)
            .region(RIGHT_SIDE, x2, y1, h, w)
            .region(CORNERS[2], 0, y2, h, h)
            .region(FRONT_SIDE, x1, y2, l, h)
            .region(CORNERS[3], x2, y2, h, h)
    }

    fn panel_mapping(&self, _cfg: &BoxConfig) -> PanelMapping {
        PanelMapping::new()
            .map(BACK_SIDE, "back_side")
            .map(LEFT_SIDE, "left_side")
            .map(TOP, "top")
            .map(RIGHT_SIDE, "right_side")
            .map(FRONT_SIDE, "front_side")
    }

    fn generate_panels(&self, cfg: &BoxConfig) -> Result<PanelSet, BoxmarkError> {
        let mut warnings = Vec::new();
        let (front, back) = self.front_and_back(cfg, &mut warnings)?;
        let (left, right) = self.left_and_right(cfg, &mut warnings)?;
        let top = self.top_panel(cfg, &mut warnings)?;

        let mut set = PanelSet::new();
        set.insert("front_side", front);
        set.insert("back_side", back);
        set.insert("left_side", left);
        set.insert("right_side", right);
        set.insert("top", top);
        set.extend_warnings(warnings);
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::DraftSource;
    use crate::style::barberpub::testing::spec;
    use pretty_assertions::assert_eq;

    fn cfg() -> BoxConfig {
        BoxConfig::from_spec(spec(70.0, 45.0, 20.0)).unwrap()
    }

    #[test]
    fn test_cross_layout_tiles() {
        let cfg = cfg();
        let layout = TopAndBottom::load(&DraftSource).unwrap().layout(&cfg);
        assert!(layout.is_tiling());
        assert_eq!(
            layout.extent(),
            (2 * cfg.h_px() + cfg.l_px(), 2 * cfg.h_px() + cfg.w_px())
        );
        let top = layout.get(TOP).unwrap();
        assert_eq!((top.x, top.y), (cfg.h_px(), cfg.h_px()));
    }

    #[test]
    fn test_corners_unmapped() {
        let cfg = cfg();
        let mapping = TopAndBottom::load(&DraftSource).unwrap().panel_mapping(&cfg);
        assert_eq!(mapping.len(), 5);
        for corner in CORNERS {
            assert_eq!(mapping.panel_for(corner), None);
        }
    }

    #[test]
    fn test_end_walls_are_rotated() {
        let cfg = cfg();
        let panels = TopAndBottom::load(&DraftSource).unwrap().generate_panels(&cfg).unwrap();
        let left = panels.get("left_side").unwrap();
        let right = panels.get("right_side").unwrap();
        assert_eq!(left.dimensions(), (cfg.h_px(), cfg.w_px()));
        assert_eq!(right.dimensions(), (cfg.h_px(), cfg.w_px()));
        let (w, h) = left.dimensions();
        // opposite quarter turns are a half turn apart
        for (x, y) in [(0, 0), (w / 3, h / 2), (w - 1, h / 4)] {
            assert_eq!(left.get_pixel(x, y), right.get_pixel(w - 1 - x, h - 1 - y));
        }
    }

    #[test]
    fn test_back_is_half_turn_of_front() {
        let cfg = cfg();
        let panels = TopAndBottom::load(&DraftSource).unwrap().generate_panels(&cfg).unwrap();
        let front = panels.get("front_side").unwrap();
        let back = panels.get("back_side").unwrap();
        let (w, h) = front.dimensions();
        for (x, y) in [(w / 2, h / 4), (w / 3, h - 5), (1, 1)] {
            assert_eq!(front.get_pixel(x, y), back.get_pixel(w - 1 - x, h - 1 - y));
        }
    }
}
