//! Minimal text-only design.
//!
//! Grey flaps, a white front with the SKU, product name and box count, and a
//! light-grey side with the SKU. Laid out on a 3x3 grid (columns `l, w, l`;
//! rows `w/2, h, w/2`); the four cells no panel uses are named fillers.

use image::{Rgba, RgbaImage};

use super::common::{draw_centered_x, fit_or_warn, ratio_size};
use super::{PanelSet, Style, StyleEntry};
use crate::assets::{AssetSource, FontFile, Resources};
use crate::compose::RenderWarning;
use crate::config::{BoxConfig, Param};
use crate::error::BoxmarkError;
use crate::layout::{Layout, PanelMapping};
use crate::raster::{BLACK, WHITE, solid};
use crate::text::{Anchor, FitBounds};

pub const NAME: &str = "simple";
pub const DESCRIPTION: &str = "Minimal text-only carton: SKU, product name and box count";
pub const PARAMS: &[Param] = &[Param::Product, Param::BoxNumber];

pub const ENTRY: StyleEntry = StyleEntry::new(NAME, DESCRIPTION, PARAMS, build);

fn build(assets: &dyn AssetSource) -> Result<Box<dyn Style>, BoxmarkError> {
    Ok(Box::new(Simple::load(assets)?))
}

const FONTS: &[FontFile] = &[
    FontFile::new("calibri_bold", "calibri_bold.ttf"),
    FontFile::new("itc_demi", "itc_avant_garde_demi.ttf"),
];

const FLAP_GREY: Rgba<u8> = Rgba([200, 200, 200, 255]);
const SIDE_GREY: Rgba<u8> = Rgba([240, 240, 240, 255]);

pub struct Simple {
    res: Resources,
}

impl Simple {
    pub fn load(assets: &dyn AssetSource) -> Result<Self, BoxmarkError> {
        Ok(Self {
            res: Resources::load(assets, NAME, &[], FONTS)?,
        })
    }

    /// Largest size up to `ratio` of the panel height that fits 90% of its width.
    fn capped_size(
        &self,
        face_key: &str,
        text: &str,
        panel_w: u32,
        panel_h: u32,
        ratio: f64,
        warnings: &mut Vec<RenderWarning>,
    ) -> Result<f32, BoxmarkError> {
        let face = self.res.font(face_key)?;
        let cap = ratio_size(panel_h, ratio) as u32;
        let bounds = FitBounds::width((panel_w as f64 * 0.9) as u32).with_range(cap.min(10), cap);
        Ok(fit_or_warn(face, text, bounds, "front", warnings).size_f32())
    }

    fn front_panel(&self, cfg: &BoxConfig, warnings: &mut Vec<RenderWarning>) -> Result<RgbaImage, BoxmarkError> {
        let (w, h) = (cfg.l_px(), cfg.h_px());
        let mut img = solid(w, h, WHITE);
        let calibri = self.res.font("calibri_bold")?;
        let demi = self.res.font("itc_demi")?;
        let cx = w as i32 / 2;

        let sku = cfg.sku_name();
        let sku_size = self.capped_size("calibri_bold", sku, w, h, 0.15, warnings)?;
        draw_centered_x(&mut img, calibri, sku, sku_size, cx, h as i32 / 3, BLACK);

        let product = cfg.product()?;
        let product_size = self.capped_size("itc_demi", product, w, h, 0.08, warnings)?;
        draw_centered_x(&mut img, demi, product, product_size, cx, h as i32 * 2 / 3, BLACK);

        let n = cfg.box_number()?;
        let count = format!("Box {}/{}", n.current_box, n.total_boxes);
        let count_size = ratio_size(h, 0.05);
        let count_w = calibri.measure(&count, count_size).width() as i32;
        calibri.draw(
            &mut img,
            w as i32 - count_w - cfg.cm(2.0),
            h as i32 - cfg.cm(3.0),
            &count,
            count_size,
            BLACK,
            Anchor::LeftTop,
        );
        Ok(img)
    }

    fn side_panel(&self, cfg: &BoxConfig) -> Result<RgbaImage, BoxmarkError> {
        let (w, h) = (cfg.w_px(), cfg.h_px());
        let mut img = solid(w, h, SIDE_GREY);
        let calibri = self.res.font("calibri_bold")?;
        let sku = cfg.sku_name();
        calibri.draw(
            &mut img,
            w as i32 / 2,
            h as i32 / 2,
            sku,
            ratio_size(h, 0.1),
            BLACK,
            Anchor::Middle,
        );
        Ok(img)
    }
}

impl Style for Simple {
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
        let (l, w, h, f) = (
            cfg.l_px() as i32,
            cfg.w_px() as i32,
            cfg.h_px() as i32,
            cfg.half_w_px() as i32,
        );
        Layout::new()
            .region("top_flap", 0, 0, l, f)
            .region("top_side_filler", l, 0, w, f)
            .region("top_back_filler", l + w, 0, l, f)
            .region("main_front", 0, f, l, h)
            .region("main_side", l, f, w, h)
            .region("back_panel", l + w, f, l, h)
            .region("bottom_flap", 0, f + h, l, f)
            .region("bottom_side_filler", l, f + h, w, f)
            .region("bottom_back_filler", l + w, f + h, l, f)
    }

    fn panel_mapping(&self, _cfg: &BoxConfig) -> PanelMapping {
        PanelMapping::new()
            .map("top_flap", "top")
            .map("main_front", "front")
            .map("main_side", "side")
            .map("back_panel", "front")
            .map("bottom_flap", "bottom")
    }

    fn generate_panels(&self, cfg: &BoxConfig) -> Result<PanelSet, BoxmarkError> {
        let mut warnings = Vec::new();
        let mut set = PanelSet::new();
        set.insert("top", solid(cfg.l_px(), cfg.half_w_px(), FLAP_GREY));
        set.insert("bottom", solid(cfg.l_px(), cfg.half_w_px(), FLAP_GREY));
        set.insert("front", self.front_panel(cfg, &mut warnings)?);
        set.insert("side", self.side_panel(cfg)?);
        set.extend_warnings(warnings);
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::DraftSource;
    use crate::config::{BoxNumber, BoxSpec};

    fn cfg() -> BoxConfig {
        let mut spec = BoxSpec::new("S-100", 50.0, 30.0, 40.0);
        spec.ppi = 72;
        spec.attrs.product = Some("Stool".into());
        spec.attrs.box_number = Some(BoxNumber { current_box: 1, total_boxes: 1 });
        BoxConfig::from_spec(spec).unwrap()
    }

    #[test]
    fn test_grid_tiles_with_fillers() {
        let cfg = cfg();
        let style = Simple::load(&DraftSource).unwrap();
        let layout = style.layout(&cfg);
        assert_eq!(layout.len(), 9);
        assert!(layout.is_tiling());
        let mapping = style.panel_mapping(&cfg);
        assert_eq!(mapping.panel_for("top_side_filler"), None);
        assert_eq!(mapping.panel_for("back_panel"), Some("front"));
    }

    #[test]
    fn test_panel_colours() {
        let cfg = cfg();
        let panels = Simple::load(&DraftSource).unwrap().generate_panels(&cfg).unwrap();
        assert_eq!(*panels.get("top").unwrap().get_pixel(0, 0), FLAP_GREY);
        assert_eq!(*panels.get("front").unwrap().get_pixel(0, 0), WHITE);
        assert_eq!(*panels.get("side").unwrap().get_pixel(0, 0), SIDE_GREY);
    }

    #[test]
    fn test_front_draws_text() {
        let cfg = cfg();
        let panels = Simple::load(&DraftSource).unwrap().generate_panels(&cfg).unwrap();
        let front = panels.get("front").unwrap();
        assert!(front.pixels().any(|p| *p == BLACK));
    }

    #[test]
    fn test_missing_product() {
        let mut spec = BoxSpec::new("S-100", 50.0, 30.0, 40.0);
        spec.attrs.box_number = Some(BoxNumber { current_box: 1, total_boxes: 1 });
        let cfg = BoxConfig::from_spec(spec).unwrap();
        let err = Simple::load(&DraftSource).unwrap().generate_panels(&cfg);
        assert!(matches!(err, Err(BoxmarkError::MissingParam("product"))));
    }
}
