//! # Barberpub
//!
//! Three carton families sharing one visual language: a logo and company
//! masthead, a fitted product headline over a slogan strip, a hazard-stripe
//! band, the colour and SKU in the lower left, and a box-count tag in the
//! lower right. Side labels carry an SKU and SN barcode pair.
//!
//! | Style | Module |
//! |-------|--------|
//! | `barberpub_topandbottom` | [`top_and_bottom`] |
//! | `barberpub_doubleopening` | [`double_opening`] |
//! | `barberpub_fulloverlap` | [`full_overlap`] |
//!
//! The per-family differences are pure geometry, captured by
//! [`FrontGeometry`] and friends.

pub mod double_opening;
pub mod full_overlap;
pub mod top_and_bottom;

use image::RgbaImage;

pub use double_opening::DoubleOpening;
pub use full_overlap::FullOverlap;
pub use top_and_bottom::TopAndBottom;

use super::common::{barcode_or_text, draw_centered_x, fit_or_warn, ratio_size};
use crate::assets::{FontFile, Resources};
use crate::compose::RenderWarning;
use crate::config::{BoxConfig, Param};
use crate::error::BoxmarkError;
use crate::ornament::{Stripes, draw_diagonal_stripes, text_badge};
use crate::raster::{BLACK, paste, scale_to_height, scale_to_width};
use crate::text::{Anchor, Face, FitBounds};

pub(crate) const PARAMS: &[Param] = &[Param::Color, Param::Product, Param::SideText, Param::BoxNumber];

pub(crate) const FONTS: &[FontFile] = &[
    FontFile::new("serif", "century_schoolbook.ttf"),
    FontFile::new("serif_bold_italic", "century_schoolbook_bold_italic.ttf"),
    FontFile::new("calibri_bold", "calibri_bold.ttf"),
];

/// Width of one hazard stripe.
const STRIPE_WIDTH_PX: i32 = 150;

/// How the slogan strip is scaled.
#[derive(Debug, Clone, Copy)]
pub(crate) enum SloganSize {
    Height(f64),
    Width(f64),
}

/// Box-count tag in the lower right of a front.
#[derive(Debug, Clone, Copy)]
pub(crate) enum BoxTag {
    /// `BOX n OF m` in a rounded black badge.
    Badge {
        /// Font size as a fraction of panel height.
        height: f64,
        /// When set, the size is fitted into `width x height` of the panel instead.
        width: Option<f64>,
        pad_cm: (f64, f64),
        radius: i32,
    },
    /// Tag artwork with the count in its dark band and the origin line below.
    Artwork { height: f64, lift_cm: f64 },
}

/// Front geometry; ratios are of the panel's own width or height.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FrontGeometry {
    pub logo_h: f64,
    pub company_h: f64,
    pub margin_top_cm: f64,
    pub margin_left_cm: f64,
    pub margin_right_cm: f64,
    pub product_w: f64,
    pub product_h: f64,
    pub slogan: SloganSize,
    pub slogan_gap_cm: f64,
    /// Vertical centre of the product and slogan group.
    pub headline_center: f64,
    pub stripe_cm: f64,
    pub stripe_bottom_cm: f64,
    pub sku_w: f64,
    pub sku_bottom_cm: f64,
    pub sku_lift_cm: f64,
    /// SKU sits this far left of the colour line.
    pub sku_shift_cm: f64,
    pub color_in_parens: bool,
    pub box_tag: BoxTag,
}

/// `BOX n OF m`.
pub(crate) fn box_text(cfg: &BoxConfig) -> Result<String, BoxmarkError> {
    let n = cfg.box_number()?;
    Ok(format!("BOX {} OF {}", n.current_box, n.total_boxes))
}

/// Draw the shared front design onto `img`.
pub(crate) fn draw_front(
    res: &Resources,
    cfg: &BoxConfig,
    img: &mut RgbaImage,
    geo: &FrontGeometry,
    panel: &'static str,
    warnings: &mut Vec<RenderWarning>,
) -> Result<(), BoxmarkError> {
    let (w, h) = (img.width(), img.height());
    let (wi, hi) = (w as i32, h as i32);
    let serif = res.font("serif")?;
    let display = res.font("serif_bold_italic")?;
    let margin_top = cfg.cm(geo.margin_top_cm);
    let margin_left = cfg.cm(geo.margin_left_cm);
    let margin_right = cfg.cm(geo.margin_right_cm);

    // Stripes first so nothing above them is covered
    draw_diagonal_stripes(
        img,
        &Stripes {
            height: cfg.cm(geo.stripe_cm),
            bottom_margin: cfg.cm(geo.stripe_bottom_cm),
            stripe_width: STRIPE_WIDTH_PX,
            stripe_color: BLACK,
            background: cfg.background(),
        },
    );

    // Masthead
    let logo = scale_to_height(res.image("logo")?, frac_px(h, geo.logo_h));
    paste(img, &logo, margin_left as i64, margin_top as i64);
    let company = scale_to_height(res.image("company")?, frac_px(h, geo.company_h));
    paste(
        img,
        &company,
        (wi - company.width() as i32 - margin_right) as i64,
        margin_top as i64,
    );

    // Product headline over the slogan
    let product = cfg.product()?;
    let fit = fit_or_warn(
        display,
        product,
        FitBounds::boxed(frac_px(w, geo.product_w), frac_px(h, geo.product_h)),
        panel,
        warnings,
    );
    let slogan = match geo.slogan {
        SloganSize::Height(r) => scale_to_height(res.image("slogan")?, frac_px(h, r)),
        SloganSize::Width(r) => scale_to_width(res.image("slogan")?, frac_px(w, r)),
    };
    let gap = cfg.cm(geo.slogan_gap_cm);
    let group_h = fit.height as i32 + gap + slogan.height() as i32;
    let product_y = (h as f64 * geo.headline_center) as i32 - group_h / 2;
    let product_w = display.advance(product, fit.size_f32()) as i32;
    display.draw(img, (wi - product_w) / 2, product_y, product, fit.size_f32(), BLACK, Anchor::LeftTop);
    paste(
        img,
        &slogan,
        ((wi - slogan.width() as i32) / 2) as i64,
        (product_y + fit.height as i32 + gap) as i64,
    );

    // Colour over SKU, lower left
    let sku = cfg.sku_name();
    let sku_fit = fit_or_warn(
        serif,
        sku,
        FitBounds::boxed(frac_px(w, geo.sku_w), frac_px(h, 0.14)),
        panel,
        warnings,
    );
    let sku_y = hi - cfg.cm(geo.sku_bottom_cm) - sku_fit.height as i32 - cfg.cm(geo.sku_lift_cm);
    serif.draw(
        img,
        margin_left - cfg.cm(geo.sku_shift_cm),
        sku_y,
        sku,
        sku_fit.size_f32(),
        BLACK,
        Anchor::LeftTop,
    );

    let color = cfg.color()?.to_uppercase();
    let color = if geo.color_in_parens { format!("({})", color) } else { color };
    let color_size = ratio_size(h, 0.06);
    let color_h = serif.measure(&color, color_size).height() as i32;
    serif.draw(
        img,
        margin_left,
        sku_y - color_h - cfg.cm(0.3),
        &color,
        color_size,
        BLACK,
        Anchor::LeftTop,
    );

    // Box tag, lower right
    match geo.box_tag {
        BoxTag::Badge { height, width, pad_cm, radius } => {
            let text = box_text(cfg)?;
            let size = match width {
                Some(wr) => fit_or_warn(
                    serif,
                    &text,
                    FitBounds::boxed(frac_px(w, wr), frac_px(h, height)),
                    panel,
                    warnings,
                )
                .size_f32(),
                None => ratio_size(h, height),
            };
            let m = serif.measure(&text, size);
            let x = wi - margin_right - m.width() as i32;
            let y = hi - cfg.cm(geo.sku_bottom_cm) - m.height() as i32 - cfg.cm(geo.sku_lift_cm);
            text_badge(
                img,
                serif,
                &text,
                size,
                x,
                y,
                (cfg.cm(pad_cm.0), cfg.cm(pad_cm.1)),
                radius,
                BLACK,
                cfg.background(),
            );
        }
        BoxTag::Artwork { height, lift_cm } => {
            let calibri = res.font("calibri_bold")?;
            let tag_h = frac_px(h, height);
            let tag = scale_to_height(res.image("box_info")?, tag_h);
            let tag_w = tag.width() as i32;
            let x = wi - tag_w - margin_right;
            let y = hi - cfg.cm(geo.sku_bottom_cm) - tag.height() as i32 - cfg.cm(lift_cm);
            paste(img, &tag, x as i64, y as i64);

            let text = box_text(cfg)?;
            let cx = x + tag_w / 2;
            draw_centered_x(
                img,
                serif,
                &text,
                ratio_size(tag_h, 0.40),
                cx,
                y + (tag_h as f64 * 0.12) as i32,
                cfg.background(),
            );
            draw_centered_x(
                img,
                calibri,
                cfg.origin_text(),
                ratio_size(tag_h, 0.22),
                cx,
                y + (tag_h as f64 * 0.68) as i32,
                BLACK,
            );
        }
    }
    Ok(())
}

/// Pixel length of `ratio` of `extent`, at least one pixel.
pub(crate) fn frac_px(extent: u32, ratio: f64) -> u32 {
    ((extent as f64 * ratio) as u32).max(1)
}

/// Weight and box-size badges on one row.
#[derive(Debug, Clone, Copy)]
pub(crate) struct InfoRow {
    /// Top of the badge text.
    pub y: i32,
    pub weight_x: i32,
    pub size_x: i32,
    pub label_size: f32,
    pub value_size: f32,
    pub pad: (i32, i32),
    /// Space between a badge's text and its value.
    pub gap: i32,
}

/// `G.W./N.W.` and `BOX SIZE` badges, each followed by its value.
pub(crate) fn draw_info_row(
    img: &mut RgbaImage,
    face: &Face,
    cfg: &BoxConfig,
    row: &InfoRow,
) -> Result<(), BoxmarkError> {
    let side = cfg.side_text()?;
    let value_dy = ((row.label_size - row.value_size) / 2.0) as i32;
    let entries = [
        (row.weight_x, "G.W./N.W.", format!("{} / {} LBS", side.gw_value, side.nw_value)),
        (row.size_x, "BOX SIZE", cfg.inch_dimensions("\"")),
    ];
    for (x, label, value) in entries {
        let label_w = face.measure(label, row.label_size).width() as i32;
        text_badge(
            img,
            face,
            label,
            row.label_size,
            x,
            row.y,
            row.pad,
            16,
            BLACK,
            cfg.background(),
        );
        face.draw(
            img,
            x + label_w + row.gap,
            row.y + value_dy,
            &value,
            row.value_size,
            BLACK,
            Anchor::LeftTop,
        );
    }
    Ok(())
}

/// Horizontal placement of one barcode.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BarcodeSlot {
    pub x: i32,
    pub width: u32,
}

/// SKU and SN barcodes side by side, each captioned with its payload.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BarcodePair {
    pub y: i32,
    pub height: u32,
    pub sku: BarcodeSlot,
    pub sn: BarcodeSlot,
    pub caption_size: f32,
    pub caption_gap: i32,
}

pub(crate) fn draw_barcode_pair(
    label: &mut RgbaImage,
    face: &Face,
    cfg: &BoxConfig,
    pair: &BarcodePair,
    warnings: &mut Vec<RenderWarning>,
) -> Result<(), BoxmarkError> {
    let side = cfg.side_text()?;
    for (payload, slot) in [(cfg.sku_name(), pair.sku), (side.sn_code.as_str(), pair.sn)] {
        barcode_or_text(label, face, payload, slot.x, pair.y, slot.width, pair.height, warnings);
        draw_centered_x(
            label,
            face,
            payload,
            pair.caption_size,
            slot.x + slot.width as i32 / 2,
            pair.y + pair.height as i32 + pair.caption_gap,
            BLACK,
        );
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::config::{BoxNumber, BoxSpec, LabelAttrs, SideText};

    /// A complete Barberpub job at low resolution.
    pub fn spec(l: f64, w: f64, h: f64) -> BoxSpec {
        let mut spec = BoxSpec::new("BP-CHAIR-001", l, w, h);
        spec.ppi = 60;
        spec.background_color = [255, 255, 255];
        spec.attrs = LabelAttrs {
            color: Some("Black".into()),
            product: Some("Barber Chair".into()),
            size: None,
            side_text: Some(SideText {
                gw_value: 88.0,
                nw_value: 80.5,
                sn_code: "6975462810215".into(),
                origin_text: Some("MADE IN CHINA".into()),
                dimension_text: None,
            }),
            box_number: Some(BoxNumber { current_box: 2, total_boxes: 2 }),
            sponge_verified: false,
        };
        spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::DraftSource;
    use crate::raster::solid;

    #[test]
    fn test_box_text() {
        let cfg = BoxConfig::from_spec(testing::spec(80.0, 50.0, 40.0)).unwrap();
        assert_eq!(box_text(&cfg).unwrap(), "BOX 2 OF 2");
    }

    #[test]
    fn test_frac_px_floor() {
        assert_eq!(frac_px(1000, 0.14), 140);
        assert_eq!(frac_px(3, 0.01), 1);
    }

    #[test]
    fn test_barcode_pair_draws_both() {
        let cfg = BoxConfig::from_spec(testing::spec(80.0, 50.0, 40.0)).unwrap();
        let mut label = solid(600, 200, crate::raster::WHITE);
        let mut warnings = Vec::new();
        let pair = BarcodePair {
            y: 10,
            height: 100,
            sku: BarcodeSlot { x: 10, width: 300 },
            sn: BarcodeSlot { x: 330, width: 250 },
            caption_size: 12.0,
            caption_gap: 2,
        };
        draw_barcode_pair(&mut label, &Face::builtin(), &cfg, &pair, &mut warnings).unwrap();
        assert!(warnings.is_empty());
        let dark_in = |x0: u32, x1: u32| (x0..x1).any(|x| label.get_pixel(x, 50)[0] < 50);
        assert!(dark_in(10, 310));
        assert!(dark_in(330, 580));
    }

    #[test]
    fn test_info_row_draws_badges() {
        let cfg = BoxConfig::from_spec(testing::spec(80.0, 50.0, 40.0)).unwrap();
        let mut img = solid(800, 100, cfg.background());
        let row = InfoRow {
            y: 30,
            weight_x: 20,
            size_x: 420,
            label_size: 24.0,
            value_size: 20.0,
            pad: (6, 6),
            gap: 10,
        };
        draw_info_row(&mut img, &Face::builtin(), &cfg, &row).unwrap();
        // badge background just left of the label text
        assert_eq!(*img.get_pixel(16, 40), BLACK);
        assert_eq!(*img.get_pixel(416, 40), BLACK);
    }

    #[test]
    fn test_front_needs_product() {
        let mut spec = testing::spec(80.0, 50.0, 40.0);
        spec.attrs.product = None;
        let cfg = BoxConfig::from_spec(spec).unwrap();
        let style = DoubleOpening::load(&DraftSource).unwrap();
        let mut img = solid(cfg.l_px(), cfg.h_px(), cfg.background());
        let err = draw_front(
            style.resources(),
            &cfg,
            &mut img,
            &double_opening::FRONT,
            "front",
            &mut Vec::new(),
        );
        assert!(matches!(err, Err(BoxmarkError::MissingParam("product"))));
    }
}
