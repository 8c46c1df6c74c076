//! # Box Configuration
//!
//! [`BoxConfig`] is the validated, read-only description of one carton that
//! every renderer consumes. It is built once per request from a [`BoxSpec`];
//! all pixel extents are derived at construction and never recomputed.
//!
//! ## Derived values
//!
//! | Field | Formula |
//! |-------|---------|
//! | `dpi` | `ppi / 2.54` (pixels per cm) |
//! | `l_px`, `w_px`, `h_px` | `round(dim_cm * dpi)` |
//! | `half_w_px` | `w_px / 2` (integer division) |
//! | `base_bar_px` | `round(base_bar_cm * dpi)` |
//! | `l_in`, `w_in`, `h_in` | `dim_cm / 2.54` |
//!
//! ## Style attributes
//!
//! Styles read typed attributes through accessors returning
//! `Result<_, BoxmarkError::MissingParam>`. Upstream validation uses
//! [`BoxConfig::check_required`] with the style's [`Param`] list so a request
//! missing several attributes is rejected with all of them named at once.

mod job;

pub use job::{BoxNumber, BoxSpec, ColorMode, Job, LabelAttrs, SideText};

use image::Rgba;
use serde::Serialize;

use crate::error::BoxmarkError;
use crate::units;

/// Default kraft-board background.
pub const KRAFT: [u8; 3] = [161, 142, 102];

/// Default origin line on side labels.
pub const DEFAULT_ORIGIN: &str = "MADE IN CHINA";

/// Style attributes a style may declare as required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Param {
    Color,
    Product,
    Size,
    SideText,
    BoxNumber,
    SpongeVerified,
}

impl Param {
    pub fn as_str(&self) -> &'static str {
        match self {
            Param::Color => "color",
            Param::Product => "product",
            Param::Size => "size",
            Param::SideText => "side_text",
            Param::BoxNumber => "box_number",
            Param::SpongeVerified => "sponge_verified",
        }
    }

    /// Every attribute the configuration can carry.
    pub fn all() -> &'static [Param] {
        &[
            Param::Color,
            Param::Product,
            Param::Size,
            Param::SideText,
            Param::BoxNumber,
            Param::SpongeVerified,
        ]
    }
}

impl std::fmt::Display for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated carton configuration.
#[derive(Debug, Clone)]
pub struct BoxConfig {
    sku_name: String,
    length_cm: f64,
    width_cm: f64,
    height_cm: f64,
    ppi: u32,
    dpi: f64,
    l_px: u32,
    w_px: u32,
    h_px: u32,
    half_w_px: u32,
    base_bar_px: u32,
    background: [u8; 3],
    color_mode: ColorMode,
    attrs: LabelAttrs,
}

impl BoxConfig {
    /// Validate a spec and derive pixel extents.
    ///
    /// Rejects non-positive or non-finite dimensions, zero PPI, an empty SKU,
    /// a box number outside `1..=total`, and dimensions that round to zero
    /// pixels.
    pub fn from_spec(spec: BoxSpec) -> Result<Self, BoxmarkError> {
        if spec.ppi == 0 {
            return Err(BoxmarkError::InvalidConfig("ppi must be positive".into()));
        }
        for (name, value) in [
            ("length_cm", spec.length_cm),
            ("width_cm", spec.width_cm),
            ("height_cm", spec.height_cm),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(BoxmarkError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if !spec.base_bar_cm.is_finite() || spec.base_bar_cm < 0.0 {
            return Err(BoxmarkError::InvalidConfig(format!(
                "base_bar_cm must not be negative, got {}",
                spec.base_bar_cm
            )));
        }
        if spec.sku_name.trim().is_empty() {
            return Err(BoxmarkError::InvalidConfig("sku_name must not be empty".into()));
        }
        if let Some(bn) = spec.attrs.box_number
            && (bn.total_boxes == 0 || bn.current_box == 0 || bn.current_box > bn.total_boxes)
        {
            return Err(BoxmarkError::InvalidConfig(format!(
                "box number {} of {} is out of range",
                bn.current_box, bn.total_boxes
            )));
        }

        let dpi = units::dpi(spec.ppi);
        let l_px = units::cm_to_px(spec.length_cm, dpi);
        let w_px = units::cm_to_px(spec.width_cm, dpi);
        let h_px = units::cm_to_px(spec.height_cm, dpi);
        if l_px < 2 || w_px < 2 || h_px < 2 {
            return Err(BoxmarkError::InvalidConfig(format!(
                "box is too small at {} ppi ({}x{}x{} px)",
                spec.ppi, l_px, w_px, h_px
            )));
        }
        let base_bar_px = units::cm_to_px(spec.base_bar_cm, dpi);

        log::debug!(
            "config {}: {}x{}x{} cm -> {}x{}x{} px at {} ppi",
            spec.sku_name,
            spec.length_cm,
            spec.width_cm,
            spec.height_cm,
            l_px,
            w_px,
            h_px,
            spec.ppi
        );

        Ok(Self {
            sku_name: spec.sku_name.trim().to_string(),
            length_cm: spec.length_cm,
            width_cm: spec.width_cm,
            height_cm: spec.height_cm,
            ppi: spec.ppi,
            dpi,
            l_px: l_px as u32,
            w_px: w_px as u32,
            h_px: h_px as u32,
            half_w_px: w_px as u32 / 2,
            base_bar_px: base_bar_px as u32,
            background: spec.background_color,
            color_mode: spec.color_mode,
            attrs: spec.attrs,
        })
    }

    /// Fail with every attribute in `params` that this configuration lacks.
    pub fn check_required(&self, style: &str, params: &[Param]) -> Result<(), BoxmarkError> {
        let missing: Vec<&str> = params
            .iter()
            .filter(|p| !self.has(**p))
            .map(|p| p.as_str())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(BoxmarkError::MissingParams {
                style: style.to_string(),
                params: missing.join(", "),
            })
        }
    }

    /// Whether an attribute was supplied.
    pub fn has(&self, param: Param) -> bool {
        match param {
            Param::Color => self.attrs.color.is_some(),
            Param::Product => self.attrs.product.is_some(),
            Param::Size => self.attrs.size.is_some(),
            Param::SideText => self.attrs.side_text.is_some(),
            Param::BoxNumber => self.attrs.box_number.is_some(),
            Param::SpongeVerified => true,
        }
    }

    /// Convert centimeters to pixels at this configuration's resolution.
    #[inline]
    pub fn cm(&self, value_cm: f64) -> i32 {
        units::cm_to_px(value_cm, self.dpi)
    }

    pub fn sku_name(&self) -> &str {
        &self.sku_name
    }

    pub fn length_cm(&self) -> f64 {
        self.length_cm
    }

    pub fn width_cm(&self) -> f64 {
        self.width_cm
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    pub fn length_in(&self) -> f64 {
        units::cm_to_in(self.length_cm)
    }

    pub fn width_in(&self) -> f64 {
        units::cm_to_in(self.width_cm)
    }

    pub fn height_in(&self) -> f64 {
        units::cm_to_in(self.height_cm)
    }

    pub fn ppi(&self) -> u32 {
        self.ppi
    }

    /// Pixels per centimeter.
    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    pub fn l_px(&self) -> u32 {
        self.l_px
    }

    pub fn w_px(&self) -> u32 {
        self.w_px
    }

    pub fn h_px(&self) -> u32 {
        self.h_px
    }

    pub fn half_w_px(&self) -> u32 {
        self.half_w_px
    }

    pub fn base_bar_px(&self) -> u32 {
        self.base_bar_px
    }

    pub fn background(&self) -> Rgba<u8> {
        let [r, g, b] = self.background;
        Rgba([r, g, b, 255])
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    pub fn attrs(&self) -> &LabelAttrs {
        &self.attrs
    }

    pub fn color(&self) -> Result<&str, BoxmarkError> {
        self.attrs.color.as_deref().ok_or(BoxmarkError::MissingParam("color"))
    }

    pub fn product(&self) -> Result<&str, BoxmarkError> {
        self.attrs.product.as_deref().ok_or(BoxmarkError::MissingParam("product"))
    }

    pub fn size(&self) -> Result<&str, BoxmarkError> {
        self.attrs.size.as_deref().ok_or(BoxmarkError::MissingParam("size"))
    }

    pub fn side_text(&self) -> Result<&SideText, BoxmarkError> {
        self.attrs.side_text.as_ref().ok_or(BoxmarkError::MissingParam("side_text"))
    }

    pub fn box_number(&self) -> Result<BoxNumber, BoxmarkError> {
        self.attrs.box_number.ok_or(BoxmarkError::MissingParam("box_number"))
    }

    pub fn sponge_verified(&self) -> bool {
        self.attrs.sponge_verified
    }

    /// Origin line from the side text, or [`DEFAULT_ORIGIN`].
    pub fn origin_text(&self) -> &str {
        self.attrs
            .side_text
            .as_ref()
            .and_then(|s| s.origin_text.as_deref())
            .unwrap_or(DEFAULT_ORIGIN)
    }

    /// `L" x W" x H"` with one decimal, from the cm dimensions.
    pub fn inch_dimensions(&self, marker: &str) -> String {
        format!(
            "{:.1}{m} x {:.1}{m} x {:.1}{m}",
            self.length_in(),
            self.width_in(),
            self.height_in(),
            m = marker
        )
    }

    /// Box size line for side labels, honouring an explicit override.
    pub fn dimension_text(&self) -> String {
        match self.attrs.side_text.as_ref().and_then(|s| s.dimension_text.clone()) {
            Some(text) => text,
            None => format!("BOX SIZE: {}", self.inch_dimensions("''")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scenario_spec() -> BoxSpec {
        let mut spec = BoxSpec::new("CA-6160-OE678BR-1", 77.0, 67.5, 47.0);
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
            sponge_verified: true,
        };
        spec
    }

    #[test]
    fn test_derived_pixels() {
        let cfg = BoxConfig::from_spec(scenario_spec()).unwrap();
        assert_eq!(cfg.l_px(), 4547);
        assert_eq!(cfg.w_px(), 3986);
        assert_eq!(cfg.h_px(), 2776);
        assert_eq!(cfg.half_w_px(), 1993);
        assert_eq!(cfg.base_bar_px(), 591);
        assert_eq!(cfg.cm(1.0), 59);
        assert!((cfg.length_in() - 30.314_960_629_921_26).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        for (l, w, h) in [(0.0, 1.0, 1.0), (1.0, -2.0, 1.0), (1.0, 1.0, f64::NAN)] {
            let err = BoxConfig::from_spec(BoxSpec::new("A", l, w, h));
            assert!(matches!(err, Err(BoxmarkError::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_rejects_empty_sku_and_zero_ppi() {
        assert!(BoxConfig::from_spec(BoxSpec::new("   ", 10.0, 10.0, 10.0)).is_err());
        let mut spec = BoxSpec::new("A", 10.0, 10.0, 10.0);
        spec.ppi = 0;
        assert!(BoxConfig::from_spec(spec).is_err());
    }

    #[test]
    fn test_rejects_box_number_out_of_range() {
        let mut spec = scenario_spec();
        spec.attrs.box_number = Some(BoxNumber { current_box: 4, total_boxes: 3 });
        assert!(BoxConfig::from_spec(spec).is_err());
    }

    #[test]
    fn test_check_required_lists_all_missing() {
        let cfg = BoxConfig::from_spec(BoxSpec::new("A-1", 30.0, 20.0, 10.0)).unwrap();
        match cfg.check_required("demo", &[Param::Color, Param::Product, Param::SpongeVerified]) {
            Err(BoxmarkError::MissingParams { style, params }) => {
                assert_eq!(style, "demo");
                assert_eq!(params, "color, product");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(cfg.color(), Err(BoxmarkError::MissingParam("color"))));
    }

    #[test]
    fn test_check_required_passes_when_supplied() {
        let cfg = BoxConfig::from_spec(scenario_spec()).unwrap();
        assert!(cfg.check_required("demo", Param::all()).is_ok());
    }

    #[test]
    fn test_text_helpers() {
        let cfg = BoxConfig::from_spec(scenario_spec()).unwrap();
        assert_eq!(cfg.origin_text(), "MADE IN CHINA");
        assert_eq!(cfg.dimension_text(), "BOX SIZE: 30.3'' x 26.6'' x 18.5''");
        assert_eq!(cfg.inch_dimensions("\""), "30.3\" x 26.6\" x 18.5\"");
    }

    #[test]
    fn test_background_default_kraft() {
        let cfg = BoxConfig::from_spec(BoxSpec::new("A-1", 30.0, 20.0, 10.0)).unwrap();
        assert_eq!(cfg.background(), Rgba([161, 142, 102, 255]));
    }
}
