//! Serde records for generation requests.
//!
//! A job file is a flat JSON object: the style name plus every [`BoxSpec`]
//! field, with the style attributes inlined.
//!
//! ```json
//! {
//!   "style": "mcombo_standard",
//!   "sku_name": "CA-6160-OE678BR-1",
//!   "length_cm": 77, "width_cm": 67.5, "height_cm": 47,
//!   "ppi": 150,
//!   "color": "Beige",
//!   "product": "Lift Recliner",
//!   "size": "(Oversize)",
//!   "box_number": { "current_box": 1, "total_boxes": 3 },
//!   "side_text": { "gw_value": 106.9, "nw_value": 94.4, "sn_code": "08429381073953" },
//!   "sponge_verified": true
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::BoxmarkError;

fn default_ppi() -> u32 {
    150
}

fn default_base_bar_cm() -> f64 {
    10.0
}

fn default_background() -> [u8; 3] {
    super::KRAFT
}

/// Output colour handling for the export step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Embed the raster as DeviceRGB.
    #[default]
    Rgb,
    /// Embed the raster as DeviceCMYK.
    Cmyk,
}

/// Weight, dimension and traceability data printed on side panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideText {
    /// Gross weight in pounds.
    pub gw_value: f64,
    /// Net weight in pounds.
    pub nw_value: f64,
    /// Serial number, encoded as the second barcode.
    pub sn_code: String,
    /// Country-of-origin line. Defaults to `MADE IN CHINA`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_text: Option<String>,
    /// Pre-formatted box size line. Derived from the cm dimensions when absent.
    #[serde(default, alias = "dimention_text", skip_serializing_if = "Option::is_none")]
    pub dimension_text: Option<String>,
}

/// Position of this carton within a multi-carton shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxNumber {
    pub current_box: u32,
    pub total_boxes: u32,
}

/// Typed style attributes. Each style declares which of these it reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    /// Size annotation printed under the product name, e.g. `(Oversize)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side_text: Option<SideText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_number: Option<BoxNumber>,
    /// Whether the foam certification mark goes on the side panel.
    #[serde(default)]
    pub sponge_verified: bool,
}

/// Raw box description as supplied by the caller.
///
/// Validated and converted to pixels by [`super::BoxConfig::from_spec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSpec {
    /// Label text and barcode payload.
    pub sku_name: String,
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
    /// Print resolution in pixels per inch.
    #[serde(default = "default_ppi")]
    pub ppi: u32,
    /// Height of the tall section of the bottom base bar.
    #[serde(default = "default_base_bar_cm")]
    pub base_bar_cm: f64,
    /// Canvas and panel background.
    #[serde(default = "default_background")]
    pub background_color: [u8; 3],
    #[serde(default)]
    pub color_mode: ColorMode,
    #[serde(flatten)]
    pub attrs: LabelAttrs,
}

impl BoxSpec {
    /// A spec with default resolution, base bar and background, and no style attributes.
    pub fn new(sku_name: impl Into<String>, length_cm: f64, width_cm: f64, height_cm: f64) -> Self {
        Self {
            sku_name: sku_name.into(),
            length_cm,
            width_cm,
            height_cm,
            ppi: default_ppi(),
            base_bar_cm: default_base_bar_cm(),
            background_color: default_background(),
            color_mode: ColorMode::default(),
            attrs: LabelAttrs::default(),
        }
    }
}

/// A generation request: style selection plus the box spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Style name; the CLI may override it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(flatten)]
    pub spec: BoxSpec,
}

impl Job {
    pub fn from_json(json: &str) -> Result<Self, BoxmarkError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, BoxmarkError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
