//! # Composition Engine
//!
//! Turns one style and one configuration into a single die-line canvas.
//!
//! ## Algorithm
//!
//! 1. Ask the style for its region layout and compute the bounding extent
//! 2. Allocate a canvas of that extent filled with the background colour
//! 3. Ask the style for its panels and its region → panel mapping
//! 4. Paste each mapped panel at its region's top-left corner
//! 5. Optionally stroke every region outline for visual checks
//!
//! The engine never branches on style identity; adding a design needs only a
//! new [`Style`] implementation and a registry entry.
//!
//! A panel whose pixel size differs from its region is a defect in the style
//! and fails with [`BoxmarkError::PanelSize`]. Regions without a mapping keep
//! the background.

use image::imageops;
use image::RgbaImage;
use std::fmt;

use crate::config::BoxConfig;
use crate::error::BoxmarkError;
use crate::layout::Layout;
use crate::raster::{BLACK, outline_box, solid};
use crate::style::Style;

/// Stroke width of debug region outlines.
pub const DEBUG_BORDER_PX: i32 = 3;

/// A non-fatal rendering anomaly. The artwork is still produced.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderWarning {
    /// A base-bar section was narrowed to fit its panel.
    BaseBarClamped {
        panel: &'static str,
        requested_px: i32,
        clamped_px: i32,
    },
    /// A barcode could not be encoded; its payload was printed as text.
    BarcodeFallback { payload: String, reason: String },
    /// Text overflows its slot even at the minimum size.
    TextOverflow {
        panel: &'static str,
        text: String,
        width: u32,
        max_width: u32,
    },
    /// Requested artwork was unavailable; a substitute was used.
    ArtworkFallback { panel: &'static str, detail: String },
}

impl fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderWarning::BaseBarClamped {
                panel,
                requested_px,
                clamped_px,
            } => write!(
                f,
                "{}: base bar section clamped from {}px to {}px",
                panel, requested_px, clamped_px
            ),
            RenderWarning::BarcodeFallback { payload, reason } => {
                write!(f, "barcode for '{}' drawn as text ({})", payload, reason)
            }
            RenderWarning::TextOverflow {
                panel,
                text,
                width,
                max_width,
            } => write!(
                f,
                "{}: '{}' is {}px wide at minimum size, slot is {}px",
                panel, text, width, max_width
            ),
            RenderWarning::ArtworkFallback { panel, detail } => write!(f, "{}: {}", panel, detail),
        }
    }
}

/// Composition switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Stroke each region outline in black.
    pub debug_borders: bool,
}

/// Result of [`render`].
#[derive(Debug, Clone)]
pub struct Composition {
    pub canvas: RgbaImage,
    pub layout: Layout,
    pub warnings: Vec<RenderWarning>,
}

impl Composition {
    /// Canvas size in centimeters at `dpi` pixels per cm.
    pub fn size_cm(&self, dpi: f64) -> (f64, f64) {
        (self.canvas.width() as f64 / dpi, self.canvas.height() as f64 / dpi)
    }
}

/// Render every panel of `style` for `cfg` and composite them.
pub fn render(
    style: &dyn Style,
    cfg: &BoxConfig,
    options: &RenderOptions,
) -> Result<Composition, BoxmarkError> {
    cfg.check_required(style.name(), style.required_params())?;

    let layout = style.layout(cfg);
    let (width, height) = layout.extent();
    if width == 0 || height == 0 {
        return Err(BoxmarkError::InvalidConfig(format!(
            "style '{}' produced an empty layout",
            style.name()
        )));
    }
    log::debug!(
        "{}: {} regions, canvas {}x{}px",
        style.name(),
        layout.len(),
        width,
        height
    );

    let mut canvas = solid(width, height, cfg.background());
    let panels = style.generate_panels(cfg)?;
    let mapping = style.panel_mapping(cfg);

    for region in layout.iter() {
        let Some(key) = mapping.panel_for(region.name) else {
            continue;
        };
        let Some(panel) = panels.get(key) else {
            log::warn!("{}: region '{}' maps to missing panel '{}'", style.name(), region.name, key);
            continue;
        };
        if panel.dimensions() != (region.rect.width, region.rect.height) {
            return Err(BoxmarkError::PanelSize {
                panel: key.to_string(),
                region: region.name.to_string(),
                actual_w: panel.width(),
                actual_h: panel.height(),
                region_w: region.rect.width,
                region_h: region.rect.height,
            });
        }
        imageops::replace(&mut canvas, panel, region.rect.x as i64, region.rect.y as i64);
    }

    if options.debug_borders {
        for region in layout.iter() {
            let r = region.rect;
            outline_box(
                &mut canvas,
                r.x as i32,
                r.y as i32,
                r.right() as i32,
                r.bottom() as i32,
                DEBUG_BORDER_PX,
                BLACK,
            );
        }
    }

    let warnings = panels.into_warnings();
    for w in &warnings {
        log::warn!("{}", w);
    }
    Ok(Composition {
        canvas,
        layout,
        warnings,
    })
}
