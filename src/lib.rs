//! # Boxmark - Carton Box-Mark Generator
//!
//! Boxmark produces print-ready artwork for the outside of corrugated
//! shipping cartons. Given a box's dimensions, its label attributes and a
//! style name it:
//!
//! - **Lays out** the flattened die-line as named pixel regions
//! - **Renders** one image per carton face (logos, fitted text, barcodes)
//! - **Composites** the faces into a single canvas
//! - **Exports** a single-page PDF at the box's physical size
//!
//! ## Quick Start
//!
//! ```
//! use boxmark::{
//!     assets::DraftSource,
//!     compose::{render, RenderOptions},
//!     config::{BoxConfig, BoxNumber, BoxSpec},
//!     export, style,
//! };
//!
//! let mut spec = BoxSpec::new("S-100", 50.0, 30.0, 40.0);
//! spec.ppi = 30;
//! spec.attrs.product = Some("Stool".into());
//! spec.attrs.box_number = Some(BoxNumber { current_box: 1, total_boxes: 1 });
//! let cfg = BoxConfig::from_spec(spec)?;
//!
//! let simple = style::registry().get("simple", &DraftSource)?;
//! let out = render(simple.as_ref(), &cfg, &RenderOptions::default())?;
//! let pdf = export::write_pdf(&out.canvas, cfg.ppi(), cfg.color_mode())?;
//! assert!(pdf.starts_with(b"%PDF"));
//! # Ok::<(), boxmark::BoxmarkError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`units`] | cm / inch / pixel / point conversion |
//! | [`config`] | Input records and the validated [`BoxConfig`] |
//! | [`text`] | Font faces and the text-fit solver |
//! | [`raster`] | Image primitives: scale, paste, rotate, fills |
//! | [`ornament`] | Shared decorations: base bar, badges, stripes |
//! | [`barcode`] | Code 128 rendering |
//! | [`assets`] | Artwork and font providers |
//! | [`layout`] | Die-line regions and panel mappings |
//! | [`style`] | Carton designs and the style registry |
//! | [`compose`] | Canvas composition |
//! | [`export`] | Print colour, PDF and preview output |
//! | [`error`] | Error types |

pub mod assets;
pub mod barcode;
pub mod compose;
pub mod config;
pub mod error;
pub mod export;
pub mod layout;
pub mod ornament;
pub mod raster;
pub mod style;
pub mod text;
pub mod units;

// Re-exports for convenience
pub use compose::{Composition, RenderOptions, RenderWarning, render};
pub use config::{BoxConfig, BoxSpec, Job};
pub use error::BoxmarkError;
pub use style::{Style, registry};
