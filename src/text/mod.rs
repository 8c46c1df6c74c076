//! # Text
//!
//! Font faces and the text-fit solver.
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Face`] | Outline (TTF/OTF via `ab_glyph`) or built-in Spleen bitmap face |
//! | [`Anchor`] | How a draw position relates to the text |
//! | [`FitBounds`] / [`Fit`] | Input and result of [`fit_text`] |
//!
//! ## Example
//!
//! ```
//! use boxmark::text::{fit_text, Face, FitBounds};
//!
//! let face = Face::builtin();
//! let fit = fit_text(&face, "CA-6160", FitBounds::boxed(700, 300));
//! assert!(fit.fits);
//! assert!(fit.width <= 700 && fit.height <= 300);
//! ```

mod face;
mod fit;

pub use face::{Anchor, Face, TextBox};
pub use fit::{Fit, FitBounds, fit_text};
