//! # Error Types
//!
//! This module defines error types used throughout the boxmark library.
//!
//! Construction-time problems (bad configuration, missing artwork, unknown
//! style) surface as hard errors. Rendering-time anomalies never do: they are
//! absorbed and reported as [`crate::compose::RenderWarning`] values instead.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for boxmark operations
#[derive(Debug, Error)]
pub enum BoxmarkError {
    /// Invalid box configuration (non-positive dimension, empty SKU, ...)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A style attribute was read but never supplied
    #[error("Missing parameter '{0}'")]
    MissingParam(&'static str),

    /// One or more attributes required by a style are absent
    #[error("Style '{style}' requires missing parameters: {params}")]
    MissingParams { style: String, params: String },

    /// Unknown style name at registry lookup
    #[error("Style '{name}' not found. Available styles: {available}")]
    StyleNotFound { name: String, available: String },

    /// Artwork or font file absent from the asset directory
    #[error("Asset not found: {}", .0.display())]
    AssetNotFound(PathBuf),

    /// Font could not be parsed
    #[error("Font error: {0}")]
    Font(String),

    /// Image decode/encode error
    #[error("Image error: {0}")]
    Image(String),

    /// Barcode symbol could not be encoded
    #[error("Barcode error: {0}")]
    Barcode(String),

    /// A rendered panel does not match the size of the region it is pasted into
    #[error("Panel '{panel}' is {actual_w}x{actual_h}px but region '{region}' is {region_w}x{region_h}px")]
    PanelSize {
        panel: String,
        region: String,
        actual_w: u32,
        actual_h: u32,
        region_w: u32,
        region_h: u32,
    },

    /// PDF serialization error
    #[error("PDF error: {0}")]
    Pdf(String),

    /// JSON job parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for BoxmarkError {
    fn from(err: image::ImageError) -> Self {
        BoxmarkError::Image(err.to_string())
    }
}

impl From<lopdf::Error> for BoxmarkError {
    fn from(err: lopdf::Error) -> Self {
        BoxmarkError::Pdf(err.to_string())
    }
}
