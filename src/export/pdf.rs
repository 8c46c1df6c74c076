//! Single-page raster PDF.
//!
//! The canvas is embedded as one Flate-compressed image XObject that fills
//! the page. Page size is `px / ppi * 72` points on each axis, so the PDF
//! prints at the box's physical size. Transparency is flattened over white
//! first; printers get no soft mask.

use flate2::Compression;
use flate2::write::ZlibEncoder;
use image::RgbaImage;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use std::io::Write;

use super::rgb_to_cmyk;
use crate::config::ColorMode;
use crate::error::BoxmarkError;
use crate::units::px_to_pt;

const IMAGE_NAME: &str = "Im0";

/// Composite a straight-alpha pixel over white.
fn over_white(p: &[u8]) -> [u8; 3] {
    let a = p[3] as u32;
    let mix = |c: u8| ((c as u32 * a + 255 * (255 - a) + 127) / 255) as u8;
    [mix(p[0]), mix(p[1]), mix(p[2])]
}

/// Interleaved samples plus the colour space name.
fn samples(canvas: &RgbaImage, mode: ColorMode) -> (Vec<u8>, &'static str) {
    let pixels = canvas.pixels().map(|p| over_white(&p.0));
    match mode {
        ColorMode::Rgb => (pixels.flatten().collect(), "DeviceRGB"),
        ColorMode::Cmyk => (pixels.flat_map(rgb_to_cmyk).collect(), "DeviceCMYK"),
    }
}

fn deflate(data: &[u8]) -> Result<Vec<u8>, BoxmarkError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Page size in points for a canvas rendered at `ppi`.
pub fn page_size_pt(canvas: &RgbaImage, ppi: u32) -> (f64, f64) {
    (px_to_pt(canvas.width(), ppi), px_to_pt(canvas.height(), ppi))
}

/// Serialize `canvas` as a one-page PDF.
pub fn write_pdf(canvas: &RgbaImage, ppi: u32, mode: ColorMode) -> Result<Vec<u8>, BoxmarkError> {
    if ppi == 0 {
        return Err(BoxmarkError::Pdf("ppi must be positive".into()));
    }
    let (px_w, px_h) = canvas.dimensions();
    let (pt_w, pt_h) = page_size_pt(canvas, ppi);

    let (raw, color_space) = samples(canvas, mode);
    let compressed = deflate(&raw)?;
    log::debug!(
        "pdf: {}x{}px {} ({} -> {} bytes)",
        px_w,
        px_h,
        color_space,
        raw.len(),
        compressed.len()
    );

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => px_w as i64,
            "Height" => px_h as i64,
            "ColorSpace" => color_space,
            "BitsPerComponent" => 8,
            "Filter" => "FlateDecode",
        },
        compressed,
    )
    .with_compression(false);
    let image_id = doc.add_object(image);

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    Object::Real(pt_w as f32),
                    0.into(),
                    0.into(),
                    Object::Real(pt_h as f32),
                    0.into(),
                    0.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(IMAGE_NAME.as_bytes().to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let resources_id = doc.add_object(dictionary! {
        "XObject" => dictionary! {
            IMAGE_NAME => image_id,
        },
    });
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![
            0.into(),
            0.into(),
            Object::Real(pt_w as f32),
            Object::Real(pt_h as f32),
        ],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    doc.save_to(&mut out)?;
    log::info!(
        "pdf: {:.1}x{:.1}pt page, {} bytes",
        pt_w,
        pt_h,
        out.len()
    );
    Ok(out)
}
