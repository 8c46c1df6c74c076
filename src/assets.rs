//! # Assets
//!
//! Styles declare their artwork and fonts as static tables; an
//! [`AssetSource`] turns those declarations into decoded images and faces.
//!
//! | Source | Behaviour |
//! |--------|-----------|
//! | [`DirSource`] | Reads `<root>/<style>/<file>`; a missing file is a hard error |
//! | [`DraftSource`] | Placeholder artwork of the nominal size and the built-in face |
//!
//! Loading happens once, at style construction. Loaded [`Resources`] are
//! never drawn on directly; renderers scale or clone before compositing.

use image::{Rgba, RgbaImage};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::BoxmarkError;
use crate::raster::{fill_box, fill_polygon, outline_box};
use crate::text::Face;

/// One artwork file a style needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Artwork {
    /// Lookup key inside the style.
    pub key: &'static str,
    /// File name relative to the style's asset directory.
    pub file: &'static str,
    /// Nominal pixel size, used for draft placeholders.
    pub draft: (u32, u32),
}

impl Artwork {
    pub const fn new(key: &'static str, file: &'static str, draft: (u32, u32)) -> Self {
        Self { key, file, draft }
    }
}

/// One font file a style needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontFile {
    pub key: &'static str,
    pub file: &'static str,
}

impl FontFile {
    pub const fn new(key: &'static str, file: &'static str) -> Self {
        Self { key, file }
    }
}

/// Provider of artwork and fonts.
pub trait AssetSource: Send + Sync {
    fn load_image(&self, style: &str, art: &Artwork) -> Result<RgbaImage, BoxmarkError>;

    fn load_font(&self, style: &str, font: &FontFile) -> Result<Face, BoxmarkError>;

    /// Human-readable origin, for logs.
    fn describe(&self) -> String;
}

/// Assets read from a directory tree, one subdirectory per style.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, style: &str, file: &str) -> Result<PathBuf, BoxmarkError> {
        let path = self.root.join(style).join(file);
        if path.is_file() {
            Ok(path)
        } else {
            Err(BoxmarkError::AssetNotFound(path))
        }
    }
}

impl AssetSource for DirSource {
    fn load_image(&self, style: &str, art: &Artwork) -> Result<RgbaImage, BoxmarkError> {
        let path = self.resolve(style, art.file)?;
        let img = image::open(&path)
            .map_err(|e| BoxmarkError::Image(format!("{}: {}", path.display(), e)))?;
        Ok(img.to_rgba8())
    }

    fn load_font(&self, style: &str, font: &FontFile) -> Result<Face, BoxmarkError> {
        let path = self.resolve(style, font.file)?;
        let data = std::fs::read(&path)?;
        Face::from_bytes(font.file, data)
    }

    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }
}

/// Placeholder assets for layout proofs and tests.
///
/// Every artwork becomes a framed, crossed box of its nominal size; every
/// font becomes the built-in bitmap face.
#[derive(Debug, Clone, Copy, Default)]
pub struct DraftSource;

/// Ink used by draft artwork.
const DRAFT_INK: Rgba<u8> = Rgba([40, 40, 40, 255]);
const DRAFT_FILL: Rgba<u8> = Rgba([255, 255, 255, 160]);

/// Framed box with one diagonal, sized like the real artwork.
pub fn placeholder(width: u32, height: u32) -> RgbaImage {
    let (w, h) = (width.max(2) as i32, height.max(2) as i32);
    let mut img = RgbaImage::new(w as u32, h as u32);
    fill_box(&mut img, 0, 0, w, h, DRAFT_FILL);
    let stroke = (w.min(h) / 40).max(1);
    outline_box(&mut img, 0, 0, w, h, stroke, DRAFT_INK);
    let s = stroke as f32;
    fill_polygon(
        &mut img,
        &[(0.0, 0.0), (s, 0.0), (w as f32, h as f32 - s), (w as f32, h as f32), (w as f32 - s, h as f32), (0.0, s)],
        DRAFT_INK,
    );
    img
}

impl AssetSource for DraftSource {
    fn load_image(&self, _style: &str, art: &Artwork) -> Result<RgbaImage, BoxmarkError> {
        Ok(placeholder(art.draft.0, art.draft.1))
    }

    fn load_font(&self, _style: &str, _font: &FontFile) -> Result<Face, BoxmarkError> {
        Ok(Face::builtin())
    }

    fn describe(&self) -> String {
        "draft placeholders".to_string()
    }
}

/// Decoded artwork and faces owned by one style instance.
#[derive(Debug, Clone, Default)]
pub struct Resources {
    images: HashMap<&'static str, RgbaImage>,
    fonts: HashMap<&'static str, Face>,
}

impl Resources {
    /// Load every declared artwork and font, failing on the first missing file.
    pub fn load(
        source: &dyn AssetSource,
        style: &str,
        artwork: &[Artwork],
        fonts: &[FontFile],
    ) -> Result<Self, BoxmarkError> {
        let mut images = HashMap::with_capacity(artwork.len());
        for art in artwork {
            images.insert(art.key, source.load_image(style, art)?);
        }
        let mut faces = HashMap::with_capacity(fonts.len());
        for font in fonts {
            faces.insert(font.key, source.load_font(style, font)?);
        }
        log::debug!(
            "loaded {} images and {} fonts for '{}' from {}",
            images.len(),
            faces.len(),
            style,
            source.describe()
        );
        Ok(Self { images, fonts: faces })
    }

    pub fn image(&self, key: &str) -> Result<&RgbaImage, BoxmarkError> {
        self.images
            .get(key)
            .ok_or_else(|| BoxmarkError::AssetNotFound(PathBuf::from(key)))
    }

    pub fn font(&self, key: &str) -> Result<&Face, BoxmarkError> {
        self.fonts
            .get(key)
            .ok_or_else(|| BoxmarkError::AssetNotFound(PathBuf::from(key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ART: &[Artwork] = &[
        Artwork::new("logo", "logo.png", (300, 100)),
        Artwork::new("badge", "badge.png", (50, 50)),
    ];
    const FONTS: &[FontFile] = &[FontFile::new("body", "body.ttf")];

    #[test]
    fn test_draft_sizes() {
        let res = Resources::load(&DraftSource, "demo", ART, FONTS).unwrap();
        assert_eq!(res.image("logo").unwrap().dimensions(), (300, 100));
        assert_eq!(res.image("badge").unwrap().dimensions(), (50, 50));
        assert!(res.font("body").unwrap().is_builtin());
    }

    #[test]
    fn test_unknown_key() {
        let res = Resources::load(&DraftSource, "demo", ART, FONTS).unwrap();
        assert!(matches!(res.image("nope"), Err(BoxmarkError::AssetNotFound(_))));
        assert!(res.font("nope").is_err());
    }

    #[test]
    fn test_dir_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        match Resources::load(&DirSource::new(dir.path()), "demo", ART, &[]) {
            Err(BoxmarkError::AssetNotFound(path)) => {
                assert!(path.ends_with("demo/logo.png"));
            }
            other => panic!("unexpected {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_dir_source_reads_png() {
        let dir = tempfile::tempdir().unwrap();
        let style_dir = dir.path().join("demo");
        std::fs::create_dir_all(&style_dir).unwrap();
        placeholder(30, 10).save(style_dir.join("logo.png")).unwrap();
        placeholder(7, 7).save(style_dir.join("badge.png")).unwrap();
        let res = Resources::load(&DirSource::new(dir.path()), "demo", ART, &[]).unwrap();
        assert_eq!(res.image("logo").unwrap().dimensions(), (30, 10));
    }

    #[test]
    fn test_dir_source_rejects_bad_font() {
        let dir = tempfile::tempdir().unwrap();
        let style_dir = dir.path().join("demo");
        std::fs::create_dir_all(&style_dir).unwrap();
        std::fs::write(style_dir.join("body.ttf"), b"not a font").unwrap();
        let err = Resources::load(&DirSource::new(dir.path()), "demo", &[], FONTS);
        assert!(matches!(err, Err(BoxmarkError::Font(_))));
    }

    #[test]
    fn test_placeholder_is_visible() {
        let img = placeholder(100, 40);
        assert_eq!(*img.get_pixel(0, 0), DRAFT_INK);
        assert!(img.get_pixel(50, 20)[3] > 0);
    }
}
