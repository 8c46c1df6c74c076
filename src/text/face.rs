//! Font faces: measurement and drawing through one glyph path.
//!
//! Sizes are em sizes in pixels, so a 100 px face sets 100 px per em
//! regardless of the font's internal line gap.

use ab_glyph::{Font, FontArc, GlyphId, PxScale, ScaleFont, point};
use image::{Rgba, RgbaImage};
use spleen_font::{FONT_12X24, PSF2Font};
use std::collections::HashMap;

use crate::error::BoxmarkError;
use crate::raster::blend_pixel;

/// Cell size of the built-in bitmap face.
const CELL_W: usize = 12;
const CELL_H: usize = 24;

/// Where `(x, y)` sits relative to the drawn text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    /// Left edge, ascender line.
    #[default]
    LeftTop,
    /// Left edge, baseline.
    LeftBaseline,
    /// Horizontal centre of the advance, vertical centre between ascender and descender.
    Middle,
}

/// Ink bounding box relative to a left/ascender origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl TextBox {
    pub fn width(&self) -> u32 {
        (self.right - self.left).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.bottom - self.top).max(0) as u32
    }
}

#[derive(Clone)]
enum Kind {
    Outline(FontArc),
    Builtin,
}

/// A loaded typeface.
#[derive(Clone)]
pub struct Face {
    name: String,
    kind: Kind,
}

impl std::fmt::Debug for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Face")
            .field("name", &self.name)
            .field("builtin", &matches!(self.kind, Kind::Builtin))
            .finish()
    }
}

impl Face {
    /// Parse a TrueType/OpenType font.
    pub fn from_bytes(name: &str, data: Vec<u8>) -> Result<Self, BoxmarkError> {
        let font = FontArc::try_from_vec(data)
            .map_err(|e| BoxmarkError::Font(format!("{}: {}", name, e)))?;
        Ok(Self {
            name: name.to_string(),
            kind: Kind::Outline(font),
        })
    }

    /// The Spleen 12x24 bitmap face, scaled to any size.
    pub fn builtin() -> Self {
        Self {
            name: "spleen".to_string(),
            kind: Kind::Builtin,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.kind, Kind::Builtin)
    }

    /// Ascent above the baseline at `size`, in pixels.
    pub fn ascent(&self, size: f32) -> f32 {
        match &self.kind {
            Kind::Outline(font) => font.as_scaled(px_scale(font, size)).ascent(),
            Kind::Builtin => size * 0.8,
        }
    }

    /// Descent below the baseline at `size` (negative), in pixels.
    pub fn descent(&self, size: f32) -> f32 {
        match &self.kind {
            Kind::Outline(font) => font.as_scaled(px_scale(font, size)).descent(),
            Kind::Builtin => -size * 0.2,
        }
    }

    /// Sum of advances at `size`.
    pub fn advance(&self, text: &str, size: f32) -> f32 {
        match &self.kind {
            Kind::Outline(font) => {
                let scaled = font.as_scaled(px_scale(font, size));
                layout_glyphs(font, size, text)
                    .last()
                    .map(|(id, x)| x + scaled.h_advance(*id))
                    .unwrap_or(0.0)
            }
            Kind::Builtin => text.chars().count() as f32 * builtin_cell_w(size) as f32,
        }
    }

    /// Ink bounding box of `text` at `size`, origin at left/ascender.
    pub fn measure(&self, text: &str, size: f32) -> TextBox {
        if text.is_empty() {
            return TextBox::default();
        }
        match &self.kind {
            Kind::Outline(font) => {
                let scale = px_scale(font, size);
                let ascent = font.as_scaled(scale).ascent();
                let mut bounds: Option<TextBox> = None;
                for (id, x) in layout_glyphs(font, size, text) {
                    let glyph = id.with_scale_and_position(scale, point(x, ascent));
                    if let Some(outlined) = font.outline_glyph(glyph) {
                        let b = outlined.px_bounds();
                        let gb = TextBox {
                            left: b.min.x.floor() as i32,
                            top: b.min.y.floor() as i32,
                            right: b.max.x.ceil() as i32,
                            bottom: b.max.y.ceil() as i32,
                        };
                        bounds = Some(match bounds {
                            None => gb,
                            Some(acc) => TextBox {
                                left: acc.left.min(gb.left),
                                top: acc.top.min(gb.top),
                                right: acc.right.max(gb.right),
                                bottom: acc.bottom.max(gb.bottom),
                            },
                        });
                    }
                }
                bounds.unwrap_or_default()
            }
            Kind::Builtin => TextBox {
                left: 0,
                top: 0,
                right: (text.chars().count() * builtin_cell_w(size)) as i32,
                bottom: builtin_cell_h(size) as i32,
            },
        }
    }

    /// Draw `text` with `(x, y)` interpreted per `anchor`.
    pub fn draw(
        &self,
        img: &mut RgbaImage,
        x: i32,
        y: i32,
        text: &str,
        size: f32,
        color: Rgba<u8>,
        anchor: Anchor,
    ) {
        if text.is_empty() || size <= 0.0 {
            return;
        }
        let (ox, oy) = match anchor {
            Anchor::LeftTop => (x as f32, y as f32),
            Anchor::LeftBaseline => (x as f32, y as f32 - self.ascent(size)),
            Anchor::Middle => {
                let half_h = (self.ascent(size) - self.descent(size)) / 2.0;
                (x as f32 - self.advance(text, size) / 2.0, y as f32 - half_h)
            }
        };
        match &self.kind {
            Kind::Outline(font) => draw_outline(font, img, ox, oy, text, size, color),
            Kind::Builtin => draw_builtin(img, ox.round() as i32, oy.round() as i32, text, size, color),
        }
    }
}

/// Pixel scale that yields an em of `size` pixels.
fn px_scale(font: &FontArc, size: f32) -> PxScale {
    let em = font.units_per_em().unwrap_or(1000.0);
    PxScale::from(size * font.height_unscaled() / em)
}

/// Glyph ids with kerned caret positions.
fn layout_glyphs(font: &FontArc, size: f32, text: &str) -> Vec<(GlyphId, f32)> {
    let scaled = font.as_scaled(px_scale(font, size));
    let mut glyphs = Vec::with_capacity(text.len());
    let mut caret = 0.0f32;
    let mut prev: Option<GlyphId> = None;
    for ch in text.chars() {
        let id = font.glyph_id(ch);
        if let Some(p) = prev {
            caret += scaled.kern(p, id);
        }
        glyphs.push((id, caret));
        caret += scaled.h_advance(id);
        prev = Some(id);
    }
    glyphs
}

fn draw_outline(
    font: &FontArc,
    img: &mut RgbaImage,
    ox: f32,
    oy: f32,
    text: &str,
    size: f32,
    color: Rgba<u8>,
) {
    let scale = px_scale(font, size);
    let baseline = oy + font.as_scaled(scale).ascent();
    for (id, x) in layout_glyphs(font, size, text) {
        let glyph = id.with_scale_and_position(scale, point(ox + x, baseline));
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = gx as i32 + bounds.min.x as i32;
                let py = gy as i32 + bounds.min.y as i32;
                blend_pixel(img, px, py, color, coverage);
            });
        }
    }
}

fn builtin_cell_w(size: f32) -> usize {
    (size * CELL_W as f32 / CELL_H as f32).round().max(1.0) as usize
}

fn builtin_cell_h(size: f32) -> usize {
    size.round().max(1.0) as usize
}

/// 12x24 bitmap for one character, or `None` when Spleen lacks it.
fn builtin_glyph(ch: char) -> Option<[[bool; CELL_W]; CELL_H]> {
    let mut font = PSF2Font::new(FONT_12X24).ok()?;
    let utf8 = ch.to_string();
    let glyph = font.glyph_for_utf8(utf8.as_bytes())?;
    let mut bits = [[false; CELL_W]; CELL_H];
    for (row_y, row) in glyph.enumerate() {
        for (col_x, on) in row.enumerate() {
            if row_y < CELL_H && col_x < CELL_W {
                bits[row_y][col_x] = on;
            }
        }
    }
    Some(bits)
}

fn draw_builtin(img: &mut RgbaImage, x: i32, y: i32, text: &str, size: f32, color: Rgba<u8>) {
    let cw = builtin_cell_w(size);
    let ch_h = builtin_cell_h(size);
    let mut cache: HashMap<char, Option<[[bool; CELL_W]; CELL_H]>> = HashMap::new();

    for (i, ch) in text.chars().enumerate() {
        let bits = *cache.entry(ch).or_insert_with(|| builtin_glyph(ch));
        let Some(bits) = bits else { continue };
        let cell_x = x + (i * cw) as i32;
        // Nearest-neighbour scale from 12x24 to cw x ch_h
        for dy in 0..ch_h {
            let row = &bits[dy * CELL_H / ch_h];
            for dx in 0..cw {
                if row[dx * CELL_W / cw] {
                    blend_pixel(img, cell_x + dx as i32, y + dy as i32, color, 1.0);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ink_bounds(img: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
        let mut b: Option<(u32, u32, u32, u32)> = None;
        for (x, y, p) in img.enumerate_pixels() {
            if p[3] > 0 {
                b = Some(match b {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }
        b
    }

    #[test]
    fn test_builtin_measure_scales_with_size() {
        let face = Face::builtin();
        assert_eq!(face.measure("ABCD", 24.0), TextBox { left: 0, top: 0, right: 48, bottom: 24 });
        assert_eq!(face.measure("ABCD", 48.0).width(), 96);
        assert_eq!(face.measure("", 48.0), TextBox::default());
    }

    #[test]
    fn test_builtin_draws_inside_measured_box() {
        let face = Face::builtin();
        let mut img = RgbaImage::new(200, 100);
        face.draw(&mut img, 10, 20, "Hi", 48.0, Rgba([0, 0, 0, 255]), Anchor::LeftTop);
        let (x0, y0, x1, y1) = ink_bounds(&img).unwrap();
        let m = face.measure("Hi", 48.0);
        assert!(x0 >= 10 && y0 >= 20);
        assert!(x1 < 10 + m.width() && y1 < 20 + m.height());
    }

    #[test]
    fn test_middle_anchor_centres() {
        let face = Face::builtin();
        let mut img = RgbaImage::new(200, 200);
        face.draw(&mut img, 100, 100, "XXXX", 40.0, Rgba([0, 0, 0, 255]), Anchor::Middle);
        let (x0, _, x1, _) = ink_bounds(&img).unwrap();
        let centre = (x0 + x1) as i32 / 2;
        assert!((centre - 100).abs() <= 4, "centre {}", centre);
    }

    #[test]
    fn test_baseline_anchor_shifts_up() {
        let face = Face::builtin();
        let mut top = RgbaImage::new(100, 100);
        let mut base = RgbaImage::new(100, 100);
        face.draw(&mut top, 0, 40, "E", 24.0, Rgba([0, 0, 0, 255]), Anchor::LeftTop);
        face.draw(&mut base, 0, 40, "E", 24.0, Rgba([0, 0, 0, 255]), Anchor::LeftBaseline);
        let (_, ty, _, _) = ink_bounds(&top).unwrap();
        let (_, by, _, _) = ink_bounds(&base).unwrap();
        assert!(by < ty);
    }

    #[test]
    fn test_invalid_font_bytes() {
        let err = Face::from_bytes("broken", vec![0, 1, 2, 3]);
        assert!(matches!(err, Err(BoxmarkError::Font(_))));
    }

    #[test]
    fn test_draw_clips_at_edges() {
        let face = Face::builtin();
        let mut img = RgbaImage::new(10, 10);
        face.draw(&mut img, -20, -5, "WIDE TEXT", 30.0, Rgba([0, 0, 0, 255]), Anchor::LeftTop);
        assert_eq!(img.dimensions(), (10, 10));
    }
}
