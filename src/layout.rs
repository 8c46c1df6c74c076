//! # Die-Line Layout
//!
//! A [`Layout`] is the flattened die-line of a carton: an ordered list of
//! named rectangular [`Region`]s in canvas pixel coordinates. Styles build
//! one from a [`crate::config::BoxConfig`]; the composition engine pastes
//! panels into it.
//!
//! ## Example (four-panel wrap, 12 regions)
//!
//! ```text
//!  x0        x1      x2        x3      x4
//!  +---------+-------+---------+-------+  y0
//!  | flap    | flap  | flap    | flap  |
//!  +---------+-------+---------+-------+  y1 = w/2
//!  | front1  | side1 | front2  | side2 |
//!  +---------+-------+---------+-------+  y2 = w/2 + h
//!  | flap    | flap  | flap    | flap  |
//!  +---------+-------+---------+-------+  y3
//! ```

use serde::Serialize;

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// True when the interiors of the two rectangles share at least one pixel.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}

/// A named rectangle of the die-line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    pub name: &'static str,
    #[serde(flatten)]
    pub rect: Rect,
}

/// Reasons a layout fails to tile its bounding box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TilingDefect {
    /// Two regions share interior pixels.
    Overlap(&'static str, &'static str),
    /// Summed region area differs from the bounding box area.
    Gap { covered: u64, extent: u64 },
    /// A region has zero width or height.
    Degenerate(&'static str),
}

/// Ordered region map covering the whole die-line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Layout {
    regions: Vec<Region>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style region insertion. Later duplicates replace earlier ones.
    pub fn region(mut self, name: &'static str, x: i32, y: i32, width: i32, height: i32) -> Self {
        self.insert(name, Rect::new(clamp_px(x), clamp_px(y), clamp_px(width), clamp_px(height)));
        self
    }

    pub fn insert(&mut self, name: &'static str, rect: Rect) {
        if let Some(existing) = self.regions.iter_mut().find(|r| r.name == name) {
            existing.rect = rect;
        } else {
            self.regions.push(Region { name, rect });
        }
    }

    pub fn get(&self, name: &str) -> Option<Rect> {
        self.regions.iter().find(|r| r.name == name).map(|r| r.rect)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.regions.iter().map(|r| r.name).collect()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Bounding box of all regions: `(max(x + w), max(y + h))`.
    pub fn extent(&self) -> (u32, u32) {
        self.regions.iter().fold((0, 0), |(w, h), r| {
            (w.max(r.rect.right()), h.max(r.rect.bottom()))
        })
    }

    /// Check that the regions exactly tile `[0, extent)`.
    ///
    /// Disjoint interiors plus equal total area is sufficient: if no two
    /// rectangles overlap and their areas sum to the bounding box area, every
    /// pixel is covered exactly once.
    pub fn check_tiling(&self) -> Result<(), TilingDefect> {
        for r in &self.regions {
            if r.rect.is_empty() {
                return Err(TilingDefect::Degenerate(r.name));
            }
        }
        for (i, a) in self.regions.iter().enumerate() {
            for b in &self.regions[i + 1..] {
                if a.rect.overlaps(&b.rect) {
                    return Err(TilingDefect::Overlap(a.name, b.name));
                }
            }
        }
        let (w, h) = self.extent();
        let extent = w as u64 * h as u64;
        let covered: u64 = self.regions.iter().map(|r| r.rect.area()).sum();
        if covered != extent {
            return Err(TilingDefect::Gap { covered, extent });
        }
        Ok(())
    }

    pub fn is_tiling(&self) -> bool {
        self.check_tiling().is_ok()
    }
}

fn clamp_px(v: i32) -> u32 {
    v.max(0) as u32
}

/// Region → panel-key assignment. Regions not listed stay background.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PanelMapping {
    entries: Vec<(&'static str, &'static str)>,
}

impl PanelMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn map(mut self, region: &'static str, panel: &'static str) -> Self {
        self.entries.retain(|(r, _)| *r != region);
        self.entries.push((region, panel));
        self
    }

    pub fn panel_for(&self, region: &str) -> Option<&'static str> {
        self.entries.iter().find(|(r, _)| *r == region).map(|(_, p)| *p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_2x2() -> Layout {
        Layout::new()
            .region("a", 0, 0, 10, 5)
            .region("b", 10, 0, 4, 5)
            .region("c", 0, 5, 10, 3)
            .region("d", 10, 5, 4, 3)
    }

    #[test]
    fn test_extent_is_bounding_box() {
        assert_eq!(grid_2x2().extent(), (14, 8));
        assert_eq!(Layout::new().extent(), (0, 0));
    }

    #[test]
    fn test_grid_tiles() {
        assert_eq!(grid_2x2().check_tiling(), Ok(()));
    }

    #[test]
    fn test_gap_detected() {
        let layout = Layout::new().region("a", 0, 0, 10, 5).region("b", 0, 6, 10, 5);
        assert_eq!(
            layout.check_tiling(),
            Err(TilingDefect::Gap { covered: 100, extent: 110 })
        );
    }

    #[test]
    fn test_overlap_detected() {
        let layout = Layout::new().region("a", 0, 0, 10, 5).region("b", 5, 0, 10, 5);
        assert_eq!(layout.check_tiling(), Err(TilingDefect::Overlap("a", "b")));
    }

    #[test]
    fn test_degenerate_detected() {
        let layout = Layout::new().region("a", 0, 0, 0, 5);
        assert_eq!(layout.check_tiling(), Err(TilingDefect::Degenerate("a")));
    }

    #[test]
    fn test_insert_replaces() {
        let layout = Layout::new().region("a", 0, 0, 1, 1).region("a", 0, 0, 2, 2);
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.get("a"), Some(Rect::new(0, 0, 2, 2)));
    }

    #[test]
    fn test_negative_coordinates_clamp() {
        let layout = Layout::new().region("a", -3, 2, 4, -1);
        assert_eq!(layout.get("a"), Some(Rect::new(0, 2, 4, 0)));
    }

    #[test]
    fn test_rect_overlap_edges() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(!a.overlaps(&Rect::new(10, 0, 5, 5)));
        assert!(a.overlaps(&Rect::new(9, 9, 5, 5)));
        assert!(a.contains(9, 9));
        assert!(!a.contains(10, 9));
    }

    #[test]
    fn test_mapping_lookup() {
        let mapping = PanelMapping::new().map("x", "front").map("y", "side").map("x", "back");
        assert_eq!(mapping.panel_for("x"), Some("back"));
        assert_eq!(mapping.panel_for("y"), Some("side"));
        assert_eq!(mapping.panel_for("z"), None);
        assert_eq!(mapping.len(), 2);
    }

    #[test]
    fn test_layout_serializes_as_list() {
        let json = serde_json::to_value(Layout::new().region("a", 1, 2, 3, 4)).unwrap_or_default();
        assert_eq!(json[0]["name"], "a");
        assert_eq!(json[0]["width"], 3);
    }
}
