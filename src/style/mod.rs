//! # Styles
//!
//! A style is one carton-label design: a die-line topology, a mapping of
//! regions to panels, and the renderers that draw those panels.
//!
//! ## Registered styles
//!
//! | Name | Topology | Panels |
//! |------|----------|--------|
//! | `mcombo_standard` | 4x3 wrap, half-width flaps | front, side, left/right flaps |
//! | `barberpub_topandbottom` | cross-shaped lid | front, back, top, left, right |
//! | `barberpub_doubleopening` | 4x3 wrap, half-width flaps | front, side, flaps, blank |
//! | `barberpub_fulloverlap` | 4x3 wrap, full-width flaps | front, side, flaps, blank |
//! | `simple` | 3x3 grid | front, side, flaps |
//!
//! ## Usage
//!
//! ```
//! use boxmark::assets::DraftSource;
//! use boxmark::style;
//!
//! for info in style::registry().list() {
//!     println!("{} - {}", info.name, info.description);
//! }
//! let simple = style::registry().get("simple", &DraftSource).unwrap();
//! assert_eq!(simple.name(), "simple");
//! ```

pub mod barberpub;
mod common;
pub mod mcombo;
pub mod simple;

use image::RgbaImage;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::assets::AssetSource;
use crate::compose::RenderWarning;
use crate::config::{BoxConfig, Param};
use crate::error::BoxmarkError;
use crate::layout::{Layout, PanelMapping};

pub use barberpub::{DoubleOpening, FullOverlap, TopAndBottom};
pub use mcombo::McomboStandard;
pub use simple::Simple;

/// One carton-label design.
///
/// Instances own their loaded artwork and fonts and never mutate them, so a
/// style may be shared between threads.
pub trait Style: Send + Sync {
    /// Registry key.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Attributes the panels read from the configuration.
    fn required_params(&self) -> &'static [Param];

    /// Region rectangles of the die-line.
    fn layout(&self, cfg: &BoxConfig) -> Layout;

    /// Which panel goes into which region.
    fn panel_mapping(&self, cfg: &BoxConfig) -> PanelMapping;

    /// Render every panel named by [`Style::panel_mapping`].
    fn generate_panels(&self, cfg: &BoxConfig) -> Result<PanelSet, BoxmarkError>;
}

/// Rendered panels keyed by panel name, plus the warnings raised while drawing them.
#[derive(Debug, Clone, Default)]
pub struct PanelSet {
    panels: BTreeMap<&'static str, RgbaImage>,
    warnings: Vec<RenderWarning>,
}

impl PanelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &'static str, panel: RgbaImage) {
        self.panels.insert(key, panel);
    }

    pub fn get(&self, key: &str) -> Option<&RgbaImage> {
        self.panels.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.panels.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn warn(&mut self, warning: RenderWarning) {
        self.warnings.push(warning);
    }

    pub fn extend_warnings(&mut self, warnings: impl IntoIterator<Item = RenderWarning>) {
        self.warnings.extend(warnings);
    }

    pub fn warnings(&self) -> &[RenderWarning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<RenderWarning> {
        self.warnings
    }
}

/// Constructor for a registered style.
pub type BuildFn = fn(&dyn AssetSource) -> Result<Box<dyn Style>, BoxmarkError>;

/// Registry entry.
#[derive(Clone, Copy)]
pub struct StyleEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub required_params: &'static [Param],
    build: BuildFn,
}

impl StyleEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        required_params: &'static [Param],
        build: BuildFn,
    ) -> Self {
        Self {
            name,
            description,
            required_params,
            build,
        }
    }

    /// Instantiate the style, loading its assets.
    pub fn build(&self, assets: &dyn AssetSource) -> Result<Box<dyn Style>, BoxmarkError> {
        (self.build)(assets)
    }
}

impl std::fmt::Debug for StyleEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleEntry")
            .field("name", &self.name)
            .field("required_params", &self.required_params)
            .finish()
    }
}

/// Enumeration record for front ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub required_params: Vec<&'static str>,
}

/// Every built-in style.
static BUILTIN: &[StyleEntry] = &[
    mcombo::ENTRY,
    barberpub::top_and_bottom::ENTRY,
    barberpub::double_opening::ENTRY,
    barberpub::full_overlap::ENTRY,
    simple::ENTRY,
];

/// Name → style catalog.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<StyleEntry>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in style.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for entry in BUILTIN {
            registry.register(*entry);
        }
        registry
    }

    /// Add a style. Registering a name twice keeps the first entry.
    ///
    /// Returns whether the entry was added.
    pub fn register(&mut self, entry: StyleEntry) -> bool {
        if self.entry(entry.name).is_some() {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn entry(&self, name: &str) -> Option<&StyleEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Instantiate a style by name.
    pub fn get(&self, name: &str, assets: &dyn AssetSource) -> Result<Box<dyn Style>, BoxmarkError> {
        match self.entry(name) {
            Some(entry) => entry.build(assets),
            None => Err(BoxmarkError::StyleNotFound {
                name: name.to_string(),
                available: self.names().join(", "),
            }),
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.name).collect()
    }

    pub fn list(&self) -> Vec<StyleInfo> {
        self.entries
            .iter()
            .map(|e| StyleInfo {
                name: e.name,
                description: e.description,
                required_params: e.required_params.iter().map(|p| p.as_str()).collect(),
            })
            .collect()
    }
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Process-wide registry of built-in styles, read-only after first use.
pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::builtin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::DraftSource;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_names() {
        assert_eq!(
            registry().names(),
            vec![
                "mcombo_standard",
                "barberpub_topandbottom",
                "barberpub_doubleopening",
                "barberpub_fulloverlap",
                "simple",
            ]
        );
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut reg = Registry::builtin();
        let before = reg.names().len();
        assert!(!reg.register(simple::ENTRY));
        assert_eq!(reg.names().len(), before);

        let mut empty = Registry::new();
        assert!(empty.register(simple::ENTRY));
        assert!(!empty.register(simple::ENTRY));
        assert_eq!(empty.names(), vec!["simple"]);
    }

    #[test]
    fn test_unknown_style_lists_available() {
        match registry().get("fancy", &DraftSource) {
            Err(BoxmarkError::StyleNotFound { name, available }) => {
                assert_eq!(name, "fancy");
                assert!(available.contains("mcombo_standard"));
                assert!(available.contains("simple"));
            }
            other => panic!("unexpected {:?}", other.map(|s| s.name())),
        }
    }

    #[test]
    fn test_entries_match_instances() {
        for entry in registry().entries.iter() {
            let style = entry.build(&DraftSource).unwrap();
            assert_eq!(style.name(), entry.name);
            assert_eq!(style.description(), entry.description);
            assert_eq!(style.required_params(), entry.required_params);
        }
    }

    #[test]
    fn test_list_serializes() {
        let list = registry().list();
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json[0]["name"], "mcombo_standard");
        assert!(json[0]["required_params"].as_array().unwrap().len() >= 5);
    }

    #[test]
    fn test_panel_set_warnings() {
        let mut set = PanelSet::new();
        set.insert("a", RgbaImage::new(1, 1));
        set.warn(RenderWarning::ArtworkFallback { panel: "a", detail: "x".into() });
        assert_eq!(set.keys().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(set.warnings().len(), 1);
    }
}
