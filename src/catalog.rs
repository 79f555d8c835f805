//! Placeholder catalog — element-type name → placeholder image asset.
//!
//! DESIGN
//! ======
//! The catalog is built once at startup and never mutated. Hosts share it
//! behind an `Arc`. Entries follow a fixed enumerated set of element types;
//! the detection service only ever reports names from this set, and a name
//! that is missing here is a render error rather than something to skip.
//!
//! Only the natural size of each image matters to the renderer, so the
//! catalog records dimensions and a source path, not pixel data.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use canvas::doc::ImageFill;
use tracing::debug;

/// Every element type the detection service can report, with the natural
/// size (width, height) of the placeholder image shipped for it.
pub const ELEMENT_TYPES: [(&str, u32, u32); 21] = [
    ("alert", 320, 180),
    ("button", 200, 80),
    ("card", 344, 300),
    ("checkbox_checked", 48, 48),
    ("checkbox_unchecked", 48, 48),
    ("chip", 160, 64),
    ("data_table", 640, 400),
    ("dropdown_menu", 280, 56),
    ("floating_action_button", 112, 112),
    ("grid_list", 360, 360),
    ("image", 320, 240),
    ("label", 200, 40),
    ("menu", 224, 256),
    ("radio_button_checked", 48, 48),
    ("radio_button_unchecked", 48, 48),
    ("slider", 320, 48),
    ("switch_disabled", 72, 40),
    ("switch_enabled", 72, 40),
    ("text_area", 320, 160),
    ("text_field", 320, 72),
    ("tooltip", 160, 48),
];

/// File extension of placeholder images inside an asset directory.
pub const ASSET_EXTENSION: &str = "png";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("placeholder asset missing: {}", .0.display())]
    MissingAsset(PathBuf),
    #[error("failed to read placeholder size from {}: {source}", path.display())]
    Probe { path: PathBuf, source: image::ImageError },
    #[error("placeholder asset {0} has zero width or height")]
    EmptyAsset(String),
}

/// A placeholder image for one element type.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderAsset {
    pub name: String,
    pub natural_width: f64,
    pub natural_height: f64,
    /// Image file on disk, when loaded from an asset directory.
    pub source: Option<PathBuf>,
}

impl PlaceholderAsset {
    #[must_use]
    pub fn new(name: impl Into<String>, natural_width: u32, natural_height: u32) -> Self {
        Self {
            name: name.into(),
            natural_width: f64::from(natural_width),
            natural_height: f64::from(natural_height),
            source: None,
        }
    }

    /// Image fill that paints this placeholder.
    #[must_use]
    pub fn image_fill(&self) -> ImageFill {
        ImageFill {
            asset: self.name.clone(),
            natural_width: self.natural_width,
            natural_height: self.natural_height,
        }
    }
}

/// Immutable lookup table of placeholder assets.
#[derive(Debug, Clone)]
pub struct UiElementCatalog {
    order: Vec<String>,
    assets: HashMap<String, PlaceholderAsset>,
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

impl UiElementCatalog {
    /// The shipped placeholder pack, using its recorded natural sizes.
    #[must_use]
    pub fn builtin() -> Self {
        let mut catalog = Self { order: Vec::with_capacity(ELEMENT_TYPES.len()), assets: HashMap::new() };
        for (name, width, height) in ELEMENT_TYPES {
            catalog.push(PlaceholderAsset::new(name, width, height));
        }
        catalog
    }

    /// Load `<dir>/<name>.png` for every known element type, reading each
    /// image's natural size from its header.
    ///
    /// # Errors
    ///
    /// Fails if any file is missing, unreadable, or zero-sized.
    pub fn load_dir(dir: &Path) -> Result<Self, CatalogError> {
        let mut assets = Vec::with_capacity(ELEMENT_TYPES.len());
        for (name, _, _) in ELEMENT_TYPES {
            let path = dir.join(format!("{name}.{ASSET_EXTENSION}"));
            if !path.is_file() {
                return Err(CatalogError::MissingAsset(path));
            }
            let (width, height) =
                image::image_dimensions(&path).map_err(|source| CatalogError::Probe { path: path.clone(), source })?;
            debug!(asset = name, width, height, "catalog: probed placeholder");
            let mut asset = PlaceholderAsset::new(name, width, height);
            asset.source = Some(path);
            assets.push(asset);
        }
        Self::from_assets(assets)
    }

    /// Build a catalog from explicit assets. A later asset with the same name
    /// replaces an earlier one but keeps its original position.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyAsset`] if an asset has a zero, negative,
    /// or non-finite dimension.
    pub fn from_assets(assets: impl IntoIterator<Item = PlaceholderAsset>) -> Result<Self, CatalogError> {
        let mut catalog = Self { order: Vec::new(), assets: HashMap::new() };
        for asset in assets {
            let usable = |v: f64| v.is_finite() && v > 0.0;
            if !usable(asset.natural_width) || !usable(asset.natural_height) {
                return Err(CatalogError::EmptyAsset(asset.name));
            }
            catalog.push(asset);
        }
        Ok(catalog)
    }

    fn push(&mut self, asset: PlaceholderAsset) {
        if !self.assets.contains_key(&asset.name) {
            self.order.push(asset.name.clone());
        }
        self.assets.insert(asset.name.clone(), asset);
    }
}

// =============================================================================
// LOOKUP
// =============================================================================

impl UiElementCatalog {
    /// Placeholder for an element type, if the catalog has one.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&PlaceholderAsset> {
        self.assets.get(name)
    }

    /// Entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &PlaceholderAsset> {
        self.order.iter().filter_map(|name| self.assets.get(name))
    }

    /// Element type names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
