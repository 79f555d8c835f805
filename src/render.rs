//! Artboard rendering — decoded screen → artboard of placeholder shapes.
//!
//! DESIGN
//! ======
//! One call creates one artboard and appends one image-filled rectangle per
//! detected element, in server order. Every placeholder keeps its own aspect
//! ratio and is scaled to fit inside the element's box.
//!
//! There is no rollback: when element `k` fails, elements `0..k` stay in the
//! document. Shapes are positioned after they are parented because host
//! coordinates are parent-relative.

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;

use std::sync::Arc;

use canvas::consts::{ARTBOARD_FILL, ARTBOARD_NAME_PREFIX, DOCUMENT_CENTER};
use canvas::doc::{DocError, Fill, NodeId, SceneHost};
use tracing::{debug, info};

use crate::catalog::{PlaceholderAsset, UiElementCatalog};
use crate::detect::{DetectedElement, Dimension, UiScreen};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("unknown UI element: {0}")]
    UnknownElement(String),
    #[error("artboard size {width}x{height} is negative or non-finite")]
    InvalidTargetSize { width: f64, height: f64 },
    #[error("element {index} ({name}) has a negative or non-finite box")]
    InvalidGeometry { index: usize, name: String },
    #[error("document error: {0}")]
    Document(#[from] DocError),
}

pub struct ArtboardRenderer {
    catalog: Arc<UiElementCatalog>,
}

// =============================================================================
// GEOMETRY
// =============================================================================

/// Uniform scale that fits an `asset_w × asset_h` image inside a
/// `box_w × box_h` box.
#[must_use]
pub fn fit_scale(asset_w: f64, asset_h: f64, box_w: f64, box_h: f64) -> f64 {
    (box_w / asset_w).min(box_h / asset_h)
}

/// Size of `asset` scaled to fit inside `bounds`. The constraining axis
/// matches the box exactly; the other never exceeds it.
#[must_use]
pub fn fitted_size(asset: &PlaceholderAsset, bounds: Dimension) -> (f64, f64) {
    let by_width = bounds.width / asset.natural_width;
    let by_height = bounds.height / asset.natural_height;
    if by_width <= by_height {
        (bounds.width, (asset.natural_height * by_width).min(bounds.height))
    } else {
        ((asset.natural_width * by_height).min(bounds.width), bounds.height)
    }
}

fn valid_extent(width: f64, height: f64) -> bool {
    width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0
}

fn valid_geometry(element: &DetectedElement) -> bool {
    let Dimension { width, height } = element.dimension;
    valid_extent(width, height)
        && element.position.x.is_finite()
        && element.position.y.is_finite()
}

// =============================================================================
// RENDERER
// =============================================================================

impl ArtboardRenderer {
    #[must_use]
    pub fn new(catalog: Arc<UiElementCatalog>) -> Self {
        Self { catalog }
    }

    /// Create `wireframe_<id>` at `target_width × target_height` and fill it
    /// with one placeholder shape per element. Returns the artboard id.
    ///
    /// # Errors
    ///
    /// Fails before touching the document when the target size is invalid.
    /// Otherwise fails on the first element whose name has no placeholder or whose box
    /// is invalid, or when the host rejects a mutation. Shapes inserted
    /// before the failure are left in place.
    pub fn render(
        &self,
        host: &mut dyn SceneHost,
        target_width: f64,
        target_height: f64,
        screen: &UiScreen,
    ) -> Result<NodeId, RenderError> {
        if !valid_extent(target_width, target_height) {
            return Err(RenderError::InvalidTargetSize { width: target_width, height: target_height });
        }
        let artboard = create_artboard(host, &screen.id, target_width, target_height)?;
        info!(screen = %screen.id, width = target_width, height = target_height, "render: artboard created");

        for (index, element) in screen.objects.iter().enumerate() {
            let asset = self
                .catalog
                .lookup(&element.name)
                .ok_or_else(|| RenderError::UnknownElement(element.name.clone()))?;
            if !valid_geometry(element) {
                return Err(RenderError::InvalidGeometry { index, name: element.name.clone() });
            }
            add_element(host, artboard, asset, element)?;
        }

        info!(screen = %screen.id, elements = screen.objects.len(), "render: wireframe complete");
        Ok(artboard)
    }
}

fn create_artboard(host: &mut dyn SceneHost, id: &str, width: f64, height: f64) -> Result<NodeId, RenderError> {
    let (x, y) = DOCUMENT_CENTER;

    let artboard = host.create_artboard();
    host.set_name(artboard, &format!("{ARTBOARD_NAME_PREFIX}{id}"))?;
    host.resize(artboard, width, height)?;
    host.set_fill(artboard, Fill::Solid { color: ARTBOARD_FILL })?;
    host.set_dynamic_layout(artboard, true)?;

    let root = host.root();
    host.add_child(root, artboard)?;
    host.move_in_parent_coordinates(artboard, x, y)?;
    Ok(artboard)
}

fn add_element(
    host: &mut dyn SceneHost,
    artboard: NodeId,
    asset: &PlaceholderAsset,
    element: &DetectedElement,
) -> Result<NodeId, RenderError> {
    let scale = fit_scale(asset.natural_width, asset.natural_height, element.dimension.width, element.dimension.height);
    let (width, height) = fitted_size(asset, element.dimension);

    let rect = host.create_rectangle();
    host.set_name(rect, &element.name)?;
    host.resize(rect, width, height)?;
    host.set_fill(rect, Fill::Image(asset.image_fill()))?;
    host.add_child(artboard, rect)?;
    host.move_in_parent_coordinates(rect, element.position.x, element.position.y)?;

    debug!(
        element = %element.name,
        x = element.position.x,
        y = element.position.y,
        width,
        height,
        scale,
        probability = element.probability,
        "render: placed element"
    );
    Ok(rect)
}
