//! Shared constants for the canvas crate.

use crate::color::Color;

// ── Artboards ───────────────────────────────────────────────────

/// Background fill applied to every generated wireframe artboard.
pub const ARTBOARD_FILL: Color = Color::rgb(0xF2, 0xF2, 0xF2);

/// Prefix for generated artboard names; the screen id is appended.
pub const ARTBOARD_NAME_PREFIX: &str = "wireframe_";

// ── Document ────────────────────────────────────────────────────

/// Anchor point, in root coordinates, where new artboards are placed.
pub const DOCUMENT_CENTER: (f64, f64) = (0.0, 0.0);

/// Name given to the document root node.
pub const ROOT_NAME: &str = "root";
