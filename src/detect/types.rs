//! Detection wire types, upload payload, and errors.

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;

use std::path::Path;

use serde::{Deserialize, Serialize};

/// File extensions the detection service accepts, lowercase.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by a detection request.
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    /// The endpoint could not be reached or the body could not be read.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status. The status and body
    /// are intentionally not part of the message.
    #[error("Server overloaded")]
    ServerOverloaded,

    /// The response body is not a valid `UIScreen`.
    #[error("unexpected response from detection service: {0}")]
    Decode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// RESPONSE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub width: f64,
    pub height: f64,
}

/// One UI element found in the sketch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedElement {
    /// Element type, e.g. `button` or `text_field`.
    pub name: String,
    /// Top-left corner in screen coordinates.
    pub position: Position,
    /// Bounding box the placeholder must fit inside.
    pub dimension: Dimension,
    /// Detection confidence in `(0, 1)`, when the service reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
}

/// The decoded response for one sketch image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiScreen {
    #[serde(deserialize_with = "deserialize_screen_id")]
    pub id: String,
    pub width: f64,
    pub height: f64,
    /// Elements in server order. Later elements are drawn on top.
    pub objects: Vec<DetectedElement>,
}

/// Accept the screen id as either a JSON string or a JSON number.
fn deserialize_screen_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ScreenId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match ScreenId::deserialize(deserializer)? {
        ScreenId::Text(s) => s,
        ScreenId::Number(n) => n.to_string(),
    })
}

/// Decode a detection response body.
///
/// # Errors
///
/// Returns [`DetectError::Decode`] when the body is not JSON or does not match
/// the `UIScreen` shape.
pub fn parse_screen(body: &str) -> Result<UiScreen, DetectError> {
    serde_json::from_str(body).map_err(|e| DetectError::Decode(e.to_string()))
}

// =============================================================================
// UPLOAD
// =============================================================================

/// A sketch image picked by the user, ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SketchImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl SketchImage {
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), bytes }
    }

    /// MIME type sent with the multipart part, derived from the extension.
    /// Anything that is not a PNG is sent as JPEG.
    #[must_use]
    pub fn mime(&self) -> &'static str {
        if has_extension(Path::new(&self.file_name), &["png"]) { "image/png" } else { "image/jpeg" }
    }
}

/// Case-insensitive extension check.
#[must_use]
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

// =============================================================================
// DETECT TRAIT
// =============================================================================

/// Async seam over the detection service. Enables mocking in tests.
#[async_trait::async_trait]
pub trait Detect: Send + Sync {
    /// Upload a sketch and decode the detected screen.
    ///
    /// # Errors
    ///
    /// Returns a [`DetectError`] for transport failures, non-success statuses,
    /// and undecodable bodies.
    async fn detect(&self, image: &SketchImage) -> Result<UiScreen, DetectError>;
}
