//! Metamorph detection client.
//!
//! Thin HTTP wrapper around the `predict` endpoint: one multipart upload with
//! the sketch under the `image` field, one JSON `UIScreen` back.

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

use reqwest::multipart::{Form, Part};
use tracing::{info, warn};

use super::config::DetectConfig;
use super::types::{Detect, DetectError, SketchImage, UiScreen, parse_screen};

/// Multipart field name the service reads the sketch from.
pub const IMAGE_FIELD: &str = "image";

// =============================================================================
// CLIENT
// =============================================================================

pub struct DetectionClient {
    http: reqwest::Client,
    config: DetectConfig,
}

impl DetectionClient {
    /// Build a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::HttpClientBuild`] if the TLS backend fails to
    /// initialize.
    pub fn new(config: DetectConfig) -> Result<Self, DetectError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| DetectError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub fn config(&self) -> &DetectConfig {
        &self.config
    }

    async fn detect_inner(&self, image: &SketchImage) -> Result<UiScreen, DetectError> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(image.mime())
            .map_err(|e| DetectError::Network(e.to_string()))?;
        let form = Form::new().part(IMAGE_FIELD, part);
        let url = self.config.request_url();

        info!(%url, file = %image.file_name, bytes = image.bytes.len(), "detect: uploading sketch");

        let response = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| DetectError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "detect: service rejected sketch");
            return Err(DetectError::ServerOverloaded);
        }

        let text = response
            .text()
            .await
            .map_err(|e| DetectError::Network(e.to_string()))?;
        let screen = parse_screen(&text)?;

        info!(screen = %screen.id, elements = screen.objects.len(), "detect: screen decoded");
        Ok(screen)
    }
}

#[async_trait::async_trait]
impl Detect for DetectionClient {
    async fn detect(&self, image: &SketchImage) -> Result<UiScreen, DetectError> {
        self.detect_inner(image).await
    }
}
