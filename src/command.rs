//! Plugin command — file pick → detect → render, with one error dialog.
//!
//! DESIGN
//! ======
//! The command owns no host objects. The file picker, the detection service
//! and the dialog surface are injected as trait objects, and the document is
//! borrowed for the duration of one run. Every failure is caught here exactly
//! once and shown to the user as a single dialog; nothing is retried and
//! partial document changes are kept.

#[cfg(test)]
#[path = "command_test.rs"]
mod tests;

use std::sync::Arc;

use canvas::doc::{DocError, NodeId, SceneHost};
use tracing::{info, warn};

use crate::catalog::UiElementCatalog;
use crate::detect::types::IMAGE_EXTENSIONS;
use crate::detect::{Detect, DetectError, SketchImage};
use crate::render::{ArtboardRenderer, RenderError};

/// Title of the dialog shown for any failed run.
pub const ERROR_DIALOG_TITLE: &str = "Server failed";

// =============================================================================
// HOST CAPABILITIES
// =============================================================================

/// Lets the user choose a sketch image.
#[async_trait::async_trait]
pub trait FilePicker: Send + Sync {
    /// Ask for a file with one of `extensions`. `Ok(None)` means the user
    /// cancelled.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the chosen file cannot be read.
    async fn pick_image(&self, extensions: &[&str]) -> std::io::Result<Option<SketchImage>>;
}

/// Modal dialogs offered by the host.
#[async_trait::async_trait]
pub trait Dialogs: Send + Sync {
    /// Show an error dialog and wait for the user to dismiss it.
    async fn error(&self, title: &str, message: &str);
}

// =============================================================================
// ERRORS & OUTCOME
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("could not read sketch: {0}")]
    FileRead(#[from] std::io::Error),
    #[error(transparent)]
    Detect(#[from] DetectError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Stable tag for the kind of failure a run ended with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileRead,
    Network,
    Server,
    Decode,
    UnknownElement,
    InvalidGeometry,
    Document,
}

impl PluginError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileRead(_) => ErrorKind::FileRead,
            Self::Detect(DetectError::Network(_) | DetectError::HttpClientBuild(_)) => ErrorKind::Network,
            Self::Detect(DetectError::ServerOverloaded) => ErrorKind::Server,
            Self::Detect(DetectError::Decode(_)) => ErrorKind::Decode,
            Self::Render(RenderError::UnknownElement(_)) => ErrorKind::UnknownElement,
            Self::Render(RenderError::InvalidGeometry { .. } | RenderError::InvalidTargetSize { .. }) => {
                ErrorKind::InvalidGeometry
            }
            Self::Render(RenderError::Document(_)) => ErrorKind::Document,
        }
    }
}

impl From<DocError> for PluginError {
    fn from(e: DocError) -> Self {
        Self::Render(RenderError::Document(e))
    }
}

/// Message shown in the error dialog for `err`.
#[must_use]
pub fn error_message(err: &PluginError) -> String {
    format!("Sorry! {err}")
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The user closed the picker without choosing a file.
    Cancelled,
    /// A wireframe artboard was added to the document.
    Rendered(NodeId),
    /// The run failed and an error dialog was shown.
    Failed(ErrorKind),
}

// =============================================================================
// COMMAND
// =============================================================================

pub struct PluginCommand {
    picker: Arc<dyn FilePicker>,
    detector: Arc<dyn Detect>,
    renderer: ArtboardRenderer,
    dialogs: Arc<dyn Dialogs>,
}

impl PluginCommand {
    #[must_use]
    pub fn new(
        picker: Arc<dyn FilePicker>,
        detector: Arc<dyn Detect>,
        catalog: Arc<UiElementCatalog>,
        dialogs: Arc<dyn Dialogs>,
    ) -> Self {
        Self { picker, detector, renderer: ArtboardRenderer::new(catalog), dialogs }
    }

    /// Run the command once against `host`.
    pub async fn run(&self, host: &mut dyn SceneHost) -> CommandOutcome {
        match self.generate_screen(host).await {
            Ok(None) => {
                info!("command: no sketch chosen");
                CommandOutcome::Cancelled
            }
            Ok(Some(artboard)) => CommandOutcome::Rendered(artboard),
            Err(err) => {
                let kind = err.kind();
                warn!(?kind, error = %err, "command: failed");
                self.dialogs
                    .error(ERROR_DIALOG_TITLE, &error_message(&err))
                    .await;
                CommandOutcome::Failed(kind)
            }
        }
    }

    async fn generate_screen(&self, host: &mut dyn SceneHost) -> Result<Option<NodeId>, PluginError> {
        let Some(sketch) = self.picker.pick_image(&IMAGE_EXTENSIONS).await? else {
            return Ok(None);
        };
        info!(file = %sketch.file_name, "command: sketch chosen");

        let screen = self.detector.detect(&sketch).await?;
        let artboard = self
            .renderer
            .render(host, screen.width, screen.height, &screen)?;
        Ok(Some(artboard))
    }
}
