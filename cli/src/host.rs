//! Terminal host — file picking, dialogs, and document output for the CLI.

#[cfg(test)]
#[path = "host_test.rs"]
mod tests;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use canvas::doc::DocStore;
use metamorph::detect::SketchImage;
use metamorph::detect::types::has_extension;
use metamorph::{Dialogs, FilePicker};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

// =============================================================================
// FILE PICKER
// =============================================================================

/// Picks the sketch given on the command line, or asks for a path on stdin.
pub struct PathPicker {
    path: Option<PathBuf>,
}

impl PathPicker {
    #[must_use]
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    async fn prompt() -> io::Result<Option<PathBuf>> {
        {
            let mut stderr = io::stderr().lock();
            write!(stderr, "Sketch image path (empty to cancel): ")?;
            stderr.flush()?;
        }
        let mut line = String::new();
        BufReader::new(tokio::io::stdin())
            .read_line(&mut line)
            .await?;
        Ok(parse_prompt_line(&line))
    }
}

/// A blank answer cancels the pick.
fn parse_prompt_line(line: &str) -> Option<PathBuf> {
    let trimmed = line.trim();
    (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
}

/// Load an image file, rejecting extensions outside `extensions`.
///
/// # Errors
///
/// Returns `InvalidInput` for a non-image path, or the read error.
pub async fn read_sketch(path: &Path, extensions: &[&str]) -> io::Result<SketchImage> {
    if !has_extension(path, extensions) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a {} image", path.display(), extensions.join("/")),
        ));
    }
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
    Ok(SketchImage::new(file_name, bytes))
}

#[async_trait::async_trait]
impl FilePicker for PathPicker {
    async fn pick_image(&self, extensions: &[&str]) -> io::Result<Option<SketchImage>> {
        let path = match &self.path {
            Some(path) => Some(path.clone()),
            None => Self::prompt().await?,
        };
        let Some(path) = path else {
            return Ok(None);
        };
        read_sketch(&path, extensions).await.map(Some)
    }
}

// =============================================================================
// DIALOGS
// =============================================================================

/// Shows dialogs as `title: message` lines on stderr.
pub struct StderrDialogs;

#[async_trait::async_trait]
impl Dialogs for StderrDialogs {
    async fn error(&self, title: &str, message: &str) {
        if let Err(e) = writeln!(io::stderr(), "{}", format_dialog(title, message)) {
            warn!(error = %e, "dialog: stderr write failed");
        }
    }
}

fn format_dialog(title: &str, message: &str) -> String {
    format!("{title}: {message}")
}

// =============================================================================
// OUTPUT
// =============================================================================

/// Serialize the document tree as pretty JSON.
///
/// # Errors
///
/// Returns the serialization error.
pub fn render_snapshot(doc: &DocStore) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&doc.snapshot())
}

/// Write the document to `out`, or stdout when absent.
///
/// # Errors
///
/// Returns serialization or I/O errors.
pub fn write_snapshot(doc: &DocStore, out: Option<&Path>) -> Result<(), crate::CliError> {
    let rendered = render_snapshot(doc)?;
    match out {
        Some(path) => std::fs::write(path, format!("{rendered}\n"))?,
        None => println!("{rendered}"),
    }
    Ok(())
}
