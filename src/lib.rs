//! Sketch-to-wireframe pipeline for the Metamorph UI element detector.
//!
//! A user picks a photo of a hand-drawn UI sketch; the sketch is uploaded to
//! the Metamorph detection service, which answers with the UI elements it
//! found (type, position, size). Each element is then drawn onto a fresh
//! artboard as a placeholder image scaled to fit its box.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Element-type name → placeholder asset table |
//! | [`detect`] | Detection service client, wire types, configuration |
//! | [`render`] | Artboard rendering through the `canvas::doc::SceneHost` trait |
//! | [`command`] | End-to-end command with injected picker and dialogs |

pub mod catalog;
pub mod command;
pub mod detect;
pub mod render;

pub use catalog::{PlaceholderAsset, UiElementCatalog};
pub use command::{CommandOutcome, Dialogs, ErrorKind, FilePicker, PluginCommand, PluginError};
pub use detect::{Detect, DetectConfig, DetectionClient, UiScreen};
pub use render::{ArtboardRenderer, RenderError};
