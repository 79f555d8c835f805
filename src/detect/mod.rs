//! Detection — sketch image → Metamorph service → decoded UI screen.
//!
//! DESIGN
//! ======
//! `DetectionClient` is a thin HTTP wrapper: one multipart POST, one JSON
//! response, no retries and no timeouts. Callers depend on the [`Detect`]
//! trait so the command can be driven by a mock in tests. Response decoding
//! lives in [`types::parse_screen`] as a pure function.
//!
//! The service contract is one `UIScreen` object per request.

pub mod client;
pub mod config;
pub mod types;

pub use client::DetectionClient;
pub use config::DetectConfig;
pub use types::{Detect, DetectError, DetectedElement, Dimension, Position, SketchImage, UiScreen};
