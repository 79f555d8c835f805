//! Scenegraph document model for wireframe rendering.
//!
//! This crate stands in for the host design application's document. It owns
//! the node types that make up a document (artboards and rectangles with
//! solid or image fills), the [`doc::SceneHost`] capability trait that the
//! renderer writes through, and [`doc::DocStore`], an in-memory implementation
//! whose contents can be exported as a serializable snapshot.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`doc`] | Node types, the `SceneHost` trait, and the in-memory `DocStore` |
//! | [`color`] | Hex color parsing and formatting |
//! | [`consts`] | Shared constants (artboard fill, document-center anchor) |

pub mod color;
pub mod consts;
pub mod doc;
