//! Document model: scenegraph nodes, the host capability trait, and the
//! in-memory store.
//!
//! A document is a tree rooted at a single `Root` node. Artboards hang off the
//! root; rectangles hang off the root or an artboard. Nodes are created
//! detached, configured, then parented with [`SceneHost::add_child`]. Node
//! positions are parent-relative, so [`SceneHost::move_in_parent_coordinates`]
//! is only valid once a node has a parent.
//!
//! The renderer only sees the [`SceneHost`] trait. [`DocStore`] is the
//! in-memory implementation used by the CLI host and by tests; its contents
//! can be exported as a [`NodeSnapshot`] tree for JSON output.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::color::Color;
use crate::consts::ROOT_NAME;

/// Unique identifier for a scenegraph node.
pub type NodeId = Uuid;

/// The kind of a scenegraph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// The document root. Exactly one per document.
    Root,
    /// A named canvas frame that contains shapes.
    Artboard,
    /// An axis-aligned rectangle shape.
    Rectangle,
}

/// An image fill referencing a placeholder asset by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageFill {
    /// Asset key the fill was created from.
    pub asset: String,
    /// Width of the source image in pixels.
    pub natural_width: f64,
    /// Height of the source image in pixels.
    pub natural_height: f64,
}

/// How a node's interior is painted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Fill {
    Solid { color: Color },
    Image(ImageFill),
}

/// A node as stored in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub name: String,
    /// Left edge in parent coordinates.
    pub x: f64,
    /// Top edge in parent coordinates.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Option<Fill>,
    /// Responsive resize flag; only meaningful on artboards.
    pub dynamic_layout: bool,
    pub parent: Option<NodeId>,
    /// Child ids in insertion order. Later children draw on top.
    pub children: Vec<NodeId>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            name: String::new(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            fill: None,
            dynamic_layout: false,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// Errors produced by document mutations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DocError {
    #[error("node not found: {0}")]
    NotFound(NodeId),
    #[error("node {0} has no parent; insert it before moving it")]
    Detached(NodeId),
    #[error("node {0} already has a parent")]
    AlreadyParented(NodeId),
    #[error("a {child:?} node cannot be placed inside a {parent:?} node")]
    InvalidParent { parent: NodeKind, child: NodeKind },
    #[error("invalid size {width}x{height}")]
    InvalidSize { width: f64, height: f64 },
}

// =============================================================================
// HOST CAPABILITY
// =============================================================================

/// Document operations a host design application must provide.
///
/// This is the only surface the renderer writes through, so any host (a real
/// design tool bridge, or [`DocStore`]) can receive generated wireframes.
pub trait SceneHost {
    /// Id of the document root node.
    fn root(&self) -> NodeId;

    /// Create a detached, empty artboard.
    fn create_artboard(&mut self) -> NodeId;

    /// Create a detached, empty rectangle.
    fn create_rectangle(&mut self) -> NodeId;

    /// Rename a node.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::NotFound`] if the node does not exist.
    fn set_name(&mut self, id: NodeId, name: &str) -> Result<(), DocError>;

    /// Set a node's width and height.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::InvalidSize`] for negative or non-finite sizes.
    fn resize(&mut self, id: NodeId, width: f64, height: f64) -> Result<(), DocError>;

    /// Replace a node's fill.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::NotFound`] if the node does not exist.
    fn set_fill(&mut self, id: NodeId, fill: Fill) -> Result<(), DocError>;

    /// Toggle responsive layout on a node.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::NotFound`] if the node does not exist.
    fn set_dynamic_layout(&mut self, id: NodeId, enabled: bool) -> Result<(), DocError>;

    /// Append `child` as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Fails if either node is missing, the child is already parented, or the
    /// parent kind cannot contain the child kind.
    fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DocError>;

    /// Move a parented node so its top-left corner sits at `(x, y)` in its
    /// parent's coordinate space.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::Detached`] when the node has no parent yet.
    fn move_in_parent_coordinates(&mut self, id: NodeId, x: f64, y: f64) -> Result<(), DocError>;
}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

/// In-memory scenegraph document.
pub struct DocStore {
    root: NodeId,
    nodes: HashMap<NodeId, Node>,
}

impl DocStore {
    /// Create a document containing only the root node.
    #[must_use]
    pub fn new() -> Self {
        let mut root = Node::new(NodeKind::Root);
        root.name = ROOT_NAME.to_owned();
        let id = root.id;
        let mut nodes = HashMap::new();
        nodes.insert(id, root);
        Self { root: id, nodes }
    }

    /// Return a reference to a node by id.
    #[must_use]
    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Children of a node in draw order. Empty for unknown ids.
    #[must_use]
    pub fn children(&self, id: &NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    /// Attached children of the root that are artboards, in insertion order.
    #[must_use]
    pub fn artboards(&self) -> Vec<&Node> {
        self.children(&self.root)
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .filter(|node| node.kind == NodeKind::Artboard)
            .collect()
    }

    /// First attached node with the given name, searching depth-first.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Node> {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = self.nodes.get(&id)?;
            if node.kind != NodeKind::Root && node.name == name {
                return Some(node);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    /// Number of nodes, excluding the root. Includes detached nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Returns `true` if the document holds nothing but its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Export the attached tree, starting at the root.
    #[must_use]
    pub fn snapshot(&self) -> NodeSnapshot {
        self.snapshot_node(&self.root)
            .unwrap_or_else(|| NodeSnapshot::empty_root(self.root))
    }

    fn snapshot_node(&self, id: &NodeId) -> Option<NodeSnapshot> {
        let node = self.nodes.get(id)?;
        Some(NodeSnapshot {
            id: node.id,
            kind: node.kind,
            name: node.name.clone(),
            x: node.x,
            y: node.y,
            width: node.width,
            height: node.height,
            fill: node.fill.clone(),
            dynamic_layout: node.dynamic_layout,
            children: node
                .children
                .iter()
                .filter_map(|child| self.snapshot_node(child))
                .collect(),
        })
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DocError> {
        self.nodes.get_mut(&id).ok_or(DocError::NotFound(id))
    }

    fn insert_detached(&mut self, kind: NodeKind) -> NodeId {
        let node = Node::new(kind);
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }
}

impl Default for DocStore {
    fn default() -> Self {
        Self::new()
    }
}

fn can_contain(parent: NodeKind, child: NodeKind) -> bool {
    matches!(
        (parent, child),
        (NodeKind::Root, NodeKind::Artboard | NodeKind::Rectangle) | (NodeKind::Artboard, NodeKind::Rectangle)
    )
}

impl SceneHost for DocStore {
    fn root(&self) -> NodeId {
        self.root
    }

    fn create_artboard(&mut self) -> NodeId {
        self.insert_detached(NodeKind::Artboard)
    }

    fn create_rectangle(&mut self) -> NodeId {
        self.insert_detached(NodeKind::Rectangle)
    }

    fn set_name(&mut self, id: NodeId, name: &str) -> Result<(), DocError> {
        self.node_mut(id)?.name = name.to_owned();
        Ok(())
    }

    fn resize(&mut self, id: NodeId, width: f64, height: f64) -> Result<(), DocError> {
        let valid = |v: f64| v.is_finite() && v >= 0.0;
        if !valid(width) || !valid(height) {
            return Err(DocError::InvalidSize { width, height });
        }
        let node = self.node_mut(id)?;
        node.width = width;
        node.height = height;
        Ok(())
    }

    fn set_fill(&mut self, id: NodeId, fill: Fill) -> Result<(), DocError> {
        self.node_mut(id)?.fill = Some(fill);
        Ok(())
    }

    fn set_dynamic_layout(&mut self, id: NodeId, enabled: bool) -> Result<(), DocError> {
        self.node_mut(id)?.dynamic_layout = enabled;
        Ok(())
    }

    fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DocError> {
        let parent_kind = self
            .nodes
            .get(&parent)
            .ok_or(DocError::NotFound(parent))?
            .kind;
        let child_node = self.nodes.get(&child).ok_or(DocError::NotFound(child))?;
        if !can_contain(parent_kind, child_node.kind) {
            return Err(DocError::InvalidParent { parent: parent_kind, child: child_node.kind });
        }
        if child_node.parent.is_some() {
            return Err(DocError::AlreadyParented(child));
        }

        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    fn move_in_parent_coordinates(&mut self, id: NodeId, x: f64, y: f64) -> Result<(), DocError> {
        let node = self.node_mut(id)?;
        if node.parent.is_none() {
            return Err(DocError::Detached(id));
        }
        node.x = x;
        node.y = y;
        Ok(())
    }
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Serializable view of an attached subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub kind: NodeKind,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub dynamic_layout: bool,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<NodeSnapshot>,
}

impl NodeSnapshot {
    fn empty_root(id: NodeId) -> Self {
        Self {
            id,
            kind: NodeKind::Root,
            name: ROOT_NAME.to_owned(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            fill: None,
            dynamic_layout: false,
            children: Vec::new(),
        }
    }
}
