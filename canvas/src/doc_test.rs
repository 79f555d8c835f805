#![allow(clippy::float_cmp)]

use super::*;

fn artboard_with_rect(doc: &mut DocStore) -> (NodeId, NodeId) {
    let board = doc.create_artboard();
    doc.add_child(doc.root(), board).unwrap();
    let rect = doc.create_rectangle();
    doc.add_child(board, rect).unwrap();
    (board, rect)
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_store_has_only_root() {
    let doc = DocStore::new();
    assert!(doc.is_empty());
    assert_eq!(doc.len(), 0);
    let root = doc.get(&doc.root()).unwrap();
    assert_eq!(root.kind, NodeKind::Root);
    assert_eq!(root.name, "root");
    assert!(root.parent.is_none());
}

#[test]
fn created_nodes_start_detached_and_empty() {
    let mut doc = DocStore::new();
    let id = doc.create_rectangle();
    let node = doc.get(&id).unwrap();
    assert_eq!(node.kind, NodeKind::Rectangle);
    assert!(node.parent.is_none());
    assert!(node.fill.is_none());
    assert_eq!(doc.len(), 1);
    assert!(doc.children(&doc.root()).is_empty());
}

// =============================================================
// Mutation
// =============================================================

#[test]
fn set_name_resize_fill_and_layout() {
    let mut doc = DocStore::new();
    let id = doc.create_artboard();
    doc.set_name(id, "wireframe_1").unwrap();
    doc.resize(id, 800.0, 600.0).unwrap();
    doc.set_fill(id, Fill::Solid { color: Color::rgb(0xf2, 0xf2, 0xf2) })
        .unwrap();
    doc.set_dynamic_layout(id, true).unwrap();

    let node = doc.get(&id).unwrap();
    assert_eq!(node.name, "wireframe_1");
    assert_eq!((node.width, node.height), (800.0, 600.0));
    assert_eq!(node.fill, Some(Fill::Solid { color: Color::rgb(0xf2, 0xf2, 0xf2) }));
    assert!(node.dynamic_layout);
}

#[test]
fn resize_rejects_negative_and_non_finite() {
    let mut doc = DocStore::new();
    let id = doc.create_rectangle();
    assert!(matches!(doc.resize(id, -1.0, 10.0), Err(DocError::InvalidSize { .. })));
    assert!(matches!(doc.resize(id, 10.0, f64::NAN), Err(DocError::InvalidSize { .. })));
    assert!(doc.resize(id, 0.0, 0.0).is_ok());
}

#[test]
fn mutating_unknown_node_is_not_found() {
    let mut doc = DocStore::new();
    let ghost = Uuid::new_v4();
    assert_eq!(doc.set_name(ghost, "x"), Err(DocError::NotFound(ghost)));
    assert_eq!(doc.resize(ghost, 1.0, 1.0), Err(DocError::NotFound(ghost)));
    assert_eq!(doc.move_in_parent_coordinates(ghost, 1.0, 1.0), Err(DocError::NotFound(ghost)));
}

// =============================================================
// Parenting
// =============================================================

#[test]
fn add_child_preserves_insertion_order() {
    let mut doc = DocStore::new();
    let board = doc.create_artboard();
    doc.add_child(doc.root(), board).unwrap();
    let ids: Vec<NodeId> = (0..3)
        .map(|_| {
            let id = doc.create_rectangle();
            doc.add_child(board, id).unwrap();
            id
        })
        .collect();
    assert_eq!(doc.children(&board), ids.as_slice());
    assert_eq!(doc.get(&ids[1]).unwrap().parent, Some(board));
}

#[test]
fn add_child_rejects_second_parent() {
    let mut doc = DocStore::new();
    let (board, rect) = artboard_with_rect(&mut doc);
    let other = doc.create_artboard();
    doc.add_child(doc.root(), other).unwrap();
    assert_eq!(doc.add_child(other, rect), Err(DocError::AlreadyParented(rect)));
    assert_eq!(doc.children(&board), &[rect]);
}

#[test]
fn add_child_enforces_containment_rules() {
    let mut doc = DocStore::new();
    let (board, rect) = artboard_with_rect(&mut doc);

    let nested = doc.create_artboard();
    assert!(matches!(
        doc.add_child(board, nested),
        Err(DocError::InvalidParent { parent: NodeKind::Artboard, child: NodeKind::Artboard })
    ));

    let inner = doc.create_rectangle();
    assert!(matches!(
        doc.add_child(rect, inner),
        Err(DocError::InvalidParent { parent: NodeKind::Rectangle, .. })
    ));

    let root = doc.root();
    assert!(matches!(doc.add_child(board, root), Err(DocError::InvalidParent { .. })));
}

#[test]
fn move_requires_parent() {
    let mut doc = DocStore::new();
    let rect = doc.create_rectangle();
    assert_eq!(doc.move_in_parent_coordinates(rect, 10.0, 20.0), Err(DocError::Detached(rect)));

    let board = doc.create_artboard();
    doc.add_child(doc.root(), board).unwrap();
    doc.add_child(board, rect).unwrap();
    doc.move_in_parent_coordinates(rect, 10.0, 20.0).unwrap();
    let node = doc.get(&rect).unwrap();
    assert_eq!((node.x, node.y), (10.0, 20.0));
}

// =============================================================
// Queries & snapshot
// =============================================================

#[test]
fn artboards_lists_root_children_in_order() {
    let mut doc = DocStore::new();
    let a = doc.create_artboard();
    let b = doc.create_artboard();
    doc.add_child(doc.root(), a).unwrap();
    doc.add_child(doc.root(), b).unwrap();
    let ids: Vec<NodeId> = doc.artboards().iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![a, b]);
}

#[test]
fn find_by_name_skips_detached_nodes() {
    let mut doc = DocStore::new();
    let (_, rect) = artboard_with_rect(&mut doc);
    doc.set_name(rect, "button").unwrap();
    let loose = doc.create_rectangle();
    doc.set_name(loose, "slider").unwrap();

    assert_eq!(doc.find_by_name("button").map(|n| n.id), Some(rect));
    assert!(doc.find_by_name("slider").is_none());
    assert!(doc.find_by_name("root").is_none());
}

#[test]
fn snapshot_serializes_attached_tree() {
    let mut doc = DocStore::new();
    let (board, rect) = artboard_with_rect(&mut doc);
    doc.set_name(board, "wireframe_7").unwrap();
    doc.set_dynamic_layout(board, true).unwrap();
    doc.set_name(rect, "chip").unwrap();
    doc.set_fill(
        rect,
        Fill::Image(ImageFill { asset: "chip".into(), natural_width: 64.0, natural_height: 32.0 }),
    )
    .unwrap();
    doc.create_rectangle();

    let snap = doc.snapshot();
    assert_eq!(snap.children.len(), 1);
    assert_eq!(snap.children[0].children.len(), 1);

    let json = serde_json::to_value(&snap).unwrap();
    let board_json = &json["children"][0];
    assert_eq!(board_json["kind"], "artboard");
    assert_eq!(board_json["dynamic_layout"], true);
    let rect_json = &board_json["children"][0];
    assert_eq!(rect_json["name"], "chip");
    assert_eq!(rect_json["fill"]["type"], "image");
    assert_eq!(rect_json["fill"]["asset"], "chip");
    assert!(rect_json.get("children").is_none());
    assert!(rect_json.get("dynamic_layout").is_none());
}
