#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn parse_single_screen() {
    let body = serde_json::json!({
        "id": "42",
        "width": 800,
        "height": 600,
        "objects": [
            { "name": "button", "position": { "x": 10, "y": 20 }, "dimension": { "width": 100, "height": 40 } },
            { "name": "slider", "position": { "x": 5.5, "y": 300 }, "dimension": { "width": 320, "height": 48 }, "probability": 0.93 }
        ]
    })
    .to_string();

    let screen = parse_screen(&body).unwrap();
    assert_eq!(screen.id, "42");
    assert_eq!((screen.width, screen.height), (800.0, 600.0));
    assert_eq!(screen.objects.len(), 2);
    assert_eq!(screen.objects[0].name, "button");
    assert_eq!(screen.objects[0].position, Position { x: 10.0, y: 20.0 });
    assert_eq!(screen.objects[0].dimension, Dimension { width: 100.0, height: 40.0 });
    assert!(screen.objects[0].probability.is_none());
    assert_eq!(screen.objects[1].position.x, 5.5);
    assert_eq!(screen.objects[1].probability, Some(0.93));
}

#[test]
fn numeric_screen_id_becomes_string() {
    let screen = parse_screen(r#"{"id": 7, "width": 1, "height": 1, "objects": []}"#).unwrap();
    assert_eq!(screen.id, "7");
    assert!(screen.objects.is_empty());
}

#[test]
fn parse_rejects_non_json() {
    let err = parse_screen("<html>502 Bad Gateway</html>").unwrap_err();
    assert!(matches!(err, DetectError::Decode(_)));
}

#[test]
fn parse_rejects_screen_list() {
    let body = r#"[{"id": "1", "width": 1, "height": 1, "objects": []}]"#;
    assert!(matches!(parse_screen(body), Err(DetectError::Decode(_))));
}

#[test]
fn parse_rejects_bare_element_list() {
    let body = r#"[{"name": "button", "position": {"x": 1, "y": 2},
        "dimension": {"width": 3, "height": 4}, "probability": 0.9}]"#;
    let err = parse_screen(body).unwrap_err();
    assert!(matches!(err, DetectError::Decode(_)));
    assert!(err.to_string().starts_with("unexpected response from detection service"));
}

#[test]
fn parse_rejects_missing_fields() {
    let body = r#"{"id": "1", "width": 1, "height": 1, "objects": [{"name": "button", "position": {"x": 1, "y": 2}}]}"#;
    let err = parse_screen(body).unwrap_err();
    assert!(err.to_string().contains("dimension"));
    assert!(matches!(parse_screen(r#"{"id": "1"}"#), Err(DetectError::Decode(_))));
}

#[test]
fn server_error_message_is_fixed() {
    assert_eq!(DetectError::ServerOverloaded.to_string(), "Server overloaded");
}

#[test]
fn mime_follows_extension() {
    assert_eq!(SketchImage::new("sketch.png", vec![]).mime(), "image/png");
    assert_eq!(SketchImage::new("SKETCH.PNG", vec![]).mime(), "image/png");
    assert_eq!(SketchImage::new("sketch.jpg", vec![]).mime(), "image/jpeg");
    assert_eq!(SketchImage::new("sketch.jpeg", vec![]).mime(), "image/jpeg");
}

#[test]
fn has_extension_is_case_insensitive() {
    assert!(has_extension(Path::new("/tmp/a.JPG"), &IMAGE_EXTENSIONS));
    assert!(!has_extension(Path::new("/tmp/a.gif"), &IMAGE_EXTENSIONS));
    assert!(!has_extension(Path::new("/tmp/png"), &IMAGE_EXTENSIONS));
}
