use imagemap_core::image::ATTR_SRC;
use imagemap_core::ImageAttributes;
use imagemap_designer::editor::{
    CanvasBox, EditorSession, EditorSettings, EditorState, EditorTool, GestureOutcome,
    PointerInput,
};
use imagemap_designer::model::{
    CoordinateSpace, Point, RegionEllipse, RegionRectangle, RegionShape, ShapeKind,
};

/// A 200x100 canvas at (50, 50), so client (50 + 2x, 50 + y) is canvas (x, y).
fn session() -> EditorSession {
    EditorSession::open(
        ImageAttributes::new().with(ATTR_SRC, "plan.png"),
        CanvasBox::new(50.0, 50.0, 200.0, 100.0),
        EditorSettings::default(),
    )
}

fn at(x: f64, y: f64) -> PointerInput {
    PointerInput::primary(50.0 + x * 2.0, 50.0 + y)
}

fn double_at(x: f64, y: f64) -> PointerInput {
    PointerInput::double(50.0 + x * 2.0, 50.0 + y)
}

fn handles(s: &EditorSession) -> Vec<(String, String)> {
    s.canvas()
        .children_with_class("image-map-handle")
        .map(|h| {
            (
                h.attr("cx").unwrap_or_default().to_string(),
                h.attr("cy").unwrap_or_default().to_string(),
            )
        })
        .collect()
}

#[test]
fn test_canvas_root() {
    let s = session();
    let canvas = s.canvas();
    assert_eq!(canvas.tag, "svg");
    assert!(canvas.has_class("image-map-editor"));
    assert_eq!(canvas.attr("viewBox"), Some("0 0 100 100"));
    assert_eq!(canvas.attr("preserveAspectRatio"), Some("none"));
    assert_eq!(s.layer().space, CoordinateSpace::Percent);
}

#[test]
fn test_rectangle_drag_backwards_is_normalized() {
    let mut s = session();
    s.select_tool(EditorTool::Rectangle);
    assert_eq!(s.state(), EditorState::ToolSelected(EditorTool::Rectangle));

    assert_eq!(s.pointer_down(at(80.0, 80.0)), GestureOutcome::Started);
    assert!(s.has_drag_listeners());
    assert_eq!(s.state(), EditorState::Dragging(EditorTool::Rectangle));

    assert_eq!(s.pointer_move(at(50.0, 60.0)), GestureOutcome::Updated);
    let preview = &s.canvas().children[0];
    assert_eq!(preview.attr("x"), Some("50"));
    assert_eq!(preview.attr("y"), Some("60"));
    assert_eq!(preview.attr("width"), Some("30"));
    assert_eq!(preview.attr("height"), Some("20"));

    assert_eq!(
        s.pointer_up(at(20.0, 20.0)),
        GestureOutcome::Completed(ShapeKind::Rectangle)
    );
    assert!(!s.has_drag_listeners());
    assert_eq!(s.state(), EditorState::ToolSelected(EditorTool::Rectangle));

    assert_eq!(s.to_map_file().rects, vec![[20.0, 20.0, 60.0, 60.0]]);
    assert_eq!(
        s.layer().regions[0].shape,
        RegionShape::Rectangle(RegionRectangle::new(20.0, 20.0, 60.0, 60.0))
    );
    assert_eq!(
        handles(&s),
        vec![
            ("20".to_string(), "20".to_string()),
            ("80".to_string(), "20".to_string()),
            ("20".to_string(), "80".to_string()),
            ("80".to_string(), "80".to_string()),
        ]
    );
}

#[test]
fn test_moves_after_release_are_ignored() {
    let mut s = session();
    s.select_tool(EditorTool::Rectangle);
    s.pointer_down(at(10.0, 10.0));
    s.pointer_up(at(20.0, 20.0));
    assert_eq!(s.pointer_move(at(90.0, 90.0)), GestureOutcome::Ignored);
    assert_eq!(s.pointer_up(at(90.0, 90.0)), GestureOutcome::Ignored);
    assert_eq!(s.to_map_file().rects, vec![[10.0, 10.0, 10.0, 10.0]]);
}

#[test]
fn test_ellipse_drag_uses_press_point_as_center() {
    let mut s = session();
    s.select_tool(EditorTool::Ellipse);
    s.pointer_down(at(50.0, 50.0));
    s.pointer_move(at(40.0, 70.0));
    assert_eq!(
        s.pointer_up(at(30.0, 60.0)),
        GestureOutcome::Completed(ShapeKind::Ellipse)
    );
    assert_eq!(
        s.layer().regions[0].shape,
        RegionShape::Ellipse(RegionEllipse::new(50.0, 50.0, 20.0, 10.0))
    );
    assert_eq!(handles(&s), vec![("50".to_string(), "50".to_string())]);
    assert_eq!(s.to_map_file().ellipses, vec![[50.0, 50.0, 20.0, 10.0]]);
}

#[test]
fn test_polygon_completes_on_double_click() {
    let mut s = session();
    s.select_tool(EditorTool::Polygon);
    assert_eq!(s.pointer_down(at(10.0, 10.0)), GestureOutcome::Updated);
    assert_eq!(s.pointer_down(at(40.0, 10.0)), GestureOutcome::Updated);
    assert_eq!(s.pointer_down(at(40.0, 40.0)), GestureOutcome::Updated);
    assert_eq!(s.state(), EditorState::CollectingPoints { count: 3 });
    assert_eq!(
        s.canvas().children[0].attr("points"),
        Some("10,10 40,10 40,40")
    );

    assert_eq!(
        s.pointer_down(double_at(10.0, 40.0)),
        GestureOutcome::Completed(ShapeKind::Polygon)
    );
    assert!(s.pending_points().is_empty());
    assert_eq!(s.state(), EditorState::ToolSelected(EditorTool::Polygon));
    assert_eq!(s.shape_count(), 1);
    assert_eq!(s.to_map_file().polygons, vec!["10,10 40,10 40,40 10,40"]);
    assert_eq!(handles(&s).len(), 4);

    // The next click starts a fresh polygon.
    s.pointer_down(at(70.0, 70.0));
    assert_eq!(s.pending_points(), &[Point::new(70.0, 70.0)]);
}

#[test]
fn test_short_polygon_is_discarded() {
    let mut s = session();
    s.select_tool(EditorTool::Polygon);
    s.pointer_down(at(10.0, 10.0));
    assert_eq!(
        s.pointer_down(double_at(20.0, 20.0)),
        GestureOutcome::Discarded
    );
    assert_eq!(s.shape_count(), 0);
    assert!(s.canvas().children.is_empty());
    assert!(s.pending_points().is_empty());
}

#[test]
fn test_shapes_accumulate_across_tools() {
    let mut s = session();
    s.select_tool(EditorTool::Rectangle);
    s.pointer_down(at(0.0, 0.0));
    s.pointer_up(at(10.0, 10.0));

    s.select_tool(EditorTool::Polygon);
    s.pointer_down(at(0.0, 0.0));
    s.pointer_down(at(5.0, 0.0));
    s.pointer_down(double_at(5.0, 5.0));

    s.select_tool(EditorTool::Ellipse);
    s.pointer_down(at(50.0, 50.0));
    s.pointer_up(at(60.0, 55.0));

    let kinds: Vec<_> = s.layer().iter().map(|r| r.kind()).collect();
    assert_eq!(
        kinds,
        vec![ShapeKind::Rectangle, ShapeKind::Polygon, ShapeKind::Ellipse]
    );
    let file = s.to_map_file();
    assert_eq!(file.rects.len(), 1);
    assert_eq!(file.polygons.len(), 1);
    assert_eq!(file.ellipses.len(), 1);
    assert_eq!(file.space, CoordinateSpace::Percent);
}

#[test]
fn test_resize_changes_mapping() {
    let mut s = session();
    s.set_canvas_box(CanvasBox::new(0.0, 0.0, 400.0, 400.0));
    s.select_tool(EditorTool::Rectangle);
    s.pointer_down(PointerInput::primary(40.0, 40.0));
    s.pointer_up(PointerInput::primary(200.0, 200.0));
    assert_eq!(s.to_map_file().rects, vec![[10.0, 10.0, 40.0, 40.0]]);
}

#[test]
fn test_clear_tool_returns_to_idle() {
    let mut s = session();
    s.select_tool(EditorTool::Ellipse);
    s.clear_tool();
    assert_eq!(s.state(), EditorState::Idle);
    assert_eq!(s.pointer_down(at(1.0, 1.0)), GestureOutcome::Ignored);
}
