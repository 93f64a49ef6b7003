//! Interactive image map editor.
//!
//! The editor is a state machine driven by pointer events on a canvas laid
//! over the image. It tracks the active tool, the gesture in progress and
//! the shapes drawn so far, and keeps an SVG canvas scene with live previews
//! and handles in sync.
//!
//! ```text
//! Idle --select_tool--> ToolSelected(tool)
//!   rectangle/ellipse: pointer_down -> Dragging -> pointer_move* -> pointer_up -> ToolSelected
//!   polygon:           pointer_down -> CollectingPoints -> ... double-click -> ToolSelected
//! ```
//!
//! All editor coordinates live in the canvas's 0-100 space and the model is
//! tagged [`CoordinateSpace::Percent`].

mod file_io;
mod types;

pub use file_io::EditorHost;
pub use types::{
    CanvasBox, CanvasPoint, EditorSettings, EditorState, EditorTool, GestureOutcome, PointerInput,
};

use imagemap_core::ImageAttributes;
use tracing::{debug, warn};

use crate::model::{
    CoordinateSpace, Point, PointList, Region, RegionEllipse, RegionGeometry, RegionPolygon,
    RegionRectangle, ShapeKind, ShapeLayer,
};
use crate::scene::{SvgElement, SVG_NS};
use crate::serialization::LegacyShapes;
use crate::svg_renderer::{create_ellipse, create_polygon, create_rect};

/// Drag listeners registered for the duration of one rectangle/ellipse
/// gesture. Dropping them deregisters them.
#[derive(Debug, Clone)]
struct DragListeners {
    tool: EditorTool,
    start: CanvasPoint,
    preview: usize,
}

#[derive(Debug, Clone, Default)]
enum Gesture {
    #[default]
    None,
    Drag(DragListeners),
    Polygon {
        points: PointList,
        preview: usize,
    },
}

/// One open editing session for one image.
///
/// The session exclusively owns its shape model; closing it discards
/// anything not saved.
#[derive(Debug, Clone)]
pub struct EditorSession {
    image: ImageAttributes,
    canvas_box: CanvasBox,
    settings: EditorSettings,
    tool: Option<EditorTool>,
    gesture: Gesture,
    layer: ShapeLayer,
    canvas: SvgElement,
}

impl EditorSession {
    /// Opens a session with an empty model.
    pub fn open(image: ImageAttributes, canvas_box: CanvasBox, settings: EditorSettings) -> Self {
        let mut canvas = SvgElement::new("svg");
        canvas.add_class(settings.canvas_class.clone());
        canvas.set_attr("xmlns", SVG_NS);
        canvas.set_attr("viewBox", "0 0 100 100");
        canvas.set_attr("preserveAspectRatio", "none");
        debug!(
            "Opened image map editor for {}",
            image.src().unwrap_or("<image>")
        );
        Self {
            image,
            canvas_box,
            settings,
            tool: None,
            gesture: Gesture::None,
            layer: ShapeLayer::new(CoordinateSpace::Percent),
            canvas,
        }
    }

    /// Closes the session, discarding the in-memory model.
    pub fn close(self) {
        debug!(
            "Closed image map editor with {} unsaved shapes",
            self.layer.len()
        );
    }

    pub fn image(&self) -> &ImageAttributes {
        &self.image
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// The shapes drawn so far.
    pub fn layer(&self) -> &ShapeLayer {
        &self.layer
    }

    /// The canvas scene: drawn shapes, previews and handles.
    pub fn canvas(&self) -> &SvgElement {
        &self.canvas
    }

    pub fn shape_count(&self) -> usize {
        self.layer.len()
    }

    /// Updates the canvas's on-screen box, e.g. after a resize.
    pub fn set_canvas_box(&mut self, canvas_box: CanvasBox) {
        self.canvas_box = canvas_box;
    }

    pub fn tool(&self) -> Option<EditorTool> {
        self.tool
    }

    /// Selects a drawing tool. An unfinished polygon is discarded.
    pub fn select_tool(&mut self, tool: EditorTool) {
        if self.tool != Some(tool) {
            self.abandon_gesture();
        }
        self.tool = Some(tool);
    }

    /// Deselects the tool, returning to idle.
    pub fn clear_tool(&mut self) {
        self.abandon_gesture();
        self.tool = None;
    }

    pub fn state(&self) -> EditorState {
        match (&self.gesture, self.tool) {
            (Gesture::Drag(drag), _) => EditorState::Dragging(drag.tool),
            (Gesture::Polygon { points, .. }, _) => EditorState::CollectingPoints {
                count: points.len(),
            },
            (Gesture::None, Some(tool)) => EditorState::ToolSelected(tool),
            (Gesture::None, None) => EditorState::Idle,
        }
    }

    /// Whether move/up listeners for a drag are currently registered.
    pub fn has_drag_listeners(&self) -> bool {
        matches!(self.gesture, Gesture::Drag(_))
    }

    /// Vertices of the polygon being collected.
    pub fn pending_points(&self) -> &[Point] {
        match &self.gesture {
            Gesture::Polygon { points, .. } => points.points(),
            _ => &[],
        }
    }

    /// The model in the legacy persisted layout.
    pub fn to_map_file(&self) -> LegacyShapes {
        LegacyShapes::from_layer(&self.layer)
    }

    /// Handles pointer-down on the canvas.
    pub fn pointer_down(&mut self, input: PointerInput) -> GestureOutcome {
        if !input.is_primary() {
            return GestureOutcome::Ignored;
        }
        let Some(tool) = self.tool else {
            return GestureOutcome::Ignored;
        };
        let at = self.canvas_box.to_canvas(input.client_x, input.client_y);
        match tool {
            EditorTool::Rectangle | EditorTool::Ellipse => self.start_drag(tool, at),
            EditorTool::Polygon => self.add_polygon_point(at, input.detail),
        }
    }

    /// Handles pointer-move while a drag is in progress.
    pub fn pointer_move(&mut self, input: PointerInput) -> GestureOutcome {
        let Gesture::Drag(drag) = &self.gesture else {
            return GestureOutcome::Ignored;
        };
        let drag = drag.clone();
        let at = self.canvas_box.to_canvas(input.client_x, input.client_y);
        self.update_drag_preview(&drag, at);
        GestureOutcome::Updated
    }

    /// Handles pointer-up, completing a drag and deregistering its
    /// listeners.
    pub fn pointer_up(&mut self, input: PointerInput) -> GestureOutcome {
        let drag = match std::mem::take(&mut self.gesture) {
            Gesture::Drag(drag) => drag,
            other => {
                self.gesture = other;
                return GestureOutcome::Ignored;
            }
        };
        let end = self.canvas_box.to_canvas(input.client_x, input.client_y);
        self.update_drag_preview(&drag, end);

        let region = match drag.tool {
            EditorTool::Rectangle => Region::new(RegionRectangle::from_corners(
                drag.start.to_point(),
                end.to_point(),
            )),
            _ => Region::new(RegionEllipse::from_center_and_edge(
                drag.start.to_point(),
                end.to_point(),
            )),
        };
        self.complete(region)
    }

    fn start_drag(&mut self, tool: EditorTool, start: CanvasPoint) -> GestureOutcome {
        if self.has_drag_listeners() {
            return GestureOutcome::Ignored;
        }
        let mut preview = match tool {
            EditorTool::Rectangle => create_rect(start.x, start.y, 0.0, 0.0),
            _ => create_ellipse(start.x, start.y, 0.0, 0.0),
        };
        preview.add_class(self.settings.shape_class.clone());
        let preview = self.canvas.append_child(preview);
        self.gesture = Gesture::Drag(DragListeners {
            tool,
            start,
            preview,
        });
        GestureOutcome::Started
    }

    fn update_drag_preview(&mut self, drag: &DragListeners, at: CanvasPoint) {
        let Some(el) = self.canvas.children.get_mut(drag.preview) else {
            return;
        };
        let replacement = match drag.tool {
            EditorTool::Rectangle => {
                let r = RegionRectangle::from_corners(drag.start.to_point(), at.to_point());
                create_rect(r.x, r.y, r.width, r.height)
            }
            _ => {
                let e = RegionEllipse::from_center_and_edge(drag.start.to_point(), at.to_point());
                create_ellipse(e.cx, e.cy, e.rx, e.ry)
            }
        };
        for (name, value) in replacement.attributes() {
            el.set_attr(name, value);
        }
    }

    fn add_polygon_point(&mut self, at: CanvasPoint, detail: u32) -> GestureOutcome {
        if let Gesture::Polygon { points, preview } = &mut self.gesture {
            points.push(at.to_point());
            if let Some(el) = self.canvas.children.get_mut(*preview) {
                el.set_attr("points", points.to_string());
            }
        } else {
            let points = PointList(vec![at.to_point()]);
            let mut el = create_polygon(&points);
            el.add_class(self.settings.shape_class.clone());
            let preview = self.canvas.append_child(el);
            self.gesture = Gesture::Polygon { points, preview };
        }

        if detail == 2 {
            self.finish_polygon()
        } else {
            GestureOutcome::Updated
        }
    }

    fn finish_polygon(&mut self) -> GestureOutcome {
        let Gesture::Polygon { points, preview } = std::mem::take(&mut self.gesture) else {
            return GestureOutcome::Ignored;
        };
        match RegionPolygon::new(points) {
            Ok(poly) => self.complete(Region::new(poly)),
            Err(e) => {
                warn!("Discarding polygon: {}", e);
                self.remove_canvas_child(preview);
                GestureOutcome::Discarded
            }
        }
    }

    /// Adds a finished shape to the model and draws its handles.
    fn complete(&mut self, region: Region) -> GestureOutcome {
        let kind: ShapeKind = region.kind();
        for handle in region.shape.handles() {
            self.add_handle(handle);
        }
        debug!("Added {} to image map ({} shapes)", kind, self.layer.len() + 1);
        self.layer.push(region);
        GestureOutcome::Completed(kind)
    }

    fn add_handle(&mut self, at: Point) {
        let mut h = SvgElement::new("circle");
        h.set_attr("cx", crate::model::format_number(at.x));
        h.set_attr("cy", crate::model::format_number(at.y));
        h.set_attr("r", crate::model::format_number(self.settings.handle_radius));
        h.add_class(self.settings.handle_class.clone());
        self.canvas.append_child(h);
    }

    fn abandon_gesture(&mut self) {
        match std::mem::take(&mut self.gesture) {
            Gesture::None => {}
            Gesture::Drag(drag) => {
                debug!("Cancelling {:?} drag", drag.tool);
                self.remove_canvas_child(drag.preview);
            }
            Gesture::Polygon { points, preview } => {
                debug!("Discarding unfinished polygon with {} points", points.len());
                self.remove_canvas_child(preview);
            }
        }
    }

    fn remove_canvas_child(&mut self, index: usize) {
        if index < self.canvas.children.len() {
            self.canvas.children.remove(index);
        }
    }
}
