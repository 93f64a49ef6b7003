//! Editor type definitions: EditorTool, CanvasPoint, CanvasBox, PointerInput, EditorState.

use serde::{Deserialize, Serialize};

use crate::model::{Point, ShapeKind};

/// Drawing tools the editor offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorTool {
    Polygon,
    Rectangle,
    Ellipse,
}

impl EditorTool {
    /// Maps a toolbar command name onto a tool.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "polygon" => Some(Self::Polygon),
            "rect" | "rectangle" => Some(Self::Rectangle),
            "ellipse" => Some(Self::Ellipse),
            unknown => {
                tracing::warn!("Unknown editor tool {}, keeping current tool", unknown);
                None
            }
        }
    }

    /// Whether the tool draws with a press-drag-release gesture.
    pub fn is_drag_tool(&self) -> bool {
        matches!(self, Self::Rectangle | Self::Ellipse)
    }
}

/// Canvas coordinates, 0-100 along each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasPoint {
    pub x: f64,
    pub y: f64,
}

impl CanvasPoint {
    /// Creates a new canvas point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Converts to a model point.
    pub fn to_point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl From<Point> for CanvasPoint {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

/// On-screen bounding box of the editing canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl CanvasBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Maps a screen position linearly onto the 0-100 canvas space.
    ///
    /// A collapsed box maps everything to its origin.
    pub fn to_canvas(&self, client_x: f64, client_y: f64) -> CanvasPoint {
        let map = |client: f64, start: f64, extent: f64| {
            if extent > 0.0 {
                (client - start) / extent * 100.0
            } else {
                0.0
            }
        };
        CanvasPoint::new(
            map(client_x, self.left, self.width),
            map(client_y, self.top, self.height),
        )
    }
}

/// Pointer event as delivered by the host canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub client_x: f64,
    pub client_y: f64,
    /// 0 is the primary button.
    pub button: u16,
    /// Click count within the current gesture (2 for a double-click).
    pub detail: u32,
}

impl PointerInput {
    /// Primary-button single click.
    pub fn primary(client_x: f64, client_y: f64) -> Self {
        Self {
            client_x,
            client_y,
            button: 0,
            detail: 1,
        }
    }

    /// Primary-button double click.
    pub fn double(client_x: f64, client_y: f64) -> Self {
        Self {
            detail: 2,
            ..Self::primary(client_x, client_y)
        }
    }

    pub fn is_primary(&self) -> bool {
        self.button == 0
    }
}

/// Observable editor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    /// No tool selected.
    Idle,
    /// A tool is selected and no gesture is in progress.
    ToolSelected(EditorTool),
    /// A rectangle or ellipse drag is in progress.
    Dragging(EditorTool),
    /// Polygon vertices are being collected.
    CollectingPoints { count: usize },
}

/// Result of feeding one pointer event to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// The event did not apply to the current state.
    Ignored,
    /// A drag started.
    Started,
    /// The preview changed.
    Updated,
    /// A shape was completed and added to the model.
    Completed(ShapeKind),
    /// A polygon was finished with too few vertices and discarded.
    Discarded,
}

/// Editor presentation and persistence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Radius of handle circles in canvas units.
    pub handle_radius: f64,
    pub handle_class: String,
    pub canvas_class: String,
    pub shape_class: String,
    /// Appended to the image path to name the saved map file.
    pub map_file_suffix: String,
    /// File stem used when the image source has no usable last segment.
    pub fallback_stem: String,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            handle_radius: 2.0,
            handle_class: "image-map-handle".to_string(),
            canvas_class: "image-map-editor".to_string(),
            shape_class: crate::svg_renderer::SHAPE_CLASS.to_string(),
            map_file_suffix: ".map.json".to_string(),
            fallback_stem: "image".to_string(),
        }
    }
}
