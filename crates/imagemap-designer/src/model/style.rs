use serde::{Deserialize, Serialize};

/// Stroke dash pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeType {
    Solid,
    Dashed,
    Dotted,
}

impl StrokeType {
    /// Value for the `stroke-dasharray` property.
    pub fn dasharray(&self) -> &'static str {
        match self {
            StrokeType::Solid => "none",
            StrokeType::Dashed => "4,2",
            StrokeType::Dotted => "1,2",
        }
    }
}

/// Per-region presentation. Every field that is set overrides the default
/// visual of the rendered shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_type: Option<StrokeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

/// Where a label sits relative to its region's anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextPosition {
    Center,
    Top,
    Bottom,
    Left,
    Right,
}

impl TextPosition {
    /// Fixed pixel offset applied to the anchor point.
    pub fn offset(&self) -> (f64, f64) {
        match self {
            TextPosition::Center => (0.0, 0.0),
            TextPosition::Top => (0.0, -10.0),
            TextPosition::Bottom => (0.0, 20.0),
            TextPosition::Left => (-20.0, 0.0),
            TextPosition::Right => (20.0, 0.0),
        }
    }
}

/// Text annotation drawn at the region's anchor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<TextPosition>,
}

impl TextLabel {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_position(mut self, position: TextPosition) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    /// `middle` only for centred labels.
    pub fn text_anchor(&self) -> &'static str {
        match self.position {
            Some(TextPosition::Center) => "middle",
            _ => "start",
        }
    }
}
