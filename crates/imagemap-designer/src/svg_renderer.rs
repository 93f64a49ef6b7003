//! SVG overlay renderer for image maps
//! Turns a shape layer plus the image's natural size into an SVG scene
//! Features:
//! - `viewBox` matching the natural pixel size, stretched with the image
//! - Per-region style overriding the default visual
//! - Text labels anchored to the region centroid
//! - Click-to-navigate on linked regions

use imagemap_core::ImageSize;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{
    format_number, PointList, Region, RegionEllipse, RegionGeometry, RegionRectangle, RegionShape,
    ShapeLayer, Style,
};
use crate::scene::{PointerAction, SvgElement, SVG_NS};
use crate::serialization::ShapeDefinition;

/// Class every rendered region primitive carries.
pub const SHAPE_CLASS: &str = "image-map-shape";

/// Presentation defaults used by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Fill of regions without a style.
    pub default_fill: String,
    /// Stroke of regions without a style.
    pub default_stroke: String,
    pub default_stroke_width: f64,
    pub default_opacity: f64,
    /// Label colour when the label does not set one.
    pub text_color: String,
    /// Label font size when the label does not set one.
    pub text_size: f64,
    pub shape_class: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            default_fill: "rgba(0,0,255,0.2)".to_string(),
            default_stroke: "blue".to_string(),
            default_stroke_width: 0.5,
            default_opacity: 1.0,
            text_color: "#000".to_string(),
            text_size: 14.0,
            shape_class: SHAPE_CLASS.to_string(),
        }
    }
}

/// Builds an SVG polygon element.
pub fn create_polygon(points: &PointList) -> SvgElement {
    let mut el = SvgElement::new("polygon");
    el.set_attr("points", points.to_string());
    el
}

/// Builds an SVG rect element.
pub fn create_rect(x: f64, y: f64, width: f64, height: f64) -> SvgElement {
    let mut el = SvgElement::new("rect");
    el.set_attr("x", format_number(x));
    el.set_attr("y", format_number(y));
    el.set_attr("width", format_number(width));
    el.set_attr("height", format_number(height));
    el
}

/// Builds an SVG ellipse element.
pub fn create_ellipse(cx: f64, cy: f64, rx: f64, ry: f64) -> SvgElement {
    let mut el = SvgElement::new("ellipse");
    el.set_attr("cx", format_number(cx));
    el.set_attr("cy", format_number(cy));
    el.set_attr("rx", format_number(rx));
    el.set_attr("ry", format_number(ry));
    el
}

/// Primitive for a region shape. Circles become ellipses with equal radii.
pub fn shape_element(shape: &RegionShape) -> SvgElement {
    match shape {
        RegionShape::Polygon(p) => create_polygon(&p.points),
        RegionShape::Rectangle(RegionRectangle {
            x,
            y,
            width,
            height,
        }) => create_rect(*x, *y, *width, *height),
        RegionShape::Ellipse(RegionEllipse { cx, cy, rx, ry }) => create_ellipse(*cx, *cy, *rx, *ry),
        RegionShape::Circle(c) => create_ellipse(c.cx, c.cy, c.r, c.r),
    }
}

/// Writes each `(property, value)` both as a presentation attribute and as
/// an `!important` inline declaration.
fn apply_presentation(el: &mut SvgElement, props: &[(&str, String)]) {
    let mut declarations = Vec::with_capacity(props.len());
    for (name, value) in props {
        el.set_attr(*name, value.clone());
        declarations.push(format!("{}: {} !important;", name, value));
    }
    if !declarations.is_empty() {
        el.set_attr("style", declarations.join(" "));
    }
}

/// Applies a region's style. Only declared properties are written.
pub fn apply_style(el: &mut SvgElement, style: &Style) {
    el.remove_attr("stroke");
    el.remove_attr("fill");
    let mut props = Vec::new();
    if let Some(t) = style.stroke_type {
        props.push(("stroke-dasharray", t.dasharray().to_string()));
    }
    if let Some(w) = style.stroke_width {
        props.push(("stroke-width", format_number(w)));
    }
    if let Some(c) = &style.stroke_color {
        props.push(("stroke", c.clone()));
    }
    if let Some(c) = &style.fill_color {
        props.push(("fill", c.clone()));
    }
    if let Some(o) = style.opacity {
        props.push(("opacity", format_number(o)));
    }
    apply_presentation(el, &props);
}

/// Applies the fixed visual used by regions without a style.
pub fn apply_default_visual(el: &mut SvgElement, settings: &RenderSettings) {
    apply_presentation(
        el,
        &[
            ("fill", settings.default_fill.clone()),
            ("stroke", settings.default_stroke.clone()),
            ("stroke-width", format_number(settings.default_stroke_width)),
            ("opacity", format_number(settings.default_opacity)),
        ],
    );
}

fn label_element(region: &Region, settings: &RenderSettings) -> Option<SvgElement> {
    let text = region.text.as_ref()?;
    let at = region.label_position()?;
    let mut el = SvgElement::new("text");
    el.text = Some(text.content.clone());
    el.set_attr("x", format_number(at.x));
    el.set_attr("y", format_number(at.y));
    el.set_attr("fill", text.color.clone().unwrap_or_else(|| settings.text_color.clone()));
    el.set_attr("font-size", format_number(text.size.unwrap_or(settings.text_size)));
    el.set_attr("text-anchor", text.text_anchor());
    Some(el)
}

/// Primitive for one region with style and link applied.
pub fn region_element(region: &Region, settings: &RenderSettings) -> SvgElement {
    let mut el = shape_element(&region.shape);
    el.add_class(settings.shape_class.clone());
    match &region.style {
        Some(style) => apply_style(&mut el, style),
        None => apply_default_visual(&mut el, settings),
    }
    if let Some(link) = &region.link {
        let style = match el.attr("style") {
            Some(s) => format!("{} cursor: pointer;", s),
            None => "cursor: pointer;".to_string(),
        };
        el.set_attr("style", style);
        el.action = Some(PointerAction::OpenLink(link.clone()));
    }
    el
}

/// Empty `svg` root sized to the image.
pub fn overlay_root(size: ImageSize) -> SvgElement {
    let mut svg = SvgElement::new("svg");
    svg.set_attr("xmlns", SVG_NS);
    svg.set_attr("viewBox", format!("0 0 {} {}", size.width, size.height));
    svg.set_attr("width", size.width.to_string());
    svg.set_attr("height", size.height.to_string());
    svg.set_attr("preserveAspectRatio", "none");
    svg
}

/// Renders a layer over an image of natural size `size`.
///
/// Percent-space layers are mapped onto the pixel viewBox first. Each region
/// yields one primitive, in order, followed by its label when it has one.
pub fn render_overlay(layer: &ShapeLayer, size: ImageSize, settings: &RenderSettings) -> SvgElement {
    let mut svg = overlay_root(size);
    let layer = layer.to_pixel_space(size.width as f64, size.height as f64);
    debug!(
        "Rendering {} regions at {}x{}",
        layer.len(),
        size.width,
        size.height
    );
    for region in layer.iter() {
        svg.append_child(region_element(region, settings));
        // Labels follow their shape so they paint above its fill.
        if let Some(label) = label_element(region, settings) {
            svg.append_child(label);
        }
    }
    svg
}

/// Normalizes a definition in either wire format and renders it.
pub fn render_definition(
    def: &ShapeDefinition,
    size: ImageSize,
    settings: &RenderSettings,
) -> SvgElement {
    render_overlay(&def.to_layer(), size, settings)
}

/// Geometry of a rendered primitive as `(tag, numbers)`, used to compare
/// scenes independently of styling.
pub fn primitive_geometry(el: &SvgElement) -> Option<(String, Vec<f64>)> {
    let names: &[&str] = match el.tag.as_str() {
        "rect" => &["x", "y", "width", "height"],
        "ellipse" => &["cx", "cy", "rx", "ry"],
        "polygon" => {
            let points: PointList = el.attr("points")?.parse().ok()?;
            let nums = points.points().iter().flat_map(|p| [p.x, p.y]).collect();
            return Some((el.tag.clone(), nums));
        }
        _ => return None,
    };
    let nums = names
        .iter()
        .map(|n| el.number_attr(n))
        .collect::<Option<Vec<_>>>()?;
    Some((el.tag.clone(), nums))
}
