//! Image/overlay composition.
//!
//! Wraps an image in a positioning container and stacks an overlay layer
//! above it. The overlay may hold an external SVG document (injected
//! verbatim) and a rendered scene; when both exist the external document
//! comes first.

use imagemap_core::ImageAttributes;
use std::fmt::Write as _;

use crate::scene::{escape, SvgElement};

pub const CONTAINER_CLASS: &str = "image-map-container";
pub const OVERLAY_CLASS: &str = "image-map-overlay";

/// One piece of overlay content.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayContent {
    /// Raw SVG markup read from the store.
    External(String),
    /// Scene produced by the renderer.
    Scene(SvgElement),
}

/// An image wrapped together with its overlay layer.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayContainer {
    pub image: ImageAttributes,
    pub overlay: Vec<OverlayContent>,
}

impl OverlayContainer {
    /// The rendered scene, if the overlay has one.
    pub fn scene(&self) -> Option<&SvgElement> {
        self.overlay.iter().find_map(|c| match c {
            OverlayContent::Scene(s) => Some(s),
            OverlayContent::External(_) => None,
        })
    }

    /// The external SVG markup, if the overlay has one.
    pub fn external(&self) -> Option<&str> {
        self.overlay.iter().find_map(|c| match c {
            OverlayContent::External(s) => Some(s.as_str()),
            OverlayContent::Scene(_) => None,
        })
    }

    /// HTML for the container, image and overlay layer.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        let _ = write!(out, "<div class=\"{}\">", CONTAINER_CLASS);
        out.push_str("<img");
        for (name, value) in self.image_attributes() {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        out.push('>');
        let _ = write!(out, "<div class=\"{}\">", OVERLAY_CLASS);
        for content in &self.overlay {
            match content {
                OverlayContent::External(svg) => out.push_str(svg),
                OverlayContent::Scene(scene) => out.push_str(&scene.to_svg_string()),
            }
        }
        out.push_str("</div></div>");
        out
    }

    fn image_attributes(&self) -> Vec<(&str, &str)> {
        // Only non-empty attributes survive `ImageAttributes::get`.
        [
            imagemap_core::image::ATTR_SRC,
            imagemap_core::image::ATTR_MAP,
            imagemap_core::image::ATTR_OVERLAY,
            imagemap_core::image::ATTR_COORDINATES,
        ]
        .into_iter()
        .filter_map(|name| self.image.get(name).map(|v| (name, v)))
        .collect()
    }
}

/// Wraps `image` and layers the external document and scene above it.
pub fn compose_overlay(
    image: &ImageAttributes,
    scene: Option<SvgElement>,
    external_svg: Option<&str>,
) -> OverlayContainer {
    let mut overlay = Vec::new();
    if let Some(svg) = external_svg.filter(|s| !s.is_empty()) {
        overlay.push(OverlayContent::External(svg.to_string()));
    }
    if let Some(scene) = scene {
        overlay.push(OverlayContent::Scene(scene));
    }
    OverlayContainer {
        image: image.clone(),
        overlay,
    }
}
