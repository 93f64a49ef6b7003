//! # Imagemap Designer
//!
//! This crate draws interactive shape overlays on top of images embedded in
//! rendered documents, and provides the editor used to author them.
//!
//! ## Core Components
//!
//! ### Shape Model
//! - **Regions**: Polygons, rectangles, ellipses and circles with optional
//!   style, text label and link
//! - **Layers**: An ordered list of regions tagged with its coordinate space
//!   (image pixels or 0-100 percent)
//! - **Serialization**: The legacy grouped layout and the region list layout
//!
//! ### Rendering
//! - **Resolver**: Finds an image's definition inline or in the frontmatter
//! - **SVG Renderer**: Builds the overlay scene sized to the image
//! - **Compositor**: Stacks external SVG documents and scenes above the image
//! - **Pipeline**: Runs all of the above for every image of a document
//!
//! ### Editing
//! - **Editor**: Pointer-driven drawing of polygons, rectangles and ellipses
//! - **Context Menu**: The "Edit Image Map" entry on images
//!
//! ## Architecture
//!
//! ```text
//! data-coordinates / data-map + frontmatter
//!   └── Resolver -> ShapeDefinition -> ShapeLayer
//!         └── Renderer -> SvgElement
//!               └── Compositor (+ data-overlay SVG) -> OverlayContainer
//!
//! Editor (percent space) -> LegacyShapes JSON -> Vault
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use imagemap_designer::{render_definition, RenderSettings, ShapeDefinition};
//!
//! let def = ShapeDefinition::from_json_str(r#"[{"type":"rectangle","x":1,"y":1,"width":5,"height":5}]"#)?;
//! let svg = render_definition(&def, ImageSize::new(100, 100), &RenderSettings::default());
//! println!("{}", svg.to_svg_string());
//! ```

pub mod compositor;
pub mod context_menu;
pub mod editor;
pub mod links;
pub mod model;
pub mod pipeline;
pub mod resolver;
pub mod scene;
pub mod serialization;
pub mod svg_renderer;

pub use compositor::{compose_overlay, OverlayContainer, OverlayContent};
pub use context_menu::{image_context_menu, MenuAction, MenuEntry};
pub use editor::{
    CanvasBox, CanvasPoint, EditorHost, EditorSession, EditorSettings, EditorState, EditorTool,
    GestureOutcome, PointerInput,
};
pub use links::{follow_link, LinkContext, PointerEvent};
pub use model::{
    format_number, CoordinateSpace, Point, PointList, Region, RegionCircle, RegionEllipse,
    RegionGeometry, RegionPolygon, RegionRectangle, RegionShape, ShapeKind, ShapeLayer,
    StrokeType, Style, TextLabel, TextPosition,
};
pub use pipeline::{ImageOutcome, OverlayProcessor, RenderedDocument, RenderedImage};
pub use resolver::{resolve_coordinates, CoordinateResolver, ResolverSettings};
pub use scene::{PointerAction, SvgElement};
pub use serialization::{LegacyShapes, ShapeDefinition};
pub use svg_renderer::{render_definition, render_overlay, RenderSettings};
