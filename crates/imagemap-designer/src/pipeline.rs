//! Per-document overlay processing.
//!
//! The host's renderer hands over every rendered document. For each image
//! the processor loads the optional external overlay, resolves coordinates,
//! waits for the image to decode and composes the overlay. Images are
//! processed concurrently; a failing or slow image never stops the others.

use imagemap_core::{
    HostError, ImageAttributes, ImageReady, Result, SharedLinkResolver, SharedVault,
};
use futures::future::join_all;
use futures::stream::{FuturesUnordered, Stream};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::compositor::{compose_overlay, OverlayContainer};
use crate::resolver::CoordinateResolver;
use crate::serialization::ShapeDefinition;
use crate::svg_renderer::{render_definition, RenderSettings};

/// An image node as rendered by the host.
#[derive(Debug, Clone)]
pub struct RenderedImage {
    pub attributes: ImageAttributes,
    pub ready: ImageReady,
}

impl RenderedImage {
    pub fn new(attributes: ImageAttributes, ready: ImageReady) -> Self {
        Self { attributes, ready }
    }
}

/// A rendered document: its path, frontmatter and images.
#[derive(Debug, Clone, Default)]
pub struct RenderedDocument {
    pub source_path: String,
    pub frontmatter: Option<Value>,
    pub images: Vec<RenderedImage>,
}

/// What happened to one image.
#[derive(Debug, Clone)]
pub enum ImageOutcome {
    /// An overlay was composed.
    Rendered(OverlayContainer),
    /// Neither an external overlay nor coordinates were found.
    Skipped,
    /// Processing failed; the message was logged.
    Failed(String),
}

impl ImageOutcome {
    pub fn container(&self) -> Option<&OverlayContainer> {
        match self {
            ImageOutcome::Rendered(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self, ImageOutcome::Rendered(_))
    }
}

/// Sources found for an image before it is ready to render.
struct PreparedImage {
    definition: Option<ShapeDefinition>,
    external_svg: Option<String>,
}

/// Post-processor wiring the resolver, renderer and compositor to the host.
pub struct OverlayProcessor {
    links: SharedLinkResolver,
    vault: SharedVault,
    resolver: CoordinateResolver,
    settings: RenderSettings,
}

impl OverlayProcessor {
    pub fn new(links: SharedLinkResolver, vault: SharedVault) -> Self {
        Self {
            links,
            vault,
            resolver: CoordinateResolver::default(),
            settings: RenderSettings::default(),
        }
    }

    pub fn with_resolver(mut self, resolver: CoordinateResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_render_settings(mut self, settings: RenderSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Processes every image of `doc`, returning one outcome per image in
    /// document order.
    ///
    /// Each image is prepared and awaited independently, so an image that
    /// is still loading never holds up one that is ready.
    pub async fn process_document(&self, doc: &RenderedDocument) -> Vec<ImageOutcome> {
        let outcomes = join_all(
            doc.images
                .iter()
                .map(|image| self.image_outcome(image, &doc.source_path, doc.frontmatter.as_ref())),
        )
        .await;
        info!(
            "Processed {} images in {} ({} rendered)",
            outcomes.len(),
            doc.source_path,
            outcomes.iter().filter(|o| o.is_rendered()).count()
        );
        outcomes
    }

    /// Streams `(index, outcome)` pairs as each image of `doc` finishes,
    /// in completion order.
    pub fn outcomes<'a>(
        &'a self,
        doc: &'a RenderedDocument,
    ) -> impl Stream<Item = (usize, ImageOutcome)> + Unpin + 'a {
        doc.images
            .iter()
            .enumerate()
            .map(move |(index, image)| async move {
                let outcome = self
                    .image_outcome(image, &doc.source_path, doc.frontmatter.as_ref())
                    .await;
                (index, outcome)
            })
            .collect::<FuturesUnordered<_>>()
    }

    async fn image_outcome(
        &self,
        image: &RenderedImage,
        source_path: &str,
        frontmatter: Option<&Value>,
    ) -> ImageOutcome {
        let src = image.attributes.src().unwrap_or("<image>");
        match self.process_image(image, source_path, frontmatter).await {
            Ok(Some(container)) => ImageOutcome::Rendered(container),
            Ok(None) => {
                debug!("No overlay and no coordinates found, skipping image {}", src);
                ImageOutcome::Skipped
            }
            Err(e) => {
                error!("Failed to render overlay for {}: {}", src, e);
                ImageOutcome::Failed(e.to_string())
            }
        }
    }

    /// Processes a single image.
    pub async fn process_image(
        &self,
        image: &RenderedImage,
        source_path: &str,
        frontmatter: Option<&Value>,
    ) -> Result<Option<OverlayContainer>> {
        match self.prepare(&image.attributes, source_path, frontmatter).await {
            Some(prep) => self.render(image, prep).await.map(Some),
            None => Ok(None),
        }
    }

    async fn prepare(
        &self,
        attrs: &ImageAttributes,
        source_path: &str,
        frontmatter: Option<&Value>,
    ) -> Option<PreparedImage> {
        let external_svg = match attrs.overlay() {
            Some(link) => self.load_external_overlay(link, source_path).await,
            None => None,
        };
        let definition = self.resolver.resolve(attrs, frontmatter);
        if external_svg.is_none() && definition.is_none() {
            return None;
        }
        Some(PreparedImage {
            definition,
            external_svg,
        })
    }

    async fn render(&self, image: &RenderedImage, prep: PreparedImage) -> Result<OverlayContainer> {
        let size = image.ready.wait().await?;
        let scene = prep
            .definition
            .as_ref()
            .map(|def| render_definition(def, size, &self.settings));
        Ok(compose_overlay(
            &image.attributes,
            scene,
            prep.external_svg.as_deref(),
        ))
    }

    /// Reads the SVG document `link` points to. Unresolvable links, empty
    /// documents and read failures yield `None`; read failures are logged
    /// with the path.
    pub async fn load_external_overlay(&self, link: &str, source_path: &str) -> Option<String> {
        let Some(path) = self.links.first_linkpath_dest(link, source_path) else {
            debug!("Overlay link {} does not resolve from {}", link, source_path);
            return None;
        };
        match self.vault.read(&path).await {
            Ok(svg) if svg.trim().is_empty() => {
                debug!("Overlay {} at {} is empty", link, path);
                None
            }
            Ok(svg) => Some(svg),
            Err(e) => {
                log_overlay_read_failure(link, &path, &e);
                None
            }
        }
    }
}

fn log_overlay_read_failure(link: &str, path: &str, err: &HostError) {
    error!(
        "Couldn't load overlay \"{}\" from {}: {}. Check that the path is correct and the SVG exists.",
        link, path, err
    );
}
