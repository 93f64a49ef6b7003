//! Image nodes handed to the overlay engine by the host renderer.
//!
//! Provides:
//! - [`ImageAttributes`]: the attributes the resolver reads
//! - [`ImageSize`]: natural pixel dimensions
//! - [`ImageReady`] / [`ImageLoadHandle`]: the one-shot "image decoded" signal

use crate::error::HostError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tokio::sync::watch;

/// Inline JSON shape definition.
pub const ATTR_COORDINATES: &str = "data-coordinates";
/// Key into the document's image map table.
pub const ATTR_MAP: &str = "data-map";
/// Link to a stored SVG document injected verbatim.
pub const ATTR_OVERLAY: &str = "data-overlay";
/// Image source reference.
pub const ATTR_SRC: &str = "src";

/// Attributes of a rendered image element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageAttributes(BTreeMap<String, String>);

impl ImageAttributes {
    /// Creates an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style attribute insertion.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets an attribute, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Returns a non-empty attribute value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// The inline `data-coordinates` JSON, if any.
    pub fn coordinates(&self) -> Option<&str> {
        self.get(ATTR_COORDINATES)
    }

    /// The `data-map` key, if any.
    pub fn map_key(&self) -> Option<&str> {
        self.get(ATTR_MAP)
    }

    /// The `data-overlay` link, if any.
    pub fn overlay(&self) -> Option<&str> {
        self.get(ATTR_OVERLAY)
    }

    /// The image source reference, if any.
    pub fn src(&self) -> Option<&str> {
        self.get(ATTR_SRC)
    }
}

/// Natural pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Both dimensions are known and non-zero.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Signal that completes once an image has been decoded.
///
/// Resolves immediately for images that are already decoded; otherwise it
/// completes when the paired [`ImageLoadHandle`] fires. Callers always await
/// it rather than branching on load state.
#[derive(Debug, Clone)]
pub struct ImageReady {
    state: ReadyState,
}

#[derive(Debug, Clone)]
enum ReadyState {
    Loaded(ImageSize),
    Pending(watch::Receiver<Option<ImageSize>>),
}

/// Host side of a pending [`ImageReady`]: the load event.
///
/// Firing consumes the handle, so the event is delivered exactly once.
/// Dropping it without firing fails every waiter.
#[derive(Debug)]
pub struct ImageLoadHandle {
    tx: watch::Sender<Option<ImageSize>>,
}

impl ImageReady {
    /// An image that is already decoded.
    pub fn loaded(size: ImageSize) -> Self {
        Self {
            state: ReadyState::Loaded(size),
        }
    }

    /// An image still loading, plus the handle that completes it.
    pub fn pending() -> (ImageLoadHandle, Self) {
        let (tx, rx) = watch::channel(None);
        (
            ImageLoadHandle { tx },
            Self {
                state: ReadyState::Pending(rx),
            },
        )
    }

    /// Chooses between [`ImageReady::loaded`] and [`ImageReady::pending`]
    /// from the element's current state, the way a host inspects a freshly
    /// rendered image.
    pub fn from_state(complete: bool, size: ImageSize) -> (Option<ImageLoadHandle>, Self) {
        if complete && size.is_valid() {
            (None, Self::loaded(size))
        } else {
            let (handle, ready) = Self::pending();
            (Some(handle), ready)
        }
    }

    /// Returns the size if the image is already decoded.
    pub fn try_size(&self) -> Option<ImageSize> {
        match &self.state {
            ReadyState::Loaded(size) => Some(*size),
            ReadyState::Pending(rx) => *rx.borrow(),
        }
    }

    /// Waits until the image is decoded and returns its natural size.
    pub async fn wait(&self) -> Result<ImageSize, HostError> {
        match &self.state {
            ReadyState::Loaded(size) => Ok(*size),
            ReadyState::Pending(rx) => {
                let mut rx = rx.clone();
                let value = rx
                    .wait_for(Option::is_some)
                    .await
                    .map_err(|_| HostError::ImageNotLoaded)?;
                (*value).ok_or(HostError::ImageNotLoaded)
            }
        }
    }
}

impl ImageLoadHandle {
    /// Delivers the load event.
    pub fn fire(self, size: ImageSize) {
        // No receivers left means nobody is waiting; nothing to do.
        let _ = self.tx.send(Some(size));
    }
}
