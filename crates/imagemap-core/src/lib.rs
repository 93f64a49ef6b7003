//! # Imagemap Core
//!
//! Core types, traits, and utilities for imagemap.
//! Provides the error types, the host collaborator interfaces the overlay
//! engine is wired to, and the image node abstractions the host hands in.

pub mod error;
pub mod host;
pub mod image;

pub use error::{Error, HostError, Result, ShapeError};

pub use host::{
    ExternalOpener, LinkResolver, LogNotifier, MemoryVault, Navigator, Notifier,
    SharedLinkResolver, SharedNavigator, SharedNotifier, SharedVault, Vault,
};

pub use image::{ImageAttributes, ImageLoadHandle, ImageReady, ImageSize};
