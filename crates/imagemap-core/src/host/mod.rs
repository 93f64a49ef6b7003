//! Host collaborator interfaces
//!
//! The overlay engine never reaches into ambient application state. Every
//! service it needs from the surrounding application is passed in as one of
//! these traits:
//! - [`LinkResolver`]: maps a path-like link to a stored file
//! - [`Vault`]: asynchronous text read/write against the store
//! - [`Notifier`]: transient user notifications
//! - [`Navigator`] / [`ExternalOpener`]: opening link targets

mod memory;

pub use memory::MemoryVault;

use crate::error::HostError;
use async_trait::async_trait;
use std::sync::Arc;

/// Resolves human-written links to concrete stored files.
pub trait LinkResolver: Send + Sync {
    /// Returns the store path of the first file `linkpath` points to when
    /// resolved relative to `source_path`, or `None` if nothing matches.
    fn first_linkpath_dest(&self, linkpath: &str, source_path: &str) -> Option<String>;
}

/// Asynchronous text storage.
///
/// Either operation may fail with not-found, permission or I/O errors.
#[async_trait]
pub trait Vault: Send + Sync {
    /// Read the whole file at `path` as UTF-8 text.
    async fn read(&self, path: &str) -> Result<String, HostError>;

    /// Replace the file at `path` with `contents` in a single request.
    async fn write(&self, path: &str, contents: &str) -> Result<(), HostError>;
}

/// Fire-and-forget user notifications.
pub trait Notifier: Send + Sync {
    /// Show a transient message.
    fn notify(&self, message: &str);
}

/// Opens an internal link target as the active view.
pub trait Navigator: Send + Sync {
    /// Open `target` resolved against `source_path`, optionally in a new leaf.
    fn open_link_text(&self, target: &str, source_path: &str, new_leaf: bool)
        -> Result<(), HostError>;
}

/// Opens a target as a new top-level navigation, used when no
/// [`Navigator`] is available.
pub trait ExternalOpener: Send + Sync {
    /// Open `target` outside the host.
    fn open(&self, target: &str) -> Result<(), HostError>;
}

/// Notifier that writes notices to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        tracing::info!(target: "imagemap::notice", "{}", message);
    }
}

/// Shared handle to a link resolver.
pub type SharedLinkResolver = Arc<dyn LinkResolver>;

/// Shared handle to a vault.
pub type SharedVault = Arc<dyn Vault>;

/// Shared handle to a notifier.
pub type SharedNotifier = Arc<dyn Notifier>;

/// Shared handle to a navigator.
pub type SharedNavigator = Arc<dyn Navigator>;
