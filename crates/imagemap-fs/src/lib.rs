//! Filesystem host for imagemap.
//!
//! [`FsVault`] serves a directory as the document store and resolves links
//! the way a note vault does. [`DocumentManifest`] describes a rendered
//! document on disk so it can be fed to the overlay pipeline.

pub mod fs_vault;
pub mod manifest;

pub use fs_vault::FsVault;
pub use manifest::{DocumentManifest, ManifestImage};
