//! In-memory vault used by hosts without durable storage and by tests.

use super::{LinkResolver, Vault};
use crate::error::HostError;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// A [`Vault`] backed by a sorted map of path to contents.
///
/// Also resolves links the way a vault does: an exact path match first,
/// then the first stored file whose path ends with `/<linkpath>`.
#[derive(Debug, Default)]
pub struct MemoryVault {
    files: RwLock<BTreeMap<String, String>>,
    read_only: RwLock<bool>,
}

impl MemoryVault {
    /// Creates an empty vault.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a vault pre-populated with `files`.
    pub fn with_files<I, P, C>(files: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: Into<String>,
        C: Into<String>,
    {
        let vault = Self::new();
        {
            let mut map = vault.files.write();
            for (path, contents) in files {
                map.insert(path.into(), contents.into());
            }
        }
        vault
    }

    /// Makes every subsequent write fail with `PermissionDenied`.
    pub fn set_read_only(&self, read_only: bool) {
        *self.read_only.write() = read_only;
    }

    /// Returns the stored contents of `path`, if any.
    pub fn get(&self, path: &str) -> Option<String> {
        self.files.read().get(path).cloned()
    }

    /// Lists stored paths in sorted order.
    pub fn paths(&self) -> Vec<String> {
        self.files.read().keys().cloned().collect()
    }
}

#[async_trait]
impl Vault for MemoryVault {
    async fn read(&self, path: &str) -> Result<String, HostError> {
        self.get(path).ok_or_else(|| HostError::NotFound {
            path: path.to_string(),
        })
    }

    async fn write(&self, path: &str, contents: &str) -> Result<(), HostError> {
        if *self.read_only.read() {
            return Err(HostError::PermissionDenied {
                path: path.to_string(),
            });
        }
        self.files
            .write()
            .insert(path.to_string(), contents.to_string());
        Ok(())
    }
}

impl LinkResolver for MemoryVault {
    fn first_linkpath_dest(&self, linkpath: &str, _source_path: &str) -> Option<String> {
        let linkpath = linkpath.trim_start_matches('/');
        if linkpath.is_empty() {
            return None;
        }
        let files = self.files.read();
        if files.contains_key(linkpath) {
            return Some(linkpath.to_string());
        }
        let suffix = format!("/{}", linkpath);
        files.keys().find(|p| p.ends_with(&suffix)).cloned()
    }
}
