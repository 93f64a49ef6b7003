//! Filesystem-backed document store.
//!
//! Store paths are `/`-separated and relative to a root directory. Paths
//! that would leave the root are refused.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use imagemap_core::{HostError, LinkResolver, Vault};
use tracing::debug;

/// A directory used as the document store.
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of a store path.
    pub fn full_path(&self, path: &str) -> Result<PathBuf, HostError> {
        let rel = Path::new(path.trim_start_matches('/'));
        if rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(HostError::PermissionDenied {
                path: path.to_string(),
            });
        }
        Ok(self.root.join(rel))
    }

    fn is_file(&self, path: &str) -> bool {
        self.full_path(path).map(|p| p.is_file()).unwrap_or(false)
    }

    /// Store path of the first file, in sorted walk order, named `name`.
    fn find_by_name(&self, name: &str) -> Option<String> {
        let mut stack = vec![self.root.clone()];
        while let Some(dir) = stack.pop() {
            let Ok(entries) = std::fs::read_dir(&dir) else {
                continue;
            };
            let mut entries: Vec<_> = entries.filter_map(|e| e.ok()).map(|e| e.path()).collect();
            entries.sort();
            for entry in entries.iter().rev() {
                if entry.is_dir() {
                    stack.push(entry.clone());
                }
            }
            for entry in &entries {
                if entry.is_file() && entry.file_name().is_some_and(|n| n == name) {
                    return self.store_path(entry);
                }
            }
        }
        None
    }

    fn store_path(&self, full: &Path) -> Option<String> {
        let rel = full.strip_prefix(&self.root).ok()?;
        let parts: Vec<_> = rel
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => s.to_str(),
                _ => None,
            })
            .collect();
        Some(parts.join("/"))
    }
}

#[async_trait]
impl Vault for FsVault {
    async fn read(&self, path: &str) -> Result<String, HostError> {
        let full = self.full_path(path)?;
        tokio::fs::read_to_string(&full)
            .await
            .map_err(|e| HostError::from_io(path, &e))
    }

    async fn write(&self, path: &str, contents: &str) -> Result<(), HostError> {
        let full = self.full_path(path)?;
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| HostError::from_io(path, &e))?;
        }
        tokio::fs::write(&full, contents)
            .await
            .map_err(|e| HostError::from_io(path, &e))?;
        debug!("Wrote {} bytes to {}", contents.len(), full.display());
        Ok(())
    }
}

impl LinkResolver for FsVault {
    /// Tries the link relative to the source document's folder, then from
    /// the store root, then as a bare file name anywhere in the store.
    fn first_linkpath_dest(&self, linkpath: &str, source_path: &str) -> Option<String> {
        let linkpath = linkpath.trim();
        if linkpath.is_empty() || linkpath.contains("://") {
            return None;
        }
        if !linkpath.starts_with('/') {
            if let Some((dir, _)) = source_path.rsplit_once('/') {
                let candidate = format!("{}/{}", dir, linkpath);
                if self.is_file(&candidate) {
                    return Some(candidate);
                }
            }
        }
        let from_root = linkpath.trim_start_matches('/');
        if self.is_file(from_root) {
            return Some(from_root.to_string());
        }
        let name = from_root.rsplit('/').next()?;
        self.find_by_name(name)
    }
}
