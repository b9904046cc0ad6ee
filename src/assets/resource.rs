use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    config::face::FaceConfig,
    foundation::error::{WatchError, WatchResult},
};

/// Immutable packaged asset, shared by every decoder created from it.
#[derive(Clone)]
pub struct AnimationResource {
    id: String,
    bytes: Arc<[u8]>,
}

impl AnimationResource {
    /// Wrap bytes already in memory.
    pub fn from_bytes(id: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            id: id.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a resource file once.
    pub fn from_path(id: impl Into<String>, path: &Path) -> WatchResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read resource '{}'", path.display()))?;
        Ok(Self::from_bytes(id, bytes))
    }

    /// Symbolic id the resource was registered under.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Shared handle on the raw bytes.
    pub fn bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }
}

impl std::fmt::Debug for AnimationResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationResource")
            .field("id", &self.id)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

/// Resources resolved from a face manifest, front-loaded so playback never touches disk.
#[derive(Clone, Debug, Default)]
pub struct ResourceStore {
    root: PathBuf,
    entries: BTreeMap<String, AnimationResource>,
}

impl ResourceStore {
    /// Read every manifest entry of `cfg` relative to `root`.
    pub fn prepare(cfg: &FaceConfig, root: impl Into<PathBuf>) -> WatchResult<Self> {
        let root = root.into();
        let mut entries = BTreeMap::new();
        for (id, rel) in &cfg.resources {
            let path = root.join(normalize_rel_path(rel));
            let res = AnimationResource::from_path(id.clone(), &path)?;
            tracing::debug!(id = %id, path = %path.display(), "loaded resource");
            entries.insert(id.clone(), res);
        }
        Ok(Self { root, entries })
    }

    /// Store holding exactly one resource.
    pub fn single(resource: AnimationResource) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(resource.id().to_string(), resource);
        Self {
            root: PathBuf::new(),
            entries,
        }
    }

    /// Register or replace a resource.
    pub fn insert(&mut self, resource: AnimationResource) {
        self.entries.insert(resource.id().to_string(), resource);
    }

    /// Directory manifest paths were resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of resources held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no resource is held.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a resource by id.
    pub fn get(&self, id: &str) -> WatchResult<&AnimationResource> {
        self.entries
            .get(id)
            .ok_or_else(|| WatchError::resource(format!("unknown resource id '{id}'")))
    }
}

/// Normalise a manifest path to forward slashes without leading `./`.
pub fn normalize_rel_path(source: &str) -> String {
    let s = source.replace('\\', "/");
    let mut out = s.as_str();
    while let Some(rest) = out.strip_prefix("./") {
        out = rest;
    }
    out.to_string()
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resource.rs"]
mod tests;
