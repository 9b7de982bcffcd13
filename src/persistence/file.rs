use super::{FlowStore, validate_flow_id};
use crate::error::StoreError;
use crate::graph::FlowSnapshot;
use std::fs;
use std::path::{Path, PathBuf};

/// Stores each flow as `<root>/<flow_id>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Uses `root` as the storage directory, creating it if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::Io {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, flow_id: &str) -> Result<PathBuf, StoreError> {
        validate_flow_id(flow_id)?;
        Ok(self.root.join(format!("{flow_id}.json")))
    }
}

impl FlowStore for JsonFileStore {
    fn load(&self, flow_id: &str) -> Result<FlowSnapshot, StoreError> {
        let path = self.path_for(flow_id)?;
        let content = fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound(flow_id.to_string())
            } else {
                StoreError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;
        FlowSnapshot::from_json(&content).map_err(|source| StoreError::Serialization {
            flow_id: flow_id.to_string(),
            source,
        })
    }

    /// Writes to a sibling temp file first and renames it into place, so a
    /// failed write never truncates the previous save. The temp file is
    /// removed if the rename fails.
    fn save(&mut self, flow_id: &str, snapshot: &FlowSnapshot) -> Result<(), StoreError> {
        let path = self.path_for(flow_id)?;
        let json = snapshot
            .to_json_pretty()
            .map_err(|source| StoreError::Serialization {
                flow_id: flow_id.to_string(),
                source,
            })?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        if let Err(source) = fs::rename(&tmp, &path) {
            if let Err(e) = fs::remove_file(&tmp) {
                tracing::warn!(path = %tmp.display(), error = %e, "failed to remove temp file");
            }
            return Err(StoreError::Io { path, source });
        }
        tracing::debug!(path = %path.display(), "wrote flow snapshot");
        Ok(())
    }

    fn exists(&self, flow_id: &str) -> Result<bool, StoreError> {
        Ok(self.path_for(flow_id)?.is_file())
    }
}
