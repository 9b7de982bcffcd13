//! One editing session over one flow.
//!
//! An [`EditorSession`] is the handle a host passes down its view tree in
//! place of a global store: it owns the session's [`GraphState`], remembers
//! which flow it came from, and knows whether there are unsaved edits.

use crate::error::{ConfigError, StoreError};
use crate::graph::{GraphState, IdGenerator, Viewport};
use crate::persistence::FlowStore;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunables for an editing session. Every field has a default, so a config
/// file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    /// Number of revisions after which [`EditorSession::autosave`] writes.
    /// `None` disables autosave.
    pub autosave_after_edits: Option<u64>,
    /// Viewport used for flows that are new or were saved without one.
    pub default_viewport: Viewport,
    pub node_id_prefix: String,
    pub edge_id_prefix: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            autosave_after_edits: Some(20),
            default_viewport: Viewport::default(),
            node_id_prefix: "node".to_string(),
            edge_id_prefix: "edge".to_string(),
        }
    }
}

impl SessionConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.autosave_after_edits == Some(0) {
            return Err(ConfigError::Invalid {
                field: "autosaveAfterEdits",
                message: "must be at least 1; use null to disable autosave".to_string(),
            });
        }
        if !(self.default_viewport.zoom.is_finite() && self.default_viewport.zoom > 0.0) {
            return Err(ConfigError::Invalid {
                field: "defaultViewport.zoom",
                message: format!("must be a positive number, got {}", self.default_viewport.zoom),
            });
        }
        if self.node_id_prefix.is_empty() || self.edge_id_prefix.is_empty() {
            return Err(ConfigError::Invalid {
                field: "nodeIdPrefix/edgeIdPrefix",
                message: "id prefixes must not be empty".to_string(),
            });
        }
        Ok(())
    }

    fn id_generator(&self) -> IdGenerator {
        IdGenerator::with_prefixes(self.node_id_prefix.as_str(), self.edge_id_prefix.as_str())
    }
}

#[derive(Debug)]
pub struct EditorSession {
    flow_id: String,
    state: GraphState,
    config: SessionConfig,
    saved_revision: u64,
}

impl EditorSession {
    /// A session for a flow that has never been saved.
    pub fn new(flow_id: impl Into<String>, config: SessionConfig) -> Self {
        let mut state = GraphState::with_id_generator(config.id_generator());
        state.set_viewport(config.default_viewport);
        let saved_revision = state.revision();
        Self {
            flow_id: flow_id.into(),
            state,
            config,
            saved_revision,
        }
    }

    /// Loads `flow_id` from `store`, or starts an empty session if the store
    /// has no such flow. Any other store error is returned.
    pub fn open<S: FlowStore + ?Sized>(
        store: &S,
        flow_id: &str,
        config: SessionConfig,
    ) -> Result<Self, StoreError> {
        let mut session = Self::new(flow_id, config);
        match store.load(flow_id) {
            Ok(snapshot) => {
                tracing::info!(
                    flow_id,
                    nodes = snapshot.nodes.len(),
                    edges = snapshot.edges.len(),
                    "opened flow"
                );
                session.state.hydrate_snapshot(snapshot);
                session.saved_revision = session.state.revision();
            }
            Err(StoreError::NotFound(_)) => {
                tracing::info!(flow_id, "flow not found, starting empty");
            }
            Err(e) => return Err(e),
        }
        Ok(session)
    }

    pub fn flow_id(&self) -> &str {
        &self.flow_id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &GraphState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GraphState {
        &mut self.state
    }

    /// True when the graph has been touched since the last load or save.
    pub fn is_dirty(&self) -> bool {
        self.state.revision() != self.saved_revision
    }

    pub fn pending_edits(&self) -> u64 {
        self.state.revision().saturating_sub(self.saved_revision)
    }

    /// Writes the current snapshot. On failure the graph and the dirty flag
    /// are left as they were.
    pub fn save<S: FlowStore + ?Sized>(&mut self, store: &mut S) -> Result<(), StoreError> {
        let snapshot = self.state.snapshot();
        match store.save(&self.flow_id, &snapshot) {
            Ok(()) => {
                self.saved_revision = self.state.revision();
                tracing::info!(flow_id = %self.flow_id, nodes = snapshot.nodes.len(), "saved flow");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(flow_id = %self.flow_id, error = %e, "failed to save flow");
                Err(e)
            }
        }
    }

    /// Saves when autosave is enabled and enough edits have piled up.
    /// Returns whether a save happened.
    pub fn autosave<S: FlowStore + ?Sized>(&mut self, store: &mut S) -> Result<bool, StoreError> {
        match self.config.autosave_after_edits {
            Some(threshold) if self.pending_edits() >= threshold => {
                self.save(store)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Drops unsaved work by reloading the last saved snapshot, or clearing
    /// the graph when the flow was never saved.
    pub fn revert<S: FlowStore + ?Sized>(&mut self, store: &S) -> Result<(), StoreError> {
        let saved = match store.load(&self.flow_id) {
            Ok(snapshot) => Some(snapshot),
            Err(StoreError::NotFound(_)) => None,
            Err(e) => return Err(e),
        };
        self.state.reset();
        self.state.set_viewport(self.config.default_viewport);
        if let Some(snapshot) = saved {
            self.state.hydrate_snapshot(snapshot);
        }
        self.saved_revision = self.state.revision();
        Ok(())
    }

    /// Ends the session without saving.
    pub fn discard(self) {
        if self.is_dirty() {
            tracing::debug!(
                flow_id = %self.flow_id,
                pending = self.pending_edits(),
                "discarding unsaved edits"
            );
        }
    }
}
