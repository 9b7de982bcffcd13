use super::{FlowStore, validate_flow_id};
use crate::error::StoreError;
use crate::graph::FlowSnapshot;
use ahash::AHashMap;

/// Keeps snapshots in a map. Useful for tests and for hosts that persist
/// elsewhere and only need the seam.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    flows: AHashMap<String, FlowSnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }
}

impl FlowStore for MemoryStore {
    fn load(&self, flow_id: &str) -> Result<FlowSnapshot, StoreError> {
        validate_flow_id(flow_id)?;
        self.flows
            .get(flow_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(flow_id.to_string()))
    }

    fn save(&mut self, flow_id: &str, snapshot: &FlowSnapshot) -> Result<(), StoreError> {
        validate_flow_id(flow_id)?;
        self.flows.insert(flow_id.to_string(), snapshot.clone());
        Ok(())
    }

    fn exists(&self, flow_id: &str) -> Result<bool, StoreError> {
        validate_flow_id(flow_id)?;
        Ok(self.flows.contains_key(flow_id))
    }
}
