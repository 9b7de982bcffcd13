//! The seam between an editing session and wherever flows are stored.
//!
//! A [`GraphState`](crate::graph::GraphState) never talks to a store; the
//! session hands it a [`FlowSnapshot`] after loading and takes one back before
//! saving.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::StoreError;
use crate::graph::FlowSnapshot;

pub trait FlowStore {
    fn load(&self, flow_id: &str) -> Result<FlowSnapshot, StoreError>;

    fn save(&mut self, flow_id: &str, snapshot: &FlowSnapshot) -> Result<(), StoreError>;

    fn exists(&self, flow_id: &str) -> Result<bool, StoreError>;
}

/// Rejects ids that are empty, too long, or could escape a storage root.
pub fn validate_flow_id(flow_id: &str) -> Result<(), StoreError> {
    let valid = !flow_id.is_empty()
        && flow_id.len() <= 128
        && flow_id != "."
        && flow_id != ".."
        && flow_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidFlowId(flow_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_id_validation() {
        assert!(validate_flow_id("order-approval_v2").is_ok());
        assert!(validate_flow_id("flow.backup").is_ok());
        for bad in ["", "..", "../etc", "a/b", "a\\b", "with space"] {
            assert!(
                matches!(validate_flow_id(bad), Err(StoreError::InvalidFlowId(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
