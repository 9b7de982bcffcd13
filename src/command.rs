//! Serializable editor commands.
//!
//! A canvas front-end (or a replay script) describes each user gesture as an
//! [`EditorCommand`] and hands it to [`EditorCommand::apply`], which forwards
//! it to the matching [`GraphState`] operation.

use crate::graph::{
    Connection, EdgeChange, FlowSnapshot, GraphState, Node, NodeChange, Viewport,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum EditorCommand {
    Hydrate {
        snapshot: FlowSnapshot,
    },
    AddNode {
        node: Node,
    },
    UpdateNode {
        #[serde(rename = "nodeId", alias = "node_id")]
        node_id: String,
        data: Map<String, Value>,
    },
    DeleteNode {
        #[serde(rename = "nodeId", alias = "node_id")]
        node_id: String,
    },
    Connect {
        connection: Connection,
    },
    NodeChanges {
        changes: Vec<NodeChange>,
    },
    EdgeChanges {
        changes: Vec<EdgeChange>,
    },
    /// Selects the node with this id, or clears the selection when absent.
    /// An id that matches no node clears the selection as well.
    SelectNode {
        #[serde(default, rename = "nodeId", alias = "node_id")]
        node_id: Option<String>,
    },
    SetViewport {
        viewport: Viewport,
    },
    Reset,
}

impl EditorCommand {
    pub fn apply(self, state: &mut GraphState) {
        match self {
            EditorCommand::Hydrate { snapshot } => state.hydrate_snapshot(snapshot),
            EditorCommand::AddNode { node } => state.add_node(node),
            EditorCommand::UpdateNode { node_id, data } => state.update_node(&node_id, data),
            EditorCommand::DeleteNode { node_id } => state.delete_node(&node_id),
            EditorCommand::Connect { connection } => {
                state.connect(connection);
            }
            EditorCommand::NodeChanges { changes } => {
                state.apply_node_changes(changes);
            }
            EditorCommand::EdgeChanges { changes } => {
                state.apply_edge_changes(changes);
            }
            EditorCommand::SelectNode { node_id } => {
                let node = node_id.and_then(|id| state.node(&id).cloned());
                state.set_selected_node(node);
            }
            EditorCommand::SetViewport { viewport } => state.set_viewport(viewport),
            EditorCommand::Reset => state.reset(),
        }
    }

    /// Replays `commands` in order against `state`.
    pub fn apply_all<I>(commands: I, state: &mut GraphState)
    where
        I: IntoIterator<Item = EditorCommand>,
    {
        for command in commands {
            command.apply(state);
        }
    }
}
