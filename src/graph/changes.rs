use super::model::{Edge, Node, NodeData, Position};
use serde::{Deserialize, Serialize};

/// One incremental mutation to the node list, as forwarded by the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeChange {
    Position { id: String, position: Position },
    /// Replaces the node's data payload.
    Data { id: String, data: NodeData },
    /// Replaces the data payload like `data`. An `item`, when given,
    /// first replaces the whole node in place; `data` then applies on top.
    Replace {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<NodeData>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        item: Option<Box<Node>>,
    },
    Select { id: String, selected: bool },
    Remove { id: String },
}

impl NodeChange {
    pub fn id(&self) -> &str {
        match self {
            NodeChange::Position { id, .. }
            | NodeChange::Data { id, .. }
            | NodeChange::Replace { id, .. }
            | NodeChange::Select { id, .. }
            | NodeChange::Remove { id } => id,
        }
    }
}

/// One incremental mutation to the edge list. Edges have no position of
/// their own, so there is no position variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EdgeChange {
    Select { id: String, selected: bool },
    Remove { id: String },
}

impl EdgeChange {
    pub fn id(&self) -> &str {
        match self {
            EdgeChange::Select { id, .. } | EdgeChange::Remove { id } => id,
        }
    }
}

/// Applies `changes` to `nodes` strictly in order and returns the result.
///
/// A change naming an id that is not (or no longer) present is skipped.
/// Removing a node here leaves its edges alone.
pub fn apply_node_changes<I>(changes: I, mut nodes: Vec<Node>) -> Vec<Node>
where
    I: IntoIterator<Item = NodeChange>,
{
    for change in changes {
        let Some(index) = nodes.iter().position(|n| n.id == change.id()) else {
            tracing::debug!(id = change.id(), "skipping node change for unknown id");
            continue;
        };
        match change {
            NodeChange::Position { position, .. } => nodes[index].position = position,
            NodeChange::Data { data, .. } => nodes[index].data = data,
            NodeChange::Replace { data, item, .. } => {
                if let Some(item) = item {
                    nodes[index] = *item;
                }
                if let Some(data) = data {
                    nodes[index].data = data;
                }
            }
            NodeChange::Select { selected, .. } => nodes[index].selected = selected,
            NodeChange::Remove { .. } => {
                nodes.remove(index);
            }
        }
    }
    nodes
}

/// Edge counterpart of [`apply_node_changes`].
pub fn apply_edge_changes<I>(changes: I, mut edges: Vec<Edge>) -> Vec<Edge>
where
    I: IntoIterator<Item = EdgeChange>,
{
    for change in changes {
        let Some(index) = edges.iter().position(|e| e.id == change.id()) else {
            tracing::debug!(id = change.id(), "skipping edge change for unknown id");
            continue;
        };
        match change {
            EdgeChange::Select { selected, .. } => edges[index].selected = selected,
            EdgeChange::Remove { .. } => {
                edges.remove(index);
            }
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeType;
    use serde_json::json;

    #[test]
    fn test_node_change_wire_shape() {
        let change: NodeChange = serde_json::from_value(json!({
            "kind": "position",
            "id": "a",
            "position": {"x": 10.0, "y": 20.0},
        }))
        .unwrap();
        assert_eq!(
            change,
            NodeChange::Position {
                id: "a".to_string(),
                position: Position::new(10.0, 20.0),
            }
        );

        let change: EdgeChange =
            serde_json::from_value(json!({"kind": "select", "id": "e1", "selected": true})).unwrap();
        assert_eq!(change.id(), "e1");
    }

    #[test]
    fn test_change_after_remove_is_skipped() {
        let nodes = vec![Node::new("a", NodeType::Action, Position::default())];
        let result = apply_node_changes(
            vec![
                NodeChange::Remove { id: "a".to_string() },
                NodeChange::Select {
                    id: "a".to_string(),
                    selected: true,
                },
            ],
            nodes,
        );
        assert!(result.is_empty());
    }
}
