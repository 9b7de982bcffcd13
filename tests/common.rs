//! Common test utilities for building flow graphs and snapshots.
use flowgraph::prelude::*;

/// A generator with a fixed session so edge ids are predictable.
#[allow(dead_code)]
pub fn fixed_ids() -> IdGenerator {
    IdGenerator::new().with_session(0x1234)
}

#[allow(dead_code)]
pub fn node(id: &str, node_type: NodeType, x: f64, y: f64) -> Node {
    Node::new(id, node_type, Position::new(x, y))
}

/// Creates the smallest useful flow.
///
/// Shape: `start -> check -(true)-> approve -> end`, `check -(false)-> end`
#[allow(dead_code)]
pub fn create_approval_flow() -> FlowSnapshot {
    FlowSnapshot {
        nodes: vec![
            node("start", NodeType::Start, 0.0, 0.0),
            node("check", NodeType::Condition, 200.0, 0.0).with_label("Amount > 1000?"),
            node("approve", NodeType::Action, 400.0, -100.0).with_label("Ask manager"),
            node("end", NodeType::End, 600.0, 0.0),
        ],
        edges: vec![
            Edge::new("e1", "start", "check"),
            Edge {
                source_handle: Some("true".to_string()),
                ..Edge::new("e2", "check", "approve")
            },
            Edge::new("e3", "approve", "end"),
            Edge {
                source_handle: Some("false".to_string()),
                ..Edge::new("e4", "check", "end")
            },
        ],
        viewport: Some(Viewport {
            x: -50.0,
            y: 20.0,
            zoom: 1.5,
        }),
    }
}

/// The approval flow as the editor front-end sends it over the wire.
#[allow(dead_code)]
pub const APPROVAL_FLOW_JSON: &str = r#"{
  "nodes": [
    {"id": "start", "type": "start", "position": {"x": 0, "y": 0}, "data": {"label": "Start"}},
    {"id": "check", "type": "condition", "position": {"x": 200, "y": 0},
     "data": {"label": "Amount > 1000?", "config": {"expression": "amount > 1000"}}},
    {"id": "approve", "type": "action", "position": {"x": 400, "y": -100},
     "data": {"label": "Ask manager", "description": "Sends an approval request", "icon": "mail"}},
    {"id": "end", "type": "end", "position": {"x": 600, "y": 0}, "data": {"label": "End"}}
  ],
  "edges": [
    {"id": "e1", "source": "start", "target": "check"},
    {"id": "e2", "source": "check", "target": "approve", "sourceHandle": "true"},
    {"id": "e3", "source": "approve", "target": "end"},
    {"id": "e4", "source": "check", "target": "end", "sourceHandle": "false"}
  ],
  "viewport": {"x": -50, "y": 20, "zoom": 1.5}
}"#;
