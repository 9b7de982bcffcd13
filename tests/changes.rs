//! Tests for ordered node and edge change application.
mod common;
use common::*;
use flowgraph::graph::{apply_edge_changes, apply_node_changes};
use flowgraph::prelude::*;

fn move_to(id: &str, x: f64, y: f64) -> NodeChange {
    NodeChange::Position {
        id: id.to_string(),
        position: Position::new(x, y),
    }
}

#[test]
fn test_last_position_change_wins() {
    let mut graph = GraphState::from(create_approval_flow());
    graph.apply_node_changes(vec![move_to("check", 1.0, 1.0), move_to("check", 9.0, 7.0)]);
    assert_eq!(
        graph.node("check").unwrap().position,
        Position::new(9.0, 7.0)
    );
}

#[test]
fn test_changes_see_earlier_changes() {
    let mut graph = GraphState::from(create_approval_flow());
    let replacement = node("approve", NodeType::Api, 5.0, 5.0).with_label("Call approvals API");
    let nodes = graph.apply_node_changes(vec![
        NodeChange::Replace {
            id: "approve".to_string(),
            data: None,
            item: Some(Box::new(replacement)),
        },
        move_to("approve", 42.0, 0.0),
    ]);

    let approve = nodes.iter().find(|n| n.id == "approve").unwrap();
    assert_eq!(approve.node_type, NodeType::Api);
    assert_eq!(approve.data.label, "Call approvals API");
    assert_eq!(approve.position, Position::new(42.0, 0.0));
}

#[test]
fn test_replace_keeps_list_order() {
    let flow = create_approval_flow();
    let nodes = apply_node_changes(
        vec![NodeChange::Replace {
            id: "check".to_string(),
            data: None,
            item: Some(Box::new(node("check", NodeType::Condition, 0.0, 0.0))),
        }],
        flow.nodes,
    );
    let ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["start", "check", "approve", "end"]);
}

#[test]
fn test_data_change_replaces_payload() {
    let mut graph = GraphState::from(create_approval_flow());
    graph.apply_node_changes(vec![NodeChange::Data {
        id: "approve".to_string(),
        data: NodeData::new("Auto approve"),
    }]);
    let approve = graph.node("approve").unwrap();
    assert_eq!(approve.data, NodeData::new("Auto approve"));
}

#[test]
fn test_select_change_sets_flag() {
    let mut graph = GraphState::from(create_approval_flow());
    graph.apply_node_changes(vec![NodeChange::Select {
        id: "start".to_string(),
        selected: true,
    }]);
    assert!(graph.node("start").unwrap().selected);
    assert!(!graph.node("end").unwrap().selected);
    // Flag-level selection does not touch the tracked selected node.
    assert!(graph.selected_node().is_none());
}

#[test]
fn test_node_removal_change_does_not_cascade() {
    let mut graph = GraphState::from(create_approval_flow());
    graph.apply_node_changes(vec![NodeChange::Remove {
        id: "check".to_string(),
    }]);
    assert!(graph.node("check").is_none());
    assert_eq!(graph.edges().len(), 4);
    assert!(graph.edges().iter().any(|e| e.touches("check")));
}

#[test]
fn test_unknown_ids_are_skipped() {
    let flow = create_approval_flow();
    let nodes = apply_node_changes(vec![move_to("missing", 1.0, 1.0)], flow.nodes.clone());
    assert_eq!(nodes, flow.nodes);

    let edges = apply_edge_changes(
        vec![EdgeChange::Remove {
            id: "missing".to_string(),
        }],
        flow.edges.clone(),
    );
    assert_eq!(edges, flow.edges);
}

#[test]
fn test_edge_select_and_remove() {
    let mut graph = GraphState::from(create_approval_flow());
    let edges = graph.apply_edge_changes(vec![
        EdgeChange::Select {
            id: "e2".to_string(),
            selected: true,
        },
        EdgeChange::Remove {
            id: "e4".to_string(),
        },
    ]);
    assert_eq!(edges.len(), 3);
    assert!(edges.iter().find(|e| e.id == "e2").unwrap().selected);
    assert!(edges.iter().all(|e| e.id != "e4"));
}

#[test]
fn test_changes_deserialize_from_wire_format() {
    let json = r#"[
        {"kind": "position", "id": "start", "position": {"x": 5, "y": 6}},
        {"kind": "data", "id": "end", "data": {"label": "Done", "description": "All finished"}},
        {"kind": "select", "id": "check", "selected": true},
        {"kind": "remove", "id": "approve"}
    ]"#;
    let changes: Vec<NodeChange> = serde_json::from_str(json).unwrap();

    let mut graph = GraphState::from(create_approval_flow());
    graph.apply_node_changes(changes);

    assert_eq!(graph.node("start").unwrap().position, Position::new(5.0, 6.0));
    assert_eq!(
        graph.node("end").unwrap().data.description.as_deref(),
        Some("All finished")
    );
    assert!(graph.node("check").unwrap().selected);
    assert!(graph.node("approve").is_none());
}

#[test]
fn test_replace_change_with_data_replaces_payload() {
    let json = r#"[{"kind": "replace", "id": "approve", "data": {"label": "Renamed"}}]"#;
    let changes: Vec<NodeChange> = serde_json::from_str(json).unwrap();

    let mut graph = GraphState::from(create_approval_flow());
    graph.apply_node_changes(changes);

    let approve = graph.node("approve").unwrap();
    assert_eq!(approve.data, NodeData::new("Renamed"));
    assert_eq!(approve.node_type, NodeType::Action);
    assert_eq!(approve.position, Position::new(400.0, -100.0));
}

#[test]
fn test_replace_change_applies_data_over_item() {
    let json = r#"[{
        "kind": "replace",
        "id": "approve",
        "item": {"id": "approve", "type": "api", "position": {"x": 1, "y": 2}, "data": {"label": "Old"}},
        "data": {"label": "New"}
    }]"#;
    let changes: Vec<NodeChange> = serde_json::from_str(json).unwrap();

    let mut graph = GraphState::from(create_approval_flow());
    graph.apply_node_changes(changes);

    let approve = graph.node("approve").unwrap();
    assert_eq!(approve.node_type, NodeType::Api);
    assert_eq!(approve.position, Position::new(1.0, 2.0));
    assert_eq!(approve.data.label, "New");
}
