//! Tests for the flow linter.
mod common;
use common::*;
use flowgraph::prelude::*;

fn strict() -> LintOptions {
    LintOptions {
        require_acyclic: true,
        ..LintOptions::default()
    }
}

#[test]
fn test_clean_flow_has_no_issues() {
    let report = lint(&create_approval_flow(), strict());
    assert!(report.is_clean(), "unexpected issues: {:?}", report.issues);
}

#[test]
fn test_empty_flow_is_clean() {
    let report = lint(&FlowSnapshot::default(), strict());
    assert!(report.is_clean());
}

#[test]
fn test_removal_change_leaves_dangling_edges_for_linter() {
    let mut graph = GraphState::from(create_approval_flow());
    graph.apply_node_changes(vec![NodeChange::Remove {
        id: "approve".to_string(),
    }]);

    let report = lint(&graph.snapshot(), LintOptions::default());
    assert!(report.has_errors());
    let dangling: Vec<_> = report
        .errors()
        .filter_map(|issue| match issue {
            LintIssue::DanglingEdge {
                edge_id,
                missing_node_id,
            } => Some((edge_id.as_str(), missing_node_id.as_str())),
            _ => None,
        })
        .collect();
    assert_eq!(dangling, vec![("e2", "approve"), ("e3", "approve")]);
}

#[test]
fn test_delete_node_leaves_no_dangling_edges() {
    let mut graph = GraphState::from(create_approval_flow());
    graph.delete_node("approve");
    let report = lint(&graph.snapshot(), LintOptions::default());
    assert!(!report.has_errors(), "unexpected errors: {:?}", report.issues);
}

#[test]
fn test_duplicate_ids_are_errors() {
    let mut flow = create_approval_flow();
    flow.nodes.push(node("check", NodeType::Action, 0.0, 0.0));
    flow.edges.push(Edge::new("e1", "approve", "end"));

    let report = lint(&flow, LintOptions::default());
    assert!(report.issues.contains(&LintIssue::DuplicateNodeId {
        id: "check".to_string()
    }));
    assert!(report.issues.contains(&LintIssue::DuplicateEdgeId {
        id: "e1".to_string()
    }));
    assert_eq!(report.error_count(), 2);
}

#[test]
fn test_start_node_rules() {
    let flow = FlowSnapshot {
        nodes: vec![node("a", NodeType::Action, 0.0, 0.0)],
        ..FlowSnapshot::default()
    };
    let report = lint(&flow, LintOptions::default());
    assert_eq!(report.issues, vec![LintIssue::MissingStartNode]);
    assert!(!report.has_errors());

    let flow = FlowSnapshot {
        nodes: vec![
            node("s1", NodeType::Start, 0.0, 0.0),
            node("s2", NodeType::Start, 0.0, 100.0),
        ],
        ..FlowSnapshot::default()
    };
    let report = lint(&flow, LintOptions::default());
    assert_eq!(report.issues, vec![LintIssue::MultipleStartNodes { count: 2 }]);
}

#[test]
fn test_handle_rules() {
    let mut flow = create_approval_flow();
    flow.edges.push(Edge {
        source_handle: Some("maybe".to_string()),
        ..Edge::new("e5", "check", "end")
    });
    flow.edges.push(Edge::new("e6", "end", "start"));

    let report = lint(&flow, LintOptions::default());
    assert!(report.issues.contains(&LintIssue::UnknownSourceHandle {
        edge_id: "e5".to_string(),
        node_id: "check".to_string(),
        node_type: NodeType::Condition,
        handle: "maybe".to_string(),
    }));
    assert!(report.issues.contains(&LintIssue::OutputFromEnd {
        edge_id: "e6".to_string(),
        node_id: "end".to_string(),
    }));
    assert!(report.issues.contains(&LintIssue::InputIntoStart {
        edge_id: "e6".to_string(),
        node_id: "start".to_string(),
    }));
}

#[test]
fn test_unreachable_nodes_are_warnings() {
    let mut flow = create_approval_flow();
    flow.nodes.push(node("orphan", NodeType::Database, 0.0, 300.0));

    let report = lint(&flow, LintOptions::default());
    assert_eq!(
        report.issues,
        vec![LintIssue::UnreachableNode {
            id: "orphan".to_string()
        }]
    );
    assert_eq!(report.warning_count(), 1);

    let relaxed = LintOptions {
        check_reachability: false,
        ..LintOptions::default()
    };
    assert!(lint(&flow, relaxed).is_clean());
}

#[test]
fn test_cycles_only_reported_when_required() {
    let mut flow = create_approval_flow();
    flow.edges.push(Edge::new("back", "approve", "check"));

    assert!(lint(&flow, LintOptions::default()).is_clean());

    let report = lint(&flow, strict());
    assert_eq!(
        report.issues,
        vec![LintIssue::Cycle {
            node_ids: vec![
                "check".to_string(),
                "approve".to_string(),
                "check".to_string()
            ]
        }]
    );
    assert!(report.has_errors());
}

#[test]
fn test_issue_messages() {
    let issue = LintIssue::DanglingEdge {
        edge_id: "e9".to_string(),
        missing_node_id: "ghost".to_string(),
    };
    assert!(issue.to_string().contains("e9"));
    assert!(issue.to_string().contains("ghost"));
    assert_eq!(issue.severity(), Severity::Error);

    let cycle = LintIssue::Cycle {
        node_ids: vec!["a".to_string(), "b".to_string(), "a".to_string()],
    };
    assert_eq!(cycle.to_string(), "Flow contains a cycle through a -> b -> a");
}
