use super::issue::LintIssue;
use crate::graph::{FlowSnapshot, Node, NodeType};
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use std::collections::VecDeque;

/// Lookup tables shared by the individual checks.
pub(super) struct FlowIndex<'a> {
    pub(super) snapshot: &'a FlowSnapshot,
    nodes: AHashMap<&'a str, &'a Node>,
    /// `source -> [target]`, built from edges whose endpoints both exist.
    outgoing: AHashMap<&'a str, Vec<&'a str>>,
}

impl<'a> FlowIndex<'a> {
    pub(super) fn new(snapshot: &'a FlowSnapshot) -> Self {
        let mut nodes = AHashMap::new();
        for node in &snapshot.nodes {
            // First occurrence wins for duplicate ids.
            nodes.entry(node.id.as_str()).or_insert(node);
        }

        let mut outgoing: AHashMap<&str, Vec<&str>> = AHashMap::new();
        for edge in &snapshot.edges {
            if nodes.contains_key(edge.source.as_str()) && nodes.contains_key(edge.target.as_str())
            {
                outgoing
                    .entry(edge.source.as_str())
                    .or_default()
                    .push(edge.target.as_str());
            }
        }

        Self {
            snapshot,
            nodes,
            outgoing,
        }
    }

    fn node(&self, id: &str) -> Option<&'a Node> {
        self.nodes.get(id).copied()
    }

    fn successors(&self, id: &str) -> &[&'a str] {
        self.outgoing.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    fn start_nodes(&self) -> impl Iterator<Item = &'a Node> + '_ {
        self.snapshot
            .nodes
            .iter()
            .filter(|n| n.node_type == NodeType::Start)
    }
}

pub(super) fn check_duplicate_ids(index: &FlowIndex<'_>, issues: &mut Vec<LintIssue>) {
    let snapshot = index.snapshot;
    issues.extend(
        snapshot
            .nodes
            .iter()
            .map(|n| n.id.as_str())
            .duplicates()
            .map(|id| LintIssue::DuplicateNodeId { id: id.to_string() }),
    );
    issues.extend(
        snapshot
            .edges
            .iter()
            .map(|e| e.id.as_str())
            .duplicates()
            .map(|id| LintIssue::DuplicateEdgeId { id: id.to_string() }),
    );
}

pub(super) fn check_dangling_edges(index: &FlowIndex<'_>, issues: &mut Vec<LintIssue>) {
    for edge in &index.snapshot.edges {
        for endpoint in [&edge.source, &edge.target].into_iter().dedup() {
            if index.node(endpoint).is_none() {
                issues.push(LintIssue::DanglingEdge {
                    edge_id: edge.id.clone(),
                    missing_node_id: endpoint.clone(),
                });
            }
        }
    }
}

pub(super) fn check_start_nodes(index: &FlowIndex<'_>, issues: &mut Vec<LintIssue>) {
    match index.start_nodes().count() {
        0 if !index.snapshot.nodes.is_empty() => issues.push(LintIssue::MissingStartNode),
        0 | 1 => {}
        count => issues.push(LintIssue::MultipleStartNodes { count }),
    }
}

pub(super) fn check_handles(index: &FlowIndex<'_>, issues: &mut Vec<LintIssue>) {
    for edge in &index.snapshot.edges {
        if let Some(source) = index.node(&edge.source) {
            match source.node_type.source_handles() {
                None => issues.push(LintIssue::OutputFromEnd {
                    edge_id: edge.id.clone(),
                    node_id: source.id.clone(),
                }),
                Some(handles) if !handles.is_empty() => {
                    let unknown = edge
                        .source_handle
                        .as_ref()
                        .filter(|handle| !handles.contains(&handle.as_str()));
                    if let Some(handle) = unknown {
                        issues.push(LintIssue::UnknownSourceHandle {
                            edge_id: edge.id.clone(),
                            node_id: source.id.clone(),
                            node_type: source.node_type,
                            handle: handle.clone(),
                        });
                    }
                }
                Some(_) => {}
            }
        }
        if let Some(target) = index.node(&edge.target) {
            if !target.node_type.accepts_input() {
                issues.push(LintIssue::InputIntoStart {
                    edge_id: edge.id.clone(),
                    node_id: target.id.clone(),
                });
            }
        }
    }
}

pub(super) fn check_reachability(index: &FlowIndex<'_>, issues: &mut Vec<LintIssue>) {
    let mut queue: VecDeque<&str> = index.start_nodes().map(|n| n.id.as_str()).collect();
    if queue.is_empty() {
        return;
    }
    let mut seen: AHashSet<&str> = queue.iter().copied().collect();
    while let Some(id) = queue.pop_front() {
        for &next in index.successors(id) {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }

    issues.extend(
        index
            .snapshot
            .nodes
            .iter()
            .map(|n| n.id.as_str())
            .unique()
            .filter(|id| !seen.contains(id))
            .map(|id| LintIssue::UnreachableNode { id: id.to_string() }),
    );
}

/// Reports one cycle per back edge found by a depth-first walk.
pub(super) fn check_cycles(index: &FlowIndex<'_>, issues: &mut Vec<LintIssue>) {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        OnStack,
        Done,
    }

    let mut marks: AHashMap<&str, Mark> = AHashMap::new();
    let roots: Vec<&str> = index
        .snapshot
        .nodes
        .iter()
        .map(|n| n.id.as_str())
        .unique()
        .collect();

    for root in roots {
        if marks.contains_key(root) {
            continue;
        }
        // Each frame is a node plus the index of its next successor to visit.
        let mut stack: Vec<(&str, usize)> = vec![(root, 0)];
        marks.insert(root, Mark::OnStack);

        while let Some((id, cursor)) = stack.last().copied() {
            let successors = index.successors(id);
            let Some(&next) = successors.get(cursor) else {
                marks.insert(id, Mark::Done);
                stack.pop();
                continue;
            };
            if let Some(frame) = stack.last_mut() {
                frame.1 += 1;
            }
            match marks.get(next).copied() {
                None => {
                    marks.insert(next, Mark::OnStack);
                    stack.push((next, 0));
                }
                Some(Mark::OnStack) => {
                    let node_ids = stack
                        .iter()
                        .map(|(n, _)| *n)
                        .skip_while(|n| *n != next)
                        .chain(std::iter::once(next))
                        .map(str::to_string)
                        .collect();
                    issues.push(LintIssue::Cycle { node_ids });
                }
                Some(Mark::Done) => {}
            }
        }
    }
}
