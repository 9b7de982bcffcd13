use super::changes::{self, EdgeChange, NodeChange};
use super::ids::IdGenerator;
use super::model::{Connection, Edge, FlowSnapshot, Node, Viewport};
use serde_json::{Map, Value};

/// The canonical in-memory graph of one flow being edited.
///
/// Every operation is synchronous and infallible. Stale or unknown ids are
/// tolerated and turn into no-ops; the only referential cleanup performed is
/// the edge cascade in [`GraphState::delete_node`]. Consumers that need
/// stricter guarantees run [`crate::lint`] over a snapshot.
#[derive(Debug, Clone)]
pub struct GraphState {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    viewport: Viewport,
    selected_node: Option<Node>,
    ids: IdGenerator,
    revision: u64,
}

impl GraphState {
    pub fn new() -> Self {
        Self::with_id_generator(IdGenerator::new())
    }

    pub fn with_id_generator(ids: IdGenerator) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            viewport: Viewport::default(),
            selected_node: None,
            ids,
            revision: 0,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The node recorded by the last [`GraphState::set_selected_node`]. It may
    /// no longer be part of [`GraphState::nodes`].
    pub fn selected_node(&self) -> Option<&Node> {
        self.selected_node.as_ref()
    }

    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    pub fn edge(&self, edge_id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == edge_id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Counter bumped by every mutating call, including no-ops.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn next_node_id(&mut self) -> String {
        self.ids.next_node_id()
    }

    /// Replaces nodes and edges wholesale. Dangling edges are kept as given.
    /// Without a viewport the current one is left in place; the selection is
    /// not touched either.
    pub fn hydrate(&mut self, nodes: Vec<Node>, edges: Vec<Edge>, viewport: Option<Viewport>) {
        tracing::debug!(nodes = nodes.len(), edges = edges.len(), "hydrating graph");
        self.nodes = nodes;
        self.edges = edges;
        if let Some(viewport) = viewport {
            self.viewport = viewport;
        }
        self.touch();
    }

    pub fn hydrate_snapshot(&mut self, snapshot: FlowSnapshot) {
        self.hydrate(snapshot.nodes, snapshot.edges, snapshot.viewport);
    }

    /// A full copy of the graph, ready to hand to a persistence gateway.
    pub fn snapshot(&self) -> FlowSnapshot {
        FlowSnapshot {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            viewport: Some(self.viewport),
        }
    }

    pub fn apply_node_changes<I>(&mut self, changes: I) -> &[Node]
    where
        I: IntoIterator<Item = NodeChange>,
    {
        let nodes = std::mem::take(&mut self.nodes);
        self.nodes = changes::apply_node_changes(changes, nodes);
        self.touch();
        &self.nodes
    }

    pub fn apply_edge_changes<I>(&mut self, changes: I) -> &[Edge]
    where
        I: IntoIterator<Item = EdgeChange>,
    {
        let edges = std::mem::take(&mut self.edges);
        self.edges = changes::apply_edge_changes(changes, edges);
        self.touch();
        &self.edges
    }

    /// Appends a new edge for `connection` under a fresh id. Parallel edges
    /// and cycles are allowed.
    pub fn connect(&mut self, connection: Connection) -> &Edge {
        let id = self.ids.next_edge_id();
        tracing::debug!(
            id = %id,
            source = %connection.source,
            target = %connection.target,
            "connecting nodes"
        );
        self.edges.push(connection.into_edge(id));
        self.touch();
        &self.edges[self.edges.len() - 1]
    }

    /// Appends `node` as given; the caller owns id uniqueness.
    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
        self.touch();
    }

    /// Merges `partial_data` into the data of `node_id`. Unknown ids are
    /// ignored.
    pub fn update_node(&mut self, node_id: &str, partial_data: Map<String, Value>) {
        match self.nodes.iter_mut().find(|n| n.id == node_id) {
            Some(node) => node.data.merge(partial_data),
            None => tracing::debug!(id = node_id, "ignoring update for unknown node"),
        }
        self.touch();
    }

    /// Removes `node_id` and every edge that starts or ends at it. The
    /// current selection is left as is, even if it points at this node.
    pub fn delete_node(&mut self, node_id: &str) {
        self.nodes.retain(|n| n.id != node_id);
        let before = self.edges.len();
        self.edges.retain(|e| !e.touches(node_id));
        tracing::debug!(
            id = node_id,
            cascaded_edges = before - self.edges.len(),
            "deleted node"
        );
        self.touch();
    }

    pub fn set_selected_node(&mut self, node: Option<Node>) {
        self.selected_node = node;
        self.touch();
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.touch();
    }

    /// Clears nodes, edges and selection, and returns the viewport to its
    /// default.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.selected_node = None;
        self.viewport = Viewport::default();
        self.touch();
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

impl Default for GraphState {
    fn default() -> Self {
        Self::new()
    }
}

impl From<FlowSnapshot> for GraphState {
    fn from(snapshot: FlowSnapshot) -> Self {
        let mut state = GraphState::new();
        state.hydrate_snapshot(snapshot);
        state
    }
}
