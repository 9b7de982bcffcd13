//! # flowgraph - State Core for Node-Graph Flow Editors
//!
//! **flowgraph** holds the in-memory model behind a visual flow editor: the
//! nodes, the edges between them, the canvas viewport and the current
//! selection. A canvas front-end forwards user gestures as small change
//! descriptors; a persistence layer reads and writes whole snapshots.
//!
//! ## Core Workflow
//!
//! 1.  **Open a Session**: `EditorSession::open` loads a `FlowSnapshot` from any
//!     `FlowStore` (or starts empty) and owns the `GraphState` for that flow.
//! 2.  **Apply Gestures**: drag, connect, edit and delete gestures map onto
//!     `GraphState` operations, either directly or through `EditorCommand`.
//! 3.  **Check the Flow**: `lint` reports dangling edges, duplicate ids,
//!     unreachable steps and, optionally, cycles. The state core itself never
//!     rejects an edit.
//! 4.  **Save**: `EditorSession::save` (or `autosave`) writes the snapshot back.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flowgraph::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut store = JsonFileStore::open("flows")?;
//!     let mut session = EditorSession::open(&store, "order-approval", SessionConfig::default())?;
//!
//!     let graph = session.state_mut();
//!     let start = graph.next_node_id();
//!     let step = graph.next_node_id();
//!     graph.add_node(Node::new(start.as_str(), NodeType::Start, Position::new(0.0, 0.0)));
//!     graph.add_node(
//!         Node::new(step.as_str(), NodeType::Action, Position::new(200.0, 0.0)).with_label("Notify"),
//!     );
//!     graph.connect(Connection::new(start.as_str(), step.as_str()));
//!
//!     let report = lint(&session.state().snapshot(), LintOptions::default());
//!     for issue in &report.issues {
//!         println!("{}: {}", issue.severity(), issue);
//!     }
//!
//!     session.save(&mut store)?;
//!     Ok(())
//! }
//! ```

pub mod command;
pub mod error;
pub mod graph;
pub mod lint;
pub mod persistence;
pub mod prelude;
pub mod session;
