//! Prelude module for convenient imports
//!
//! Re-exports the types most hosts need to open a session, edit a graph and
//! save it again.

// Graph model and state
pub use crate::graph::{
    Connection, Edge, EdgeChange, FlowSnapshot, GraphState, IdGenerator, Node, NodeChange,
    NodeData, NodeType, Position, Viewport,
};

// Commands, sessions and persistence
pub use crate::command::EditorCommand;
pub use crate::persistence::{FlowStore, JsonFileStore, MemoryStore};
pub use crate::session::{EditorSession, SessionConfig};

// Validation
pub use crate::lint::{LintIssue, LintOptions, LintReport, Severity, lint};

// Error types
pub use crate::error::{ConfigError, StoreError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
