use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

fn is_false(value: &bool) -> bool {
    !*value
}

/// The fixed set of step kinds a flow can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Start,
    End,
    Action,
    Condition,
    Form,
    Database,
    Api,
    Component,
}

impl NodeType {
    pub const ALL: [NodeType; 8] = [
        NodeType::Start,
        NodeType::End,
        NodeType::Action,
        NodeType::Condition,
        NodeType::Form,
        NodeType::Database,
        NodeType::Api,
        NodeType::Component,
    ];

    /// Label a freshly dropped node of this type starts with.
    pub fn default_label(self) -> &'static str {
        match self {
            NodeType::Start => "Start",
            NodeType::End => "End",
            NodeType::Action => "Action",
            NodeType::Condition => "Condition",
            NodeType::Form => "Form",
            NodeType::Database => "Database",
            NodeType::Api => "API Call",
            NodeType::Component => "Component",
        }
    }

    /// Named output handles. An empty slice means the node has a single
    /// anonymous output, `None` means it has no output at all.
    pub fn source_handles(self) -> Option<&'static [&'static str]> {
        match self {
            NodeType::End => None,
            NodeType::Condition => Some(&["true", "false"]),
            _ => Some(&[]),
        }
    }

    /// Whether the node accepts incoming connections.
    pub fn accepts_input(self) -> bool {
        !matches!(self, NodeType::Start)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Start => "start",
            NodeType::End => "end",
            NodeType::Action => "action",
            NodeType::Condition => "condition",
            NodeType::Form => "form",
            NodeType::Database => "database",
            NodeType::Api => "api",
            NodeType::Component => "component",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point on the canvas in flow coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The payload a node carries. Keys other than `label`, `description` and
/// `config` are kept in `extra` so they survive a load/save cycle untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeData {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NodeData {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_config(mut self, config: Map<String, Value>) -> Self {
        self.config = Some(config);
        self
    }

    /// Shallow-merges `patch` into this payload, key by key.
    ///
    /// `label` and `description` take strings and `config` takes an
    /// object; a value of any other type is ignored and the old value kept.
    /// `null` clears `description` and `config`.
    pub fn merge(&mut self, patch: Map<String, Value>) {
        for (key, value) in patch {
            match key.as_str() {
                "label" => match value {
                    Value::String(label) => self.label = label,
                    other => {
                        tracing::debug!(value = %other, "ignoring non-string label in node data patch")
                    }
                },
                "description" => match value {
                    Value::String(text) => self.description = Some(text),
                    Value::Null => self.description = None,
                    other => {
                        tracing::debug!(value = %other, "ignoring non-string description in node data patch")
                    }
                },
                "config" => match value {
                    Value::Object(config) => self.config = Some(config),
                    Value::Null => self.config = None,
                    other => {
                        tracing::debug!(value = %other, "ignoring non-object config in node data patch")
                    }
                },
                _ => {
                    self.extra.insert(key, value);
                }
            }
        }
    }
}

/// One step in a flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub position: Position,
    pub data: NodeData,
    #[serde(default, skip_serializing_if = "is_false")]
    pub selected: bool,
}

impl Node {
    pub fn new(id: impl Into<String>, node_type: NodeType, position: Position) -> Self {
        Self {
            id: id.into(),
            node_type,
            position,
            data: NodeData::new(node_type.default_label()),
            selected: false,
        }
    }

    pub fn with_data(mut self, data: NodeData) -> Self {
        self.data = data;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.data.label = label.into();
        self
    }
}

/// A directed connection between two nodes, optionally pinned to handles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(
        default,
        rename = "sourceHandle",
        alias = "source_handle",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_handle: Option<String>,
    #[serde(
        default,
        rename = "targetHandle",
        alias = "target_handle",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_handle: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub selected: bool,
}

impl Edge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
            selected: false,
        }
    }

    /// True if either endpoint is `node_id`.
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// A proposed edge coming from a connect gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub source: String,
    pub target: String,
    #[serde(
        default,
        rename = "sourceHandle",
        alias = "source_handle",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_handle: Option<String>,
    #[serde(
        default,
        rename = "targetHandle",
        alias = "target_handle",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_handle: Option<String>,
}

impl Connection {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
        }
    }

    pub fn with_handles(mut self, source_handle: Option<&str>, target_handle: Option<&str>) -> Self {
        self.source_handle = source_handle.map(str::to_string);
        self.target_handle = target_handle.map(str::to_string);
        self
    }

    pub(crate) fn into_edge(self, id: String) -> Edge {
        Edge {
            id,
            source: self.source,
            target: self.target,
            source_handle: self.source_handle,
            target_handle: self.target_handle,
            selected: false,
        }
    }
}

/// Pan offset and zoom of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

/// The full persisted shape of a flow.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowSnapshot {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
}

impl FlowSnapshot {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
