use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::services::GoogleService;

/// Opaque node identifier.  Freshly generated ids are UUIDv7 strings, so
/// later nodes compare greater than earlier ones.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Starter,
    Prompt,
    Tool,
}

impl NodeKind {
    pub const ALL: [NodeKind; 3] = [NodeKind::Starter, NodeKind::Prompt, NodeKind::Tool];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Starter => "starter",
            NodeKind::Prompt => "prompt",
            NodeKind::Tool => "tool",
        }
    }

    /// Label shown on the sidebar buttons.
    pub fn button_label(&self) -> &'static str {
        match self {
            NodeKind::Starter => "Starter",
            NodeKind::Prompt => "Prompt",
            NodeKind::Tool => "Tool",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            NodeKind::Starter => "node-starter",
            NodeKind::Prompt => "node-prompt",
            NodeKind::Tool => "node-tool",
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("unknown node kind '{0}'")]
pub struct UnknownNodeKind(pub String);

impl std::str::FromStr for NodeKind {
    type Err = UnknownNodeKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownNodeKind(s.to_string()))
    }
}

/// Canvas pixel coordinates.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Debug, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

pub type ToolId = u32;

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum ToolCategory {
    Google,
}

/// Static catalog entry.  Nodes hold copies, the catalog owns the originals.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct Tool {
    pub id: ToolId,
    pub name: String,
    pub description: String,
    pub category: ToolCategory,
    pub service: GoogleService,
    pub icon: String,
    pub requires_auth: bool,
}

impl Tool {
    pub fn needs_google_connection(&self) -> bool {
        self.requires_auth && self.category == ToolCategory::Google
    }
}

/// A positioned unit on the workflow canvas.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct WorkflowNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub position: Point,
    pub content: String,
    // At most one entry; kept as a list to match the serialized shape.
    pub tools: Vec<Tool>,
    pub active_tool_id: Option<ToolId>,
    // Values typed into the active tool's config panel, by field key.
    #[serde(default)]
    pub config: BTreeMap<String, String>,
}

impl WorkflowNode {
    pub fn new(id: NodeId, kind: NodeKind, position: Point) -> Self {
        Self {
            id,
            kind,
            position,
            content: String::new(),
            tools: Vec::new(),
            active_tool_id: None,
            config: BTreeMap::new(),
        }
    }

    /// The tool whose configuration is currently shown, if any.
    pub fn active_tool(&self) -> Option<&Tool> {
        let active = self.active_tool_id?;
        self.tools.iter().find(|t| t.id == active)
    }

    pub fn has_tool(&self, tool_id: ToolId) -> bool {
        self.tools.iter().any(|t| t.id == tool_id)
    }

    /// Header text of the node card.
    pub fn title(&self) -> String {
        match self.kind {
            NodeKind::Starter => "Conversation Starter".to_string(),
            NodeKind::Prompt => "Prompt".to_string(),
            NodeKind::Tool => match self.tools.as_slice() {
                [only] => only.name.clone(),
                _ => "Tool".to_string(),
            },
        }
    }
}
