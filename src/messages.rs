// The events that can occur in the builder UI.
//
use crate::auth::AuthorizationRequest;
use crate::models::{NodeId, NodeKind, Point, ToolId};
use crate::services::GoogleService;

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Node lifecycle
    AddComponent {
        kind: NodeKind,
        // `None` places the node relative to the workflow area.
        position: Option<Point>,
    },
    DeleteNode {
        node_id: NodeId,
    },
    UpdateNodeContent {
        node_id: NodeId,
        content: String,
    },

    // Dragging
    BeginDrag {
        node_id: NodeId,
        pointer: Point,
    },
    PointerMove {
        pointer: Point,
    },
    EndDrag,

    // Tool search and selection
    SetSearchQuery {
        node_id: NodeId,
        query: String,
    },
    SetExpandedNode(Option<NodeId>),
    ToggleExpandedNode(NodeId),
    SelectTool {
        node_id: NodeId,
        tool_id: ToolId,
    },
    ResetToolSelection {
        node_id: NodeId,
    },
    RemoveToolFromNode {
        node_id: NodeId,
        tool_id: ToolId,
    },
    UpdateConfigField {
        node_id: NodeId,
        field: String,
        value: String,
    },

    // Google auth
    SignIn,
    ConnectService(GoogleService),
    TokenReceived(String),
    SignOut,

    // UI plumbing
    ShowComponentSelector(bool),
    ResizeCanvas {
        width: f64,
        height: f64,
    },
}

/// Side effects requested by the reducer, run after the state borrow ends.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Open the authorization popup for this request
    OpenAuthPopup(AuthorizationRequest),

    /// Rebuild the workflow area and auth widgets
    Render,
}
