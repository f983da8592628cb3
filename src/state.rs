use std::cell::RefCell;
use std::collections::HashMap;

use crate::auth::{AuthSession, HandshakeState};
use crate::constants::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use crate::messages::{Command, Message};
use crate::models::{NodeId, Point, WorkflowNode};
use crate::services::ConnectedServices;
use crate::storage::{KeyValueStore, MemoryStorage};
use crate::update::update;

/// An active pointer drag.
#[derive(Clone, Debug, PartialEq)]
pub struct DragState {
    pub node_id: NodeId,
    // Pointer position minus node origin at mousedown.
    pub offset: Point,
}

// Store global application state
pub struct AppState {
    // Creation order; placement scans this list front to back.
    pub nodes: Vec<WorkflowNode>,
    pub dragging: Option<DragState>,
    // The single node whose tool search popup is open
    pub expanded_node_id: Option<NodeId>,
    pub search_queries: HashMap<NodeId, String>,
    pub show_component_selector: bool,
    pub connected_services: ConnectedServices,
    // Workflow area size, used for default placement
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub session: AuthSession,
    pub handshake: HandshakeState,
}

impl AppState {
    /// Fresh state over a private in-memory store.
    pub fn new() -> Self {
        Self::with_store(Box::new(MemoryStorage::new()))
    }

    pub fn with_store(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            nodes: Vec::new(),
            dragging: None,
            expanded_node_id: None,
            search_queries: HashMap::new(),
            show_component_selector: false,
            connected_services: ConnectedServices::default(),
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            session: AuthSession::new(store),
            handshake: HandshakeState::default(),
        }
    }

    pub fn dispatch(&mut self, msg: Message) -> Vec<Command> {
        update(self, msg)
    }

    pub fn node(&self, id: &NodeId) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut WorkflowNode> {
        self.nodes.iter_mut().find(|n| &n.id == id)
    }

    pub fn search_query(&self, id: &NodeId) -> &str {
        self.search_queries.get(id).map(String::as_str).unwrap_or("")
    }

    pub fn is_expanded(&self, id: &NodeId) -> bool {
        self.expanded_node_id.as_ref() == Some(id)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// We use thread_local to store our app state
thread_local! {
    pub static APP_STATE: RefCell<AppState> = RefCell::new(AppState::new());
}

// Global helper function for dispatching messages with proper UI refresh handling
pub fn dispatch_global_message(msg: Message) {
    let commands = APP_STATE.with(|state| state.borrow_mut().dispatch(msg));

    // The borrow is released; executors may read state or dispatch again.
    for cmd in commands {
        crate::command_executors::execute(cmd);
    }
}
