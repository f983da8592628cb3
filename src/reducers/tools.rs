//! Per-node tool search popup and tool selection.

use crate::catalog::find_tool;
use crate::messages::{Command, Message};
use crate::state::AppState;

pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::SetSearchQuery { node_id, query } => {
            if state.node(node_id).is_some() {
                state.search_queries.insert(node_id.clone(), query.clone());
                // Typing always opens the results for this node.
                state.expanded_node_id = Some(node_id.clone());
                cmds.push(Command::Render);
            }
            true
        }
        Message::SetExpandedNode(node_id) => {
            if state.expanded_node_id != *node_id {
                state.expanded_node_id = node_id.clone();
                cmds.push(Command::Render);
            }
            true
        }
        Message::ToggleExpandedNode(node_id) => {
            if state.node(node_id).is_some() {
                state.expanded_node_id = if state.is_expanded(node_id) {
                    None
                } else {
                    Some(node_id.clone())
                };
                cmds.push(Command::Render);
            }
            true
        }
        Message::SelectTool { node_id, tool_id } => {
            let Some(tool) = find_tool(*tool_id) else {
                tracing::warn!(tool_id, "unknown tool id");
                return true;
            };
            let Some(node) = state.node_mut(node_id) else {
                tracing::debug!(id = %node_id, "tool selected for missing node");
                return true;
            };

            // Another tool's field values do not carry over.
            if node.active_tool_id != Some(tool.id) {
                node.config.clear();
            }
            node.tools = vec![tool.clone()];
            node.active_tool_id = Some(tool.id);
            state.expanded_node_id = None;
            tracing::debug!(id = %node_id, tool = %tool.name, "tool selected");

            // Selection never waits on the connection.
            if tool.needs_google_connection() && !state.connected_services.is_connected(tool.service) {
                crate::reducers::auth::connect_service(state, tool.service, cmds);
            }
            cmds.push(Command::Render);
            true
        }
        Message::ResetToolSelection { node_id } => {
            let Some(node) = state.node_mut(node_id) else {
                return true;
            };
            node.tools.clear();
            node.active_tool_id = None;
            node.config.clear();
            state.search_queries.remove(node_id);
            state.expanded_node_id = Some(node_id.clone());
            cmds.push(Command::Render);
            true
        }
        Message::RemoveToolFromNode { node_id, tool_id } => {
            if let Some(node) = state.node_mut(node_id) {
                node.tools.retain(|t| t.id != *tool_id);
                if node.active_tool_id == Some(*tool_id) {
                    node.active_tool_id = None;
                }
                cmds.push(Command::Render);
            }
            true
        }
        Message::UpdateConfigField { node_id, field, value } => {
            // Like node content: the control already shows the value.
            if let Some(node) = state.node_mut(node_id) {
                node.config.insert(field.clone(), value.clone());
            }
            true
        }
        _ => false,
    }
}
