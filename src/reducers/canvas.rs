//! Node lifecycle and pointer dragging.

use crate::canvas::placement::{default_position, find_non_overlapping_position};
use crate::messages::{Command, Message};
use crate::models::{NodeId, WorkflowNode};
use crate::state::{AppState, DragState};

pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::AddComponent { kind, position } => {
            let base = position
                .unwrap_or_else(|| default_position(state.canvas_width, state.canvas_height));
            let placement = find_non_overlapping_position(&state.nodes, base);
            if !placement.resolved {
                tracing::warn!(
                    x = placement.position.x,
                    y = placement.position.y,
                    "no free spot found, node will overlap"
                );
            }

            let node = WorkflowNode::new(NodeId::generate(), *kind, placement.position);
            tracing::debug!(id = %node.id, ?kind, x = node.position.x, y = node.position.y, "node created");
            state.nodes.push(node);
            state.show_component_selector = false;
            cmds.push(Command::Render);
            true
        }
        Message::DeleteNode { node_id } => {
            let before = state.nodes.len();
            state.nodes.retain(|n| &n.id != node_id);
            if state.nodes.len() != before {
                state.search_queries.remove(node_id);
                tracing::debug!(id = %node_id, "node deleted");
                cmds.push(Command::Render);
            }
            true
        }
        Message::UpdateNodeContent { node_id, content } => {
            // The input already shows the new text; no re-render.
            if let Some(node) = state.node_mut(node_id) {
                node.content = content.clone();
            }
            true
        }
        Message::BeginDrag { node_id, pointer } => {
            match state.node(node_id).map(|n| n.position) {
                Some(origin) => {
                    state.dragging = Some(DragState {
                        node_id: node_id.clone(),
                        offset: *pointer - origin,
                    });
                }
                None => tracing::debug!(id = %node_id, "drag requested for missing node"),
            }
            true
        }
        Message::PointerMove { pointer } => {
            let Some(drag) = state.dragging.as_ref() else {
                return true;
            };
            // A node deleted mid-drag leaves the drag in place; moves do nothing.
            if let Some(node) = state.nodes.iter_mut().find(|n| n.id == drag.node_id) {
                node.position = *pointer - drag.offset;
                cmds.push(Command::Render);
            }
            true
        }
        Message::EndDrag => {
            state.dragging = None;
            true
        }
        Message::ShowComponentSelector(show) => {
            state.show_component_selector = *show;
            cmds.push(Command::Render);
            true
        }
        Message::ResizeCanvas { width, height } => {
            if *width > 0.0 && *height > 0.0 {
                state.canvas_width = *width;
                state.canvas_height = *height;
            }
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{NODE_HEIGHT, NODE_WIDTH};
    use crate::models::{NodeKind, Point};

    fn add(state: &mut AppState, kind: NodeKind, at: Option<Point>) -> NodeId {
        let mut cmds = Vec::new();
        update(state, &Message::AddComponent { kind, position: at }, &mut cmds);
        state.nodes.last().unwrap().id.clone()
    }

    #[test]
    fn add_without_position_uses_workflow_area() {
        let mut state = AppState::new();
        state.canvas_width = 1000.0;
        state.canvas_height = 900.0;
        add(&mut state, NodeKind::Starter, None);
        assert_eq!(state.nodes[0].position, Point::new(500.0 - NODE_WIDTH / 2.0, 300.0));
    }

    #[test]
    fn new_node_is_blank_and_closes_selector() {
        let mut state = AppState::new();
        state.show_component_selector = true;
        add(&mut state, NodeKind::Tool, Some(Point::new(5.0, 5.0)));

        let node = &state.nodes[0];
        assert!(node.content.is_empty());
        assert!(node.tools.is_empty());
        assert_eq!(node.active_tool_id, None);
        assert!(!state.show_component_selector);
    }

    #[test]
    fn second_node_at_same_spot_is_shifted() {
        let mut state = AppState::new();
        add(&mut state, NodeKind::Tool, Some(Point::new(100.0, 100.0)));
        add(&mut state, NodeKind::Tool, Some(Point::new(100.0, 100.0)));

        let (a, b) = (state.nodes[0].position, state.nodes[1].position);
        assert!(b.x - a.x >= 30.0 && b.y - a.y >= 30.0);
        assert!(b.x >= a.x + NODE_WIDTH || b.y >= a.y + NODE_HEIGHT);
    }

    #[test]
    fn drag_moves_node_by_pointer_delta() {
        let mut state = AppState::new();
        let id = add(&mut state, NodeKind::Prompt, Some(Point::new(100.0, 100.0)));
        let mut cmds = Vec::new();

        update(
            &mut state,
            &Message::BeginDrag { node_id: id.clone(), pointer: Point::new(110.0, 120.0) },
            &mut cmds,
        );
        update(&mut state, &Message::PointerMove { pointer: Point::new(210.0, 170.0) }, &mut cmds);
        assert_eq!(state.node(&id).unwrap().position, Point::new(200.0, 150.0));

        update(&mut state, &Message::EndDrag, &mut cmds);
        update(&mut state, &Message::PointerMove { pointer: Point::new(0.0, 0.0) }, &mut cmds);
        assert_eq!(state.node(&id).unwrap().position, Point::new(200.0, 150.0));
    }

    #[test]
    fn move_without_drag_is_ignored() {
        let mut state = AppState::new();
        let id = add(&mut state, NodeKind::Prompt, Some(Point::new(40.0, 40.0)));
        let mut cmds = Vec::new();
        update(&mut state, &Message::PointerMove { pointer: Point::new(300.0, 300.0) }, &mut cmds);
        assert_eq!(state.node(&id).unwrap().position, Point::new(40.0, 40.0));
        assert!(cmds.is_empty());
    }

    #[test]
    fn deleting_dragged_node_makes_moves_noops() {
        let mut state = AppState::new();
        let id = add(&mut state, NodeKind::Starter, Some(Point::new(0.0, 0.0)));
        let mut cmds = Vec::new();
        update(
            &mut state,
            &Message::BeginDrag { node_id: id.clone(), pointer: Point::new(10.0, 10.0) },
            &mut cmds,
        );
        update(&mut state, &Message::DeleteNode { node_id: id.clone() }, &mut cmds);

        cmds.clear();
        update(&mut state, &Message::PointerMove { pointer: Point::new(50.0, 50.0) }, &mut cmds);
        assert!(state.nodes.is_empty());
        assert!(cmds.is_empty());
        assert_eq!(state.dragging.as_ref().map(|d| &d.node_id), Some(&id));
    }

    #[test]
    fn begin_drag_on_missing_node_records_nothing() {
        let mut state = AppState::new();
        let mut cmds = Vec::new();
        update(
            &mut state,
            &Message::BeginDrag { node_id: NodeId::from("gone"), pointer: Point::new(1.0, 1.0) },
            &mut cmds,
        );
        assert!(state.dragging.is_none());
    }

    #[test]
    fn content_edit_updates_only_target() {
        let mut state = AppState::new();
        let a = add(&mut state, NodeKind::Starter, Some(Point::new(0.0, 0.0)));
        let b = add(&mut state, NodeKind::Prompt, Some(Point::new(600.0, 0.0)));
        let mut cmds = Vec::new();
        update(
            &mut state,
            &Message::UpdateNodeContent { node_id: a.clone(), content: "Hello".into() },
            &mut cmds,
        );
        assert_eq!(state.node(&a).unwrap().content, "Hello");
        assert_eq!(state.node(&b).unwrap().content, "");
    }

    #[test]
    fn delete_drops_the_node_search_query() {
        let mut state = AppState::new();
        let gone = add(&mut state, NodeKind::Tool, Some(Point::new(0.0, 0.0)));
        let kept = add(&mut state, NodeKind::Tool, Some(Point::new(400.0, 0.0)));
        state.search_queries.insert(gone.clone(), "gmail".into());
        state.search_queries.insert(kept.clone(), "drive".into());

        let mut cmds = Vec::new();
        update(&mut state, &Message::DeleteNode { node_id: gone.clone() }, &mut cmds);

        assert!(!state.search_queries.contains_key(&gone));
        assert_eq!(state.search_query(&kept), "drive");
    }
}
