//! End-to-end canvas flows through the public reducer API.

use workflow_canvas_frontend::canvas::overlaps;
use workflow_canvas_frontend::catalog::search_tools;
use workflow_canvas_frontend::messages::{Command, Message};
use workflow_canvas_frontend::models::{NodeId, NodeKind, Point};
use workflow_canvas_frontend::state::AppState;

fn add_tool_node(state: &mut AppState, at: Point) -> NodeId {
    state.dispatch(Message::AddComponent {
        kind: NodeKind::Tool,
        position: Some(at),
    });
    state.nodes.last().expect("node was added").id.clone()
}

#[test]
fn second_tool_node_requested_on_top_of_first_is_moved_clear() {
    let mut state = AppState::new();
    add_tool_node(&mut state, Point::new(100.0, 100.0));
    add_tool_node(&mut state, Point::new(100.0, 100.0));

    let first = state.nodes[0].position;
    let second = state.nodes[1].position;
    assert_eq!(first, Point::new(100.0, 100.0));
    assert!(second.x - first.x >= 30.0);
    assert!(second.y - first.y >= 30.0);
    assert!(!overlaps(second, first));
}

#[test]
fn three_nodes_requested_in_one_spot_do_not_overlap() {
    let mut state = AppState::new();
    for _ in 0..3 {
        add_tool_node(&mut state, Point::new(0.0, 0.0));
    }
    for (i, a) in state.nodes.iter().enumerate() {
        for b in &state.nodes[i + 1..] {
            assert!(!overlaps(a.position, b.position), "{:?} vs {:?}", a.position, b.position);
        }
    }
}

#[test]
fn operations_on_a_deleted_node_are_noops() {
    let mut state = AppState::new();
    let id = add_tool_node(&mut state, Point::new(100.0, 100.0));
    state.dispatch(Message::DeleteNode { node_id: id.clone() });

    let follow_ups = vec![
        Message::BeginDrag { node_id: id.clone(), pointer: Point::new(1.0, 1.0) },
        Message::PointerMove { pointer: Point::new(50.0, 50.0) },
        Message::EndDrag,
        Message::SelectTool { node_id: id.clone(), tool_id: 1 },
        Message::ResetToolSelection { node_id: id.clone() },
        Message::RemoveToolFromNode { node_id: id.clone(), tool_id: 1 },
        Message::UpdateNodeContent { node_id: id.clone(), content: "x".into() },
        Message::DeleteNode { node_id: id.clone() },
    ];
    for msg in follow_ups {
        let cmds = state.dispatch(msg);
        assert!(cmds.is_empty(), "unexpected commands {:?}", cmds);
    }
    assert!(state.nodes.is_empty());
    assert!(!state.connected_services.is_connected(
        workflow_canvas_frontend::services::GoogleService::Gmail
    ));
}

#[test]
fn select_tool_is_idempotent() {
    let mut once = AppState::new();
    let a = add_tool_node(&mut once, Point::new(0.0, 0.0));
    once.dispatch(Message::SelectTool { node_id: a.clone(), tool_id: 3 });

    let mut twice = AppState::new();
    let b = add_tool_node(&mut twice, Point::new(0.0, 0.0));
    twice.dispatch(Message::SelectTool { node_id: b.clone(), tool_id: 3 });
    let second = twice.dispatch(Message::SelectTool { node_id: b.clone(), tool_id: 3 });

    let (na, nb) = (once.node(&a).unwrap(), twice.node(&b).unwrap());
    assert_eq!(na.tools, nb.tools);
    assert_eq!(na.active_tool_id, nb.active_tool_id);
    assert_eq!(once.expanded_node_id, twice.expanded_node_id);
    assert_eq!(once.connected_services, twice.connected_services);
    // Already marked connected: no second popup.
    assert_eq!(second, vec![Command::Render]);
}

#[test]
fn reset_then_select_matches_fresh_select() {
    let mut fresh = AppState::new();
    let a = add_tool_node(&mut fresh, Point::new(0.0, 0.0));
    fresh.dispatch(Message::SelectTool { node_id: a.clone(), tool_id: 2 });

    let mut reused = AppState::new();
    let b = add_tool_node(&mut reused, Point::new(0.0, 0.0));
    reused.dispatch(Message::SelectTool { node_id: b.clone(), tool_id: 1 });
    reused.dispatch(Message::ResetToolSelection { node_id: b.clone() });
    reused.dispatch(Message::SelectTool { node_id: b.clone(), tool_id: 2 });

    let (na, nb) = (fresh.node(&a).unwrap(), reused.node(&b).unwrap());
    assert_eq!(na.tools, nb.tools);
    assert_eq!(na.active_tool_id, nb.active_tool_id);
    assert_eq!(na.content, nb.content);
    assert_eq!(na.position, nb.position);
    assert_eq!(reused.expanded_node_id, None);
}

#[test]
fn dragging_follows_pointer_until_release() {
    let mut state = AppState::new();
    let id = add_tool_node(&mut state, Point::new(100.0, 100.0));

    state.dispatch(Message::BeginDrag { node_id: id.clone(), pointer: Point::new(120.0, 130.0) });
    for step in 1..=5 {
        let d = step as f64 * 10.0;
        state.dispatch(Message::PointerMove { pointer: Point::new(120.0 + d, 130.0 + d) });
    }
    state.dispatch(Message::EndDrag);
    state.dispatch(Message::PointerMove { pointer: Point::new(0.0, 0.0) });

    assert_eq!(state.node(&id).unwrap().position, Point::new(150.0, 150.0));
}

#[test]
fn search_covers_blank_and_gmail_queries() {
    let all: Vec<_> = search_tools("").into_iter().map(|t| t.name.as_str()).collect();
    assert_eq!(all, ["Gmail", "Google Drive", "Google Calendar", "Google Sheets"]);

    for q in ["gmail", "GMAIL", "GMail"] {
        let hits: Vec<_> = search_tools(q).into_iter().map(|t| t.name.as_str()).collect();
        assert_eq!(hits, ["Gmail"]);
    }
}
