use crate::messages::{Command, Message};
use crate::state::AppState;

pub fn update(state: &mut AppState, msg: Message) -> Vec<Command> {
    let mut commands = Vec::new();
    if !route(state, &msg, &mut commands) {
        tracing::warn!(?msg, "message not handled by any reducer");
    }
    commands
}

// Delegate to domain-specific reducers; the first one that consumes the
// message wins.
fn route(state: &mut AppState, msg: &Message, commands: &mut Vec<Command>) -> bool {
    crate::reducers::canvas::update(state, msg, commands)
        || crate::reducers::tools::update(state, msg, commands)
        || crate::reducers::auth::update(state, msg, commands)
}
