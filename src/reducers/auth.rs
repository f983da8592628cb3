//! Google sign-in and per-service connection.

use crate::auth::AuthorizationRequest;
use crate::config::oauth_config;
use crate::messages::{Command, Message};
use crate::services::GoogleService;
use crate::state::AppState;

/// Start the connect flow for `service`.  The service is marked connected
/// right away, before any token comes back.
pub(crate) fn connect_service(state: &mut AppState, service: GoogleService, cmds: &mut Vec<Command>) {
    state.connected_services.mark_connected(service);
    state.handshake = state.handshake.initiated();
    tracing::info!(%service, "connecting Google service");
    cmds.push(Command::OpenAuthPopup(AuthorizationRequest::for_service(
        &oauth_config(),
        service,
    )));
}

pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::SignIn => {
            state.handshake = state.handshake.initiated();
            cmds.push(Command::OpenAuthPopup(AuthorizationRequest::sign_in(&oauth_config())));
            true
        }
        Message::ConnectService(service) => {
            connect_service(state, *service, cmds);
            cmds.push(Command::Render);
            true
        }
        Message::TokenReceived(token) => {
            state.handshake = state.handshake.landed(true);
            if let Err(e) = state.session.accept_token(token) {
                tracing::warn!("received token carries no readable identity: {}", e);
            }
            cmds.push(Command::Render);
            true
        }
        Message::SignOut => {
            state.session.logout();
            state.handshake = Default::default();
            cmds.push(Command::Render);
            true
        }
        _ => false,
    }
}
