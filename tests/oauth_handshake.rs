//! Popup handshake from redirect landing to a signed-in opener.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::json;

use workflow_canvas_frontend::auth::redirect::{OpenerChannel, PopupWindow};
use workflow_canvas_frontend::auth::{
    extract_access_token, handle_redirect_landing, CallbackRegistry, HandshakeState, RedirectOutcome,
};
use workflow_canvas_frontend::constants::{STORAGE_KEY_ACCESS_TOKEN, STORAGE_KEY_USER};
use workflow_canvas_frontend::messages::Message;
use workflow_canvas_frontend::state::AppState;
use workflow_canvas_frontend::storage::{KeyValueStore, MemoryStorage};

fn identity_token(claims: serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.sig")
}

/// Opener backed by a real registry, as the builder page wires it.
struct RegistryOpener(CallbackRegistry);

impl OpenerChannel for RegistryOpener {
    fn deliver(&self, token: &str) -> bool {
        self.0.invoke(token)
    }
}

#[derive(Default)]
struct Popup {
    closed: Cell<bool>,
    navigated: Cell<bool>,
}

impl PopupWindow for Popup {
    fn close(&self) {
        self.closed.set(true);
    }

    fn navigate_to_root(&self) {
        self.navigated.set(true);
    }
}

#[test]
fn fragment_token_extraction() {
    assert_eq!(
        extract_access_token("#access_token=abc123&token_type=bearer").as_deref(),
        Some("abc123")
    );
    assert_eq!(extract_access_token("#error=access_denied"), None);
}

#[test]
fn token_reaches_opener_state_and_storage() {
    let opener_store = MemoryStorage::new();
    let state = Rc::new(RefCell::new(AppState::with_store(Box::new(opener_store.clone()))));

    let registry = CallbackRegistry::new();
    let sink = Rc::clone(&state);
    let _guard = registry.register(move |token| {
        sink.borrow_mut().dispatch(Message::TokenReceived(token.to_string()));
    });

    state.borrow_mut().dispatch(Message::SignIn);
    assert_eq!(state.borrow().handshake, HandshakeState::AwaitingPopupRedirect);

    let token = identity_token(json!({"name": "Ada Lovelace", "email": "ada@example.com"}));
    let popup = Popup::default();
    let popup_store = MemoryStorage::new();
    let outcome = handle_redirect_landing(
        &format!("#access_token={}&token_type=bearer", token),
        &RegistryOpener(registry.clone()),
        &popup_store,
        &popup,
    );

    assert_eq!(outcome, RedirectOutcome::DeliveredToOpener);
    assert!(popup.closed.get());

    let state = state.borrow();
    let user = state.session.user().expect("user decoded");
    assert_eq!(user.name.as_deref(), Some("Ada Lovelace"));
    let stored = opener_store.get_item(STORAGE_KEY_USER).unwrap().expect("user persisted");
    assert_eq!(stored, serde_json::to_string(user).unwrap());
    assert_eq!(state.handshake, HandshakeState::TokenReceived);
}

#[test]
fn torn_down_opener_falls_back_to_storage() {
    let registry = CallbackRegistry::new();
    let guard = registry.register(|_| panic!("stale handler called"));
    drop(guard);

    let popup = Popup::default();
    let store = MemoryStorage::new();
    let outcome = handle_redirect_landing(
        "#access_token=abc123",
        &RegistryOpener(registry),
        &store,
        &popup,
    );

    assert_eq!(outcome, RedirectOutcome::StoredForReload);
    assert!(popup.navigated.get());
    assert_eq!(store.get_item(STORAGE_KEY_ACCESS_TOKEN).unwrap().as_deref(), Some("abc123"));

    // Next load of the app consumes it exactly once.
    let mut state = AppState::with_store(Box::new(store.clone()));
    assert_eq!(state.session.take_stored_access_token().as_deref(), Some("abc123"));
    assert_eq!(store.get_item(STORAGE_KEY_ACCESS_TOKEN).unwrap(), None);
}

#[test]
fn denied_consent_dead_ends_without_panicking() {
    let registry = CallbackRegistry::new();
    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);
    let _guard = registry.register(move |_| counter.set(counter.get() + 1));

    let popup = Popup::default();
    let store = MemoryStorage::new();
    let outcome = handle_redirect_landing("#error=access_denied", &RegistryOpener(registry), &store, &popup);

    assert_eq!(outcome, RedirectOutcome::NoTokenFound);
    assert_eq!(outcome.handshake_state(), HandshakeState::NoTokenFound);
    assert_eq!(hits.get(), 0);
    assert!(!popup.closed.get());
    assert_eq!(store.get_item(STORAGE_KEY_ACCESS_TOKEN).unwrap(), None);
}

#[test]
fn restored_session_survives_reload_and_sign_out_clears_it() {
    let store = MemoryStorage::new();
    let mut first = AppState::with_store(Box::new(store.clone()));
    first.dispatch(Message::TokenReceived(identity_token(json!({"name": "Grace"}))));

    let mut reloaded = AppState::with_store(Box::new(store.clone()));
    reloaded.session.restore();
    assert_eq!(reloaded.session.user().map(|u| u.display_name()), Some("Grace"));

    reloaded.dispatch(Message::SignOut);
    assert!(!reloaded.session.is_signed_in());
    assert_eq!(store.get_item(STORAGE_KEY_USER).unwrap(), None);
}
