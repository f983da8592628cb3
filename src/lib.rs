use std::cell::RefCell;

use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::Window;

pub mod auth;
pub mod canvas;
pub mod catalog;
pub mod command_executors;
pub mod components;
pub mod config;
pub mod constants;
pub mod dom_utils;
pub mod messages;
pub mod models;
pub mod reducers;
pub mod services;
pub mod state;
pub mod storage;
pub mod ui;
pub mod update;

use crate::auth::redirect::{BrowserOpener, BrowserPopupWindow};
use crate::auth::{handle_redirect_landing, is_callback_path, CallbackGuard, CallbackRegistry, WindowBridge};
use crate::messages::Message;
use crate::state::{dispatch_global_message, AppState, APP_STATE};

/// Opener-side token channel, alive while the builder is mounted.
struct AuthBridge {
    registry: CallbackRegistry,
    _guard: CallbackGuard,
    _window: WindowBridge,
}

thread_local! {
    static AUTH_BRIDGE: RefCell<Option<AuthBridge>> = RefCell::new(None);
}

// Main entry point for the WASM application
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Initialize better panic messages
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    config::init_oauth_config();

    let window = web_sys::window().expect("no global `window` exists");
    let document = window.document().expect("should have a document on window");

    // The callback page loads the same module; it only relays the token.
    // A callback page whose path this cannot see can call
    // `google_redirect_landing()` itself.
    if is_redirect_landing(&window) {
        return google_redirect_landing();
    }

    APP_STATE.with(|state_ref| {
        let mut state = AppState::with_store(storage::default_store());
        state.session.restore();
        *state_ref.borrow_mut() = state;
    });

    // Must exist before any popup is opened.
    install_auth_bridge()?;

    ui::setup::create_base_ui(&document)?;
    ui::events::setup_ui_event_handlers(&document)?;
    ui::events::report_canvas_size(&document);
    ui::render()?;

    pick_up_stored_token();

    Ok(())
}

fn is_redirect_landing(window: &Window) -> bool {
    let Ok(path) = window.location().pathname() else {
        return false;
    };
    is_callback_path(config::oauth_config().redirect_uri(), &path)
}

fn install_auth_bridge() -> Result<(), JsValue> {
    let registry = CallbackRegistry::new();
    let guard = registry.register(|token| {
        dispatch_global_message(Message::TokenReceived(token.to_string()));
    });
    let bridge = WindowBridge::install(&registry)?;

    AUTH_BRIDGE.with(|slot| {
        *slot.borrow_mut() = Some(AuthBridge {
            registry,
            _guard: guard,
            _window: bridge,
        });
    });
    Ok(())
}

/// Tear the builder down: the opener callback is removed from `window` and
/// late tokens are ignored.
#[wasm_bindgen]
pub fn stop() {
    let bridge = AUTH_BRIDGE.with(|slot| slot.borrow_mut().take());
    if bridge.is_some() {
        tracing::info!("auth callback deregistered");
    }
}

/// Feed a token parked by an opener-less popup through the normal callback.
/// Returns whether one was found.
#[wasm_bindgen]
pub fn pick_up_stored_token() -> bool {
    let token = APP_STATE.with(|state| state.borrow_mut().session.take_stored_access_token());
    let Some(token) = token else {
        return false;
    };

    let registry = AUTH_BRIDGE.with(|slot| slot.borrow().as_ref().map(|b| b.registry.clone()));
    match registry {
        Some(registry) if registry.invoke(&token) => true,
        _ => {
            tracing::warn!("stored token found but no callback is registered");
            false
        }
    }
}

/// Entry point for the OAuth redirect page running inside the popup.
#[wasm_bindgen]
pub fn google_redirect_landing() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let fragment = window.location().hash()?;
    let store = storage::default_store();

    let outcome = handle_redirect_landing(
        &fragment,
        &BrowserOpener::new(window.clone()),
        store.as_ref(),
        &BrowserPopupWindow::new(window),
    );
    tracing::info!(?outcome, "redirect landing finished");
    Ok(())
}

/// Signed-in user as a plain JS object, or `null`.
#[wasm_bindgen]
pub fn current_user_js() -> Result<JsValue, JsValue> {
    APP_STATE.with(|state| match state.borrow().session.user() {
        // Plain object rather than a JS Map for the flattened claims.
        Some(user) => user
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(JsValue::from),
        None => Ok(JsValue::NULL),
    })
}
