//! Redirect landing: runs inside the popup after Google redirects back.
//!
//! The token arrives in the URL fragment, never in the query string.  On
//! success it is handed to the opener's registered callback and the popup
//! closes itself.  Without a reachable opener the token is parked in the
//! popup's own storage and the popup navigates to the app root, where the
//! next load picks it up.

use wasm_bindgen::{JsCast, JsValue};

use crate::auth::handshake::HandshakeState;
use crate::constants::{OPENER_CALLBACK_NAME, STORAGE_KEY_ACCESS_TOKEN};
use crate::storage::KeyValueStore;

/// Fragment key/value pairs with `URLSearchParams` decoding rules.
pub fn parse_fragment(fragment: &str) -> Vec<(String, String)> {
    let raw = fragment.strip_prefix('#').unwrap_or(fragment);
    url::form_urlencoded::parse(raw.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// First non-empty `access_token` in the fragment.
pub fn extract_access_token(fragment: &str) -> Option<String> {
    parse_fragment(fragment)
        .into_iter()
        .find(|(k, _)| k == "access_token")
        .map(|(_, v)| v)
        .filter(|v| !v.is_empty())
}

/// Whether a page at `pathname` is the landing page for `redirect_uri`.
///
/// A redirect to the site root never counts: the builder itself lives there.
pub fn is_callback_path(redirect_uri: &str, pathname: &str) -> bool {
    let Ok(redirect) = url::Url::parse(redirect_uri) else {
        return false;
    };
    let expected = redirect.path().trim_end_matches('/');
    !expected.is_empty() && expected == pathname.trim_end_matches('/')
}

/// The window that opened the popup.
pub trait OpenerChannel {
    /// Hand the token to the opener's callback.  `false` when the opener is
    /// gone or has nothing registered.
    fn deliver(&self, token: &str) -> bool;
}

/// The popup's own window.
pub trait PopupWindow {
    fn close(&self);
    fn navigate_to_root(&self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedirectOutcome {
    DeliveredToOpener,
    StoredForReload,
    NoTokenFound,
}

impl RedirectOutcome {
    pub fn handshake_state(&self) -> HandshakeState {
        HandshakeState::AwaitingPopupRedirect.landed(!matches!(self, RedirectOutcome::NoTokenFound))
    }
}

pub fn handle_redirect_landing(
    fragment: &str,
    opener: &dyn OpenerChannel,
    storage: &dyn KeyValueStore,
    popup: &dyn PopupWindow,
) -> RedirectOutcome {
    let Some(token) = extract_access_token(fragment) else {
        // Dead end: the popup stays open and nothing is reported to the opener.
        tracing::error!(fragment, "no access token found in redirect");
        return RedirectOutcome::NoTokenFound;
    };

    if opener.deliver(&token) {
        popup.close();
        return RedirectOutcome::DeliveredToOpener;
    }

    tracing::info!("opener unavailable, storing token for the next app load");
    if let Err(e) = storage.set_item(STORAGE_KEY_ACCESS_TOKEN, &token) {
        tracing::error!("failed to store access token: {}", e);
    }
    popup.navigate_to_root();
    RedirectOutcome::StoredForReload
}

/// `window.opener.handleGoogleCallback`.
pub struct BrowserOpener {
    window: web_sys::Window,
}

impl BrowserOpener {
    pub fn new(window: web_sys::Window) -> Self {
        Self { window }
    }
}

impl OpenerChannel for BrowserOpener {
    fn deliver(&self, token: &str) -> bool {
        // Cross-origin openers throw on property access; treat as absent.
        let opener = match self.window.opener() {
            Ok(o) if !o.is_null() && !o.is_undefined() => o,
            _ => return false,
        };
        let callback = match js_sys::Reflect::get(&opener, &JsValue::from_str(OPENER_CALLBACK_NAME)) {
            Ok(cb) => cb,
            Err(_) => return false,
        };
        let Some(callback) = callback.dyn_ref::<js_sys::Function>() else {
            return false;
        };
        match callback.call1(&opener, &JsValue::from_str(token)) {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("opener callback threw: {:?}", e);
                false
            }
        }
    }
}

pub struct BrowserPopupWindow {
    window: web_sys::Window,
}

impl BrowserPopupWindow {
    pub fn new(window: web_sys::Window) -> Self {
        Self { window }
    }
}

impl PopupWindow for BrowserPopupWindow {
    fn close(&self) {
        if let Err(e) = self.window.close() {
            tracing::warn!("popup could not close itself: {:?}", e);
        }
    }

    fn navigate_to_root(&self) {
        if let Err(e) = self.window.location().set_href("/") {
            tracing::warn!("popup could not navigate to app root: {:?}", e);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    pub struct FakeOpener {
        pub present: bool,
        pub delivered: RefCell<Vec<String>>,
    }

    impl OpenerChannel for FakeOpener {
        fn deliver(&self, token: &str) -> bool {
            if self.present {
                self.delivered.borrow_mut().push(token.to_string());
            }
            self.present
        }
    }

    #[derive(Default)]
    pub struct FakePopup {
        pub closed: Cell<bool>,
        pub navigated: Cell<bool>,
    }

    impl PopupWindow for FakePopup {
        fn close(&self) {
            self.closed.set(true);
        }

        fn navigate_to_root(&self) {
            self.navigated.set(true);
        }
    }
}
