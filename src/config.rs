//! OAuth client configuration.
//!
//! Values are baked in at build time from `GOOGLE_CLIENT_ID` and
//! `GOOGLE_REDIRECT_URI`.  A page can override them without a rebuild by
//! setting `window.GOOGLE_CLIENT_ID` / `window.GOOGLE_REDIRECT_URI` before the
//! module loads; those are read during `start()`, ahead of callback-page
//! detection.  [`init_oauth_config_js`] replaces the config later, before the
//! user starts a sign-in.

use lazy_static::lazy_static;
use std::sync::RwLock;
use wasm_bindgen::prelude::*;

use crate::constants::{DEFAULT_REDIRECT_URI, PAGE_CLIENT_ID_GLOBAL, PAGE_REDIRECT_URI_GLOBAL};

#[derive(Clone, Debug, PartialEq)]
pub struct OAuthConfig {
    client_id: String,
    redirect_uri: String,
}

impl Default for OAuthConfig {
    /// Local development defaults.  The client id is empty, so the provider
    /// will reject the request until a real id is configured.
    fn default() -> Self {
        Self {
            client_id: String::new(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
        }
    }
}

impl OAuthConfig {
    /// Build from the compile-time environment.
    pub fn from_env() -> Self {
        Self::with_page_overrides(None, None)
    }

    /// Page-provided values where set, build-time values otherwise.
    pub fn with_page_overrides(client_id: Option<&str>, redirect_uri: Option<&str>) -> Self {
        Self::from_parts(
            prefer(client_id, option_env!("GOOGLE_CLIENT_ID")),
            prefer(redirect_uri, option_env!("GOOGLE_REDIRECT_URI")),
        )
    }

    /// Unset or blank values take the defaults.
    pub fn from_parts(client_id: Option<&str>, redirect_uri: Option<&str>) -> Self {
        let client_id = client_id.map(str::trim).unwrap_or_default().to_string();
        let redirect_uri = redirect_uri
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_REDIRECT_URI)
            .to_string();
        Self {
            client_id,
            redirect_uri,
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }
}

fn prefer<'a>(page: Option<&'a str>, built: Option<&'a str>) -> Option<&'a str> {
    page.filter(|v| !v.trim().is_empty()).or(built)
}

/// String global set by the host page, e.g. `window.GOOGLE_REDIRECT_URI`.
fn page_global(name: &str) -> Option<String> {
    let window = web_sys::window()?;
    js_sys::Reflect::get(&window, &JsValue::from_str(name))
        .ok()?
        .as_string()
}

lazy_static! {
    static ref OAUTH_CONFIG: RwLock<Option<OAuthConfig>> = RwLock::new(None);
}

/// Load the configuration from page globals and the build environment unless
/// one was already injected.
pub fn init_oauth_config() {
    let mut guard = OAUTH_CONFIG.write().unwrap_or_else(|e| e.into_inner());
    if guard.is_none() {
        let client_id = page_global(PAGE_CLIENT_ID_GLOBAL);
        let redirect_uri = page_global(PAGE_REDIRECT_URI_GLOBAL);
        let config = OAuthConfig::with_page_overrides(client_id.as_deref(), redirect_uri.as_deref());
        if config.client_id().is_empty() {
            tracing::warn!("no Google client id set at build time or by the page");
        }
        tracing::info!(redirect_uri = config.redirect_uri(), "using OAuth redirect URI");
        *guard = Some(config);
    }
}

/// Runtime override from the host page's bootstrap script.
#[wasm_bindgen]
pub fn init_oauth_config_js(client_id: &str, redirect_uri: Option<String>) {
    let config = OAuthConfig::from_parts(Some(client_id), redirect_uri.as_deref());
    tracing::info!(redirect_uri = config.redirect_uri(), "OAuth config injected at runtime");
    *OAUTH_CONFIG.write().unwrap_or_else(|e| e.into_inner()) = Some(config);
}

/// Current configuration, falling back to the build-time values.
pub fn oauth_config() -> OAuthConfig {
    OAUTH_CONFIG
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .clone()
        .unwrap_or_else(OAuthConfig::from_env)
}
