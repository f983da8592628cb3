use wasm_bindgen::JsValue;

use crate::constants::POPUP_FEATURES;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("no browser window available")]
    NoWindow,
    #[error("window.open failed: {0}")]
    Open(String),
}

impl From<AuthError> for JsValue {
    fn from(e: AuthError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

/// Opens authorization URLs.  `Ok(false)` means the browser refused to
/// create the window (popup blocker); callers do not get any other signal.
pub trait PopupLauncher {
    fn open(&self, url: &str) -> Result<bool, AuthError>;
}

/// Fixed-size `_blank` popup.
pub struct BrowserPopup;

impl PopupLauncher for BrowserPopup {
    fn open(&self, url: &str) -> Result<bool, AuthError> {
        let window = web_sys::window().ok_or(AuthError::NoWindow)?;
        let opened = window
            .open_with_url_and_target_and_features(url, "_blank", POPUP_FEATURES)
            .map_err(|e| AuthError::Open(format!("{:?}", e)))?;
        Ok(opened.is_some())
    }
}

/// Open `url` and log the outcome.  Never blocks and never surfaces an error
/// to the UI.
pub fn launch(launcher: &dyn PopupLauncher, url: &str) {
    match launcher.open(url) {
        Ok(true) => tracing::debug!("authorization popup opened"),
        Ok(false) => tracing::warn!("authorization popup was blocked by the browser"),
        Err(e) => tracing::error!("could not open authorization popup: {}", e),
    }
}
