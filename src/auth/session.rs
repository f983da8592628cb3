//! Signed-in user, mirrored into storage so a reload keeps the session.

use crate::auth::identity::{decode_identity_token, serialize_user, AuthenticatedUser, IdentityError};
use crate::constants::{STORAGE_KEY_ACCESS_TOKEN, STORAGE_KEY_USER};
use crate::storage::KeyValueStore;

pub struct AuthSession {
    store: Box<dyn KeyValueStore>,
    user: Option<AuthenticatedUser>,
}

impl AuthSession {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store, user: None }
    }

    /// Load the persisted user.  A corrupt entry is discarded and the session
    /// starts logged out.
    pub fn restore(&mut self) {
        let raw = match self.store.get_item(STORAGE_KEY_USER) {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!("could not read stored user: {}", e);
                return;
            }
        };

        match serde_json::from_str::<AuthenticatedUser>(&raw) {
            Ok(user) => {
                tracing::debug!(name = user.display_name(), "restored signed-in user");
                self.user = Some(user);
            }
            Err(e) => {
                tracing::warn!("discarding malformed stored user: {}", e);
                if let Err(e) = self.store.remove_item(STORAGE_KEY_USER) {
                    tracing::warn!("could not remove stored user: {}", e);
                }
                self.user = None;
            }
        }
    }

    /// Decode `token`, become signed in and persist the user.  On failure the
    /// session is left exactly as it was.
    pub fn accept_token(&mut self, token: &str) -> Result<&AuthenticatedUser, IdentityError> {
        let user = decode_identity_token(token)?;
        let stored = serialize_user(&user)?;
        if let Err(e) = self.store.set_item(STORAGE_KEY_USER, &stored) {
            tracing::warn!("signed in but could not persist user: {}", e);
        }
        tracing::info!(name = user.display_name(), "signed in");
        Ok(self.user.insert(user))
    }

    pub fn logout(&mut self) {
        self.user = None;
        if let Err(e) = self.store.remove_item(STORAGE_KEY_USER) {
            tracing::warn!("could not remove stored user: {}", e);
        }
        tracing::info!("signed out");
    }

    pub fn user(&self) -> Option<&AuthenticatedUser> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Consume a token left behind by a popup that lost its opener.
    pub fn take_stored_access_token(&mut self) -> Option<String> {
        let token = match self.store.get_item(STORAGE_KEY_ACCESS_TOKEN) {
            Ok(token) => token.filter(|t| !t.is_empty())?,
            Err(e) => {
                tracing::warn!("could not read stored access token: {}", e);
                return None;
            }
        };
        if let Err(e) = self.store.remove_item(STORAGE_KEY_ACCESS_TOKEN) {
            tracing::warn!("could not clear stored access token: {}", e);
        }
        Some(token)
    }
}
