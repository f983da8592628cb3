//! Google sign-in through a popup window and the implicit token flow.

pub mod callback;
pub mod handshake;
pub mod identity;
pub mod popup;
pub mod redirect;
pub mod request;
pub mod session;

pub use callback::{CallbackGuard, CallbackRegistry, WindowBridge};
pub use handshake::HandshakeState;
pub use identity::{decode_identity_token, AuthenticatedUser, IdentityError};
pub use popup::{AuthError, BrowserPopup, PopupLauncher};
pub use redirect::{extract_access_token, handle_redirect_landing, is_callback_path, RedirectOutcome};
pub use request::AuthorizationRequest;
pub use session::AuthSession;
