/// Progress of one popup handshake.
///
/// `TokenReceived` and `NoTokenFound` are terminal; a new `initiate` starts
/// over from `AwaitingPopupRedirect`.  There is no timeout: a popup the user
/// closes early leaves the opener in `AwaitingPopupRedirect`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HandshakeState {
    #[default]
    Idle,
    AwaitingPopupRedirect,
    TokenReceived,
    NoTokenFound,
}

impl HandshakeState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, HandshakeState::TokenReceived | HandshakeState::NoTokenFound)
    }

    /// State after the popup was opened.
    pub fn initiated(self) -> Self {
        HandshakeState::AwaitingPopupRedirect
    }

    /// State after the redirect landing page ran.
    pub fn landed(self, token_found: bool) -> Self {
        if token_found {
            HandshakeState::TokenReceived
        } else {
            HandshakeState::NoTokenFound
        }
    }
}
