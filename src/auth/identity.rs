//! Identity payload carried in a Google token.
//!
//! The payload segment is decoded without verifying the signature; the
//! result is only used to personalise the UI.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct AuthenticatedUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    // Remaining claims (iss, aud, exp, ...) survive a storage round trip.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AuthenticatedUser {
    /// Best label for the signed-in badge.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("Signed in")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("token is not a three-part JWT")]
    Malformed,
    #[error("token payload is not valid base64url: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("token payload is not a JSON object: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Decode the claims of a JWT-shaped token.
pub fn decode_identity_token(token: &str) -> Result<AuthenticatedUser, IdentityError> {
    let mut parts = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(IdentityError::Malformed);
    };

    // Some issuers keep the padding; the no-pad engine rejects it.
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    let user: AuthenticatedUser = serde_json::from_slice(&bytes)?;
    Ok(user)
}

/// Serialize back into the form stored under the user key.
pub fn serialize_user(user: &AuthenticatedUser) -> Result<String, serde_json::Error> {
    serde_json::to_string(user)
}

#[cfg(test)]
pub(crate) fn encode_test_token(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.signature")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_profile_claims_and_keeps_the_rest() {
        let token = encode_test_token(&json!({
            "sub": "1087",
            "name": "Ada Lovelace",
            "picture": "https://example.com/ada.png",
            "email": "ada@example.com",
            "exp": 1700000000
        }));

        let user = decode_identity_token(&token).unwrap();
        assert_eq!(user.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(user.email.as_deref(), Some("ada@example.com"));
        assert_eq!(user.extra.get("exp"), Some(&json!(1700000000)));
        assert_eq!(user.display_name(), "Ada Lovelace");
    }

    #[test]
    fn rejects_non_jwt_tokens() {
        assert!(matches!(
            decode_identity_token("ya29.opaque-access-token"),
            Err(IdentityError::Malformed)
        ));
        assert!(matches!(
            decode_identity_token("a.!!!.c"),
            Err(IdentityError::Encoding(_))
        ));
    }

    #[test]
    fn rejects_non_object_payload() {
        let payload = URL_SAFE_NO_PAD.encode("[1,2,3]");
        let token = format!("h.{payload}.s");
        assert!(matches!(
            decode_identity_token(&token),
            Err(IdentityError::Payload(_))
        ));
    }

    #[test]
    fn stored_form_round_trips() {
        let token = encode_test_token(&json!({"name": "Grace", "hd": "navy.mil"}));
        let user = decode_identity_token(&token).unwrap();
        let stored = serialize_user(&user).unwrap();
        let back: AuthenticatedUser = serde_json::from_str(&stored).unwrap();
        assert_eq!(back, user);
    }
}
