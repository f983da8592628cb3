//! Authorization URLs for Google's implicit grant endpoint.

use crate::config::OAuthConfig;
use crate::constants::{BASE_SCOPES, GOOGLE_AUTH_ENDPOINT};
use crate::services::GoogleService;

#[derive(Clone, Debug, PartialEq)]
pub struct AuthorizationRequest {
    client_id: String,
    redirect_uri: String,
    scopes: Vec<String>,
    offline_access: bool,
    /// Service this request connects, `None` for plain sign-in.
    service: Option<GoogleService>,
}

impl AuthorizationRequest {
    /// Identity-only sign-in.
    pub fn sign_in(config: &OAuthConfig) -> Self {
        Self {
            client_id: config.client_id().to_string(),
            redirect_uri: config.redirect_uri().to_string(),
            scopes: BASE_SCOPES.iter().map(|s| s.to_string()).collect(),
            offline_access: false,
            service: None,
        }
    }

    /// Sign-in plus the one scope `service` needs.
    pub fn for_service(config: &OAuthConfig, service: GoogleService) -> Self {
        let mut request = Self::sign_in(config);
        request.scopes.push(service.scope().to_string());
        request.offline_access = true;
        request.service = Some(service);
        request
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub fn service(&self) -> Option<GoogleService> {
        self.service
    }

    /// Render the full URL.  Values are percent-encoded the way
    /// `encodeURIComponent` does it, so spaces in the scope list become `%20`.
    pub fn to_url(&self) -> String {
        let scope = self.scopes.join(" ");
        let mut url = format!(
            "{}?client_id={}&redirect_uri={}&response_type=token&scope={}&prompt=consent",
            GOOGLE_AUTH_ENDPOINT,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(&scope),
        );
        if self.offline_access {
            url.push_str("&access_type=offline");
        }
        url
    }
}
