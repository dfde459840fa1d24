//! OAuth2 credential manager performing the refresh-token exchange.

use std::fmt;

use tracing::{debug, info, instrument};

use qbosdk_core::{AccessToken, RefreshToken, Result, ServerUrl};

use crate::credentials::{ClientSecret, Credentials};
use crate::http::HttpClient;

/// Holds the client credentials and the current token pair.
///
/// The client secret never leaves this type. The refresh token is rotated
/// by every successful [`refresh`](Self::refresh); read the new value with
/// [`refresh_token`](Self::refresh_token) and persist it, or the next
/// session will fail with `UnauthorizedClient`.
pub struct CredentialManager {
    http: HttpClient,
    token_url: ServerUrl,
    client_id: String,
    client_secret: ClientSecret,
    refresh_token: RefreshToken,
    access_token: Option<AccessToken>,
}

impl CredentialManager {
    /// Create a manager for the given credentials. No request is made.
    pub(crate) fn new(http: HttpClient, token_url: ServerUrl, credentials: &Credentials) -> Self {
        Self {
            http,
            token_url,
            client_id: credentials.client_id().to_string(),
            client_secret: credentials.client_secret().clone(),
            refresh_token: credentials.refresh_token().clone(),
            access_token: None,
        }
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// On success both tokens are replaced and the new access token is
    /// returned. On failure the stored tokens are left as they were.
    ///
    /// # Errors
    ///
    /// - `ApiErrorKind::UnauthorizedClient` on 401
    /// - `ApiErrorKind::NotFoundClient` on 404
    /// - `ApiErrorKind::InternalServer` on 500
    /// - `ApiErrorKind::Unexpected` on any other non-200 status
    /// - `Error::InvalidResponse` if a 200 body cannot be decoded
    #[instrument(skip(self), fields(client_id = %self.client_id))]
    pub async fn refresh(&mut self) -> Result<AccessToken> {
        info!("Refreshing access token");

        let response = self
            .http
            .refresh_token_grant(
                self.token_url.as_url(),
                &self.client_id,
                &self.client_secret,
                &self.refresh_token,
            )
            .await?;

        let access_token = AccessToken::new(response.access_token);
        self.refresh_token = RefreshToken::new(response.refresh_token);
        self.access_token = Some(access_token.clone());

        debug!(
            token_type = response.token_type.as_deref().unwrap_or("bearer"),
            expires_in = response.expires_in,
            refresh_expires_in = response.x_refresh_token_expires_in,
            "Access token refreshed"
        );
        Ok(access_token)
    }

    /// Returns the OAuth2 client id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the token endpoint.
    pub fn token_url(&self) -> &ServerUrl {
        &self.token_url
    }

    /// Returns the access token from the last successful refresh.
    pub fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// Returns the current refresh token.
    ///
    /// # Security
    ///
    /// Handle the returned token securely. It can be used to obtain new access tokens.
    pub fn refresh_token(&self) -> &RefreshToken {
        &self.refresh_token
    }
}

// Custom Debug impl that hides sensitive data
impl fmt::Debug for CredentialManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialManager")
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{DEFAULT_TIMEOUT, TOKEN_URL};

    fn manager() -> CredentialManager {
        let creds =
            Credentials::new("client", "very-secret", "refresh-1", "123", "sandbox").unwrap();
        CredentialManager::new(
            HttpClient::new(DEFAULT_TIMEOUT).unwrap(),
            ServerUrl::new(TOKEN_URL).unwrap(),
            &creds,
        )
    }

    #[test]
    fn starts_without_access_token() {
        let manager = manager();
        assert!(manager.access_token().is_none());
        assert_eq!(manager.refresh_token().as_str(), "refresh-1");
        assert_eq!(manager.client_id(), "client");
    }

    #[test]
    fn debug_hides_secrets() {
        let debug = format!("{:?}", manager());
        assert!(!debug.contains("very-secret"));
        assert!(!debug.contains("refresh-1"));
        assert!(debug.contains("[REDACTED]"));
    }
}
