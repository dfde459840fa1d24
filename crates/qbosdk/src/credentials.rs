//! OAuth2 client credentials.

use std::fmt;

use qbosdk_core::error::ConfigError;
use qbosdk_core::{Environment, RealmId, RefreshToken, Result};

/// An OAuth2 client secret. Only the token request reads it.
#[derive(Clone)]
pub(crate) struct ClientSecret(String);

impl ClientSecret {
    pub(crate) fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Returns the secret for the Basic authorization header.
    ///
    /// Never log or display this value.
    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClientSecret").field(&"[REDACTED]").finish()
    }
}

/// Everything needed to talk to one Quickbooks Online company.
///
/// The refresh token is the only part that changes over time: it is
/// rotated on every successful token exchange. The client secret cannot be
/// read back once stored.
///
/// # Example
///
/// ```
/// use qbosdk::{Credentials, Environment};
///
/// let creds = Credentials::new(
///     "ABcdClientId",
///     "client-secret",
///     "AB11refresh",
///     "4620816365176835120",
///     "sandbox",
/// )
/// .unwrap();
/// assert_eq!(creds.environment(), Environment::Sandbox);
/// assert!(!format!("{:?}", creds).contains("client-secret"));
/// ```
///
/// ```compile_fail
/// let creds = qbosdk::Credentials::new("id", "client-secret", "refresh", "1", "sandbox").unwrap();
/// let _secret = creds.client_secret();
/// ```
#[derive(Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: ClientSecret,
    refresh_token: RefreshToken,
    realm_id: RealmId,
    environment: Environment,
}

impl Credentials {
    /// Create credentials, validating every field.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a field is empty, the realm id is
    /// malformed, or the environment is not `production`/`sandbox`.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
        realm_id: impl AsRef<str>,
        environment: impl AsRef<str>,
    ) -> Result<Self> {
        let environment: Environment = environment.as_ref().parse()?;
        let realm_id = RealmId::new(realm_id)?;

        let client_id = non_empty("client_id", client_id.into())?;
        let client_secret = non_empty("client_secret", client_secret.into())?;
        let refresh_token = non_empty("refresh_token", refresh_token.into())?;

        Ok(Self {
            client_id,
            client_secret: ClientSecret::new(client_secret),
            refresh_token: RefreshToken::new(refresh_token),
            realm_id,
            environment,
        })
    }

    /// Returns the OAuth2 client id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub(crate) fn client_secret(&self) -> &ClientSecret {
        &self.client_secret
    }

    /// Returns the refresh token these credentials were created with.
    pub fn refresh_token(&self) -> &RefreshToken {
        &self.refresh_token
    }

    /// Returns the realm (company) id.
    pub fn realm_id(&self) -> &RealmId {
        &self.realm_id
    }

    /// Returns the target environment.
    pub fn environment(&self) -> Environment {
        self.environment
    }
}

fn non_empty(field: &'static str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        return Err(ConfigError::EmptyField { field }.into());
    }
    Ok(value)
}

// Intentionally hide secrets in Debug output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("realm_id", &self.realm_id)
            .field("environment", &self.environment)
            .finish()
    }
}
