//! Connection settings shared by every command.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use qbosdk::{Credentials, QuickbooksOnline, SdkBuilder};

/// Credentials and endpoint overrides, read from flags or the environment.
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// OAuth2 client id
    #[arg(long, env = "QBO_CLIENT_ID", global = true)]
    pub client_id: Option<String>,

    /// OAuth2 client secret
    #[arg(long, env = "QBO_CLIENT_SECRET", hide_env_values = true, global = true)]
    pub client_secret: Option<String>,

    /// Refresh token (rotated on every run)
    #[arg(long, env = "QBO_REFRESH_TOKEN", hide_env_values = true, global = true)]
    pub refresh_token: Option<String>,

    /// Realm (company) id
    #[arg(long, env = "QBO_REALM_ID", global = true)]
    pub realm_id: Option<String>,

    /// Environment: production or sandbox
    #[arg(long, env = "QBO_ENVIRONMENT", default_value = "sandbox", global = true)]
    pub environment: String,

    /// Override the OAuth2 token endpoint
    #[arg(long, env = "QBO_TOKEN_URL", global = true)]
    pub token_url: Option<String>,

    /// Override the accounting API base URL
    #[arg(long, env = "QBO_API_BASE", global = true)]
    pub api_base: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "QBO_TIMEOUT_SECS", default_value_t = 30, global = true)]
    pub timeout_secs: u64,
}

impl ConnectionArgs {
    fn credentials(&self) -> Result<Credentials> {
        let client_id = required(&self.client_id, "--client-id", "QBO_CLIENT_ID")?;
        let client_secret =
            required(&self.client_secret, "--client-secret", "QBO_CLIENT_SECRET")?;
        let refresh_token =
            required(&self.refresh_token, "--refresh-token", "QBO_REFRESH_TOKEN")?;
        let realm_id = required(&self.realm_id, "--realm-id", "QBO_REALM_ID")?;

        Credentials::new(
            client_id,
            client_secret,
            refresh_token,
            realm_id,
            &self.environment,
        )
        .context("Invalid credentials")
    }

    /// Build an SDK builder with the configured overrides applied.
    pub fn builder(&self) -> Result<SdkBuilder> {
        let mut builder = QuickbooksOnline::builder(self.credentials()?)
            .timeout(Duration::from_secs(self.timeout_secs));

        if let Some(url) = &self.token_url {
            builder = builder.token_url(url);
        }
        if let Some(url) = &self.api_base {
            builder = builder.api_base_url(url);
        }

        Ok(builder)
    }

    /// Connect, performing the initial token refresh.
    pub async fn connect(&self) -> Result<QuickbooksOnline> {
        self.builder()?
            .connect()
            .await
            .context("Failed to obtain an access token")
    }
}

fn required(value: &Option<String>, flag: &str, env: &str) -> Result<String> {
    value
        .clone()
        .with_context(|| format!("Missing {} (or set {})", flag, env))
}
