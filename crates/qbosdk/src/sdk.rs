//! SDK facade wiring the credential manager to the resource clients.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument};

use qbosdk_core::{AccessToken, Environment, RealmId, RefreshToken, Result, ServerUrl, TokenSink};

use crate::credentials::Credentials;
use crate::http::{DEFAULT_TIMEOUT, HttpClient, MAX_PAGE_SIZE, TOKEN_URL};
use crate::oauth::CredentialManager;
use crate::resources::{Accounts, Classes, Departments, Employees, Resource};

/// Quickbooks Online client.
///
/// Owns the credential manager and one client per resource type. Every
/// resource client is registered as a [`TokenSink`]: the base URL is pushed
/// at construction, and each successful [`update_access_token`] pushes the
/// new token to every sink before returning.
///
/// There is no automatic refresh. When a resource call fails with
/// [`Error::is_auth_error`](qbosdk_core::Error::is_auth_error), call
/// [`update_access_token`] and retry.
///
/// [`update_access_token`]: Self::update_access_token
///
/// # Example
///
/// ```no_run
/// use qbosdk::QuickbooksOnline;
///
/// # async fn example() -> Result<(), qbosdk::Error> {
/// let mut qbo = QuickbooksOnline::new(
///     "client-id",
///     "client-secret",
///     "refresh-token",
///     "4620816365176835120",
///     "sandbox",
/// )
/// .await?;
///
/// let accounts = qbo.accounts().get_all().await?;
/// println!("{} accounts", accounts.len());
///
/// // The refresh token was rotated; store it for the next run.
/// println!("new refresh token: {}", qbo.refresh_token().as_str());
/// # qbo.update_access_token().await?;
/// # Ok(())
/// # }
/// ```
pub struct QuickbooksOnline {
    environment: Environment,
    realm_id: RealmId,
    base_url: ServerUrl,
    credentials: CredentialManager,
    accounts: Accounts,
    departments: Departments,
    classes: Classes,
    employees: Employees,
    sinks: Vec<Arc<dyn TokenSink>>,
}

impl QuickbooksOnline {
    /// Connect to Quickbooks Online with the default endpoints.
    ///
    /// This validates the inputs, then performs the initial token refresh.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unknown environment or malformed
    /// input (before any request is made), or the refresh error.
    pub async fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
        realm_id: impl AsRef<str>,
        environment: impl AsRef<str>,
    ) -> Result<Self> {
        let credentials = Credentials::new(
            client_id,
            client_secret,
            refresh_token,
            realm_id,
            environment,
        )?;
        Self::builder(credentials).connect().await
    }

    /// Start configuring a client.
    pub fn builder(credentials: Credentials) -> SdkBuilder {
        SdkBuilder::new(credentials)
    }

    /// Push the base URL to every registered sink.
    pub fn update_server_url(&self) {
        for sink in &self.sinks {
            sink.set_server_url(&self.base_url);
        }
        debug!(base_url = %self.base_url, sinks = self.sinks.len(), "Server URL propagated");
    }

    /// Refresh the access token and push it to every registered sink.
    ///
    /// The refresh token is rotated as a side effect. On failure no sink is
    /// touched and they keep the previous token.
    #[instrument(skip(self), fields(realm_id = %self.realm_id))]
    pub async fn update_access_token(&mut self) -> Result<AccessToken> {
        let access_token = self.credentials.refresh().await?;

        for sink in &self.sinks {
            sink.change_access_token(&access_token);
        }

        debug!(sinks = self.sinks.len(), "Access token propagated");
        Ok(access_token)
    }

    /// Register an additional sink.
    ///
    /// The sink immediately receives the base URL and, if one has been
    /// fetched, the current access token.
    pub fn register_sink(&mut self, sink: Arc<dyn TokenSink>) {
        sink.set_server_url(&self.base_url);
        if let Some(token) = self.credentials.access_token() {
            sink.change_access_token(token);
        }
        debug!(sink = sink.name(), "Registered token sink");
        self.sinks.push(sink);
    }

    /// Returns the accounts client.
    pub fn accounts(&self) -> &Accounts {
        &self.accounts
    }

    /// Returns the departments client.
    pub fn departments(&self) -> &Departments {
        &self.departments
    }

    /// Returns the classes client.
    pub fn classes(&self) -> &Classes {
        &self.classes
    }

    /// Returns the employees client.
    pub fn employees(&self) -> &Employees {
        &self.employees
    }

    /// Returns the environment this client targets.
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Returns the realm (company) id.
    pub fn realm_id(&self) -> &RealmId {
        &self.realm_id
    }

    /// Returns the accounting API base URL.
    pub fn base_url(&self) -> &ServerUrl {
        &self.base_url
    }

    /// Returns the Quickbooks web application URL for this environment.
    pub fn web_app_url(&self) -> &'static str {
        self.environment.web_app_url()
    }

    /// Returns the OAuth2 token endpoint.
    pub fn token_url(&self) -> &ServerUrl {
        self.credentials.token_url()
    }

    /// Returns the OAuth2 client id.
    pub fn client_id(&self) -> &str {
        self.credentials.client_id()
    }

    /// Returns the access token from the last successful refresh.
    pub fn access_token(&self) -> Option<&AccessToken> {
        self.credentials.access_token()
    }

    /// Returns the current refresh token.
    ///
    /// It changes after every successful refresh; persist it.
    pub fn refresh_token(&self) -> &RefreshToken {
        self.credentials.refresh_token()
    }

    /// Returns the number of registered sinks.
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl fmt::Debug for QuickbooksOnline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuickbooksOnline")
            .field("environment", &self.environment)
            .field("realm_id", &self.realm_id)
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

/// Builder for [`QuickbooksOnline`].
///
/// The token and API URLs default to Intuit's endpoints for the
/// credentials' environment; overriding them is meant for proxies and tests.
#[derive(Debug, Clone)]
pub struct SdkBuilder {
    credentials: Credentials,
    token_url: Option<String>,
    api_base_url: Option<String>,
    timeout: Duration,
    page_size: u32,
}

impl SdkBuilder {
    fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            token_url: None,
            api_base_url: None,
            timeout: DEFAULT_TIMEOUT,
            page_size: MAX_PAGE_SIZE,
        }
    }

    /// Override the OAuth2 token endpoint.
    pub fn token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = Some(url.into());
        self
    }

    /// Override the accounting API base URL (normally derived from the
    /// environment and realm id).
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the query page size used by `get_all` (clamped to 1..=1000).
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Build the client without contacting the token endpoint.
    ///
    /// Resource clients get the base URL but no access token until
    /// [`QuickbooksOnline::update_access_token`] succeeds.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an invalid override URL, or a
    /// transport error if the HTTP client cannot be built.
    pub fn build(self) -> Result<QuickbooksOnline> {
        let environment = self.credentials.environment();
        let realm_id = self.credentials.realm_id().clone();

        let base_url = match &self.api_base_url {
            Some(url) => ServerUrl::new(url)?,
            None => ServerUrl::new(environment.api_base_url(&realm_id))?,
        };
        let token_url = ServerUrl::new(self.token_url.as_deref().unwrap_or(TOKEN_URL))?;

        let http = HttpClient::new(self.timeout)?;
        let credentials = CredentialManager::new(http.clone(), token_url, &self.credentials);

        let accounts = Resource::new(http.clone(), self.page_size);
        let departments = Resource::new(http.clone(), self.page_size);
        let classes = Resource::new(http.clone(), self.page_size);
        let employees = Resource::new(http, self.page_size);

        let sinks: Vec<Arc<dyn TokenSink>> = vec![
            Arc::new(accounts.clone()),
            Arc::new(departments.clone()),
            Arc::new(classes.clone()),
            Arc::new(employees.clone()),
        ];

        let qbo = QuickbooksOnline {
            environment,
            realm_id,
            base_url,
            credentials,
            accounts,
            departments,
            classes,
            employees,
            sinks,
        };
        qbo.update_server_url();

        Ok(qbo)
    }

    /// Build the client and fetch the initial access token.
    ///
    /// # Errors
    ///
    /// Returns any [`build`](Self::build) error, or the refresh error.
    #[instrument(
        skip(self),
        fields(
            realm_id = %self.credentials.realm_id(),
            environment = %self.credentials.environment(),
        )
    )]
    pub async fn connect(self) -> Result<QuickbooksOnline> {
        info!("Connecting to Quickbooks Online");

        let mut qbo = self.build()?;
        qbo.update_access_token().await?;
        Ok(qbo)
    }
}
