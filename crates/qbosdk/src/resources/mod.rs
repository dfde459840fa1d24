//! Resource clients for the accounting entities.
//!
//! Every entity shares the same read-only surface, so there is one generic
//! [`Resource`] client parameterised by an [`Entity`] marker, with an alias
//! per entity: [`Accounts`], [`Departments`], [`Classes`] and [`Employees`].

mod entities;

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, instrument};

use qbosdk_core::error::{ConfigError, Error};
use qbosdk_core::{AccessToken, Result, ServerUrl, TokenSink};

use crate::http::{
    HttpClient, MAX_PAGE_SIZE, QUERY, QueryEnvelope, QueryParams, select_count, select_page,
};

pub use entities::{Account, Class, Department, Employee, Entity};

/// Client for the account endpoints.
pub type Accounts = Resource<Account>;
/// Client for the department endpoints.
pub type Departments = Resource<Department>;
/// Client for the class endpoints.
pub type Classes = Resource<Class>;
/// Client for the employee endpoints.
pub type Employees = Resource<Employee>;

/// Read/list client for one accounting entity.
///
/// Clones share the same server URL and access token, so a token pushed
/// by the SDK facade is seen by every handle.
pub struct Resource<E> {
    state: Arc<RwLock<ResourceState>>,
    http: HttpClient,
    page_size: u32,
    _entity: PhantomData<fn() -> E>,
}

#[derive(Default)]
struct ResourceState {
    server_url: Option<ServerUrl>,
    access_token: Option<AccessToken>,
}

impl<E: Entity> Resource<E> {
    /// Create a client with no server URL or token yet.
    pub(crate) fn new(http: HttpClient, page_size: u32) -> Self {
        Self {
            state: Arc::new(RwLock::new(ResourceState::default())),
            http,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            _entity: PhantomData,
        }
    }

    /// Replace the server URL requests are sent to.
    pub fn set_server_url(&self, server_url: &ServerUrl) {
        self.state.write().server_url = Some(server_url.clone());
    }

    /// Replace the bearer token attached to requests.
    pub fn change_access_token(&self, access_token: &AccessToken) {
        self.state.write().access_token = Some(access_token.clone());
    }

    /// Returns the current server URL, if one has been set.
    pub fn server_url(&self) -> Option<ServerUrl> {
        self.state.read().server_url.clone()
    }

    /// Returns the current access token, if one has been set.
    pub fn access_token(&self) -> Option<AccessToken> {
        self.state.read().access_token.clone()
    }

    /// Returns the number of rows requested per query page.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Fetch every record of this entity, paging through the query endpoint.
    ///
    /// Pages start at position 1 and advance by the page size until a page
    /// comes back empty or shorter than requested.
    #[instrument(skip(self), fields(entity = E::NAME))]
    pub async fn get_all(&self) -> Result<Vec<Value>> {
        let mut records = Vec::new();
        let mut start_position = 1;

        loop {
            let page = self.get_page(start_position, self.page_size).await?;
            let fetched = page.len();
            records.extend(page);

            if fetched < self.page_size as usize {
                break;
            }
            start_position += self.page_size;
        }

        debug!(count = records.len(), "Fetched all records");
        Ok(records)
    }

    /// Fetch one page of records.
    ///
    /// `start_position` is 1-based, as in the Quickbooks query language; 0 is
    /// sent as 1. `max_results` is clamped to `1..=MAX_PAGE_SIZE`, the most
    /// rows Quickbooks returns per query.
    #[instrument(skip(self), fields(entity = E::NAME))]
    pub async fn get_page(&self, start_position: u32, max_results: u32) -> Result<Vec<Value>> {
        let statement = select_page(
            E::NAME,
            start_position.max(1),
            max_results.clamp(1, MAX_PAGE_SIZE),
        );
        let mut envelope = self.query(&statement).await?;

        match envelope.take_rows(E::NAME) {
            None => Ok(Vec::new()),
            Some(Value::Array(rows)) => Ok(rows),
            Some(other) => Err(Error::InvalidResponse {
                message: format!("expected an array under '{}', got {}", E::NAME, other),
            }),
        }
    }

    /// Fetch a single record by its id.
    #[instrument(skip(self), fields(entity = E::NAME))]
    pub async fn get_by_id(&self, id: &str) -> Result<Value> {
        let (server_url, token) = self.snapshot()?;
        let url = server_url.endpoint(&[E::PATH, id]);

        let mut body: serde_json::Map<String, Value> = self
            .http
            .get_authed(url, None::<&QueryParams<'_>>, &token)
            .await?;

        body.remove(E::NAME).ok_or_else(|| Error::InvalidResponse {
            message: format!("missing '{}' in response", E::NAME),
        })
    }

    /// Count the records of this entity.
    #[instrument(skip(self), fields(entity = E::NAME))]
    pub async fn count(&self) -> Result<u64> {
        let envelope = self.query(&select_count(E::NAME)).await?;

        envelope.total_count().ok_or_else(|| Error::InvalidResponse {
            message: "missing totalCount in query response".to_string(),
        })
    }

    async fn query(&self, statement: &str) -> Result<QueryEnvelope> {
        let (server_url, token) = self.snapshot()?;
        let url = server_url.endpoint(&[QUERY]);
        let params = QueryParams { query: statement };

        self.http.get_authed(url, Some(&params), &token).await
    }

    /// Copy the current URL and token out of the lock.
    fn snapshot(&self) -> Result<(ServerUrl, AccessToken)> {
        let state = self.state.read();
        let server_url = state
            .server_url
            .clone()
            .ok_or(ConfigError::MissingServerUrl { resource: E::LABEL })?;
        let token = state
            .access_token
            .clone()
            .ok_or(ConfigError::MissingAccessToken { resource: E::LABEL })?;
        Ok((server_url, token))
    }
}

impl<E> Clone for Resource<E> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            http: self.http.clone(),
            page_size: self.page_size,
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> TokenSink for Resource<E> {
    fn name(&self) -> &'static str {
        E::LABEL
    }

    fn set_server_url(&self, server_url: &ServerUrl) {
        self.state.write().server_url = Some(server_url.clone());
    }

    fn change_access_token(&self, access_token: &AccessToken) {
        self.state.write().access_token = Some(access_token.clone());
    }
}

impl<E: Entity> fmt::Debug for Resource<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("entity", &E::NAME)
            .field("server_url", &self.state.read().server_url)
            .field("page_size", &self.page_size)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}
