//! Endpoint definitions and request/response types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Endpoint Names
// ============================================================================

/// Intuit OAuth2 token endpoint, shared by production and sandbox.
pub const TOKEN_URL: &str = "https://oauth.platform.intuit.com/oauth2/v1/tokens/bearer";

/// Path of the accounting query endpoint, relative to the company base URL.
pub const QUERY: &str = "query";

/// Largest page the query endpoint will return.
pub const MAX_PAGE_SIZE: u32 = 1000;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Form body for the refresh-token grant.
#[derive(Debug, Serialize)]
pub struct RefreshTokenRequest<'a> {
    pub grant_type: &'static str,
    pub refresh_token: &'a str,
}

impl<'a> RefreshTokenRequest<'a> {
    pub fn new(refresh_token: &'a str) -> Self {
        Self {
            grant_type: "refresh_token",
            refresh_token,
        }
    }
}

/// Successful token endpoint response.
///
/// No `Debug` derive: both tokens are secrets.
#[derive(Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Access token lifetime in seconds, as reported by the server.
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Refresh token lifetime in seconds, as reported by the server.
    #[serde(default)]
    pub x_refresh_token_expires_in: Option<u64>,
}

/// Query parameters for the query endpoint.
#[derive(Debug, Serialize)]
pub struct QueryParams<'a> {
    pub query: &'a str,
}

/// Response envelope from the query endpoint.
///
/// The rows live under a key named after the entity, e.g.
/// `{"QueryResponse": {"Account": [...], "startPosition": 1, "maxResults": 2}}`.
/// An exhausted query returns `{"QueryResponse": {}}`.
#[derive(Debug, Deserialize)]
pub struct QueryEnvelope {
    #[serde(rename = "QueryResponse", default)]
    pub query_response: Map<String, Value>,
}

impl QueryEnvelope {
    /// Remove and return the rows stored under `entity`.
    pub fn take_rows(&mut self, entity: &str) -> Option<Value> {
        self.query_response.remove(entity)
    }

    /// Returns `totalCount` from a `select count(*)` query.
    pub fn total_count(&self) -> Option<u64> {
        self.query_response.get("totalCount").and_then(Value::as_u64)
    }
}

/// Build the statement for one page of a `select *` query.
pub fn select_page(entity: &str, start_position: u32, max_results: u32) -> String {
    format!(
        "select * from {} STARTPOSITION {} MAXRESULTS {}",
        entity, start_position, max_results
    )
}

/// Build the statement for a `select count(*)` query.
pub fn select_count(entity: &str) -> String {
    format!("select count(*) from {}", entity)
}
