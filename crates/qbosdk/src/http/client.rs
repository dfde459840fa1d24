//! HTTP client implementation.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};
use url::Url;

use qbosdk_core::error::{ApiError, Error, TransportError};
use qbosdk_core::{AccessToken, RefreshToken, Result};

use crate::credentials::ClientSecret;

use super::endpoints::{RefreshTokenRequest, TokenResponse};

/// Default timeout applied to every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client shared by the credential manager and the resource clients.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a new client with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("qbosdk/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Client {
                message: e.to_string(),
            })?;

        Ok(Self { client })
    }

    /// Exchange a refresh token for a new token pair.
    ///
    /// Status codes are classified with the token endpoint mapping.
    #[instrument(skip(self, client_secret, refresh_token), fields(%url))]
    pub async fn refresh_token_grant(
        &self,
        url: &Url,
        client_id: &str,
        client_secret: &ClientSecret,
        refresh_token: &RefreshToken,
    ) -> Result<TokenResponse> {
        debug!("Requesting token exchange");

        let response = self
            .client
            .post(url.clone())
            .basic_auth(client_id, Some(client_secret.expose()))
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .form(&RefreshTokenRequest::new(refresh_token.as_str()))
            .send()
            .await
            .map_err(transport_error)?;

        let (status, body) = read_response(response).await?;
        if status != 200 {
            return Err(ApiError::from_token_response(status, body).into());
        }

        decode(&body)
    }

    /// Make an authenticated GET request against a resource endpoint.
    ///
    /// Status codes are classified with the resource endpoint mapping.
    #[instrument(skip(self, token), fields(%url))]
    pub async fn get_authed<Q, R>(
        &self,
        url: Url,
        params: Option<&Q>,
        token: &AccessToken,
    ) -> Result<R>
    where
        Q: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        debug!("Authenticated GET");
        trace!(?params, "query parameters");

        let mut request = self
            .client
            .get(url)
            .bearer_auth(token.as_str())
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(params) = params {
            request = request.query(params);
        }

        let response = request.send().await.map_err(transport_error)?;

        let (status, body) = read_response(response).await?;
        if !(200..300).contains(&status) {
            return Err(ApiError::from_resource_response(status, body).into());
        }

        decode(&body)
    }
}

/// Read the status and the whole body of a response.
async fn read_response(response: reqwest::Response) -> Result<(u16, String)> {
    let status = response.status().as_u16();
    trace!(status, "HTTP response");

    let body = response.text().await.map_err(transport_error)?;
    Ok((status, body))
}

fn decode<R: DeserializeOwned>(body: &str) -> Result<R> {
    serde_json::from_str(body).map_err(|e| Error::InvalidResponse {
        message: e.to_string(),
    })
}

/// Map a reqwest failure onto the transport taxonomy.
pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout {
            message: err.to_string(),
        }
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    transport.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        assert!(HttpClient::new(Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn decode_reports_invalid_json() {
        let err = decode::<serde_json::Value>("<html>").unwrap_err();
        assert!(matches!(err, Error::InvalidResponse { .. }));
    }
}
