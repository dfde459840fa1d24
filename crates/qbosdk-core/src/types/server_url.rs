//! Server URL type.

use std::fmt;

use url::Url;

use crate::error::{ConfigError, Error};

/// A validated server URL: the API base a resource client talks to, or
/// the OAuth token endpoint.
///
/// Endpoint paths are appended with [`endpoint`](Self::endpoint), never by
/// string concatenation.
///
/// # Example
///
/// ```
/// use qbosdk_core::ServerUrl;
///
/// let base = ServerUrl::new("https://quickbooks.api.intuit.com/v3/company/123").unwrap();
/// assert_eq!(
///     base.endpoint(&["account", "42"]).as_str(),
///     "https://quickbooks.api.intuit.com/v3/company/123/account/42"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerUrl(Url);

impl ServerUrl {
    /// Parse and validate a server URL. A trailing slash is dropped.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Url` if the string is not an absolute URL with a
    /// host, or uses plain http anywhere but loopback.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let invalid = |reason: String| ConfigError::Url {
            value: s.to_string(),
            reason,
        };

        let mut url = Url::parse(s).map_err(|e| invalid(e.to_string()))?;
        if let Some(reason) = Self::rejection(&url) {
            return Err(invalid(reason.to_string()).into());
        }

        let trimmed = url.path().trim_end_matches('/');
        if trimmed.len() < url.path().len() && !trimmed.is_empty() {
            let trimmed = trimmed.to_string();
            url.set_path(&trimmed);
        }

        Ok(Self(url))
    }

    /// Returns the URL with `segments` appended to the path.
    ///
    /// Each segment is percent-encoded, so ids cannot escape the base path.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.0.clone();
        // Base URLs always have a path, checked in `rejection`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Returns the URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    fn rejection(url: &Url) -> Option<&'static str> {
        if url.cannot_be_a_base() {
            return Some("must be an absolute URL");
        }
        let Some(host) = url.host_str() else {
            return Some("must have a host");
        };

        let loopback = matches!(host, "localhost" | "127.0.0.1" | "[::1]");
        match url.scheme() {
            "https" => None,
            "http" if loopback => None,
            _ => Some("must use https (http is allowed only on loopback)"),
        }
    }
}

impl fmt::Display for ServerUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let url = ServerUrl::new("https://quickbooks.api.intuit.com/v3/company/1").unwrap();
        assert_eq!(url.as_url().host_str(), Some("quickbooks.api.intuit.com"));
        assert_eq!(url.to_string(), url.as_str());
    }

    #[test]
    fn valid_loopback_http() {
        assert!(ServerUrl::new("http://127.0.0.1:8080").is_ok());
        assert!(ServerUrl::new("http://localhost:8080/v3/company/1").is_ok());
    }

    #[test]
    fn endpoint_construction() {
        let url = ServerUrl::new("https://sandbox-quickbooks.api.intuit.com/v3/company/9").unwrap();
        assert_eq!(
            url.endpoint(&["query"]).as_str(),
            "https://sandbox-quickbooks.api.intuit.com/v3/company/9/query"
        );
    }

    #[test]
    fn normalizes_trailing_slash() {
        let url = ServerUrl::new("https://quickbooks.api.intuit.com/v3/company/1/").unwrap();
        assert_eq!(url.as_str(), "https://quickbooks.api.intuit.com/v3/company/1");
        assert_eq!(
            url.endpoint(&["class", "7"]).as_str(),
            "https://quickbooks.api.intuit.com/v3/company/1/class/7"
        );
    }

    #[test]
    fn endpoint_on_root_url() {
        let url = ServerUrl::new("http://localhost:9000/").unwrap();
        assert_eq!(
            url.endpoint(&["employee", "3"]).as_str(),
            "http://localhost:9000/employee/3"
        );
    }

    #[test]
    fn endpoint_escapes_segments() {
        let url = ServerUrl::new("https://quickbooks.api.intuit.com/v3/company/1").unwrap();
        assert_eq!(
            url.endpoint(&["account", "../1"]).as_str(),
            "https://quickbooks.api.intuit.com/v3/company/1/account/..%2F1"
        );
    }

    #[test]
    fn invalid_http_non_loopback() {
        let err = ServerUrl::new("http://quickbooks.api.intuit.com").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::Url { ref reason, .. }) if reason.contains("https")
        ));
    }

    #[test]
    fn invalid_non_http_scheme() {
        assert!(ServerUrl::new("ftp://quickbooks.api.intuit.com").is_err());
        assert!(ServerUrl::new("mailto:ops@example.com").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(ServerUrl::new("/v3/company/1").is_err());
    }
}
