//! Quickbooks Online environment selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigError, Error};
use crate::types::RealmId;

const PRODUCTION_API: &str = "https://quickbooks.api.intuit.com/v3/company";
const SANDBOX_API: &str = "https://sandbox-quickbooks.api.intuit.com/v3/company";
const PRODUCTION_WEB_APP: &str = "https://app.qbo.intuit.com";
const SANDBOX_WEB_APP: &str = "https://app.sandbox.qbo.intuit.com";

/// The Quickbooks Online environment a company lives in.
///
/// Parsing is case-insensitive and accepts only `production` and `sandbox`.
///
/// # Example
///
/// ```
/// use qbosdk_core::{Environment, RealmId};
///
/// let env: Environment = "Sandbox".parse().unwrap();
/// let realm = RealmId::new("123").unwrap();
/// assert_eq!(
///     env.api_base_url(&realm),
///     "https://sandbox-quickbooks.api.intuit.com/v3/company/123"
/// );
/// assert!("staging".parse::<Environment>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Live company data.
    Production,
    /// Developer sandbox companies.
    Sandbox,
}

impl Environment {
    /// Returns the lowercase name of the environment.
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Sandbox => "sandbox",
        }
    }

    /// Returns the accounting API base URL for a company.
    pub fn api_base_url(self, realm_id: &RealmId) -> String {
        let base = match self {
            Environment::Production => PRODUCTION_API,
            Environment::Sandbox => SANDBOX_API,
        };
        format!("{}/{}", base, realm_id)
    }

    /// Returns the web application URL.
    pub fn web_app_url(self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_WEB_APP,
            Environment::Sandbox => SANDBOX_WEB_APP,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "production" => Ok(Environment::Production),
            "sandbox" => Ok(Environment::Sandbox),
            _ => Err(ConfigError::UnknownEnvironment {
                value: s.to_string(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn realm() -> RealmId {
        RealmId::new("4620816365176835120").unwrap()
    }

    #[test]
    fn production_urls() {
        let env: Environment = "production".parse().unwrap();
        assert_eq!(env, Environment::Production);
        assert_eq!(
            env.api_base_url(&realm()),
            "https://quickbooks.api.intuit.com/v3/company/4620816365176835120"
        );
        assert_eq!(env.web_app_url(), "https://app.qbo.intuit.com");
    }

    #[test]
    fn sandbox_urls() {
        let env: Environment = "sandbox".parse().unwrap();
        assert_eq!(env, Environment::Sandbox);
        assert_eq!(
            env.api_base_url(&realm()),
            "https://sandbox-quickbooks.api.intuit.com/v3/company/4620816365176835120"
        );
        assert_eq!(env.web_app_url(), "https://app.sandbox.qbo.intuit.com");
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!(
            "PRODUCTION".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert_eq!(
            "SandBox".parse::<Environment>().unwrap(),
            Environment::Sandbox
        );
    }

    #[test]
    fn rejects_other_values() {
        for value in ["", "prod", "staging", "production "] {
            let err = value.parse::<Environment>().unwrap_err();
            assert!(matches!(
                err,
                Error::Config(ConfigError::UnknownEnvironment { .. })
            ));
        }
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Environment::Sandbox).unwrap();
        assert_eq!(json, "\"sandbox\"");
        let env: Environment = serde_json::from_str("\"production\"").unwrap();
        assert_eq!(env, Environment::Production);
    }
}
