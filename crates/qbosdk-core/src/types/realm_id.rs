//! Realm (company) id type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigError, Error};

/// A validated Quickbooks realm id, the company identifier embedded in
/// every API URL.
///
/// Realm ids are opaque ASCII alphanumeric strings (in practice, digits).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RealmId(String);

impl RealmId {
    /// Create a new realm id, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is empty or contains characters that
    /// cannot appear in a URL path segment unescaped.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();

        if s.is_empty() {
            return Err(ConfigError::RealmId {
                value: s.to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        if !s.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::RealmId {
                value: s.to_string(),
                reason: "must be ASCII alphanumeric".to_string(),
            }
            .into());
        }

        Ok(Self(s.to_string()))
    }

    /// Returns the realm id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RealmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RealmId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for RealmId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RealmId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        RealmId::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for RealmId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_realm_id() {
        let realm = RealmId::new("4620816365176835120").unwrap();
        assert_eq!(realm.as_str(), "4620816365176835120");
    }

    #[test]
    fn invalid_empty() {
        assert!(RealmId::new("").is_err());
    }

    #[test]
    fn invalid_path_characters() {
        assert!(RealmId::new("123/456").is_err());
        assert!(RealmId::new("123 456").is_err());
        assert!(RealmId::new("../admin").is_err());
    }

    #[test]
    fn deserialize_validates() {
        assert!(serde_json::from_str::<RealmId>("\"123\"").is_ok());
        assert!(serde_json::from_str::<RealmId>("\"1 2\"").is_err());
    }
}
