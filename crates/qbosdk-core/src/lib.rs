//! qbosdk-core - Core Quickbooks Online types and traits.

pub mod error;
pub mod tokens;
pub mod traits;
pub mod types;

pub use error::{ApiError, ApiErrorKind, ConfigError, Error, TransportError};
pub use tokens::{AccessToken, RefreshToken};
pub use traits::TokenSink;
pub use types::{Environment, RealmId, ServerUrl};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
