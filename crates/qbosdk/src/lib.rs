//! qbosdk - Quickbooks Online API client.
//!
//! The [`QuickbooksOnline`] facade exchanges a refresh token for an access
//! token and hands it to one client per supported entity: accounts,
//! departments, classes and employees.
//!
//! # Example
//!
//! ```no_run
//! use qbosdk::{Credentials, QuickbooksOnline};
//!
//! # async fn example() -> Result<(), qbosdk::Error> {
//! let credentials = Credentials::new(
//!     "client-id",
//!     "client-secret",
//!     "refresh-token",
//!     "4620816365176835120",
//!     "production",
//! )?;
//! let mut qbo = QuickbooksOnline::builder(credentials).connect().await?;
//!
//! match qbo.employees().get_by_id("55").await {
//!     Err(e) if e.is_auth_error() => {
//!         qbo.update_access_token().await?;
//!     }
//!     other => println!("{:?}", other?),
//! }
//! # Ok(())
//! # }
//! ```

mod credentials;
mod http;
mod oauth;
mod resources;
mod sdk;

pub use credentials::Credentials;
pub use http::{DEFAULT_TIMEOUT, MAX_PAGE_SIZE, TOKEN_URL};
pub use resources::{
    Account, Accounts, Class, Classes, Department, Departments, Employee, Employees, Entity,
    Resource,
};
pub use sdk::{QuickbooksOnline, SdkBuilder};

pub use qbosdk_core::{
    AccessToken, ApiError, ApiErrorKind, ConfigError, Environment, Error, RealmId, RefreshToken,
    Result, ServerUrl, TokenSink, TransportError,
};
