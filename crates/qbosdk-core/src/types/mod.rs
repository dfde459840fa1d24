//! Validated Quickbooks Online identifiers and URLs.
//!
//! All types in this module perform validation on construction,
//! ensuring that invalid values cannot be represented.

mod environment;
mod realm_id;
mod server_url;

pub use environment::Environment;
pub use realm_id::RealmId;
pub use server_url::ServerUrl;
