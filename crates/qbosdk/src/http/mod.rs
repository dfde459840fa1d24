//! HTTP transport for the token and accounting endpoints.

mod client;
mod endpoints;

pub use client::DEFAULT_TIMEOUT;
pub use endpoints::{MAX_PAGE_SIZE, TOKEN_URL};

pub(crate) use client::HttpClient;
pub(crate) use endpoints::*;
