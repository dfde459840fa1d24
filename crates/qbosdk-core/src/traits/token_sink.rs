//! Token sink trait.

use crate::AccessToken;
use crate::types::ServerUrl;

/// A receiver of session state pushed by the SDK facade.
///
/// The facade keeps a list of registered sinks and pushes the server URL
/// and every newly refreshed access token to each of them before the
/// refresh call returns. Implementations use interior mutability because
/// the same sink is also held by callers.
pub trait TokenSink: Send + Sync {
    /// Human-readable name, used in logs.
    fn name(&self) -> &'static str;

    /// Replace the server URL requests are sent to.
    fn set_server_url(&self, server_url: &ServerUrl);

    /// Replace the bearer token attached to requests.
    fn change_access_token(&self, access_token: &AccessToken);
}
