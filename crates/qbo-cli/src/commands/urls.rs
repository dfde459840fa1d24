//! Show the endpoints in use, without contacting them.

use anyhow::Result;
use clap::Args;

use crate::connection::ConnectionArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct UrlsArgs {}

pub fn run(_args: UrlsArgs, connection: &ConnectionArgs) -> Result<()> {
    let qbo = connection.builder()?.build()?;

    output::field("Environment", qbo.environment().as_str());
    output::field("Realm", qbo.realm_id().as_str());
    output::field("API base", qbo.base_url().as_str());
    output::field("Web app", qbo.web_app_url());
    output::field("Token endpoint", qbo.token_url().as_str());

    Ok(())
}
