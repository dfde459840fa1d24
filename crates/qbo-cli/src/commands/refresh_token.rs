//! Refresh token command implementation.

use anyhow::Result;
use clap::Args;

use crate::connection::ConnectionArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct RefreshTokenArgs {
    /// Print the token pair as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: RefreshTokenArgs, connection: &ConnectionArgs) -> Result<()> {
    let qbo = connection.connect().await?;

    let access_token = qbo
        .access_token()
        .map(|t| t.as_str().to_string())
        .unwrap_or_default();
    let refresh_token = qbo.refresh_token().as_str();

    if args.json {
        return output::json(&serde_json::json!({
            "access_token": access_token,
            "refresh_token": refresh_token,
        }));
    }

    output::success("Access token refreshed");
    output::field("Access token", &access_token);
    output::field("Refresh token", refresh_token);

    Ok(())
}
