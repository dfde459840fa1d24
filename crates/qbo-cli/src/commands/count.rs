//! Count records command implementation.

use anyhow::{Context, Result};
use clap::Args;

use super::resource::{self, ResourceKind};
use crate::connection::ConnectionArgs;

#[derive(Args, Debug)]
pub struct CountArgs {
    /// Resource to count
    #[arg(value_enum)]
    pub resource: ResourceKind,
}

pub async fn run(args: CountArgs, connection: &ConnectionArgs) -> Result<()> {
    let qbo = connection.connect().await?;
    crate::output::rotated_refresh_token(&qbo);

    let total = resource::count(&qbo, args.resource)
        .await
        .with_context(|| format!("Failed to count {:?}", args.resource))?;

    println!("{}", total);
    Ok(())
}
