//! Get record command implementation.

use anyhow::{Context, Result};
use clap::Args;

use super::resource::{self, ResourceKind};
use crate::connection::ConnectionArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Resource the record belongs to
    #[arg(value_enum)]
    pub resource: ResourceKind,

    /// Record id
    pub id: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: GetArgs, connection: &ConnectionArgs) -> Result<()> {
    let qbo = connection.connect().await?;
    output::rotated_refresh_token(&qbo);

    let record = resource::get(&qbo, args.resource, &args.id)
        .await
        .with_context(|| format!("Failed to get {:?} {}", args.resource, args.id))?;

    output::record(&record, args.pretty)
}
