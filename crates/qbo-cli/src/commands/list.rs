//! List records command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use super::resource::{self, Page, ResourceKind};
use crate::connection::ConnectionArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Resource to list
    #[arg(value_enum)]
    pub resource: ResourceKind,

    /// Fetch a single page starting at this 1-based position
    #[arg(long, requires = "max")]
    pub start: Option<u32>,

    /// Page size for --start
    #[arg(long, requires = "start")]
    pub max: Option<u32>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: ListArgs, connection: &ConnectionArgs) -> Result<()> {
    let qbo = connection.connect().await?;
    output::rotated_refresh_token(&qbo);

    let page = match (args.start, args.max) {
        (Some(start), Some(max)) => Some(Page { start, max }),
        _ => None,
    };

    let records = resource::list(&qbo, args.resource, page)
        .await
        .with_context(|| format!("Failed to list {:?}", args.resource))?;

    if records.is_empty() {
        eprintln!("{}", "No records found.".dimmed());
        return Ok(());
    }

    for record in &records {
        output::record(record, args.pretty)?;
    }

    Ok(())
}
