//! Subcommand implementations.

pub mod count;
pub mod get;
pub mod list;
pub mod refresh_token;
mod resource;
pub mod urls;

use anyhow::Result;
use tracing::debug;

use crate::cli::Commands;
use crate::connection::ConnectionArgs;

pub async fn handle(cmd: Commands, connection: &ConnectionArgs) -> Result<()> {
    debug!(command = ?cmd, "Running command");

    match cmd {
        Commands::RefreshToken(args) => refresh_token::run(args, connection).await,
        Commands::Urls(args) => urls::run(args, connection),
        Commands::List(args) => list::run(args, connection).await,
        Commands::Get(args) => get::run(args, connection).await,
        Commands::Count(args) => count::run(args, connection).await,
    }
}
