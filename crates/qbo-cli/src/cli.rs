//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{count, get, list, refresh_token, urls};
use crate::connection::ConnectionArgs;

/// Quickbooks Online CLI tool.
#[derive(Parser, Debug)]
#[command(name = "qbo")]
#[command(author, version = env!("QBO_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Exchange the refresh token and print the new token pair
    RefreshToken(refresh_token::RefreshTokenArgs),

    /// Show the endpoints selected for the environment
    Urls(urls::UrlsArgs),

    /// List records of a resource
    List(list::ListArgs),

    /// Fetch a single record by id
    Get(get::GetArgs),

    /// Count records of a resource
    Count(count::CountArgs),
}
