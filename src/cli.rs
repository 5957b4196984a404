//! Command-line interface.
//!
//! Serves the API by default; `fetch` and `summary` print JSON to stdout
//! without starting the HTTP server.

use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::{
    configuration::Config,
    error::Error,
    handler::{dashboard, transactions},
    helpers::{TimeRange, TypeFilter},
    provider::{Fixture, RelayPool},
    types::Filter,
};

/// LaWallet transaction dashboard
#[derive(Parser)]
#[command(name = "lawallet-graph")]
#[command(about = "LaWallet ledger transaction dashboard", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file with KEY=value lines
    #[arg(long, default_value = ".env")]
    pub env: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default if no command specified)
    Serve,

    /// Query the relays once and print normalized transactions
    Fetch,

    /// Print the dashboard computed from the bundled fixture
    Summary {
        /// all, inbound, outbound or internal
        #[arg(long)]
        r#type: Option<String>,

        /// 7d, 30d or 90d
        #[arg(long)]
        range: Option<String>,
    },
}

pub async fn run_fetch(config: &Config) -> Result<(), Error> {
    let pool = RelayPool::new(config)?;
    let filter = Filter::transactions(config);
    let fetched = transactions::fetch(&pool, &filter).await?;

    info!(
        "Fetched {} transactions ({} skipped)",
        fetched.transactions.len(),
        fetched.skipped
    );
    println!("{}", serde_json::to_string_pretty(&fetched.transactions)?);

    Ok(())
}

pub fn run_summary(
    config: &Config,
    r#type: &Option<String>,
    range: &Option<String>,
) -> Result<(), Error> {
    let type_filter = TypeFilter::parse_option(r#type)?;
    let range = TimeRange::parse_option(range)?;
    let fixture = Fixture::load(&config.fixture_path)?;

    let dashboard = dashboard::build(fixture.events(), type_filter, range, Utc::now());
    println!("{}", serde_json::to_string_pretty(&dashboard)?);

    Ok(())
}
