//! Batch conversion of CSV transactions.
//!
//! Reads rows with `source_currency`, `target_currency` and `amount`
//! columns, calls the exchange endpoint once per row, and writes the rows
//! with an added `target_amount` (null on failure) to a JSON file.
//!
//! Usage: cargo run --bin hopfx-batch -- --input transaction.csv

mod client;
mod job;

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::client::HttpConversionClient;

/// Default exchange endpoint of a locally running server.
const DEFAULT_ENDPOINT: &str = "http://localhost:8000/api/v1/exchange";

/// Convert CSV transactions through the exchange endpoint
#[derive(Debug, Parser)]
#[command(name = "hopfx-batch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert CSV transactions through the exchange endpoint", long_about = None)]
struct Cli {
    /// Input CSV file
    #[arg(short, long, default_value = "transaction.csv")]
    input: PathBuf,

    /// Output JSON file
    #[arg(short, long, default_value = "transactions_with_target_amount.json")]
    output: PathBuf,

    /// Exchange endpoint URL
    #[arg(short, long, env = "HOPFX_EXCHANGE_URL", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hopfx_batch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let input = File::open(&cli.input)
        .with_context(|| format!("failed to open {}", cli.input.display()))?;
    let transactions = job::read_transactions(input)?;
    info!(rows = transactions.len(), input = %cli.input.display(), "Loaded transactions");

    let client = HttpConversionClient::new(cli.endpoint, Duration::from_secs(cli.timeout_secs))?;

    let progress = ProgressBar::new(transactions.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );
    let records = job::convert_all(&client, transactions, &progress).await;
    progress.finish_and_clear();

    let output = File::create(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;
    job::write_records(BufWriter::new(output), &records)?;

    let failed = records
        .iter()
        .filter(|record| record.target_amount.is_none())
        .count();
    info!(
        rows = records.len(),
        failed,
        output = %cli.output.display(),
        "Processing complete"
    );

    Ok(())
}
