//! CSV → exchange endpoint → JSON processing.

use std::io::{Read, Write};
use std::str::FromStr;

use anyhow::{Context, bail};
use hopfx_shared::Currency;
use indicatif::ProgressBar;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::client::ConversionClient;

/// Columns every input file must carry.
pub const REQUIRED_COLUMNS: [&str; 3] = ["source_currency", "target_currency", "amount"];

/// One input row with its cells as read.
///
/// The amount stays raw so a bad cell only fails its own row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// 1-based line number in the input file.
    pub line: u64,
    /// Currency to convert from.
    pub source_currency: Currency,
    /// Currency to convert to.
    pub target_currency: Currency,
    /// Amount cell, trimmed; empty when the row is short.
    pub amount: String,
}

impl Transaction {
    /// Parses the amount cell, accepting plain and scientific notation.
    pub fn parse_amount(&self) -> anyhow::Result<Decimal> {
        Decimal::from_str(&self.amount)
            .or_else(|_| Decimal::from_scientific(&self.amount))
            .with_context(|| format!("invalid amount {:?}", self.amount))
    }
}

/// Amount as written to the output: a number when it parsed, the raw cell otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RecordAmount {
    /// Parsed amount.
    Parsed(#[serde(with = "rust_decimal::serde::float")] Decimal),
    /// Cell that is not a number.
    Raw(String),
}

/// One output record: the input row plus the converted amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRecord {
    /// Currency converted from.
    pub source_currency: Currency,
    /// Currency converted to.
    pub target_currency: Currency,
    /// Amount in the source currency.
    pub amount: RecordAmount,
    /// Converted amount, `null` when this row failed.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub target_amount: Option<Decimal>,
}

/// Reads transactions from CSV with a header row.
///
/// Fails when a required column is missing or the input cannot be read.
/// Short rows and bad cells are kept and fail later on their own.
pub fn read_transactions<R: Read>(reader: R) -> anyhow::Result<Vec<Transaction>> {
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv.headers().context("failed to read CSV header")?.clone();
    let mut indices = [0; REQUIRED_COLUMNS.len()];
    for (index, column) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        let Some(position) = headers.iter().position(|header| header == column) else {
            bail!(
                "CSV must contain 'source_currency', 'target_currency', and 'amount' columns (missing '{column}')"
            );
        };
        *index = position;
    }
    let [source_index, target_index, amount_index] = indices;

    let mut transactions = Vec::new();
    for (row, record) in (2_u64..).zip(csv.byte_records()) {
        let record = record.with_context(|| format!("failed to read CSV line {row}"))?;
        let cell = |index: usize| {
            record
                .get(index)
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                .unwrap_or_default()
        };

        transactions.push(Transaction {
            line: record.position().map_or(row, csv::Position::line),
            source_currency: Currency::new(cell(source_index)),
            target_currency: Currency::new(cell(target_index)),
            amount: cell(amount_index),
        });
    }

    Ok(transactions)
}

/// Converts every transaction, one request at a time.
///
/// A row whose amount does not parse, or whose request fails, gets
/// `target_amount: None` and processing continues.
pub async fn convert_all<C: ConversionClient>(
    client: &C,
    transactions: Vec<Transaction>,
    progress: &ProgressBar,
) -> Vec<TransactionRecord> {
    let mut records = Vec::with_capacity(transactions.len());

    for transaction in transactions {
        let (amount, target_amount) = match transaction.parse_amount() {
            Ok(amount) => {
                let target_amount = match client
                    .convert(
                        &transaction.source_currency,
                        &transaction.target_currency,
                        amount,
                    )
                    .await
                {
                    Ok(converted) => Some(converted),
                    Err(err) => {
                        warn!(
                            line = transaction.line,
                            from = %transaction.source_currency,
                            to = %transaction.target_currency,
                            amount = %amount,
                            error = %err,
                            "Error fetching exchange rate"
                        );
                        None
                    }
                };
                (RecordAmount::Parsed(amount), target_amount)
            }
            Err(err) => {
                warn!(line = transaction.line, error = %err, "Skipping row with unparsable amount");
                (RecordAmount::Raw(transaction.amount), None)
            }
        };

        records.push(TransactionRecord {
            source_currency: transaction.source_currency,
            target_currency: transaction.target_currency,
            amount,
            target_amount,
        });
        progress.inc(1);
    }

    records
}

/// Writes records as a pretty-printed JSON array.
pub fn write_records<W: Write>(writer: W, records: &[TransactionRecord]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(writer, records).context("failed to write JSON output")
}
