//! Parsing of decrypted biller information files.
//!
//! Each line of plaintext is one comma-separated row:
//!
//! ```text
//! crn,payment_type,amount,date,time,payment_method,transaction_number
//! 357006084,05,1.00,03/07/06,22:18:39,001,BBL200607030010712478
//! ```
//!
//! Rows that do not have exactly seven fields (blank lines, headers, trailer
//! noise) are skipped without complaint. Rows with the right shape but an
//! unreadable amount or timestamp are skipped with a warning; they never
//! produce a zeroed transaction.

use crate::amount::Amount;
use crate::error::{ReaderError, Result};
use crate::transaction::Transaction;
use chrono::NaiveDateTime;
use csv::{ByteRecord, ReaderBuilder, Trim};
use log::{debug, warn};
use serde::Deserialize;
use std::path::Path;

/// Number of fields in a valid row.
pub const FIELD_COUNT: usize = 7;

/// Default `chrono` format for the joined date and time fields (`MM/DD/YY HH:MM:SS`).
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%m/%d/%y %H:%M:%S";

/// Suffix appended to the stem of the encrypted file name.
pub const SOURCE_SUFFIX: &str = ".gpg";

/// One seven-field row, in file order.
#[derive(Debug, Deserialize)]
struct BillerRow {
    crn: String,
    payment_type: String,
    amount: Amount,
    date: String,
    time: String,
    payment_method: String,
    transaction_number: String,
}

/// Converts decrypted plaintext into transactions.
#[derive(Debug, Clone)]
pub struct BillerFileParser {
    timestamp_format: String,
}

impl BillerFileParser {
    /// Creates a parser using [`DEFAULT_TIMESTAMP_FORMAT`].
    pub fn new() -> Self {
        BillerFileParser {
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }

    /// Overrides the `chrono` format used for `"<date> <time>"`.
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    pub fn timestamp_format(&self) -> &str {
        &self.timestamp_format
    }

    /// Parses plaintext decrypted from `encrypted_path`.
    ///
    /// Transactions are returned in row order, each tagged with
    /// [`source_filename`] of `encrypted_path`. Rows are split as raw bytes,
    /// so text encoding only matters for rows with exactly seven fields.
    pub fn parse(&self, plaintext: &[u8], encrypted_path: &Path) -> Result<Vec<Transaction>> {
        let filename = source_filename(encrypted_path);
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(plaintext);

        let mut transactions = Vec::new();
        let mut skipped = 0usize;

        for result in csv_reader.byte_records() {
            let record = result.map_err(|source| ReaderError::MalformedInput {
                path: encrypted_path.to_path_buf(),
                source,
            })?;

            if record.len() != FIELD_COUNT {
                skipped += 1;
                continue;
            }

            match self.parse_row(&record, &filename) {
                Ok(tx) => transactions.push(tx),
                Err(e) => {
                    warn!("{}: {}, skipping row", filename, e);
                    skipped += 1;
                }
            }
        }

        debug!(
            "{}: parsed {} transactions, skipped {} rows",
            filename,
            transactions.len(),
            skipped
        );

        Ok(transactions)
    }

    /// Builds a transaction from a seven-field row.
    fn parse_row(&self, record: &ByteRecord, filename: &str) -> Result<Transaction> {
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let invalid = |message: String| ReaderError::InvalidRecord { line, message };

        let row: BillerRow = record
            .deserialize(None)
            .map_err(|e| invalid(e.to_string()))?;

        let joined = format!("{} {}", row.date, row.time);
        let timestamp = NaiveDateTime::parse_from_str(&joined, &self.timestamp_format)
            .map_err(|e| invalid(format!("invalid timestamp `{}`: {}", joined, e)))?;

        Transaction::builder()
            .crn(row.crn)
            .payment_type(row.payment_type)
            .amount(row.amount)
            .timestamp(timestamp)
            .payment_method(row.payment_method)
            .transaction_number(row.transaction_number)
            .filename(filename)
            .build()
    }
}

impl Default for BillerFileParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Name recorded on every transaction from `encrypted_path`.
///
/// The final extension of the encrypted file is replaced by `.gpg`, whatever
/// it was: `text.txt.gpg` stays `text.txt.gpg`, `file1.txt.pgp` becomes
/// `file1.txt.gpg`.
pub fn source_filename(encrypted_path: &Path) -> String {
    let stem = encrypted_path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    format!("{}{}", stem, SOURCE_SUFFIX)
}
