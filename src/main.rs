//! BPAY Reader CLI
//!
//! Decrypts every biller information file matching a pattern and writes the
//! (optionally filtered) transactions to stdout as CSV.
//!
//! # Usage
//!
//! ```bash
//! BPAY_PASSPHRASE=... cargo run -- '/var/bpay/{inbox,archive}/*.gpg' --method visa > visa.csv
//! ```
//!
//! # Environment Variables
//!
//! - `BPAY_PASSPHRASE`: passphrase handed to the decryption binary on stdin
//! - `BPAY_GPG_BINARY`: decryption binary (default `gpg`)
//! - `RUST_LOG`: Set to `info` or `debug` to see per-file progress

use bpay_reader::{filters, output, BillerFileParser, BillerFileReader, GpgDecryptor, Result};
use clap::{Parser, ValueEnum};
use log::info;
use std::io;
use std::path::PathBuf;
use std::process;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Method {
    Visa,
    Mastercard,
    DebitAccount,
    OtherCard,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Kind {
    Payment,
    Reversal,
    ErrorCorrection,
}

#[derive(Parser, Debug)]
#[command(name = "bpay-reader", version, about = "Read encrypted BPAY biller information files")]
struct Cli {
    /// File pattern; supports `*`, `?`, `[..]`, `**` and `{a,b}` alternation
    pattern: String,

    /// Decryption binary
    #[arg(long = "gpg", env = "BPAY_GPG_BINARY", default_value = "gpg")]
    gpg: PathBuf,

    /// Passphrase written to the decryption binary's stdin
    #[arg(long, env = "BPAY_PASSPHRASE", hide_env_values = true)]
    passphrase: String,

    /// Extra argument passed to the decryption binary before the decrypt flags (repeatable)
    #[arg(long = "gpg-arg", allow_hyphen_values = true)]
    gpg_args: Vec<String>,

    /// chrono format for the joined date and time columns
    #[arg(long, default_value = bpay_reader::parser::DEFAULT_TIMESTAMP_FORMAT)]
    date_format: String,

    /// Process matched files in lexicographic order
    #[arg(long)]
    sorted: bool,

    /// Only transactions for this customer reference number
    #[arg(long)]
    crn: Option<String>,

    /// Only transactions read from this `<stem>.gpg` file
    #[arg(long)]
    filename: Option<String>,

    /// Only transactions paid with this method
    #[arg(long, value_enum)]
    method: Option<Method>,

    /// Only transactions of this payment instruction type
    #[arg(long = "type", value_enum)]
    kind: Option<Kind>,

    /// Print file count, transaction count and total amount to stderr
    #[arg(long)]
    summary: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let decryptor = GpgDecryptor::new(cli.gpg, cli.passphrase).with_extra_args(cli.gpg_args);
    let reader = BillerFileReader::new(decryptor)
        .with_parser(BillerFileParser::new().with_timestamp_format(cli.date_format))
        .sorted(cli.sorted);

    let mut files = 0usize;
    let mut transactions = reader.read_all_with(&cli.pattern, |path| {
        files += 1;
        info!("Processed {}", path.display());
    })?;

    if let Some(crn) = &cli.crn {
        transactions = filters::filter_by_crn(&transactions, crn);
    }
    if let Some(filename) = &cli.filename {
        transactions = filters::filter_by_filename(&transactions, filename);
    }
    if let Some(method) = cli.method {
        transactions = match method {
            Method::Visa => filters::filter_paid_by_visa(&transactions),
            Method::Mastercard => filters::filter_paid_by_mastercard(&transactions),
            Method::DebitAccount => filters::filter_paid_by_debit_account(&transactions),
            Method::OtherCard => filters::filter_paid_by_other_card(&transactions),
        };
    }
    if let Some(kind) = cli.kind {
        transactions = match kind {
            Kind::Payment => filters::filter_is_payment(&transactions),
            Kind::Reversal => filters::filter_is_reversal(&transactions),
            Kind::ErrorCorrection => filters::filter_is_error_correction(&transactions),
        };
    }

    let stdout = io::stdout();
    let handle = stdout.lock();
    output::write_transactions(&transactions, handle)?;

    if cli.summary {
        let total = match filters::total_amount(&transactions) {
            Some(total) => total.to_string(),
            None => "overflow".to_string(),
        };
        eprintln!(
            "files: {}, transactions: {}, total: {}",
            files,
            transactions.len(),
            total
        );
    }

    Ok(())
}
