//! # BPAY Reader
//!
//! Reads encrypted BPAY biller information files, decrypts them with an
//! OpenPGP-compatible binary and parses every row into a [`Transaction`]
//! that can then be narrowed down with the functions in [`filters`].
//!
//! ## Design Principles
//!
//! - **Fixed-point amounts**: 2 decimal places via `rust_decimal`
//! - **Sequential pipeline**: one file at a time, first failure aborts
//! - **Tolerant rows**: rows without exactly seven fields are skipped
//! - **Pluggable decryption**: anything implementing [`Decrypt`]
//!
//! ## Example
//!
//! ```no_run
//! use bpay_reader::{filters, BillerFileReader, GpgDecryptor};
//!
//! let reader = BillerFileReader::new(GpgDecryptor::new("/usr/bin/gpg", "passphrase"));
//! let transactions = reader
//!     .read_all_with("/var/bpay/{inbox,archive}/*.gpg", |path| {
//!         println!("read {}", path.display());
//!     })
//!     .unwrap();
//! let visa = filters::filter_paid_by_visa(&transactions);
//! println!("{} VISA payments", visa.len());
//! ```

pub mod amount;
pub mod decryptor;
pub mod error;
pub mod filters;
pub mod output;
pub mod parser;
pub mod pattern;
pub mod reader;
pub mod transaction;

pub use amount::Amount;
pub use decryptor::{Decrypt, GpgDecryptor};
pub use error::{ReaderError, Result};
pub use parser::BillerFileParser;
pub use reader::BillerFileReader;
pub use transaction::{PaymentMethod, PaymentType, Transaction, TransactionBuilder};
