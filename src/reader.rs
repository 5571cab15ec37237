//! Reading of encrypted biller information files.
//!
//! Files are processed strictly one after another: resolve the pattern,
//! then decrypt and parse each file, appending its transactions to a single
//! collection. The first failure aborts the whole read.

use crate::decryptor::Decrypt;
use crate::error::Result;
use crate::parser::BillerFileParser;
use crate::pattern;
use crate::transaction::Transaction;
use log::{debug, info};
use std::path::Path;

/// Reads every biller information file matched by a pattern.
///
/// # Ordering
///
/// Transactions come out in file resolution order, then row order within
/// each file. Resolution order follows brace alternation and the glob walk;
/// call [`sorted`](Self::sorted) to process paths in lexicographic order.
#[derive(Debug)]
pub struct BillerFileReader<D> {
    decryptor: D,
    parser: BillerFileParser,
    sort_paths: bool,
}

impl<D: Decrypt> BillerFileReader<D> {
    /// Creates a reader with the default parser.
    pub fn new(decryptor: D) -> Self {
        BillerFileReader {
            decryptor,
            parser: BillerFileParser::new(),
            sort_paths: false,
        }
    }

    pub fn with_parser(mut self, parser: BillerFileParser) -> Self {
        self.parser = parser;
        self
    }

    /// Processes matched paths in lexicographic order instead of resolution order.
    pub fn sorted(mut self, sort_paths: bool) -> Self {
        self.sort_paths = sort_paths;
        self
    }

    pub fn decryptor(&self) -> &D {
        &self.decryptor
    }

    pub fn parser(&self) -> &BillerFileParser {
        &self.parser
    }

    /// Reads all files matching `pattern`.
    ///
    /// A pattern matching nothing yields an empty collection.
    pub fn read_all(&self, pattern: &str) -> Result<Vec<Transaction>> {
        self.read_all_with(pattern, |_| {})
    }

    /// Reads all files matching `pattern`, calling `on_file` after each file
    /// has been decrypted and parsed.
    ///
    /// The callback only observes progress; it cannot stop the read.
    pub fn read_all_with<F>(&self, pattern: &str, mut on_file: F) -> Result<Vec<Transaction>>
    where
        F: FnMut(&Path),
    {
        let mut paths = pattern::resolve(pattern)?;
        if self.sort_paths {
            paths.sort();
        }
        debug!("Reading {} biller files for `{}`", paths.len(), pattern);

        let mut collection = Vec::new();
        for path in &paths {
            let plaintext = self.decryptor.decrypt(path)?;
            let transactions = self.parser.parse(&plaintext, path)?;
            info!("{}: {} transactions", path.display(), transactions.len());
            collection.extend(transactions);
            on_file(path);
        }

        Ok(collection)
    }
}
