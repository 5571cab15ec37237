//! CSV rendering of transactions.

use crate::amount::Amount;
use crate::error::Result;
use crate::transaction::Transaction;
use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;

/// Column headers of the CSV report.
pub const HEADER: [&str; 7] = [
    "crn",
    "payment_type",
    "amount",
    "timestamp",
    "payment_method",
    "transaction_number",
    "filename",
];

/// Timestamp format used in the report.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    crn: &'a str,
    payment_type: &'a str,
    amount: Amount,
    timestamp: String,
    payment_method: &'a str,
    transaction_number: &'a str,
    filename: &'a str,
}

impl<'a> From<&'a Transaction> for ReportRow<'a> {
    fn from(tx: &'a Transaction) -> Self {
        ReportRow {
            crn: tx.crn(),
            payment_type: tx.payment_type(),
            amount: tx.amount(),
            timestamp: tx.timestamp().format(TIMESTAMP_FORMAT).to_string(),
            payment_method: tx.payment_method(),
            transaction_number: tx.transaction_number(),
            filename: tx.filename(),
        }
    }
}

/// Writes transactions to CSV in the order given.
///
/// Amounts are formatted with exactly 2 decimal places and payment codes
/// are written as they appeared in the biller file.
pub fn write_transactions<W: Write>(transactions: &[Transaction], writer: W) -> Result<()> {
    // The header is written by hand so an empty report still carries it.
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    csv_writer.write_record(HEADER)?;

    for tx in transactions {
        csv_writer.serialize(ReportRow::from(tx))?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::BillerFileParser;
    use serde::Deserialize;
    use std::path::Path;

    #[test]
    fn test_output_format() {
        let transactions = BillerFileParser::new()
            .parse(
                b"357006084,05,1,03/07/06,22:18:39,001,BBL200607030010712478\n",
                Path::new("text.txt.gpg"),
            )
            .unwrap();

        let mut output = Vec::new();
        write_transactions(&transactions, &mut output).unwrap();
        let output_str = String::from_utf8(output).unwrap();

        let mut lines = output_str.lines();
        assert_eq!(
            lines.next(),
            Some("crn,payment_type,amount,timestamp,payment_method,transaction_number,filename")
        );
        assert_eq!(
            lines.next(),
            Some("357006084,05,1.00,2006-03-07 22:18:39,001,BBL200607030010712478,text.txt.gpg")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_empty_output_has_header_only() {
        let mut output = Vec::new();
        write_transactions(&[], &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap().lines().count(), 1);
    }

    #[derive(Debug, Deserialize)]
    struct ReadBack {
        crn: String,
        amount: Amount,
        timestamp: String,
        filename: String,
    }

    #[test]
    fn test_report_reads_back() {
        let transactions = BillerFileParser::new()
            .parse(
                b"357006084,05,1,03/07/06,22:18:39,001,A\n546317,05,32.5,03/07/06,22:19:16,101,B\n",
                Path::new("text.txt.gpg"),
            )
            .unwrap();

        let mut output = Vec::new();
        write_transactions(&transactions, &mut output).unwrap();

        let rows: Vec<ReadBack> = csv::Reader::from_reader(output.as_slice())
            .deserialize()
            .collect::<std::result::Result<_, _>>()
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].crn, "357006084");
        assert_eq!(rows[1].amount, transactions[1].amount());
        assert_eq!(rows[1].amount.to_string(), "32.50");
        assert_eq!(rows[1].timestamp, "2006-03-07 22:19:16");
        assert!(rows.iter().all(|r| r.filename == "text.txt.gpg"));
    }
}
