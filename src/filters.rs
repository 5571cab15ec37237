//! Selection of transactions by payment attributes.
//!
//! Every filter borrows the input collection and returns a new one holding
//! the matching transactions in their original relative order.

use crate::amount::Amount;
use crate::transaction::{payment_method, payment_type, Transaction};

fn filter_by<P>(collection: &[Transaction], predicate: P) -> Vec<Transaction>
where
    P: Fn(&Transaction) -> bool,
{
    collection.iter().filter(|t| predicate(*t)).cloned().collect()
}

/// Transactions for the given customer reference number.
pub fn filter_by_crn(collection: &[Transaction], crn: &str) -> Vec<Transaction> {
    filter_by(collection, |t| t.crn() == crn)
}

/// Transactions read from the given `<stem>.gpg` file.
pub fn filter_by_filename(collection: &[Transaction], filename: &str) -> Vec<Transaction> {
    filter_by(collection, |t| t.filename() == filename)
}

/// Transactions with the given raw payment instruction type code.
pub fn filter_by_payment_type(collection: &[Transaction], code: &str) -> Vec<Transaction> {
    filter_by(collection, |t| t.payment_type() == code)
}

/// Transactions with the given raw payment method code.
pub fn filter_by_payment_method(collection: &[Transaction], code: &str) -> Vec<Transaction> {
    filter_by(collection, |t| t.payment_method() == code)
}

pub fn filter_paid_by_visa(collection: &[Transaction]) -> Vec<Transaction> {
    filter_by_payment_method(collection, payment_method::VISA)
}

pub fn filter_paid_by_mastercard(collection: &[Transaction]) -> Vec<Transaction> {
    filter_by_payment_method(collection, payment_method::MASTERCARD)
}

pub fn filter_paid_by_debit_account(collection: &[Transaction]) -> Vec<Transaction> {
    filter_by_payment_method(collection, payment_method::DEBIT_ACCOUNT)
}

pub fn filter_paid_by_other_card(collection: &[Transaction]) -> Vec<Transaction> {
    filter_by_payment_method(collection, payment_method::OTHER_CARD)
}

pub fn filter_is_payment(collection: &[Transaction]) -> Vec<Transaction> {
    filter_by_payment_type(collection, payment_type::PAYMENT)
}

pub fn filter_is_reversal(collection: &[Transaction]) -> Vec<Transaction> {
    filter_by_payment_type(collection, payment_type::REVERSAL)
}

pub fn filter_is_error_correction(collection: &[Transaction]) -> Vec<Transaction> {
    filter_by_payment_type(collection, payment_type::ERROR_CORRECTION)
}

/// Sum of all amounts, regardless of payment type.
///
/// Returns `None` if the sum does not fit in an [`Amount`].
pub fn total_amount(collection: &[Transaction]) -> Option<Amount> {
    collection
        .iter()
        .try_fold(Amount::ZERO, |total, t| total.checked_add(t.amount()))
}
