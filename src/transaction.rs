//! Transaction model for parsed biller information file rows.

use crate::amount::Amount;
use crate::error::{ReaderError, Result};
use chrono::NaiveDateTime;
use std::fmt;

/// Payment instruction type codes.
pub mod payment_type {
    pub const PAYMENT: &str = "05";
    pub const ERROR_CORRECTION: &str = "15";
    pub const REVERSAL: &str = "25";
}

/// Payment method codes.
pub mod payment_method {
    pub const DEBIT_ACCOUNT: &str = "001";
    pub const VISA: &str = "101";
    pub const MASTERCARD: &str = "201";
    pub const OTHER_CARD: &str = "301";
}

/// Classification of a settlement row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentType {
    Payment,
    ErrorCorrection,
    Reversal,
}

impl PaymentType {
    /// Maps a raw instruction type code. Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            payment_type::PAYMENT => Some(PaymentType::Payment),
            payment_type::ERROR_CORRECTION => Some(PaymentType::ErrorCorrection),
            payment_type::REVERSAL => Some(PaymentType::Reversal),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            PaymentType::Payment => payment_type::PAYMENT,
            PaymentType::ErrorCorrection => payment_type::ERROR_CORRECTION,
            PaymentType::Reversal => payment_type::REVERSAL,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentType::Payment => "Payment",
            PaymentType::ErrorCorrection => "Error Correction",
            PaymentType::Reversal => "Reversal",
        }
    }
}

/// Funding instrument used for a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    DebitAccount,
    Visa,
    MasterCard,
    OtherCard,
}

impl PaymentMethod {
    /// Maps a raw payment method code. Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            payment_method::DEBIT_ACCOUNT => Some(PaymentMethod::DebitAccount),
            payment_method::VISA => Some(PaymentMethod::Visa),
            payment_method::MASTERCARD => Some(PaymentMethod::MasterCard),
            payment_method::OTHER_CARD => Some(PaymentMethod::OtherCard),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            PaymentMethod::DebitAccount => payment_method::DEBIT_ACCOUNT,
            PaymentMethod::Visa => payment_method::VISA,
            PaymentMethod::MasterCard => payment_method::MASTERCARD,
            PaymentMethod::OtherCard => payment_method::OTHER_CARD,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::DebitAccount => "Debit Account",
            PaymentMethod::Visa => "VISA",
            PaymentMethod::MasterCard => "MasterCard",
            PaymentMethod::OtherCard => "Other Credit Card",
        }
    }
}

/// One payment, error correction or reversal from a biller information file.
///
/// Transactions are immutable once built. The payment type and method are
/// kept as the raw codes from the file so that unknown codes survive parsing;
/// they simply fail every classification predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Number by which the biller identifies the account being paid
    crn: String,

    /// Payment instruction type code
    payment_type: String,

    /// Amount of the payment
    amount: Amount,

    /// When the payer institution accepted the payment
    timestamp: NaiveDateTime,

    /// Payment method code
    payment_method: String,

    /// Receipt number given to the customer
    transaction_number: String,

    /// `<stem>.gpg` name of the encrypted file the row came from
    filename: String,
}

impl Transaction {
    pub fn builder() -> TransactionBuilder {
        TransactionBuilder::default()
    }

    /// Customer reference number.
    pub fn crn(&self) -> &str {
        &self.crn
    }

    pub fn payment_type(&self) -> &str {
        &self.payment_type
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn payment_method(&self) -> &str {
        &self.payment_method
    }

    pub fn transaction_number(&self) -> &str {
        &self.transaction_number
    }

    /// Name of the encrypted source file, always ending in `.gpg`.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Typed payment type, if the code is a known one.
    pub fn kind(&self) -> Option<PaymentType> {
        PaymentType::from_code(&self.payment_type)
    }

    /// Typed payment method, if the code is a known one.
    pub fn method(&self) -> Option<PaymentMethod> {
        PaymentMethod::from_code(&self.payment_method)
    }

    pub fn is_payment(&self) -> bool {
        self.payment_type == payment_type::PAYMENT
    }

    pub fn is_reversal(&self) -> bool {
        self.payment_type == payment_type::REVERSAL
    }

    pub fn is_error_correction(&self) -> bool {
        self.payment_type == payment_type::ERROR_CORRECTION
    }

    pub fn is_paid_by_visa(&self) -> bool {
        self.payment_method == payment_method::VISA
    }

    pub fn is_paid_by_mastercard(&self) -> bool {
        self.payment_method == payment_method::MASTERCARD
    }

    pub fn is_paid_by_debit_account(&self) -> bool {
        self.payment_method == payment_method::DEBIT_ACCOUNT
    }

    pub fn is_paid_by_other_card(&self) -> bool {
        self.payment_method == payment_method::OTHER_CARD
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} crn={} type={} method={} amount={} at {} ({})",
            self.transaction_number,
            self.crn,
            self.kind().map(|k| k.label()).unwrap_or(self.payment_type.as_str()),
            self.method().map(|m| m.label()).unwrap_or(self.payment_method.as_str()),
            self.amount,
            self.timestamp,
            self.filename
        )
    }
}

/// Accumulates transaction fields before producing an immutable [`Transaction`].
///
/// Code and identifier fields default to empty strings. Amount, timestamp and
/// filename have no sensible default and must be supplied.
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    crn: String,
    payment_type: String,
    amount: Option<Amount>,
    timestamp: Option<NaiveDateTime>,
    payment_method: String,
    transaction_number: String,
    filename: Option<String>,
}

impl TransactionBuilder {
    pub fn crn(mut self, crn: impl Into<String>) -> Self {
        self.crn = crn.into();
        self
    }

    pub fn payment_type(mut self, code: impl Into<String>) -> Self {
        self.payment_type = code.into();
        self
    }

    pub fn amount(mut self, amount: Amount) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn payment_method(mut self, code: impl Into<String>) -> Self {
        self.payment_method = code.into();
        self
    }

    pub fn transaction_number(mut self, number: impl Into<String>) -> Self {
        self.transaction_number = number.into();
        self
    }

    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Finalizes the transaction.
    ///
    /// Fails with [`ReaderError::IncompleteRecord`] if amount, timestamp or a
    /// non-empty filename is missing.
    pub fn build(self) -> Result<Transaction> {
        let amount = self.amount.ok_or(ReaderError::IncompleteRecord("amount"))?;
        let timestamp = self
            .timestamp
            .ok_or(ReaderError::IncompleteRecord("timestamp"))?;
        let filename = self
            .filename
            .filter(|f| !f.is_empty())
            .ok_or(ReaderError::IncompleteRecord("filename"))?;

        Ok(Transaction {
            crn: self.crn,
            payment_type: self.payment_type,
            amount,
            timestamp,
            payment_method: self.payment_method,
            transaction_number: self.transaction_number,
            filename,
        })
    }
}
