use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Cents;

/// Layout of the `Date` column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// What a log row records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// The balance was replaced by the amount
    #[serde(rename = "Set Amount")]
    SetAmount,
    /// The amount was spent from the balance
    #[serde(rename = "Expense")]
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::SetAmount => "Set Amount",
            TransactionKind::Expense => "Expense",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the transaction log. Rows are written once and never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Local wall-clock time the row was written
    #[serde(rename = "Date", with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "Transaction Type")]
    pub kind: TransactionKind,
    /// Magnitude moved by the action (never signed)
    #[serde(rename = "Amount", with = "money_format")]
    pub amount: Cents,
    /// Balance after the action was applied
    #[serde(rename = "Balance", with = "money_format")]
    pub balance: Cents,
}

impl TransactionRecord {
    pub fn set_amount(amount: Cents, timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            kind: TransactionKind::SetAmount,
            amount,
            balance: amount,
        }
    }

    pub fn expense(amount: Cents, balance: Cents, timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            kind: TransactionKind::Expense,
            amount,
            balance,
        }
    }
}

mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT)
            .map_err(|e| de::Error::custom(format!("invalid date '{}': {}", raw, e)))
    }
}

mod money_format {
    use serde::{Deserialize, Deserializer, Serializer, de};

    use crate::domain::{Cents, format_cents, parse_cents};

    pub fn serialize<S: Serializer>(value: &Cents, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_cents(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Cents, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_cents(&raw).map_err(|e| de::Error::custom(format!("invalid amount '{}': {}", raw, e)))
    }
}
