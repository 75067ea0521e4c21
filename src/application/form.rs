use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

use crate::domain::{
    Cents, IntegrityReport, TransactionRecord, apply_expense, balance_from_records,
    build_integrity_report, format_cents, parse_amount,
};
use crate::storage::{DEFAULT_LOG_FILE, TransactionLog};

use super::AppError;

/// Settings for a [`LedgerForm`].
#[derive(Debug, Clone)]
pub struct FormConfig {
    /// Location of the CSV transaction log
    pub log_path: PathBuf,
    /// Symbol shown in front of the balance
    pub currency_symbol: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
            currency_symbol: "₹".to_string(),
        }
    }
}

/// Result of an export request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// No destination was chosen; nothing happened
    Cancelled,
    Copied { destination: PathBuf, bytes: u64 },
}

/// The balance form: current balance plus the log that backs it.
///
/// A form only exists after its log has been loaded, so every method works on
/// a ready form. After any successful action the last record in the log holds
/// the same balance as [`LedgerForm::balance`].
#[derive(Debug)]
pub struct LedgerForm {
    log: TransactionLog,
    balance: Cents,
    currency_symbol: String,
}

impl LedgerForm {
    /// Load the form from its log. A missing log starts at zero.
    pub fn open(config: FormConfig) -> Result<Self, AppError> {
        let log = TransactionLog::new(config.log_path);
        let records = log.read_all()?;
        let balance = balance_from_records(&records);

        tracing::info!(
            path = %log.path().display(),
            records = records.len(),
            balance = %format_cents(balance),
            "loaded ledger"
        );

        Ok(Self {
            log,
            balance,
            currency_symbol: config.currency_symbol,
        })
    }

    pub fn balance(&self) -> Cents {
        self.balance
    }

    pub fn log(&self) -> &TransactionLog {
        &self.log
    }

    /// Text for the balance display, e.g. "Remaining Balance: ₹700.00".
    pub fn balance_display(&self) -> String {
        format!(
            "Remaining Balance: {}{}",
            self.currency_symbol,
            format_cents(self.balance)
        )
    }

    /// Replace the balance with the amount in `input`.
    pub fn set_balance(&mut self, input: &str) -> Result<TransactionRecord, AppError> {
        self.set_balance_at(input, Local::now().naive_local())
    }

    /// Same as [`LedgerForm::set_balance`] with an explicit timestamp.
    pub fn set_balance_at(
        &mut self,
        input: &str,
        timestamp: NaiveDateTime,
    ) -> Result<TransactionRecord, AppError> {
        let amount = parse_input(input)?;
        let record = TransactionRecord::set_amount(amount, timestamp);
        self.commit(record)
    }

    /// Spend the amount in `input` from the balance.
    pub fn add_expense(&mut self, input: &str) -> Result<TransactionRecord, AppError> {
        self.add_expense_at(input, Local::now().naive_local())
    }

    /// Same as [`LedgerForm::add_expense`] with an explicit timestamp.
    pub fn add_expense_at(
        &mut self,
        input: &str,
        timestamp: NaiveDateTime,
    ) -> Result<TransactionRecord, AppError> {
        let amount = parse_input(input)?;
        let balance = apply_expense(self.balance, amount).map_err(|e| {
            tracing::info!(
                balance = %format_cents(e.balance),
                requested = %format_cents(e.requested),
                "expense rejected"
            );
            AppError::InsufficientBalance {
                balance: e.balance,
                required: e.requested,
            }
        })?;
        let record = TransactionRecord::expense(amount, balance, timestamp);
        self.commit(record)
    }

    /// Copy the log to `destination`. `None` means the user chose nothing.
    pub fn export_log(&self, destination: Option<&Path>) -> Result<ExportOutcome, AppError> {
        let Some(destination) = destination else {
            return Ok(ExportOutcome::Cancelled);
        };

        let bytes = self
            .log
            .copy_to(destination)
            .map_err(|source| AppError::ExportFailed {
                destination: destination.to_path_buf(),
                source,
            })?;

        tracing::info!(destination = %destination.display(), bytes, "exported log");
        Ok(ExportOutcome::Copied {
            destination: destination.to_path_buf(),
            bytes,
        })
    }

    /// Replay the log and report rows whose balance does not add up.
    pub fn check_integrity(&self) -> Result<IntegrityReport, AppError> {
        let records = self.log.read_all()?;
        Ok(build_integrity_report(&records))
    }

    // The balance only moves once the row is on disk
    fn commit(&mut self, record: TransactionRecord) -> Result<TransactionRecord, AppError> {
        self.log.append(&record)?;
        self.balance = record.balance;

        tracing::info!(
            kind = %record.kind,
            amount = %format_cents(record.amount),
            balance = %format_cents(record.balance),
            "recorded transaction"
        );
        Ok(record)
    }
}

fn parse_input(input: &str) -> Result<Cents, AppError> {
    parse_amount(input).map_err(|reason| AppError::InvalidNumber {
        input: input.to_string(),
        reason,
    })
}
