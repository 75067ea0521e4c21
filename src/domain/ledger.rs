use super::{Cents, TransactionKind, TransactionRecord};

/// Reconstruct the balance from a sequence of log records.
///
/// The stored balance of the last record wins; earlier records are not
/// checked against each other. An empty log yields zero.
pub fn balance_from_records<'a, I>(records: I) -> Cents
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    records
        .into_iter()
        .fold(0, |_, record| record.balance)
}

/// Compute the balance left after spending `amount` from `balance`.
pub fn apply_expense(balance: Cents, amount: Cents) -> Result<Cents, InsufficientBalance> {
    if amount > balance {
        return Err(InsufficientBalance {
            balance,
            requested: amount,
        });
    }
    Ok(balance - amount)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsufficientBalance {
    pub balance: Cents,
    pub requested: Cents,
}

impl std::fmt::Display for InsufficientBalance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Expense of {} cents exceeds balance of {} cents",
            self.requested, self.balance
        )
    }
}

impl std::error::Error for InsufficientBalance {}

/// A record whose stored balance disagrees with the balance obtained by
/// replaying the log from zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceMismatch {
    /// 1-based position among data rows
    pub row: usize,
    pub expected: Cents,
    pub recorded: Cents,
}

impl std::fmt::Display for BalanceMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "row {}: recorded balance {} cents, expected {} cents",
            self.row, self.recorded, self.expected
        )
    }
}

/// Result of replaying the whole log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityReport {
    pub record_count: usize,
    pub set_amount_count: usize,
    pub expense_count: usize,
    pub total_spent: Cents,
    /// Balance taken from the last record, as loading does
    pub stored_balance: Cents,
    pub mismatches: Vec<BalanceMismatch>,
}

impl IntegrityReport {
    pub fn is_healthy(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Replay records from zero. A `Set Amount` row resets the running balance to
/// its amount and an `Expense` row subtracts its amount. After a mismatch the
/// replay continues from the recorded balance so one bad row is reported once.
pub fn build_integrity_report(records: &[TransactionRecord]) -> IntegrityReport {
    let mut running: Cents = 0;
    let mut set_amount_count = 0;
    let mut expense_count = 0;
    let mut total_spent: Cents = 0;
    let mut mismatches = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let expected = match record.kind {
            TransactionKind::SetAmount => {
                set_amount_count += 1;
                record.amount
            }
            TransactionKind::Expense => {
                expense_count += 1;
                total_spent = total_spent.saturating_add(record.amount);
                running.saturating_sub(record.amount)
            }
        };

        if expected != record.balance {
            mismatches.push(BalanceMismatch {
                row: index + 1,
                expected,
                recorded: record.balance,
            });
        }
        running = record.balance;
    }

    IntegrityReport {
        record_count: records.len(),
        set_amount_count,
        expense_count,
        total_spent,
        stored_balance: balance_from_records(records),
        mismatches,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn expense(amount: Cents, balance: Cents) -> TransactionRecord {
        TransactionRecord::expense(amount, balance, now())
    }

    #[test]
    fn test_balance_from_empty_log() {
        assert_eq!(balance_from_records(&[]), 0);
    }

    #[test]
    fn test_balance_from_records_keeps_last() {
        let records = vec![
            TransactionRecord::set_amount(100000, now()),
            expense(30000, 70000),
            expense(10000, 60000),
        ];
        assert_eq!(balance_from_records(&records), 60000);
    }

    #[test]
    fn test_balance_from_records_trusts_inconsistent_rows() {
        // Stored values are taken as-is, even when they do not add up
        let records = vec![
            TransactionRecord::set_amount(100000, now()),
            expense(30000, 12345),
        ];
        assert_eq!(balance_from_records(&records), 12345);
    }

    #[test]
    fn test_apply_expense() {
        assert_eq!(apply_expense(70000, 30000), Ok(40000));
        assert_eq!(apply_expense(70000, 70000), Ok(0));
        assert_eq!(apply_expense(70000, 0), Ok(70000));
    }

    #[test]
    fn test_apply_expense_insufficient() {
        assert_eq!(
            apply_expense(70000, 80000),
            Err(InsufficientBalance {
                balance: 70000,
                requested: 80000
            })
        );
    }

    #[test]
    fn test_integrity_report_healthy() {
        let records = vec![
            TransactionRecord::set_amount(100000, now()),
            expense(30000, 70000),
            TransactionRecord::set_amount(5000, now()),
            expense(1000, 4000),
        ];

        let report = build_integrity_report(&records);

        assert!(report.is_healthy());
        assert_eq!(report.record_count, 4);
        assert_eq!(report.set_amount_count, 2);
        assert_eq!(report.expense_count, 2);
        assert_eq!(report.total_spent, 31000);
        assert_eq!(report.stored_balance, 4000);
    }

    #[test]
    fn test_integrity_report_flags_each_bad_row_once() {
        let records = vec![
            TransactionRecord::set_amount(100000, now()),
            expense(30000, 60000), // should be 70000
            expense(10000, 50000), // consistent with the row above
        ];

        let report = build_integrity_report(&records);

        assert!(!report.is_healthy());
        assert_eq!(
            report.mismatches,
            vec![BalanceMismatch {
                row: 2,
                expected: 70000,
                recorded: 60000
            }]
        );
        assert_eq!(report.stored_balance, 50000);
    }
}
