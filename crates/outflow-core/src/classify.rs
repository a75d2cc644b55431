//! Expense classification

use rust_decimal::Decimal;

use crate::models::NormalizedRecord;

/// Whether a record is outgoing cash flow
///
/// Account lifecycle rows (`OPEN`/`CLOSE`) never count, whatever their
/// amount. Of the rest, only strictly negative amounts are expenses.
pub fn is_expense(record: &NormalizedRecord) -> bool {
    !record.status.is_lifecycle() && record.amount < Decimal::ZERO
}

/// Iterate over the expense records of a statement
pub fn expenses(records: &[NormalizedRecord]) -> impl Iterator<Item = &NormalizedRecord> {
    records.iter().filter(|r| is_expense(r))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(amount: i64, status: &str) -> NormalizedRecord {
        NormalizedRecord::new(
            NaiveDate::from_ymd_opt(2023, 5, 11).unwrap(),
            Decimal::from(amount),
            status,
            None,
        )
    }

    #[test]
    fn test_negative_transaction_is_expense() {
        assert!(is_expense(&record(-10, "PAID")));
        assert!(is_expense(&record(-1, "PENDING")));
    }

    #[test]
    fn test_incoming_funds_are_not_expenses() {
        assert!(!is_expense(&record(100, "PAID")));
        assert!(!is_expense(&record(0, "PAID")));
    }

    #[test]
    fn test_lifecycle_rows_are_never_expenses() {
        assert!(!is_expense(&record(-3, "OPEN")));
        assert!(!is_expense(&record(-3, "CLOSE")));
        assert!(!is_expense(&record(5, "OPEN")));
    }

    #[test]
    fn test_lowercase_open_counts_as_expense() {
        assert!(is_expense(&record(-3, "open")));
        assert!(is_expense(&record(-3, "close")));
    }

    #[test]
    fn test_negative_zero_is_not_expense() {
        let mut r = record(0, "PAID");
        r.amount.set_sign_negative(true);
        assert!(!is_expense(&r));
    }

    #[test]
    fn test_expenses_iterator() {
        let records = vec![record(-1, "PAID"), record(2, "PAID"), record(-3, "CLOSE")];
        assert_eq!(expenses(&records).count(), 1);
    }
}
