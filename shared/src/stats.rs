//! Income/expense aggregation for the dashboard cards.

use thiserror::Error;

use crate::models::{Transaction, TransactionKind};

/// Totals for the currently displayed period.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PeriodStats {
    pub total_income: f64,
    pub total_expense: f64,
    /// `total_income - total_expense`; may be negative.
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// An amount that does not parse as a decimal. The whole computation
    /// fails rather than coercing the value to zero or NaN; the caller keeps
    /// its previously displayed stats.
    #[error("transaction {id} has unparseable amount {raw:?}")]
    BadAmount { id: i64, raw: String },
    #[error("transaction {id} has negative amount {raw:?}")]
    NegativeAmount { id: i64, raw: String },
}

/// Sums the given transactions into period totals. Pure; the input is the
/// backend's response for the active filter, taken as-is.
pub fn aggregate(transactions: &[Transaction]) -> Result<PeriodStats, StatsError> {
    let mut total_income = 0.0;
    let mut total_expense = 0.0;

    for tx in transactions {
        let amount: f64 = tx
            .amount
            .trim()
            .parse()
            .map_err(|_| StatsError::BadAmount {
                id: tx.id,
                raw: tx.amount.clone(),
            })?;
        if !amount.is_finite() {
            return Err(StatsError::BadAmount {
                id: tx.id,
                raw: tx.amount.clone(),
            });
        }
        // Sign is carried by `kind`; a negative wire amount is a data error.
        if amount < 0.0 {
            return Err(StatsError::NegativeAmount {
                id: tx.id,
                raw: tx.amount.clone(),
            });
        }

        match tx.kind {
            TransactionKind::Income => total_income += amount,
            TransactionKind::Expense => total_expense += amount,
        }
    }

    Ok(PeriodStats {
        total_income,
        total_expense,
        balance: total_income - total_expense,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(id: i64, amount: &str, kind: TransactionKind) -> Transaction {
        Transaction {
            id,
            title: format!("entry {id}"),
            amount: amount.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            category: 1,
            category_name: "General".to_string(),
            kind,
        }
    }

    #[test]
    fn sums_income_and_expense_separately() {
        let stats = aggregate(&[
            tx(1, "100", TransactionKind::Income),
            tx(2, "40", TransactionKind::Expense),
        ])
        .unwrap();
        assert_eq!(stats.total_income, 100.0);
        assert_eq!(stats.total_expense, 40.0);
        assert_eq!(stats.balance, 60.0);
    }

    #[test]
    fn empty_input_yields_zero_stats() {
        assert_eq!(aggregate(&[]).unwrap(), PeriodStats::default());
    }

    #[test]
    fn balance_may_go_negative() {
        let stats = aggregate(&[
            tx(1, "25.50", TransactionKind::Income),
            tx(2, "100.25", TransactionKind::Expense),
        ])
        .unwrap();
        assert_eq!(stats.balance, -74.75);
    }

    #[test]
    fn unparseable_amount_fails_the_computation() {
        let err = aggregate(&[
            tx(1, "100", TransactionKind::Income),
            tx(2, "not-a-number", TransactionKind::Expense),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            StatsError::BadAmount {
                id: 2,
                raw: "not-a-number".to_string()
            }
        );
    }

    #[test]
    fn nan_and_infinity_are_rejected() {
        assert!(aggregate(&[tx(1, "NaN", TransactionKind::Income)]).is_err());
        assert!(aggregate(&[tx(1, "inf", TransactionKind::Income)]).is_err());
    }

    #[test]
    fn negative_wire_amount_is_a_data_error() {
        let err = aggregate(&[tx(3, "-5.00", TransactionKind::Expense)]).unwrap_err();
        assert_eq!(
            err,
            StatsError::NegativeAmount {
                id: 3,
                raw: "-5.00".to_string()
            }
        );
    }
}
