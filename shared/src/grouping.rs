//! Grouping of the transaction listing by calendar date.

use chrono::NaiveDate;

use crate::models::Transaction;

/// All transactions sharing one calendar date, in backend return order.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    pub date: NaiveDate,
    pub items: Vec<Transaction>,
}

/// Partitions transactions by exact date and orders the groups most recent
/// first. Within a group the input order is preserved. Empty input yields an
/// empty vec.
pub fn group_by_date(transactions: &[Transaction]) -> Vec<DayGroup> {
    let mut groups: Vec<DayGroup> = Vec::new();

    for tx in transactions {
        match groups.iter_mut().find(|group| group.date == tx.date) {
            Some(group) => group.items.push(tx.clone()),
            None => groups.push(DayGroup {
                date: tx.date,
                items: vec![tx.clone()],
            }),
        }
    }

    groups.sort_by(|a, b| b.date.cmp(&a.date));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;

    fn tx(id: i64, date: &str) -> Transaction {
        Transaction {
            id,
            title: format!("entry {id}"),
            amount: "10".to_string(),
            date: date.parse().unwrap(),
            category: 1,
            category_name: "General".to_string(),
            kind: TransactionKind::Expense,
        }
    }

    #[test]
    fn groups_are_ordered_most_recent_first() {
        let groups = group_by_date(&[
            tx(1, "2024-01-01"),
            tx(2, "2024-01-03"),
            tx(3, "2024-01-02"),
        ]);
        let dates: Vec<String> = groups.iter().map(|g| g.date.to_string()).collect();
        assert_eq!(dates, ["2024-01-03", "2024-01-02", "2024-01-01"]);
    }

    #[test]
    fn items_within_a_group_keep_input_order() {
        let groups = group_by_date(&[
            tx(1, "2024-01-02"),
            tx(2, "2024-01-01"),
            tx(3, "2024-01-02"),
            tx(4, "2024-01-02"),
        ]);
        assert_eq!(groups.len(), 2);
        let ids: Vec<i64> = groups[0].items.iter().map(|t| t.id).collect();
        assert_eq!(ids, [1, 3, 4]);
        assert_eq!(groups[1].items[0].id, 2);
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(group_by_date(&[]).is_empty());
    }

    #[test]
    fn single_date_produces_one_group() {
        let groups = group_by_date(&[tx(1, "2024-05-05"), tx(2, "2024-05-05")]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].items.len(), 2);
    }
}
