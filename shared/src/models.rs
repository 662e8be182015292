use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single income or expense entry as returned by `GET expenses/`.
///
/// The backend serializes `amount` as a decimal string (e.g. `"1250.50"`);
/// it is kept as a string here and only parsed at the aggregation boundary
/// so a malformed value is an explicit error rather than a silent zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub title: String,
    /// Decimal amount as sent on the wire; always non-negative, the sign is
    /// carried by `kind`.
    pub amount: String,
    /// Calendar date of the entry (YYYY-MM-DD).
    pub date: NaiveDate,
    /// ID of the category this entry belongs to.
    pub category: i64,
    /// Read-only category name denormalized by the backend.
    #[serde(default)]
    pub category_name: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

/// Whether an entry adds to or subtracts from the balance.
///
/// Deserialization rejects any value other than `"income"` or `"expense"`,
/// so an unknown type never reaches the aggregation logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// An expense category. Categories with `user == None` are backend-provided
/// defaults and cannot be renamed or deleted by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub user: Option<i64>,
}

impl Category {
    /// Whether this category belongs to the current user (and is editable).
    pub fn is_user_owned(&self) -> bool {
        self.user.is_some()
    }
}

/// Body for `POST token/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response from `POST token/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access: String,
}

/// Body for `POST signup/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

/// Response from `POST signup/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupResponse {
    pub message: String,
}

/// Body for `POST expenses/` and `PUT expenses/{id}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpensePayload {
    pub title: String,
    pub amount: String,
    pub date: NaiveDate,
    pub category: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

/// Body for `POST categories/` and `PUT categories/{id}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json(kind: &str) -> String {
        format!(
            r#"{{
                "id": 7,
                "title": "Groceries",
                "amount": "420.50",
                "date": "2024-03-09",
                "category": 2,
                "category_name": "Food",
                "type": "{kind}"
            }}"#
        )
    }

    #[test]
    fn deserializes_expense_transaction() {
        let tx: Transaction = serde_json::from_str(&sample_json("expense")).unwrap();
        assert_eq!(tx.id, 7);
        assert_eq!(tx.amount, "420.50");
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert_eq!(tx.kind, TransactionKind::Expense);
        assert_eq!(tx.category_name, "Food");
    }

    #[test]
    fn rejects_unknown_transaction_type() {
        let result = serde_json::from_str::<Transaction>(&sample_json("transfer"));
        assert!(result.is_err());
    }

    #[test]
    fn expense_payload_serializes_type_field() {
        let payload = ExpensePayload {
            title: "Salary".to_string(),
            amount: "1000".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            category: 1,
            kind: TransactionKind::Income,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "income");
        assert_eq!(json["date"], "2024-01-31");
    }

    #[test]
    fn default_category_is_not_user_owned() {
        let cat: Category = serde_json::from_str(r#"{"id": 1, "name": "Rent", "user": null}"#).unwrap();
        assert!(!cat.is_user_owned());

        let owned: Category = serde_json::from_str(r#"{"id": 2, "name": "Hobby", "user": 5}"#).unwrap();
        assert!(owned.is_user_owned());
    }
}
