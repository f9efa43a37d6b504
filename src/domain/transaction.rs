use std::fmt;

use serde::{Deserialize, Serialize};

use super::category::Category;

/// Store-scoped identifier assigned from a monotonically increasing counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub u64);

impl TransactionId {
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TransactionId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Self)
    }
}

/// Direction of money flow. The amount itself is always a magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    /// Strict parse used by the entry form.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "income" | "in" | "+" => Some(TransactionKind::Income),
            "expense" | "out" | "-" => Some(TransactionKind::Expense),
            _ => None,
        }
    }

    /// Anything that is not `income` counts against the balance.
    pub fn parse_lenient(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("income") {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        }
    }

    pub fn sign(self) -> char {
        match self {
            TransactionKind::Income => '+',
            TransactionKind::Expense => '-',
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single ledger entry. Never edited in place; deletion and re-entry is the
/// only way to change one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(rename = "type", default)]
    pub kind: TransactionKind,
    #[serde(default)]
    pub category: Category,
    /// Already formatted for display.
    #[serde(default)]
    pub date: String,
}

impl Transaction {
    /// Amount with the sign implied by `kind`.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

/// Field values of a transaction that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub title: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: Category,
    pub date: String,
}

impl TransactionDraft {
    pub fn into_transaction(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            title: self.title,
            amount: self.amount,
            kind: self.kind,
            category: self.category,
            date: self.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_shape_uses_type_key() {
        let txn = Transaction {
            id: TransactionId(7),
            title: "Salary".into(),
            amount: 5000.0,
            kind: TransactionKind::Income,
            category: Category::Salary,
            date: "1 Jan 2024".into(),
        };
        let value = serde_json::to_value(&txn).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["type"], "income");
        assert_eq!(value["category"], "salary");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let txn: Transaction = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert_eq!(txn.title, "");
        assert_eq!(txn.amount, 0.0);
        assert_eq!(txn.kind, TransactionKind::Expense);
        assert_eq!(txn.category, Category::Other);
    }

    #[test]
    fn lenient_kind_treats_unknown_as_expense() {
        assert_eq!(TransactionKind::parse_lenient("Income"), TransactionKind::Income);
        assert_eq!(TransactionKind::parse_lenient("refund"), TransactionKind::Expense);
        assert_eq!(TransactionKind::parse("refund"), None);
    }
}
