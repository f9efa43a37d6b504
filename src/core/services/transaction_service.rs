//! Validation of raw entry-form input into ledger drafts.

use chrono::NaiveDate;

use crate::core::services::{ServiceError, ServiceResult};
use crate::currency::CurrencyFormatter;
use crate::domain::{transaction::TransactionDraft, Category, TransactionKind};

/// Raw values as typed by the user. Nothing is trusted until
/// [`TransactionService::validate`] accepts it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionForm {
    pub title: String,
    pub amount: String,
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
}

impl TransactionForm {
    /// Blank form with the date prefilled to `today`.
    pub fn new(today: NaiveDate) -> Self {
        let mut form = Self::default();
        form.reset(today);
        form
    }

    /// Clears every field, drops the type selection, and re-seeds the date.
    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self {
            date: Some(today.format("%Y-%m-%d").to_string()),
            ..Self::default()
        };
    }
}

/// Provides the presence checks that guard ledger insertion.
pub struct TransactionService;

impl TransactionService {
    /// Checks required fields and normalizes the date into the locale's
    /// display string.
    pub fn validate(
        form: &TransactionForm,
        formatter: &CurrencyFormatter,
    ) -> ServiceResult<TransactionDraft> {
        let kind = form
            .kind
            .ok_or_else(|| ServiceError::Invalid("Select Income or Expense".into()))?;

        let mut missing = Vec::new();

        let title = form.title.trim();
        if title.is_empty() {
            missing.push("title");
        }

        let amount = parse_amount(&form.amount);
        if amount.is_none() {
            missing.push("amount");
        }

        let category = form
            .category
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty());
        if category.is_none() {
            missing.push("category");
        }

        let date = form
            .date
            .as_deref()
            .and_then(|value| NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok());
        if date.is_none() {
            missing.push("date");
        }

        match (amount, category, date) {
            (Some(amount), Some(category), Some(date)) if missing.is_empty() => {
                Ok(TransactionDraft {
                    title: title.to_string(),
                    amount,
                    kind,
                    category: Category::parse(category),
                    date: formatter.format_date(date),
                })
            }
            _ => Err(ServiceError::Invalid(format!(
                "Please fill all fields (missing or invalid: {})",
                missing.join(", ")
            ))),
        }
    }
}

/// A usable amount is a finite number greater than zero.
fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::LocalePreset;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn filled_form() -> TransactionForm {
        TransactionForm {
            title: "Salary".into(),
            amount: "5000".into(),
            kind: Some(TransactionKind::Income),
            category: Some("salary".into()),
            date: Some("2024-01-01".into()),
        }
    }

    #[test]
    fn valid_form_yields_draft_with_display_date() {
        let formatter = CurrencyFormatter::new(LocalePreset::EnIn);
        let draft = TransactionService::validate(&filled_form(), &formatter).unwrap();
        assert_eq!(draft.title, "Salary");
        assert_eq!(draft.amount, 5000.0);
        assert_eq!(draft.kind, TransactionKind::Income);
        assert_eq!(draft.category, Category::Salary);
        assert_eq!(draft.date, "1 Jan 2024");
    }

    #[test]
    fn missing_kind_is_reported_first() {
        let form = TransactionForm {
            kind: None,
            amount: String::new(),
            ..filled_form()
        };
        let err = TransactionService::validate(&form, &CurrencyFormatter::default()).unwrap_err();
        assert!(err.to_string().contains("Income or Expense"), "{err}");
    }

    #[test]
    fn empty_and_zero_amounts_are_rejected() {
        for amount in ["", "abc", "0", "-5", "NaN"] {
            let form = TransactionForm {
                amount: amount.into(),
                ..filled_form()
            };
            let err =
                TransactionService::validate(&form, &CurrencyFormatter::default()).unwrap_err();
            assert!(err.to_string().contains("amount"), "{amount}: {err}");
        }
    }

    #[test]
    fn blank_title_category_and_bad_date_are_all_listed() {
        let form = TransactionForm {
            title: "   ".into(),
            category: Some(String::new()),
            date: Some("01/02/2024".into()),
            ..filled_form()
        };
        let message = TransactionService::validate(&form, &CurrencyFormatter::default())
            .unwrap_err()
            .to_string();
        for field in ["title", "category", "date"] {
            assert!(message.contains(field), "{message}");
        }
    }

    #[test]
    fn reset_clears_fields_and_reseeds_date() {
        let mut form = filled_form();
        form.reset(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());
        assert!(form.title.is_empty());
        assert!(form.amount.is_empty());
        assert_eq!(form.kind, None);
        assert_eq!(form.category, None);
        assert_eq!(form.date.as_deref(), Some("2025-06-30"));
        assert_eq!(TransactionForm::new(today()).date.as_deref(), Some("2024-01-01"));
    }
}
