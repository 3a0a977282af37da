//! Income and expense records and their request payloads.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error, UserId,
    category::CategoryId,
    database_id::DatabaseId,
    endpoints,
    json::{non_blank_text, non_negative_amount, required, required_text},
    ownership::{EXPENSE_TABLE, INCOME_TABLE, OwnedTable},
};

/// Database identifier for an income or expense record.
pub type EntryId = DatabaseId;

/// Which ledger an entry belongs to.
///
/// Income and expenses have the same shape and rules, they only live in
/// different tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Money earned.
    Income,
    /// Money spent.
    Expense,
}

impl EntryKind {
    pub(crate) fn table(self) -> &'static OwnedTable {
        match self {
            EntryKind::Income => &INCOME_TABLE,
            EntryKind::Expense => &EXPENSE_TABLE,
        }
    }

    pub(crate) fn collection_endpoint(self) -> &'static str {
        match self {
            EntryKind::Income => endpoints::USER_INCOMES,
            EntryKind::Expense => endpoints::USER_EXPENSES,
        }
    }

    pub(crate) fn item_endpoint(self) -> &'static str {
        match self {
            EntryKind::Income => endpoints::USER_INCOME,
            EntryKind::Expense => endpoints::USER_EXPENSE,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
        }
    }
}

/// A single income or expense, owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// The ID of the record.
    pub id: EntryId,
    /// The subject identifier of the owning user.
    pub user_id: UserId,
    /// How much money was earned or spent. Never negative.
    pub amount: f64,
    /// The category of the record, `None` once its category has been deleted.
    pub category_id: Option<CategoryId>,
    /// When the money was earned or spent.
    pub date: Date,
    /// A text description of what the record was for.
    pub description: String,
}

/// A validated income or expense that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    /// How much money was earned or spent. Never negative.
    pub amount: f64,
    /// The category of the record.
    pub category_id: CategoryId,
    /// When the money was earned or spent.
    pub date: Date,
    /// A text description of what the record was for.
    pub description: String,
}

/// Request body for creating an entry. Every field is required.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct NewEntryPayload {
    pub amount: Option<f64>,
    pub category_id: Option<CategoryId>,
    pub date: Option<Date>,
    pub description: Option<String>,
}

impl NewEntryPayload {
    /// Check that every required field is present and valid.
    ///
    /// # Errors
    /// Returns [Error::MissingField] for the first absent field or blank
    /// description, or [Error::InvalidField] for a negative amount.
    pub fn validate(self) -> Result<NewEntry, Error> {
        let amount = non_negative_amount(required(self.amount, "amount")?, "amount")?;

        Ok(NewEntry {
            amount,
            category_id: required(self.category_id, "category_id")?,
            date: required(self.date, "date")?,
            description: required_text(self.description, "description")?,
        })
    }
}

/// Request body for a partial update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryChanges {
    pub amount: Option<f64>,
    pub category_id: Option<CategoryId>,
    pub date: Option<Date>,
    pub description: Option<String>,
}

impl EntryChanges {
    /// Check the values of the fields that are present.
    pub fn validate(mut self) -> Result<Self, Error> {
        if let Some(amount) = self.amount {
            non_negative_amount(amount, "amount")?;
        }

        self.description = self
            .description
            .map(|description| non_blank_text(description, "description"))
            .transpose()?;

        Ok(self)
    }
}

#[cfg(test)]
mod new_entry_payload_tests {
    use time::macros::date;

    use crate::{Error, entry::NewEntry};

    use super::{EntryChanges, NewEntryPayload};

    fn complete_payload() -> NewEntryPayload {
        NewEntryPayload {
            amount: Some(50.0),
            category_id: Some(3),
            date: Some(date!(2025 - 04 - 01)),
            description: Some("tutoring".to_owned()),
        }
    }

    #[test]
    fn complete_payload_is_valid() {
        let got = complete_payload().validate();

        assert_eq!(
            got,
            Ok(NewEntry {
                amount: 50.0,
                category_id: 3,
                date: date!(2025 - 04 - 01),
                description: "tutoring".to_owned(),
            })
        );
    }

    #[test]
    fn missing_category_is_reported_by_name() {
        let payload = NewEntryPayload {
            category_id: None,
            ..complete_payload()
        };

        assert_eq!(payload.validate(), Err(Error::MissingField("category_id")));
    }

    #[test]
    fn missing_description_is_reported_by_name() {
        let payload = NewEntryPayload {
            description: None,
            ..complete_payload()
        };

        assert_eq!(payload.validate(), Err(Error::MissingField("description")));
    }

    #[test]
    fn blank_description_is_reported_as_missing() {
        let payload = NewEntryPayload {
            description: Some("   ".to_owned()),
            ..complete_payload()
        };

        assert_eq!(payload.validate(), Err(Error::MissingField("description")));
    }

    #[test]
    fn blank_description_in_changes_is_rejected() {
        let changes = EntryChanges {
            description: Some(String::new()),
            ..Default::default()
        };

        assert_eq!(
            changes.validate(),
            Err(Error::InvalidField {
                field: "description",
                reason: "must not be empty"
            })
        );
    }

    #[test]
    fn negative_amount_in_changes_is_rejected() {
        let changes = EntryChanges {
            amount: Some(-5.0),
            ..Default::default()
        };

        assert!(changes.validate().is_err());
    }
}
