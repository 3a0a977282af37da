//! The subject identifier that scopes user-owned records.

use std::fmt::Display;

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

use crate::Error;

/// The stable per-user identifier issued by the identity provider.
///
/// The application does not issue user IDs itself. Whatever non-blank
/// subject the identity provider hands the client is trusted as-is and used
/// to filter every query on user-owned tables.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create a user ID from the identity provider's subject string.
    ///
    /// The subject is kept exactly as given, surrounding whitespace included.
    ///
    /// # Errors
    ///
    /// Returns [Error::MissingField] naming `user_id` if `subject` is empty or only whitespace.
    pub fn new(subject: &str) -> Result<Self, Error> {
        if subject.trim().is_empty() {
            return Err(Error::MissingField("user_id"));
        }

        Ok(Self(subject.to_owned()))
    }

    /// Create a user ID without validation.
    ///
    /// The caller should ensure that the string is not blank.
    pub fn new_unchecked(subject: &str) -> Self {
        Self(subject.to_owned())
    }

    /// The subject string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        UserId::new(&value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl ToSql for UserId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}

impl FromSql for UserId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        String::column_result(value).map(UserId)
    }
}
