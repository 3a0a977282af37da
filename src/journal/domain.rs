//! Learning journal types and their camelCase wire representation.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error, UserId,
    database_id::DatabaseId,
    json::{required, required_text},
};

/// Database identifier for a journal question.
pub type QuestionId = DatabaseId;

/// Database identifier for a journal answer.
pub type AnswerId = DatabaseId;

/// A reflective prompt seeded into the database. Users cannot change questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalQuestion {
    pub id: QuestionId,
    pub question: String,
}

/// A user's answer to a journal question, with the question text joined in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalAnswer {
    pub id: AnswerId,
    pub user_id: UserId,
    pub question_id: QuestionId,
    pub answer: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// The text of the question being answered.
    pub question: String,
}

/// The trimmed, non-empty text of an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerText(String);

impl AnswerText {
    /// Create answer text, removing surrounding whitespace.
    ///
    /// # Errors
    /// Returns [Error::EmptyAnswer] if `text` is empty or only whitespace.
    pub fn new(text: &str) -> Result<Self, Error> {
        let text = text.trim();

        if text.is_empty() {
            return Err(Error::EmptyAnswer);
        }

        Ok(Self(text.to_owned()))
    }
}

impl AsRef<str> for AnswerText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Query string for listing answers, `?userId=...`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswersQuery {
    pub user_id: Option<String>,
}

impl AnswersQuery {
    /// The subject to list answers for.
    ///
    /// # Errors
    /// Returns [Error::MissingField] naming `userId` if it is absent or blank.
    pub fn validate(self) -> Result<UserId, Error> {
        required_user_id(self.user_id)
    }
}

fn required_user_id(user_id: Option<String>) -> Result<UserId, Error> {
    required_text(user_id, "userId").map(|user_id| UserId::new_unchecked(&user_id))
}

/// Request body for answering a question.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnswerPayload {
    pub user_id: Option<String>,
    pub question_id: Option<QuestionId>,
    pub answer: Option<String>,
}

impl NewAnswerPayload {
    /// Check that every field is present and the answer is not blank.
    pub fn validate(self) -> Result<(UserId, QuestionId, AnswerText), Error> {
        let user_id = required_user_id(self.user_id)?;
        let question_id = required(self.question_id, "questionId")?;
        let answer = AnswerText::new(&required(self.answer, "answer")?)?;

        Ok((user_id, question_id, answer))
    }
}

/// Request body for rewriting an answer.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAnswerPayload {
    pub user_id: Option<String>,
    pub answer: Option<String>,
}

impl UpdateAnswerPayload {
    /// Check that both fields are present and the answer is not blank.
    pub fn validate(self) -> Result<(UserId, AnswerText), Error> {
        let answer = AnswerText::new(&required(self.answer, "answer")?)?;
        let user_id = required_user_id(self.user_id)?;

        Ok((user_id, answer))
    }
}

/// Request body for deleting an answer.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAnswerPayload {
    pub user_id: Option<String>,
}

impl DeleteAnswerPayload {
    /// The subject that owns the answer.
    pub fn validate(self) -> Result<UserId, Error> {
        required_user_id(self.user_id)
    }
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<JournalQuestion>,
}

#[derive(Debug, Serialize)]
pub struct AnswersResponse {
    pub answers: Vec<JournalAnswer>,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub answer: JournalAnswer,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod journal_wire_tests {
    use serde_json::json;
    use time::macros::datetime;

    use crate::{Error, UserId};

    use super::{AnswerText, AnswersQuery, JournalAnswer, NewAnswerPayload};

    #[test]
    fn answer_serializes_with_camel_case_keys() {
        let answer = JournalAnswer {
            id: 7,
            user_id: UserId::new_unchecked("u1"),
            question_id: 2,
            answer: "Track every coffee".to_owned(),
            created_at: datetime!(2025-04-01 09:30 UTC),
            question: "What habit?".to_owned(),
        };

        let got = serde_json::to_value(&answer).unwrap();

        assert_eq!(
            got,
            json!({
                "id": 7,
                "userId": "u1",
                "questionId": 2,
                "answer": "Track every coffee",
                "createdAt": "2025-04-01T09:30:00Z",
                "question": "What habit?",
            })
        );
    }

    #[test]
    fn payload_reads_camel_case_keys() {
        let payload: NewAnswerPayload = serde_json::from_value(json!({
            "userId": "u1",
            "questionId": 3,
            "answer": "  Spend less on takeaways  ",
        }))
        .unwrap();

        let (user_id, question_id, answer) = payload.validate().unwrap();

        assert_eq!(user_id, UserId::new_unchecked("u1"));
        assert_eq!(question_id, 3);
        assert_eq!(answer.as_ref(), "Spend less on takeaways");
    }

    #[test]
    fn snake_case_keys_are_not_accepted_as_fields() {
        let payload: NewAnswerPayload = serde_json::from_value(json!({
            "user_id": "u1",
            "questionId": 3,
            "answer": "x",
        }))
        .unwrap();

        assert_eq!(payload.validate().err(), Some(Error::MissingField("userId")));
    }

    #[test]
    fn blank_answer_is_rejected() {
        assert_eq!(AnswerText::new(" \n"), Err(Error::EmptyAnswer));
    }

    #[test]
    fn empty_user_id_is_reported_as_missing() {
        let payload: NewAnswerPayload = serde_json::from_value(json!({
            "userId": "",
            "questionId": 1,
            "answer": "x",
        }))
        .unwrap();

        assert_eq!(payload.validate().err(), Some(Error::MissingField("userId")));
    }

    #[test]
    fn blank_user_id_query_is_reported_as_missing() {
        let query = AnswersQuery {
            user_id: Some("  ".to_owned()),
        };

        assert_eq!(query.validate(), Err(Error::MissingField("userId")));
    }
}
