//! The learning journal: seeded questions and each user's answers.

mod db;
mod domain;
mod handlers;

pub use db::{count_answers, create_journal_tables};
pub use domain::{AnswerId, AnswerText, JournalAnswer, JournalQuestion, QuestionId};
pub use handlers::{
    create_answer_endpoint, delete_answer_endpoint, list_answers_endpoint,
    list_questions_endpoint, update_answer_endpoint,
};
