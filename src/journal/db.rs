//! Database operations for journal questions and answers.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error, UserId,
    db::is_constraint_violation,
    journal::{AnswerId, AnswerText, JournalAnswer, JournalQuestion, QuestionId},
    ownership::JOURNAL_ANSWER_TABLE,
};

/// The questions every new database starts with.
const SEED_QUESTIONS: [&str; 6] = [
    "What is one money habit you want to build this month?",
    "What was your most satisfying purchase recently, and why?",
    "What is a purchase you regret, and what would you do differently?",
    "What does financial security mean to you?",
    "What is one thing you learned about budgeting this week?",
    "Which of your savings goals matters most right now, and why?",
];

const ANSWER_QUERY: &str = "SELECT a.id, a.user_id, a.question_id, a.answer, a.created_at, q.question
    FROM journal_answer a
    INNER JOIN journal_question q ON q.id = a.question_id";

/// Retrieve every journal question in seed order.
pub fn get_questions(connection: &Connection) -> Result<Vec<JournalQuestion>, Error> {
    connection
        .prepare("SELECT id, question FROM journal_question ORDER BY id ASC")?
        .query_map([], |row| {
            Ok(JournalQuestion {
                id: row.get(0)?,
                question: row.get(1)?,
            })
        })?
        .map(|maybe_question| maybe_question.map_err(|error| error.into()))
        .collect()
}

/// Retrieve a user's answers, newest first.
pub fn get_answers(user_id: &UserId, connection: &Connection) -> Result<Vec<JournalAnswer>, Error> {
    connection
        .prepare(&format!(
            "{ANSWER_QUERY} WHERE a.user_id = ?1 ORDER BY a.created_at DESC, a.id DESC"
        ))?
        .query_map([user_id], map_answer_row)?
        .map(|maybe_answer| maybe_answer.map_err(|error| error.into()))
        .collect()
}

fn get_answer(
    answer_id: AnswerId,
    user_id: &UserId,
    connection: &Connection,
) -> Result<JournalAnswer, Error> {
    connection
        .prepare(&format!("{ANSWER_QUERY} WHERE a.id = ?1 AND a.user_id = ?2"))?
        .query_row((answer_id, user_id), map_answer_row)
        .map_err(|error| error.into())
}

/// Store a user's answer to a question.
///
/// The store allows one answer per user and question. A second answer is
/// rejected by the table's unique constraint rather than by a prior lookup,
/// so concurrent duplicate submissions cannot both succeed.
///
/// # Errors
/// This function will return a:
/// - [Error::DuplicateJournalAnswer] if the user already answered the question,
/// - [Error::InvalidQuestion] if `question_id` does not refer to a question,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_answer(
    user_id: &UserId,
    question_id: QuestionId,
    answer: AnswerText,
    connection: &Connection,
) -> Result<JournalAnswer, Error> {
    let answer_id: AnswerId = connection
        .prepare(
            "INSERT INTO journal_answer (user_id, question_id, answer, created_at)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id",
        )?
        .query_row(
            (user_id, question_id, answer.as_ref(), OffsetDateTime::now_utc()),
            |row| row.get(0),
        )
        .map_err(|error| {
            if is_constraint_violation(&error, rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE) {
                Error::DuplicateJournalAnswer
            } else if is_constraint_violation(&error, rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY)
            {
                Error::InvalidQuestion(question_id)
            } else {
                error.into()
            }
        })?;

    get_answer(answer_id, user_id, connection)
}

/// Replace the text of a user's answer.
///
/// # Errors
/// Returns [Error::NotFound] if the answer does not exist or belongs to another user.
pub fn update_answer(
    answer_id: AnswerId,
    user_id: &UserId,
    answer: AnswerText,
    connection: &Connection,
) -> Result<JournalAnswer, Error> {
    let rows_affected = connection.execute(
        "UPDATE journal_answer SET answer = ?1 WHERE id = ?2 AND user_id = ?3",
        (answer.as_ref(), answer_id, user_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    get_answer(answer_id, user_id, connection)
}

/// Delete a user's answer.
///
/// # Errors
/// Returns [Error::NotFound] if the answer does not exist or belongs to another user.
pub fn delete_answer(
    answer_id: AnswerId,
    user_id: &UserId,
    connection: &Connection,
) -> Result<(), Error> {
    JOURNAL_ANSWER_TABLE.delete(answer_id, user_id, connection)
}

/// Count how many questions a user has answered.
pub fn count_answers(user_id: &UserId, connection: &Connection) -> Result<u64, Error> {
    JOURNAL_ANSWER_TABLE.count(user_id, connection)
}

/// Initialize the journal tables and seed the questions.
///
/// Seeding is idempotent: questions that already exist are left alone.
pub fn create_journal_tables(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS journal_question (
            id INTEGER PRIMARY KEY,
            question TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS journal_answer (
            id INTEGER PRIMARY KEY,
            user_id TEXT NOT NULL,
            question_id INTEGER NOT NULL,
            answer TEXT NOT NULL,
            created_at TEXT NOT NULL,
            UNIQUE(user_id, question_id),
            FOREIGN KEY(question_id) REFERENCES journal_question(id) ON UPDATE CASCADE ON DELETE CASCADE
        );",
    )?;

    let mut statement =
        connection.prepare("INSERT OR IGNORE INTO journal_question (question) VALUES (?1)")?;

    for question in SEED_QUESTIONS {
        statement.execute([question])?;
    }

    Ok(())
}

fn map_answer_row(row: &Row) -> Result<JournalAnswer, rusqlite::Error> {
    Ok(JournalAnswer {
        id: row.get(0)?,
        user_id: row.get(1)?,
        question_id: row.get(2)?,
        answer: row.get(3)?,
        created_at: row.get(4)?,
        question: row.get(5)?,
    })
}

#[cfg(test)]
mod journal_query_tests {
    use rusqlite::Connection;

    use crate::{
        Error, UserId,
        db::initialize,
        journal::AnswerText,
    };

    use super::{
        SEED_QUESTIONS, count_answers, create_answer, delete_answer, get_answers, get_questions,
        update_answer,
    };

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize database");
        connection
    }

    fn text(answer: &str) -> AnswerText {
        AnswerText::new(answer).unwrap()
    }

    #[test]
    fn questions_are_seeded_in_order() {
        let connection = get_test_db_connection();

        let questions = get_questions(&connection).unwrap();

        assert_eq!(questions.len(), SEED_QUESTIONS.len());
        assert_eq!(questions[0].question, SEED_QUESTIONS[0]);
    }

    #[test]
    fn create_answer_joins_question_text() {
        let connection = get_test_db_connection();
        let user_id = UserId::new_unchecked("u1");

        let answer = create_answer(&user_id, 1, text("Cook at home"), &connection)
            .expect("Could not create answer");

        assert_eq!(answer.user_id, user_id);
        assert_eq!(answer.question_id, 1);
        assert_eq!(answer.answer, "Cook at home");
        assert_eq!(answer.question, SEED_QUESTIONS[0]);
    }

    #[test]
    fn second_answer_to_same_question_is_a_conflict() {
        let connection = get_test_db_connection();
        let user_id = UserId::new_unchecked("u1");
        create_answer(&user_id, 2, text("First"), &connection).unwrap();

        let result = create_answer(&user_id, 2, text("Second"), &connection);

        assert_eq!(result, Err(Error::DuplicateJournalAnswer));
        assert_eq!(count_answers(&user_id, &connection), Ok(1));
    }

    #[test]
    fn different_users_can_answer_the_same_question() {
        let connection = get_test_db_connection();

        create_answer(&UserId::new_unchecked("u1"), 2, text("Mine"), &connection).unwrap();
        let result = create_answer(&UserId::new_unchecked("u2"), 2, text("Theirs"), &connection);

        assert!(result.is_ok());
    }

    #[test]
    fn answer_to_unknown_question_is_rejected() {
        let connection = get_test_db_connection();

        let result = create_answer(&UserId::new_unchecked("u1"), 999, text("?"), &connection);

        assert_eq!(result, Err(Error::InvalidQuestion(999)));
    }

    #[test]
    fn create_then_update_leaves_one_answer() {
        let connection = get_test_db_connection();
        let user_id = UserId::new_unchecked("u1");
        let created = create_answer(&user_id, 3, text("Draft"), &connection).unwrap();

        let updated = update_answer(created.id, &user_id, text("Final"), &connection)
            .expect("Could not update answer");

        assert_eq!(updated.answer, "Final");
        assert_eq!(updated.created_at, created.created_at);
        let answers = get_answers(&user_id, &connection).unwrap();
        assert_eq!(answers, vec![updated]);
    }

    #[test]
    fn update_of_another_users_answer_is_not_found() {
        let connection = get_test_db_connection();
        let owner = UserId::new_unchecked("u1");
        let created = create_answer(&owner, 3, text("Mine"), &connection).unwrap();

        let other_user = UserId::new_unchecked("u2");
        let result = update_answer(created.id, &other_user, text("Hijack"), &connection);

        assert_eq!(result, Err(Error::NotFound));
        assert_eq!(
            get_answers(&UserId::new_unchecked("u1"), &connection).unwrap()[0].answer,
            "Mine"
        );
    }

    #[test]
    fn delete_answer_twice_is_not_found() {
        let connection = get_test_db_connection();
        let user_id = UserId::new_unchecked("u1");
        let created = create_answer(&user_id, 4, text("Gone soon"), &connection).unwrap();

        assert_eq!(delete_answer(created.id, &user_id, &connection), Ok(()));
        assert_eq!(
            delete_answer(created.id, &user_id, &connection),
            Err(Error::NotFound)
        );
    }
}
