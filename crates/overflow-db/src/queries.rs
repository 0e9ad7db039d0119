use std::collections::BTreeMap;

use overflow_types::{Answer, AnswerId, Question, QuestionId, User, UserId};
use rusqlite::{Connection, Row};
use tracing::debug;

use crate::{Result, Store, StoreError};

/// Body given to every question asked through the board.
pub const QUESTION_PLACEHOLDER_BODY: &str = "Any ideas?";

/// New answer ids are `count + ANSWER_ID_OFFSET`, which continues right after
/// the seeded answers (10, 11, 12, 14).
const ANSWER_ID_OFFSET: i64 = 11;

impl Store {
    // -- Users --

    pub fn create_user(&self, nickname: &str) -> Result<UserId> {
        self.with_conn(|conn| {
            let id = count_rows(conn, "users")? + 1;
            conn.execute(
                "INSERT INTO users (id, nickname) VALUES (?1, ?2)",
                (id, nickname),
            )?;
            debug!(user_id = id, "user created");
            Ok(UserId(id))
        })
    }

    pub fn find_user(&self, id: UserId) -> Result<Option<User>> {
        self.with_conn(|conn| query_user(conn, id))
    }

    pub fn nickname_of(&self, id: UserId) -> Result<String> {
        self.find_user(id)?
            .map(|user| user.nickname)
            .ok_or(StoreError::UserNotFound(id))
    }

    // -- Questions --

    /// Stores a question with the placeholder body and returns its id.
    pub fn create_question(&self, asker_id: UserId, title: &str) -> Result<QuestionId> {
        self.with_conn(|conn| {
            if query_user(conn, asker_id)?.is_none() {
                return Err(StoreError::UserNotFound(asker_id));
            }

            let id = count_rows(conn, "questions")? + 1;
            conn.execute(
                "INSERT INTO questions (id, asker_id, title, body) VALUES (?1, ?2, ?3, ?4)",
                (id, asker_id.0, title, QUESTION_PLACEHOLDER_BODY),
            )?;
            debug!(question_id = id, asker_id = asker_id.0, "question created");
            Ok(QuestionId(id))
        })
    }

    pub fn find_question(&self, id: QuestionId) -> Result<Option<Question>> {
        self.with_conn(|conn| query_question(conn, id))
    }

    pub fn question_exists(&self, id: QuestionId) -> Result<bool> {
        Ok(self.find_question(id)?.is_some())
    }

    pub fn all_questions(&self) -> Result<Vec<Question>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, asker_id, title, body FROM questions ORDER BY id")?;
            let rows = stmt
                .query_map([], question_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// `"{id}) {title}"` for every question, ascending by id.
    pub fn question_listing(&self) -> Result<Vec<String>> {
        Ok(self
            .all_questions()?
            .into_iter()
            .map(|q| format!("{}) {}", q.id, q.title))
            .collect())
    }

    // -- Answers --

    /// Stores an answer. The question id is not checked.
    pub fn create_answer(
        &self,
        question_id: QuestionId,
        responder_id: UserId,
        body: &str,
    ) -> Result<AnswerId> {
        self.with_conn(|conn| {
            if query_user(conn, responder_id)?.is_none() {
                return Err(StoreError::UserNotFound(responder_id));
            }

            let id = count_rows(conn, "answers")? + ANSWER_ID_OFFSET;
            conn.execute(
                "INSERT INTO answers (id, question_id, responder_id, body) VALUES (?1, ?2, ?3, ?4)",
                (id, question_id.0, responder_id.0, body),
            )?;
            debug!(answer_id = id, question_id = question_id.0, "answer created");
            Ok(AnswerId(id))
        })
    }

    pub fn find_answer(&self, id: AnswerId) -> Result<Option<Answer>> {
        self.with_conn(|conn| query_answer(conn, id))
    }

    pub fn answer_exists(&self, id: AnswerId) -> Result<bool> {
        Ok(self.find_answer(id)?.is_some())
    }

    /// All answers to a question, keyed by their own ids.
    pub fn answers_for_question(
        &self,
        question_id: QuestionId,
    ) -> Result<BTreeMap<AnswerId, Answer>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, question_id, responder_id, body
                 FROM answers
                 WHERE question_id = ?1
                 ORDER BY id",
            )?;
            let answers = stmt
                .query_map([question_id.0], answer_from_row)?
                .map(|row| row.map(|answer| (answer.id, answer)))
                .collect::<std::result::Result<BTreeMap<_, _>, _>>()?;
            Ok(answers)
        })
    }
}

fn count_rows(conn: &Connection, table: &str) -> Result<i64> {
    let count = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
        row.get(0)
    })?;
    Ok(count)
}

pub(crate) fn query_user(conn: &Connection, id: UserId) -> Result<Option<User>> {
    conn.query_row(
        "SELECT id, nickname FROM users WHERE id = ?1",
        [id.0],
        |row| {
            Ok(User {
                id: UserId(row.get(0)?),
                nickname: row.get(1)?,
            })
        },
    )
    .optional()
}

pub(crate) fn query_question(conn: &Connection, id: QuestionId) -> Result<Option<Question>> {
    conn.query_row(
        "SELECT id, asker_id, title, body FROM questions WHERE id = ?1",
        [id.0],
        question_from_row,
    )
    .optional()
}

pub(crate) fn query_answer(conn: &Connection, id: AnswerId) -> Result<Option<Answer>> {
    conn.query_row(
        "SELECT id, question_id, responder_id, body FROM answers WHERE id = ?1",
        [id.0],
        answer_from_row,
    )
    .optional()
}

fn question_from_row(row: &Row<'_>) -> rusqlite::Result<Question> {
    Ok(Question {
        id: QuestionId(row.get(0)?),
        asker_id: UserId(row.get(1)?),
        title: row.get(2)?,
        body: row.get(3)?,
    })
}

fn answer_from_row(row: &Row<'_>) -> rusqlite::Result<Answer> {
    Ok(Answer {
        id: AnswerId(row.get(0)?),
        question_id: QuestionId(row.get(1)?),
        responder_id: UserId(row.get(2)?),
        body: row.get(3)?,
    })
}

/// Extension trait for optional query results
pub(crate) trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
