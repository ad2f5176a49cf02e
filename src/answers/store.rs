//! Read-only lookups against the questions_answers table.

use sqlx::{FromRow, PgPool};

use crate::answers::error::AnswerError;

/// Constraint name mapped to a lookup miss instead of a storage failure.
/// Carried over from the previous deployment of this lookup path; flagged
/// for review in DESIGN.md.
const MISS_MAPPED_CONSTRAINT: &str = "users__login_and_event_id_uniq";

/// A stored question/answer pair. Rows are written by migrations or
/// administrative tooling; the bot only reads them.
#[derive(Debug, Clone, FromRow)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
}

/// Query side of the questions_answers table.
pub struct AnswerStore {
    pool: PgPool,
}

impl AnswerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Look up the stored answer whose question equals `question` exactly.
    /// The match is case- and whitespace-sensitive and takes at most one row.
    pub async fn find_answer(&self, question: &str) -> Result<String, AnswerError> {
        let row: QuestionAnswer = sqlx::query_as(
            "SELECT question, answer FROM questions_answers WHERE question = $1 LIMIT 1",
        )
        .bind(question)
        .fetch_one(&self.pool)
        .await
        .map_err(map_lookup_error)?;
        Ok(row.answer)
    }
}

fn map_lookup_error(err: sqlx::Error) -> AnswerError {
    match err {
        sqlx::Error::RowNotFound => AnswerError::not_found(),
        sqlx::Error::Database(db) if db.constraint() == Some(MISS_MAPPED_CONSTRAINT) => {
            AnswerError::not_found()
        }
        other => AnswerError::storage(other),
    }
}
