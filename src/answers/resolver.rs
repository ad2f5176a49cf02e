use async_trait::async_trait;

use crate::answers::error::AnswerError;
use crate::answers::store::AnswerStore;

/// Capability of finding an answer for a question. The endpoint depends on
/// this trait, not on the concrete store, so a test double can stand in.
#[async_trait]
pub trait AnswerResolver: Send + Sync {
    async fn find_answer(&self, question: &str) -> Result<String, AnswerError>;
}

/// Production resolver; delegates straight to the store.
pub struct AnswerQueries {
    store: AnswerStore,
}

impl AnswerQueries {
    pub fn new(store: AnswerStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AnswerResolver for AnswerQueries {
    async fn find_answer(&self, question: &str) -> Result<String, AnswerError> {
        self.store.find_answer(question).await
    }
}
