use std::sync::Arc;

use crate::answers::error::AnswerError;
use crate::answers::message::InboundMessage;
use crate::answers::resolver::AnswerResolver;

/// Adapts inbound chat messages into resolver calls.
pub struct Endpoints {
    queries: Arc<dyn AnswerResolver>,
}

impl Endpoints {
    pub fn new(queries: Arc<dyn AnswerResolver>) -> Self {
        Self { queries }
    }

    /// Forward the message text to the resolver. The text is not validated;
    /// an empty question is looked up like any other.
    pub async fn text_questions(&self, message: &InboundMessage) -> Result<String, AnswerError> {
        self.queries.find_answer(&message.text).await
    }
}
