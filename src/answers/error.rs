use thiserror::Error;

/// Errors surfaced by the answer pipeline.
///
/// Each variant can carry a user-facing message; the handler sends it to the
/// chat when present and falls back to a generic sentence otherwise.
#[derive(Debug, Error)]
pub enum AnswerError {
    /// No stored answer matches the question.
    #[error("no stored answer matches the question")]
    NotFound { user_message: Option<String> },

    /// The lookup itself failed; the stored data was never consulted.
    #[error("storage failure: {source}")]
    Storage {
        source: sqlx::Error,
        user_message: Option<String>,
    },

    /// An outbound reply could not be delivered.
    #[error("send failure: {cause}")]
    Send {
        cause: String,
        user_message: Option<String>,
    },
}

impl AnswerError {
    pub fn not_found() -> Self {
        Self::NotFound { user_message: None }
    }

    pub fn storage(source: sqlx::Error) -> Self {
        Self::Storage { source, user_message: None }
    }

    pub fn send(cause: impl Into<String>) -> Self {
        Self::Send { cause: cause.into(), user_message: None }
    }

    /// Attach a message to show the user instead of the generic fallback.
    pub fn with_user_message(mut self, message: impl Into<String>) -> Self {
        let slot = match &mut self {
            Self::NotFound { user_message }
            | Self::Storage { user_message, .. }
            | Self::Send { user_message, .. } => user_message,
        };
        *slot = Some(message.into());
        self
    }

    pub fn user_message(&self) -> Option<&str> {
        match self {
            Self::NotFound { user_message }
            | Self::Storage { user_message, .. }
            | Self::Send { user_message, .. } => user_message.as_deref(),
        }
    }
}
