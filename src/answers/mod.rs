//! Answer pipeline - maps inbound question text to stored answers.

pub mod endpoint;
pub mod error;
pub mod handler;
pub mod message;
pub mod resolver;
pub mod store;
pub mod telegram;

pub use endpoint::Endpoints;
pub use error::AnswerError;
pub use handler::{FALLBACK_REPLY, Handlers, MessageSender};
pub use message::InboundMessage;
pub use resolver::{AnswerQueries, AnswerResolver};
pub use store::AnswerStore;
pub use telegram::TelegramSender;
