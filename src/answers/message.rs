/// An inbound text message, detached from the transport's own types.
///
/// Built at the dispatcher boundary so the rest of the pipeline never touches
/// Telegram structs directly.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub message_id: i64,
    pub chat_id: i64,
    /// Telegram user id of the sender; replies are addressed here.
    pub sender_id: i64,
    pub username: String,
    /// The question text, passed through verbatim - no trimming, no casing.
    pub text: String,
}
