use serde::{Deserialize, Serialize};

use crate::usecases::contracts::ChatReply;

#[derive(Debug, Serialize)]
pub struct AnalyzeRequestBody<'a> {
    pub session_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ChatRequestBody<'a> {
    pub session_id: &'a str,
    pub message: &'a str,
}

/// Chat reply as sent by the service. The accompanying `role` field is always
/// "assistant" and is ignored.
#[derive(Debug, Deserialize)]
pub struct ChatResponseBody {
    pub content: String,
}

impl From<ChatResponseBody> for ChatReply {
    fn from(body: ChatResponseBody) -> Self {
        ChatReply::new(body.content)
    }
}
