use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::shared::chat::RenderedMessage;
use crate::shared::constants::{MAX_CHAT_HISTORY, MAX_CHAT_MESSAGE_CHARS};
use crate::shared::validation::not_blank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One earlier turn of the conversation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ChatRequestDto {
    #[validate(
        custom(function = "not_blank"),
        length(max = MAX_CHAT_MESSAGE_CHARS, message = "Pesan maksimal 2000 karakter")
    )]
    pub message: String,

    /// Earlier turns, oldest first; only the most recent ones are forwarded
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

/// Body sent to the backend chat endpoint
#[derive(Debug, Serialize)]
pub struct BackendChatRequest<'a> {
    pub message: &'a str,
    pub history: &'a [ChatTurn],
}

impl<'a> BackendChatRequest<'a> {
    pub fn new(dto: &'a ChatRequestDto) -> Self {
        let skip = dto.history.len().saturating_sub(MAX_CHAT_HISTORY);
        Self {
            message: dto.message.trim(),
            history: &dto.history[skip..],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BackendChatReply {
    #[serde(alias = "response", alias = "message")]
    pub reply: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChatResponseDto {
    /// Raw assistant text
    pub reply: String,
    pub rendered: RenderedMessage,
}
