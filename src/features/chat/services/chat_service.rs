use std::sync::Arc;
use validator::Validate;

use crate::core::error::Result;
use crate::features::chat::dtos::{
    BackendChatReply, BackendChatRequest, ChatRequestDto, ChatResponseDto,
};
use crate::modules::backend::{BackendClient, CallContext};
use crate::shared::chat::{render_message, MessageParser};

/// Relays visitor questions to the backend assistant and renders the answer
pub struct ChatService {
    backend: Arc<BackendClient>,
    parser: Arc<dyn MessageParser>,
}

impl ChatService {
    pub fn new(backend: Arc<BackendClient>, parser: Arc<dyn MessageParser>) -> Self {
        Self { backend, parser }
    }

    pub async fn ask(&self, ctx: &CallContext, dto: ChatRequestDto) -> Result<ChatResponseDto> {
        dto.validate()?;

        let body = BackendChatRequest::new(&dto);
        tracing::debug!(
            "Chat message ({} chars, {} history turns)",
            body.message.chars().count(),
            body.history.len()
        );

        let answer: BackendChatReply = self.backend.post(ctx, "/chat", &body).await?;
        let rendered = render_message(self.parser.as_ref(), &answer.reply);

        Ok(ChatResponseDto {
            reply: answer.reply,
            rendered,
        })
    }
}
