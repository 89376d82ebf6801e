use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::chat::dtos::{ChatRequestDto, ChatResponseDto};
use crate::features::chat::services::ChatService;
use crate::modules::backend::CallContext;
use crate::shared::types::ApiResponse;

/// Ask the village assistant
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequestDto,
    responses(
        (status = 200, description = "Assistant reply with its rendered form", body = ApiResponse<ChatResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 502, description = "Chat backend error")
    ),
    tag = "chat"
)]
pub async fn chat(
    ctx: CallContext,
    State(service): State<Arc<ChatService>>,
    AppJson(dto): AppJson<ChatRequestDto>,
) -> Result<Json<ApiResponse<ChatResponseDto>>> {
    let response = service.ask(&ctx, dto).await?;
    Ok(Json(ApiResponse::success(Some(response), None, None)))
}
