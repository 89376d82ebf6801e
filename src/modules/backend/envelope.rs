use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::error::BackendError;

/// Response wrapper used by every backend endpoint:
/// `{ "success": bool, "data": T?, "message": string? }`
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Shape used to salvage a message from bodies whose `data` does not match `T`
#[derive(Debug, Deserialize)]
struct MessageOnly {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

fn fallback_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<MessageOnly>(body)
        .ok()
        .and_then(|m| m.message.or(m.error))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unexpected backend response")
                .to_string()
        })
}

/// Decode a backend response body into its payload.
///
/// Non-2xx statuses and `success: false` become errors carrying the
/// backend's message.
pub fn decode<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> Result<Option<T>, BackendError> {
    if !status.is_success() {
        let message = fallback_message(status, body);
        return Err(match status.as_u16() {
            400 | 422 => BackendError::Validation(message),
            code => BackendError::Server {
                status: code,
                message,
            },
        });
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let envelope: Envelope<T> = serde_json::from_slice(body).map_err(|e| {
        tracing::error!("Failed to parse backend response: {}", e);
        BackendError::Server {
            status: StatusCode::BAD_GATEWAY.as_u16(),
            message: format!("Invalid backend response: {}", e),
        }
    })?;

    if envelope.success == Some(false) {
        return Err(BackendError::Server {
            status: status.as_u16(),
            message: envelope
                .message
                .unwrap_or_else(|| "Permintaan ditolak".to_string()),
        });
    }

    Ok(envelope.data)
}
