use thiserror::Error;

/// Failure of a call to the village backend
#[derive(Debug, Error)]
pub enum BackendError {
    /// Backend rejected the input (HTTP 400/422)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Backend unreachable, timed out, or the response could not be read
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a failure status or `success: false`
    #[error("Backend error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    /// The caller's cancellation token fired before the call finished
    #[error("Request cancelled")]
    Cancelled,
}

impl BackendError {
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BackendError::Network(format!("Request timed out: {}", err))
        } else {
            BackendError::Network(err.to_string())
        }
    }
}
