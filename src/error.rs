//! API Errors
//!
//! Every backend call resolves to `Result<T, ApiError>`. For display the
//! kinds are not distinguished: the server message is shown when there is
//! one, a generic fallback otherwise.

use serde::Deserialize;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Generic message shown when the server gave none
pub const FALLBACK_MESSAGE: &str = "Request failed, please try again";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// Response body did not match the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// 401 from the backend; the token has been cleared
    #[error("Session expired")]
    Unauthorized,

    /// Non-2xx status
    #[error("Server error {status}: {}", .message.as_deref().unwrap_or(FALLBACK_MESSAGE))]
    Server { status: u16, message: Option<String> },

    /// 2xx with `success: false` in the envelope
    #[error("Rejected: {}", .message.as_deref().unwrap_or(FALLBACK_MESSAGE))]
    Rejected { message: Option<String> },

    /// Browser API (storage, file reading) failed
    #[error("Browser error: {0}")]
    Browser(String),
}

impl ApiError {
    /// Message suitable for an alert or inline banner
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message: Some(m), .. } | ApiError::Rejected { message: Some(m) } => m.clone(),
            ApiError::Unauthorized => "Your session has expired, please sign in again".to_string(),
            _ => FALLBACK_MESSAGE.to_string(),
        }
    }

    /// Build a server error from a status and raw response body
    pub fn from_response(status: u16, body: &str) -> Self {
        ApiError::Server { status, message: server_message(body) }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Extract the `message` (or `error`) field of a JSON error body
pub fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_prefers_message_field() {
        let body = r#"{"success":false,"message":"Project not found","error":"Not Found"}"#;
        assert_eq!(server_message(body).as_deref(), Some("Project not found"));
        assert_eq!(server_message(r#"{"error":"Bad Request"}"#).as_deref(), Some("Bad Request"));
        assert_eq!(server_message("<html>502</html>"), None);
        assert_eq!(server_message(r#"{"message":"  "}"#), None);
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = ApiError::from_response(500, "");
        assert_eq!(err.user_message(), FALLBACK_MESSAGE);
        let err = ApiError::from_response(400, r#"{"message":"Budget must be positive"}"#);
        assert_eq!(err.user_message(), "Budget must be positive");
        assert_eq!(ApiError::Network("offline".into()).user_message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn test_display() {
        let err = ApiError::Server { status: 404, message: None };
        assert_eq!(err.to_string(), format!("Server error 404: {}", FALLBACK_MESSAGE));
    }
}
