use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid credentials")]
    Authentication,

    #[error("Access denied: administrator role required")]
    Authorization,

    #[error("No session token available")]
    MissingToken,

    #[error("Server rejected request (status {status})")]
    Http { status: u16, message: Option<String> },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed data: {0}")]
    Decode(String),
}

/// Error bodies the API sends alongside non-2xx statuses.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiError {
    /// Build an `Http` error from a non-success response, extracting the
    /// server's `{message}` field when the body carries one.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message);
        ApiError::Http {
            status: status.as_u16(),
            message,
        }
    }

    /// Server-provided message for `Http` errors, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Http { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_status_extracts_server_message() {
        let status = reqwest::StatusCode::NOT_FOUND;
        let err = ApiError::from_status(status, r#"{"message": "no encontrado"}"#);
        match err {
            ApiError::Http { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message.as_deref(), Some("no encontrado"));
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[test]
    fn from_status_tolerates_non_json_body() {
        let status = reqwest::StatusCode::INTERNAL_SERVER_ERROR;
        let err = ApiError::from_status(status, "<html>oops</html>");
        match err {
            ApiError::Http { status, message } => {
                assert_eq!(status, 500);
                assert!(message.is_none());
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[test]
    fn server_message_is_none_for_other_variants() {
        assert!(ApiError::MissingToken.server_message().is_none());
        assert!(ApiError::Authorization.server_message().is_none());
    }
}
