use thiserror::Error;

/// `detail` text the backend returns when an email is already taken.
pub const EMAIL_ALREADY_REGISTERED: &str = "Email already registered";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized - token may be expired or credentials invalid")]
    Unauthorized,

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Unexpected status {status}: {body}")]
    Unexpected { status: u16, body: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length (in characters) for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        let total = body.chars().count();
        if total <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let head: String = body.chars().take(MAX_ERROR_BODY_LENGTH).collect();
            format!("{}... (truncated, {} total bytes)", head, body.len())
        }
    }

    /// Pull the `detail` field out of a FastAPI error body.
    ///
    /// String details are returned as-is; structured details (422 validation
    /// lists) are re-serialized. Bodies that aren't JSON fall back to the raw
    /// text.
    fn extract_detail(body: &str) -> String {
        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(serde_json::Value::Object(map)) => match map.get("detail") {
                Some(serde_json::Value::String(detail)) => detail.clone(),
                Some(other) => Self::truncate_body(&other.to_string()),
                None => Self::truncate_body(body),
            },
            _ => Self::truncate_body(body),
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let detail = Self::extract_detail(body);
        match status.as_u16() {
            400 => ApiError::BadRequest(detail),
            401 => ApiError::Unauthorized,
            403 => ApiError::AccessDenied(detail),
            404 => ApiError::NotFound(detail),
            422 => ApiError::Validation(detail),
            500..=599 => ApiError::ServerError(detail),
            code => ApiError::Unexpected { status: code, body: detail },
        }
    }

    /// True when the server rejected a registration because the email is
    /// already in use.
    pub fn is_email_taken(&self) -> bool {
        matches!(self, ApiError::BadRequest(detail) if detail == EMAIL_ALREADY_REGISTERED)
    }

    /// True for connection failures and timeouts, as opposed to anything
    /// the server actually answered.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::NetworkError(_))
    }
}
