use serde::Serialize;

use crate::api::ApiError;

/// Why a registration didn't go through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegisterError {
    EmailExists,
    UnknownError,
}

impl RegisterError {
    /// Only a duplicate-email rejection is told apart; everything else is
    /// reported as unknown.
    pub fn classify(err: &ApiError) -> Self {
        if err.is_email_taken() {
            RegisterError::EmailExists
        } else {
            RegisterError::UnknownError
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            RegisterError::EmailExists => "EMAIL_EXISTS",
            RegisterError::UnknownError => "UNKNOWN_ERROR",
        }
    }

    /// User-facing explanation
    pub fn message(&self) -> &'static str {
        match self {
            RegisterError::EmailExists => {
                "This email is already registered. Use a different email or go to the login page."
            }
            RegisterError::UnknownError => "Registration failed, please try again.",
        }
    }
}

impl std::fmt::Display for RegisterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Result of `SessionStore::register`.
///
/// Serializes as `{"success": true}` or
/// `{"success": false, "error": "EMAIL_EXISTS", "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RegisterError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RegisterOutcome {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            error: None,
            message: None,
        }
    }

    pub fn failed(error: RegisterError) -> Self {
        Self {
            success: false,
            error: Some(error),
            message: Some(error.message().to_string()),
        }
    }
}
