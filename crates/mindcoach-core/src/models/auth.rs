use serde::{Deserialize, Serialize};

use super::User;

/// Successful reply from `/auth/login` and `/auth/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: User,
}

/// OAuth2 password-form fields. The backend reads the email from `username`.
#[derive(Debug, Serialize)]
pub struct LoginForm<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub username: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_auth_response() {
        let json = r#"{
            "access_token": "eyJhbGciOiJIUzI1NiJ9.payload.sig",
            "token_type": "bearer",
            "user": {"id": "42", "email": "s@example.com", "username": "s"}
        }"#;
        let resp: AuthResponse = serde_json::from_str(json).expect("Failed to parse auth response");
        assert_eq!(resp.access_token, "eyJhbGciOiJIUzI1NiJ9.payload.sig");
        assert_eq!(resp.token_type.as_deref(), Some("bearer"));
        assert_eq!(resp.user.id, "42");
    }

    #[test]
    fn test_auth_response_requires_user() {
        let json = r#"{"access_token": "abc"}"#;
        assert!(serde_json::from_str::<AuthResponse>(json).is_err());
    }

    #[test]
    fn test_auth_response_requires_string_token() {
        let json = r#"{"access_token": 12345, "user": {"id": "1", "email": "a@b.c", "username": "a"}}"#;
        assert!(serde_json::from_str::<AuthResponse>(json).is_err());
    }
}
