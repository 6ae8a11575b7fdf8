//! API client for the MindCoach REST API.
//!
//! This module provides the `AuthApi` struct for the login/registration
//! endpoints and the authenticated current-user profile endpoints.

use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::Session;
use crate::config::ApiSettings;
use crate::models::{AuthResponse, LoginForm, ProfileUpdate, RegisterRequest, User};

use super::ApiError;

// ============================================================================
// Endpoints
// ============================================================================

const LOGIN_PATH: &str = "/auth/login";
const REGISTER_PATH: &str = "/auth/register";
const CURRENT_USER_PATH: &str = "/users/me";

/// API client for the MindCoach backend.
/// Clone is cheap - reqwest::Client uses Arc internally, and clones share
/// the cookie store.
#[derive(Clone)]
pub struct AuthApi {
    client: Client,
    base_url: String,
}

impl AuthApi {
    /// Create a new API client. Cookies set by the backend are kept and
    /// sent back on every later request.
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Exchange email and password for a token, using the OAuth2 password
    /// form the backend expects.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let url = self.url(LOGIN_PATH);
        debug!(url = %url, "Sending login request");

        let response = self
            .client
            .post(&url)
            .form(&LoginForm {
                username: email,
                password,
            })
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        let auth: AuthResponse = Self::parse_json(response, "login").await?;
        Self::validate_auth(auth)
    }

    /// Create an account. The backend logs the new user in straight away
    /// and replies with the same shape as login.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<AuthResponse, ApiError> {
        let url = self.url(REGISTER_PATH);
        debug!(url = %url, "Sending registration request");

        let response = self
            .client
            .post(&url)
            .json(&RegisterRequest {
                email,
                password,
                username,
            })
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        let auth: AuthResponse = Self::parse_json(response, "register").await?;
        Self::validate_auth(auth)
    }

    /// Fetch the profile of the user the token belongs to
    pub async fn current_user(&self, token: &str) -> Result<User, ApiError> {
        let url = self.url(CURRENT_USER_PATH);
        debug!(url = %url, "Fetching current user");

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        Self::parse_json(response, "current user").await
    }

    /// Apply a partial profile update and return the stored profile
    pub async fn update_current_user(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> Result<User, ApiError> {
        let url = self.url(CURRENT_USER_PATH);
        debug!(url = %url, "Updating current user");

        let response = self
            .client
            .put(&url)
            .bearer_auth(token)
            .json(update)
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        Self::parse_json(response, "profile update").await
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Decode a JSON body into its schema. A body that doesn't match is a
    /// malformed response, not a transport failure.
    async fn parse_json<T: DeserializeOwned>(
        response: reqwest::Response,
        what: &str,
    ) -> Result<T, ApiError> {
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| ApiError::InvalidResponse(format!("{} response: {}", what, e)))
    }

    fn validate_auth(auth: AuthResponse) -> Result<AuthResponse, ApiError> {
        if Session::is_blank_token(&auth.access_token) {
            return Err(ApiError::InvalidResponse(
                "auth response carried an empty access_token".to_string(),
            ));
        }
        Ok(auth)
    }
}
