use tracing::{debug, error, info, warn};

use crate::api::{ApiError, AuthApi};
use crate::models::{AuthResponse, ProfileUpdate, User};
use crate::storage::KeyValueStore;

use super::{RegisterError, RegisterOutcome};

/// Storage key holding the raw token string
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the JSON-serialized user profile
pub const USER_KEY: &str = "user";

/// In-memory authentication state.
///
/// `authenticated` is true exactly when a non-empty token is present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
    authenticated: bool,
}

impl Session {
    fn new(token: Option<String>, user: Option<User>) -> Self {
        let token = token.filter(|t| !Self::is_blank_token(t));
        Self {
            authenticated: token.is_some(),
            token,
            user,
        }
    }

    /// A token that is empty or only whitespace carries no credential
    pub(crate) fn is_blank_token(token: &str) -> bool {
        token.trim().is_empty()
    }

    /// Rebuild the session from durable storage. Unreadable entries count
    /// as absent.
    fn restore<S: KeyValueStore>(storage: &S) -> Self {
        let token = match storage.get(TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Failed to read stored token");
                None
            }
        };

        let user = match storage.get(USER_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "Stored user profile is unreadable, ignoring it");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read stored user profile");
                None
            }
        };

        Self::new(token, user)
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

/// Owns the session and keeps it in sync with durable storage.
///
/// Built once at startup and handed to whatever needs it. Actions take
/// `&mut self`, so two of them can never interleave on the same store.
pub struct SessionStore<S> {
    api: AuthApi,
    storage: S,
    session: Session,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Create the store, restoring any session left in `storage`
    pub fn new(api: AuthApi, storage: S) -> Self {
        let session = Session::restore(&storage);
        debug!(
            authenticated = session.is_authenticated(),
            has_user = session.user().is_some(),
            "Session restored from storage"
        );

        Self {
            api,
            storage,
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn api(&self) -> &AuthApi {
        &self.api
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Log in with email and password.
    ///
    /// Any failure (network, rejected credentials, malformed reply) clears
    /// the session entirely and returns `false`; the cause only goes to the
    /// log.
    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        match self.api.login(email, password).await {
            Ok(auth) => {
                self.establish(auth);
                info!("Login successful");
                true
            }
            Err(e) => {
                error!(error = %e, transport = e.is_transport(), "Login failed");
                self.logout();
                false
            }
        }
    }

    /// Register a new account and, on success, sign straight into it.
    ///
    /// The session is left untouched when registration fails.
    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        username: &str,
    ) -> RegisterOutcome {
        match self.api.register(email, password, username).await {
            Ok(auth) => {
                self.establish(auth);
                info!("Registration successful");
                RegisterOutcome::succeeded()
            }
            Err(e) => {
                let kind = RegisterError::classify(&e);
                error!(error = %e, kind = %kind, transport = e.is_transport(), "Registration failed");
                RegisterOutcome::failed(kind)
            }
        }
    }

    /// Drop the session and its stored copy. Never fails.
    pub fn logout(&mut self) {
        self.session = Session::default();
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!(key = key, error = %e, "Failed to remove stored session entry");
            }
        }
        debug!("Session cleared");
    }

    /// Re-fetch the profile for the current token.
    ///
    /// A 401 means the token is dead, so the session is dropped.
    pub async fn refresh_user(&mut self) -> Result<&User, ApiError> {
        let token = self.require_token()?;
        let result = self.api.current_user(&token).await;
        self.apply_profile(result)
    }

    /// Send a partial profile edit and keep the profile the server returns
    pub async fn update_profile(&mut self, update: &ProfileUpdate) -> Result<&User, ApiError> {
        let token = self.require_token()?;
        let result = self.api.update_current_user(&token, update).await;
        self.apply_profile(result)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn require_token(&self) -> Result<String, ApiError> {
        match self.session.token() {
            Some(token) if self.session.is_authenticated() => Ok(token.to_string()),
            _ => Err(ApiError::Unauthorized),
        }
    }

    fn apply_profile(&mut self, result: Result<User, ApiError>) -> Result<&User, ApiError> {
        match result {
            Ok(user) => {
                self.persist_user(&user);
                Ok(&*self.session.user.insert(user))
            }
            Err(ApiError::Unauthorized) => {
                warn!("Token rejected by server, logging out");
                self.logout();
                Err(ApiError::Unauthorized)
            }
            Err(e) => Err(e),
        }
    }

    fn establish(&mut self, auth: AuthResponse) {
        if let Err(e) = self.storage.set(TOKEN_KEY, &auth.access_token) {
            warn!(error = %e, "Failed to persist token");
        }
        self.persist_user(&auth.user);
        self.session = Session::new(Some(auth.access_token), Some(auth.user));
    }

    /// Write the profile through to storage. If that fails, the stored
    /// profile is removed so it can't sit next to a token it doesn't
    /// belong to.
    fn persist_user(&mut self, user: &User) {
        let result = serde_json::to_string(user)
            .map_err(Into::into)
            .and_then(|json| self.storage.set(USER_KEY, &json));
        if let Err(e) = result {
            warn!(error = %e, "Failed to persist user profile, dropping stored copy");
            if let Err(e) = self.storage.remove(USER_KEY) {
                warn!(error = %e, "Failed to remove stale stored user profile");
            }
        }
    }
}
