//! Core library for the MindCoach client.
//!
//! Holds the authenticated session (token plus user profile), talks to the
//! MindCoach REST API for login, registration and profile calls, and
//! mirrors the session into durable key-value storage so it survives a
//! restart.
//!
//! The entry point is [`SessionStore`], built once at startup from an
//! [`AuthApi`] and a [`KeyValueStore`] implementation.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod storage;

pub use api::{ApiError, AuthApi};
pub use auth::{RegisterError, RegisterOutcome, Session, SessionStore};
pub use config::{ApiSettings, Config};
pub use models::{AuthResponse, ProfileUpdate, User};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
