//! Data models for MindCoach API payloads.
//!
//! - `User`: the profile record returned by auth and `/users/me` endpoints
//! - `ProfileUpdate`: partial profile edits sent to `PUT /users/me`
//! - `AuthResponse`, `LoginForm`, `RegisterRequest`: auth endpoint schemas

pub mod auth;
pub mod user;

pub use auth::{AuthResponse, LoginForm, RegisterRequest};
pub use user::{ProfileUpdate, User};
