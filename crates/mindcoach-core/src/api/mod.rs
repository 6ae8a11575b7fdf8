//! REST API client module for the MindCoach backend.
//!
//! This module provides the `AuthApi` for the authentication endpoints
//! (`/auth/login`, `/auth/register`) and the current-user profile
//! endpoints (`/users/me`).
//!
//! The backend issues bearer tokens on login/registration; profile calls
//! send that token in the `Authorization` header.

pub mod client;
pub mod error;

pub use client::AuthApi;
pub use error::ApiError;
