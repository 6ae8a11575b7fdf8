//! Authentication module for managing the user session.
//!
//! This module provides:
//! - `SessionStore`: login/register/logout actions over the API, with the
//!   session mirrored into durable storage
//! - `Session`: the in-memory token/profile/authenticated record
//! - `RegisterOutcome`: the result registration hands back to callers
//!
//! The session is read from storage once when the store is built and
//! written back on every successful change.

pub mod outcome;
pub mod session;

pub use outcome::{RegisterError, RegisterOutcome};
pub use session::{Session, SessionStore, TOKEN_KEY, USER_KEY};
