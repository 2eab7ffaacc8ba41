//! Session orchestration and repository trait definitions for Confab.
//!
//! This crate defines the "ports" (repository and auth traits) that the
//! infrastructure layer implements, plus the session controller that
//! owns cross-view selection state and fetch orchestration. It depends
//! only on `confab-types` -- never on `confab-infra` or any HTTP crate.

pub mod auth;
pub mod notify;
pub mod repository;
pub mod session;
