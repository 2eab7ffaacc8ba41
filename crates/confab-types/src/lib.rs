//! Shared domain types for Confab.
//!
//! This crate contains the core domain types used across the Confab client:
//! Identity, Conversation, Message, Notification, and their associated
//! error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod conversation;
pub mod error;
pub mod identity;
pub mod message;
pub mod notification;
