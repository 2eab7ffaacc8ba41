//! Repository traits for conversation and message data.
//!
//! Implementations live in confab-infra (e.g. the GraphQL client).
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

pub mod conversation;
pub mod message;

pub use conversation::ConversationRepository;
pub use message::MessageRepository;
