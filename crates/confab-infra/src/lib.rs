//! Infrastructure implementations for Confab.
//!
//! Concrete transports behind the confab-core traits: the hosted auth
//! client (email/password endpoints), the GraphQL data client
//! (conversations and messages), the shared token store, and the
//! config loader.

pub mod auth;
pub mod config;
pub mod graphql;
pub mod token;
