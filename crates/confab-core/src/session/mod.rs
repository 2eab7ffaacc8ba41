//! Session state and fetch orchestration.
//!
//! The session controller owns the one piece of cross-view state (the
//! selected conversation id) and drives refreshes against the
//! repository traits.

pub mod controller;
pub mod state;

pub use controller::SessionController;
pub use state::SessionPhase;
