//! # Conversation Feature
//!
//! Per-user dialogue state for the guided reminder flow: prompt for the
//! reminder text, offer duration buttons, collect a count where one is
//! needed, then commit the reminder to the store.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Staged text moved into the state variants
//! - 1.0.0: Initial creation with session map and flow

pub mod flow;
pub mod sessions;
pub mod state;

pub use flow::{ConversationFlow, Reply};
pub use sessions::SessionMap;
pub use state::{ConversationState, DurationChoice};
