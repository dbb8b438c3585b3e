//! # Features Layer
//!
//! Feature modules: the guided conversation flow and the persistent
//! reminder pipeline it feeds.

pub mod conversation;
pub mod reminders;

pub use conversation::{ConversationFlow, ConversationState, Reply, SessionMap};
pub use reminders::{DiscordDelivery, Reminder, ReminderDelivery, ReminderScheduler, ReminderStore};
