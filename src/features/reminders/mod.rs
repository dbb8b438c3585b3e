//! # Reminders Feature
//!
//! Flat-file reminder persistence and timed delivery.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Delivery abstracted behind ReminderDelivery
//! - 1.1.0: Store mutations serialized behind an internal lock
//! - 1.0.0: Initial creation with JSON store and polling scheduler

pub mod scheduler;
pub mod store;

pub use scheduler::{DiscordDelivery, ReminderDelivery, ReminderScheduler};
pub use store::{Reminder, ReminderStore};
