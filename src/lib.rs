// Core layer - configuration
pub mod core;

// Features layer - conversation flow and reminder pipeline
pub mod features;

// UI components
pub mod message_components;

// Application layer
pub mod commands;

// Re-export core config
pub use core::Config;

// Re-export feature items
pub use features::{
    // Conversation
    ConversationFlow, ConversationState, Reply, SessionMap,
    // Reminders
    DiscordDelivery, Reminder, ReminderDelivery, ReminderScheduler, ReminderStore,
};
