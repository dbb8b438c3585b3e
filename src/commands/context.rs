//! Shared context for command handlers
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use std::sync::Arc;

use crate::features::conversation::ConversationFlow;
use crate::features::reminders::ReminderStore;

/// Shared state handed to every command handler
///
/// Holds the conversation flow (session state plus commit path) and a
/// store handle for read-only queries like the pending-reminder list.
#[derive(Clone)]
pub struct CommandContext {
    pub flow: ConversationFlow,
    pub store: Arc<ReminderStore>,
}

impl CommandContext {
    pub fn new(flow: ConversationFlow, store: Arc<ReminderStore>) -> Self {
        Self { flow, store }
    }
}
