//! Command handler registry
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use std::collections::HashMap;
use std::sync::Arc;

use super::handler::ChatCommandHandler;

/// Registry mapping command names to handlers
///
/// Multiple command names can map to the same handler when they share
/// logic (the reminder handler serves both `remind` and `reminders`).
#[derive(Clone, Default)]
pub struct CommandRegistry {
    handlers: HashMap<&'static str, Arc<dyn ChatCommandHandler>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under all names it declares
    pub fn register(&mut self, handler: Arc<dyn ChatCommandHandler>) {
        for name in handler.command_names() {
            self.handlers.insert(name, Arc::clone(&handler));
        }
    }

    /// Look up the handler for a command name
    pub fn get(&self, name: &str) -> Option<Arc<dyn ChatCommandHandler>> {
        self.handlers.get(name).cloned()
    }

    /// All registered command names
    pub fn command_names(&self) -> impl Iterator<Item = &&'static str> {
        self.handlers.keys()
    }
}
