//! # Command System
//!
//! Prefix command (`!`) handling plus free-text routing for messages that
//! belong to an in-progress reminder flow.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Modular handler infrastructure (handler trait, context, registry)
//! - 1.0.0: Initial creation with start and remind commands

pub mod context;
pub mod handler;
pub mod handlers;
pub mod registry;

use anyhow::Result;
use log::debug;
use serenity::model::channel::Message;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::features::conversation::{ConversationFlow, Reply};
use crate::features::reminders::ReminderStore;
use crate::message_components::MessageComponentHandler;

// Re-export handler infrastructure
pub use context::CommandContext;
pub use handler::ChatCommandHandler;
pub use registry::CommandRegistry;

/// Prefix that marks a message as a command
pub const COMMAND_PREFIX: char = '!';

/// Extract the command name from message content
///
/// Returns `None` for ordinary text. Anything after the command word is
/// ignored; none of the commands take arguments.
pub fn command_name(content: &str) -> Option<&str> {
    let rest = content.trim().strip_prefix(COMMAND_PREFIX)?;
    rest.split_whitespace().next()
}

/// Entry point for all inbound chat messages
///
/// Commands resolve through the registry; everything else is free text
/// and goes to the conversation flow, which decides whether the current
/// session expects it.
pub struct CommandHandler {
    context: Arc<CommandContext>,
    registry: CommandRegistry,
}

impl CommandHandler {
    pub fn new(flow: ConversationFlow, store: Arc<ReminderStore>) -> Self {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(handlers::start::StartHandler));
        registry.register(Arc::new(handlers::remind::RemindHandler));

        Self {
            context: Arc::new(CommandContext::new(flow, store)),
            registry,
        }
    }

    pub async fn handle_message(&self, ctx: &Context, msg: &Message) -> Result<()> {
        if let Some(name) = command_name(&msg.content) {
            let Some(handler) = self.registry.get(name) else {
                debug!("Ignoring unknown command '{name}'");
                return Ok(());
            };
            debug!("Dispatching command '{name}' from user {}", msg.author.id);
            return handler.handle(Arc::clone(&self.context), ctx, msg).await;
        }

        // Free text: the flow answers only when the session expects it
        let reply = self
            .context
            .flow
            .on_text(msg.author.id.0, msg.channel_id.0, &msg.content)
            .await?;

        match reply {
            Some(Reply::Text(text)) => {
                msg.channel_id.say(&ctx.http, text).await?;
            }
            Some(Reply::DurationPrompt(text)) => {
                msg.channel_id
                    .send_message(&ctx.http, |m| {
                        m.content(text)
                            .set_components(MessageComponentHandler::create_duration_buttons())
                    })
                    .await?;
            }
            None => {}
        }

        Ok(())
    }
}
