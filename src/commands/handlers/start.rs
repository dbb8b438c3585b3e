//! Greeting command handler
//!
//! Handles: start

use anyhow::Result;
use async_trait::async_trait;
use serenity::model::channel::Message;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::ChatCommandHandler;

const GREETING: &str = "👋 Hi! I'm a reminder bot.\n\
    Tell me what to remember and when, and I'll ping you here when it's time.\n\n\
    `!remind` - set up a new reminder\n\
    `!reminders` - list what's pending in this channel";

/// Handler for the greeting command
pub struct StartHandler;

#[async_trait]
impl ChatCommandHandler for StartHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["start"]
    }

    async fn handle(
        &self,
        _ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        msg: &Message,
    ) -> Result<()> {
        msg.channel_id.say(&serenity_ctx.http, GREETING).await?;
        Ok(())
    }
}
