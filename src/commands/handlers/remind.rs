//! Reminder command handlers
//!
//! Handles: remind, reminders

use anyhow::Result;
use async_trait::async_trait;
use chrono::Local;
use log::info;
use serenity::model::channel::Message;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::ChatCommandHandler;
use crate::commands::command_name;

/// Handler for reminder-related commands
pub struct RemindHandler;

#[async_trait]
impl ChatCommandHandler for RemindHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["remind", "reminders"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        msg: &Message,
    ) -> Result<()> {
        match command_name(&msg.content) {
            Some("remind") => self.handle_remind(&ctx, serenity_ctx, msg).await,
            Some("reminders") => self.handle_list(&ctx, serenity_ctx, msg).await,
            _ => Ok(()),
        }
    }
}

impl RemindHandler {
    /// Begin a new reminder flow for the author
    async fn handle_remind(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        msg: &Message,
    ) -> Result<()> {
        let user_id = msg.author.id.0;
        info!("Starting reminder flow for user {user_id}");

        let prompt = ctx.flow.begin(user_id);
        msg.channel_id.say(&serenity_ctx.http, prompt).await?;
        Ok(())
    }

    /// List pending reminders for the channel, soonest first
    async fn handle_list(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        msg: &Message,
    ) -> Result<()> {
        let reminders = ctx.store.for_chat(msg.channel_id.0).await?;

        if reminders.is_empty() {
            msg.channel_id
                .say(
                    &serenity_ctx.http,
                    "📋 No pending reminders in this channel.\n\nUse `!remind` to create one!",
                )
                .await?;
            return Ok(());
        }

        let now = Local::now().naive_local();
        let mut list = String::from("📋 **Pending reminders in this channel:**\n\n");
        for reminder in &reminders {
            let wait_secs = reminder.time.signed_duration_since(now).num_seconds();
            let when = if wait_secs > 0 {
                format!("in {}", format_wait(wait_secs))
            } else {
                "any moment now".to_string()
            };
            list.push_str(&format!(
                "• {when} ({})\n> {}\n\n",
                reminder.time.format("%d.%m.%Y %H:%M"),
                reminder.text
            ));
        }

        msg.channel_id.say(&serenity_ctx.http, list).await?;
        Ok(())
    }
}

/// Format a wait in seconds as a rough human-readable duration
fn format_wait(seconds: i64) -> String {
    const MINUTE: i64 = 60;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;

    if seconds < MINUTE {
        "less than a minute".to_string()
    } else if seconds < HOUR {
        let mins = seconds / MINUTE;
        format!("{} minute{}", mins, if mins == 1 { "" } else { "s" })
    } else if seconds < DAY {
        let hours = seconds / HOUR;
        format!("{} hour{}", hours, if hours == 1 { "" } else { "s" })
    } else {
        let days = seconds / DAY;
        format!("{} day{}", days, if days == 1 { "" } else { "s" })
    }
}
