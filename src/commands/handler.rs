//! Chat command handler trait
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use async_trait::async_trait;
use serenity::model::channel::Message;
use serenity::prelude::Context;
use std::sync::Arc;

use super::context::CommandContext;

/// Trait for prefix command handlers
///
/// Each handler processes one or more commands. Handlers are registered
/// with a [`super::CommandRegistry`] and dispatched by command name.
///
/// # Example
///
/// ```ignore
/// pub struct PingHandler;
///
/// #[async_trait]
/// impl ChatCommandHandler for PingHandler {
///     fn command_names(&self) -> &'static [&'static str] {
///         &["ping"]
///     }
///
///     async fn handle(
///         &self,
///         ctx: Arc<CommandContext>,
///         serenity_ctx: &Context,
///         msg: &Message,
///     ) -> Result<()> {
///         msg.channel_id.say(&serenity_ctx.http, "pong").await?;
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait ChatCommandHandler: Send + Sync {
    /// Command name(s) this handler processes, without the prefix
    fn command_names(&self) -> &'static [&'static str];

    /// Handle the command message
    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        msg: &Message,
    ) -> Result<()>;
}
