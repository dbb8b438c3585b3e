use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};
use serenity::async_trait;
use serenity::model::application::interaction::{Interaction, InteractionResponseType};
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use std::sync::Arc;
use std::time::Duration;

use siesta::commands::CommandHandler;
use siesta::core::Config;
use siesta::features::conversation::ConversationFlow;
use siesta::features::reminders::{DiscordDelivery, ReminderScheduler, ReminderStore};
use siesta::message_components::MessageComponentHandler;

struct Handler {
    command_handler: Arc<CommandHandler>,
    component_handler: Arc<MessageComponentHandler>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        if let Err(e) = self.command_handler.handle_message(&ctx, &msg).await {
            error!("Error handling message: {e}");
            if let Err(why) = msg
                .channel_id
                .say(
                    &ctx.http,
                    "Sorry, I encountered an error processing your message.",
                )
                .await
            {
                error!("Failed to send error message: {why}");
            }
        }
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::MessageComponent(component) = interaction {
            if let Err(e) = self
                .component_handler
                .handle_component_interaction(&ctx, &component)
                .await
            {
                error!(
                    "Error handling component interaction '{}': {}",
                    component.data.custom_id, e
                );

                let _ = component
                    .create_interaction_response(&ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| {
                                message.content(
                                    "❌ Sorry, I encountered an error processing your interaction. Please try again.",
                                )
                            })
                    })
                    .await;
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting Siesta reminder bot...");

    let store = Arc::new(ReminderStore::new(&config.reminders_file));
    let flow = ConversationFlow::new(Arc::clone(&store));

    let command_handler = CommandHandler::new(flow.clone(), Arc::clone(&store));
    let component_handler = MessageComponentHandler::new(flow);

    let handler = Handler {
        command_handler: Arc::new(command_handler),
        component_handler: Arc::new(component_handler),
    };

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            error!("This could indicate:");
            error!("  - Invalid bot token format");
            error!("  - Network issues reaching Discord API");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!(
        "Bot configured successfully. Reminder store: {}",
        config.reminders_file.display()
    );

    // Start the reminder checker
    let scheduler = ReminderScheduler::new(
        store,
        Duration::from_secs(config.poll_interval_secs),
        Duration::from_secs(config.warmup_secs),
    );
    let delivery = DiscordDelivery::new(client.cache_and_http.http.clone());
    tokio::spawn(async move {
        scheduler.run(delivery).await;
    });

    info!("Establishing WebSocket connection to Discord gateway...");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        error!("This could be due to:");
        error!("  - Invalid bot token");
        error!("  - Network connectivity issues");
        error!("  - Missing required permissions");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
