use anyhow::Result;
use log::info;
use serenity::builder::CreateComponents;
use serenity::model::application::component::ButtonStyle;
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;

use crate::features::conversation::ConversationFlow;

/// Handler for all message component interactions
pub struct MessageComponentHandler {
    flow: ConversationFlow,
}

impl MessageComponentHandler {
    pub fn new(flow: ConversationFlow) -> Self {
        Self { flow }
    }

    /// Handle a button press on a duration prompt
    ///
    /// A consumed press edits the prompt message in place and drops the
    /// buttons; a payload the flow does not recognize gets a plain
    /// fallback reply.
    pub async fn handle_component_interaction(
        &self,
        ctx: &Context,
        interaction: &MessageComponentInteraction,
    ) -> Result<()> {
        let custom_id = &interaction.data.custom_id;
        let user_id = interaction.user.id;

        info!("Processing component interaction: {custom_id} from user: {user_id}");

        let content = self
            .flow
            .on_duration_choice(user_id.0, interaction.channel_id.0, custom_id)
            .await?;

        match content {
            Some(content) => {
                interaction
                    .create_interaction_response(&ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::UpdateMessage)
                            .interaction_response_data(|message| {
                                message.content(content).components(|c| c) // Clear components
                            })
                    })
                    .await?;
            }
            None => {
                interaction
                    .create_interaction_response(&ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| {
                                message.content("Unknown component interaction.")
                            })
                    })
                    .await?;
            }
        }

        Ok(())
    }

    /// Create the duration selection rows shown after the reminder text
    pub fn create_duration_buttons() -> CreateComponents {
        CreateComponents::default()
            .create_action_row(|row| {
                row.create_button(|button| {
                    button
                        .custom_id("days")
                        .label("📆 In days (1–6)")
                        .style(ButtonStyle::Secondary)
                })
                .create_button(|button| {
                    button
                        .custom_id("weeks")
                        .label("🗓️ In weeks (1–3)")
                        .style(ButtonStyle::Secondary)
                })
                .create_button(|button| {
                    button
                        .custom_id("months")
                        .label("📅 In months (1–11)")
                        .style(ButtonStyle::Secondary)
                })
            })
            .create_action_row(|row| {
                row.create_button(|button| {
                    button
                        .custom_id("year")
                        .label("🎆 In a year")
                        .style(ButtonStyle::Primary)
                })
            })
            .to_owned()
    }
}
