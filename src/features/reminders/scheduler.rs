//! Periodic reminder delivery
//!
//! A background task sweeps the store on a fixed interval, pushes due
//! reminders to their channels, and prunes them from the file. Delivery
//! is fire-and-forget: a failed send is logged and the reminder is not
//! restored.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Local;
use log::{error, info};
use serenity::http::Http;
use serenity::model::id::ChannelId;
use std::sync::Arc;
use std::time::Duration;

use super::store::ReminderStore;

/// Outbound side of reminder delivery
///
/// The scheduler formats the message; implementations only have to get it
/// to the recipient.
#[async_trait]
pub trait ReminderDelivery: Send + Sync {
    async fn deliver(&self, chat_id: u64, text: &str) -> Result<()>;
}

/// Delivery over the Discord REST API
pub struct DiscordDelivery {
    http: Arc<Http>,
}

impl DiscordDelivery {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ReminderDelivery for DiscordDelivery {
    async fn deliver(&self, chat_id: u64, text: &str) -> Result<()> {
        ChannelId(chat_id).say(&self.http, text).await?;
        Ok(())
    }
}

/// Fixed-interval checker that delivers due reminders
pub struct ReminderScheduler {
    store: Arc<ReminderStore>,
    poll_interval: Duration,
    warmup: Duration,
}

impl ReminderScheduler {
    pub fn new(store: Arc<ReminderStore>, poll_interval: Duration, warmup: Duration) -> Self {
        Self {
            store,
            poll_interval,
            warmup,
        }
    }

    /// Run the checker loop forever
    ///
    /// The first sweep happens after the warm-up delay; after that the
    /// store is swept once per poll interval. A failed sweep is logged
    /// and the loop keeps going.
    pub async fn run(self, delivery: impl ReminderDelivery) {
        info!(
            "⏰ Reminder checker starting in {}s, sweeping every {}s",
            self.warmup.as_secs(),
            self.poll_interval.as_secs()
        );
        tokio::time::sleep(self.warmup).await;

        let mut ticker = tokio::time::interval(self.poll_interval);
        loop {
            ticker.tick().await;
            if let Err(e) = self.sweep(&delivery).await {
                error!("Reminder sweep failed: {e}");
            }
        }
    }

    /// One checker pass: take due reminders and push them out
    ///
    /// Returns the number of reminders taken from the store. Send
    /// failures are logged per reminder and do not fail the sweep.
    pub async fn sweep(&self, delivery: &impl ReminderDelivery) -> Result<usize> {
        let due = self.store.take_due(Local::now().naive_local()).await?;

        for reminder in &due {
            let message = format!("⏰ Reminder:\n{}", reminder.text);
            match delivery.deliver(reminder.chat_id, &message).await {
                Ok(()) => info!("⏰ Delivered reminder to channel {}", reminder.chat_id),
                Err(e) => error!(
                    "Failed to deliver reminder to channel {}: {e}",
                    reminder.chat_id
                ),
            }
        }

        Ok(due.len())
    }
}
