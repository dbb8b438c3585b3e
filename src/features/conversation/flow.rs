//! Guided reminder flow
//!
//! Joins the session map, the state machine, and the store. Handlers
//! return [`Reply`] values instead of talking to Discord so the gateway
//! layer stays thin and the whole dialogue is testable in-process.

use anyhow::Result;
use chrono::{Duration, Local, NaiveDateTime};
use log::info;
use std::ops::RangeInclusive;
use std::sync::Arc;

use super::sessions::SessionMap;
use super::state::{
    self, ConversationState, DurationChoice, DAYS_PER_MONTH, DAYS_PER_YEAR, DAYS_RANGE,
    MONTHS_RANGE, WEEKS_RANGE,
};
use crate::features::reminders::{Reminder, ReminderStore};

/// Notice shown when a duration button is pressed with no flow pending,
/// e.g. on a prompt message left over from an already-finished reminder
const MENU_EXPIRED: &str =
    "⚠️ That menu is no longer active. Use `!remind` to start a new reminder.";

/// An outbound reply produced by the flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Plain text to the originating channel
    Text(String),
    /// Text that should carry the duration button row
    DurationPrompt(String),
}

/// The conversation flow shared by all inbound-event handlers
#[derive(Clone)]
pub struct ConversationFlow {
    sessions: SessionMap,
    store: Arc<ReminderStore>,
}

impl ConversationFlow {
    pub fn new(store: Arc<ReminderStore>) -> Self {
        Self {
            sessions: SessionMap::new(),
            store,
        }
    }

    /// Start a reminder flow for `user_id`, discarding any staged data
    ///
    /// Returns the prompt to show the user.
    pub fn begin(&self, user_id: u64) -> String {
        self.sessions
            .set(user_id, ConversationState::AwaitingReminderText);
        "✍️ What should I remind you about?".to_string()
    }

    /// Route a free-text message through the state machine
    ///
    /// Returns `None` when the text is not expected in the current state;
    /// such messages are dropped without a reply.
    pub async fn on_text(
        &self,
        user_id: u64,
        chat_id: u64,
        text: &str,
    ) -> Result<Option<Reply>> {
        match self.sessions.get(user_id) {
            ConversationState::Idle => Ok(None),
            ConversationState::AwaitingDurationChoice { .. } => Ok(None),
            ConversationState::AwaitingReminderText => {
                self.sessions.set(
                    user_id,
                    ConversationState::AwaitingDurationChoice {
                        text: text.to_string(),
                    },
                );
                Ok(Some(Reply::DurationPrompt(
                    "🕐 When should I remind you?".to_string(),
                )))
            }
            ConversationState::AwaitingDaysCount { text: staged } => {
                self.on_count(user_id, chat_id, staged, text, &DAYS_RANGE, 1)
                    .await
            }
            ConversationState::AwaitingWeeksCount { text: staged } => {
                self.on_count(user_id, chat_id, staged, text, &WEEKS_RANGE, 7)
                    .await
            }
            ConversationState::AwaitingMonthsCount { text: staged } => {
                self.on_count(user_id, chat_id, staged, text, &MONTHS_RANGE, DAYS_PER_MONTH)
                    .await
            }
        }
    }

    /// Handle a duration button press
    ///
    /// Returns the new content for the prompt message, or `None` when the
    /// payload is not a duration button at all.
    pub async fn on_duration_choice(
        &self,
        user_id: u64,
        chat_id: u64,
        payload: &str,
    ) -> Result<Option<String>> {
        let Some(choice) = DurationChoice::from_payload(payload) else {
            return Ok(None);
        };

        let ConversationState::AwaitingDurationChoice { text } = self.sessions.get(user_id)
        else {
            return Ok(Some(MENU_EXPIRED.to_string()));
        };

        let content = match choice {
            DurationChoice::Days => {
                self.sessions
                    .set(user_id, ConversationState::AwaitingDaysCount { text });
                "Enter the number of days (1–6):".to_string()
            }
            DurationChoice::Weeks => {
                self.sessions
                    .set(user_id, ConversationState::AwaitingWeeksCount { text });
                "Enter the number of weeks (1–3):".to_string()
            }
            DurationChoice::Months => {
                self.sessions
                    .set(user_id, ConversationState::AwaitingMonthsCount { text });
                "Enter the number of months (1–11):".to_string()
            }
            DurationChoice::Year => {
                let fire_time = Local::now().naive_local() + Duration::days(DAYS_PER_YEAR);
                self.commit(user_id, chat_id, text, fire_time).await?
            }
        };

        Ok(Some(content))
    }

    /// Validate a count reply and commit on success
    async fn on_count(
        &self,
        user_id: u64,
        chat_id: u64,
        staged: String,
        input: &str,
        range: &RangeInclusive<i64>,
        days_per_unit: i64,
    ) -> Result<Option<Reply>> {
        let Some(n) = state::parse_count(input, range) else {
            // Same state, same expectation; just ask again
            return Ok(Some(Reply::Text(format!(
                "❗ Please send a number from {} to {}.",
                range.start(),
                range.end()
            ))));
        };

        let fire_time = Local::now().naive_local() + Duration::days(n * days_per_unit);
        let confirmation = self.commit(user_id, chat_id, staged, fire_time).await?;
        Ok(Some(Reply::Text(confirmation)))
    }

    /// Persist the reminder and close the session
    async fn commit(
        &self,
        user_id: u64,
        chat_id: u64,
        text: String,
        fire_time: NaiveDateTime,
    ) -> Result<String> {
        self.store
            .append(Reminder {
                chat_id,
                text,
                time: fire_time,
            })
            .await?;
        self.sessions.reset(user_id);

        info!("📌 Stored reminder for channel {chat_id}, fires {fire_time}");
        Ok(format!(
            "✅ Done! I'll remind you on {}.",
            fire_time.format("%d.%m.%Y %H:%M")
        ))
    }

    #[cfg(test)]
    pub(crate) fn state_of(&self, user_id: u64) -> ConversationState {
        self.sessions.get(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER: u64 = 10;
    const CHAT: u64 = 500;

    fn flow_in(dir: &tempfile::TempDir) -> (ConversationFlow, Arc<ReminderStore>) {
        let store = Arc::new(ReminderStore::new(dir.path().join("reminders.json")));
        (ConversationFlow::new(Arc::clone(&store)), store)
    }

    fn assert_fires_in_days(actual: NaiveDateTime, days: i64) {
        let expected = Local::now().naive_local() + Duration::days(days);
        let drift = (expected - actual).num_seconds().abs();
        assert!(drift <= 1, "fire time off by {drift}s for {days} days");
    }

    #[tokio::test]
    async fn test_days_flow_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let (flow, store) = flow_in(&dir);

        flow.begin(USER);
        let reply = flow.on_text(USER, CHAT, "Buy milk").await.unwrap();
        assert!(matches!(reply, Some(Reply::DurationPrompt(_))));

        let prompt = flow.on_duration_choice(USER, CHAT, "days").await.unwrap();
        assert!(prompt.unwrap().contains("1–6"));

        let done = flow.on_text(USER, CHAT, "3").await.unwrap();
        assert!(matches!(done, Some(Reply::Text(ref t)) if t.starts_with("✅")));

        let stored = store.load().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].chat_id, CHAT);
        assert_eq!(stored[0].text, "Buy milk");
        assert_fires_in_days(stored[0].time, 3);
        assert_eq!(flow.state_of(USER), ConversationState::Idle);
    }

    #[tokio::test]
    async fn test_every_valid_day_count_commits() {
        for n in 1..=6 {
            let dir = tempfile::tempdir().unwrap();
            let (flow, store) = flow_in(&dir);

            flow.begin(USER);
            flow.on_text(USER, CHAT, "stretch").await.unwrap();
            flow.on_duration_choice(USER, CHAT, "days").await.unwrap();
            flow.on_text(USER, CHAT, &n.to_string()).await.unwrap();

            let stored = store.load().await.unwrap();
            assert_eq!(stored.len(), 1, "count {n} did not commit");
            assert_fires_in_days(stored[0].time, n);
        }
    }

    #[tokio::test]
    async fn test_invalid_day_counts_keep_state_and_store() {
        let dir = tempfile::tempdir().unwrap();
        let (flow, store) = flow_in(&dir);

        flow.begin(USER);
        flow.on_text(USER, CHAT, "stretch").await.unwrap();
        flow.on_duration_choice(USER, CHAT, "days").await.unwrap();

        for bad in ["0", "7", "abc"] {
            let reply = flow.on_text(USER, CHAT, bad).await.unwrap();
            assert!(
                matches!(reply, Some(Reply::Text(ref t)) if t.contains("1 to 6")),
                "no retry prompt for {bad:?}"
            );
            assert!(matches!(
                flow.state_of(USER),
                ConversationState::AwaitingDaysCount { .. }
            ));
        }
        assert!(store.load().await.unwrap().is_empty());

        // Still recoverable with a valid count
        flow.on_text(USER, CHAT, "6").await.unwrap();
        assert_eq!(store.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_weeks_flow_converts_to_days() {
        let dir = tempfile::tempdir().unwrap();
        let (flow, store) = flow_in(&dir);

        flow.begin(USER);
        flow.on_text(USER, CHAT, "laundry").await.unwrap();
        flow.on_duration_choice(USER, CHAT, "weeks").await.unwrap();
        flow.on_text(USER, CHAT, "2").await.unwrap();

        let stored = store.load().await.unwrap();
        assert_fires_in_days(stored[0].time, 14);
    }

    #[tokio::test]
    async fn test_months_flow_uses_thirty_day_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let (flow, store) = flow_in(&dir);

        flow.begin(USER);
        flow.on_text(USER, CHAT, "dentist").await.unwrap();
        flow.on_duration_choice(USER, CHAT, "months").await.unwrap();
        flow.on_text(USER, CHAT, "2").await.unwrap();

        let stored = store.load().await.unwrap();
        assert_fires_in_days(stored[0].time, 60);
    }

    #[tokio::test]
    async fn test_year_button_commits_without_count() {
        let dir = tempfile::tempdir().unwrap();
        let (flow, store) = flow_in(&dir);

        flow.begin(USER);
        flow.on_text(USER, CHAT, "passport renewal").await.unwrap();
        let content = flow.on_duration_choice(USER, CHAT, "year").await.unwrap();

        assert!(content.unwrap().starts_with("✅"));
        let stored = store.load().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_fires_in_days(stored[0].time, 365);
        assert_eq!(flow.state_of(USER), ConversationState::Idle);
    }

    #[tokio::test]
    async fn test_legacy_button_payloads_are_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let (flow, _store) = flow_in(&dir);

        flow.begin(USER);
        flow.on_text(USER, CHAT, "stretch").await.unwrap();
        let prompt = flow
            .on_duration_choice(USER, CHAT, "month_input")
            .await
            .unwrap();

        assert!(prompt.unwrap().contains("1–11"));
        assert!(matches!(
            flow.state_of(USER),
            ConversationState::AwaitingMonthsCount { .. }
        ));
    }

    #[tokio::test]
    async fn test_idle_text_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let (flow, store) = flow_in(&dir);

        let reply = flow.on_text(USER, CHAT, "hello?").await.unwrap();

        assert_eq!(reply, None);
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_text_while_awaiting_button_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let (flow, _store) = flow_in(&dir);

        flow.begin(USER);
        flow.on_text(USER, CHAT, "stretch").await.unwrap();
        let reply = flow.on_text(USER, CHAT, "tomorrow please").await.unwrap();

        assert_eq!(reply, None);
        assert!(matches!(
            flow.state_of(USER),
            ConversationState::AwaitingDurationChoice { .. }
        ));
    }

    #[tokio::test]
    async fn test_stale_button_press_gets_expired_notice() {
        let dir = tempfile::tempdir().unwrap();
        let (flow, store) = flow_in(&dir);

        let content = flow.on_duration_choice(USER, CHAT, "days").await.unwrap();

        assert!(content.unwrap().contains("no longer active"));
        assert_eq!(flow.state_of(USER), ConversationState::Idle);
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_payload_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let (flow, _store) = flow_in(&dir);

        let content = flow
            .on_duration_choice(USER, CHAT, "page_next")
            .await
            .unwrap();

        assert_eq!(content, None);
    }

    #[tokio::test]
    async fn test_begin_discards_staged_text() {
        let dir = tempfile::tempdir().unwrap();
        let (flow, _store) = flow_in(&dir);

        flow.begin(USER);
        flow.on_text(USER, CHAT, "old text").await.unwrap();
        flow.begin(USER);

        assert_eq!(flow.state_of(USER), ConversationState::AwaitingReminderText);
    }

    #[tokio::test]
    async fn test_users_do_not_share_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let (flow, _store) = flow_in(&dir);

        flow.begin(USER);
        let other = flow.on_text(99, CHAT, "unrelated").await.unwrap();

        assert_eq!(other, None);
        assert_eq!(flow.state_of(USER), ConversationState::AwaitingReminderText);
    }
}
