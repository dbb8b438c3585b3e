//! Per-user session storage

use dashmap::DashMap;
use std::sync::Arc;

use super::state::ConversationState;

/// Concurrent map of user id to conversation state
///
/// Absent entries read as [`ConversationState::Idle`]; resetting a
/// session removes its entry, so the map only holds users mid-flow.
#[derive(Clone, Default)]
pub struct SessionMap {
    inner: Arc<DashMap<u64, ConversationState>>,
}

impl SessionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, user_id: u64) -> ConversationState {
        self.inner
            .get(&user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    pub fn set(&self, user_id: u64, state: ConversationState) {
        self.inner.insert(user_id, state);
    }

    pub fn reset(&self, user_id: u64) {
        self.inner.remove(&user_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_user_is_idle() {
        let sessions = SessionMap::new();
        assert_eq!(sessions.get(42), ConversationState::Idle);
    }

    #[test]
    fn test_set_then_get() {
        let sessions = SessionMap::new();
        sessions.set(42, ConversationState::AwaitingReminderText);
        assert_eq!(sessions.get(42), ConversationState::AwaitingReminderText);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let sessions = SessionMap::new();
        sessions.set(42, ConversationState::AwaitingReminderText);
        sessions.reset(42);
        assert_eq!(sessions.get(42), ConversationState::Idle);
    }

    #[test]
    fn test_sessions_are_independent() {
        let sessions = SessionMap::new();
        sessions.set(1, ConversationState::AwaitingReminderText);
        assert_eq!(sessions.get(2), ConversationState::Idle);
    }
}
