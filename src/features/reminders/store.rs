//! Flat-file reminder storage
//!
//! Pending reminders live in a single JSON file holding the complete
//! collection; every mutation rewrites the whole snapshot. All
//! read-modify-write cycles run behind one async lock so a conversation
//! commit and a checker sweep can never interleave their writes.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// A pending reminder awaiting delivery
///
/// `time` is the absolute fire time, set once at creation. It serializes
/// as an ISO-8601 local timestamp (`2026-08-07T09:30:00`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    /// Channel the reminder is delivered to
    pub chat_id: u64,
    /// Free-form reminder text supplied by the user
    pub text: String,
    /// Absolute fire time, local clock
    pub time: NaiveDateTime,
}

/// JSON-file-backed store for pending reminders
///
/// A missing file reads as an empty collection; any other I/O or parse
/// failure propagates to the caller.
pub struct ReminderStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ReminderStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Read the full collection of pending reminders
    pub async fn load(&self) -> Result<Vec<Reminder>> {
        let _guard = self.lock.lock().await;
        read_snapshot(&self.path)
    }

    /// Overwrite the persisted collection with the given snapshot
    pub async fn save(&self, reminders: &[Reminder]) -> Result<()> {
        let _guard = self.lock.lock().await;
        write_snapshot(&self.path, reminders)
    }

    /// Add one reminder to the persisted collection
    pub async fn append(&self, reminder: Reminder) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut reminders = read_snapshot(&self.path)?;
        reminders.push(reminder);
        write_snapshot(&self.path, &reminders)
    }

    /// Remove and return every reminder due at `now`
    ///
    /// Due reminders are gone from the file as soon as this returns,
    /// whether or not the caller manages to deliver them. When nothing is
    /// due the file is left untouched.
    pub async fn take_due(&self, now: NaiveDateTime) -> Result<Vec<Reminder>> {
        let _guard = self.lock.lock().await;
        let reminders = read_snapshot(&self.path)?;
        let (due, pending) = partition_due(reminders, now);
        if !due.is_empty() {
            write_snapshot(&self.path, &pending)?;
            debug!("Pruned {} due reminder(s), {} pending", due.len(), pending.len());
        }
        Ok(due)
    }

    /// Pending reminders for one channel, soonest first
    pub async fn for_chat(&self, chat_id: u64) -> Result<Vec<Reminder>> {
        let _guard = self.lock.lock().await;
        let mut reminders: Vec<Reminder> = read_snapshot(&self.path)?
            .into_iter()
            .filter(|r| r.chat_id == chat_id)
            .collect();
        reminders.sort_by_key(|r| r.time);
        Ok(reminders)
    }
}

/// Split a collection into (due, pending) relative to `now`
///
/// A reminder whose fire time equals `now` counts as due.
pub fn partition_due(
    reminders: Vec<Reminder>,
    now: NaiveDateTime,
) -> (Vec<Reminder>, Vec<Reminder>) {
    reminders.into_iter().partition(|r| r.time <= now)
}

fn read_snapshot(path: &Path) -> Result<Vec<Reminder>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read {}", path.display()));
        }
    };

    serde_json::from_str(&content)
        .with_context(|| format!("{} is not a valid reminder file", path.display()))
}

fn write_snapshot(path: &Path, reminders: &[Reminder]) -> Result<()> {
    let content = serde_json::to_string_pretty(reminders)?;
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}
