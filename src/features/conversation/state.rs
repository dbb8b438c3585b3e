//! Conversation state machine types
//!
//! One enum per user session. The staged reminder text travels inside the
//! variants, so a session can never expect two different inputs at once.

use std::ops::RangeInclusive;

/// Counts accepted when the user picks "in days"
pub const DAYS_RANGE: RangeInclusive<i64> = 1..=6;

/// Counts accepted when the user picks "in weeks"
pub const WEEKS_RANGE: RangeInclusive<i64> = 1..=3;

/// Counts accepted when the user picks "in months"
pub const MONTHS_RANGE: RangeInclusive<i64> = 1..=11;

/// A month is a fixed 30-day block, by policy. Fire times are offsets
/// from "now", not calendar dates.
pub const DAYS_PER_MONTH: i64 = 30;

/// A year is a fixed 365-day block, same policy as months.
pub const DAYS_PER_YEAR: i64 = 365;

/// What the bot expects next from one user
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConversationState {
    /// No reminder flow in progress
    #[default]
    Idle,
    /// Waiting for the reminder text
    AwaitingReminderText,
    /// Text staged, waiting for a duration button press
    AwaitingDurationChoice { text: String },
    /// Waiting for a day count in [1,6]
    AwaitingDaysCount { text: String },
    /// Waiting for a week count in [1,3]
    AwaitingWeeksCount { text: String },
    /// Waiting for a month count in [1,11]
    AwaitingMonthsCount { text: String },
}

/// A duration button press, decoded from its component payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationChoice {
    Days,
    Weeks,
    Months,
    Year,
}

impl DurationChoice {
    /// Decode a button payload, accepting the legacy `*_input` ids that
    /// older prompt messages still carry
    pub fn from_payload(payload: &str) -> Option<Self> {
        match payload {
            "days" | "days_input" => Some(Self::Days),
            "weeks" | "weeks_input" => Some(Self::Weeks),
            "months" | "month_input" => Some(Self::Months),
            "year" => Some(Self::Year),
            _ => None,
        }
    }
}

/// Parse a user-supplied count, requiring it to fall inside `range`
pub fn parse_count(input: &str, range: &RangeInclusive<i64>) -> Option<i64> {
    let n: i64 = input.trim().parse().ok()?;
    range.contains(&n).then_some(n)
}
