//! Core value types for FocusTodo.
//!
//! This module defines the data structures shared across the crate:
//! - Timer configuration with validation
//! - Client records used by the clients report

use serde::{Deserialize, Serialize};

// ============================================================================
// TimerSettings
// ============================================================================

/// Configuration for the pomodoro timer.
///
/// All durations are minutes. Values must be at least 1; there is no
/// upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Work session length in minutes
    pub work_minutes: u32,
    /// Short break length in minutes
    pub short_break_minutes: u32,
    /// Long break length in minutes
    pub long_break_minutes: u32,
    /// Number of completed pomodoros between long breaks
    pub break_every: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            break_every: 4,
        }
    }
}

impl TimerSettings {
    /// Creates settings with the specified work duration.
    pub fn with_work_minutes(mut self, minutes: u32) -> Self {
        self.work_minutes = minutes;
        self
    }

    /// Creates settings with the specified short break duration.
    pub fn with_short_break_minutes(mut self, minutes: u32) -> Self {
        self.short_break_minutes = minutes;
        self
    }

    /// Creates settings with the specified long break duration.
    pub fn with_long_break_minutes(mut self, minutes: u32) -> Self {
        self.long_break_minutes = minutes;
        self
    }

    /// Creates settings with the specified long-break cadence.
    pub fn with_break_every(mut self, count: u32) -> Self {
        self.break_every = count;
        self
    }

    /// Validates the settings.
    ///
    /// Returns an error message if any value is zero.
    pub fn validate(&self) -> Result<(), String> {
        if self.work_minutes < 1 {
            return Err("work length must be at least 1 minute".to_string());
        }
        if self.short_break_minutes < 1 {
            return Err("short break must be at least 1 minute".to_string());
        }
        if self.long_break_minutes < 1 {
            return Err("long break must be at least 1 minute".to_string());
        }
        if self.break_every < 1 {
            return Err("long break cadence must be at least 1 pomodoro".to_string());
        }
        Ok(())
    }

    /// Work session length in seconds.
    pub fn work_seconds(&self) -> u32 {
        self.work_minutes * 60
    }

    /// Short break length in seconds.
    pub fn short_break_seconds(&self) -> u32 {
        self.short_break_minutes * 60
    }

    /// Long break length in seconds.
    pub fn long_break_seconds(&self) -> u32 {
        self.long_break_minutes * 60
    }
}

// ============================================================================
// ClientRecord
// ============================================================================

/// A registered client as seen by the admin bookkeeping and the
/// clients report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    /// Username the client registered under
    pub username: String,
    /// Whether the client is on the premium tier
    pub premium: bool,
}

impl ClientRecord {
    /// Creates a new client record.
    pub fn new(username: impl Into<String>, premium: bool) -> Self {
        Self {
            username: username.into(),
            premium,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
