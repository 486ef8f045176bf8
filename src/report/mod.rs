//! Usage reports.
//!
//! `ReportFactory` is a simple factory: it knows two report kinds and
//! answers `None` for anything else. Time windows ("today", "last 7
//! days") are evaluated against the moment of generation, so the same
//! done-log can produce different numbers on different days.

use std::fmt;

use chrono::{DateTime, Duration, Local};

use crate::composite::{Component, TaskHandle};
use crate::types::ClientRecord;

// ============================================================================
// Report
// ============================================================================

/// A generated report: four logical fields rendered as a text block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Report title
    pub title: String,
    /// What the report shows
    pub description: String,
    /// Moment the report was generated
    pub generated_at: DateTime<Local>,
    /// The computed values, one per line
    pub content: String,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Description: {}", self.description)?;
        writeln!(f, "Date: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S"))?;
        write!(f, "Content:\n{}", self.content)
    }
}

// ============================================================================
// ReportInput
// ============================================================================

/// Input collections the factory can build a report from.
#[derive(Debug, Clone, Copy)]
pub enum ReportInput<'a> {
    /// The done-tasks log
    Tasks(&'a [TaskHandle]),
    /// Registered client records
    Clients(&'a [ClientRecord]),
}

// ============================================================================
// ReportFactory
// ============================================================================

/// Builds one of the two known report kinds.
pub struct ReportFactory;

impl ReportFactory {
    /// Builds a report as of now.
    ///
    /// Returns `None` for an unknown kind or a kind/input mismatch;
    /// callers treat that as a known outcome, not an error to recover
    /// from.
    pub fn build(kind: &str, input: ReportInput<'_>) -> Option<Report> {
        Self::build_at(kind, input, Local::now())
    }

    /// Builds a report evaluated against the given moment.
    pub fn build_at(kind: &str, input: ReportInput<'_>, now: DateTime<Local>) -> Option<Report> {
        match (kind, input) {
            ("Tasks", ReportInput::Tasks(done_log)) => Some(Self::tasks_report(done_log, now)),
            ("Clients", ReportInput::Clients(records)) => Some(Self::clients_report(records, now)),
            _ => None,
        }
    }

    fn tasks_report(done_log: &[TaskHandle], now: DateTime<Local>) -> Report {
        let today = now.date_naive();
        let week_floor = today - Duration::days(7);

        let total = done_log.len();
        let mut today_count = 0usize;
        let mut weekly_count = 0usize;

        for task in done_log {
            let Some(completed) = task.borrow().completed_on() else {
                continue;
            };
            if completed == today {
                today_count += 1;
            }
            // Trailing 7 days, inclusive; today counts too.
            if completed >= week_floor {
                weekly_count += 1;
            }
        }

        Report {
            title: "Tasks Report".to_string(),
            description: "Tasks you completed and how your productivity was.".to_string(),
            generated_at: now,
            content: format!(
                "  Total completed tasks: {total}\n  Weekly completed tasks: {weekly_count}\n  Today completed tasks: {today_count}\n"
            ),
        }
    }

    fn clients_report(records: &[ClientRecord], now: DateTime<Local>) -> Report {
        let total = records.len();
        let premium = records.iter().filter(|r| r.premium).count();

        Report {
            title: "Clients Report".to_string(),
            description: "Registered clients and how many of them are premium.".to_string(),
            generated_at: now,
            content: format!(
                "  Number of clients: {total}\n  Number of premium clients: {premium}\n"
            ),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
