//! Pomodoro work/break cycle.
//!
//! This module provides:
//! - `PomodoroSession`: the finite state machine over the timer
//!   settings (work, short break, long break, long-break cadence)
//! - `PomodoroUi`: the prompt/countdown seam, with a console
//!   implementation and a scripted mock for tests
//! - `run_session`: the blocking interactive driver
//!
//! Countdowns decrement once per tick down to and including zero for
//! both work and break phases.

use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::notify::Notifier;
use crate::types::TimerSettings;

// ============================================================================
// PomodoroPhase
// ============================================================================

/// The current phase of the pomodoro cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PomodoroPhase {
    /// A work session is in progress
    Working,
    /// Work finished; a short break is offered
    ShortBreakPending,
    /// Work finished; a long break is offered
    LongBreakPending,
    /// The session has ended
    Stopped,
}

impl PomodoroPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            PomodoroPhase::Working => "working",
            PomodoroPhase::ShortBreakPending => "short_break_pending",
            PomodoroPhase::LongBreakPending => "long_break_pending",
            PomodoroPhase::Stopped => "stopped",
        }
    }
}

// ============================================================================
// Choices
// ============================================================================

/// The user's answer to a break offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakChoice {
    /// Take the break and count it down
    Take,
    /// Skip the break
    Skip,
}

impl BreakChoice {
    /// Parses a menu entry. An invalid entry skips the break.
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => BreakChoice::Take,
            _ => BreakChoice::Skip,
        }
    }
}

/// The user's answer to the continuation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinueChoice {
    /// Start the next work session
    Continue,
    /// End the pomodoro session
    Stop,
}

impl ContinueChoice {
    /// Parses a menu entry. An invalid entry stops, it is not a retry.
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => ContinueChoice::Continue,
            _ => ContinueChoice::Stop,
        }
    }
}

// ============================================================================
// PomodoroSession
// ============================================================================

/// The work/break cycle state machine.
#[derive(Debug, Clone)]
pub struct PomodoroSession {
    settings: TimerSettings,
    completed: u32,
    phase: PomodoroPhase,
}

impl PomodoroSession {
    /// Creates a session in the working phase.
    pub fn new(settings: TimerSettings) -> Self {
        Self {
            settings,
            completed: 0,
            phase: PomodoroPhase::Working,
        }
    }

    /// The session's timer settings.
    pub fn settings(&self) -> TimerSettings {
        self.settings
    }

    /// The current phase.
    pub fn phase(&self) -> PomodoroPhase {
        self.phase
    }

    /// Number of completed pomodoros.
    pub fn completed(&self) -> u32 {
        self.completed
    }

    /// Records a finished work session and selects the break branch.
    ///
    /// The long-break branch is taken exactly when the 1-indexed count
    /// after the increment is a multiple of `break_every`.
    pub fn finish_work(&mut self) -> PomodoroPhase {
        self.completed += 1;
        self.phase = if self.completed % self.settings.break_every == 0 {
            PomodoroPhase::LongBreakPending
        } else {
            PomodoroPhase::ShortBreakPending
        };
        self.phase
    }

    /// Length in seconds of the pending break, if one is pending.
    pub fn pending_break_seconds(&self) -> Option<u32> {
        match self.phase {
            PomodoroPhase::ShortBreakPending => Some(self.settings.short_break_seconds()),
            PomodoroPhase::LongBreakPending => Some(self.settings.long_break_seconds()),
            _ => None,
        }
    }

    /// Returns to the working phase for the next pomodoro.
    pub fn resume_work(&mut self) {
        self.phase = PomodoroPhase::Working;
    }

    /// Ends the session.
    pub fn stop(&mut self) {
        self.phase = PomodoroPhase::Stopped;
    }

    /// True once the session has ended.
    pub fn is_stopped(&self) -> bool {
        self.phase == PomodoroPhase::Stopped
    }
}

// ============================================================================
// PomodoroUi
// ============================================================================

/// Prompt and countdown seam for the interactive driver.
pub trait PomodoroUi {
    /// Shows a line of session progress text.
    fn announce(&mut self, text: &str);

    /// Renders one countdown step and waits the tick interval.
    fn tick(&mut self, remaining_seconds: u32);

    /// Asks whether to take or skip the pending break.
    fn break_choice(&mut self) -> BreakChoice;

    /// Asks whether to continue with another pomodoro.
    fn continue_choice(&mut self) -> ContinueChoice;
}

// ============================================================================
// ConsolePomodoroUi
// ============================================================================

/// Console implementation: prints the countdown in mm:ss and reads
/// choices from the input stream.
pub struct ConsolePomodoroUi<'a, R: BufRead, W: Write> {
    input: &'a mut R,
    output: &'a mut W,
    tick_interval: Duration,
}

impl<'a, R: BufRead, W: Write> ConsolePomodoroUi<'a, R, W> {
    /// Creates a console UI ticking once per second.
    pub fn new(input: &'a mut R, output: &'a mut W) -> Self {
        Self {
            input,
            output,
            tick_interval: Duration::from_secs(1),
        }
    }

    /// Overrides the tick interval.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    fn read_line(&mut self) -> String {
        let mut line = String::new();
        // EOF or a read error behaves like an empty (invalid) entry.
        let _ = self.input.read_line(&mut line);
        line
    }
}

impl<R: BufRead, W: Write> PomodoroUi for ConsolePomodoroUi<'_, R, W> {
    fn announce(&mut self, text: &str) {
        let _ = writeln!(self.output, "\n{text}");
    }

    fn tick(&mut self, remaining_seconds: u32) {
        let minutes = remaining_seconds / 60;
        let seconds = remaining_seconds % 60;
        let _ = write!(self.output, "{minutes:02}:{seconds:02}\r");
        let _ = self.output.flush();
        if !self.tick_interval.is_zero() {
            std::thread::sleep(self.tick_interval);
        }
    }

    fn break_choice(&mut self) -> BreakChoice {
        let _ = write!(self.output, "\nEnter 1 to take the break or 0 to skip: ");
        let _ = self.output.flush();
        let line = self.read_line();
        BreakChoice::parse(&line)
    }

    fn continue_choice(&mut self) -> ContinueChoice {
        let _ = write!(self.output, "\nEnter 1 to continue or 0 to stop: ");
        let _ = self.output.flush();
        let line = self.read_line();
        ContinueChoice::parse(&line)
    }
}

// ============================================================================
// MockPomodoroUi
// ============================================================================

/// Scripted UI for tests: answers prompts from preloaded queues and
/// records everything it is shown.
#[derive(Debug, Default)]
pub struct MockPomodoroUi {
    break_choices: VecDeque<BreakChoice>,
    continue_choices: VecDeque<ContinueChoice>,
    /// Announcements shown, in order
    pub announcements: Vec<String>,
    /// Every countdown value ticked, in order
    pub ticks: Vec<u32>,
}

impl MockPomodoroUi {
    /// Creates a mock with empty scripts (skip every break, stop at the
    /// first continuation prompt).
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a break choice.
    pub fn push_break_choice(&mut self, choice: BreakChoice) {
        self.break_choices.push_back(choice);
    }

    /// Queues a continuation choice.
    pub fn push_continue_choice(&mut self, choice: ContinueChoice) {
        self.continue_choices.push_back(choice);
    }
}

impl PomodoroUi for MockPomodoroUi {
    fn announce(&mut self, text: &str) {
        self.announcements.push(text.to_string());
    }

    fn tick(&mut self, remaining_seconds: u32) {
        self.ticks.push(remaining_seconds);
    }

    fn break_choice(&mut self) -> BreakChoice {
        self.break_choices.pop_front().unwrap_or(BreakChoice::Skip)
    }

    fn continue_choice(&mut self) -> ContinueChoice {
        self.continue_choices
            .pop_front()
            .unwrap_or(ContinueChoice::Stop)
    }
}

// ============================================================================
// Driver
// ============================================================================

/// Counts down to and including zero, one tick per step.
fn countdown(seconds: u32, ui: &mut dyn PomodoroUi) {
    let mut remaining = seconds;
    loop {
        ui.tick(remaining);
        if remaining == 0 {
            break;
        }
        remaining -= 1;
    }
}

/// Runs the interactive pomodoro loop until the user stops.
///
/// The loop terminates only on an explicit stop choice or an invalid
/// continuation entry (treated as stop). A terminal notification is
/// delivered on the way out.
pub fn run_session(
    session: &mut PomodoroSession,
    ui: &mut dyn PomodoroUi,
    notifier: &dyn Notifier,
    recipient: &str,
) {
    let settings = session.settings();

    loop {
        ui.announce(&format!(
            "Pomodoro timer started for {} minutes.",
            settings.work_minutes
        ));
        countdown(settings.work_seconds(), ui);
        notifier.deliver(recipient, "Time's up!");

        let pending = session.finish_work();
        let (label, minutes) = match pending {
            PomodoroPhase::LongBreakPending => ("long", settings.long_break_minutes),
            _ => ("short", settings.short_break_minutes),
        };
        ui.announce(&format!("It's time for a {label} break of {minutes} minutes."));

        match ui.break_choice() {
            BreakChoice::Take => {
                // pending_break_seconds is Some while a break is pending
                if let Some(seconds) = session.pending_break_seconds() {
                    countdown(seconds, ui);
                }
            }
            BreakChoice::Skip => {
                ui.announce(&format!("Skipping the {label} break."));
            }
        }

        match ui.continue_choice() {
            ContinueChoice::Continue => session.resume_work(),
            ContinueChoice::Stop => {
                session.stop();
                notifier.deliver(recipient, "Pomodoro session stopped.");
                break;
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
