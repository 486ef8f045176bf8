//! Interactive console session.
//!
//! One blocking request/response loop drives the whole system: login,
//! then a numbered menu over every client operation. Every failure is
//! reported and control returns to the prompt; the only exit is the
//! explicit quit option (or end of input).
//!
//! The session reads from any `BufRead` and writes to any `Write`, so
//! whole conversations can be scripted in tests.

use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::auth::Authenticator;
use crate::cli::Display;
use crate::client::{Client, ClientError, ClientOps, ProjectView, TaskView};
use crate::notify::Notifier;
use crate::pomodoro::{run_session, ConsolePomodoroUi, PomodoroSession};
use crate::premium::PremiumClient;
use crate::subscription::SubscriptionRegistry;
use crate::types::{ClientRecord, TimerSettings};

// ============================================================================
// Tier
// ============================================================================

/// The session's client, at its current tier.
enum Tier {
    Free(Client),
    Premium(PremiumClient),
}

impl Tier {
    fn ops(&mut self) -> &mut dyn ClientOps {
        match self {
            Tier::Free(client) => client,
            Tier::Premium(premium) => premium,
        }
    }

    fn ops_ref(&self) -> &dyn ClientOps {
        match self {
            Tier::Free(client) => client,
            Tier::Premium(premium) => premium,
        }
    }

    fn premium_mut(&mut self) -> Option<&mut PremiumClient> {
        match self {
            Tier::Premium(premium) => Some(premium),
            Tier::Free(_) => None,
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// The interactive console session.
pub struct Session<R: BufRead, W: Write, A: Authenticator, N: Notifier> {
    input: R,
    output: W,
    auth: A,
    notifier: N,
    registry: SubscriptionRegistry,
    tier: Tier,
    username: String,
    tick_interval: Duration,
}

impl<R: BufRead, W: Write, A: Authenticator, N: Notifier> Session<R, W, A, N> {
    /// Creates a session on the free tier with the standard plan table.
    pub fn new(input: R, output: W, auth: A, notifier: N) -> Self {
        Self {
            input,
            output,
            auth,
            notifier,
            registry: SubscriptionRegistry::default(),
            tier: Tier::Free(Client::new()),
            username: String::new(),
            tick_interval: Duration::from_secs(1),
        }
    }

    /// Overrides the pomodoro tick interval (tests use zero).
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Overrides the subscription registry.
    pub fn with_registry(mut self, registry: SubscriptionRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Whether the session has been upgraded to the premium tier.
    pub fn is_premium(&self) -> bool {
        self.tier.ops_ref().premium()
    }

    /// Consumes the session, returning its output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the session until quit or end of input.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "Welcome to FocusTodo\n").context("writing banner")?;
        writeln!(self.output, "Please log in to use the application.")?;

        if !self.login()? {
            return Ok(());
        }

        Display::show_menu(&mut self.output)?;

        loop {
            let Some(option) = self.prompt("\nSelect an option (0 shows the menu): ")? else {
                break;
            };

            match option.as_str() {
                "0" => Display::show_menu(&mut self.output)?,
                "1" => self.create_task()?,
                "2" => self.list_tasks()?,
                "3" => self.delete_task()?,
                "4" => self.create_subtask()?,
                "5" => self.delete_subtask()?,
                "6" => self.create_project()?,
                "7" => self.add_task_to_project()?,
                "8" => self.delete_project()?,
                "9" => self.list_projects()?,
                "10" => self.start_pomodoro()?,
                "11" => self.mark_task_done()?,
                "12" => self.mark_subtask_done()?,
                "13" => self.mark_project_done()?,
                "14" => self.customize_pomodoro()?,
                "15" => self.view_plans()?,
                "16" => self.pay_for_subscription()?,
                "17" => self.set_tag()?,
                "18" => self.create_folder()?,
                "19" => self.assign_project_to_folder()?,
                "20" => self.list_folders()?,
                "21" => self.productivity_report()?,
                "22" => self.clients_report()?,
                "q" | "quit" => {
                    writeln!(self.output, "Goodbye, {}.", self.username)?;
                    break;
                }
                other => {
                    Display::show_error(
                        &mut self.output,
                        &format!("'{other}' is not a valid option"),
                    )?;
                }
            }
        }

        Ok(())
    }

    // ------------------------------------------------------------------------
    // Login
    // ------------------------------------------------------------------------

    fn login(&mut self) -> Result<bool> {
        loop {
            let Some(username) = self.prompt("Please enter your username: ")? else {
                return Ok(false);
            };
            let Some(password) = self.prompt("Please enter your password: ")? else {
                return Ok(false);
            };

            if self.auth.authenticate(&username, &password) {
                self.username = username;
                writeln!(self.output, "Logged in as {}.", self.username)?;
                return Ok(true);
            }
            writeln!(self.output, "Wrong username or password, try again.")?;
        }
    }

    // ------------------------------------------------------------------------
    // Prompt helpers
    // ------------------------------------------------------------------------

    /// Writes a prompt and reads one trimmed line. `None` means end of
    /// input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        let bytes = self
            .input
            .read_line(&mut line)
            .context("reading console input")?;
        if bytes == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompts for a number; a malformed entry is reported and treated
    /// as a cancel.
    fn prompt_number(&mut self, text: &str) -> Result<Option<u32>> {
        let Some(raw) = self.prompt(text)? else {
            return Ok(None);
        };
        match raw.parse::<u32>() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                Display::show_error(&mut self.output, &format!("'{raw}' is not a number"))?;
                Ok(None)
            }
        }
    }

    /// Reports an operation outcome and returns to the menu.
    fn report(&mut self, result: Result<(), ClientError>, success: &str) -> Result<()> {
        match result {
            Ok(()) => writeln!(self.output, "{success}")?,
            Err(err) => Display::show_error(&mut self.output, &err.to_string())?,
        }
        Ok(())
    }

    fn require_premium(&mut self) -> Result<bool> {
        if self.tier.premium_mut().is_some() {
            return Ok(true);
        }
        Display::show_error(
            &mut self.output,
            "this is a premium feature; pay for a subscription first",
        )?;
        Ok(false)
    }

    // ------------------------------------------------------------------------
    // Task handlers
    // ------------------------------------------------------------------------

    fn create_task(&mut self) -> Result<()> {
        let Some(name) = self.prompt("Enter the task name: ")? else {
            return Ok(());
        };
        let result = self.tier.ops().create_task(&name);
        self.report(result, &format!("Task '{name}' created."))
    }

    fn list_tasks(&mut self) -> Result<()> {
        let views: Vec<TaskView> = self.tier.ops_ref().list_tasks().collect();
        if views.is_empty() {
            writeln!(self.output, "No pending tasks.")?;
            return Ok(());
        }
        Display::show_tasks(&mut self.output, views.into_iter())?;
        Ok(())
    }

    fn delete_task(&mut self) -> Result<()> {
        let Some(name) = self.prompt("Enter the task name to delete: ")? else {
            return Ok(());
        };
        let result = self.tier.ops().delete_task(&name);
        self.report(result, &format!("Task '{name}' deleted."))
    }

    fn mark_task_done(&mut self) -> Result<()> {
        let Some(name) = self.prompt("Enter the task name to mark as done: ")? else {
            return Ok(());
        };
        let result = self.tier.ops().mark_task_done(&name);
        self.report(result, &format!("Task '{name}' marked as done."))
    }

    fn set_tag(&mut self) -> Result<()> {
        let Some(task) = self.prompt("Enter the task name: ")? else {
            return Ok(());
        };
        let Some(tag) = self.prompt("Enter the tag: ")? else {
            return Ok(());
        };
        let result = self.tier.ops().set_tag(&task, &tag);
        self.report(result, &format!("Tag '{tag}' set on task '{task}'."))
    }

    // ------------------------------------------------------------------------
    // Subtask handlers
    // ------------------------------------------------------------------------

    fn create_subtask(&mut self) -> Result<()> {
        let Some(task) = self.prompt("Enter the task the subtask belongs to: ")? else {
            return Ok(());
        };
        let Some(subtask) = self.prompt("Enter the subtask name: ")? else {
            return Ok(());
        };
        let result = self.tier.ops().add_subtask(&task, &subtask);
        self.report(result, &format!("Subtask '{subtask}' created."))
    }

    fn delete_subtask(&mut self) -> Result<()> {
        let Some(task) = self.prompt("Enter the task the subtask belongs to: ")? else {
            return Ok(());
        };
        let Some(subtask) = self.prompt("Enter the subtask name to delete: ")? else {
            return Ok(());
        };
        let result = self.tier.ops().remove_subtask(&task, &subtask);
        self.report(result, &format!("Subtask '{subtask}' deleted."))
    }

    fn mark_subtask_done(&mut self) -> Result<()> {
        let Some(task) = self.prompt("Enter the task the subtask belongs to: ")? else {
            return Ok(());
        };
        let Some(subtask) = self.prompt("Enter the subtask name to mark: ")? else {
            return Ok(());
        };
        let result = self.tier.ops().mark_subtask_done(&task, &subtask);
        self.report(result, &format!("Subtask '{subtask}' marked as done."))
    }

    // ------------------------------------------------------------------------
    // Project handlers
    // ------------------------------------------------------------------------

    fn create_project(&mut self) -> Result<()> {
        let Some(name) = self.prompt("Enter the project name: ")? else {
            return Ok(());
        };
        let result = self.tier.ops().create_project(&name);
        self.report(result, &format!("Project '{name}' created."))
    }

    fn delete_project(&mut self) -> Result<()> {
        let Some(name) = self.prompt("Enter the project name to delete: ")? else {
            return Ok(());
        };
        let result = self.tier.ops().delete_project(&name);
        self.report(result, &format!("Project '{name}' deleted."))
    }

    fn add_task_to_project(&mut self) -> Result<()> {
        let Some(project) = self.prompt("Enter the project name: ")? else {
            return Ok(());
        };
        let Some(task) = self.prompt("Enter the task to add to the project: ")? else {
            return Ok(());
        };
        let result = self.tier.ops().add_task_to_project(&task, &project);
        self.report(
            result,
            &format!("Task '{task}' added to project '{project}'."),
        )
    }

    fn list_projects(&mut self) -> Result<()> {
        let views: Vec<ProjectView> = self.tier.ops_ref().list_projects().collect();
        if views.is_empty() {
            writeln!(self.output, "No pending projects.")?;
            return Ok(());
        }
        Display::show_projects(&mut self.output, views.into_iter())?;
        Ok(())
    }

    fn mark_project_done(&mut self) -> Result<()> {
        let Some(name) = self.prompt("Enter the project name to mark as done: ")? else {
            return Ok(());
        };
        let result = self.tier.ops().mark_project_done(&name);
        self.report(result, &format!("Project '{name}' marked as done."))
    }

    // ------------------------------------------------------------------------
    // Pomodoro handlers
    // ------------------------------------------------------------------------

    fn start_pomodoro(&mut self) -> Result<()> {
        let settings = self.tier.ops_ref().timer();
        let mut session = PomodoroSession::new(settings);
        let mut ui = ConsolePomodoroUi::new(&mut self.input, &mut self.output)
            .with_tick_interval(self.tick_interval);
        run_session(&mut session, &mut ui, &self.notifier, &self.username);
        Ok(())
    }

    fn customize_pomodoro(&mut self) -> Result<()> {
        let Some(short) = self.prompt_number("Enter the short break length in minutes: ")? else {
            return Ok(());
        };
        let Some(long) = self.prompt_number("Enter the long break length in minutes: ")? else {
            return Ok(());
        };
        let Some(work) = self.prompt_number("Enter the pomodoro length in minutes: ")? else {
            return Ok(());
        };
        let Some(every) =
            self.prompt_number("Enter the number of pomodoros before a long break: ")?
        else {
            return Ok(());
        };

        let settings = TimerSettings {
            work_minutes: work,
            short_break_minutes: short,
            long_break_minutes: long,
            break_every: every,
        };
        let result = self.tier.ops().set_timer(settings);
        self.report(result, "Pomodoro settings updated.")
    }

    // ------------------------------------------------------------------------
    // Subscription handlers
    // ------------------------------------------------------------------------

    fn view_plans(&mut self) -> Result<()> {
        let plans = self.registry.plans().to_vec();
        Display::show_plans(&mut self.output, &plans)?;
        Ok(())
    }

    fn pay_for_subscription(&mut self) -> Result<()> {
        let username = self.username.clone();
        let tier = std::mem::replace(&mut self.tier, Tier::Free(Client::new()));

        self.tier = match tier {
            Tier::Free(mut client) => {
                match client.register_subscription_intent(&mut self.registry, &username) {
                    Ok(()) => {
                        writeln!(self.output, "You are now a premium client.")?;
                        let mut premium = PremiumClient::upgrade(client);
                        premium.track_client(ClientRecord::new(&username, true));
                        Tier::Premium(premium)
                    }
                    Err(err) => {
                        Display::show_error(&mut self.output, &err.to_string())?;
                        Tier::Free(client)
                    }
                }
            }
            Tier::Premium(mut premium) => {
                // Forwarded to the wrapped client; reports AlreadyPremium.
                if let Err(err) =
                    premium.register_subscription_intent(&mut self.registry, &username)
                {
                    Display::show_error(&mut self.output, &err.to_string())?;
                }
                Tier::Premium(premium)
            }
        };
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Premium handlers
    // ------------------------------------------------------------------------

    fn create_folder(&mut self) -> Result<()> {
        if !self.require_premium()? {
            return Ok(());
        }
        let Some(name) = self.prompt("Enter the folder name: ")? else {
            return Ok(());
        };
        let result = match self.tier.premium_mut() {
            Some(premium) => premium.create_folder(&name),
            None => return Ok(()),
        };
        self.report(result, &format!("Folder '{name}' created."))
    }

    fn assign_project_to_folder(&mut self) -> Result<()> {
        if !self.require_premium()? {
            return Ok(());
        }
        let Some(folder) = self.prompt("Enter the folder name: ")? else {
            return Ok(());
        };
        let Some(project) = self.prompt("Enter the project to assign: ")? else {
            return Ok(());
        };
        let result = match self.tier.premium_mut() {
            Some(premium) => premium.assign_project_to_folder(&project, &folder),
            None => return Ok(()),
        };
        self.report(
            result,
            &format!("Project '{project}' assigned to folder '{folder}'."),
        )
    }

    fn list_folders(&mut self) -> Result<()> {
        if !self.require_premium()? {
            return Ok(());
        }
        let Some(views) = self.tier.premium_mut().map(|premium| premium.list_folders()) else {
            return Ok(());
        };
        if views.is_empty() {
            writeln!(self.output, "No folders.")?;
            return Ok(());
        }
        Display::show_folders(&mut self.output, &views)?;
        Ok(())
    }

    fn productivity_report(&mut self) -> Result<()> {
        if !self.require_premium()? {
            return Ok(());
        }
        let Some(report) = self
            .tier
            .premium_mut()
            .map(|premium| premium.productivity_report())
        else {
            return Ok(());
        };
        match report {
            Some(report) => Display::show_report(&mut self.output, &report)?,
            None => Display::show_error(&mut self.output, "unknown report kind")?,
        }
        Ok(())
    }

    fn clients_report(&mut self) -> Result<()> {
        if !self.require_premium()? {
            return Ok(());
        }
        let Some(report) = self
            .tier
            .premium_mut()
            .map(|premium| premium.clients_report())
        else {
            return Ok(());
        };
        match report {
            Some(report) => Display::show_report(&mut self.output, &report)?,
            None => Display::show_error(&mut self.output, "unknown report kind")?,
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
