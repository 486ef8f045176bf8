//! FocusTodo Library
//!
//! This library provides the core functionality for the FocusTodo
//! task-management console. It includes:
//! - Composite task/subtask/project hierarchy with folders
//! - Free and premium client tiers over one operation contract
//! - Pomodoro work/break timer with configurable settings
//! - Productivity and client usage reports
//! - Subscription plans and client registration
//! - Authentication and notification seams
//! - CLI parsing, display utilities and the interactive session

pub mod auth;
pub mod cli;
pub mod client;
pub mod composite;
pub mod notify;
pub mod pomodoro;
pub mod premium;
pub mod report;
pub mod subscription;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{ClientRecord, TimerSettings};

// Re-export the composite hierarchy
pub use composite::{
    Attach, Component, Folder, Node, Project, ProjectHandle, Subtask, SubtaskHandle, Task,
    TaskHandle,
};

// Re-export the client tiers
pub use client::{Client, ClientError, ClientOps, ProjectView, TaskView};
pub use premium::{FolderView, PremiumClient};

// Re-export reporting types
pub use report::{Report, ReportFactory, ReportInput};

// Re-export pomodoro types
pub use pomodoro::{
    run_session, BreakChoice, ConsolePomodoroUi, ContinueChoice, MockPomodoroUi, PomodoroPhase,
    PomodoroSession, PomodoroUi,
};

// Re-export collaborator seams
pub use auth::{Authenticator, StaticAuthenticator, UserIdentity};
pub use notify::{ConsoleNotifier, MockNotifier, Notifier};
pub use subscription::{default_plans, Plan, SubscriptionError, SubscriptionRegistry};
