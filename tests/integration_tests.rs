//! Integration tests for the FocusTodo library.
//!
//! These tests exercise complete workflows through the public API:
//! - Free-tier task, subtask and project lifecycle
//! - Cascading completion and filtered listings
//! - Subscription payment and the premium upgrade
//! - Folder management and the unfiltered folder listing
//! - Productivity and clients reports
//! - The pomodoro driver against scripted collaborators

use chrono::{Duration, Local};

use focustodo::{
    run_session, BreakChoice, Client, ClientOps, ClientRecord, Component, ContinueChoice,
    MockNotifier, MockPomodoroUi, PomodoroSession, PremiumClient, ReportFactory, ReportInput,
    SubscriptionRegistry, TimerSettings,
};

// ============================================================================
// Test Helpers
// ============================================================================

/// Builds a client with one project containing one tagged task with a
/// subtask.
fn populated_client() -> Client {
    let mut client = Client::new();
    client.create_task("Write report").unwrap();
    client.add_subtask("Write report", "Draft").unwrap();
    client.set_tag("Write report", "Work").unwrap();
    client.create_project("Launch").unwrap();
    client.add_task_to_project("Write report", "Launch").unwrap();
    client
}

// ============================================================================
// Free-Tier Lifecycle
// ============================================================================

#[test]
fn test_task_lifecycle_end_to_end() {
    let mut client = populated_client();

    let tasks: Vec<_> = client.list_tasks().collect();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].name, "Write report");
    assert_eq!(tasks[0].tag, "Work");
    assert_eq!(tasks[0].subtasks, ["Draft".to_string()]);

    client.mark_task_done("Write report").unwrap();
    assert_eq!(client.list_tasks().count(), 0);
    assert_eq!(client.done_count(), 1);
}

#[test]
fn test_project_completion_cascades_and_filters() {
    let mut client = populated_client();
    client.create_task("Review").unwrap();
    client.add_task_to_project("Review", "Launch").unwrap();

    client.mark_project_done("Launch").unwrap();

    // The project and everything under it disappears from listings.
    assert_eq!(client.list_projects().count(), 0);
    assert_eq!(client.list_tasks().count(), 0);

    // Cascading completion does not feed the done-log.
    assert_eq!(client.done_count(), 0);
}

#[test]
fn test_shared_task_identity_between_listing_and_project() {
    let mut client = populated_client();

    // Marking through the global listing hides the task inside the
    // project listing too, because both hold the same entity.
    client.mark_task_done("Write report").unwrap();

    let projects: Vec<_> = client.list_projects().collect();
    assert_eq!(projects.len(), 1);
    assert!(projects[0].tasks.is_empty());
}

#[test]
fn test_subtask_completion_filters_listing_only() {
    let mut client = populated_client();
    client.add_subtask("Write report", "Edit").unwrap();

    client.mark_subtask_done("Write report", "Draft").unwrap();

    let tasks: Vec<_> = client.list_tasks().collect();
    assert_eq!(tasks[0].subtasks, ["Edit".to_string()]);
    // Subtasks never reach the done-log.
    assert_eq!(client.done_count(), 0);
}

#[test]
fn test_duplicate_names_rejected_across_operations() {
    let mut client = populated_client();

    assert!(client.create_task("Write report").unwrap_err().is_already_exists());
    assert!(client
        .add_subtask("Write report", "Draft")
        .unwrap_err()
        .is_already_exists());
    assert!(client.create_project("Launch").unwrap_err().is_already_exists());
    assert!(client
        .add_task_to_project("Write report", "Launch")
        .unwrap_err()
        .is_already_exists());
}

// ============================================================================
// Subscription and Upgrade
// ============================================================================

#[test]
fn test_payment_then_upgrade_preserves_state() {
    let mut registry = SubscriptionRegistry::default();
    let mut client = populated_client();
    client.mark_task_done("Write report").unwrap();

    client
        .register_subscription_intent(&mut registry, "ana")
        .unwrap();
    assert!(client.premium());
    assert_eq!(registry.clients(), ["ana".to_string()]);

    let premium = PremiumClient::upgrade(client);
    assert_eq!(premium.done_count(), 1);
    assert_eq!(premium.list_projects().count(), 1);
}

#[test]
fn test_registry_is_shared_across_clients() {
    let mut registry = SubscriptionRegistry::default();
    let mut first = Client::new();
    let mut second = Client::new();

    first
        .register_subscription_intent(&mut registry, "ana")
        .unwrap();

    // A different client object paying under the same username is
    // refused by the shared registry.
    let err = second
        .register_subscription_intent(&mut registry, "ana")
        .unwrap_err();
    assert_eq!(err.to_string(), "'ana' is already registered");
    assert!(!second.premium());
}

// ============================================================================
// Premium Folders and Reports
// ============================================================================

#[test]
fn test_folder_listing_shows_done_items() {
    let mut premium = PremiumClient::upgrade(populated_client());
    premium.create_folder("Clients").unwrap();
    premium.assign_project_to_folder("Launch", "Clients").unwrap();

    premium.mark_project_done("Launch").unwrap();

    // Base listing filters; the folder listing does not.
    assert_eq!(premium.list_projects().count(), 0);
    let folders = premium.list_folders();
    assert_eq!(folders[0].projects[0].name, "Launch");
    assert_eq!(folders[0].projects[0].tasks[0].name, "Write report");
    assert_eq!(folders[0].projects[0].tasks[0].subtasks, ["Draft".to_string()]);
}

#[test]
fn test_productivity_report_windows() {
    let mut premium = PremiumClient::upgrade(Client::new());
    for name in ["Old", "Recent", "Today"] {
        premium.create_task(name).unwrap();
    }

    let today = Local::now().date_naive();
    premium.mark_task_done("Today").unwrap();
    premium.mark_task_done("Recent").unwrap();
    premium.mark_task_done("Old").unwrap();

    // Push two entries back in time through the shared handles.
    for handle in premium.inner().done_log() {
        let name = handle.borrow().name().to_string();
        match name.as_str() {
            "Recent" => handle.borrow_mut().mark_done_on(today - Duration::days(3)),
            "Old" => handle.borrow_mut().mark_done_on(today - Duration::days(30)),
            _ => {}
        }
    }

    let report = premium.productivity_report().expect("known kind");
    assert_eq!(report.title, "Tasks Report");
    assert!(report.content.contains("Total completed tasks: 3"));
    assert!(report.content.contains("Weekly completed tasks: 2"));
    assert!(report.content.contains("Today completed tasks: 1"));
}

#[test]
fn test_clients_report_counts_premium_share() {
    let mut premium = PremiumClient::upgrade(Client::new());
    premium.track_client(ClientRecord::new("ana", true));
    premium.track_client(ClientRecord::new("javier", false));
    premium.track_client(ClientRecord::new("sam", true));

    let report = premium.clients_report().expect("known kind");
    assert!(report.content.contains("Number of clients: 3"));
    assert!(report.content.contains("Number of premium clients: 2"));
}

#[test]
fn test_unknown_report_kind_is_none() {
    let records = [ClientRecord::new("ana", true)];
    assert!(ReportFactory::build("Weather", ReportInput::Clients(&records)).is_none());
}

// ============================================================================
// Pomodoro Driver
// ============================================================================

#[test]
fn test_pomodoro_cycle_with_client_settings() {
    let mut client = Client::new();
    client
        .set_timer(TimerSettings {
            work_minutes: 1,
            short_break_minutes: 1,
            long_break_minutes: 2,
            break_every: 2,
        })
        .unwrap();

    let mut session = PomodoroSession::new(client.timer());
    let mut ui = MockPomodoroUi::new();
    ui.push_break_choice(BreakChoice::Skip);
    ui.push_break_choice(BreakChoice::Take);
    ui.push_continue_choice(ContinueChoice::Continue);
    ui.push_continue_choice(ContinueChoice::Stop);
    let notifier = MockNotifier::new();

    run_session(&mut session, &mut ui, &notifier, "ana");

    assert!(session.is_stopped());
    assert_eq!(session.completed(), 2);

    // The second break is the long one and was taken: two 1-minute work
    // countdowns plus one 2-minute break countdown, each inclusive of 0.
    assert_eq!(ui.ticks.len(), 61 + 61 + 121);

    let sent = notifier.sent();
    assert_eq!(sent.len(), 3);
    assert!(sent.iter().take(2).all(|(to, msg)| to == "ana" && msg == "Time's up!"));
    assert_eq!(sent[2].1, "Pomodoro session stopped.");
}

#[test]
fn test_invalid_timer_settings_rejected_before_session() {
    let mut client = Client::new();
    let err = client
        .set_timer(TimerSettings::default().with_work_minutes(0))
        .unwrap_err();
    assert!(err.to_string().contains("work length"));
    // The previous settings stay in force.
    assert_eq!(client.timer(), TimerSettings::default());
}
