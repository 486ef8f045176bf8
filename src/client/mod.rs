//! Client root aggregate.
//!
//! The `Client` owns the global task and project collections and
//! mediates every mutation of the composite tree. `ClientOps` is the
//! uniform surface shared by the free tier (`Client`) and the premium
//! tier (`PremiumClient` decorator): callers cannot distinguish base
//! behavior between the two.

use std::rc::Rc;

use crate::composite::{
    Component, Node, Project, ProjectHandle, Subtask, Task, TaskHandle,
};
use crate::subscription::SubscriptionRegistry;
use crate::types::TimerSettings;

pub mod error;

pub use error::ClientError;

// ============================================================================
// Listing views
// ============================================================================

/// A task as it appears in a listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TaskView {
    /// Task name
    pub name: String,
    /// Task tag
    pub tag: String,
    /// Subtask names, in insertion order
    pub subtasks: Vec<String>,
}

impl TaskView {
    /// Builds a view of a task with done subtasks suppressed.
    pub fn filtered(task: &TaskHandle) -> Self {
        let task = task.borrow();
        Self {
            name: task.name().to_string(),
            tag: task.tag().to_string(),
            subtasks: task
                .subtasks()
                .iter()
                .filter(|s| !s.borrow().status())
                .map(|s| s.borrow().name().to_string())
                .collect(),
        }
    }

    /// Builds a view of a task with every subtask included.
    pub fn unfiltered(task: &TaskHandle) -> Self {
        let task = task.borrow();
        Self {
            name: task.name().to_string(),
            tag: task.tag().to_string(),
            subtasks: task
                .subtasks()
                .iter()
                .map(|s| s.borrow().name().to_string())
                .collect(),
        }
    }
}

/// A project as it appears in a listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ProjectView {
    /// Project name
    pub name: String,
    /// Contained tasks
    pub tasks: Vec<TaskView>,
}

impl ProjectView {
    /// Builds a view of a project with done tasks and subtasks suppressed.
    pub fn filtered(project: &ProjectHandle) -> Self {
        let project = project.borrow();
        Self {
            name: project.name().to_string(),
            tasks: project
                .tasks()
                .iter()
                .filter(|t| !t.borrow().status())
                .map(TaskView::filtered)
                .collect(),
        }
    }

    /// Builds a view of a project with everything included.
    pub fn unfiltered(project: &ProjectHandle) -> Self {
        let project = project.borrow();
        Self {
            name: project.name().to_string(),
            tasks: project.tasks().iter().map(TaskView::unfiltered).collect(),
        }
    }
}

// ============================================================================
// ClientOps
// ============================================================================

/// Base-tier operations shared by free and premium clients.
///
/// The decorator forwards every one of these unchanged; only the
/// premium-specific operations live outside the trait.
pub trait ClientOps {
    /// Creates a task with a globally unique name.
    fn create_task(&mut self, name: &str) -> Result<(), ClientError>;

    /// Deletes a task from the global list.
    fn delete_task(&mut self, name: &str) -> Result<(), ClientError>;

    /// Creates a detached subtask. The caller attaches it explicitly.
    fn create_subtask(&self, name: &str) -> Subtask;

    /// Creates a subtask and attaches it to the named task.
    fn add_subtask(&mut self, task: &str, subtask: &str) -> Result<(), ClientError>;

    /// Removes a subtask from the named task.
    fn remove_subtask(&mut self, task: &str, subtask: &str) -> Result<(), ClientError>;

    /// Creates a project with a globally unique name.
    fn create_project(&mut self, name: &str) -> Result<(), ClientError>;

    /// Deletes a project from the global list.
    fn delete_project(&mut self, name: &str) -> Result<(), ClientError>;

    /// Shares an existing task into a project. Membership is checked by
    /// name, not identity.
    fn add_task_to_project(&mut self, task: &str, project: &str) -> Result<(), ClientError>;

    /// Marks a task done, cascading to its subtasks, and records it in
    /// the done-log (unless it was already done).
    fn mark_task_done(&mut self, name: &str) -> Result<(), ClientError>;

    /// Marks a subtask done, resolved through the owning task's
    /// children.
    fn mark_subtask_done(&mut self, task: &str, subtask: &str) -> Result<(), ClientError>;

    /// Marks a project done, cascading to tasks and subtasks.
    fn mark_project_done(&mut self, name: &str) -> Result<(), ClientError>;

    /// Replaces a task's tag.
    fn set_tag(&mut self, task: &str, tag: &str) -> Result<(), ClientError>;

    /// Replaces the timer configuration after validation.
    fn set_timer(&mut self, settings: TimerSettings) -> Result<(), ClientError>;

    /// The current timer configuration.
    fn timer(&self) -> TimerSettings;

    /// Lists incomplete tasks; done tasks and subtasks are suppressed.
    ///
    /// Each call returns a fresh iterator over the current state.
    fn list_tasks(&self) -> Box<dyn Iterator<Item = TaskView> + '_>;

    /// Lists incomplete projects with their incomplete tasks nested.
    fn list_projects(&self) -> Box<dyn Iterator<Item = ProjectView> + '_>;

    /// Registers the user with the subscription service and flips the
    /// premium flag. Becoming premium is a one-way transition.
    fn register_subscription_intent(
        &mut self,
        registry: &mut SubscriptionRegistry,
        username: &str,
    ) -> Result<(), ClientError>;

    /// Whether this client is on the premium tier.
    fn premium(&self) -> bool;

    /// Number of entries in the done-log.
    fn done_count(&self) -> usize;
}

// ============================================================================
// Client
// ============================================================================

/// The free-tier client: owns the task/project collections, the timer
/// configuration and the done-log.
#[derive(Debug, Default)]
pub struct Client {
    tasks: Vec<TaskHandle>,
    projects: Vec<ProjectHandle>,
    timer: TimerSettings,
    done_log: Vec<TaskHandle>,
    premium: bool,
}

impl Client {
    /// Creates a client with default timer settings and empty
    /// collections.
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            projects: Vec::new(),
            timer: TimerSettings::default(),
            done_log: Vec::new(),
            premium: false,
        }
    }

    /// The global task handles, in creation order.
    pub fn tasks(&self) -> &[TaskHandle] {
        &self.tasks
    }

    /// The global project handles, in creation order.
    pub fn projects(&self) -> &[ProjectHandle] {
        &self.projects
    }

    /// The done-log, in completion order.
    pub fn done_log(&self) -> &[TaskHandle] {
        &self.done_log
    }

    /// Marks the client premium. Used by the decorator upgrade; there
    /// is no way back.
    pub(crate) fn set_premium(&mut self) {
        self.premium = true;
    }

    fn find_task(&self, name: &str) -> Option<&TaskHandle> {
        self.tasks.iter().find(|t| t.borrow().name() == name)
    }

    fn find_project(&self, name: &str) -> Option<&ProjectHandle> {
        self.projects.iter().find(|p| p.borrow().name() == name)
    }
}

impl ClientOps for Client {
    fn create_task(&mut self, name: &str) -> Result<(), ClientError> {
        if self.find_task(name).is_some() {
            return Err(ClientError::TaskAlreadyExists(name.to_string()));
        }
        tracing::debug!(task = name, "creating task");
        self.tasks.push(Task::new(name).into_handle());
        Ok(())
    }

    fn delete_task(&mut self, name: &str) -> Result<(), ClientError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.borrow().name() == name)
            .ok_or_else(|| ClientError::TaskNotFound(name.to_string()))?;
        tracing::debug!(task = name, "deleting task");
        self.tasks.remove(index);
        Ok(())
    }

    fn create_subtask(&self, name: &str) -> Subtask {
        Subtask::new(name)
    }

    fn add_subtask(&mut self, task: &str, subtask: &str) -> Result<(), ClientError> {
        let handle = self
            .find_task(task)
            .ok_or_else(|| ClientError::TaskNotFound(task.to_string()))?;

        if handle.borrow().find_child(subtask).is_some() {
            return Err(ClientError::SubtaskAlreadyExists {
                task: task.to_string(),
                subtask: subtask.to_string(),
            });
        }

        tracing::debug!(task, subtask, "attaching subtask");
        let child = Node::Subtask(self.create_subtask(subtask).into_handle());
        handle.borrow_mut().add_child(child);
        Ok(())
    }

    fn remove_subtask(&mut self, task: &str, subtask: &str) -> Result<(), ClientError> {
        let handle = self
            .find_task(task)
            .ok_or_else(|| ClientError::TaskNotFound(task.to_string()))?;

        handle
            .borrow_mut()
            .remove_child(subtask)
            .map(|_| ())
            .ok_or_else(|| ClientError::SubtaskNotFound {
                task: task.to_string(),
                subtask: subtask.to_string(),
            })
    }

    fn create_project(&mut self, name: &str) -> Result<(), ClientError> {
        if self.find_project(name).is_some() {
            return Err(ClientError::ProjectAlreadyExists(name.to_string()));
        }
        tracing::debug!(project = name, "creating project");
        self.projects.push(Project::new(name).into_handle());
        Ok(())
    }

    fn delete_project(&mut self, name: &str) -> Result<(), ClientError> {
        let index = self
            .projects
            .iter()
            .position(|p| p.borrow().name() == name)
            .ok_or_else(|| ClientError::ProjectNotFound(name.to_string()))?;
        tracing::debug!(project = name, "deleting project");
        self.projects.remove(index);
        Ok(())
    }

    fn add_task_to_project(&mut self, task: &str, project: &str) -> Result<(), ClientError> {
        let task_handle = self
            .find_task(task)
            .ok_or_else(|| ClientError::TaskNotFound(task.to_string()))?;
        let project_handle = self
            .find_project(project)
            .ok_or_else(|| ClientError::ProjectNotFound(project.to_string()))?;

        if project_handle.borrow().find_child(task).is_some() {
            return Err(ClientError::TaskAlreadyInProject {
                task: task.to_string(),
                project: project.to_string(),
            });
        }

        tracing::debug!(task, project, "sharing task into project");
        project_handle
            .borrow_mut()
            .add_child(Node::Task(Rc::clone(task_handle)));
        Ok(())
    }

    fn mark_task_done(&mut self, name: &str) -> Result<(), ClientError> {
        let handle = self
            .find_task(name)
            .map(Rc::clone)
            .ok_or_else(|| ClientError::TaskNotFound(name.to_string()))?;

        // Re-marking refreshes the completion date but must not grow
        // the done-log.
        let already_done = handle.borrow().status();
        handle.borrow_mut().mark_done();
        if !already_done {
            self.done_log.push(handle);
        }
        tracing::debug!(task = name, "marked task done");
        Ok(())
    }

    fn mark_subtask_done(&mut self, task: &str, subtask: &str) -> Result<(), ClientError> {
        let handle = self
            .find_task(task)
            .ok_or_else(|| ClientError::TaskNotFound(task.to_string()))?;

        // Resolved through the owning task's children, never the global
        // task list.
        match handle.borrow().find_child(subtask) {
            Some(Node::Subtask(child)) => {
                child.borrow_mut().mark_done();
                Ok(())
            }
            _ => Err(ClientError::SubtaskNotFound {
                task: task.to_string(),
                subtask: subtask.to_string(),
            }),
        }
    }

    fn mark_project_done(&mut self, name: &str) -> Result<(), ClientError> {
        let handle = self
            .find_project(name)
            .ok_or_else(|| ClientError::ProjectNotFound(name.to_string()))?;
        handle.borrow_mut().mark_done();
        tracing::debug!(project = name, "marked project done");
        Ok(())
    }

    fn set_tag(&mut self, task: &str, tag: &str) -> Result<(), ClientError> {
        let handle = self
            .find_task(task)
            .ok_or_else(|| ClientError::TaskNotFound(task.to_string()))?;
        handle.borrow_mut().set_tag(tag);
        Ok(())
    }

    fn set_timer(&mut self, settings: TimerSettings) -> Result<(), ClientError> {
        settings.validate().map_err(ClientError::InvalidTimerSetting)?;
        self.timer = settings;
        Ok(())
    }

    fn timer(&self) -> TimerSettings {
        self.timer
    }

    fn list_tasks(&self) -> Box<dyn Iterator<Item = TaskView> + '_> {
        Box::new(
            self.tasks
                .iter()
                .filter(|t| !t.borrow().status())
                .map(TaskView::filtered),
        )
    }

    fn list_projects(&self) -> Box<dyn Iterator<Item = ProjectView> + '_> {
        Box::new(
            self.projects
                .iter()
                .filter(|p| !p.borrow().status())
                .map(ProjectView::filtered),
        )
    }

    fn register_subscription_intent(
        &mut self,
        registry: &mut SubscriptionRegistry,
        username: &str,
    ) -> Result<(), ClientError> {
        if self.premium {
            return Err(ClientError::AlreadyPremium);
        }
        registry.register_client(username)?;
        self.premium = true;
        Ok(())
    }

    fn premium(&self) -> bool {
        self.premium
    }

    fn done_count(&self) -> usize {
        self.done_log.len()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_task(name: &str) -> Client {
        let mut client = Client::new();
        client.create_task(name).unwrap();
        client
    }

    // ------------------------------------------------------------------------
    // Task Tests
    // ------------------------------------------------------------------------

    mod task_tests {
        use super::*;

        #[test]
        fn test_create_task() {
            let client = client_with_task("Report");
            assert_eq!(client.tasks().len(), 1);
        }

        #[test]
        fn test_create_duplicate_task_fails() {
            let mut client = client_with_task("Report");
            let err = client.create_task("Report").unwrap_err();
            assert!(err.is_already_exists());
            assert_eq!(client.tasks().len(), 1);
        }

        #[test]
        fn test_delete_task() {
            let mut client = client_with_task("Report");
            assert!(client.delete_task("Report").is_ok());
            assert!(client.tasks().is_empty());
        }

        #[test]
        fn test_delete_missing_task_fails() {
            let mut client = Client::new();
            let err = client.delete_task("Report").unwrap_err();
            assert!(err.is_not_found());
        }

        #[test]
        fn test_mark_task_done_appends_to_done_log() {
            let mut client = client_with_task("Report");
            client.mark_task_done("Report").unwrap();

            assert_eq!(client.done_count(), 1);
            assert!(client.tasks()[0].borrow().status());
        }

        #[test]
        fn test_remark_does_not_grow_done_log() {
            let mut client = client_with_task("Report");
            client.mark_task_done("Report").unwrap();
            client.mark_task_done("Report").unwrap();
            assert_eq!(client.done_count(), 1);
        }

        #[test]
        fn test_mark_missing_task_fails() {
            let mut client = Client::new();
            assert!(client.mark_task_done("Report").unwrap_err().is_not_found());
        }

        #[test]
        fn test_set_tag() {
            let mut client = client_with_task("Report");
            client.set_tag("Report", "Work").unwrap();
            assert_eq!(client.tasks()[0].borrow().tag(), "Work");
        }
    }

    // ------------------------------------------------------------------------
    // Subtask Tests
    // ------------------------------------------------------------------------

    mod subtask_tests {
        use super::*;
        use crate::composite::Component;

        #[test]
        fn test_create_subtask_is_detached() {
            let client = Client::new();
            let subtask = client.create_subtask("Draft");
            assert_eq!(subtask.name(), "Draft");
            assert!(client.tasks().is_empty());
        }

        #[test]
        fn test_add_subtask() {
            let mut client = client_with_task("Report");
            client.add_subtask("Report", "Draft").unwrap();
            assert_eq!(client.tasks()[0].borrow().subtasks().len(), 1);
        }

        #[test]
        fn test_add_duplicate_subtask_fails() {
            let mut client = client_with_task("Report");
            client.add_subtask("Report", "Draft").unwrap();

            let err = client.add_subtask("Report", "Draft").unwrap_err();
            assert!(err.is_already_exists());
            assert_eq!(client.tasks()[0].borrow().subtasks().len(), 1);
        }

        #[test]
        fn test_add_subtask_to_missing_task_fails() {
            let mut client = Client::new();
            assert!(client
                .add_subtask("Report", "Draft")
                .unwrap_err()
                .is_not_found());
        }

        #[test]
        fn test_remove_subtask() {
            let mut client = client_with_task("Report");
            client.add_subtask("Report", "Draft").unwrap();
            client.remove_subtask("Report", "Draft").unwrap();
            assert!(client.tasks()[0].borrow().subtasks().is_empty());
        }

        #[test]
        fn test_mark_subtask_done_via_owning_task() {
            // Lookup goes through the task's child collection, not the
            // global task list: a task sharing the subtask's name must
            // not shadow it.
            let mut client = client_with_task("Report");
            client.create_task("Draft").unwrap();
            client.add_subtask("Report", "Draft").unwrap();

            client.mark_subtask_done("Report", "Draft").unwrap();

            let report = &client.tasks()[0];
            assert!(report.borrow().subtasks()[0].borrow().status());
            // The top-level task named "Draft" stays untouched.
            assert!(!client.tasks()[1].borrow().status());
        }

        #[test]
        fn test_mark_missing_subtask_fails() {
            let mut client = client_with_task("Report");
            let err = client.mark_subtask_done("Report", "Draft").unwrap_err();
            assert!(err.is_not_found());
        }
    }

    // ------------------------------------------------------------------------
    // Project Tests
    // ------------------------------------------------------------------------

    mod project_tests {
        use super::*;
        use crate::composite::Component;

        #[test]
        fn test_create_and_delete_project() {
            let mut client = Client::new();
            client.create_project("Launch").unwrap();
            assert_eq!(client.projects().len(), 1);

            client.delete_project("Launch").unwrap();
            assert!(client.projects().is_empty());
        }

        #[test]
        fn test_create_duplicate_project_fails() {
            let mut client = Client::new();
            client.create_project("Launch").unwrap();
            assert!(client
                .create_project("Launch")
                .unwrap_err()
                .is_already_exists());
        }

        #[test]
        fn test_add_task_to_project_shares_handle() {
            let mut client = client_with_task("Report");
            client.create_project("Launch").unwrap();
            client.add_task_to_project("Report", "Launch").unwrap();

            // Same entity through both views.
            client.mark_task_done("Report").unwrap();
            let project = &client.projects()[0];
            assert!(project.borrow().tasks()[0].borrow().status());
        }

        #[test]
        fn test_add_task_twice_fails_and_keeps_count() {
            let mut client = client_with_task("Report");
            client.create_project("Launch").unwrap();
            client.add_task_to_project("Report", "Launch").unwrap();

            let err = client.add_task_to_project("Report", "Launch").unwrap_err();
            assert!(err.is_already_exists());
            assert_eq!(client.projects()[0].borrow().tasks().len(), 1);
        }

        #[test]
        fn test_add_task_missing_pieces() {
            let mut client = client_with_task("Report");
            assert!(client
                .add_task_to_project("Report", "Launch")
                .unwrap_err()
                .is_not_found());
            assert!(client
                .add_task_to_project("Missing", "Launch")
                .unwrap_err()
                .is_not_found());
        }

        #[test]
        fn test_mark_project_done_cascades() {
            let mut client = client_with_task("Report");
            client.add_subtask("Report", "Draft").unwrap();
            client.create_project("Launch").unwrap();
            client.add_task_to_project("Report", "Launch").unwrap();

            client.mark_project_done("Launch").unwrap();

            let task = &client.tasks()[0];
            assert!(task.borrow().status());
            assert!(task.borrow().subtasks()[0].borrow().status());
        }

        #[test]
        fn test_mark_project_done_skips_done_log() {
            let mut client = client_with_task("Report");
            client.create_project("Launch").unwrap();
            client.add_task_to_project("Report", "Launch").unwrap();

            client.mark_project_done("Launch").unwrap();
            assert_eq!(client.done_count(), 0);
        }
    }

    // ------------------------------------------------------------------------
    // Listing Tests
    // ------------------------------------------------------------------------

    mod listing_tests {
        use super::*;

        #[test]
        fn test_listing_hides_done_subtask_then_task() {
            let mut client = client_with_task("Write report");
            client.add_subtask("Write report", "Draft").unwrap();
            client.add_subtask("Write report", "Edit").unwrap();

            client.mark_subtask_done("Write report", "Draft").unwrap();
            let views: Vec<TaskView> = client.list_tasks().collect();
            assert_eq!(views.len(), 1);
            assert_eq!(views[0].name, "Write report");
            assert_eq!(views[0].subtasks, vec!["Edit".to_string()]);

            client.mark_task_done("Write report").unwrap();
            assert_eq!(client.list_tasks().count(), 0);
        }

        #[test]
        fn test_listing_is_restartable() {
            let mut client = client_with_task("Report");
            client.create_task("Plan").unwrap();

            assert_eq!(client.list_tasks().count(), 2);
            assert_eq!(client.list_tasks().count(), 2);
        }

        #[test]
        fn test_project_listing_filters_at_every_level() {
            let mut client = client_with_task("Report");
            client.add_subtask("Report", "Draft").unwrap();
            client.create_task("Plan").unwrap();
            client.create_project("Launch").unwrap();
            client.add_task_to_project("Report", "Launch").unwrap();
            client.add_task_to_project("Plan", "Launch").unwrap();

            client.mark_task_done("Plan").unwrap();

            let views: Vec<ProjectView> = client.list_projects().collect();
            assert_eq!(views.len(), 1);
            assert_eq!(views[0].tasks.len(), 1);
            assert_eq!(views[0].tasks[0].name, "Report");

            client.mark_project_done("Launch").unwrap();
            assert_eq!(client.list_projects().count(), 0);
        }
    }

    // ------------------------------------------------------------------------
    // Timer and Subscription Tests
    // ------------------------------------------------------------------------

    mod config_tests {
        use super::*;

        #[test]
        fn test_set_timer() {
            let mut client = Client::new();
            let settings = TimerSettings::default().with_work_minutes(50);
            client.set_timer(settings).unwrap();
            assert_eq!(client.timer().work_minutes, 50);
        }

        #[test]
        fn test_set_invalid_timer_fails() {
            let mut client = Client::new();
            let err = client
                .set_timer(TimerSettings::default().with_break_every(0))
                .unwrap_err();
            assert!(matches!(err, ClientError::InvalidTimerSetting(_)));
            assert_eq!(client.timer(), TimerSettings::default());
        }

        #[test]
        fn test_register_subscription_intent() {
            let mut client = Client::new();
            let mut registry = SubscriptionRegistry::default();

            client
                .register_subscription_intent(&mut registry, "ana")
                .unwrap();
            assert!(client.premium());
            assert_eq!(registry.clients(), ["ana".to_string()]);
        }

        #[test]
        fn test_register_twice_is_already_premium() {
            let mut client = Client::new();
            let mut registry = SubscriptionRegistry::default();
            client
                .register_subscription_intent(&mut registry, "ana")
                .unwrap();

            let err = client
                .register_subscription_intent(&mut registry, "ana")
                .unwrap_err();
            assert_eq!(err, ClientError::AlreadyPremium);
        }

        #[test]
        fn test_registry_conflict_maps_to_client_error() {
            let mut registry = SubscriptionRegistry::default();
            registry.register_client("ana").unwrap();

            let mut client = Client::new();
            let err = client
                .register_subscription_intent(&mut registry, "ana")
                .unwrap_err();
            assert_eq!(err, ClientError::AlreadyRegistered("ana".into()));
            assert!(!client.premium());
        }
    }
}
