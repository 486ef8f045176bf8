//! Premium tier decorator.
//!
//! `PremiumClient` wraps a base `Client`, forwards every base-tier
//! operation unchanged, and adds folder management, the productivity
//! report and admin bookkeeping. The upgrade is one-way; there is no
//! downgrade.

use std::rc::Rc;

use crate::client::{Client, ClientError, ClientOps, ProjectView, TaskView};
use crate::composite::{Component, Folder, Subtask};
use crate::report::{Report, ReportFactory, ReportInput};
use crate::subscription::SubscriptionRegistry;
use crate::types::{ClientRecord, TimerSettings};

// ============================================================================
// FolderView
// ============================================================================

/// A folder as it appears in the premium listing.
///
/// Folder listings are deliberately unfiltered: done projects, tasks
/// and subtasks all appear, unlike the base-tier listings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FolderView {
    /// Folder name
    pub name: String,
    /// Contained projects with their full trees
    pub projects: Vec<ProjectView>,
}

// ============================================================================
// PremiumClient
// ============================================================================

/// The premium tier: a decorated client.
///
/// Wrapping moves the base client in; the `Rc` task/project handles
/// keep reference identity, so nothing is copied.
#[derive(Debug)]
pub struct PremiumClient {
    inner: Client,
    folders: Vec<Folder>,
    registered: Vec<ClientRecord>,
}

impl PremiumClient {
    /// Upgrades a base client to the premium tier.
    pub fn upgrade(mut client: Client) -> Self {
        client.set_premium();
        tracing::debug!("upgraded client to premium tier");
        Self {
            inner: client,
            folders: Vec::new(),
            registered: Vec::new(),
        }
    }

    /// The wrapped base client.
    pub fn inner(&self) -> &Client {
        &self.inner
    }

    /// The folders, in creation order.
    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    fn find_folder(&self, name: &str) -> Option<&Folder> {
        self.folders.iter().find(|f| f.name() == name)
    }

    /// Creates a folder with a unique name.
    pub fn create_folder(&mut self, name: &str) -> Result<(), ClientError> {
        if self.find_folder(name).is_some() {
            return Err(ClientError::FolderAlreadyExists(name.to_string()));
        }
        tracing::debug!(folder = name, "creating folder");
        self.folders.push(Folder::new(name));
        Ok(())
    }

    /// Shares an existing project into a folder. Membership is checked
    /// by name.
    pub fn assign_project_to_folder(
        &mut self,
        project: &str,
        folder: &str,
    ) -> Result<(), ClientError> {
        let project_handle = self
            .inner
            .projects()
            .iter()
            .find(|p| p.borrow().name() == project)
            .map(Rc::clone)
            .ok_or_else(|| ClientError::ProjectNotFound(project.to_string()))?;

        let folder_entry = self
            .folders
            .iter_mut()
            .find(|f| f.name() == folder)
            .ok_or_else(|| ClientError::FolderNotFound(folder.to_string()))?;

        if folder_entry.find_project(project).is_some() {
            return Err(ClientError::ProjectAlreadyInFolder {
                project: project.to_string(),
                folder: folder.to_string(),
            });
        }

        tracing::debug!(project, folder, "assigning project to folder");
        folder_entry.add_project(project_handle);
        Ok(())
    }

    /// Lists folders with their full project trees, unfiltered by
    /// status.
    pub fn list_folders(&self) -> Vec<FolderView> {
        self.folders
            .iter()
            .map(|folder| FolderView {
                name: folder.name().to_string(),
                projects: folder.projects().iter().map(ProjectView::unfiltered).collect(),
            })
            .collect()
    }

    /// Builds the productivity report over the done-log.
    pub fn productivity_report(&self) -> Option<Report> {
        ReportFactory::build("Tasks", ReportInput::Tasks(self.inner.done_log()))
    }

    /// Records a client for admin bookkeeping.
    pub fn track_client(&mut self, record: ClientRecord) {
        self.registered.push(record);
    }

    /// The tracked client records.
    pub fn tracked_clients(&self) -> &[ClientRecord] {
        &self.registered
    }

    /// Builds the clients report over the tracked records.
    pub fn clients_report(&self) -> Option<Report> {
        ReportFactory::build("Clients", ReportInput::Clients(&self.registered))
    }
}

// Transparent decoration: every base-tier operation forwards to the
// wrapped client unchanged.
impl ClientOps for PremiumClient {
    fn create_task(&mut self, name: &str) -> Result<(), ClientError> {
        self.inner.create_task(name)
    }

    fn delete_task(&mut self, name: &str) -> Result<(), ClientError> {
        self.inner.delete_task(name)
    }

    fn create_subtask(&self, name: &str) -> Subtask {
        self.inner.create_subtask(name)
    }

    fn add_subtask(&mut self, task: &str, subtask: &str) -> Result<(), ClientError> {
        self.inner.add_subtask(task, subtask)
    }

    fn remove_subtask(&mut self, task: &str, subtask: &str) -> Result<(), ClientError> {
        self.inner.remove_subtask(task, subtask)
    }

    fn create_project(&mut self, name: &str) -> Result<(), ClientError> {
        self.inner.create_project(name)
    }

    fn delete_project(&mut self, name: &str) -> Result<(), ClientError> {
        self.inner.delete_project(name)
    }

    fn add_task_to_project(&mut self, task: &str, project: &str) -> Result<(), ClientError> {
        self.inner.add_task_to_project(task, project)
    }

    fn mark_task_done(&mut self, name: &str) -> Result<(), ClientError> {
        self.inner.mark_task_done(name)
    }

    fn mark_subtask_done(&mut self, task: &str, subtask: &str) -> Result<(), ClientError> {
        self.inner.mark_subtask_done(task, subtask)
    }

    fn mark_project_done(&mut self, name: &str) -> Result<(), ClientError> {
        self.inner.mark_project_done(name)
    }

    fn set_tag(&mut self, task: &str, tag: &str) -> Result<(), ClientError> {
        self.inner.set_tag(task, tag)
    }

    fn set_timer(&mut self, settings: TimerSettings) -> Result<(), ClientError> {
        self.inner.set_timer(settings)
    }

    fn timer(&self) -> TimerSettings {
        self.inner.timer()
    }

    fn list_tasks(&self) -> Box<dyn Iterator<Item = TaskView> + '_> {
        self.inner.list_tasks()
    }

    fn list_projects(&self) -> Box<dyn Iterator<Item = ProjectView> + '_> {
        self.inner.list_projects()
    }

    fn register_subscription_intent(
        &mut self,
        registry: &mut SubscriptionRegistry,
        username: &str,
    ) -> Result<(), ClientError> {
        self.inner.register_subscription_intent(registry, username)
    }

    fn premium(&self) -> bool {
        self.inner.premium()
    }

    fn done_count(&self) -> usize {
        self.inner.done_count()
    }
}

// ============================================================================
// Tests
// ============================================================================
