//! Client error types.
//!
//! Every failure here is an expected, locally-recoverable outcome: the
//! interactive loop reports it and returns to the next prompt. There is
//! no unrecoverable core error.

use thiserror::Error;

use crate::subscription::SubscriptionError;

/// Errors reported by client operations (both tiers).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// A task with this name already exists globally.
    #[error("task '{0}' already exists")]
    TaskAlreadyExists(String),

    /// No task with this name exists.
    #[error("task '{0}' not found")]
    TaskNotFound(String),

    /// The task already holds a subtask with this name.
    #[error("subtask '{subtask}' already exists in task '{task}'")]
    SubtaskAlreadyExists {
        /// Owning task name
        task: String,
        /// Duplicate subtask name
        subtask: String,
    },

    /// The task holds no subtask with this name.
    #[error("subtask '{subtask}' not found in task '{task}'")]
    SubtaskNotFound {
        /// Owning task name
        task: String,
        /// Missing subtask name
        subtask: String,
    },

    /// A project with this name already exists globally.
    #[error("project '{0}' already exists")]
    ProjectAlreadyExists(String),

    /// No project with this name exists.
    #[error("project '{0}' not found")]
    ProjectNotFound(String),

    /// The project already contains a task with this name.
    #[error("task '{task}' is already in project '{project}'")]
    TaskAlreadyInProject {
        /// Task name
        task: String,
        /// Project name
        project: String,
    },

    /// A folder with this name already exists.
    #[error("folder '{0}' already exists")]
    FolderAlreadyExists(String),

    /// No folder with this name exists.
    #[error("folder '{0}' not found")]
    FolderNotFound(String),

    /// The folder already contains a project with this name.
    #[error("project '{project}' is already in folder '{folder}'")]
    ProjectAlreadyInFolder {
        /// Project name
        project: String,
        /// Folder name
        folder: String,
    },

    /// A timer setting failed validation.
    #[error("invalid timer setting: {0}")]
    InvalidTimerSetting(String),

    /// The client is already on the premium tier.
    #[error("already a premium client")]
    AlreadyPremium,

    /// The username is already registered with the subscription service.
    #[error("'{0}' is already registered")]
    AlreadyRegistered(String),
}

impl ClientError {
    /// Returns true if this error is a failed name lookup.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::TaskNotFound(_)
                | Self::SubtaskNotFound { .. }
                | Self::ProjectNotFound(_)
                | Self::FolderNotFound(_)
        )
    }

    /// Returns true if this error is a duplicate name or membership.
    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        matches!(
            self,
            Self::TaskAlreadyExists(_)
                | Self::SubtaskAlreadyExists { .. }
                | Self::ProjectAlreadyExists(_)
                | Self::TaskAlreadyInProject { .. }
                | Self::FolderAlreadyExists(_)
                | Self::ProjectAlreadyInFolder { .. }
        )
    }
}

impl From<SubscriptionError> for ClientError {
    fn from(err: SubscriptionError) -> Self {
        match err {
            SubscriptionError::AlreadyRegistered(username) => Self::AlreadyRegistered(username),
        }
    }
}
