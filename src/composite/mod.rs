//! Composite work-item tree for FocusTodo.
//!
//! This module provides the uniform node contract and the concrete
//! node types:
//! - `Component` trait: name, status, dates, completion, child management
//! - `Subtask` (leaf), `Task` (composite of subtasks), `Project`
//!   (composite of tasks)
//! - `Folder`: a non-completable container of projects (premium tier)
//!
//! Nodes are handed around as `Rc<RefCell<_>>` handles so a task can
//! live both in the client's global list and inside a project while
//! both views observe the same mutations.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{Local, NaiveDate};

/// Shared handle to a subtask.
pub type SubtaskHandle = Rc<RefCell<Subtask>>;
/// Shared handle to a task.
pub type TaskHandle = Rc<RefCell<Task>>;
/// Shared handle to a project.
pub type ProjectHandle = Rc<RefCell<Project>>;

// ============================================================================
// Node
// ============================================================================

/// A tagged handle to any node in the work-item tree.
///
/// Child management on the `Component` trait speaks in `Node` values so
/// leaves and composites share one signature.
#[derive(Debug, Clone)]
pub enum Node {
    /// A leaf subtask
    Subtask(SubtaskHandle),
    /// A task (composite of subtasks)
    Task(TaskHandle),
    /// A project (composite of tasks)
    Project(ProjectHandle),
}

impl Node {
    /// Returns the name of the referenced node.
    pub fn name(&self) -> String {
        match self {
            Node::Subtask(s) => s.borrow().name().to_string(),
            Node::Task(t) => t.borrow().name().to_string(),
            Node::Project(p) => p.borrow().name().to_string(),
        }
    }

    /// Returns the completion status of the referenced node.
    pub fn status(&self) -> bool {
        match self {
            Node::Subtask(s) => s.borrow().status(),
            Node::Task(t) => t.borrow().status(),
            Node::Project(p) => p.borrow().status(),
        }
    }
}

// ============================================================================
// Attach
// ============================================================================

/// Outcome of offering a child to a node.
///
/// Leaves (and composites offered a child of the wrong kind) answer
/// `NotApplicable`; the offer is silently ignored, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attach {
    /// The child was accepted and appended
    Attached,
    /// The node does not hold children of this kind
    NotApplicable,
}

impl Attach {
    /// Returns true if the child was accepted.
    pub fn is_attached(&self) -> bool {
        matches!(self, Attach::Attached)
    }
}

// ============================================================================
// CompletionMeta
// ============================================================================

/// Name, status and date bookkeeping shared by every node type.
///
/// Invariant: `completed_on` is `Some` exactly when `status` is true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionMeta {
    name: String,
    status: bool,
    created_on: NaiveDate,
    completed_on: Option<NaiveDate>,
}

impl CompletionMeta {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: false,
            created_on: Local::now().date_naive(),
            completed_on: None,
        }
    }

    /// Marks the node done on the given date.
    ///
    /// Re-marking an already-done node keeps the status true and
    /// overwrites the completion date (re-affirmed completion).
    fn mark_done_on(&mut self, date: NaiveDate) {
        self.status = true;
        self.completed_on = Some(date);
    }
}

// ============================================================================
// Component
// ============================================================================

/// Uniform contract for completable, named, dated work items.
pub trait Component {
    /// The node's name (unique within its sibling scope).
    fn name(&self) -> &str;

    /// True once the node has been marked done.
    fn status(&self) -> bool;

    /// Date the node was created.
    fn created_on(&self) -> NaiveDate;

    /// Date the node was last marked done, if ever.
    fn completed_on(&self) -> Option<NaiveDate>;

    /// Marks the node done on the given date, cascading to every
    /// descendant in composite nodes.
    fn mark_done_on(&mut self, date: NaiveDate);

    /// Marks the node done as of today.
    fn mark_done(&mut self) {
        self.mark_done_on(Local::now().date_naive());
    }

    /// Offers a child to the node.
    fn add_child(&mut self, child: Node) -> Attach;

    /// Removes and returns the direct child with the given name.
    fn remove_child(&mut self, name: &str) -> Option<Node>;

    /// Finds the direct child with the given name.
    fn find_child(&self, name: &str) -> Option<Node>;
}

// ============================================================================
// Subtask
// ============================================================================

/// A leaf work item belonging to a task.
#[derive(Debug, Clone)]
pub struct Subtask {
    meta: CompletionMeta,
}

impl Subtask {
    /// Creates a new subtask with today's creation date.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: CompletionMeta::new(name),
        }
    }

    /// Wraps the subtask in a shared handle.
    pub fn into_handle(self) -> SubtaskHandle {
        Rc::new(RefCell::new(self))
    }
}

impl Component for Subtask {
    fn name(&self) -> &str {
        &self.meta.name
    }

    fn status(&self) -> bool {
        self.meta.status
    }

    fn created_on(&self) -> NaiveDate {
        self.meta.created_on
    }

    fn completed_on(&self) -> Option<NaiveDate> {
        self.meta.completed_on
    }

    fn mark_done_on(&mut self, date: NaiveDate) {
        self.meta.mark_done_on(date);
    }

    fn add_child(&mut self, _child: Node) -> Attach {
        Attach::NotApplicable
    }

    fn remove_child(&mut self, _name: &str) -> Option<Node> {
        None
    }

    fn find_child(&self, _name: &str) -> Option<Node> {
        None
    }
}

// ============================================================================
// Task
// ============================================================================

/// A task: a composite of subtasks with a free-text tag.
#[derive(Debug, Clone)]
pub struct Task {
    meta: CompletionMeta,
    tag: String,
    subtasks: Vec<SubtaskHandle>,
}

impl Task {
    /// Creates a new task with the default "General" tag.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: CompletionMeta::new(name),
            tag: "General".to_string(),
            subtasks: Vec::new(),
        }
    }

    /// Wraps the task in a shared handle.
    pub fn into_handle(self) -> TaskHandle {
        Rc::new(RefCell::new(self))
    }

    /// The task's tag.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Replaces the task's tag.
    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = tag.into();
    }

    /// The task's subtasks in insertion order.
    pub fn subtasks(&self) -> &[SubtaskHandle] {
        &self.subtasks
    }
}

impl Component for Task {
    fn name(&self) -> &str {
        &self.meta.name
    }

    fn status(&self) -> bool {
        self.meta.status
    }

    fn created_on(&self) -> NaiveDate {
        self.meta.created_on
    }

    fn completed_on(&self) -> Option<NaiveDate> {
        self.meta.completed_on
    }

    fn mark_done_on(&mut self, date: NaiveDate) {
        self.meta.mark_done_on(date);
        for subtask in &self.subtasks {
            subtask.borrow_mut().mark_done_on(date);
        }
    }

    fn add_child(&mut self, child: Node) -> Attach {
        match child {
            Node::Subtask(subtask) => {
                self.subtasks.push(subtask);
                Attach::Attached
            }
            _ => Attach::NotApplicable,
        }
    }

    fn remove_child(&mut self, name: &str) -> Option<Node> {
        let index = self
            .subtasks
            .iter()
            .position(|s| s.borrow().name() == name)?;
        Some(Node::Subtask(self.subtasks.remove(index)))
    }

    fn find_child(&self, name: &str) -> Option<Node> {
        self.subtasks
            .iter()
            .find(|s| s.borrow().name() == name)
            .map(|s| Node::Subtask(Rc::clone(s)))
    }
}

// ============================================================================
// Project
// ============================================================================

/// A project: a composite of tasks.
///
/// Task handles are shared with the client's global list, so marking a
/// task through either view is visible through the other.
#[derive(Debug, Clone)]
pub struct Project {
    meta: CompletionMeta,
    tasks: Vec<TaskHandle>,
}

impl Project {
    /// Creates a new project.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: CompletionMeta::new(name),
            tasks: Vec::new(),
        }
    }

    /// Wraps the project in a shared handle.
    pub fn into_handle(self) -> ProjectHandle {
        Rc::new(RefCell::new(self))
    }

    /// The project's tasks in insertion order.
    pub fn tasks(&self) -> &[TaskHandle] {
        &self.tasks
    }
}

impl Component for Project {
    fn name(&self) -> &str {
        &self.meta.name
    }

    fn status(&self) -> bool {
        self.meta.status
    }

    fn created_on(&self) -> NaiveDate {
        self.meta.created_on
    }

    fn completed_on(&self) -> Option<NaiveDate> {
        self.meta.completed_on
    }

    fn mark_done_on(&mut self, date: NaiveDate) {
        self.meta.mark_done_on(date);
        for task in &self.tasks {
            task.borrow_mut().mark_done_on(date);
        }
    }

    fn add_child(&mut self, child: Node) -> Attach {
        match child {
            Node::Task(task) => {
                self.tasks.push(task);
                Attach::Attached
            }
            _ => Attach::NotApplicable,
        }
    }

    fn remove_child(&mut self, name: &str) -> Option<Node> {
        let index = self.tasks.iter().position(|t| t.borrow().name() == name)?;
        Some(Node::Task(self.tasks.remove(index)))
    }

    fn find_child(&self, name: &str) -> Option<Node> {
        self.tasks
            .iter()
            .find(|t| t.borrow().name() == name)
            .map(|t| Node::Task(Rc::clone(t)))
    }
}

// ============================================================================
// Folder
// ============================================================================

/// A named container of projects. Folders are not completable and only
/// exist on the premium tier.
#[derive(Debug, Clone, Default)]
pub struct Folder {
    name: String,
    projects: Vec<ProjectHandle>,
}

impl Folder {
    /// Creates a new, empty folder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            projects: Vec::new(),
        }
    }

    /// The folder's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The folder's projects in insertion order.
    pub fn projects(&self) -> &[ProjectHandle] {
        &self.projects
    }

    /// Appends a project handle to the folder.
    pub fn add_project(&mut self, project: ProjectHandle) {
        self.projects.push(project);
    }

    /// Finds a project in the folder by name.
    pub fn find_project(&self, name: &str) -> Option<ProjectHandle> {
        self.projects
            .iter()
            .find(|p| p.borrow().name() == name)
            .map(Rc::clone)
    }

    /// Removes and returns the project with the given name.
    pub fn remove_project(&mut self, name: &str) -> Option<ProjectHandle> {
        let index = self
            .projects
            .iter()
            .position(|p| p.borrow().name() == name)?;
        Some(self.projects.remove(index))
    }
}

// ============================================================================
// Tests
// ============================================================================
