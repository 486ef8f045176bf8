//! Display utilities for the interactive console.
//!
//! This module renders:
//! - The numbered menu
//! - Nested task/project/folder listings
//! - Subscription plans and generated reports
//!
//! Everything writes to a caller-supplied stream so sessions can be
//! driven and captured in tests.

use std::io::{self, Write};

use crate::client::{ProjectView, TaskView};
use crate::premium::FolderView;
use crate::report::Report;
use crate::subscription::Plan;

/// Display utilities for console output.
pub struct Display;

impl Display {
    /// Writes the menu of options.
    pub fn show_menu(w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "\n\
             \x20 0. Show this menu\n\
             \x20 1. Create task\n\
             \x20 2. List tasks\n\
             \x20 3. Delete task\n\
             \x20 4. Create subtask\n\
             \x20 5. Delete subtask\n\
             \x20 6. Create project\n\
             \x20 7. Add task to project\n\
             \x20 8. Delete project\n\
             \x20 9. List projects\n\
             \x2010. Start pomodoro\n\
             \x2011. Mark task done\n\
             \x2012. Mark subtask done\n\
             \x2013. Mark project done\n\
             \x2014. Customize pomodoro\n\
             \x2015. View subscription plans\n\
             \x2016. Pay for subscription\n\
             \x2017. Set task tag\n\
             \x20--- premium ---\n\
             \x2018. Create folder\n\
             \x2019. Assign project to folder\n\
             \x2020. List folders\n\
             \x2021. Productivity report\n\
             \x2022. Clients report\n\
             \x20 q. Quit"
        )
    }

    /// Writes the filtered task listing.
    pub fn show_tasks(w: &mut dyn Write, views: impl Iterator<Item = TaskView>) -> io::Result<()> {
        for view in views {
            writeln!(w, "Task: {} [{}]", view.name, view.tag)?;
            for subtask in &view.subtasks {
                writeln!(w, "     Subtask: {subtask}")?;
            }
        }
        Ok(())
    }

    /// Writes the filtered project listing.
    pub fn show_projects(
        w: &mut dyn Write,
        views: impl Iterator<Item = ProjectView>,
    ) -> io::Result<()> {
        for view in views {
            writeln!(w, "Project: {}", view.name)?;
            for task in &view.tasks {
                writeln!(w, "     Task: {} [{}]", task.name, task.tag)?;
                for subtask in &task.subtasks {
                    writeln!(w, "         Subtask: {subtask}")?;
                }
            }
        }
        Ok(())
    }

    /// Writes the unfiltered folder listing.
    pub fn show_folders(w: &mut dyn Write, views: &[FolderView]) -> io::Result<()> {
        for view in views {
            writeln!(w, "Folder: {}", view.name)?;
            for project in &view.projects {
                writeln!(w, "     Project: {}", project.name)?;
                for task in &project.tasks {
                    writeln!(w, "         Task: {} [{}]", task.name, task.tag)?;
                    for subtask in &task.subtasks {
                        writeln!(w, "             Subtask: {subtask}")?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Writes the plan table.
    pub fn show_plans(w: &mut dyn Write, plans: &[Plan]) -> io::Result<()> {
        for plan in plans {
            writeln!(
                w,
                "Plan: {} - Price: {} - Description: {}",
                plan.name, plan.price, plan.description
            )?;
        }
        Ok(())
    }

    /// Writes a generated report.
    pub fn show_report(w: &mut dyn Write, report: &Report) -> io::Result<()> {
        writeln!(w, "\n{report}")
    }

    /// Writes an error message.
    pub fn show_error(w: &mut dyn Write, message: &str) -> io::Result<()> {
        writeln!(w, "Error: {message}")
    }
}

// ============================================================================
// Tests
// ============================================================================
