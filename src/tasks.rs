//! Tasks
//!
//! Overdue is never stored, it is derived from the due date at the moment of asking

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Serialize;

/// Task of a user
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Task {
    /// Task ID
    pub id: i32,

    /// Short title
    pub title: String,

    /// Longer description
    pub description: String,

    /// Creation date, as provided by the client
    pub creation_date: DateTime<Utc>,

    /// Optional due date
    pub due_date: Option<NaiveDate>,

    /// Is the task done?
    pub completed: bool,

    /// Is the task pinned?
    pub is_pinned: bool,

    /// Owner of the task
    pub user_id: i32,
}

/// Status of a task on a given day
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// Task is done, the due date does not matter
    Completed,

    /// Task is not done and has no due date, or the due date is today or later
    Pending,

    /// Task is not done and the due date has passed
    Overdue,
}

impl Task {
    /// Status of the task as seen on `today`
    pub fn status(&self, today: NaiveDate) -> Status {
        if self.completed {
            return Status::Completed;
        }

        match self.due_date {
            Some(due_date) if due_date < today => Status::Overdue,
            _ => Status::Pending,
        }
    }
}

/// Counts of the tasks of a user per status
///
/// Every task ends up in exactly one bucket
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Summary {
    /// Number of completed tasks
    pub completed: i64,

    /// Number of pending tasks
    pub pending: i64,

    /// Number of overdue tasks
    pub overdue: i64,
}

impl Summary {
    /// Tally tasks in a single pass
    pub fn from_tasks<'a, I>(tasks: I, today: NaiveDate) -> Self
    where
        I: IntoIterator<Item = &'a Task>,
    {
        tasks
            .into_iter()
            .fold(Self::default(), |mut summary, task| {
                match task.status(today) {
                    Status::Completed => summary.completed += 1,
                    Status::Pending => summary.pending += 1,
                    Status::Overdue => summary.overdue += 1,
                }

                summary
            })
    }

    /// Total number of tasks counted
    #[cfg(test)]
    pub fn total(&self) -> i64 {
        self.completed + self.pending + self.overdue
    }
}
