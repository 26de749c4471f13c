//! Tasks API endpoints
//!
//! Everything related to the task management of a user

use axum::Extension;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::storage::CreateTaskValues;
use crate::storage::Storage;
use crate::storage::UpdateTaskValues;
use crate::tasks::Task;

use super::Acknowledgement;
use super::Error;
use super::Form;
use super::PathParameters;
use super::Success;

/// Task response going to the user
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    /// Task ID
    pub id: i32,

    /// Short title
    pub title: String,

    /// Longer description
    pub description: String,

    /// Creation date
    pub creation_date: DateTime<Utc>,

    /// Due date, `null` when there is none
    pub due_date: Option<NaiveDate>,

    /// Is the task done?
    pub completed: bool,

    /// Is the task pinned?
    pub is_pinned: bool,

    /// Owner of the task
    pub user_id: i32,
}

impl TaskResponse {
    /// Create a response from a [`Task`](Task)
    fn from_task(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            creation_date: task.creation_date,
            due_date: task.due_date,
            completed: task.completed,
            is_pinned: task.is_pinned,
            user_id: task.user_id,
        }
    }

    /// Create a response from multiple [`Task`](Task)s
    fn from_task_multiple(mut tasks: Vec<Task>) -> Vec<Self> {
        tasks.drain(..).map(Self::from_task).collect::<Vec<Self>>()
    }
}

/// List all tasks of a user
///
/// Request:
/// ```sh
/// curl -v http://localhost:1000/tasks/1
/// ```
///
/// Response:
/// ```json
/// [ { "id": 1, "title": "Groceries", "due_date": "2025-03-14" ... } ]
/// ```
pub async fn list<S: Storage>(
    Extension(storage): Extension<S>,
    PathParameters(user_id): PathParameters<i32>,
) -> Result<Success<Vec<TaskResponse>>, Error> {
    let tasks = storage
        .find_all_tasks_by_user(user_id)
        .await
        .map_err(Error::internal_server_error)?;

    Ok(Success::ok(TaskResponse::from_task_multiple(tasks)))
}

/// Create task form
#[derive(Debug, Deserialize)]
pub struct CreateTaskForm {
    /// Title of the task
    title: String,
    /// Description of the task
    description: String,
    /// Creation date, defaults to now
    creation_date: Option<DateTime<Utc>>,
    /// Optional due date
    due_date: Option<NaiveDate>,
    /// Is the task already done? Defaults to `false`
    #[serde(default)]
    completed: bool,
    /// Owner of the task
    user_id: i32,
}

/// Create a task based on the [`CreateTaskForm`](CreateTaskForm) form
///
/// Unlike notes, the created task is not returned
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     -d '{ "title": "Groceries", "description": "Milk", "due_date": "2025-03-14", "user_id": 1 }' \
///     http://localhost:1000/tasks
/// ```
pub async fn create<S: Storage>(
    Extension(storage): Extension<S>,
    Form(form): Form<CreateTaskForm>,
) -> Result<Acknowledgement, Error> {
    let creation_date = form.creation_date.unwrap_or_else(Utc::now);

    let values = CreateTaskValues {
        title: &form.title,
        description: &form.description,
        creation_date: &creation_date,
        due_date: form.due_date.as_ref(),
        completed: form.completed,
        user_id: form.user_id,
    };

    let task = storage
        .create_task(&values)
        .await
        .map_err(Error::internal_server_error)?;

    tracing::debug!("Created task {} for user {}", task.id, task.user_id);

    Ok(Acknowledgement::created("Task added"))
}

/// Update task form
///
/// Both flags are required, they are always written together
#[derive(Debug, Deserialize)]
pub struct UpdateTaskForm {
    /// The task to update
    #[serde(rename = "taskId")]
    task_id: i32,
    /// New pinned flag
    is_pinned: bool,
    /// New completed flag
    completed: bool,
}

/// Update the pinned and completed flags of a task
///
/// An unknown task is acknowledged all the same
///
/// Request:
/// ```sh
/// curl -v -XPUT -H 'Content-Type: application/json' \
///     -d '{ "taskId": 1, "is_pinned": true, "completed": false }' \
///     http://localhost:1000/tasks/update
/// ```
pub async fn update<S: Storage>(
    Extension(storage): Extension<S>,
    Form(form): Form<UpdateTaskForm>,
) -> Result<Acknowledgement, Error> {
    let values = UpdateTaskValues {
        is_pinned: form.is_pinned,
        completed: form.completed,
    };

    let affected = storage
        .update_task(form.task_id, &values)
        .await
        .map_err(Error::internal_server_error)?;

    if affected == 0 {
        tracing::debug!("Task {} not found, nothing updated", form.task_id);
    }

    Ok(Acknowledgement::created("Task Updated"))
}

/// Delete a task
///
/// Request:
/// ```sh
/// curl -v -XDELETE http://localhost:1000/tasks/1
/// ```
pub async fn delete<S: Storage>(
    Extension(storage): Extension<S>,
    PathParameters(task_id): PathParameters<i32>,
) -> Result<Success<&'static str>, Error> {
    let affected = storage
        .delete_task(task_id)
        .await
        .map_err(Error::internal_server_error)?;

    if affected == 0 {
        return Err(Error::not_found("Task not found"));
    }

    Ok(Success::<&'static str>::no_content())
}
