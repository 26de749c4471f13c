//! Memory storage
//!
//! Will be destroyed on system shutdown

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::notes::Note;
use crate::tasks::Summary;
use crate::tasks::Task;
use crate::users::User;

use super::CreateNoteValues;
use super::CreateTaskValues;
use super::CreateUserValues;
use super::Error;
use super::Result;
use super::Storage;
use super::UpdateNoteValues;
use super::UpdateTaskValues;

/// Rows of a single kind, with a sequence for the next ID
#[derive(Debug)]
struct Table<T> {
    /// All rows by ID
    rows: BTreeMap<i32, T>,

    /// Last handed out ID
    sequence: i32,
}

impl<T> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            sequence: 0,
        }
    }

    /// Next ID, like a `SERIAL` column it starts at 1
    fn next_id(&mut self) -> i32 {
        self.sequence += 1;
        self.sequence
    }
}

/// An in-memory storage
///
/// Will be destroyed on system shutdown
#[derive(Clone, Debug)]
pub struct Memory {
    /// All users in storage
    users: Arc<Mutex<Table<User>>>,

    /// All notes in storage
    notes: Arc<Mutex<Table<Note>>>,

    /// All tasks in storage
    tasks: Arc<Mutex<Table<Task>>>,
}

impl Memory {
    /// Create a new empty Memory storage
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(Table::new())),
            notes: Arc::new(Mutex::new(Table::new())),
            tasks: Arc::new(Mutex::new(Table::new())),
        }
    }

    /// Same guarantee as the foreign key on `user_id`
    async fn ensure_user_exists(&self, table: &str, user_id: i32) -> Result<()> {
        if self.users.lock().await.rows.contains_key(&user_id) {
            return Ok(());
        }

        Err(Error::Connection(format!(
            "Insert on {table} violates foreign key, user {user_id} does not exist"
        )))
    }
}

impl Storage for Memory {
    async fn find_single_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .await
            .rows
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_single_user_by_id(&self, id: i32) -> Result<Option<User>> {
        Ok(self.users.lock().await.rows.get(&id).cloned())
    }

    async fn create_user(&self, values: &CreateUserValues<'_>) -> Result<User> {
        let mut users = self.users.lock().await;

        // same guarantee as the unique constraint on `users.email`
        if users.rows.values().any(|user| user.email == values.email) {
            return Err(Error::Conflict(format!(
                "Email {} already exists",
                values.email
            )));
        }

        let user = User {
            id: users.next_id(),
            full_name: values.full_name.to_string(),
            email: values.email.to_string(),
            hashed_password: values.hashed_password.to_string(),
        };

        users.rows.insert(user.id, user.clone());

        Ok(user)
    }

    async fn change_password(&self, user_id: i32, hashed_password: &str) -> Result<u64> {
        Ok(self
            .users
            .lock()
            .await
            .rows
            .get_mut(&user_id)
            .map_or(0, |user| {
                user.hashed_password = hashed_password.to_string();

                1
            }))
    }

    async fn find_all_notes_by_user(&self, user_id: i32) -> Result<Vec<Note>> {
        Ok(self
            .notes
            .lock()
            .await
            .rows
            .values()
            .filter(|note| note.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_note(&self, values: &CreateNoteValues<'_>) -> Result<Note> {
        self.ensure_user_exists("notes", values.user_id).await?;

        let mut notes = self.notes.lock().await;

        let note = Note {
            id: notes.next_id(),
            title: values.title.to_string(),
            content: values.content.to_string(),
            creation_date: *values.creation_date,
            is_pinned: false,
            user_id: values.user_id,
        };

        notes.rows.insert(note.id, note.clone());

        Ok(note)
    }

    async fn update_note(&self, note_id: i32, values: &UpdateNoteValues) -> Result<u64> {
        Ok(self
            .notes
            .lock()
            .await
            .rows
            .get_mut(&note_id)
            .map_or(0, |note| {
                note.is_pinned = values.is_pinned;

                1
            }))
    }

    async fn delete_note(&self, note_id: i32) -> Result<u64> {
        let removed = self.notes.lock().await.rows.remove(&note_id);

        Ok(u64::from(removed.is_some()))
    }

    async fn find_all_tasks_by_user(&self, user_id: i32) -> Result<Vec<Task>> {
        Ok(self
            .tasks
            .lock()
            .await
            .rows
            .values()
            .filter(|task| task.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn summarize_tasks_by_user(&self, user_id: i32) -> Result<Summary> {
        let today = Utc::now().date_naive();

        Ok(Summary::from_tasks(
            self.tasks
                .lock()
                .await
                .rows
                .values()
                .filter(|task| task.user_id == user_id),
            today,
        ))
    }

    async fn create_task(&self, values: &CreateTaskValues<'_>) -> Result<Task> {
        self.ensure_user_exists("tasks", values.user_id).await?;

        let mut tasks = self.tasks.lock().await;

        let task = Task {
            id: tasks.next_id(),
            title: values.title.to_string(),
            description: values.description.to_string(),
            creation_date: *values.creation_date,
            due_date: values.due_date.copied(),
            completed: values.completed,
            is_pinned: false,
            user_id: values.user_id,
        };

        tasks.rows.insert(task.id, task.clone());

        Ok(task)
    }

    async fn update_task(&self, task_id: i32, values: &UpdateTaskValues) -> Result<u64> {
        Ok(self
            .tasks
            .lock()
            .await
            .rows
            .get_mut(&task_id)
            .map_or(0, |task| {
                task.is_pinned = values.is_pinned;
                task.completed = values.completed;

                1
            }))
    }

    async fn delete_task(&self, task_id: i32) -> Result<u64> {
        let removed = self.tasks.lock().await.rows.remove(&task_id);

        Ok(u64::from(removed.is_some()))
    }
}
