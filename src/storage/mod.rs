//! All things related to the storage of users, notes and tasks

use std::future::Future;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use sqlx::postgres::PgConnectOptions;
use thiserror::Error;

use crate::notes::Note;
use crate::tasks::Summary;
use crate::tasks::Task;
use crate::users::User;
use crate::utils::env_var;
use crate::utils::env_var_or_else;

pub use memory::Memory;
pub use postgres::Postgres;

mod memory;
mod postgres;

/// Storage errors
#[derive(Debug, Error)]
pub enum Error {
    /// A connection error with the storage
    #[error("Connection error: {0}")]
    Connection(String),

    /// A unique constraint of the storage is violated
    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Result type for all storage interactions
pub type Result<T> = core::result::Result<T, Error>;

/// Storage configuration
#[derive(Debug)]
pub enum Config {
    /// Postgres with the given connection options
    Postgres(PgConnectOptions),

    /// In-memory, gone on shutdown
    Memory,
}

impl Config {
    /// Detect the storage configuration from the environment
    ///
    /// `STORAGE` picks the backend (`postgres` by default), `DATABASE_URL` wins over the
    /// individual `DB_*` variables
    pub fn from_env() -> core::result::Result<Self, sqlx::Error> {
        let storage = env_var_or_else("STORAGE", || String::from("postgres"));

        if storage.eq_ignore_ascii_case("memory") {
            return Ok(Self::Memory);
        }

        if !storage.eq_ignore_ascii_case("postgres") {
            tracing::warn!("Unknown `STORAGE` value \"{storage}\", using postgres");
        }

        if let Some(url) = env_var("DATABASE_URL") {
            return url.parse::<PgConnectOptions>().map(Self::Postgres);
        }

        let mut options = PgConnectOptions::new();

        if let Some(host) = env_var("DB_HOST") {
            options = options.host(&host);
        }

        if let Some(port) = env_var("DB_PORT") {
            let port = port
                .parse::<u16>()
                .map_err(|err| sqlx::Error::Configuration(Box::new(err)))?;

            options = options.port(port);
        }

        if let Some(database) = env_var("DB_NAME") {
            options = options.database(&database);
        }

        if let Some(username) = env_var("DB_USER") {
            options = options.username(&username);
        }

        if let Some(password) = env_var("DB_PASSWORD") {
            options = options.password(&password);
        }

        Ok(Self::Postgres(options))
    }
}

/// Values to create a User
pub struct CreateUserValues<'a> {
    /// The full name
    pub full_name: &'a str,

    /// The email address
    pub email: &'a str,

    /// The hashed password
    pub hashed_password: &'a str,
}

/// Values to create a Note
pub struct CreateNoteValues<'a> {
    /// Title of the note
    pub title: &'a str,

    /// Content of the note
    ///
    /// Can be anything
    pub content: &'a str,

    /// Creation date of the note
    pub creation_date: &'a DateTime<Utc>,

    /// Owner of the note
    pub user_id: i32,
}

/// Values to update a Note
pub struct UpdateNoteValues {
    /// New pinned flag
    pub is_pinned: bool,
}

/// Values to create a Task
pub struct CreateTaskValues<'a> {
    /// Title of the task
    pub title: &'a str,

    /// Description of the task
    pub description: &'a str,

    /// Creation date of the task
    pub creation_date: &'a DateTime<Utc>,

    /// Optional due date
    pub due_date: Option<&'a NaiveDate>,

    /// Is the task already done?
    pub completed: bool,

    /// Owner of the task
    pub user_id: i32,
}

/// Values to update a Task
///
/// Both flags are always written together
pub struct UpdateTaskValues {
    /// New pinned flag
    pub is_pinned: bool,

    /// New completed flag
    pub completed: bool,
}

/// Storage with all supported operations
///
/// Mutations by ID report the number of affected rows, callers decide what a miss means
pub trait Storage: Clone + Send + Sync + 'static {
    /// Finds a single user by its email address
    fn find_single_user_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>>> + Send;

    /// Finds a single user by its ID
    fn find_single_user_by_id(&self, id: i32) -> impl Future<Output = Result<Option<User>>> + Send;

    /// Create a single user
    ///
    /// Fails with [`Error::Conflict`] when the email address is taken
    fn create_user(&self, values: &CreateUserValues) -> impl Future<Output = Result<User>> + Send;

    /// Overwrite the hashed password of a user
    fn change_password(
        &self,
        user_id: i32,
        hashed_password: &str,
    ) -> impl Future<Output = Result<u64>> + Send;

    /// Find all notes of a user
    fn find_all_notes_by_user(&self, user_id: i32)
    -> impl Future<Output = Result<Vec<Note>>> + Send;

    /// Create a note
    fn create_note(&self, values: &CreateNoteValues) -> impl Future<Output = Result<Note>> + Send;

    /// Update a note
    fn update_note(
        &self,
        note_id: i32,
        values: &UpdateNoteValues,
    ) -> impl Future<Output = Result<u64>> + Send;

    /// Delete a note
    fn delete_note(&self, note_id: i32) -> impl Future<Output = Result<u64>> + Send;

    /// Find all tasks of a user
    fn find_all_tasks_by_user(&self, user_id: i32)
    -> impl Future<Output = Result<Vec<Task>>> + Send;

    /// Count the tasks of a user per status, as seen today
    fn summarize_tasks_by_user(&self, user_id: i32) -> impl Future<Output = Result<Summary>> + Send;

    /// Create a task
    fn create_task(&self, values: &CreateTaskValues) -> impl Future<Output = Result<Task>> + Send;

    /// Update a task
    fn update_task(
        &self,
        task_id: i32,
        values: &UpdateTaskValues,
    ) -> impl Future<Output = Result<u64>> + Send;

    /// Delete a task
    fn delete_task(&self, task_id: i32) -> impl Future<Output = Result<u64>> + Send;
}
