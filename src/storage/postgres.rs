//! Postgres storage

use std::time::Duration;

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;

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

/// Migrator to run migrations on startup
static MIGRATOR: Migrator = sqlx::migrate!();

/// Postgres storage
#[derive(Clone, Debug)]
pub struct Postgres {
    /// Pool of connections
    connection_pool: PgPool,
}

impl Postgres {
    /// Connect to Postgres with the given options
    ///
    /// Migrations will be run
    pub async fn connect(options: PgConnectOptions) -> Result<Self> {
        let connection_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await
            .map_err(connection_error)?;

        Self::new_with_pool(connection_pool).await
    }

    /// Create Postgres storage with existing pool
    ///
    /// Migrations will be run
    pub async fn new_with_pool(connection_pool: PgPool) -> Result<Self> {
        MIGRATOR
            .run(&connection_pool)
            .await
            .map_err(|err| Error::Connection(format!("Migrations could not run: {err}")))?;

        Ok(Self { connection_pool })
    }
}

impl Storage for Postgres {
    async fn find_single_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r"
            SELECT user_id, full_name, email, password
            FROM users
            WHERE email = $1
            LIMIT 1
            ",
        )
        .bind(email)
        .fetch_optional(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(user)
    }

    async fn find_single_user_by_id(&self, id: i32) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r"
            SELECT user_id, full_name, email, password
            FROM users
            WHERE user_id = $1
            LIMIT 1
            ",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(user)
    }

    async fn create_user(&self, values: &CreateUserValues<'_>) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r"
            INSERT INTO users (full_name, email, password)
            VALUES ($1, $2, $3)
            RETURNING user_id, full_name, email, password
            ",
        )
        .bind(values.full_name)
        .bind(values.email)
        .bind(values.hashed_password)
        .fetch_one(&self.connection_pool)
        .await
        .map_err(write_error)?;

        Ok(user)
    }

    async fn change_password(&self, user_id: i32, hashed_password: &str) -> Result<u64> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET password = $1
            WHERE user_id = $2
            ",
        )
        .bind(hashed_password)
        .bind(user_id)
        .execute(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(result.rows_affected())
    }

    async fn find_all_notes_by_user(&self, user_id: i32) -> Result<Vec<Note>> {
        let notes = sqlx::query_as::<_, Note>(
            r"
            SELECT *
            FROM notes
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_all(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(notes)
    }

    async fn create_note(&self, values: &CreateNoteValues<'_>) -> Result<Note> {
        let note = sqlx::query_as::<_, Note>(
            r"
            INSERT INTO notes (title, content, creation_date, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            ",
        )
        .bind(values.title)
        .bind(values.content)
        .bind(values.creation_date)
        .bind(values.user_id)
        .fetch_one(&self.connection_pool)
        .await
        .map_err(write_error)?;

        Ok(note)
    }

    async fn update_note(&self, note_id: i32, values: &UpdateNoteValues) -> Result<u64> {
        let result = sqlx::query(
            r"
            UPDATE notes
            SET is_pinned = $1
            WHERE id = $2
            ",
        )
        .bind(values.is_pinned)
        .bind(note_id)
        .execute(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(result.rows_affected())
    }

    async fn delete_note(&self, note_id: i32) -> Result<u64> {
        let result = sqlx::query(
            r"
            DELETE FROM notes
            WHERE id = $1
            ",
        )
        .bind(note_id)
        .execute(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(result.rows_affected())
    }

    async fn find_all_tasks_by_user(&self, user_id: i32) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            r"
            SELECT *
            FROM tasks
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_all(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(tasks)
    }

    async fn summarize_tasks_by_user(&self, user_id: i32) -> Result<Summary> {
        let summary = sqlx::query_as::<_, Summary>(
            r"
            SELECT
                COUNT(*) FILTER (WHERE completed) AS completed,
                COUNT(*) FILTER (
                    WHERE NOT completed AND (due_date IS NULL OR due_date >= CURRENT_DATE)
                ) AS pending,
                COUNT(*) FILTER (WHERE NOT completed AND due_date < CURRENT_DATE) AS overdue
            FROM tasks
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_one(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(summary)
    }

    async fn create_task(&self, values: &CreateTaskValues<'_>) -> Result<Task> {
        let task = sqlx::query_as::<_, Task>(
            r"
            INSERT INTO tasks (title, description, creation_date, due_date, completed, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            ",
        )
        .bind(values.title)
        .bind(values.description)
        .bind(values.creation_date)
        .bind(values.due_date)
        .bind(values.completed)
        .bind(values.user_id)
        .fetch_one(&self.connection_pool)
        .await
        .map_err(write_error)?;

        Ok(task)
    }

    async fn update_task(&self, task_id: i32, values: &UpdateTaskValues) -> Result<u64> {
        let result = sqlx::query(
            r"
            UPDATE tasks
            SET is_pinned = $1, completed = $2
            WHERE id = $3
            ",
        )
        .bind(values.is_pinned)
        .bind(values.completed)
        .bind(task_id)
        .execute(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(result.rows_affected())
    }

    async fn delete_task(&self, task_id: i32) -> Result<u64> {
        let result = sqlx::query(
            r"
            DELETE FROM tasks
            WHERE id = $1
            ",
        )
        .bind(task_id)
        .execute(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(result.rows_affected())
    }
}

/// Convert `SQLx` to storage connection error
fn connection_error<E>(err: E) -> Error
where
    E: std::error::Error,
{
    Error::Connection(err.to_string())
}

/// Convert `SQLx` to storage error, keeping unique violations apart
fn write_error(err: sqlx::Error) -> Error {
    match &err {
        sqlx::Error::Database(database_error) if database_error.is_unique_violation() => {
            Error::Conflict(database_error.message().to_string())
        }
        _ => connection_error(err),
    }
}
