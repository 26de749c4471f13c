//! Notes API endpoints
//!
//! Everything related to the notes of a user

use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::notes::Note;
use crate::storage::CreateNoteValues;
use crate::storage::Storage;
use crate::storage::UpdateNoteValues;

use super::Acknowledgement;
use super::Error;
use super::Form;
use super::PathParameters;
use super::Success;

/// Note response going to the user
#[derive(Debug, Serialize)]
pub struct NoteResponse {
    /// Note ID
    pub id: i32,

    /// Title
    pub title: String,

    /// Content, can be anything
    pub content: String,

    /// Creation date
    pub creation_date: DateTime<Utc>,

    /// Is the note pinned?
    pub is_pinned: bool,

    /// Owner of the note
    pub user_id: i32,
}

impl NoteResponse {
    /// Create a response from a [`Note`](Note)
    fn from_note(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            creation_date: note.creation_date,
            is_pinned: note.is_pinned,
            user_id: note.user_id,
        }
    }

    /// Create a response from multiple [`Note`](Note)s
    fn from_note_multiple(mut notes: Vec<Note>) -> Vec<Self> {
        notes.drain(..).map(Self::from_note).collect::<Vec<Self>>()
    }
}

/// Envelope around a freshly created note
#[derive(Debug, Serialize)]
pub struct CreatedNoteResponse {
    success: bool,
    note: NoteResponse,
}

/// List all notes of a user
///
/// Request:
/// ```sh
/// curl -v http://localhost:1000/notes/1
/// ```
///
/// Response:
/// ```json
/// [ { "id": 1, "title": "Groceries", "content": "Milk", "is_pinned": false ... } ]
/// ```
pub async fn list<S: Storage>(
    Extension(storage): Extension<S>,
    PathParameters(user_id): PathParameters<i32>,
) -> Result<Success<Vec<NoteResponse>>, Error> {
    let notes = storage
        .find_all_notes_by_user(user_id)
        .await
        .map_err(Error::internal_server_error)?;

    Ok(Success::ok(NoteResponse::from_note_multiple(notes)))
}

/// Create note form
#[derive(Debug, Deserialize)]
pub struct CreateNoteForm {
    /// Title of the note
    title: String,
    /// Content of the note
    content: String,
    /// Creation date, defaults to now
    creation_date: Option<DateTime<Utc>>,
    /// Owner of the note
    user_id: i32,
}

/// Create a note based on the [`CreateNoteForm`](CreateNoteForm) form
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     -d '{ "title": "Groceries", "content": "Milk", "user_id": 1 }' \
///     http://localhost:1000/notes
/// ```
///
/// Response:
/// ```json
/// { "success": true, "note": { "id": 1, "title": "Groceries" ... } }
/// ```
pub async fn create<S: Storage>(
    Extension(storage): Extension<S>,
    Form(form): Form<CreateNoteForm>,
) -> Result<Success<CreatedNoteResponse>, Error> {
    let creation_date = form.creation_date.unwrap_or_else(Utc::now);

    let values = CreateNoteValues {
        title: &form.title,
        content: &form.content,
        creation_date: &creation_date,
        user_id: form.user_id,
    };

    let note = storage
        .create_note(&values)
        .await
        .map_err(Error::internal_server_error)?;

    Ok(Success::created(CreatedNoteResponse {
        success: true,
        note: NoteResponse::from_note(note),
    }))
}

/// Update note form
#[derive(Debug, Deserialize)]
pub struct UpdateNoteForm {
    /// The note to update
    #[serde(rename = "noteId")]
    note_id: i32,
    /// New pinned flag
    is_pinned: bool,
}

/// Pin or unpin a note
///
/// An unknown note is acknowledged all the same
///
/// Request:
/// ```sh
/// curl -v -XPUT -H 'Content-Type: application/json' \
///     -d '{ "noteId": 1, "is_pinned": true }' \
///     http://localhost:1000/notes/update
/// ```
pub async fn update<S: Storage>(
    Extension(storage): Extension<S>,
    Form(form): Form<UpdateNoteForm>,
) -> Result<Acknowledgement, Error> {
    let values = UpdateNoteValues {
        is_pinned: form.is_pinned,
    };

    let affected = storage
        .update_note(form.note_id, &values)
        .await
        .map_err(Error::internal_server_error)?;

    if affected == 0 {
        tracing::debug!("Note {} not found, nothing updated", form.note_id);
    }

    Ok(Acknowledgement::created("Note Updated"))
}

/// Delete a note
///
/// Request:
/// ```sh
/// curl -v -XDELETE http://localhost:1000/notes/1
/// ```
pub async fn delete<S: Storage>(
    Extension(storage): Extension<S>,
    PathParameters(note_id): PathParameters<i32>,
) -> Result<Success<&'static str>, Error> {
    let affected = storage
        .delete_note(note_id)
        .await
        .map_err(Error::internal_server_error)?;

    if affected == 0 {
        return Err(Error::not_found("Note not found"));
    }

    Ok(Success::<&'static str>::no_content())
}
