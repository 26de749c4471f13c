//! All API endpoint setup

use axum::Router;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;

pub use request::Form;
pub use request::PathParameters;
pub use request::required;
pub use response::Acknowledgement;
pub use response::Error;
pub use response::Outcome;
pub use response::Success;

use crate::storage::Storage;

mod notes;
mod request;
mod response;
mod tasks;
mod users;

/// Get the Axum router for all API routes
pub fn router<S: Storage>() -> Router {
    let users = Router::new()
        .route("/signup", post(users::signup::<S>))
        .route("/login", post(users::login::<S>))
        .route("/summary/{user_id}", get(users::summary::<S>))
        .route("/{user_id}", get(users::single::<S>));

    let notes = Router::new()
        .route("/", post(notes::create::<S>))
        .route("/update", put(notes::update::<S>))
        // user ID for listing, note ID for deleting
        .route("/{id}", get(notes::list::<S>).delete(notes::delete::<S>));

    let tasks = Router::new()
        .route("/", post(tasks::create::<S>))
        .route("/update", put(tasks::update::<S>))
        // user ID for listing, task ID for deleting
        .route("/{id}", get(tasks::list::<S>).delete(tasks::delete::<S>));

    Router::new()
        .nest("/users", users)
        .route("/user/resetpassword", post(users::reset_password::<S>))
        .nest("/notes", notes)
        .nest("/tasks", tasks)
        .fallback(not_found)
}

/// Fallback for unknown routes
async fn not_found() -> Error {
    Error::not_found("Not found")
}
