//! User API endpoints
//!
//! Signup, login, password reset and the profile of a user

use axum::Extension;
use serde::Deserialize;
use serde::Serialize;

use crate::password::hash;
use crate::password::verify;
use crate::storage;
use crate::storage::CreateUserValues;
use crate::storage::Storage;
use crate::tasks::Summary;
use crate::users::User;

use super::Error;
use super::Form;
use super::Outcome;
use super::PathParameters;
use super::Success;
use super::required;

/// The user response information
///
/// A subset of all the information, the password never leaves
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// The user ID
    pub user_id: i32,

    /// The full name
    pub full_name: String,

    /// The email address
    pub email: String,
}

impl UserResponse {
    /// Create a user response from a [`User`](User)
    fn from_user(user: User) -> Self {
        Self {
            user_id: user.id,
            full_name: user.full_name,
            email: user.email,
        }
    }
}

/// Envelope around a single user
#[derive(Debug, Serialize)]
pub struct SingleUserResponse {
    success: bool,
    data: UserResponse,
}

/// Signup form
///
/// All fields are optional here to report missing fields ourselves
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    /// Full name of the new user
    full_name: Option<String>,
    /// Email address of the new user
    email: Option<String>,
    /// Password of the new user
    password: Option<String>,
}

/// Register a new user based on the [`SignupForm`](SignupForm) form
///
/// The email address is checked up front, the unique constraint of the storage catches the
/// signups that race each other
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     -d '{ "full_name": "Ada Lovelace", "email": "ada@example.com", "password": "verysecret" }' \
///     http://localhost:1000/users/signup
/// ```
///
/// Response:
/// ```json
/// { "success": true, "message": "User registered successfully" }
/// ```
pub async fn signup<S: Storage>(
    Extension(storage): Extension<S>,
    Form(form): Form<SignupForm>,
) -> Result<Success<Outcome>, Error> {
    let (Some(full_name), Some(email), Some(password)) = (
        required(&form.full_name),
        required(&form.email),
        required(&form.password),
    ) else {
        return Err(Error::bad_request("All fields are required"));
    };

    let user = storage
        .find_single_user_by_email(email)
        .await
        .map_err(Error::internal_server_error)?;

    if user.is_some() {
        return Err(Error::bad_request("Email already in use"));
    }

    let hashed_password = hash(password).map_err(Error::internal_server_error)?;

    let values = CreateUserValues {
        full_name,
        email,
        hashed_password: &hashed_password,
    };

    let user = storage.create_user(&values).await.map_err(|err| match err {
        storage::Error::Conflict(_) => Error::bad_request("Email already in use"),
        err @ storage::Error::Connection(_) => Error::internal_server_error(err),
    })?;

    tracing::debug!("Registered user {}", user.id);

    Ok(Success::created(Outcome::success(
        "User registered successfully",
    )))
}

/// Login form
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Email address of the user
    #[serde(default)]
    email: String,
    /// Password of the user
    #[serde(default)]
    password: String,
}

/// Response of a login attempt
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum LoginResponse {
    /// Credentials are valid
    LoggedIn {
        success: bool,
        #[serde(rename = "userId")]
        user_id: i32,
    },

    /// Credentials are invalid
    Rejected(Outcome),
}

/// Check the credentials of a user
///
/// Invalid credentials are not an error status, the `success` flag tells the story
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     -d '{ "email": "ada@example.com", "password": "verysecret" }' \
///     http://localhost:1000/users/login
/// ```
///
/// Response:
/// ```json
/// { "success": true, "userId": 1 }
/// ```
pub async fn login<S: Storage>(
    Extension(storage): Extension<S>,
    Form(form): Form<LoginForm>,
) -> Result<Success<LoginResponse>, Error> {
    let user = storage
        .find_single_user_by_email(&form.email)
        .await
        .map_err(Error::internal_server_error)?;

    let Some(user) = user else {
        return Ok(Success::ok(LoginResponse::Rejected(Outcome::failure(
            "User not found",
        ))));
    };

    if !verify(&user.hashed_password, &form.password).map_err(Error::internal_server_error)? {
        return Ok(Success::ok(LoginResponse::Rejected(Outcome::failure(
            "Wrong password",
        ))));
    }

    Ok(Success::ok(LoginResponse::LoggedIn {
        success: true,
        user_id: user.id,
    }))
}

/// Get a single user
///
/// Request:
/// ```sh
/// curl -v http://localhost:1000/users/1
/// ```
///
/// Response:
/// ```json
/// { "success": true, "data": { "user_id": 1, "full_name": "Ada Lovelace", "email": "ada@example.com" } }
/// ```
pub async fn single<S: Storage>(
    Extension(storage): Extension<S>,
    PathParameters(user_id): PathParameters<i32>,
) -> Result<Success<SingleUserResponse>, Error> {
    let user = fetch_user(&storage, user_id).await?;

    Ok(Success::ok(SingleUserResponse {
        success: true,
        data: UserResponse::from_user(user),
    }))
}

/// Count the tasks of a user per status
///
/// An unknown user simply has no tasks
///
/// Request:
/// ```sh
/// curl -v http://localhost:1000/users/summary/1
/// ```
///
/// Response:
/// ```json
/// { "completed": 3, "pending": 2, "overdue": 1 }
/// ```
pub async fn summary<S: Storage>(
    Extension(storage): Extension<S>,
    PathParameters(user_id): PathParameters<i32>,
) -> Result<Success<Summary>, Error> {
    let summary = storage
        .summarize_tasks_by_user(user_id)
        .await
        .map_err(Error::internal_server_error)?;

    Ok(Success::ok(summary))
}

/// Reset password form
///
/// A `user_id` of 0 counts as missing
#[derive(Debug, Deserialize)]
pub struct ResetPasswordForm {
    /// The user changing the password
    user_id: Option<i32>,
    /// Current password for verification
    old_password: Option<String>,
    /// New password
    new_password: Option<String>,
}

/// Change the password of a user, after verifying the current one
///
/// Verifying and updating are two separate steps against the storage
///
/// Request:
/// ```sh
/// curl -v -XPOST -H 'Content-Type: application/json' \
///     -d '{ "user_id": 1, "old_password": "verysecret", "new_password": "veryverysecret" }' \
///     http://localhost:1000/user/resetpassword
/// ```
///
/// Response:
/// ```json
/// { "success": true, "message": "Password updated successfully!" }
/// ```
pub async fn reset_password<S: Storage>(
    Extension(storage): Extension<S>,
    Form(form): Form<ResetPasswordForm>,
) -> Result<Success<Outcome>, Error> {
    let (Some(user_id), Some(old_password), Some(new_password)) = (
        form.user_id.filter(|user_id| *user_id != 0),
        required(&form.old_password),
        required(&form.new_password),
    ) else {
        return Err(Error::bad_request("Missing required fields"));
    };

    let user = fetch_user(&storage, user_id).await?;

    if !verify(&user.hashed_password, old_password).map_err(Error::internal_server_error)? {
        return Err(Error::unauthorized("Old password is incorrect"));
    }

    let hashed_password = hash(new_password).map_err(Error::internal_server_error)?;

    storage
        .change_password(user.id, &hashed_password)
        .await
        .map_err(Error::internal_server_error)?;

    tracing::debug!("Changed password of user {}", user.id);

    Ok(Success::ok(Outcome::success(
        "Password updated successfully!",
    )))
}

/// Fetch a user from storage
async fn fetch_user<S: Storage>(storage: &S, user_id: i32) -> Result<User, Error> {
    storage
        .find_single_user_by_id(user_id)
        .await
        .map_err(Error::internal_server_error)?
        .ok_or_else(|| Error::not_found("User not found"))
}
