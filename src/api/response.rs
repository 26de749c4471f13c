//! API response helpers

use std::fmt::Display;

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Serialize;

/// Hold data for a successful API interaction
///
/// The data is sent as-is, without a wrapper
pub struct Success<V>
where
    V: Serialize,
{
    status_code: StatusCode,
    data: Option<V>,
}

impl<V> Success<V>
where
    V: Serialize,
{
    pub fn ok(data: V) -> Self {
        Self {
            status_code: StatusCode::OK,
            data: Some(data),
        }
    }

    pub fn created(data: V) -> Self {
        Self {
            status_code: StatusCode::CREATED,
            data: Some(data),
        }
    }

    pub fn no_content() -> Self {
        Self {
            status_code: StatusCode::NO_CONTENT,
            data: None,
        }
    }
}

impl<V> IntoResponse for Success<V>
where
    V: Serialize,
{
    fn into_response(self) -> Response {
        if let Some(data) = self.data {
            (self.status_code, Json(data)).into_response()
        } else {
            self.status_code.into_response()
        }
    }
}

/// Plain text acknowledgement of a successful API interaction
pub struct Acknowledgement {
    status_code: StatusCode,
    message: &'static str,
}

impl Acknowledgement {
    pub fn created(message: &'static str) -> Self {
        Self {
            status_code: StatusCode::CREATED,
            message,
        }
    }
}

impl IntoResponse for Acknowledgement {
    fn into_response(self) -> Response {
        (self.status_code, self.message).into_response()
    }
}

/// Outcome with a success flag and a human readable message
#[derive(Debug, Serialize)]
pub struct Outcome {
    success: bool,
    message: &'static str,
}

impl Outcome {
    pub fn success(message: &'static str) -> Self {
        Self {
            success: true,
            message,
        }
    }

    /// Logical failure, still sent with a successful status code
    pub fn failure(message: &'static str) -> Self {
        Self {
            success: false,
            message,
        }
    }
}

/// Hold data for a failed API interaction
#[derive(Debug)]
pub struct Error {
    status_code: StatusCode,
    message: String,
    description: Option<String>,
}

impl Error {
    pub fn bad_request<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self {
            status_code: StatusCode::BAD_REQUEST,
            message: message.to_string(),
            description: None,
        }
    }

    pub fn unauthorized<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self {
            status_code: StatusCode::UNAUTHORIZED,
            message: message.to_string(),
            description: None,
        }
    }

    pub fn not_found<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self {
            status_code: StatusCode::NOT_FOUND,
            message: message.to_string(),
            description: None,
        }
    }

    /// Log the actual error, only a generic message goes out
    pub fn internal_server_error<E>(err: E) -> Self
    where
        E: Display,
    {
        tracing::error!("Internal server error: {err}");

        Self {
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Server error".to_string(),
            description: None,
        }
    }

    #[must_use]
    pub fn with_description<M>(self, description: M) -> Self
    where
        M: ToString,
    {
        Self {
            description: Some(description.to_string()),
            ..self
        }
    }
}

#[derive(Serialize)]
struct ErrorWrapper {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (
            self.status_code,
            Json(ErrorWrapper {
                success: false,
                message: self.message,
                description: self.description,
            }),
        )
            .into_response()
    }
}
