use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error response structure sent to clients
///
/// Example JSON response:
/// ```json
/// {
///   "status": "fail",
///   "message": "Role 'директор' not found in the database"
/// }
/// ```
///
/// Kept separate from HttpError so internal context never leaks into the API
/// contract.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(s) => write!(f, "{}", s),
            Err(_) => Err(fmt::Error),
        }
    }
}

/// Failures raised by the data-access layer.
///
/// Role resolution is the only place this layer produces its own error; every
/// other failure (unique violations, FK violations, connection loss) is the
/// driver's and propagates unchanged after the transaction rolls back.
#[derive(Debug)]
pub enum DbError {
    /// The given role name matched no catalog row. Carries the caller's
    /// original input, not the normalized form.
    RoleNotFound(String),
    Sqlx(sqlx::Error),
}

impl fmt::Display for DbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbError::RoleNotFound(name) => {
                write!(f, "Role '{}' not found in the database", name)
            }
            DbError::Sqlx(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for DbError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DbError::RoleNotFound(_) => None,
            DbError::Sqlx(e) => Some(e),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        DbError::Sqlx(err)
    }
}

/// Fixed user-facing messages.
#[derive(Debug, PartialEq)]
pub enum ErrorMessage {
    ServerError,
    DuplicateRecord,
    RecordNotFound,
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ErrorMessage::ServerError => "Server Error. Please try again later",
            ErrorMessage::DuplicateRecord => "A record with this unique value already exists",
            ErrorMessage::RecordNotFound => "Requested record does not exist",
        };
        write!(f, "{}", message)
    }
}

/// Internal HTTP error type used by handlers
///
/// Bundles a client-facing message with a status code and converts into an
/// axum response via IntoResponse, so handlers can simply return
/// `Result<_, HttpError>`.
#[derive(Debug, Clone)]
pub struct HttpError {
    pub message: String,
    pub status: StatusCode,
}

impl HttpError {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        HttpError {
            message: message.into(),
            status,
        }
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        HttpError {
            message: message.into(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        HttpError {
            message: message.into(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn unique_constraint_violation(message: impl Into<String>) -> Self {
        HttpError {
            message: message.into(),
            status: StatusCode::CONFLICT,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        HttpError {
            message: message.into(),
            status: StatusCode::NOT_FOUND,
        }
    }

    pub fn into_http_response(self) -> Response {
        let json_response = Json(ErrorResponse {
            status: "fail".to_string(),
            message: self.message.clone(),
        });

        (self.status, json_response).into_response()
    }
}

/// Map data-layer failures onto HTTP statuses.
///
/// Not-found signals become 404, uniqueness conflicts 409, everything else a
/// generic 500 with the detail logged rather than leaked.
impl From<DbError> for HttpError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::RoleNotFound(_) => HttpError::not_found(err.to_string()),
            DbError::Sqlx(sqlx::Error::RowNotFound) => {
                HttpError::not_found(ErrorMessage::RecordNotFound.to_string())
            }
            DbError::Sqlx(ref e) => {
                if e.as_database_error()
                    .is_some_and(|db_err| db_err.is_unique_violation())
                {
                    return HttpError::unique_constraint_violation(
                        ErrorMessage::DuplicateRecord.to_string(),
                    );
                }
                tracing::error!("Database error: {}", err);
                HttpError::server_error(ErrorMessage::ServerError.to_string())
            }
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HttpError: message: {}, status: {}",
            self.message, self.status
        )
    }
}

impl std::error::Error for HttpError {}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}
