use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use rocket::http::{ContentType, Status};
use rocket::response::{self, Responder, Response};
use rocket::serde::json::Json;
use rocket::Request;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Failures produced by the service and storage layers.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("user with id {0} not found")]
    UserNotFound(i64),
    #[error("item with id {0} not found")]
    ItemNotFound(i64),
    #[error("booking with id {0} not found")]
    BookingNotFound(i64),
    #[error("item request with id {0} not found")]
    RequestNotFound(i64),
    #[error("{0}")]
    AccessDenied(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{message}")]
    Validation {
        message: String,
        fields: BTreeMap<String, String>,
    },
    #[error("database error: {0}")]
    Database(#[source] DieselError),
    #[error("stored data is invalid: {0}")]
    CorruptData(String),
}

impl ServiceError {
    pub(crate) fn access_denied(message: impl Into<String>) -> Self {
        ServiceError::AccessDenied(message.into())
    }

    pub(crate) fn conflict(message: impl Into<String>) -> Self {
        ServiceError::Conflict(message.into())
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        ServiceError::BadRequest(message.into())
    }

    /// Stable machine-readable code reported in the error body.
    pub(crate) fn code(&self) -> &'static str {
        match self {
            ServiceError::UserNotFound(_) => "USER_NOT_FOUND",
            ServiceError::ItemNotFound(_) => "ITEM_NOT_FOUND",
            ServiceError::BookingNotFound(_) => "BOOKING_NOT_FOUND",
            ServiceError::RequestNotFound(_) => "REQUEST_NOT_FOUND",
            ServiceError::AccessDenied(_) => "ACCESS_DENIED",
            ServiceError::Conflict(_) => "CONFLICT",
            ServiceError::BadRequest(_) => "BAD_REQUEST",
            ServiceError::Validation { .. } => "VALIDATION_ERROR",
            ServiceError::Database(_) | ServiceError::CorruptData(_) => "INTERNAL_ERROR",
        }
    }

    pub(crate) fn status(&self) -> Status {
        match self {
            ServiceError::UserNotFound(_)
            | ServiceError::ItemNotFound(_)
            | ServiceError::BookingNotFound(_)
            | ServiceError::RequestNotFound(_) => Status::NotFound,
            ServiceError::AccessDenied(_) => Status::Forbidden,
            ServiceError::Conflict(_) => Status::Conflict,
            ServiceError::BadRequest(_) | ServiceError::Validation { .. } => Status::BadRequest,
            ServiceError::Database(_) | ServiceError::CorruptData(_) => {
                Status::InternalServerError
            }
        }
    }
}

impl From<DieselError> for ServiceError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                ServiceError::conflict("a record with the same unique value already exists")
            }
            other => ServiceError::Database(other),
        }
    }
}

/// JSON body sent for every failed request.
#[derive(Serialize, Debug)]
pub struct ApiError {
    timestamp: String,
    status: u16,
    error: &'static str,
    message: String,
    path: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    validation: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone)]
pub(crate) struct ErrorResponse {
    status: Status,
    code: &'static str,
    message: String,
    validation: Option<BTreeMap<String, String>>,
}

impl ErrorResponse {
    pub(crate) fn new(status: Status, code: &'static str, message: impl Into<String>) -> Self {
        ErrorResponse {
            status,
            code,
            message: message.into(),
            validation: None,
        }
    }
}

impl From<ServiceError> for ErrorResponse {
    fn from(err: ServiceError) -> Self {
        let status = err.status();
        let code = err.code();
        match err {
            ServiceError::Database(_) | ServiceError::CorruptData(_) => {
                // Details stay in the log, the client only sees a generic message.
                error!(error = %err, "request failed");
                ErrorResponse::new(status, code, "Internal server error")
            }
            ServiceError::Validation { message, fields } => ErrorResponse {
                status,
                code,
                message,
                validation: Some(fields),
            },
            other => ErrorResponse::new(status, code, other.to_string()),
        }
    }
}

impl<'r> Responder<'r, 'static> for ErrorResponse {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let body = ApiError {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            status: self.status.code,
            error: self.status.reason_lossy(),
            message: self.message,
            path: req.uri().path().to_string(),
            code: self.code,
            validation: self.validation,
        };

        Response::build_from(Json(body).respond_to(req)?)
            .status(self.status)
            .header(ContentType::JSON)
            .ok()
    }
}

/// Error recorded by a request guard so the catcher can render it.
pub(crate) struct RejectedRequest(pub(crate) Option<ErrorResponse>);

#[catch(default)]
pub(crate) fn default_catcher(status: Status, req: &Request<'_>) -> ErrorResponse {
    if let Some(rejected) = &req.local_cache(|| RejectedRequest(None)).0 {
        return rejected.clone();
    }

    let code = match status.code {
        400 => "BAD_REQUEST",
        403 => "ACCESS_DENIED",
        404 => "NOT_FOUND",
        409 => "CONFLICT",
        422 => "UNPROCESSABLE_ENTITY",
        _ => "INTERNAL_ERROR",
    };
    ErrorResponse::new(status, code, status.reason_lossy())
}
