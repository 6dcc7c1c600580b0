use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use std::fmt;

use crate::models::workflow::{WorkflowError, WorkflowStatus};
use crate::validate::FieldError;

#[derive(Debug)]
pub enum AppError {
    NotFound,
    InvalidTransition {
        from: WorkflowStatus,
        to: WorkflowStatus,
        allowed: Vec<WorkflowStatus>,
    },
    MissingComment,
    Validation(Vec<FieldError>),
    NotEditable(WorkflowStatus),
    Conflict { expected: u64, actual: u64 },
    RateLimited(String),
    Seed(serde_json::Error),
}

/// JSON error body returned by every API endpoint.
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound => write!(f, "Not found"),
            AppError::InvalidTransition { from, to, .. } => {
                write!(f, "Invalid transition: {from} -> {to}")
            }
            AppError::MissingComment => write!(f, "A comment is required for this transition"),
            AppError::Validation(errors) => write!(f, "Validation failed ({} error(s))", errors.len()),
            AppError::NotEditable(status) => {
                write!(f, "Document cannot be edited while in status {status}")
            }
            AppError::Conflict { expected, actual } => write!(
                f,
                "Version conflict: expected {expected}, document is at {actual}"
            ),
            AppError::RateLimited(e) => write!(f, "Rate limited: {e}"),
            AppError::Seed(e) => write!(f, "Seed error: {e}"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::InvalidTransition { .. }
            | AppError::NotEditable(_)
            | AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::MissingComment | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Seed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let details = match self {
            AppError::InvalidTransition { allowed, .. } => {
                Some(serde_json::json!({ "allowed": allowed }))
            }
            AppError::Validation(errors) => Some(serde_json::json!({ "fields": errors })),
            AppError::Conflict { expected, actual } => {
                Some(serde_json::json!({ "expected": expected, "actual": actual }))
            }
            _ => None,
        };
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{self}");
        }
        HttpResponse::build(status).json(ApiErrorResponse {
            error: self.to_string(),
            details,
        })
    }
}

impl From<WorkflowError> for AppError {
    fn from(e: WorkflowError) -> Self {
        match e {
            WorkflowError::InvalidTransition { from, to, allowed } => {
                AppError::InvalidTransition { from, to, allowed }
            }
            WorkflowError::MissingComment => AppError::MissingComment,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Seed(e)
    }
}
