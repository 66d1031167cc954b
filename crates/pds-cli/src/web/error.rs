use axum::http::header::ALLOW;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use pds_core::ServiceError;

use super::classify::RouteError;

/// A request failure, rendered as a short `text/plain` body.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    allow: Option<String>,
}

impl AppError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            allow: None,
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            not_found @ ServiceError::NotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, not_found.to_string())
            }
            ServiceError::Store(inner) => {
                error!(error = %inner, "store failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        }
    }
}

impl From<RouteError> for AppError {
    fn from(err: RouteError) -> Self {
        match &err {
            RouteError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            RouteError::InvalidId(_) => Self::new(StatusCode::BAD_REQUEST, err.to_string()),
            RouteError::MethodNotAllowed { allow, .. } => {
                let allow = allow
                    .iter()
                    .map(|m| m.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                Self {
                    status: StatusCode::METHOD_NOT_ALLOWED,
                    message: err.to_string(),
                    allow: Some(allow),
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = self.status.as_u16(), message = %self.message, "request failed");
        } else {
            warn!(status = self.status.as_u16(), message = %self.message, "request rejected");
        }

        let mut response = (self.status, self.message).into_response();
        if let Some(allow) = self.allow.and_then(|a| HeaderValue::from_str(&a).ok()) {
            response.headers_mut().insert(ALLOW, allow);
        }
        response
    }
}
