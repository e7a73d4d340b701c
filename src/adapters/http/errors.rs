use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use std::fmt;

use crate::domain::auth::errors::{AuthError, AuthErrorType, RepositoryError, SignInError};
use crate::domain::invoice::InvoiceError;

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ApiError {
  /// Malformed request (400 Bad Request)
  Validation(String),

  /// Authentication error (401 Unauthorized or 403 Forbidden)
  Auth(AuthErrorKind),

  /// Requested record does not exist (404 Not Found)
  NotFound(String),

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

/// Authentication error kinds
#[derive(Debug, Serialize)]
pub enum AuthErrorKind {
  /// Session expired or invalid (401)
  InvalidSession,

  /// Signed in but not allowed (403)
  AccessDenied,
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::Auth(kind) => write!(f, "Authentication error: {:?}", kind),
      ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Auth(kind) => match kind {
        AuthErrorKind::InvalidSession => StatusCode::UNAUTHORIZED,
        AuthErrorKind::AccessDenied => StatusCode::FORBIDDEN,
      },
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone()),
      ApiError::Auth(AuthErrorKind::InvalidSession) => {
        ("invalid_session", "Invalid or expired session".to_string())
      }
      ApiError::Auth(AuthErrorKind::AccessDenied) => {
        ("access_denied", "You are not allowed to do that".to_string())
      }
      ApiError::NotFound(msg) => ("not_found", msg.clone()),
      ApiError::Internal(msg) => {
        // Don't expose internal error details in production
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
        )
      }
    };

    let error_response = ErrorResponse {
      error: error_type.to_string(),
      message,
      details: None,
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(error_response)
  }
}

impl From<AuthError> for ApiError {
  fn from(error: AuthError) -> Self {
    match error.kind {
      AuthErrorType::CredentialsSignin | AuthErrorType::SessionRequired => {
        ApiError::Auth(AuthErrorKind::InvalidSession)
      }
      AuthErrorType::AccessDenied => ApiError::Auth(AuthErrorKind::AccessDenied),
      AuthErrorType::ProviderNotFound | AuthErrorType::Configuration => {
        ApiError::Internal(error.to_string())
      }
    }
  }
}

/// Only infrastructure faults reach this conversion from the sign-in flow;
/// rejected credentials are turned into a form message before that.
impl From<SignInError> for ApiError {
  fn from(error: SignInError) -> Self {
    match error {
      SignInError::Auth(err) => ApiError::from(err),
      SignInError::Repository(err) => ApiError::from(err),
      SignInError::Hash(err) => ApiError::Internal(err.to_string()),
    }
  }
}

impl From<RepositoryError> for ApiError {
  fn from(error: RepositoryError) -> Self {
    ApiError::Internal(format!("Repository error: {}", error))
  }
}

impl From<InvoiceError> for ApiError {
  fn from(error: InvoiceError) -> Self {
    match error {
      InvoiceError::InvoiceNotFound(id) => ApiError::NotFound(format!("Invoice {} not found", id)),
      InvoiceError::Validation(err) => ApiError::Validation(err.to_string()),
      InvoiceError::Database(err) => ApiError::Internal(format!("Database error: {}", err)),
    }
  }
}

impl From<tera::Error> for ApiError {
  fn from(error: tera::Error) -> Self {
    ApiError::Internal(format!("Template error: {:?}", error))
  }
}
