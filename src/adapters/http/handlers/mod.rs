pub mod invoices_web;
pub mod pages;
pub mod web_auth;

use crate::{
  adapters::http::errors::{ApiError, AuthErrorKind},
  domain::{FormData, auth::entities::User},
};
use actix_web::{HttpMessage, HttpRequest, HttpResponse, http::StatusCode};

/// Extract authenticated user from request extensions
pub fn get_user(req: &HttpRequest) -> Result<User, ApiError> {
  let user = req.extensions().get::<User>().cloned();

  if user.is_none() {
    tracing::warn!(
      "get_user: User not found in request extensions for path {}",
      req.path()
    );
  }

  user.ok_or(ApiError::Auth(AuthErrorKind::InvalidSession))
}

/// Decode an `application/x-www-form-urlencoded` body, keeping repeated fields
pub fn parse_form(body: &[u8]) -> Result<FormData, ApiError> {
  serde_urlencoded::from_bytes::<Vec<(String, String)>>(body)
    .map(FormData::from)
    .map_err(|e| ApiError::Validation(format!("Malformed form body: {}", e)))
}

pub fn is_htmx(req: &HttpRequest) -> bool {
  req.headers().contains_key("HX-Request")
}

/// Navigate after a successful form action. htmx requests get `HX-Redirect`
/// so the client does a full page load instead of swapping the target.
pub fn see_other(req: &HttpRequest, location: &str) -> HttpResponse {
  if is_htmx(req) {
    return HttpResponse::Ok()
      .insert_header(("HX-Redirect", location))
      .finish();
  }

  HttpResponse::SeeOther()
    .insert_header(("Location", location))
    .finish()
}

pub fn html(status: StatusCode, body: String) -> HttpResponse {
  HttpResponse::build(status)
    .content_type("text/html; charset=utf-8")
    .body(body)
}
