use actix_web::{
  HttpMessage, HttpRequest, HttpResponse,
  cookie::{Cookie, SameSite, time::Duration},
  http::StatusCode,
  web,
};
use std::sync::Arc;

use super::{html, is_htmx, parse_form, see_other};
use crate::adapters::http::errors::ApiError;
use crate::adapters::http::middleware::SESSION_COOKIE;
use crate::adapters::http::templates::TemplateEngine;
use crate::application::auth::{AuthenticateUseCase, SignInOutcome, SignOutUseCase};
use crate::domain::auth::safe_redirect_target;

/// How the session cookie is issued
#[derive(Debug, Clone, Copy)]
pub struct SessionCookieSettings {
  pub max_age_seconds: i64,
  pub secure: bool,
}

/// Handle login form submission
pub async fn login_submit(
  req: HttpRequest,
  body: web::Bytes,
  use_case: web::Data<Arc<AuthenticateUseCase>>,
  settings: web::Data<SessionCookieSettings>,
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, ApiError> {
  let form = parse_form(&body)?;
  let email = form.get("email").unwrap_or_default().to_string();
  let redirect_to = safe_redirect_target(form.get("redirectTo"));

  match use_case.execute(form).await? {
    SignInOutcome::SignedIn(established) => {
      tracing::info!("Login successful for user_id={}", established.user.id);

      let cookie = Cookie::build(SESSION_COOKIE, established.token.as_str().to_string())
        .path("/")
        .http_only(true)
        .secure(settings.secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(settings.max_age_seconds))
        .finish();

      let mut response = see_other(&req, &established.redirect_to);
      response
        .add_cookie(&cookie)
        .map_err(|e| ApiError::Internal(format!("Failed to set session cookie: {}", e)))?;
      Ok(response)
    }
    SignInOutcome::Rejected(message) => {
      tracing::info!("Login rejected: {}", message);

      let mut context = tera::Context::new();
      context.insert("title", "Login");
      context.insert("error", &message);
      context.insert("email", &email);
      context.insert("redirect_to", &redirect_to);

      let template = if is_htmx(&req) {
        "partials/login_form.html.tera"
      } else {
        "pages/login.html.tera"
      };
      let page = templates.render(template, &context)?;
      Ok(html(StatusCode::BAD_REQUEST, page))
    }
  }
}

/// Handle logout
pub async fn logout(
  req: HttpRequest,
  use_case: web::Data<Arc<SignOutUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let token = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());
  use_case.execute(token.as_deref()).await?;

  let cookie = Cookie::build(SESSION_COOKIE, "")
    .path("/")
    .http_only(true)
    .max_age(Duration::ZERO)
    .finish();

  let mut response = see_other(&req, "/login");
  response
    .add_cookie(&cookie)
    .map_err(|e| ApiError::Internal(format!("Failed to clear session cookie: {}", e)))?;
  Ok(response)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::SignInProvider;
  use crate::domain::auth::services::tests::service_with_user;
  use crate::domain::auth::{AuthError, AuthErrorType, EstablishedSession, SignInError};
  use crate::domain::FormData;
  use crate::domain::auth::errors::HashError;
  use actix_web::{
    App,
    test::{self, TestRequest},
  };
  use async_trait::async_trait;

  const SETTINGS: SessionCookieSettings = SessionCookieSettings {
    max_age_seconds: 3600,
    secure: false,
  };

  /// Always fails the same way.
  struct FailingProvider(fn() -> SignInError);

  #[async_trait]
  impl SignInProvider for FailingProvider {
    async fn sign_in(
      &self,
      _provider: &str,
      _form: &FormData,
    ) -> Result<EstablishedSession, SignInError> {
      Err((self.0)())
    }
  }

  macro_rules! login_app {
    ($provider:expr) => {
      test::init_service(
        App::new()
          .app_data(web::Data::new(TemplateEngine::new().unwrap()))
          .app_data(web::Data::new(Arc::new(AuthenticateUseCase::new($provider))))
          .app_data(web::Data::new(SETTINGS))
          .route("/login", web::post().to(login_submit)),
      )
      .await
    };
  }

  fn login_request(body: &'static str) -> TestRequest {
    TestRequest::post()
      .uri("/login")
      .insert_header(("Content-Type", "application/x-www-form-urlencoded"))
      .set_payload(body)
  }

  #[actix_web::test]
  async fn test_successful_login_sets_cookie_and_redirects() {
    let (service, sessions) = service_with_user().await;
    let app = login_app!(Arc::new(service));

    let req = login_request(
      "email=user%40nextmail.com&password=123456&redirectTo=%2Fdashboard%2Finvoices",
    )
    .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
      resp.headers().get("Location").unwrap(),
      "/dashboard/invoices"
    );

    let cookie = resp
      .response()
      .cookies()
      .find(|c| c.name() == SESSION_COOKIE)
      .unwrap();
    assert_eq!(cookie.value().len(), 64);
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.max_age(), Some(Duration::seconds(3600)));
    assert_eq!(sessions.sessions.lock().unwrap().len(), 1);
  }

  #[actix_web::test]
  async fn test_wrong_password_renders_invalid_credentials() {
    let (service, sessions) = service_with_user().await;
    let app = login_app!(Arc::new(service));

    let req = login_request("email=user%40nextmail.com&password=wrong-password").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Invalid credentials."));
    assert!(body.contains("user@nextmail.com"));
    assert!(sessions.sessions.lock().unwrap().is_empty());
  }

  #[actix_web::test]
  async fn test_htmx_rejection_renders_form_fragment() {
    let (service, _) = service_with_user().await;
    let app = login_app!(Arc::new(service));

    let req = login_request("email=nobody%40nextmail.com&password=123456")
      .insert_header(("HX-Request", "true"))
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Invalid credentials."));
    assert!(!body.contains("<html"));
  }

  #[actix_web::test]
  async fn test_other_auth_failure_renders_generic_message() {
    let app = login_app!(Arc::new(FailingProvider(|| {
      AuthError::new(AuthErrorType::AccessDenied).into()
    })));

    let resp = test::call_service(&app, login_request("email=a%40b.co&password=123456").to_request()).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Something went wrong."));
  }

  #[actix_web::test]
  async fn test_infrastructure_failure_is_internal_error() {
    let app = login_app!(Arc::new(FailingProvider(|| {
      SignInError::Hash(HashError::InvalidFormat)
    })));

    let resp = test::call_service(&app, login_request("email=a%40b.co&password=123456").to_request()).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[actix_web::test]
  async fn test_logout_deletes_session_and_clears_cookie() {
    let (service, sessions) = service_with_user().await;
    let established = service
      .sign_in(
        crate::domain::auth::CREDENTIALS_PROVIDER,
        &FormData::new()
          .with("email", "user@nextmail.com")
          .with("password", "123456"),
      )
      .await
      .unwrap();
    assert_eq!(sessions.sessions.lock().unwrap().len(), 1);

    let app = test::init_service(
      App::new()
        .app_data(web::Data::new(Arc::new(SignOutUseCase::new(Arc::new(service)))))
        .route("/logout", web::post().to(logout)),
    )
    .await;

    let req = TestRequest::post()
      .uri("/logout")
      .cookie(Cookie::new(SESSION_COOKIE, established.token.as_str().to_string()))
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get("Location").unwrap(), "/login");
    let cookie = resp
      .response()
      .cookies()
      .find(|c| c.name() == SESSION_COOKIE)
      .unwrap();
    assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    assert!(sessions.sessions.lock().unwrap().is_empty());
  }
}
