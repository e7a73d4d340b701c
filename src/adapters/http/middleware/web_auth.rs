use actix_web::{
  Error, HttpMessage, HttpResponse, ResponseError,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
  http::Method,
};
use futures_util::future::LocalBoxFuture;
use std::{future::ready, rc::Rc, sync::Arc};

use crate::adapters::http::errors::ApiError;
use crate::domain::auth::SignInError;
use crate::domain::auth::services::AuthService;

pub const SESSION_COOKIE: &str = "session_token";

/// Web authentication middleware using cookie-based sessions
pub struct WebAuthMiddleware {
  auth_service: Arc<AuthService>,
}

impl WebAuthMiddleware {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }
}

impl<S, B> Transform<S, ServiceRequest> for WebAuthMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type InitError = ();
  type Transform = WebAuthMiddlewareService<S>;
  type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(WebAuthMiddlewareService {
      service: Rc::new(service),
      auth_service: self.auth_service.clone(),
    }))
  }
}

pub struct WebAuthMiddlewareService<S> {
  service: Rc<S>,
  auth_service: Arc<AuthService>,
}

impl<S, B> Service<ServiceRequest> for WebAuthMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let token = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());

    let auth_service = self.auth_service.clone();
    let service = Rc::clone(&self.service);

    Box::pin(async move {
      let user = match token {
        Some(token) => match auth_service.validate_session(&token).await {
          Ok(user) => Some(user),
          Err(SignInError::Auth(e)) => {
            tracing::debug!("Rejecting session for {}: {}", req.path(), e);
            None
          }
          // The session may well be valid; sending the user to /login would loop
          Err(e) => {
            let error = ApiError::Internal(format!("Session lookup failed: {}", e));
            let res = req.into_response(error.error_response());
            return Ok(res.map_into_right_body());
          }
        },
        None => None,
      };

      match user {
        Some(user) => {
          req.extensions_mut().insert(user);
          let res = service.call(req).await?;
          Ok(res.map_into_left_body())
        }
        None => {
          let location = login_location(&req);
          let res = req.into_response(
            HttpResponse::Found()
              .insert_header(("Location", location))
              .finish(),
          );
          Ok(res.map_into_right_body())
        }
      }
    })
  }
}

/// Login URL that brings the user back to the page they asked for.
/// Only page loads are remembered; a form post cannot be replayed by a redirect.
fn login_location(req: &ServiceRequest) -> String {
  if req.method() != Method::GET {
    return "/login".to_string();
  }

  let target = req
    .uri()
    .path_and_query()
    .map(|pq| pq.as_str())
    .unwrap_or("/dashboard");

  match serde_urlencoded::to_string(&[("redirectTo", target)]) {
    Ok(query) => format!("/login?{}", query),
    Err(_) => "/login".to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::services::tests::{InMemoryUsers, PlainHasher, service_with_user};
  use crate::domain::auth::{
    CREDENTIALS_PROVIDER, RepositoryError, Session, SessionRepository, SignInProvider,
  };
  use crate::domain::FormData;
  use actix_web::{
    App,
    cookie::Cookie,
    http::StatusCode,
    test::{self, TestRequest},
    web,
  };

  async fn protected(req: actix_web::HttpRequest) -> HttpResponse {
    let email = req
      .extensions()
      .get::<crate::domain::auth::User>()
      .map(|u| u.email.clone())
      .unwrap_or_default();
    HttpResponse::Ok().body(email)
  }

  #[actix_web::test]
  async fn test_missing_cookie_redirects_to_login() {
    let (service, _) = service_with_user().await;
    let app = test::init_service(
      App::new().service(
        web::scope("/dashboard")
          .wrap(WebAuthMiddleware::new(Arc::new(service)))
          .route("/invoices", web::get().to(protected)),
      ),
    )
    .await;

    let req = TestRequest::get()
      .uri("/dashboard/invoices?page=2")
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
      resp.headers().get("Location").unwrap(),
      "/login?redirectTo=%2Fdashboard%2Finvoices%3Fpage%3D2"
    );
  }

  #[actix_web::test]
  async fn test_unknown_token_redirects_to_login() {
    let (service, _) = service_with_user().await;
    let app = test::init_service(
      App::new().service(
        web::scope("/dashboard")
          .wrap(WebAuthMiddleware::new(Arc::new(service)))
          .route("", web::post().to(protected)),
      ),
    )
    .await;

    let req = TestRequest::post()
      .uri("/dashboard")
      .cookie(Cookie::new(SESSION_COOKIE, "deadbeef"))
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get("Location").unwrap(), "/login");
  }

  struct UnavailableSessions;

  #[async_trait::async_trait]
  impl SessionRepository for UnavailableSessions {
    async fn create(&self, _session: Session) -> Result<Session, RepositoryError> {
      Err(RepositoryError::ConnectionFailed("pool timed out".to_string()))
    }

    async fn find_by_token_hash(&self, _token_hash: &str) -> Result<Option<Session>, RepositoryError> {
      Err(RepositoryError::ConnectionFailed("pool timed out".to_string()))
    }

    async fn delete(&self, _session_id: uuid::Uuid) -> Result<(), RepositoryError> {
      Err(RepositoryError::ConnectionFailed("pool timed out".to_string()))
    }
  }

  #[actix_web::test]
  async fn test_session_store_failure_is_server_error() {
    let service = AuthService::new(
      Arc::new(InMemoryUsers::default()),
      Arc::new(UnavailableSessions),
      Arc::new(PlainHasher),
      chrono::Duration::hours(1),
    );
    let app = test::init_service(
      App::new().service(
        web::scope("/dashboard")
          .wrap(WebAuthMiddleware::new(Arc::new(service)))
          .route("", web::get().to(protected)),
      ),
    )
    .await;

    let req = TestRequest::get()
      .uri("/dashboard")
      .cookie(Cookie::new(SESSION_COOKIE, "ab".repeat(32)))
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(resp.headers().get("Location").is_none());
  }

  #[actix_web::test]
  async fn test_valid_session_reaches_handler_with_user() {
    let (service, _) = service_with_user().await;
    let established = service
      .sign_in(
        CREDENTIALS_PROVIDER,
        &FormData::new()
          .with("email", "user@nextmail.com")
          .with("password", "123456"),
      )
      .await
      .unwrap();

    let app = test::init_service(
      App::new().service(
        web::scope("/dashboard")
          .wrap(WebAuthMiddleware::new(Arc::new(service)))
          .route("", web::get().to(protected)),
      ),
    )
    .await;

    let req = TestRequest::get()
      .uri("/dashboard")
      .cookie(Cookie::new(SESSION_COOKIE, established.token.as_str().to_string()))
      .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body, "user@nextmail.com");
  }
}
