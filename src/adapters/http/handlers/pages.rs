use actix_web::{HttpRequest, HttpResponse, http::StatusCode, web};
use serde::Deserialize;
use std::sync::Arc;

use super::{get_user, html};
use crate::adapters::http::errors::ApiError;
use crate::adapters::http::templates::TemplateEngine;
use crate::application::dashboard::GetOverviewUseCase;
use crate::domain::auth::safe_redirect_target;

#[derive(Debug, Deserialize)]
pub struct LoginPageQuery {
  #[serde(rename = "redirectTo")]
  redirect_to: Option<String>,
}

/// Render login page
pub async fn login_page(
  query: web::Query<LoginPageQuery>,
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, ApiError> {
  let mut context = tera::Context::new();
  context.insert("title", "Login");
  context.insert(
    "redirect_to",
    &safe_redirect_target(query.redirect_to.as_deref()),
  );
  context.insert("email", "");

  let page = templates.render("pages/login.html.tera", &context)?;
  Ok(html(StatusCode::OK, page))
}

/// Render dashboard overview (authenticated)
pub async fn dashboard_page(
  req: HttpRequest,
  use_case: web::Data<Arc<GetOverviewUseCase>>,
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;
  let overview = use_case.execute().await?;

  let mut context = tera::Context::new();
  context.insert("title", "Dashboard");
  context.insert("active", "home");
  context.insert("user", &serde_json::json!({
    "name": user.name,
    "email": user.email,
  }));
  context.insert("cards", &overview.cards);
  context.insert("revenue", &overview.revenue);
  context.insert("latest_invoices", &overview.latest_invoices);

  let page = templates.render("pages/dashboard.html.tera", &context)?;
  Ok(html(StatusCode::OK, page))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::dashboard::test_support::FakeDashboard;
  use crate::domain::auth::User;
  use actix_web::{
    App, HttpMessage,
    test::{self, TestRequest},
  };

  #[actix_web::test]
  async fn test_login_page_sanitizes_redirect_target() {
    let app = test::init_service(
      App::new()
        .app_data(web::Data::new(TemplateEngine::new().unwrap()))
        .route("/login", web::get().to(login_page)),
    )
    .await;

    let req = TestRequest::get()
      .uri("/login?redirectTo=%2F%2Fevil.example.com")
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("name=\"redirectTo\""));
    assert!(body.contains("&#x2F;dashboard"));
    assert!(!body.contains("evil.example.com"));
  }

  #[actix_web::test]
  async fn test_dashboard_page_renders_overview() {
    let use_case = Arc::new(GetOverviewUseCase::new(Arc::new(FakeDashboard::seeded())));
    let app = test::init_service(
      App::new()
        .app_data(web::Data::new(TemplateEngine::new().unwrap()))
        .app_data(web::Data::new(use_case))
        .route("/dashboard", web::get().to(dashboard_page)),
    )
    .await;

    let req = TestRequest::get().uri("/dashboard").to_request();
    req.extensions_mut().insert(User::new(
      "User".to_string(),
      "user@nextmail.com".to_string(),
      "hash".to_string(),
    ));
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("$203.48"));
    assert!(body.contains("Delba de Oliveira"));
    assert!(body.contains("Jan"));
  }

  #[actix_web::test]
  async fn test_dashboard_page_requires_user() {
    let use_case = Arc::new(GetOverviewUseCase::new(Arc::new(FakeDashboard::seeded())));
    let app = test::init_service(
      App::new()
        .app_data(web::Data::new(TemplateEngine::new().unwrap()))
        .app_data(web::Data::new(use_case))
        .route("/dashboard", web::get().to(dashboard_page)),
    )
    .await;

    let req = TestRequest::get().uri("/dashboard").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }
}
