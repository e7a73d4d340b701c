use actix_web::{HttpResponse, web};
use std::sync::Arc;

use crate::application::auth::{AuthenticateUseCase, SignOutUseCase};
use crate::application::dashboard::GetOverviewUseCase;
use crate::application::invoice::{
  CreateInvoiceUseCase, DeleteInvoiceUseCase, GetInvoiceFormUseCase, ListInvoicesUseCase,
  UpdateInvoiceUseCase,
};
use crate::domain::auth::services::AuthService;
use crate::domain::dashboard::ViewCache;

use super::handlers::web_auth::SessionCookieSettings;
use super::handlers::{invoices_web, pages, web_auth};
use super::middleware::WebAuthMiddleware;
use super::templates::TemplateEngine;

/// Everything the web routes hand to their handlers
#[derive(Clone)]
pub struct WebRouteDependencies {
  pub templates: TemplateEngine,
  pub auth_service: Arc<AuthService>,
  pub session_cookie: SessionCookieSettings,
  pub view_cache: Arc<dyn ViewCache>,
  pub authenticate_use_case: Arc<AuthenticateUseCase>,
  pub sign_out_use_case: Arc<SignOutUseCase>,
  pub overview_use_case: Arc<GetOverviewUseCase>,
  pub list_invoices_use_case: Arc<ListInvoicesUseCase>,
  pub invoice_form_use_case: Arc<GetInvoiceFormUseCase>,
  pub create_invoice_use_case: Arc<CreateInvoiceUseCase>,
  pub update_invoice_use_case: Arc<UpdateInvoiceUseCase>,
  pub delete_invoice_use_case: Arc<DeleteInvoiceUseCase>,
}

/// Configure the HTML routes
///
/// # Routes
///
/// - GET / - Redirect to the dashboard
/// - GET /health - Liveness probe
/// - GET /login, POST /login - Credentials sign-in
/// - POST /logout - End the current session
/// - GET /dashboard - Overview (authenticated)
/// - GET /dashboard/invoices - Searchable, paginated invoice table
/// - GET /dashboard/invoices/create, POST /dashboard/invoices - Create an invoice
/// - GET|POST /dashboard/invoices/{id}/edit - Update an invoice
/// - POST /dashboard/invoices/{id}/delete - Delete an invoice
pub fn configure_web_routes(cfg: &mut web::ServiceConfig, deps: WebRouteDependencies) {
  cfg.app_data(web::Data::new(deps.templates.clone()));

  // Public routes (no authentication required)
  cfg
    .route(
      "/",
      web::get().to(|| async {
        HttpResponse::Found()
          .insert_header(("Location", "/dashboard"))
          .finish()
      }),
    )
    .route("/health", web::get().to(health_check))
    .route("/login", web::get().to(pages::login_page));

  // Auth form submission routes
  cfg
    .app_data(web::Data::new(deps.authenticate_use_case))
    .app_data(web::Data::new(deps.sign_out_use_case))
    .app_data(web::Data::new(deps.session_cookie))
    .route("/login", web::post().to(web_auth::login_submit))
    .route("/logout", web::post().to(web_auth::logout));

  // Protected routes (require authentication)
  cfg.service(
    web::scope("/dashboard")
      .wrap(WebAuthMiddleware::new(deps.auth_service))
      .app_data(web::Data::new(deps.overview_use_case))
      .app_data(web::Data::new(deps.view_cache))
      .app_data(web::Data::new(deps.list_invoices_use_case))
      .app_data(web::Data::new(deps.invoice_form_use_case))
      .app_data(web::Data::new(deps.create_invoice_use_case))
      .app_data(web::Data::new(deps.update_invoice_use_case))
      .app_data(web::Data::new(deps.delete_invoice_use_case))
      .route("", web::get().to(pages::dashboard_page))
      .route("/invoices", web::get().to(invoices_web::invoices_page))
      .route(
        "/invoices",
        web::post().to(invoices_web::create_invoice_submit),
      )
      .route(
        "/invoices/create",
        web::get().to(invoices_web::create_invoice_page),
      )
      .route(
        "/invoices/{id}/edit",
        web::get().to(invoices_web::edit_invoice_page),
      )
      .route(
        "/invoices/{id}/edit",
        web::post().to(invoices_web::update_invoice_submit),
      )
      .route(
        "/invoices/{id}/delete",
        web::post().to(invoices_web::delete_invoice_submit),
      ),
  );
}

async fn health_check() -> &'static str {
  "OK"
}
