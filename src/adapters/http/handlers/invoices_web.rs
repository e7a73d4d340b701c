use actix_web::{HttpRequest, HttpResponse, http::StatusCode, web};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::{html, is_htmx, parse_form, see_other};
use crate::adapters::http::errors::ApiError;
use crate::adapters::http::middleware::RequestIdExt;
use crate::adapters::http::templates::TemplateEngine;
use crate::application::invoice::{
  ActionOutcome, CreateInvoiceUseCase, DeleteInvoiceUseCase, FormState, GetInvoiceFormUseCase,
  INVOICES_PATH, InvoiceFormValues, ListInvoicesQuery, ListInvoicesUseCase, UpdateInvoiceUseCase,
};
use crate::domain::FormData;
use crate::domain::dashboard::{CustomerField, ViewCache};
use crate::domain::invoice::{AMOUNT_FIELD, CUSTOMER_ID_FIELD, STATUS_FIELD};

#[derive(Debug, Deserialize)]
pub struct InvoiceListParams {
  query: Option<String>,
  page: Option<String>,
}

/// Render the invoice table, served from the view cache when a fresh copy exists
pub async fn invoices_page(
  req: HttpRequest,
  params: web::Query<InvoiceListParams>,
  use_case: web::Data<Arc<ListInvoicesUseCase>>,
  cache: web::Data<Arc<dyn ViewCache>>,
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, ApiError> {
  let variant = req.query_string().to_string();
  if let Some(cached) = cache.get(INVOICES_PATH, &variant).await {
    tracing::debug!("Serving {}?{} from view cache", INVOICES_PATH, variant);
    return Ok(html(StatusCode::OK, cached));
  }
  // Read before the query so a revalidation during rendering is noticed
  let generation = cache.generation(INVOICES_PATH).await;

  let params = params.into_inner();
  let list = use_case
    .execute(ListInvoicesQuery {
      query: params.query.unwrap_or_default(),
      // A page that is not a number is treated as the first one
      page: params.page.and_then(|p| p.trim().parse().ok()).unwrap_or(1),
    })
    .await?;

  let pagination = Pagination::build(&list.query, list.current_page, list.total_pages);

  let mut context = tera::Context::new();
  context.insert("title", "Invoices");
  context.insert("active", "invoices");
  context.insert("invoices", &list.invoices);
  context.insert("query", &list.query);
  context.insert("pagination", &pagination);

  let page = templates.render("pages/invoices.html.tera", &context)?;
  if let Some(generation) = generation {
    cache.put(INVOICES_PATH, &variant, generation, &page).await;
  }

  Ok(html(StatusCode::OK, page))
}

/// Render the empty create form
pub async fn create_invoice_page(
  form_use_case: web::Data<Arc<GetInvoiceFormUseCase>>,
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, ApiError> {
  let form = form_use_case.execute(None).await?;
  let page = render_invoice_form(
    &templates,
    FormMode::Create,
    &form.customers,
    &FieldValues::default(),
    &FormState::default(),
  )?;
  Ok(html(StatusCode::OK, page))
}

/// Handle create form submission
pub async fn create_invoice_submit(
  req: HttpRequest,
  body: web::Bytes,
  use_case: web::Data<Arc<CreateInvoiceUseCase>>,
  form_use_case: web::Data<Arc<GetInvoiceFormUseCase>>,
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, ApiError> {
  let form = parse_form(&body)?;
  let outcome = use_case.execute(&form).await;
  respond_to_form_action(&req, outcome, FormMode::Create, &form, &form_use_case, &templates).await
}

/// Render the edit form pre-filled with the stored invoice
pub async fn edit_invoice_page(
  path: web::Path<Uuid>,
  form_use_case: web::Data<Arc<GetInvoiceFormUseCase>>,
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, ApiError> {
  let id = path.into_inner();
  let form = form_use_case.execute(Some(id)).await?;
  let values = form.invoice.map(FieldValues::from).unwrap_or_default();

  let page = render_invoice_form(
    &templates,
    FormMode::Edit(id),
    &form.customers,
    &values,
    &FormState::default(),
  )?;
  Ok(html(StatusCode::OK, page))
}

/// Handle edit form submission
pub async fn update_invoice_submit(
  req: HttpRequest,
  path: web::Path<Uuid>,
  body: web::Bytes,
  use_case: web::Data<Arc<UpdateInvoiceUseCase>>,
  form_use_case: web::Data<Arc<GetInvoiceFormUseCase>>,
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, ApiError> {
  let id = path.into_inner();
  let form = parse_form(&body)?;
  let outcome = use_case.execute(id, &form).await;
  respond_to_form_action(&req, outcome, FormMode::Edit(id), &form, &form_use_case, &templates).await
}

/// Handle the delete button of a table row
pub async fn delete_invoice_submit(
  req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteInvoiceUseCase>>,
  templates: web::Data<TemplateEngine>,
) -> Result<HttpResponse, ApiError> {
  match use_case.execute(path.into_inner()).await {
    ActionOutcome::Revalidated if is_htmx(&req) => Ok(
      HttpResponse::Ok()
        .insert_header(("HX-Refresh", "true"))
        .finish(),
    ),
    ActionOutcome::Revalidated => Ok(see_other(&req, INVOICES_PATH)),
    ActionOutcome::Redirect(location) => Ok(see_other(&req, &location)),
    ActionOutcome::Failed(state) => {
      let mut context = tera::Context::new();
      context.insert("title", "Invoices");
      context.insert("message", &state.message);
      context.insert(
        "reference",
        &req.request_id().map(|id| id.to_string()),
      );

      let page = templates.render("partials/action_message.html.tera", &context)?;
      Ok(html(StatusCode::INTERNAL_SERVER_ERROR, page))
    }
  }
}

async fn respond_to_form_action(
  req: &HttpRequest,
  outcome: ActionOutcome,
  mode: FormMode,
  submitted: &FormData,
  form_use_case: &GetInvoiceFormUseCase,
  templates: &TemplateEngine,
) -> Result<HttpResponse, ApiError> {
  match outcome {
    ActionOutcome::Redirect(location) => Ok(see_other(req, &location)),
    ActionOutcome::Revalidated => Ok(see_other(req, INVOICES_PATH)),
    ActionOutcome::Failed(state) => {
      let customers = form_use_case.execute(None).await?.customers;
      let page = render_invoice_form(
        templates,
        mode,
        &customers,
        &FieldValues::from_form(submitted),
        &state,
      )?;
      Ok(html(StatusCode::UNPROCESSABLE_ENTITY, page))
    }
  }
}

#[derive(Debug, Clone, Copy)]
enum FormMode {
  Create,
  Edit(Uuid),
}

impl FormMode {
  fn title(&self) -> &'static str {
    match self {
      FormMode::Create => "Create Invoice",
      FormMode::Edit(_) => "Edit Invoice",
    }
  }

  fn action(&self) -> String {
    match self {
      FormMode::Create => INVOICES_PATH.to_string(),
      FormMode::Edit(id) => format!("{}/{}/edit", INVOICES_PATH, id),
    }
  }
}

/// What the form inputs show: stored values, or whatever was just submitted.
#[derive(Debug, Default, Serialize)]
struct FieldValues {
  customer_id: String,
  amount: String,
  status: String,
}

impl FieldValues {
  fn from_form(form: &FormData) -> Self {
    let field = |name: &str| form.get(name).unwrap_or_default().to_string();
    Self {
      customer_id: field(CUSTOMER_ID_FIELD),
      amount: field(AMOUNT_FIELD),
      status: field(STATUS_FIELD),
    }
  }
}

impl From<InvoiceFormValues> for FieldValues {
  fn from(values: InvoiceFormValues) -> Self {
    Self {
      customer_id: values.customer_id,
      amount: values.amount,
      status: values.status,
    }
  }
}

fn render_invoice_form(
  templates: &TemplateEngine,
  mode: FormMode,
  customers: &[CustomerField],
  values: &FieldValues,
  state: &FormState,
) -> Result<String, ApiError> {
  let mut context = tera::Context::new();
  context.insert("title", mode.title());
  context.insert("active", "invoices");
  context.insert("action", &mode.action());
  context.insert("editing", &matches!(mode, FormMode::Edit(_)));
  context.insert("customers", customers);
  context.insert("values", values);
  context.insert("state", state);

  Ok(templates.render("pages/invoice_form.html.tera", &context)?)
}

#[derive(Debug, PartialEq, Eq, Serialize)]
struct PageLink {
  /// `None` renders as an ellipsis
  number: Option<i64>,
  href: Option<String>,
  current: bool,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
struct Pagination {
  previous: Option<String>,
  next: Option<String>,
  pages: Vec<PageLink>,
}

impl Pagination {
  fn build(query: &str, current: i64, total: i64) -> Self {
    let pages = page_numbers(current, total)
      .into_iter()
      .map(|number| PageLink {
        number,
        href: number.map(|n| page_href(query, n)),
        current: number == Some(current),
      })
      .collect();

    Self {
      previous: (current > 1).then(|| page_href(query, current - 1)),
      next: (current < total).then(|| page_href(query, current + 1)),
      pages,
    }
  }
}

/// Page numbers to show, with `None` standing for a collapsed run.
fn page_numbers(current: i64, total: i64) -> Vec<Option<i64>> {
  if total <= 7 {
    return (1..=total).map(Some).collect();
  }

  if current <= 3 {
    return vec![Some(1), Some(2), Some(3), None, Some(total - 1), Some(total)];
  }

  if current >= total - 2 {
    return vec![Some(1), Some(2), None, Some(total - 2), Some(total - 1), Some(total)];
  }

  vec![
    Some(1),
    None,
    Some(current - 1),
    Some(current),
    Some(current + 1),
    None,
    Some(total),
  ]
}

fn page_href(query: &str, page: i64) -> String {
  let page = page.to_string();
  let mut params = Vec::with_capacity(2);
  if !query.is_empty() {
    params.push(("query", query));
  }
  params.push(("page", page.as_str()));

  match serde_urlencoded::to_string(&params) {
    Ok(encoded) => format!("{}?{}", INVOICES_PATH, encoded),
    Err(_) => INVOICES_PATH.to_string(),
  }
}
