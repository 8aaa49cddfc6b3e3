use crate::api::app::ApiSettings;
use crate::api::error::{ApiError, OrFail};
use crate::api::multipart::read_expense_form;
use crate::domain::models::{Expense, Holiday, HolidayForm};
use crate::service::expense::ExpenseService;
use crate::service::export::ExportService;
use crate::service::holiday::HolidayService;
use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{delete, get, post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug)]
pub struct ExpensesResponse {
    pub expenses: Vec<Expense>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ExpenseCreated {
    pub success: bool,
    pub expense: Expense,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct HolidaysResponse {
    pub holidays: Vec<Holiday>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct HolidayCreated {
    pub success: bool,
    pub holiday: Holiday,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct Deleted {
    pub success: bool,
}

#[get("/api/expenses")]
async fn list_expenses(app: web::Data<ExpenseService>) -> Result<impl Responder, ApiError> {
    let expenses = app.list().await.or_fail("Failed to read expenses")?;
    Ok(HttpResponse::Ok().json(&ExpensesResponse { expenses }))
}

#[post("/api/expenses")]
async fn create_expense(
    payload: Multipart,
    app: web::Data<ExpenseService>,
    settings: web::Data<ApiSettings>,
) -> Result<impl Responder, ApiError> {
    let form = read_expense_form(payload, settings.max_receipt_bytes).await?;
    let expense = app.create(form).await.or_fail("Failed to add expense")?;

    Ok(HttpResponse::Ok().json(&ExpenseCreated {
        success: true,
        expense,
    }))
}

#[delete("/api/expenses/{id}")]
async fn delete_expense(
    path: web::Path<String>,
    app: web::Data<ExpenseService>,
) -> Result<impl Responder, ApiError> {
    app.delete(&path.into_inner())
        .await
        .or_fail("Failed to delete expense")?;
    Ok(HttpResponse::Ok().json(&Deleted { success: true }))
}

#[get("/api/summary")]
async fn summary(app: web::Data<ExpenseService>) -> Result<impl Responder, ApiError> {
    let summary = app.summary().await.or_fail("Failed to read expenses")?;
    Ok(HttpResponse::Ok().json(&summary))
}

#[get("/api/holidays")]
async fn list_holidays(app: web::Data<HolidayService>) -> Result<impl Responder, ApiError> {
    let holidays = app.list().await.or_fail("Failed to read holidays")?;
    Ok(HttpResponse::Ok().json(&HolidaysResponse { holidays }))
}

#[post("/api/holidays")]
async fn create_holiday(
    req_body: String,
    app: web::Data<HolidayService>,
) -> Result<impl Responder, ApiError> {
    let body = serde_json::from_str::<HolidayForm>(req_body.as_str())
        .map_err(|err| ApiError::bad_request(format!("Invalid request body: {err}")))?;
    let holiday = app.create(body).await.or_fail("Failed to add holiday")?;

    Ok(HttpResponse::Ok().json(&HolidayCreated {
        success: true,
        holiday,
    }))
}

#[delete("/api/holidays/{id}")]
async fn delete_holiday(
    path: web::Path<String>,
    app: web::Data<HolidayService>,
) -> Result<impl Responder, ApiError> {
    app.delete(&path.into_inner())
        .await
        .or_fail("Failed to delete holiday")?;
    Ok(HttpResponse::Ok().json(&Deleted { success: true }))
}

#[get("/api/export")]
async fn export(app: web::Data<ExportService>) -> Result<impl Responder, ApiError> {
    let bundle = app.export().await.or_fail("Failed to export")?;

    Ok(HttpResponse::Ok()
        .content_type("application/zip")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", bundle.file_name),
        ))
        .body(bundle.bytes))
}
