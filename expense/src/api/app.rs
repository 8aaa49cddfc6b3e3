use crate::api::routes::{
    create_expense, create_holiday, delete_expense, delete_holiday, export, list_expenses,
    list_holidays, summary,
};
use crate::domain::clock::Clock;
use crate::domain::repository::{ExpenseRepository, HolidayRepository, ReceiptStorage};
use crate::service::expense::ExpenseService;
use crate::service::export::ExportService;
use crate::service::holiday::HolidayService;
use actix_files::Files;
use actix_web::web;
use actix_web::web::ServiceConfig;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared stores. Built once and cloned into every worker so all of them go
/// through the same document locks.
#[derive(Clone)]
pub struct Dependencies {
    pub expenses: Arc<dyn ExpenseRepository>,
    pub holidays: Arc<dyn HolidayRepository>,
    pub receipts: Arc<dyn ReceiptStorage>,
    pub clock: Arc<dyn Clock>,
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub currency_label: String,
    pub max_receipt_bytes: usize,
}

pub fn create_app(deps: Dependencies, settings: ApiSettings) -> Box<dyn Fn(&mut ServiceConfig)> {
    Box::new(move |cfg: &mut ServiceConfig| {
        let expense_service = web::Data::new(ExpenseService::new(
            Arc::clone(&deps.expenses),
            Arc::clone(&deps.receipts),
            Arc::clone(&deps.clock),
        ));
        let holiday_service = web::Data::new(HolidayService::new(
            Arc::clone(&deps.holidays),
            Arc::clone(&deps.clock),
        ));
        let export_service = web::Data::new(ExportService::new(
            Arc::clone(&deps.expenses),
            Arc::clone(&deps.receipts),
            Arc::clone(&deps.clock),
            settings.currency_label.clone(),
        ));

        cfg.app_data(expense_service)
            .app_data(holiday_service)
            .app_data(export_service)
            .app_data(web::Data::new(settings.clone()))
            .service(list_expenses)
            .service(create_expense)
            .service(delete_expense)
            .service(summary)
            .service(list_holidays)
            .service(create_holiday)
            .service(delete_holiday)
            .service(export);
    })
}

/// Uploaded receipts and the front-end bundle. Register after `create_app`,
/// the public mount catches every remaining path.
pub fn static_files(receipts_dir: PathBuf, public_dir: PathBuf) -> Box<dyn Fn(&mut ServiceConfig)> {
    Box::new(move |cfg: &mut ServiceConfig| {
        cfg.service(Files::new("/receipts", &receipts_dir));
        if public_dir.is_dir() {
            cfg.service(Files::new("/", &public_dir).index_file("index.html"));
        } else {
            log::warn!(dir:? = public_dir; "Public directory missing, front-end not served");
        }
    })
}
