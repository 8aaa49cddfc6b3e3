use actix_cors::Cors;
use actix_web::middleware::{Condition, Logger};
use actix_web::{App, HttpServer};
use env_logger::Env;
use expense::api::app::{create_app, static_files, ApiSettings, Dependencies};
use expense::domain::clock::SystemClock;
use expense::infra::config::Config;
use expense::infra::receipts::DiskReceiptStorage;
use expense::infra::repository::expense::JsonExpenseRepository;
use expense::infra::repository::holiday::JsonHolidayRepository;
use expense::infra::store::FileBackend;
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, format!("{err:#}")))?;

    let storage = DiskReceiptStorage::new(config.storage_root.clone(), config.currency_label.clone());
    let receipts_dir = storage.receipts_dir();
    std::fs::create_dir_all(&config.data_dir)?;
    std::fs::create_dir_all(&receipts_dir)?;

    let deps = Dependencies {
        expenses: Arc::new(JsonExpenseRepository::new(Arc::new(FileBackend::new(
            config.expenses_file(),
        )))),
        holidays: Arc::new(JsonHolidayRepository::new(Arc::new(FileBackend::new(
            config.holidays_file(),
        )))),
        receipts: Arc::new(storage),
        clock: Arc::new(SystemClock),
    };
    let settings = ApiSettings {
        currency_label: config.currency_label.clone(),
        max_receipt_bytes: config.max_receipt_bytes,
    };
    let public_dir = config.public_dir.clone();
    let cors_origin = config.cors_origin.clone();

    log::info!(host:? = config.host, port = config.port, data_dir:? = config.data_dir; "Start server");

    HttpServer::new(move || {
        let cors = match &cors_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allowed_methods(vec!["GET", "POST", "DELETE"])
                .allowed_headers(vec![
                    actix_web::http::header::CONTENT_TYPE,
                    actix_web::http::header::ACCEPT,
                ])
                .max_age(3600),
            None => Cors::default(),
        };

        App::new()
            .configure(create_app(deps.clone(), settings.clone()))
            .configure(static_files(receipts_dir.clone(), public_dir.clone()))
            .wrap(Condition::new(cors_origin.is_some(), cors))
            .wrap(Logger::default())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
