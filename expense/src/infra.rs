pub mod config;
pub mod receipts;
pub mod repository;
pub mod store;
