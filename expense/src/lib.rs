pub mod api;
pub mod domain;
pub mod export;
pub mod infra;
pub mod service;
