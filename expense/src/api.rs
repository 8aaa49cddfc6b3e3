pub mod app;
pub mod error;
pub mod multipart;
pub mod routes;
