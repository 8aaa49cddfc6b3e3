pub mod capping;
pub mod clock;
pub mod models;
pub mod repository;
