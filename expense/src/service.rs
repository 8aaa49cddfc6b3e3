pub mod error;
pub mod expense;
pub mod export;
pub mod holiday;
