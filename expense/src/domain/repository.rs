use crate::domain::models::*;
use async_trait::async_trait;
use chrono::NaiveDate;
#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    async fn all(&self) -> anyhow::Result<Vec<Expense>>;
    /// Stores the expense, reassigning its id if it would not sort after every existing id.
    async fn insert(&self, expense: Expense) -> anyhow::Result<Expense>;
    async fn remove(&self, id: &str) -> anyhow::Result<Option<Expense>>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait HolidayRepository: Send + Sync {
    async fn all(&self) -> anyhow::Result<Vec<Holiday>>;
    async fn insert(&self, holiday: Holiday) -> anyhow::Result<Holiday>;
    async fn remove(&self, id: &str) -> anyhow::Result<Option<Holiday>>;
}

/// Naming inputs for a stored receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptName {
    pub date: NaiveDate,
    pub amount: f64,
    pub timestamp_millis: i64,
    pub original_file_name: String,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReceiptStorage: Send + Sync {
    /// Writes the image and returns its path relative to the storage root.
    async fn save(&self, name: ReceiptName, data: Vec<u8>) -> anyhow::Result<String>;
    async fn read(&self, path: &str) -> anyhow::Result<Vec<u8>>;
    async fn remove(&self, path: &str) -> anyhow::Result<()>;
}
