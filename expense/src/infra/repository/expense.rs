use crate::domain::models::Expense;
use crate::domain::repository;
use crate::infra::repository::next_id;
use crate::infra::store::{DocumentBackend, JsonDocument};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ExpenseFile {
    pub expenses: Vec<Expense>,
}

pub struct JsonExpenseRepository {
    document: JsonDocument<ExpenseFile>,
}

impl JsonExpenseRepository {
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        JsonExpenseRepository {
            document: JsonDocument::new(backend),
        }
    }
}

#[async_trait]
impl repository::ExpenseRepository for JsonExpenseRepository {
    async fn all(&self) -> anyhow::Result<Vec<Expense>> {
        Ok(self.document.load().await?.expenses)
    }

    async fn insert(&self, mut expense: Expense) -> anyhow::Result<Expense> {
        let stored = self
            .document
            .update(move |file| {
                let timestamp = expense.id.parse().unwrap_or_default();
                expense.id = next_id(timestamp, file.expenses.iter().map(|e| e.id.as_str()));
                file.expenses.push(expense.clone());
                Some(expense)
            })
            .await?;

        stored.ok_or_else(|| anyhow::anyhow!("expense was not stored"))
    }

    async fn remove(&self, id: &str) -> anyhow::Result<Option<Expense>> {
        self.document
            .update(|file| {
                let index = file.expenses.iter().position(|e| e.id == id)?;
                Some(file.expenses.remove(index))
            })
            .await
    }
}
