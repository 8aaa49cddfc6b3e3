use crate::domain::clock::Clock;
use crate::domain::repository::{ExpenseRepository, ReceiptStorage};
use crate::export::{aggregate, layout, package, render_xlsx};
use crate::service::error::AppResult;
use anyhow::Context;
use std::sync::Arc;

/// A finished export archive.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportBundle {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub struct ExportService {
    expenses: Arc<dyn ExpenseRepository>,
    receipts: Arc<dyn ReceiptStorage>,
    clock: Arc<dyn Clock>,
    currency_label: String,
}

impl ExportService {
    pub fn new(
        expenses: Arc<dyn ExpenseRepository>,
        receipts: Arc<dyn ReceiptStorage>,
        clock: Arc<dyn Clock>,
        currency_label: impl Into<String>,
    ) -> ExportService {
        ExportService {
            expenses,
            receipts,
            clock,
            currency_label: currency_label.into(),
        }
    }

    fn base_name(&self) -> String {
        format!("meal-expenses-{}", self.clock.today().format("%Y-%m-%d"))
    }

    pub async fn export(&self) -> AppResult<ExportBundle> {
        let expenses = self.expenses.all().await?;
        let count = expenses.len();
        let report = aggregate(expenses);

        let spreadsheet = render_xlsx(&layout(&report, &self.currency_label))
            .context("render spreadsheet")?;

        let base_name = self.base_name();
        let bytes = package(
            &format!("{base_name}.xlsx"),
            &spreadsheet,
            &report.receipts,
            self.receipts.as_ref(),
        )
        .await?;

        log::info!(expenses = count, receipts = report.receipts.len(), total = report.total_claimable; "Export built");

        Ok(ExportBundle {
            file_name: format!("{base_name}.zip"),
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::domain::models::{parse_date, Expense};
    use crate::domain::repository::{MockExpenseRepository, MockReceiptStorage};
    use chrono::{DateTime, NaiveDate};
    use std::io::Cursor;
    use zip::ZipArchive;

    #[tokio::test]
    async fn test_export_bundle() {
        let mut repo = MockExpenseRepository::new();
        repo.expect_all().returning(|| {
            Ok(vec![Expense {
                id: "1704700000000".to_string(),
                date: parse_date("2024-01-08").unwrap(),
                day: "Monday".to_string(),
                amount: 12.0,
                place: "Canteen".to_string(),
                receipt_path: Some("receipts/2024-01/r_1704700000000.jpg".to_string()),
                created_at: DateTime::from_timestamp_millis(1704700000000).unwrap(),
            }])
        });
        let mut receipts = MockReceiptStorage::new();
        receipts
            .expect_read()
            .times(1)
            .returning(|_| Ok(vec![0xFF, 0xD8]));

        let service = ExportService::new(
            Arc::new(repo),
            Arc::new(receipts),
            Arc::new(FixedClock::on(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap())),
            "RM",
        );
        let bundle = service.export().await.unwrap();

        assert_eq!(bundle.file_name, "meal-expenses-2024-01-10.zip");
        let archive = ZipArchive::new(Cursor::new(bundle.bytes)).unwrap();
        let mut names: Vec<&str> = archive.file_names().collect();
        names.sort();
        assert_eq!(
            names,
            vec!["meal-expenses-2024-01-10.xlsx", "receipts/r_1704700000000.jpg"]
        );
    }

    #[tokio::test]
    async fn test_store_failure_is_internal() {
        let mut repo = MockExpenseRepository::new();
        repo.expect_all()
            .returning(|| Err(anyhow::anyhow!("permission denied")));

        let service = ExportService::new(
            Arc::new(repo),
            Arc::new(MockReceiptStorage::new()),
            Arc::new(FixedClock::on(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap())),
            "RM",
        );
        assert!(matches!(
            service.export().await,
            Err(crate::service::error::AppError::Internal(_))
        ));
    }
}
