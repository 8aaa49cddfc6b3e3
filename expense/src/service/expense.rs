use crate::domain::capping::{self, DAILY_CAP};
use crate::domain::clock::Clock;
use crate::domain::models::{is_weekend, parse_date, weekday_name, Expense, ExpenseForm};
use crate::domain::repository::{ExpenseRepository, ReceiptName, ReceiptStorage};
use crate::service::error::{AppError, AppResult};
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

pub struct ExpenseService {
    expenses: Arc<dyn ExpenseRepository>,
    receipts: Arc<dyn ReceiptStorage>,
    clock: Arc<dyn Clock>,
}

/// Validated expense fields.
#[derive(Debug, Clone, PartialEq)]
struct Checked {
    date: NaiveDate,
    amount: f64,
    place: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub today: NaiveDate,
    pub daily_cap: f64,
    pub today_total: f64,
    pub today_claimable: f64,
    pub remaining_today: f64,
    pub over_limit_today: f64,
    pub week_total: f64,
    pub month_total: f64,
    pub overall_total: f64,
    pub overall_claimable: f64,
}

impl ExpenseService {
    pub fn new(
        expenses: Arc<dyn ExpenseRepository>,
        receipts: Arc<dyn ReceiptStorage>,
        clock: Arc<dyn Clock>,
    ) -> ExpenseService {
        ExpenseService {
            expenses,
            receipts,
            clock,
        }
    }

    /// All expenses, newest date first and newest record first within a date.
    pub async fn list(&self) -> AppResult<Vec<Expense>> {
        let mut expenses = self.expenses.all().await?;
        expenses.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.sequence().cmp(&a.sequence()))
        });
        Ok(expenses)
    }

    pub async fn create(&self, form: ExpenseForm) -> AppResult<Expense> {
        let checked = self.check(&form)?;
        let now = self.clock.now();
        let amount = capping::cap_transaction(checked.amount);

        let receipt_path = match form.receipt {
            Some(upload) => Some(
                self.receipts
                    .save(
                        ReceiptName {
                            date: checked.date,
                            amount,
                            timestamp_millis: now.timestamp_millis(),
                            original_file_name: upload.file_name,
                        },
                        upload.data,
                    )
                    .await?,
            ),
            None => None,
        };

        let expense = Expense {
            id: now.timestamp_millis().to_string(),
            date: checked.date,
            day: weekday_name(checked.date).to_string(),
            amount,
            place: checked.place,
            receipt_path: receipt_path.clone(),
            created_at: now,
        };

        match self.expenses.insert(expense).await {
            Ok(stored) => {
                log::info!(id:? = stored.id, date:? = stored.date, amount = stored.amount; "Expense added");
                Ok(stored)
            }
            Err(err) => {
                if let Some(path) = receipt_path {
                    if let Err(cleanup) = self.receipts.remove(&path).await {
                        log::warn!(path:? = path, err:? = cleanup; "Failed to remove orphaned receipt");
                    }
                }
                Err(err.into())
            }
        }
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let removed = self
            .expenses
            .remove(id)
            .await?
            .ok_or_else(|| AppError::not_found("Expense not found"))?;

        if let Some(path) = &removed.receipt_path {
            if let Err(err) = self.receipts.remove(path).await {
                log::error!(path:? = path, err:? = err; "Failed to delete receipt file");
            }
        }

        log::info!(id:? = removed.id; "Expense deleted");
        Ok(())
    }

    pub async fn summary(&self) -> AppResult<Summary> {
        let expenses = self.expenses.all().await?;
        let today = self.clock.today();
        let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
        let month_start = today.with_day(1).unwrap_or(today);

        let total_between = |from: NaiveDate| {
            capping::daily_total(
                expenses
                    .iter()
                    .filter(|e| e.date >= from && e.date <= today)
                    .map(|e| e.amount),
            )
        };

        let today_total = total_between(today);

        let mut by_day: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
        for expense in &expenses {
            by_day.entry(expense.date).or_default().push(expense.amount);
        }
        let overall_claimable = by_day
            .into_values()
            .fold(0.0, |total, amounts| {
                capping::accumulate(total, capping::claimable_daily(amounts))
            });

        Ok(Summary {
            today,
            daily_cap: DAILY_CAP,
            today_total,
            today_claimable: capping::claimable(today_total),
            remaining_today: capping::round_cents((DAILY_CAP - today_total).max(0.0)),
            over_limit_today: capping::round_cents((today_total - DAILY_CAP).max(0.0)),
            week_total: total_between(monday),
            month_total: total_between(month_start),
            overall_total: capping::daily_total(expenses.iter().map(|e| e.amount)),
            overall_claimable,
        })
    }

    fn check(&self, form: &ExpenseForm) -> AppResult<Checked> {
        let place = form.place.trim();
        if place.is_empty() {
            return Err(AppError::validation("Place/Restaurant is required"));
        }

        let date = parse_date(&form.date)
            .ok_or_else(|| AppError::validation("Invalid date: expected YYYY-MM-DD"))?;
        if is_weekend(date) {
            return Err(AppError::validation(
                "Invalid date: meal expenses can only be claimed for Monday-Friday",
            ));
        }
        if date > self.clock.today() {
            return Err(AppError::validation(
                "Invalid date: cannot add expenses for future dates",
            ));
        }

        let amount = form
            .amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite())
            .ok_or_else(|| AppError::validation("Invalid amount: must be a number"))?;
        if amount <= 0.0 {
            return Err(AppError::validation("Invalid amount: must be greater than 0"));
        }

        Ok(Checked {
            date,
            amount,
            place: place.to_string(),
        })
    }
}
