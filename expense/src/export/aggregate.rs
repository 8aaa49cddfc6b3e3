use crate::domain::capping;
use crate::domain::models::Expense;
use chrono::NaiveDate;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub enum ExportRow {
    Expense {
        date: NaiveDate,
        day: String,
        amount: f64,
        place: String,
        receipt_path: Option<String>,
    },
    DailyTotal {
        date: NaiveDate,
        total: f64,
        claimable: f64,
    },
    GrandTotal {
        claimable: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExportReport {
    pub rows: Vec<ExportRow>,
    pub total_claimable: f64,
    /// Distinct receipt paths, in export order.
    pub receipts: Vec<String>,
}

/// Oldest date first; within a date, lowest id first.
pub fn sort_for_export(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.sequence().cmp(&b.sequence()))
            .then_with(|| a.id.cmp(&b.id))
    });
}

pub fn aggregate(mut expenses: Vec<Expense>) -> ExportReport {
    sort_for_export(&mut expenses);

    let mut report = ExportReport::default();
    let mut seen = HashSet::new();

    for run in expenses.chunk_by(|a, b| a.date == b.date) {
        let date = run[0].date;
        let mut total = 0.0;

        for expense in run {
            total = capping::accumulate(total, expense.amount);

            if let Some(path) = &expense.receipt_path {
                if seen.insert(path.clone()) {
                    report.receipts.push(path.clone());
                }
            }

            report.rows.push(ExportRow::Expense {
                date,
                day: expense.day.clone(),
                amount: expense.amount,
                place: expense.place.clone(),
                receipt_path: expense.receipt_path.clone(),
            });
        }

        let claimable = capping::claimable(total);
        report.total_claimable = capping::accumulate(report.total_claimable, claimable);
        report.rows.push(ExportRow::DailyTotal {
            date,
            total,
            claimable,
        });
    }

    if !expenses.is_empty() {
        report.rows.push(ExportRow::GrandTotal {
            claimable: report.total_claimable,
        });
    }

    report
}
