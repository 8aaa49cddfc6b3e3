use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub date: NaiveDate,
    pub day: String,
    pub amount: f64,
    pub place: String,
    pub receipt_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Numeric view of the id, used as the tie-break when two records share a date.
    pub fn sequence(&self) -> Option<u64> {
        self.id.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holiday {
    pub id: String,
    pub date: NaiveDate,
    pub name: String,
}

/// A receipt image received with the expense form.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Raw fields of the expense form, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseForm {
    pub date: String,
    pub amount: String,
    pub place: String,
    pub receipt: Option<Upload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HolidayForm {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub name: String,
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parses a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}
