use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Utc};

pub trait Clock: Send + Sync {
    /// Calendar date in server local time.
    fn today(&self) -> NaiveDate;
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single local date and time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    at: NaiveDateTime,
}

impl FixedClock {
    pub fn new(at: NaiveDateTime) -> Self {
        FixedClock { at }
    }

    pub fn on(date: NaiveDate) -> Self {
        FixedClock {
            at: date.and_time(NaiveTime::default()),
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.at.date()
    }

    fn now(&self) -> DateTime<Utc> {
        self.at.and_utc()
    }
}
