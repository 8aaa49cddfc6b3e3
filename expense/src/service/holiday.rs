use crate::domain::clock::Clock;
use crate::domain::models::{parse_date, Holiday, HolidayForm};
use crate::domain::repository::HolidayRepository;
use crate::service::error::{AppError, AppResult};
use std::sync::Arc;

/// Public holidays. Kept for reference only, expenses are not checked against them.
pub struct HolidayService {
    holidays: Arc<dyn HolidayRepository>,
    clock: Arc<dyn Clock>,
}

impl HolidayService {
    pub fn new(holidays: Arc<dyn HolidayRepository>, clock: Arc<dyn Clock>) -> HolidayService {
        HolidayService { holidays, clock }
    }

    pub async fn list(&self) -> AppResult<Vec<Holiday>> {
        let mut holidays = self.holidays.all().await?;
        holidays.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(holidays)
    }

    pub async fn create(&self, form: HolidayForm) -> AppResult<Holiday> {
        let name = form.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Holiday name is required"));
        }
        let date = parse_date(&form.date)
            .ok_or_else(|| AppError::validation("Invalid date: expected YYYY-MM-DD"))?;

        let holiday = self
            .holidays
            .insert(Holiday {
                id: self.clock.now().timestamp_millis().to_string(),
                date,
                name: name.to_string(),
            })
            .await?;

        log::info!(id:? = holiday.id, date:? = holiday.date; "Holiday added");
        Ok(holiday)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.holidays
            .remove(id)
            .await?
            .ok_or_else(|| AppError::not_found("Holiday not found"))?;

        log::info!(id:? = id; "Holiday deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::domain::repository::MockHolidayRepository;
    use anyhow::Result;
    use chrono::NaiveDate;
    use mockall::predicate::eq;

    fn service(repo: MockHolidayRepository) -> HolidayService {
        HolidayService::new(
            Arc::new(repo),
            Arc::new(FixedClock::on(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap())),
        )
    }

    fn form(date: &str, name: &str) -> HolidayForm {
        HolidayForm {
            date: date.to_string(),
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_trims_name() -> Result<()> {
        let mut repo = MockHolidayRepository::new();
        repo.expect_insert()
            .withf(|h| h.name == "Labour Day")
            .times(1)
            .returning(|h| Ok(h));

        // Weekend and future dates are fine for holidays.
        let holiday = service(repo).create(form("2024-05-01", " Labour Day ")).await?;
        assert_eq!(holiday.date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_validation() {
        for (input, message) in [
            (form("2024-05-01", "  "), "Holiday name is required"),
            (form("May 1", "Labour Day"), "Invalid date: expected YYYY-MM-DD"),
        ] {
            let mut repo = MockHolidayRepository::new();
            repo.expect_insert().never();
            let err = service(repo).create(input).await.unwrap_err();
            assert_eq!(err.to_string(), message);
        }
    }

    #[tokio::test]
    async fn test_list_sorted_by_date() -> Result<()> {
        let mut repo = MockHolidayRepository::new();
        repo.expect_all().returning(|| {
            Ok(vec![
                Holiday {
                    id: "1".to_string(),
                    date: NaiveDate::from_ymd_opt(2024, 12, 25).unwrap(),
                    name: "Christmas".to_string(),
                },
                Holiday {
                    id: "2".to_string(),
                    date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                    name: "Labour Day".to_string(),
                },
            ])
        });

        let names: Vec<String> = service(repo).list().await?.into_iter().map(|h| h.name).collect();
        assert_eq!(names, vec!["Labour Day", "Christmas"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing() {
        let mut repo = MockHolidayRepository::new();
        repo.expect_remove()
            .with(eq("7"))
            .returning(|_| Ok(None));

        let err = service(repo).delete("7").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
