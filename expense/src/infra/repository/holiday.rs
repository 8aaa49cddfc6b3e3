use crate::domain::models::Holiday;
use crate::domain::repository;
use crate::infra::repository::next_id;
use crate::infra::store::{DocumentBackend, JsonDocument};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct HolidayFile {
    pub holidays: Vec<Holiday>,
}

pub struct JsonHolidayRepository {
    document: JsonDocument<HolidayFile>,
}

impl JsonHolidayRepository {
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        JsonHolidayRepository {
            document: JsonDocument::new(backend),
        }
    }
}

#[async_trait]
impl repository::HolidayRepository for JsonHolidayRepository {
    async fn all(&self) -> anyhow::Result<Vec<Holiday>> {
        Ok(self.document.load().await?.holidays)
    }

    async fn insert(&self, mut holiday: Holiday) -> anyhow::Result<Holiday> {
        let stored = self
            .document
            .update(move |file| {
                let timestamp = holiday.id.parse().unwrap_or_default();
                holiday.id = next_id(timestamp, file.holidays.iter().map(|h| h.id.as_str()));
                file.holidays.push(holiday.clone());
                Some(holiday)
            })
            .await?;

        stored.ok_or_else(|| anyhow::anyhow!("holiday was not stored"))
    }

    async fn remove(&self, id: &str) -> anyhow::Result<Option<Holiday>> {
        self.document
            .update(|file| {
                let index = file.holidays.iter().position(|h| h.id == id)?;
                Some(file.holidays.remove(index))
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::HolidayRepository;
    use crate::infra::store::MemoryBackend;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_insert_and_remove() {
        let backend = Arc::new(MemoryBackend::new());
        let repo = JsonHolidayRepository::new(backend.clone());

        let holiday = repo
            .insert(Holiday {
                id: "1700000000000".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
                name: "Lunar New Year".to_string(),
            })
            .await
            .unwrap();

        assert!(backend.contents().unwrap().contains("\"holidays\""));
        assert_eq!(repo.all().await.unwrap(), vec![holiday.clone()]);
        assert_eq!(repo.remove(&holiday.id).await.unwrap(), Some(holiday));
        assert_eq!(repo.remove("1700000000000").await.unwrap(), None);
    }
}
