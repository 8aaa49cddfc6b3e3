use crate::domain::repository::{ReceiptName, ReceiptStorage};
use anyhow::{bail, Context};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

pub const RECEIPTS_DIR: &str = "receipts";
const MAX_NAME_ATTEMPTS: i64 = 1000;

/// Receipt images on local disk, grouped by the expense's year and month.
pub struct DiskReceiptStorage {
    root: PathBuf,
    currency_label: String,
}

impl DiskReceiptStorage {
    pub fn new(root: impl Into<PathBuf>, currency_label: impl Into<String>) -> Self {
        DiskReceiptStorage {
            root: root.into(),
            currency_label: currency_label.into(),
        }
    }

    pub fn receipts_dir(&self) -> PathBuf {
        self.root.join(RECEIPTS_DIR)
    }

    fn resolve(&self, relative: &str) -> anyhow::Result<PathBuf> {
        let path = Path::new(relative);
        if !path.components().all(|c| matches!(c, Component::Normal(_))) {
            bail!("receipt path {relative:?} escapes the storage root");
        }
        Ok(self.root.join(path))
    }
}

/// `2024-01-08_RM50.00_1704700000000.jpg`
pub fn receipt_file_name(name: &ReceiptName, currency_label: &str) -> String {
    format!(
        "{}_{}{:.2}_{}{}",
        name.date.format("%Y-%m-%d"),
        currency_label,
        name.amount,
        name.timestamp_millis,
        extension(&name.original_file_name)
    )
}

fn extension(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}

#[async_trait]
impl ReceiptStorage for DiskReceiptStorage {
    async fn save(&self, name: ReceiptName, data: Vec<u8>) -> anyhow::Result<String> {
        let month = name.date.format("%Y-%m").to_string();
        let dir = self.receipts_dir().join(&month);
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("create {}", dir.display()))?;

        // Never replace an existing receipt: bump the stamp until the name is free.
        let mut name = name;
        for _ in 0..MAX_NAME_ATTEMPTS {
            let file_name = receipt_file_name(&name, &self.currency_label);
            let path = dir.join(&file_name);
            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path).await {
                Ok(file) => file,
                Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                    name.timestamp_millis += 1;
                    continue;
                }
                Err(err) => return Err(err).with_context(|| format!("create {}", path.display())),
            };

            let written = async {
                file.write_all(&data).await?;
                file.flush().await
            }
            .await;
            if let Err(err) = written {
                drop(file);
                let _ = tokio::fs::remove_file(&path).await;
                return Err(err).with_context(|| format!("write {}", path.display()));
            }

            log::info!(path:? = path; "Receipt stored");
            return Ok(format!("{RECEIPTS_DIR}/{month}/{file_name}"));
        }

        bail!("no free receipt name in {}", dir.display())
    }

    async fn read(&self, path: &str) -> anyhow::Result<Vec<u8>> {
        let full = self.resolve(path)?;
        tokio::fs::read(&full)
            .await
            .with_context(|| format!("read {}", full.display()))
    }

    async fn remove(&self, path: &str) -> anyhow::Result<()> {
        let full = self.resolve(path)?;
        tokio::fs::remove_file(&full)
            .await
            .with_context(|| format!("remove {}", full.display()))
    }
}
