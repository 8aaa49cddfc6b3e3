//! Whole-document JSON persistence.
//!
//! Every mutation loads the full document, changes it in memory and writes it
//! back in one piece. Within a process the cycle runs under a mutex; separate
//! processes sharing a file still race and the last writer wins.

use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Returns `None` when nothing has been written yet.
    async fn read(&self) -> anyhow::Result<Option<String>>;
    async fn write(&self, contents: String) -> anyhow::Result<()>;
}

pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileBackend { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DocumentBackend for FileBackend {
    async fn read(&self) -> anyhow::Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("read {}", self.path.display())),
        }
    }

    async fn write(&self, contents: String) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("create {}", parent.display()))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, contents)
            .await
            .with_context(|| format!("write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("replace {}", self.path.display()))
    }
}

#[derive(Default)]
pub struct MemoryBackend {
    contents: std::sync::Mutex<Option<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        MemoryBackend {
            contents: std::sync::Mutex::new(Some(contents.into())),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl DocumentBackend for MemoryBackend {
    async fn read(&self) -> anyhow::Result<Option<String>> {
        Ok(self.contents())
    }

    async fn write(&self, contents: String) -> anyhow::Result<()> {
        *self
            .contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(contents);
        Ok(())
    }
}

pub struct JsonDocument<T> {
    backend: Arc<dyn DocumentBackend>,
    lock: Mutex<()>,
    _document: PhantomData<fn() -> T>,
}

impl<T> JsonDocument<T>
where
    T: Serialize + DeserializeOwned + Default + Send,
{
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        JsonDocument {
            backend,
            lock: Mutex::new(()),
            _document: PhantomData,
        }
    }

    pub async fn load(&self) -> anyhow::Result<T> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    /// Applies `change` to the stored document. The document is written back
    /// only when `change` returns `Some`.
    pub async fn update<R, F>(&self, change: F) -> anyhow::Result<Option<R>>
    where
        F: FnOnce(&mut T) -> Option<R> + Send,
        R: Send,
    {
        let _guard = self.lock.lock().await;
        let mut document = self.read().await?;
        let outcome = change(&mut document);
        if outcome.is_some() {
            let contents = serde_json::to_string_pretty(&document)?;
            self.backend.write(contents).await?;
        }
        Ok(outcome)
    }

    async fn read(&self) -> anyhow::Result<T> {
        match self.backend.read().await? {
            Some(contents) if !contents.trim().is_empty() => {
                serde_json::from_str(&contents).context("parse stored document")
            }
            _ => Ok(T::default()),
        }
    }
}
