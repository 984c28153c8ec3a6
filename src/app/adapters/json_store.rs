//! JSON-file point store
//!
//! Persists the complete dataset (points, groups, id counters) as one
//! pretty-printed JSON document. The file is loaded lazily on first access
//! and rewritten after every mutation; clones share the same in-memory
//! state and file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use super::memory::Dataset;
use super::store::{GroupStore, PointStore};
use crate::app::models::{Group, GroupPatch, NewGroup, NewPoint, Point, PointPatch};
use crate::{Error, Result};

/// File-backed store handle
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
    dataset: Arc<Mutex<Option<Dataset>>>,
}

impl JsonStore {
    /// Open a store at the given path; the file is created on first write
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            dataset: Arc::new(Mutex::new(None)),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Dataset> {
        if !self.path.exists() {
            debug!("store file {} not found, starting empty", self.path.display());
            return Ok(Dataset::default());
        }

        let text = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::io(format!("failed to read store file {}", self.path.display()), e)
        })?;
        serde_json::from_str(&text).map_err(|e| {
            Error::store(format!(
                "store file {} is not readable: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn save(&self, dataset: &Dataset) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::io(
                        format!("failed to create store directory {}", parent.display()),
                        e,
                    )
                })?;
            }
        }

        let text = serde_json::to_string_pretty(dataset)
            .map_err(|e| Error::store(format!("failed to serialize store: {}", e)))?;
        std::fs::write(&self.path, text).map_err(|e| {
            Error::io(format!("failed to write store file {}", self.path.display()), e)
        })?;

        debug!(
            "saved {} points, {} groups to {}",
            dataset.points.len(),
            dataset.groups.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Run a read-only operation against the loaded dataset
    async fn read<T>(&self, op: impl FnOnce(&Dataset) -> T) -> Result<T> {
        let mut guard = self.dataset.lock().await;
        if guard.is_none() {
            *guard = Some(self.load()?);
        }
        Ok(op(guard.as_ref().unwrap()))
    }

    /// Run a mutation and persist the dataset if it succeeded
    async fn mutate<T>(&self, op: impl FnOnce(&mut Dataset) -> Result<T>) -> Result<T> {
        let mut guard = self.dataset.lock().await;
        if guard.is_none() {
            *guard = Some(self.load()?);
        }
        let dataset = guard.as_mut().unwrap();
        let value = op(dataset)?;
        self.save(dataset)?;
        Ok(value)
    }
}

impl PointStore for JsonStore {
    async fn list_page(&self, offset: usize, limit: usize) -> Result<Vec<Point>> {
        self.read(|dataset| dataset.list_page(offset, limit)).await
    }

    async fn insert_batch(&self, points: Vec<NewPoint>) -> Result<Vec<Point>> {
        self.mutate(|dataset| dataset.insert_batch(points)).await
    }

    async fn update(&self, id: &str, patch: PointPatch) -> Result<Point> {
        self.mutate(|dataset| dataset.update_point(id, &patch)).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.mutate(|dataset| dataset.delete_point(id)).await
    }
}

impl GroupStore for JsonStore {
    async fn list_groups(&self) -> Result<Vec<Group>> {
        self.read(|dataset| dataset.groups.clone()).await
    }

    async fn insert_group(&self, group: NewGroup) -> Result<Group> {
        self.mutate(|dataset| dataset.insert_group(group)).await
    }

    async fn update_group(&self, id: &str, patch: GroupPatch) -> Result<Group> {
        self.mutate(|dataset| dataset.update_group(id, &patch)).await
    }

    async fn delete_group(&self, id: &str) -> Result<()> {
        self.mutate(|dataset| dataset.delete_group(id)).await
    }
}
