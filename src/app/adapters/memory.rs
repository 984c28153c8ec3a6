//! In-memory point store
//!
//! Backs unit and integration tests, and serves as the mutation core shared
//! with the JSON-file adapter. Ids are minted sequentially (`pt-N`,
//! `grp-N`); insert order is the store order.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use super::store::{GroupStore, PointStore};
use crate::app::models::{Group, GroupPatch, NewGroup, NewPoint, Point, PointPatch};
use crate::{Error, Result};

/// The full mutable dataset behind a store
#[derive(Debug, Default, Clone, serde::Serialize, serde::Deserialize)]
pub struct Dataset {
    pub points: Vec<Point>,
    pub groups: Vec<Group>,
    next_point_id: u64,
    next_group_id: u64,
}

impl Dataset {
    pub fn list_page(&self, offset: usize, limit: usize) -> Vec<Point> {
        self.points.iter().skip(offset).take(limit).cloned().collect()
    }

    pub fn insert_batch(&mut self, batch: Vec<NewPoint>) -> Result<Vec<Point>> {
        // Reject the whole batch up front on id conflicts so a failed
        // insert leaves the dataset untouched
        for new_point in &batch {
            if let Some(id) = &new_point.id {
                if self.points.iter().any(|p| &p.id == id) {
                    return Err(Error::store(format!(
                        "duplicate point id '{}'",
                        id
                    )));
                }
            }
        }

        let created_at = Utc::now();
        let mut inserted = Vec::with_capacity(batch.len());
        for new_point in batch {
            self.next_point_id += 1;
            let fallback_id = format!("pt-{}", self.next_point_id);
            let point = new_point.into_point(fallback_id, created_at);
            inserted.push(point.clone());
            self.points.push(point);
        }

        Ok(inserted)
    }

    pub fn update_point(&mut self, id: &str, patch: &PointPatch) -> Result<Point> {
        let point = self
            .points
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::not_found(id))?;
        patch.apply(point);
        Ok(point.clone())
    }

    pub fn delete_point(&mut self, id: &str) -> Result<()> {
        let index = self
            .points
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| Error::not_found(id))?;
        self.points.remove(index);
        Ok(())
    }

    pub fn insert_group(&mut self, group: NewGroup) -> Result<Group> {
        group.validate()?;
        self.next_group_id += 1;
        let id = format!("grp-{}", self.next_group_id);
        let group = group.into_group(id, Utc::now());
        self.groups.push(group.clone());
        Ok(group)
    }

    pub fn update_group(&mut self, id: &str, patch: &GroupPatch) -> Result<Group> {
        let group = self
            .groups
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| Error::not_found(id))?;
        patch.apply(group);
        Ok(group.clone())
    }

    /// Delete a group, clearing the weak reference on its points
    pub fn delete_group(&mut self, id: &str) -> Result<()> {
        let index = self
            .groups
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| Error::not_found(id))?;
        self.groups.remove(index);

        for point in &mut self.points {
            if point.group_id.as_deref() == Some(id) {
                point.group_id = None;
            }
        }

        Ok(())
    }
}

/// In-memory store handle; clones share the same dataset
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    dataset: Arc<Mutex<Dataset>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current number of stored points (test helper)
    pub async fn point_count(&self) -> usize {
        self.dataset.lock().await.points.len()
    }
}

impl PointStore for MemoryStore {
    async fn list_page(&self, offset: usize, limit: usize) -> Result<Vec<Point>> {
        Ok(self.dataset.lock().await.list_page(offset, limit))
    }

    async fn insert_batch(&self, points: Vec<NewPoint>) -> Result<Vec<Point>> {
        self.dataset.lock().await.insert_batch(points)
    }

    async fn update(&self, id: &str, patch: PointPatch) -> Result<Point> {
        self.dataset.lock().await.update_point(id, &patch)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.dataset.lock().await.delete_point(id)
    }
}

impl GroupStore for MemoryStore {
    async fn list_groups(&self) -> Result<Vec<Group>> {
        Ok(self.dataset.lock().await.groups.clone())
    }

    async fn insert_group(&self, group: NewGroup) -> Result<Group> {
        self.dataset.lock().await.insert_group(group)
    }

    async fn update_group(&self, id: &str, patch: GroupPatch) -> Result<Group> {
        self.dataset.lock().await.update_group(id, &patch)
    }

    async fn delete_group(&self, id: &str) -> Result<()> {
        self.dataset.lock().await.delete_group(id)
    }
}
