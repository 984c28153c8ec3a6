//! Point store contracts
//!
//! The persistent store is an external collaborator; the core only depends
//! on these traits. `list_all` is a provided method that pages through
//! `list_page`, so callers always see the complete data set even when the
//! backing store caps a single read.

use crate::app::models::{Group, GroupPatch, NewGroup, NewPoint, Point, PointPatch};
use crate::Result;
use crate::constants::STORE_PAGE_SIZE;

/// CRUD contract for persisted points
#[allow(async_fn_in_trait)]
pub trait PointStore {
    /// Read one page of points in store order
    async fn list_page(&self, offset: usize, limit: usize) -> Result<Vec<Point>>;

    /// Insert a batch of points, returning the stored records
    async fn insert_batch(&self, points: Vec<NewPoint>) -> Result<Vec<Point>>;

    /// Apply a partial update to the point with the given id
    async fn update(&self, id: &str, patch: PointPatch) -> Result<Point>;

    /// Delete the point with the given id
    async fn delete(&self, id: &str) -> Result<()>;

    /// Read the complete point set, paging past any store-side row cap
    async fn list_all(&self) -> Result<Vec<Point>> {
        let mut all = Vec::new();
        let mut offset = 0;

        loop {
            let page = self.list_page(offset, STORE_PAGE_SIZE).await?;
            let fetched = page.len();
            all.extend(page);
            if fetched < STORE_PAGE_SIZE {
                break;
            }
            offset += fetched;
        }

        Ok(all)
    }
}

/// CRUD contract for groups
///
/// Groups are weakly referenced by points: `delete_group` must clear
/// `group_id` on referencing points and leave the points themselves intact.
#[allow(async_fn_in_trait)]
pub trait GroupStore {
    async fn list_groups(&self) -> Result<Vec<Group>>;

    async fn insert_group(&self, group: NewGroup) -> Result<Group>;

    async fn update_group(&self, id: &str, patch: GroupPatch) -> Result<Group>;

    async fn delete_group(&self, id: &str) -> Result<()>;
}
