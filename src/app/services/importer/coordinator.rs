//! Batch import coordination
//!
//! Splits a validated point collection into consecutive chunks and submits
//! one insert call per chunk, awaiting each before issuing the next. A
//! chunk failure aborts the import; chunks already committed stay committed
//! (partial success is a documented property of the contract).

use tracing::{debug, info};

use super::progress::ImportProgress;
use crate::app::adapters::store::PointStore;
use crate::app::models::NewPoint;
use crate::constants::DEFAULT_CHUNK_SIZE;
use crate::{Error, Result};

/// Coordinator for chunked point imports
#[derive(Debug)]
pub struct BatchImporter<S> {
    store: S,
    chunk_size: usize,
}

impl<S: PointStore> BatchImporter<S> {
    /// Create an importer with the default chunk size
    pub fn new(store: S) -> Self {
        Self {
            store,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Override the chunk size; zero is clamped to one
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Configured chunk size
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Import the point collection, invoking `on_progress` after every
    /// committed chunk
    ///
    /// Returns the total number of points committed. On a chunk failure the
    /// returned error carries the 1-based chunk index, the count committed
    /// before the failure and the underlying store message; no rollback is
    /// attempted and no further chunks are issued.
    pub async fn run<F>(&self, points: Vec<NewPoint>, mut on_progress: F) -> Result<usize>
    where
        F: FnMut(ImportProgress),
    {
        let total = points.len();
        if total == 0 {
            debug!("import called with no points");
            return Ok(0);
        }

        let mut committed = 0usize;
        for (index, chunk) in points.chunks(self.chunk_size).enumerate() {
            let chunk_len = chunk.len();
            self.store
                .insert_batch(chunk.to_vec())
                .await
                .map_err(|e| Error::batch_import(index + 1, committed, store_message(e)))?;

            committed += chunk_len;
            let progress = ImportProgress::new(committed, total);
            debug!(
                "chunk {} committed: {}/{} points ({}%)",
                index + 1,
                progress.current,
                progress.total,
                progress.percentage
            );
            on_progress(progress);
        }

        info!("imported {} points in {} chunks", committed, total.div_ceil(self.chunk_size));
        Ok(committed)
    }
}

/// Extract the underlying store message without re-wrapping its prefix
fn store_message(error: Error) -> String {
    match error {
        Error::Store { message } => message,
        other => other.to_string(),
    }
}
