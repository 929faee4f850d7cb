//! Remote data collaborators serving listing records
//!
//! Both backends answer the same range query: a window of records ordered by
//! creation time, plus the total number of matching records at query time.

mod rest;
mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;

use super::ListingRecord;
use crate::config::{AppConfig, StoreBackend};
use crate::Result;

pub use rest::{parse_content_range, RestStore};
pub use sqlite::SqliteStore;

/// Offset/limit window over the listing collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeQuery {
    pub offset: u64,
    pub limit: u64,
    /// Order by creation time, newest first
    pub newest_first: bool,
}

impl RangeQuery {
    /// Inclusive index of the last row in the window
    pub fn last_index(&self) -> u64 {
        self.offset + self.limit.max(1) - 1
    }
}

/// Records in the requested window and the total matching count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeResult {
    pub records: Vec<ListingRecord>,
    pub total: u64,
}

#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Run a range query. An `Err` is a failed query, never an empty result.
    async fn range(&self, query: RangeQuery) -> Result<RangeResult>;

    /// Short backend name for logs and the status bar
    fn name(&self) -> &'static str;
}

/// Build the store selected in configuration
pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn ListingStore>> {
    match config.store.backend {
        StoreBackend::Rest => {
            let store = RestStore::new(&config.store)?;
            Ok(Arc::new(store))
        }
        StoreBackend::Sqlite => {
            let store = SqliteStore::open(&config.database_path()).await?;
            Ok(Arc::new(store))
        }
    }
}
