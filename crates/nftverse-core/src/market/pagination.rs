use super::store::{ListingStore, RangeQuery};
use super::ListingRecord;
use crate::Result;

/// Default number of records per page
pub const PAGE_SIZE: u32 = 8;

/// One fetched page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    pub page_index: u32,
    pub records: Vec<ListingRecord>,
    /// Total matching records reported by the store at fetch time
    pub total: u64,
    /// Index of the following page, `None` once the window reaches the total
    pub next_page: Option<u32>,
}

/// Fetch page `page_index` (zero-based) of `page_size` records, newest first
pub async fn fetch_page(
    store: &dyn ListingStore,
    page_index: u32,
    page_size: u32,
) -> Result<PageResult> {
    let size = page_size.max(1) as u64;
    let offset = page_index as u64 * size;
    let query = RangeQuery {
        offset,
        limit: size,
        newest_first: true,
    };

    tracing::debug!(
        store = store.name(),
        page = page_index,
        from = offset,
        to = query.last_index(),
        "Fetching listing page"
    );

    let result = store.range(query).await?;
    let next_page = if offset + size < result.total {
        Some(page_index + 1)
    } else {
        None
    };

    tracing::info!(
        page = page_index,
        records = result.records.len(),
        total = result.total,
        has_more = next_page.is_some(),
        "Fetched listing page"
    );

    Ok(PageResult {
        page_index,
        records: result.records,
        total: result.total,
        next_page,
    })
}

/// Pagination progress for one listing flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    /// Index of the page to request next
    pub next_index: u32,
    pub page_size: u32,
    /// Records received so far
    pub fetched: u64,
    /// Total reported by the most recent fetch
    pub total: Option<u64>,
    /// No further pages will be requested
    pub exhausted: bool,
}

impl PageCursor {
    pub fn new(page_size: u32) -> Self {
        Self {
            next_index: 0,
            page_size: page_size.max(1),
            fetched: 0,
            total: None,
            exhausted: false,
        }
    }

    /// Record a successful fetch
    pub fn advance(&mut self, page: &PageResult) {
        self.fetched += page.records.len() as u64;
        self.total = Some(page.total);
        match page.next_page {
            Some(next) => self.next_index = next,
            None => self.exhausted = true,
        }
    }

    /// Whether another page may be requested
    pub fn has_more(&self) -> bool {
        !self.exhausted
    }

    /// Index of the next page, if any remain
    pub fn next_page(&self) -> Option<u32> {
        if self.exhausted {
            None
        } else {
            Some(self.next_index)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::models::record;
    use crate::market::store::{RangeResult, SqliteStore};
    use crate::Error;
    use async_trait::async_trait;

    async fn store_with(n: usize) -> SqliteStore {
        let store = SqliteStore::in_memory().await.unwrap();
        let records: Vec<ListingRecord> = (0..n)
            .map(|i| {
                record(
                    &format!("nft-{:03}", i),
                    &format!("Piece {}", i),
                    &format!("{}.5", i),
                    "studio",
                    &format!("2024-02-01T00:{:02}:00Z", i),
                )
            })
            .collect();
        store.insert_many(&records).await.unwrap();
        store
    }

    struct FailingStore;

    #[async_trait]
    impl ListingStore for FailingStore {
        async fn range(&self, _query: RangeQuery) -> Result<RangeResult> {
            Err(Error::Store("connection reset".to_string()))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_single_short_page_is_last() {
        let store = store_with(5).await;
        let page = fetch_page(&store, 0, PAGE_SIZE).await.unwrap();
        assert_eq!(page.records.len(), 5);
        assert_eq!(page.total, 5);
        assert_eq!(page.next_page, None);
    }

    #[tokio::test]
    async fn test_twenty_records_take_three_pages() {
        let store = store_with(20).await;
        let mut cursor = PageCursor::new(PAGE_SIZE);
        let mut accumulated = Vec::new();

        let page = fetch_page(&store, 0, PAGE_SIZE).await.unwrap();
        assert_eq!(page.records.len(), 8);
        assert_eq!(page.next_page, Some(1));
        cursor.advance(&page);
        accumulated.extend(page.records);

        let page = fetch_page(&store, cursor.next_index, PAGE_SIZE).await.unwrap();
        assert_eq!(page.records.len(), 8);
        assert_eq!(page.next_page, Some(2));
        cursor.advance(&page);
        accumulated.extend(page.records);
        assert_eq!(accumulated.len(), 16);

        let page = fetch_page(&store, cursor.next_index, PAGE_SIZE).await.unwrap();
        assert_eq!(page.records.len(), 4);
        assert_eq!(page.next_page, None);
        cursor.advance(&page);
        accumulated.extend(page.records);

        assert_eq!(accumulated.len(), 20);
        assert_eq!(cursor.fetched, 20);
        assert!(!cursor.has_more());
        assert_eq!(cursor.next_page(), None);
    }

    #[tokio::test]
    async fn test_exact_multiple_has_no_trailing_page() {
        let store = store_with(16).await;
        let page = fetch_page(&store, 1, PAGE_SIZE).await.unwrap();
        assert_eq!(page.records.len(), 8);
        assert_eq!(page.next_page, None);
    }

    #[tokio::test]
    async fn test_next_index_increments_until_exhausted() {
        let store = store_with(27).await;
        let mut cursor = PageCursor::new(PAGE_SIZE);
        let mut seen = Vec::new();

        while let Some(index) = cursor.next_page() {
            let page = fetch_page(&store, index, PAGE_SIZE).await.unwrap();
            if let Some(next) = page.next_page {
                assert_eq!(next, index + 1);
            }
            seen.push(index);
            cursor.advance(&page);
        }

        assert_eq!(seen, vec![0, 1, 2, 3]);
        assert_eq!(cursor.fetched, 27);
        assert_eq!(cursor.total, Some(27));
    }

    #[tokio::test]
    async fn test_empty_store() {
        let store = store_with(0).await;
        let page = fetch_page(&store, 0, PAGE_SIZE).await.unwrap();
        assert!(page.records.is_empty());
        assert_eq!(page.next_page, None);
    }

    #[tokio::test]
    async fn test_store_failure_is_error() {
        let err = fetch_page(&FailingStore, 0, PAGE_SIZE).await.unwrap_err();
        assert!(matches!(err, Error::Store(_)));
    }
}
