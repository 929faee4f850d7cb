//! Listing flow state machine
//!
//! Owns the accumulated set for one marketplace view. The flow never performs
//! I/O itself: it hands out [`PageRequest`]s and is fed [`PageResponse`]s, so
//! the event loop decides how fetches run. At most one request is in flight.

use super::pagination::{PageCursor, PageResult};
use super::pipeline::{accumulate, ListingView, SortMode};
use super::ListingRecord;
use crate::Result;

/// Display phase of the flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowPhase {
    /// Initial fetch outstanding, nothing to show yet
    Loading,
    Ready,
    /// A fetch failed; terminal for this flow
    Failed(String),
}

/// A page the flow wants fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub generation: u64,
    pub page_index: u32,
    pub page_size: u32,
}

/// Outcome of a [`PageRequest`]
#[derive(Debug)]
pub struct PageResponse {
    pub generation: u64,
    pub page_index: u32,
    pub result: Result<PageResult>,
}

impl PageRequest {
    /// Pair a fetch outcome with this request
    pub fn respond(self, result: Result<PageResult>) -> PageResponse {
        PageResponse {
            generation: self.generation,
            page_index: self.page_index,
            result,
        }
    }
}

/// Cacheable state of a successful flow
#[derive(Debug, Clone, PartialEq)]
pub struct ListingSnapshot {
    pub records: Vec<ListingRecord>,
    pub cursor: PageCursor,
}

#[derive(Debug)]
pub struct ListingFlow {
    generation: u64,
    page_size: u32,
    cursor: PageCursor,
    records: Vec<ListingRecord>,
    phase: FlowPhase,
    in_flight: Option<u32>,
    /// Showing a stale snapshot while page 0 is refetched
    refreshing: bool,
    torn_down: bool,
    query: String,
    sort: SortMode,
    view: ListingView,
}

impl ListingFlow {
    /// A flow with nothing fetched yet. `generation` must be unique per flow.
    pub fn new(generation: u64, page_size: u32) -> Self {
        Self {
            generation,
            page_size: page_size.max(1),
            cursor: PageCursor::new(page_size),
            records: Vec::new(),
            phase: FlowPhase::Loading,
            in_flight: None,
            refreshing: false,
            torn_down: false,
            query: String::new(),
            sort: SortMode::default(),
            view: ListingView::new(),
        }
    }

    /// A flow seeded from a cached snapshot
    ///
    /// A stale snapshot is displayed immediately and replaced once the
    /// refetch requested by [`ListingFlow::start`] lands. Only page 0 is
    /// refetched, so the list shrinks to one page and later pages load again
    /// through continuation as the user scrolls.
    pub fn from_snapshot(generation: u64, snapshot: ListingSnapshot, stale: bool) -> Self {
        let page_size = snapshot.cursor.page_size;
        let mut flow = Self::new(generation, page_size);
        flow.records = snapshot.records;
        flow.cursor = snapshot.cursor;
        flow.phase = FlowPhase::Ready;
        flow.refreshing = stale;
        flow
    }

    /// Request the initial page (or the refresh of a stale snapshot)
    pub fn start(&mut self) -> Option<PageRequest> {
        if self.torn_down || self.in_flight.is_some() {
            return None;
        }
        let needs_first_page = self.phase == FlowPhase::Loading || self.refreshing;
        if needs_first_page {
            Some(self.issue(0))
        } else {
            None
        }
    }

    /// Level-triggered continuation check, safe to call every frame
    ///
    /// Returns a request only when the sentinel is visible, the initial fetch
    /// has completed, nothing is in flight and another page exists.
    pub fn poll_continuation(&mut self, sentinel_visible: bool) -> Option<PageRequest> {
        if !sentinel_visible
            || self.torn_down
            || self.refreshing
            || self.in_flight.is_some()
            || self.phase != FlowPhase::Ready
        {
            return None;
        }
        let next = self.cursor.next_page()?;
        Some(self.issue(next))
    }

    fn issue(&mut self, page_index: u32) -> PageRequest {
        self.in_flight = Some(page_index);
        tracing::debug!(generation = self.generation, page = page_index, "Requesting listing page");
        PageRequest {
            generation: self.generation,
            page_index,
            page_size: self.page_size,
        }
    }

    /// Apply a fetch outcome. Returns false when the response was discarded.
    pub fn complete(&mut self, response: PageResponse) -> bool {
        if self.torn_down || response.generation != self.generation {
            tracing::debug!(
                generation = response.generation,
                current = self.generation,
                "Discarding page response from another flow"
            );
            return false;
        }
        if self.in_flight != Some(response.page_index) {
            tracing::warn!(
                page = response.page_index,
                in_flight = ?self.in_flight,
                "Discarding unexpected page response"
            );
            return false;
        }
        self.in_flight = None;

        match response.result {
            Ok(page) => {
                if self.refreshing {
                    // Fresh first page replaces the stale snapshot
                    self.records = page.records.clone();
                    self.cursor = PageCursor::new(self.page_size);
                    self.refreshing = false;
                    self.view.invalidate();
                } else {
                    let existing = std::mem::take(&mut self.records);
                    self.records = accumulate(existing, page.records.iter().cloned());
                }
                self.cursor.advance(&page);
                self.phase = FlowPhase::Ready;
            }
            Err(err) => {
                tracing::error!(page = response.page_index, error = %err, "Error fetching NFTs");
                self.records.clear();
                self.view.invalidate();
                self.refreshing = false;
                self.phase = FlowPhase::Failed(err.to_string());
            }
        }
        true
    }

    /// Filtered and sorted records to render, empty once failed
    pub fn visible(&mut self) -> Vec<&ListingRecord> {
        if matches!(self.phase, FlowPhase::Failed(_)) {
            return Vec::new();
        }
        let indices = self.view.indices(&self.records, &self.query, self.sort);
        indices.iter().map(|&idx| &self.records[idx]).collect()
    }

    /// Ready, but the filter leaves nothing to show
    pub fn is_empty_result(&mut self) -> bool {
        self.phase == FlowPhase::Ready && self.visible().is_empty()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort
    }

    pub fn phase(&self) -> &FlowPhase {
        &self.phase
    }

    /// Initial fetch outstanding
    pub fn is_initial_loading(&self) -> bool {
        self.phase == FlowPhase::Loading
    }

    /// Continuation fetch outstanding
    pub fn is_fetching_next(&self) -> bool {
        self.phase == FlowPhase::Ready && !self.refreshing && self.in_flight.is_some()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn in_flight(&self) -> Option<u32> {
        self.in_flight
    }

    /// Accumulated set in fetch order
    pub fn records(&self) -> &[ListingRecord] {
        &self.records
    }

    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    /// Total reported by the store on the latest fetch
    pub fn total(&self) -> Option<u64> {
        self.cursor.total
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Cacheable state, present only for a settled successful flow
    pub fn snapshot(&self) -> Option<ListingSnapshot> {
        if self.phase != FlowPhase::Ready || self.refreshing {
            return None;
        }
        Some(ListingSnapshot {
            records: self.records.clone(),
            cursor: self.cursor.clone(),
        })
    }

    /// End the flow: later responses are ignored. Returns the cacheable state.
    pub fn teardown(&mut self) -> Option<ListingSnapshot> {
        let snapshot = self.snapshot();
        self.torn_down = true;
        self.in_flight = None;
        self.records.clear();
        self.view.invalidate();
        tracing::debug!(generation = self.generation, cached = snapshot.is_some(), "Listing flow torn down");
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::models::record;
    use crate::Error;

    fn page(index: u32, ids: &[&str], total: u64, size: u32) -> PageResult {
        let records = ids
            .iter()
            .map(|id| record(id, &format!("Name {}", id), "1", "maker", "2024-01-01T00:00:00Z"))
            .collect();
        let next_page = if (index as u64 * size as u64 + size as u64) < total {
            Some(index + 1)
        } else {
            None
        };
        PageResult {
            page_index: index,
            records,
            total,
            next_page,
        }
    }

    fn ids(flow: &mut ListingFlow) -> Vec<String> {
        flow.visible().iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_initial_fetch_lifecycle() {
        let mut flow = ListingFlow::new(1, 2);
        assert!(flow.is_initial_loading());

        let req = flow.start().unwrap();
        assert_eq!(req.page_index, 0);
        assert_eq!(req.page_size, 2);
        // nothing more while the initial request is outstanding
        assert!(flow.start().is_none());
        assert!(flow.poll_continuation(true).is_none());

        assert!(flow.complete(req.respond(Ok(page(0, &["a", "b"], 5, 2)))));
        assert_eq!(flow.phase(), &FlowPhase::Ready);
        assert_eq!(ids(&mut flow), vec!["a", "b"]);
        assert_eq!(flow.total(), Some(5));
    }

    #[test]
    fn test_continuation_requires_visible_sentinel() {
        let mut flow = ListingFlow::new(1, 2);
        let req = flow.start().unwrap();
        flow.complete(req.respond(Ok(page(0, &["a", "b"], 5, 2))));

        assert!(flow.poll_continuation(false).is_none());
        let next = flow.poll_continuation(true).unwrap();
        assert_eq!(next.page_index, 1);
        assert!(flow.is_fetching_next());
    }

    #[test]
    fn test_at_most_one_fetch_in_flight() {
        let mut flow = ListingFlow::new(1, 2);
        let req = flow.start().unwrap();
        flow.complete(req.respond(Ok(page(0, &["a", "b"], 6, 2))));

        let first = flow.poll_continuation(true).unwrap();
        for _ in 0..10 {
            assert!(flow.poll_continuation(true).is_none());
        }

        flow.complete(first.respond(Ok(page(1, &["c", "d"], 6, 2))));
        let second = flow.poll_continuation(true).unwrap();
        assert_eq!(second.page_index, 2);
    }

    #[test]
    fn test_pages_accumulate_in_order_until_exhausted() {
        let mut flow = ListingFlow::new(3, 2);
        let req = flow.start().unwrap();
        flow.complete(req.respond(Ok(page(0, &["a", "b"], 5, 2))));
        let req = flow.poll_continuation(true).unwrap();
        flow.complete(req.respond(Ok(page(1, &["c", "d"], 5, 2))));
        let req = flow.poll_continuation(true).unwrap();
        assert_eq!(req.page_index, 2);
        flow.complete(req.respond(Ok(page(2, &["e"], 5, 2))));

        let accumulated: Vec<&str> = flow.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(accumulated, vec!["a", "b", "c", "d", "e"]);
        assert!(!flow.cursor().has_more());
        assert!(flow.poll_continuation(true).is_none());
    }

    #[test]
    fn test_failure_replaces_list_and_stops_fetching() {
        let mut flow = ListingFlow::new(1, 2);
        let req = flow.start().unwrap();
        flow.complete(req.respond(Ok(page(0, &["a", "b"], 6, 2))));
        let req = flow.poll_continuation(true).unwrap();
        flow.complete(req.respond(Err(Error::Store("HTTP 500".to_string()))));

        assert!(matches!(flow.phase(), FlowPhase::Failed(msg) if msg.contains("HTTP 500")));
        assert!(flow.visible().is_empty());
        assert!(!flow.is_empty_result());
        assert!(flow.poll_continuation(true).is_none());
        assert!(flow.start().is_none());
        assert!(flow.snapshot().is_none());
    }

    #[test]
    fn test_initial_failure() {
        let mut flow = ListingFlow::new(1, 8);
        let req = flow.start().unwrap();
        flow.complete(req.respond(Err(Error::Store("timeout".to_string()))));
        assert!(!flow.is_initial_loading());
        assert!(matches!(flow.phase(), FlowPhase::Failed(_)));
    }

    #[test]
    fn test_responses_from_other_generations_are_ignored() {
        let mut flow = ListingFlow::new(2, 2);
        let req = flow.start().unwrap();

        let stale = PageResponse {
            generation: 1,
            page_index: 0,
            result: Ok(page(0, &["zombie"], 1, 2)),
        };
        assert!(!flow.complete(stale));
        assert!(flow.is_initial_loading());
        assert_eq!(flow.in_flight(), Some(0));

        assert!(flow.complete(req.respond(Ok(page(0, &["a"], 1, 2)))));
        assert_eq!(ids(&mut flow), vec!["a"]);
    }

    #[test]
    fn test_response_after_teardown_is_ignored() {
        let mut flow = ListingFlow::new(1, 2);
        let req = flow.start().unwrap();
        assert!(flow.teardown().is_none());
        assert!(!flow.complete(req.respond(Ok(page(0, &["a"], 1, 2)))));
        assert!(flow.records().is_empty());
    }

    #[test]
    fn test_empty_result_distinct_from_error() {
        let mut flow = ListingFlow::new(1, 2);
        let req = flow.start().unwrap();
        flow.complete(req.respond(Ok(page(0, &["a", "b"], 2, 2))));

        flow.set_query("nothing matches this");
        assert!(flow.is_empty_result());
        assert_eq!(flow.phase(), &FlowPhase::Ready);

        flow.set_query("");
        assert!(!flow.is_empty_result());
    }

    #[test]
    fn test_query_and_sort_apply_to_accumulated_set() {
        let mut flow = ListingFlow::new(1, 3);
        let req = flow.start().unwrap();
        let mut first = page(0, &["x", "y", "z"], 3, 3);
        first.records[0].price = "1.5".to_string();
        first.records[1].price = "10".to_string();
        first.records[2].price = "2".to_string();
        flow.complete(req.respond(Ok(first)));

        flow.set_sort(SortMode::PriceDesc);
        assert_eq!(ids(&mut flow), vec!["y", "z", "x"]);

        flow.set_query("name y");
        assert_eq!(ids(&mut flow), vec!["y"]);
        assert_eq!(flow.sort_mode(), SortMode::PriceDesc);
        assert_eq!(flow.query(), "name y");
    }

    #[test]
    fn test_fresh_snapshot_needs_no_fetch() {
        let snapshot = ListingSnapshot {
            records: vec![record("a", "A", "1", "c", "2024-01-01T00:00:00Z")],
            cursor: {
                let mut cursor = PageCursor::new(2);
                cursor.advance(&page(0, &["a"], 1, 2));
                cursor
            },
        };
        let mut flow = ListingFlow::from_snapshot(5, snapshot.clone(), false);
        assert!(flow.start().is_none());
        assert_eq!(flow.snapshot(), Some(snapshot));
    }

    #[test]
    fn test_stale_snapshot_shown_then_replaced() {
        let mut cursor = PageCursor::new(2);
        cursor.advance(&page(0, &["old1", "old2"], 4, 2));
        cursor.advance(&page(1, &["old3", "old4"], 4, 2));
        let snapshot = ListingSnapshot {
            records: ["old1", "old2", "old3", "old4"]
                .iter()
                .map(|id| record(id, id, "1", "c", "2024-01-01T00:00:00Z"))
                .collect(),
            cursor,
        };

        let mut flow = ListingFlow::from_snapshot(6, snapshot, true);
        assert_eq!(ids(&mut flow).len(), 4);
        assert!(flow.snapshot().is_none());

        let req = flow.start().unwrap();
        assert_eq!(req.page_index, 0);
        assert!(flow.poll_continuation(true).is_none());
        assert!(!flow.is_fetching_next());

        flow.complete(req.respond(Ok(page(0, &["new1", "new2"], 5, 2))));
        assert!(!flow.is_refreshing());
        assert_eq!(ids(&mut flow), vec!["new1", "new2"]);
        assert_eq!(flow.cursor().next_page(), Some(1));
        assert_eq!(flow.cursor().fetched, 2);
    }

    #[test]
    fn test_teardown_returns_snapshot_for_cache() {
        let mut flow = ListingFlow::new(1, 2);
        let req = flow.start().unwrap();
        flow.complete(req.respond(Ok(page(0, &["a", "b"], 3, 2))));

        let snapshot = flow.teardown().unwrap();
        assert_eq!(snapshot.records.len(), 2);
        assert_eq!(snapshot.cursor.next_page(), Some(1));
        assert!(flow.records().is_empty());
        assert!(flow.poll_continuation(true).is_none());
    }
}
