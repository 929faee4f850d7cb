//! Marketplace listing pipeline
//!
//! Remote store -> page fetch -> accumulation -> filter -> sort -> render.
//! Everything here is UI-agnostic; the TUI drives [`ListingFlow`] from its
//! event loop and spawns the page fetches it requests.

mod cache;
mod flow;
mod models;
mod pagination;
mod pipeline;
pub mod store;

pub use cache::{CacheLookup, QueryCache};
pub use flow::{FlowPhase, ListingFlow, ListingSnapshot, PageRequest, PageResponse};
pub use models::ListingRecord;
pub use pagination::{fetch_page, PageCursor, PageResult, PAGE_SIZE};
pub use pipeline::{accumulate, filter, sort, ListingView, SortMode};
pub use store::{ListingStore, RangeQuery, RangeResult};

/// Cache key for the marketplace listing query
pub const LISTING_QUERY_KEY: &str = "nfts";
