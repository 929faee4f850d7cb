use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ListingRecord;
use crate::Error;

/// Append a freshly fetched page to the accumulated set
///
/// Pure append: the existing sequence is always a prefix of the result and
/// no de-duplication by id is attempted.
pub fn accumulate<T>(mut existing: Vec<T>, page: impl IntoIterator<Item = T>) -> Vec<T> {
    existing.extend(page);
    existing
}

/// Records whose name or creator contains `query`, case-insensitively
///
/// Order is preserved; an empty (or whitespace-only) query matches everything.
pub fn filter<'a, I>(records: I, query: &str) -> Vec<&'a ListingRecord>
where
    I: IntoIterator<Item = &'a ListingRecord>,
{
    let needle = query.trim().to_lowercase();
    records
        .into_iter()
        .filter(|record| needle.is_empty() || record.matches(&needle))
        .collect()
}

/// Sort selector for the marketplace grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    #[default]
    Newest,
    Oldest,
    PriceAsc,
    PriceDesc,
}

impl SortMode {
    pub const ALL: [SortMode; 4] = [
        SortMode::Newest,
        SortMode::Oldest,
        SortMode::PriceAsc,
        SortMode::PriceDesc,
    ];

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Newest => "newest",
            SortMode::Oldest => "oldest",
            SortMode::PriceAsc => "price-asc",
            SortMode::PriceDesc => "price-desc",
        }
    }

    /// Label shown in the sort selector
    pub fn label(&self) -> &'static str {
        match self {
            SortMode::Newest => "Newest First",
            SortMode::Oldest => "Oldest First",
            SortMode::PriceAsc => "Price: Low to High",
            SortMode::PriceDesc => "Price: High to Low",
        }
    }

    /// Next mode in selector order, wrapping around
    pub fn cycle(self) -> Self {
        match self {
            SortMode::Newest => SortMode::Oldest,
            SortMode::Oldest => SortMode::PriceAsc,
            SortMode::PriceAsc => SortMode::PriceDesc,
            SortMode::PriceDesc => SortMode::Newest,
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidSortMode(s.to_string()))
    }
}

/// Compare optional keys; missing keys go last regardless of direction
fn compare_keys<K: PartialOrd>(a: Option<K>, b: Option<K>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Order `items` in place by `mode`, reading each record through `record_of`
fn order_by<'r, T>(items: &mut [T], mode: SortMode, record_of: impl Fn(&T) -> &'r ListingRecord) {
    // slice::sort_by is stable
    match mode {
        SortMode::Newest | SortMode::Oldest => {
            let descending = mode == SortMode::Newest;
            items.sort_by(|a, b| {
                compare_keys(
                    record_of(a).created_at_value(),
                    record_of(b).created_at_value(),
                    descending,
                )
            })
        }
        SortMode::PriceAsc | SortMode::PriceDesc => {
            let descending = mode == SortMode::PriceDesc;
            items.sort_by(|a, b| {
                compare_keys(record_of(a).price_value(), record_of(b).price_value(), descending)
            })
        }
    }
}

/// Reorder records by `mode` into a new vector
///
/// Stable: records with equal keys keep their input order. Unparsable prices
/// and timestamps sort after every parsable one.
pub fn sort<'a>(records: &[&'a ListingRecord], mode: SortMode) -> Vec<&'a ListingRecord> {
    let mut ordered = records.to_vec();
    order_by(&mut ordered, mode, |record| *record);
    ordered
}

/// Memoized filter + sort over an accumulated set
///
/// Holds indices into the accumulated set rather than references, so it can
/// live next to the set it describes. Recomputes when the query, the sort
/// mode or the set length changes; call [`ListingView::invalidate`] when the
/// set is replaced wholesale.
#[derive(Debug, Clone, Default)]
pub struct ListingView {
    key: Option<(String, SortMode, usize)>,
    indices: Vec<usize>,
}

impl ListingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indices into `records`, filtered by `query` and ordered by `mode`
    pub fn indices(&mut self, records: &[ListingRecord], query: &str, mode: SortMode) -> &[usize] {
        let key = (query.to_string(), mode, records.len());
        if self.key.as_ref() != Some(&key) {
            let needle = query.trim().to_lowercase();
            let mut indices: Vec<usize> = records
                .iter()
                .enumerate()
                .filter(|(_, record)| needle.is_empty() || record.matches(&needle))
                .map(|(idx, _)| idx)
                .collect();
            order_by(&mut indices, mode, |&idx| &records[idx]);
            self.indices = indices;
            self.key = Some(key);
        }
        &self.indices
    }

    /// Drop the memoized result
    pub fn invalidate(&mut self) {
        self.key = None;
        self.indices.clear();
    }
}
