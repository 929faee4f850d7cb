use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{FromRow, Pool, Sqlite};

use super::{ListingStore, RangeQuery, RangeResult};
use crate::market::ListingRecord;
use crate::Result;

/// Local listing store backed by a SQLite file
#[derive(Clone)]
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

#[derive(FromRow)]
struct ListingRow {
    id: String,
    name: String,
    image: String,
    price: String,
    creator: String,
    created_at: String,
}

impl From<ListingRow> for ListingRecord {
    fn from(row: ListingRow) -> Self {
        ListingRecord {
            id: row.id,
            name: row.name,
            image: row.image,
            price: row.price,
            creator: row.creator,
            created_at: row.created_at,
        }
    }
}

impl SqliteStore {
    /// Open (or create) the store file and run migrations
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        tracing::info!("Opening local listing store: {}", path.display());

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(10));

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.run_migrations().await?;

        Ok(store)
    }

    /// Create an in-memory store for testing
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let store = Self { pool };
        store.run_migrations().await?;

        Ok(store)
    }

    async fn run_migrations(&self) -> Result<()> {
        tracing::debug!("Running listing store migrations...");

        sqlx::query(MIGRATION_001_NFTS).execute(&self.pool).await?;

        Ok(())
    }

    /// Insert records, skipping ids that already exist. Returns the number inserted.
    pub async fn insert_many(&self, records: &[ListingRecord]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for record in records {
            let result = sqlx::query(
                r#"
                INSERT OR IGNORE INTO nfts (id, name, image, price, creator, created_at)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&record.id)
            .bind(&record.name)
            .bind(&record.image)
            .bind(&record.price)
            .bind(&record.creator)
            .bind(&record.created_at)
            .execute(&mut *tx)
            .await?;

            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Total number of stored records
    pub async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM nfts")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }
}

#[async_trait]
impl ListingStore for SqliteStore {
    async fn range(&self, query: RangeQuery) -> Result<RangeResult> {
        // Order by instant, not text, so offsets and fractional seconds compare
        // correctly. Unparsable timestamps go last; ties are broken by id so
        // windows never overlap.
        let sql = if query.newest_first {
            r#"
            SELECT id, name, image, price, creator, created_at
            FROM nfts
            ORDER BY julianday(created_at) IS NULL, julianday(created_at) DESC, id ASC
            LIMIT ? OFFSET ?
            "#
        } else {
            r#"
            SELECT id, name, image, price, creator, created_at
            FROM nfts
            ORDER BY julianday(created_at) IS NULL, julianday(created_at) ASC, id ASC
            LIMIT ? OFFSET ?
            "#
        };

        let rows: Vec<ListingRow> = sqlx::query_as(sql)
            .bind(query.limit as i64)
            .bind(query.offset as i64)
            .fetch_all(&self.pool)
            .await?;

        let total = self.count().await?;

        Ok(RangeResult {
            records: rows.into_iter().map(ListingRecord::from).collect(),
            total,
        })
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }
}

const MIGRATION_001_NFTS: &str = r#"
CREATE TABLE IF NOT EXISTS nfts (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    image TEXT NOT NULL,
    price TEXT NOT NULL,
    creator TEXT NOT NULL,
    created_at TEXT NOT NULL
)
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::models::record;

    fn sample(n: usize) -> Vec<ListingRecord> {
        (0..n)
            .map(|i| {
                record(
                    &format!("nft-{:02}", i),
                    &format!("Piece {}", i),
                    "1.0",
                    "studio",
                    &format!("2024-01-{:02}T00:00:00Z", i + 1),
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_insert_many_ignores_duplicate_ids() {
        let store = SqliteStore::in_memory().await.unwrap();
        assert_eq!(store.insert_many(&sample(3)).await.unwrap(), 3);
        assert_eq!(store.insert_many(&sample(5)).await.unwrap(), 2);
        assert_eq!(store.count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_range_newest_first_with_total() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.insert_many(&sample(10)).await.unwrap();

        let result = store
            .range(RangeQuery {
                offset: 0,
                limit: 4,
                newest_first: true,
            })
            .await
            .unwrap();

        assert_eq!(result.total, 10);
        let ids: Vec<&str> = result.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["nft-09", "nft-08", "nft-07", "nft-06"]);
    }

    #[tokio::test]
    async fn test_range_past_end_is_empty_not_error() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.insert_many(&sample(3)).await.unwrap();

        let result = store
            .range(RangeQuery {
                offset: 8,
                limit: 8,
                newest_first: true,
            })
            .await
            .unwrap();

        assert!(result.records.is_empty());
        assert_eq!(result.total, 3);
    }

    #[tokio::test]
    async fn test_range_oldest_first() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.insert_many(&sample(3)).await.unwrap();

        let result = store
            .range(RangeQuery {
                offset: 1,
                limit: 5,
                newest_first: false,
            })
            .await
            .unwrap();

        let ids: Vec<&str> = result.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["nft-01", "nft-02"]);
    }

    #[tokio::test]
    async fn test_range_orders_by_instant_not_text() {
        let store = SqliteStore::in_memory().await.unwrap();
        store
            .insert_many(&[
                // 19:00Z on Feb 29, earlier than the other two
                record("offset", "Offset", "1", "c", "2024-03-01T00:00:00+05:00"),
                record("whole", "Whole", "1", "c", "2024-02-29T20:00:00Z"),
                record("fraction", "Fraction", "1", "c", "2024-02-29T20:00:00.500Z"),
                record("garbage", "Garbage", "1", "c", "yesterday"),
            ])
            .await
            .unwrap();

        let window = |newest_first| RangeQuery {
            offset: 0,
            limit: 8,
            newest_first,
        };

        let newest = store.range(window(true)).await.unwrap();
        let ids: Vec<&str> = newest.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["fraction", "whole", "offset", "garbage"]);

        let oldest = store.range(window(false)).await.unwrap();
        let ids: Vec<&str> = oldest.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["offset", "whole", "fraction", "garbage"]);
    }
}
