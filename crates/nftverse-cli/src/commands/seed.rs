use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use uuid::Uuid;

use nftverse_core::{
    market::{store::SqliteStore, ListingRecord},
    AppConfig, StoreBackend,
};

/// Seed file entry; id and timestamp are generated when missing
#[derive(Debug, Deserialize)]
struct SeedRecord {
    #[serde(default)]
    id: Option<String>,
    name: String,
    image: String,
    price: serde_json::Value,
    creator: String,
    #[serde(default)]
    created_at: Option<String>,
}

impl SeedRecord {
    fn into_record(self) -> Result<ListingRecord> {
        let price = match self.price {
            serde_json::Value::String(text) => text,
            serde_json::Value::Number(number) => number.to_string(),
            other => bail!("Invalid price for \"{}\": {}", self.name, other),
        };
        Ok(ListingRecord {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: self.name,
            image: self.image,
            price,
            creator: self.creator,
            created_at: self
                .created_at
                .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
        })
    }
}

fn parse_seed(content: &str) -> Result<Vec<ListingRecord>> {
    let entries: Vec<SeedRecord> = serde_json::from_str(content)?;
    entries.into_iter().map(SeedRecord::into_record).collect()
}

pub async fn run(config: &AppConfig, file: &Path) -> Result<()> {
    if !file.exists() {
        println!("File not found: {}", file.display());
        return Ok(());
    }

    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let records = parse_seed(&content)?;
    println!("Found {} records in {}", records.len(), file.display());

    let db_path = config.database_path();
    let store = SqliteStore::open(&db_path).await?;
    let inserted = store.insert_many(&records).await?;
    let total = store.count().await?;
    tracing::info!(inserted, total, path = %db_path.display(), "Seeded local store");

    println!("\nSeed complete:");
    println!("  Inserted: {}", inserted);
    println!("  Skipped (existing id): {}", records.len() as u64 - inserted);
    println!("  Total in store: {}", total);

    if config.store.backend != StoreBackend::Sqlite {
        println!("\nNote: set `backend = \"sqlite\"` under [store] to browse these records.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seed_fills_missing_fields() {
        let records = parse_seed(
            r#"[
                {"name": "Lunar Tide", "image": "https://x/1.png", "price": 0.5, "creator": "atelier"},
                {"id": "fixed", "name": "Solar Flare", "image": "https://x/2.png", "price": "1.25",
                 "creator": "studio", "created_at": "2024-03-01T12:00:00Z"}
            ]"#,
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].price, "0.5");
        assert!(Uuid::parse_str(&records[0].id).is_ok());
        assert!(records[0].created_at_value().is_some());
        assert_eq!(records[1].id, "fixed");
        assert_eq!(records[1].created_at, "2024-03-01T12:00:00Z");
    }

    #[test]
    fn test_parse_seed_rejects_bad_price() {
        let err = parse_seed(
            r#"[{"name": "Broken", "image": "i", "price": true, "creator": "c"}]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Broken"));
    }
}
