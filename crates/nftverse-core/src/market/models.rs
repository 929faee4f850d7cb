use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One marketplace item as served by the store
///
/// Fields are kept exactly as the store returns them; numeric and temporal
/// views are parsed on demand for ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub id: String,
    pub name: String,
    /// Image URI
    pub image: String,
    /// Decimal price as text
    #[serde(deserialize_with = "price_text")]
    pub price: String,
    pub creator: String,
    /// ISO-8601 creation timestamp
    pub created_at: String,
}

impl ListingRecord {
    /// Numeric price, `None` when the text is not a finite number
    pub fn price_value(&self) -> Option<f64> {
        self.price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }

    /// Parsed creation timestamp
    pub fn created_at_value(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(self.created_at.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Case-insensitive match on name or creator
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.creator.to_lowercase().contains(needle_lower)
    }
}

// Numeric columns come back as JSON numbers; keep them as text like the rest
fn price_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PriceRepr {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match PriceRepr::deserialize(deserializer)? {
        PriceRepr::Text(text) => text,
        PriceRepr::Number(number) => number.to_string(),
    })
}

#[cfg(test)]
pub(crate) fn record(id: &str, name: &str, price: &str, creator: &str, created_at: &str) -> ListingRecord {
    ListingRecord {
        id: id.to_string(),
        name: name.to_string(),
        image: format!("https://cdn.example.com/{}.png", id),
        price: price.to_string(),
        creator: creator.to_string(),
        created_at: created_at.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_value_parses_decimal_text() {
        let r = record("a", "A", " 1.25 ", "x", "2024-01-01T00:00:00Z");
        assert_eq!(r.price_value(), Some(1.25));
    }

    #[test]
    fn test_price_value_rejects_garbage_and_non_finite() {
        assert_eq!(record("a", "A", "1.2 ETH", "x", "").price_value(), None);
        assert_eq!(record("a", "A", "", "x", "").price_value(), None);
        assert_eq!(record("a", "A", "NaN", "x", "").price_value(), None);
        assert_eq!(record("a", "A", "inf", "x", "").price_value(), None);
    }

    #[test]
    fn test_created_at_accepts_offsets() {
        let r = record("a", "A", "1", "x", "2024-03-01T12:00:00+02:00");
        let parsed = r.created_at_value().unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-03-01T10:00:00+00:00");
        assert!(record("a", "A", "1", "x", "yesterday").created_at_value().is_none());
    }

    #[test]
    fn test_deserializes_store_row() {
        let json = r#"{
            "id": "7f1c",
            "name": "Moon Cat",
            "image": "https://cdn.example.com/moon.png",
            "price": "0.42",
            "creator": "Alice",
            "created_at": "2024-05-02T09:30:00.123456+00:00",
            "extra_column": true
        }"#;
        let r: ListingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.name, "Moon Cat");
        assert!(r.created_at_value().is_some());
    }

    #[test]
    fn test_numeric_price_column_kept_as_text() {
        let json = r#"{"id":"1","name":"N","image":"i","price":2.5,"creator":"c","created_at":"2024-01-01T00:00:00Z"}"#;
        let r: ListingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.price, "2.5");
        assert_eq!(r.price_value(), Some(2.5));
    }
}
