use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_RANGE, RANGE};
use reqwest::{Client, Proxy, StatusCode};
use url::Url;

use super::{ListingStore, RangeQuery, RangeResult};
use crate::config::StoreConfig;
use crate::market::ListingRecord;
use crate::{Error, Result};

const REST_PREFIX: &str = "rest/v1";
const MAX_ERROR_BODY: usize = 256;

/// PostgREST-dialect store (the Supabase REST interface)
///
/// Windows are requested with a `Range` header and the exact total comes
/// back in `Content-Range` because the request carries `Prefer: count=exact`.
pub struct RestStore {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl RestStore {
    /// Create a REST store from configuration
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let client = Self::build_client(config.request_timeout_secs, &config.proxy_url)?;
        let endpoint = Self::endpoint(&config.base_url, &config.table)?;

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }

    /// Build HTTP client with optional proxy
    fn build_client(timeout_secs: u64, proxy_url: &Option<String>) -> Result<Client> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .gzip(true)
            .deflate(true)
            .brotli(true);

        if let Some(ref proxy) = proxy_url {
            let proxy = Proxy::all(proxy)
                .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
            tracing::info!("Using HTTP proxy for store queries");
        }

        builder.build().map_err(Error::Http)
    }

    /// `{base}/rest/v1/{table}`
    fn endpoint(base_url: &str, table: &str) -> Result<Url> {
        let table = table.trim_matches('/');
        if table.is_empty() {
            return Err(Error::Config("store.table must not be empty".to_string()));
        }
        let base = format!("{}/", base_url.trim_end_matches('/'));
        let url = Url::parse(&base)?.join(&format!("{}/{}", REST_PREFIX, table))?;
        Ok(url)
    }

    /// The resolved table endpoint
    pub fn url(&self) -> &Url {
        &self.endpoint
    }

    fn build_headers(&self, query: &RangeQuery) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert("range-unit", HeaderValue::from_static("items"));
        headers.insert("prefer", HeaderValue::from_static("count=exact"));
        if let Ok(range) = HeaderValue::from_str(&format!("{}-{}", query.offset, query.last_index())) {
            headers.insert(RANGE, range);
        }
        if let Some(ref key) = self.api_key {
            if let Ok(value) = HeaderValue::from_str(key) {
                headers.insert("apikey", value);
            }
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", key)) {
                headers.insert(AUTHORIZATION, value);
            }
        }
        headers
    }
}

#[async_trait]
impl ListingStore for RestStore {
    async fn range(&self, query: RangeQuery) -> Result<RangeResult> {
        let order = if query.newest_first {
            "created_at.desc"
        } else {
            "created_at.asc"
        };

        tracing::debug!(
            url = %self.endpoint,
            offset = query.offset,
            limit = query.limit,
            "Querying REST store"
        );

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("select", "*"), ("order", order)])
            .headers(self.build_headers(&query))
            .send()
            .await?;

        let status = response.status();
        let total = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range);

        // Past the end of the collection: empty window, total still reported
        if status == StatusCode::RANGE_NOT_SATISFIABLE {
            return Ok(RangeResult {
                records: Vec::new(),
                total: total.unwrap_or(query.offset),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(MAX_ERROR_BODY).collect();
            return Err(Error::Store(format!(
                "HTTP {} from {}: {}",
                status, self.endpoint, snippet
            )));
        }

        let records: Vec<ListingRecord> = response.json().await?;
        let total = match total {
            Some(total) => total,
            None => {
                tracing::warn!(
                    url = %self.endpoint,
                    "Store response had no usable Content-Range; treating this page as the last"
                );
                query.offset + records.len() as u64
            }
        };

        Ok(RangeResult { records, total })
    }

    fn name(&self) -> &'static str {
        "rest"
    }
}

/// Total from a `Content-Range` value such as `0-7/20` or `*/0`
pub fn parse_content_range(value: &str) -> Option<u64> {
    let (_, total) = value.trim().rsplit_once('/')?;
    total.trim().parse().ok()
}
