//! Remote store speaking the PostgREST dialect (as exposed by hosted
//! Postgres backends under `/rest/v1`).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::debug;

use super::{Store, StoreError, StoreResult};

/// HTTP client for a remote table store.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
}

impl RestStore {
    /// Build a client for `url`, authenticating every request with the
    /// anonymous access key.
    pub fn new(url: &str, anon_key: &str, timeout: Duration) -> StoreResult<Self> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(anon_key).map_err(|_| StoreError::InvalidKey)?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", anon_key))
            .map_err(|_| StoreError::InvalidKey)?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: url.trim_end_matches('/').to_string(),
        })
    }

    /// Endpoint for one collection.
    pub fn collection_url(&self, collection: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, collection)
    }
}

/// Turn non-2xx responses into [`StoreError::Status`].
async fn check(response: Response) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl Store for RestStore {
    async fn select(&self, collection: &str) -> StoreResult<Vec<Value>> {
        let url = self.collection_url(collection);
        debug!(%url, "selecting collection");

        let response = self
            .client
            .get(&url)
            .query(&[("select", "*")])
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }

    async fn insert(&self, collection: &str, row: Value) -> StoreResult<()> {
        let url = self.collection_url(collection);
        debug!(%url, "inserting row");

        let response = self
            .client
            .post(&url)
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }
}
