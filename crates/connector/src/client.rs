//! HTTP client for the store REST API
//!
//! Thin reqwest wrapper: URL building, basic-auth credentials, and
//! text-mode body handling (bodies are read as text so a leading PHP
//! banner can be stripped before JSON parsing).

use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use storelens_config::StoreConfig;

use crate::error::ConnectorError;
use crate::extract::{FetchPages, PageQuery};
use crate::payload::split_json_payload;

/// Client for a WooCommerce-style REST API
pub struct StoreClient {
    client: reqwest::Client,
    api_url: String,
    api_version: String,
    consumer_key: String,
    consumer_secret: String,
}

impl StoreClient {
    /// Create a client from store configuration
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client creation fails (e.g., TLS or proxy
    /// misconfiguration)
    pub fn new(config: &StoreConfig) -> Result<Self, ConnectorError> {
        let client = reqwest::Client::builder()
            .user_agent("storelens/0.1")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConnectorError::Init(format!("store HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
            consumer_key: config.consumer_key.clone(),
            consumer_secret: config.consumer_secret.clone(),
        })
    }

    /// Build the URL for one page of a resource
    fn page_url(&self, query: &PageQuery) -> String {
        let mut url = format!(
            "{}/wp-json/{}/{}?page={}&per_page={}",
            self.api_url, self.api_version, query.resource, query.page, query.per_page
        );
        if let Some(ref after) = query.after {
            url.push_str(&format!("&after={}", urlencoding::encode(after)));
        }
        if let Some(ref status) = query.status {
            url.push_str(&format!("&status={}", urlencoding::encode(status)));
        }
        url
    }
}

impl FetchPages for StoreClient {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Vec<Value>, ConnectorError> {
        let url = self.page_url(query);
        let response = self
            .client
            .get(&url)
            .basic_auth(&self.consumer_key, Some(&self.consumer_secret))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConnectorError::Status {
                status: status.as_u16(),
                resource: query.resource.to_string(),
                page: query.page,
            });
        }

        let body = response.text().await?;
        let payload = split_json_payload(&body).ok_or_else(|| ConnectorError::NoPayload {
            resource: query.resource.to_string(),
            page: query.page,
        })?;

        let parsed: Value = serde_json::from_str(payload)?;
        match parsed {
            Value::Array(records) => {
                debug!(
                    resource = query.resource,
                    page = query.page,
                    count = records.len(),
                    "fetched page"
                );
                Ok(records)
            }
            _ => Err(ConnectorError::UnexpectedPayload {
                resource: query.resource.to_string(),
                page: query.page,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> StoreClient {
        StoreClient::new(&StoreConfig {
            api_url: "https://shop.example/".into(),
            consumer_key: "ck_x".into(),
            consumer_secret: "cs_x".into(),
            ..Default::default()
        })
        .expect("should create client")
    }

    #[test]
    fn test_page_url_products() {
        let client = test_client();
        let query = PageQuery {
            resource: "products",
            page: 3,
            per_page: 100,
            after: None,
            status: None,
        };
        assert_eq!(
            client.page_url(&query),
            "https://shop.example/wp-json/wc/v3/products?page=3&per_page=100"
        );
    }

    #[test]
    fn test_page_url_orders_with_filters() {
        let client = test_client();
        let query = PageQuery {
            resource: "orders",
            page: 1,
            per_page: 50,
            after: Some("2026-05-01T00:00:00+00:00".into()),
            status: Some("on-hold".into()),
        };
        let url = client.page_url(&query);
        assert!(url.starts_with("https://shop.example/wp-json/wc/v3/orders?page=1&per_page=50"));
        assert!(url.contains("&after=2026-05-01T00%3A00%3A00%2B00%3A00"));
        assert!(url.contains("&status=on-hold"));
    }
}
