//! HTTP fetcher for the bestsellers index page
//!
//! This module builds the HTTP client used for category discovery and fetches
//! the seed page. The header set mimics a desktop browser; the index responds
//! with HTTP 503 to clients it does not recognize.

use crate::DiscoveryError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, UPGRADE_INSECURE_REQUESTS};
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/118.0.0.0 Safari/537.36";

const ACCEPT_VALUE: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,\
     image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";

const ACCEPT_LANGUAGE_VALUE: &str = "pt-BR,pt;q=0.9,en-US;q=0.8,en;q=0.7";

/// Builds the HTTP client used for seed page fetches
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));
    headers.insert("DNT", HeaderValue::from_static("1"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));

    Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches the seed page body
///
/// A non-success status or any network/timeout error is a [`DiscoveryError`];
/// discovery failures are never retried because a run with no categories has
/// nothing left to do.
pub async fn fetch_seed(client: &Client, url: &str) -> Result<String, DiscoveryError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| DiscoveryError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(DiscoveryError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| DiscoveryError::Http {
        url: url.to_string(),
        source,
    })
}
