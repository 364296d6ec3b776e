// SPDX-License-Identifier: Apache-2.0

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use storefront_model::ExternalProductId;
use tracing::{debug, warn};

use crate::api::{parse_product_detail, parse_product_list, ProductApi, ProductDetail, ProductSummary};
use crate::config::SyncConfig;
use crate::retry::{BackoffPolicy, RetryPolicy};
use crate::{SyncError, SyncErrorCode};

const PRODUCTS_PATH: &str = "/v1/products";

/// Blocking client for the external product API.
pub struct HttpProductApi {
    pub base_url: String,
    pub retry: RetryPolicy,
    token: String,
    client: Client,
}

impl HttpProductApi {
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self, SyncError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SyncError::new(SyncErrorCode::Config, e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            retry: RetryPolicy::default(),
            token: token.to_string(),
            client,
        })
    }

    pub fn from_config(config: &SyncConfig) -> Result<Self, SyncError> {
        Ok(Self::new(&config.api_base_url, &config.api_token, config.http_timeout)?
            .with_retry(config.retry.clone()))
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn get_with_retry(&self, path: &str) -> Result<Vec<u8>, SyncError> {
        let url = format!("{}{path}", self.base_url);
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 0usize;
        loop {
            attempt += 1;
            let request = self
                .client
                .get(&url)
                .bearer_auth(&self.token)
                .header(ACCEPT, "application/json");
            let transient = match request.send() {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        debug!(path, status = status.as_u16(), attempt, "api response");
                        return resp
                            .bytes()
                            .map(|b| b.to_vec())
                            .map_err(|e| SyncError::new(SyncErrorCode::Network, e.to_string()));
                    }
                    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                        return Err(SyncError::new(
                            SyncErrorCode::Auth,
                            format!("GET {path} rejected the credential: {status}"),
                        ));
                    }
                    let err = SyncError::new(
                        SyncErrorCode::Network,
                        format!("GET {path} failed: {status}"),
                    );
                    if status != StatusCode::TOO_MANY_REQUESTS && !status.is_server_error() {
                        return Err(err);
                    }
                    err
                }
                Err(e) => SyncError::new(SyncErrorCode::Network, format!("GET {path}: {e}")),
            };
            if attempt >= max_attempts {
                return Err(transient);
            }
            let delay = self.retry.delay_for_attempt(attempt);
            warn!(
                path,
                attempt,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %transient,
                "transient api failure; retrying"
            );
            thread::sleep(delay);
        }
    }
}

impl ProductApi for HttpProductApi {
    fn list_products(&self) -> Result<Vec<ProductSummary>, SyncError> {
        let body = self.get_with_retry(PRODUCTS_PATH)?;
        parse_product_list(&body)
    }

    fn product_detail(&self, id: &ExternalProductId) -> Result<ProductDetail, SyncError> {
        let body = self.get_with_retry(&format!("{PRODUCTS_PATH}/{id}"))?;
        parse_product_detail(&body)
    }
}
