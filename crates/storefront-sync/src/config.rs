// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;
use std::time::Duration;

use storefront_core::env_non_empty;
use storefront_store::DEFAULT_CATALOG_FILE;

use crate::pipeline::FailurePolicy;
use crate::retry::RetryPolicy;
use crate::{SyncError, SyncErrorCode};

pub const ENV_API_TOKEN: &str = "SHOPIER_API_TOKEN";
pub const ENV_API_BASE_URL: &str = "SHOPIER_API_BASE_URL";
pub const ENV_CATALOG_PATH: &str = "STOREFRONT_CATALOG_PATH";
pub const ENV_PURCHASE_URL_BASE: &str = "STOREFRONT_PURCHASE_URL_BASE";
pub const ENV_SYNC_PACING_MS: &str = "STOREFRONT_SYNC_PACING_MS";
pub const ENV_HTTP_TIMEOUT_MS: &str = "STOREFRONT_HTTP_TIMEOUT_MS";
pub const ENV_RETRY_MAX_ATTEMPTS: &str = "STOREFRONT_RETRY_MAX_ATTEMPTS";
pub const ENV_RETRY_BASE_BACKOFF_MS: &str = "STOREFRONT_RETRY_BASE_BACKOFF_MS";
pub const ENV_ON_ITEM_ERROR: &str = "STOREFRONT_ON_ITEM_ERROR";
pub const ENV_SYNC_DEADLINE_SECS: &str = "STOREFRONT_SYNC_DEADLINE_SECS";

pub const DEFAULT_API_BASE_URL: &str = "https://api.shopier.com";
pub const DEFAULT_PURCHASE_URL_BASE: &str = "https://www.shopier.com/alnigamestudios";
pub const DEFAULT_PACING_MS: u64 = 500;
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 15_000;

/// Everything a sync run needs, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub api_token: String,
    pub api_base_url: String,
    pub catalog_path: PathBuf,
    pub purchase_url_base: String,
    pub pacing: Duration,
    pub http_timeout: Duration,
    pub retry: RetryPolicy,
    pub failure_policy: FailurePolicy,
    pub deadline: Option<Duration>,
}

impl SyncConfig {
    /// Reads the process environment.
    ///
    /// A missing credential is a `Config` error; nothing else is touched
    /// before that check.
    pub fn from_env() -> Result<Self, SyncError> {
        Self::from_lookup(env_non_empty)
    }

    /// Resolves configuration through `lookup`, which must return trimmed,
    /// non-empty values only.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SyncError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_token = lookup(ENV_API_TOKEN).ok_or_else(|| {
            SyncError::new(
                SyncErrorCode::Config,
                format!("{ENV_API_TOKEN} is not set"),
            )
        })?;
        let number = |name: &str, default: u64| {
            lookup(name)
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(default)
        };

        let failure_policy = match lookup(ENV_ON_ITEM_ERROR) {
            Some(raw) => FailurePolicy::parse(&raw).ok_or_else(|| {
                SyncError::new(
                    SyncErrorCode::Config,
                    format!("{ENV_ON_ITEM_ERROR} must be `abort` or `skip`, got `{raw}`"),
                )
            })?,
            None => FailurePolicy::default(),
        };
        let defaults = RetryPolicy::default();
        let max_attempts = number(ENV_RETRY_MAX_ATTEMPTS, defaults.max_attempts as u64);

        Ok(Self {
            api_token,
            api_base_url: lookup(ENV_API_BASE_URL)
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            catalog_path: lookup(ENV_CATALOG_PATH)
                .map_or_else(|| PathBuf::from(DEFAULT_CATALOG_FILE), PathBuf::from),
            purchase_url_base: lookup(ENV_PURCHASE_URL_BASE)
                .unwrap_or_else(|| DEFAULT_PURCHASE_URL_BASE.to_string()),
            pacing: Duration::from_millis(number(ENV_SYNC_PACING_MS, DEFAULT_PACING_MS)),
            http_timeout: Duration::from_millis(number(
                ENV_HTTP_TIMEOUT_MS,
                DEFAULT_HTTP_TIMEOUT_MS,
            )),
            retry: RetryPolicy {
                max_attempts: usize::try_from(max_attempts.max(1)).unwrap_or(1),
                base_backoff_ms: number(ENV_RETRY_BASE_BACKOFF_MS, defaults.base_backoff_ms),
            },
            failure_policy,
            deadline: lookup(ENV_SYNC_DEADLINE_SECS)
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs),
        })
    }
}
