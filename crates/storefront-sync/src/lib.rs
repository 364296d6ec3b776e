// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Catalog sync pipeline.
//!
//! Fetches the external product listing and per-product details, merges
//! them with curated fields from the previous Catalog Store and publishes
//! the result as one atomic replacement.

mod api;
mod classify;
mod config;
mod error;
mod http;
mod image;
mod logging;
mod merge;
mod pipeline;
mod retry;

use storefront_store::{publish_catalog, CatalogStore};
use tracing::info;

pub use api::{parse_product_detail, parse_product_list, ProductApi, ProductDetail, ProductSummary};
pub use classify::{classify_badge, classify_category, CategoryRule, BADGE_RULES, CATEGORY_RULES};
pub use config::{
    SyncConfig, DEFAULT_API_BASE_URL, DEFAULT_PURCHASE_URL_BASE, ENV_API_BASE_URL, ENV_API_TOKEN,
    ENV_CATALOG_PATH, ENV_HTTP_TIMEOUT_MS, ENV_ON_ITEM_ERROR, ENV_PURCHASE_URL_BASE,
    ENV_RETRY_BASE_BACKOFF_MS, ENV_RETRY_MAX_ATTEMPTS, ENV_SYNC_DEADLINE_SECS, ENV_SYNC_PACING_MS,
};
pub use error::{SyncError, SyncErrorCode};
pub use http::HttpProductApi;
pub use image::extract_image_url;
pub use logging::{SyncEvent, SyncLog, SyncStage};
pub use merge::{merge_record, DEFAULT_FULL_DESCRIPTION, UNNAMED_PRODUCT};
pub use pipeline::{
    run_sync, FailurePolicy, Pacer, SkippedItem, SyncOptions, SyncOutcome, ThreadPacer,
};
pub use retry::{BackoffPolicy, RetryPolicy, MAX_BACKOFF_MS};

pub const CRATE_NAME: &str = "storefront-sync";

/// Loads the previous store, runs the pipeline and publishes the result.
///
/// The store is untouched unless every step before publishing succeeds.
pub fn sync_catalog_file<S: CatalogStore + ?Sized>(
    store: &S,
    api: &dyn ProductApi,
    options: &SyncOptions,
    pacer: &mut dyn Pacer,
    generated_at: &str,
) -> Result<SyncOutcome, SyncError> {
    let previous = store.load_previous()?;
    let mut outcome = pipeline::run_sync(api, previous.as_ref(), options, pacer)?;

    let digest = publish_catalog(store, &outcome.catalog, generated_at)?;
    outcome.log.emit(
        SyncStage::Persist,
        "store_published",
        logging::fields([
            ("sha256", digest.clone()),
            ("generated_at", generated_at.to_string()),
        ]),
    );
    let products = outcome.catalog.products.len();
    let skipped = outcome.skipped.len();
    info!(products, skipped, sha256 = %digest, "catalog sync complete");
    outcome.log.emit(
        SyncStage::Finalize,
        "sync_complete",
        logging::fields([
            ("products", products.to_string()),
            ("skipped", skipped.to_string()),
        ]),
    );
    Ok(outcome)
}
