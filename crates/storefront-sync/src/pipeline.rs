// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;
use std::thread;
use std::time::{Duration, Instant};

use storefront_model::{default_categories, Catalog, ExternalProductId, Product};
use tracing::{info, warn};

use crate::api::{ProductApi, ProductSummary};
use crate::config::{SyncConfig, DEFAULT_PACING_MS, DEFAULT_PURCHASE_URL_BASE};
use crate::logging::{fields, SyncLog, SyncStage};
use crate::merge::merge_record;
use crate::{SyncError, SyncErrorCode};

/// What to do when one product's detail fetch fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Fail the whole run; nothing is written.
    #[default]
    Abort,
    /// Drop the item, carrying its previous record forward when one exists.
    Skip,
}

impl FailurePolicy {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "abort" => Some(Self::Abort),
            "skip" => Some(Self::Skip),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Abort => "abort",
            Self::Skip => "skip",
        }
    }
}

/// Waits between successive detail fetches.
pub trait Pacer {
    fn pause(&mut self, delay: Duration);
}

/// Sleeps the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, delay: Duration) {
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    pub purchase_url_base: String,
    pub pacing: Duration,
    pub failure_policy: FailurePolicy,
    pub deadline: Option<Duration>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            purchase_url_base: DEFAULT_PURCHASE_URL_BASE.to_string(),
            pacing: Duration::from_millis(DEFAULT_PACING_MS),
            failure_policy: FailurePolicy::Abort,
            deadline: None,
        }
    }
}

impl SyncOptions {
    #[must_use]
    pub fn from_config(config: &SyncConfig) -> Self {
        Self {
            purchase_url_base: config.purchase_url_base.clone(),
            pacing: config.pacing,
            failure_policy: config.failure_policy,
            deadline: config.deadline,
        }
    }
}

/// A product whose detail fetch failed under [`FailurePolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    pub external_id: ExternalProductId,
    pub code: SyncErrorCode,
    pub message: String,
    pub carried_forward: bool,
}

#[derive(Debug, Clone)]
pub struct SyncOutcome {
    pub catalog: Catalog,
    pub skipped: Vec<SkippedItem>,
    pub log: SyncLog,
}

/// Reconciles `previous` against the external listing.
///
/// Detail fetches are strictly sequential with `options.pacing` between
/// them. Nothing is persisted here; the caller publishes the returned
/// catalog only when this returns `Ok`.
pub fn run_sync(
    api: &dyn ProductApi,
    previous: Option<&Catalog>,
    options: &SyncOptions,
    pacer: &mut dyn Pacer,
) -> Result<SyncOutcome, SyncError> {
    let started = Instant::now();
    let mut log = SyncLog::default();
    let previous_index = previous.map(Catalog::index_by_external_id).unwrap_or_default();
    log.emit(
        SyncStage::Prepare,
        "run_started",
        fields([
            (
                "previous_products",
                previous.map_or_else(|| "absent".to_string(), |c| c.products.len().to_string()),
            ),
            ("failure_policy", options.failure_policy.as_str().to_string()),
        ]),
    );

    let listing = api.list_products()?;
    let listing = dedupe_listing(listing, &mut log);
    info!(count = listing.len(), "product listing fetched");
    log.emit(
        SyncStage::List,
        "listing_fetched",
        fields([("count", listing.len().to_string())]),
    );

    let total = listing.len();
    let mut products: Vec<Product> = Vec::with_capacity(total);
    let mut skipped = Vec::new();

    for (position, summary) in listing.iter().enumerate() {
        if position > 0 {
            pacer.pause(options.pacing);
        }
        if let Some(budget) = options.deadline {
            if started.elapsed() >= budget {
                return Err(SyncError::new(
                    SyncErrorCode::Deadline,
                    format!(
                        "sync budget of {}s spent after {position} of {total} products",
                        budget.as_secs()
                    ),
                ));
            }
        }

        let previous_record = previous_index.get(&summary.external_id).copied();
        info!(
            index = position + 1,
            total,
            external_id = %summary.external_id,
            title = summary.title.as_deref().unwrap_or(""),
            "fetching product detail"
        );
        let detail = match api.product_detail(&summary.external_id) {
            Ok(detail) => detail,
            Err(err)
                if options.failure_policy == FailurePolicy::Skip
                    && err.code != SyncErrorCode::Auth =>
            {
                let carried_forward = previous_record.is_some();
                warn!(
                    external_id = %summary.external_id,
                    error = %err,
                    carried_forward,
                    "product detail failed; skipping"
                );
                log.emit(
                    SyncStage::Fetch,
                    "item_skipped",
                    fields([
                        ("external_id", summary.external_id.to_string()),
                        ("code", err.code.as_str().to_string()),
                        ("carried_forward", carried_forward.to_string()),
                    ]),
                );
                if let Some(prior) = previous_record {
                    let mut carried = prior.clone();
                    carried.id = u32::try_from(products.len() + 1).unwrap_or(u32::MAX);
                    products.push(carried);
                }
                skipped.push(SkippedItem {
                    external_id: summary.external_id.clone(),
                    code: err.code,
                    message: err.message,
                    carried_forward,
                });
                continue;
            }
            Err(err) => {
                return Err(SyncError::new(
                    err.code,
                    format!("product {}: {}", summary.external_id, err.message),
                ))
            }
        };
        log.emit(
            SyncStage::Fetch,
            "detail_fetched",
            fields([("external_id", summary.external_id.to_string())]),
        );

        let record = merge_record(
            products.len(),
            summary,
            &detail,
            previous_record,
            &options.purchase_url_base,
        );
        log.emit(
            SyncStage::Merge,
            "record_merged",
            fields([
                ("external_id", record.external_product_id.to_string()),
                ("id", record.id.to_string()),
                ("curated", previous_record.is_some().to_string()),
            ]),
        );
        products.push(record);
    }

    Ok(SyncOutcome {
        catalog: Catalog::new(products, default_categories()),
        skipped,
        log,
    })
}

fn dedupe_listing(listing: Vec<ProductSummary>, log: &mut SyncLog) -> Vec<ProductSummary> {
    let mut seen = BTreeSet::new();
    let mut unique = Vec::with_capacity(listing.len());
    for summary in listing {
        if seen.insert(summary.external_id.clone()) {
            unique.push(summary);
        } else {
            warn!(external_id = %summary.external_id, "duplicate listing entry dropped");
            log.emit(
                SyncStage::List,
                "duplicate_dropped",
                fields([("external_id", summary.external_id.to_string())]),
            );
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::FailurePolicy;

    #[test]
    fn failure_policy_parses_case_insensitively() {
        assert_eq!(FailurePolicy::parse("SKIP"), Some(FailurePolicy::Skip));
        assert_eq!(FailurePolicy::parse(" abort "), Some(FailurePolicy::Abort));
        assert_eq!(FailurePolicy::parse("retry"), None);
    }
}
