// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use storefront_core::env_non_empty;
use storefront_store::DEFAULT_CATALOG_FILE;
use storefront_sync::ENV_CATALOG_PATH;

use crate::OutputMode;

pub(crate) fn emit_ok(output_mode: OutputMode, payload: &Value) -> Result<(), String> {
    if output_mode.json {
        println!(
            "{}",
            serde_json::to_string(payload).map_err(|e| e.to_string())?
        );
    } else {
        println!(
            "{}",
            serde_json::to_string_pretty(payload).map_err(|e| e.to_string())?
        );
    }
    Ok(())
}

/// Explicit path, else `STOREFRONT_CATALOG_PATH`, else `products.js`.
pub(crate) fn resolve_catalog_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| env_non_empty(ENV_CATALOG_PATH).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_FILE))
}

/// Generation stamp written into the Catalog Store header.
pub(crate) fn generated_at_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
