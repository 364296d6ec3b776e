// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::PathBuf;

use serde_json::json;
use storefront_core::canonical::stable_json_hash_hex;
use storefront_render::render_initial_page;
use storefront_store::{CatalogStore, LocalFsStore};
use storefront_sync::{sync_catalog_file, HttpProductApi, SyncConfig, SyncOptions, ThreadPacer};
use tracing::{info, warn};

use crate::helpers::{emit_ok, generated_at_now, resolve_catalog_path};
use crate::{CliError, OutputMode};

pub(crate) fn run_sync(output_mode: OutputMode) -> Result<(), CliError> {
    let config = SyncConfig::from_env()?;
    let store = LocalFsStore::new(config.catalog_path.clone());
    let api = HttpProductApi::from_config(&config)?;
    let options = SyncOptions::from_config(&config);
    info!(
        path = %config.catalog_path.display(),
        api = %config.api_base_url,
        policy = options.failure_policy.as_str(),
        "starting catalog sync"
    );

    let outcome = sync_catalog_file(&store, &api, &options, &mut ThreadPacer, &generated_at_now())
        .map_err(|e| CliError::from(e).at_path(&config.catalog_path))?;
    for item in &outcome.skipped {
        warn!(
            external_id = %item.external_id,
            code = item.code.as_str(),
            carried_forward = item.carried_forward,
            "product skipped"
        );
    }

    emit_ok(
        output_mode,
        &json!({
            "command": "sync",
            "status": "ok",
            "products": outcome.catalog.products.len(),
            "skipped": outcome.skipped.len(),
            "path": config.catalog_path,
        }),
    )
    .map_err(CliError::internal)
}

pub(crate) fn run_validate(path: Option<PathBuf>, output_mode: OutputMode) -> Result<(), CliError> {
    let path = resolve_catalog_path(path);
    let store = LocalFsStore::new(path.clone());
    let catalog = store
        .load()
        .map_err(|e| CliError::from(e).at_path(&path))?
        .ok_or_else(|| {
            CliError::failure("not_found", "catalog store does not exist").at_path(&path)
        })?;

    let warnings: Vec<String> = catalog
        .unresolved_categories()
        .into_iter()
        .map(|(id, category)| format!("product {id} has unknown category `{category}`"))
        .collect();
    for warning in &warnings {
        warn!(path = %path.display(), "{warning}");
    }
    let content_sha256 = stable_json_hash_hex(&catalog)
        .map_err(|e| CliError::internal(e.to_string()))?;

    emit_ok(
        output_mode,
        &json!({
            "command": "validate",
            "status": "ok",
            "path": path,
            "products": catalog.products.len(),
            "categories": catalog.categories.len(),
            "warnings": warnings,
            "content_sha256": content_sha256,
        }),
    )
    .map_err(CliError::internal)
}

pub(crate) fn run_render(
    catalog: Option<PathBuf>,
    out: PathBuf,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let path = resolve_catalog_path(catalog);
    let catalog = LocalFsStore::new(path.clone())
        .load()
        .map_err(|e| CliError::from(e).at_path(&path))?
        .ok_or_else(|| {
            CliError::failure("not_found", "catalog store does not exist").at_path(&path)
        })?;

    let html = render_initial_page(&catalog);
    fs::write(&out, html.as_bytes())
        .map_err(|e| CliError::failure("io_error", &e.to_string()).at_path(&out))?;

    emit_ok(
        output_mode,
        &json!({
            "command": "render",
            "status": "ok",
            "catalog": path,
            "out": out,
            "products": catalog.products.len(),
        }),
    )
    .map_err(CliError::internal)
}
