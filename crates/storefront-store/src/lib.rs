// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod backend;
mod codec;
mod paths;

pub use backend::{
    publish_catalog, CatalogStore, LocalFsStore, PublishLockGuard, StoreError, StoreErrorCode,
};
pub use codec::{
    parse_catalog, parse_previous_catalog, serialize_catalog, CATEGORIES_BINDING, PRODUCTS_BINDING,
};
pub use paths::{lock_path_for, tmp_path_for, DEFAULT_CATALOG_FILE};

pub const CRATE_NAME: &str = "storefront-store";
