// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Catalog Store model.
//!
//! The same types are read by the sync pipeline (to carry curated fields
//! forward) and by the presentation layer (to render the storefront).

mod catalog;
mod category;
mod product;
mod serde_helpers;

use std::fmt::{Display, Formatter};

pub use catalog::{Catalog, CategoryFilter, FALLBACK_CATEGORY_LABEL};
pub use category::{
    default_categories, Category, CategoryId, ALL_CATEGORY_ID, CATEGORY_ID_MAX_LEN,
    DEFAULT_CATEGORY_ID,
};
pub use product::{
    purchase_url, Badge, ExternalProductId, Product, DEFAULT_DELIVERY_TYPE,
    EXTERNAL_ID_MAX_LEN,
};

pub const CRATE_NAME: &str = "storefront-model";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}
