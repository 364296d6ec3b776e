// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::category::{Category, CategoryId};
use crate::product::{ExternalProductId, Product};
use crate::ValidationError;

/// Label shown for a product whose category is not in the category set.
pub const FALLBACK_CATEGORY_LABEL: &str = "Dijital Ürün";

/// The Catalog Store contents: products and categories, both ordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
}

/// Grid filter; `All` is selected by the `all` pseudo-category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(CategoryId),
}

impl CategoryFilter {
    #[must_use]
    pub fn from_id(id: &CategoryId) -> Self {
        if id.is_all() {
            Self::All
        } else {
            Self::Only(id.clone())
        }
    }

    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Only(id) => &product.category == id,
        }
    }
}

impl Catalog {
    #[must_use]
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self {
            products,
            categories,
        }
    }

    /// Checks the store-level invariants.
    ///
    /// Unresolved product categories are tolerated here; see
    /// [`Catalog::unresolved_categories`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut category_ids = BTreeSet::new();
        for category in &self.categories {
            if !category_ids.insert(&category.id) {
                return Err(ValidationError(format!(
                    "duplicate category id `{}`",
                    category.id
                )));
            }
            if category.name.trim().is_empty() {
                return Err(ValidationError(format!(
                    "category `{}` must have a display name",
                    category.id
                )));
            }
        }

        let mut external_ids = BTreeSet::new();
        for (index, product) in self.products.iter().enumerate() {
            product.validate()?;
            let expected = index as u64 + 1;
            if u64::from(product.id) != expected {
                return Err(ValidationError(format!(
                    "product ids must be sequential from 1: position {expected} has id {}",
                    product.id
                )));
            }
            if !external_ids.insert(&product.external_product_id) {
                return Err(ValidationError(format!(
                    "duplicate external product id `{}`",
                    product.external_product_id
                )));
            }
        }
        Ok(())
    }

    /// Products whose category does not resolve, as `(id, category)`.
    #[must_use]
    pub fn unresolved_categories(&self) -> Vec<(u32, CategoryId)> {
        self.products
            .iter()
            .filter(|p| self.category(&p.category).is_none())
            .map(|p| (p.id, p.category.clone()))
            .collect()
    }

    #[must_use]
    pub fn product(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    /// Display name for `id`, or [`FALLBACK_CATEGORY_LABEL`] when unknown.
    #[must_use]
    pub fn category_label(&self, id: &CategoryId) -> &str {
        self.category(id)
            .map_or(FALLBACK_CATEGORY_LABEL, |c| c.name.as_str())
    }

    #[must_use]
    pub fn index_by_external_id(&self) -> BTreeMap<&ExternalProductId, &Product> {
        let mut index = BTreeMap::new();
        for product in &self.products {
            index.entry(&product.external_product_id).or_insert(product);
        }
        index
    }

    pub fn filtered<'a>(&'a self, filter: &'a CategoryFilter) -> impl Iterator<Item = &'a Product> {
        self.products.iter().filter(move |p| filter.matches(p))
    }
}
