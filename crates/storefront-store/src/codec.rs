// SPDX-License-Identifier: Apache-2.0

//! Catalog Store file format.
//!
//! The store is a static JavaScript data module declaring two constants,
//! `products` and `categories`, each holding one pretty-printed JSON array.
//! A page can include it with a plain `<script>` tag; we read it back by
//! locating each binding and decoding exactly one JSON value after it.

use serde::de::DeserializeOwned;
use serde_json::Value;
use storefront_core::canonical::pretty_json_bytes;
use storefront_model::{Catalog, Category, CategoryId, Product, DEFAULT_CATEGORY_ID};

use crate::backend::{StoreError, StoreErrorCode};

pub const PRODUCTS_BINDING: &str = "products";
pub const CATEGORIES_BINDING: &str = "categories";

const HEADER: &str = "// Catalog data generated by storefront sync";
const CURATION_NOTE: &str =
    "// Do not edit product prices or stock by hand; curated fields survive the next sync.";

/// Serializes `catalog` into the data-module format.
///
/// Output depends only on the arguments, so equal inputs give equal bytes.
pub fn serialize_catalog(catalog: &Catalog, generated_at: &str) -> Result<Vec<u8>, StoreError> {
    let products = pretty_json_bytes(&catalog.products)
        .map_err(|e| StoreError::new(StoreErrorCode::Internal, e.to_string()))?;
    let categories = pretty_json_bytes(&catalog.categories)
        .map_err(|e| StoreError::new(StoreErrorCode::Internal, e.to_string()))?;
    let stamp: String = generated_at
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    let mut out = Vec::with_capacity(products.len() + categories.len() + 256);
    out.extend_from_slice(HEADER.as_bytes());
    out.push(b'\n');
    out.extend_from_slice(format!("// Generated at: {stamp}\n").as_bytes());
    out.extend_from_slice(CURATION_NOTE.as_bytes());
    out.extend_from_slice(b"\n\n");
    out.extend_from_slice(format!("const {PRODUCTS_BINDING} = ").as_bytes());
    out.extend_from_slice(&products);
    out.extend_from_slice(b";\n\n// Category definitions\n");
    out.extend_from_slice(format!("const {CATEGORIES_BINDING} = ").as_bytes());
    out.extend_from_slice(&categories);
    out.extend_from_slice(b";\n");
    Ok(out)
}

/// Parses a Catalog Store.
///
/// Accepts the data-module format and, for hand-made fixtures, a bare
/// `{"products": [...], "categories": [...]}` JSON object.
pub fn parse_catalog(text: &str) -> Result<Catalog, StoreError> {
    if text.trim_start().starts_with('{') {
        return serde_json::from_str::<Catalog>(text.trim())
            .map_err(|e| StoreError::new(StoreErrorCode::Validation, e.to_string()));
    }
    let products: Vec<Product> = parse_binding(text, PRODUCTS_BINDING)?;
    let categories: Vec<Category> = parse_binding(text, CATEGORIES_BINDING)?;
    Ok(Catalog::new(products, categories))
}

/// Parses a hand-curated store as the merge input of the next sync.
///
/// Product ids are not checked since the sync renumbers them. A product
/// category that is not a valid id falls back to the default category, and
/// category records that do not decode are dropped; the sync rewrites the
/// category set. Products that do not decode at all are still an error.
pub fn parse_previous_catalog(text: &str) -> Result<Catalog, StoreError> {
    let (products, categories): (Vec<Value>, Vec<Value>) = if text.trim_start().starts_with('{') {
        let mut doc: Value = serde_json::from_str(text.trim())
            .map_err(|e| StoreError::new(StoreErrorCode::Validation, e.to_string()))?;
        let products = take_array(&mut doc, PRODUCTS_BINDING).ok_or_else(|| {
            StoreError::new(
                StoreErrorCode::Validation,
                format!("catalog store has no `{PRODUCTS_BINDING}` array"),
            )
        })?;
        (products, take_array(&mut doc, CATEGORIES_BINDING).unwrap_or_default())
    } else {
        (
            parse_binding(text, PRODUCTS_BINDING)?,
            parse_binding(text, CATEGORIES_BINDING).unwrap_or_default(),
        )
    };

    let products = products
        .into_iter()
        .enumerate()
        .map(|(position, raw)| lenient_product(position, raw))
        .collect::<Result<Vec<_>, _>>()?;
    let categories = categories
        .into_iter()
        .filter_map(|raw| serde_json::from_value::<Category>(raw).ok())
        .collect();
    Ok(Catalog::new(products, categories))
}

fn take_array(doc: &mut Value, key: &str) -> Option<Vec<Value>> {
    match doc.get_mut(key).map(Value::take) {
        Some(Value::Array(items)) => Some(items),
        _ => None,
    }
}

fn lenient_product(position: usize, mut raw: Value) -> Result<Product, StoreError> {
    if let Some(fields) = raw.as_object_mut() {
        let valid = fields
            .get("category")
            .and_then(Value::as_str)
            .is_some_and(|id| CategoryId::parse(id).is_ok());
        if !valid {
            fields.insert(
                "category".to_string(),
                Value::String(DEFAULT_CATEGORY_ID.to_string()),
            );
        }
    }
    serde_json::from_value(raw).map_err(|e| {
        StoreError::new(
            StoreErrorCode::Validation,
            format!("`{PRODUCTS_BINDING}`[{position}]: {e}"),
        )
    })
}

fn parse_binding<T: DeserializeOwned>(text: &str, name: &str) -> Result<T, StoreError> {
    let rest = locate_binding(text, name).ok_or_else(|| {
        StoreError::new(
            StoreErrorCode::Validation,
            format!("catalog store has no `const {name} =` declaration"),
        )
    })?;
    serde_json::Deserializer::from_str(rest)
        .into_iter::<T>()
        .next()
        .ok_or_else(|| {
            StoreError::new(
                StoreErrorCode::Validation,
                format!("`{name}` declaration has no value"),
            )
        })?
        .map_err(|e| StoreError::new(StoreErrorCode::Validation, format!("`{name}`: {e}")))
}

/// Returns the text right after `const <name> =` on a declaration line.
fn locate_binding<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let indent = line.len() - line.trim_start().len();
        let after_kw = line.trim_start().strip_prefix("const ");
        if let Some(after_kw) = after_kw {
            if let Some(after_name) = after_kw.trim_start().strip_prefix(name) {
                let after_eq = after_name.trim_start();
                if let Some(value) = after_eq.strip_prefix('=') {
                    let start = offset + indent + (line.trim_start().len() - value.len());
                    return text.get(start..);
                }
            }
        }
        offset += line.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{locate_binding, parse_previous_catalog};

    #[test]
    fn binding_lookup_skips_similar_names() {
        let text = "// const products = nope\nconst productsOld = [1];\nconst products = [2];\n";
        let rest = locate_binding(text, "products").expect("binding");
        assert!(rest.trim_start().starts_with("[2]"), "{rest}");
    }

    #[test]
    fn previous_catalog_tolerates_curation_drift() {
        let text = r#"const products = [
    {"id": 4, "externalProductId": "9", "name": "Kupa", "price": 5, "category": "Özel Gün",
     "purchaseUrl": "https://shop.example/9", "inStock": true}
];
const categories = [{"id": "Özel Gün", "name": "x", "icon": "y"}];
"#;
        let catalog = parse_previous_catalog(text).expect("lenient parse");
        assert_eq!(catalog.products[0].id, 4);
        assert_eq!(catalog.products[0].category.as_str(), "sevgililer");
        assert!(catalog.categories.is_empty());
    }

    #[test]
    fn binding_lookup_returns_none_when_missing() {
        assert!(locate_binding("const categories = [];", "products").is_none());
    }
}
