// SPDX-License-Identifier: Apache-2.0

use storefront_model::{purchase_url, Product, DEFAULT_DELIVERY_TYPE};

use crate::api::{ProductDetail, ProductSummary};
use crate::classify::{classify_badge, classify_category};
use crate::image::extract_image_url;

pub const UNNAMED_PRODUCT: &str = "İsimsiz Ürün";
pub const DEFAULT_FULL_DESCRIPTION: &str = "Dijital ürün - Sipariş notuna isteklerinizi yazınız.";
const SHORT_DESCRIPTION_CHARS: usize = 60;

fn curated(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).cloned()
}

/// Builds the record at `index` from fresh API data and the previous
/// record with the same external id, if any.
///
/// Price, stock, name and a discovered image always come from the API.
/// Category, badge, descriptions and delivery type come from `previous`
/// when curated there, otherwise from classification and defaults.
#[must_use]
pub fn merge_record(
    index: usize,
    summary: &ProductSummary,
    detail: &ProductDetail,
    previous: Option<&Product>,
    purchase_url_base: &str,
) -> Product {
    let name = detail
        .title
        .clone()
        .or_else(|| summary.title.clone().filter(|t| !t.trim().is_empty()))
        .unwrap_or_else(|| UNNAMED_PRODUCT.to_string());

    let category = previous.map_or_else(|| classify_category(&name), |p| p.category.clone());
    let badge = previous
        .and_then(|p| p.badge)
        .or_else(|| classify_badge(&name));
    let description = curated(previous.map(|p| &p.description)).unwrap_or_else(|| {
        let short: String = name.chars().take(SHORT_DESCRIPTION_CHARS).collect();
        format!("{short}...")
    });
    let full_description = curated(previous.map(|p| &p.full_description))
        .or_else(|| detail.description.clone())
        .unwrap_or_else(|| DEFAULT_FULL_DESCRIPTION.to_string());
    let image = extract_image_url(&detail.raw)
        .or_else(|| curated(previous.map(|p| &p.image)))
        .unwrap_or_default();
    let delivery_type = curated(previous.map(|p| &p.delivery_type))
        .unwrap_or_else(|| DEFAULT_DELIVERY_TYPE.to_string());

    Product {
        id: u32::try_from(index + 1).unwrap_or(u32::MAX),
        external_product_id: summary.external_id.clone(),
        name,
        price: detail.price,
        category,
        purchase_url: purchase_url(purchase_url_base, &summary.external_id),
        badge,
        description,
        full_description,
        in_stock: detail.in_stock,
        image,
        delivery_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use storefront_model::{Badge, CategoryId, ExternalProductId};

    const BASE: &str = "https://www.shopier.com/alnigamestudios";

    fn summary(id: &str, title: Option<&str>) -> ProductSummary {
        ProductSummary {
            external_id: ExternalProductId::parse(id).expect("id"),
            title: title.map(str::to_string),
        }
    }

    fn detail(title: Option<&str>, raw: serde_json::Value) -> ProductDetail {
        ProductDetail {
            title: title.map(str::to_string),
            description: Some("API açıklaması".to_string()),
            price: 120.0,
            in_stock: true,
            raw,
        }
    }

    #[test]
    fn fresh_record_is_classified() {
        let p = merge_record(
            0,
            &summary("9", Some("Liste adı")),
            &detail(Some("Netflix Temalı Davetiye"), json!({})),
            None,
            BASE,
        );
        assert_eq!(p.id, 1);
        assert_eq!(p.name, "Netflix Temalı Davetiye");
        assert_eq!(p.category.as_str(), "tema");
        assert_eq!(p.badge, Some(Badge::Premium));
        assert_eq!(p.description, "Netflix Temalı Davetiye...");
        assert_eq!(p.full_description, "API açıklaması");
        assert_eq!(p.purchase_url, format!("{BASE}/9"));
        assert_eq!(p.image, "");
        assert_eq!(p.delivery_type, DEFAULT_DELIVERY_TYPE);
    }

    #[test]
    fn name_falls_back_to_listing_then_placeholder() {
        let p = merge_record(3, &summary("9", Some("Kasa")), &detail(None, json!({})), None, BASE);
        assert_eq!(p.id, 4);
        assert_eq!(p.name, "Kasa");
        assert_eq!(p.category.as_str(), "surpriz");

        let p = merge_record(0, &summary("9", None), &detail(None, json!({})), None, BASE);
        assert_eq!(p.name, UNNAMED_PRODUCT);
    }

    #[test]
    fn short_description_counts_characters() {
        let title = "ü".repeat(80);
        let p = merge_record(0, &summary("1", None), &detail(Some(&title), json!({})), None, BASE);
        assert_eq!(p.description.chars().count(), 63);
        assert!(p.description.ends_with("..."));
    }

    #[test]
    fn curated_fields_survive_and_fresh_fields_win() {
        let previous = merge_record(
            0,
            &summary("42", None),
            &detail(
                Some("Eski ad"),
                json!({"img": "https://cdn.shopier.app/pictures_large/old.png"}),
            ),
            None,
            BASE,
        );
        let mut previous = previous;
        previous.category = CategoryId::parse("romantik").expect("category");
        previous.badge = Some(Badge::Pro);
        previous.description = "Elle yazılmış".to_string();
        previous.delivery_type = "E-posta ile".to_string();
        previous.price = 10.0;

        let mut fresh = detail(Some("Timeline Yeni Ad"), json!({}));
        fresh.price = 199.0;
        fresh.in_stock = false;
        let p = merge_record(5, &summary("42", None), &fresh, Some(&previous), BASE);

        assert_eq!(p.id, 6);
        assert_eq!(p.name, "Timeline Yeni Ad");
        assert_eq!(p.category.as_str(), "romantik");
        assert_eq!(p.badge, Some(Badge::Pro));
        assert_eq!(p.description, "Elle yazılmış");
        assert_eq!(p.delivery_type, "E-posta ile");
        assert_eq!(p.image, "https://cdn.shopier.app/pictures_large/old.png");
        assert!((p.price - 199.0).abs() < f64::EPSILON);
        assert!(!p.in_stock);
    }

    #[test]
    fn empty_curated_text_counts_as_absent() {
        let mut previous = merge_record(
            0,
            &summary("5", None),
            &detail(Some("Gül Buketi"), json!({})),
            None,
            BASE,
        );
        previous.badge = None;
        previous.description = String::new();
        previous.full_description = "  ".to_string();

        let p = merge_record(
            0,
            &summary("5", None),
            &detail(Some("Sihir Kutusu"), json!({})),
            Some(&previous),
            BASE,
        );
        assert_eq!(p.category.as_str(), "romantik");
        assert_eq!(p.badge, Some(Badge::Magic));
        assert_eq!(p.description, "Sihir Kutusu...");
        assert_eq!(p.full_description, "API açıklaması");
    }
}
