// SPDX-License-Identifier: Apache-2.0

//! External Product API contract.
//!
//! [`ProductApi`] is the seam between the pipeline and the network: the
//! HTTP client implements it, and tests substitute in-memory fakes.

use serde::Deserialize;
use serde_json::Value;
use storefront_model::ExternalProductId;

use crate::{SyncError, SyncErrorCode};

const OUT_OF_STOCK: &str = "outOfStock";

/// One entry of the product listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductSummary {
    #[serde(rename = "id")]
    pub external_id: ExternalProductId,
    #[serde(default)]
    pub title: Option<String>,
}

/// The fields of a product detail response the pipeline consumes.
///
/// `raw` keeps the whole payload for image discovery.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetail {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: f64,
    pub in_stock: bool,
    pub raw: Value,
}

pub trait ProductApi {
    fn list_products(&self) -> Result<Vec<ProductSummary>, SyncError>;

    fn product_detail(&self, id: &ExternalProductId) -> Result<ProductDetail, SyncError>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListingBody {
    Envelope {
        #[serde(default)]
        value: Option<Vec<ProductSummary>>,
    },
    Bare(Vec<ProductSummary>),
}

pub fn parse_product_list(body: &[u8]) -> Result<Vec<ProductSummary>, SyncError> {
    let parsed: ListingBody = serde_json::from_slice(body).map_err(|e| {
        SyncError::new(
            SyncErrorCode::Format,
            format!("product listing is not a recognised shape: {e}"),
        )
    })?;
    Ok(match parsed {
        ListingBody::Envelope { value } => value.unwrap_or_default(),
        ListingBody::Bare(items) => items,
    })
}

pub fn parse_product_detail(body: &[u8]) -> Result<ProductDetail, SyncError> {
    let raw: Value = serde_json::from_slice(body).map_err(|e| {
        SyncError::new(
            SyncErrorCode::Format,
            format!("product detail is not JSON: {e}"),
        )
    })?;
    if !raw.is_object() {
        return Err(SyncError::new(
            SyncErrorCode::Format,
            "product detail must be a JSON object",
        ));
    }

    let price = parse_price(raw.pointer("/priceData/price"))?;
    let in_stock = raw
        .pointer("/variants/0/stockStatus")
        .and_then(Value::as_str)
        != Some(OUT_OF_STOCK);

    Ok(ProductDetail {
        title: text_field(&raw, "title"),
        description: text_field(&raw, "description"),
        price,
        in_stock,
        raw,
    })
}

fn text_field(raw: &Value, key: &str) -> Option<String> {
    raw.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

fn parse_price(value: Option<&Value>) -> Result<f64, SyncError> {
    let price = match value {
        None | Some(Value::Null) => return Ok(0.0),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    match price {
        Some(p) if p.is_finite() && p >= 0.0 => Ok(p),
        _ => Err(SyncError::new(
            SyncErrorCode::Format,
            format!("priceData.price is not a non-negative number: {value:?}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_product_detail, parse_product_list};
    use crate::SyncErrorCode;

    #[test]
    fn listing_accepts_envelope_bare_array_and_missing_value() {
        let items =
            parse_product_list(br#"{"value":[{"id":"12","title":"Kasa"},{"id":13}]}"#)
                .expect("envelope");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].external_id.as_str(), "12");
        assert_eq!(items[1].external_id.as_str(), "13");
        assert_eq!(items[1].title, None);

        let bare = parse_product_list(r#"[{"id":"7","title":"Gül"}]"#.as_bytes()).expect("bare");
        assert_eq!(bare[0].title.as_deref(), Some("Gül"));

        assert!(parse_product_list(br#"{"count":0}"#).expect("empty").is_empty());
    }

    #[test]
    fn listing_rejects_garbage() {
        let err = parse_product_list(b"<html>").expect_err("not json");
        assert_eq!(err.code, SyncErrorCode::Format);
        let err = parse_product_list(br#"{"value":[{"title":"no id"}]}"#).expect_err("no id");
        assert_eq!(err.code, SyncErrorCode::Format);
    }

    #[test]
    fn detail_price_and_stock() {
        let d = parse_product_detail(
            br#"{"title":"T","priceData":{"price":"149.90"},"variants":[{"stockStatus":"outOfStock"}]}"#,
        )
        .expect("detail");
        assert!((d.price - 149.9).abs() < f64::EPSILON);
        assert!(!d.in_stock);

        let d = parse_product_detail(br#"{"priceData":{"price":75}}"#).expect("detail");
        assert!((d.price - 75.0).abs() < f64::EPSILON);
        assert!(d.in_stock);
        assert_eq!(d.title, None);

        let d = parse_product_detail(br#"{"title":"  "}"#).expect("detail");
        assert_eq!(d.price, 0.0);
        assert_eq!(d.title, None);
    }

    #[test]
    fn detail_rejects_bad_price_and_non_object() {
        for body in [
            br#"{"priceData":{"price":"bedava"}}"#.as_slice(),
            br#"{"priceData":{"price":-1}}"#.as_slice(),
            br#"{"priceData":{"price":[1]}}"#.as_slice(),
            br#"[1,2]"#.as_slice(),
        ] {
            let err = parse_product_detail(body).expect_err("format");
            assert_eq!(err.code, SyncErrorCode::Format);
        }
    }
}
