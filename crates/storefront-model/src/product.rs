// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};

use crate::category::CategoryId;
use crate::serde_helpers::string_or_integer;
use crate::ValidationError;

pub const EXTERNAL_ID_MAX_LEN: usize = 128;
pub const DEFAULT_DELIVERY_TYPE: &str = "Dijital teslimat";

/// Stable join key to the external commerce system. Never regenerated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ExternalProductId(String);

impl ExternalProductId {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ValidationError(
                "external product id must not be empty".to_string(),
            ));
        }
        if s.len() > EXTERNAL_ID_MAX_LEN {
            return Err(ValidationError(format!(
                "external product id exceeds max length {EXTERNAL_ID_MAX_LEN}"
            )));
        }
        if s.chars().any(|c| c.is_whitespace() || c == '/' || c.is_control()) {
            return Err(ValidationError(format!(
                "external product id `{s}` must not contain whitespace or '/'"
            )));
        }
        Ok(Self(s.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ExternalProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for ExternalProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = string_or_integer(deserializer)?;
        Self::parse(&raw).map_err(|e| serde::de::Error::custom(e.0))
    }
}

/// Promotional label shown on a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Badge {
    #[serde(rename = "Yeni")]
    New,
    #[serde(rename = "Popüler")]
    Popular,
    #[serde(rename = "Premium")]
    Premium,
    #[serde(rename = "Pro")]
    Pro,
    #[serde(rename = "Sihirli")]
    Magic,
    #[serde(rename = "En Uygun")]
    BestValue,
}

impl Badge {
    pub const ALL: [Badge; 6] = [
        Self::New,
        Self::Popular,
        Self::Premium,
        Self::Pro,
        Self::Magic,
        Self::BestValue,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "Yeni",
            Self::Popular => "Popüler",
            Self::Premium => "Premium",
            Self::Pro => "Pro",
            Self::Magic => "Sihirli",
            Self::BestValue => "En Uygun",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.label() == label)
    }
}

impl Display for Badge {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One storefront product.
///
/// Field order is the on-disk key order. `shopierProductId` and `shopierUrl`
/// are accepted on read so stores written by the older tooling still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u32,
    #[serde(alias = "shopierProductId")]
    pub external_product_id: ExternalProductId,
    pub name: String,
    pub price: f64,
    pub category: CategoryId,
    #[serde(alias = "shopierUrl")]
    pub purchase_url: String,
    #[serde(default)]
    pub badge: Option<Badge>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub full_description: String,
    pub in_stock: bool,
    #[serde(default)]
    pub image: String,
    #[serde(default = "default_delivery_type")]
    pub delivery_type: String,
}

fn default_delivery_type() -> String {
    DEFAULT_DELIVERY_TYPE.to_string()
}

impl Product {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id == 0 {
            return Err(ValidationError(format!(
                "product {} must have a positive id",
                self.external_product_id
            )));
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError(format!(
                "product {} must have a non-empty name",
                self.external_product_id
            )));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ValidationError(format!(
                "product {} has invalid price {}",
                self.external_product_id, self.price
            )));
        }
        if self.purchase_url.trim().is_empty() {
            return Err(ValidationError(format!(
                "product {} must have a purchase url",
                self.external_product_id
            )));
        }
        Ok(())
    }
}

/// Builds the purchase link for `id` under `base`.
#[must_use]
pub fn purchase_url(base: &str, id: &ExternalProductId) -> String {
    format!("{}/{}", base.trim_end_matches('/'), id.as_str())
}

#[cfg(test)]
mod tests {
    use super::{purchase_url, Badge, ExternalProductId};

    #[test]
    fn badge_labels_round_trip() {
        for badge in Badge::ALL {
            assert_eq!(Badge::from_label(badge.label()), Some(badge));
        }
        assert_eq!(Badge::from_label("Bedava"), None);
    }

    #[test]
    fn purchase_url_is_deterministic() {
        let id = ExternalProductId::parse("42").expect("id");
        assert_eq!(
            purchase_url("https://www.shopier.com/alnigamestudios/", &id),
            "https://www.shopier.com/alnigamestudios/42"
        );
    }

    #[test]
    fn external_id_accepts_numbers_and_strings() {
        let a: ExternalProductId = serde_json::from_str("42").expect("number id");
        let b: ExternalProductId = serde_json::from_str("\"42\"").expect("string id");
        assert_eq!(a, b);
        assert!(serde_json::from_str::<ExternalProductId>("\"\"").is_err());
        assert!(serde_json::from_str::<ExternalProductId>("\"a/b\"").is_err());
    }
}
