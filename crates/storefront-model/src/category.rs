// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::ValidationError;

pub const CATEGORY_ID_MAX_LEN: usize = 32;

/// Pseudo-category used by the storefront filter to mean "no filter".
pub const ALL_CATEGORY_ID: &str = "all";

/// Category assigned when no classification rule matches a title.
pub const DEFAULT_CATEGORY_ID: &str = "sevgililer";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryId(String);

impl CategoryId {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ValidationError("category id must not be empty".to_string()));
        }
        if s.len() > CATEGORY_ID_MAX_LEN {
            return Err(ValidationError(format!(
                "category id exceeds max length {CATEGORY_ID_MAX_LEN}"
            )));
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
        {
            return Err(ValidationError(format!(
                "category id `{s}` must match [a-z0-9_-]+"
            )));
        }
        Ok(Self(s.to_string()))
    }

    #[must_use]
    pub fn all() -> Self {
        Self(ALL_CATEGORY_ID.to_string())
    }

    #[must_use]
    pub fn default_category() -> Self {
        Self(DEFAULT_CATEGORY_ID.to_string())
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        self.0 == ALL_CATEGORY_ID
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CategoryId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CategoryId> for String {
    fn from(value: CategoryId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub icon: String,
}

impl Category {
    #[must_use]
    pub fn new(id: CategoryId, name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            icon: icon.into(),
        }
    }
}

const DEFAULT_CATEGORY_TABLE: &[(&str, &str, &str)] = &[
    (ALL_CATEGORY_ID, "Tüm Ürünler", "🎁"),
    ("sevgililer", "Sevgililer Günü", "💕"),
    ("tema", "Temalı Hediyeler", "🎬"),
    ("eglence", "Eğlence", "🎮"),
    ("ozelgun", "Özel Günler", "🎂"),
    ("romantik", "Romantik", "🌹"),
    ("surpriz", "Sürpriz", "🎁"),
    ("isletme", "İşletme", "☕"),
];

/// The storefront's category set, in display order.
#[must_use]
pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORY_TABLE
        .iter()
        .map(|(id, name, icon)| Category::new(CategoryId((*id).to_string()), *name, *icon))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{default_categories, CategoryId, DEFAULT_CATEGORY_ID};

    #[test]
    fn default_table_ids_are_valid_and_start_with_all() {
        let categories = default_categories();
        assert_eq!(categories.len(), 8);
        assert!(categories[0].id.is_all());
        for c in &categories {
            CategoryId::parse(c.id.as_str()).expect("table id must parse");
        }
        assert!(categories
            .iter()
            .any(|c| c.id.as_str() == DEFAULT_CATEGORY_ID));
    }

    #[test]
    fn category_id_rejects_uppercase_and_blank() {
        assert!(CategoryId::parse("Romantik").is_err());
        assert!(CategoryId::parse("   ").is_err());
        assert_eq!(
            CategoryId::parse(" tema ").expect("trimmed").as_str(),
            "tema"
        );
    }
}
