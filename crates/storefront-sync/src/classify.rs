// SPDX-License-Identifier: Apache-2.0

//! Keyword classification of product titles.
//!
//! Both tables are ordered and evaluated first-match-wins; a title can
//! contain keywords from several rules, so reordering entries changes
//! results.

use storefront_model::{Badge, CategoryId};

/// Lower-cased substrings mapped to a category id.
pub struct CategoryRule {
    pub keywords: &'static [&'static str],
    pub category: &'static str,
}

pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        keywords: &["sevgililer", "çıkar mısın", "date"],
        category: "sevgililer",
    },
    CategoryRule {
        keywords: &["netflix", "spotify"],
        category: "tema",
    },
    CategoryRule {
        keywords: &["kazı kazan", "döv", "love calculator"],
        category: "eglence",
    },
    CategoryRule {
        keywords: &["yıl dönümü", "özür"],
        category: "ozelgun",
    },
    CategoryRule {
        keywords: &["gül"],
        category: "romantik",
    },
    CategoryRule {
        keywords: &["kasa", "sürpriz"],
        category: "surpriz",
    },
    CategoryRule {
        keywords: &["kafe", "menü"],
        category: "isletme",
    },
];

/// Case-sensitive title substrings mapped to a badge.
pub const BADGE_RULES: &[(&str, Badge)] = &[
    ("Timeline", Badge::New),
    ("Döv Beni", Badge::Popular),
    ("Netflix", Badge::Premium),
    ("Pro", Badge::Pro),
    ("Sihir", Badge::Magic),
    ("Love Calculator", Badge::BestValue),
    ("Buluşma Daveti", Badge::New),
];

#[must_use]
pub fn classify_category(title: &str) -> CategoryId {
    let lower = title.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lower.contains(k)))
        .and_then(|rule| CategoryId::parse(rule.category).ok())
        .unwrap_or_else(CategoryId::default_category)
}

#[must_use]
pub fn classify_badge(title: &str) -> Option<Badge> {
    BADGE_RULES
        .iter()
        .find(|(keyword, _)| title.contains(keyword))
        .map(|(_, badge)| *badge)
}
