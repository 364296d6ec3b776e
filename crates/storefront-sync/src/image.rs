// SPDX-License-Identifier: Apache-2.0

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

const IMAGE_URL_PATTERN: &str =
    r#"https://cdn\.shopier\.app/pictures_large/[^"]+\.(png|jpg|webp)"#;

fn image_url_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(IMAGE_URL_PATTERN).ok()).as_ref()
}

/// First large-picture asset URL anywhere in the detail payload, in the
/// payload's own key order.
///
/// Absence is not an error; callers fall back to the curated image.
#[must_use]
pub fn extract_image_url(raw: &Value) -> Option<String> {
    let compact = serde_json::to_string(raw).ok()?;
    image_url_regex()?
        .find(&compact)
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::extract_image_url;
    use serde_json::json;

    #[test]
    fn finds_first_matching_asset() {
        let raw = json!({
            "media": [
                {"url": "https://cdn.shopier.app/pictures_small/a.png"},
                {"url": "https://cdn.shopier.app/pictures_large/b.webp"},
                {"url": "https://cdn.shopier.app/pictures_large/c.jpg"}
            ]
        });
        assert_eq!(
            extract_image_url(&raw).as_deref(),
            Some("https://cdn.shopier.app/pictures_large/b.webp")
        );
    }

    #[test]
    fn object_keys_are_scanned_in_document_order() {
        let raw: serde_json::Value = serde_json::from_str(
            r#"{"media":{"zcover":"https://cdn.shopier.app/pictures_large/first.png","agallery":"https://cdn.shopier.app/pictures_large/second.jpg"}}"#,
        )
        .expect("payload");
        assert_eq!(
            extract_image_url(&raw).as_deref(),
            Some("https://cdn.shopier.app/pictures_large/first.png")
        );
    }

    #[test]
    fn no_match_is_absent() {
        let raw = json!({"media": [{"url": "https://cdn.shopier.app/pictures_large/b.gif"}]});
        assert_eq!(extract_image_url(&raw), None);
        assert_eq!(extract_image_url(&json!(null)), None);
    }
}
