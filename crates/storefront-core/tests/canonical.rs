// SPDX-License-Identifier: Apache-2.0

use proptest::prelude::*;
use serde_json::json;
use storefront_core::{canonical, sha256_hex};

#[test]
fn stable_json_bytes_are_key_order_deterministic() {
    let a = json!({"z": 2, "a": 1});
    let b = json!({"a": 1, "z": 2});
    let ba = canonical::stable_json_bytes(&a).expect("stable json a");
    let bb = canonical::stable_json_bytes(&b).expect("stable json b");
    assert_eq!(ba, bb);
}

#[test]
fn sha256_matches_known_digest() {
    assert_eq!(
        sha256_hex(b""),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn content_hash_is_sha256_of_stable_bytes() {
    let value = json!({"b": [1, 2], "a": "x"});
    let bytes = canonical::stable_json_bytes(&value).expect("stable json");
    assert_eq!(
        canonical::stable_json_hash_hex(&value).expect("hash"),
        sha256_hex(&bytes)
    );
}

#[test]
fn pretty_json_keeps_declaration_order() {
    #[derive(serde::Serialize)]
    struct Row {
        zeta: u8,
        alpha: u8,
    }
    let bytes = canonical::pretty_json_bytes(&Row { zeta: 1, alpha: 2 }).expect("pretty");
    let text = String::from_utf8(bytes).expect("utf8");
    let zeta = text.find("zeta").expect("zeta key");
    let alpha = text.find("alpha").expect("alpha key");
    assert!(zeta < alpha, "struct order must be preserved: {text}");
}

proptest! {
    #[test]
    fn stable_json_hash_repeatable_for_any_string_map(
        entries in proptest::collection::btree_map("[a-z]{1,8}", "[ -~]{0,16}", 0..12)
    ) {
        let value = json!(entries);
        let h1 = canonical::stable_json_hash_hex(&value).expect("hash1");
        let h2 = canonical::stable_json_hash_hex(&value).expect("hash2");
        prop_assert_eq!(h1, h2);
    }
}
