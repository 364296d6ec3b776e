// SPDX-License-Identifier: Apache-2.0

use std::fs;

use storefront_core::sha256_hex;
use storefront_model::{
    default_categories, purchase_url, Badge, Catalog, CategoryId, ExternalProductId, Product,
};
use storefront_store::{
    lock_path_for, parse_catalog, publish_catalog, serialize_catalog, tmp_path_for, CatalogStore,
    LocalFsStore, StoreErrorCode,
};
use tempfile::tempdir;

const STAMP: &str = "2026-02-10T12:00:00+03:00";
const BASE: &str = "https://www.shopier.com/alnigamestudios";

fn product(id: u32, external: &str, name: &str, category: &str) -> Product {
    let external_product_id = ExternalProductId::parse(external).expect("external id");
    Product {
        id,
        purchase_url: purchase_url(BASE, &external_product_id),
        external_product_id,
        name: name.to_string(),
        price: 149.0,
        category: CategoryId::parse(category).expect("category"),
        badge: Some(Badge::New),
        description: "Kısa açıklama...".to_string(),
        full_description: "Uzun açıklama".to_string(),
        in_stock: true,
        image: "https://cdn.shopier.app/pictures_large/a.png".to_string(),
        delivery_type: "Dijital teslimat".to_string(),
    }
}

fn catalog() -> Catalog {
    Catalog::new(
        vec![
            product(1, "101", "Timeline Hediyesi", "sevgililer"),
            product(2, "202", "Netflix Temalı Kart", "tema"),
        ],
        default_categories(),
    )
}

#[test]
fn publish_then_load_roundtrips() {
    let root = tempdir().expect("tmp");
    let store = LocalFsStore::new(root.path().join("products.js"));
    let expected = catalog();

    let digest = publish_catalog(&store, &expected, STAMP).expect("publish");
    let on_disk = fs::read(&store.path).expect("read store");
    assert_eq!(sha256_hex(&on_disk), digest);

    let loaded = store.load().expect("load").expect("store exists");
    assert_eq!(loaded, expected);
    assert!(!lock_path_for(&store.path).exists());
    assert!(!tmp_path_for(&store.path).exists());
}

#[test]
fn absent_store_loads_as_none() {
    let root = tempdir().expect("tmp");
    let store = LocalFsStore::new(root.path().join("products.js"));
    assert!(store.load().expect("load").is_none());
}

#[test]
fn checksum_mismatch_keeps_previous_store() {
    let root = tempdir().expect("tmp");
    let store = LocalFsStore::new(root.path().join("products.js"));
    publish_catalog(&store, &catalog(), STAMP).expect("publish");
    let before = fs::read(&store.path).expect("read");

    let err = store
        .publish(b"const products = [];", &"0".repeat(64))
        .expect_err("mismatch must fail");
    assert_eq!(err.code, StoreErrorCode::Validation);
    assert_eq!(fs::read(&store.path).expect("read"), before);
    assert!(!tmp_path_for(&store.path).exists());
    assert!(!lock_path_for(&store.path).exists());
}

#[test]
fn held_lock_rejects_concurrent_publish() {
    let root = tempdir().expect("tmp");
    let store = LocalFsStore::new(root.path().join("products.js"));
    let guard = store.acquire_publish_lock().expect("first lock");

    let err = publish_catalog(&store, &catalog(), STAMP).expect_err("second writer");
    assert_eq!(err.code, StoreErrorCode::Conflict);
    assert!(!store.path.exists());

    drop(guard);
    publish_catalog(&store, &catalog(), STAMP).expect("publish after release");
}

#[test]
fn invalid_catalog_is_never_written() {
    let root = tempdir().expect("tmp");
    let store = LocalFsStore::new(root.path().join("products.js"));
    let mut broken = catalog();
    broken.products[1].id = 7;

    let err = publish_catalog(&store, &broken, STAMP).expect_err("non-sequential ids");
    assert_eq!(err.code, StoreErrorCode::Validation);
    assert!(!store.path.exists());
}

#[test]
fn serialized_bytes_are_deterministic() {
    let a = serialize_catalog(&catalog(), STAMP).expect("first");
    let b = serialize_catalog(&catalog(), STAMP).expect("second");
    assert_eq!(a, b);

    let text = String::from_utf8(a).expect("utf8");
    assert!(text.contains(&format!("// Generated at: {STAMP}")));
    let header: Vec<&str> = text.lines().take(3).collect();
    assert_eq!(
        header[2],
        "// Do not edit product prices or stock by hand; curated fields survive the next sync."
    );
    assert!(text.contains("const products = [\n    {\n        \"id\": 1,"));
    assert!(text.contains("\"price\": 149.0,"));
    assert!(text.ends_with("];\n"));
}

#[test]
fn legacy_store_file_loads() {
    let legacy = r#"// Otomatik oluşturuldu
// Tarih: 10.02.2026 12:00:00

const products = [
    {
        "id": 1,
        "shopierProductId": "31337",
        "name": "Kazı Kazan Sürprizi",
        "price": 79,
        "category": "eglence",
        "shopierUrl": "https://www.shopier.com/alnigamestudios/31337",
        "badge": null,
        "description": "Kazı kazan...",
        "fullDescription": "Kazı kazan kartı",
        "inStock": true,
        "image": ""
    }
];

// Kategori tanımları
const categories = [
    { "id": "all", "name": "Tüm Ürünler", "icon": "🎁" },
    { "id": "eglence", "name": "Eğlence", "icon": "🎮" }
];
"#;
    let root = tempdir().expect("tmp");
    let path = root.path().join("products.js");
    fs::write(&path, legacy).expect("write legacy");

    let loaded = LocalFsStore::new(path)
        .load()
        .expect("load")
        .expect("store exists");
    assert_eq!(loaded.products.len(), 1);
    assert_eq!(loaded.products[0].external_product_id.as_str(), "31337");
    assert_eq!(loaded.products[0].delivery_type, "Dijital teslimat");
    assert_eq!(loaded.categories.len(), 2);
}

#[test]
fn bare_json_object_is_accepted() {
    let text = serde_json::json!({
        "products": [],
        "categories": [{"id": "all", "name": "Tüm Ürünler", "icon": "🎁"}]
    })
    .to_string();
    let parsed = parse_catalog(&text).expect("parse");
    assert!(parsed.products.is_empty());
    assert_eq!(parsed.categories.len(), 1);
}

#[test]
fn corrupt_store_is_a_validation_error() {
    let root = tempdir().expect("tmp");
    let path = root.path().join("products.js");
    fs::write(&path, "const products = [ {\"id\": ").expect("write");
    let err = LocalFsStore::new(path).load().expect_err("corrupt");
    assert_eq!(err.code, StoreErrorCode::Validation);

    let err = parse_catalog("const categories = [];").expect_err("no products");
    assert_eq!(err.code, StoreErrorCode::Validation);
}
