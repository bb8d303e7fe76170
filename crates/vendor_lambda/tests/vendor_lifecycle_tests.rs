use chrono::NaiveDate;
use serde_json::{json, Value};
use vendor_core::tables::Table;
use vendor_lambda::adapters::memory_store::InMemoryRecordStore;
use vendor_lambda::adapters::metrics::RecordingMetrics;
use vendor_lambda::config::RuntimeConfig;
use vendor_lambda::handlers::create::{handle_create_event, CreateVendorResponse};
use vendor_lambda::handlers::fetch::handle_fetch_event;
use vendor_lambda::handlers::http::HttpHandlerConfig;
use vendor_lambda::handlers::seed::{handle_seed_event, SeedHandlerConfig};

fn http_config() -> HttpHandlerConfig {
    HttpHandlerConfig {
        cors: RuntimeConfig::default().cors(),
        request_id: "integration-request".to_string(),
    }
}

fn create(store: &InMemoryRecordStore, body: Value) -> (u16, Value) {
    let response = handle_create_event(
        json!({"httpMethod": "POST", "body": body.to_string()}),
        &http_config(),
        store,
        &RecordingMetrics::new(),
    );
    let body = response.json_body().expect("create body should be json");
    (response.status_code, body)
}

fn fetch(store: &InMemoryRecordStore, vendor_id: &str) -> (u16, Value) {
    let response = handle_fetch_event(
        json!({"httpMethod": "GET", "pathParameters": {"vendor_id": vendor_id}}),
        &http_config(),
        store,
        &RecordingMetrics::new(),
    );
    let body = response.json_body().expect("fetch body should be json");
    (response.status_code, body)
}

#[test]
fn created_vendor_is_immediately_fetchable() {
    let store = InMemoryRecordStore::new();
    let (status, body) = create(
        &store,
        json!({
            "vendor_name": "TestCorp",
            "key_account": true,
            "region": "USA",
            "industry": "Tech",
            "contact_email": "test@example.com",
            "available_discount": 20,
            "discount_type": "percentage",
            "discount_expiry_date": "2025-12-31"
        }),
    );
    assert_eq!(status, 201);
    let created: CreateVendorResponse =
        serde_json::from_value(body).expect("create body should carry vendor_id");

    let (status, view) = fetch(&store, &created.vendor_id);
    assert_eq!(status, 200);
    assert_eq!(view["vendor_id"], created.vendor_id.as_str());
    assert_eq!(view["vendor_name"], "TestCorp");
    assert_eq!(view["key_account"], true);
    assert_eq!(view["region"], "USA");
    assert_eq!(view["available_discount"], 20);
    assert_eq!(view["discount_type"], "percentage");
    assert_eq!(view["discount_expiry_date"], "2025-12-31");
}

#[test]
fn decimal_discount_round_trips_as_number() {
    let store = InMemoryRecordStore::new();
    let (_, body) = create(
        &store,
        json!({"vendor_name": "Decimal", "key_account": false, "available_discount": 25.5}),
    );
    let vendor_id = body["vendor_id"].as_str().expect("vendor_id").to_string();

    let (status, view) = fetch(&store, &vendor_id);
    assert_eq!(status, 200);
    assert!(view["available_discount"].is_number());
    assert_eq!(view["available_discount"], 25.5);
    assert_eq!(view["region"], Value::Null);
}

#[test]
fn rejected_create_persists_nothing() {
    let store = InMemoryRecordStore::new();
    let (status, body) = create(&store, json!({"vendor_name": "TestCorp"}));

    assert_eq!(status, 400);
    assert!(body["error"]
        .as_str()
        .expect("error text")
        .contains("Missing required field"));
    assert!(store.is_empty());
}

#[test]
fn never_created_id_is_not_found() {
    let store = InMemoryRecordStore::new();
    let (status, body) = fetch(&store, "nonexistent");

    assert_eq!(status, 404);
    assert!(body["error"]
        .as_str()
        .expect("error text")
        .to_lowercase()
        .contains("not found"));
}

#[test]
fn partial_write_leaves_vendor_visible_without_incentive() {
    let store = InMemoryRecordStore::new();
    store.fail_writes_to(Table::Incentives);

    let (status, _) = create(
        &store,
        json!({"vendor_name": "Dangling", "key_account": true, "available_discount": 5}),
    );
    assert_eq!(status, 500);

    let vendor_id = store
        .keys(Table::Vendors)
        .pop()
        .expect("vendor record should remain after partial write");
    let (status, view) = fetch(&store, &vendor_id);
    assert_eq!(status, 200);
    assert_eq!(view["vendor_name"], "Dangling");
    assert!(view.get("available_discount").is_none());
}

#[test]
fn seeded_pairs_are_all_retrievable() {
    let store = InMemoryRecordStore::new();
    let today = NaiveDate::from_ymd_opt(2026, 2, 14).expect("valid date");
    let response = handle_seed_event(
        json!({"count": 100}),
        &SeedHandlerConfig {
            today,
            request_id: "seed".to_string(),
        },
        &store,
    );
    assert_eq!(response.status_code, 200);

    let vendor_ids = store.keys(Table::Vendors);
    assert_eq!(vendor_ids.len(), 100);
    for vendor_id in vendor_ids {
        let (status, view) = fetch(&store, &vendor_id);
        assert_eq!(status, 200);

        let discount = view["available_discount"].as_i64().expect("integer discount");
        assert!((5..=30).contains(&discount));
        let expiry = NaiveDate::parse_from_str(
            view["discount_expiry_date"].as_str().expect("expiry text"),
            "%Y-%m-%d",
        )
        .expect("iso date");
        assert!((1..=365).contains(&(expiry - today).num_days()));
    }
}
