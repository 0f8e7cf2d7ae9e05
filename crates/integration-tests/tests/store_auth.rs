//! Bearer key handling of the record store.

use reqwest::{Client, StatusCode};
use serde_json::json;
use zia_mia_core::DataAccess;
use zia_mia_integration_tests::{API_KEY, TestStore, shop_seed};

#[tokio::test]
async fn test_reads_are_open() {
    let store = TestStore::start(shop_seed()).await;

    let resp = Client::new()
        .get(format!("{}flavours", store.url()))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let flavours: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(flavours.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_writes_without_header_are_refused() {
    let store = TestStore::start(shop_seed()).await;

    let resp = Client::new()
        .post(format!("{}flavours", store.url()))
        .json(&json!({"name": "Lemon", "price": 3}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(resp.text().await.unwrap(), "No \"Authorization\" header found.");
}

#[tokio::test]
async fn test_header_without_bearer_prefix_is_refused() {
    let store = TestStore::start(shop_seed()).await;

    let resp = Client::new()
        .delete(format!("{}orders/2", store.url()))
        .header("Authorization", API_KEY)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        resp.text().await.unwrap(),
        "\"Authorization\" header has wrong value."
    );
}

#[tokio::test]
async fn test_client_with_wrong_key_is_unauthorized() {
    let store = TestStore::start(shop_seed()).await;
    let client = store.client_with_key("k3Y-wr0ng-Q9x7Zt");

    // Reads still work, writes do not.
    assert_eq!(client.customers().await.unwrap().len(), 2);
    let err = client
        .delete(zia_mia_core::ItemType::Orders, 2)
        .await
        .unwrap_err();
    assert!(matches!(err, zia_mia_core::DataAccessError::Unauthorized));

    assert_eq!(store.client().orders().await.unwrap().len(), 3);
}
