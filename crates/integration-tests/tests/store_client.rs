//! `StoreClient` as the data access implementation.

use zia_mia_core::{
    CustomerId, CustomerPayload, DataAccess, DataAccessError, FlavourId, FlavourPayload, ItemType,
    KiloPrice, OrderId, OrderStatus, Payload, Record,
};
use zia_mia_integration_tests::{TestStore, shop_seed};

#[tokio::test]
async fn test_listings_decode_into_records() {
    let store = TestStore::start(shop_seed()).await;
    let client = store.client();

    let orders = client.orders().await.unwrap();
    assert_eq!(orders.len(), 3);
    assert_eq!(orders[0].customer_id, CustomerId::new(1));
    assert_eq!(orders[1].status, OrderStatus::Delivered);

    let flavours = client.flavours().await.unwrap();
    assert_eq!(flavours[1].price, KiloPrice::parse("5.5").unwrap());
}

#[tokio::test]
async fn test_single_lookups() {
    let store = TestStore::start(shop_seed()).await;
    let client = store.client();

    let marco = client.customer(CustomerId::new(2)).await.unwrap().unwrap();
    assert_eq!(marco.name, "Marco");

    assert!(client.order(OrderId::new(42)).await.unwrap().is_none());
    assert!(client.flavour(FlavourId::new(42)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_update_delete() {
    let store = TestStore::start(shop_seed()).await;
    let client = store.client();

    let created = client
        .create(&Payload::Flavour(FlavourPayload {
            name: "Lemon".to_string(),
            price: KiloPrice::parse("2.75").unwrap(),
        }))
        .await
        .unwrap();
    assert_eq!(created.id(), 3);

    let updated = client
        .update(
            3,
            &Payload::Flavour(FlavourPayload {
                name: "Lemon sorbet".to_string(),
                price: KiloPrice::parse("3").unwrap(),
            }),
        )
        .await
        .unwrap();
    let Record::Flavour(flavour) = updated else {
        panic!("expected a flavour");
    };
    assert_eq!(flavour.name, "Lemon sorbet");
    assert_eq!(flavour.id, FlavourId::new(3));

    client.delete(ItemType::Flavours, 3).await.unwrap();
    assert_eq!(client.flavours().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_writes_to_missing_records_are_not_found() {
    let store = TestStore::start(shop_seed()).await;
    let client = store.client();

    let err = client
        .update(
            9,
            &Payload::Customer(CustomerPayload {
                name: "Nobody".to_string(),
                email: "nobody@example.com".to_string(),
            }),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DataAccessError::NotFound {
            item_type: ItemType::Customers,
            id: 9
        }
    ));

    let err = client.delete(ItemType::Orders, 9).await.unwrap_err();
    assert!(matches!(err, DataAccessError::NotFound { id: 9, .. }));
}
