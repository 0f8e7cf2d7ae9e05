//! Integration tests for Zia Mia.
//!
//! Each test starts its own record store on an ephemeral local port and talks
//! to it over HTTP, the same way the CLI does.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p zia-mia-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `store_auth` - bearer key handling of the store
//! - `store_client` - `StoreClient` as a data access implementation
//! - `item_service` - validated writes end to end

use std::net::SocketAddr;
use std::sync::Arc;

use secrecy::SecretString;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use zia_mia_admin::{ItemService, StoreClient, StoreConfig};
use zia_mia_store::{Collections, Seed, StoreState, router};

/// Key the test store accepts.
pub const API_KEY: &str = "Vz2FpaZAXr0hu9EJP70X";

/// Two customers, two flavours and three orders.
///
/// Giulia (1) has an unpaid and a delivered order, Marco (2) has one order in
/// transit.
#[must_use]
pub fn shop_seed() -> Value {
    json!({
        "customers": [
            {"id": 1, "name": "Giulia", "email": "giulia@example.com"},
            {"id": 2, "name": "Marco", "email": "marco@example.com"}
        ],
        "flavours": [
            {"id": 1, "name": "Stracciatella", "price": 4},
            {"id": 2, "name": "Pistachio", "price": 5.5}
        ],
        "orders": [
            {"id": 1, "customerId": 1, "date": "2024-07-01", "status": "unpaid", "orderDescription": "Two kilos of pistachio"},
            {"id": 2, "customerId": 1, "date": "2024-06-14", "status": "delivered", "orderDescription": "One kilo of stracciatella"},
            {"id": 3, "customerId": 2, "date": "2024-07-03", "status": "transit", "orderDescription": "Family tub for the weekend"}
        ]
    })
}

/// A record store running in the background of the current test.
///
/// The server task is aborted on drop.
pub struct TestStore {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestStore {
    /// Start a store holding `seed`.
    ///
    /// # Panics
    ///
    /// Panics if the seed is invalid or no local port can be bound.
    pub async fn start(seed: Value) -> Self {
        let seed: Seed = serde_json::from_value(seed).expect("Invalid seed");
        let collections = Collections::try_from(seed).expect("Invalid seed records");
        let state = StoreState::new(SecretString::from(API_KEY), collections);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to read local address");

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router(state)).await;
        });

        Self { addr, handle }
    }

    /// Root URL of the store, with trailing slash.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// A client using the store's key.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    pub fn client(&self) -> StoreClient {
        self.client_with_key(API_KEY)
    }

    /// A client sending an arbitrary key.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    pub fn client_with_key(&self, key: &str) -> StoreClient {
        let config = StoreConfig::new(&self.url(), SecretString::from(key.to_string()))
            .expect("Invalid store config");
        StoreClient::new(&config).expect("Failed to create store client")
    }

    /// A validated item service over a fresh client.
    #[must_use]
    pub fn service(&self) -> ItemService {
        ItemService::new(Arc::new(self.client()))
    }
}

impl Drop for TestStore {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
