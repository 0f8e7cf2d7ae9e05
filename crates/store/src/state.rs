//! Application state shared across handlers.

use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::RwLock;

use crate::collections::Collections;

/// Store state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct StoreState {
    inner: Arc<StoreStateInner>,
}

struct StoreStateInner {
    api_key: SecretString,
    collections: RwLock<Collections>,
}

impl StoreState {
    #[must_use]
    pub fn new(api_key: SecretString, collections: Collections) -> Self {
        Self {
            inner: Arc::new(StoreStateInner {
                api_key,
                collections: RwLock::new(collections),
            }),
        }
    }

    /// Key non-GET requests must present.
    #[must_use]
    pub fn api_key(&self) -> &SecretString {
        &self.inner.api_key
    }

    #[must_use]
    pub fn collections(&self) -> &RwLock<Collections> {
        &self.inner.collections
    }
}
