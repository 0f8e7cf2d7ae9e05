//! Zia Mia record store.
//!
//! A small JSON server holding the shop's `customers`, `flavours` and
//! `orders` collections in memory. Reads are open; writes need the bearer
//! key. The store keeps whatever objects it is sent and assigns integer ids;
//! business rules live in the admin.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod collections;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::{Router, middleware};
use tower_http::trace::TraceLayer;

pub use collections::{Collections, IdsExhausted, Seed, SeedError};
pub use config::ServerConfig;
pub use state::StoreState;

/// Load the starting collections named by the configuration.
///
/// Without a seed file the store starts empty.
///
/// # Errors
///
/// Returns a [`SeedError`] if the seed file cannot be read or is invalid.
pub fn initial_collections(config: &ServerConfig) -> Result<Collections, SeedError> {
    match &config.seed_file {
        Some(path) => Collections::try_from(Seed::load(path)?),
        None => Ok(Collections::default()),
    }
}

/// The complete store application: routes, API key check and request tracing.
pub fn router(state: StoreState) -> Router {
    Router::new()
        .merge(routes::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .with_state(state)
}
