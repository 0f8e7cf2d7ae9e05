//! Zia Mia admin library.
//!
//! Connects the validation rules in `zia-mia-core` to the record store:
//!
//! - [`config`] - store URL and API key from the environment
//! - [`store`] - reqwest client implementing [`zia_mia_core::DataAccess`]
//! - [`service`] - validate-then-write operations used by the CLI

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod service;
pub mod store;

pub use config::StoreConfig;
pub use service::{ItemService, Outcome, ServiceError};
pub use store::{StoreClient, StoreError};
