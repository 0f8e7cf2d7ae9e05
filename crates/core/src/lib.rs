//! Zia Mia Core - Shared types and business rules.
//!
//! This crate provides everything the Zia Mia components agree on:
//! - `admin` - HTTP client for the record store and the validated item service
//! - `store` - In-memory record store served over HTTP
//! - `cli` - Command-line administration tool
//!
//! # Architecture
//!
//! The core crate contains types, traits and pure rules - no HTTP clients and
//! no servers. Anything that needs current records reaches them through the
//! [`DataAccess`] trait, which the caller injects.
//!
//! # Modules
//!
//! - [`types`] - IDs, records, drafts and payloads
//! - [`data_access`] - The `DataAccess` capability and its error type
//! - [`snapshot`] - In-memory `DataAccess` over a fixed set of records
//! - [`validation`] - Add/update and delete admissibility rules
//! - [`form`] - Raw form fields to typed drafts
//! - [`config`] - Environment lookup and secret strength helpers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod data_access;
pub mod form;
pub mod snapshot;
pub mod types;
pub mod validation;

pub use data_access::{DataAccess, DataAccessError};
pub use snapshot::Snapshot;
pub use types::*;
pub use validation::{Validator, Verdict, Violation};
