//! Core types for Zia Mia.
//!
//! This module provides type-safe wrappers for the shop's records and the
//! payloads sent to the record store.

pub mod draft;
pub mod id;
pub mod item;
pub mod price;
pub mod record;
pub mod status;

pub use draft::*;
pub use id::*;
pub use item::{ItemType, Operation, UnknownItemType};
pub use price::KiloPrice;
pub use record::*;
pub use status::*;
