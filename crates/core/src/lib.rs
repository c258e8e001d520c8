//! Marketplace Core - Shared cart types.
//!
//! This crate provides the types and rules shared by the cart components:
//! - `cart` - The client-resident cart store and its persistence
//! - `cli` - Command-line host for inspecting and editing a stored cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! storage access, no async runtime. Every quantity-reconciliation rule lives
//! here so it can be tested without a store.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, and line items
//! - [`collection`] - The ordered cart collection and its mutation rules

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod collection;
pub mod types;

pub use collection::{CartCollection, CollectionError};
pub use types::*;
