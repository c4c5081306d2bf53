//! Catalog Browser Core - Shared types library.
//!
//! This crate provides the value types used by the other catalog browser
//! components:
//! - `storefront` - Catalog view engine and cart ledger
//! - `cli` - Seeding and an interactive browsing session
//!
//! # Architecture
//!
//! The core crate contains only types and their validation - no I/O and no
//! state. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, ratings, and sort keys

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
