//! Greenleaf - restaurant ordering state core.
//!
//! This crate implements the state-consistency core of the GreenLeaf Bistro
//! ordering application: a persisted cart kept consistent across views and
//! sessions, an append-only ledger of completed orders, and incrementally
//! maintained daily/monthly sales rollups.
//!
//! # Architecture
//!
//! Persisted state lives under three snapshot keys behind a
//! [`storage::StorageBackend`]. Sessions (the "browser tab" unit) share one
//! [`sync::SharedStorage`]; every write publishes a change event that other
//! sessions use to re-read, while the writer's own views are served by
//! in-process broadcast signals. Cross-session consistency is last-writer-
//! wins whole-snapshot replacement; concurrent edits are not merged.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Carts, completed orders, sales buckets, money
//! - [`error`] - Error types for the crate
//! - [`storage`] - Snapshot persistence backends (file, memory)
//! - [`sync`] - Session identity and cross-session change events
//! - [`store`] - Cart store, order ledger, sales aggregator
//! - [`session`] - One open session wiring the stores together
//! - [`cli`] - The command-line views (menu, cart, checkout, dashboard)
//! - [`port`] / [`adapter`] - Auth service interface and HTTP client
//!   (requires the `auth` feature)
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use greenleaf::config::PricingConfig;
//! use greenleaf::domain::{CustomerInfo, ItemId, OrderType};
//! use greenleaf::session::Session;
//! use greenleaf::storage::MemoryStorage;
//! use greenleaf::sync::SharedStorage;
//! use rust_decimal_macros::dec;
//!
//! let storage = SharedStorage::new(Arc::new(MemoryStorage::new()));
//! let session = Session::open(storage, PricingConfig::default());
//!
//! session.cart().add_item(ItemId::new(2), "Margherita Pizza", dec!(15.99)).unwrap();
//! let order = session
//!     .checkout(&CustomerInfo {
//!         full_name: "Ada Lovelace".into(),
//!         phone_number: "0300 1234567".into(),
//!         order_type: OrderType::Takeout,
//!         table_number: None,
//!     })
//!     .unwrap();
//!
//! assert!(session.cart().is_empty());
//! assert_eq!(session.sales().rollup().daily[0].revenue, order.total);
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod session;
pub mod storage;
pub mod store;
pub mod sync;

#[cfg(feature = "auth")]
pub mod adapter;

#[cfg(feature = "auth")]
pub mod port;
