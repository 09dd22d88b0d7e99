//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use greenleaf::config::PricingConfig;
use greenleaf::domain::{CustomerInfo, ItemId, Money, OrderType};
use greenleaf::session::Session;
use greenleaf::storage::MemoryStorage;
use greenleaf::sync::SharedStorage;
use rust_decimal_macros::dec;

/// Shared storage over an in-memory backend.
pub fn memory_storage() -> SharedStorage {
    SharedStorage::new(Arc::new(MemoryStorage::new()))
}

/// Open a session with default pricing (8% tax, no service fee).
pub fn open_session(storage: &SharedStorage) -> Session {
    Session::open(storage.clone(), PricingConfig::default())
}

/// A valid takeout customer.
pub fn takeout_customer() -> CustomerInfo {
    CustomerInfo {
        full_name: "Ada Lovelace".to_string(),
        phone_number: "0300 1234567".to_string(),
        order_type: OrderType::Takeout,
        table_number: None,
    }
}

/// The 1000-unit pizza used by the end-to-end scenario.
pub fn pizza() -> (ItemId, &'static str, Money) {
    (ItemId::new(1), "Pizza", dec!(1000))
}
