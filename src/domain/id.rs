//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Menu item identifier - newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(u32);

impl ItemId {
    /// Create a new `ItemId` from a numeric value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Unique identifier for a completed order.
///
/// Generated as `GLB-<unix-millis>` at finalization time, or constructed
/// from an existing string for persistence/deserialization. The inner
/// String is private to ensure all construction goes through the defined
/// constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(String);

impl OrderId {
    /// Create an `OrderId` from a millisecond timestamp.
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        Self(format!("GLB-{millis}"))
    }

    /// Get the order ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_new_and_value() {
        let id = ItemId::new(42);
        assert_eq!(id.value(), 42);
    }

    #[test]
    fn item_id_display() {
        let id = ItemId::new(7);
        assert_eq!(format!("{id}"), "7");
    }

    #[test]
    fn order_id_from_millis_format() {
        let id = OrderId::from_millis(1_729_000_000_000);
        assert_eq!(id.as_str(), "GLB-1729000000000");
    }

    #[test]
    fn order_id_from_string() {
        let id = OrderId::from("GLB-123".to_string());
        assert_eq!(id.as_str(), "GLB-123");
    }

    #[test]
    fn order_id_display() {
        let id = OrderId::from("GLB-456");
        assert_eq!(format!("{id}"), "GLB-456");
    }
}
