//! Cart domain types: line items and the in-progress cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ItemId;
use super::money::Money;

/// One distinct item entry within a cart, with a quantity.
///
/// Invariant: quantity >= 1. A line reaching quantity 0 is removed from the
/// cart, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: ItemId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
}

impl CartLine {
    /// Line total: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// The user's in-progress, not-yet-submitted selection of items.
///
/// Lines keep insertion order for stable display. At most one line exists
/// per item id; repeated adds increment the existing line's quantity.
/// Serializes as a plain JSON array, matching the persisted snapshot shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up the line for an item, if present.
    #[must_use]
    pub fn get(&self, item_id: ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item_id == item_id)
    }

    /// Add one unit of an item: increments the existing line's quantity or
    /// appends a new line with quantity 1.
    pub fn add(&mut self, item_id: ItemId, name: &str, unit_price: Money) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.item_id == item_id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine {
                item_id,
                name: name.to_string(),
                unit_price,
                quantity: 1,
            });
        }
    }

    /// Set an existing line's quantity. A quantity of zero or less removes
    /// the line. Returns whether the cart changed; setting a quantity for an
    /// item not in the cart is a no-op.
    pub fn set_quantity(&mut self, item_id: ItemId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(item_id);
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.lines.iter_mut().find(|line| line.item_id == item_id) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Remove an item's line. Returns whether a line was removed; removing
    /// an absent item is a no-op, not an error.
    pub fn remove(&mut self, item_id: ItemId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.item_id != item_id);
        self.lines.len() != before
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total unit count across all lines (the header badge number).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}
