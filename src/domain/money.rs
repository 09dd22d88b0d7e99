//! Monetary type for prices, totals, and revenue.

use rust_decimal::Decimal;

/// Currency amount represented as a Decimal for precision.
///
/// Amounts are in the restaurant's display currency (whole units, e.g. PKR);
/// never floats.
pub type Money = Decimal;
