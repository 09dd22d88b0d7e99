//! Completed orders and the customer info collected at checkout.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cart::CartLine;
use super::id::OrderId;
use super::money::Money;
use crate::error::{CheckoutError, FieldIssue};

/// How the order will be fulfilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    #[serde(rename = "Dine-in")]
    DineIn,
    Delivery,
    Takeout,
}

impl OrderType {
    /// Display label, as the checkout form shows it.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::DineIn => "Dine-in",
            Self::Delivery => "Delivery",
            Self::Takeout => "Takeout",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dine-in" | "dinein" => Ok(Self::DineIn),
            "delivery" => Ok(Self::Delivery),
            "takeout" => Ok(Self::Takeout),
            other => Err(format!("unknown order type '{other}'")),
        }
    }
}

/// Customer details supplied by the checkout form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub full_name: String,
    pub phone_number: String,
    pub order_type: OrderType,
    /// Required for dine-in orders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
}

impl CustomerInfo {
    /// Validate required fields for the selected order type.
    ///
    /// Returns every offending field at once so the checkout UI can surface
    /// them per-field.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let mut issues = Vec::new();

        if self.full_name.trim().is_empty() {
            issues.push(FieldIssue {
                field: "full_name",
                message: "is required".to_string(),
            });
        }

        if self.phone_number.trim().is_empty() {
            issues.push(FieldIssue {
                field: "phone_number",
                message: "is required".to_string(),
            });
        } else if !is_plausible_phone(self.phone_number.trim()) {
            issues.push(FieldIssue {
                field: "phone_number",
                message: "is not a valid phone number".to_string(),
            });
        }

        if self.order_type == OrderType::DineIn
            && self
                .table_number
                .as_deref()
                .map_or(true, |table| table.trim().is_empty())
        {
            issues.push(FieldIssue {
                field: "table_number",
                message: "is required for dine-in orders".to_string(),
            });
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(CheckoutError::Validation { issues })
        }
    }
}

/// Phone plausibility: optional leading `+`, then at least ten characters
/// drawn from digits, spaces, dashes, and parentheses.
fn is_plausible_phone(phone: &str) -> bool {
    let rest = phone.strip_prefix('+').unwrap_or(phone);
    rest.len() >= 10
        && rest
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')'))
}

/// An immutable record of a finalized, submitted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedOrder {
    pub order_id: OrderId,
    /// Snapshot of the cart at checkout time.
    pub items: Vec<CartLine>,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
    pub customer: CustomerInfo,
    pub placed_at: DateTime<Utc>,
}

impl CompletedOrder {
    /// Total unit count across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }
}
