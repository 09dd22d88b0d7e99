//! Plain-text receipt rendering.
//!
//! Rendering is read-only: a receipt is produced from an already-completed
//! order and never records sales again.

use std::fmt::Write;

use crate::domain::{CompletedOrder, OrderType};

const WIDTH: usize = 40;

/// Render a completed order as a printable receipt.
#[must_use]
pub fn render(order: &CompletedOrder) -> String {
    let mut out = String::new();
    let rule = "=".repeat(WIDTH);
    let divider = "-".repeat(WIDTH);

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{:^WIDTH$}", "GREENLEAF BISTRO");
    let _ = writeln!(out, "{:^WIDTH$}", "Fresh • Healthy • Delicious");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Order: {}", order.order_id);
    let _ = writeln!(out, "Placed: {}", order.placed_at.format("%Y-%m-%d %H:%M UTC"));
    let _ = writeln!(out, "Customer: {}", order.customer.full_name);
    let _ = writeln!(out, "Phone: {}", order.customer.phone_number);
    match (order.customer.order_type, &order.customer.table_number) {
        (OrderType::DineIn, Some(table)) => {
            let _ = writeln!(out, "Order type: Dine-in (table {table})");
        }
        (order_type, _) => {
            let _ = writeln!(out, "Order type: {order_type}");
        }
    }
    let _ = writeln!(out, "{divider}");

    for line in &order.items {
        let label = format!("{} x{}", line.name, line.quantity);
        let amount = format!("{}", line.line_total());
        let _ = writeln!(out, "{label:<30}{amount:>10}");
    }

    let _ = writeln!(out, "{divider}");
    let _ = writeln!(out, "{:<30}{:>10}", "Subtotal", order.subtotal.to_string());
    let _ = writeln!(out, "{:<30}{:>10}", "Tax", order.tax.to_string());
    let _ = writeln!(out, "{:<30}{:>10}", "Total", order.total.to_string());
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{:^WIDTH$}", "Thank you for dining with us!");

    out
}
