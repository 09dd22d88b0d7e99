//! Stateful stores: the cart, the order ledger, and the sales aggregator.

pub mod cart;
pub mod ledger;
pub mod sales;

pub use cart::{CartChanged, CartStore, ChangeOrigin};
pub use ledger::{OrderCompleted, OrderLedger};
pub use sales::{SalesAggregator, SalesChanged};
