//! Append-only ledger of completed orders.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::{info, warn};

use super::cart::CartStore;
use crate::config::PricingConfig;
use crate::domain::{CartLine, CompletedOrder, CustomerInfo, Money, OrderId};
use crate::error::{CheckoutError, Result};
use crate::storage::StorageKey;
use crate::sync::{SessionId, SharedStorage};

/// Broadcast channel capacity for order-completed signals.
const SIGNAL_CAPACITY: usize = 32;

/// Local signal emitted once per successful finalization.
///
/// This is the exact contract the sales aggregator's record operation
/// consumes; receipt rendering must never be a second trigger.
#[derive(Debug, Clone)]
pub struct OrderCompleted {
    pub order_id: OrderId,
    pub total: Money,
    pub items: Vec<CartLine>,
    pub placed_at: DateTime<Utc>,
}

/// Durable record of completed orders for one shared storage.
///
/// Entries are appended once per checkout and never edited or removed.
pub struct OrderLedger {
    session: SessionId,
    storage: SharedStorage,
    pricing: PricingConfig,
    /// Last issued order-id millisecond, kept strictly increasing so two
    /// checkouts in the same millisecond still get distinct ids.
    last_issued: Mutex<i64>,
    tx: broadcast::Sender<OrderCompleted>,
}

impl OrderLedger {
    /// Create a ledger handle for this session.
    #[must_use]
    pub fn new(session: SessionId, storage: SharedStorage, pricing: PricingConfig) -> Self {
        let (tx, _rx) = broadcast::channel(SIGNAL_CAPACITY);
        Self {
            session,
            storage,
            pricing,
            last_issued: Mutex::new(0),
            tx,
        }
    }

    /// Subscribe to order-completed signals. Dropping the receiver
    /// unsubscribes.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<OrderCompleted> {
        self.tx.subscribe()
    }

    /// Finalize the cart into a completed order.
    ///
    /// Computes subtotal, tax, and total from the pricing config, appends
    /// the order to the persisted ledger, clears the cart store, and emits
    /// the order-completed signal. Fails with [`CheckoutError::EmptyCart`]
    /// on an empty cart or [`CheckoutError::Validation`] on bad customer
    /// info; on failure nothing is appended and the cart keeps its lines.
    pub fn finalize(&self, cart: &CartStore, customer: &CustomerInfo) -> Result<CompletedOrder> {
        let snapshot = cart.snapshot();
        if snapshot.is_empty() {
            return Err(CheckoutError::EmptyCart.into());
        }
        customer.validate()?;

        let subtotal = snapshot.subtotal();
        let tax = subtotal * self.pricing.tax_rate;
        let total = subtotal + tax + self.pricing.service_fee;
        let placed_at = Utc::now();

        let order = CompletedOrder {
            order_id: self.next_order_id(placed_at),
            items: snapshot.lines().to_vec(),
            subtotal,
            tax,
            total,
            customer: customer.clone(),
            placed_at,
        };

        self.append(&order)?;
        cart.clear()?;

        let _ = self.tx.send(OrderCompleted {
            order_id: order.order_id.clone(),
            total: order.total,
            items: order.items.clone(),
            placed_at: order.placed_at,
        });
        info!(order_id = %order.order_id, total = %order.total, "order finalized");

        Ok(order)
    }

    /// All completed orders, oldest first.
    #[must_use]
    pub fn orders(&self) -> Vec<CompletedOrder> {
        match self.storage.read(StorageKey::Orders) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(orders) => orders,
                Err(e) => {
                    warn!(error = %e, "order ledger unparseable, treating as empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "order ledger unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    /// Number of completed orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders().len()
    }

    /// Returns true if no order has been completed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders().is_empty()
    }

    /// Look up one order by id.
    #[must_use]
    pub fn get(&self, order_id: &OrderId) -> Option<CompletedOrder> {
        self.orders().into_iter().find(|o| &o.order_id == order_id)
    }

    fn next_order_id(&self, now: DateTime<Utc>) -> OrderId {
        let mut last = self.last_issued.lock();
        let millis = now.timestamp_millis().max(*last + 1);
        *last = millis;
        OrderId::from_millis(millis)
    }

    fn append(&self, order: &CompletedOrder) -> Result<()> {
        let mut orders = self.orders();
        orders.push(order.clone());
        let serialized = serde_json::to_string(&orders)?;
        self.storage
            .write(self.session, StorageKey::Orders, &serialized)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::{ItemId, OrderType};
    use crate::storage::MemoryStorage;

    fn shared() -> SharedStorage {
        SharedStorage::new(Arc::new(MemoryStorage::new()))
    }

    fn takeout() -> CustomerInfo {
        CustomerInfo {
            full_name: "Grace Hopper".to_string(),
            phone_number: "0300 1234567".to_string(),
            order_type: OrderType::Takeout,
            table_number: None,
        }
    }

    fn fixture(storage: &SharedStorage) -> (CartStore, OrderLedger) {
        let session = SessionId::new();
        let cart = CartStore::load(session, storage.clone());
        let ledger = OrderLedger::new(session, storage.clone(), PricingConfig::default());
        (cart, ledger)
    }

    #[test]
    fn finalize_computes_totals_and_clears_cart() {
        let storage = shared();
        let (cart, ledger) = fixture(&storage);
        cart.add_item(ItemId::new(1), "Pizza", dec!(1000)).unwrap();
        cart.add_item(ItemId::new(1), "Pizza", dec!(1000)).unwrap();

        let order = ledger.finalize(&cart, &takeout()).unwrap();

        assert_eq!(order.subtotal, dec!(2000));
        assert_eq!(order.tax, dec!(160));
        assert_eq!(order.total, dec!(2160));
        assert!(cart.is_empty());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn finalize_empty_cart_is_rejected_without_state_change() {
        let storage = shared();
        let (cart, ledger) = fixture(&storage);

        let err = ledger.finalize(&cart, &takeout()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Checkout(CheckoutError::EmptyCart)
        ));
        assert_eq!(ledger.len(), 0);
    }

    #[test]
    fn finalize_invalid_customer_leaves_cart_intact() {
        let storage = shared();
        let (cart, ledger) = fixture(&storage);
        cart.add_item(ItemId::new(1), "Pizza", dec!(1000)).unwrap();

        let bad = CustomerInfo {
            full_name: String::new(),
            ..takeout()
        };
        let err = ledger.finalize(&cart, &bad).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Checkout(CheckoutError::Validation { .. })
        ));
        assert_eq!(ledger.len(), 0);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn order_ids_stay_distinct_within_one_millisecond() {
        let storage = shared();
        let (cart, ledger) = fixture(&storage);

        let mut ids = Vec::new();
        for _ in 0..3 {
            cart.add_item(ItemId::new(1), "Pizza", dec!(1000)).unwrap();
            ids.push(ledger.finalize(&cart, &takeout()).unwrap().order_id);
        }

        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn service_fee_is_added_to_total() {
        let storage = shared();
        let session = SessionId::new();
        let cart = CartStore::load(session, storage.clone());
        let pricing = PricingConfig {
            tax_rate: dec!(0.08),
            service_fee: dec!(50),
        };
        let ledger = OrderLedger::new(session, storage.clone(), pricing);
        cart.add_item(ItemId::new(1), "Pizza", dec!(1000)).unwrap();

        let order = ledger.finalize(&cart, &takeout()).unwrap();
        assert_eq!(order.total, dec!(1130));
    }

    #[tokio::test]
    async fn finalize_emits_order_completed_signal() {
        let storage = shared();
        let (cart, ledger) = fixture(&storage);
        cart.add_item(ItemId::new(1), "Pizza", dec!(1000)).unwrap();

        let mut rx = ledger.subscribe();
        let order = ledger.finalize(&cart, &takeout()).unwrap();

        let signal = rx.recv().await.unwrap();
        assert_eq!(signal.order_id, order.order_id);
        assert_eq!(signal.total, order.total);
        assert_eq!(signal.items.len(), 1);
    }

    #[test]
    fn ledger_survives_reload_from_storage() {
        let storage = shared();
        let (cart, ledger) = fixture(&storage);
        cart.add_item(ItemId::new(1), "Pizza", dec!(1000)).unwrap();
        let order = ledger.finalize(&cart, &takeout()).unwrap();

        let (_, other) = fixture(&storage);
        assert_eq!(other.len(), 1);
        assert_eq!(other.get(&order.order_id).unwrap(), order);
    }
}
