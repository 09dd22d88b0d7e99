//! One open session of the application: the "browser tab" unit.
//!
//! A session owns one cart store, one ledger handle, and one sales
//! aggregator, all sharing a session id over common storage. Checkout is
//! orchestrated here so the aggregator has exactly one trigger per order.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::PricingConfig;
use crate::domain::{CompletedOrder, CustomerInfo};
use crate::error::Result;
use crate::storage::StorageKey;
use crate::store::{CartStore, OrderLedger, SalesAggregator};
use crate::sync::{SessionId, SharedStorage};

/// One set of store handles over shared storage.
pub struct Session {
    id: SessionId,
    storage: SharedStorage,
    cart: Arc<CartStore>,
    ledger: Arc<OrderLedger>,
    sales: Arc<SalesAggregator>,
}

impl Session {
    /// Open a session against shared storage.
    ///
    /// Existing ledger entries are marked as processed in the aggregator so
    /// nothing recorded by an earlier session can be counted twice.
    #[must_use]
    pub fn open(storage: SharedStorage, pricing: PricingConfig) -> Self {
        let id = SessionId::new();
        let cart = Arc::new(CartStore::load(id, storage.clone()));
        let ledger = Arc::new(OrderLedger::new(id, storage.clone(), pricing));
        let sales = Arc::new(SalesAggregator::load(id, storage.clone()));
        sales.mark_recorded(ledger.orders().into_iter().map(|o| o.order_id));

        Self {
            id,
            storage,
            cart,
            ledger,
            sales,
        }
    }

    /// This session's id.
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The session's cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// The session's order ledger.
    #[must_use]
    pub fn ledger(&self) -> &OrderLedger {
        &self.ledger
    }

    /// The session's sales aggregator.
    #[must_use]
    pub fn sales(&self) -> &SalesAggregator {
        &self.sales
    }

    /// Complete the current cart: finalize into the ledger, then record the
    /// order in the sales rollup.
    ///
    /// This is the single aggregation trigger; rendering or printing a
    /// receipt afterwards must not record the order again.
    pub fn checkout(&self, customer: &CustomerInfo) -> Result<CompletedOrder> {
        let order = self.ledger.finalize(&self.cart, customer)?;
        self.sales.record_completed_order(&order)?;
        Ok(order)
    }

    /// Drive foreign storage events into the stores.
    ///
    /// Events written by this session are ignored; the writer's own views
    /// are served by the stores' in-process signals.
    pub fn spawn_sync_task(&self) -> JoinHandle<()> {
        let id = self.id;
        let mut rx = self.storage.subscribe();
        let cart = Arc::clone(&self.cart);
        let sales = Arc::clone(&self.sales);

        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) if event.writer == id => {}
                    Ok(event) => {
                        debug!(key = %event.key, writer = %event.writer, "foreign storage event");
                        let refreshed = match event.key {
                            StorageKey::Cart => cart.refresh(),
                            StorageKey::Sales => sales.refresh(),
                            // The ledger holds no in-memory state to refresh.
                            StorageKey::Orders => Ok(false),
                        };
                        if let Err(e) = refreshed {
                            warn!(key = %event.key, error = %e, "refresh after storage event failed");
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "storage event stream lagged, refreshing everything");
                        let _ = cart.refresh();
                        let _ = sales.refresh();
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }

    /// Defensive reconciliation fallback: periodically re-read every
    /// snapshot in case a change notification was missed.
    ///
    /// The event-driven path is primary; keep the interval long.
    pub fn spawn_poll_fallback(&self, interval: Duration) -> JoinHandle<()> {
        let cart = Arc::clone(&self.cart);
        let sales = Arc::clone(&self.sales);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // The first tick fires immediately; skip it.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if let Err(e) = cart.refresh() {
                    warn!(error = %e, "poll reconciliation of cart failed");
                }
                if let Err(e) = sales.refresh() {
                    warn!(error = %e, "poll reconciliation of sales failed");
                }
            }
        })
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
            full_name: "Alan Turing".to_string(),
            phone_number: "0300 1234567".to_string(),
            order_type: OrderType::Takeout,
            table_number: None,
        }
    }

    #[test]
    fn checkout_records_exactly_once() {
        let session = Session::open(shared(), PricingConfig::default());
        session
            .cart()
            .add_item(ItemId::new(1), "Pizza", dec!(1000))
            .unwrap();

        let order = session.checkout(&takeout()).unwrap();

        let rollup = session.sales().rollup();
        assert_eq!(rollup.daily[0].orders, 1);
        assert_eq!(rollup.daily[0].revenue, order.total);

        // A stray second trigger for the same order changes nothing.
        session.sales().record_completed_order(&order).unwrap();
        assert_eq!(session.sales().rollup().daily[0].orders, 1);
    }

    #[test]
    fn new_session_marks_existing_orders_as_processed() {
        let storage = shared();
        let first = Session::open(storage.clone(), PricingConfig::default());
        first
            .cart()
            .add_item(ItemId::new(1), "Pizza", dec!(1000))
            .unwrap();
        let order = first.checkout(&takeout()).unwrap();

        let second = Session::open(storage, PricingConfig::default());
        second.sales().record_completed_order(&order).unwrap();

        // Still one order counted, not two.
        assert_eq!(second.sales().rollup().daily[0].orders, 1);
    }
}
