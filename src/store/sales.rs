//! Incremental sales aggregation over completed orders.

use std::collections::HashSet;

use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::domain::{CompletedOrder, OrderId, SalesRollup};
use crate::error::Result;
use crate::storage::StorageKey;
use crate::sync::{SessionId, SharedStorage};

/// Broadcast channel capacity for rollup change signals.
const SIGNAL_CAPACITY: usize = 32;

/// Signal that the rollup changed; subscribers re-read via
/// [`SalesAggregator::rollup`].
#[derive(Debug, Clone)]
pub struct SalesChanged;

/// Keeps day/month rollups consistent with the order ledger without
/// rescanning the full ledger on every order.
///
/// Recording is idempotent by order id: the aggregator retains the set of
/// processed ids (bounded by ledger length) and treats a repeat as a silent
/// no-op, so a stray second trigger (the receipt-printing hazard) cannot
/// inflate revenue.
pub struct SalesAggregator {
    session: SessionId,
    storage: SharedStorage,
    state: RwLock<SalesRollup>,
    recorded: Mutex<HashSet<OrderId>>,
    tx: broadcast::Sender<SalesChanged>,
}

impl SalesAggregator {
    /// Load the persisted rollup, seeding zeroed windows when none exists.
    ///
    /// The seed snapshot is persisted so a dashboard in another session sees
    /// the same zeroed windows. Unparseable snapshots fall back to a fresh
    /// seed with a logged diagnostic.
    #[must_use]
    pub fn load(session: SessionId, storage: SharedStorage) -> Self {
        let (rollup, needs_seed) = match storage.read(StorageKey::Sales) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(rollup) => (rollup, false),
                Err(e) => {
                    warn!(error = %e, "sales rollup unparseable, reseeding");
                    (SalesRollup::seeded(Utc::now()), true)
                }
            },
            Ok(None) => (SalesRollup::seeded(Utc::now()), true),
            Err(e) => {
                warn!(error = %e, "sales rollup unreadable, reseeding");
                (SalesRollup::seeded(Utc::now()), true)
            }
        };

        let aggregator = Self {
            session,
            storage,
            state: RwLock::new(rollup),
            recorded: Mutex::new(HashSet::new()),
            tx: broadcast::channel(SIGNAL_CAPACITY).0,
        };
        if needs_seed {
            if let Err(e) = aggregator.persist() {
                warn!(error = %e, "failed to persist seeded sales rollup");
            }
        }
        aggregator
    }

    /// Subscribe to rollup change signals. Dropping the receiver
    /// unsubscribes.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SalesChanged> {
        self.tx.subscribe()
    }

    /// A copy of the current rollup.
    #[must_use]
    pub fn rollup(&self) -> SalesRollup {
        self.state.read().clone()
    }

    /// Mark order ids as already processed without touching the rollup.
    ///
    /// Called once per session with the existing ledger so replayed
    /// completion signals cannot double count historical orders.
    pub fn mark_recorded(&self, order_ids: impl IntoIterator<Item = OrderId>) {
        self.recorded.lock().extend(order_ids);
    }

    /// Fold one completed order into the rollup, persist it, and signal
    /// subscribers.
    ///
    /// Must be reachable from exactly one trigger per order (checkout
    /// completion); a repeat call for an already-processed id is a silent
    /// no-op.
    pub fn record_completed_order(&self, order: &CompletedOrder) -> Result<()> {
        if !self.recorded.lock().insert(order.order_id.clone()) {
            debug!(order_id = %order.order_id, "order already recorded, skipping");
            return Ok(());
        }

        {
            let mut rollup = self.state.write();
            rollup.record(&order.placed_at, order.total);
        }
        self.persist()?;
        let _ = self.tx.send(SalesChanged);
        debug!(order_id = %order.order_id, total = %order.total, "sales rollup updated");
        Ok(())
    }

    /// Re-read the persisted rollup and replace in-memory state wholesale.
    ///
    /// Called when a foreign storage event reports a rollup change. Returns
    /// whether anything changed; signals subscribers only in that case.
    pub fn refresh(&self) -> Result<bool> {
        let fresh = match self.storage.read(StorageKey::Sales)? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(rollup) => rollup,
                Err(e) => {
                    warn!(error = %e, "sales rollup unparseable on refresh, keeping current");
                    return Ok(false);
                }
            },
            None => SalesRollup::seeded(Utc::now()),
        };

        {
            let mut rollup = self.state.write();
            if *rollup == fresh {
                return Ok(false);
            }
            *rollup = fresh;
        }
        let _ = self.tx.send(SalesChanged);
        Ok(true)
    }

    /// Rebuild the rollup by replaying the ledger.
    ///
    /// The incremental path must always be reproducible this way; it is also
    /// the recovery path when the snapshot is lost.
    pub fn rebuild(&self, orders: &[CompletedOrder]) -> Result<()> {
        let mut fresh = SalesRollup::seeded(Utc::now());
        for order in orders {
            fresh.record(&order.placed_at, order.total);
        }

        {
            let mut recorded = self.recorded.lock();
            recorded.clear();
            recorded.extend(orders.iter().map(|o| o.order_id.clone()));
        }
        *self.state.write() = fresh;
        self.persist()?;
        let _ = self.tx.send(SalesChanged);
        Ok(())
    }

    /// Zero and reseed the rollup (the dashboard's "Reset Data" action).
    pub fn reset(&self) -> Result<()> {
        self.recorded.lock().clear();
        *self.state.write() = SalesRollup::seeded(Utc::now());
        self.persist()?;
        let _ = self.tx.send(SalesChanged);
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        let serialized = serde_json::to_string(&*self.state.read())?;
        self.storage
            .write(self.session, StorageKey::Sales, &serialized)
    }
}
