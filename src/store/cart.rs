//! Session-local cart store with snapshot persistence and change signals.

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::domain::{Cart, ItemId, Money};
use crate::error::Result;
use crate::storage::StorageKey;
use crate::sync::{SessionId, SharedStorage};

/// Broadcast channel capacity for cart change signals.
const SIGNAL_CAPACITY: usize = 32;

/// Where a cart change came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// A mutation performed through this store.
    Local,
    /// An external write detected and applied by [`CartStore::refresh`].
    External,
}

/// Signal that the cart changed; subscribers re-read from the store.
#[derive(Debug, Clone)]
pub struct CartChanged {
    pub origin: ChangeOrigin,
}

/// The authoritative current cart for one session.
///
/// Every local mutation persists the updated snapshot (only when the
/// serialized form actually differs from what is stored, so redundant
/// writes never feed back into change detection) and signals subscribers
/// before returning. External writes are applied by [`refresh`], which
/// replaces in-memory state wholesale: last writer wins, concurrent edits
/// from two sessions are not merged.
///
/// [`refresh`]: CartStore::refresh
pub struct CartStore {
    session: SessionId,
    storage: SharedStorage,
    state: RwLock<Cart>,
    tx: broadcast::Sender<CartChanged>,
}

impl CartStore {
    /// Load the persisted cart snapshot for this session.
    ///
    /// An absent or unparseable snapshot yields an empty cart with a logged
    /// diagnostic; loading alone never writes.
    #[must_use]
    pub fn load(session: SessionId, storage: SharedStorage) -> Self {
        let cart = read_snapshot(&storage);
        let (tx, _rx) = broadcast::channel(SIGNAL_CAPACITY);
        Self {
            session,
            storage,
            state: RwLock::new(cart),
            tx,
        }
    }

    /// The owning session's id.
    #[must_use]
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Subscribe to change signals. Dropping the receiver unsubscribes.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CartChanged> {
        self.tx.subscribe()
    }

    /// A copy of the current cart.
    #[must_use]
    pub fn snapshot(&self) -> Cart {
        self.state.read().clone()
    }

    /// Total unit count across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.state.read().item_count()
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.state.read().subtotal()
    }

    /// Returns true if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().is_empty()
    }

    /// Add one unit of an item.
    pub fn add_item(&self, item_id: ItemId, name: &str, unit_price: Money) -> Result<()> {
        self.mutate(|cart| {
            cart.add(item_id, name, unit_price);
            true
        })
    }

    /// Set a line's quantity; zero or less removes the line.
    pub fn set_quantity(&self, item_id: ItemId, quantity: i64) -> Result<()> {
        self.mutate(|cart| cart.set_quantity(item_id, quantity))
    }

    /// Remove a line. Removing an absent item is a no-op, not an error.
    pub fn remove_item(&self, item_id: ItemId) -> Result<()> {
        self.mutate(|cart| cart.remove(item_id))
    }

    /// Empty the cart and drop the persisted snapshot.
    pub fn clear(&self) -> Result<()> {
        let had_snapshot = self.storage.read(StorageKey::Cart)?.is_some();
        {
            let mut cart = self.state.write();
            if cart.is_empty() && !had_snapshot {
                return Ok(());
            }
            cart.clear();
            self.storage.remove(self.session, StorageKey::Cart)?;
        }
        let _ = self.tx.send(CartChanged {
            origin: ChangeOrigin::Local,
        });
        Ok(())
    }

    /// Re-read the persisted snapshot and replace in-memory state wholesale.
    ///
    /// Called when an external write is detected (foreign storage event) or
    /// when a view regains focus. Returns whether anything changed; signals
    /// subscribers only in that case.
    pub fn refresh(&self) -> Result<bool> {
        let fresh = read_snapshot(&self.storage);
        {
            let mut cart = self.state.write();
            if *cart == fresh {
                return Ok(false);
            }
            *cart = fresh;
        }
        debug!("cart refreshed from external write");
        let _ = self.tx.send(CartChanged {
            origin: ChangeOrigin::External,
        });
        Ok(true)
    }

    /// Apply a mutation, persist the result if it differs from what is
    /// stored, and signal subscribers. Mutations reporting no change skip
    /// both the write and the signal.
    fn mutate(&self, apply: impl FnOnce(&mut Cart) -> bool) -> Result<()> {
        {
            let mut cart = self.state.write();
            if !apply(&mut cart) {
                return Ok(());
            }
            let serialized = serde_json::to_string(&*cart)?;
            if self.storage.read(StorageKey::Cart)?.as_deref() != Some(serialized.as_str()) {
                self.storage
                    .write(self.session, StorageKey::Cart, &serialized)?;
            }
        }
        let _ = self.tx.send(CartChanged {
            origin: ChangeOrigin::Local,
        });
        Ok(())
    }
}

/// Read and parse the persisted cart, falling back to empty.
fn read_snapshot(storage: &SharedStorage) -> Cart {
    match storage.read(StorageKey::Cart) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(cart) => cart,
            Err(e) => {
                warn!(error = %e, "cart snapshot unparseable, starting empty");
                Cart::new()
            }
        },
        Ok(None) => Cart::new(),
        Err(e) => {
            warn!(error = %e, "cart snapshot unreadable, starting empty");
            Cart::new()
        }
    }
}
