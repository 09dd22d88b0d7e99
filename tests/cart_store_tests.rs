//! Cart store behavior over persisted snapshots.

mod support;

use greenleaf::domain::ItemId;
use greenleaf::storage::StorageKey;
use greenleaf::sync::SessionId;
use rust_decimal_macros::dec;
use support::{memory_storage, open_session, pizza};

#[test]
fn loading_without_snapshot_yields_empty_cart_and_writes_nothing() {
    let storage = memory_storage();
    let session = open_session(&storage);

    assert!(session.cart().is_empty());
    assert_eq!(storage.read(StorageKey::Cart).unwrap(), None);
}

#[test]
fn add_then_remove_restores_prior_cart_content() {
    let storage = memory_storage();
    let session = open_session(&storage);
    session
        .cart()
        .add_item(ItemId::new(3), "Caesar Salad", dec!(9.99))
        .unwrap();
    let before = session.cart().snapshot();

    let (id, name, price) = pizza();
    session.cart().add_item(id, name, price).unwrap();
    session.cart().remove_item(id).unwrap();

    assert_eq!(session.cart().snapshot(), before);
}

#[test]
fn quantity_floor_removes_the_line() {
    for quantity in [0i64, -1] {
        let storage = memory_storage();
        let session = open_session(&storage);
        let (id, name, price) = pizza();
        session.cart().add_item(id, name, price).unwrap();

        session.cart().set_quantity(id, quantity).unwrap();

        assert!(session.cart().snapshot().get(id).is_none());
    }
}

#[test]
fn repeated_adds_never_duplicate_lines() {
    let storage = memory_storage();
    let session = open_session(&storage);
    let (id, name, price) = pizza();

    session.cart().add_item(id, name, price).unwrap();
    session.cart().add_item(id, name, price).unwrap();

    let cart = session.cart().snapshot();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.get(id).unwrap().quantity, 2);
}

#[test]
fn cart_survives_reload_in_a_new_session() {
    let storage = memory_storage();
    let first = open_session(&storage);
    let (id, name, price) = pizza();
    first.cart().add_item(id, name, price).unwrap();
    first.cart().add_item(id, name, price).unwrap();

    let second = open_session(&storage);
    assert_eq!(second.cart().snapshot(), first.cart().snapshot());
}

#[test]
fn corrupt_snapshot_falls_back_to_empty_without_failing() {
    let storage = memory_storage();
    storage
        .write(SessionId::new(), StorageKey::Cart, "][ not json")
        .unwrap();

    let session = open_session(&storage);
    assert!(session.cart().is_empty());
}

#[tokio::test]
async fn subscribers_hear_local_mutations() {
    let storage = memory_storage();
    let session = open_session(&storage);
    let mut rx = session.cart().subscribe();

    let (id, name, price) = pizza();
    session.cart().add_item(id, name, price).unwrap();

    // The mutation persisted and signaled before add_item returned.
    assert!(rx.try_recv().is_ok());
}
