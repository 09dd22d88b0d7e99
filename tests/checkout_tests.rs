//! Order finalization: totals, ledger appends, and failure modes.

mod support;

use greenleaf::domain::{CustomerInfo, OrderType};
use greenleaf::error::{CheckoutError, Error};
use rust_decimal_macros::dec;
use support::{memory_storage, open_session, pizza, takeout_customer};

#[test]
fn end_to_end_checkout_scenario() {
    let storage = memory_storage();
    let session = open_session(&storage);
    let (id, name, price) = pizza();

    session.cart().add_item(id, name, price).unwrap();
    session.cart().add_item(id, name, price).unwrap();

    let cart = session.cart().snapshot();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.get(id).unwrap().quantity, 2);

    let order = session.checkout(&takeout_customer()).unwrap();

    assert_eq!(order.subtotal, dec!(2000));
    assert_eq!(order.tax, dec!(160));
    assert_eq!(order.total, dec!(2160));
    assert_eq!(session.ledger().len(), 1);

    let today = &session.sales().rollup().daily[0];
    assert_eq!(today.orders, 1);
    assert_eq!(today.revenue, dec!(2160));
}

#[test]
fn successful_finalize_clears_the_cart() {
    let storage = memory_storage();
    let session = open_session(&storage);
    let (id, name, price) = pizza();
    session.cart().add_item(id, name, price).unwrap();

    session.checkout(&takeout_customer()).unwrap();

    assert!(session.cart().is_empty());
    assert_eq!(session.ledger().len(), 1);
}

#[test]
fn empty_cart_checkout_is_rejected_and_ledger_unchanged() {
    let storage = memory_storage();
    let session = open_session(&storage);

    let err = session.checkout(&takeout_customer()).unwrap_err();

    assert!(matches!(err, Error::Checkout(CheckoutError::EmptyCart)));
    assert_eq!(session.ledger().len(), 0);
}

#[test]
fn validation_failure_names_fields_and_keeps_cart() {
    let storage = memory_storage();
    let session = open_session(&storage);
    let (id, name, price) = pizza();
    session.cart().add_item(id, name, price).unwrap();

    let customer = CustomerInfo {
        full_name: String::new(),
        phone_number: "123".to_string(),
        order_type: OrderType::DineIn,
        table_number: None,
    };
    let err = session.checkout(&customer).unwrap_err();

    let Error::Checkout(CheckoutError::Validation { issues }) = err else {
        panic!("expected validation failure, got {err}");
    };
    let fields: Vec<&str> = issues.iter().map(|i| i.field).collect();
    assert_eq!(fields, vec!["full_name", "phone_number", "table_number"]);
    assert_eq!(session.ledger().len(), 0);
    assert_eq!(session.cart().item_count(), 1);
}

#[test]
fn each_checkout_appends_exactly_one_ledger_entry() {
    let storage = memory_storage();
    let session = open_session(&storage);
    let (id, name, price) = pizza();

    for expected_len in 1..=3 {
        session.cart().add_item(id, name, price).unwrap();
        session.checkout(&takeout_customer()).unwrap();
        assert_eq!(session.ledger().len(), expected_len);
    }
}

#[test]
fn ledger_entries_are_immutable_snapshots_of_the_cart() {
    let storage = memory_storage();
    let session = open_session(&storage);
    let (id, name, price) = pizza();
    session.cart().add_item(id, name, price).unwrap();

    let order = session.checkout(&takeout_customer()).unwrap();

    // Later cart activity must not touch the recorded order.
    session.cart().add_item(id, name, price).unwrap();
    let stored = session.ledger().get(&order.order_id).unwrap();
    assert_eq!(stored, order);
    assert_eq!(stored.items.len(), 1);
    assert_eq!(stored.items[0].quantity, 1);
}
