//! CLI smoke tests: separate invocations share file-backed storage the way
//! separate tabs share browser storage.

use assert_cmd::Command;
use predicates::prelude::*;

fn greenleaf(storage_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("greenleaf").unwrap();
    cmd.arg("--storage-dir").arg(storage_dir);
    cmd
}

#[test]
fn menu_lists_items() {
    let dir = tempfile::tempdir().unwrap();

    greenleaf(dir.path())
        .arg("menu")
        .assert()
        .success()
        .stdout(predicate::str::contains("Classic Burger"))
        .stdout(predicate::str::contains("Margherita Pizza"));
}

#[test]
fn added_items_persist_across_invocations() {
    let dir = tempfile::tempdir().unwrap();

    greenleaf(dir.path())
        .args(["add", "1", "--qty", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Classic Burger"));

    greenleaf(dir.path())
        .args(["cart", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Classic Burger x2"));
}

#[test]
fn adding_unknown_item_fails() {
    let dir = tempfile::tempdir().unwrap();

    greenleaf(dir.path())
        .args(["add", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no menu item with id 99"));
}

#[test]
fn checkout_flow_reaches_the_dashboard() {
    let dir = tempfile::tempdir().unwrap();

    greenleaf(dir.path()).args(["add", "2"]).assert().success();

    greenleaf(dir.path())
        .args([
            "checkout",
            "--name",
            "Ada Lovelace",
            "--phone",
            "0300 1234567",
            "--order-type",
            "takeout",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("GREENLEAF BISTRO"));

    greenleaf(dir.path())
        .args(["cart", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("empty"));

    greenleaf(dir.path())
        .arg("orders")
        .assert()
        .success()
        .stdout(predicate::str::contains("GLB-"));

    greenleaf(dir.path())
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Daily Sales"))
        .stdout(predicate::str::contains("Total Orders"));
}

#[test]
fn checkout_with_empty_cart_fails() {
    let dir = tempfile::tempdir().unwrap();

    greenleaf(dir.path())
        .args([
            "checkout",
            "--name",
            "Ada Lovelace",
            "--phone",
            "0300 1234567",
            "--order-type",
            "takeout",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cart is empty"));
}

#[test]
fn sales_reset_zeroes_the_dashboard() {
    let dir = tempfile::tempdir().unwrap();

    greenleaf(dir.path()).args(["add", "1"]).assert().success();
    greenleaf(dir.path())
        .args([
            "checkout",
            "--name",
            "Ada Lovelace",
            "--phone",
            "0300 1234567",
            "--order-type",
            "takeout",
        ])
        .assert()
        .success();

    greenleaf(dir.path())
        .args(["sales", "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sales data reset"));
}
