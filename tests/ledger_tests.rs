// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use pocketstats::db;
use pocketstats::error::StoreError;
use pocketstats::ledger::{Ledger, MAX_AMOUNT, PALETTE, default_categories};
use pocketstats::models::{NewTransaction, TransactionDate, TransactionKind};
use pocketstats::store::{Collection, MemoryStore, SqliteStore, Store};
use rusqlite::Connection;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn expense(amount: Decimal, category_id: &str, date: &str) -> NewTransaction {
    NewTransaction {
        amount,
        kind: TransactionKind::Expense,
        category_id: category_id.to_string(),
        description: Some("  ".to_string()),
        date: at(date),
    }
}

#[test]
fn new_user_is_seeded_with_default_categories_once() {
    let store = MemoryStore::new();
    let ledger = Ledger::new(&store, "alice");
    assert!(store.get("alice", Collection::Categories).unwrap().is_none());

    let first = ledger.categories().unwrap();
    assert_eq!(first, default_categories());
    assert!(store.get("alice", Collection::Categories).unwrap().is_some());

    ledger.delete_category("1").unwrap();
    let again = ledger.categories().unwrap();
    assert_eq!(again.len(), first.len() - 1);
}

#[test]
fn emptied_category_list_is_not_reseeded() {
    let store = MemoryStore::new();
    store.set("bob", Collection::Categories, "[]").unwrap();
    let ledger = Ledger::new(&store, "bob");
    assert!(ledger.categories().unwrap().is_empty());
}

#[test]
fn users_do_not_see_each_other() {
    let store = MemoryStore::new();
    let alice = Ledger::new(&store, "alice");
    let bob = Ledger::new(&store, "bob");
    alice
        .add_transaction(expense(dec!(5), "1", "2024-03-01 10:00:00"))
        .unwrap();
    assert_eq!(alice.transactions().unwrap().len(), 1);
    assert!(bob.transactions().unwrap().is_empty());
}

#[test]
fn added_transaction_gets_an_id_and_keeps_its_fields() {
    let store = MemoryStore::new();
    let ledger = Ledger::new(&store, "u");
    let tx = ledger
        .add_transaction(expense(dec!(12.30), "2", "2024-03-01 08:15:00"))
        .unwrap();
    assert!(!tx.id.is_empty());
    assert_eq!(tx.description, None);

    let stored = ledger.transaction(&tx.id).unwrap();
    assert_eq!(stored, tx);
    assert_eq!(stored.date, TransactionDate::At(at("2024-03-01 08:15:00")));
    assert_eq!(stored.amount, dec!(12.30));
}

#[test]
fn transaction_must_match_its_category_kind() {
    let store = MemoryStore::new();
    let ledger = Ledger::new(&store, "u");
    // "7" is the default Salary category
    let err = ledger
        .add_transaction(expense(dec!(5), "7", "2024-03-01 10:00:00"))
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    let err = ledger
        .add_transaction(expense(dec!(5), "nope", "2024-03-01 10:00:00"))
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { kind: "Category", .. }));
    assert!(ledger.transactions().unwrap().is_empty());
}

#[test]
fn negative_amounts_are_rejected() {
    let store = MemoryStore::new();
    let ledger = Ledger::new(&store, "u");
    let err = ledger
        .add_transaction(expense(dec!(-5), "1", "2024-03-01 10:00:00"))
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
}

#[test]
fn amounts_above_the_ceiling_are_rejected() {
    let store = MemoryStore::new();
    let ledger = Ledger::new(&store, "u");
    let err = ledger
        .add_transaction(expense(Decimal::MAX, "1", "2024-03-01 10:00:00"))
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    let err = ledger
        .add_transaction(expense(MAX_AMOUNT + dec!(0.01), "1", "2024-03-01 10:00:00"))
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert!(ledger.transactions().unwrap().is_empty());

    let tx = ledger
        .add_transaction(expense(MAX_AMOUNT, "1", "2024-03-01 10:00:00"))
        .unwrap();
    assert_eq!(tx.amount, dec!(1000000000000));

    let mut edited = tx.clone();
    edited.amount = Decimal::MAX;
    assert!(ledger.update_transaction(&edited).is_err());
    assert_eq!(ledger.transaction(&tx.id).unwrap().amount, MAX_AMOUNT);
}

#[test]
fn update_replaces_the_record_in_place() {
    let store = MemoryStore::new();
    let ledger = Ledger::new(&store, "u");
    let mut tx = ledger
        .add_transaction(expense(dec!(5), "1", "2024-03-01 10:00:00"))
        .unwrap();
    tx.amount = dec!(6);
    tx.category_id = "2".to_string();
    ledger.update_transaction(&tx).unwrap();
    assert_eq!(ledger.transaction(&tx.id).unwrap(), tx);

    tx.kind = TransactionKind::Income;
    assert!(ledger.update_transaction(&tx).is_err());

    tx.id = "missing".to_string();
    tx.kind = TransactionKind::Expense;
    let err = ledger.update_transaction(&tx).unwrap_err();
    assert!(matches!(err, StoreError::NotFound { kind: "Transaction", .. }));
}

#[test]
fn bulk_delete_is_all_or_nothing() {
    let store = MemoryStore::new();
    let ledger = Ledger::new(&store, "u");
    let a = ledger
        .add_transaction(expense(dec!(1), "1", "2024-03-01 10:00:00"))
        .unwrap();
    let b = ledger
        .add_transaction(expense(dec!(2), "1", "2024-03-02 10:00:00"))
        .unwrap();
    let c = ledger
        .add_transaction(expense(dec!(3), "1", "2024-03-03 10:00:00"))
        .unwrap();

    let err = ledger
        .delete_transactions(&[a.id.clone(), "ghost".to_string()])
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
    assert_eq!(ledger.transactions().unwrap().len(), 3);

    let removed = ledger.delete_transactions(&[a.id, c.id]).unwrap();
    assert_eq!(removed, 2);
    let left = ledger.transactions().unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].id, b.id);
}

#[test]
fn new_categories_get_palette_colors() {
    let store = MemoryStore::new();
    let ledger = Ledger::new(&store, "u");
    let pets = ledger
        .add_category("Pets", TransactionKind::Expense, None)
        .unwrap();
    assert_eq!(pets.color, PALETTE[10]);

    let gym = ledger
        .add_category(" Gym ", TransactionKind::Expense, Some("#a1b2c3"))
        .unwrap();
    assert_eq!(gym.name, "Gym");
    assert_eq!(gym.color, "#A1B2C3");
    assert_eq!(ledger.find_category("gym", None).unwrap().id, gym.id);
}

#[test]
fn category_validation() {
    let store = MemoryStore::new();
    let ledger = Ledger::new(&store, "u");
    assert!(ledger.add_category("", TransactionKind::Expense, None).is_err());
    assert!(
        ledger
            .add_category("groceries", TransactionKind::Expense, None)
            .is_err()
    );
    // same name is fine for the other kind
    assert!(
        ledger
            .add_category("Groceries", TransactionKind::Income, None)
            .is_ok()
    );
    assert!(ledger.set_category_color("1", "green").is_err());
    assert!(ledger.set_category_color("1", "#12345").is_err());
    assert_eq!(
        ledger.set_category_color("1", "#00ff00").unwrap().color,
        "#00FF00"
    );
}

#[test]
fn deleting_a_category_keeps_its_transactions() {
    let store = MemoryStore::new();
    let ledger = Ledger::new(&store, "u");
    ledger
        .add_transaction(expense(dec!(9), "3", "2024-03-01 10:00:00"))
        .unwrap();
    let removed = ledger.delete_category("3").unwrap();
    assert_eq!(removed.name, "Entertainment");
    let txs = ledger.transactions().unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].category_id, "3");
    assert!(ledger.find_category("3", None).is_err());
}

#[test]
fn damaged_stored_records_are_normalized_or_skipped() {
    let store = MemoryStore::new();
    store
        .set(
            "u",
            Collection::Transactions,
            r#"[
                {"id":"a","amount":250,"type":"expense","categoryId":"1","date":"2024-03-01T10:00:00.000Z"},
                {"id":"b","amount":"-40","type":"expense","categoryId":"1","date":"not a date"},
                {"id":"c","type":"bogus"}
            ]"#,
        )
        .unwrap();
    let ledger = Ledger::new(&store, "u");
    let txs = ledger.transactions().unwrap();
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0].amount, dec!(250));
    assert_eq!(txs[0].date, TransactionDate::At(at("2024-03-01 10:00:00")));
    assert_eq!(txs[1].amount, dec!(40));
    assert_eq!(txs[1].date, TransactionDate::Unparsed("not a date".to_string()));
}

#[test]
fn oversized_stored_amounts_are_skipped() {
    let store = MemoryStore::new();
    store
        .set(
            "u",
            Collection::Transactions,
            r#"[
                {"id":"huge","amount":"79228162514264337593543950335","type":"expense","categoryId":"1","date":"2024-03-02"},
                {"id":"huge-neg","amount":"-79228162514264337593543950335","type":"expense","categoryId":"1","date":"2024-03-02"},
                {"id":"ok","amount":"12","type":"expense","categoryId":"1","date":"2024-03-02"}
            ]"#,
        )
        .unwrap();
    let ledger = Ledger::new(&store, "u");
    let txs = ledger.transactions().unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].id, "ok");
}

#[test]
fn unparsed_dates_survive_a_save() {
    let store = MemoryStore::new();
    store
        .set(
            "u",
            Collection::Transactions,
            r#"[{"id":"x","amount":"1","type":"expense","categoryId":"1","date":"someday"}]"#,
        )
        .unwrap();
    let ledger = Ledger::new(&store, "u");
    ledger
        .add_transaction(expense(dec!(2), "1", "2024-03-01 10:00:00"))
        .unwrap();
    let raw = store.get("u", Collection::Transactions).unwrap().unwrap();
    assert!(raw.contains(r#""date":"someday""#));
    assert!(raw.contains(r#""date":"2024-03-01T10:00:00""#));
}

#[test]
fn sqlite_store_round_trips_collections() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let store = SqliteStore::new(&conn);
    assert!(store.get("u", Collection::Transactions).unwrap().is_none());

    let ledger = Ledger::new(&store, "u");
    let tx = ledger
        .add_transaction(expense(dec!(19.99), "4", "2024-03-01 19:30:00"))
        .unwrap();

    // a second store over the same connection sees the same data
    let reopened = SqliteStore::new(&conn);
    let ledger = Ledger::new(&reopened, "u");
    assert_eq!(ledger.transactions().unwrap(), vec![tx]);
    assert_eq!(ledger.categories().unwrap().len(), 10);

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM collections WHERE user_id='u'", [], |r| r.get(0))
        .unwrap();
    assert_eq!(rows, 2);
}
