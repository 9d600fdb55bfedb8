//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use ledger_grid::grid::Grid;
use ledger_grid::model::{financial_record_columns, Record, RecordId};
use ledger_grid::store::RecordStore;

/// One call received by a [`RecordingStore`]
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Update(RecordId, Record),
    Delete(RecordId),
}

/// Store that records every call and changes nothing
#[derive(Debug, Default)]
pub struct RecordingStore {
    calls: RefCell<Vec<StoreCall>>,
}

impl RecordingStore {
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.borrow().clone()
    }

    pub fn updates(&self) -> Vec<(RecordId, Record)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                StoreCall::Update(id, patch) => Some((id, patch)),
                StoreCall::Delete(_) => None,
            })
            .collect()
    }

    pub fn deletes(&self) -> Vec<RecordId> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                StoreCall::Delete(id) => Some(id),
                StoreCall::Update(..) => None,
            })
            .collect()
    }
}

impl RecordStore for RecordingStore {
    fn update_record(&self, id: &RecordId, patch: Record) {
        self.calls
            .borrow_mut()
            .push(StoreCall::Update(id.clone(), patch));
    }

    fn delete_record(&self, id: &RecordId) {
        self.calls.borrow_mut().push(StoreCall::Delete(id.clone()));
    }
}

/// Three financial records with ids "1", "2" and "42"
pub fn sample_records() -> Vec<Record> {
    vec![
        Record::new("1")
            .with("description", "Rent")
            .with("amount", 100.0)
            .with("category", "Housing")
            .with("paymentMethod", "Transfer"),
        Record::new("2")
            .with("description", "Coffee")
            .with("amount", 0.0)
            .with("category", "Food"),
        Record::new("42")
            .with("description", "Train")
            .with("amount", 12.5)
            .with("category", "Travel")
            .with("paymentMethod", "Card"),
    ]
}

/// Grid over the financial columns backed by a recording store
pub fn test_grid(records: Vec<Record>) -> (Grid, Rc<RecordingStore>) {
    let store = Rc::new(RecordingStore::default());
    let grid = Grid::new(
        financial_record_columns(),
        Rc::from(records),
        store.clone(),
    );
    (grid, store)
}
