//! Property tests: any sequence of accepted operations keeps the history
//! free of overlaps and never rewrites an end date.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use symbology_core::ops::mapping_ops::{add_mapping, terminate_mapping};
use symbology_core::rules::invariants::{
    find_identifier_overlaps, find_malformed_intervals, find_symbol_overlaps, validate_store,
};
use symbology_core::{MappingRecord, RecordStore, ReassignmentPolicy};

const SYMBOLS: [&str; 4] = ["AAPL", "MSFT", "META", "GOOG"];

#[derive(Debug, Clone)]
enum Op {
    Add {
        symbol: usize,
        identifier: u64,
        day: u64,
        auto: bool,
    },
    Terminate {
        symbol: usize,
        day: u64,
    },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..SYMBOLS.len(), 1u64..6, 0u64..90, any::<bool>()).prop_map(
            |(symbol, identifier, day, auto)| Op::Add {
                symbol,
                identifier,
                day,
                auto,
            }
        ),
        (0..SYMBOLS.len(), 0u64..90).prop_map(|(symbol, day)| Op::Terminate { symbol, day }),
    ]
}

fn day(offset: u64) -> NaiveDate {
    common::d(2024, 1, 1)
        .checked_add_days(Days::new(offset))
        .unwrap()
}

fn run(store: &mut RecordStore, op: &Op) -> bool {
    match *op {
        Op::Add {
            symbol,
            identifier,
            day: offset,
            auto,
        } => {
            let policy = if auto {
                ReassignmentPolicy::AutoTerminate
            } else {
                ReassignmentPolicy::StrictReject
            };
            add_mapping(store, policy, SYMBOLS[symbol], identifier, day(offset)).is_ok()
        }
        Op::Terminate { symbol, day: offset } => {
            terminate_mapping(store, SYMBOLS[symbol], day(offset)).is_ok()
        }
    }
}

/// Start dates, keys and set end dates of `before` are unchanged in `after`
fn history_preserved(before: &[MappingRecord], after: &[MappingRecord]) -> bool {
    after.len() >= before.len()
        && before.iter().zip(after).all(|(old, new)| {
            old.symbol == new.symbol
                && old.identifier == new.identifier
                && old.start_date == new.start_date
                && (old.end_date.is_none() || old.end_date == new.end_date)
        })
}

proptest! {
    #[test]
    fn prop_accepted_operations_keep_keys_unique(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let mut store = RecordStore::new();

        for op in &ops {
            run(&mut store, op);

            prop_assert!(find_symbol_overlaps(&store).is_empty(), "symbol overlap after {:?}", op);
            prop_assert!(find_identifier_overlaps(&store).is_empty(), "identifier overlap after {:?}", op);
            prop_assert!(find_malformed_intervals(&store).is_empty(), "malformed interval after {:?}", op);
        }

        prop_assert!(validate_store(&store).is_ok());
    }

    #[test]
    fn prop_history_is_append_and_close_only(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let mut store = RecordStore::new();

        for op in &ops {
            let before = store.records().to_vec();
            let accepted = run(&mut store, op);

            prop_assert!(history_preserved(&before, store.records()));
            if !accepted {
                prop_assert_eq!(store.records(), before.as_slice(), "rejected {:?} mutated the store", op);
            }
        }
    }

    #[test]
    fn prop_strict_add_on_free_keys_always_succeeds(offset in 0u64..365, identifier in 1u64..1000) {
        let mut store = RecordStore::new();
        let record = add_mapping(
            &mut store,
            ReassignmentPolicy::StrictReject,
            "FREE",
            identifier,
            day(offset),
        );
        prop_assert!(record.is_ok());
        prop_assert_eq!(store.len(), 1);
    }
}
