//! Engine under concurrent writers and readers

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::thread;

use chrono::{Days, NaiveDate};
use symbology_core::rules::invariants::validate_store;
use symbology_core::{ExErrorKind, NoSnapshot, RecordStore, ReassignmentPolicy};
use symbology_engine::{
    Engine, EngineCommand, EngineCommandResult, EngineQuery, EngineQueryResult, SymbologyService,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn engine(policy: ReassignmentPolicy) -> Arc<Engine<NoSnapshot>> {
    Arc::new(Engine::new(SymbologyService::new(
        RecordStore::new(),
        NoSnapshot,
        policy,
    )))
}

#[test]
fn test_racing_creates_for_one_symbol_admit_exactly_one() {
    let engine = engine(ReassignmentPolicy::StrictReject);

    let handles: Vec<_> = (1..=16u64)
        .map(|identifier| {
            let engine = engine.clone();
            thread::spawn(move || {
                engine.apply_engine_command(EngineCommand::MappingCreate {
                    symbol: "AAPL".to_string(),
                    identifier,
                    start_date: d(2024, 1, 1),
                })
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let accepted = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(accepted, 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| e.kind() == ExErrorKind::Conflict));
}

#[test]
fn test_concurrent_mixed_workload_keeps_invariants() {
    let engine = engine(ReassignmentPolicy::AutoTerminate);
    let symbols = ["AAPL", "MSFT", "META", "GOOG"];

    let writers: Vec<_> = (0..8u64)
        .map(|worker| {
            let engine = engine.clone();
            thread::spawn(move || {
                for step in 0..25u64 {
                    let date = d(2024, 1, 1)
                        .checked_add_days(Days::new(step * 3 + worker))
                        .unwrap();
                    let symbol = symbols[((worker + step) % 4) as usize].to_string();
                    let cmd = if step % 5 == 4 {
                        EngineCommand::MappingTerminate {
                            symbol,
                            end_date: date,
                        }
                    } else {
                        EngineCommand::MappingCreate {
                            symbol,
                            identifier: (worker * step) % 6 + 1,
                            start_date: date,
                        }
                    };
                    engine.apply_engine_command(cmd).ok();
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let engine = engine.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    let result = engine
                        .apply_engine_query(EngineQuery::MappingsBetween {
                            begin: d(2024, 1, 1),
                            end: d(2025, 1, 1),
                        })
                        .unwrap();
                    assert!(matches!(result, EngineQueryResult::Mappings(_)));
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    let engine = Arc::try_unwrap(engine).ok().unwrap();
    let service = engine.into_inner().unwrap();
    assert!(validate_store(service.store()).is_ok());
}

#[test]
fn test_command_and_query_surfaces() {
    let engine = engine(ReassignmentPolicy::StrictReject);

    let created = engine
        .apply_engine_command(EngineCommand::MappingCreate {
            symbol: "AAPL".to_string(),
            identifier: 1,
            start_date: d(2024, 1, 1),
        })
        .unwrap();
    assert!(matches!(created, EngineCommandResult::MappingCreated(_)));

    let terminated = engine
        .apply_engine_command(EngineCommand::MappingTerminate {
            symbol: "AAPL".to_string(),
            end_date: d(2024, 1, 5),
        })
        .unwrap();
    assert_eq!(terminated.record().end_date, Some(d(2024, 1, 5)));

    assert_eq!(
        engine
            .apply_engine_query(EngineQuery::IdentifierBySymbol {
                symbol: "AAPL".to_string(),
                date: d(2024, 1, 4),
            })
            .unwrap(),
        EngineQueryResult::Identifier(1)
    );
    assert_eq!(
        engine
            .apply_engine_query(EngineQuery::SymbolByIdentifier {
                identifier: 1,
                date: d(2024, 1, 1),
            })
            .unwrap(),
        EngineQueryResult::Symbol("AAPL".to_string())
    );
    let not_found = engine
        .apply_engine_query(EngineQuery::MappingLookup {
            symbol: "AAPL".to_string(),
            date: d(2024, 1, 5),
        })
        .unwrap_err();
    assert_eq!(not_found.kind(), ExErrorKind::NotFound);

    match engine.apply_engine_query(EngineQuery::Records).unwrap() {
        EngineQueryResult::Mappings(records) => assert_eq!(records.len(), 1),
        other => panic!("unexpected result {:?}", other),
    }
    assert_eq!(
        engine.apply_engine_query(EngineQuery::Audit).unwrap(),
        EngineQueryResult::Violations(Vec::new())
    );
    assert_eq!(engine.policy().unwrap(), ReassignmentPolicy::StrictReject);
}
