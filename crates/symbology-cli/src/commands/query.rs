//! Read-only commands
//!
//! Usage:
//!   symbology identifier <SYMBOL> <DATE>
//!   symbology symbol <IDENTIFIER> <DATE>
//!   symbology range <BEGIN> <END>

use anyhow::{bail, Result};
use clap::Args;
use symbology_core::rules::validation::{parse_date, validate_identifier, validate_symbol};
use symbology_engine::{EngineQuery, EngineQueryResult, SymbologyConfig};

use super::{open_engine, print_record};

#[derive(Debug, Args)]
pub struct IdentifierArgs {
    pub symbol: String,
    /// YYYY-MM-DD
    pub date: String,
}

#[derive(Debug, Args)]
pub struct SymbolArgs {
    #[arg(allow_negative_numbers = true)]
    pub identifier: i64,
    /// YYYY-MM-DD
    pub date: String,
}

#[derive(Debug, Args)]
pub struct RangeArgs {
    /// Inclusive window start (YYYY-MM-DD)
    pub begin: String,
    /// Exclusive window end (YYYY-MM-DD)
    pub end: String,
}

/// Execute identifier lookup
pub fn execute_identifier(settings: &SymbologyConfig, args: IdentifierArgs) -> Result<()> {
    validate_symbol(&args.symbol)?;
    let date = parse_date(&args.date)?;

    let engine = open_engine(settings);
    match engine.apply_engine_query(EngineQuery::IdentifierBySymbol {
        symbol: args.symbol,
        date,
    })? {
        EngineQueryResult::Identifier(identifier) => println!("{}", identifier),
        other => bail!("unexpected engine result: {:?}", other),
    }
    Ok(())
}

/// Execute symbol lookup
pub fn execute_symbol(settings: &SymbologyConfig, args: SymbolArgs) -> Result<()> {
    let identifier = validate_identifier(args.identifier)?;
    let date = parse_date(&args.date)?;

    let engine = open_engine(settings);
    match engine.apply_engine_query(EngineQuery::SymbolByIdentifier { identifier, date })? {
        EngineQueryResult::Symbol(symbol) => println!("{}", symbol),
        other => bail!("unexpected engine result: {:?}", other),
    }
    Ok(())
}

/// Execute range query
pub fn execute_range(settings: &SymbologyConfig, args: RangeArgs) -> Result<()> {
    let begin = parse_date(&args.begin)?;
    let end = parse_date(&args.end)?;

    let engine = open_engine(settings);
    match engine.apply_engine_query(EngineQuery::MappingsBetween { begin, end })? {
        EngineQueryResult::Mappings(records) => {
            for record in &records {
                print_record(record)?;
            }
        }
        other => bail!("unexpected engine result: {:?}", other),
    }
    Ok(())
}
