//! Mutating commands
//!
//! Usage:
//!   symbology add <SYMBOL> <IDENTIFIER> <START_DATE>
//!   symbology terminate <SYMBOL> <END_DATE>

use anyhow::Result;
use clap::Args;
use symbology_core::rules::validation::{parse_date, validate_identifier, validate_symbol};
use symbology_engine::{EngineCommand, SymbologyConfig};

use super::{open_engine, print_record};

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Symbol, 1-12 ASCII letters
    pub symbol: String,

    /// Positive integer identifier
    #[arg(allow_negative_numbers = true)]
    pub identifier: i64,

    /// First day of validity (YYYY-MM-DD)
    pub start_date: String,
}

#[derive(Debug, Args)]
pub struct TerminateArgs {
    /// Symbol whose active mapping is closed
    pub symbol: String,

    /// First day the mapping no longer applies (YYYY-MM-DD)
    pub end_date: String,
}

/// Execute add
pub fn execute_add(settings: &SymbologyConfig, args: AddArgs) -> Result<()> {
    validate_symbol(&args.symbol)?;
    let identifier = validate_identifier(args.identifier)?;
    let start_date = parse_date(&args.start_date)?;

    let engine = open_engine(settings);
    let result = engine.apply_engine_command(EngineCommand::MappingCreate {
        symbol: args.symbol,
        identifier,
        start_date,
    })?;
    print_record(result.record())
}

/// Execute terminate
pub fn execute_terminate(settings: &SymbologyConfig, args: TerminateArgs) -> Result<()> {
    validate_symbol(&args.symbol)?;
    let end_date = parse_date(&args.end_date)?;

    let engine = open_engine(settings);
    let result = engine.apply_engine_command(EngineCommand::MappingTerminate {
        symbol: args.symbol,
        end_date,
    })?;
    print_record(result.record())
}
