//! Symbology CLI
//!
//! Command-line interface for the symbol ↔ identifier mapping history

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "symbology")]
#[command(about = "Symbology - temporal symbol/identifier mappings", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: commands::GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create a mapping from a start date onwards
    Add(commands::mapping::AddArgs),
    /// Terminate the mapping active for a symbol
    Terminate(commands::mapping::TerminateArgs),
    /// Identifier a symbol meant on a date
    Identifier(commands::query::IdentifierArgs),
    /// Symbol an identifier meant on a date
    Symbol(commands::query::SymbolArgs),
    /// Mappings intersecting [BEGIN, END), one JSON object per line
    Range(commands::query::RangeArgs),
    /// Check the snapshot for overlapping or malformed records
    Audit,
    /// Serve the HTTP API
    Serve(commands::serve::ServeArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = cli.global.settings().and_then(|settings| match cli.command {
        Commands::Add(args) => commands::mapping::execute_add(&settings, args),
        Commands::Terminate(args) => commands::mapping::execute_terminate(&settings, args),
        Commands::Identifier(args) => commands::query::execute_identifier(&settings, args),
        Commands::Symbol(args) => commands::query::execute_symbol(&settings, args),
        Commands::Range(args) => commands::query::execute_range(&settings, args),
        Commands::Audit => commands::audit::execute(&settings),
        Commands::Serve(args) => commands::serve::execute(&settings, args),
    });

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
