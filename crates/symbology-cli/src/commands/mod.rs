//! Subcommands and the settings they share

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use symbology_core::logging_facility::{self, Profile};
use symbology_core::{MappingRecord, ReassignmentPolicy};
use symbology_engine::{Engine, SymbologyConfig, SymbologyService};
use symbology_store::JsonSnapshotFile;

pub mod audit;
pub mod mapping;
pub mod query;
pub mod serve;

/// Flags accepted by every subcommand; they override the config file
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Snapshot file holding the mapping history
    #[arg(long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Reassignment policy: strict-reject or auto-terminate
    #[arg(long, global = true)]
    pub policy: Option<ReassignmentPolicy>,

    /// Log profile: development, production or test
    #[arg(long = "log", global = true)]
    pub log_profile: Option<Profile>,
}

impl GlobalArgs {
    /// Load the config file, apply flag overrides and start logging
    pub fn settings(&self) -> Result<SymbologyConfig> {
        let mut config = SymbologyConfig::load(self.config.as_deref())
            .context("failed to load configuration")?;

        if let Some(snapshot) = &self.snapshot {
            config.snapshot_path = snapshot.clone();
        }
        if let Some(policy) = self.policy {
            config.policy = policy;
        }
        if let Some(profile) = self.log_profile {
            config.log_profile = profile;
        }

        logging_facility::init(config.log_profile);
        Ok(config)
    }
}

/// Engine over the configured snapshot file
pub fn open_engine(settings: &SymbologyConfig) -> Engine<JsonSnapshotFile> {
    let snapshot = JsonSnapshotFile::new(&settings.snapshot_path);
    Engine::new(SymbologyService::open(snapshot, settings.policy))
}

/// One record as a single JSON line
pub fn print_record(record: &MappingRecord) -> Result<()> {
    println!("{}", serde_json::to_string(record)?);
    Ok(())
}
