//! HTTP server command
//!
//! Usage: symbology serve [--bind <ADDR>] [--workers <N>]

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use symbology_engine::SymbologyConfig;
use symbology_http::HttpServer;

use super::open_engine;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Listen address, overrides [http] bind
    #[arg(long)]
    pub bind: Option<String>,

    /// Worker threads, overrides [http] workers
    #[arg(long)]
    pub workers: Option<usize>,
}

/// Execute serve; runs until the process is stopped
pub fn execute(settings: &SymbologyConfig, args: ServeArgs) -> Result<()> {
    let bind = args.bind.unwrap_or_else(|| settings.http.bind.clone());
    let workers = args.workers.unwrap_or(settings.http.workers);

    let engine = Arc::new(open_engine(settings));
    let server = HttpServer::bind(&bind, engine, workers)?;
    if let Some(addr) = server.local_addr() {
        println!("symbology listening on {}", addr);
    }
    server.run()?;
    Ok(())
}
