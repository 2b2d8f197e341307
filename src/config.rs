// src/config.rs
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ORIGIN: &str = "https://jb24000.github.io";

/// Command line / environment configuration for the dashboard server.
#[derive(Parser, Debug, Clone)]
#[command(name = "deal-sheet", version, about = "Wholesaling deal dashboard")]
pub struct AppConfig {
    /// Address the HTTP server binds to
    #[arg(long, env = "DEAL_SHEET_ADDR", default_value = "127.0.0.1:3000")]
    pub addr: SocketAddr,

    /// SQLite file holding the persisted document
    #[arg(long, env = "DEAL_SHEET_DB", default_value = "deal_sheet.sqlite3")]
    pub db: PathBuf,

    /// Base URL of the remote deals API. Sync is disabled when unset.
    #[arg(long, env = "DEALS_API_URL")]
    pub deals_api: Option<String>,

    /// Origin header sent with every deals API call
    #[arg(long, env = "DEALS_API_ORIGIN", default_value = DEFAULT_ORIGIN)]
    pub origin: String,

    /// Optional JSON file replacing the built-in workflow table
    #[arg(long, env = "DEAL_SHEET_WORKFLOW")]
    pub workflow: Option<PathBuf>,

    /// Worker threads for the HTTP server
    #[arg(long, default_value_t = 8)]
    pub workers: usize,

    /// Timeout applied to every outbound HTTP call
    #[arg(long, default_value_t = 30)]
    pub http_timeout_secs: u64,

    /// Skip the remote pull on startup
    #[arg(long)]
    pub no_sync: bool,
}

impl AppConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
