//! Command-line surface and host configuration.
//!
//! Every connection and editor setting has an environment fallback so a
//! `.env` file (loaded through `dotenvy`) can stand in for flags.

use clap::{ArgAction, Parser, Subcommand};
use floor_canvas::config::{ConfigUpdate, EditorConfig};
use floor_canvas::consts::DEFAULT_GRID_SIZE;
use floor_store::config::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS};
use floor_store::{StoreConfig, StoreError, StoreTimeouts};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("cannot open script {path}: {source}")]
    OpenScript { path: String, source: std::io::Error },
    #[error("cannot read script: {0}")]
    ReadScript(#[source] std::io::Error),
    #[error("script line {line}: {message}")]
    Script { line: usize, message: String },
    #[error("cannot write output: {0}")]
    Write(#[source] std::io::Error),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "mapdesk", about = "Floor-plan map editor tools")]
pub struct Cli {
    #[arg(long, env = "MAPDESK_BASE_URL", default_value = "http://127.0.0.1:5000/api")]
    pub base_url: String,

    #[arg(long, env = "MAPDESK_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[arg(long, env = "MAPDESK_FLOOR_PLAN_ID")]
    pub floor_plan_id: Option<String>,

    #[arg(long, env = "MAPDESK_GRID_SIZE", default_value_t = DEFAULT_GRID_SIZE)]
    pub grid_size: f64,

    #[arg(long, env = "MAPDESK_SNAP", default_value_t = true, action = ArgAction::Set)]
    pub snap: bool,

    #[arg(long, env = "MAPDESK_REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,

    #[arg(long, env = "MAPDESK_CONNECT_TIMEOUT_SECS", default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS)]
    pub connect_timeout_secs: u64,

    /// Log level for stderr output.
    #[arg(long, env = "MAPDESK_LOG", default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the floor plan and print quick-find results.
    Search {
        /// Matched against name, description, category and type. Empty lists everything.
        #[arg(default_value = "")]
        query: String,
    },
    /// Drive an editing session from a JSON-lines script.
    Replay {
        #[arg(long, default_value = "-", help = "Script file path, or - for stdin")]
        input: String,

        /// Do not contact the backend; mutations are printed instead of sent.
        #[arg(long, default_value_t = false)]
        offline: bool,
    },
}

impl Cli {
    /// Backend connection settings.
    ///
    /// # Errors
    ///
    /// `StoreError::Config` for an unusable base URL.
    pub fn store_config(&self) -> Result<StoreConfig, StoreError> {
        let timeouts = StoreTimeouts { request_secs: self.request_timeout_secs, connect_secs: self.connect_timeout_secs };
        StoreConfig::new(&self.base_url, self.token.clone(), timeouts)
    }

    /// Editor configuration passed into the engine at construction.
    #[must_use]
    pub fn editor_config(&self) -> EditorConfig {
        let mut config = EditorConfig::default();
        config.apply(ConfigUpdate::SetSnapToGrid { enabled: self.snap });
        config.apply(ConfigUpdate::SetGridSize { size: self.grid_size });
        config
    }

    /// Floor plan id with blank values treated as unset.
    #[must_use]
    pub fn floor_plan(&self) -> Option<&str> {
        self.floor_plan_id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
