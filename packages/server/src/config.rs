//! Runtime configuration.

use std::{path::PathBuf, time::Duration};

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "duet-server")]
#[command(about = "Real-time presence, chat and canvas collaboration server", long_about = None)]
pub struct Config {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "DUET_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "DUET_PORT", default_value = "4000")]
    pub port: u16,

    /// HS256 secret used to verify bearer tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Upper bound for each durable-store call, in milliseconds
    #[arg(long, env = "DUET_STORE_TIMEOUT_MS", default_value = "5000")]
    pub store_timeout_ms: u64,

    /// JSON file with user profiles for the user directory
    #[arg(long, env = "DUET_USERS_FILE")]
    pub users_file: Option<PathBuf>,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, env = "DUET_LOG_LEVEL", default_value = "debug")]
    pub log_level: String,
}

impl Config {
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}
