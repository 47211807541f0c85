//! Command-line configuration for the development peer.

use clap::Parser;

/// The default port (the conventional chaincode listen port)
pub const DEFAULT_PORT: u16 = 7052;

/// The default host the peer binds to
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Peer configuration
#[derive(Debug, Clone, Parser)]
#[command(
    name = "studentcc",
    version,
    about = "Student record chaincode served from an in-memory development peer"
)]
pub struct Config {
    /// Host to bind to
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Log filter used when RUST_LOG is unset (e.g. "info", "studentcc=debug")
    #[arg(short, long, default_value = "info")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Returns the bind address as a string
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
