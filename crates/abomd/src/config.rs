//! Service configuration from flags and environment.

use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use clap::Parser;

/// Origins of the bundled web frontends.
pub const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:5173"];

/// 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Parser)]
#[command(name = "abomd")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "ABOM Risk Scoring Engine HTTP service", long_about = None)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "ABOMD_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "ABOMD_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Allowed CORS origins (comma-separated)
    #[arg(
        long = "cors-origin",
        env = "ABOMD_CORS_ORIGINS",
        value_delimiter = ',',
        default_values = DEFAULT_CORS_ORIGINS
    )]
    pub cors_origins: Vec<String>,

    /// Maximum accepted upload size in bytes
    #[arg(long, env = "ABOMD_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    /// Emit JSON-formatted log lines
    #[arg(long, env = "ABOMD_LOG_JSON")]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Parse configured origins into header values, skipping blanks.
    pub fn cors_header_values(&self) -> Result<Vec<HeaderValue>> {
        self.cors_origins
            .iter()
            .map(|o| o.trim())
            .filter(|o| !o.is_empty())
            .map(|o| HeaderValue::from_str(o).with_context(|| format!("invalid CORS origin {o:?}")))
            .collect()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8000,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            json: false,
            verbose: false,
        }
    }
}
