//! Service configuration from command-line flags and environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::ingestion::IngestionFormat;

/// Default dataset location, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "data/gym_exercise_dataset.csv";

/// Read-only HTTP API over an exercise dataset.
#[derive(Debug, Clone, Parser)]
#[command(name = "exercise-query-service", version, about)]
pub struct ServiceConfig {
    /// Dataset file (CSV, JSON/NDJSON or Parquet).
    #[arg(long, env = "EXERCISE_DATA_PATH", default_value = DEFAULT_DATA_PATH)]
    pub data_path: PathBuf,

    /// Force the dataset format instead of inferring it from the file extension.
    #[arg(long, env = "EXERCISE_DATA_FORMAT")]
    pub format: Option<IngestionFormat>,

    /// Address to bind.
    #[arg(long, env = "EXERCISE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind.
    #[arg(long, env = "EXERCISE_PORT", default_value_t = 8000)]
    pub port: u16,
}

impl ServiceConfig {
    /// `host:port` as a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}
