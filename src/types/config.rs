//! Relay configuration

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Cli;

/// Environment variable naming Banjo's permission socket
pub const SOCKET_ENV_VAR: &str = "BANJO_PERMISSION_SOCKET";

/// Time budget for the whole connect/send/receive exchange.
/// Dominated by the human making a decision.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for a single relay invocation
///
/// Resolved once at startup and passed explicitly into the relay so that
/// nothing downstream reads the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Path of the approval authority's Unix socket
    /// Environment variable: `BANJO_PERMISSION_SOCKET`
    pub socket_path: Option<PathBuf>,

    /// Cumulative deadline for connect, write and read
    pub timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            socket_path: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RelayConfig {
    /// Create a configuration pointing at a socket
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: Some(socket_path.into()),
            ..Self::default()
        }
    }

    /// Override the exchange deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from environment variables
    ///
    /// An empty `BANJO_PERMISSION_SOCKET` counts as unset.
    pub fn from_env() -> Self {
        Self {
            socket_path: std::env::var_os(SOCKET_ENV_VAR)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from),
            ..Self::default()
        }
    }

    /// Build configuration from parsed command-line arguments
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            socket_path: cli
                .socket
                .clone()
                .filter(|path| !path.as_os_str().is_empty()),
            timeout: Duration::from_secs(cli.timeout_secs),
        }
    }

    /// Socket path, if an approval authority is configured
    pub fn endpoint(&self) -> Option<&Path> {
        self.socket_path.as_deref()
    }
}
