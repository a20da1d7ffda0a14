use std::io;
use std::process::ExitStatus;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while bringing up an OSRM engine.
#[derive(Debug, Error)]
pub enum EngineStartError {
    /// No loopback port could be reserved for the engine.
    #[error("failed to reserve a loopback port for osrm-routed: {0}")]
    ReservePort(#[source] io::Error),
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] io::Error),
    /// The engine executable could not be launched.
    #[error("failed to launch {executable:?}: {source}")]
    Spawn {
        /// Executable that was launched.
        executable: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The engine process could not be polled.
    #[error("failed to poll osrm-routed: {0}")]
    Supervise(#[source] io::Error),
    /// The engine process exited before accepting connections.
    #[error("osrm-routed exited before it was ready ({status})")]
    ExitedEarly {
        /// Exit status of the process.
        status: ExitStatus,
    },
    /// The engine did not accept connections in time.
    #[error("osrm-routed was not ready after {timeout_secs}s")]
    StartupTimeout {
        /// Configured startup timeout.
        timeout_secs: u64,
    },
}
