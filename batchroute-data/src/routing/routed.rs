//! Supervision of an `osrm-routed` child process.

use std::net::{Ipv4Addr, SocketAddr, TcpListener, TcpStream};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use batchroute_core::{EngineConfig, EngineFailure, EngineResponse, RouteEngine, RouteRequest};
use camino::Utf8PathBuf;

use super::client::{DEFAULT_USER_AGENT, OsrmRouteClient};
use super::error::EngineStartError;

/// Loading a large dataset from disk can take minutes.
const DEFAULT_STARTUP_TIMEOUT: Duration = Duration::from_secs(300);
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How to launch `osrm-routed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsrmRoutedConfig {
    /// Executable to run; looked up on `PATH` when not a path.
    pub executable: Utf8PathBuf,
    /// How long to wait for the engine to accept connections.
    pub startup_timeout: Duration,
    /// User agent sent with route requests.
    pub user_agent: String,
}

impl Default for OsrmRoutedConfig {
    fn default() -> Self {
        Self {
            executable: Utf8PathBuf::from("osrm-routed"),
            startup_timeout: DEFAULT_STARTUP_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl OsrmRoutedConfig {
    /// Use `executable` instead of the one on `PATH`.
    #[must_use]
    pub fn with_executable(mut self, executable: impl Into<Utf8PathBuf>) -> Self {
        self.executable = executable.into();
        self
    }

    /// Wait at most `timeout` for the engine to come up.
    #[must_use]
    pub const fn with_startup_timeout(mut self, timeout: Duration) -> Self {
        self.startup_timeout = timeout;
        self
    }
}

/// A running `osrm-routed` serving one dataset on a loopback port.
///
/// The process is killed when the engine is dropped.
#[derive(Debug)]
pub struct OsrmRoutedEngine {
    child: Child,
    client: OsrmRouteClient,
    address: SocketAddr,
}

impl OsrmRoutedEngine {
    /// Launch `osrm-routed` for `config` and wait until it accepts
    /// connections.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be launched, exits during
    /// start-up, or does not listen within the configured timeout.
    pub fn start(config: &EngineConfig, routed: &OsrmRoutedConfig) -> Result<Self, EngineStartError> {
        let address = reserve_loopback_port()?;
        let client =
            OsrmRouteClient::with_user_agent(format!("http://{address}"), &routed.user_agent)?;

        let mut command = Command::new(routed.executable.as_std_path());
        command
            .arg("--algorithm")
            .arg(config.algorithm().as_str())
            .arg("--ip")
            .arg(address.ip().to_string())
            .arg("--port")
            .arg(address.port().to_string());
        if config.uses_shared_memory() {
            command.arg("--shared-memory");
        }
        command
            .arg(config.data_source().as_std_path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit());

        log::info!(
            "starting {} with {} on {} ({address})",
            routed.executable,
            config.algorithm(),
            config.data_source()
        );
        let child = command.spawn().map_err(|source| EngineStartError::Spawn {
            executable: routed.executable.clone(),
            source,
        })?;

        let mut engine = Self {
            child,
            client,
            address,
        };
        engine.wait_until_ready(routed.startup_timeout)?;
        log::info!("osrm-routed ready on {address}");
        Ok(engine)
    }

    /// Address the engine listens on.
    #[must_use]
    pub const fn address(&self) -> SocketAddr {
        self.address
    }

    fn wait_until_ready(&mut self, timeout: Duration) -> Result<(), EngineStartError> {
        // Timeouts too large to represent mean waiting indefinitely.
        let deadline = Instant::now().checked_add(timeout);
        loop {
            if let Some(status) = self.child.try_wait().map_err(EngineStartError::Supervise)? {
                return Err(EngineStartError::ExitedEarly { status });
            }
            if TcpStream::connect_timeout(&self.address, POLL_INTERVAL).is_ok() {
                return Ok(());
            }
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                return Err(EngineStartError::StartupTimeout {
                    timeout_secs: timeout.as_secs(),
                });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

/// Ask the OS for a free loopback port. The listener is closed before the
/// engine binds, so another process could take the port in between.
fn reserve_loopback_port() -> Result<SocketAddr, EngineStartError> {
    let listener =
        TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).map_err(EngineStartError::ReservePort)?;
    listener.local_addr().map_err(EngineStartError::ReservePort)
}

impl RouteEngine for OsrmRoutedEngine {
    fn route(&self, request: &RouteRequest) -> Result<EngineResponse, EngineFailure> {
        self.client.route(request)
    }
}

impl Drop for OsrmRoutedEngine {
    fn drop(&mut self) {
        if let Err(err) = self.child.kill() {
            log::warn!("failed to stop osrm-routed: {err}");
        }
        match self.child.wait() {
            Ok(status) => log::debug!("osrm-routed exited with {status}"),
            Err(err) => log::warn!("failed to reap osrm-routed: {err}"),
        }
    }
}
