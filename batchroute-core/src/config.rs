//! Engine configuration resolved once per process.

use std::fmt;
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

/// Shortest-path algorithm the engine should load its dataset for.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Contraction hierarchies.
    #[default]
    Ch,
    /// Multi-level Dijkstra.
    Mld,
}

impl Algorithm {
    /// Name used on the engine command line and in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ch => "CH",
            Self::Mld => "MLD",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an algorithm name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid algorithm {name:?} (expected CH or MLD)")]
pub struct AlgorithmParseError {
    /// The rejected input.
    pub name: String,
}

impl FromStr for Algorithm {
    type Err = AlgorithmParseError;

    /// Parse an algorithm name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("ch") {
            Ok(Self::Ch)
        } else if s.eq_ignore_ascii_case("mld") {
            Ok(Self::Mld)
        } else {
            Err(AlgorithmParseError { name: s.to_owned() })
        }
    }
}

/// Immutable configuration used to construct the routing engine.
///
/// Shared memory is never enabled: every engine built from this
/// configuration loads its own private copy of the data source.
///
/// # Examples
///
/// ```
/// use batchroute_core::{Algorithm, EngineConfig};
///
/// let config = EngineConfig::new(Algorithm::Mld, "berlin.osrm");
/// assert_eq!(config.algorithm(), Algorithm::Mld);
/// assert_eq!(config.data_source(), "berlin.osrm");
/// assert!(!config.uses_shared_memory());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    algorithm: Algorithm,
    data_source: Utf8PathBuf,
    shared_memory: bool,
}

impl EngineConfig {
    /// Build a configuration loading `data_source` for `algorithm`.
    #[must_use]
    pub fn new(algorithm: Algorithm, data_source: impl Into<Utf8PathBuf>) -> Self {
        Self {
            algorithm,
            data_source: data_source.into(),
            shared_memory: false,
        }
    }

    /// Algorithm the dataset was prepared for.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Base path of the prepared dataset.
    #[must_use]
    pub fn data_source(&self) -> &Utf8Path {
        &self.data_source
    }

    /// Whether the engine attaches to a shared-memory dataset.
    #[must_use]
    pub const fn uses_shared_memory(&self) -> bool {
        self.shared_memory
    }
}
