//! Data access for the OSRM batch router.
//!
//! Responsibilities:
//! - Check that a prepared OSRM dataset is complete for an algorithm.
//! - Launch and supervise a private `osrm-routed` process.
//! - Speak the OSRM Route service JSON protocol over HTTP.
//!
//! Boundaries:
//! - Do not encode record or batch rules (live in `batchroute-core` and
//!   `batchroute-cli`).
//!
//! Invariants:
//! - Every launched engine process is terminated when its handle drops.
//! - No global mutable state.
#![forbid(unsafe_code)]

pub mod dataset;
pub mod routing;

pub use dataset::{Dataset, DatasetError};
pub use routing::{
    DEFAULT_USER_AGENT, EngineStartError, OsrmRouteClient, OsrmRoutedConfig, OsrmRoutedEngine,
};
