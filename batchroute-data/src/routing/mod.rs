//! OSRM-backed route engine.
//!
//! This module provides [`OsrmRoutedEngine`], an implementation of
//! [`batchroute_core::RouteEngine`] that launches a private `osrm-routed`
//! process for the configured dataset and queries its Route service over
//! loopback HTTP.
//!
//! # Architecture
//!
//! [`OsrmRouteClient`] speaks the HTTP protocol and can be pointed at any
//! Route service. [`OsrmRoutedEngine`] owns the child process and a client
//! bound to it; dropping the engine stops the process. The
//! [`RouteEngine`](batchroute_core::RouteEngine) trait is synchronous, so
//! the client blocks on its own Tokio runtime internally.
//!
//! # Example
//!
//! ```no_run
//! use batchroute_core::{Algorithm, Coordinate, EngineConfig, RouteEngine, RouteRequest};
//! use batchroute_data::routing::{OsrmRoutedConfig, OsrmRoutedEngine};
//!
//! let config = EngineConfig::new(Algorithm::Ch, "berlin.osrm");
//! let engine = OsrmRoutedEngine::start(&config, &OsrmRoutedConfig::default())?;
//!
//! let request = RouteRequest::between(
//!     Coordinate { latitude: 52.5, longitude: 13.4 },
//!     Coordinate { latitude: 52.6, longitude: 13.5 },
//! );
//! let response = engine.route(&request)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod client;
mod error;
mod osrm;
mod routed;

pub use client::{DEFAULT_USER_AGENT, OsrmRouteClient};
pub use error::EngineStartError;
pub use routed::{OsrmRoutedConfig, OsrmRoutedEngine};
