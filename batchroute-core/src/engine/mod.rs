//! The routing engine seen from the batch client.
//!
//! The `RouteEngine` trait abstracts a synchronous route computation over an
//! ordered list of waypoints. Implementations answer with an
//! [`EngineResponse`], which carries either candidate routes or the
//! engine's own error code and message.
//!
//! [`EngineFailure`] is reserved for faults in reaching the engine at all;
//! an engine that answers "no route" has not failed.

mod error;
mod provider;

pub use error::EngineFailure;
pub use provider::{EngineResponse, RouteEngine, RouteRequest, RouteSummary};
