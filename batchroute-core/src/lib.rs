//! Core domain types for the OSRM batch router.
//!
//! The crate models one record of batch input as a pair of coordinates,
//! parses it from its comma-separated form, and dispatches it to a
//! [`RouteEngine`] through [`query_route`]. The engine itself lives
//! elsewhere; this crate only fixes the shape of the conversation.
#![forbid(unsafe_code)]

pub mod config;
pub mod coordinate;
pub mod engine;
pub mod query;
pub mod record;

#[doc(hidden)]
pub mod test_support;

pub use config::{Algorithm, AlgorithmParseError, EngineConfig};
pub use coordinate::Coordinate;
pub use engine::{EngineFailure, EngineResponse, RouteEngine, RouteRequest, RouteSummary};
pub use query::{QueryError, RouteQuery, RouteResult, query_route};
pub use record::{FIELD_COUNT, Record, RecordError, RecordField};
