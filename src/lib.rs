//! Facade crate for the OSRM batch router.
//!
//! This crate re-exports the record, query, and engine types along with the
//! `osrm-routed` backed engine, so embedders can drive batches without
//! depending on the member crates individually.

#![forbid(unsafe_code)]

pub use batchroute_core::{
    Algorithm, AlgorithmParseError, Coordinate, EngineConfig, EngineFailure, EngineResponse,
    QueryError, Record, RecordError, RecordField, RouteEngine, RouteQuery, RouteRequest,
    RouteResult, RouteSummary, query_route,
};

pub use batchroute_data::{
    Dataset, DatasetError, EngineStartError, OsrmRouteClient, OsrmRoutedConfig, OsrmRoutedEngine,
};
