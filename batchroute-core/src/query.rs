//! Single-record route queries against a [`RouteEngine`].
//!
//! [`query_route`] is the only place that talks to the engine on behalf
//! of a record. It asks for one best path between two points and folds
//! the engine's answer into a [`RouteResult`], keeping the engine's own
//! rejections (recoverable, per record) apart from contract violations
//! and transport faults (reported as [`QueryError`]).

use thiserror::Error;

use crate::Coordinate;
use crate::engine::{EngineFailure, EngineResponse, RouteEngine, RouteRequest};

/// Origin and destination of one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteQuery {
    /// Start of the route.
    pub origin: Coordinate,
    /// End of the route.
    pub destination: Coordinate,
}

impl RouteQuery {
    /// The engine request for this query.
    #[must_use]
    pub const fn request(&self) -> RouteRequest {
        RouteRequest::between(self.origin, self.destination)
    }
}

/// Outcome of a query the engine answered.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteResult {
    /// The best route's metrics, untransformed.
    Ok {
        /// Route length reported by the engine.
        distance: f64,
        /// Travel time reported by the engine.
        duration: f64,
    },
    /// The engine declined to route this record.
    EngineError {
        /// Engine status code, e.g. `NoRoute`.
        code: String,
        /// Engine explanation.
        message: String,
    },
}

/// Conditions under which a query yields no [`RouteResult`] at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The engine reported success but returned no route.
    #[error("routing engine reported success without any route")]
    NoRoutes,
    /// The engine could not be consulted.
    #[error(transparent)]
    Engine(#[from] EngineFailure),
}

/// Ask `engine` for the best route described by `query`.
///
/// Exactly one request is issued; there are no retries.
///
/// # Errors
///
/// Returns [`QueryError::NoRoutes`] when the engine answers `Ok` with an
/// empty route list, and [`QueryError::Engine`] when the engine cannot be
/// reached or its answer cannot be decoded.
///
/// # Examples
///
/// ```
/// use batchroute_core::test_support::StubEngine;
/// use batchroute_core::{Coordinate, RouteQuery, RouteResult, query_route};
///
/// let engine = StubEngine::routing(12345.6, 987.3);
/// let query = RouteQuery {
///     origin: Coordinate { latitude: 52.5, longitude: 13.4 },
///     destination: Coordinate { latitude: 52.6, longitude: 13.5 },
/// };
/// let result = query_route(&engine, &query)?;
/// assert_eq!(result, RouteResult::Ok { distance: 12345.6, duration: 987.3 });
/// # Ok::<(), batchroute_core::QueryError>(())
/// ```
pub fn query_route<E>(engine: &E, query: &RouteQuery) -> Result<RouteResult, QueryError>
where
    E: RouteEngine + ?Sized,
{
    let request = query.request();
    log::debug!(
        "routing from ({}, {}) to ({}, {})",
        query.origin.latitude,
        query.origin.longitude,
        query.destination.latitude,
        query.destination.longitude
    );
    match engine.route(&request)? {
        EngineResponse::Ok { routes } => {
            let best = routes.first().ok_or(QueryError::NoRoutes)?;
            Ok(RouteResult::Ok {
                distance: best.distance,
                duration: best.duration,
            })
        }
        EngineResponse::Error { code, message } => Ok(RouteResult::EngineError { code, message }),
    }
}
