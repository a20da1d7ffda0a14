//! Route engine trait and the request and response shapes it exchanges.

use crate::Coordinate;

use super::error::EngineFailure;

/// A route request between exactly two waypoints.
///
/// The request never asks for alternatives; engines are expected to
/// answer with their single best path first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest {
    waypoints: [Coordinate; 2],
}

impl RouteRequest {
    /// Build a request from `origin` to `destination`.
    #[must_use]
    pub const fn between(origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            waypoints: [origin, destination],
        }
    }

    /// Waypoints in travel order.
    #[must_use]
    pub const fn waypoints(&self) -> &[Coordinate] {
        &self.waypoints
    }

    /// First waypoint.
    #[must_use]
    pub const fn origin(&self) -> Coordinate {
        let [origin, _] = self.waypoints;
        origin
    }

    /// Last waypoint.
    #[must_use]
    pub const fn destination(&self) -> Coordinate {
        let [_, destination] = self.waypoints;
        destination
    }

    /// Whether alternative routes are requested. Always `false`.
    #[must_use]
    pub const fn alternatives(&self) -> bool {
        false
    }
}

/// Metrics of one candidate route, in the engine's own units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSummary {
    /// Route length as reported by the engine.
    pub distance: f64,
    /// Travel time as reported by the engine.
    pub duration: f64,
}

/// The engine's answer to a [`RouteRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum EngineResponse {
    /// The engine computed routes, best first.
    Ok {
        /// Candidate routes in the engine's preference order.
        routes: Vec<RouteSummary>,
    },
    /// The engine rejected the request.
    Error {
        /// Short machine-readable status, e.g. `NoRoute`.
        code: String,
        /// Human-readable explanation.
        message: String,
    },
}

/// Compute routes through an ordered list of waypoints.
///
/// Implementations are synchronous and treated as deterministic: the
/// batch client issues exactly one call per record and never retries.
///
/// # Examples
///
/// ```rust
/// use batchroute_core::{
///     Coordinate, EngineFailure, EngineResponse, RouteEngine, RouteRequest, RouteSummary,
/// };
///
/// struct Fixed;
///
/// impl RouteEngine for Fixed {
///     fn route(&self, _request: &RouteRequest) -> Result<EngineResponse, EngineFailure> {
///         Ok(EngineResponse::Ok {
///             routes: vec![RouteSummary { distance: 10.0, duration: 2.0 }],
///         })
///     }
/// }
///
/// let origin = Coordinate { latitude: 52.5, longitude: 13.4 };
/// let destination = Coordinate { latitude: 52.6, longitude: 13.5 };
/// let response = Fixed.route(&RouteRequest::between(origin, destination))?;
/// assert!(matches!(response, EngineResponse::Ok { .. }));
/// # Ok::<(), EngineFailure>(())
/// ```
pub trait RouteEngine {
    /// Answer `request`, or report why the engine could not be asked.
    fn route(&self, request: &RouteRequest) -> Result<EngineResponse, EngineFailure>;
}

impl<E: RouteEngine + ?Sized> RouteEngine for &E {
    fn route(&self, request: &RouteRequest) -> Result<EngineResponse, EngineFailure> {
        (**self).route(request)
    }
}

impl<E: RouteEngine + ?Sized> RouteEngine for Box<E> {
    fn route(&self, request: &RouteRequest) -> Result<EngineResponse, EngineFailure> {
        (**self).route(request)
    }
}
