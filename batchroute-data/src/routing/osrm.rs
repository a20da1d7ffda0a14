//! OSRM API response types for the Route service.
//!
//! This module provides deserialisation types for the OSRM Route API
//! response format. Only the fields the batch client consumes are decoded.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use batchroute_core::{EngineResponse, RouteSummary};
use serde::Deserialize;

/// OSRM Route API response.
///
/// The response contains a list of routes on success or an error message
/// on failure. The `code` field indicates the response status.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"InvalidQuery"` - Invalid query parameters
    /// - `"InvalidValue"` - Invalid coordinate or option value
    /// - `"NoSegment"` - A coordinate could not be snapped to the network
    /// - `"NoRoute"` - No route exists between the coordinates
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

/// A single route object within a [`RouteResponse`].
#[derive(Debug, Deserialize)]
pub struct RouteEntry {
    /// Distance travelled, in metres.
    pub distance: f64,
    /// Estimated travel time, in seconds.
    pub duration: f64,
}

impl RouteResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }

    /// Fold the wire response into the engine-neutral response type.
    #[must_use]
    pub fn into_engine_response(self) -> EngineResponse {
        if self.is_ok() {
            EngineResponse::Ok {
                routes: self
                    .routes
                    .into_iter()
                    .map(|route| RouteSummary {
                        distance: route.distance,
                        duration: route.duration,
                    })
                    .collect(),
            }
        } else {
            EngineResponse::Error {
                code: self.code,
                message: self.message.unwrap_or_default(),
            }
        }
    }
}
