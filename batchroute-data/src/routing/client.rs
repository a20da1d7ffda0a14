//! HTTP client for OSRM's Route service.
//!
//! The [`RouteEngine`] trait is synchronous, so the client bridges async
//! HTTP calls to it by blocking on a Tokio runtime it owns.

use batchroute_core::{EngineFailure, EngineResponse, RouteEngine, RouteRequest};
use geo::Coord;
use reqwest::Client;
use tokio::runtime::Runtime;

use super::error::EngineStartError;
use super::osrm::RouteResponse;

/// Default user agent for OSRM requests.
pub const DEFAULT_USER_AGENT: &str = "osrm-batchroute/0.1";

/// Route service profile segment. `osrm-routed` serves whichever profile
/// the dataset was extracted with under any name.
const PROFILE: &str = "driving";

/// Query string asking for a single overview-free route.
const ROUTE_OPTIONS: &str = "alternatives=false&steps=false&overview=false&annotations=false";

/// Route engine backed by an OSRM Route service over HTTP.
///
/// The client owns a current-thread Tokio runtime that is reused across
/// calls, avoiding the overhead of creating a runtime per request.
pub struct OsrmRouteClient {
    client: Client,
    base_url: String,
    runtime: Runtime,
}

impl std::fmt::Debug for OsrmRouteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OsrmRouteClient")
            .field("client", &self.client)
            .field("base_url", &self.base_url)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl OsrmRouteClient {
    /// Create a client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, EngineStartError> {
        Self::with_user_agent(base_url, DEFAULT_USER_AGENT)
    }

    /// Create a client sending `user_agent` with every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_user_agent(
        base_url: impl Into<String>,
        user_agent: &str,
    ) -> Result<Self, EngineStartError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(EngineStartError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(EngineStartError::Runtime)?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            runtime,
        })
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the Route API URL for `request`.
    ///
    /// The URL format is: `{base_url}/route/v1/driving/{coordinates}?{options}`
    /// where coordinates are semicolon-separated `lon,lat` pairs.
    fn build_route_url(&self, request: &RouteRequest) -> String {
        let coords: String = request
            .waypoints()
            .iter()
            .map(|&waypoint| {
                let point: Coord = waypoint.into();
                format!("{},{}", point.x, point.y)
            })
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/route/v1/{PROFILE}/{coords}?{ROUTE_OPTIONS}",
            self.base_url.trim_end_matches('/'),
        )
    }

    /// Fetch and decode a route asynchronously.
    ///
    /// The body is decoded whatever the HTTP status: OSRM reports
    /// rejections such as `NoRoute` as 400 responses with a JSON payload.
    async fn fetch_route_async(&self, url: &str) -> Result<EngineResponse, EngineFailure> {
        let response =
            self.client
                .get(url)
                .send()
                .await
                .map_err(|err| EngineFailure::Unavailable {
                    endpoint: url.to_owned(),
                    message: err.to_string(),
                })?;
        let status = response.status();

        let route_response: RouteResponse =
            response
                .json()
                .await
                .map_err(|err| EngineFailure::MalformedResponse {
                    message: format!("HTTP {status}: {err}"),
                })?;

        Ok(route_response.into_engine_response())
    }
}

impl RouteEngine for OsrmRouteClient {
    fn route(&self, request: &RouteRequest) -> Result<EngineResponse, EngineFailure> {
        let url = self.build_route_url(request);
        log::debug!("GET {url}");
        self.runtime.block_on(self.fetch_route_async(&url))
    }
}
