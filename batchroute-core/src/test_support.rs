//! Test utilities for route engines.
//!
//! This module provides [`StubEngine`], a deterministic test double for
//! [`RouteEngine`] that answers from a script instead of computing routes.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::{EngineFailure, EngineResponse, RouteEngine, RouteRequest, RouteSummary};

type StubReply = Result<EngineResponse, EngineFailure>;

/// Stub `RouteEngine` for testing.
///
/// Scripted replies are consumed one per request, in order. Once the
/// script is exhausted the stub answers with its fallback reply. Every
/// request is recorded for later inspection.
///
/// # Example
///
/// ```
/// use batchroute_core::test_support::StubEngine;
/// use batchroute_core::{Coordinate, EngineResponse, RouteEngine, RouteRequest};
///
/// let engine = StubEngine::routing(10.0, 2.0)
///     .then_reply(Ok(EngineResponse::Error {
///         code: "NoRoute".into(),
///         message: "Impossible route".into(),
///     }));
///
/// let here = Coordinate { latitude: 0.0, longitude: 0.0 };
/// let request = RouteRequest::between(here, here);
/// assert!(matches!(engine.route(&request), Ok(EngineResponse::Error { .. })));
/// assert!(matches!(engine.route(&request), Ok(EngineResponse::Ok { .. })));
/// assert_eq!(engine.requests().len(), 2);
/// ```
#[derive(Debug)]
pub struct StubEngine {
    script: RefCell<VecDeque<StubReply>>,
    fallback: StubReply,
    requests: RefCell<Vec<RouteRequest>>,
}

impl StubEngine {
    /// Create a stub that answers every request with `reply`.
    #[must_use]
    pub fn new(reply: StubReply) -> Self {
        Self {
            script: RefCell::new(VecDeque::new()),
            fallback: reply,
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Create a stub that always finds a single route with these metrics.
    #[must_use]
    pub fn routing(distance: f64, duration: f64) -> Self {
        Self::replying(EngineResponse::Ok {
            routes: vec![RouteSummary { distance, duration }],
        })
    }

    /// Create a stub that always rejects with `code` and `message`.
    #[must_use]
    pub fn rejecting(code: &str, message: &str) -> Self {
        Self::replying(EngineResponse::Error {
            code: code.to_owned(),
            message: message.to_owned(),
        })
    }

    /// Create a stub that always answers with `response`.
    #[must_use]
    pub fn replying(response: EngineResponse) -> Self {
        Self::new(Ok(response))
    }

    /// Create a stub whose engine is always unreachable.
    #[must_use]
    pub fn failing(failure: EngineFailure) -> Self {
        Self::new(Err(failure))
    }

    /// Queue `reply` ahead of the fallback, after earlier scripted replies.
    #[must_use]
    pub fn then_reply(self, reply: StubReply) -> Self {
        self.script.borrow_mut().push_back(reply);
        self
    }

    /// Requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RouteRequest> {
        self.requests.borrow().clone()
    }
}

impl RouteEngine for StubEngine {
    fn route(&self, request: &RouteRequest) -> Result<EngineResponse, EngineFailure> {
        self.requests.borrow_mut().push(*request);
        let scripted = self.script.borrow_mut().pop_front();
        scripted.unwrap_or_else(|| self.fallback.clone())
    }
}
