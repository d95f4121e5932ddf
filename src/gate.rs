use crate::constants::WILDCARD;
use crate::context::request_origin;
use crate::header_builder::AccessDecision;
use http::HeaderMap;
use std::future::Future;

/// Outcome of [`AuthorizationGate::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateResult {
    pub proceed: bool,
}

impl GateResult {
    /// Runs `work` only when the gate lets the request through, otherwise
    /// hands back the neutral `T::default()`.
    pub fn run<T, F>(self, work: F) -> T
    where
        T: Default,
        F: FnOnce() -> T,
    {
        if self.proceed { work() } else { T::default() }
    }

    pub async fn run_async<T, F, Fut>(self, work: F) -> T
    where
        T: Default,
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        if self.proceed {
            work().await
        } else {
            T::default()
        }
    }
}

/// In-handler check that re-reads the allow-origin signal already chosen for
/// the response and tells the handler whether the requesting origin may read
/// what it is about to compute.
///
/// This only saves work. A client the gate stops would not be allowed to read
/// the body anyway, so the handler still answers with a success status.
pub struct AuthorizationGate;

impl AuthorizationGate {
    /// A request without an origin and a response without an allow-origin
    /// value compare equal: direct and same-site requests always proceed.
    /// An empty origin counts as absent.
    pub fn check(request_origin: Option<&str>, allow_origin: Option<&str>) -> GateResult {
        let request_origin = request_origin.filter(|origin| !origin.is_empty());
        GateResult {
            proceed: allow_origin == request_origin || allow_origin == Some(WILDCARD),
        }
    }

    pub fn check_decision(request_origin: Option<&str>, decision: &AccessDecision) -> GateResult {
        Self::check(request_origin, decision.allow_origin_value())
    }

    /// Reads the origin from the request headers and the allow-origin value
    /// from the response headers written earlier in the same request.
    pub fn check_headers(request: &HeaderMap, response: &HeaderMap) -> GateResult {
        let origin = request_origin(request);
        let allow_origin = response
            .get(http::header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok());

        let result = Self::check(origin, allow_origin);
        if !result.proceed {
            tracing::debug!(
                origin = origin.unwrap_or_default(),
                "origin is not authorized to read the response; skipping work"
            );
        }
        result
    }
}

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;
