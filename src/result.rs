use regex_automata::meta::BuildError;
use std::time::Duration;
use thiserror::Error;

/// Boxed error reported by a computed origin capability.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A `Pattern` matcher could not be built. Raised while the policy is being
/// constructed, never per request.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("failed to compile origin pattern")]
    Build(#[source] Box<BuildError>),
    #[error("compiling origin pattern exceeded the configured budget")]
    Timeout { elapsed: Duration, budget: Duration },
    #[error("origin pattern length {length} exceeds maximum allowed {max}")]
    TooLong { length: usize, max: usize },
}

/// Configuration rejected by [`CorsOptions::validate`](crate::CorsOptions::validate).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("fixed origin policy cannot be an empty string")]
    EmptyFixedOrigin,
    #[error("fixed origin policy is not a valid header value")]
    InvalidFixedOrigin,
    #[error("origin set entry {index} is an empty literal")]
    EmptyLiteral { index: usize },
    #[error("origin set entry {index} is not a valid header value")]
    InvalidLiteral { index: usize },
    #[error("resolve timeout must be greater than zero")]
    ZeroResolveTimeout,
}

/// A computed origin policy failed to produce a decision for one request.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("origin callback failed: {0}")]
    Callback(#[source] BoxError),
    #[error("origin callback did not finish within {budget:?}")]
    Timeout { budget: Duration },
}
