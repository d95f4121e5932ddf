use crate::context::RequestContext;
use crate::header_builder::{AccessDecision, HeaderBuilder};
use crate::normalized_request::NormalizedRequest;
use crate::options::CorsOptions;
use crate::result::{ResolutionError, ValidationError};
use http::{HeaderMap, Method};

/// Per-request origin decision engine built from [`CorsOptions`].
///
/// Cheap to share: wrap it in an `Arc` and hand it to every request.
#[derive(Debug)]
pub struct Cors {
    options: CorsOptions,
}

impl Cors {
    pub fn new(options: CorsOptions) -> Result<Self, ValidationError> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Computes the decision for `request`, turning a failed computed policy
    /// into [`AccessDecision::denied`].
    pub async fn check(&self, request: &RequestContext<'_>) -> AccessDecision {
        match self.try_check(request).await {
            Ok(decision) => {
                tracing::debug!(
                    origin = request.origin.unwrap_or_default(),
                    method = request.method,
                    allow_origin = ?decision.allow_origin,
                    varies = decision.varies,
                    "resolved origin decision"
                );
                decision
            }
            Err(err) => {
                tracing::warn!(
                    origin = request.origin.unwrap_or_default(),
                    method = request.method,
                    error = %err,
                    "origin policy resolution failed; denying"
                );
                AccessDecision::denied()
            }
        }
    }

    pub async fn try_check(
        &self,
        request: &RequestContext<'_>,
    ) -> Result<AccessDecision, ResolutionError> {
        let normalized_request = NormalizedRequest::new(request);
        let ctx = normalized_request.as_context();

        if let Some(policy) = self.options.origin.resolved() {
            return Ok(HeaderBuilder::build(ctx.origin, policy));
        }

        let resolution = self.options.origin.resolve(&ctx);
        let policy = match self.options.resolve_timeout {
            Some(budget) => tokio::time::timeout(budget, resolution)
                .await
                .map_err(|_| ResolutionError::Timeout { budget })??,
            None => resolution.await?,
        };

        // A computed answer always depends on the request origin.
        let mut decision = HeaderBuilder::build(ctx.origin, &policy);
        decision.varies = true;
        Ok(decision)
    }

    /// Decides for the request described by `method` and `request_headers`
    /// and writes the result onto `response_headers`.
    pub async fn apply(
        &self,
        method: &Method,
        request_headers: &HeaderMap,
        response_headers: &mut HeaderMap,
    ) -> AccessDecision {
        let request = RequestContext::from_parts(method, request_headers);
        let decision = self.check(&request).await;
        decision.write_to(response_headers);
        decision
    }
}

#[cfg(test)]
#[path = "cors_test.rs"]
mod cors_test;
