use bunner_cors_gate::constants::method;
use bunner_cors_gate::{AccessDecision, Cors, CorsOptions, OriginMatcher, OriginPolicy, RequestContext};
use std::time::Duration;

#[derive(Default)]
pub struct CorsBuilder {
    origin: Option<OriginPolicy>,
    resolve_timeout: Option<Duration>,
}

impl CorsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(mut self, origin: OriginPolicy) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn resolve_timeout(mut self, timeout: Duration) -> Self {
        self.resolve_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Cors {
        let CorsOptions {
            origin: default_origin,
            resolve_timeout: default_resolve_timeout,
        } = CorsOptions::default();

        Cors::new(CorsOptions {
            origin: self.origin.unwrap_or(default_origin),
            resolve_timeout: self.resolve_timeout.or(default_resolve_timeout),
        })
        .expect("valid CORS configuration")
    }
}

pub struct RequestBuilder {
    method: String,
    origin: Option<String>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: method::GET.into(),
            origin: None,
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn origin_value(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub async fn check(&self, cors: &Cors) -> AccessDecision {
        let ctx = RequestContext::new(&self.method, self.origin.as_deref());
        cors.check(&ctx).await
    }
}

pub fn cors() -> CorsBuilder {
    CorsBuilder::new()
}

pub fn request() -> RequestBuilder {
    RequestBuilder::new()
}

/// Local development set: any `localhost` port, plus the loopback address on 3000.
pub fn dev_origins() -> OriginPolicy {
    OriginPolicy::set([
        OriginMatcher::pattern_str(r"(?i)^http://localhost:").expect("valid pattern"),
        OriginMatcher::literal("http://127.0.0.1:3000"),
    ])
}
