use crate::constants::{WILDCARD, header};
use crate::headers::{HeaderCollection, Headers, apply_headers};
use crate::origin::matches;
use crate::policy::ResolvedPolicy;
use http::HeaderMap;

/// State of the allow-origin signal for one request.
///
/// `Denied` and `Disabled` both serialize to "no header". They stay distinct
/// so callers can tell a policy that refused the origin from one that never
/// looked at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowOrigin {
    Any,
    Origin(String),
    Denied,
    Disabled,
}

/// Output of [`HeaderBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDecision {
    pub allow_origin: AllowOrigin,
    pub varies: bool,
}

impl AccessDecision {
    /// Decision used when the policy could not be resolved.
    pub fn denied() -> Self {
        Self {
            allow_origin: AllowOrigin::Denied,
            varies: true,
        }
    }

    pub fn allow_origin_value(&self) -> Option<&str> {
        match &self.allow_origin {
            AllowOrigin::Any => Some(WILDCARD),
            AllowOrigin::Origin(value) => Some(value.as_str()),
            AllowOrigin::Denied | AllowOrigin::Disabled => None,
        }
    }

    pub fn is_denied(&self) -> bool {
        matches!(self.allow_origin, AllowOrigin::Denied)
    }

    pub fn headers(&self) -> Headers {
        let mut headers = HeaderCollection::new();
        if self.varies {
            headers.add_vary(header::ORIGIN);
        }
        if let Some(value) = self.allow_origin_value() {
            headers.push(
                header::ACCESS_CONTROL_ALLOW_ORIGIN.to_string(),
                value.to_string(),
            );
        }
        headers.into_headers()
    }

    /// Writes the decision onto a response header map.
    ///
    /// A previously written `Access-Control-Allow-Origin` is removed when the
    /// decision grants nothing.
    pub fn write_to(&self, map: &mut HeaderMap) {
        if self.allow_origin_value().is_none() {
            map.remove(http::header::ACCESS_CONTROL_ALLOW_ORIGIN);
        }
        apply_headers(map, &self.headers());
    }
}

pub struct HeaderBuilder;

impl HeaderBuilder {
    pub fn build(origin: Option<&str>, resolved: &ResolvedPolicy) -> AccessDecision {
        match resolved {
            ResolvedPolicy::Any => AccessDecision {
                allow_origin: AllowOrigin::Any,
                varies: false,
            },
            ResolvedPolicy::Disabled => AccessDecision {
                allow_origin: AllowOrigin::Disabled,
                varies: false,
            },
            // The configured value is sent even when it differs from the
            // request origin; only a request without an origin is refused.
            ResolvedPolicy::Fixed(value) => AccessDecision {
                allow_origin: match origin {
                    Some(_) => AllowOrigin::Origin(value.clone()),
                    None => AllowOrigin::Denied,
                },
                varies: true,
            },
            ResolvedPolicy::Reflect | ResolvedPolicy::Set(_) => {
                let allow_origin = match origin {
                    Some(origin) if matches(Some(origin), resolved) => {
                        AllowOrigin::Origin(origin.to_string())
                    }
                    _ => AllowOrigin::Denied,
                };
                AccessDecision {
                    allow_origin,
                    varies: true,
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "header_builder_test.rs"]
mod header_builder_test;
