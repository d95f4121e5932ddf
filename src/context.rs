use crate::constants::header;
use http::{HeaderMap, Method};

/// The parts of an inbound request the origin decision looks at.
///
/// `origin` is `None` for direct or same-site requests that carry no `Origin`
/// header. The value is an opaque comparison key and is never parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext<'a> {
    pub method: &'a str,
    pub origin: Option<&'a str>,
}

impl<'a> RequestContext<'a> {
    pub fn new(method: &'a str, origin: Option<&'a str>) -> Self {
        Self { method, origin }
    }

    /// Reads the method and declared origin from an `http` request.
    ///
    /// Empty and non UTF-8 origin values are reported as absent.
    pub fn from_parts(method: &'a Method, headers: &'a HeaderMap) -> Self {
        Self {
            method: method.as_str(),
            origin: request_origin(headers),
        }
    }
}

pub(crate) fn request_origin(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;
