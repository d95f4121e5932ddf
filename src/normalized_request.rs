use crate::context::RequestContext;
use std::borrow::Cow;

/// Request view with the method upper-cased and an empty origin folded into
/// "absent". The origin itself is left byte-for-byte intact.
#[doc(hidden)]
pub struct NormalizedRequest<'a> {
    method: Cow<'a, str>,
    origin: Option<&'a str>,
}

impl<'a> NormalizedRequest<'a> {
    #[doc(hidden)]
    pub fn new(request: &RequestContext<'a>) -> Self {
        Self {
            method: Self::normalize_method(request.method),
            origin: request.origin.filter(|origin| !origin.is_empty()),
        }
    }

    fn normalize_method(value: &'a str) -> Cow<'a, str> {
        if value.bytes().any(|byte| byte.is_ascii_lowercase()) {
            Cow::Owned(value.to_ascii_uppercase())
        } else {
            Cow::Borrowed(value)
        }
    }

    #[doc(hidden)]
    pub fn as_context(&self) -> RequestContext<'_> {
        RequestContext {
            method: self.method.as_ref(),
            origin: self.origin,
        }
    }
}

#[cfg(test)]
#[path = "normalized_request_test.rs"]
mod normalized_request_test;
