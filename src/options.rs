use crate::origin::OriginMatcher;
use crate::policy::{OriginPolicy, ResolvedPolicy};
use crate::result::ValidationError;
use http::HeaderValue;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct CorsOptions {
    pub origin: OriginPolicy,
    /// Upper bound for a computed policy's callback. `None` waits indefinitely.
    pub resolve_timeout: Option<Duration>,
}

impl CorsOptions {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(policy) = self.origin.resolved() {
            Self::validate_policy(policy)?;
        }

        if self.resolve_timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err(ValidationError::ZeroResolveTimeout);
        }

        Ok(())
    }

    fn validate_policy(policy: &ResolvedPolicy) -> Result<(), ValidationError> {
        match policy {
            ResolvedPolicy::Fixed(value) if value.is_empty() => {
                Err(ValidationError::EmptyFixedOrigin)
            }
            ResolvedPolicy::Fixed(value) if HeaderValue::from_str(value).is_err() => {
                Err(ValidationError::InvalidFixedOrigin)
            }
            ResolvedPolicy::Set(matchers) => {
                for (index, matcher) in matchers.iter().enumerate() {
                    let OriginMatcher::Literal(value) = matcher else {
                        continue;
                    };
                    if value.is_empty() {
                        return Err(ValidationError::EmptyLiteral { index });
                    }
                    // Literals are echoed back verbatim as the allow-origin value.
                    if HeaderValue::from_str(value).is_err() {
                        return Err(ValidationError::InvalidLiteral { index });
                    }
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;
