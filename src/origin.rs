use crate::policy::ResolvedPolicy;
use crate::result::PatternError;
use regex_automata::meta::Regex;
use std::fmt;
use std::time::{Duration, Instant};

const PATTERN_COMPILE_BUDGET: Duration = Duration::from_millis(100);
const MAX_PATTERN_LENGTH: usize = 50_000;

/// One entry of an origin set.
///
/// Literals compare byte-for-byte. Patterns are compiled exactly as written:
/// no case-insensitive flag is added, so `^http://LOCALHOST:` never matches a
/// lower-case origin unless the pattern itself carries `(?i)`.
#[derive(Clone)]
pub enum OriginMatcher {
    Literal(String),
    Pattern(Regex),
}

impl OriginMatcher {
    pub fn literal<S: Into<String>>(value: S) -> Self {
        Self::Literal(value.into())
    }

    pub fn pattern(regex: Regex) -> Self {
        Self::Pattern(regex)
    }

    /// Compiles `pattern` up front so a malformed policy fails at startup.
    pub fn pattern_str(pattern: &str) -> Result<Self, PatternError> {
        Self::compile_pattern(pattern, PATTERN_COMPILE_BUDGET).map(Self::Pattern)
    }

    fn compile_pattern(pattern: &str, budget: Duration) -> Result<Regex, PatternError> {
        if pattern.len() > MAX_PATTERN_LENGTH {
            return Err(PatternError::TooLong {
                length: pattern.len(),
                max: MAX_PATTERN_LENGTH,
            });
        }

        let started = Instant::now();
        let regex = Regex::new(pattern).map_err(|err| PatternError::Build(Box::new(err)))?;
        let elapsed = started.elapsed();
        if elapsed > budget {
            return Err(PatternError::Timeout { elapsed, budget });
        }

        Ok(regex)
    }

    #[cfg(test)]
    pub(crate) fn pattern_str_with_budget(
        pattern: &str,
        budget: Duration,
    ) -> Result<Self, PatternError> {
        Self::compile_pattern(pattern, budget).map(Self::Pattern)
    }

    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            OriginMatcher::Literal(value) => value == candidate,
            OriginMatcher::Pattern(regex) => regex.is_match(candidate.as_bytes()),
        }
    }

    pub(crate) fn is_literal(&self) -> bool {
        matches!(self, OriginMatcher::Literal(_))
    }
}

impl fmt::Debug for OriginMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OriginMatcher::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            OriginMatcher::Pattern(_) => f.write_str("Pattern(..)"),
        }
    }
}

impl From<String> for OriginMatcher {
    fn from(value: String) -> Self {
        OriginMatcher::Literal(value)
    }
}

impl From<&str> for OriginMatcher {
    fn from(value: &str) -> Self {
        OriginMatcher::Literal(value.to_owned())
    }
}

impl From<Regex> for OriginMatcher {
    fn from(value: Regex) -> Self {
        OriginMatcher::Pattern(value)
    }
}

/// Decides whether `origin` is permitted by an already resolved policy.
pub fn matches(origin: Option<&str>, policy: &ResolvedPolicy) -> bool {
    match policy {
        ResolvedPolicy::Any => true,
        ResolvedPolicy::Disabled => false,
        ResolvedPolicy::Fixed(value) => origin == Some(value.as_str()),
        ResolvedPolicy::Reflect => origin.is_some(),
        ResolvedPolicy::Set(matchers) => match origin {
            Some(origin) => matchers.iter().any(|matcher| matcher.matches(origin)),
            None => false,
        },
    }
}

#[cfg(test)]
#[path = "origin_test.rs"]
mod origin_test;
