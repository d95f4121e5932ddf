use crate::constants::WILDCARD;
use crate::context::RequestContext;
use crate::origin::OriginMatcher;
use crate::result::{BoxError, ResolutionError};
use futures_util::future::{self, BoxFuture, FutureExt};
use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

/// A policy whose shape no longer depends on the request.
///
/// This is the only form the matcher and the header builder accept, so a
/// computed callback can never reach them unresolved.
#[derive(Debug, Clone, Default)]
pub enum ResolvedPolicy {
    #[default]
    Any,
    Disabled,
    Fixed(String),
    Reflect,
    Set(Vec<OriginMatcher>),
}

/// Access policy configured by the server author.
///
/// Built once at startup and shared read-only across requests.
#[derive(Clone)]
pub enum OriginPolicy {
    Resolved(ResolvedPolicy),
    Computed(Arc<dyn OriginResolver>),
}

impl Default for OriginPolicy {
    fn default() -> Self {
        Self::Resolved(ResolvedPolicy::Any)
    }
}

impl fmt::Debug for OriginPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OriginPolicy::Resolved(policy) => f.debug_tuple("Resolved").field(policy).finish(),
            OriginPolicy::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<ResolvedPolicy> for OriginPolicy {
    fn from(value: ResolvedPolicy) -> Self {
        OriginPolicy::Resolved(value)
    }
}

impl OriginPolicy {
    pub fn any() -> Self {
        ResolvedPolicy::Any.into()
    }

    pub fn disabled() -> Self {
        ResolvedPolicy::Disabled.into()
    }

    /// A fixed allow-origin value. `"*"` is the wildcard and becomes [`OriginPolicy::any`].
    pub fn fixed<S: Into<String>>(value: S) -> Self {
        let value = value.into();
        if value == WILDCARD {
            return Self::any();
        }
        ResolvedPolicy::Fixed(value).into()
    }

    pub fn reflect() -> Self {
        ResolvedPolicy::Reflect.into()
    }

    /// Ordered origin set, evaluated in the order given.
    pub fn set<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OriginMatcher>,
    {
        ResolvedPolicy::Set(values.into_iter().map(Into::into).collect()).into()
    }

    /// Like [`OriginPolicy::set`], but moves literals ahead of patterns so the
    /// cheap comparisons run first. Relative order inside each group is kept.
    pub fn set_literals_first<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OriginMatcher>,
    {
        let mut matchers: Vec<OriginMatcher> = values.into_iter().map(Into::into).collect();
        matchers.sort_by_key(|matcher| !matcher.is_literal());
        ResolvedPolicy::Set(matchers).into()
    }

    /// Defers the decision to a synchronous callback over the request origin.
    pub fn computed<F, V, E>(callback: F) -> Self
    where
        F: Fn(Option<&str>) -> Result<V, E> + Send + Sync + 'static,
        V: Into<PolicyValue> + 'static,
        E: Into<BoxError> + 'static,
    {
        Self::resolver(SyncResolver {
            callback,
            _marker: PhantomData,
        })
    }

    /// Defers the decision to an asynchronous callback over the request origin.
    pub fn computed_async<F, Fut, V, E>(callback: F) -> Self
    where
        F: Fn(Option<String>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
        V: Into<PolicyValue> + 'static,
        E: Into<BoxError> + 'static,
    {
        Self::resolver(AsyncResolver {
            callback,
            _marker: PhantomData,
        })
    }

    pub fn resolver<R: OriginResolver + 'static>(resolver: R) -> Self {
        Self::Computed(Arc::new(resolver))
    }

    /// The policy as-is when it does not need the request to be resolved.
    pub fn resolved(&self) -> Option<&ResolvedPolicy> {
        match self {
            OriginPolicy::Resolved(policy) => Some(policy),
            OriginPolicy::Computed(_) => None,
        }
    }

    pub async fn resolve(
        &self,
        request: &RequestContext<'_>,
    ) -> Result<Cow<'_, ResolvedPolicy>, ResolutionError> {
        match self {
            OriginPolicy::Resolved(policy) => Ok(Cow::Borrowed(policy)),
            OriginPolicy::Computed(resolver) => resolver
                .resolve(request)
                .await
                .map(|value| Cow::Owned(value.normalize()))
                .map_err(ResolutionError::Callback),
        }
    }
}

/// Capability consulted by [`OriginPolicy::Computed`] once per request.
pub trait OriginResolver: Send + Sync {
    fn resolve<'a>(
        &'a self,
        request: &'a RequestContext<'a>,
    ) -> BoxFuture<'a, Result<PolicyValue, BoxError>>;
}

struct SyncResolver<F, V, E> {
    callback: F,
    _marker: PhantomData<fn() -> (V, E)>,
}

impl<F, V, E> OriginResolver for SyncResolver<F, V, E>
where
    F: Fn(Option<&str>) -> Result<V, E> + Send + Sync,
    V: Into<PolicyValue>,
    E: Into<BoxError>,
{
    fn resolve<'a>(
        &'a self,
        request: &'a RequestContext<'a>,
    ) -> BoxFuture<'a, Result<PolicyValue, BoxError>> {
        let outcome: Result<PolicyValue, BoxError> = (self.callback)(request.origin)
            .map(Into::into)
            .map_err(Into::into);
        future::ready(outcome).boxed()
    }
}

struct AsyncResolver<F, V, E> {
    callback: F,
    _marker: PhantomData<fn() -> (V, E)>,
}

impl<F, Fut, V, E> OriginResolver for AsyncResolver<F, V, E>
where
    F: Fn(Option<String>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<V, E>> + Send + 'static,
    V: Into<PolicyValue>,
    E: Into<BoxError>,
{
    fn resolve<'a>(
        &'a self,
        request: &'a RequestContext<'a>,
    ) -> BoxFuture<'a, Result<PolicyValue, BoxError>> {
        (self.callback)(request.origin.map(str::to_owned))
            .map(|outcome| -> Result<PolicyValue, BoxError> {
                outcome.map(Into::into).map_err(Into::into)
            })
            .boxed()
    }
}

/// Loosely shaped value a computed callback may hand back.
#[derive(Debug, Clone)]
pub enum PolicyValue {
    Bool(bool),
    Absent,
    Str(String),
    Matcher(OriginMatcher),
    List(Vec<OriginMatcher>),
    Resolved(ResolvedPolicy),
}

impl PolicyValue {
    pub fn normalize(self) -> ResolvedPolicy {
        match self {
            PolicyValue::Bool(true) => ResolvedPolicy::Reflect,
            PolicyValue::Bool(false) | PolicyValue::Absent => ResolvedPolicy::Disabled,
            PolicyValue::Str(value) if value.is_empty() => ResolvedPolicy::Disabled,
            PolicyValue::Str(value) if value == WILDCARD => ResolvedPolicy::Any,
            PolicyValue::Str(value) => ResolvedPolicy::Fixed(value),
            PolicyValue::Matcher(matcher) => ResolvedPolicy::Set(vec![matcher]),
            PolicyValue::List(matchers) if matchers.is_empty() => ResolvedPolicy::Disabled,
            PolicyValue::List(matchers) => ResolvedPolicy::Set(matchers),
            PolicyValue::Resolved(policy) => policy,
        }
    }
}

impl From<bool> for PolicyValue {
    fn from(value: bool) -> Self {
        PolicyValue::Bool(value)
    }
}

impl From<&str> for PolicyValue {
    fn from(value: &str) -> Self {
        PolicyValue::Str(value.to_owned())
    }
}

impl From<String> for PolicyValue {
    fn from(value: String) -> Self {
        PolicyValue::Str(value)
    }
}

impl<T> From<Option<T>> for PolicyValue
where
    T: Into<PolicyValue>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => PolicyValue::Absent,
        }
    }
}

impl From<OriginMatcher> for PolicyValue {
    fn from(value: OriginMatcher) -> Self {
        PolicyValue::Matcher(value)
    }
}

impl From<Vec<OriginMatcher>> for PolicyValue {
    fn from(value: Vec<OriginMatcher>) -> Self {
        PolicyValue::List(value)
    }
}

impl From<ResolvedPolicy> for PolicyValue {
    fn from(value: ResolvedPolicy) -> Self {
        PolicyValue::Resolved(value)
    }
}

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;
