pub mod constants;
mod context;
mod cors;
mod gate;
mod header_builder;
mod headers;
mod normalized_request;
mod options;
mod origin;
mod policy;
mod result;

pub use context::RequestContext;
pub use cors::Cors;
pub use gate::{AuthorizationGate, GateResult};
pub use header_builder::{AccessDecision, AllowOrigin, HeaderBuilder};
pub use headers::{Headers, apply_headers};
pub use normalized_request::NormalizedRequest;
pub use options::CorsOptions;
pub use origin::{OriginMatcher, matches};
pub use policy::{OriginPolicy, OriginResolver, PolicyValue, ResolvedPolicy};
pub use result::{BoxError, PatternError, ResolutionError, ValidationError};
