use axum::{
    Extension, Json,
    extract::State,
    http::{HeaderMap, Method},
    response::{IntoResponse, Response},
};
use bunner_cors_gate::{AccessDecision, AuthorizationGate, RequestContext};

use crate::cors::AppState;

pub async fn groceries(
    State(state): State<AppState>,
    Extension(decision): Extension<AccessDecision>,
    method: Method,
    headers: HeaderMap,
) -> Response {
    let origin = RequestContext::from_parts(&method, &headers).origin;

    let gate = AuthorizationGate::check_decision(origin, &decision);
    if !gate.proceed {
        tracing::debug!(origin, "skipping grocery lookup for unauthorized origin");
    }

    // An empty 200 when the gate stops the request.
    gate.run_async(|| async { Json(state.store.load().await).into_response() })
        .await
}
