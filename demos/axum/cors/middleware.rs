use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use bunner_cors_gate::RequestContext;

use super::{AppState, SharedCors};

/// Decides the allow-origin signal before the handler runs and hands it to
/// the handler as a request extension, then writes it onto the response.
pub async fn cors_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let cors: SharedCors = state.cors.clone();

    let context = RequestContext::from_parts(request.method(), request.headers());
    let decision = cors.check(&context).await;

    request.extensions_mut().insert(decision.clone());
    let mut response = next.run(request).await;
    decision.write_to(response.headers_mut());
    response
}
