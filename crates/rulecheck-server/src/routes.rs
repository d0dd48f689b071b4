use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::Request;
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use rulecheck_core::CheckRequest;
use rulecheck_runtime::RuleChecker;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) checker: Arc<RuleChecker>,
}

/// Assemble the router. Unknown paths and known paths hit with the wrong
/// method both return 404.
pub(crate) fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).fallback(not_found))
        .route("/check", post(check).fallback(not_found))
        .route("/login", post(login).fallback(not_found))
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn(log_http_request))
}

async fn index() -> &'static str {
    "rulecheck api"
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

// Login lives in the hosted deployment, not in this server.
async fn login() -> (StatusCode, &'static str) {
    (StatusCode::NOT_IMPLEMENTED, "login is not available")
}

async fn check(
    State(state): State<AppState>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "invalid check request");
            return (StatusCode::BAD_REQUEST, "Bad request").into_response();
        }
    };

    match state.checker.check(&request).await {
        Ok(verdict) => Json(verdict).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "check failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Oh no!").into_response()
        }
    }
}

async fn log_http_request(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let response = next.run(req).await;
    let status = response.status();
    tracing::info!(
        method = %method,
        uri = %uri,
        status = %status,
        "http request"
    );
    response
}
