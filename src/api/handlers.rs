use crate::api::errors::ApiError;
use crate::api::models::{HealthResponse, SearchResponse};
use crate::api::query::{SearchParams, SearchRequest};
use crate::api::rate_limit::RateLimiter;
use crate::api::request_log::{client_identity, log_request};
use crate::core::engine::SearchEngine;
use crate::core::CorpusSource;
use axum::extract::{ConnectInfo, RawQuery, State};
use axum::http::{HeaderMap, Method, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::net::SocketAddr;
use std::sync::Arc;

/// Shared across every request for the lifetime of the server.
pub struct AppState<C: CorpusSource> {
    pub engine: SearchEngine<C>,
    pub rate_limiter: RateLimiter,
    pub request_log_enabled: bool,
}

pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn handle_search<C: CorpusSource + 'static>(
    State(state): State<Arc<AppState<C>>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    let peer = connect_info.map(|ConnectInfo(addr)| addr);

    let decision = state.rate_limiter.check(&client_identity(&headers, peer));
    let rate_limit_headers = decision.headers();

    if !decision.allowed {
        tracing::debug!("Rate limit exceeded for {:?}", peer);
        let error = ApiError::TooManyRequests("Too many requests, please try again later".to_string());
        return (rate_limit_headers, error).into_response();
    }

    if state.request_log_enabled {
        log_request(&method, &uri, &headers, peer);
    }

    let params = SearchParams::from_query_string(query.as_deref().unwrap_or(""));
    let result = match SearchRequest::try_from(params) {
        Ok(request) => run_search(&state.engine, request).await,
        Err(e) => Err(ApiError::from(e)),
    };

    match result {
        Ok(response) => (rate_limit_headers, Json(response)).into_response(),
        Err(error) => (rate_limit_headers, error).into_response(),
    }
}

async fn run_search<C: CorpusSource>(
    engine: &SearchEngine<C>,
    request: SearchRequest,
) -> Result<SearchResponse, ApiError> {
    let outcome = engine.search(&request.keyword, request.options).await?;
    Ok(SearchResponse::new(request, outcome))
}
