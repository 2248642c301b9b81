//! HTTP surface of the search service.
//!
//! - **`handlers`**: axum handlers and the shared [`AppState`](handlers::AppState).
//! - **`query`**: turns raw query strings into validated search requests.
//! - **`errors`**: [`ApiError`](errors::ApiError) and its JSON rendering.
//! - **`rate_limit`**: per-client fixed window limiter.
//! - **`request_log`**: structured access log entries.
//! - **`models`**: response bodies.

pub mod errors;
pub mod handlers;
pub mod models;
pub mod query;
pub mod rate_limit;
pub mod request_log;

use crate::core::CorpusSource;
use axum::routing::get;
use axum::Router;
use handlers::{handle_health, handle_search, AppState};
use std::sync::Arc;

pub fn create_router<C: CorpusSource + 'static>(state: AppState<C>) -> Router {
    Router::new()
        .route("/v1/search", get(handle_search::<C>))
        .route("/health", get(handle_health))
        .with_state(Arc::new(state))
}
