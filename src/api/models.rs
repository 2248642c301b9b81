use crate::api::query::SearchRequest;
use crate::domain::model::{MatchRecord, SearchOutcome};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMetadata {
    pub keyword: String,
    pub limit: usize,
    pub offset: usize,
    pub total: usize,
    pub has_more: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub metadata: SearchMetadata,
    pub results: Vec<MatchRecord>,
}

impl SearchResponse {
    pub fn new(request: SearchRequest, outcome: SearchOutcome) -> Self {
        let SearchRequest { keyword, options } = request;
        Self {
            metadata: SearchMetadata {
                keyword,
                limit: options.limit,
                offset: options.offset,
                total: outcome.total,
                has_more: options.offset.saturating_add(options.limit) < outcome.total,
            },
            results: outcome.results,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
