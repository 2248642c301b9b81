use crate::domain::model::{Question, QuestionId, Year};
use crate::utils::error::Result;

/// Read access to the year-partitioned question corpus.
pub trait CorpusSource: Send + Sync {
    /// Year partitions, most recent first.
    fn list_partitions(&self) -> impl std::future::Future<Output = Result<Vec<Year>>> + Send;

    /// Question ids inside `year`, in traversal order. An absent question
    /// directory yields `Ok(None)` so the caller can skip the partition.
    fn list_document_ids(
        &self,
        year: Year,
    ) -> impl std::future::Future<Output = Result<Option<Vec<QuestionId>>>> + Send;

    /// `None` when the record is missing, unreadable or invalid.
    fn load_document(
        &self,
        year: Year,
        id: &QuestionId,
    ) -> impl std::future::Future<Output = Option<Question>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn corpus_root(&self) -> &str;
    fn bind_address(&self) -> &str;
    fn rate_limit_max_requests(&self) -> u64;
    fn rate_limit_window_secs(&self) -> u64;
    fn request_log_enabled(&self) -> bool;
    fn json_logs(&self) -> bool;
}
