pub mod engine;
pub mod matcher;

pub use crate::domain::model::{MatchRecord, MatchSource, SearchOptions, SearchOutcome};
pub use crate::domain::ports::{ConfigProvider, CorpusSource};
pub use crate::utils::error::Result;
