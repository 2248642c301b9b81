//! Keyword search over a static corpus of ENEM exam questions.
//!
//! Questions live on disk as `<root>/<year>/questions/<id>/details.json`. A search
//! scans the whole selected scope on every call, annotates each hit with where the
//! keyword matched, and pages the ordered result list.

pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::LocalCorpus;
pub use config::{toml_config::TomlConfig, ServerSettings};
pub use core::engine::SearchEngine;
pub use domain::model::{
    Alternative, MatchRecord, MatchSource, Question, QuestionId, SearchOptions, SearchOutcome, Year,
};
pub use utils::error::{Result, SearchError};
