//! Job matcher library: relevance-ranked job search and AI job assistant helpers

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod llm;
pub mod output;

pub use error::{Result, JobMatcherError};
pub use config::Config;
pub use processing::engine::SearchEngine;
pub use processing::job::{Job, JobStatus, ScoredJob};
pub use processing::query_parser::{ParsedQuery, QueryParser};
pub use llm::json_extractor::extract_valid_json;
