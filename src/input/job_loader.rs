//! Job loading from snapshot files

use crate::error::{Result, JobMatcherError};
use crate::processing::job::Job;
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

pub trait JobLoader {
    fn load(&self, path: &Path) -> impl std::future::Future<Output = Result<Vec<Job>>> + Send;
}

/// Accepted top-level shapes of a `.json` snapshot
#[derive(Deserialize)]
#[serde(untagged)]
enum Snapshot {
    List(Vec<Job>),
    Wrapped { jobs: Vec<Job> },
}

pub struct JsonJobLoader;

impl JobLoader for JsonJobLoader {
    async fn load(&self, path: &Path) -> Result<Vec<Job>> {
        let content = fs::read_to_string(path).await?;
        parse_json_snapshot(&content).map_err(|e| {
            JobMatcherError::InvalidInput(format!("Failed to read jobs from '{}': {}", path.display(), e))
        })
    }
}

pub struct JsonLinesJobLoader;

impl JobLoader for JsonLinesJobLoader {
    async fn load(&self, path: &Path) -> Result<Vec<Job>> {
        let content = fs::read_to_string(path).await?;
        parse_json_lines(&content).map_err(|e| match e {
            JobMatcherError::InvalidInput(msg) => {
                JobMatcherError::InvalidInput(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }
}

pub fn parse_json_snapshot(content: &str) -> Result<Vec<Job>> {
    let snapshot: Snapshot = serde_json::from_str(content)?;
    Ok(match snapshot {
        Snapshot::List(jobs) => jobs,
        Snapshot::Wrapped { jobs } => jobs,
    })
}

pub fn parse_json_lines(content: &str) -> Result<Vec<Job>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str::<Job>(line)
                .map_err(|e| JobMatcherError::InvalidInput(format!("line {}: {}", idx + 1, e)))
        })
        .collect()
}
