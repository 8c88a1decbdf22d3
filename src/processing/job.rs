//! Job postings and ranked results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Job-type spellings and the canonical label each maps to
pub(crate) const JOB_TYPES: &[(&str, &str)] = &[
    ("full-time", "Full-time"),
    ("full time", "Full-time"),
    ("fulltime", "Full-time"),
    ("part-time", "Part-time"),
    ("part time", "Part-time"),
    ("parttime", "Part-time"),
    ("contract", "Contract"),
    ("contractor", "Contract"),
    ("internship", "Internship"),
    ("intern", "Internship"),
    ("temporary", "Temporary"),
    ("temp", "Temporary"),
];

/// A job posting as supplied by the job store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default, rename = "type")]
    pub job_type: Option<String>,
    #[serde(default)]
    pub is_remote: Option<bool>,
    #[serde(default)]
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Open,
    Closed,
    Draft,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Open => write!(f, "open"),
            JobStatus::Closed => write!(f, "closed"),
            JobStatus::Draft => write!(f, "draft"),
        }
    }
}

impl Job {
    pub fn is_open(&self) -> bool {
        self.status == JobStatus::Open
    }

    pub fn is_remote(&self) -> bool {
        self.is_remote.unwrap_or(false)
    }
}

/// A job together with its relevance score for one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredJob {
    pub job: Job,
    pub score: f32,
    pub matched_terms: BTreeSet<String>,
}

impl ScoredJob {
    /// Browse-mode entry: no scoring applied
    pub fn unranked(job: Job) -> Self {
        Self {
            job,
            score: 0.0,
            matched_terms: BTreeSet::new(),
        }
    }
}

/// Canonical form of a job-type label: lower case, hyphen separated, aliases resolved
pub fn normalize_job_type(value: &str) -> String {
    let lowered = value.trim().to_lowercase().replace(['_', ' '], "-");
    JOB_TYPES
        .iter()
        .find(|(variant, _)| variant.replace(' ', "-") == lowered)
        .map(|(_, canonical)| canonical.to_lowercase())
        .unwrap_or(lowered)
}
