//! Browse-listing filters applied before display

use crate::processing::job::{normalize_job_type, Job};
use serde::{Deserialize, Serialize};

/// Plain keyword / location / type filter used by the job listing page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobFilter {
    pub keyword: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub remote_only: bool,
}

impl JobFilter {
    pub fn is_empty(&self) -> bool {
        self.keyword.is_none() && self.location.is_none() && self.job_type.is_none() && !self.remote_only
    }

    pub fn matches(&self, job: &Job) -> bool {
        if let Some(keyword) = non_blank(&self.keyword) {
            let keyword = keyword.to_lowercase();
            let hit = job.title.to_lowercase().contains(&keyword)
                || job.company.to_lowercase().contains(&keyword)
                || job.description.to_lowercase().contains(&keyword);
            if !hit {
                return false;
            }
        }

        if let Some(location) = non_blank(&self.location) {
            let wanted = location.to_lowercase();
            match &job.location {
                Some(actual) if actual.to_lowercase().contains(&wanted) => {}
                _ => return false,
            }
        }

        if let Some(job_type) = non_blank(&self.job_type) {
            match &job.job_type {
                Some(actual) if normalize_job_type(actual) == normalize_job_type(job_type) => {}
                _ => return false,
            }
        }

        !self.remote_only || job.is_remote()
    }

    pub fn apply(&self, jobs: &[Job]) -> Vec<Job> {
        jobs.iter().filter(|job| self.matches(job)).cloned().collect()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
