//! Prompt template for letting the assistant model pick jobs

use crate::processing::job::ScoredJob;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub job_selection: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            job_selection: JOB_SELECTION_TEMPLATE.to_string(),
        }
    }
}

/// Parameters for prompt template substitution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptParams {
    pub request: String,
    pub candidates: String,
}

impl PromptParams {
    pub fn new(request: &str, matches: &[ScoredJob]) -> Self {
        Self {
            request: request.trim().to_string(),
            candidates: render_candidates(matches),
        }
    }
}

impl PromptTemplates {
    pub fn render_job_selection(&self, params: &PromptParams) -> String {
        let prompt = self
            .job_selection
            .replace("{request}", &params.request)
            .replace("{candidates}", &params.candidates);

        debug!("Rendered job selection prompt ({} chars)", prompt.len());
        prompt
    }
}

/// Numbered candidate list, one job per line
fn render_candidates(matches: &[ScoredJob]) -> String {
    if matches.is_empty() {
        return "(no matching jobs)".to_string();
    }

    matches
        .iter()
        .enumerate()
        .map(|(i, scored)| {
            let job = &scored.job;
            format!(
                "{}. id={} | {} at {} | location: {} | type: {} | salary: {} | relevance: {:.1}",
                i + 1,
                job.id,
                job.title,
                job.company,
                job.location.as_deref().unwrap_or("unspecified"),
                job.job_type.as_deref().unwrap_or("unspecified"),
                job.salary.as_deref().unwrap_or("unspecified"),
                scored.score
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

const JOB_SELECTION_TEMPLATE: &str = r#"TASK: Help the user choose jobs to apply for.

<USER REQUEST>
{request}
</USER REQUEST>

<MATCHING JOBS>
{candidates}
</MATCHING JOBS>

INSTRUCTIONS:
- Only choose from the jobs listed above, using their exact id values.
- If the user wants to apply, reply with a JSON object of the form {"jobIds": ["<id>", ...]}.
- If none of the jobs fit, or the user has not asked to apply, reply in plain text without JSON."#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::job::{Job, JobStatus};
    use chrono::Utc;

    fn scored(id: &str, title: &str, score: f32) -> ScoredJob {
        ScoredJob {
            job: Job {
                id: id.to_string(),
                title: title.to_string(),
                company: "Kopi Co".to_string(),
                description: String::new(),
                requirements: Vec::new(),
                location: Some("Penang".to_string()),
                salary: None,
                job_type: Some("Part-time".to_string()),
                is_remote: None,
                status: JobStatus::Open,
                created_at: Utc::now(),
            },
            score,
            matched_terms: Default::default(),
        }
    }

    #[test]
    fn test_render_lists_candidates() {
        let matches = vec![scored("j1", "Barista", 6.0), scored("j2", "Cafe crew", 1.0)];
        let prompt = PromptTemplates::default().render_job_selection(&PromptParams::new("  barista in penang ", &matches));

        assert!(prompt.contains("barista in penang\n</USER REQUEST>"));
        assert!(prompt.contains("1. id=j1 | Barista at Kopi Co | location: Penang | type: Part-time | salary: unspecified | relevance: 6.0"));
        assert!(prompt.contains("2. id=j2"));
        assert!(prompt.contains("{\"jobIds\""));
    }

    #[test]
    fn test_render_without_matches() {
        let prompt = PromptTemplates::default().render_job_selection(&PromptParams::new("astronaut", &[]));
        assert!(prompt.contains("(no matching jobs)"));
    }
}
