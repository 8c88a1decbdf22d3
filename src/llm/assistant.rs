//! AI job assistant: ranked matches in, structured apply instructions out

use crate::config::Config;
use crate::error::Result;
use crate::llm::json_extractor::extract_json_as;
use crate::llm::prompts::{PromptParams, PromptTemplates};
use crate::processing::engine::SearchEngine;
use crate::processing::job::{Job, ScoredJob};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Payload the model is asked to produce when the user wants to apply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyInstruction {
    #[serde(rename = "jobIds")]
    pub job_ids: Vec<String>,
}

/// What the conversation should do with a model reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AssistantAction {
    /// Apply to these offered jobs, in the order the model listed them
    Apply(Vec<String>),
    /// No actionable instruction; show the reply as-is
    PlainText(String),
}

pub struct JobAssistant {
    engine: SearchEngine,
    prompt_templates: PromptTemplates,
    min_score: f32,
    max_results: usize,
}

impl JobAssistant {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            engine: SearchEngine::new(config)?,
            prompt_templates: PromptTemplates::default(),
            min_score: config.search.assistant_min_score,
            max_results: config.search.assistant_max_results,
        })
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    /// Jobs relevant enough to present as matches for a natural-language request
    pub fn find_matching_jobs(&self, request: &str, jobs: &[Job]) -> Vec<ScoredJob> {
        let matches = self
            .engine
            .search_matching(request, jobs, Some(self.max_results), self.min_score);
        info!("Assistant found {} matching jobs", matches.len());
        matches
    }

    pub fn render_selection_prompt(&self, request: &str, matches: &[ScoredJob]) -> String {
        self.prompt_templates
            .render_job_selection(&PromptParams::new(request, matches))
    }

    /// Turn the model's follow-up reply into an action, keeping only offered ids
    pub fn interpret_reply(&self, reply: &str, offered: &[ScoredJob]) -> AssistantAction {
        let Some(instruction) = extract_json_as::<ApplyInstruction>(reply) else {
            return AssistantAction::PlainText(reply.to_string());
        };

        let offered_ids: HashSet<&str> = offered.iter().map(|s| s.job.id.as_str()).collect();
        let mut seen = HashSet::new();
        let mut accepted = Vec::new();

        for id in instruction.job_ids {
            if !offered_ids.contains(id.as_str()) {
                warn!("Model selected job '{}' which was not offered, ignoring", id);
                continue;
            }
            if seen.insert(id.clone()) {
                accepted.push(id);
            }
        }

        if accepted.is_empty() {
            AssistantAction::PlainText(reply.to_string())
        } else {
            AssistantAction::Apply(accepted)
        }
    }
}
