//! LLM-facing side of the job assistant

pub mod json_extractor;
pub mod prompts;
pub mod assistant;
