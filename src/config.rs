//! Configuration management for the job matcher

use crate::error::{Result, JobMatcherError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub search: SearchConfig,
    pub output: OutputConfig,
}

/// Field weights and bonuses used by the scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub title_weight: f32,
    pub requirements_weight: f32,
    pub description_weight: f32,
    pub type_bonus: f32,
    pub location_bonus: f32,
    pub salary_bonus: f32,
    pub remote_bonus: f32,
    /// Share of the field weight awarded for a fuzzy hit
    pub fuzzy_factor: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub default_limit: Option<usize>,
    pub max_edit_distance: usize,
    pub assistant_min_score: f32,
    pub assistant_max_results: usize,
    #[serde(default)]
    pub extra_synonyms: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub extra_locations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            title_weight: 3.0,
            requirements_weight: 2.0,
            description_weight: 1.0,
            type_bonus: 2.0,
            location_bonus: 2.0,
            salary_bonus: 1.0,
            remote_bonus: 1.0,
            fuzzy_factor: 0.5,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: None,
            max_edit_distance: 2,
            assistant_min_score: 1.0,
            assistant_max_results: 10,
            extra_synonyms: BTreeMap::new(),
            extra_locations: Vec::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            search: SearchConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first use
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| JobMatcherError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| JobMatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("job-matcher")
            .join("config.toml")
    }

    /// Reject weights that would break the non-negative score invariant
    pub fn validate(&self) -> Result<()> {
        let s = &self.scoring;
        let weights = [
            ("title_weight", s.title_weight),
            ("requirements_weight", s.requirements_weight),
            ("description_weight", s.description_weight),
            ("type_bonus", s.type_bonus),
            ("location_bonus", s.location_bonus),
            ("salary_bonus", s.salary_bonus),
            ("remote_bonus", s.remote_bonus),
        ];

        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(JobMatcherError::Configuration(format!(
                    "scoring.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if !(0.0..=1.0).contains(&s.fuzzy_factor) {
            return Err(JobMatcherError::Configuration(format!(
                "scoring.fuzzy_factor must be between 0 and 1, got {}",
                s.fuzzy_factor
            )));
        }

        let floor = self.search.assistant_min_score;
        if !floor.is_finite() || floor < 0.0 {
            return Err(JobMatcherError::Configuration(format!(
                "search.assistant_min_score must be a non-negative number, got {}",
                floor
            )));
        }

        Ok(())
    }
}
