//! Input manager for job snapshot files

use crate::error::{Result, JobMatcherError};
use crate::input::file_detector::FileType;
use crate::input::job_loader::{JobLoader, JsonJobLoader, JsonLinesJobLoader};
use crate::processing::job::Job;
use log::{info, warn};
use std::collections::HashMap;
use std::path::Path;

pub struct InputManager {
    cache: HashMap<String, Vec<Job>>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Every job in the file, whatever its status
    pub async fn load_jobs(&mut self, path: &Path) -> Result<Vec<Job>> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached) = self.cache.get(&path_str) {
                info!("Using cached jobs for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        if !path.exists() {
            return Err(JobMatcherError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let jobs = match self.detect_file_type(path)? {
            FileType::Json => {
                info!("Reading job snapshot: {}", path.display());
                JsonJobLoader.load(path).await?
            }
            FileType::JsonLines => {
                info!("Reading job lines: {}", path.display());
                JsonLinesJobLoader.load(path).await?
            }
            FileType::Unknown => {
                return Err(JobMatcherError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, jobs.clone());
        }

        Ok(jobs)
    }

    /// Jobs the engine may see: drafts and closed postings are dropped
    pub async fn load_open_jobs(&mut self, path: &Path) -> Result<Vec<Job>> {
        let jobs = self.load_jobs(path).await?;
        let total = jobs.len();
        let open: Vec<Job> = jobs.into_iter().filter(Job::is_open).collect();

        if open.len() < total {
            warn!("Skipped {} jobs that are not open", total - open.len());
        }
        info!("Loaded {} open jobs from {}", open.len(), path.display());

        Ok(open)
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| JobMatcherError::InvalidInput(format!("File has no extension: {}", path.display())))?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
