//! Output formatters for search reports

use crate::config::OutputFormat;
use crate::error::{Result, JobMatcherError};
use crate::output::report::{SearchMode, SearchReport};
use crate::processing::job::ScoredJob;
use colored::Colorize;

/// Trait for formatting search reports
pub trait OutputFormatter {
    fn format_report(&self, report: &SearchReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for piping results into other tools
pub struct JsonFormatter {
    pretty: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn paint_title(&self, text: &str) -> String {
        if self.use_colors {
            text.bold().cyan().to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_score(&self, score: f32) -> String {
        let text = format!("{:>5.1}", score);
        if !self.use_colors {
            return text;
        }
        if score >= 5.0 {
            text.green().bold().to_string()
        } else if score >= 1.0 {
            text.yellow().to_string()
        } else {
            text.dimmed().to_string()
        }
    }

    fn format_header(&self, report: &SearchReport) -> String {
        let mut out = String::new();
        let q = &report.query;

        match report.mode {
            SearchMode::Browse => {
                out.push_str(&self.paint_title("Latest jobs"));
                out.push('\n');
            }
            SearchMode::Ranked => {
                out.push_str(&self.paint_title(&format!("Results for \"{}\"", q.raw_text.trim())));
                out.push('\n');

                if !q.keywords.is_empty() {
                    out.push_str(&format!("  Keywords: {}\n", join(q.keywords.iter())));
                }
                let extra: Vec<&String> = q.expanded_keywords.difference(&q.keywords).collect();
                if !extra.is_empty() {
                    out.push_str(&format!("  Synonyms: {}\n", join(extra.into_iter())));
                }
                if let Some(job_type) = &q.inferred_type {
                    out.push_str(&format!("  Type: {}\n", job_type));
                }
                if let Some(location) = &q.inferred_location {
                    out.push_str(&format!("  Location: {}\n", location));
                }
                if let Some(floor) = q.inferred_salary_floor {
                    out.push_str(&format!("  Salary from: {:.0}\n", floor));
                }
                if q.remote {
                    out.push_str("  Remote: yes\n");
                }
            }
        }

        out.push_str(&format!(
            "  Showing {} of {} jobs\n\n",
            report.results.len(),
            report.total_candidates
        ));
        out
    }

    fn format_result(&self, rank: usize, result: &ScoredJob, mode: SearchMode) -> String {
        let job = &result.job;
        let mut line = match mode {
            SearchMode::Ranked => format!("{:>3}. [{}] ", rank, self.paint_score(result.score)),
            SearchMode::Browse => format!("{:>3}. ", rank),
        };

        let title = if self.use_colors {
            job.title.bold().to_string()
        } else {
            job.title.clone()
        };
        line.push_str(&format!("{} at {}", title, job.company));

        let mut details = Vec::new();
        if let Some(location) = &job.location {
            details.push(location.clone());
        }
        if let Some(job_type) = &job.job_type {
            details.push(job_type.clone());
        }
        if job.is_remote() {
            details.push("Remote".to_string());
        }
        if let Some(salary) = &job.salary {
            details.push(salary.clone());
        }
        details.push(format!("posted {}", job.created_at.format("%Y-%m-%d")));

        line.push_str(&format!("\n       {} | id: {}", details.join(" | "), job.id));

        if !result.matched_terms.is_empty() {
            line.push_str(&format!("\n       matched: {}", join(result.matched_terms.iter())));
        }

        line.push('\n');
        line
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &SearchReport) -> Result<String> {
        let mut out = self.format_header(report);

        if report.results.is_empty() {
            out.push_str("No matching jobs found.\n");
            return Ok(out);
        }

        for (idx, result) in report.results.iter().enumerate() {
            out.push_str(&self.format_result(idx + 1, result, report.mode));
        }

        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &SearchReport) -> Result<String> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        };
        rendered.map_err(|e| JobMatcherError::OutputFormatting(format!("Failed to render JSON: {}", e)))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

/// Formatter for the requested output format
pub fn formatter_for(format: OutputFormat, use_colors: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleFormatter::new(use_colors)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
    }
}

fn join<'a>(items: impl Iterator<Item = &'a String>) -> String {
    items.map(String::as_str).collect::<Vec<_>>().join(", ")
}
