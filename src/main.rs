//! Job matcher: relevance-ranked job search over job snapshots

use anyhow::Context;
use clap::Parser;
use job_matcher::cli::{self, Cli, Commands, ConfigAction};
use job_matcher::config::{Config, OutputFormat};
use job_matcher::error::{Result, JobMatcherError};
use job_matcher::input::manager::InputManager;
use job_matcher::llm::assistant::{AssistantAction, JobAssistant};
use job_matcher::llm::json_extractor::try_extract_json;
use job_matcher::output::formatter::formatter_for;
use job_matcher::output::report::SearchReport;
use job_matcher::processing::engine::SearchEngine;
use job_matcher::processing::filter::JobFilter;
use log::{error, info};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;

const JOB_FILE_EXTENSIONS: &[&str] = &["json", "jsonl", "ndjson"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Search {
            jobs,
            query,
            limit,
            min_score,
            output,
        } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let jobs = load_jobs(&jobs).await?;
            let engine = SearchEngine::new(&config)?;

            let parsed = engine.parse(&query);
            let limit = limit.or(config.search.default_limit);
            let results = match min_score {
                Some(floor) => engine.rank_with_floor(&jobs, &parsed, limit, floor),
                None => engine.rank(&jobs, &parsed, limit),
            };

            let report = SearchReport::new(parsed, jobs.len(), results);
            print!("{}", formatter_for(format, config.output.color_output).format_report(&report)?);
        }

        Commands::Browse {
            jobs,
            keyword,
            location,
            job_type,
            remote,
            limit,
            output,
        } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let jobs = load_jobs(&jobs).await?;
            let engine = SearchEngine::new(&config)?;

            let filter = JobFilter {
                keyword,
                location,
                job_type,
                remote_only: remote,
            };
            let filtered = filter.apply(&jobs);
            info!("Filter kept {} of {} jobs", filtered.len(), jobs.len());

            let browse_query = engine.parse("");
            let results = engine.rank(&filtered, &browse_query, limit.or(config.search.default_limit));

            let report = SearchReport::new(browse_query, filtered.len(), results);
            print!("{}", formatter_for(format, config.output.color_output).format_report(&report)?);
        }

        Commands::Assist {
            jobs,
            prompt,
            reply,
            show_prompt,
        } => {
            let jobs = load_jobs(&jobs).await?;
            let assistant = JobAssistant::new(&config)?;
            let matches = assistant.find_matching_jobs(&prompt, &jobs);

            let report = SearchReport::new(assistant.engine().parse(&prompt), jobs.len(), matches.clone());
            print!("{}", formatter_for(OutputFormat::Console, config.output.color_output).format_report(&report)?);

            if show_prompt {
                println!("\n{}", assistant.render_selection_prompt(&prompt, &matches));
            }

            if let Some(reply_path) = reply {
                let reply = std::fs::read_to_string(&reply_path)
                    .with_context(|| format!("Failed to read reply file {}", reply_path.display()))?;

                match assistant.interpret_reply(&reply, &matches) {
                    AssistantAction::Apply(ids) => println!("\nApply to: {}", ids.join(", ")),
                    AssistantAction::PlainText(text) => println!("\nNo apply instruction, reply as text:\n{}", text.trim()),
                }
            }
        }

        Commands::Extract { file } => {
            let text = read_model_output(file.as_deref())?;
            match try_extract_json(&text) {
                Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
                Err(e) => {
                    println!("No actionable JSON found ({})", e);
                }
            }
        }

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                let rendered = toml::to_string_pretty(&config)
                    .map_err(|e| JobMatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("{}", rendered);
            }
            ConfigAction::Reset => {
                let path = config_path.unwrap_or_else(Config::config_path);
                Config::default().save_to(&path)?;
                println!("Configuration reset: {}", path.display());
            }
            ConfigAction::Path => {
                println!("{}", config_path.unwrap_or_else(Config::config_path).display());
            }
        },
    }

    Ok(())
}

fn resolve_format(requested: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match requested {
        Some(format) => cli::parse_output_format(format).map_err(JobMatcherError::InvalidInput),
        None => Ok(config.output.format),
    }
}

async fn load_jobs(path: &Path) -> Result<Vec<job_matcher::Job>> {
    cli::validate_file_extension(path, JOB_FILE_EXTENSIONS)
        .map_err(|e| JobMatcherError::InvalidInput(format!("Jobs file: {}", e)))?;

    let mut input_manager = InputManager::new();
    input_manager.load_open_jobs(path).await
}

fn read_model_output(file: Option<&Path>) -> Result<String> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read model output from stdin")?;
            buf
        }
    };
    Ok(text)
}
