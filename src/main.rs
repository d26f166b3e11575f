//! Resume ranker: score and rank resumes against a job description

mod cli;
mod config;
mod error;
mod input;
mod output;
mod processing;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction, ModelAction};
use config::Config;
use error::{Result, ResumeRankerError};
use indicatif::ProgressBar;
use input::manager::InputManager;
use log::error;
use output::formatter::{save_report_to_file, ReportGenerator};
use processing::embeddings::EmbeddingEngine;
use processing::model_store::{known_models, ModelStore};
use processing::pipeline::{RankRequest, RankingPipeline};
use processing::skills::parse_skill_list;
use std::process;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Rank {
            job,
            skills,
            resumes,
            output,
            save,
        } => {
            cli::validate_file_extension(&job, &["txt", "md"])
                .map_err(|e| ResumeRankerError::InvalidInput(format!("Job file: {}", e)))?;
            for resume in &resumes {
                cli::validate_file_extension(resume, &["pdf", "txt", "md"])
                    .map_err(|e| ResumeRankerError::InvalidInput(format!("Resume file: {}", e)))?;
            }
            let output_format =
                cli::parse_output_format(&output).map_err(ResumeRankerError::InvalidInput)?;

            // Reject malformed input before touching any document.
            let skills = parse_skill_list(&skills)?;

            let manager = InputManager::new();
            let job_description = manager.load_text(&job).await?;
            let documents = manager.load_batch(&resumes).await?;

            let engine = Arc::new(EmbeddingEngine::load(&config).await?);
            let pipeline = RankingPipeline::new(engine, config.clone());

            let progress = ProgressBar::new_spinner()
                .with_message(format!("Scoring {} resumes...", documents.len()));
            progress.enable_steady_tick(Duration::from_millis(120));

            let report = pipeline
                .rank(RankRequest {
                    job_description,
                    skills,
                    documents,
                })
                .await?;
            progress.finish_and_clear();

            let generator =
                ReportGenerator::with_options(config.output.color_output, config.output.pretty_json);
            let rendered = generator.generate(&report, &output_format)?;

            match save {
                Some(path) => {
                    save_report_to_file(&rendered, &path)?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
            Ok(())
        }

        Commands::Compare { resumes, output } => {
            for resume in &resumes {
                cli::validate_file_extension(resume, &["pdf", "txt", "md"])
                    .map_err(|e| ResumeRankerError::InvalidInput(format!("Resume file: {}", e)))?;
            }
            let output_format =
                cli::parse_output_format(&output).map_err(ResumeRankerError::InvalidInput)?;

            let manager = InputManager::new();
            let documents = manager.load_batch(&resumes).await?;

            let engine = Arc::new(EmbeddingEngine::load(&config).await?);
            let pipeline = RankingPipeline::new(engine, config.clone());
            let report = pipeline.compare(documents).await?;

            let generator =
                ReportGenerator::with_options(config.output.color_output, config.output.pretty_json);
            println!("{}", generator.generate_comparison(&report, &output_format)?);
            Ok(())
        }

        Commands::Models { action } => {
            config.ensure_models_dir()?;
            let store = ModelStore::new(config.models_dir().clone());
            match action {
                ModelAction::List => {
                    println!("Known embedding models:");
                    for info in known_models() {
                        let marker = if store.is_downloaded(&info).await {
                            "✅"
                        } else {
                            "  "
                        };
                        println!(
                            "{} {:<16} {:>4} MB  {}d  {}",
                            marker, info.name, info.size_mb, info.dimensions, info.description
                        );
                    }
                }
                ModelAction::Download { model } => {
                    let info = store.resolve(&model).ok_or_else(|| {
                        ResumeRankerError::ModelLoading(format!(
                            "Unknown embedding model: {}",
                            model
                        ))
                    })?;
                    store.download(&info).await?;
                }
            }
            Ok(())
        }

        Commands::Config { action } => {
            match action.unwrap_or(ConfigAction::Show) {
                ConfigAction::Show => {
                    let content = toml::to_string_pretty(&config).map_err(|e| {
                        ResumeRankerError::Configuration(format!(
                            "Failed to serialize config: {}",
                            e
                        ))
                    })?;
                    println!("{}", content);
                }
                ConfigAction::Reset => {
                    Config::default().save()?;
                    println!("Configuration reset to defaults");
                }
            }
            Ok(())
        }
    }
}
