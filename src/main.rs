//! Resume tailor: resume and job description matching, ATS scoring, and
//! tailoring tool

mod cli;
mod config;
mod error;
mod input;
mod processing;
mod output;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction};
use config::Config;
use error::{Result, TailorError};
use input::manager::InputManager;
use log::{error, info};
use output::formatter::{self, OutputFormat};
use output::report::{AnalysisReport, ReportMetadata, TailoringReport};
use processing::analyzer::AnalysisEngine;
use processing::tailor::TailoringEngine;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

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

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            output,
            save,
        } => {
            cli::validate_file_extension(&resume, &["pdf", "txt", "md"])
                .map_err(|e| TailorError::Validation(format!("Resume file: {}", e)))?;
            if let Some(job) = &job {
                cli::validate_file_extension(job, &["txt", "md"])
                    .map_err(|e| TailorError::Validation(format!("Job description file: {}", e)))?;
            }
            let format = OutputFormat::parse(&output).map_err(TailorError::Validation)?;

            info!("Starting resume analysis");
            let start = Instant::now();
            let mut input_manager = InputManager::new(config.limits.clone());

            let resume_text = input_manager.extract_file(&resume).await?;
            let job_text = match &job {
                Some(path) => Some(input_manager.extract_file(path).await?),
                None => None,
            };

            let engine = AnalysisEngine::new(config);
            let result = engine.analyze(&resume_text, job_text.as_deref())?;

            let report = AnalysisReport {
                result,
                metadata: ReportMetadata::new(
                    resume.to_string_lossy().to_string(),
                    job.as_ref().map(|p| p.to_string_lossy().to_string()),
                    engine.vocabulary().term_count(),
                    start.elapsed().as_millis() as u64,
                ),
            };

            emit(formatter::format_analysis(&report, format)?, save).await
        }

        Commands::Ats { resume, output } => {
            cli::validate_file_extension(&resume, &["pdf", "txt", "md"])
                .map_err(|e| TailorError::Validation(format!("Resume file: {}", e)))?;
            let format = OutputFormat::parse(&output).map_err(TailorError::Validation)?;

            info!("Starting ATS compatibility check");
            let start = Instant::now();
            let mut input_manager = InputManager::new(config.limits.clone());
            let resume_text = input_manager.extract_file(&resume).await?;

            let engine = AnalysisEngine::new(config);
            let result = engine.analyze(&resume_text, None)?;

            let report = AnalysisReport {
                result,
                metadata: ReportMetadata::new(
                    resume.to_string_lossy().to_string(),
                    None,
                    engine.vocabulary().term_count(),
                    start.elapsed().as_millis() as u64,
                ),
            };

            emit(formatter::format_analysis(&report, format)?, None).await
        }

        Commands::Tailor {
            resume,
            job,
            output,
            save,
        } => {
            cli::validate_file_extension(&resume, &["pdf", "txt", "md"])
                .map_err(|e| TailorError::Validation(format!("Resume file: {}", e)))?;
            cli::validate_file_extension(&job, &["txt", "md"])
                .map_err(|e| TailorError::Validation(format!("Job description file: {}", e)))?;
            let format = OutputFormat::parse(&output).map_err(TailorError::Validation)?;

            info!("Starting resume tailoring");
            let start = Instant::now();
            let mut input_manager = InputManager::new(config.limits.clone());

            let resume_text = input_manager.extract_file(&resume).await?;
            let job_text = input_manager.extract_file(&job).await?;

            let engine = AnalysisEngine::new(config);
            let tailoring = TailoringEngine::new(engine.vocabulary(), engine.config());
            let result = tailoring.tailor(&resume_text, &job_text)?;

            let report = TailoringReport {
                result,
                metadata: ReportMetadata::new(
                    resume.to_string_lossy().to_string(),
                    Some(job.to_string_lossy().to_string()),
                    engine.vocabulary().term_count(),
                    start.elapsed().as_millis() as u64,
                ),
            };

            emit(formatter::format_tailoring(&report, format)?, save).await
        }

        Commands::Config { action } => {
            match action {
                Some(ConfigAction::Show) | None => {
                    let content = toml::to_string_pretty(&config).map_err(|e| {
                        TailorError::Configuration(format!("Failed to render config: {}", e))
                    })?;
                    println!("{}", content);
                }
                Some(ConfigAction::Reset) => {
                    let default_config = Config::default();
                    default_config.save()?;
                    println!("Configuration reset to defaults");
                }
            }
            Ok(())
        }
    }
}

async fn emit(rendered: String, save: Option<PathBuf>) -> Result<()> {
    match save {
        Some(path) => {
            tokio::fs::write(&path, rendered).await?;
            info!("Output written to {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
