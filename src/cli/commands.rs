//! Command runners for the CLI surface.

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

use crate::analyzer;
use crate::config::Config;
use crate::output;
use crate::pipeline::TranscriptPipeline;
use crate::provider::{CaptionProvider, YtdlpProvider};
use crate::resolver;
use crate::session::FetchSession;
use crate::utils;
use crate::TubescriptError;

pub struct FetchArgs {
    pub url: Option<String>,
    pub language: Option<String>,
    pub sentences: Option<usize>,
    pub output: Option<PathBuf>,
    pub synopsis_output: Option<PathBuf>,
}

/// Resolve a URL, fetch the transcript and print it with its synopsis.
pub async fn run_fetch(args: FetchArgs, config: &Config, quiet: bool) -> Result<()> {
    let url = match args.url {
        Some(url) => url,
        None => utils::read_line_prompt("Enter the YouTube video URL: ")?,
    };

    let id = resolver::resolve(&url)?;
    tracing::info!("Resolved video ID: {}", id);

    let provider = ready_provider(config).await?;
    let language = args.language.unwrap_or_else(|| config.app.language.clone());
    let sentences = args.sentences.unwrap_or(config.app.synopsis_sentences);

    let pipeline = TranscriptPipeline::with_provider(Box::new(provider));

    let spinner = progress_spinner(quiet, "Fetching transcript...");
    let mut session = FetchSession::new();
    session.begin();

    match pipeline.fetch(&id, &language, sentences).await {
        Ok(result) => session.loaded(result),
        Err(cause) => {
            tracing::debug!("Transcript unavailable for {}: {}", id, cause);
            session.failed("Transcript not available for this video.");
        }
    }

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let Some(result) = session.result() else {
        println!("{}", session.status_line());
        return Ok(());
    };

    output::print_fetch(result, sentences);
    println!();
    println!("{}", style(session.status_line()).green());

    if let Some(path) = args.output {
        output::save_text(&result.transcript, &path)?;
        println!("Transcript saved to: {}", path.display());
    }

    if let Some(path) = args.synopsis_output {
        output::save_text(&result.synopsis, &path)?;
        println!("Summary saved to: {}", path.display());
    }

    Ok(())
}

/// Resolve a URL, probe the video and print the analysis report.
pub async fn run_analyze(
    url: Option<String>,
    report_path: Option<PathBuf>,
    config: &Config,
    quiet: bool,
) -> Result<()> {
    let url = match url {
        Some(url) => url,
        None => utils::read_line_prompt("Enter the YouTube video URL: ")?,
    };

    let id = resolver::resolve(&url)?;
    tracing::info!("Resolved video ID: {}", id);

    let provider = ready_provider(config).await?;

    let spinner = progress_spinner(quiet, "Probing video...");
    let probe = provider.probe(&id).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let probe = probe.map_err(TubescriptError::Unavailable)?;
    let report = analyzer::analysis_report(&probe);
    output::print_report(&report);

    if let Some(path) = report_path {
        output::save_text(&report, &path)?;
        println!("Analysis saved to: {}", path.display());
    }

    Ok(())
}

/// Show the current configuration or point at the config file.
pub fn run_config(config: &Config, show: bool) -> Result<()> {
    if show {
        config.display();
    } else {
        println!("Edit the config file to change settings:");
        println!("  {}", Config::config_path()?.display());
    }
    Ok(())
}

/// Build the yt-dlp provider, failing the run if the binary cannot be run.
async fn ready_provider(config: &Config) -> Result<YtdlpProvider> {
    let provider = YtdlpProvider::new(config);

    if !provider.check_availability().await {
        return Err(TubescriptError::ProviderMissing(format!(
            "'{}' could not be run. Install it from https://github.com/yt-dlp/yt-dlp",
            config.provider.ytdlp_path
        ))
        .into());
    }

    Ok(provider)
}

fn progress_spinner(quiet: bool, message: &str) -> Option<ProgressBar> {
    if quiet {
        return None;
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message(message.to_string());
    Some(spinner)
}
