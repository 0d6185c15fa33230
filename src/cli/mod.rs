use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

#[derive(Parser)]
#[command(
    name = "tubescript",
    about = "Tubescript - Fetch YouTube transcripts and short synopses",
    version,
    long_about = "A CLI tool that resolves a video identifier out of any YouTube URL shape, fetches the video's caption track through yt-dlp, and prints the flat transcript together with a leading-sentences summary."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a video's transcript and derive a short synopsis
    Fetch {
        /// YouTube video URL (prompted for when omitted)
        #[arg(value_name = "URL")]
        url: Option<String>,

        /// Caption language to request (defaults to the configured language)
        #[arg(short, long, value_name = "LANG")]
        language: Option<String>,

        /// Number of leading sentences in the synopsis
        #[arg(short = 'n', long, value_name = "COUNT")]
        sentences: Option<usize>,

        /// Save the transcript to a file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Save the synopsis to a file
        #[arg(long, value_name = "FILE")]
        synopsis_output: Option<PathBuf>,
    },

    /// Show a video's metadata, stream variants and caption track listing
    Analyze {
        /// YouTube video URL (prompted for when omitted)
        #[arg(value_name = "URL")]
        url: Option<String>,

        /// Save the analysis report to a file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show or locate the configuration
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,
    },
}
