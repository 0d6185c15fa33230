use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tubescript::cli::{commands, Cli, Commands};
use tubescript::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "tubescript=debug"
    } else {
        "tubescript=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = Config::load().await?;

    // Check for the external caption provider (non-fatal; commands perform
    // their own hard check before first use)
    let missing_deps = tubescript::utils::check_dependencies(&config.provider.ytdlp_path).await;
    if !missing_deps.is_empty() {
        eprintln!("⚠️  Dependency check warnings:");
        for dep in missing_deps {
            eprintln!("   • {}", dep);
        }
    }

    match cli.command {
        Commands::Fetch {
            url,
            language,
            sentences,
            output,
            synopsis_output,
        } => {
            let args = commands::FetchArgs {
                url,
                language,
                sentences,
                output,
                synopsis_output,
            };
            commands::run_fetch(args, &config, cli.quiet).await?;
        }
        Commands::Analyze { url, output } => {
            commands::run_analyze(url, output, &config, cli.quiet).await?;
        }
        Commands::Config { show } => {
            commands::run_config(&config, show)?;
        }
    }

    Ok(())
}
