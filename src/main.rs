//! CLI entry point for day1

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use day1::commands::run::RunOptions;

#[derive(Parser)]
#[command(name = "day1")]
#[command(version)]
#[command(about = "Cross-platform onboarding wizard for new hires", long_about = None)]
#[command(
    after_help = "Runs with built-in demo pages by default. Use --pages-dir to point at your own content."
)]
struct Cli {
    /// Directory containing .md pages and day1.yml (default: built-in)
    #[arg(long, global = true)]
    pages_dir: Option<PathBuf>,

    /// Show even if already completed
    #[arg(long)]
    force: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// IP address to bind to
    #[arg(long, default_value = "localhost")]
    ip: String,

    /// Port to listen on
    #[arg(short, long, default_value = "4010")]
    port: u16,

    /// Open browser automatically
    #[arg(short, long)]
    open: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the pages that would be shown
    List {
        /// Platform to filter for (defaults to the current host)
        #[arg(long)]
        platform: Option<String>,
    },

    /// Print version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "day1=debug,info"
    } else {
        "day1=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        None => {
            day1::commands::run::run(RunOptions {
                pages_dir: cli.pages_dir,
                force: cli.force,
                ip: cli.ip,
                port: cli.port,
                open: cli.open,
            })
            .await?;
        }

        Some(Commands::List { platform }) => {
            let (pages_dir, _demo_dir) = match cli.pages_dir {
                Some(dir) => (dir, None),
                None => {
                    let dir = day1::demo::extract()?;
                    (dir.path().to_path_buf(), Some(dir))
                }
            };
            let mut site = day1::Day1::new(&pages_dir);
            if let Some(platform) = platform {
                site = site.with_platform(platform);
            }
            day1::commands::list::run(&site)?;
        }

        Some(Commands::Version) => {
            day1::commands::version::run();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flag_defaults() {
        let cli = Cli::try_parse_from(["day1"]).unwrap();
        assert!(cli.pages_dir.is_none());
        assert!(!cli.force);
        assert!(!cli.verbose);
        assert_eq!(cli.ip, "localhost");
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_list_with_platform() {
        let args = ["day1", "--pages-dir", "/opt/day1", "list", "--platform", "darwin"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.pages_dir, Some(PathBuf::from("/opt/day1")));
        match cli.command {
            Some(Commands::List { platform }) => assert_eq!(platform.as_deref(), Some("darwin")),
            _ => panic!("expected list"),
        }
    }
}
