use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use dockpick::config::Config;
use dockpick::controller::{Controller, CtrlC, SessionSettings};
use dockpick::docker::{ContainerEngine, DockerClient, DockerGateway};
use dockpick::selector::{Fzf, PreviewCommand, Selector};
use dockpick::startup;
use dockpick::ui::{render_details, TerminalConsole, Theme};

/// dockpick - fuzzy-pick a Docker container and act on it
#[derive(Parser, Debug)]
#[command(name = "dockpick")]
#[command(about = "Pick a Docker container with fzf, then start, stop, inspect or exec into it")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Docker host to connect to
    #[arg(short = 'H', long, value_name = "HOST", global = true)]
    host: Option<String>,

    /// Enable debug logging to file
    #[arg(short, long, global = true)]
    debug: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,

    /// Only list running containers
    #[arg(long, global = true)]
    running_only: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Print the summary of one container (used by the finder preview)
    #[command(hide = true)]
    Preview {
        /// Container id or name
        id: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Commands::Version) => {
            print_version();
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Preview { id }) => preview(&cli, id).await,
        None => run_session(&cli).await,
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("✗ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_version() {
    println!("dockpick {}", env!("CARGO_PKG_VERSION"));
    println!(
        "Platform: {} {}",
        std::env::consts::OS,
        std::env::consts::ARCH
    );
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };

    if let Some(host) = &cli.host {
        config.docker.host = Some(host.clone());
    }
    if cli.running_only {
        config.general.include_stopped = false;
    }
    Ok(config)
}

/// Logs go to a file only; the terminal belongs to the session
fn init_logging(cli: &Cli, config: &Config) {
    let level = if cli.debug {
        "debug".to_string()
    } else {
        cli.log_level
            .clone()
            .unwrap_or_else(|| config.logging.level.clone())
    };

    let path = config.logging.file.clone().or_else(|| {
        directories::ProjectDirs::from("com", "dockpick", "dockpick")
            .map(|dirs| dirs.cache_dir().join("dockpick.log"))
    });

    let log_file = path.and_then(|path| {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok()?;
        }
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
    });

    if let Some(file) = log_file {
        tracing_subscriber::fmt()
            .with_env_filter(format!("dockpick={}", level))
            .with_writer(Arc::new(file))
            .with_ansi(false)
            .init();
    } else {
        // If can't open log file, disable logging
        tracing_subscriber::fmt().with_env_filter("off").init();
    }
}

async fn run_session(cli: &Cli) -> Result<ExitCode> {
    let mut config = load_config(cli)?;
    init_logging(cli, &config);

    info!("Starting dockpick v{}", env!("CARGO_PKG_VERSION"));
    let theme = Theme::from_config(&config.ui).context("Invalid [ui] configuration")?;

    let env = match startup::check(&config).await {
        Ok(env) => env,
        Err(e) => {
            info!("Startup check failed: {}", e);
            eprintln!("✗ {}", e.user_message());
            eprintln!("  {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };
    info!(
        "Connected to Docker: {} (API: {})",
        env.connection_info().version,
        env.connection_info().api_version
    );

    config.finder.binary = env.finder.to_string_lossy().into_owned();
    let engine = DockerGateway::new(env.client, env.cli, &config);
    let selector = Selector::new(
        Fzf::new(config.finder.clone()),
        PreviewCommand::current(cli.host.clone(), cli.config.clone()),
        theme.clone(),
    );

    let mut controller = Controller::new(
        engine,
        selector,
        TerminalConsole::new(),
        theme,
        SessionSettings::from_config(&config),
        Box::new(CtrlC::install()),
    );

    let reason = controller.run().await?;
    info!("dockpick exiting: {:?}", reason);
    Ok(ExitCode::SUCCESS)
}

/// Runs inside the finder for every highlighted row
async fn preview(cli: &Cli, id: &str) -> Result<ExitCode> {
    let config = load_config(cli)?;
    init_logging(cli, &config);
    debug!("Rendering preview for {}", id);

    let theme = Theme::from_config(&config.ui)?;
    let client = match DockerClient::connect(config.docker.host.as_deref()).await {
        Ok(client) => client,
        Err(e) => {
            println!("{}", e.user_message());
            return Ok(ExitCode::FAILURE);
        }
    };

    let gateway = DockerGateway::new(client, PathBuf::from(&config.docker.cli), &config);
    match gateway.inspect(id).await {
        Ok(details) => {
            for line in render_details(&details, &theme) {
                println!("{}", line);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("Could not inspect {}: {}", id, e.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}
