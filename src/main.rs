//! chelun-site - Personal portfolio with a hidden faux terminal
//!
//! Run with `chelun-site` for the terminal rendering, `chelun-site serve` for
//! the website, or `chelun-site --help` for usage.

use std::path::Path;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use chelun_site::{
    config::{Config, Preferences},
    site,
    tui::App,
    APP_NAME, VERSION,
};

#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(version = VERSION)]
#[command(about = "Personal portfolio with a hidden faux terminal")]
#[command(long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Path to config file
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the page in the terminal (default)
    Tui,

    /// Serve the website over HTTP
    Serve {
        /// Address to listen on (overrides `site.bind_addr`)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Show configuration
    Config {
        /// Initialize config file with defaults
        #[arg(long)]
        init: bool,
    },
}

fn setup_logging(debug: bool, log_file: Option<&Path>) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        // Use info level for our crate, warn for dependencies
        EnvFilter::new("info")
            .add_directive("tokio=warn".parse()?)
            .add_directive("hyper=warn".parse()?)
            .add_directive("tower_http=warn".parse()?)
    };

    match log_file {
        Some(path) => {
            // Log to file when running TUI (so logs don't interfere with display)
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;

            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(file).with_target(false))
                .with(filter)
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
                .with(filter)
                .init();
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Config {
    let loaded = match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    loaded.unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config, using defaults: {}", e);
        Config::default()
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre error hooks
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());
    let debug = cli.debug || config.debug;

    // Ensure required directories exist
    if let Err(e) = config.ensure_directories() {
        eprintln!("Warning: Failed to create directories: {}", e);
    }

    match cli.command {
        None | Some(Commands::Tui) => {
            let log_file = config.log_file_path()?;
            setup_logging(debug, Some(log_file.as_path()))?;

            info!("Starting {} TUI v{}", APP_NAME, VERSION);

            let preferences = Preferences::load().unwrap_or_else(|e| {
                info!("Using default preferences: {}", e);
                Preferences::new()
            });

            let mut app = App::new(config, preferences);
            app.run().await?;
        }

        Some(Commands::Serve { bind }) => {
            setup_logging(debug, None)?;

            let mut config = config;
            if let Some(bind) = bind {
                config.site.bind_addr = bind;
            }

            info!("Starting {} v{}", APP_NAME, VERSION);
            site::serve(config).await?;
        }

        Some(Commands::Config { init }) => {
            setup_logging(debug, None)?;

            let config_path = match cli.config {
                Some(path) => path,
                None => Config::config_file_path()?,
            };

            if init {
                config.save_to(&config_path)?;
                println!("Configuration initialized at {:?}", config_path);
            } else {
                println!("Configuration:");
                println!("{}", toml::to_string_pretty(&config)?);
                println!("\nConfig file: {:?}", config_path);
                println!("Data dir: {:?}", Config::data_dir()?);
                println!("Preferences file: {:?}", Config::preferences_file_path()?);
            }
        }
    }

    Ok(())
}
