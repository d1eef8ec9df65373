use anyhow::Result;
use clap::Parser;
use coursedeck::config::Config;
use coursedeck::logger::Logger;
use coursedeck::ui;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "coursedeck", version, about = "Terminal admin client for a course API")]
struct Cli {
    /// Path to a configuration file (defaults to ./coursedeck.toml or the XDG config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the course API, overriding the configuration
    #[arg(long)]
    api_url: Option<String>,

    /// Write a default configuration file and exit
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    generate_config: Option<Option<PathBuf>>,

    /// Also write logs to the log file
    #[arg(long)]
    log: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = cli.generate_config {
        let path = match path {
            Some(path) => path,
            None => Config::get_default_config_path()?,
        };
        Config::generate_default_config(&path)?;
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => {
            let mut config = Config::load_from_file(path)?;
            config.apply_env_overrides();
            config
        }
        None => Config::load()?,
    };
    if let Some(api_url) = cli.api_url {
        config.api.base_url = api_url;
    }
    if cli.log {
        config.logging.enabled = true;
    }
    config.validate()?;

    let logger = Logger::from_config(config.logging.enabled)?;
    logger.install()?;
    log::info!("starting against {}", config.api.base_url);

    // Run the TUI application
    ui::run_app(config, logger).await?;

    Ok(())
}
