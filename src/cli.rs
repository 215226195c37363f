use crate::client::Client;
use crate::config::{Config, ErrorReporting};
use crate::logging::{setup_logging, LogLevel};
use crate::region::banner_label;
use crate::services::get_alerts_with;
use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Region code used by the `check` command.
pub const CHECK_STATE: &str = "NY";

fn default(path: &Path) -> String {
    format!("[default: {}]", path.as_os_str().to_string_lossy())
}

/// Active National Weather Service alerts for a US state
#[derive(Parser, Debug, Serialize, Deserialize)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[arg(short, long = "config", value_name = "FILE", help = default(&Config::default_path()))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<PathBuf>,

    /// [default: warn]
    #[arg(short, long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    log_level: Option<LogLevel>,

    /// Two-letter state or territory code [default: NY]
    #[arg(short, long, value_name = "CODE")]
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<String>,

    /// [default: https://api.weather.gov]
    #[arg(short, long, value_name = "URL")]
    #[serde(skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,

    /// Request timeout in seconds [default: 40]
    #[arg(short, long, value_name = "SECONDS")]
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout: Option<u64>,

    /// [default: collapsed]
    #[arg(short, long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    error_reporting: Option<ErrorReporting>,

    #[command(subcommand)]
    #[serde(skip)]
    command: Option<Commands>,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
enum Commands {
    /// Print the active alerts for the configured state (the default)
    Alerts,
    /// Print the active alerts for NY
    Check,
    /// Print the effective configuration
    Config {
        /// Save it to the config file
        #[arg(short, long)]
        write: bool,
    },
}

pub async fn cli() -> Result<()> {
    let args = Cli::parse();

    let mut config = Config::from_cli(&args)?;
    if let Some(level) = args.log_level {
        config.main.logging.console_level = level;
        config.main.logging.file_level = level;
    }
    config.validate()?;
    let _guard = setup_logging(&config.main.logging)?;
    debug!("Command line arguments: {:#?}", &args);
    debug!("Config: {:#?}", &config);

    match &args.command {
        None | Some(Commands::Alerts) => print_alerts(&config).await,
        Some(Commands::Check) => check(&config).await,
        Some(Commands::Config { write }) => print_config(&config, *write)?,
    }
    Ok(())
}

pub fn banner(state: &str) -> String {
    format!(
        "Fetching weather alerts for {}...\n{}",
        banner_label(state),
        "=".repeat(50)
    )
}

async fn print_alerts(config: &Config) {
    let client = Client::from_config(&config.main);
    let state = &config.main.state;
    println!("{}", banner(state));
    let alerts = get_alerts_with(&client, state, config.main.error_reporting).await;
    println!("{alerts}");
}

async fn check(config: &Config) {
    let client = Client::from_config(&config.main);
    println!("Fetching weather alerts for {CHECK_STATE}...");
    let alerts = get_alerts_with(&client, CHECK_STATE, config.main.error_reporting).await;
    println!("{alerts}");
}

fn print_config(config: &Config, write: bool) -> Result<()> {
    if write {
        config.write_config_file()?;
    }
    print!("{}", config.to_yaml()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_overrides() {
        let args = Cli::try_parse_from([
            "nws-alerts",
            "--state",
            "CA",
            "--timeout",
            "5",
            "--error-reporting",
            "detailed",
            "--log-level",
            "debug",
            "check",
        ])
        .unwrap();
        assert_eq!(args.state.as_deref(), Some("CA"));
        assert_eq!(args.timeout, Some(5));
        assert_eq!(args.error_reporting, Some(ErrorReporting::Detailed));
        assert_eq!(args.log_level, Some(LogLevel::Debug));
        assert_eq!(args.command, Some(Commands::Check));
    }

    #[test]
    fn no_subcommand_means_alerts() {
        let args = Cli::try_parse_from(["nws-alerts"]).unwrap();
        assert!(args.command.is_none());
        let args = Cli::try_parse_from(["nws-alerts", "config", "--write"]).unwrap();
        assert_eq!(args.command, Some(Commands::Config { write: true }));
    }

    #[test]
    fn unset_flags_are_not_serialized() {
        let args = Cli::try_parse_from(["nws-alerts", "-s", "TX"]).unwrap();
        let json = serde_json::to_value(&args).unwrap();
        assert_eq!(json, serde_json::json!({"state": "TX"}));
    }

    #[test]
    fn banner_text() {
        assert_eq!(
            banner("NY"),
            format!("Fetching weather alerts for New York (NY)...\n{}", "=".repeat(50))
        );
        assert!(banner("XY").starts_with("Fetching weather alerts for XY...\n"));
    }
}
