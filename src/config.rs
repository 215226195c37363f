use crate::cli::Cli;
use crate::client::{DEFAULT_TIMEOUT, NWS_API_BASE, USER_AGENT};
use crate::logging::LoggingOptions;
use anyhow::{anyhow, Result};
use etcetera::{choose_app_strategy, AppStrategy, AppStrategyArgs};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// How request failures reach the user.
#[derive(clap::ValueEnum, Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorReporting {
    /// Every failure prints the same "unable to fetch" message.
    #[default]
    Collapsed,
    /// Request failures print the underlying error.
    Detailed,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(skip)]
    pub config_path: PathBuf,
    pub main: MainConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: Self::default_path(),
            main: MainConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MainConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Seconds
    pub timeout: u64,
    pub state: String,
    pub error_reporting: ErrorReporting,
    pub logging: LoggingOptions,
}

impl Default for MainConfig {
    fn default() -> Self {
        Self {
            base_url: NWS_API_BASE.to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT.as_secs(),
            state: "NY".to_string(),
            error_reporting: ErrorReporting::Collapsed,
            logging: LoggingOptions::default(),
        }
    }
}

impl Config {
    pub const ENV_PREFIX: &'static str = "NWS_ALERTS_";

    pub fn default_path() -> PathBuf {
        let mut path = PathBuf::from(&Self::default_dirs().config);
        path.push("config.yml");
        path
    }

    pub fn default_dirs() -> &'static DefaultDirs {
        DEFAULT_DIRS.get_or_init(|| match choose_app_strategy(AppStrategyArgs {
            top_level_domain: "gov".to_string(),
            author: "weather".to_string(),
            app_name: "NWS Alerts".to_string(),
        }) {
            Ok(strategy) => DefaultDirs {
                config: strategy.config_dir(),
            },
            // No home directory, fall back to the working directory
            Err(_) => DefaultDirs {
                config: PathBuf::from("."),
            },
        })
    }

    fn figment(config_path: &Path) -> Figment {
        Figment::from(Serialized::defaults(MainConfig::default()))
            .merge(Yaml::file(config_path))
            .merge(Env::prefixed(Self::ENV_PREFIX).split("__"))
    }

    pub fn from_path(config_path: &Path) -> Result<Self> {
        let main = Self::figment(config_path).extract()?;
        Ok(Self {
            config_path: config_path.to_owned(),
            main,
        })
    }

    pub fn from_cli(args: &Cli) -> Result<Self> {
        let config_path = if let Some(path) = &args.config_path {
            path.to_owned()
        } else {
            Self::default_path()
        };

        let main = Self::figment(&config_path)
            .merge(Serialized::defaults(args))
            .extract()?;

        Ok(Config { config_path, main })
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.main)?)
    }

    pub fn write_config_file(&self) -> Result<()> {
        let yaml = self.to_yaml()?;
        if let Some(dir) = self.config_path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.config_path, yaml)?;
        info!("Wrote config to {}", self.config_path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.main.timeout == 0 {
            return Err(anyhow!("timeout must be at least one second"));
        }
        if self.main.base_url.is_empty() {
            return Err(anyhow!("base_url must not be empty"));
        }
        Ok(())
    }
}

static DEFAULT_DIRS: OnceCell<DefaultDirs> = OnceCell::new();

#[derive(Debug, Deserialize, Serialize)]
pub struct DefaultDirs {
    pub config: PathBuf,
}
