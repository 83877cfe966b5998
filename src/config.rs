use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ForecastError;
use crate::smoothing::HoltWintersConfig;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const CONFIG_PATH_ENV: &str = "COIN_FORECAST_CONFIG";

/// Largest forecast horizon accepted. Four years of daily samples.
pub const MAX_HORIZON: usize = 1_461;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub forecast: ForecastConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Engine parameters. Every fitter shares `horizon`; only Holt-Winters has
/// tunable constants.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub horizon: usize,
    pub holt_winters: HoltWintersConfig,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon: 7,
            holt_winters: HoltWintersConfig::default(),
        }
    }
}

impl ForecastConfig {
    pub fn validate(&self) -> Result<(), ForecastError> {
        check_horizon(self.horizon)?;
        self.holt_winters.validate()
    }
}

pub fn check_horizon(horizon: usize) -> Result<(), ForecastError> {
    if horizon > MAX_HORIZON {
        return Err(ForecastError::InvalidParameter {
            name: "horizon",
            reason: format!("must be at most {MAX_HORIZON}, got {horizon}"),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load from `$COIN_FORECAST_CONFIG`, or `config/default.toml` when unset.
    /// A missing default file yields the built-in defaults; an explicitly
    /// named file must exist.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::load_from(Path::new(&path)),
            Err(_) => {
                let path = PathBuf::from(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config =
            Self::parse(&config_str).with_context(|| format!("invalid {}", path.display()))?;
        Ok(config)
    }

    pub fn parse(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str).context("failed to parse config")?;
        config
            .forecast
            .validate()
            .context("forecast parameters are invalid")?;
        Ok(config)
    }
}
