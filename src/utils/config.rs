use std::env;
use std::path::PathBuf;

use crate::utils::formatting::DEFAULT_CURRENCY_SYMBOL;

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: Option<PathBuf>,
    pub currency_symbol: String,
    pub trending_top: usize,
    pub chart_width: usize,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let config = Self::from_lookup(|key| env::var(key).ok())?;

        tracing::debug!(
            "Config: loaded (catalog: {:?}, currency: {})",
            config.catalog_path,
            config.currency_symbol
        );
        Ok(config)
    }

    /// Build a config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Config {
            catalog_path: lookup("SHOP_CATALOG_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            currency_symbol: lookup("SHOP_CURRENCY_SYMBOL")
                .unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string()),
            trending_top: parse_number(&lookup, "SHOP_TRENDING_TOP", 5)?,
            chart_width: parse_number(&lookup, "SHOP_CHART_WIDTH", 40)?,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Command-line `--config` wins over `SHOP_CATALOG_PATH`.
    pub fn with_catalog_path(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.catalog_path = path;
        }
        self
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.currency_symbol.trim().is_empty() {
            return Err(anyhow::anyhow!("SHOP_CURRENCY_SYMBOL must not be empty"));
        }

        if self.trending_top == 0 {
            return Err(anyhow::anyhow!("SHOP_TRENDING_TOP must be at least 1"));
        }

        if self.chart_width < 10 {
            return Err(anyhow::anyhow!("SHOP_CHART_WIDTH must be at least 10"));
        }

        Ok(())
    }
}

fn parse_number<F>(lookup: &F, key: &str, default: usize) -> anyhow::Result<usize>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a non-negative integer, got '{}'", key, raw)),
        None => Ok(default),
    }
}
