use crate::utils::error::{GeoGasError, Result};
use crate::utils::validation::{validate_positive_number, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the config file picked up from the working directory when no
/// `--config` path is given.
pub const DEFAULT_CONFIG_FILE: &str = "geogas.toml";

/// Optional settings file. Every section and field may be omitted; the CLI
/// falls back to built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: Option<ApiConfig>,
    pub cache: Option<CacheConfig>,
    pub scoring: Option<ScoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    pub ttl_minutes: Option<i64>,
    pub data_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub price_weight: Option<f64>,
    pub variety_weight: Option<f64>,
    pub favorite_weight: Option<f64>,
}

impl TomlConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: TomlConfig = toml::from_str(&content).map_err(|e| GeoGasError::ConfigError {
            message: format!("failed to parse {}: {}", path.display(), e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads an explicit config path (missing file is an error there), or
    /// `geogas.toml` from the working directory if one exists.
    pub fn load_if_present(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(api) = &self.api {
            if let Some(endpoint) = &api.endpoint {
                validate_url("api.endpoint", endpoint)?;
            }
            if let Some(timeout) = api.timeout_seconds {
                validate_positive_number("api.timeout_seconds", timeout, 1)?;
            }
        }

        if let Some(cache) = &self.cache {
            if let Some(ttl) = cache.ttl_minutes {
                if ttl < 0 {
                    return Err(GeoGasError::InvalidConfigValueError {
                        field: "cache.ttl_minutes".to_string(),
                        value: ttl.to_string(),
                        reason: "TTL cannot be negative".to_string(),
                    });
                }
            }
        }

        if let Some(scoring) = &self.scoring {
            for (field, value) in [
                ("scoring.price_weight", scoring.price_weight),
                ("scoring.variety_weight", scoring.variety_weight),
                ("scoring.favorite_weight", scoring.favorite_weight),
            ] {
                if let Some(weight) = value {
                    validate_range(field, weight, 0.0, 1.0)?;
                }
            }
        }

        Ok(())
    }
}
