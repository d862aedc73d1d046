// Configuration loading and parsing (config/cardking.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use cardking_core::client::{DECISION_PATH, HEALTH_PATH};
use cardking_core::collector::SliderRange;

const CONFIG_FILE: &str = "cardking.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub sliders: SliderConfig,
}

/// Where the decision service lives.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    #[serde(default = "default_decision_path")]
    pub decision_path: String,
    #[serde(default = "default_health_path")]
    pub health_path: String,
}

/// Bounds, step and starting position of the condition sliders.
#[derive(Debug, Clone, Deserialize)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl SliderConfig {
    pub fn range(&self) -> SliderRange {
        SliderRange {
            min: self.min,
            max: self.max,
            step: self.step,
        }
    }
}

fn default_decision_path() -> String {
    DECISION_PATH.to_string()
}

fn default_health_path() -> String {
    HEALTH_PATH.to_string()
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/cardking.toml` relative to `base_dir`.
///
/// Does not copy defaults; `load_config()` does that first.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    validate(&config)?;

    Ok(config)
}

/// Seed `config/cardking.toml` from `defaults/` when it is missing.
///
/// Returns the path written, or `None` when a config file already exists.
/// An existing file is never overwritten.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let source = base_dir.join("defaults").join(CONFIG_FILE);
    let config_dir = base_dir.join("config");
    let target = config_dir.join(CONFIG_FILE);

    if target.exists() {
        return Ok(None);
    }
    if !source.is_file() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "no {CONFIG_FILE} in {} and no defaults/ copy to seed it from; \
                 run from the crate root",
                config_dir.display()
            ),
        });
    }

    let copy_err = |what: &str, e: std::io::Error| ConfigError::DefaultsCopyError {
        message: format!("failed to {what}: {e}"),
    };
    std::fs::create_dir_all(&config_dir).map_err(|e| copy_err("create config directory", e))?;
    std::fs::copy(&source, &target)
        .map_err(|e| copy_err(&format!("copy {}", source.display()), e))?;

    Ok(Some(target))
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Seeds the config file from defaults before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    if let Some(path) = ensure_config_file(&cwd)? {
        tracing::info!("Seeded {} from defaults", path.display());
    }
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let base_url = config.service.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::ValidationError {
            field: "service.base_url".into(),
            message: format!("must be an http(s) URL, got {base_url:?}"),
        });
    }

    let path_fields: &[(&str, &str)] = &[
        ("service.decision_path", config.service.decision_path.as_str()),
        ("service.health_path", config.service.health_path.as_str()),
    ];
    for (name, val) in path_fields {
        if !val.starts_with('/') {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must start with '/', got {val:?}"),
            });
        }
    }

    let s = &config.sliders;
    if !(s.min.is_finite() && s.max.is_finite()) || s.min >= s.max {
        return Err(ConfigError::ValidationError {
            field: "sliders.min".into(),
            message: format!("must be less than sliders.max ({} >= {})", s.min, s.max),
        });
    }

    if s.step.is_nan() || s.step <= 0.0 {
        return Err(ConfigError::ValidationError {
            field: "sliders.step".into(),
            message: format!("must be > 0, got {}", s.step),
        });
    }

    if !(s.min..=s.max).contains(&s.default) {
        return Err(ConfigError::ValidationError {
            field: "sliders.default".into(),
            message: format!(
                "must be between {} and {} inclusive, got {}",
                s.min, s.max, s.default
            ),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
