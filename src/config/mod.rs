mod schema;

pub use schema::{Config, DEFAULT_DATA_DIR, DEFAULT_RESULTS_DIR};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::season::Season;

/// Get the config directory path (~/.config/rodeo-fantasy/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("rodeo-fantasy"))
}

/// Get the default config file path (~/.config/rodeo-fantasy/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path and
///   falls back to built-in defaults when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file not found at {}", p.display());
            }
            p
        }
        None => match get_config_path() {
            Ok(p) if p.exists() => p,
            _ => return Ok(Config::default()),
        },
    };

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    Ok(config)
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.budget == Some(0) {
        errors.push("budget: must be greater than zero".to_string());
    }

    if let Some(ref season) = config.season {
        if let Err(e) = season.parse::<Season>() {
            errors.push(format!("season: {}", e));
        }
    }

    if config.data_dir.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
        errors.push("data_dir: must not be empty".to_string());
    }

    if config.results_dir.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
        errors.push("results_dir: must not be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
