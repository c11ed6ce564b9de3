use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub api: ApiConfig,
  #[serde(default)]
  pub paging: PagingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
  /// Base URL of the recipe API
  pub url: String,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      url: "https://api.spoonacular.com".to_string(),
    }
  }
}

/// Paging limits. `max_offset` is the server-enforced ceiling on the page
/// start index; the API refuses requests beyond it.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
  /// Items fetched per list page
  pub page_size: usize,
  /// Maximum offset the API will honor
  pub max_offset: usize,
  /// Items fetched per one-shot search
  pub search_limit: usize,
}

impl Default for PagingConfig {
  fn default() -> Self {
    Self {
      page_size: 15,
      max_offset: 900,
      search_limit: 20,
    }
  }
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./pantry.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/pantry/config.yaml
  ///
  /// Every field has a default, so running without a config file is fine.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Ok(Self::default()),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("pantry.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("pantry").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    let config: Config = serde_yaml::from_str(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))?;

    Ok(config)
  }

  /// Get the recipe API key from environment variables.
  ///
  /// Checks PANTRY_API_KEY first, then SPOONACULAR_API_KEY as fallback.
  pub fn get_api_key() -> Result<String> {
    std::env::var("PANTRY_API_KEY")
      .or_else(|_| std::env::var("SPOONACULAR_API_KEY"))
      .map_err(|_| {
        eyre!(
          "Recipe API key not found. Set PANTRY_API_KEY or SPOONACULAR_API_KEY environment variable."
        )
      })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults_when_sections_missing() {
    let config: Config = serde_yaml::from_str("{}").unwrap();
    assert_eq!(config.api.url, "https://api.spoonacular.com");
    assert_eq!(config.paging.page_size, 15);
    assert_eq!(config.paging.max_offset, 900);
    assert_eq!(config.paging.search_limit, 20);
  }

  #[test]
  fn test_partial_override_keeps_other_defaults() {
    let config: Config =
      serde_yaml::from_str("api:\n  url: http://localhost:9000\npaging:\n  page_size: 5\n")
        .unwrap();
    assert_eq!(config.api.url, "http://localhost:9000");
    assert_eq!(config.paging.page_size, 5);
    assert_eq!(config.paging.max_offset, 900);
  }
}
