use crate::{Error, Result};
use lablens_types::ValidationError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.toml";

/// Resolve the lablens data directory based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. LABLENS_PATH environment variable (with tilde expansion)
/// 3. XDG data directory
/// 4. ~/.lablens
pub fn resolve_data_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("LABLENS_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("lablens"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".lablens"));
    }

    Err(Error::Config(
        "Could not determine data directory: no HOME directory or XDG data directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Record file loaded when no `--data` is given (relative to the data dir)
    pub data_path: Option<PathBuf>,

    /// Rows returned when a request names no limit
    pub default_limit: usize,

    /// Upper bound for any requested limit
    pub max_limit: usize,

    /// Keep only the top N entities on a matrix axis
    pub matrix_top: Option<usize>,

    /// Drop rows without an age at load time
    pub drop_missing_age: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: None,
            default_limit: 100,
            max_limit: 50_000,
            matrix_top: None,
            drop_missing_age: false,
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE)
    }

    /// Data file with relative paths anchored at `data_dir`
    pub fn data_file(&self, data_dir: &Path) -> Option<PathBuf> {
        let path = self.data_path.as_ref()?;
        let path = expand_tilde(&path.to_string_lossy());
        if path.is_absolute() {
            Some(path)
        } else {
            Some(data_dir.join(path))
        }
    }

    /// Apply the default and the ceiling to a requested limit
    pub fn effective_limit(&self, requested: Option<usize>) -> Result<usize> {
        match requested {
            Some(0) => Err(ValidationError::InvalidLimit.into()),
            Some(limit) => Ok(limit.min(self.max_limit)),
            None => Ok(self.default_limit.min(self.max_limit)),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.default_limit == 0 || self.max_limit == 0 {
            return Err(Error::Config(
                "default_limit and max_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.default_limit, 100);
        assert_eq!(config.max_limit, 50_000);
        assert!(config.data_path.is_none());
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = Config::path_in(temp_dir.path());

        let config = Config {
            data_path: Some(PathBuf::from("lab.csv")),
            matrix_top: Some(25),
            ..Config::default()
        };

        config.save_to(&config_path)?;
        assert!(config_path.exists());

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.data_file(temp_dir.path()),
            Some(temp_dir.path().join("lab.csv"))
        );

        Ok(())
    }

    #[test]
    fn test_partial_file_keeps_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = Config::path_in(temp_dir.path());
        std::fs::write(&config_path, "max_limit = 500\n")?;

        let config = Config::load_from(&config_path)?;
        assert_eq!(config.max_limit, 500);
        assert_eq!(config.default_limit, 100);

        Ok(())
    }

    #[test]
    fn test_zero_limits_rejected() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = Config::path_in(temp_dir.path());
        std::fs::write(&config_path, "max_limit = 0\n")?;

        assert!(matches!(Config::load_from(&config_path), Err(Error::Config(_))));
        Ok(())
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = Config::load_from(&temp_dir.path().join("nonexistent.toml"))?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn test_effective_limit() {
        let config = Config::default();
        assert_eq!(config.effective_limit(None).unwrap(), 100);
        assert_eq!(config.effective_limit(Some(10)).unwrap(), 10);
        assert_eq!(config.effective_limit(Some(1_000_000)).unwrap(), 50_000);
        assert!(matches!(
            config.effective_limit(Some(0)),
            Err(Error::Validation(ValidationError::InvalidLimit))
        ));
    }

    #[test]
    fn test_explicit_path_wins() -> Result<()> {
        assert_eq!(resolve_data_dir(Some("/tmp/lab"))?, PathBuf::from("/tmp/lab"));
        Ok(())
    }
}
