use crate::error::{PicSplitError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub io: IoConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractionConfig {
    /// Output filenames are `<prefix>-<n>.jpg`.
    pub prefix: String,
    /// Write only every Nth frame; 1 writes all of them.
    pub every: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IoConfig {
    /// Inputs at or above this size (bytes) are memory-mapped.
    pub mmap_threshold: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            io: IoConfig::default(),
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            prefix: "Picture".to_string(),
            every: 1,
        }
    }
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            mmap_threshold: crate::scanner::source::MMAP_THRESHOLD,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(PicSplitError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| PicSplitError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| PicSplitError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["picsplit.toml", ".picsplit.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref prefix) = cli_args.prefix {
            self.extraction.prefix = prefix.clone();
        }

        if let Some(every) = cli_args.every {
            self.extraction.every = every;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| PicSplitError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| PicSplitError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.extraction.prefix.is_empty() {
            return Err(PicSplitError::Config {
                message: "Output prefix must not be empty".to_string(),
            });
        }

        // The prefix becomes part of both a filename and the resume pattern.
        if self
            .extraction
            .prefix
            .chars()
            .any(|c| matches!(c, '/' | '\\' | '*' | '?') || c.is_control())
        {
            return Err(PicSplitError::Config {
                message: format!(
                    "Output prefix contains invalid characters: {}",
                    self.extraction.prefix
                ),
            });
        }

        if self.extraction.every == 0 {
            return Err(PicSplitError::Config {
                message: "Stride (every) must be at least 1".to_string(),
            });
        }

        if self.io.mmap_threshold == 0 {
            return Err(PicSplitError::Config {
                message: "Memory-map threshold must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub prefix: Option<String>,
    pub every: Option<u64>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: Option<String>) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn with_every(mut self, every: Option<u64>) -> Self {
        self.every = every;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.extraction.prefix, "Picture");
        assert_eq!(config.extraction.every, 1);
        assert!(config.io.mmap_threshold > 0);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.extraction.every = 0;
        assert!(config.validate().is_err());

        config.extraction.every = 1;
        config.extraction.prefix = "bad/prefix".to_string();
        assert!(config.validate().is_err());

        config.extraction.prefix.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_operations() {
        let config = Config::default();
        let temp_file = NamedTempFile::new().unwrap();

        config.save_to_file(temp_file.path()).unwrap();

        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.extraction.prefix, loaded_config.extraction.prefix);
        assert_eq!(config.io.mmap_threshold, loaded_config.io.mmap_threshold);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let result = Config::load_from_file("/no/such/picsplit.toml");
        assert!(matches!(result, Err(PicSplitError::Config { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();

        let overrides = CliOverrides::new()
            .with_prefix(Some("Frame".to_string()))
            .with_every(Some(4));

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.extraction.prefix, "Frame");
        assert_eq!(config.extraction.every, 4);
    }

    #[test]
    fn test_empty_overrides_keep_defaults() {
        let mut config = Config::default();
        config.merge_with_cli_args(&CliOverrides::new());
        assert_eq!(config.extraction.prefix, "Picture");
        assert_eq!(config.extraction.every, 1);
    }

    #[test]
    fn test_sample_config_generation() {
        let sample = Config::create_sample_config();
        assert!(!sample.is_empty());
        assert!(sample.contains("[extraction]"));
        assert!(sample.contains("[io]"));
        assert!(sample.contains("prefix"));
    }
}
