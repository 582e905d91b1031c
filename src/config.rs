//! Manager configuration file.
//!
//! Defaults for the wizard and the utilities it calls. Every field is
//! optional in the JSON file; missing fields keep their defaults, and
//! command-line flags override whatever the file says.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{DEFAULT_UNIT_DIR, FALLBACK_SERVICE_NAME};
use crate::validation::validate_service_name;

/// Number of journal records shown by default.
pub const DEFAULT_LOG_LINES: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Name pre-filled in the wizard's first prompt
    pub default_service_name: String,
    pub unit_dir: PathBuf,
    /// Process-control utility
    pub systemctl: String,
    /// Log query utility
    pub journalctl: String,
    pub log_lines: u32,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            default_service_name: FALLBACK_SERVICE_NAME.to_string(),
            unit_dir: PathBuf::from(DEFAULT_UNIT_DIR),
            systemctl: "systemctl".to_string(),
            journalctl: "journalctl".to_string(),
            log_lines: DEFAULT_LOG_LINES,
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub default_service_name: Option<String>,
    pub unit_dir: Option<PathBuf>,
    pub systemctl: Option<String>,
    pub journalctl: Option<String>,
}

impl ManagerConfig {
    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Load from `path` if given, otherwise start from defaults; then apply
    /// `overrides` and validate.
    pub fn resolve(path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.apply(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(name) = overrides.default_service_name {
            self.default_service_name = name;
        }
        if let Some(dir) = overrides.unit_dir {
            self.unit_dir = dir;
        }
        if let Some(program) = overrides.systemctl {
            self.systemctl = program;
        }
        if let Some(program) = overrides.journalctl {
            self.journalctl = program;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validate_service_name(&self.default_service_name)
            .context("Invalid default_service_name")?;

        if self.unit_dir.as_os_str().is_empty() {
            bail!("unit_dir must be specified");
        }
        if self.systemctl.trim().is_empty() {
            bail!("systemctl program must be specified");
        }
        if self.journalctl.trim().is_empty() {
            bail!("journalctl program must be specified");
        }
        if self.log_lines == 0 {
            bail!("log_lines must be at least 1");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = ManagerConfig::default();
        assert_eq!(config.default_service_name, "myservice");
        assert_eq!(config.unit_dir, PathBuf::from("/etc/systemd/system"));
        assert_eq!(config.log_lines, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_config() {
        let config = ManagerConfig {
            default_service_name: "worker1".to_string(),
            log_lines: 200,
            ..Default::default()
        };

        let temp_file = NamedTempFile::new().unwrap();
        config.save_to_file(temp_file.path()).unwrap();

        let loaded = ManagerConfig::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, r#"{{"systemctl": "/usr/bin/systemctl"}}"#).unwrap();

        let loaded = ManagerConfig::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded.systemctl, "/usr/bin/systemctl");
        assert_eq!(loaded.journalctl, "journalctl");
        assert_eq!(loaded.default_service_name, "myservice");
    }

    #[test]
    fn test_invalid_json_fails() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "not json").unwrap();

        let err = ManagerConfig::load_from_file(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse configuration JSON"));
    }

    #[test]
    fn test_overrides_win() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, r#"{{"unit_dir": "/run/systemd/system"}}"#).unwrap();

        let config = ManagerConfig::resolve(
            Some(temp_file.path()),
            ConfigOverrides {
                unit_dir: Some(PathBuf::from("/tmp/units")),
                default_service_name: Some("api".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(config.unit_dir, PathBuf::from("/tmp/units"));
        assert_eq!(config.default_service_name, "api");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = ManagerConfig {
            default_service_name: "my service".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ManagerConfig {
            log_lines: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ManagerConfig {
            systemctl: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
