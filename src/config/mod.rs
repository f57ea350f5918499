use crate::models::SetupConfig;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Configuration manager for loading and saving the YAML setup configuration.
///
/// Manages a single file, `Setup Config.yaml`, inside the configuration
/// directory: app identity, settings keys, compatibility layers and wrapper.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    setup_config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified configuration directory.
    ///
    /// # Arguments
    /// * `config_dir` - Directory containing configuration files (e.g., "Setup Data")
    ///
    /// # Returns
    /// A new ConfigManager instance
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        // Create config directory if it doesn't exist
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            setup_config_path: config_dir.join("Setup Config.yaml"),
            config_dir,
        })
    }

    /// Load the setup configuration file.
    ///
    /// # Returns
    /// The loaded SetupConfig, or defaults if the file doesn't exist
    pub fn load_setup_config(&self) -> Result<SetupConfig> {
        if !self.setup_config_path.exists() {
            tracing::warn!(
                "Setup config file not found at {}, using defaults",
                self.setup_config_path
            );
            return Ok(SetupConfig::default());
        }

        let file_contents = fs::read_to_string(&self.setup_config_path).with_context(|| {
            format!("Failed to read setup config: {}", self.setup_config_path)
        })?;

        let config: SetupConfig = serde_yaml_ng::from_str(&file_contents).with_context(|| {
            format!("Failed to parse setup config: {}", self.setup_config_path)
        })?;

        tracing::info!("Loaded setup config from {}", self.setup_config_path);
        Ok(config)
    }

    /// Save the setup configuration file.
    ///
    /// # Arguments
    /// * `config` - The SetupConfig to save
    pub fn save_setup_config(&self, config: &SetupConfig) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(config).context("Failed to serialize setup config to YAML")?;

        fs::write(&self.setup_config_path, yaml_string).with_context(|| {
            format!("Failed to write setup config: {}", self.setup_config_path)
        })?;

        tracing::info!("Saved setup config to {}", self.setup_config_path);
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Get the setup configuration file path.
    pub fn setup_config_path(&self) -> &Utf8Path {
        &self.setup_config_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let manager = ConfigManager::new(&config_path).unwrap();
        (manager, temp_dir)
    }

    #[test]
    fn test_create_config_manager() {
        let (manager, _temp_dir) = create_test_config_manager();
        assert!(manager.setup_config_path().ends_with("Setup Config.yaml"));
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let (manager, _temp_dir) = create_test_config_manager();
        let config = manager.load_setup_config().unwrap();
        assert_eq!(config.setup.app.display_name, "Army Men II");
    }

    #[test]
    fn test_load_save_setup_config() {
        let (manager, _temp_dir) = create_test_config_manager();

        let mut config = SetupConfig::default();
        config.setup.compat_layers = "~ WIN98".to_string();
        manager.save_setup_config(&config).unwrap();

        let loaded = manager.load_setup_config().unwrap();
        assert_eq!(loaded.setup.compat_layers, "~ WIN98");
        assert_eq!(loaded.setup.app.app_id, "549170");
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let (manager, _temp_dir) = create_test_config_manager();
        fs::write(manager.setup_config_path(), "Setup: [unclosed").unwrap();
        assert!(manager.load_setup_config().is_err());
    }
}
