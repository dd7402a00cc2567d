//! Configuration management for customer-tui.
//!
//! Supports layered configuration: defaults → project → user → env

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub data: DataConfig,
}

impl AppConfig {
    /// Load configuration with hierarchy: defaults → project → user → env
    pub fn load(project_root: Option<&Path>) -> Result<Self, ConfigError> {
        use config::{Config, Environment, File};

        let mut builder = Config::builder();

        // 1. Start with defaults
        builder = builder.add_source(
            config::File::from_str(
                include_str!("../default_config.toml"),
                config::FileFormat::Toml,
            )
            .required(false),
        );

        // 2. Project-specific config (.customer-tui.toml in the working directory)
        if let Some(root) = project_root {
            let project_config = root.join(".customer-tui.toml");
            if project_config.exists() {
                builder = builder.add_source(File::from(project_config).required(false));
            }
        }

        // 3. User config (~/.config/customer-tui/config.toml)
        if let Some(config_dir) =
            directories::ProjectDirs::from("com", "customer-tui", "customer-tui")
        {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(File::from(user_config).required(false));
            }
        }

        // 4. Environment variables (CUSTOMER_TUI__*)
        builder = builder.add_source(
            Environment::with_prefix("CUSTOMER_TUI")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        loaded.validate()?;
        Ok(loaded)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.ui.refresh_rate_ms == 0 {
            return Err(ConfigError::Invalid(
                "ui.refresh_rate_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// UI refresh rate in milliseconds
    #[serde(default = "default_refresh_rate_ms")]
    pub refresh_rate_ms: u64,
    /// Enable vim-style navigation (j/k/h/l)
    #[serde(default = "default_vim_navigation")]
    pub vim_navigation: bool,
    /// Terminal widths below this use the card layout when the layout is automatic
    #[serde(default = "default_mobile_breakpoint")]
    pub mobile_breakpoint: u16,
    /// Minimum list width for a two-column card grid
    #[serde(default = "default_two_column_width")]
    pub two_column_width: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: default_refresh_rate_ms(),
            vim_navigation: default_vim_navigation(),
            mobile_breakpoint: default_mobile_breakpoint(),
            two_column_width: default_two_column_width(),
        }
    }
}

fn default_refresh_rate_ms() -> u64 {
    100
}

fn default_vim_navigation() -> bool {
    true
}

fn default_mobile_breakpoint() -> u16 {
    100
}

fn default_two_column_width() -> u16 {
    72
}

/// Where customer records come from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// JSON file holding the customer list (relative paths resolve against the working directory)
    #[serde(default = "default_customers_file")]
    pub customers_file: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            customers_file: default_customers_file(),
        }
    }
}

fn default_customers_file() -> PathBuf {
    PathBuf::from("customers.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.ui.refresh_rate_ms, 100);
        assert!(config.ui.vim_navigation);
        assert_eq!(config.ui.mobile_breakpoint, 100);
        assert_eq!(config.ui.two_column_width, 72);
        assert_eq!(config.data.customers_file, PathBuf::from("customers.json"));
    }

    #[test]
    fn test_project_config_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(".customer-tui.toml"),
            "[ui]\nmobile_breakpoint = 80\n\n[data]\ncustomers_file = \"clients.json\"\n",
        )
        .unwrap();

        let config = AppConfig::load(Some(dir.path())).unwrap();
        assert_eq!(config.ui.mobile_breakpoint, 80);
        assert_eq!(config.ui.two_column_width, 72);
        assert_eq!(config.data.customers_file, PathBuf::from("clients.json"));
    }

    #[test]
    fn test_zero_refresh_rate_rejected() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(".customer-tui.toml"),
            "[ui]\nrefresh_rate_ms = 0\n",
        )
        .unwrap();

        let err = AppConfig::load(Some(dir.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
