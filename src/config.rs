//! Configuration management for Matterlist
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    CONFIG_GENERATED, DEBOUNCE_DELAY_MS, DEBOUNCE_MAX_MS, DEFAULT_PAGE_SIZE, DETAIL_PANEL_DEFAULT_WIDTH,
    DETAIL_PANEL_MAX_WIDTH, DETAIL_PANEL_MIN_WIDTH, FILTER_PANEL_DEFAULT_WIDTH, FILTER_PANEL_MAX_WIDTH,
    FILTER_PANEL_MIN_WIDTH, MAX_PAGE_SIZE,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub filters: FiltersConfig,
    pub data: DataConfig,
    pub logging: LoggingConfig,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Filter panel width in columns
    pub filter_panel_width: u16,
    /// Detail card width in columns
    pub detail_panel_width: u16,
    /// Show the inline search bar above the matter list
    pub search_bar_visible: bool,
    /// Allow tiles to hand out their record as a JSON payload
    pub tiles_draggable: bool,
}

/// Filter panel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FiltersConfig {
    /// Quiet period after the last keystroke before text filters are published
    pub debounce_ms: u64,
}

/// Data source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// JSON dataset to serve matters from (built-in sample when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_path: Option<PathBuf>,
    /// Matters per page
    pub page_size: u32,
    /// Artificial delay added to every service response
    pub simulated_latency_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write logs to a file
    pub enabled: bool,
    /// Minimum level: "error", "warn", "info", "debug" or "trace"
    pub level: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            filter_panel_width: FILTER_PANEL_DEFAULT_WIDTH,
            detail_panel_width: DETAIL_PANEL_DEFAULT_WIDTH,
            search_bar_visible: false,
            tiles_draggable: true,
        }
    }
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_DELAY_MS,
        }
    }
}

impl FiltersConfig {
    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dataset_path: None,
            page_size: DEFAULT_PAGE_SIZE,
            simulated_latency_ms: 0,
        }
    }
}

impl DataConfig {
    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        log::LevelFilter::from_str(&self.level).map_err(|_| anyhow::anyhow!("Invalid logging level '{}'", self.level))
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file();

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Option<PathBuf> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from("matterlist.toml");
        if current_dir_config.exists() {
            return Some(current_dir_config);
        }

        // 2. Check XDG config directory
        let xdg_config = Self::get_default_config_path().ok()?;
        xdg_config.exists().then_some(xdg_config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.ui.filter_panel_width < FILTER_PANEL_MIN_WIDTH || self.ui.filter_panel_width > FILTER_PANEL_MAX_WIDTH {
            anyhow::bail!(
                "filter_panel_width must be between {} and {} columns, got {}",
                FILTER_PANEL_MIN_WIDTH,
                FILTER_PANEL_MAX_WIDTH,
                self.ui.filter_panel_width
            );
        }

        if self.ui.detail_panel_width < DETAIL_PANEL_MIN_WIDTH || self.ui.detail_panel_width > DETAIL_PANEL_MAX_WIDTH {
            anyhow::bail!(
                "detail_panel_width must be between {} and {} columns, got {}",
                DETAIL_PANEL_MIN_WIDTH,
                DETAIL_PANEL_MAX_WIDTH,
                self.ui.detail_panel_width
            );
        }

        if self.filters.debounce_ms > DEBOUNCE_MAX_MS {
            anyhow::bail!("debounce_ms cannot exceed {}", DEBOUNCE_MAX_MS);
        }

        if self.data.page_size == 0 || self.data.page_size > MAX_PAGE_SIZE {
            anyhow::bail!("page_size must be between 1 and {}, got {}", MAX_PAGE_SIZE, self.data.page_size);
        }

        self.logging.level_filter()?;

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        let header = format!(
            "# Matterlist Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        );

        let full_content = header + &toml_content;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join("matterlist"))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
