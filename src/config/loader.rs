//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/ideagen/config.toml)
//! 3. Project config (./ideagen.toml)
//! 4. Environment variables (IDEAGEN_* prefix, `__` separates sections)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::types::{IdeaError, Result};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain using Figment:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        Self::load_from(Self::global_config_path(), &Self::project_config_path())
    }

    /// Load with explicit global and project paths (missing files are skipped)
    pub fn load_from(global_path: Option<PathBuf>, project_path: &Path) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = global_path
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(project_path));
        }

        // IDEAGEN_LLM__MODEL -> llm.model (single underscores stay inside keys)
        figment = figment.merge(Env::prefixed("IDEAGEN_").split("__").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| IdeaError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| IdeaError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/ideagen/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join("ideagen"))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        PathBuf::from("ideagen.toml")
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path() {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());
    }

    /// Show current effective configuration
    pub fn show_config(as_json: bool) -> Result<()> {
        let config = Self::load()?;
        println!("{}", Self::render(&config, as_json)?);
        Ok(())
    }

    /// Render configuration as JSON or TOML (secrets are never serialized)
    pub fn render(config: &Config, as_json: bool) -> Result<String> {
        if as_json {
            Ok(serde_json::to_string_pretty(config)?)
        } else {
            toml::to_string_pretty(config).map_err(|e| IdeaError::Config(e.to_string()))
        }
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Initialize global configuration
    pub fn init_global(force: bool) -> Result<PathBuf> {
        let global_dir = Self::global_dir().ok_or_else(|| {
            IdeaError::Config("Cannot determine global config directory".to_string())
        })?;

        let config_path = global_dir.join("config.toml");
        Self::write_default(&config_path, force)?;
        Ok(config_path)
    }

    /// Initialize project configuration
    pub fn init_project(force: bool) -> Result<PathBuf> {
        let config_path = Self::project_config_path();
        Self::write_default(&config_path, force)?;
        Ok(config_path)
    }

    /// Write the default config file unless one exists
    pub fn write_default(path: &Path, force: bool) -> Result<bool> {
        if path.exists() && !force {
            info!("Config exists: {}", path.display());
            return Ok(false);
        }

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, Self::default_config())?;
        info!("Created config: {}", path.display());
        Ok(true)
    }

    /// Generate default config content (TOML)
    fn default_config() -> String {
        r#"# ideagen Configuration
# Project settings in ./ideagen.toml override ~/.config/ideagen/config.toml.
# Secrets: prefer OPENAI_API_KEY and GOOGLE_ACCESS_TOKEN over writing them here.

version = "1.0"

[llm]
provider = "openai"
model = "gpt-4o-mini"
api_base = "https://api.openai.com/v1"
# timeout_secs = 120

[documents]
docs_api_base = "https://docs.googleapis.com"
drive_api_base = "https://www.googleapis.com"
# folder_id = "your-drive-folder-id"

[topics]
count = 10
enforce_count = false
"#
        .to_string()
    }
}
