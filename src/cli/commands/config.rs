//! Config Command
//!
//! Manage ideagen configuration.
//!
//! Usage:
//!   ideagen config show [-f json]
//!   ideagen config path
//!   ideagen config init [-g] [--force]

use crate::cli::Output;
use crate::config::ConfigLoader;
use crate::types::{IdeaError, Result};

/// Show the merged configuration (secrets are never printed)
pub fn show(format: &str) -> Result<()> {
    match format {
        "json" => ConfigLoader::show_config(true),
        "toml" | "text" => ConfigLoader::show_config(false),
        other => Err(IdeaError::Config(format!(
            "Invalid format '{}'. Valid values: text, toml, json",
            other
        ))),
    }
}

/// Show configuration paths
pub fn path() -> Result<()> {
    ConfigLoader::show_path();
    Ok(())
}

/// Write a default config file, globally or in the current directory
pub fn init(global: bool, force: bool) -> Result<()> {
    let output = Output::new();
    let existed = if global {
        ConfigLoader::global_config_path().is_some_and(|p| p.exists())
    } else {
        ConfigLoader::project_config_path().exists()
    };

    let config_path = if global {
        ConfigLoader::init_global(force)?
    } else {
        ConfigLoader::init_project(force)?
    };

    let scope = if global { "global" } else { "project" };
    if existed && !force {
        output.info(&format!(
            "Using {} configuration at {} (pass --force to overwrite)",
            scope,
            config_path.display()
        ));
    } else {
        output.success(&format!("Initialized {} configuration", scope));
    }
    println!("  Config:    {}", config_path.display());
    Ok(())
}
