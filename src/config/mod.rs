//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/ideagen/config.toml)
//! 3. Project config (./ideagen.toml)
//! 4. Environment variables (IDEAGEN_*)
//! 5. CLI arguments (highest priority)

mod credentials;
mod loader;
mod types;

pub use credentials::Credentials;
pub use loader::ConfigLoader;
pub use types::*;
