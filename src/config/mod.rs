//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `BIENESTAR` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use bienestar_triage::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! let rules = config.triage_rules().expect("Invalid rules");
//! println!("Closing after {} replies", rules.max_turns);
//! ```

mod agent;
mod error;
mod logging;

pub use agent::AgentConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;

use serde::Deserialize;
use std::path::Path;

use crate::domain::insight::InsightTemplates;
use crate::domain::triage::TriageRules;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Triage agent overrides and rule files
    #[serde(default)]
    pub agent: AgentConfig,

    /// Log level and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `BIENESTAR` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `BIENESTAR__AGENT__MAX_TURNS=5` -> `agent.max_turns = 5`
    /// - `BIENESTAR__AGENT__ALWAYS_PROBE_CATEGORIES=acoso,salario` -> list
    /// - `BIENESTAR__LOGGING__JSON=true` -> `logging.json = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("BIENESTAR")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("agent.always_probe_categories")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.agent.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Builds the triage rules: the YAML rules file when configured, the
    /// built-in rules otherwise, with environment overrides applied last.
    pub fn triage_rules(&self) -> Result<TriageRules, ConfigError> {
        let mut rules = match &self.agent.rules_path {
            Some(path) => TriageRules::from_yaml(&read_file(path)?)?,
            None => TriageRules::default(),
        };
        self.agent.apply_to(&mut rules);
        rules.validate()?;
        Ok(rules)
    }

    /// Insight templates from the configured YAML file, or the built-in set.
    pub fn insight_templates(&self) -> Result<InsightTemplates, ConfigError> {
        match &self.agent.templates_path {
            Some(path) => Ok(InsightTemplates::from_yaml(&read_file(path)?)?),
            None => Ok(InsightTemplates::default()),
        }
    }
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}
