//! Configuration for the donation registry.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};

/// Path value that selects a private in-memory database
pub const IN_MEMORY: &str = ":memory:";

/// Environment variable overriding [`RegistryConfig::database_path`]
pub const ENV_DATABASE: &str = "DONOR_REGISTRY_DB";
/// Environment variable overriding [`RegistryConfig::statement_timeout_ms`]
pub const ENV_STATEMENT_TIMEOUT: &str = "DONOR_REGISTRY_STATEMENT_TIMEOUT_MS";
/// Environment variable overriding [`RegistryConfig::blood_shelf_life_days`]
pub const ENV_SHELF_LIFE: &str = "DONOR_REGISTRY_BLOOD_SHELF_LIFE_DAYS";
/// Environment variable overriding [`RegistryConfig::donor_delete_policy`]
pub const ENV_DELETE_POLICY: &str = "DONOR_REGISTRY_DELETE_POLICY";

/// What happens to a donor's donations when the donor is deleted
///
/// Phone numbers are always removed with the donor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonorDeletePolicy {
    /// Refuse to delete a donor that has donations
    #[default]
    Restrict,
    /// Delete the donor's donations and their inventory units too
    Cascade,
}

impl FromStr for DonorDeletePolicy {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "restrict" => Ok(Self::Restrict),
            "cascade" => Ok(Self::Cascade),
            other => Err(RegistryError::ConfigError(format!(
                "unknown donor delete policy '{other}'"
            ))),
        }
    }
}

/// Configuration for the `DonationRegistry`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// SQLite database file, or `:memory:`
    pub database_path: String,
    /// How long to wait for a lock held by another connection
    pub busy_timeout_ms: u64,
    /// Deadline for a single operation's statements
    pub statement_timeout_ms: u64,
    /// Days between blood collection and expiry
    pub blood_shelf_life_days: u32,
    /// Donor deletion semantics
    pub donor_delete_policy: DonorDeletePolicy,
    /// Rows shown in the dashboard's recent donations list
    pub recent_donations_limit: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            database_path: IN_MEMORY.to_string(),
            busy_timeout_ms: 2_000,
            statement_timeout_ms: 5_000,
            blood_shelf_life_days: 42,
            donor_delete_policy: DonorDeletePolicy::Restrict,
            recent_donations_limit: 10,
        }
    }
}

impl RegistryConfig {
    /// Configuration for a database file, other settings at their defaults
    #[must_use]
    pub fn for_path(path: impl Into<String>) -> Self {
        Self {
            database_path: path.into(),
            ..Default::default()
        }
    }

    /// Load configuration from a JSON file; missing keys take their defaults
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }

    /// Apply overrides from `DONOR_REGISTRY_*` environment variables
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DATABASE) {
            self.database_path = path;
        }
        if let Some(value) = lookup(ENV_STATEMENT_TIMEOUT) {
            self.statement_timeout_ms = parse_number(ENV_STATEMENT_TIMEOUT, &value)?;
        }
        if let Some(value) = lookup(ENV_SHELF_LIFE) {
            self.blood_shelf_life_days = parse_number(ENV_SHELF_LIFE, &value)?;
        }
        if let Some(value) = lookup(ENV_DELETE_POLICY) {
            self.donor_delete_policy = value.parse()?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.database_path.trim().is_empty() {
            return Err(RegistryError::ConfigError(
                "database_path must not be empty".to_string(),
            ));
        }
        if self.statement_timeout_ms == 0 {
            return Err(RegistryError::ConfigError(
                "statement_timeout_ms must be positive".to_string(),
            ));
        }
        if self.blood_shelf_life_days == 0 {
            return Err(RegistryError::ConfigError(
                "blood_shelf_life_days must be positive".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.database_path == IN_MEMORY
    }

    #[must_use]
    pub const fn statement_timeout(&self) -> Duration {
        Duration::from_millis(self.statement_timeout_ms)
    }

    #[must_use]
    pub const fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

impl fmt::Display for RegistryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Registry Configuration:")?;
        writeln!(f, "  Database: {}", self.database_path)?;
        writeln!(f, "  Busy Timeout: {} ms", self.busy_timeout_ms)?;
        writeln!(f, "  Statement Timeout: {} ms", self.statement_timeout_ms)?;
        writeln!(f, "  Blood Shelf Life: {} days", self.blood_shelf_life_days)?;
        writeln!(f, "  Donor Delete Policy: {:?}", self.donor_delete_policy)?;
        writeln!(f, "  Recent Donations Shown: {}", self.recent_donations_limit)
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| RegistryError::ConfigError(format!("{key} must be a number, got '{value}'")))
}
