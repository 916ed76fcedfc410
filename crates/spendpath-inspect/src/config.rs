//! Inspector configuration — parsed from TOML file + environment variable overrides.
//!
//! Priority: environment variables > config file > defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use spendpath_timelock::{lift_policy_str, TimeLock, TimeLockKind, TimeLockManager};
use std::path::Path;

/// Top-level inspector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectConfig {
    /// Output settings
    #[serde(default)]
    pub inspect: InspectSection,

    /// How the paths are combined
    #[serde(default)]
    pub combine: CombineSection,

    /// Alternative spending paths
    #[serde(default)]
    pub paths: Vec<PathSection>,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectSection {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Report format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for InspectSection {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            format: default_format(),
        }
    }
}

/// Threshold combination settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombineSection {
    /// Number of paths used together (m of n)
    #[serde(default = "default_threshold")]
    pub threshold: usize,
}

impl Default for CombineSection {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

/// One spending path, given either as a policy or as explicit locks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSection {
    /// Human-readable label
    pub label: String,

    /// Miniscript policy with string keys, e.g. `and(pk(HEIR),older(26280))`
    pub policy: Option<String>,

    /// Explicit timelock facts
    #[serde(default)]
    pub locks: Vec<LockEntry>,
}

/// A timelock fact as written in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockEntry {
    /// Kind name, e.g. "sequence_depth"
    pub kind: String,

    /// Bound; omitted for "no_timelocks"
    pub value: Option<u32>,
}

// ============================================================================
// Default value functions
// ============================================================================

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_threshold() -> usize {
    1
}

// ============================================================================
// Loading & environment override
// ============================================================================

impl InspectConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: InspectConfig =
            toml::from_str(contents).with_context(|| "Failed to parse TOML config")?;
        Ok(config)
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `SPENDPATH_LOG_LEVEL`
    /// - `SPENDPATH_FORMAT`
    /// - `SPENDPATH_THRESHOLD`
    pub fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("SPENDPATH_LOG_LEVEL") {
            self.inspect.log_level = v;
        }
        if let Ok(v) = std::env::var("SPENDPATH_FORMAT") {
            self.inspect.format = v;
        }
        if let Ok(v) = std::env::var("SPENDPATH_THRESHOLD") {
            if let Ok(m) = v.parse::<usize>() {
                self.combine.threshold = m;
            }
        }
    }

    pub fn json_output(&self) -> bool {
        self.inspect.format == "json"
    }

    /// Validate that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(!self.paths.is_empty(), "at least one [[paths]] entry is required");

        anyhow::ensure!(
            (1..=self.paths.len()).contains(&self.combine.threshold),
            "combine.threshold must be between 1 and {} (got {})",
            self.paths.len(),
            self.combine.threshold
        );

        anyhow::ensure!(
            matches!(self.inspect.format.as_str(), "text" | "json"),
            "inspect.format must be \"text\" or \"json\""
        );

        for path in &self.paths {
            path.to_manager()
                .with_context(|| format!("path \"{}\" is invalid", path.label))?;
        }

        Ok(())
    }
}

impl PathSection {
    /// Build the timelock facts for this path
    pub fn to_manager(&self) -> Result<TimeLockManager> {
        match (&self.policy, self.locks.is_empty()) {
            (Some(policy), true) => Ok(lift_policy_str(policy)?),
            (None, false) => self.locks.iter().map(LockEntry::to_lock).collect(),
            (Some(_), false) => anyhow::bail!("set either policy or locks, not both"),
            (None, true) => anyhow::bail!("one of policy or locks is required"),
        }
    }
}

impl LockEntry {
    pub fn to_lock(&self) -> Result<TimeLock> {
        let kind: TimeLockKind = self.kind.parse()?;
        Ok(TimeLock::try_new(kind, self.value)?)
    }
}

// ============================================================================
// Tests
// ============================================================================
