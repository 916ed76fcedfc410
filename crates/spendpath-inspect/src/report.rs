//! Combine the configured paths and render the result.

use anyhow::Result;
use serde::Serialize;
use spendpath_timelock::TimeLockManager;
use std::fmt::Write as _;

use crate::config::InspectConfig;

/// Timelock facts of one configured path
#[derive(Debug, Clone, Serialize)]
pub struct PathReport {
    pub label: String,
    pub locks: TimeLockManager,
}

/// Outcome of an m-of-n combination
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub threshold: usize,
    pub paths: Vec<PathReport>,
    pub combined: TimeLockManager,
    pub spendable: bool,
}

impl Report {
    /// Evaluate every path and combine them under the configured threshold
    pub fn build(config: &InspectConfig) -> Result<Self> {
        let mut paths = Vec::with_capacity(config.paths.len());
        for path in &config.paths {
            let locks = path.to_manager()?;
            log::debug!("path {}: {}", path.label, locks);
            paths.push(PathReport {
                label: path.label.clone(),
                locks,
            });
        }

        let managers: Vec<TimeLockManager> = paths.iter().map(|p| p.locks.clone()).collect();
        let threshold = config.combine.threshold;
        let combined = TimeLockManager::thresh(&managers, threshold);
        log::info!(
            "{}-of-{} combination: {}",
            threshold,
            managers.len(),
            combined
        );

        Ok(Self {
            threshold,
            spendable: combined.has_spending_path(),
            paths,
            combined,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_text(&self) -> String {
        let width = self
            .paths
            .iter()
            .map(|p| p.label.len())
            .max()
            .unwrap_or(0)
            .max("combined".len());

        let mut out = String::new();
        for path in &self.paths {
            let _ = writeln!(out, "  {:<width$}  {}", path.label, path.locks);
        }
        let _ = writeln!(
            out,
            "  {:<width$}  {}  ({}-of-{})",
            "combined",
            self.combined,
            self.threshold,
            self.paths.len()
        );
        if !self.spendable {
            let _ = writeln!(out, "  no spending path remains at this threshold");
        }
        out
    }
}
