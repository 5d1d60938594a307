//! Analysis profiles: tunable gate thresholds and engine settings loaded
//! from YAML. Every field has a default, so a partial profile file only
//! overrides what it names.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Thresholds for the quality gates evaluated on every result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateThresholds {
    /// Minimum documentation coverage percentage.
    pub doc_coverage: f64,
    /// Minimum number of documentation blocks.
    pub min_doc_blocks: f64,
    /// Minimum number of `@param` (or `Args:`) entries.
    pub min_param_docs: f64,
    /// Minimum type coverage percentage.
    pub type_coverage: f64,
    /// Minimum maintainability index.
    pub maintainability: f64,
}

impl Default for GateThresholds {
    fn default() -> Self {
        Self {
            doc_coverage: 80.0,
            min_doc_blocks: 5.0,
            min_param_docs: 3.0,
            type_coverage: 80.0,
            maintainability: 65.0,
        }
    }
}

/// One named analysis profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisProfile {
    pub gates: GateThresholds,
    /// Cache entry lifetime in seconds.
    pub cache_ttl_secs: u64,
    /// Batch score below which the CLI exits nonzero.
    pub min_score: f64,
}

impl Default for AnalysisProfile {
    fn default() -> Self {
        Self {
            gates: GateThresholds::default(),
            cache_ttl_secs: 3600,
            min_score: 0.0,
        }
    }
}

impl AnalysisProfile {
    /// Load a profile from a YAML file, validating ranges.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read profile {}", path.display()))?;
        let profile: AnalysisProfile = serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse profile {}", path.display()))?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=100.0).contains(&self.min_score) {
            anyhow::bail!("min_score must be in [0, 100], got {}", self.min_score);
        }
        for (name, value) in [
            ("doc_coverage", self.gates.doc_coverage),
            ("type_coverage", self.gates.type_coverage),
            ("maintainability", self.gates.maintainability),
        ] {
            if !(0.0..=100.0).contains(&value) {
                anyhow::bail!("gates.{} must be in [0, 100], got {}", name, value);
            }
        }
        Ok(())
    }
}
