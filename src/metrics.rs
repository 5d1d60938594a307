//! Result data model for the analysis engine.
//!
//! Every public result is a concrete serde struct with fixed fields, so the
//! report layer and any prompt assembler downstream get a stable,
//! round-trippable shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::source::Language;

/// Complexity metrics for one analyzable unit, or a per-file aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityMetrics {
    /// Cyclomatic complexity, >= 1 (one linear path).
    pub cyclomatic: u32,
    /// Cognitive complexity (nesting-weighted), >= 0.
    pub cognitive: u32,
    /// Maximum block nesting depth reached.
    pub nesting_depth: u32,
    /// Maintainability index in [0, 100], higher is better.
    pub maintainability_index: f64,
}

impl Default for ComplexityMetrics {
    fn default() -> Self {
        Self {
            cyclomatic: 1,
            cognitive: 0,
            nesting_depth: 0,
            maintainability_index: 100.0,
        }
    }
}

impl ComplexityMetrics {
    /// Aggregate per-unit metrics into a file total: cyclomatic and
    /// cognitive sum, nesting takes the max, maintainability averages.
    pub fn aggregate(units: &[ComplexityMetrics]) -> ComplexityMetrics {
        if units.is_empty() {
            return ComplexityMetrics::default();
        }
        let mi_sum: f64 = units.iter().map(|u| u.maintainability_index).sum();
        ComplexityMetrics {
            cyclomatic: units.iter().map(|u| u.cyclomatic).sum::<u32>().max(1),
            cognitive: units.iter().map(|u| u.cognitive).sum(),
            nesting_depth: units.iter().map(|u| u.nesting_depth).max().unwrap_or(0),
            maintainability_index: mi_sum / units.len() as f64,
        }
    }
}

/// Type-system usage counts and the derived coverage percentage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeMetrics {
    pub interfaces: u32,
    pub type_aliases: u32,
    pub generics: u32,
    pub type_guards: u32,
    pub type_assertions: u32,
    pub any_types: u32,
    pub utility_types: u32,
    pub mapped_types: u32,
    pub conditional_types: u32,
    /// Candidate declarations considered for coverage.
    pub total_declarations: u32,
    /// Declarations that carry an explicit or inferred-safe type.
    pub explicit_types: u32,
    /// `explicit_types / total_declarations * 100`; 100 when there are no
    /// candidates (vacuously typed) and for declaration files.
    pub type_coverage: f64,
}

/// Documentation counts, coverage, and mean block quality.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentationMetrics {
    pub total_doc_blocks: u32,
    pub param_docs: u32,
    pub return_docs: u32,
    pub interface_docs: u32,
    pub class_docs: u32,
    /// `documented / documentable * 100`; 0 when nothing is documentable —
    /// deliberately the opposite convention from type coverage.
    pub coverage: f64,
    /// Mean per-block quality score over documented blocks only.
    pub quality_score: f64,
}

/// Frameworks the detector can recognize. Declaration order is the
/// tie-break order: equal match totals resolve to the earlier variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    React,
    Angular,
    Vue,
    #[serde(rename = "nextjs")]
    NextJs,
}

impl Framework {
    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::React => "react",
            Framework::Angular => "angular",
            Framework::Vue => "vue",
            Framework::NextJs => "nextjs",
        }
    }

    /// All frameworks in declaration (tie-break) order.
    pub fn all() -> &'static [Framework] {
        &[
            Framework::React,
            Framework::Angular,
            Framework::Vue,
            Framework::NextJs,
        ]
    }
}

impl std::fmt::Display for Framework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of framework detection. `framework` is `None` when no pattern
/// group matched at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameworkResult {
    pub framework: Option<Framework>,
    /// Match counts per pattern group of the selected framework. BTreeMap
    /// keeps serialization order stable.
    pub pattern_counts: BTreeMap<String, u32>,
}

/// A named threshold check. Failures are reported, never fatal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityGate {
    pub name: String,
    pub threshold: f64,
    pub actual: f64,
    pub passed: bool,
}

impl QualityGate {
    pub fn check(name: impl Into<String>, threshold: f64, actual: f64) -> Self {
        Self {
            name: name.into(),
            threshold,
            actual,
            passed: actual >= threshold,
        }
    }
}

/// Recommendation priority buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// One improvement suggestion, ordered by bucket then text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub text: String,
}

/// The complete per-file analysis result. Constructed fresh per call,
/// immutable, and safe to cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutput {
    pub path: String,
    pub language: Language,
    pub complexity: ComplexityMetrics,
    pub types: TypeMetrics,
    pub documentation: DocumentationMetrics,
    pub framework: FrameworkResult,
    /// Aggregate quality score in [0, 100].
    pub quality_score: f64,
    pub recommendations: Vec<Recommendation>,
    pub gates: Vec<QualityGate>,
    /// Populated for fatal parse errors and unsupported file types; all
    /// metric fields are zero-valued in that case, never null.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisOutput {
    /// Zero-valued output carrying an error, so callers can distinguish
    /// "analyzed, scored 0" from "could not analyze".
    pub fn failed(path: &str, language: Language, error: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            language,
            complexity: ComplexityMetrics {
                cyclomatic: 1,
                cognitive: 0,
                nesting_depth: 0,
                maintainability_index: 0.0,
            },
            types: TypeMetrics::default(),
            documentation: DocumentationMetrics::default(),
            framework: FrameworkResult::default(),
            quality_score: 0.0,
            recommendations: Vec::new(),
            gates: Vec::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_empty() {
        let agg = ComplexityMetrics::aggregate(&[]);
        assert_eq!(agg.cyclomatic, 1);
        assert_eq!(agg.cognitive, 0);
        assert!((agg.maintainability_index - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_aggregate_sums_and_maxes() {
        let units = vec![
            ComplexityMetrics {
                cyclomatic: 3,
                cognitive: 4,
                nesting_depth: 2,
                maintainability_index: 80.0,
            },
            ComplexityMetrics {
                cyclomatic: 5,
                cognitive: 1,
                nesting_depth: 3,
                maintainability_index: 60.0,
            },
        ];
        let agg = ComplexityMetrics::aggregate(&units);
        assert_eq!(agg.cyclomatic, 8);
        assert_eq!(agg.cognitive, 5);
        assert_eq!(agg.nesting_depth, 3);
        assert!((agg.maintainability_index - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_gate_check() {
        let gate = QualityGate::check("type coverage", 80.0, 80.0);
        assert!(gate.passed);
        let gate = QualityGate::check("type coverage", 80.0, 79.9);
        assert!(!gate.passed);
    }

    #[test]
    fn test_framework_tiebreak_order() {
        assert_eq!(
            Framework::all(),
            &[
                Framework::React,
                Framework::Angular,
                Framework::Vue,
                Framework::NextJs
            ]
        );
    }

    #[test]
    fn test_failed_output_shape() {
        let out = AnalysisOutput::failed("a.py", Language::Python, "syntax error");
        assert!(out.is_error());
        assert_eq!(out.quality_score, 0.0);
        assert_eq!(out.types.total_declarations, 0);
    }

    #[test]
    fn test_output_json_round_trip() {
        let out = AnalysisOutput::failed("a.xyz", Language::Unknown, "unsupported");
        let json = serde_json::to_string(&out).unwrap();
        let back: AnalysisOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(out, back);
    }
}
