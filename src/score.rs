//! Quality scoring: fold the four analyzer outputs into one 0-100 score,
//! a prioritized recommendation list, and pass/fail quality gates.
//!
//! Every sub-term is clamped to [0, 100] before weighting, so no single
//! pathological metric can push the composite outside the range. Gate
//! failures are reported, never fatal: a best-effort score always comes
//! back even when every gate fails.

use crate::config::GateThresholds;
use crate::metrics::{
    ComplexityMetrics, DocumentationMetrics, FrameworkResult, Priority, QualityGate,
    Recommendation, TypeMetrics,
};

/// Composite weights: types and docs dominate, best practices round out.
const TYPE_WEIGHT: f64 = 0.4;
const DOC_WEIGHT: f64 = 0.4;
const BEST_PRACTICES_WEIGHT: f64 = 0.2;

/// Scoring result, consumed by the engine when assembling the final
/// per-file output.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreOutcome {
    pub quality_score: f64,
    pub recommendations: Vec<Recommendation>,
    pub gates: Vec<QualityGate>,
}

/// Score one file from its analyzer outputs.
pub fn score(
    complexity: &ComplexityMetrics,
    types: &TypeMetrics,
    docs: &DocumentationMetrics,
    _framework: &FrameworkResult,
    thresholds: &GateThresholds,
) -> ScoreOutcome {
    let type_component = type_component(types);
    let doc_component = doc_component(docs);
    let best_component = best_practices_component(complexity, types);

    let quality_score = (TYPE_WEIGHT * type_component
        + DOC_WEIGHT * doc_component
        + BEST_PRACTICES_WEIGHT * best_component)
        .clamp(0.0, 100.0);

    ScoreOutcome {
        quality_score,
        recommendations: recommendations(complexity, types, docs),
        gates: gates(complexity, types, docs, thresholds),
    }
}

fn clamp(v: f64) -> f64 {
    v.clamp(0.0, 100.0)
}

/// Blend of raw coverage, an `any`-usage penalty, and a type-guard bonus.
fn type_component(types: &TypeMetrics) -> f64 {
    let coverage = clamp(types.type_coverage);
    let any_penalty = clamp(100.0 - 10.0 * f64::from(types.any_types));
    let guard_bonus = clamp(25.0 * f64::from(types.type_guards));
    clamp(0.5 * coverage + 0.3 * any_penalty + 0.2 * guard_bonus)
}

/// Blend of coverage and mean block quality.
fn doc_component(docs: &DocumentationMetrics) -> f64 {
    clamp(0.6 * clamp(docs.coverage) + 0.4 * clamp(docs.quality_score))
}

/// Blend of maintainability, an assertion penalty, and the explicit-type
/// ratio. Assertions bypass the checker, so each one costs.
fn best_practices_component(complexity: &ComplexityMetrics, types: &TypeMetrics) -> f64 {
    let mi = clamp(complexity.maintainability_index);
    let assertion_penalty = clamp(100.0 - 15.0 * f64::from(types.type_assertions));
    let explicit_ratio = clamp(types.type_coverage);
    clamp(0.5 * mi + 0.3 * assertion_penalty + 0.2 * explicit_ratio)
}

/// Fixed threshold rules, bucketed High/Medium/Low and sorted
/// lexicographically within a bucket so output is deterministic.
fn recommendations(
    complexity: &ComplexityMetrics,
    types: &TypeMetrics,
    docs: &DocumentationMetrics,
) -> Vec<Recommendation> {
    let mut out = Vec::new();
    let mut push = |priority: Priority, text: &str| {
        out.push(Recommendation {
            priority,
            text: text.to_string(),
        });
    };

    if types.type_coverage < 80.0 {
        push(
            Priority::High,
            "increase type coverage: annotate untyped declarations",
        );
    }
    if types.any_types > 0 {
        push(
            Priority::High,
            "replace `any` types with concrete or generic types",
        );
    }
    if docs.coverage < 50.0 {
        push(
            Priority::High,
            "document public declarations: doc coverage is below 50%",
        );
    }

    if (50.0..80.0).contains(&docs.coverage) {
        push(Priority::Medium, "raise documentation coverage above 80%");
    }
    if docs.total_doc_blocks > 0 && docs.param_docs * 2 < docs.total_doc_blocks {
        push(
            Priority::Medium,
            "add @param tags: most doc blocks do not describe their parameters",
        );
    }
    if docs.total_doc_blocks > 0 && docs.return_docs * 2 < docs.total_doc_blocks {
        push(
            Priority::Medium,
            "add @returns tags: most doc blocks do not describe their return value",
        );
    }
    if f64::from(types.type_assertions) > f64::from(types.total_declarations) * 0.1 {
        push(
            Priority::Medium,
            "reduce type assertions: prefer type guards over `as` casts",
        );
    }

    if complexity.nesting_depth > 4 {
        push(
            Priority::Low,
            "flatten deeply nested branches: nesting depth exceeds 4",
        );
    }
    if complexity.maintainability_index < 65.0 {
        push(
            Priority::Low,
            "split long units: maintainability index is below 65",
        );
    }

    out.sort_by(|a, b| a.priority.cmp(&b.priority).then(a.text.cmp(&b.text)));
    out
}

fn gates(
    complexity: &ComplexityMetrics,
    types: &TypeMetrics,
    docs: &DocumentationMetrics,
    thresholds: &GateThresholds,
) -> Vec<QualityGate> {
    vec![
        QualityGate::check(
            "documentation coverage",
            thresholds.doc_coverage,
            docs.coverage,
        ),
        QualityGate::check(
            "documentation blocks",
            thresholds.min_doc_blocks,
            f64::from(docs.total_doc_blocks),
        ),
        QualityGate::check(
            "parameter docs",
            thresholds.min_param_docs,
            f64::from(docs.param_docs),
        ),
        QualityGate::check("type coverage", thresholds.type_coverage, types.type_coverage),
        QualityGate::check(
            "maintainability index",
            thresholds.maintainability,
            complexity.maintainability_index,
        ),
    ]
}
