//! Typegauge - static source quality scoring.
//!
//! Typegauge analyzes TypeScript, JavaScript, and Python sources and
//! measures how well-typed, well-documented, and maintainable they are.
//! Four analyzers run over each file (complexity, type coverage,
//! documentation, framework detection) and a scorer folds their output
//! into a single 0-100 quality score with threshold gates and
//! prioritized recommendations.
//!
//! # Architecture
//!
//! - `source`: input model, language and file-kind classification
//! - `patterns`: compiled regex banks for type syntax, docs, frameworks
//! - `analyze`: the four per-concern analyzers (tree-sitter for Python
//!   complexity, text scanning for JS/TS)
//! - `score`: composite scoring, recommendations, quality gates
//! - `cache`: TTL result cache keyed by `(filename, content hash)`
//! - `engine`: per-file orchestration and parallel batch analysis
//! - `config`: YAML analysis profiles
//! - `report`: output formatting (pretty, JSON)
//!
//! The engine takes content in memory and performs no I/O of its own;
//! file collection and report persistence live in the CLI layer.

pub mod analyze;
pub mod cache;
pub mod cli;
pub mod config;
pub mod engine;
pub mod metrics;
pub mod patterns;
pub mod report;
pub mod score;
pub mod source;

pub use cache::ResultCache;
pub use config::{AnalysisProfile, GateThresholds};
pub use engine::Engine;
pub use metrics::{
    AnalysisOutput, ComplexityMetrics, DocumentationMetrics, Framework, FrameworkResult,
    Priority, QualityGate, Recommendation, TypeMetrics,
};
pub use source::{FileKind, Language, SourceFile};
