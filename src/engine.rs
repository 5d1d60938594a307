//! The analysis engine: cache lookup, language dispatch, the four
//! analyzers, and scoring, composed into one per-file entry point.
//!
//! Per-file failures are isolated: a file that cannot be analyzed yields
//! a zero-valued output with `error` populated and never aborts a batch.

use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::analyze::{complexity, docs, framework, types};
use crate::cache::ResultCache;
use crate::config::AnalysisProfile;
use crate::metrics::{AnalysisOutput, FrameworkResult, TypeMetrics};
use crate::score;
use crate::source::{Language, SourceFile};

/// Failure categories the engine reports per file. Carried as the
/// `error` string on a zero-valued output, never as a batch abort.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unsupported file type: {0}")]
    Unsupported(String),
    #[error("parse failure: {0}")]
    Parse(String),
}

/// Stateless per-file analysis plus a shared TTL cache.
pub struct Engine {
    cache: ResultCache,
    profile: AnalysisProfile,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(AnalysisProfile::default())
    }
}

impl Engine {
    pub fn new(profile: AnalysisProfile) -> Self {
        let cache = ResultCache::with_ttl(std::time::Duration::from_secs(profile.cache_ttl_secs));
        Self { cache, profile }
    }

    pub fn profile(&self) -> &AnalysisProfile {
        &self.profile
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Analyze one file, serving from cache when the same
    /// `(filename, content)` pair was seen within the TTL.
    pub fn analyze_file(&self, filename: &str, content: &str) -> AnalysisOutput {
        if let Some(hit) = self.cache.get(filename, content) {
            debug!(file = filename, "cache hit");
            return hit;
        }

        let output = self.analyze_uncached(filename, content);
        self.cache.insert(filename, content, output.clone());
        output
    }

    /// Analyze a batch in parallel. Output order matches input order;
    /// per-file failures land in their slot as error outputs.
    pub fn analyze_batch(&self, inputs: &[(String, String)]) -> Vec<AnalysisOutput> {
        inputs
            .par_iter()
            .map(|(filename, content)| self.analyze_file(filename, content))
            .collect()
    }

    fn analyze_uncached(&self, filename: &str, content: &str) -> AnalysisOutput {
        let file = SourceFile::new(filename, content);

        if file.language == Language::Unknown {
            return AnalysisOutput::failed(
                filename,
                Language::Unknown,
                EngineError::Unsupported(filename.to_string()).to_string(),
            );
        }

        let complexity = match complexity::analyze(&file) {
            Ok(m) => m,
            Err(e) => {
                debug!(file = filename, error = %e, "analysis failed");
                return AnalysisOutput::failed(
                    filename,
                    file.language,
                    EngineError::Parse(e.to_string()).to_string(),
                );
            }
        };

        // Type-syntax patterns are ECMAScript-shaped; Python files carry
        // no candidate declarations, so coverage is vacuously 100.
        let type_metrics = match file.language {
            Language::Python => TypeMetrics {
                type_coverage: 100.0,
                ..TypeMetrics::default()
            },
            _ => types::analyze(&file.content, file.kind),
        };

        let documentation = docs::analyze(&file.content, file.language);

        let framework = match file.language {
            Language::Python => FrameworkResult::default(),
            _ => framework::detect(&file.content),
        };

        let outcome = score::score(
            &complexity,
            &type_metrics,
            &documentation,
            &framework,
            &self.profile.gates,
        );

        debug!(
            file = filename,
            score = outcome.quality_score,
            "analysis complete"
        );

        AnalysisOutput {
            path: filename.to_string(),
            language: file.language,
            complexity,
            types: type_metrics,
            documentation,
            framework,
            quality_score: outcome.quality_score,
            recommendations: outcome.recommendations,
            gates: outcome.gates,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotated_const_end_to_end() {
        let engine = Engine::default();
        let out = engine.analyze_file("a.ts", "const x: number = 1;");
        assert!(out.error.is_none());
        assert_eq!(out.types.total_declarations, 1);
        assert_eq!(out.types.explicit_types, 1);
        assert_eq!(out.types.type_coverage, 100.0);
    }

    #[test]
    fn test_bare_const_end_to_end() {
        let engine = Engine::default();
        let out = engine.analyze_file("b.ts", "const x = 1;");
        assert_eq!(out.types.type_coverage, 0.0);
        assert!((0.0..=100.0).contains(&out.quality_score));
    }

    #[test]
    fn test_unsupported_extension() {
        let engine = Engine::default();
        let out = engine.analyze_file("data.csv", "a,b,c");
        assert!(out.is_error());
        assert!(out.error.as_deref().unwrap().contains("unsupported"));
        assert_eq!(out.quality_score, 0.0);
    }

    #[test]
    fn test_python_parse_error_isolated() {
        let engine = Engine::default();
        let out = engine.analyze_file("broken.py", "def broken(:\n    pass\n");
        assert!(out.is_error());
        assert_eq!(out.language, Language::Python);
    }

    #[test]
    fn test_python_type_coverage_vacuous() {
        let engine = Engine::default();
        let out = engine.analyze_file("ok.py", "def f(x):\n    return x\n");
        assert!(out.error.is_none());
        assert_eq!(out.types.type_coverage, 100.0);
        assert_eq!(out.types.total_declarations, 0);
    }

    #[test]
    fn test_cache_hit_equals_fresh_result() {
        let engine = Engine::default();
        let first = engine.analyze_file("a.ts", "const x: number = 1;");
        let second = engine.analyze_file("a.ts", "const x: number = 1;");
        assert_eq!(first, second);
        assert_eq!(engine.cache().len(), 1);
    }

    #[test]
    fn test_batch_preserves_order_and_isolates_failures() {
        let engine = Engine::default();
        let inputs = vec![
            ("good.ts".to_string(), "const x: number = 1;".to_string()),
            ("broken.py".to_string(), "def broken(:\n".to_string()),
            ("also.ts".to_string(), "const y = 2;".to_string()),
        ];
        let results = engine.analyze_batch(&inputs);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].path, "good.ts");
        assert!(results[0].error.is_none());
        assert!(results[1].is_error());
        assert!(results[2].error.is_none());
    }

    #[test]
    fn test_idempotence() {
        let engine = Engine::default();
        let src = "function add(a: number, b: number): number { return a + b; }";
        let a = engine.analyze_file("add.ts", src);
        engine.cache().clear();
        let b = engine.analyze_file("add.ts", src);
        assert_eq!(a, b);
    }

    #[test]
    fn test_react_detection_end_to_end() {
        let engine = Engine::default();
        let out = engine.analyze_file(
            "Counter.tsx",
            "import { useState } from 'react';\nconst [n, setN] = useState(0);\n",
        );
        assert_eq!(
            out.framework.framework,
            Some(crate::metrics::Framework::React)
        );
    }

    #[test]
    fn test_declaration_file_type_coverage() {
        let engine = Engine::default();
        let out = engine.analyze_file("types.d.ts", "declare const x;");
        assert_eq!(out.types.type_coverage, 100.0);
    }
}
