//! Documentation coverage and quality analysis.
//!
//! JS/TS files are scanned for `/** ... */` blocks, each associated with
//! the nearest following declaration; Python files are scanned for
//! docstrings immediately after a `def`/`class` header. A block at file
//! start with no following declaration is module documentation: it counts
//! as a block but not as a documented declaration.
//!
//! Convention: zero documentable declarations means coverage 0, not 100 —
//! "nothing to document" makes no claim of documentation quality. This is
//! intentionally the opposite of the type-coverage convention.

use crate::metrics::DocumentationMetrics;
use crate::patterns::DOC;
use crate::source::Language;

/// Weights of the per-block quality score.
mod weights {
    pub const LENGTH: f64 = 0.4;
    pub const PARAM: f64 = 0.2;
    pub const RETURN: f64 = 0.2;
    pub const EXAMPLE: f64 = 0.2;
    /// Word count at which the length term saturates.
    pub const ADEQUATE_WORDS: f64 = 10.0;
}

/// Analyze documentation in one file, dispatching on language.
pub fn analyze(content: &str, language: Language) -> DocumentationMetrics {
    match language {
        Language::Python => analyze_python(content),
        _ => analyze_ecmascript(content),
    }
}

/// Per-block quality in [0, 100]: length adequacy plus tag presence, each
/// term capped before weighting. Adding a tag can only raise the score.
fn block_score(words: usize, has_param: bool, has_return: bool, has_example: bool) -> f64 {
    let length = (words as f64 / weights::ADEQUATE_WORDS).min(1.0);
    let sum = weights::LENGTH * length
        + weights::PARAM * f64::from(has_param as u8)
        + weights::RETURN * f64::from(has_return as u8)
        + weights::EXAMPLE * f64::from(has_example as u8);
    sum * 100.0
}

fn coverage(documented: u32, documentable: u32) -> f64 {
    if documentable == 0 {
        return 0.0;
    }
    (f64::from(documented) / f64::from(documentable) * 100.0).clamp(0.0, 100.0)
}

/// Words that open a control block with the same `name(...) {` shape as
/// a method signature.
const CONTROL_KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "switch", "catch", "do", "return", "function", "new", "await",
    "typeof",
];

/// Whether one line starts a documentable declaration. The coverage
/// numerator and denominator both use this predicate, so a documented
/// line always counts on both sides of the ratio.
fn is_documentable_line(line: &str) -> bool {
    if DOC.ts_documentable.is_match(line) {
        return true;
    }
    match DOC.ts_method.captures(line) {
        Some(caps) => !CONTROL_KEYWORDS.contains(&&caps[1]),
        None => false,
    }
}

fn analyze_ecmascript(content: &str) -> DocumentationMetrics {
    let mut metrics = DocumentationMetrics::default();
    let mut block_scores = Vec::new();
    let mut documented: u32 = 0;

    for block in DOC.jsdoc_block.find_iter(content) {
        metrics.total_doc_blocks += 1;

        let text = block.as_str();
        let has_param = DOC.param_tag.is_match(text);
        let has_return = DOC.return_tag.is_match(text);
        let has_example = DOC.example_tag.is_match(text);
        if has_param {
            metrics.param_docs += DOC.param_tag.find_iter(text).count() as u32;
        }
        if has_return {
            metrics.return_docs += DOC.return_tag.find_iter(text).count() as u32;
        }

        let words = doc_words(text);
        block_scores.push(block_score(words, has_param, has_return, has_example));

        // Associate with the nearest following declaration.
        let rest = content[block.end()..].trim_start();
        if let Some(first_line) = rest.lines().next() {
            if is_documentable_line(first_line) {
                documented += 1;
                let stripped = first_line
                    .trim_start()
                    .trim_start_matches("export ")
                    .trim_start_matches("default ")
                    .trim_start_matches("abstract ");
                if stripped.starts_with("interface ") {
                    metrics.interface_docs += 1;
                } else if stripped.starts_with("class ") {
                    metrics.class_docs += 1;
                }
            }
        }
    }

    let documentable = content.lines().filter(|l| is_documentable_line(l)).count() as u32;
    metrics.coverage = coverage(documented, documentable);
    metrics.quality_score = mean(&block_scores);
    metrics
}

fn analyze_python(content: &str) -> DocumentationMetrics {
    let mut metrics = DocumentationMetrics::default();
    let mut block_scores = Vec::new();
    let mut documented: u32 = 0;

    for caps in DOC.py_docstring.captures_iter(content) {
        metrics.total_doc_blocks += 1;
        documented += 1;

        let keyword = caps.get(1).map(|m| m.as_str()).unwrap_or("def");
        if keyword == "class" {
            metrics.class_docs += 1;
        }

        let body = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map(|m| m.as_str())
            .unwrap_or("");
        let has_param = DOC.py_param_section.is_match(body);
        let has_return = DOC.py_return_section.is_match(body);
        let has_example = DOC.py_example_section.is_match(body);
        if has_param {
            metrics.param_docs += 1;
        }
        if has_return {
            metrics.return_docs += 1;
        }

        block_scores.push(block_score(
            body.split_whitespace().count(),
            has_param,
            has_return,
            has_example,
        ));
    }

    // Module docstring: a bare string literal opening the file.
    let trimmed = content.trim_start();
    if trimmed.starts_with("\"\"\"") || trimmed.starts_with("'''") {
        metrics.total_doc_blocks += 1;
    }

    let documentable = DOC.py_declaration.find_iter(content).count() as u32;
    metrics.coverage = coverage(documented, documentable);
    metrics.quality_score = mean(&block_scores);
    metrics
}

/// Word count of a JSDoc block with comment markers stripped.
fn doc_words(block: &str) -> usize {
    block
        .split_whitespace()
        .filter(|w| !matches!(*w, "/**" | "*/" | "*"))
        .count()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
