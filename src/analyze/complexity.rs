//! Structural complexity analysis.
//!
//! Two paths share one metric contract:
//!
//! - Python is parsed with tree-sitter and walked per `def`/`class` unit;
//!   a file that fails to parse is a fatal, per-file structured failure.
//! - JS/TS is scanned textually (keyword matching plus brace counting)
//!   since no ECMAScript parser is used; the scan never fails, exotic
//!   syntax just stops matching.
//!
//! Cyclomatic complexity starts at 1 and adds 1 per branching construct
//! and per boolean operator token. Cognitive complexity adds
//! `1 + nesting depth` per branching construct.

use once_cell::sync::Lazy;
use regex::Regex;
use tree_sitter::Node;

use crate::metrics::ComplexityMetrics;
use crate::source::{Language, SourceFile};

/// Tokens the JS/TS scan reacts to, in source order per line.
static TOKENS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{|\}|&&|\|\||\b(?:if|while|for|case|catch)\b").unwrap());

/// Analyze a whole file, dispatching on language.
///
/// The JS/TS path treats the file as a single unit; Python aggregates per
/// declaration unit (cyclomatic/cognitive sum, nesting max, MI mean).
pub fn analyze(file: &SourceFile) -> anyhow::Result<ComplexityMetrics> {
    match file.language {
        Language::Python => {
            let units = python_units(&file.content, &file.path)?;
            Ok(ComplexityMetrics::aggregate(&units))
        }
        Language::TypeScript | Language::JavaScript => Ok(scan_unit(&file.content)),
        Language::Unknown => Ok(ComplexityMetrics::default()),
    }
}

/// Maintainability index, normalized to [0, 100].
///
/// `MI = max(0, 171 - 5.2 ln(cognitive+1) - 0.23 cyclomatic - 16.2 ln(loc)) * 100/171`
pub fn maintainability_index(cyclomatic: u32, cognitive: u32, loc: usize) -> f64 {
    let loc = loc.max(1) as f64;
    let mi = 171.0
        - 5.2 * f64::from(cognitive + 1).ln()
        - 0.23 * f64::from(cyclomatic)
        - 16.2 * loc.ln();
    mi.max(0.0) * 100.0 / 171.0
}

// ---------------------------------------------------------------------------
// JS/TS text scan
// ---------------------------------------------------------------------------

/// Scan one JS/TS unit of source text.
pub fn scan_unit(unit: &str) -> ComplexityMetrics {
    let mut cyclomatic: u32 = 1;
    let mut cognitive: u32 = 0;
    let mut depth: u32 = 0;
    let mut max_depth: u32 = 0;
    let mut in_block_comment = false;

    for line in unit.lines() {
        let clean = sanitize_line(line, &mut in_block_comment);
        for token in TOKENS.find_iter(&clean) {
            match token.as_str() {
                "{" => {
                    depth += 1;
                    max_depth = max_depth.max(depth);
                }
                "}" => depth = depth.saturating_sub(1),
                "&&" | "||" => cyclomatic += 1,
                _ => {
                    cyclomatic += 1;
                    cognitive += 1 + depth;
                }
            }
        }
    }

    let loc = unit.lines().count().max(1);
    ComplexityMetrics {
        cyclomatic,
        cognitive,
        nesting_depth: max_depth,
        maintainability_index: maintainability_index(cyclomatic, cognitive, loc),
    }
}

/// Blank out string literals and comments so keywords inside them don't
/// count. Replaced spans keep their length; brace positions elsewhere are
/// unaffected.
fn sanitize_line(line: &str, in_block_comment: &mut bool) -> String {
    let bytes: Vec<char> = line.chars().collect();
    let mut out = String::with_capacity(line.len());
    let mut i = 0;
    let mut string_delim: Option<char> = None;

    while i < bytes.len() {
        let ch = bytes[i];

        if *in_block_comment {
            if ch == '*' && bytes.get(i + 1) == Some(&'/') {
                *in_block_comment = false;
                out.push_str("  ");
                i += 2;
                continue;
            }
            out.push(' ');
            i += 1;
            continue;
        }

        if let Some(delim) = string_delim {
            if ch == '\\' {
                out.push_str("  ");
                i += 2;
                continue;
            }
            if ch == delim {
                string_delim = None;
            }
            out.push(' ');
            i += 1;
            continue;
        }

        match ch {
            '"' | '\'' | '`' => {
                string_delim = Some(ch);
                out.push(' ');
            }
            '/' if bytes.get(i + 1) == Some(&'/') => {
                // Rest of the line is a comment
                break;
            }
            '/' if bytes.get(i + 1) == Some(&'*') => {
                *in_block_comment = true;
                out.push_str("  ");
                i += 2;
                continue;
            }
            _ => out.push(ch),
        }
        i += 1;
    }

    out
}

// ---------------------------------------------------------------------------
// Python AST walk
// ---------------------------------------------------------------------------

/// Parse Python source and compute metrics for every `def`/`class` unit.
///
/// Returns an error when the source does not parse; the caller reports it
/// as a structured per-file failure.
pub fn python_units(content: &str, path: &str) -> anyhow::Result<Vec<ComplexityMetrics>> {
    let mut parser = tree_sitter::Parser::new();
    parser.set_language(&tree_sitter_python::LANGUAGE.into())?;
    let tree = parser
        .parse(content, None)
        .ok_or_else(|| anyhow::anyhow!("failed to parse Python source: {}", path))?;

    let root = tree.root_node();
    if root.has_error() {
        anyhow::bail!("syntax error in Python source: {}", path);
    }

    let mut units = Vec::new();
    collect_units(root, &mut units);
    Ok(units)
}

/// Depth-first search for declaration units. Nested definitions become
/// their own units and also count inside the enclosing unit's walk, the
/// same double-counting a plain AST walk produces.
fn collect_units(node: Node, units: &mut Vec<ComplexityMetrics>) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if matches!(child.kind(), "function_definition" | "class_definition") {
            units.push(unit_metrics(child));
        }
        collect_units(child, units);
    }
}

struct UnitAcc {
    cyclomatic: u32,
    cognitive: u32,
    max_depth: u32,
}

fn unit_metrics(node: Node) -> ComplexityMetrics {
    let mut acc = UnitAcc {
        cyclomatic: 1,
        cognitive: 0,
        max_depth: 0,
    };
    walk_control_flow(node, 0, &mut acc);

    let loc = node.end_position().row - node.start_position().row + 1;
    ComplexityMetrics {
        cyclomatic: acc.cyclomatic,
        cognitive: acc.cognitive,
        nesting_depth: acc.max_depth,
        maintainability_index: maintainability_index(acc.cyclomatic, acc.cognitive, loc),
    }
}

fn walk_control_flow(node: Node, depth: u32, acc: &mut UnitAcc) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "if_statement" | "elif_clause" | "while_statement" | "for_statement"
            | "except_clause" | "case_clause" => {
                acc.cyclomatic += 1;
                acc.cognitive += 1 + depth;
                acc.max_depth = acc.max_depth.max(depth + 1);
                walk_control_flow(child, depth + 1, acc);
            }
            // One operator node per `and`/`or`, so a chain of n operands
            // contributes n - 1.
            "boolean_operator" => {
                acc.cyclomatic += 1;
                walk_control_flow(child, depth, acc);
            }
            "conditional_expression" => {
                acc.cyclomatic += 1;
                walk_control_flow(child, depth, acc);
            }
            _ => walk_control_flow(child, depth, acc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceFile;

    #[test]
    fn test_scan_flat_branches() {
        let m = scan_unit("if (a) { x(); }\nif (b) { y(); }\n");
        // 1 + 2 ifs
        assert_eq!(m.cyclomatic, 3);
        // both ifs at depth 0
        assert_eq!(m.cognitive, 2);
        assert_eq!(m.nesting_depth, 1);
    }

    #[test]
    fn test_scan_four_nested_ifs() {
        let m = scan_unit(
            r#"
if (a) {
  if (b) {
    if (c) {
      if (d) {
        work();
      }
    }
  }
}
"#,
        );
        assert_eq!(m.nesting_depth, 4);
        assert!(m.cyclomatic >= 5);
        // 1 + 2 + 3 + 4
        assert_eq!(m.cognitive, 10);
    }

    #[test]
    fn test_scan_boolean_chain() {
        let m = scan_unit("if (a && b || c) { x(); }");
        // 1 base + if + && + ||
        assert_eq!(m.cyclomatic, 4);
    }

    #[test]
    fn test_scan_ignores_strings_and_comments() {
        let m = scan_unit(
            "const s = \"if (a) { while (b) }\";\n// if (c) {\n/* for (;;) { */\nx();\n",
        );
        assert_eq!(m.cyclomatic, 1);
        assert_eq!(m.nesting_depth, 0);
    }

    #[test]
    fn test_scan_never_fails_on_garbage() {
        let m = scan_unit("}}}} if ((( {{ \u{fffd}");
        assert!(m.cyclomatic >= 1);
    }

    #[test]
    fn test_maintainability_bounds() {
        assert!(maintainability_index(1, 0, 1) <= 100.0);
        assert!(maintainability_index(1, 0, 1) > 90.0);
        // Pathological unit still clamps at 0
        assert_eq!(maintainability_index(500, 500, 100_000), 0.0);
    }

    #[test]
    fn test_python_simple_function() {
        let units = python_units(
            "def f(x):\n    if x > 0:\n        return x\n    return 0\n",
            "f.py",
        )
        .unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].cyclomatic, 2);
        assert_eq!(units[0].cognitive, 1);
        assert_eq!(units[0].nesting_depth, 1);
    }

    #[test]
    fn test_python_nested_branches_weighted() {
        let src = r#"
def process(items):
    for item in items:
        if item.ok:
            while item.pending:
                item.step()
"#;
        let units = python_units(src, "p.py").unwrap();
        assert_eq!(units.len(), 1);
        // for + if + while
        assert_eq!(units[0].cyclomatic, 4);
        // 1 + 2 + 3
        assert_eq!(units[0].cognitive, 6);
        assert_eq!(units[0].nesting_depth, 3);
    }

    #[test]
    fn test_python_boolean_operators() {
        let units = python_units("def f(a, b, c):\n    return a and b or c\n", "b.py").unwrap();
        // 1 + 2 operator nodes
        assert_eq!(units[0].cyclomatic, 3);
    }

    #[test]
    fn test_python_syntax_error_is_fatal() {
        let err = python_units("def broken(:\n    pass\n", "broken.py");
        assert!(err.is_err());
    }

    #[test]
    fn test_python_file_aggregation() {
        let file = SourceFile::new(
            "m.py",
            "def a(x):\n    if x:\n        return 1\n    return 0\n\ndef b(y):\n    if y:\n        return 2\n    return 0\n",
        );
        let m = analyze(&file).unwrap();
        // two units, each cyclomatic 2
        assert_eq!(m.cyclomatic, 4);
        assert_eq!(m.nesting_depth, 1);
    }

    #[test]
    fn test_empty_python_module_defaults() {
        let file = SourceFile::new("empty.py", "x = 1\n");
        let m = analyze(&file).unwrap();
        assert_eq!(m, ComplexityMetrics::default());
    }
}
