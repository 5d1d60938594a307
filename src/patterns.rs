//! Pattern Library: compiled regex sets for TS/JS type syntax, doc
//! comments, and framework idioms.
//!
//! These are heuristics calibrated against common idioms, not a grammar.
//! False positives and negatives are tolerated by design; anything the
//! patterns miss simply does not count.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::metrics::Framework;

/// Type-syntax patterns for TypeScript/JavaScript.
pub struct TsPatterns {
    pub interfaces: Regex,
    pub type_aliases: Regex,
    pub type_assertions: Regex,
    pub type_guards: Regex,
    pub mapped_types: Regex,
    pub conditional_types: Regex,
    pub utility_types: Regex,
    pub any_type: Regex,
    pub generics: Regex,
    pub functions: Regex,
    pub var_declarations: Regex,
    pub interface_property: Regex,
    pub const_assertion: Regex,
    pub generic_init: Regex,
    pub annotated_object_binding: Regex,
}

pub static TS: Lazy<TsPatterns> = Lazy::new(|| TsPatterns {
    interfaces: Regex::new(r"\binterface\s+\w+").unwrap(),
    type_aliases: Regex::new(r"\btype\s+\w+\s*(?:<[^>]*>)?\s*=").unwrap(),
    type_assertions: Regex::new(r"\bas\s+[A-Za-z_][\w.<>\[\]|&]*").unwrap(),
    type_guards: Regex::new(r"\)\s*:\s*\w+\s+is\s+[A-Za-z_][\w.<>\[\]|&]*").unwrap(),
    mapped_types: Regex::new(
        r"type\s+\w+(?:<[^>]+>)?\s*=\s*\{\s*(?:readonly\s+)?\[\s*\w+\s+in\s+",
    )
    .unwrap(),
    conditional_types: Regex::new(r"type\s+\w+\s*<[^>]+>\s*=[^;]*\bextends\b[^;]*\?").unwrap(),
    utility_types: Regex::new(
        r"\b(?:Partial|Readonly|Record|Pick|Omit|Exclude|Extract|NonNullable|Parameters|ConstructorParameters|ReturnType|InstanceType|Required|Awaited|Uppercase|Lowercase|Capitalize|Uncapitalize)<",
    )
    .unwrap(),
    any_type: Regex::new(r":\s*any\b").unwrap(),
    // The identifier must touch the `<`, so `a < b`, `a <= b`, and other
    // comparisons never look like type arguments.
    generics: Regex::new(r"\b\w+<[^<>=\n]+>").unwrap(),
    functions: Regex::new(r"\bfunction\s+\w+\s*\(([^)]*)\)(\s*:\s*[^{;]+)?").unwrap(),
    var_declarations: Regex::new(
        r"\b(?:const|let|var)\s+(\w+)(\s*:\s*[^=;\n]+)?(?:\s*=\s*([^;\n]+))?",
    )
    .unwrap(),
    interface_property: Regex::new(r"(?m)^\s*(?:readonly\s+)?\w+\??\s*:\s*[^;,\n]+").unwrap(),
    const_assertion: Regex::new(r"\bas\s+const\b").unwrap(),
    generic_init: Regex::new(r"\bnew\s+\w+\s*<[^>]+>|\w+\s*<[^<>=\n]+>\s*\(").unwrap(),
    annotated_object_binding: Regex::new(r":\s*\w[\w.<>\[\]|&\s]*=\s*\{").unwrap(),
});

/// Documentation patterns shared by the JS/TS and Python paths.
pub struct DocPatterns {
    /// A `/** ... */` block, non-greedy across lines.
    pub jsdoc_block: Regex,
    pub param_tag: Regex,
    pub return_tag: Regex,
    pub example_tag: Regex,
    /// Top-level declarations counted as documentable for coverage.
    pub ts_documentable: Regex,
    /// A class-member signature line (`name(...) {`, with optional
    /// modifiers and return type). The captured name still needs a
    /// control-keyword check, since `if (...) {` has the same shape.
    pub ts_method: Regex,
    /// Python `def`/`class` header.
    pub py_declaration: Regex,
    /// Docstring opener right after a `def`/`class` header line.
    pub py_docstring: Regex,
    pub py_param_section: Regex,
    pub py_return_section: Regex,
    pub py_example_section: Regex,
}

pub static DOC: Lazy<DocPatterns> = Lazy::new(|| DocPatterns {
    jsdoc_block: Regex::new(r"(?s)/\*\*.*?\*/").unwrap(),
    param_tag: Regex::new(r"@param\b").unwrap(),
    return_tag: Regex::new(r"@returns?\b").unwrap(),
    example_tag: Regex::new(r"@example\b").unwrap(),
    ts_documentable: Regex::new(
        r"(?m)^\s*(?:export\s+)?(?:default\s+)?(?:abstract\s+)?(?:interface|class|enum|(?:async\s+)?function)\s+\w+|^\s*(?:export\s+)?const\s+\w+\s*(?::[^=\n]+)?=\s*(?:async\s*)?\(",
    )
    .unwrap(),
    ts_method: Regex::new(
        r"^\s*(?:(?:public|private|protected|static|readonly|abstract|override|async|get|set)\s+)*([A-Za-z_]\w*)\s*\([^)]*\)\s*(?::[^{;]+)?\{",
    )
    .unwrap(),
    py_declaration: Regex::new(r"(?m)^\s*(?:async\s+)?(?:def|class)\s+\w+").unwrap(),
    py_docstring: Regex::new(
        r#"(?ms)^\s*(?:async\s+)?(def|class)\s+\w+[^\n]*:\s*\n\s*(?:"""(.*?)"""|'''(.*?)''')"#,
    )
    .unwrap(),
    py_param_section: Regex::new(r"(?m)^\s*(?:Args:|Parameters:|:param\b)").unwrap(),
    py_return_section: Regex::new(r"(?m)^\s*(?:Returns:|:returns?\b|:rtype\b)").unwrap(),
    py_example_section: Regex::new(r"(?m)^\s*(?:Examples?:|>>>)").unwrap(),
});

/// One named pattern group belonging to a framework.
pub struct FrameworkGroup {
    pub name: &'static str,
    pub pattern: Regex,
}

/// A framework and its pattern groups, evaluated in declaration order.
pub struct FrameworkPatterns {
    pub framework: Framework,
    pub groups: Vec<FrameworkGroup>,
}

fn group(name: &'static str, pattern: &str) -> FrameworkGroup {
    FrameworkGroup {
        name,
        pattern: Regex::new(pattern).unwrap(),
    }
}

/// Framework pattern groups. Order matches `Framework::all()` so that
/// detection stays deterministic under ties.
pub static FRAMEWORKS: Lazy<Vec<FrameworkPatterns>> = Lazy::new(|| {
    vec![
        FrameworkPatterns {
            framework: Framework::React,
            groups: vec![
                group(
                    "hooks",
                    r"\buse(?:State|Effect|Callback|Memo|Context|Reducer|Ref|LayoutEffect|Transition)\s*\(",
                ),
                group(
                    "components",
                    r"React\.(?:memo|lazy|createElement|Fragment)|extends\s+(?:React\.)?(?:Pure)?Component|<Suspense\b",
                ),
                group("imports", r#"from\s+['"]react(?:-dom)?['"]"#),
            ],
        },
        FrameworkPatterns {
            framework: Framework::Angular,
            groups: vec![
                group(
                    "decorators",
                    r"@(?:Component|Injectable|Directive|Pipe|NgModule)\s*\(",
                ),
                group("bindings", r"@(?:Input|Output|ViewChild|ContentChild)\s*\("),
                group(
                    "lifecycle",
                    r"\bng(?:OnInit|OnDestroy|OnChanges|AfterViewInit|DoCheck)\b",
                ),
                group("imports", r#"from\s+['"]@angular/"#),
            ],
        },
        FrameworkPatterns {
            framework: Framework::Vue,
            groups: vec![
                group(
                    "composition",
                    r"\bdefineComponent\s*\(|\bdefineProps\s*[<(]|\bdefineEmits\s*[<(]",
                ),
                group("template", r"<template\b|v-(?:if|for|model|show|bind|on)\b"),
                group(
                    "lifecycle",
                    r"\bon(?:Mounted|Unmounted|Updated|BeforeMount)\s*\(",
                ),
                group("imports", r#"from\s+['"]vue['"]"#),
            ],
        },
        FrameworkPatterns {
            framework: Framework::NextJs,
            groups: vec![
                group(
                    "data_fetching",
                    r"\bget(?:ServerSideProps|StaticProps|StaticPaths)\b",
                ),
                group("imports", r#"from\s+['"]next(?:/|['"])"#),
                group("directives", r#"^\s*['"]use (?:client|server)['"]"#),
            ],
        },
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interface_pattern() {
        assert!(TS.interfaces.is_match("export interface User {"));
        assert!(!TS.interfaces.is_match("const face = 1;"));
    }

    #[test]
    fn test_type_alias_pattern() {
        assert!(TS.type_aliases.is_match("type Id = string;"));
        assert!(TS.type_aliases.is_match("type Pair<T> = [T, T];"));
        assert!(!TS.type_aliases.is_match("const type_name = 1;"));
    }

    #[test]
    fn test_utility_type_pattern() {
        assert!(TS.utility_types.is_match("const p: Partial<User> = {};"));
        assert!(TS.utility_types.is_match("type K = Pick<User, 'id'>;"));
        assert!(!TS.utility_types.is_match("PartialUpdate(user)"));
    }

    #[test]
    fn test_type_guard_pattern() {
        assert!(TS
            .type_guards
            .is_match("function isUser(x: unknown): x is User {"));
    }

    #[test]
    fn test_generic_pattern_ignores_comparisons() {
        assert!(TS.generics.is_match("new Map<string, number>()"));
        assert!(TS.generics.is_match("useState<number>(0)"));
        assert!(!TS.generics.is_match("if (a <= b)"));
        assert!(!TS.generics.is_match("while (x >= 0)"));
        assert!(!TS.generics.is_match("a < b && c > d"));
    }

    #[test]
    fn test_jsdoc_block_pattern() {
        let src = "/** Adds numbers.\n * @param a first\n */\nfunction add() {}";
        let m = DOC.jsdoc_block.find(src).unwrap();
        assert!(m.as_str().contains("@param"));
    }

    #[test]
    fn test_py_docstring_pattern() {
        let src = "def greet(name):\n    \"\"\"Say hello.\n\n    Args:\n        name: who\n    \"\"\"\n    return name\n";
        assert!(DOC.py_docstring.is_match(src));
        assert!(DOC.py_param_section.is_match("    Args:"));
    }

    #[test]
    fn test_framework_group_order_matches_enum() {
        let order: Vec<Framework> = FRAMEWORKS.iter().map(|f| f.framework).collect();
        assert_eq!(order.as_slice(), Framework::all());
    }

    #[test]
    fn test_react_hook_pattern() {
        let fw = &FRAMEWORKS[0];
        assert_eq!(fw.framework, Framework::React);
        let hooks = &fw.groups[0].pattern;
        assert!(hooks.is_match("const [n, setN] = useState(0);"));
        assert!(hooks.is_match("useEffect(() => {}, []);"));
        assert!(!hooks.is_match("userState(0)"));
    }
}
