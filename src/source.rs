//! Source file model: language and file-kind classification.
//!
//! Language is derived from the file extension; the declaration/test/
//! implementation split follows the filename conventions used by the
//! TypeScript ecosystem (`*.d.ts`, `.test.`, `.spec.`, `-test.`, `-tests.`).

use serde::{Deserialize, Serialize};

/// Supported source languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    TypeScript,
    JavaScript,
    Unknown,
}

impl Language {
    /// Classify a language from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "py" => Language::Python,
            "ts" | "tsx" => Language::TypeScript,
            "js" | "jsx" | "mjs" | "cjs" => Language::JavaScript,
            _ => Language::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::TypeScript => "typescript",
            Language::JavaScript => "javascript",
            Language::Unknown => "unknown",
        }
    }

    /// Whether the JS/TS pattern-scan path applies.
    pub fn is_ecmascript(&self) -> bool {
        matches!(self, Language::TypeScript | Language::JavaScript)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sub-classification consumed by the Type Coverage Analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Type declaration files (`*.d.ts`) — nothing but type declarations.
    Declaration,
    /// Test files (`.test.`, `.spec.`, `-test.`, `-tests.`).
    Test,
    Implementation,
}

/// Filename fragments that mark a test file.
const TEST_MARKERS: &[&str] = &[".test.", ".spec.", "-test.", "-tests."];

impl FileKind {
    /// Classify a file from its path.
    pub fn from_path(path: &str) -> Self {
        if path.ends_with(".d.ts") {
            return FileKind::Declaration;
        }
        if TEST_MARKERS.iter().any(|m| path.contains(m)) {
            return FileKind::Test;
        }
        FileKind::Implementation
    }
}

/// A single input file, immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: String,
    pub content: String,
    pub language: Language,
    pub kind: FileKind,
}

impl SourceFile {
    /// Construct a source file, deriving language and kind from the path.
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        let ext = path.rsplit('.').next().unwrap_or("");
        Self {
            language: Language::from_extension(ext),
            kind: FileKind::from_path(&path),
            path,
            content: content.into(),
        }
    }

    /// Number of lines, minimum 1 (keeps `ln(loc)` defined downstream).
    pub fn line_count(&self) -> usize {
        self.content.lines().count().max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_extension() {
        assert_eq!(Language::from_extension("py"), Language::Python);
        assert_eq!(Language::from_extension("ts"), Language::TypeScript);
        assert_eq!(Language::from_extension("tsx"), Language::TypeScript);
        assert_eq!(Language::from_extension("js"), Language::JavaScript);
        assert_eq!(Language::from_extension("jsx"), Language::JavaScript);
        assert_eq!(Language::from_extension("rb"), Language::Unknown);
    }

    #[test]
    fn test_file_kind_declaration() {
        assert_eq!(FileKind::from_path("types/api.d.ts"), FileKind::Declaration);
        // .d.ts wins over test markers by checking first
        assert_eq!(FileKind::from_path("globals.d.ts"), FileKind::Declaration);
    }

    #[test]
    fn test_file_kind_test_markers() {
        assert_eq!(FileKind::from_path("src/app.test.ts"), FileKind::Test);
        assert_eq!(FileKind::from_path("src/app.spec.tsx"), FileKind::Test);
        assert_eq!(FileKind::from_path("src/app-test.js"), FileKind::Test);
        assert_eq!(FileKind::from_path("src/app-tests.ts"), FileKind::Test);
        assert_eq!(
            FileKind::from_path("src/app.ts"),
            FileKind::Implementation
        );
    }

    #[test]
    fn test_source_file_classification() {
        let file = SourceFile::new("src/index.ts", "const x = 1;");
        assert_eq!(file.language, Language::TypeScript);
        assert_eq!(file.kind, FileKind::Implementation);

        let decl = SourceFile::new("types.d.ts", "");
        assert_eq!(decl.language, Language::TypeScript);
        assert_eq!(decl.kind, FileKind::Declaration);
    }

    #[test]
    fn test_line_count_minimum_one() {
        let empty = SourceFile::new("a.ts", "");
        assert_eq!(empty.line_count(), 1);
    }
}
