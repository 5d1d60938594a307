//! Framework detection over TS/JS source text.
//!
//! Each framework has a bank of pattern groups; the framework with the
//! strictly highest total match count wins. Ties keep the earlier entry,
//! so detection is deterministic for any input.

use std::collections::BTreeMap;

use crate::metrics::FrameworkResult;
use crate::patterns::FRAMEWORKS;

/// Detect the dominant frontend framework in one file.
///
/// Returns `framework: None` with empty counts when no pattern in any
/// bank matches.
pub fn detect(content: &str) -> FrameworkResult {
    let mut best: Option<(usize, u32)> = None;

    for (idx, bank) in FRAMEWORKS.iter().enumerate() {
        let total: u32 = bank
            .groups
            .iter()
            .map(|g| g.pattern.find_iter(content).count() as u32)
            .sum();
        if total == 0 {
            continue;
        }
        // Strict > keeps the first bank on ties.
        if best.map_or(true, |(_, top)| total > top) {
            best = Some((idx, total));
        }
    }

    match best {
        None => FrameworkResult::default(),
        Some((idx, _)) => {
            let bank = &FRAMEWORKS[idx];
            let pattern_counts: BTreeMap<String, u32> = bank
                .groups
                .iter()
                .map(|g| {
                    (
                        g.name.to_string(),
                        g.pattern.find_iter(content).count() as u32,
                    )
                })
                .collect();
            FrameworkResult {
                framework: Some(bank.framework),
                pattern_counts,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Framework;

    #[test]
    fn test_plain_typescript_detects_nothing() {
        let result = detect("const x: number = 1;\nfunction f() {}\n");
        assert_eq!(result.framework, None);
        assert!(result.pattern_counts.is_empty());
    }

    #[test]
    fn test_react_hooks_and_imports() {
        let src = r#"
import { useState, useEffect } from 'react';

function Counter() {
  const [n, setN] = useState(0);
  useEffect(() => { document.title = String(n); }, [n]);
  return n;
}
"#;
        let result = detect(src);
        assert_eq!(result.framework, Some(Framework::React));
        assert_eq!(result.pattern_counts.get("hooks"), Some(&2));
        assert_eq!(result.pattern_counts.get("imports"), Some(&1));
    }

    #[test]
    fn test_angular_decorators() {
        let src = r#"
import { Component } from '@angular/core';

@Component({ selector: 'app-root' })
export class AppComponent {
  ngOnInit() {}
}
"#;
        let result = detect(src);
        assert_eq!(result.framework, Some(Framework::Angular));
    }

    #[test]
    fn test_vue_composition_api() {
        let src = r#"
import { defineComponent, onMounted } from 'vue';

export default defineComponent({
  setup() {
    onMounted(() => {});
  },
});
"#;
        let result = detect(src);
        assert_eq!(result.framework, Some(Framework::Vue));
    }

    #[test]
    fn test_nextjs_data_fetching() {
        let src = r#"
import Head from 'next/head';

export async function getServerSideProps() {
  return { props: {} };
}
"#;
        let result = detect(src);
        assert_eq!(result.framework, Some(Framework::NextJs));
    }

    #[test]
    fn test_tie_resolves_to_earlier_framework() {
        // One React import and one Vue import: equal totals, React wins
        // because its bank comes first.
        let src = "import React from 'react';\nimport { ref } from 'vue';\n";
        let result = detect(src);
        assert_eq!(result.framework, Some(Framework::React));
    }

    #[test]
    fn test_counts_cover_all_groups_of_winner() {
        let src = "import { useState } from 'react';\nuseState(0);\n";
        let result = detect(src);
        assert_eq!(result.framework, Some(Framework::React));
        // zero-count groups still appear so the shape is stable
        assert!(result.pattern_counts.contains_key("components"));
        assert_eq!(result.pattern_counts.get("components"), Some(&0));
    }
}
