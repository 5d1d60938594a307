//! Type coverage analysis for TypeScript/JavaScript.
//!
//! Coverage is a syntactic proxy: candidate declarations come from four
//! sources (interface members, type aliases, function signatures, variable
//! declarations) and each is classified typed or untyped. No semantic type
//! checking happens here.
//!
//! Conventions (deliberate, see the documentation analyzer for the
//! opposite one): a file with zero candidate declarations is 100% covered,
//! and declaration files (`*.d.ts`) are 100% unconditionally.

use crate::metrics::TypeMetrics;
use crate::patterns::TS;
use crate::source::FileKind;

/// Analyze type-system usage in one file.
pub fn analyze(content: &str, kind: FileKind) -> TypeMetrics {
    let mut metrics = tally_patterns(content);

    if kind == FileKind::Declaration {
        // A declaration file's entire purpose is type declarations.
        metrics.type_coverage = 100.0;
        return metrics;
    }

    let (total, typed) = count_declarations(content);
    metrics.total_declarations = total;
    metrics.explicit_types = typed.min(total);
    metrics.type_coverage = if total == 0 {
        100.0
    } else {
        (f64::from(metrics.explicit_types) / f64::from(total) * 100.0).clamp(0.0, 100.0)
    };

    metrics
}

/// Independent pattern-match tallies over the whole file. These are not
/// mutually exclusive with the coverage counting.
fn tally_patterns(content: &str) -> TypeMetrics {
    TypeMetrics {
        interfaces: count(content, &TS.interfaces),
        type_aliases: count(content, &TS.type_aliases),
        generics: count(content, &TS.generics),
        type_guards: count(content, &TS.type_guards),
        type_assertions: count(content, &TS.type_assertions),
        any_types: count(content, &TS.any_type),
        utility_types: count(content, &TS.utility_types),
        mapped_types: count(content, &TS.mapped_types),
        conditional_types: count(content, &TS.conditional_types),
        ..TypeMetrics::default()
    }
}

fn count(content: &str, re: &regex::Regex) -> u32 {
    re.find_iter(content).count() as u32
}

/// Count candidate declarations and how many of them are typed.
fn count_declarations(content: &str) -> (u32, u32) {
    let mut total: u32 = 0;
    let mut typed: u32 = 0;

    // Interface members: typed by construction.
    for m in TS.interfaces.find_iter(content) {
        let body = &content[m.start()..];
        let body = body.split('}').next().unwrap_or("");
        let members = TS.interface_property.find_iter(body).count() as u32;
        total += members;
        typed += members;
    }

    // Type aliases: one typed declaration each.
    let aliases = count(content, &TS.type_aliases);
    total += aliases;
    typed += aliases;

    // Function signatures: the function counts once for its return type,
    // plus one per parameter.
    for caps in TS.functions.captures_iter(content) {
        total += 1;
        if caps.get(2).is_some() {
            typed += 1;
        }
        let params = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        for param in params.split(',') {
            let param = param.trim();
            if param.is_empty() {
                continue;
            }
            total += 1;
            if param.contains(':') {
                typed += 1;
            }
        }
    }

    // Variable declarations: typed on an explicit annotation or an
    // initializer that implies a known type.
    for caps in TS.var_declarations.captures_iter(content) {
        total += 1;
        let annotated = caps.get(2).is_some();
        let typed_init = caps.get(3).map_or(false, |init| {
            let whole = caps.get(0).map(|m| m.as_str()).unwrap_or("");
            TS.const_assertion.is_match(init.as_str())
                || TS.generic_init.is_match(init.as_str())
                || TS.annotated_object_binding.is_match(whole)
        });
        if annotated || typed_init {
            typed += 1;
        }
    }

    (total, typed)
}
