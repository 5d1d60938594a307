//! Output formatting for analysis results.
//!
//! Two formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};

use crate::metrics::{AnalysisOutput, Priority};

// =============================================================================
// JSON Format
// =============================================================================

/// Top-level JSON report envelope.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    pub files_analyzed: usize,
    pub files_failed: usize,
    /// Mean quality score over successfully analyzed files.
    pub average_score: f64,
    pub min_score: f64,
    pub passed: bool,
    pub results: Vec<AnalysisOutput>,
}

/// Mean quality score over non-error results; 0 when every file failed.
pub fn average_score(results: &[AnalysisOutput]) -> f64 {
    let scores: Vec<f64> = results
        .iter()
        .filter(|r| !r.is_error())
        .map(|r| r.quality_score)
        .collect();
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

/// Write results in JSON format.
pub fn write_json(path: &str, results: &[AnalysisOutput], min_score: f64) -> anyhow::Result<()> {
    let average = average_score(results);
    let report = JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        path: path.to_string(),
        files_analyzed: results.len(),
        files_failed: results.iter().filter(|r| r.is_error()).count(),
        average_score: average,
        min_score,
        passed: average >= min_score,
        results: results.to_vec(),
    };

    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format.
pub fn write_pretty(path: &str, results: &[AnalysisOutput], min_score: f64) {
    // Header
    println!();
    print!("  ");
    print!("{}", "typegauge".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Analyzing: ".dimmed());
    println!("{}", path);
    println!();

    for result in results {
        write_file_summary(result);
    }

    write_batch_summary(results, min_score);
    println!();
}

fn write_file_summary(result: &AnalysisOutput) {
    if let Some(error) = &result.error {
        print!("  {} ", "SKIP".yellow());
        print!("{}", result.path.blue());
        println!("  {}", error.dimmed());
        println!();
        return;
    }

    print!("  ");
    write_colored_score(result.quality_score);
    print!("  {}", result.path.blue());
    print!("{}", format!("  [{}]", result.language).dimmed());
    if let Some(framework) = result.framework.framework {
        print!("{}", format!(" {}", framework).magenta());
    }
    println!();

    println!(
        "        types {:>5.1}%  docs {:>5.1}%  complexity {} (cognitive {})  MI {:.0}",
        result.types.type_coverage,
        result.documentation.coverage,
        result.complexity.cyclomatic,
        result.complexity.cognitive,
        result.complexity.maintainability_index,
    );

    for gate in result.gates.iter().filter(|g| !g.passed) {
        println!(
            "        {} {} ({:.1} < {:.1})",
            "gate".dimmed(),
            gate.name.yellow(),
            gate.actual,
            gate.threshold
        );
    }

    for rec in &result.recommendations {
        write_priority_tag(rec.priority);
        println!(" {}", rec.text);
    }
    println!();
}

fn write_priority_tag(priority: Priority) {
    match priority {
        Priority::High => print!("        {}", "HIGH  ".red()),
        Priority::Medium => print!("        {}", "MEDIUM".yellow()),
        Priority::Low => print!("        {}", "LOW   ".blue()),
    }
}

fn write_colored_score(score: f64) {
    let text = format!("{:>5.1}", score);
    match score {
        s if s >= 90.0 => print!("{}", text.green().bold()),
        s if s >= 75.0 => print!("{}", text.green()),
        s if s >= 50.0 => print!("{}", text.yellow()),
        s if s >= 25.0 => print!("{}", text.yellow().bold()),
        _ => print!("{}", text.red()),
    }
}

fn write_batch_summary(results: &[AnalysisOutput], min_score: f64) {
    let failed = results.iter().filter(|r| r.is_error()).count();
    let average = average_score(results);
    let passed = average >= min_score;

    print!(
        "  {}",
        format!("Files: {} ({} skipped)", results.len(), failed).dimmed()
    );
    print!("  Average: ");
    write_colored_score(average);
    print!("  {}", format!("Min: {:.1}", min_score).dimmed());
    print!("  ");
    if passed {
        print!("{}", "PASSED".green());
    } else {
        print!("{}", "FAILED".red());
    }
    println!();
}
