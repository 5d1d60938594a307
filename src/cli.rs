//! Command-line interface for typegauge.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::AnalysisProfile;
use crate::engine::Engine;
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Default profile file names to search for.
const DEFAULT_PROFILE_NAMES: &[&str] = &["typegauge.yaml", ".typegauge.yaml"];

/// Extensions the engine can analyze.
const SUPPORTED_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs", "py"];

/// Static source quality scoring for TypeScript, JavaScript, and Python.
///
/// Typegauge measures type coverage, documentation coverage, structural
/// complexity, and framework usage, folds them into a 0-100 quality
/// score, and reports threshold gates and prioritized recommendations.
#[derive(Parser)]
#[command(name = "typegauge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze source files and report quality metrics
    #[command(visible_alias = "scan")]
    Analyze(AnalyzeArgs),
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Path to analyze (file or directory)
    pub path: PathBuf,

    /// Path to profile YAML file (default: auto-discover, fall back to
    /// built-in defaults)
    #[arg(short, long)]
    pub profile: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Minimum acceptable average quality score (exit non-zero below it)
    #[arg(short, long)]
    pub min_score: Option<f64>,
}

/// Discover a profile file in the current directory.
fn discover_profile() -> Option<PathBuf> {
    DEFAULT_PROFILE_NAMES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

/// Collect analyzable files under a root.
fn collect_files(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            // The root the user named is always walked, even when hidden
            if e.depth() == 0 {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            // Skip hidden and vendored directories
            if e.file_type().is_dir()
                && (name.starts_with('.') || name == "node_modules" || name == "dist")
            {
                return false;
            }
            true
        })
    {
        let entry = entry?;
        if entry.file_type().is_file() {
            let path = entry.path();
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if SUPPORTED_EXTENSIONS.contains(&ext) {
                files.push(path.to_path_buf());
            }
        }
    }

    Ok(files)
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    // Validate format
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    // Resolve profile: explicit flag, discovered file, or defaults
    let profile_path = args.profile.clone().or_else(discover_profile);
    let mut profile = match &profile_path {
        Some(p) => match AnalysisProfile::from_file(p) {
            Ok(profile) => profile,
            Err(e) => {
                eprintln!("Error loading profile: {:#}", e);
                return Ok(EXIT_ERROR);
            }
        },
        None => AnalysisProfile::default(),
    };
    if let Some(min_score) = args.min_score {
        profile.min_score = min_score;
    }
    if let Err(e) = profile.validate() {
        eprintln!("Error: invalid profile: {}", e);
        return Ok(EXIT_ERROR);
    }

    // Check path exists
    let metadata = match std::fs::metadata(&args.path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    // Collect files to analyze
    let files = if metadata.is_dir() {
        collect_files(&args.path)?
    } else {
        vec![args.path.clone()]
    };

    if files.is_empty() {
        eprintln!("Warning: no files to analyze");
        return Ok(EXIT_SUCCESS);
    }

    // Read contents up front; the engine analyzes in-memory content only
    let mut inputs = Vec::with_capacity(files.len());
    for file in &files {
        let content = std::fs::read_to_string(file).unwrap_or_default();
        inputs.push((file.to_string_lossy().to_string(), content));
    }

    let min_score = profile.min_score;
    let engine = Engine::new(profile);
    let results = engine.analyze_batch(&inputs);

    let path_str = args.path.to_string_lossy().to_string();
    match args.format.as_str() {
        "json" => report::write_json(&path_str, &results, min_score)?,
        _ => report::write_pretty(&path_str, &results, min_score),
    }

    if report::average_score(&results) >= min_score {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_FAILED)
    }
}
