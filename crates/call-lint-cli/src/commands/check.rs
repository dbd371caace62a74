//! Check command.
//!
//! Resolves configuration, compiles the rule once, then runs one traversal
//! per discovered `.java` file. A configuration error aborts before any file
//! is read.

use anyhow::{bail, Context, Result};
use call_lint_core::{Config, LintResult};
use call_lint_java::CallRuleEngine;
use std::path::{Path, PathBuf};

use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    exclude: &[String],
    config: Option<&Path>,
) -> Result<()> {
    let result = execute(path, exclude, config)?;

    super::output::print(&result, format)?;

    if result.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

/// Testable core of the check command: everything up to printing.
fn execute(
    path: &Path,
    extra_exclude: &[String],
    config_path: Option<&Path>,
) -> Result<LintResult> {
    let source = crate::config_resolver::resolve(path, config_path);
    let Some(config_file) = source.path() else {
        bail!("No call-lint.toml found. Run `call-lint init` to create one.");
    };
    if source.is_global() {
        tracing::info!("Using global config: {}", config_file.display());
    }

    let config = Config::from_file(config_file)
        .with_context(|| format!("Failed to load {}", config_file.display()))?;
    let rule = config.check.compile()?;
    let engine = CallRuleEngine::new(rule);

    let root = if config.root.is_absolute() {
        config.root.clone()
    } else {
        path.join(&config.root)
    };

    let mut exclude = config.exclude.clone();
    exclude.extend(extra_exclude.iter().cloned());

    let files = discover_files(&root, &exclude)?;
    tracing::info!("Analyzing {} files", files.len());

    let mut result = LintResult::new();
    for file_path in &files {
        let source_text = std::fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read {}", file_path.display()))?;

        let rel = file_path
            .strip_prefix(&root)
            .unwrap_or(file_path)
            .to_path_buf();

        let violations = engine
            .check_source(&rel, &source_text)
            .with_context(|| format!("Failed to analyze {}", file_path.display()))?;
        result.violations.extend(violations);
        result.files_checked += 1;
    }

    result.sort();
    Ok(result)
}

fn discover_files(root: &Path, exclude: &[String]) -> Result<Vec<PathBuf>> {
    let mut builder = ignore::WalkBuilder::new(root);
    builder.hidden(false).git_ignore(true);

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some("java") {
            continue;
        }

        let rel_str = path.strip_prefix(root).unwrap_or(path).to_string_lossy();

        let excluded = exclude.iter().any(|pattern| {
            let clean = pattern.replace("**/", "").replace("/**", "");
            !clean.is_empty() && rel_str.contains(&clean)
        });

        if !excluded {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}
