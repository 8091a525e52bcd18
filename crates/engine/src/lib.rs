// crates/engine/src/lib.rs
pub mod config;
pub mod error;
pub mod options;
pub mod path_security;
pub mod report;
pub mod rewriter;
pub mod targets;
pub mod version;

use crate::config::{Config, Target};
use crate::error::{EngineError, Result};
use crate::report::{FileReport, RunReport};

/// Rewrite every configured target, in order.
///
/// # Errors
///
/// Stops at the first failing target and returns its error. Targets
/// rewritten before the failure keep their new contents; nothing is rolled
/// back.
pub fn run(config: &Config) -> Result<RunReport> {
    let mut report = RunReport {
        dry_run: config.dry_run,
        files: Vec::with_capacity(config.targets.len()),
    };

    for target in &config.targets {
        report.files.push(apply_target(config, target)?);
    }

    log::info!(
        "{} line(s) replaced across {} file(s){}",
        report.replaced(),
        report.files.len(),
        if config.dry_run { " (dry run)" } else { "" }
    );
    Ok(report)
}

fn apply_target(config: &Config, target: &Target) -> Result<FileReport> {
    let path = path_security::resolve_target(&config.root, &target.path)?;
    log::debug!("rewriting {} ({})", path.display(), target.label);

    let outcome = rewriter::rewrite_file(
        &path,
        target.encoding,
        target.decode,
        &target.replacements,
        config.dry_run,
    )
    .map_err(|err| match err {
        // Report the path as configured, not as joined onto the root.
        EngineError::FileNotFound { .. } => EngineError::FileNotFound {
            path: target.path.clone(),
        },
        other => other,
    })?;

    if outcome.replaced == 0 {
        log::warn!("{}: no line matched any version prefix", path.display());
    }

    Ok(FileReport {
        label: target.label.clone(),
        path: target.path.clone(),
        lines: outcome.lines,
        replaced: outcome.replaced,
        changed: outcome.changed,
    })
}
