// crates/cli/src/lib.rs
pub mod args;
pub mod config;
pub mod error;
pub mod options;
pub mod parsers;
pub mod presentation;
pub mod prompt;

use crate::args::Args;
use crate::error::Result;
use crate::prompt::Prompter;
use apply_versions_engine::report::RunReport;
use std::path::Path;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Collect the version inputs and rewrite every target file.
///
/// Missing version values are prompted for through `prompter`. All input is
/// validated before the first file is opened.
///
/// # Errors
/// Any input or engine error; the first one ends the run.
pub fn execute<R, W>(
    args: &Args,
    cwd: &Path,
    prompter: &mut Prompter<'_, R, W>,
) -> Result<RunReport>
where
    R: std::io::BufRead,
    W: std::io::Write,
{
    let root = config::project_root(args, cwd);
    log::info!("project root: {}", root.display());

    let inputs = prompt::collect_inputs(&args.versions, prompter)?;
    let config = config::build_config(args, root, &inputs)?;

    Ok(apply_versions_engine::run(&config)?)
}
