use crate::args::Args;
use crate::error::{AppError, Result};
use crate::options;
pub use apply_versions_engine::config::Config;
use apply_versions_engine::config::ConfigBuilder;
use apply_versions_engine::options as engine_options;
use apply_versions_engine::path_security::default_project_root;
use apply_versions_engine::targets::standard_targets;
use apply_versions_engine::version::VersionInputs;
use std::path::{Path, PathBuf};

/// Resolve the project root once, from `--root` or the working directory.
#[must_use]
pub fn project_root(args: &Args, cwd: &Path) -> PathBuf {
    args.root
        .clone()
        .unwrap_or_else(|| default_project_root(cwd))
}

/// Build the engine configuration for one run.
///
/// # Errors
/// Returns `Config` if the engine configuration is incomplete.
pub fn build_config(args: &Args, root: PathBuf, inputs: &VersionInputs) -> Result<Config> {
    let decode: engine_options::DecodePolicy = args.behavior.decode.into();

    ConfigBuilder::default()
        .root(root)
        .targets(standard_targets(inputs, decode)?)
        .dry_run(args.behavior.dry_run)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))
}

// From trait implementations for CLI -> Engine enum conversion

macro_rules! map_enum {
    ($from:ty, $to:ty, $($variant:ident),+ $(,)?) => {
        impl From<$from> for $to {
            fn from(f: $from) -> Self {
                match f {
                    $( <$from>::$variant => <$to>::$variant, )+
                }
            }
        }
    };
}

map_enum!(
    options::DecodePolicy,
    engine_options::DecodePolicy,
    Strict,
    Skip,
    Replace
);
