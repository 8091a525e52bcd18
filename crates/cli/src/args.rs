// crates/cli/src/args.rs
use crate::options::{DecodePolicy, OutputFormat};
use crate::parsers;
use apply_versions_engine::version::VersionCode;
use clap::{ArgAction, Args as ClapArgs, Parser, ValueHint};
use std::path::PathBuf;

/// Synchronize version references across the project's metadata files.
///
/// Any version value not given on the command line is asked for
/// interactively.
#[derive(Parser, Debug)]
#[command(name = "apply_versions", version = crate::VERSION)]
pub struct Args {
    /// Project root (default: the parent of `scripts/` when run from there,
    /// otherwise the current directory)
    #[arg(short, long, value_hint = ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    #[command(flatten)]
    pub versions: VersionArgs,

    #[command(flatten)]
    pub behavior: BehaviorArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Version values that would otherwise be prompted for.
#[derive(ClapArgs, Debug, Default)]
pub struct VersionArgs {
    /// Numeric version code (X.XXX)
    #[arg(long, value_parser = parsers::parse_version_code, help_heading = "Versions")]
    pub version_code: Option<VersionCode>,

    /// Human-readable version name
    #[arg(long, value_parser = parsers::parse_non_empty, help_heading = "Versions")]
    pub version_name: Option<String>,

    /// Installer version (X.X.X.X)
    #[arg(long, value_parser = parsers::parse_non_empty, help_heading = "Versions")]
    pub installer_version: Option<String>,
}

#[derive(ClapArgs, Debug)]
pub struct BehaviorArgs {
    /// How to handle bytes that are not valid UTF-8
    #[arg(long, value_enum, default_value = "skip", help_heading = "Behavior")]
    pub decode: DecodePolicy,

    /// Show what would change without writing any file
    #[arg(long, help_heading = "Behavior")]
    pub dry_run: bool,

    /// Exit immediately after an error instead of waiting for Enter
    #[arg(long, help_heading = "Behavior")]
    pub no_pause: bool,

    /// Exit with a non-zero status after a reported error
    #[arg(long, help_heading = "Behavior")]
    pub error_exit_code: bool,
}
