//! The project files that carry version references.

use crate::config::{Replacement, Target, TargetBuilder};
use crate::error::{EngineError, Result};
use crate::options::{DecodePolicy, TextEncoding};
use crate::version::VersionInputs;

pub const DATA_MODULE: &str = "src/UniGetUI.Core.Data/CoreData.cs";
pub const BUILD_PROPERTIES: &str = "src/Solution.props";
pub const INSTALLER_SCRIPT: &str = "WingetUI.iss";
pub const APP_MANIFEST: &str = "src/UniGetUI/app.manifest";

const DO_NOT_MODIFY: &str = "// Do not modify this line, use file scripts/apply_versions.py";

/// Build the four targets, in the order they are rewritten:
/// data module, build properties, installer script, application manifest.
///
/// # Errors
/// Returns `Config` if a descriptor is incomplete.
pub fn standard_targets(inputs: &VersionInputs, decode: DecodePolicy) -> Result<Vec<Target>> {
    let VersionInputs { code, name, installer } = inputs;

    let target = |label: &str, path: &str, replacements: Vec<Replacement>| {
        TargetBuilder::default()
            .label(label)
            .path(path)
            .encoding(TextEncoding::Utf8Sig)
            .decode(decode)
            .replacements(replacements)
            .build()
            .map_err(|e| EngineError::Config(e.to_string()))
    };

    Ok(vec![
        target(
            "data module",
            DATA_MODULE,
            vec![
                Replacement::new(
                    "        public const string VersionName = ",
                    format!(" \"{name}\"; {DO_NOT_MODIFY}\n"),
                ),
                Replacement::new(
                    "        public const double VersionNumber = ",
                    format!(" {code}; {DO_NOT_MODIFY}\n"),
                ),
            ],
        )?,
        target(
            "build properties",
            BUILD_PROPERTIES,
            vec![
                Replacement::new("\t<FileVersion>", format!("{installer}</FileVersion>\n")),
                Replacement::new(
                    "\t<InformationalVersion>",
                    format!("{name}</InformationalVersion>\n"),
                ),
                Replacement::new(
                    "\t<ApplicationVersion>",
                    format!("{name}</ApplicationVersion>\n"),
                ),
            ],
        )?,
        target(
            "installer script",
            INSTALLER_SCRIPT,
            vec![
                Replacement::new("#define MyAppVersion", format!(" \"{name}\"\n")),
                Replacement::new("VersionInfoVersion=", format!("{installer}\n")),
            ],
        )?,
        target(
            "application manifest",
            APP_MANIFEST,
            vec![Replacement::new("\t  version=", format!(" \"{installer}\"\n"))],
        )?,
    ])
}
