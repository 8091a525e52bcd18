use crate::args::VersionArgs;
use crate::error::{AppError, Result};
use apply_versions_engine::version::{VersionCode, VersionInputs};
use std::io::{BufRead, Write};

pub const VERSION_CODE_PROMPT: &str = "Enter version code (X.XXX)  : ";
pub const VERSION_NAME_PROMPT: &str = "Enter version name (string) : ";
pub const INSTALLER_VERSION_PROMPT: &str = "Enter version     (X.X.X.X) : ";

/// Line-based prompts over any reader/writer pair.
pub struct Prompter<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> Prompter<'a, R, W> {
    pub fn new(input: &'a mut R, output: &'a mut W) -> Self {
        Self { input, output }
    }

    /// Print `prompt` and read one answer with its line terminator removed.
    ///
    /// # Errors
    /// `MissingInput` on end of input, `Io` if the terminal can't be used.
    pub fn ask(&mut self, prompt: &str, field: &'static str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Err(AppError::MissingInput { field });
        }
        let trimmed = answer.strip_suffix('\n').unwrap_or(&answer);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
        Ok(trimmed.to_string())
    }

    /// Block until the operator presses Enter (or input ends).
    ///
    /// # Errors
    /// Only if the terminal can't be written to or read from.
    pub fn pause(&mut self) -> Result<()> {
        write!(self.output, "Press Enter to continue...")?;
        self.output.flush()?;
        let mut discard = String::new();
        self.input.read_line(&mut discard)?;
        Ok(())
    }
}

/// Combine version flags with prompted answers for anything missing.
///
/// Prompts come in a fixed order: version code, version name, installer
/// version. Each answer is validated as soon as it is read, so a bad version
/// code stops the run before the other questions are asked.
///
/// # Errors
/// `InvalidInput` for a non-numeric code or a blank name/installer version,
/// `MissingInput` when input ends early.
pub fn collect_inputs<R: BufRead, W: Write>(
    given: &VersionArgs,
    prompter: &mut Prompter<'_, R, W>,
) -> Result<VersionInputs> {
    let code = match given.version_code {
        Some(code) => code,
        None => {
            let answer = prompter.ask(VERSION_CODE_PROMPT, "version code")?;
            answer
                .parse::<VersionCode>()
                .map_err(|e| AppError::InvalidInput {
                    field: "version code",
                    value: answer.clone(),
                    reason: e.to_string(),
                })?
        }
    };

    let name = match &given.version_name {
        Some(name) => name.clone(),
        None => required(prompter.ask(VERSION_NAME_PROMPT, "version name")?, "version name")?,
    };

    let installer = match &given.installer_version {
        Some(installer) => installer.clone(),
        None => required(
            prompter.ask(INSTALLER_VERSION_PROMPT, "installer version")?,
            "installer version",
        )?,
    };

    log::debug!("version code={code} name={name:?} installer={installer:?}");
    Ok(VersionInputs::new(code, name, installer))
}

fn required(answer: String, field: &'static str) -> Result<String> {
    if answer.trim().is_empty() {
        Err(AppError::InvalidInput {
            field,
            value: answer,
            reason: "value must not be empty".to_string(),
        })
    } else {
        Ok(answer)
    }
}
