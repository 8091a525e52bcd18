//! Version inputs collected once per run.
//!
//! The version code is a decimal number and is rendered the way release
//! tooling has always written it into the data module: shortest round-trip
//! digits, integral values keep a `.0` suffix, and very large or very small
//! magnitudes switch to exponent notation (`1e+16`, `5e-05`).

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Parsed, finite version code (e.g. `3.1`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "String")]
pub struct VersionCode(f64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionCodeError {
    #[error("version code must not be empty")]
    Empty,
    #[error("could not convert '{0}' to a decimal number")]
    NotANumber(String),
    #[error("'{0}' is not a finite number")]
    NotFinite(String),
}

impl VersionCode {
    /// # Errors
    /// Returns an error when `value` is NaN or infinite.
    pub fn new(value: f64) -> Result<Self, VersionCodeError> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(VersionCodeError::NotFinite(value.to_string()))
        }
    }
}

impl FromStr for VersionCode {
    type Err = VersionCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(VersionCodeError::Empty);
        }
        let not_a_number = || VersionCodeError::NotANumber(trimmed.to_string());
        if !underscores_between_digits(trimmed) {
            return Err(not_a_number());
        }
        let value: f64 = trimmed.replace('_', "").parse().map_err(|_| not_a_number())?;
        if !value.is_finite() {
            return Err(VersionCodeError::NotFinite(trimmed.to_string()));
        }
        Ok(Self(value))
    }
}

/// Digit grouping (`1_000.5`) is allowed, but only with a digit on both
/// sides of every underscore.
fn underscores_between_digits(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
    })
}

impl fmt::Display for VersionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        let magnitude = v.abs();
        if magnitude >= 1e16 || (magnitude != 0.0 && magnitude < 1e-4) {
            return f.write_str(&exponent_notation(v));
        }
        if v.fract() == 0.0 {
            write!(f, "{v:.1}")
        } else {
            write!(f, "{v}")
        }
    }
}

impl From<VersionCode> for String {
    fn from(code: VersionCode) -> Self {
        code.to_string()
    }
}

/// `1e16` -> `1e+16`, `1.5e-5` -> `1.5e-05`.
fn exponent_notation(v: f64) -> String {
    let raw = format!("{v:e}");
    let Some((mantissa, exponent)) = raw.split_once('e') else {
        return raw;
    };
    let (sign, digits) = exponent
        .strip_prefix('-')
        .map_or(("+", exponent), |d| ("-", d));
    format!("{mantissa}e{sign}{digits:0>2}")
}

/// The three values an operator supplies for a release.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionInputs {
    /// Numeric version code written into the data module.
    pub code: VersionCode,
    /// Human-readable version name (e.g. `3.1.0-beta`).
    pub name: String,
    /// Dotted installer version (e.g. `3.1.0.0`).
    pub installer: String,
}

impl VersionInputs {
    pub fn new(code: VersionCode, name: impl Into<String>, installer: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
            installer: installer.into(),
        }
    }
}
