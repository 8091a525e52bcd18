use apply_versions_engine::version::VersionCode;

/// clap value parser for `--version-code`.
pub fn parse_version_code(s: &str) -> Result<VersionCode, String> {
    s.parse::<VersionCode>().map_err(|e| e.to_string())
}

/// clap value parser for free-text values that must not be blank.
pub fn parse_non_empty(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("value must not be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}
