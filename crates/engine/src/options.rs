use serde::{Deserialize, Serialize};

/// Byte order mark written at the start of `utf-8-sig` files.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Text encoding of a target file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextEncoding {
    /// Plain UTF-8. A leading BOM is kept as part of the first line.
    Utf8,
    /// UTF-8 with signature: a leading BOM is stripped on read and always
    /// written back on output.
    #[default]
    Utf8Sig,
}

/// What to do with bytes that are not valid in the file's encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecodePolicy {
    /// Fail the rewrite, reporting the offset of the first bad byte.
    Strict,
    /// Drop undecodable bytes.
    #[default]
    Skip,
    /// Substitute U+FFFD for undecodable bytes.
    Replace,
}
