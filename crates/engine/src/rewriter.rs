use crate::config::Replacement;
use crate::error::{EngineError, Result};
use crate::options::{DecodePolicy, TextEncoding, UTF8_BOM};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Result of rewriting a block of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    pub text: String,
    /// Number of lines in the input.
    pub lines: usize,
    /// Number of lines that matched a prefix.
    pub replaced: usize,
}

/// Outcome of rewriting a file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileOutcome {
    pub lines: usize,
    pub replaced: usize,
    /// Whether the bytes written differ from the bytes read.
    pub changed: bool,
}

/// Decode raw file contents according to `encoding` and `policy`.
///
/// # Errors
/// Returns `EngineError::Decode` with the absolute byte offset of the first
/// invalid sequence when `policy` is `Strict`.
pub fn decode(
    path: &Path,
    bytes: &[u8],
    encoding: TextEncoding,
    policy: DecodePolicy,
) -> Result<String> {
    let (body, skipped) = match encoding {
        TextEncoding::Utf8Sig => bytes
            .strip_prefix(UTF8_BOM)
            .map_or((bytes, 0), |rest| (rest, UTF8_BOM.len())),
        TextEncoding::Utf8 => (bytes, 0),
    };

    match policy {
        DecodePolicy::Strict => std::str::from_utf8(body)
            .map(str::to_owned)
            .map_err(|e| EngineError::Decode {
                path: path.to_path_buf(),
                offset: skipped + e.valid_up_to(),
            }),
        DecodePolicy::Replace => Ok(String::from_utf8_lossy(body).into_owned()),
        DecodePolicy::Skip => {
            let mut text = String::with_capacity(body.len());
            for chunk in body.utf8_chunks() {
                text.push_str(chunk.valid());
                if !chunk.invalid().is_empty() {
                    log::debug!(
                        "{}: dropped {} undecodable byte(s)",
                        path.display(),
                        chunk.invalid().len()
                    );
                }
            }
            Ok(text)
        }
    }
}

/// Encode `text` for writing. `Utf8Sig` output always starts with a BOM.
#[must_use]
pub fn encode(text: &str, encoding: TextEncoding) -> Vec<u8> {
    match encoding {
        TextEncoding::Utf8 => text.as_bytes().to_vec(),
        TextEncoding::Utf8Sig => {
            let mut out = Vec::with_capacity(UTF8_BOM.len() + text.len());
            out.extend_from_slice(UTF8_BOM);
            out.extend_from_slice(text.as_bytes());
            out
        }
    }
}

/// Replace every line that starts with a configured prefix by
/// `prefix + suffix`, leaving other lines untouched.
///
/// Replacements are tried in order and scanning stops at the first match.
/// Line terminators of untouched lines are preserved. When a matched line
/// ended in `\r\n` and the suffix ends in a bare `\n`, the emitted line ends
/// in `\r\n` so CRLF files stay uniform.
#[must_use]
pub fn rewrite_lines(text: &str, replacements: &[Replacement]) -> Rewritten {
    let mut out = String::with_capacity(text.len());
    let mut lines = 0;
    let mut replaced = 0;

    for line in text.split_inclusive('\n') {
        lines += 1;
        match first_match(line, replacements) {
            Some(r) => {
                log::trace!("line {lines}: matched prefix {:?}", r.prefix);
                replaced += 1;
                out.push_str(&r.prefix);
                push_suffix(&mut out, &r.suffix, line.ends_with("\r\n"));
            }
            None => out.push_str(line),
        }
    }

    Rewritten {
        text: out,
        lines,
        replaced,
    }
}

fn first_match<'a>(line: &str, replacements: &'a [Replacement]) -> Option<&'a Replacement> {
    replacements.iter().find(|r| line.starts_with(r.prefix.as_str()))
}

fn push_suffix(out: &mut String, suffix: &str, crlf: bool) {
    match suffix.strip_suffix('\n') {
        Some(body) if crlf && !body.ends_with('\r') => {
            out.push_str(body);
            out.push_str("\r\n");
        }
        _ => out.push_str(suffix),
    }
}

/// Rewrite the file at `path` in place.
///
/// The file must already exist; it is locked exclusively while being
/// rewritten, then overwritten from the start and truncated to the new
/// length. With `dry_run` the file is only read.
///
/// # Errors
/// `FileNotFound` when `path` does not exist, `Lock` when another process
/// holds the file, `Decode` on invalid data under a strict policy,
/// `FileOpen` when the file exists but can't be opened, and
/// `FileRead`/`FileWrite` for any other I/O failure.
pub fn rewrite_file(
    path: &Path,
    encoding: TextEncoding,
    policy: DecodePolicy,
    replacements: &[Replacement],
    dry_run: bool,
) -> Result<FileOutcome> {
    let mut file = open_existing(path, !dry_run)?;
    if !dry_run {
        file.try_lock_exclusive().map_err(|source| EngineError::Lock {
            path: path.to_path_buf(),
            source,
        })?;
    }

    let mut original = Vec::new();
    file.read_to_end(&mut original)
        .map_err(|source| EngineError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

    let text = decode(path, &original, encoding, policy)?;
    let rewritten = rewrite_lines(&text, replacements);
    let bytes = encode(&rewritten.text, encoding);
    let changed = bytes != original;

    if !dry_run {
        overwrite(&mut file, &bytes).map_err(|source| EngineError::FileWrite {
            path: path.to_path_buf(),
            source,
        })?;
    }

    Ok(FileOutcome {
        lines: rewritten.lines,
        replaced: rewritten.replaced,
        changed,
    })
}

fn open_existing(path: &Path, write: bool) -> Result<File> {
    OpenOptions::new()
        .read(true)
        .write(write)
        .open(path)
        .map_err(|source| match source.kind() {
            ErrorKind::NotFound => EngineError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => EngineError::FileOpen {
                path: path.to_path_buf(),
                source,
            },
        })
}

fn overwrite(file: &mut File, bytes: &[u8]) -> std::io::Result<()> {
    file.seek(SeekFrom::Start(0))?;
    file.write_all(bytes)?;
    file.set_len(bytes.len() as u64)?;
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn repl(prefix: &str, suffix: &str) -> Replacement {
        Replacement::new(prefix, suffix)
    }

    fn temp_with(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn unmatched_lines_are_copied_verbatim() {
        let input = "alpha\n  beta\r\ngamma";
        let out = rewrite_lines(input, &[repl("delta", "x\n")]);
        assert_eq!(out.text, input);
        assert_eq!(out.lines, 3);
        assert_eq!(out.replaced, 0);
    }

    #[test]
    fn matched_line_becomes_prefix_plus_suffix() {
        let input = "\t<FileVersion>1.2.3.4</FileVersion>\nother\n";
        let out = rewrite_lines(
            input,
            &[repl("\t<FileVersion>", "9.9.9.9</FileVersion>\n")],
        );
        assert_eq!(out.text, "\t<FileVersion>9.9.9.9</FileVersion>\nother\n");
        assert_eq!(out.replaced, 1);
    }

    #[test]
    fn first_matching_prefix_wins() {
        let replacements = [repl("Version", "=A\n"), repl("VersionInfo", "=B\n")];
        let out = rewrite_lines("VersionInfo=old\n", &replacements);
        assert_eq!(out.text, "Version=A\n");

        let reordered = [repl("VersionInfo", "=B\n"), repl("Version", "=A\n")];
        let out = rewrite_lines("VersionInfo=old\n", &reordered);
        assert_eq!(out.text, "VersionInfo=B\n");
    }

    #[test]
    fn suffix_that_looks_like_another_prefix_is_not_rescanned() {
        // The emitted text would match the second entry, but each line is
        // only scanned once.
        let replacements = [repl("a", "b-old\n"), repl("ab", "-new\n")];
        let out = rewrite_lines("a1\n", &replacements);
        assert_eq!(out.text, "ab-old\n");
        let again = rewrite_lines(&out.text, &replacements);
        assert_eq!(again.text, "ab-old\n");
    }

    #[test]
    fn crlf_terminator_is_kept_on_replaced_lines() {
        let out = rewrite_lines(
            "VersionInfoVersion=1.0\r\nnext\r\n",
            &[repl("VersionInfoVersion=", "2.0\n")],
        );
        assert_eq!(out.text, "VersionInfoVersion=2.0\r\nnext\r\n");
    }

    #[test]
    fn last_line_without_newline_is_rewritten() {
        let out = rewrite_lines("x\nVersion=1", &[repl("Version=", "2\n")]);
        assert_eq!(out.text, "x\nVersion=2\n");
        assert_eq!(out.lines, 2);
    }

    #[test]
    fn empty_text_has_no_lines() {
        let out = rewrite_lines("", &[repl("", "x\n")]);
        assert_eq!(out.text, "");
        assert_eq!(out.lines, 0);
    }

    #[test]
    fn utf8_sig_strips_and_restores_bom() {
        let path = PathBuf::from("x");
        let bytes = b"\xEF\xBB\xBFhello\n";
        let text = decode(&path, bytes, TextEncoding::Utf8Sig, DecodePolicy::Strict).unwrap();
        assert_eq!(text, "hello\n");
        assert_eq!(encode(&text, TextEncoding::Utf8Sig), b"\xEF\xBB\xBFhello\n");
        assert_eq!(encode(&text, TextEncoding::Utf8), b"hello\n");
    }

    #[test]
    fn plain_utf8_keeps_bom_in_text() {
        let path = PathBuf::from("x");
        let bytes = b"\xEF\xBB\xBFa";
        let text = decode(&path, bytes, TextEncoding::Utf8, DecodePolicy::Strict).unwrap();
        assert_eq!(text, "\u{feff}a");
    }

    #[test]
    fn decode_policies() {
        let path = PathBuf::from("bad.txt");
        let bytes = b"\xEF\xBB\xBFab\xFFcd";

        let err = decode(&path, bytes, TextEncoding::Utf8Sig, DecodePolicy::Strict).unwrap_err();
        match err {
            EngineError::Decode { path: p, offset } => {
                assert_eq!(p, path);
                assert_eq!(offset, 5);
            }
            other => panic!("unexpected error: {other}"),
        }

        let skipped = decode(&path, bytes, TextEncoding::Utf8Sig, DecodePolicy::Skip).unwrap();
        assert_eq!(skipped, "abcd");

        let replaced = decode(&path, bytes, TextEncoding::Utf8Sig, DecodePolicy::Replace).unwrap();
        assert_eq!(replaced, "ab\u{fffd}cd");
    }

    #[test]
    fn rewrite_file_truncates_shorter_output() {
        let file = temp_with(b"Version=1.0.0-a-very-long-suffix\ntail\n");
        let outcome = rewrite_file(
            file.path(),
            TextEncoding::Utf8,
            DecodePolicy::Strict,
            &[repl("Version=", "2\n")],
            false,
        )
        .unwrap();

        assert_eq!(std::fs::read_to_string(file.path()).unwrap(), "Version=2\ntail\n");
        assert_eq!(outcome, FileOutcome { lines: 2, replaced: 1, changed: true });
    }

    #[test]
    fn rewrite_file_adds_bom_for_utf8_sig() {
        let file = temp_with(b"keep\n");
        let outcome =
            rewrite_file(file.path(), TextEncoding::Utf8Sig, DecodePolicy::Skip, &[], false)
                .unwrap();
        assert_eq!(std::fs::read(file.path()).unwrap(), b"\xEF\xBB\xBFkeep\n");
        assert!(outcome.changed);
    }

    #[test]
    fn dry_run_leaves_file_untouched() {
        let file = temp_with(b"Version=1\n");
        let outcome = rewrite_file(
            file.path(),
            TextEncoding::Utf8,
            DecodePolicy::Skip,
            &[repl("Version=", "2\n")],
            true,
        )
        .unwrap();
        assert!(outcome.changed);
        assert_eq!(std::fs::read_to_string(file.path()).unwrap(), "Version=1\n");
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.props");
        let err = rewrite_file(&path, TextEncoding::Utf8Sig, DecodePolicy::Skip, &[], false)
            .unwrap_err();
        assert!(matches!(&err, EngineError::FileNotFound { path: p } if *p == path));
        assert!(!path.exists());
    }

    #[test]
    fn locked_file_is_not_rewritten() {
        let file = temp_with(b"Version=1\n");
        let holder = File::open(file.path()).unwrap();
        FileExt::lock_exclusive(&holder).unwrap();

        let err = rewrite_file(
            file.path(),
            TextEncoding::Utf8,
            DecodePolicy::Skip,
            &[repl("Version=", "2\n")],
            false,
        )
        .unwrap_err();

        assert!(matches!(&err, EngineError::Lock { path, .. } if path == file.path()));
        assert_eq!(std::fs::read(file.path()).unwrap(), b"Version=1\n");
    }

    #[test]
    fn unopenable_path_is_an_open_error() {
        // A directory exists but can't be opened for writing.
        let dir = tempfile::tempdir().unwrap();
        let err = rewrite_file(dir.path(), TextEncoding::Utf8, DecodePolicy::Skip, &[], false)
            .unwrap_err();

        assert!(matches!(&err, EngineError::FileOpen { path, .. } if path == dir.path()));
        assert!(err.to_string().starts_with("Failed to open file"));
    }
}
