//! Reading and writing the target file around a pure transformation.

use std::{fs, path::Path};

use crate::error::{PatchError, Result};

/// Path of the generated service module, relative to the server directory.
pub const DEFAULT_TARGET: &str = "services/gtfsService.js";

/// Reads `path` as UTF-8 and hands its content to `f`.
pub fn inspect<T>(path: &Path, f: impl FnOnce(&str) -> T) -> Result<T> {
    let content = read(path)?;
    Ok(f(&content))
}

/// Reads `path`, runs `transform` over its content and writes the result back.
///
/// The file is rewritten even when the content did not change. `transform`
/// can veto the write by returning an error, in which case the file is left
/// as it was.
pub fn rewrite<T>(path: &Path, transform: impl FnOnce(&str) -> Result<(String, T)>) -> Result<T> {
    let content = read(path)?;
    let (patched, out) = transform(&content)?;
    tracing::debug!(
        path = %path.display(),
        before = content.len(),
        after = patched.len(),
        "writing back"
    );
    fs::write(path, patched).map_err(|source| PatchError::Write {
        path: path.to_owned(),
        source,
    })?;
    Ok(out)
}

/// Line endings are normalized to `\n` on read, so the patterns see the same
/// text on a CRLF checkout and the file is written back with LF endings.
fn read(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path).map_err(|source| PatchError::Read {
        path: path.to_owned(),
        source,
    })?;
    Ok(normalize_newlines(content))
}

fn normalize_newlines(content: String) -> String {
    if content.contains('\r') {
        content.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rewrite_writes_transformed_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.js");
        fs::write(&path, "abc").unwrap();

        let len = rewrite(&path, |s| Ok((s.to_uppercase(), s.len()))).unwrap();

        assert_eq!(len, 3);
        assert_eq!(fs::read_to_string(&path).unwrap(), "ABC");
    }

    #[test]
    fn vetoed_rewrite_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.js");
        fs::write(&path, "abc").unwrap();

        let err = rewrite(&path, |_| -> Result<(String, ())> {
            Err(PatchError::AnchorNotFound {
                path: "a.js".into(),
            })
        })
        .unwrap_err();

        assert!(matches!(err, PatchError::AnchorNotFound { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "abc");
    }

    #[test]
    fn line_endings_are_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.js");
        fs::write(&path, "a\r\nb\rc\n").unwrap();

        let seen = rewrite(&path, |s| Ok((s.to_owned(), s.to_owned()))).unwrap();

        assert_eq!(seen, "a\nb\nc\n");
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\nc\n");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.js");

        let err = inspect(&path, |s| s.len()).unwrap_err();

        assert!(matches!(err, PatchError::Read { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn invalid_utf8_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.js");
        fs::write(&path, [0x63, 0x61, 0xe9, 0x0a]).unwrap();

        let err = rewrite(&path, |s| Ok((s.to_owned(), ()))).unwrap_err();

        assert!(matches!(err, PatchError::Read { .. }));
    }
}
