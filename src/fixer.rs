// SPDX-License-Identifier: AGPL-3.0-only

//! Read a project file, run a rule set over it, and write it back only when
//! something changed.

use crate::rules::{FieldRule, apply_rules};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixError {
    #[error("cannot read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("{} is not valid UTF-8: {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },
    #[error("cannot write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Whether a file was rewritten on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixOutcome {
    pub changed: bool,
}

/// Apply `rules` to the file at `path`.  Untouched files are never opened
/// for writing, so their modification time is preserved.
pub fn fix_file(path: &Path, rules: &[FieldRule]) -> Result<FixOutcome, FixError> {
    let bytes = fs::read(path).map_err(|source| FixError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8(bytes).map_err(|source| FixError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let rewrite = apply_rules(&content, rules);
    if !rewrite.changed {
        tracing::trace!(path = %path.display(), "already compliant");
        return Ok(FixOutcome { changed: false });
    }

    tracing::debug!(path = %path.display(), rewrites = rewrite.rewrites, "writing fixed file");
    fs::write(path, rewrite.text.as_bytes()).map_err(|source| FixError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(FixOutcome { changed: true })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::Hook;
    use std::time::{Duration, SystemTime};
    use tempfile::tempdir;

    #[test]
    fn rewrites_file_when_rules_match() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("project.prjx");
        fs::write(&path, "<DATA_LOADER_KEY>secret123</DATA_LOADER_KEY>\n").unwrap();

        let outcome = fix_file(&path, Hook::EraseDataLoaderKeys.rules()).unwrap();
        assert!(outcome.changed);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "<DATA_LOADER_KEY></DATA_LOADER_KEY>\n"
        );

        let again = fix_file(&path, Hook::EraseDataLoaderKeys.rules()).unwrap();
        assert!(!again.changed);
    }

    #[test]
    fn compliant_file_is_not_written() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("project.prjx");
        fs::write(&path, "<BACKGROUND_CHECK>0</BACKGROUND_CHECK>").unwrap();
        let past = SystemTime::now() - Duration::from_secs(3600);
        fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(past)
            .unwrap();

        let before = fs::metadata(&path).unwrap().modified().unwrap();

        let outcome = fix_file(&path, Hook::DisableBackgroundChecks.rules()).unwrap();
        assert!(!outcome.changed);
        let after = fs::metadata(&path).unwrap().modified().unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.prjx");
        let err = fix_file(&path, Hook::EraseVendorCode.rules()).unwrap_err();
        assert!(matches!(err, FixError::Read { .. }));
        assert!(err.to_string().contains("absent.prjx"));
        assert!(!path.exists());
    }

    #[test]
    fn non_utf8_content_is_a_decode_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("binary.prjx");
        fs::write(&path, [0xff, 0xfe, b'<', 0x80]).unwrap();
        let err = fix_file(&path, Hook::EraseVendorCode.rules()).unwrap_err();
        assert!(matches!(err, FixError::Decode { .. }));
    }
}
