// SPDX-License-Identifier: AGPL-3.0-only

use crate::fixer::fix_file;
use crate::hooks::Hook;
use std::io::Write;
use std::path::PathBuf;

/// Tally of a batch run.  Any fixed or failed file fails the hook so the
/// commit is blocked until the rewritten files are re-staged.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchOutcome {
    pub fixed: usize,
    pub failed: usize,
}

impl BatchOutcome {
    pub fn exit_code(&self) -> i32 {
        if self.fixed > 0 || self.failed > 0 { 1 } else { 0 }
    }
}

/// Run `hook` over every path in order, reporting to `out`.  A failing file
/// is reported and skipped; the remaining paths are still processed.
pub fn run_batch(hook: Hook, paths: &[PathBuf], out: &mut dyn Write) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for path in paths {
        tracing::debug!(hook = hook.name(), path = %path.display(), "processing");
        match fix_file(path, hook.rules()) {
            Ok(fix) if fix.changed => {
                outcome.fixed += 1;
                let _ = writeln!(out, "Fixing {}", path.display());
            }
            Ok(_) => {}
            Err(err) => {
                outcome.failed += 1;
                tracing::debug!(path = %path.display(), error = ?err, "fix failed");
                let _ = writeln!(
                    out,
                    "{}: {} Error: ({err})",
                    path.display(),
                    hook.failure_context()
                );
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn empty_batch_passes() {
        let mut out = Vec::new();
        let outcome = run_batch(Hook::EraseVendorCode, &[], &mut out);
        assert_eq!(outcome.exit_code(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn reports_only_changed_files() {
        let dir = tempdir().unwrap();
        let dirty = dir.path().join("dirty.prjx");
        let clean = dir.path().join("clean.prjx");
        fs::write(&dirty, "<BACKGROUND_CHECK>42</BACKGROUND_CHECK>").unwrap();
        fs::write(&clean, "<BACKGROUND_CHECK>0</BACKGROUND_CHECK>").unwrap();

        let mut out = Vec::new();
        let outcome = run_batch(
            Hook::DisableBackgroundChecks,
            &[dirty.clone(), clean.clone()],
            &mut out,
        );

        assert_eq!(outcome, BatchOutcome { fixed: 1, failed: 0 });
        assert_eq!(outcome.exit_code(), 1);
        let report = String::from_utf8(out).unwrap();
        assert_eq!(report, format!("Fixing {}\n", dirty.display()));
    }

    #[test]
    fn failures_do_not_stop_the_batch() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.prjx");
        let dirty = dir.path().join("dirty.prjx");
        fs::write(&dirty, "<VENDOR_CODE>XYZ</VENDOR_CODE>").unwrap();

        let mut out = Vec::new();
        let outcome = run_batch(
            Hook::EraseVendorCode,
            &[missing.clone(), dirty.clone()],
            &mut out,
        );

        assert_eq!(outcome, BatchOutcome { fixed: 1, failed: 1 });
        let report = String::from_utf8(out).unwrap();
        let lines: Vec<_> = report.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(&format!(
            "{}: Failed to remove vendor code secrets from project. Error: (",
            missing.display()
        )));
        assert_eq!(lines[1], format!("Fixing {}", dirty.display()));
        assert_eq!(
            fs::read_to_string(&dirty).unwrap(),
            "<VENDOR_CODE></VENDOR_CODE>"
        );
    }

    #[test]
    fn compliant_batch_passes() {
        let dir = tempdir().unwrap();
        let clean = dir.path().join("clean.prjx");
        fs::write(&clean, "<DATA_LOADER_KEY></DATA_LOADER_KEY>").unwrap();

        let mut out = Vec::new();
        let outcome = run_batch(Hook::EraseDataLoaderKeys, &[clean], &mut out);
        assert_eq!(outcome.exit_code(), 0);
        assert!(out.is_empty());
    }
}
