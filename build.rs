// SPDX-License-Identifier: AGPL-3.0-only

use std::process::Command;

// Bake the rustc version and git commit into the hooks so `--version` can
// identify the build that rewrote a project file.
fn main() {
    let rustc = rustc_version::version()
        .map(|v| v.to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    println!("cargo:rustc-env=RUSTC_VERSION={rustc}");

    println!("cargo:rerun-if-env-changed=ENVELOPE_HOOKS_COMMIT");
    let commit = std::env::var("ENVELOPE_HOOKS_COMMIT")
        .ok()
        .filter(|v| !v.is_empty())
        .or_else(|| git_output(&["rev-parse", "--short", "HEAD"]))
        .unwrap_or_else(|| "0000000".to_string());
    println!("cargo:rustc-env=ENVELOPE_HOOKS_COMMIT={commit}");
}

fn git_output(args: &[&str]) -> Option<String> {
    let out = Command::new("git").args(args).output().ok()?;
    if !out.status.success() {
        return None;
    }
    let s = String::from_utf8_lossy(&out.stdout).trim().to_string();
    if s.is_empty() { None } else { Some(s) }
}
