// SPDX-License-Identifier: AGPL-3.0-only

//! Pre-commit hooks for Envelope project files.
//!
//! Envelope projects embed secrets (data loader keys, vendor codes) and
//! machine-local settings (background check intervals) as tagged fields.
//! Each hook rewrites those fields in place so they never reach version
//! control, and exits non-zero when it touched anything so the commit can be
//! re-staged.

pub mod cli;
pub mod fixer;
pub mod hooks;
pub mod logging;
pub mod rules;
pub mod runner;

pub use fixer::{FixError, FixOutcome, fix_file};
pub use hooks::Hook;
pub use rules::{FieldRule, Rewrite, ValuePolicy, apply_rules};
pub use runner::{BatchOutcome, run_batch};
