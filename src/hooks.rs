// SPDX-License-Identifier: AGPL-3.0-only

//! The three hooks shipped by this crate and the rule set each one applies.

use crate::rules::FieldRule;
use once_cell::sync::Lazy;

static BACKGROUND_CHECK_RULES: Lazy<Vec<FieldRule>> =
    Lazy::new(|| vec![FieldRule::zero("BACKGROUND_CHECK").expect("valid regex")]);

static DATA_LOADER_KEY_RULES: Lazy<Vec<FieldRule>> =
    Lazy::new(|| vec![FieldRule::erase("DATA_LOADER_KEY").expect("valid regex")]);

static VENDOR_CODE_RULES: Lazy<Vec<FieldRule>> = Lazy::new(|| {
    ["BATCH_CODE", "PATH_VENDOR_CODE", "VENDOR_CODE"]
        .into_iter()
        .map(|tag| FieldRule::erase(tag).expect("valid regex"))
        .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    /// Force every `BACKGROUND_CHECK` interval to `0`.
    DisableBackgroundChecks,
    /// Empty every `DATA_LOADER_KEY`.
    EraseDataLoaderKeys,
    /// Empty `BATCH_CODE`, `PATH_VENDOR_CODE` and `VENDOR_CODE`.
    EraseVendorCode,
}

impl Hook {
    pub const ALL: [Hook; 3] = [
        Hook::DisableBackgroundChecks,
        Hook::EraseDataLoaderKeys,
        Hook::EraseVendorCode,
    ];

    /// Binary name, which is also the hook id in `.pre-commit-hooks.yaml`.
    pub fn name(self) -> &'static str {
        match self {
            Hook::DisableBackgroundChecks => "disable-periodic-background-checks",
            Hook::EraseDataLoaderKeys => "erase-data-loader-keys",
            Hook::EraseVendorCode => "erase-vendor-code",
        }
    }

    pub fn about(self) -> &'static str {
        match self {
            Hook::DisableBackgroundChecks => {
                "Disable periodic background checks in Envelope project files"
            }
            Hook::EraseDataLoaderKeys => "Erase data loader keys from Envelope project files",
            Hook::EraseVendorCode => "Erase vendor code secrets from Envelope project files",
        }
    }

    /// Prefix used when a file could not be processed.
    pub fn failure_context(self) -> &'static str {
        match self {
            Hook::DisableBackgroundChecks => "Failed to disable periodic background checks.",
            Hook::EraseDataLoaderKeys => "Failed to remove data loader keys from project.",
            Hook::EraseVendorCode => "Failed to remove vendor code secrets from project.",
        }
    }

    pub fn rules(self) -> &'static [FieldRule] {
        match self {
            Hook::DisableBackgroundChecks => &BACKGROUND_CHECK_RULES,
            Hook::EraseDataLoaderKeys => &DATA_LOADER_KEY_RULES,
            Hook::EraseVendorCode => &VENDOR_CODE_RULES,
        }
    }
}
