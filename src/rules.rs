// SPDX-License-Identifier: AGPL-3.0-only

//! Tagged-field rewrite rules for Envelope project files.
//!
//! A rule looks for `<TAG>value</TAG>` in raw text and swaps the value for a
//! fixed replacement.  The file is never parsed as a document; anything that
//! is not a matching tag pair passes through untouched.

use regex::{Captures, Regex};
use std::borrow::Cow;

/// Which captured values a rule is allowed to rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuePolicy {
    /// A bare run of digits other than the literal `0`.
    NonZeroNumber,
    /// Any value of at least one character on a single line.
    NonEmpty,
}

impl ValuePolicy {
    /// Regex fragment for the captured value.  `.*?` stops at the first
    /// closing tag of the same name and never crosses a newline.  It admits
    /// empty values so an erased field cannot swallow the next one on the
    /// same line; `accepts` then filters them out.
    fn value_pattern(self) -> &'static str {
        match self {
            ValuePolicy::NonZeroNumber => r"\d+",
            ValuePolicy::NonEmpty => r".*?",
        }
    }

    /// Second-stage check on a captured value.
    pub fn accepts(self, value: &str) -> bool {
        match self {
            ValuePolicy::NonZeroNumber => value != "0",
            ValuePolicy::NonEmpty => !value.is_empty(),
        }
    }
}

/// One tagged field plus the value it must hold once fixed.
#[derive(Debug, Clone)]
pub struct FieldRule {
    tag: &'static str,
    policy: ValuePolicy,
    replacement: &'static str,
    pattern: Regex,
}

impl FieldRule {
    pub fn new(
        tag: &'static str,
        policy: ValuePolicy,
        replacement: &'static str,
    ) -> Result<Self, regex::Error> {
        let escaped = regex::escape(tag);
        let pattern = Regex::new(&format!(
            "<{escaped}>({})</{escaped}>",
            policy.value_pattern()
        ))?;
        Ok(Self {
            tag,
            policy,
            replacement,
            pattern,
        })
    }

    /// Rule that forces a numeric field to `0`.
    pub fn zero(tag: &'static str) -> Result<Self, regex::Error> {
        Self::new(tag, ValuePolicy::NonZeroNumber, "0")
    }

    /// Rule that empties a field.
    pub fn erase(tag: &'static str) -> Result<Self, regex::Error> {
        Self::new(tag, ValuePolicy::NonEmpty, "")
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn policy(&self) -> ValuePolicy {
        self.policy
    }

    pub fn replacement(&self) -> &'static str {
        self.replacement
    }

    /// Rewrite every accepted occurrence of this rule's tag in `text`.
    pub fn apply<'t>(&self, text: &'t str) -> Rewrite<'t> {
        let mut rewrites = 0usize;
        let out = self.pattern.replace_all(text, |caps: &Captures<'_>| {
            let whole = &caps[0];
            if !self.policy.accepts(&caps[1]) {
                return whole.to_string();
            }
            rewrites += 1;
            format!("<{tag}>{}</{tag}>", self.replacement, tag = self.tag)
        });

        if rewrites == 0 {
            return Rewrite::unchanged(text);
        }
        Rewrite {
            text: out,
            changed: true,
            rewrites,
        }
    }
}

/// Result of running one or more rules over a piece of text.
#[derive(Debug)]
pub struct Rewrite<'t> {
    pub text: Cow<'t, str>,
    pub changed: bool,
    /// Number of field values replaced across all rules.
    pub rewrites: usize,
}

impl<'t> Rewrite<'t> {
    fn unchanged(text: &'t str) -> Self {
        Self {
            text: Cow::Borrowed(text),
            changed: false,
            rewrites: 0,
        }
    }

    pub fn into_string(self) -> String {
        self.text.into_owned()
    }
}

/// Apply `rules` in order, each one seeing the output of the previous.
pub fn apply_rules<'t>(text: &'t str, rules: &[FieldRule]) -> Rewrite<'t> {
    let mut current = Rewrite::unchanged(text);
    for rule in rules {
        let step = rule.apply(&current.text);
        if !step.changed {
            continue;
        }
        tracing::debug!(tag = rule.tag(), count = step.rewrites, "rewrote field values");
        let rewrites = current.rewrites + step.rewrites;
        let next = step.into_string();
        current = Rewrite {
            text: Cow::Owned(next),
            changed: true,
            rewrites,
        };
    }
    current
}
