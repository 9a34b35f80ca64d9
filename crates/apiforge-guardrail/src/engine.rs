// crates/apiforge-guardrail/src/engine.rs
// ============================================================================
// Module: Guardrail Engine
// Description: Applies compiled rules to file sets and directory trees.
// Purpose: Produce a violation report for generated or hand-written code.
// Dependencies: apiforge-contract, tracing, walkdir
// ============================================================================

//! ## Overview
//! [`GuardrailEngine`] is built once from the default rules and
//! [`GuardrailSettings`] and is immutable afterwards. [`GuardrailEngine::scan`]
//! checks an in-memory file set (such as emitter output before it is
//! written); [`GuardrailEngine::scan_tree`] walks a directory.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use apiforge_contract::NETWORK_CLIENT_MARKER;
use walkdir::DirEntry;
use walkdir::WalkDir;

use crate::GuardrailError;
use crate::language::CommentTracker;
use crate::language::SourceLanguage;
use crate::report::GuardrailReport;
use crate::report::Violation;
use crate::rules::GuardrailRule;
use crate::rules::LinePattern;
use crate::rules::default_rules;

// ============================================================================
// CONSTANTS: Scan limits
// ============================================================================

/// Directory names never descended into by [`GuardrailEngine::scan_tree`].
pub const SKIPPED_DIRS: &[&str] = &[
    "node_modules",
    "target",
    "dist",
    "build",
    ".git",
    "vendor",
    "__pycache__",
    ".venv",
    "venv",
    ".gradle",
    "out",
];

/// Leading lines searched for the network client marker.
pub const MARKER_SCAN_LINES: usize = 5;

/// Files larger than this are skipped by tree scans.
pub const MAX_SCAN_FILE_BYTES: u64 = 2 * 1024 * 1024;

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Adjustments to the default rule set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuardrailSettings {
    /// Rule names to drop.
    pub disabled_rules: BTreeSet<String>,
    /// Extra regex skip patterns keyed by rule name.
    pub extra_skip_patterns: BTreeMap<String, Vec<String>>,
}

// ============================================================================
// SECTION: Engine
// ============================================================================

/// Immutable rule engine.
#[derive(Debug, Clone)]
pub struct GuardrailEngine {
    /// Active rules in declaration order.
    rules: Vec<GuardrailRule>,
}

impl GuardrailEngine {
    /// Builds an engine from the default rules adjusted by `settings`.
    ///
    /// Unknown rule names in `settings` are logged and ignored.
    ///
    /// # Errors
    /// Returns [`GuardrailError::Pattern`] when a pattern fails to compile.
    pub fn new(settings: &GuardrailSettings) -> Result<Self, GuardrailError> {
        let mut rules = default_rules()?;
        let known: BTreeSet<String> = rules.iter().map(|rule| rule.name.clone()).collect();
        let configured = settings.disabled_rules.iter().chain(settings.extra_skip_patterns.keys());
        for name in configured.filter(|name| !known.contains(*name)) {
            tracing::warn!(rule = %name, "unknown guardrail rule in settings");
        }
        rules.retain(|rule| !settings.disabled_rules.contains(&rule.name));
        for rule in &mut rules {
            if let Some(extra) = settings.extra_skip_patterns.get(&rule.name) {
                for source in extra {
                    rule.skip_patterns.push(LinePattern::regex(&rule.name, source)?);
                }
            }
        }
        Ok(Self::from_rules(rules))
    }

    /// Builds an engine from explicit rules.
    #[must_use]
    pub const fn from_rules(rules: Vec<GuardrailRule>) -> Self {
        Self {
            rules,
        }
    }

    /// Returns the active rules.
    #[must_use]
    pub fn rules(&self) -> &[GuardrailRule] {
        &self.rules
    }

    /// Scans an in-memory file set keyed by path.
    #[must_use]
    pub fn scan(&self, files: &BTreeMap<String, String>) -> GuardrailReport {
        let mut report = GuardrailReport::default();
        for (path, contents) in files {
            self.scan_into(path, contents, &mut report);
        }
        report
    }

    /// Scans one file, returning its violations.
    ///
    /// Files with unrecognized extensions yield nothing.
    #[must_use]
    pub fn scan_file(&self, path: &str, contents: &str) -> Vec<Violation> {
        let mut report = GuardrailReport::default();
        self.scan_into(path, contents, &mut report);
        report.violations
    }

    /// Walks `root` and scans every recognized source file.
    ///
    /// Reported paths are relative to `root` with `/` separators.
    ///
    /// # Errors
    /// Returns [`GuardrailError::Io`] when the tree cannot be walked or a
    /// file cannot be read.
    pub fn scan_tree(&self, root: &Path) -> Result<GuardrailReport, GuardrailError> {
        let mut report = GuardrailReport::default();
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_skipped_dir(entry));
        for entry in walker {
            let entry = entry.map_err(|err| GuardrailError::Io(err.to_string()))?;
            if !entry.file_type().is_file() || SourceLanguage::from_path(entry.path()).is_none() {
                continue;
            }
            let metadata =
                entry.metadata().map_err(|err| GuardrailError::Io(err.to_string()))?;
            if metadata.len() > MAX_SCAN_FILE_BYTES {
                tracing::warn!(path = %entry.path().display(), "skipping oversized file");
                continue;
            }
            let bytes = fs::read(entry.path())
                .map_err(|err| GuardrailError::Io(format!("{}: {err}", entry.path().display())))?;
            let Ok(contents) = String::from_utf8(bytes) else {
                tracing::debug!(path = %entry.path().display(), "skipping non-utf8 file");
                continue;
            };
            let relative = entry.path().strip_prefix(root).unwrap_or_else(|_| entry.path());
            let display = relative
                .components()
                .map(|component| component.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            self.scan_into(&display, &contents, &mut report);
        }
        Ok(report)
    }

    /// Scans one file into `report`.
    fn scan_into(&self, path: &str, contents: &str, report: &mut GuardrailReport) {
        let Some(language) = SourceLanguage::from_path(Path::new(path)) else {
            return;
        };
        report.files_scanned += 1;
        if has_client_marker(contents) {
            tracing::debug!(path, "network client marker present; file exempt");
            return;
        }
        let rules: Vec<&GuardrailRule> =
            self.rules.iter().filter(|rule| rule.applies_to(language)).collect();
        let mut comments = CommentTracker::new(language);
        for (index, line) in contents.lines().enumerate() {
            let Some(code) = comments.code(line) else {
                continue;
            };
            for rule in rules.iter().filter(|rule| rule.violated_by(code)) {
                report.violations.push(Violation {
                    rule_name: rule.name.clone(),
                    file_path: path.to_string(),
                    line_number: index + 1,
                    message: rule.message.clone(),
                    line: line.trim().to_string(),
                });
            }
        }
        tracing::debug!(path, language = %language, "scanned file");
    }
}

/// Returns true when the marker appears in the leading lines.
fn has_client_marker(contents: &str) -> bool {
    contents.lines().take(MARKER_SCAN_LINES).any(|line| line.contains(NETWORK_CLIENT_MARKER))
}

/// Returns true for directories excluded from tree scans.
fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name().to_str().is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

#[cfg(test)]
mod tests;
