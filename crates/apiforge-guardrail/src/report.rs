// crates/apiforge-guardrail/src/report.rs
// ============================================================================
// Module: Guardrail Reports
// Description: Violation records and their text and JSON renderings.
// Purpose: Present one violation list in several shapes.
// Dependencies: serde, serde_json
// ============================================================================

use std::collections::BTreeMap;
use std::fmt::Write;

use serde::Serialize;

use crate::GuardrailError;

/// One forbidden line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Violated rule.
    pub rule_name: String,
    /// Path of the offending file as given to the scan.
    pub file_path: String,
    /// 1-based line number.
    pub line_number: usize,
    /// Rule message.
    pub message: String,
    /// Trimmed offending line.
    pub line: String,
}

/// Outcome of a scan.
///
/// # Invariants
/// - `violations` follow scan order: file, then line number, then rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardrailReport {
    /// Number of files whose language was recognized.
    pub files_scanned: usize,
    /// Every violation found.
    pub violations: Vec<Violation>,
}

impl GuardrailReport {
    /// Returns true when no violation was found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Groups violations by rule name.
    #[must_use]
    pub fn grouped(&self) -> BTreeMap<&str, Vec<&Violation>> {
        let mut groups: BTreeMap<&str, Vec<&Violation>> = BTreeMap::new();
        for violation in &self.violations {
            groups.entry(violation.rule_name.as_str()).or_default().push(violation);
        }
        groups
    }

    /// Renders the grouped report as plain text.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        if self.is_clean() {
            let _ = writeln!(out, "guardrail: {} files scanned, no violations", self.files_scanned);
            return out;
        }
        let _ = writeln!(
            out,
            "guardrail: {} violations in {} files scanned",
            self.violations.len(),
            self.files_scanned
        );
        for (rule, violations) in self.grouped() {
            let message = violations.first().map_or("", |violation| violation.message.as_str());
            let _ = writeln!(out, "\n[{rule}] {message}");
            for violation in violations {
                let _ = writeln!(
                    out,
                    "  {}:{}: {}",
                    violation.file_path, violation.line_number, violation.line
                );
            }
        }
        out
    }

    /// Renders the violation list as pretty JSON.
    ///
    /// # Errors
    /// Returns [`GuardrailError::Json`] when serialization fails.
    pub fn to_json(&self) -> Result<String, GuardrailError> {
        serde_json::to_string_pretty(&self.violations)
            .map_err(|err| GuardrailError::Json(err.to_string()))
    }
}

#[cfg(test)]
mod tests;
