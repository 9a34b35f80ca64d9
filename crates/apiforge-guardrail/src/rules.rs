// crates/apiforge-guardrail/src/rules.rs
// ============================================================================
// Module: Guardrail Rules
// Description: Line predicates and the default forbidden-call rule set.
// Purpose: Describe forbidden network calls as data.
// Dependencies: regex
// ============================================================================

//! ## Overview
//! Rules are declared as static [`RuleSpec`] rows and compiled once into
//! [`GuardrailRule`] values when the engine is built. Compilation failures
//! surface as [`GuardrailError::Pattern`] instead of panicking.

use std::collections::BTreeSet;

use regex::Regex;

use crate::GuardrailError;
use crate::language::SourceLanguage;

// ============================================================================
// SECTION: Line Patterns
// ============================================================================

/// Language-agnostic line predicate.
#[derive(Debug, Clone)]
pub enum LinePattern {
    /// Regular expression searched anywhere in the line.
    Regex(Regex),
    /// Literal substring.
    Literal(String),
}

impl LinePattern {
    /// Compiles a regex pattern for `rule`.
    ///
    /// # Errors
    /// Returns [`GuardrailError::Pattern`] when the regex is invalid.
    pub fn regex(rule: &str, source: &str) -> Result<Self, GuardrailError> {
        Regex::new(source).map(Self::Regex).map_err(|err| GuardrailError::Pattern {
            rule: rule.to_string(),
            reason: err.to_string(),
        })
    }

    /// Returns true when the pattern occurs in `line`.
    #[must_use]
    pub fn is_match(&self, line: &str) -> bool {
        match self {
            Self::Regex(regex) => regex.is_match(line),
            Self::Literal(text) => line.contains(text.as_str()),
        }
    }
}

// ============================================================================
// SECTION: Rules
// ============================================================================

/// Compiled guardrail rule.
#[derive(Debug, Clone)]
pub struct GuardrailRule {
    /// Stable rule name.
    pub name: String,
    /// Forbidden-line predicate.
    pub pattern: LinePattern,
    /// Message reported with each violation.
    pub message: String,
    /// Languages the rule applies to; `None` applies everywhere.
    pub languages: Option<BTreeSet<SourceLanguage>>,
    /// Predicates suppressing a match on the same line.
    pub skip_patterns: Vec<LinePattern>,
}

impl GuardrailRule {
    /// Returns true when the rule applies to `language`.
    #[must_use]
    pub fn applies_to(&self, language: SourceLanguage) -> bool {
        self.languages.as_ref().is_none_or(|languages| languages.contains(&language))
    }

    /// Returns true when `line` violates the rule.
    #[must_use]
    pub fn violated_by(&self, line: &str) -> bool {
        self.pattern.is_match(line) && !self.skip_patterns.iter().any(|skip| skip.is_match(line))
    }
}

/// Static description of a default rule.
#[derive(Debug, Clone, Copy)]
pub struct RuleSpec {
    /// Rule name.
    pub name: &'static str,
    /// Languages; empty means all.
    pub languages: &'static [SourceLanguage],
    /// Regex source.
    pub pattern: &'static str,
    /// Violation message.
    pub message: &'static str,
    /// Literal skip substrings.
    pub skips: &'static [&'static str],
}

/// JavaScript-family languages.
const JS: &[SourceLanguage] = &[SourceLanguage::TypeScript, SourceLanguage::JavaScript];

/// Default rule table.
pub const DEFAULT_RULES: &[RuleSpec] = &[
    RuleSpec {
        name: "no-fetch",
        languages: JS,
        pattern: r"\bfetch\s*\(",
        message: "direct fetch() call; use the generated API client",
        skips: &[],
    },
    RuleSpec {
        name: "no-axios",
        languages: JS,
        pattern: r"\baxios(\.\w+)?\s*\(",
        message: "direct axios call; use the generated API client",
        skips: &[],
    },
    RuleSpec {
        name: "no-xhr",
        languages: JS,
        pattern: r"new\s+XMLHttpRequest",
        message: "XMLHttpRequest usage; use the generated API client",
        skips: &[],
    },
    RuleSpec {
        name: "no-python-requests",
        languages: &[SourceLanguage::Python],
        pattern: r"\b(requests|httpx)\.(get|post|put|patch|delete|request)\s*\(",
        message: "direct requests/httpx call; use the generated API client",
        skips: &[],
    },
    RuleSpec {
        name: "no-urllib",
        languages: &[SourceLanguage::Python],
        pattern: r"urllib\.request|http\.client",
        message: "urllib/http.client usage; use the generated API client",
        skips: &[],
    },
    RuleSpec {
        name: "no-java-http",
        languages: &[SourceLanguage::Java],
        pattern: r"HttpClient\.new|HttpURLConnection|\.openConnection\s*\(",
        message: "direct Java HTTP usage; use the generated API client",
        skips: &[],
    },
    RuleSpec {
        name: "no-go-http",
        languages: &[SourceLanguage::Go],
        pattern: r"http\.(Get|Post|Head|NewRequest|DefaultClient)",
        message: "direct net/http usage; use the generated API client",
        skips: &[],
    },
    RuleSpec {
        name: "no-reqwest",
        languages: &[SourceLanguage::Rust],
        pattern: r"reqwest::",
        message: "direct reqwest usage; use the generated API client",
        skips: &[],
    },
    RuleSpec {
        name: "no-raw-url",
        languages: &[],
        pattern: r"https?://",
        message: "hard-coded URL; configure the base URL on the generated client",
        skips: &["basePath", "base_url", "baseUrl", "BASE_URL", "localhost"],
    },
];

impl RuleSpec {
    /// Compiles the rule.
    ///
    /// # Errors
    /// Returns [`GuardrailError::Pattern`] when the pattern is invalid.
    pub fn compile(&self) -> Result<GuardrailRule, GuardrailError> {
        let languages = if self.languages.is_empty() {
            None
        } else {
            Some(self.languages.iter().copied().collect())
        };
        Ok(GuardrailRule {
            name: self.name.to_string(),
            pattern: LinePattern::regex(self.name, self.pattern)?,
            message: self.message.to_string(),
            languages,
            skip_patterns: self
                .skips
                .iter()
                .map(|skip| LinePattern::Literal((*skip).to_string()))
                .collect(),
        })
    }
}

/// Compiles the default rule set.
///
/// # Errors
/// Returns [`GuardrailError::Pattern`] when a built-in pattern fails to
/// compile.
pub fn default_rules() -> Result<Vec<GuardrailRule>, GuardrailError> {
    DEFAULT_RULES.iter().map(RuleSpec::compile).collect()
}
