// crates/apiforge-guardrail/src/language.rs
// ============================================================================
// Module: Source Languages
// Description: Extension-based language detection and comment syntax.
// Purpose: Decide which files are scanned and which lines are comments.
// Dependencies: serde
// ============================================================================

use std::fmt;
use std::path::Path;

use serde::Serialize;

/// Languages the guardrail understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLanguage {
    /// `.ts .tsx .mts .cts`
    TypeScript,
    /// `.js .jsx .mjs .cjs`
    JavaScript,
    /// `.py`
    Python,
    /// `.java`
    Java,
    /// `.go`
    Go,
    /// `.rs`
    Rust,
}

impl SourceLanguage {
    /// Infers the language from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "ts" | "tsx" | "mts" | "cts" => Some(Self::TypeScript),
            "js" | "jsx" | "mjs" | "cjs" => Some(Self::JavaScript),
            "py" => Some(Self::Python),
            "java" => Some(Self::Java),
            "go" => Some(Self::Go),
            "rs" => Some(Self::Rust),
            _ => None,
        }
    }

    /// Returns the lowercase language name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::JavaScript => "javascript",
            Self::Python => "python",
            Self::Java => "java",
            Self::Go => "go",
            Self::Rust => "rust",
        }
    }

    /// Returns true for languages with `//` and `/* */` comments.
    #[must_use]
    pub const fn is_c_family(self) -> bool {
        !matches!(self, Self::Python)
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Comment Tracking
// ============================================================================

/// Per-file comment state for line classification.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CommentTracker {
    /// Language of the file.
    language: SourceLanguage,
    /// True while inside a `/* ... */` block.
    in_block: bool,
}

impl CommentTracker {
    /// Starts tracking a file in `language`.
    pub(crate) const fn new(language: SourceLanguage) -> Self {
        Self {
            language,
            in_block: false,
        }
    }

    /// Returns the part of `line` outside comments, or `None` when nothing
    /// scannable remains.
    ///
    /// Code following a closing `*/` on the same line is returned. Lines
    /// opening with `*` are code unless a block comment is open.
    pub(crate) fn code<'a>(&mut self, line: &'a str) -> Option<&'a str> {
        if !self.language.is_c_family() {
            return (!line.trim_start().starts_with('#')).then_some(line);
        }
        let mut rest = line;
        loop {
            if self.in_block {
                let (_, after) = rest.split_once("*/")?;
                self.in_block = false;
                rest = after;
            }
            let trimmed = rest.trim_start();
            if let Some(after) = trimmed.strip_prefix("/*") {
                self.in_block = true;
                rest = after;
                continue;
            }
            if trimmed.is_empty() || trimmed.starts_with("//") {
                return None;
            }
            return Some(rest);
        }
    }
}

#[cfg(test)]
mod tests;
