// crates/apiforge-planner/src/keywords.rs
// ============================================================================
// Module: Action Keywords
// Description: Versioned keyword table mapping intent words to actions.
// Purpose: Keep intent classification data-driven.
// Dependencies: apiforge-contract
// ============================================================================

//! ## Overview
//! Each [`ActionCategory`] owns a keyword list and an HTTP method predicate.
//! Changing either is a behavior change for every stored intent, so the table
//! carries [`ACTION_KEYWORDS_VERSION`].

use std::fmt;

use apiforge_contract::HttpMethod;
use apiforge_contract::OperationDescriptor;

// ============================================================================
// CONSTANTS: Keyword table
// ============================================================================

/// Version of [`ACTION_KEYWORDS`]. Bump on any table change.
pub const ACTION_KEYWORDS_VERSION: u32 = 1;

/// Keywords per action category, in classification order.
pub const ACTION_KEYWORDS: &[(ActionCategory, &[&str])] = &[
    (ActionCategory::Create, &["create", "add", "new", "make", "post", "register", "submit"]),
    (ActionCategory::List, &["list", "all", "browse", "enumerate", "index"]),
    (
        ActionCategory::Get,
        &["get", "fetch", "retrieve", "show", "view", "read", "find", "detail", "details"],
    ),
    (ActionCategory::Update, &["update", "edit", "modify", "change", "patch", "put", "replace"]),
    (ActionCategory::Delete, &["delete", "remove", "destroy", "erase", "drop"]),
];

// ============================================================================
// SECTION: Categories
// ============================================================================

/// Coarse action an intent asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionCategory {
    /// Create a resource (POST).
    Create,
    /// List a collection (GET without path parameters).
    List,
    /// Read a resource (GET).
    Get,
    /// Modify a resource (PUT or PATCH).
    Update,
    /// Remove a resource (DELETE).
    Delete,
}

impl ActionCategory {
    /// Returns the lowercase category name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::List => "list",
            Self::Get => "get",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Returns true when `operation` performs this action.
    #[must_use]
    pub fn accepts(self, operation: &OperationDescriptor) -> bool {
        match self {
            Self::Create => operation.method == HttpMethod::Post,
            Self::List => operation.method == HttpMethod::Get && operation.is_collection_path(),
            Self::Get => operation.method == HttpMethod::Get,
            Self::Update => matches!(operation.method, HttpMethod::Put | HttpMethod::Patch),
            Self::Delete => operation.method == HttpMethod::Delete,
        }
    }
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the categories whose keywords appear among `tokens`.
#[must_use]
pub fn detect_categories(tokens: &[String]) -> Vec<ActionCategory> {
    ACTION_KEYWORDS
        .iter()
        .filter(|(_, keywords)| tokens.iter().any(|token| keywords.contains(&token.as_str())))
        .map(|(category, _)| *category)
        .collect()
}
