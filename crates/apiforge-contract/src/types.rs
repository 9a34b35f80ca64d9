// crates/apiforge-contract/src/types.rs
// ============================================================================
// Module: Type Mapper
// Description: Semantic type model and per-language type projections.
// Purpose: Keep one mapping table that every emitter agrees on.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! [`map_type`] converts a contract schema fragment into a [`SemanticType`].
//! [`project`] renders a semantic type through a language's
//! [`ProjectionTable`]. Tables live here and only here, so supporting a new
//! language means adding one table to [`PROJECTIONS`].
//!
//! Mapping is best-effort and never fails: shapes outside the supported
//! subset become [`SemanticType::Unknown`], which projects to each language's
//! untyped fallback.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde_json::Value;

// ============================================================================
// SECTION: Semantic Types
// ============================================================================

/// Language-agnostic type derived from a contract schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SemanticType {
    /// String scalar.
    String,
    /// Numeric scalar (`integer` and `number` both map here).
    Number,
    /// Boolean scalar.
    Boolean,
    /// Homogeneous array.
    Array(Box<Self>),
    /// Object without a named schema.
    Object,
    /// Named component schema (trailing `$ref` segment).
    Named(String),
    /// Anything outside the supported subset.
    Unknown,
}

impl SemanticType {
    /// Collects named schema references reachable from this type.
    pub fn collect_named(&self, names: &mut BTreeSet<String>) {
        match self {
            Self::Named(name) => {
                names.insert(name.clone());
            }
            Self::Array(inner) => inner.collect_named(names),
            Self::String | Self::Number | Self::Boolean | Self::Object | Self::Unknown => {}
        }
    }
}

/// Maps a schema fragment to a [`SemanticType`].
#[must_use]
pub fn map_type(schema: &Value) -> SemanticType {
    if let Some(reference) = schema.get("$ref").and_then(Value::as_str) {
        return ref_type(reference);
    }
    match schema.get("type").and_then(Value::as_str) {
        Some("string") => SemanticType::String,
        Some("integer" | "number") => SemanticType::Number,
        Some("boolean") => SemanticType::Boolean,
        Some("array") => {
            let inner = schema.get("items").map_or(SemanticType::Unknown, map_type);
            SemanticType::Array(Box::new(inner))
        }
        Some("object") => SemanticType::Object,
        _ => SemanticType::Unknown,
    }
}

/// Resolves a `$ref` string to a named type using its trailing segment.
fn ref_type(reference: &str) -> SemanticType {
    let segment = reference.rsplit('/').next().unwrap_or(reference);
    let name: String =
        segment.chars().filter(|ch| ch.is_ascii_alphanumeric() || *ch == '_').collect();
    if name.is_empty() || name.starts_with(|ch: char| ch.is_ascii_digit()) {
        SemanticType::Unknown
    } else {
        SemanticType::Named(name)
    }
}

// ============================================================================
// SECTION: Projection Tables
// ============================================================================

/// How a language renders named schema references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedProjection {
    /// Use the schema name; the client module declares an alias for it.
    ByName,
    /// Use a fixed parsed-document type for every named schema.
    Fixed(&'static str),
}

/// Native type names for one target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionTable {
    /// Language identifier matching the emitter registry.
    pub language: &'static str,
    /// String scalar type.
    pub string: &'static str,
    /// Numeric scalar type.
    pub number: &'static str,
    /// Boolean scalar type.
    pub boolean: &'static str,
    /// Array wrapper rendered as `prefix + inner + suffix`.
    pub array: (&'static str, &'static str),
    /// Untyped object type.
    pub object: &'static str,
    /// Named schema rendering.
    pub named: NamedProjection,
    /// Untyped fallback for unknown shapes.
    pub fallback: &'static str,
    /// Underlying type used when declaring named aliases.
    pub alias_target: &'static str,
}

/// TypeScript projections.
pub const TYPESCRIPT: ProjectionTable = ProjectionTable {
    language: "typescript",
    string: "string",
    number: "number",
    boolean: "boolean",
    array: ("Array<", ">"),
    object: "Record<string, any>",
    named: NamedProjection::ByName,
    fallback: "any",
    alias_target: "Record<string, any>",
};

/// Python projections.
pub const PYTHON: ProjectionTable = ProjectionTable {
    language: "python",
    string: "str",
    number: "float",
    boolean: "bool",
    array: ("List[", "]"),
    object: "Dict[str, Any]",
    named: NamedProjection::ByName,
    fallback: "Any",
    alias_target: "Dict[str, Any]",
};

/// Go projections.
pub const GO: ProjectionTable = ProjectionTable {
    language: "go",
    string: "string",
    number: "float64",
    boolean: "bool",
    array: ("[]", ""),
    object: "map[string]interface{}",
    named: NamedProjection::ByName,
    fallback: "interface{}",
    alias_target: "map[string]interface{}",
};

/// Java projections.
pub const JAVA: ProjectionTable = ProjectionTable {
    language: "java",
    string: "String",
    number: "Double",
    boolean: "Boolean",
    array: ("List<", ">"),
    object: "Map<String, Object>",
    named: NamedProjection::Fixed("JsonNode"),
    fallback: "Object",
    alias_target: "JsonNode",
};

/// Rust projections.
pub const RUST: ProjectionTable = ProjectionTable {
    language: "rust",
    string: "String",
    number: "f64",
    boolean: "bool",
    array: ("Vec<", ">"),
    object: "serde_json::Map<String, serde_json::Value>",
    named: NamedProjection::ByName,
    fallback: "serde_json::Value",
    alias_target: "serde_json::Value",
};

/// Every registered projection table.
pub const PROJECTIONS: &[ProjectionTable] = &[TYPESCRIPT, PYTHON, GO, JAVA, RUST];

/// Looks up the projection table for a language identifier.
#[must_use]
pub fn projection_table(language: &str) -> Option<&'static ProjectionTable> {
    PROJECTIONS.iter().find(|table| table.language == language)
}

/// Projects a semantic type into a native type name.
#[must_use]
pub fn project(ty: &SemanticType, table: &ProjectionTable) -> String {
    match ty {
        SemanticType::String => table.string.to_string(),
        SemanticType::Number => table.number.to_string(),
        SemanticType::Boolean => table.boolean.to_string(),
        SemanticType::Array(inner) => {
            let (prefix, suffix) = table.array;
            format!("{prefix}{}{suffix}", project(inner, table))
        }
        SemanticType::Object => table.object.to_string(),
        SemanticType::Named(name) => match table.named {
            NamedProjection::ByName => name.clone(),
            NamedProjection::Fixed(native) => native.to_string(),
        },
        SemanticType::Unknown => table.fallback.to_string(),
    }
}

#[cfg(test)]
mod tests;
