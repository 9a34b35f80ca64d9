// crates/apiforge-contract/src/model.rs
// ============================================================================
// Module: Contract Model
// Description: Normalized in-memory model of an OpenAPI-shaped contract.
// Purpose: Deserialize the recognized contract subset with document order kept.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The model mirrors the subset of OpenAPI this workspace understands:
//! `info`, `servers`, `paths` (GET/POST/PUT/PATCH/DELETE operations), and
//! `components.schemas`. Schemas stay as raw [`serde_json::Value`] fragments
//! and are interpreted by [`crate::types::map_type`].
//!
//! Unknown keys are ignored everywhere. Path items are collected into a
//! vector so that the order in the source document survives parsing for both
//! JSON and YAML inputs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde_json::Value;

// ============================================================================
// SECTION: Document
// ============================================================================

/// Root of the normalized contract model.
///
/// # Invariants
/// - `paths` preserves the order of the source document.
/// - The document is immutable after loading.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContractDocument {
    /// `OpenAPI` version string, when declared.
    #[serde(default)]
    pub openapi: Option<String>,
    /// Contract metadata.
    pub info: Info,
    /// Declared server entries.
    #[serde(default)]
    pub servers: Vec<Server>,
    /// Path templates mapped to their path items, in document order.
    #[serde(deserialize_with = "ordered_paths")]
    pub paths: Vec<PathEntry>,
    /// Reusable components.
    #[serde(default)]
    pub components: Components,
}

impl ContractDocument {
    /// Returns the first declared server URL, if any.
    #[must_use]
    pub fn primary_server_url(&self) -> Option<&str> {
        self.servers.first().map(|server| server.url.as_str())
    }
}

/// Contract metadata block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Info {
    /// Human-readable API title.
    pub title: String,
    /// API version string.
    #[serde(default)]
    pub version: String,
    /// Optional long-form description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Server entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Server {
    /// Base URL for the server.
    pub url: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Reusable contract components.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Components {
    /// Named schemas addressable through `#/components/schemas/<name>`.
    #[serde(default)]
    pub schemas: BTreeMap<String, Value>,
}

/// A single path template with its path item.
#[derive(Debug, Clone, PartialEq)]
pub struct PathEntry {
    /// Path template such as `/pets/{id}`.
    pub template: String,
    /// Operations bound to the template.
    pub item: PathItem,
}

// ============================================================================
// SECTION: Operations
// ============================================================================

/// HTTP verbs recognized by the contract model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
    /// HTTP PUT.
    Put,
    /// HTTP PATCH.
    Patch,
    /// HTTP DELETE.
    Delete,
}

impl HttpMethod {
    /// Canonical traversal order used during extraction.
    pub const CANONICAL_ORDER: [Self; 5] =
        [Self::Get, Self::Post, Self::Put, Self::Patch, Self::Delete];

    /// Returns the upper-case wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Operations and shared parameters declared for one path template.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PathItem {
    /// GET operation.
    #[serde(default)]
    pub get: Option<OperationSpec>,
    /// POST operation.
    #[serde(default)]
    pub post: Option<OperationSpec>,
    /// PUT operation.
    #[serde(default)]
    pub put: Option<OperationSpec>,
    /// PATCH operation.
    #[serde(default)]
    pub patch: Option<OperationSpec>,
    /// DELETE operation.
    #[serde(default)]
    pub delete: Option<OperationSpec>,
    /// Parameters shared by every operation on this path.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl PathItem {
    /// Returns the operation bound to a verb.
    #[must_use]
    pub const fn operation(&self, method: HttpMethod) -> Option<&OperationSpec> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
        }
    }

    /// Iterates declared operations in canonical verb order.
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &OperationSpec)> {
        HttpMethod::CANONICAL_ORDER
            .into_iter()
            .filter_map(|method| self.operation(method).map(|operation| (method, operation)))
    }
}

/// A single contract operation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OperationSpec {
    /// Operation identifier; operations without one are skipped.
    #[serde(default, rename = "operationId")]
    pub operation_id: Option<String>,
    /// Short summary.
    #[serde(default)]
    pub summary: Option<String>,
    /// Grouping tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Operation-level parameters, in declaration order.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Optional request body.
    #[serde(default, rename = "requestBody")]
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status code.
    #[serde(default)]
    pub responses: BTreeMap<StatusKey, Response>,
}

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// Path template placeholder.
    Path,
    /// Query string entry.
    Query,
    /// Request header.
    Header,
    /// Cookie value.
    Cookie,
    /// Any location outside the recognized subset.
    #[serde(other)]
    Other,
}

/// Parameter declaration.
///
/// Fields are optional so that `$ref` parameters and partially specified
/// entries parse; extraction skips entries it cannot use.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    #[serde(default)]
    pub name: Option<String>,
    /// Parameter location.
    #[serde(default, rename = "in")]
    pub location: Option<ParameterLocation>,
    /// Whether the parameter must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Parameter schema.
    #[serde(default)]
    pub schema: Option<Value>,
    /// Reference to a shared parameter (not resolved).
    #[serde(default, rename = "$ref")]
    pub reference: Option<String>,
}

/// Request body declaration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RequestBody {
    /// Media types accepted by the operation.
    #[serde(default)]
    pub content: BTreeMap<String, MediaType>,
    /// Whether the body is required.
    #[serde(default)]
    pub required: bool,
}

/// Response declaration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Response {
    /// Response description.
    #[serde(default)]
    pub description: Option<String>,
    /// Media types produced by the response.
    #[serde(default)]
    pub content: BTreeMap<String, MediaType>,
}

/// Media type entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaType {
    /// Payload schema.
    #[serde(default)]
    pub schema: Option<Value>,
}

/// Returns the schema of the first JSON media type in a content map.
///
/// Returns `Some(None)` when JSON content exists without a schema and `None`
/// when no JSON media type is declared.
#[must_use]
pub fn json_schema(content: &BTreeMap<String, MediaType>) -> Option<Option<&Value>> {
    content
        .iter()
        .find(|(media_type, _)| is_json_media_type(media_type))
        .map(|(_, media)| media.schema.as_ref())
}

/// Returns true for `application/json` and `+json` structured syntax types.
fn is_json_media_type(media_type: &str) -> bool {
    let essence = media_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

// ============================================================================
// SECTION: Status Keys
// ============================================================================

/// Response status key (`"200"`, `"default"`, `"2XX"`).
///
/// YAML documents frequently leave status codes unquoted, so the key accepts
/// both integers and strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StatusKey(pub String);

impl StatusKey {
    /// Returns the key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for StatusKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        /// Visitor accepting string or integer status keys.
        struct StatusKeyVisitor;

        impl Visitor<'_> for StatusKeyVisitor {
            type Value = StatusKey;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a status code string or integer")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(StatusKey(value.to_string()))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(StatusKey(value.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(StatusKey(value.to_string()))
            }
        }

        deserializer.deserialize_any(StatusKeyVisitor)
    }
}

// ============================================================================
// SECTION: Ordered Paths
// ============================================================================

/// Deserializes the `paths` mapping into a vector in document order.
fn ordered_paths<'de, D>(deserializer: D) -> Result<Vec<PathEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    /// Visitor collecting map entries in encounter order.
    struct PathsVisitor;

    impl<'de> Visitor<'de> for PathsVisitor {
        type Value = Vec<PathEntry>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a mapping of path templates to path items")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or_default());
            while let Some((template, item)) = map.next_entry::<String, PathItem>()? {
                entries.push(PathEntry {
                    template,
                    item,
                });
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(PathsVisitor)
}
