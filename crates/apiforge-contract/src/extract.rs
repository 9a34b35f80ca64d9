// crates/apiforge-contract/src/extract.rs
// ============================================================================
// Module: Operation Extractor
// Description: Flattens the contract model into operation descriptors.
// Purpose: Produce the language-agnostic IR consumed by emitters and planner.
// Dependencies: tracing
// ============================================================================

//! ## Overview
//! [`extract`] walks path items in document order and verbs in canonical
//! order, producing one [`OperationDescriptor`] per operation that declares
//! an `operationId`. Operations without one are logged and skipped.
//!
//! Return types are resolved from `200` then `201` responses carrying JSON
//! content: a `$ref` schema yields [`ReturnType::Named`], any other JSON body
//! yields [`ReturnType::Untyped`], and no JSON body yields
//! [`ReturnType::Void`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt::Write;

use crate::ContractError;
use crate::model::ContractDocument;
use crate::model::HttpMethod;
use crate::model::OperationSpec;
use crate::model::Parameter;
use crate::model::ParameterLocation;
use crate::model::json_schema;
use crate::types::SemanticType;
use crate::types::map_type;

// ============================================================================
// SECTION: Descriptors
// ============================================================================

/// Optional set of operation identifiers to keep.
pub type OperationFilter = BTreeSet<String>;

/// Status codes consulted for return types, in precedence order.
const RETURN_STATUS_CODES: [&str; 2] = ["200", "201"];

/// Resolved return type of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReturnType {
    /// No JSON response body.
    Void,
    /// Named component schema.
    Named(String),
    /// JSON body without a named schema.
    Untyped,
}

impl ReturnType {
    /// Returns the semantic type of the response body, or `None` for void.
    #[must_use]
    pub fn semantic(&self) -> Option<SemanticType> {
        match self {
            Self::Void => None,
            Self::Named(name) => Some(SemanticType::Named(name.clone())),
            Self::Untyped => Some(SemanticType::Unknown),
        }
    }
}

/// Parameter of an operation descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParamDescriptor {
    /// Name as declared in the contract.
    pub name: String,
    /// Mapped parameter type.
    pub semantic_type: SemanticType,
    /// Parameter location.
    pub location: ParameterLocation,
    /// Whether the caller must supply the parameter.
    pub required: bool,
}

/// Language-agnostic description of one contract operation.
///
/// # Invariants
/// - `return_type` is resolved only from 200/201 JSON responses.
/// - `params` keeps declaration order with path-level parameters first
///   unless overridden by the operation.
/// - Descriptors are never mutated after extraction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationDescriptor {
    /// Operation identifier.
    pub operation_id: String,
    /// HTTP verb.
    pub method: HttpMethod,
    /// Path template such as `/pets/{id}`.
    pub path_template: String,
    /// Operation summary.
    pub summary: Option<String>,
    /// Operation tags.
    pub tags: Vec<String>,
    /// True when the operation declares a request body.
    pub has_body: bool,
    /// Type of the JSON request body, when declared.
    pub body_type: Option<SemanticType>,
    /// Parameters in declaration order.
    pub params: Vec<ParamDescriptor>,
    /// Resolved return type.
    pub return_type: ReturnType,
}

impl OperationDescriptor {
    /// Returns parameters declared at a location, in declaration order.
    pub fn params_in(&self, location: ParameterLocation) -> impl Iterator<Item = &ParamDescriptor> {
        self.params.iter().filter(move |param| param.location == location)
    }

    /// Returns true when the path template has no `{param}` segment.
    #[must_use]
    pub fn is_collection_path(&self) -> bool {
        !self.path_template.contains('{')
    }
}

// ============================================================================
// SECTION: Extraction
// ============================================================================

/// Extracts operation descriptors from a contract.
///
/// # Errors
/// Returns [`ContractError::EmptyOperationSet`] when no operation survives
/// extraction and filtering.
pub fn extract(
    document: &ContractDocument,
    filter: Option<&OperationFilter>,
) -> Result<Vec<OperationDescriptor>, ContractError> {
    let mut descriptors = Vec::new();
    for entry in &document.paths {
        for (method, operation) in entry.item.operations() {
            let Some(operation_id) = operation.operation_id.as_deref() else {
                tracing::warn!(
                    path = %entry.template,
                    method = %method,
                    "skipping operation without operationId"
                );
                continue;
            };
            if let Some(filter) = filter
                && !filter.contains(operation_id)
            {
                continue;
            }
            let params = merge_params(&entry.item.parameters, &operation.parameters, operation_id);
            descriptors.push(OperationDescriptor {
                operation_id: operation_id.to_string(),
                method,
                path_template: entry.template.clone(),
                summary: operation.summary.clone(),
                tags: operation.tags.clone(),
                has_body: operation.request_body.is_some(),
                body_type: body_type(operation),
                params,
                return_type: return_type(operation),
            });
        }
    }
    if descriptors.is_empty() {
        let reason = match filter {
            Some(filter) => format!(
                "filter [{}] matched no operations",
                filter.iter().cloned().collect::<Vec<_>>().join(", ")
            ),
            None => "contract declares no operations with an operationId".to_string(),
        };
        return Err(ContractError::EmptyOperationSet(reason));
    }
    tracing::debug!(count = descriptors.len(), "extracted operations");
    Ok(descriptors)
}

/// Merges path-level and operation-level parameters.
///
/// Operation parameters override path-level ones with the same name and
/// location; unusable entries (missing name or location, unresolved `$ref`)
/// are skipped.
fn merge_params(
    shared: &[Parameter],
    own: &[Parameter],
    operation_id: &str,
) -> Vec<ParamDescriptor> {
    let own_params: Vec<ParamDescriptor> =
        own.iter().filter_map(|param| to_descriptor(param, operation_id)).collect();
    let mut merged: Vec<ParamDescriptor> = shared
        .iter()
        .filter_map(|param| to_descriptor(param, operation_id))
        .filter(|param| {
            !own_params
                .iter()
                .any(|other| other.name == param.name && other.location == param.location)
        })
        .collect();
    merged.extend(own_params);
    merged
}

/// Converts a parameter declaration into a descriptor when usable.
fn to_descriptor(param: &Parameter, operation_id: &str) -> Option<ParamDescriptor> {
    let (Some(name), Some(location)) = (param.name.as_ref(), param.location) else {
        tracing::warn!(
            operation = operation_id,
            reference = param.reference.as_deref().unwrap_or_default(),
            "skipping parameter without name or location"
        );
        return None;
    };
    if location == ParameterLocation::Other {
        tracing::warn!(operation = operation_id, param = %name, "skipping parameter location");
        return None;
    }
    let semantic_type = param.schema.as_ref().map_or(SemanticType::Unknown, map_type);
    Some(ParamDescriptor {
        name: name.clone(),
        semantic_type,
        location,
        required: param.required || location == ParameterLocation::Path,
    })
}

/// Resolves the request body type from its JSON media type.
fn body_type(operation: &OperationSpec) -> Option<SemanticType> {
    let body = operation.request_body.as_ref()?;
    let ty = match json_schema(&body.content) {
        Some(Some(schema)) => map_type(schema),
        Some(None) | None => SemanticType::Unknown,
    };
    Some(ty)
}

/// Resolves the return type from 200/201 JSON responses.
fn return_type(operation: &OperationSpec) -> ReturnType {
    for code in RETURN_STATUS_CODES {
        let Some(response) =
            operation.responses.iter().find(|(key, _)| key.as_str() == code).map(|(_, r)| r)
        else {
            continue;
        };
        match json_schema(&response.content) {
            Some(Some(schema)) => {
                return match map_type(schema) {
                    SemanticType::Named(name) => ReturnType::Named(name),
                    _ => ReturnType::Untyped,
                };
            }
            Some(None) => return ReturnType::Untyped,
            None => {}
        }
    }
    ReturnType::Void
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Renders a human-readable catalog of operations.
///
/// Used as a remediation hint when a planning request matches nothing.
#[must_use]
pub fn catalog(operations: &[OperationDescriptor]) -> String {
    let mut out = String::new();
    for operation in operations {
        let _ = write!(
            out,
            "{:<6} {} {}",
            operation.method.as_str(),
            operation.path_template,
            operation.operation_id
        );
        if let Some(summary) = operation.summary.as_deref().filter(|text| !text.trim().is_empty()) {
            out.push_str(": ");
            out.push_str(summary.trim());
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests;
