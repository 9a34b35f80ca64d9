// crates/apiforge-sdk-gen/src/lib.rs
// ============================================================================
// Module: SDK Generator Library
// Description: Deterministic multi-language client generator for apiforge.
// Purpose: Render client, entry point, and manifest files from operation IR.
// Dependencies: apiforge-contract, handlebars, serde, thiserror, tracing
// ============================================================================

//! ## Overview
//! This crate renders ready-to-run client projects from the operation
//! descriptors produced by `apiforge-contract`. Each target language is an
//! [`Emitter`] registered in an [`EmitterRegistry`]; every emitter produces a
//! fixed [`FileSet`] (entry point, client module, build manifest) through the
//! shared [`TemplateSet`].
//!
//! ### Design Notes
//! - Output is deterministic: a [`FileSet`] is a pure function of the
//!   operations, the language, and the [`EmitContext`].
//! - Type names come only from the projection tables in
//!   `apiforge-contract`; emitters never map schema types themselves.
//! - Generated client modules carry [`NETWORK_CLIENT_MARKER`] so the
//!   guardrail scan exempts them.
//!
//! ## Index
//! - Public API: [`emit`], [`EmitterRegistry`], [`Emitter`], [`EmitContext`]
//! - Persistence: [`write_file_set`], [`check_file_set`]
//! - Utilities: [`naming`], [`TemplateSet`]

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod emitters;
pub mod naming;
pub mod output;
pub mod templates;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

use std::collections::BTreeMap;

pub use apiforge_contract::NETWORK_CLIENT_MARKER;
use apiforge_contract::ContractDocument;
use apiforge_contract::OperationDescriptor;
pub use emitters::Emitter;
pub use emitters::EmitterRegistry;
pub use output::check_file_set;
pub use output::write_file_set;
pub use templates::TemplateSet;
use thiserror::Error;

// ============================================================================
// CONSTANTS: Emission defaults
// ============================================================================

/// Base URL used when the contract declares no servers.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Service name used when the contract title yields no words.
pub const DEFAULT_SERVICE_NAME: &str = "api-client";

/// Package prefix for derived package names.
pub const DEFAULT_PACKAGE_PREFIX: &str = "com.example";

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Generated files keyed by relative path.
pub type FileSet = BTreeMap<String, String>;

/// Errors raised by the SDK generator.
///
/// # Invariants
/// - Variant meanings are stable for automation and tests.
///
/// # Examples
/// ```
/// use apiforge_sdk_gen::SdkGenError;
///
/// let err = SdkGenError::UnsupportedLanguage("cobol".to_string());
/// assert_eq!(err.to_string(), "unsupported language: cobol");
/// ```
#[derive(Debug, Error)]
pub enum SdkGenError {
    /// No emitter is registered for the requested language.
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    /// Template compilation or rendering failed.
    #[error("template error: {0}")]
    Template(String),
    /// IO error while reading or writing files.
    #[error("io error: {0}")]
    Io(String),
    /// On-disk output differs from the generated output.
    #[error("generated output drift: {0}")]
    Drift(String),
}

/// Document-level values shared by every emitted file.
///
/// # Invariants
/// - `service_name` is kebab-case and non-empty.
/// - `package_name` is a dotted identifier path.
/// - `api_class_name` is derived from `title` via [`naming::api_class_name`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitContext {
    /// Contract title.
    pub title: String,
    /// Contract version.
    pub version: String,
    /// Service name used for manifests and module paths.
    pub service_name: String,
    /// Package name used for Java packages.
    pub package_name: String,
    /// Default base URL baked into the client.
    pub base_url: String,
    /// Generated client class name.
    pub api_class_name: String,
}

impl EmitContext {
    /// Builds a context from a contract document.
    #[must_use]
    pub fn from_document(document: &ContractDocument) -> Self {
        let title = naming::inline_text(&document.info.title);
        let service_name = service_name_from(&title);
        let package_name = package_name_from(&service_name);
        let base_url = document.primary_server_url().map_or_else(
            || DEFAULT_BASE_URL.to_string(),
            |url| url.trim_end_matches('/').to_string(),
        );
        Self {
            api_class_name: naming::api_class_name(&title),
            title,
            version: naming::inline_text(&document.info.version),
            service_name,
            package_name,
            base_url: naming::inline_text(&base_url),
        }
    }

    /// Overrides the service name; blank names keep the derived one.
    #[must_use]
    pub fn with_service_name(mut self, name: &str) -> Self {
        let kebab = naming::kebab_case(name);
        if !kebab.is_empty() {
            self.package_name = package_name_from(&kebab);
            self.service_name = kebab;
        }
        self
    }

    /// Overrides the package name; blank names keep the derived one.
    #[must_use]
    pub fn with_package_name(mut self, name: &str) -> Self {
        let segments: Vec<String> = name
            .split('.')
            .map(naming::snake_case)
            .filter(|segment| !segment.is_empty())
            .collect();
        if !segments.is_empty() {
            self.package_name = segments.join(".");
        }
        self
    }

    /// Overrides the default base URL baked into clients.
    #[must_use]
    pub fn with_base_url(mut self, url: &str) -> Self {
        let url = naming::inline_text(url);
        if !url.is_empty() {
            self.base_url = url.trim_end_matches('/').to_string();
        }
        self
    }
}

/// Derives a kebab-case service name from a title.
fn service_name_from(title: &str) -> String {
    let kebab = naming::kebab_case(title);
    if kebab.is_empty() { DEFAULT_SERVICE_NAME.to_string() } else { kebab }
}

/// Derives a package name from a service name.
fn package_name_from(service_name: &str) -> String {
    let mut leaf = naming::snake_case(service_name).replace('_', "");
    if leaf.starts_with(|ch: char| ch.is_ascii_digit()) {
        leaf.insert(0, '_');
    }
    format!("{DEFAULT_PACKAGE_PREFIX}.{leaf}")
}

/// Emits the file set for one language with the shared built-in registry.
///
/// # Errors
/// Returns [`SdkGenError::UnsupportedLanguage`] for unknown languages and
/// [`SdkGenError::Template`] when rendering fails.
pub fn emit(
    operations: &[OperationDescriptor],
    language: &str,
    context: &EmitContext,
) -> Result<FileSet, SdkGenError> {
    EmitterRegistry::shared()?.emit(language, operations, context)
}

#[cfg(test)]
mod tests;
