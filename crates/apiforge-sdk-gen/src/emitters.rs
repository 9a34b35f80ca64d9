// crates/apiforge-sdk-gen/src/emitters.rs
// ============================================================================
// Module: Emitter Registry
// Description: Emitter trait, language registry, and shared render views.
// Purpose: Dispatch emission by language id without per-language switches.
// Dependencies: apiforge-contract, serde, tracing
// ============================================================================

//! ## Overview
//! An [`Emitter`] turns operation descriptors into a [`FileSet`] for one
//! language. [`EmitterRegistry`] maps canonical ids and aliases to emitters
//! and owns the [`TemplateSet`] they render with.
//!
//! The helpers below build the language-neutral parts of a client method
//! (argument order, identifier escaping, path/query/header fragments) so each
//! language module only supplies its naming rules and signature syntax.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::OnceLock;

use apiforge_contract::OperationDescriptor;
use apiforge_contract::ParameterLocation;
use apiforge_contract::ProjectionTable;
use apiforge_contract::SemanticType;
use apiforge_contract::project;
use serde::Serialize;

use crate::EmitContext;
use crate::FileSet;
use crate::SdkGenError;
use crate::naming;
use crate::templates::TemplateSet;

mod go;
mod java;
mod python;
mod rust;
mod typescript;

pub use go::GoEmitter;
pub use java::JavaEmitter;
pub use python::PythonEmitter;
pub use rust::RustEmitter;
pub use typescript::TypeScriptEmitter;

// ============================================================================
// SECTION: Emitter Trait
// ============================================================================

/// Renders the file set for one target language.
pub trait Emitter: Send + Sync {
    /// Canonical language id.
    fn language(&self) -> &'static str;

    /// Alternate ids resolving to this emitter.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Emits the file set for `operations`.
    ///
    /// # Errors
    /// Returns [`SdkGenError::Template`] when rendering fails.
    fn emit(
        &self,
        templates: &TemplateSet,
        operations: &[OperationDescriptor],
        context: &EmitContext,
    ) -> Result<FileSet, SdkGenError>;
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Language id to emitter mapping.
///
/// # Invariants
/// - Ids and aliases are lowercase and resolve to exactly one emitter.
pub struct EmitterRegistry {
    /// Templates shared by every emitter.
    templates: TemplateSet,
    /// Emitters keyed by canonical id.
    emitters: BTreeMap<&'static str, Box<dyn Emitter>>,
    /// Alias to canonical id.
    aliases: BTreeMap<&'static str, &'static str>,
}

impl EmitterRegistry {
    /// Builds a registry with the built-in emitters.
    ///
    /// # Errors
    /// Returns [`SdkGenError::Template`] when a built-in template fails to
    /// compile.
    pub fn builtin() -> Result<Self, SdkGenError> {
        let mut registry = Self {
            templates: TemplateSet::builtin()?,
            emitters: BTreeMap::new(),
            aliases: BTreeMap::new(),
        };
        registry.register(Box::new(TypeScriptEmitter));
        registry.register(Box::new(PythonEmitter));
        registry.register(Box::new(GoEmitter));
        registry.register(Box::new(JavaEmitter));
        registry.register(Box::new(RustEmitter));
        Ok(registry)
    }

    /// Returns the process-wide built-in registry, compiling it on first use.
    ///
    /// # Errors
    /// Returns [`SdkGenError::Template`] when a built-in template fails to
    /// compile; the failure is cached.
    pub fn shared() -> Result<&'static Self, SdkGenError> {
        static SHARED: OnceLock<Result<EmitterRegistry, String>> = OnceLock::new();
        SHARED
            .get_or_init(|| Self::builtin().map_err(|err| err.to_string()))
            .as_ref()
            .map_err(|err| SdkGenError::Template(err.clone()))
    }

    /// Registers an emitter and its aliases, replacing any previous owner.
    pub fn register(&mut self, emitter: Box<dyn Emitter>) {
        let language = emitter.language();
        for alias in emitter.aliases() {
            self.aliases.insert(alias, language);
        }
        self.emitters.insert(language, emitter);
    }

    /// Resolves a language id or alias to its canonical id.
    ///
    /// # Errors
    /// Returns [`SdkGenError::UnsupportedLanguage`] for unknown ids.
    pub fn resolve(&self, language: &str) -> Result<&'static str, SdkGenError> {
        let lower = language.trim().to_ascii_lowercase();
        if let Some((id, _)) = self.emitters.get_key_value(lower.as_str()) {
            return Ok(id);
        }
        self.aliases
            .get(lower.as_str())
            .copied()
            .ok_or_else(|| SdkGenError::UnsupportedLanguage(language.to_string()))
    }

    /// Resolves ids and aliases to canonical ids, dropping repeats while
    /// keeping first-seen order.
    ///
    /// # Errors
    /// Returns [`SdkGenError::UnsupportedLanguage`] for the first unknown id.
    pub fn canonical(&self, languages: &[String]) -> Result<Vec<&'static str>, SdkGenError> {
        let mut seen = BTreeSet::new();
        let mut resolved = Vec::with_capacity(languages.len());
        for language in languages {
            let id = self.resolve(language)?;
            if seen.insert(id) {
                resolved.push(id);
            }
        }
        Ok(resolved)
    }

    /// Returns the canonical ids in sorted order.
    pub fn languages(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.emitters.keys().copied()
    }

    /// Emits the file set for `language`.
    ///
    /// # Errors
    /// Returns [`SdkGenError::UnsupportedLanguage`] for unknown languages and
    /// [`SdkGenError::Template`] when rendering fails.
    pub fn emit(
        &self,
        language: &str,
        operations: &[OperationDescriptor],
        context: &EmitContext,
    ) -> Result<FileSet, SdkGenError> {
        let id = self.resolve(language)?;
        let emitter =
            self.emitters.get(id).ok_or_else(|| SdkGenError::UnsupportedLanguage(id.to_string()))?;
        let files = emitter.emit(&self.templates, operations, context)?;
        tracing::debug!(
            language = id,
            operations = operations.len(),
            files = files.len(),
            "emitted file set"
        );
        Ok(files)
    }
}

// ============================================================================
// SECTION: Render Views
// ============================================================================

/// Bindings for document-level templates (client, entry, manifest).
///
/// Every field is always present so strict rendering never trips on a
/// language that leaves one empty.
#[derive(Debug, Clone, Default, Serialize)]
pub(crate) struct DocumentView {
    /// Contract title.
    pub title: String,
    /// Contract version.
    pub version: String,
    /// Service name.
    pub service_name: String,
    /// Client class name.
    pub class_name: String,
    /// Default base URL.
    pub base_url: String,
    /// Language package or module path.
    pub package: String,
    /// Pre-rendered operation comment lines.
    pub operations: String,
    /// Pre-rendered client methods.
    pub methods: String,
    /// Pre-rendered named type aliases.
    pub aliases: String,
}

impl DocumentView {
    /// Builds the shared document fields from a context.
    pub(crate) fn new(context: &EmitContext) -> Self {
        Self {
            title: context.title.clone(),
            version: context.version.clone(),
            service_name: context.service_name.clone(),
            class_name: context.api_class_name.clone(),
            base_url: context.base_url.clone(),
            ..Self::default()
        }
    }
}

/// Bindings for one client method.
#[derive(Debug, Clone, Default, Serialize)]
pub(crate) struct MethodView {
    /// Type owning the method.
    pub owner: String,
    /// Method identifier.
    pub name: String,
    /// One-line documentation.
    pub doc: String,
    /// Path template.
    pub path: String,
    /// Upper-case HTTP verb.
    pub verb: String,
    /// Rendered parameter list.
    pub params: String,
    /// Rendered return type.
    pub returns: String,
    /// Dispatch helper invoked by the method.
    pub dispatch: String,
    /// Body argument expression.
    pub body: String,
    /// Statements preparing the body argument.
    pub body_prelude: String,
    /// Extra dispatch argument (Java response class).
    pub type_arg: String,
    /// Value returned for no-content responses (Go).
    pub zero: String,
    /// True when the response body is decoded as JSON.
    pub typed: bool,
    /// True when the operation has query parameters.
    pub has_query: bool,
    /// Rendered path substitutions.
    pub path_params: String,
    /// Rendered query appends.
    pub query_params: String,
    /// Rendered header assignments.
    pub header_params: String,
}

/// Bindings for one path, query, or header parameter fragment.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ParamView {
    /// Argument identifier.
    pub ident: String,
    /// Wire name.
    pub wire: String,
    /// `{name}` placeholder in the path template.
    pub placeholder: String,
    /// True when the argument may be absent.
    pub optional: bool,
}

// ============================================================================
// SECTION: Language Rules
// ============================================================================

/// Naming and typing rules for one language.
pub(crate) struct LanguageRules {
    /// Template id prefix.
    pub id: &'static str,
    /// Projection table.
    pub table: &'static ProjectionTable,
    /// Case conversion for arguments.
    pub param_case: fn(&str) -> String,
    /// Case conversion for methods.
    pub method_case: fn(&str) -> String,
    /// Words that cannot be used as arguments (keywords and locals).
    pub reserved: &'static [&'static str],
    /// Words that cannot be used as method names.
    pub method_reserved: &'static [&'static str],
    /// Line comment prefix.
    pub comment: &'static str,
}

/// One method argument in signature order.
#[derive(Debug, Clone)]
pub(crate) struct Arg {
    /// Argument identifier.
    pub ident: String,
    /// Native type name.
    pub native: String,
    /// True when the argument may be absent.
    pub optional: bool,
}

/// Language-neutral pieces of a client method.
pub(crate) struct MethodParts {
    /// Partially filled bindings.
    pub view: MethodView,
    /// Arguments in signature order (path, body, required, optional).
    pub args: Vec<Arg>,
    /// Body argument identifier when the operation has a body.
    pub body: Option<String>,
    /// Projected return type, `None` for void.
    pub returns: Option<String>,
}

impl LanguageRules {
    /// Projects a semantic type.
    pub(crate) fn project(&self, ty: &SemanticType) -> String {
        project(ty, self.table)
    }

    /// Builds the language-neutral parts of one method.
    ///
    /// Arguments are ordered path parameters, body, required query/header
    /// parameters, then optional ones; each group keeps declaration order.
    /// Cookie parameters are not rendered.
    pub(crate) fn method_parts(
        &self,
        templates: &TemplateSet,
        operation: &OperationDescriptor,
        method_names: &mut BTreeSet<String>,
    ) -> Result<MethodParts, SdkGenError> {
        let name = naming::identifier(
            (self.method_case)(&operation.operation_id),
            "operation",
            self.method_reserved,
            method_names,
        );
        let mut taken = BTreeSet::new();
        let mut path_args = Vec::new();
        let mut required_args = Vec::new();
        let mut optional_args = Vec::new();
        let mut path_views = Vec::new();
        let mut query_views = Vec::new();
        let mut header_views = Vec::new();
        for param in &operation.params {
            if param.location == ParameterLocation::Cookie {
                tracing::debug!(
                    operation = %operation.operation_id,
                    param = %param.name,
                    "cookie parameter not rendered"
                );
                continue;
            }
            let ident = naming::identifier(
                (self.param_case)(&param.name),
                "arg",
                self.reserved,
                &mut taken,
            );
            let optional = !param.required;
            let arg = Arg {
                ident: ident.clone(),
                native: self.project(&param.semantic_type),
                optional,
            };
            let view = ParamView {
                ident,
                wire: naming::inline_text(&param.name),
                placeholder: format!("{{{}}}", param.name),
                optional,
            };
            match param.location {
                ParameterLocation::Path => {
                    path_args.push(arg);
                    path_views.push(view);
                }
                ParameterLocation::Query => {
                    push_by_presence(arg, &mut required_args, &mut optional_args);
                    query_views.push(view);
                }
                ParameterLocation::Header => {
                    push_by_presence(arg, &mut required_args, &mut optional_args);
                    header_views.push(view);
                }
                ParameterLocation::Cookie | ParameterLocation::Other => {}
            }
        }
        let mut args = path_args;
        let mut body = None;
        if operation.has_body {
            let body_type = operation.body_type.clone().unwrap_or(SemanticType::Unknown);
            let ident = naming::identifier("body".to_string(), "body", &[], &mut taken);
            body = Some(ident.clone());
            args.push(Arg {
                ident,
                native: self.project(&body_type),
                optional: false,
            });
        }
        args.extend(required_args);
        args.extend(optional_args);

        let returns = operation.return_type.semantic().map(|ty| self.project(&ty));
        let view = MethodView {
            name,
            doc: method_doc(operation),
            path: naming::inline_text(&operation.path_template),
            verb: operation.method.as_str().to_string(),
            typed: returns.is_some(),
            has_query: !query_views.is_empty(),
            path_params: templates.render_each(&format!("{}/path_param", self.id), &path_views)?,
            query_params: templates
                .render_each(&format!("{}/query_param", self.id), &query_views)?,
            header_params: templates
                .render_each(&format!("{}/header_param", self.id), &header_views)?,
            ..MethodView::default()
        };
        Ok(MethodParts {
            view,
            args,
            body,
            returns,
        })
    }

    /// Renders the operation listing used by entry points.
    pub(crate) fn operation_comments(&self, operations: &[OperationDescriptor]) -> String {
        operations
            .iter()
            .map(|operation| {
                let mut line = format!(
                    "{}   {} {} {}",
                    self.comment,
                    operation.method.as_str(),
                    naming::inline_text(&operation.path_template),
                    operation.operation_id
                );
                if let Some(summary) = summary_text(operation) {
                    line.push_str(": ");
                    line.push_str(&summary);
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Routes an argument by whether it must be supplied.
fn push_by_presence(arg: Arg, required: &mut Vec<Arg>, optional: &mut Vec<Arg>) {
    if arg.optional {
        optional.push(arg);
    } else {
        required.push(arg);
    }
}

/// Returns the trimmed one-line summary, if any.
fn summary_text(operation: &OperationDescriptor) -> Option<String> {
    operation.summary.as_deref().map(naming::inline_text).filter(|text| !text.is_empty())
}

/// Returns the method documentation line.
fn method_doc(operation: &OperationDescriptor) -> String {
    summary_text(operation).unwrap_or_else(|| {
        format!(
            "{} {}",
            operation.method.as_str(),
            naming::inline_text(&operation.path_template)
        )
    })
}

/// Collects every named schema referenced by the operations.
pub(crate) fn referenced_names(operations: &[OperationDescriptor]) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for operation in operations {
        for param in &operation.params {
            param.semantic_type.collect_named(&mut names);
        }
        if let Some(body) = &operation.body_type {
            body.collect_named(&mut names);
        }
        if let Some(ty) = operation.return_type.semantic() {
            ty.collect_named(&mut names);
        }
    }
    names
}

/// Joins rendered method fragments with one blank line between them.
pub(crate) fn join_methods(methods: &[String]) -> String {
    methods.iter().map(|method| method.trim_end_matches('\n')).collect::<Vec<_>>().join("\n\n")
}
