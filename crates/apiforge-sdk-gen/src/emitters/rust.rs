// crates/apiforge-sdk-gen/src/emitters/rust.rs
// ============================================================================
// Module: Rust Emitter
// Description: Renders a reqwest-based Rust client crate.
// Purpose: Emit src/main.rs, src/client.rs, and Cargo.toml.
// Dependencies: apiforge-contract
// ============================================================================

use std::collections::BTreeSet;

use apiforge_contract::OperationDescriptor;
use apiforge_contract::types::RUST;

use super::DocumentView;
use super::Emitter;
use super::LanguageRules;
use super::join_methods;
use super::referenced_names;
use crate::EmitContext;
use crate::FileSet;
use crate::SdkGenError;
use crate::naming;
use crate::templates::TemplateSet;

/// Keywords, client members, and method locals.
const RESERVED: &[&str] = &[
    "abstract", "as", "async", "await", "base_url", "become", "body", "body_json", "box",
    "break", "const", "continue", "crate", "do", "dyn", "else", "enum", "extern", "false",
    "final", "fn", "for", "headers", "if", "impl", "in", "let", "loop", "macro", "match", "mod",
    "move", "mut", "new", "override", "path", "priv", "pub", "query", "ref", "request_json",
    "request_text", "return", "self", "send", "static", "struct", "super", "trait", "true", "try",
    "type", "typeof", "unsafe", "unsized", "use", "value", "virtual", "where", "while", "yield",
];

/// Naming and typing rules for Rust.
const RULES: LanguageRules = LanguageRules {
    id: "rust",
    table: &RUST,
    param_case: naming::snake_case,
    method_case: naming::snake_case,
    reserved: RESERVED,
    method_reserved: RESERVED,
    comment: "//",
};

/// Emitter for Rust clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustEmitter;

impl Emitter for RustEmitter {
    fn language(&self) -> &'static str {
        "rust"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["rs"]
    }

    fn emit(
        &self,
        templates: &TemplateSet,
        operations: &[OperationDescriptor],
        context: &EmitContext,
    ) -> Result<FileSet, SdkGenError> {
        let mut method_names = BTreeSet::new();
        let mut methods = Vec::with_capacity(operations.len());
        for operation in operations {
            let parts = RULES.method_parts(templates, operation, &mut method_names)?;
            let mut view = parts.view;
            view.params = parts
                .args
                .iter()
                .map(|arg| {
                    if arg.optional {
                        format!(", {}: Option<{}>", arg.ident, arg.native)
                    } else {
                        format!(", {}: {}", arg.ident, arg.native)
                    }
                })
                .collect();
            if let Some(returns) = parts.returns {
                view.dispatch = "request_json".to_string();
                view.returns = returns;
            } else {
                view.dispatch = "request_text".to_string();
                view.returns = "String".to_string();
            }
            if let Some(body) = parts.body {
                view.body_prelude = format!(
                    "        let body_json = serde_json::to_value(&{body}).map_err(ApiError::Json)?;\n"
                );
                view.body = "Some(body_json)".to_string();
            } else {
                view.body = "None".to_string();
            }
            methods.push(templates.render("rust/method", &view)?);
        }

        let mut document = DocumentView::new(context);
        document.package.clone_from(&context.service_name);
        document.methods = join_methods(&methods);
        document.operations = RULES.operation_comments(operations);
        document.aliases = referenced_names(operations)
            .iter()
            .map(|name| format!("/// `{name}` schema.\npub type {name} = {};\n", RUST.alias_target))
            .collect();
        if !document.aliases.is_empty() {
            document.aliases.push('\n');
        }

        let mut files = FileSet::new();
        files.insert("src/main.rs".to_string(), templates.render("rust/entry", &document)?);
        files.insert("src/client.rs".to_string(), templates.render("rust/client", &document)?);
        files.insert("Cargo.toml".to_string(), templates.render("rust/manifest", &document)?);
        Ok(files)
    }
}
