// crates/apiforge-sdk-gen/src/emitters/go.rs
// ============================================================================
// Module: Go Emitter
// Description: Renders a net/http-based Go client module.
// Purpose: Emit main.go, client/client.go, and go.mod.
// Dependencies: apiforge-contract
// ============================================================================

use std::collections::BTreeSet;

use apiforge_contract::OperationDescriptor;
use apiforge_contract::types::GO;

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

/// Keywords, predeclared names, imported packages, and method locals.
const RESERVED: &[&str] = &[
    "append", "body", "bool", "break", "bytes", "c", "case", "chan", "const", "continue", "data",
    "default", "defer", "else", "err", "error", "fallthrough", "false", "fmt", "for", "func",
    "go", "goto", "headers", "http", "if", "import", "int", "interface", "io", "json", "len",
    "map", "nil", "package", "path", "query", "range", "result", "return", "select", "status",
    "string", "strings", "struct", "switch", "time", "true", "type", "url", "var",
];

/// Naming and typing rules for Go.
const RULES: LanguageRules = LanguageRules {
    id: "go",
    table: &GO,
    param_case: naming::camel_case,
    method_case: naming::pascal_case,
    reserved: RESERVED,
    method_reserved: &[],
    comment: "//",
};

/// Emitter for Go clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoEmitter;

impl Emitter for GoEmitter {
    fn language(&self) -> &'static str {
        "go"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["golang"]
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
            view.owner = context.api_class_name.clone();
            // Optional arguments are pointers so nil marks absence.
            view.params = parts
                .args
                .iter()
                .map(|arg| {
                    if arg.optional {
                        format!("{} *{}", arg.ident, arg.native)
                    } else {
                        format!("{} {}", arg.ident, arg.native)
                    }
                })
                .collect::<Vec<_>>()
                .join(", ");
            if let Some(returns) = parts.returns {
                view.returns = returns;
                view.zero = "nil".to_string();
            } else {
                view.returns = "string".to_string();
                view.zero = "\"\"".to_string();
            }
            view.body = parts.body.unwrap_or_else(|| "nil".to_string());
            methods.push(templates.render("go/method", &view)?);
        }

        let mut document = DocumentView::new(context);
        document.package.clone_from(&context.service_name);
        document.methods = join_methods(&methods);
        document.operations = RULES.operation_comments(operations);
        document.aliases = referenced_names(operations)
            .iter()
            .map(|name| format!("type {name} = {}\n", GO.alias_target))
            .collect();
        if !document.aliases.is_empty() {
            document.aliases.push('\n');
        }

        let mut files = FileSet::new();
        files.insert("main.go".to_string(), templates.render("go/entry", &document)?);
        files.insert("client/client.go".to_string(), templates.render("go/client", &document)?);
        files.insert("go.mod".to_string(), templates.render("go/manifest", &document)?);
        Ok(files)
    }
}
