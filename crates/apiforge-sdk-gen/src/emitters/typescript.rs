// crates/apiforge-sdk-gen/src/emitters/typescript.rs
// ============================================================================
// Module: TypeScript Emitter
// Description: Renders a fetch-based TypeScript client project.
// Purpose: Emit src/index.ts, src/api.ts, and package.json.
// Dependencies: apiforge-contract
// ============================================================================

use std::collections::BTreeSet;

use apiforge_contract::OperationDescriptor;
use apiforge_contract::types::TYPESCRIPT;

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

/// Reserved words plus locals used inside generated methods.
const RESERVED: &[&str] = &[
    "await", "body", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for",
    "function", "headers", "if", "implements", "import", "in", "instanceof", "interface", "let",
    "new", "null", "package", "path", "private", "protected", "public", "query", "return",
    "static", "super", "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while",
    "with", "yield",
];

/// Client members a generated method must not shadow.
const METHOD_RESERVED: &[&str] = &["constructor", "send", "requestJson", "requestText", "baseUrl"];

/// Naming and typing rules for TypeScript.
const RULES: LanguageRules = LanguageRules {
    id: "typescript",
    table: &TYPESCRIPT,
    param_case: naming::camel_case,
    method_case: naming::camel_case,
    reserved: RESERVED,
    method_reserved: METHOD_RESERVED,
    comment: "//",
};

/// Emitter for TypeScript clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptEmitter;

impl Emitter for TypeScriptEmitter {
    fn language(&self) -> &'static str {
        "typescript"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["ts"]
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
                        format!("{}?: {}", arg.ident, arg.native)
                    } else {
                        format!("{}: {}", arg.ident, arg.native)
                    }
                })
                .collect::<Vec<_>>()
                .join(", ");
            if let Some(returns) = parts.returns {
                view.dispatch = format!("requestJson<{returns}>");
                view.returns = format!("{returns} | undefined");
            } else {
                view.dispatch = "requestText".to_string();
                view.returns = "string | undefined".to_string();
            }
            view.body = parts.body.unwrap_or_else(|| "undefined".to_string());
            methods.push(templates.render("typescript/method", &view)?);
        }

        let mut document = DocumentView::new(context);
        document.methods = join_methods(&methods);
        document.operations = RULES.operation_comments(operations);
        document.aliases = referenced_names(operations)
            .iter()
            .map(|name| format!("export type {name} = {};\n", TYPESCRIPT.alias_target))
            .collect();
        if !document.aliases.is_empty() {
            document.aliases.push('\n');
        }

        let mut files = FileSet::new();
        files.insert("src/index.ts".to_string(), templates.render("typescript/entry", &document)?);
        files.insert("src/api.ts".to_string(), templates.render("typescript/client", &document)?);
        files.insert("package.json".to_string(), templates.render("typescript/manifest", &document)?);
        Ok(files)
    }
}
