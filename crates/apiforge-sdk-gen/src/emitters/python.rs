// crates/apiforge-sdk-gen/src/emitters/python.rs
// ============================================================================
// Module: Python Emitter
// Description: Renders a requests-based Python client project.
// Purpose: Emit main.py, api_client.py, and requirements.txt.
// Dependencies: apiforge-contract
// ============================================================================

use std::collections::BTreeSet;

use apiforge_contract::OperationDescriptor;
use apiforge_contract::types::PYTHON;

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

/// Keywords, client members, and locals used inside generated methods.
const RESERVED: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "base_url", "body", "break",
    "class", "continue", "def", "del", "elif", "else", "except", "finally", "for", "from",
    "global", "headers", "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass",
    "path", "query", "quote", "raise", "requests", "return", "self", "session", "timeout", "try",
    "while", "with", "yield",
];

/// Naming and typing rules for Python.
const RULES: LanguageRules = LanguageRules {
    id: "python",
    table: &PYTHON,
    param_case: naming::snake_case,
    method_case: naming::snake_case,
    reserved: RESERVED,
    method_reserved: RESERVED,
    comment: "#",
};

/// Emitter for Python clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonEmitter;

impl Emitter for PythonEmitter {
    fn language(&self) -> &'static str {
        "python"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["py"]
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
                        format!(", {}: Optional[{}] = None", arg.ident, arg.native)
                    } else {
                        format!(", {}: {}", arg.ident, arg.native)
                    }
                })
                .collect();
            if let Some(returns) = parts.returns {
                view.dispatch = "_request_json".to_string();
                view.returns = format!("Optional[{returns}]");
            } else {
                view.dispatch = "_request_text".to_string();
                view.returns = "Optional[str]".to_string();
            }
            view.body = parts.body.unwrap_or_else(|| "None".to_string());
            methods.push(templates.render("python/method", &view)?);
        }

        let mut document = DocumentView::new(context);
        document.methods = join_methods(&methods);
        document.operations = RULES.operation_comments(operations);
        document.aliases = referenced_names(operations)
            .iter()
            .map(|name| format!("{name} = {}\n", PYTHON.alias_target))
            .collect();
        if !document.aliases.is_empty() {
            document.aliases.push_str("\n\n");
        }

        let mut files = FileSet::new();
        files.insert("main.py".to_string(), templates.render("python/entry", &document)?);
        files.insert("api_client.py".to_string(), templates.render("python/client", &document)?);
        files.insert(
            "requirements.txt".to_string(),
            templates.render("python/manifest", &document)?,
        );
        Ok(files)
    }
}
