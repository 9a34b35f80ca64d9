// crates/apiforge-sdk-gen/src/emitters/java.rs
// ============================================================================
// Module: Java Emitter
// Description: Renders a java.net.http-based Java client project.
// Purpose: Emit Main.java, the client class, and pom.xml.
// Dependencies: apiforge-contract
// ============================================================================

use std::collections::BTreeSet;

use apiforge_contract::OperationDescriptor;
use apiforge_contract::types::JAVA;

use super::DocumentView;
use super::Emitter;
use super::LanguageRules;
use super::join_methods;
use crate::EmitContext;
use crate::FileSet;
use crate::SdkGenError;
use crate::naming;
use crate::templates::TemplateSet;

/// Keywords, literals, client members, and method locals.
const RESERVED: &[&str] = &[
    "abstract", "assert", "body", "boolean", "break", "byte", "case", "catch", "char", "class",
    "const", "continue", "default", "do", "double", "else", "encode", "enum", "extends", "false",
    "final", "finally", "float", "for", "getBaseUrl", "goto", "headers", "if", "implements",
    "import", "instanceof", "int", "interface", "long", "native", "new", "null", "package",
    "path", "private", "protected", "public", "query", "requestJson", "requestText", "return",
    "send", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "var", "void", "volatile", "while",
];

/// Naming and typing rules for Java.
const RULES: LanguageRules = LanguageRules {
    id: "java",
    table: &JAVA,
    param_case: naming::camel_case,
    method_case: naming::camel_case,
    reserved: RESERVED,
    method_reserved: RESERVED,
    comment: "//",
};

/// Emitter for Java clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaEmitter;

impl Emitter for JavaEmitter {
    fn language(&self) -> &'static str {
        "java"
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
                .map(|arg| format!("{} {}", arg.native, arg.ident))
                .collect::<Vec<_>>()
                .join(", ");
            if let Some(returns) = parts.returns {
                view.dispatch = "requestJson".to_string();
                view.type_arg = format!(", {returns}.class");
                view.returns = returns;
            } else {
                view.dispatch = "requestText".to_string();
                view.returns = "String".to_string();
            }
            view.body = parts.body.unwrap_or_else(|| "null".to_string());
            methods.push(templates.render("java/method", &view)?);
        }

        let mut document = DocumentView::new(context);
        document.package.clone_from(&context.package_name);
        document.methods = join_methods(&methods);
        document.operations = RULES.operation_comments(operations);

        let source_dir = format!("src/main/java/{}", context.package_name.replace('.', "/"));
        let mut files = FileSet::new();
        files.insert(format!("{source_dir}/Main.java"), templates.render("java/entry", &document)?);
        files.insert(
            format!("{source_dir}/{}.java", context.api_class_name),
            templates.render("java/client", &document)?,
        );
        files.insert("pom.xml".to_string(), templates.render("java/manifest", &document)?);
        Ok(files)
    }
}
