// crates/apiforge-sdk-gen/src/templates.rs
// ============================================================================
// Module: Template Set
// Description: Declarative handlebars templates for every emitted file.
// Purpose: Render generated artifacts from bindings instead of concatenation.
// Dependencies: handlebars, serde
// ============================================================================

//! ## Overview
//! [`TemplateSet`] registers the built-in templates once, in strict mode and
//! without HTML escaping. Template ids are `<language>/<name>`. Templates use
//! plain interpolation and inline `#if` blocks; repeated fragments such as
//! methods are rendered separately and bound as pre-rendered text.

use handlebars::Handlebars;
use serde::Serialize;

use crate::SdkGenError;

// ============================================================================
// CONSTANTS: Built-in templates
// ============================================================================

/// Built-in template sources keyed by template id.
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("typescript/client", include_str!("../templates/typescript/client.hbs")),
    ("typescript/method", include_str!("../templates/typescript/method.hbs")),
    ("typescript/path_param", include_str!("../templates/typescript/path_param.hbs")),
    ("typescript/query_param", include_str!("../templates/typescript/query_param.hbs")),
    ("typescript/header_param", include_str!("../templates/typescript/header_param.hbs")),
    ("typescript/entry", include_str!("../templates/typescript/entry.hbs")),
    ("typescript/manifest", include_str!("../templates/typescript/manifest.hbs")),
    ("python/client", include_str!("../templates/python/client.hbs")),
    ("python/method", include_str!("../templates/python/method.hbs")),
    ("python/path_param", include_str!("../templates/python/path_param.hbs")),
    ("python/query_param", include_str!("../templates/python/query_param.hbs")),
    ("python/header_param", include_str!("../templates/python/header_param.hbs")),
    ("python/entry", include_str!("../templates/python/entry.hbs")),
    ("python/manifest", include_str!("../templates/python/manifest.hbs")),
    ("go/client", include_str!("../templates/go/client.hbs")),
    ("go/method", include_str!("../templates/go/method.hbs")),
    ("go/path_param", include_str!("../templates/go/path_param.hbs")),
    ("go/query_param", include_str!("../templates/go/query_param.hbs")),
    ("go/header_param", include_str!("../templates/go/header_param.hbs")),
    ("go/entry", include_str!("../templates/go/entry.hbs")),
    ("go/manifest", include_str!("../templates/go/manifest.hbs")),
    ("java/client", include_str!("../templates/java/client.hbs")),
    ("java/method", include_str!("../templates/java/method.hbs")),
    ("java/path_param", include_str!("../templates/java/path_param.hbs")),
    ("java/query_param", include_str!("../templates/java/query_param.hbs")),
    ("java/header_param", include_str!("../templates/java/header_param.hbs")),
    ("java/entry", include_str!("../templates/java/entry.hbs")),
    ("java/manifest", include_str!("../templates/java/manifest.hbs")),
    ("rust/client", include_str!("../templates/rust/client.hbs")),
    ("rust/method", include_str!("../templates/rust/method.hbs")),
    ("rust/path_param", include_str!("../templates/rust/path_param.hbs")),
    ("rust/query_param", include_str!("../templates/rust/query_param.hbs")),
    ("rust/header_param", include_str!("../templates/rust/header_param.hbs")),
    ("rust/entry", include_str!("../templates/rust/entry.hbs")),
    ("rust/manifest", include_str!("../templates/rust/manifest.hbs")),
];

// ============================================================================
// SECTION: Template Set
// ============================================================================

/// Registered templates available to emitters.
///
/// # Invariants
/// - Strict mode is on: a binding missing from the data fails the render.
/// - Output is never HTML-escaped.
pub struct TemplateSet {
    /// Handlebars registry holding every template.
    registry: Handlebars<'static>,
}

impl TemplateSet {
    /// Builds the set with the built-in templates.
    ///
    /// # Errors
    /// Returns [`SdkGenError::Template`] when a template fails to compile.
    pub fn builtin() -> Result<Self, SdkGenError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        for (id, source) in BUILTIN_TEMPLATES {
            registry
                .register_template_string(id, *source)
                .map_err(|err| SdkGenError::Template(format!("{id}: {err}")))?;
        }
        Ok(Self {
            registry,
        })
    }

    /// Renders the template `id` with `bindings`.
    ///
    /// # Errors
    /// Returns [`SdkGenError::Template`] for unknown ids and render failures,
    /// including bindings missing under strict mode.
    pub fn render<T: Serialize>(&self, id: &str, bindings: &T) -> Result<String, SdkGenError> {
        if !self.registry.has_template(id) {
            return Err(SdkGenError::Template(format!("unknown template {id}")));
        }
        self.registry
            .render(id, bindings)
            .map_err(|err| SdkGenError::Template(format!("{id}: {err}")))
    }

    /// Renders each item with `id` and concatenates the results.
    ///
    /// # Errors
    /// Returns [`SdkGenError::Template`] when any render fails.
    pub fn render_each<T: Serialize>(&self, id: &str, items: &[T]) -> Result<String, SdkGenError> {
        let mut out = String::new();
        for item in items {
            out.push_str(&self.render(id, item)?);
        }
        Ok(out)
    }

    /// Returns the registered template ids in sorted order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.registry.get_templates().keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
