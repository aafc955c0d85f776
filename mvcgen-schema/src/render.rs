//! Template rendering.
//!
//! Thin wrapper around handlebars with strict mode enabled: a placeholder
//! the context does not provide fails the render call instead of silently
//! producing a hole in the generated source. The renderer never touches the
//! filesystem; template bodies are registered by the caller.

use handlebars::Handlebars;
use serde::Serialize;

use crate::{naming, Result, ScaffoldError};

pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl TemplateRenderer {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_helper("camel_case", Box::new(camel_case_helper));
        handlebars.register_helper("pascal_case", Box::new(pascal_case_helper));
        Self { handlebars }
    }

    /// Register a named template body. Fails on malformed template syntax.
    pub fn register(&mut self, name: &str, body: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, body)
            .map_err(ScaffoldError::TemplateSyntax)
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }

    /// Render a registered template against a context.
    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<String> {
        if !self.handlebars.has_template(name) {
            return Err(ScaffoldError::TemplateNotFound(name.to_string()));
        }
        self.handlebars
            .render(name, context)
            .map_err(ScaffoldError::Render)
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn camel_case_helper(
    h: &handlebars::Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn handlebars::Output,
) -> handlebars::HelperResult {
    let param = h
        .param(0)
        .and_then(|p| p.value().as_str().map(|s| s.to_string()))
        .ok_or_else(|| handlebars::RenderError::new("camel_case requires a string parameter"))?;
    out.write(&naming::to_camel_case(&param))?;
    Ok(())
}

fn pascal_case_helper(
    h: &handlebars::Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn handlebars::Output,
) -> handlebars::HelperResult {
    let param = h
        .param(0)
        .and_then(|p| p.value().as_str().map(|s| s.to_string()))
        .ok_or_else(|| handlebars::RenderError::new("pascal_case requires a string parameter"))?;
    out.write(&naming::to_pascal_case(&param))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_simple_placeholder() {
        let mut renderer = TemplateRenderer::new();
        renderer.register("greeting", "Hello, {{name}}!").unwrap();
        let out = renderer.render("greeting", &json!({ "name": "world" })).unwrap();
        assert_eq!(out, "Hello, world!");
    }

    #[test]
    fn test_render_nested_access_and_iteration() {
        let mut renderer = TemplateRenderer::new();
        renderer
            .register(
                "fields",
                "{{table.class_name}}:{{#each table.columns}} {{this.field_name}}{{/each}}",
            )
            .unwrap();
        let context = json!({
            "table": {
                "class_name": "User",
                "columns": [
                    { "field_name": "id" },
                    { "field_name": "name" },
                    { "field_name": "createdAt" },
                ]
            }
        });
        let out = renderer.render("fields", &context).unwrap();
        assert_eq!(out, "User: id name createdAt");
    }

    #[test]
    fn test_missing_placeholder_is_an_error() {
        let mut renderer = TemplateRenderer::new();
        renderer.register("t", "{{present}} {{absent}}").unwrap();
        let err = renderer
            .render("t", &json!({ "present": "x" }))
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::Render(_)));
    }

    #[test]
    fn test_malformed_template_is_a_syntax_error() {
        let mut renderer = TemplateRenderer::new();
        let err = renderer.register("bad", "{{#each items}}no close").unwrap_err();
        assert!(matches!(err, ScaffoldError::TemplateSyntax(_)));
    }

    #[test]
    fn test_unknown_template_id() {
        let renderer = TemplateRenderer::new();
        let err = renderer.render("nope", &json!({})).unwrap_err();
        assert!(matches!(err, ScaffoldError::TemplateNotFound(_)));
    }

    #[test]
    fn test_case_helpers() {
        let mut renderer = TemplateRenderer::new();
        renderer
            .register("h", "{{pascal_case name}}/{{camel_case name}}")
            .unwrap();
        let out = renderer.render("h", &json!({ "name": "user_id" })).unwrap();
        assert_eq!(out, "UserId/userId");
    }
}
