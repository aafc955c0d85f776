//! Embedded template and static asset bundle.
//!
//! Everything under `templates/` ships inside the binary: `tpl/*.hbs` are
//! the named templates, `static/` and `views/` are copied byte-for-byte
//! into the generated project.

use rust_embed::RustEmbed;

use mvcgen_schema::{Result, ScaffoldError, TemplateRenderer};

#[derive(RustEmbed)]
#[folder = "templates/"]
pub struct Bundle;

const TEMPLATE_PREFIX: &str = "tpl/";
const TEMPLATE_SUFFIX: &str = ".hbs";

/// Build a renderer with every bundled template registered.
///
/// Template ids are the file names without the `tpl/` prefix and `.hbs`
/// suffix, e.g. `tpl/model.java.hbs` registers as `model.java`. A bundled
/// template that fails to parse is a packaging defect and fails the run.
pub fn load_renderer() -> Result<TemplateRenderer> {
    let mut renderer = TemplateRenderer::new();
    for path in Bundle::iter() {
        let Some(name) = path
            .strip_prefix(TEMPLATE_PREFIX)
            .and_then(|p| p.strip_suffix(TEMPLATE_SUFFIX))
        else {
            continue;
        };
        let file = Bundle::get(&path)
            .ok_or_else(|| ScaffoldError::TemplateNotFound(path.to_string()))?;
        let body = std::str::from_utf8(file.data.as_ref()).map_err(|e| {
            ScaffoldError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("template {} is not UTF-8: {}", path, e),
            ))
        })?;
        renderer.register(name, body)?;
    }
    Ok(renderer)
}
