//! Filesystem side of generation.
//!
//! The emitter is the only component that writes to disk: it creates the
//! directory tree, copies the embedded static assets and writes rendered
//! template output. Regeneration is destructive by design; existing files
//! are overwritten without backup.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::assets::Bundle;
use mvcgen_schema::{Result, ScaffoldError, TemplateRenderer};

pub struct ProjectEmitter<'a> {
    renderer: &'a TemplateRenderer,
}

impl<'a> ProjectEmitter<'a> {
    pub fn new(renderer: &'a TemplateRenderer) -> Self {
        Self { renderer }
    }

    /// Idempotently create every directory in the set, ancestors included.
    pub fn ensure_directory_tree(&self, paths: &[PathBuf]) -> Result<()> {
        for path in paths {
            fs::create_dir_all(path).map_err(|source| ScaffoldError::DirectoryCreation {
                path: path.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Copy every bundled asset under `source_prefix` into `dest_dir`,
    /// preserving the relative structure and file bytes exactly.
    ///
    /// Returns the number of files copied.
    pub fn copy_static_assets(&self, source_prefix: &str, dest_dir: &Path) -> Result<usize> {
        let mut copied = 0;
        for path in Bundle::iter() {
            let Some(relative) = path.strip_prefix(source_prefix) else {
                continue;
            };
            let file = Bundle::get(&path).ok_or_else(|| ScaffoldError::AssetCopy {
                path: PathBuf::from(path.as_ref()),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing bundle entry"),
            })?;
            let mut out = dest_dir.to_path_buf();
            for component in relative.split('/') {
                out.push(component);
            }
            if let Some(parent) = out.parent() {
                fs::create_dir_all(parent).map_err(|source| ScaffoldError::AssetCopy {
                    path: out.clone(),
                    source,
                })?;
            }
            fs::write(&out, file.data.as_ref()).map_err(|source| ScaffoldError::AssetCopy {
                path: out.clone(),
                source,
            })?;
            copied += 1;
        }
        Ok(copied)
    }

    /// Render a template and write the result to `dest_dir/file_name`,
    /// creating the directory if absent and overwriting unconditionally.
    pub fn write_rendered<T: Serialize>(
        &self,
        template_id: &str,
        context: &T,
        dest_dir: &Path,
        file_name: &str,
    ) -> Result<PathBuf> {
        let body = self.renderer.render(template_id, context)?;
        fs::create_dir_all(dest_dir).map_err(|source| ScaffoldError::DirectoryCreation {
            path: dest_dir.to_path_buf(),
            source,
        })?;
        let path = dest_dir.join(file_name);
        fs::write(&path, body)?;
        Ok(path)
    }
}
