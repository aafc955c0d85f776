//! Generation pipeline.
//!
//! Orchestrates one full run: introspect the database, build the output
//! directory tree, copy static assets, emit the fixed project-level files
//! once, then one model and one controller per table. Connection and
//! skeleton failures abort the run; per-table failures skip that table and
//! the run continues.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde_json::json;

use crate::assets;
use crate::emitter::ProjectEmitter;
use crate::introspect::{self, Introspection};
use crate::layout::ProjectLayout;
use mvcgen_schema::{ConnectionSpec, ProjectMeta, Result, Table};

/// Outcome of a run, surfaced to the caller for reporting.
#[derive(Debug)]
pub struct GenerationReport {
    pub output_root: PathBuf,
    pub elapsed: Duration,
    /// Class names of the tables that were generated.
    pub generated: Vec<String>,
    /// Tables skipped by per-table failures, with the reason.
    pub skipped: Vec<(String, String)>,
    /// Non-fatal asset copy failures.
    pub asset_warnings: usize,
}

pub struct GenerationPipeline {
    meta: ProjectMeta,
    spec: ConnectionSpec,
}

impl GenerationPipeline {
    pub fn new(meta: ProjectMeta, spec: ConnectionSpec) -> Self {
        Self { meta, spec }
    }

    /// Run the whole pipeline. A connection failure aborts before any file
    /// is written.
    pub async fn generate(&self) -> Result<GenerationReport> {
        let started = Instant::now();
        let introspection = introspect::introspect(&self.spec, &self.meta).await?;
        self.emit_project(introspection, started)
    }

    /// Everything after introspection; filesystem work is synchronous.
    pub fn emit_project(
        &self,
        introspection: Introspection,
        started: Instant,
    ) -> Result<GenerationReport> {
        let layout = ProjectLayout::new(
            &self.meta.output_root,
            &self.meta.project_name,
            &self.meta.package_name,
        )?;
        let renderer = assets::load_renderer()?;
        let emitter = ProjectEmitter::new(&renderer);

        emitter.ensure_directory_tree(&layout.directory_tree())?;

        let mut asset_warnings = 0;
        for (prefix, dest) in [
            ("static/", layout.static_dir()),
            ("views/", layout.views_dir()),
        ] {
            match emitter.copy_static_assets(prefix, &dest) {
                Ok(count) => log::debug!("copied {} asset(s) into {}", count, dest.display()),
                Err(err) => {
                    log::warn!("static asset copy failed: {}", err);
                    asset_warnings += 1;
                }
            }
        }

        self.emit_config_files(&emitter, &layout, &introspection)?;

        let mut generated = Vec::new();
        let mut skipped: Vec<(String, String)> = introspection
            .skipped
            .into_iter()
            .map(|s| (s.table, s.reason))
            .collect();

        for table in &introspection.database.tables {
            match self.emit_table(&emitter, &layout, table) {
                Ok(()) => {
                    log::info!("generated model/controller for table {}", table.table_name);
                    generated.push(table.class_name.clone());
                }
                Err(err) => {
                    log::warn!("skipping table {}: {}", table.table_name, err);
                    skipped.push((table.table_name.clone(), err.to_string()));
                }
            }
        }

        Ok(GenerationReport {
            output_root: layout.project_root().to_path_buf(),
            elapsed: started.elapsed(),
            generated,
            skipped,
            asset_warnings,
        })
    }

    /// The fixed set of project-level files, each rendered exactly once.
    /// Templates are bundled, so a failure here is a packaging defect and
    /// fatal to the run.
    fn emit_config_files(
        &self,
        emitter: &ProjectEmitter,
        layout: &ProjectLayout,
        introspection: &Introspection,
    ) -> Result<()> {
        let context = json!({
            "project_name": self.meta.project_name,
            "package_name": self.meta.package_name,
            "database": {
                "name": introspection.database.name,
                "driver": self.spec.driver.as_str(),
                "jdbc_class": self.spec.driver.jdbc_class(),
                "url": self.spec.url,
                "username": self.spec.username,
            },
        });

        let files = [
            ("pom.xml", layout.project_root().to_path_buf(), "pom.xml"),
            ("package.xml", layout.project_root().to_path_buf(), "package.xml"),
            ("README.md", layout.project_root().to_path_buf(), "README.md"),
            ("app.properties", layout.resources().to_path_buf(), "app.properties"),
            ("Application.java", layout.package_root().to_path_buf(), "Application.java"),
            ("BaseConfig.java", layout.config_dir(), "BaseConfig.java"),
            ("TipException.java", layout.exception_dir(), "TipException.java"),
            ("IndexController.java", layout.controller_dir(), "IndexController.java"),
            ("BaseWebHook.java", layout.webhook_dir(), "BaseWebHook.java"),
        ];

        for (template_id, dir, file_name) in files {
            println!("📝 Creating {}", dir.join(file_name).display());
            emitter.write_rendered(template_id, &context, &dir, file_name)?;
        }
        Ok(())
    }

    fn emit_table(
        &self,
        emitter: &ProjectEmitter,
        layout: &ProjectLayout,
        table: &Table,
    ) -> Result<()> {
        let context = json!({ "table": table });
        emitter.write_rendered(
            "model.java",
            &context,
            &layout.model_dir(),
            &format!("{}.java", table.class_name),
        )?;
        emitter.write_rendered(
            "controller.java",
            &context,
            &layout.api_controller_dir(),
            &format!("{}Controller.java", table.class_name),
        )?;
        Ok(())
    }
}
