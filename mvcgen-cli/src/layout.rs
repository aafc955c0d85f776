//! Output path construction.
//!
//! All generated paths are composed here from the output root, the project
//! name and the package segments; nothing else in the tool concatenates
//! path strings. Project and package names are validated on construction.

use std::path::{Path, PathBuf};

use mvcgen_schema::{Result, ScaffoldError};

/// Directory layout of a generated project.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    project_root: PathBuf,
    package_root: PathBuf,
    resources: PathBuf,
}

impl ProjectLayout {
    pub fn new(output_root: &Path, project_name: &str, package_name: &str) -> Result<Self> {
        validate_segment(project_name)?;
        let project_root = output_root.join(project_name);
        let mut package_root = project_root.join("src").join("main").join("java");
        for segment in package_name.split('.') {
            validate_segment(segment)?;
            package_root.push(segment);
        }
        let resources = project_root.join("src").join("main").join("resources");
        Ok(Self {
            project_root,
            package_root,
            resources,
        })
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn package_root(&self) -> &Path {
        &self.package_root
    }

    pub fn resources(&self) -> &Path {
        &self.resources
    }

    pub fn static_dir(&self) -> PathBuf {
        self.resources.join("static")
    }

    pub fn views_dir(&self) -> PathBuf {
        self.resources.join("templates")
    }

    pub fn config_dir(&self) -> PathBuf {
        self.package_root.join("config")
    }

    pub fn exception_dir(&self) -> PathBuf {
        self.package_root.join("exception")
    }

    pub fn controller_dir(&self) -> PathBuf {
        self.package_root.join("controller")
    }

    pub fn api_controller_dir(&self) -> PathBuf {
        self.controller_dir().join("api")
    }

    pub fn model_dir(&self) -> PathBuf {
        self.package_root.join("model")
    }

    pub fn webhook_dir(&self) -> PathBuf {
        self.package_root.join("webhook")
    }

    /// Every directory the skeleton needs, ancestors included implicitly.
    pub fn directory_tree(&self) -> Vec<PathBuf> {
        vec![
            self.project_root.clone(),
            self.package_root.clone(),
            self.resources.clone(),
            self.static_dir(),
            self.views_dir(),
            self.config_dir(),
            self.exception_dir(),
            self.controller_dir(),
            self.api_controller_dir(),
            self.model_dir(),
            self.webhook_dir(),
        ]
    }
}

/// Project names and package segments: non-empty, no leading digit, and
/// only characters that are safe in both a path and a Java package.
fn validate_segment(segment: &str) -> Result<()> {
    let ok = !segment.is_empty()
        && !segment.chars().next().is_some_and(|c| c.is_ascii_digit())
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(ScaffoldError::InvalidIdentifier {
            raw: segment.to_string(),
            reason: "not a valid project/package segment".to_string(),
        })
    }
}
