//! # Materialize Module
//!
//! Places rendered artifacts under the application's pages root.
//!
//! | Target | File |
//! |--------|------|
//! | routed page `/orders/new` | `<pages>/orders/new/index.<ext>` |
//! | component `EditModal` of `/orders` | `<pages>/orders/components/EditModal/index.<ext>` |
//! | companion detail page | `<pages>/<detail_path>/index.<ext>`, default `<target>/detail` |
//!
//! Placement is two-phase. [`Materializer::plan`] resolves every path and
//! fails with `TargetExists` before anything is written if any target
//! directory already exists, and with `InvalidTarget` when a component's
//! owning page directory is missing. [`Materializer::write_all`] then creates the
//! directories and files; if a write fails, the directories this call
//! created are removed again.

use crate::error::{GenerateError, Result};
use crate::generator::{Artifact, ArtifactRole};
use crate::spec::{PageSpec, Target};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A file that is ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub role: ArtifactRole,
    /// Directory that must not exist yet
    pub dir: PathBuf,
    pub path: PathBuf,
    pub contents: String,
}

#[derive(Debug, Clone)]
pub struct Materializer {
    pages_root: PathBuf,
    extension: String,
}

impl Materializer {
    pub fn new(pages_root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Materializer {
            pages_root: pages_root.into(),
            extension: extension.into().trim_start_matches('.').to_string(),
        }
    }

    pub fn pages_root(&self) -> &Path {
        &self.pages_root
    }

    /// Directory of a routed page; `route_path` is a normalized `/a/b` path
    pub fn page_dir(&self, route_path: &str) -> PathBuf {
        route_path
            .split('/')
            .filter(|s| !s.is_empty())
            .fold(self.pages_root.clone(), |dir, segment| dir.join(segment))
    }

    /// Directory of a component nested under its owning page
    pub fn component_dir(&self, owner_path: &str, name: &str) -> PathBuf {
        self.page_dir(owner_path).join("components").join(name)
    }

    pub fn target_dir(&self, target: &Target) -> PathBuf {
        match target {
            Target::Page { path, .. } => self.page_dir(path),
            Target::Component { owner_path, name } => self.component_dir(owner_path, name),
        }
    }

    /// Directory of the companion detail page
    pub fn detail_dir(&self, spec: &PageSpec) -> PathBuf {
        match (&spec.detail_path, &spec.target) {
            (Some(path), _) => self.page_dir(path),
            (None, Target::Page { path, .. }) => self.page_dir(path).join("detail"),
            (None, Target::Component { owner_path, name }) => {
                self.component_dir(owner_path, &format!("{}Detail", name))
            }
        }
    }

    fn file_in(&self, dir: &Path) -> PathBuf {
        dir.join(format!("index.{}", self.extension))
    }

    /// Resolve where every artifact goes, failing if any target already exists
    ///
    /// A component is only ever added to a page that is already there.
    pub fn plan(&self, spec: &PageSpec, artifacts: Vec<Artifact>) -> Result<Vec<PlannedFile>> {
        if let Target::Component { owner_path, .. } = &spec.target {
            let owner = self.page_dir(owner_path);
            if !owner.is_dir() {
                return Err(GenerateError::InvalidTarget {
                    reason: format!("page {} does not exist", owner.display()),
                });
            }
        }
        let mut planned: Vec<PlannedFile> = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            let dir = match artifact.role {
                ArtifactRole::Primary => self.target_dir(&spec.target),
                ArtifactRole::Detail => self.detail_dir(spec),
            };
            if dir.exists() || planned.iter().any(|p| p.dir == dir) {
                return Err(GenerateError::TargetExists { path: dir });
            }
            debug!(dir = %dir.display(), role = ?artifact.role, "planned");
            planned.push(PlannedFile {
                role: artifact.role,
                path: self.file_in(&dir),
                dir,
                contents: artifact.source,
            });
        }
        Ok(planned)
    }

    /// Create directories and write every planned file, in order
    ///
    /// On failure, directories created by this call are removed before the
    /// error is returned.
    pub fn write_all(&self, plan: &[PlannedFile]) -> Result<Vec<PathBuf>> {
        let mut created: Vec<PathBuf> = Vec::new();
        let mut written = Vec::with_capacity(plan.len());
        for file in plan {
            if let Err(err) = write_one(file, &mut created) {
                rollback(&created);
                return Err(err);
            }
            info!(path = %file.path.display(), role = ?file.role, "file written");
            written.push(file.path.clone());
        }
        Ok(written)
    }
}

fn write_one(file: &PlannedFile, created: &mut Vec<PathBuf>) -> Result<()> {
    if let Some(top) = topmost_missing(&file.dir) {
        created.push(top);
    }
    fs::create_dir_all(&file.dir).map_err(|e| GenerateError::io(&file.dir, e))?;
    fs::write(&file.path, &file.contents).map_err(|e| GenerateError::io(&file.path, e))
}

/// Highest ancestor of `dir` (or `dir` itself) that does not exist yet
fn topmost_missing(dir: &Path) -> Option<PathBuf> {
    let mut top = None;
    for ancestor in dir.ancestors() {
        if ancestor.as_os_str().is_empty() || ancestor.exists() {
            break;
        }
        top = Some(ancestor.to_path_buf());
    }
    top
}

fn rollback(created: &[PathBuf]) {
    for dir in created.iter().rev() {
        if let Err(e) = fs::remove_dir_all(dir) {
            warn!(dir = %dir.display(), error = %e, "rollback failed");
        }
    }
}
