use crate::config::Project;
use crate::error::{GenerateError, Result};
use crate::generator::{assemble_artifacts, Artifact, Formatter};
use crate::routes::{dialect_for_path, insert_route_with, RoutePatch, RouteStatus};
use crate::spec::{Action, GenerationResult, PageSpec, Payload, RouteEntry};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

use super::action::resolve_action;

/// Message returned for a request that wrote its files
pub const SUCCESS_MESSAGE: &str = "File created successfully";

/// What a successful request changed on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Files written, primary artifact first
    pub files: Vec<PathBuf>,
    /// Route patch result; `None` for nested components
    pub route: Option<RouteStatus>,
}

/// A route config patch computed before any file is written
struct PendingRoute {
    path: PathBuf,
    patch: RoutePatch,
}

/// Turns `{type, payload}` actions into files and a route entry
///
/// Requests are handled one at a time; the route config is read and
/// rewritten within a single call, so callers must not run two dispatchers
/// against the same project concurrently.
pub struct Dispatcher {
    project: Project,
    formatter: Box<dyn Formatter>,
}

impl Dispatcher {
    /// Dispatcher using the formatter the project config selects
    pub fn new(project: Project) -> Self {
        let formatter = project.formatter();
        Dispatcher { project, formatter }
    }

    pub fn with_formatter(project: Project, formatter: Box<dyn Formatter>) -> Self {
        Dispatcher { project, formatter }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Handle one action; every failure becomes `{ok: false, message}`
    pub fn handle(&self, action: &Action) -> GenerationResult {
        let started = Instant::now();
        match self.generate(action) {
            Ok(outcome) => {
                info!(
                    action = %action.action_type,
                    files = outcome.files.len(),
                    route = ?outcome.route,
                    duration_ms = started.elapsed().as_millis() as u64,
                    "generation succeeded"
                );
                GenerationResult::success(SUCCESS_MESSAGE)
            }
            Err(err) => {
                warn!(
                    action = %action.action_type,
                    kind = err.kind(),
                    error = %err,
                    "generation failed"
                );
                err.into()
            }
        }
    }

    /// Decode an action into the page spec it describes
    pub fn spec_for(&self, action: &Action) -> Result<PageSpec> {
        let archetype = resolve_action(&action.action_type)?;
        Payload::from_value(action.payload.clone())?.into_spec(archetype)
    }

    /// Assemble and format every artifact of an action without touching disk
    pub fn render(&self, action: &Action) -> Result<Vec<Artifact>> {
        let spec = self.spec_for(action)?;
        self.render_spec(&spec)
    }

    fn render_spec(&self, spec: &PageSpec) -> Result<Vec<Artifact>> {
        assemble_artifacts(spec)?
            .into_iter()
            .map(|artifact| {
                let source = self.formatter.format(&artifact.source)?;
                debug!(
                    archetype = artifact.archetype.name(),
                    formatter = self.formatter.name(),
                    bytes = source.len(),
                    "artifact formatted"
                );
                Ok(Artifact { source, ..artifact })
            })
            .collect()
    }

    /// Run the full pipeline for one action
    ///
    /// Every check that can fail (assembly, formatting, placement, locating
    /// the route table) runs before the first write. Files are written
    /// before the route config, which is written only when it changed.
    pub fn generate(&self, action: &Action) -> Result<Outcome> {
        let spec = self.spec_for(action)?;
        debug!(
            archetype = spec.archetype.name(),
            target = spec.target.path(),
            fields = spec.fields.len(),
            "spec decoded"
        );

        let artifacts = self.render_spec(&spec)?;
        let materializer = self.project.materializer();
        let plan = materializer.plan(&spec, artifacts)?;

        let pending = match spec.route_entry() {
            Some(entry) => Some(self.prepare_route(&entry)?),
            None => None,
        };

        let files = materializer.write_all(&plan)?;
        let route = match pending {
            Some(pending) => Some(self.commit_route(pending)?),
            None => None,
        };
        Ok(Outcome { files, route })
    }

    /// Register a route for an existing page
    pub fn add_route(&self, entry: &RouteEntry) -> Result<RouteStatus> {
        let pending = self.prepare_route(entry)?;
        self.commit_route(pending)
    }

    fn prepare_route(&self, entry: &RouteEntry) -> Result<PendingRoute> {
        let path = self.project.route_config_path();
        let src = fs::read_to_string(&path).map_err(|e| GenerateError::io(&path, e))?;
        let dialect = dialect_for_path(&path);
        let patch = insert_route_with(
            dialect.as_ref(),
            &src,
            entry,
            self.project.config.print_width,
        )?;
        debug!(
            config = %path.display(),
            dialect = dialect.name(),
            status = ?patch.status,
            "route patch prepared"
        );
        Ok(PendingRoute { path, patch })
    }

    fn commit_route(&self, pending: PendingRoute) -> Result<RouteStatus> {
        if !pending.patch.changed() {
            info!(config = %pending.path.display(), "route already registered");
            return Ok(pending.patch.status);
        }
        write_route_config(&pending.path, &pending.patch.text)?;
        info!(config = %pending.path.display(), "route registered");
        Ok(pending.patch.status)
    }
}

fn write_route_config(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|e| GenerateError::io(path, e))
}
