use crate::config::Project;
use crate::dispatcher::{resolve_action, Dispatcher};
use crate::generator::ArtifactRole;
use crate::routes::RouteStatus;
use crate::spec::{normalize_route_path, Action, GenerationResult, Payload, RouteEntry};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Command-line interface for the page generator
#[derive(Parser)]
#[command(name = "page-creator-gen")]
#[command(about = "Scaffold antd pages and register them in a umi route table", long_about = None)]
pub struct Cli {
    /// Debug-level logs with source locations
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a page (or component) from a payload file and register its route
    Generate {
        /// Action identifier, e.g. `table` or `org.umi-plugin-page-creator.longFormModal`
        #[arg(short, long)]
        action: String,

        /// Payload file (JSON, or YAML by extension)
        #[arg(short, long)]
        payload: PathBuf,

        /// Project root holding the pages directory and route config
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },
    /// Print the formatted source a payload would generate, without writing anything
    Render {
        #[arg(short, long)]
        action: String,

        #[arg(short, long)]
        payload: PathBuf,

        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },
    /// Register a route for an existing page
    AddRoute {
        /// Route path, e.g. `/orders/new`
        #[arg(long)]
        path: String,

        /// Component path; defaults to `.<path>`
        #[arg(long)]
        component: Option<String>,

        /// Menu title
        #[arg(long)]
        title: Option<String>,

        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },
    /// Print the `{formConfig, formItems, initialFetch, submitFetch}` document of a payload
    Export {
        #[arg(short, long)]
        payload: PathBuf,

        /// Archetype whose default title applies when the payload has none
        #[arg(short, long, default_value = "shortForm")]
        action: String,
    },
    /// Read `{type, payload}` actions from stdin, one JSON object per line,
    /// and answer each with a `{ok, message}` line on stdout
    Serve {
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },
}

fn load_action(action: &str, payload: &Path) -> anyhow::Result<Action> {
    let payload = Payload::from_file(payload)
        .with_context(|| format!("Failed to read payload: {}", payload.display()))?;
    Ok(Action {
        action_type: action.to_string(),
        payload: serde_json::to_value(payload)?,
    })
}

fn open_dispatcher(root: &Path) -> anyhow::Result<Dispatcher> {
    let project = Project::open(root)
        .with_context(|| format!("Failed to load project config under {}", root.display()))?;
    debug!(root = %root.display(), config = ?project.config, "project opened");
    Ok(Dispatcher::new(project))
}

/// Run a parsed command line
///
/// # Errors
///
/// Returns an error if:
/// - The payload or project config cannot be read
/// - Generation fails (the `{ok: false}` reply is printed first)
/// - The route config cannot be patched
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Generate {
            action,
            payload,
            root,
        } => {
            let dispatcher = open_dispatcher(root)?;
            let reply = dispatcher.handle(&load_action(action, payload)?);
            println!("{}", serde_json::to_string(&reply)?);
            if !reply.ok {
                anyhow::bail!(reply.message);
            }
            Ok(())
        }
        Commands::Render {
            action,
            payload,
            root,
        } => {
            let dispatcher = open_dispatcher(root)?;
            let artifacts = dispatcher.render(&load_action(action, payload)?)?;
            let mut stdout = io::stdout().lock();
            for artifact in artifacts {
                if artifact.role == ArtifactRole::Detail {
                    writeln!(stdout, "// ---- {} (detail page) ----", artifact.archetype)?;
                }
                stdout.write_all(artifact.source.as_bytes())?;
            }
            Ok(())
        }
        Commands::AddRoute {
            path,
            component,
            title,
            root,
        } => {
            let dispatcher = open_dispatcher(root)?;
            let path = normalize_route_path(path)?;
            let mut entry = RouteEntry::for_page(&path, title.clone());
            if let Some(component) = component {
                entry.component = component.clone();
            }
            match dispatcher.add_route(&entry)? {
                RouteStatus::Inserted => println!("Route {} added", entry.path),
                RouteStatus::AlreadyPresent => println!("Route {} already present", entry.path),
            }
            Ok(())
        }
        Commands::Export { payload, action } => {
            let archetype = resolve_action(action)?;
            let payload = Payload::from_file(payload)
                .with_context(|| format!("Failed to read payload: {}", payload.display()))?;
            let spec = payload.into_spec(archetype)?;
            println!("{}", spec.export().to_json_pretty()?);
            Ok(())
        }
        Commands::Serve { root } => {
            let dispatcher = open_dispatcher(root)?;
            let stdin = io::stdin();
            let handled = serve(&dispatcher, stdin.lock(), io::stdout().lock())?;
            info!(requests = handled, "input closed");
            Ok(())
        }
    }
}

/// Answer one JSON action per input line; returns the number of replies
///
/// Blank lines are skipped. A line that is not a valid action gets an
/// `{ok: false}` reply instead of ending the loop.
pub fn serve<R, W>(dispatcher: &Dispatcher, input: R, mut output: W) -> anyhow::Result<usize>
where
    R: BufRead,
    W: Write,
{
    let mut handled = 0usize;
    for line in input.lines() {
        let line = line.context("Failed to read request")?;
        if line.trim().is_empty() {
            continue;
        }
        let reply = match serde_json::from_str::<Action>(&line) {
            Ok(action) => dispatcher.handle(&action),
            Err(e) => GenerationResult::failure(format!("Invalid payload: {}", e)),
        };
        serde_json::to_writer(&mut output, &reply)?;
        output.write_all(b"\n")?;
        output.flush()?;
        handled += 1;
    }
    Ok(handled)
}
