//! # Configuration Module
//!
//! Where the application's pages and route table live, and how generated
//! files are formatted.
//!
//! ## Sources
//!
//! Values are layered, later sources winning:
//!
//! 1. Built-in defaults (an umi project layout)
//! 2. `page-creator.toml` in the project root, if present
//! 3. `PAGEGEN_*` environment variables
//!
//! ## Environment Variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `PAGEGEN_PAGES_DIR` | `src/pages` | Pages root, relative to the project root |
//! | `PAGEGEN_ROUTE_CONFIG` | `config/config.ts` | Route configuration file |
//! | `PAGEGEN_EXTENSION` | `tsx` | Extension of generated files |
//! | `PAGEGEN_FORMATTER` | `builtin` | `builtin` or `prettier` |
//! | `PAGEGEN_PRETTIER_BIN` | `prettier` | Binary used by the prettier formatter |
//! | `PAGEGEN_PRINT_WIDTH` | `100` | Line width for formatting and route entries |
//!
//! ## Example
//!
//! ```toml
//! pages_dir = "src/pages"
//! route_config = ".umirc.ts"
//! formatter = "prettier"
//! print_width = 120
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::generator::{BuiltinFormatter, FormatOptions, Formatter, PrettierFormatter};
use crate::materialize::Materializer;

/// File name looked up in the project root
pub const CONFIG_FILE_NAME: &str = "page-creator.toml";

/// Which formatter generated files go through
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatterKind {
    #[default]
    Builtin,
    Prettier,
}

impl FromStr for FormatterKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "builtin" => Ok(FormatterKind::Builtin),
            "prettier" => Ok(FormatterKind::Prettier),
            other => anyhow::bail!("unknown formatter '{}' (expected builtin or prettier)", other),
        }
    }
}

impl fmt::Display for FormatterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatterKind::Builtin => f.write_str("builtin"),
            FormatterKind::Prettier => f.write_str("prettier"),
        }
    }
}

/// Project layout and formatting settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Pages root, relative to the project root
    pub pages_dir: PathBuf,
    /// Route configuration file, relative to the project root
    pub route_config: PathBuf,
    /// Extension of generated files, without the dot
    pub extension: String,
    pub formatter: FormatterKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prettier_bin: Option<String>,
    pub print_width: usize,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        ProjectConfig {
            pages_dir: PathBuf::from("src/pages"),
            route_config: PathBuf::from("config/config.ts"),
            extension: "tsx".to_string(),
            formatter: FormatterKind::Builtin,
            prettier_bin: None,
            print_width: 100,
        }
    }
}

impl ProjectConfig {
    /// Defaults, then `page-creator.toml` under `root`, then the environment
    pub fn load(root: &Path) -> anyhow::Result<Self> {
        let mut config = match Self::from_file(&root.join(CONFIG_FILE_NAME))? {
            Some(config) => config,
            None => ProjectConfig::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Read a config file; `Ok(None)` when it does not exist
    pub fn from_file(path: &Path) -> anyhow::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: ProjectConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(Some(config))
    }

    pub fn apply_env(&mut self) -> anyhow::Result<()> {
        self.apply_env_from(|key| env::var(key).ok())
    }

    /// Apply `PAGEGEN_*` overrides read through `lookup`
    pub fn apply_env_from<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(v) = get("PAGEGEN_PAGES_DIR") {
            self.pages_dir = PathBuf::from(v);
        }
        if let Some(v) = get("PAGEGEN_ROUTE_CONFIG") {
            self.route_config = PathBuf::from(v);
        }
        if let Some(v) = get("PAGEGEN_EXTENSION") {
            self.extension = v.trim_start_matches('.').to_string();
        }
        if let Some(v) = get("PAGEGEN_FORMATTER") {
            self.formatter = v.parse().context("PAGEGEN_FORMATTER")?;
        }
        if let Some(v) = get("PAGEGEN_PRETTIER_BIN") {
            self.prettier_bin = Some(v);
        }
        if let Some(v) = get("PAGEGEN_PRINT_WIDTH") {
            self.print_width = v
                .trim()
                .parse()
                .with_context(|| format!("PAGEGEN_PRINT_WIDTH must be a number, got '{}'", v))?;
        }
        Ok(())
    }

    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            print_width: self.print_width,
            ..FormatOptions::default()
        }
    }
}

/// A project root together with its resolved configuration
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub config: ProjectConfig,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>, config: ProjectConfig) -> Self {
        Project {
            root: root.into(),
            config,
        }
    }

    /// Load the configuration for `root`
    pub fn open(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root = root.into();
        let config = ProjectConfig::load(&root)?;
        Ok(Project { root, config })
    }

    pub fn pages_root(&self) -> PathBuf {
        self.root.join(&self.config.pages_dir)
    }

    pub fn route_config_path(&self) -> PathBuf {
        self.root.join(&self.config.route_config)
    }

    pub fn materializer(&self) -> Materializer {
        Materializer::new(self.pages_root(), self.config.extension.clone())
    }

    pub fn formatter(&self) -> Box<dyn Formatter> {
        match self.config.formatter {
            FormatterKind::Builtin => Box::new(BuiltinFormatter),
            FormatterKind::Prettier => Box::new(PrettierFormatter::new(
                self.config.prettier_bin.clone(),
                self.config.format_options(),
            )),
        }
    }
}
