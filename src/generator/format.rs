use crate::error::{GenerateError, Result};
use crate::routes::syntax::{check_source, Grammar};
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

/// Environment variable naming the prettier binary
pub const PRETTIER_BIN_ENV: &str = "PAGEGEN_PRETTIER_BIN";

/// Style every generated file is normalized to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub single_quote: bool,
    /// `none`, `es5` or `all`
    pub trailing_comma: String,
    pub print_width: usize,
    pub parser: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            single_quote: true,
            trailing_comma: "es5".to_string(),
            print_width: 100,
            parser: "typescript".to_string(),
        }
    }
}

/// Turns assembled source into its final on-disk form
///
/// Input that does not parse is reported as [`GenerateError::SyntaxError`].
pub trait Formatter: Send + Sync {
    fn name(&self) -> &'static str;

    fn format(&self, source: &str) -> Result<String>;
}

/// Whitespace normalizer that needs no external tools
///
/// Parses the text with the TSX grammar and rejects it on any syntax error,
/// then strips trailing whitespace, collapses runs of blank lines and ends the
/// file with exactly one newline. Formatting its own output is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFormatter;

impl Formatter for BuiltinFormatter {
    fn name(&self) -> &'static str {
        "builtin"
    }

    fn format(&self, source: &str) -> Result<String> {
        check_source(source, Grammar::Tsx)?;
        let mut out = String::with_capacity(source.len());
        let mut blank_run = 0usize;
        for line in source.lines() {
            let line = line.trim_end();
            if line.is_empty() {
                blank_run += 1;
                continue;
            }
            if blank_run > 0 && !out.is_empty() {
                out.push('\n');
            }
            blank_run = 0;
            out.push_str(line);
            out.push('\n');
        }
        Ok(out)
    }
}

/// Pipes source through the `prettier` CLI
#[derive(Debug, Clone, Default)]
pub struct PrettierFormatter {
    /// Binary to run; falls back to `PAGEGEN_PRETTIER_BIN`, then `prettier`
    pub bin: Option<String>,
    pub options: FormatOptions,
}

impl PrettierFormatter {
    pub fn new(bin: Option<String>, options: FormatOptions) -> Self {
        PrettierFormatter { bin, options }
    }

    fn resolve_bin(&self) -> String {
        self.bin
            .clone()
            .or_else(|| std::env::var(PRETTIER_BIN_ENV).ok())
            .unwrap_or_else(|| "prettier".to_string())
    }

    fn args(&self) -> Vec<String> {
        let mut args = vec![
            "--stdin-filepath".to_string(),
            "index.tsx".to_string(),
            "--parser".to_string(),
            self.options.parser.clone(),
            "--print-width".to_string(),
            self.options.print_width.to_string(),
            "--trailing-comma".to_string(),
            self.options.trailing_comma.clone(),
        ];
        if self.options.single_quote {
            args.push("--single-quote".to_string());
        }
        args
    }
}

impl Formatter for PrettierFormatter {
    fn name(&self) -> &'static str {
        "prettier"
    }

    fn format(&self, source: &str) -> Result<String> {
        let bin = self.resolve_bin();
        debug!(bin = %bin, bytes = source.len(), "running prettier");
        let mut child = Command::new(&bin)
            .args(self.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| GenerateError::io(&bin, e))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(source.as_bytes())
                .map_err(|e| GenerateError::io(&bin, e))?;
        }
        let output = child
            .wait_with_output()
            .map_err(|e| GenerateError::io(&bin, e))?;

        if !output.status.success() {
            return Err(GenerateError::SyntaxError {
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        String::from_utf8(output.stdout).map_err(|e| GenerateError::SyntaxError {
            message: format!("prettier produced invalid UTF-8: {}", e),
        })
    }
}
