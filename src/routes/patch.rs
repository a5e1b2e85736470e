use crate::error::Result;
use crate::spec::RouteEntry;
use tracing::debug;

use super::dialect::{EntryLayout, RouteDialect, ScriptDialect};

/// Print width used when the caller does not configure one
pub const DEFAULT_PRINT_WIDTH: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteStatus {
    Inserted,
    /// An entry with the same path exists; the text is returned unchanged
    AlreadyPresent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePatch {
    pub text: String,
    pub status: RouteStatus,
}

impl RoutePatch {
    pub fn changed(&self) -> bool {
        self.status == RouteStatus::Inserted
    }
}

/// Append `entry` to the route table of a TS/JS config module
pub fn insert_route(src: &str, entry: &RouteEntry) -> Result<RoutePatch> {
    insert_route_with(&ScriptDialect, src, entry, DEFAULT_PRINT_WIDTH)
}

/// Append `entry` to the route table `dialect` finds in `src`
///
/// Only the bytes around the insertion point change. An entry whose `path`
/// is already present (top level or one nested `routes` level) leaves the
/// text untouched.
pub fn insert_route_with(
    dialect: &dyn RouteDialect,
    src: &str,
    entry: &RouteEntry,
    print_width: usize,
) -> Result<RoutePatch> {
    let table = dialect.locate(src)?;
    if table.contains(&entry.path) {
        debug!(dialect = dialect.name(), path = %entry.path, "route already present");
        return Ok(RoutePatch {
            text: src.to_string(),
            status: RouteStatus::AlreadyPresent,
        });
    }

    let nl = if src.contains("\r\n") { "\r\n" } else { "\n" };
    let open = table.array.span.start;
    let close = table.array.span.end - 1;
    let unit = detect_indent_unit(src);
    let mut layout = EntryLayout {
        indent: String::new(),
        unit: unit.clone(),
        quote: table.quote,
        trailing_comma: dialect.allows_trailing_comma(),
        print_width,
        single_line: false,
        newline: nl,
    };

    let mut edits: Vec<(usize, usize, String)> = Vec::new();
    match table.array.elements.last() {
        None => {
            let base = line_indent(src, open);
            layout.indent = format!("{}{}", base, unit);
            let comma = if dialect.allows_trailing_comma() { "," } else { "" };
            let rendered = dialect.render_entry(entry, &layout);
            let inner_end = open + 1 + src[open + 1..close].trim_end().len();
            edits.push((
                inner_end,
                close,
                format!("{nl}{}{}{comma}{nl}{base}", layout.indent, rendered),
            ));
        }
        Some(_) if !src[open..close].contains('\n') => {
            layout.single_line = true;
            let rendered = dialect.render_entry(entry, &layout);
            match table.array.trailing_comma {
                Some(comma) => edits.push((comma + 1, comma + 1, format!(" {},", rendered))),
                None => {
                    let end = table.array.elements.last().map_or(close, |e| e.span().end);
                    edits.push((end, end, format!(", {}", rendered)));
                }
            }
        }
        Some(last) => {
            let last_end = last.span().end;
            layout.indent = line_indent(src, last.span().start);
            layout.trailing_comma = layout.trailing_comma && table.array.trailing_comma.is_some();
            let rendered = dialect.render_entry(entry, &layout);
            let comma_after = if table.array.trailing_comma.is_some() { "," } else { "" };
            let new_line = format!("{nl}{}{}{comma_after}", layout.indent, rendered);
            let anchor = table.array.trailing_comma.map_or(last_end, |c| c + 1);

            match end_of_line_after(src, anchor, close) {
                Some(eol) => {
                    if table.array.trailing_comma.is_none() {
                        edits.push((last_end, last_end, ",".to_string()));
                    }
                    edits.push((eol, eol, new_line));
                }
                None => {
                    let sep = if table.array.trailing_comma.is_some() { "" } else { "," };
                    edits.push((anchor, anchor, format!("{sep}{new_line}")));
                }
            }
        }
    }

    let text = apply_edits(src, edits);
    debug!(
        dialect = dialect.name(),
        path = %entry.path,
        entries = table.array.elements.len() + 1,
        "route inserted"
    );
    Ok(RoutePatch {
        text,
        status: RouteStatus::Inserted,
    })
}

/// Where to put a new line after the last element
///
/// Returns the end of the line's content when only whitespace or a comment
/// ending on that line follows `anchor`; `None` when the closing bracket or an
/// unterminated block comment shares the line.
fn end_of_line_after(src: &str, anchor: usize, close: usize) -> Option<usize> {
    let eol = anchor + src[anchor..close].find('\n')?;
    let content_end = if src[..eol].ends_with('\r') { eol - 1 } else { eol };
    let rest = src[anchor..content_end].trim();
    let trailing_ok = rest.is_empty()
        || rest.starts_with("//")
        || (rest.starts_with("/*") && rest.ends_with("*/"));
    if !trailing_ok {
        return None;
    }
    Some(content_end)
}

/// Splice from the back so earlier offsets stay valid; edits sharing an
/// offset end up in the order they were pushed
fn apply_edits(src: &str, mut edits: Vec<(usize, usize, String)>) -> String {
    edits.sort_by_key(|e| e.0);
    let mut text = src.to_string();
    for (start, end, replacement) in edits.into_iter().rev() {
        text.replace_range(start..end, &replacement);
    }
    text
}

/// Leading whitespace of the line containing `offset`
fn line_indent(src: &str, offset: usize) -> String {
    let line_start = src[..offset].rfind('\n').map_or(0, |i| i + 1);
    src[line_start..]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect()
}

/// Smallest indentation step used in `src`, defaulting to two spaces
pub fn detect_indent_unit(src: &str) -> String {
    let mut smallest: Option<usize> = None;
    for line in src.lines() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('*') {
            continue;
        }
        if line.starts_with('\t') {
            return "\t".to_string();
        }
        let width = line.len() - trimmed.len();
        if width > 0 && smallest.map_or(true, |s| width < s) {
            smallest = Some(width);
        }
    }
    " ".repeat(smallest.unwrap_or(2))
}
