use crate::error::{GenerateError, Result};
use crate::spec::RouteEntry;
use std::path::Path;

use super::syntax::{parse_document, parse_module, ArrayLit, Expr, Module, ObjectLit, Prop};

/// Bindings are followed at most this many hops before giving up
const MAX_BINDING_HOPS: usize = 8;

/// The route array found in a configuration source
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTable {
    pub array: ArrayLit,
    /// `path` values of the entries and of one nested `routes` level
    pub paths: Vec<String>,
    /// Quote character the existing entries use
    pub quote: char,
}

impl RouteTable {
    fn from_array(array: &ArrayLit, default_quote: char) -> Self {
        let mut paths = Vec::new();
        let mut quote = None;
        for element in &array.elements {
            let Some(obj) = element.as_object() else {
                continue;
            };
            collect_path(obj, &mut paths, &mut quote);
            if let Some(Prop::KeyValue {
                value: Expr::Array(children),
                ..
            }) = obj.get("routes")
            {
                for child in children.elements.iter().filter_map(Expr::as_object) {
                    collect_path(child, &mut paths, &mut quote);
                }
            }
        }
        RouteTable {
            array: array.clone(),
            paths,
            quote: quote.unwrap_or(default_quote),
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }
}

fn collect_path(obj: &ObjectLit, paths: &mut Vec<String>, quote: &mut Option<char>) {
    if let Some(Prop::KeyValue {
        value: Expr::Str { value, quote: q, .. },
        ..
    }) = obj.get("path")
    {
        paths.push(value.clone());
        if quote.is_none() && *q != '`' {
            *quote = Some(*q);
        }
    }
}

/// How a new entry should be laid out at its insertion point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryLayout {
    /// Indentation of the entry's own line
    pub indent: String,
    /// One indentation step
    pub unit: String,
    pub quote: char,
    /// Trailing comma after the last property when the entry spans lines
    pub trailing_comma: bool,
    pub print_width: usize,
    /// Force a single line regardless of width
    pub single_line: bool,
    /// Line ending of the surrounding file
    pub newline: &'static str,
}

/// A route configuration format the patcher can edit
pub trait RouteDialect {
    fn name(&self) -> &'static str;

    /// Find the route array in `src`
    fn locate(&self, src: &str) -> Result<RouteTable>;

    /// Source text of a new entry, without any separator around it
    fn render_entry(&self, entry: &RouteEntry, layout: &EntryLayout) -> String;

    /// Whether trailing commas are legal in this format
    fn allows_trailing_comma(&self) -> bool {
        true
    }
}

/// Pick the dialect from the route config's file extension
pub fn dialect_for_path(path: &Path) -> Box<dyn RouteDialect> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Box::new(JsonDialect),
        _ => Box::new(ScriptDialect),
    }
}

fn not_found(reason: impl Into<String>) -> GenerateError {
    GenerateError::RouteTableNotFound {
        reason: reason.into(),
    }
}

/// umi style `config.ts` / `.umirc.ts` / `routes.js` modules
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptDialect;

enum Located<'m> {
    Config(&'m ObjectLit),
    Routes(&'m ArrayLit),
}

impl ScriptDialect {
    fn resolve_export<'m>(&self, module: &'m Module, expr: &'m Expr, hops: usize) -> Result<Located<'m>> {
        match expr {
            Expr::Object(obj) => Ok(Located::Config(obj)),
            Expr::Array(array) => Ok(Located::Routes(array)),
            Expr::Call { callee, args, .. } => match args.first() {
                Some(arg) => self.resolve_export(module, arg, hops),
                None => Err(not_found(format!("`{}()` is called without a config object", callee))),
            },
            Expr::Ident { name, .. } => {
                let value = self.follow(module, name, hops, "default export")?;
                self.resolve_export(module, value, hops + 1)
            }
            _ => Err(not_found("the default export is not an object literal")),
        }
    }

    fn resolve_routes<'m>(&self, module: &'m Module, expr: &'m Expr, hops: usize) -> Result<&'m ArrayLit> {
        match expr {
            Expr::Array(array) => Ok(array),
            Expr::Ident { name, .. } => {
                let value = self.follow(module, name, hops, "`routes`")?;
                self.resolve_routes(module, value, hops + 1)
            }
            _ => Err(not_found("`routes` is not an array literal")),
        }
    }

    fn follow<'m>(&self, module: &'m Module, name: &str, hops: usize, what: &str) -> Result<&'m Expr> {
        if hops >= MAX_BINDING_HOPS {
            return Err(not_found(format!("{} `{}` is bound too indirectly", what, name)));
        }
        if let Some(value) = module.binding(name) {
            return Ok(value);
        }
        match module.import_source(name) {
            Some(source) => Err(not_found(format!(
                "{} `{}` is imported from '{}'; edit that module instead",
                what, name, source
            ))),
            None => Err(not_found(format!("{} `{}` is not declared in this file", what, name))),
        }
    }
}

impl RouteDialect for ScriptDialect {
    fn name(&self) -> &'static str {
        "script"
    }

    fn locate(&self, src: &str) -> Result<RouteTable> {
        let module = parse_module(src)?;
        let export = module
            .default_export
            .as_ref()
            .ok_or_else(|| not_found("the file has no default export"))?;

        let array = match self.resolve_export(&module, export, 0)? {
            Located::Routes(array) => array,
            Located::Config(config) => match config.get("routes") {
                Some(Prop::KeyValue { value, .. }) => self.resolve_routes(&module, value, 0)?,
                Some(Prop::Shorthand { name, .. }) => {
                    let value = self.follow(&module, name, 0, "`routes`")?;
                    self.resolve_routes(&module, value, 1)?
                }
                _ => return Err(not_found("the config object has no `routes` property")),
            },
        };
        Ok(RouteTable::from_array(array, '\''))
    }

    fn render_entry(&self, entry: &RouteEntry, layout: &EntryLayout) -> String {
        let q = layout.quote;
        let mut props = vec![
            format!("path: {}", quote_str(&entry.path, q)),
            format!("component: {}", quote_str(&entry.component, q)),
            format!("exact: {}", entry.exact),
        ];
        if let Some(title) = &entry.title {
            props.push(format!("title: {}", quote_str(title, q)));
        }
        lay_out(props, layout, true)
    }
}

/// A JSON document whose top-level object holds a `routes` array
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDialect;

impl RouteDialect for JsonDialect {
    fn name(&self) -> &'static str {
        "json"
    }

    fn locate(&self, src: &str) -> Result<RouteTable> {
        let doc = parse_document(src)?;
        let Expr::Object(root) = &doc else {
            return Err(not_found("the document is not a JSON object"));
        };
        match root.get("routes") {
            Some(Prop::KeyValue {
                value: Expr::Array(array),
                ..
            }) => Ok(RouteTable::from_array(array, '"')),
            Some(_) => Err(not_found("`routes` is not an array")),
            None => Err(not_found("the document has no `routes` key")),
        }
    }

    fn render_entry(&self, entry: &RouteEntry, layout: &EntryLayout) -> String {
        let mut props = vec![
            format!("\"path\": {}", quote_str(&entry.path, '"')),
            format!("\"component\": {}", quote_str(&entry.component, '"')),
            format!("\"exact\": {}", entry.exact),
        ];
        if let Some(title) = &entry.title {
            props.push(format!("\"title\": {}", quote_str(title, '"')));
        }
        lay_out(props, layout, false)
    }

    fn allows_trailing_comma(&self) -> bool {
        false
    }
}

fn lay_out(props: Vec<String>, layout: &EntryLayout, spaced_braces: bool) -> String {
    let inline = if spaced_braces {
        format!("{{ {} }}", props.join(", "))
    } else {
        format!("{{{}}}", props.join(", "))
    };
    // Strictly narrower than the width, leaving a column for the separator
    if layout.single_line || layout.indent.len() + inline.len() < layout.print_width {
        return inline;
    }
    let inner = format!("{}{}", layout.indent, layout.unit);
    let mut out = format!("{{{}", layout.newline);
    let last = props.len().saturating_sub(1);
    for (i, prop) in props.iter().enumerate() {
        out.push_str(&inner);
        out.push_str(prop);
        if i < last || layout.trailing_comma {
            out.push(',');
        }
        out.push_str(layout.newline);
    }
    out.push_str(&layout.indent);
    out.push('}');
    out
}

/// String literal for `value` in the given quote style
pub(crate) fn quote_str(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn layout(indent: &str) -> EntryLayout {
        EntryLayout {
            indent: indent.to_string(),
            unit: "  ".to_string(),
            quote: '\'',
            trailing_comma: true,
            print_width: 100,
            single_line: false,
            newline: "\n",
        }
    }

    #[test]
    fn test_locates_through_bindings_and_calls() {
        let src = "const routes = [{ path: \"/a\" }];\nconst config = defineConfig({ routes });\nexport default config;\n";
        let table = ScriptDialect.locate(src).unwrap();
        assert_eq!(table.paths, vec!["/a".to_string()]);
        assert_eq!(table.quote, '"');
    }

    #[test]
    fn test_default_export_array_is_the_table() {
        let table = ScriptDialect
            .locate("export default [\n  { path: '/', routes: [{ path: '/home' }] },\n];")
            .unwrap();
        assert!(table.contains("/"));
        assert!(table.contains("/home"));
    }

    #[test]
    fn test_not_found_reasons() {
        let reason = |src: &str| match ScriptDialect.locate(src).unwrap_err() {
            GenerateError::RouteTableNotFound { reason } => reason,
            other => panic!("unexpected {other:?}"),
        };
        assert!(reason("const a = 1;").contains("no default export"));
        assert!(reason("export default { hash: true };").contains("no `routes`"));
        assert!(reason("export default { routes: getRoutes() };").contains("not an array"));
        assert!(reason("import routes from './routes';\nexport default { routes };").contains("'./routes'"));
    }

    #[test]
    fn test_render_entry_single_and_multi_line() {
        let entry = RouteEntry::for_page("/orders/new", None);
        assert_eq!(
            ScriptDialect.render_entry(&entry, &layout("    ")),
            "{ path: '/orders/new', component: './orders/new', exact: true }"
        );

        let mut narrow = layout("    ");
        narrow.print_width = 40;
        assert_eq!(
            ScriptDialect.render_entry(&entry, &narrow),
            "{\n      path: '/orders/new',\n      component: './orders/new',\n      exact: true,\n    }"
        );

        narrow.newline = "\r\n";
        assert_eq!(
            ScriptDialect.render_entry(&entry, &narrow),
            "{\r\n      path: '/orders/new',\r\n      component: './orders/new',\r\n      exact: true,\r\n    }"
        );
    }

    #[test]
    fn test_json_dialect() {
        let table = JsonDialect
            .locate("{\n  \"routes\": [\n    {\"path\": \"/a\"}\n  ]\n}\n")
            .unwrap();
        assert!(table.contains("/a"));
        let entry = RouteEntry::for_page("/b", Some("B's page".into()));
        assert_eq!(
            JsonDialect.render_entry(&entry, &layout("    ")),
            "{\"path\": \"/b\", \"component\": \"./b\", \"exact\": true, \"title\": \"B's page\"}"
        );
        assert!(JsonDialect.locate("[]").is_err());
    }

    #[test]
    fn test_quote_str_escapes_matching_quote() {
        assert_eq!(quote_str("it's", '\''), r"'it\'s'");
        assert_eq!(quote_str("it's", '"'), "\"it's\"");
    }
}
