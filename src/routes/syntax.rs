//! Span-carrying structural model of a configuration module.
//!
//! Sources are parsed with tree-sitter (the TypeScript grammar for config
//! modules, the JSON grammar for route documents) and the concrete tree is
//! folded into the parts a route table can hide in: imports, top-level
//! `const`/`let`/`var` bindings, the default export, and object / array /
//! string / call expressions. Everything else is kept as an opaque span.
//! Every node records the byte range it was parsed from, so an edit can
//! splice new text into the original source and leave every other byte
//! (comments, blank lines, quote style) exactly as written.

use std::fmt;
use tree_sitter::{Language, Node, Parser, Tree};

/// Byte range into the parsed source, `end` exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    fn of(node: Node<'_>) -> Self {
        Span::new(node.start_byte(), node.end_byte())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Object(ObjectLit),
    Array(ArrayLit),
    Str {
        span: Span,
        value: String,
        quote: char,
    },
    Ident {
        span: Span,
        name: String,
    },
    Call {
        span: Span,
        callee: String,
        args: Vec<Expr>,
    },
    Opaque(Span),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Object(o) => o.span,
            Expr::Array(a) => a.span,
            Expr::Str { span, .. } | Expr::Ident { span, .. } | Expr::Call { span, .. } => *span,
            Expr::Opaque(span) => *span,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectLit> {
        match self {
            Expr::Object(o) => Some(o),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectLit {
    pub span: Span,
    pub props: Vec<Prop>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Prop {
    KeyValue { key: String, value: Expr, span: Span },
    Shorthand { name: String, span: Span },
    /// Spreads, methods, accessors and computed keys
    Other(Span),
}

impl ObjectLit {
    /// Property named `key`; the last one wins, as at runtime
    pub fn get(&self, key: &str) -> Option<&Prop> {
        self.props.iter().rev().find(|p| match p {
            Prop::KeyValue { key: k, .. } => k == key,
            Prop::Shorthand { name, .. } => name == key,
            Prop::Other(_) => false,
        })
    }

    /// Value of `key` when it is written as a plain string
    pub fn str_value(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(Prop::KeyValue {
                value: Expr::Str { value, .. },
                ..
            }) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLit {
    /// From `[` through `]` inclusive
    pub span: Span,
    pub elements: Vec<Expr>,
    /// Offset of a comma after the last element, if the author wrote one
    pub trailing_comma: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: String,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub local: String,
    pub source: String,
}

/// Top-level view of a module
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Module {
    pub imports: Vec<Import>,
    pub bindings: Vec<Binding>,
    pub default_export: Option<Expr>,
}

impl Module {
    pub fn binding(&self, name: &str) -> Option<&Expr> {
        self.bindings
            .iter()
            .rev()
            .find(|b| b.name == name)
            .map(|b| &b.value)
    }

    pub fn import_source(&self, name: &str) -> Option<&str> {
        self.imports
            .iter()
            .find(|i| i.local == name)
            .map(|i| i.source.as_str())
    }
}

/// Grammars the crate parses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    /// `config.ts`, `.umirc.ts` and plain JS config modules
    TypeScript,
    /// Generated page and component sources
    Tsx,
    Json,
}

impl Grammar {
    fn language(self) -> Language {
        match self {
            Grammar::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Grammar::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Grammar::Json => tree_sitter_json::LANGUAGE.into(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Grammar::TypeScript => "typescript",
            Grammar::Tsx => "tsx",
            Grammar::Json => "json",
        }
    }
}

/// A source that does not parse, with the position of the first error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub offset: usize,
    /// 1-based
    pub line: usize,
    pub message: String,
}

impl ParseError {
    fn at(node: Node<'_>, message: impl Into<String>) -> Self {
        ParseError {
            offset: node.start_byte(),
            line: node.start_position().row + 1,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for crate::error::GenerateError {
    fn from(err: ParseError) -> Self {
        crate::error::GenerateError::SyntaxError {
            message: err.to_string(),
        }
    }
}

/// Parse `src` and reject it when the tree contains any error or missing node
pub fn parse_tree(src: &str, grammar: Grammar) -> Result<Tree, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&grammar.language())
        .map_err(|e| ParseError {
            offset: 0,
            line: 1,
            message: format!("{} grammar could not be loaded: {}", grammar.name(), e),
        })?;
    let tree = parser.parse(src, None).ok_or_else(|| ParseError {
        offset: 0,
        line: 1,
        message: format!("{} parser gave up", grammar.name()),
    })?;
    if let Some(bad) = first_error(tree.root_node()) {
        let message = if bad.is_missing() {
            format!("missing `{}`", bad.kind())
        } else {
            format!("unexpected `{}`", excerpt(&src[bad.byte_range()]))
        };
        return Err(ParseError::at(bad, message));
    }
    Ok(tree)
}

/// Check that `src` parses cleanly in `grammar`
pub fn check_source(src: &str, grammar: Grammar) -> Result<(), ParseError> {
    parse_tree(src, grammar).map(|_| ())
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

fn excerpt(text: &str) -> String {
    let line = text.lines().next().unwrap_or("").trim();
    if line.chars().count() > 24 {
        format!("{}...", line.chars().take(24).collect::<String>())
    } else {
        line.to_string()
    }
}

/// Parse a JS/TS module into its top-level structure
pub fn parse_module(src: &str) -> Result<Module, ParseError> {
    let tree = parse_tree(src, Grammar::TypeScript)?;
    let fold = Fold { src };
    let mut module = Module::default();
    let root = tree.root_node();
    let mut cursor = root.walk();
    for stmt in root.named_children(&mut cursor) {
        match stmt.kind() {
            "import_statement" => fold.import(stmt, &mut module),
            "lexical_declaration" | "variable_declaration" => fold.declaration(stmt, &mut module),
            "export_statement" => fold.export(stmt, &mut module),
            _ => {}
        }
    }
    Ok(module)
}

/// Parse a JSON document holding a single value
pub fn parse_document(src: &str) -> Result<Expr, ParseError> {
    let tree = parse_tree(src, Grammar::Json)?;
    let fold = Fold { src };
    let root = tree.root_node();
    let mut cursor = root.walk();
    let values: Vec<Node<'_>> = root
        .named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .collect();
    match values.as_slice() {
        [value] => Ok(fold.expr(*value)),
        [] => Err(ParseError::at(root, "empty document")),
        [_, extra, ..] => Err(ParseError::at(*extra, "unexpected value after document")),
    }
}

/// Folds tree-sitter nodes into the structural model
struct Fold<'s> {
    src: &'s str,
}

impl<'s> Fold<'s> {
    fn text(&self, node: Node<'_>) -> &'s str {
        &self.src[node.byte_range()]
    }

    fn import(&self, node: Node<'_>, module: &mut Module) {
        let Some(source) = node.child_by_field_name("source") else {
            return;
        };
        let source = unquote(self.text(source));
        let mut locals = Vec::new();
        self.import_locals(node, &mut locals);
        module.imports.extend(locals.into_iter().map(|local| Import {
            local,
            source: source.clone(),
        }));
    }

    /// Local names an import binds: default, `* as x`, and `{ a, b as c }`
    fn import_locals(&self, node: Node<'_>, out: &mut Vec<String>) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "import_clause" | "named_imports" | "namespace_import" => {
                    self.import_locals(child, out)
                }
                "identifier" => out.push(self.text(child).to_string()),
                "import_specifier" => {
                    let local = child
                        .child_by_field_name("alias")
                        .or_else(|| child.child_by_field_name("name"));
                    if let Some(local) = local {
                        out.push(self.text(local).to_string());
                    }
                }
                _ => {}
            }
        }
    }

    /// `const a = ..., b: T<X, Y> = ...`; destructuring patterns bind nothing here
    fn declaration(&self, node: Node<'_>, module: &mut Module) {
        let mut cursor = node.walk();
        for declarator in node.named_children(&mut cursor) {
            if declarator.kind() != "variable_declarator" {
                continue;
            }
            let (Some(name), Some(value)) = (
                declarator.child_by_field_name("name"),
                declarator.child_by_field_name("value"),
            ) else {
                continue;
            };
            if name.kind() == "identifier" {
                module.bindings.push(Binding {
                    name: self.text(name).to_string(),
                    value: self.expr(value),
                });
            }
        }
    }

    fn export(&self, node: Node<'_>, module: &mut Module) {
        let mut cursor = node.walk();
        let is_default = node.children(&mut cursor).any(|c| c.kind() == "default");
        if let Some(value) = node.child_by_field_name("value") {
            module.default_export = Some(self.expr(value));
        } else if let Some(decl) = node.child_by_field_name("declaration") {
            if is_default {
                module.default_export = Some(Expr::Opaque(Span::of(decl)));
            } else if matches!(decl.kind(), "lexical_declaration" | "variable_declaration") {
                self.declaration(decl, module);
            }
        }
    }

    fn expr(&self, node: Node<'_>) -> Expr {
        let span = Span::of(node);
        match node.kind() {
            "object" => Expr::Object(self.object(node)),
            "array" => Expr::Array(self.array(node)),
            "string" => {
                let raw = self.text(node);
                Expr::Str {
                    span,
                    value: unquote(raw),
                    quote: raw.chars().next().unwrap_or('\''),
                }
            }
            "template_string" if !has_child(node, "template_substitution") => Expr::Str {
                span,
                value: unquote(self.text(node)),
                quote: '`',
            },
            "identifier" => Expr::Ident {
                span,
                name: self.text(node).to_string(),
            },
            "call_expression" => {
                let callee = node
                    .child_by_field_name("function")
                    .map_or("", |f| self.text(f))
                    .to_string();
                let args = node
                    .child_by_field_name("arguments")
                    .filter(|a| a.kind() == "arguments")
                    .map(|a| self.elements(a))
                    .unwrap_or_default();
                Expr::Call { span, callee, args }
            }
            // `(x)`, `x as T`, `x satisfies T`, `x!` all stand for `x`
            "parenthesized_expression" | "as_expression" | "satisfies_expression"
            | "non_null_expression" => match first_named(node) {
                Some(inner) => self.expr(inner),
                None => Expr::Opaque(span),
            },
            _ => Expr::Opaque(span),
        }
    }

    fn elements(&self, node: Node<'_>) -> Vec<Expr> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter(|n| n.kind() != "comment")
            .map(|n| self.expr(n))
            .collect()
    }

    fn object(&self, node: Node<'_>) -> ObjectLit {
        let mut cursor = node.walk();
        let props = node
            .named_children(&mut cursor)
            .filter(|n| n.kind() != "comment")
            .map(|child| self.prop(child))
            .collect();
        ObjectLit {
            span: Span::of(node),
            props,
        }
    }

    fn prop(&self, node: Node<'_>) -> Prop {
        let span = Span::of(node);
        match node.kind() {
            "pair" => {
                let key = node.child_by_field_name("key").and_then(|k| self.key(k));
                match (key, node.child_by_field_name("value")) {
                    (Some(key), Some(value)) => Prop::KeyValue {
                        key,
                        value: self.expr(value),
                        span,
                    },
                    _ => Prop::Other(span),
                }
            }
            "shorthand_property_identifier" => Prop::Shorthand {
                name: self.text(node).to_string(),
                span,
            },
            _ => Prop::Other(span),
        }
    }

    fn key(&self, node: Node<'_>) -> Option<String> {
        match node.kind() {
            "property_identifier" | "identifier" | "number" => Some(self.text(node).to_string()),
            "string" => Some(unquote(self.text(node))),
            _ => None,
        }
    }

    fn array(&self, node: Node<'_>) -> ArrayLit {
        let mut elements = Vec::new();
        let mut trailing_comma = None;
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "comment" {
                continue;
            }
            if child.is_named() {
                elements.push(self.expr(child));
                trailing_comma = None;
            } else if child.kind() == "," && !elements.is_empty() {
                trailing_comma = Some(child.start_byte());
            }
        }
        ArrayLit {
            span: Span::of(node),
            elements,
            trailing_comma,
        }
    }
}

fn has_child(node: Node<'_>, kind: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.named_children(&mut cursor).any(|c| c.kind() == kind);
    found
}

fn first_named(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    let found = node.named_children(&mut cursor).find(|c| c.kind() != "comment");
    found
}

/// Decoded value of a string (or substitution-free template) literal
fn unquote(raw: &str) -> String {
    let inner = &raw[1..raw.len().saturating_sub(1).max(1)];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('v') => out.push('\u{b}'),
            Some('\n') => {}
            Some('x') => {
                let hex: String = chars.by_ref().take(2).collect();
                push_code_point(&mut out, &hex);
            }
            Some('u') => {
                let hex: String = if chars.peek() == Some(&'{') {
                    chars.next();
                    chars.by_ref().take_while(|c| *c != '}').collect()
                } else {
                    chars.by_ref().take(4).collect()
                };
                push_code_point(&mut out, &hex);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

fn push_code_point(out: &mut String, hex: &str) {
    if let Some(c) = u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
        out.push(c);
    }
}
