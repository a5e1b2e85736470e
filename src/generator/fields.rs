//! Per-kind field snippets.
//!
//! Every [`FieldKind`] in the catalogue maps to one [`KindSnippet`]; the same
//! entry drives all three render modes so a kind can never be editable in a
//! form but missing from its detail page or table.

use crate::error::{GenerateError, Result};
use crate::spec::{FieldKind, FormItemSpec, OptionItem};
use serde_json::Value;
use std::collections::BTreeSet;

/// Indentation of a form item inside `<Form>` (short) or of a description item
pub const ITEM_INDENT: usize = 8;
/// Indentation of a `<Col>` inside `<Row>` for long forms
pub const GRID_INDENT: usize = 10;
/// Indentation of a column object inside `const columns = [...]`
pub const COLUMN_INDENT: usize = 4;

/// How a field is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMode {
    /// Editable `Form.Item`
    FormItem,
    /// Read-only `Descriptions.Item`
    Description,
    /// Table column definition
    Column,
}

/// How a stored value is shown outside a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Display {
    Text,
    Flag,
    List,
    Html,
}

/// Lookup-table entry for one field kind
#[derive(Debug)]
struct KindSnippet {
    /// JSX element of the control
    tag: &'static str,
    /// antd exports the control needs
    antd: &'static [&'static str],
    /// Other import lines the control needs
    imports: &'static [&'static str],
    /// Verb of the default placeholder, when the control shows one
    placeholder: Option<&'static str>,
    /// Extra props on the control
    control_props: &'static str,
    /// Extra props on the wrapping `Form.Item`
    item_props: &'static str,
    /// Child lines of the control, for controls that are not self-closing
    children: &'static [&'static str],
    display: Display,
}

fn snippet(kind: &FieldKind) -> Option<&'static KindSnippet> {
    let s: &'static KindSnippet = match kind {
        FieldKind::Input => &KindSnippet {
            tag: "Input",
            antd: &["Input"],
            imports: &[],
            placeholder: Some("enter"),
            control_props: "",
            item_props: "",
            children: &[],
            display: Display::Text,
        },
        FieldKind::TextArea => &KindSnippet {
            tag: "Input.TextArea",
            antd: &["Input"],
            imports: &[],
            placeholder: Some("enter"),
            control_props: "rows={4}",
            item_props: "",
            children: &[],
            display: Display::Text,
        },
        FieldKind::Password => &KindSnippet {
            tag: "Input.Password",
            antd: &["Input"],
            imports: &[],
            placeholder: Some("enter"),
            control_props: "",
            item_props: "",
            children: &[],
            display: Display::Text,
        },
        FieldKind::Number => &KindSnippet {
            tag: "InputNumber",
            antd: &["InputNumber"],
            imports: &[],
            placeholder: Some("enter"),
            control_props: "",
            item_props: "",
            children: &[],
            display: Display::Text,
        },
        FieldKind::Select => &KindSnippet {
            tag: "Select",
            antd: &["Select"],
            imports: &[],
            placeholder: Some("select"),
            control_props: "",
            item_props: "",
            children: &[],
            display: Display::Text,
        },
        FieldKind::Radio => &KindSnippet {
            tag: "Radio.Group",
            antd: &["Radio"],
            imports: &[],
            placeholder: None,
            control_props: "",
            item_props: "",
            children: &[],
            display: Display::Text,
        },
        FieldKind::Checkbox => &KindSnippet {
            tag: "Checkbox.Group",
            antd: &["Checkbox"],
            imports: &[],
            placeholder: None,
            control_props: "",
            item_props: "",
            children: &[],
            display: Display::List,
        },
        FieldKind::Switch => &KindSnippet {
            tag: "Switch",
            antd: &["Switch"],
            imports: &[],
            placeholder: None,
            control_props: "",
            item_props: "valuePropName=\"checked\"",
            children: &[],
            display: Display::Flag,
        },
        FieldKind::Date => &KindSnippet {
            tag: "DatePicker",
            antd: &["DatePicker"],
            imports: &[],
            placeholder: None,
            control_props: "",
            item_props: "",
            children: &[],
            display: Display::Text,
        },
        FieldKind::Range => &KindSnippet {
            tag: "DatePicker.RangePicker",
            antd: &["DatePicker"],
            imports: &[],
            placeholder: None,
            control_props: "",
            item_props: "",
            children: &[],
            display: Display::List,
        },
        FieldKind::Time => &KindSnippet {
            tag: "TimePicker",
            antd: &["TimePicker"],
            imports: &[],
            placeholder: None,
            control_props: "",
            item_props: "",
            children: &[],
            display: Display::Text,
        },
        FieldKind::Slider => &KindSnippet {
            tag: "Slider",
            antd: &["Slider"],
            imports: &[],
            placeholder: None,
            control_props: "",
            item_props: "",
            children: &[],
            display: Display::Text,
        },
        FieldKind::Rate => &KindSnippet {
            tag: "Rate",
            antd: &["Rate"],
            imports: &[],
            placeholder: None,
            control_props: "",
            item_props: "",
            children: &[],
            display: Display::Text,
        },
        FieldKind::Cascader => &KindSnippet {
            tag: "Cascader",
            antd: &["Cascader"],
            imports: &[],
            placeholder: Some("select"),
            control_props: "",
            item_props: "",
            children: &[],
            display: Display::List,
        },
        FieldKind::Upload => &KindSnippet {
            tag: "Upload",
            antd: &["Button", "Upload"],
            imports: &["import { UploadOutlined } from '@ant-design/icons';"],
            placeholder: None,
            control_props: "name=\"file\" action=\"/upload\"",
            item_props: "valuePropName=\"fileList\" getValueFromEvent={(e: { fileList: unknown[] }) => e.fileList}",
            children: &["<Button icon={<UploadOutlined />}>Upload</Button>"],
            display: Display::List,
        },
        FieldKind::Editor => &KindSnippet {
            tag: "BraftEditor",
            antd: &[],
            imports: &[
                "import BraftEditor from 'braft-editor';",
                "import 'braft-editor/dist/index.css';",
            ],
            placeholder: Some("enter"),
            control_props: "className=\"braft-editor\"",
            item_props: "",
            children: &[],
            display: Display::Html,
        },
        FieldKind::Unknown(_) => return None,
    };
    Some(s)
}

/// Rendered field fragment plus the imports it pulls in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldBlock {
    /// Pre-indented lines, no trailing newline
    pub source: String,
    pub antd: BTreeSet<&'static str>,
    /// Non-antd import lines, first use first
    pub imports: Vec<&'static str>,
}

/// Reject the first field whose kind has no snippet
pub fn check_kinds(fields: &[FormItemSpec]) -> Result<()> {
    match fields.iter().find(|f| snippet(&f.kind).is_none()) {
        Some(field) => Err(GenerateError::UnsupportedFieldKind {
            field: field.name.clone(),
            kind: field.kind.to_string(),
        }),
        None => Ok(()),
    }
}

/// Render `fields` in order; `idents` are their sanitized names
///
/// `grid` wraps each form item in a responsive `<Col>` (long layouts). The
/// output depends only on the fields, the mode and `grid`, never on whether
/// the shell is a page or a modal.
pub fn render_fields(
    fields: &[FormItemSpec],
    idents: &[String],
    mode: FieldMode,
    grid: bool,
) -> Result<FieldBlock> {
    let mut block = FieldBlock::default();
    let mut lines: Vec<String> = Vec::new();
    for (field, ident) in fields.iter().zip(idents) {
        let snip = snippet(&field.kind).ok_or_else(|| GenerateError::UnsupportedFieldKind {
            field: field.name.clone(),
            kind: field.kind.to_string(),
        })?;
        match mode {
            FieldMode::FormItem => {
                block.antd.extend(snip.antd.iter().copied());
                for line in snip.imports {
                    if !block.imports.contains(line) {
                        block.imports.push(line);
                    }
                }
                if grid {
                    let pad = " ".repeat(GRID_INDENT);
                    lines.push(format!("{pad}<Col xl={{8}} lg={{12}} md={{24}}>"));
                    lines.extend(form_item(field, ident, snip, GRID_INDENT + 2));
                    lines.push(format!("{pad}</Col>"));
                } else {
                    lines.extend(form_item(field, ident, snip, ITEM_INDENT));
                }
            }
            FieldMode::Description => {
                lines.push(format!(
                    "{}<Descriptions.Item label={}>{}</Descriptions.Item>",
                    " ".repeat(ITEM_INDENT),
                    jsx_attr(&field.label),
                    describe(ident, snip.display)
                ));
            }
            FieldMode::Column => lines.push(column(field, ident, snip.display)),
        }
    }
    block.source = lines.join("\n");
    Ok(block)
}

fn form_item(field: &FormItemSpec, ident: &str, snip: &KindSnippet, indent: usize) -> Vec<String> {
    let pad = " ".repeat(indent);
    let mut item = format!("{pad}<Form.Item label={} name=\"{}\"", jsx_attr(&field.label), ident);
    if field.required {
        let verb = snip.placeholder.unwrap_or("fill in");
        item.push_str(&format!(
            " rules={{[{{ required: true, message: {} }}]}}",
            js_str(&format!("Please {} {}", verb, field.label))
        ));
    }
    if !snip.item_props.is_empty() {
        item.push(' ');
        item.push_str(snip.item_props);
    }
    item.push('>');

    let mut control = format!("{pad}  <{}", snip.tag);
    if !snip.control_props.is_empty() {
        control.push(' ');
        control.push_str(snip.control_props);
    }
    if let Some(verb) = snip.placeholder {
        let text = field
            .placeholder
            .clone()
            .unwrap_or_else(|| format!("Please {} {}", verb, field.label));
        control.push_str(&format!(" placeholder={}", jsx_attr(&text)));
    }
    if field.kind.takes_options() {
        control.push_str(&format!(
            " options={{{}}}",
            options_literal(field.options.as_deref().unwrap_or_default())
        ));
    }

    let mut lines = vec![item];
    if snip.children.is_empty() {
        control.push_str(" />");
        lines.push(control);
    } else {
        control.push('>');
        lines.push(control);
        for child in snip.children {
            lines.push(format!("{pad}    {child}"));
        }
        lines.push(format!("{pad}  </{}>", snip.tag));
    }
    lines.push(format!("{pad}</Form.Item>"));
    lines
}

fn describe(ident: &str, display: Display) -> String {
    match display {
        Display::Text => format!("{{detail.{ident}}}"),
        Display::Flag => format!("{{detail.{ident} ? 'Yes' : 'No'}}"),
        Display::List => format!("{{(detail.{ident} || []).join(', ')}}"),
        Display::Html => format!("<div dangerouslySetInnerHTML={{{{ __html: detail.{ident} }}}} />"),
    }
}

fn column(field: &FormItemSpec, ident: &str, display: Display) -> String {
    let pad = " ".repeat(COLUMN_INDENT);
    let head = format!(
        "title: {}, dataIndex: '{ident}', key: '{ident}'",
        js_str(&field.label)
    );
    match display {
        Display::Text => format!("{pad}{{ {head} }},"),
        Display::Flag => format!("{pad}{{ {head}, render: (value: boolean) => (value ? 'Yes' : 'No') }},"),
        Display::List => {
            format!("{pad}{{ {head}, render: (value?: string[]) => (value || []).join(', ') }},")
        }
        Display::Html => format!("{pad}{{ {head}, ellipsis: true }},"),
    }
}

/// `[{ label: 'A', value: 'a' }, ...]`
pub fn options_literal(options: &[OptionItem]) -> String {
    let items: Vec<String> = options
        .iter()
        .map(|o| format!("{{ label: {}, value: {} }}", js_str(&o.label), js_value(&o.value)))
        .collect();
    format!("[{}]", items.join(", "))
}

fn js_value(value: &Value) -> String {
    match value {
        Value::String(s) => js_str(s),
        // numbers, booleans and null print the same in JSON and JS
        other => other.to_string(),
    }
}

/// Single-quoted JS string literal
pub fn js_str(value: &str) -> String {
    crate::routes::quote_str(value, '\'')
}

/// JSX attribute value: `"text"` when it needs no escaping, else `{'text'}`
pub fn jsx_attr(value: &str) -> String {
    if value.chars().any(|c| matches!(c, '"' | '{' | '}' | '<' | '>' | '&' | '\\' | '\n')) {
        format!("{{{}}}", js_str(value))
    } else {
        format!("\"{}\"", value)
    }
}

/// antd named imports for the shell plus the fields, sorted
pub fn antd_import_line(shell: &[&'static str], fields: &BTreeSet<&'static str>) -> String {
    let mut names: BTreeSet<&str> = fields.clone();
    names.extend(shell.iter().copied());
    let list: Vec<&str> = names.into_iter().collect();
    format!("import {{ {} }} from 'antd';", list.join(", "))
}
