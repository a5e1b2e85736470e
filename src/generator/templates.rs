use askama::Template;

use super::fields::{antd_import_line, check_kinds, jsx_attr, render_fields, FieldMode};
use crate::error::{GenerateError, Result};
use crate::spec::{field_identifiers, validate_api_key, Archetype, Layout, PageSpec, Variant};

/// Values every page shell is rendered with
///
/// Blocks that vary with the fields (`imports`, `fields`) arrive pre-rendered
/// and pre-indented; the templates only place them.
#[derive(Debug, Clone, Default)]
pub struct ShellContext {
    /// Every import line, newline separated
    pub imports: String,
    /// `"Title"` or `{'Title'}`, ready to follow `title=`
    pub title_attr: String,
    /// Field fragment for the shell's render mode
    pub fields: String,
    /// Api keys fetched on load, in call order
    pub initial_calls: Vec<String>,
    /// Api keys called on submit (or delete, for tables), in call order
    pub submit_calls: Vec<String>,
    pub has_initial: bool,
    pub has_submit: bool,
    /// Route the table's edit action navigates to
    pub edit_path: String,
}

macro_rules! shell_template {
    ($(#[$doc:meta])* $name:ident, $path:tt) => {
        $(#[$doc])*
        #[derive(Template)]
        #[template(path = $path, escape = "none")]
        pub struct $name {
            pub imports: String,
            pub title_attr: String,
            pub fields: String,
            pub initial_calls: Vec<String>,
            pub submit_calls: Vec<String>,
            pub has_initial: bool,
            pub has_submit: bool,
            pub edit_path: String,
        }

        impl From<ShellContext> for $name {
            fn from(ctx: ShellContext) -> Self {
                $name {
                    imports: ctx.imports,
                    title_attr: ctx.title_attr,
                    fields: ctx.fields,
                    initial_calls: ctx.initial_calls,
                    submit_calls: ctx.submit_calls,
                    has_initial: ctx.has_initial,
                    has_submit: ctx.has_submit,
                    edit_path: ctx.edit_path,
                }
            }
        }
    };
}

shell_template!(
    /// Single-column form page
    ShortFormTemplate,
    "short_form.tsx.txt"
);
shell_template!(
    /// Single-column form in a modal
    ShortFormModalTemplate,
    "short_form_modal.tsx.txt"
);
shell_template!(
    /// Grid form page
    LongFormTemplate,
    "long_form.tsx.txt"
);
shell_template!(
    /// Grid form in a modal
    LongFormModalTemplate,
    "long_form_modal.tsx.txt"
);
shell_template!(ShortDetailTemplate, "short_detail.tsx.txt");
shell_template!(ShortDetailModalTemplate, "short_detail_modal.tsx.txt");
shell_template!(LongDetailTemplate, "long_detail.tsx.txt");
shell_template!(LongDetailModalTemplate, "long_detail_modal.tsx.txt");
shell_template!(
    /// List page with edit and delete actions
    TableTemplate,
    "table.tsx.txt"
);
shell_template!(TableModalTemplate, "table_modal.tsx.txt");

/// antd exports and React hooks a shell itself uses
struct ShellNeeds {
    antd: Vec<&'static str>,
    hooks: Vec<&'static str>,
    umi_history: bool,
}

fn shell_needs(archetype: Archetype, has_initial: bool, has_submit: bool) -> ShellNeeds {
    let modal = archetype.is_modal();
    let mut antd = Vec::new();
    let mut hooks = Vec::new();
    let mut umi_history = false;

    antd.push(if modal { "Modal" } else { "Card" });
    match archetype.layout {
        Layout::ShortForm | Layout::LongForm => {
            antd.push("Form");
            if !modal {
                antd.push("Button");
            }
            if has_submit {
                antd.push("message");
            }
            if archetype.layout == Layout::LongForm {
                antd.extend(["Row", "Col"]);
                if !modal {
                    antd.push("Space");
                }
            }
            if modal || has_initial {
                hooks.push("useEffect");
            }
        }
        Layout::ShortDetail | Layout::LongDetail => {
            antd.push("Descriptions");
            if has_initial {
                hooks.extend(["useEffect", "useState"]);
            } else if !modal {
                hooks.push("useState");
            }
        }
        Layout::Table => {
            antd.extend(["Popconfirm", "Table", "message"]);
            hooks.extend(["useEffect", "useState"]);
            umi_history = true;
        }
    }
    ShellNeeds {
        antd,
        hooks,
        umi_history,
    }
}

fn field_mode(layout: Layout) -> FieldMode {
    match layout {
        Layout::ShortForm | Layout::LongForm => FieldMode::FormItem,
        Layout::ShortDetail | Layout::LongDetail => FieldMode::Description,
        Layout::Table => FieldMode::Column,
    }
}

/// Check a spec before anything is rendered
///
/// Order: empty field list, duplicate names, api keys, field kinds.
pub fn validate_spec(archetype: Archetype, spec: &PageSpec) -> Result<Vec<String>> {
    if spec.fields.is_empty() {
        return Err(GenerateError::EmptySpec {
            archetype: archetype.name().to_string(),
        });
    }
    let idents = field_identifiers(&spec.fields)?;
    for key in spec.api.initial_fetch.iter().chain(&spec.api.submit_fetch) {
        validate_api_key(key)?;
    }
    check_kinds(&spec.fields)?;
    Ok(idents)
}

/// Render one archetype for `spec`
///
/// Pure and deterministic: the same archetype and spec always produce the
/// same bytes. The result is unformatted; run it through a
/// [`Formatter`](super::Formatter) before writing it out.
pub fn assemble(archetype: Archetype, spec: &PageSpec) -> Result<String> {
    let idents = validate_spec(archetype, spec)?;
    let block = render_fields(
        &spec.fields,
        &idents,
        field_mode(archetype.layout),
        archetype.layout == Layout::LongForm,
    )?;

    let initial_calls: Vec<String> = spec.api.initial_calls().into_iter().map(String::from).collect();
    let submit_calls: Vec<String> = spec.api.submit_calls().into_iter().map(String::from).collect();
    let has_initial = !initial_calls.is_empty();
    let has_submit = !submit_calls.is_empty();
    let needs = shell_needs(archetype, has_initial, has_submit);

    let mut imports = Vec::new();
    imports.push(if needs.hooks.is_empty() {
        "import React from 'react';".to_string()
    } else {
        format!("import React, {{ {} }} from 'react';", needs.hooks.join(", "))
    });
    imports.push(antd_import_line(&needs.antd, &block.antd));
    imports.extend(block.imports.iter().map(|line| line.to_string()));
    if needs.umi_history {
        imports.push("import { history } from 'umi';".to_string());
    }
    imports.push("import { Store } from 'antd/es/form/interface';".to_string());

    let ctx = ShellContext {
        imports: imports.join("\n"),
        title_attr: jsx_attr(&spec.title),
        fields: block.source,
        initial_calls,
        submit_calls,
        has_initial,
        has_submit,
        edit_path: format!("{}/edit", spec.target.path()),
    };

    let source = match (archetype.layout, archetype.variant) {
        (Layout::ShortForm, Variant::Plain) => ShortFormTemplate::from(ctx).render()?,
        (Layout::ShortForm, Variant::Modal) => ShortFormModalTemplate::from(ctx).render()?,
        (Layout::LongForm, Variant::Plain) => LongFormTemplate::from(ctx).render()?,
        (Layout::LongForm, Variant::Modal) => LongFormModalTemplate::from(ctx).render()?,
        (Layout::ShortDetail, Variant::Plain) => ShortDetailTemplate::from(ctx).render()?,
        (Layout::ShortDetail, Variant::Modal) => ShortDetailModalTemplate::from(ctx).render()?,
        (Layout::LongDetail, Variant::Plain) => LongDetailTemplate::from(ctx).render()?,
        (Layout::LongDetail, Variant::Modal) => LongDetailModalTemplate::from(ctx).render()?,
        (Layout::Table, Variant::Plain) => TableTemplate::from(ctx).render()?,
        (Layout::Table, Variant::Modal) => TableModalTemplate::from(ctx).render()?,
    };
    Ok(source)
}

/// Which file of a request an artifact is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactRole {
    /// The page or component that was asked for
    Primary,
    /// Companion detail page of a form
    Detail,
}

/// One rendered source file, not yet placed on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub role: ArtifactRole,
    pub archetype: Archetype,
    pub source: String,
}

/// Every artifact a spec yields: the primary one, then the companion detail page
pub fn assemble_artifacts(spec: &PageSpec) -> Result<Vec<Artifact>> {
    let mut artifacts = vec![Artifact {
        role: ArtifactRole::Primary,
        archetype: spec.archetype,
        source: assemble(spec.archetype, spec)?,
    }];
    if spec.wants_detail_page() {
        if let Some(detail) = spec.archetype.companion_detail() {
            artifacts.push(Artifact {
                role: ArtifactRole::Detail,
                archetype: detail,
                source: assemble(detail, spec)?,
            });
        }
    }
    Ok(artifacts)
}
