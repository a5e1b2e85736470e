use crate::error::GenerateError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Prefix shared by every inbound action identifier
pub const ACTION_NAMESPACE: &str = "org.umi-plugin-page-creator";

/// Structural shape of a generated page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Single-column form
    ShortForm,
    /// Multi-column grid form
    LongForm,
    /// Single-column read-only view
    ShortDetail,
    /// Multi-column read-only view
    LongDetail,
    /// Data table with edit/delete actions
    Table,
}

impl Layout {
    pub const ALL: [Layout; 5] = [
        Layout::ShortForm,
        Layout::LongForm,
        Layout::ShortDetail,
        Layout::LongDetail,
        Layout::Table,
    ];

    pub fn is_form(self) -> bool {
        matches!(self, Layout::ShortForm | Layout::LongForm)
    }

    pub fn is_detail(self) -> bool {
        matches!(self, Layout::ShortDetail | Layout::LongDetail)
    }

    /// Long layouts spread fields over a responsive grid
    pub fn is_long(self) -> bool {
        matches!(self, Layout::LongForm | Layout::LongDetail)
    }

    /// Read-only layout generated alongside a form when a detail page is requested
    pub fn detail_counterpart(self) -> Option<Layout> {
        match self {
            Layout::ShortForm => Some(Layout::ShortDetail),
            Layout::LongForm => Some(Layout::LongDetail),
            Layout::ShortDetail | Layout::LongDetail | Layout::Table => None,
        }
    }

    /// Title used when the page spec does not carry one
    pub fn default_title(self) -> &'static str {
        match self {
            Layout::ShortForm => "Short Form",
            Layout::LongForm => "Long Form",
            Layout::ShortDetail => "Short Detail",
            Layout::LongDetail => "Long Detail",
            Layout::Table => "Table",
        }
    }
}

/// Whether a page is routed on its own or rendered inside a modal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Plain,
    Modal,
}

/// One of the ten renderable page shapes: layout × variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Archetype {
    pub layout: Layout,
    pub variant: Variant,
}

impl Archetype {
    pub const fn new(layout: Layout, variant: Variant) -> Self {
        Archetype { layout, variant }
    }

    pub const fn plain(layout: Layout) -> Self {
        Archetype::new(layout, Variant::Plain)
    }

    pub const fn modal(layout: Layout) -> Self {
        Archetype::new(layout, Variant::Modal)
    }

    /// All ten archetypes, plain before modal for each layout
    pub fn all() -> impl Iterator<Item = Archetype> {
        Layout::ALL
            .into_iter()
            .flat_map(|layout| [Archetype::plain(layout), Archetype::modal(layout)])
    }

    pub fn is_modal(&self) -> bool {
        self.variant == Variant::Modal
    }

    /// The same archetype without the modal shell
    pub fn plain_counterpart(&self) -> Archetype {
        Archetype::plain(self.layout)
    }

    /// Detail archetype for the companion page of a form, keeping the variant
    pub fn companion_detail(&self) -> Option<Archetype> {
        self.layout
            .detail_counterpart()
            .map(|layout| Archetype::new(layout, self.variant))
    }

    /// Short identifier, e.g. `longFormModal`
    pub fn name(&self) -> &'static str {
        match (self.layout, self.variant) {
            (Layout::ShortForm, Variant::Plain) => "shortForm",
            (Layout::ShortForm, Variant::Modal) => "shortFormModal",
            (Layout::LongForm, Variant::Plain) => "longForm",
            (Layout::LongForm, Variant::Modal) => "longFormModal",
            (Layout::ShortDetail, Variant::Plain) => "shortDetail",
            (Layout::ShortDetail, Variant::Modal) => "shortDetailModal",
            (Layout::LongDetail, Variant::Plain) => "longDetail",
            (Layout::LongDetail, Variant::Modal) => "longDetailModal",
            (Layout::Table, Variant::Plain) => "table",
            (Layout::Table, Variant::Modal) => "tableModal",
        }
    }

    /// Fully qualified action identifier, e.g. `org.umi-plugin-page-creator.table`
    pub fn action_id(&self) -> String {
        format!("{}.{}", ACTION_NAMESPACE, self.name())
    }
}

impl FromStr for Archetype {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let archetype = match s {
            "shortForm" => Archetype::plain(Layout::ShortForm),
            "shortFormModal" => Archetype::modal(Layout::ShortForm),
            "longForm" => Archetype::plain(Layout::LongForm),
            "longFormModal" => Archetype::modal(Layout::LongForm),
            "shortDetail" => Archetype::plain(Layout::ShortDetail),
            "shortDetailModal" => Archetype::modal(Layout::ShortDetail),
            "longDetail" => Archetype::plain(Layout::LongDetail),
            "longDetailModal" => Archetype::modal(Layout::LongDetail),
            "table" => Archetype::plain(Layout::Table),
            "tableModal" => Archetype::modal(Layout::Table),
            other => {
                return Err(GenerateError::UnsupportedArchetype {
                    name: other.to_string(),
                })
            }
        };
        Ok(archetype)
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Input archetype of a single field
///
/// Unknown kinds are kept (rather than rejected while decoding) so that the
/// engine can report them as `UnsupportedFieldKind` naming the field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    Input,
    TextArea,
    Password,
    Number,
    Select,
    Radio,
    Checkbox,
    Switch,
    Date,
    Range,
    Time,
    Slider,
    Rate,
    Cascader,
    Upload,
    Editor,
    Unknown(String),
}

impl FieldKind {
    pub const CATALOGUE: [FieldKind; 16] = [
        FieldKind::Input,
        FieldKind::TextArea,
        FieldKind::Password,
        FieldKind::Number,
        FieldKind::Select,
        FieldKind::Radio,
        FieldKind::Checkbox,
        FieldKind::Switch,
        FieldKind::Date,
        FieldKind::Range,
        FieldKind::Time,
        FieldKind::Slider,
        FieldKind::Rate,
        FieldKind::Cascader,
        FieldKind::Upload,
        FieldKind::Editor,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::Input => "input",
            FieldKind::TextArea => "textarea",
            FieldKind::Password => "password",
            FieldKind::Number => "number",
            FieldKind::Select => "select",
            FieldKind::Radio => "radio",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Switch => "switch",
            FieldKind::Date => "date",
            FieldKind::Range => "range",
            FieldKind::Time => "time",
            FieldKind::Slider => "slider",
            FieldKind::Rate => "rate",
            FieldKind::Cascader => "cascader",
            FieldKind::Upload => "upload",
            FieldKind::Editor => "editor",
            FieldKind::Unknown(raw) => raw,
        }
    }

    /// Kinds whose input is driven by an option list
    pub fn takes_options(&self) -> bool {
        matches!(
            self,
            FieldKind::Select | FieldKind::Radio | FieldKind::Checkbox | FieldKind::Cascader
        )
    }
}

impl From<String> for FieldKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "input" | "text" => FieldKind::Input,
            "textarea" => FieldKind::TextArea,
            "password" => FieldKind::Password,
            "number" => FieldKind::Number,
            "select" => FieldKind::Select,
            "radio" => FieldKind::Radio,
            "checkbox" => FieldKind::Checkbox,
            "switch" => FieldKind::Switch,
            "date" => FieldKind::Date,
            "range" => FieldKind::Range,
            "time" => FieldKind::Time,
            "slider" => FieldKind::Slider,
            "rate" => FieldKind::Rate,
            "cascader" => FieldKind::Cascader,
            "upload" => FieldKind::Upload,
            "editor" | "rich-text" | "richText" => FieldKind::Editor,
            _ => FieldKind::Unknown(raw),
        }
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry of an enumerable field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionItem {
    pub label: String,
    pub value: Value,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// One form/table/detail field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormItemSpec {
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub label: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<OptionItem>>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Keys this tool does not interpret, kept for export/import
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl FormItemSpec {
    pub fn new(kind: FieldKind, label: impl Into<String>, name: impl Into<String>) -> Self {
        FormItemSpec {
            kind,
            label: label.into(),
            name: name.into(),
            options: None,
            required: false,
            placeholder: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_options(mut self, options: Vec<OptionItem>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Endpoints called when the page loads and when it submits
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiSpec {
    pub initial_fetch: Vec<String>,
    pub submit_fetch: Vec<String>,
}

impl ApiSpec {
    /// Initial-load keys in call order, repeats dropped
    pub fn initial_calls(&self) -> Vec<&str> {
        dedupe(&self.initial_fetch)
    }

    /// Submit keys in call order, repeats dropped
    pub fn submit_calls(&self) -> Vec<&str> {
        dedupe(&self.submit_fetch)
    }
}

fn dedupe(keys: &[String]) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::with_capacity(keys.len());
    for key in keys {
        if !out.contains(&key.as_str()) {
            out.push(key);
        }
    }
    out
}

/// Where the generated artifact lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A new routed page at `path`
    Page {
        path: String,
        menu_label: Option<String>,
    },
    /// A component nested under an existing page's `components/` directory
    Component { owner_path: String, name: String },
}

impl Target {
    /// Route path of the page, or of the page that owns the component
    pub fn path(&self) -> &str {
        match self {
            Target::Page { path, .. } => path,
            Target::Component { owner_path, .. } => owner_path,
        }
    }

    pub fn is_routed(&self) -> bool {
        matches!(self, Target::Page { .. })
    }
}

/// The unit of generation
#[derive(Debug, Clone, PartialEq)]
pub struct PageSpec {
    pub archetype: Archetype,
    pub title: String,
    /// `formConfig` keys besides `title`
    pub form_config_extra: BTreeMap<String, Value>,
    pub fields: Vec<FormItemSpec>,
    pub api: ApiSpec,
    pub generate_detail_page: bool,
    /// Route path for the companion detail page (defaults under the form's directory)
    pub detail_path: Option<String>,
    pub target: Target,
}

impl PageSpec {
    /// A routed page with the archetype's default title and no fields
    pub fn new(archetype: Archetype, path: impl Into<String>) -> Self {
        PageSpec {
            archetype,
            title: archetype.layout.default_title().to_string(),
            form_config_extra: BTreeMap::new(),
            fields: Vec::new(),
            api: ApiSpec::default(),
            generate_detail_page: false,
            detail_path: None,
            target: Target::Page {
                path: path.into(),
                menu_label: None,
            },
        }
    }

    /// Whether this request also yields a companion detail artifact
    pub fn wants_detail_page(&self) -> bool {
        self.generate_detail_page && self.archetype.layout.is_form()
    }

    /// Route entry to register for this spec, `None` for nested components
    pub fn route_entry(&self) -> Option<RouteEntry> {
        match &self.target {
            Target::Page { path, menu_label } => {
                Some(RouteEntry::for_page(path, menu_label.clone()))
            }
            Target::Component { .. } => None,
        }
    }
}

/// One record in the application's route table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub path: String,
    pub component: String,
    pub exact: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl RouteEntry {
    /// Entry for a page generated under the pages root; components resolve relative to it
    pub fn for_page(path: &str, title: Option<String>) -> Self {
        RouteEntry {
            path: path.to_string(),
            component: format!(".{}", path),
            exact: true,
            title: title.filter(|t| !t.trim().is_empty()),
        }
    }
}

/// Sole observable outcome of a generation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    #[serde(alias = "success")]
    pub ok: bool,
    pub message: String,
}

impl GenerationResult {
    pub fn success(message: impl Into<String>) -> Self {
        GenerationResult {
            ok: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        GenerationResult {
            ok: false,
            message: message.into(),
        }
    }
}

impl From<GenerateError> for GenerationResult {
    fn from(err: GenerateError) -> Self {
        GenerationResult::failure(err.to_string())
    }
}
