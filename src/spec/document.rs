use crate::error::{GenerateError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use super::types::{ApiSpec, Archetype, FormItemSpec, PageSpec, Target};
use super::validate::{normalize_route_path, validate_component_name};

/// `formConfig` object: the page title plus any keys the UI stores alongside it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Exported page configuration, copied out of and pasted back into the UI
///
/// Shape: `{formConfig, formItems, initialFetch, submitFetch}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDocument {
    #[serde(default)]
    pub form_config: FormConfig,
    #[serde(default)]
    pub form_items: Vec<FormItemSpec>,
    #[serde(default)]
    pub initial_fetch: Vec<String>,
    #[serde(default)]
    pub submit_fetch: Vec<String>,
}

impl ConfigDocument {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| GenerateError::InvalidPayload {
            message: e.to_string(),
        })
    }

    /// Two-space indented JSON, the format the UI copies to the clipboard
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| GenerateError::InvalidPayload {
            message: e.to_string(),
        })
    }
}

impl PageSpec {
    /// Export the parts of the page spec the configuration document carries
    pub fn export(&self) -> ConfigDocument {
        ConfigDocument {
            form_config: FormConfig {
                title: Some(self.title.clone()),
                extra: self.form_config_extra.clone(),
            },
            form_items: self.fields.clone(),
            initial_fetch: self.api.initial_fetch.clone(),
            submit_fetch: self.api.submit_fetch.clone(),
        }
    }

    /// Replace title, fields and api lists with those of an imported document
    ///
    /// Missing keys fall back to the archetype's defaults, matching what the
    /// UI does for a partial document.
    pub fn import(&mut self, doc: ConfigDocument) {
        self.title = doc
            .form_config
            .title
            .unwrap_or_else(|| self.archetype.layout.default_title().to_string());
        self.form_config_extra = doc.form_config.extra;
        self.fields = doc.form_items;
        self.api = ApiSpec {
            initial_fetch: doc.initial_fetch,
            submit_fetch: doc.submit_fetch,
        };
    }
}

/// Inbound request: `{type, payload}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default)]
    pub payload: Value,
}

/// Payload object sent by the configuration UI
///
/// The UI sends `formPath`/`formMenu` instead of `path`/`menu` when a detail
/// page is generated too, and `dirName` for nested components; both spellings
/// are accepted. `detailMenu` is accepted but unused: the companion detail
/// page never gets a route, so it has no menu entry to label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    #[serde(default)]
    pub form_config: FormConfig,
    #[serde(default)]
    pub form_items: Vec<FormItemSpec>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub form_path: Option<String>,
    #[serde(default)]
    pub menu: Option<String>,
    #[serde(default)]
    pub form_menu: Option<String>,
    #[serde(default)]
    pub detail_path: Option<String>,
    #[serde(default)]
    pub detail_menu: Option<String>,
    #[serde(default)]
    pub initial_fetch: Vec<String>,
    #[serde(default)]
    pub submit_fetch: Vec<String>,
    #[serde(default)]
    pub generate_detail: bool,
    #[serde(default)]
    pub dir_name: Option<String>,
    #[serde(default)]
    pub component_name: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Payload {
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| GenerateError::InvalidPayload {
            message: e.to_string(),
        })
    }

    /// Read a payload file; `.yaml`/`.yml` are parsed as YAML, anything else as JSON
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read payload {}", path.display()))?;
        let is_yaml = path
            .extension()
            .map(|s| s == "yaml" || s == "yml")
            .unwrap_or(false);
        let payload = if is_yaml {
            serde_yaml::from_str(&content)
                .with_context(|| format!("invalid YAML payload {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("invalid JSON payload {}", path.display()))?
        };
        Ok(payload)
    }

    /// Build the immutable page spec this payload describes
    pub fn into_spec(self, archetype: Archetype) -> Result<PageSpec> {
        let raw_path = non_empty(self.path)
            .or(non_empty(self.form_path))
            .ok_or_else(|| GenerateError::InvalidTarget {
                reason: "payload has no target path".to_string(),
            })?;
        let path = normalize_route_path(&raw_path)?;

        let target = match non_empty(self.dir_name).or(non_empty(self.component_name)) {
            Some(name) => Target::Component {
                owner_path: path,
                name: validate_component_name(&name)?,
            },
            None => Target::Page {
                path,
                menu_label: non_empty(self.menu).or(non_empty(self.form_menu)),
            },
        };

        if let Some(label) = non_empty(self.detail_menu) {
            debug!(label = %label, "detailMenu ignored; detail pages are not routed");
        }

        let detail_path = match non_empty(self.detail_path) {
            Some(p) => Some(normalize_route_path(&p)?),
            None => None,
        };

        Ok(PageSpec {
            archetype,
            title: self
                .form_config
                .title
                .unwrap_or_else(|| archetype.layout.default_title().to_string()),
            form_config_extra: self.form_config.extra,
            fields: self.form_items,
            api: ApiSpec {
                initial_fetch: self.initial_fetch,
                submit_fetch: self.submit_fetch,
            },
            generate_detail_page: self.generate_detail,
            detail_path,
            target,
        })
    }
}
