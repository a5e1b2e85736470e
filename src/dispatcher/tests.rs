#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::config::{Project, ProjectConfig};
use crate::generator::{ArtifactRole, BuiltinFormatter, Formatter};
use crate::error::{GenerateError, Result};
use crate::routes::RouteStatus;
use crate::spec::{Action, Archetype, Layout, RouteEntry, Target};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CONFIG_TS: &str = "export default {\n  routes: [\n    { path: '/', component: './index', exact: true },\n  ],\n};\n";

fn project() -> (TempDir, Dispatcher) {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("config")).unwrap();
    fs::write(dir.path().join("config/config.ts"), CONFIG_TS).unwrap();
    let dispatcher = Dispatcher::new(Project::new(dir.path(), ProjectConfig::default()));
    (dir, dispatcher)
}

fn action(name: &str, payload: Value) -> Action {
    Action {
        action_type: format!("org.umi-plugin-page-creator.{}", name),
        payload,
    }
}

fn fields() -> Value {
    json!([
        {"type": "input", "label": "Customer", "name": "customer"},
        {"type": "number", "label": "Amount", "name": "amount"}
    ])
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

#[test]
fn test_handle_writes_page_and_route() {
    let (dir, dispatcher) = project();
    let reply = dispatcher.handle(&action(
        "shortForm",
        json!({"path": "/orders/new", "formItems": fields()}),
    ));
    assert!(reply.ok, "{}", reply.message);
    assert_eq!(reply.message, SUCCESS_MESSAGE);
    assert!(read(dir.path(), "src/pages/orders/new/index.tsx").contains("<Card title=\"Short Form\">"));
    assert!(read(dir.path(), "config/config.ts")
        .contains("    { path: '/orders/new', component: './orders/new', exact: true },\n  ],"));
}

#[test]
fn test_generate_reports_files_and_route() {
    let (dir, dispatcher) = project();
    let outcome = dispatcher
        .generate(&action(
            "longForm",
            json!({"formPath": "/orders/new", "formItems": fields(), "generateDetail": true}),
        ))
        .unwrap();
    assert_eq!(
        outcome.files,
        vec![
            dir.path().join("src/pages/orders/new/index.tsx"),
            dir.path().join("src/pages/orders/new/detail/index.tsx"),
        ]
    );
    assert_eq!(outcome.route, Some(RouteStatus::Inserted));
}

#[test]
fn test_render_does_not_touch_disk() {
    let (dir, dispatcher) = project();
    let artifacts = dispatcher
        .render(&action("table", json!({"path": "/orders", "formItems": fields()})))
        .unwrap();
    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0].role, ArtifactRole::Primary);
    assert!(artifacts[0].source.ends_with("};\n"));
    assert!(!dir.path().join("src").exists());
    assert_eq!(read(dir.path(), "config/config.ts"), CONFIG_TS);
}

#[test]
fn test_unknown_name_in_namespace_renders_short_form() {
    let (_dir, dispatcher) = project();
    let spec = dispatcher
        .spec_for(&action("wizard", json!({"path": "/a", "formItems": fields()})))
        .unwrap();
    assert_eq!(spec.archetype, Archetype::plain(Layout::ShortForm));
}

#[test]
fn test_foreign_action_is_rejected() {
    let (dir, dispatcher) = project();
    let reply = dispatcher.handle(&Action {
        action_type: "org.other.table".into(),
        payload: json!({"path": "/a", "formItems": fields()}),
    });
    assert!(!reply.ok);
    assert_eq!(reply.message, "Unsupported archetype 'org.other.table'");
    assert!(!dir.path().join("src").exists());
}

#[test]
fn test_component_target_from_dir_name() {
    let (_dir, dispatcher) = project();
    let spec = dispatcher
        .spec_for(&action(
            "shortFormModal",
            json!({"path": "/orders", "dirName": "EditModal", "formItems": fields()}),
        ))
        .unwrap();
    assert_eq!(
        spec.target,
        Target::Component {
            owner_path: "/orders".into(),
            name: "EditModal".into()
        }
    );
}

#[test]
fn test_route_config_without_routes_fails_before_writing() {
    let (dir, dispatcher) = project();
    fs::write(dir.path().join("config/config.ts"), "export default { hash: true };\n").unwrap();
    let err = dispatcher
        .generate(&action("shortForm", json!({"path": "/a", "formItems": fields()})))
        .unwrap_err();
    assert_eq!(err.kind(), "route_table_not_found");
    assert!(!dir.path().join("src/pages/a").exists());
}

#[test]
fn test_add_route_is_idempotent() {
    let (dir, dispatcher) = project();
    let entry = RouteEntry::for_page("/reports", Some("Reports".into()));
    assert_eq!(dispatcher.add_route(&entry).unwrap(), RouteStatus::Inserted);
    let once = read(dir.path(), "config/config.ts");
    assert!(once.contains("{ path: '/reports', component: './reports', exact: true, title: 'Reports' },"));
    assert_eq!(dispatcher.add_route(&entry).unwrap(), RouteStatus::AlreadyPresent);
    assert_eq!(read(dir.path(), "config/config.ts"), once);
}

struct RejectingFormatter;

impl Formatter for RejectingFormatter {
    fn name(&self) -> &'static str {
        "rejecting"
    }

    fn format(&self, _source: &str) -> Result<String> {
        Err(GenerateError::SyntaxError {
            message: "Unexpected token (1:1)".into(),
        })
    }
}

#[test]
fn test_formatter_failure_writes_nothing() {
    let (dir, _) = project();
    let dispatcher = Dispatcher::with_formatter(
        Project::new(dir.path(), ProjectConfig::default()),
        Box::new(RejectingFormatter),
    );
    let reply = dispatcher.handle(&action("shortForm", json!({"path": "/a", "formItems": fields()})));
    assert!(!reply.ok);
    assert!(reply.message.contains("Unexpected token (1:1)"));
    assert!(!dir.path().join("src").exists());
    assert_eq!(read(dir.path(), "config/config.ts"), CONFIG_TS);

    let builtin = Dispatcher::with_formatter(
        Project::new(dir.path(), ProjectConfig::default()),
        Box::new(BuiltinFormatter),
    );
    assert!(builtin.handle(&action("shortForm", json!({"path": "/a", "formItems": fields()}))).ok);
}
