#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::error::GenerateError;
use crate::spec::RouteEntry;

const UMI_CONFIG: &str = "import { defineConfig } from 'umi';

export default defineConfig({
  hash: true,
  antd: {},
  routes: [
    { path: '/', component: './index', exact: true },
    // user pages
    { path: '/users', component: './users', exact: true },
  ],
  theme: { 'primary-color': '#1DA57A' },
});
";

fn entry(path: &str) -> RouteEntry {
    RouteEntry::for_page(path, None)
}

#[test]
fn test_insert_after_last_entry_with_trailing_comma() {
    let patch = insert_route(UMI_CONFIG, &entry("/orders/new")).unwrap();
    assert_eq!(patch.status, RouteStatus::Inserted);
    let expected = UMI_CONFIG.replace(
        "    { path: '/users', component: './users', exact: true },\n",
        "    { path: '/users', component: './users', exact: true },\n    { path: '/orders/new', component: './orders/new', exact: true },\n",
    );
    assert_eq!(patch.text, expected);
}

#[test]
fn test_insert_keeps_trailing_comment_on_its_line() {
    let src = "export default {\n  routes: [\n    { path: '/', component: './index' } // home\n  ]\n}\n";
    let patch = insert_route(src, &entry("/a")).unwrap();
    assert_eq!(
        patch.text,
        "export default {\n  routes: [\n    { path: '/', component: './index' }, // home\n    { path: '/a', component: './a', exact: true }\n  ]\n}\n"
    );
}

#[test]
fn test_insert_into_empty_array() {
    let src = "export default {\n  routes: [],\n};\n";
    let patch = insert_route(src, &entry("/a")).unwrap();
    assert_eq!(
        patch.text,
        "export default {\n  routes: [\n    { path: '/a', component: './a', exact: true },\n  ],\n};\n"
    );
}

#[test]
fn test_insert_into_single_line_array() {
    let src = "export default { routes: [{ path: '/' }] };\n";
    let patch = insert_route(src, &entry("/a")).unwrap();
    assert_eq!(
        patch.text,
        "export default { routes: [{ path: '/' }, { path: '/a', component: './a', exact: true }] };\n"
    );
}

#[test]
fn test_duplicate_in_nested_routes_is_a_no_op() {
    let src = "export default {
  routes: [
    {
      path: '/',
      component: '../layouts/index',
      routes: [{ path: '/orders/new', component: './orders/new' }],
    },
  ],
};
";
    let patch = insert_route(src, &entry("/orders/new")).unwrap();
    assert_eq!(patch.status, RouteStatus::AlreadyPresent);
    assert!(!patch.changed());
    assert_eq!(patch.text, src);
}

#[test]
fn test_insert_is_idempotent() {
    let first = insert_route(UMI_CONFIG, &entry("/orders/new")).unwrap();
    let second = insert_route(&first.text, &entry("/orders/new")).unwrap();
    assert_eq!(second.status, RouteStatus::AlreadyPresent);
    assert_eq!(second.text, first.text);
}

#[test]
fn test_existing_entries_are_preserved() {
    let before = ScriptDialect.locate(UMI_CONFIG).unwrap();
    let patch = insert_route(UMI_CONFIG, &entry("/orders/new")).unwrap();
    let after = ScriptDialect.locate(&patch.text).unwrap();
    assert_eq!(after.paths.len(), before.paths.len() + 1);
    assert_eq!(&after.paths[..before.paths.len()], &before.paths[..]);
    assert_eq!(after.paths.last().unwrap(), "/orders/new");
    // Everything before the insertion point is untouched
    let cut = UMI_CONFIG.find("  ],").unwrap();
    assert_eq!(&patch.text[..cut - 1], &UMI_CONFIG[..cut - 1]);
    assert!(patch.text.ends_with("  ],\n  theme: { 'primary-color': '#1DA57A' },\n});\n"));
}

#[test]
fn test_crlf_and_double_quotes_are_followed() {
    let src = "export default {\r\n  routes: [\r\n    { path: \"/\" },\r\n  ],\r\n};\r\n";
    let patch = insert_route(src, &entry("/a")).unwrap();
    assert_eq!(
        patch.text,
        "export default {\r\n  routes: [\r\n    { path: \"/\" },\r\n    { path: \"/a\", component: \"./a\", exact: true },\r\n  ],\r\n};\r\n"
    );
}

#[test]
fn test_four_space_indentation() {
    let src = "export default {\n    routes: [],\n};\n";
    assert_eq!(detect_indent_unit(src), "    ");
    let patch = insert_route(src, &entry("/a")).unwrap();
    assert!(patch
        .text
        .contains("    routes: [\n        { path: '/a', component: './a', exact: true },\n    ],"));
}

#[test]
fn test_brackets_inside_strings_and_regexes_are_ignored() {
    let src = "const re = /\\]/;\nconst note = `routes: [${re}]`;\nexport default {\n  title: 'a [b',\n  routes: [\n    { path: '/' },\n  ],\n};\n";
    let patch = insert_route(src, &entry("/a")).unwrap();
    assert!(patch
        .text
        .contains("    { path: '/' },\n    { path: '/a', component: './a', exact: true },\n  ],"));
    assert!(patch.text.starts_with("const re = /\\]/;\nconst note = `routes: [${re}]`;\n"));
}

#[test]
fn test_typed_config_through_binding() {
    let src = "import type { IConfig } from 'umi';\n\nconst config: IConfig = {\n  routes: [\n    { path: '/' },\n  ] as IRoute[],\n};\n\nexport default config;\n";
    let patch = insert_route(src, &entry("/a")).unwrap();
    assert_eq!(patch.status, RouteStatus::Inserted);
    assert!(patch
        .text
        .contains("    { path: '/' },\n    { path: '/a', component: './a', exact: true },\n  ] as IRoute[],"));
}

#[test]
fn test_long_entry_breaks_across_lines() {
    let src = "export default {\n  routes: [\n    { path: '/' },\n  ],\n};\n";
    let entry = RouteEntry::for_page("/orders/new", Some("New order".into()));
    let patch = insert_route_with(&ScriptDialect, src, &entry, 60).unwrap();
    assert!(patch.text.contains(
        "    { path: '/' },\n    {\n      path: '/orders/new',\n      component: './orders/new',\n      exact: true,\n      title: 'New order',\n    },\n  ],"
    ));
}

#[test]
fn test_json_route_config() {
    let src = "{\n  \"routes\": [\n    {\"path\": \"/\"}\n  ]\n}\n";
    let patch = insert_route_with(&JsonDialect, src, &entry("/a"), DEFAULT_PRINT_WIDTH).unwrap();
    assert_eq!(
        patch.text,
        "{\n  \"routes\": [\n    {\"path\": \"/\"},\n    {\"path\": \"/a\", \"component\": \"./a\", \"exact\": true}\n  ]\n}\n"
    );
    let value: serde_json::Value = serde_json::from_str(&patch.text).unwrap();
    assert_eq!(value["routes"][1]["component"], "./a");
}

#[test]
fn test_dialect_for_path() {
    assert_eq!(dialect_for_path(std::path::Path::new("config/routes.json")).name(), "json");
    assert_eq!(dialect_for_path(std::path::Path::new("config/config.ts")).name(), "script");
    assert_eq!(dialect_for_path(std::path::Path::new(".umirc.js")).name(), "script");
}

#[test]
fn test_route_table_not_found() {
    let err = insert_route("export default { routes: 'nope' };", &entry("/a")).unwrap_err();
    assert_eq!(err.kind(), "route_table_not_found");
    let err = insert_route("module.exports = { routes: [] };", &entry("/a")).unwrap_err();
    assert!(matches!(err, GenerateError::RouteTableNotFound { .. }));
}

#[test]
fn test_unparseable_config_is_a_syntax_error() {
    let err = insert_route("export default { routes: ['/a }", &entry("/a")).unwrap_err();
    assert_eq!(err.kind(), "syntax_error");
}

#[test]
fn test_generic_annotated_config_binding() {
    let src = "const config: Record<string, unknown> = {\n  routes: [ { path: '/', component: './index' }, ],\n};\nexport default config;\n";
    let patch = insert_route(src, &entry("/orders")).unwrap();
    assert_eq!(patch.status, RouteStatus::Inserted);
    assert_eq!(
        patch.text,
        "const config: Record<string, unknown> = {\n  routes: [ { path: '/', component: './index' }, { path: '/orders', component: './orders', exact: true }, ],\n};\nexport default config;\n"
    );
}

#[test]
fn test_wrapped_entry_follows_crlf() {
    let src = "export default {\r\n  routes: [\r\n    { path: '/' },\r\n  ],\r\n};\r\n";
    let entry = RouteEntry::for_page("/orders/new", Some("New order".into()));
    let patch = insert_route_with(&ScriptDialect, src, &entry, 60).unwrap();
    assert_eq!(
        patch.text,
        "export default {\r\n  routes: [\r\n    { path: '/' },\r\n    {\r\n      path: '/orders/new',\r\n      component: './orders/new',\r\n      exact: true,\r\n      title: 'New order',\r\n    },\r\n  ],\r\n};\r\n"
    );
    assert_eq!(patch.text.matches('\n').count(), patch.text.matches("\r\n").count());
}
