#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::fields::{render_fields, FieldMode};
use super::*;
use crate::error::GenerateError;
use crate::spec::{
    field_identifiers, ApiSpec, Archetype, FieldKind, FormItemSpec, Layout, OptionItem, PageSpec,
    Target, Variant,
};
use serde_json::json;

fn spec_with(archetype: Archetype, fields: Vec<FormItemSpec>) -> PageSpec {
    let mut spec = PageSpec::new(archetype, "/orders/new");
    spec.title = "New order".into();
    spec.fields = fields;
    spec
}

fn sample_fields() -> Vec<FormItemSpec> {
    vec![
        FormItemSpec::new(FieldKind::Input, "Customer", "customer").required(),
        FormItemSpec::new(FieldKind::Select, "Status", "status").with_options(vec![
            OptionItem {
                label: "Open".into(),
                value: json!("open"),
            },
            OptionItem {
                label: "Closed".into(),
                value: json!("closed"),
            },
        ]),
        FormItemSpec::new(FieldKind::Date, "Due", "due_date"),
        FormItemSpec::new(FieldKind::Switch, "Urgent", "urgent"),
        FormItemSpec::new(FieldKind::TextArea, "Notes", "notes"),
    ]
}

fn formatted(archetype: Archetype, spec: &PageSpec) -> String {
    BuiltinFormatter
        .format(&assemble(archetype, spec).unwrap())
        .unwrap()
}

#[test]
fn test_short_form_exact_output() {
    let spec = spec_with(
        Archetype::plain(Layout::ShortForm),
        vec![FormItemSpec::new(FieldKind::Input, "Name", "name")],
    );
    let expected = "import React from 'react';
import { Button, Card, Form, Input } from 'antd';
import { Store } from 'antd/es/form/interface';

export default () => {
  const [form] = Form.useForm();

  const handleFinish = async (values: Store) => {
    console.log(values);
  };

  return (
    <Card title=\"New order\">
      <Form form={form} layout=\"vertical\" onFinish={handleFinish}>
        <Form.Item label=\"Name\" name=\"name\">
          <Input placeholder=\"Please enter Name\" />
        </Form.Item>
        <Form.Item>
          <Button type=\"primary\" htmlType=\"submit\">
            Submit
          </Button>
        </Form.Item>
      </Form>
    </Card>
  );
};
";
    assert_eq!(formatted(spec.archetype, &spec), expected);
}

#[test]
fn test_every_archetype_renders_balanced_source() {
    for archetype in Archetype::all() {
        let mut spec = spec_with(archetype, sample_fields());
        spec.api = ApiSpec {
            initial_fetch: vec!["order.detail".into()],
            submit_fetch: vec!["order.save".into()],
        };
        let out = formatted(archetype, &spec);
        assert!(out.starts_with("import React"), "{archetype}: {out}");
        assert!(out.contains("export default"), "{archetype}");
        assert!(out.ends_with("};\n"), "{archetype}");

        let bare = spec_with(archetype, sample_fields());
        BuiltinFormatter
            .format(&assemble(archetype, &bare).unwrap())
            .unwrap_or_else(|e| panic!("{archetype} without api: {e}"));
    }
}

#[test]
fn test_assembly_is_deterministic() {
    for archetype in Archetype::all() {
        let spec = spec_with(archetype, sample_fields());
        assert_eq!(
            assemble(archetype, &spec).unwrap(),
            assemble(archetype, &spec).unwrap()
        );
    }
}

#[test]
fn test_field_order_is_preserved() {
    for archetype in Archetype::all() {
        let spec = spec_with(archetype, sample_fields());
        let out = assemble(archetype, &spec).unwrap();
        let positions: Vec<usize> = ["Customer", "Status", "Due", "Urgent", "Notes"]
            .iter()
            .map(|label| {
                out.find(&format!("label=\"{label}\""))
                    .or_else(|| out.find(&format!("title: '{label}'")))
                    .unwrap_or_else(|| panic!("{archetype}: missing {label}"))
            })
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted, "{archetype}");
    }
}

#[test]
fn test_plain_and_modal_share_the_field_block() {
    let fields = sample_fields();
    let idents = field_identifiers(&fields).unwrap();
    for layout in Layout::ALL {
        let mode = match layout {
            Layout::ShortForm | Layout::LongForm => FieldMode::FormItem,
            Layout::ShortDetail | Layout::LongDetail => FieldMode::Description,
            Layout::Table => FieldMode::Column,
        };
        let block = render_fields(&fields, &idents, mode, layout == Layout::LongForm)
            .unwrap()
            .source;
        let framed = format!("\n{block}\n");
        let plain = assemble(Archetype::plain(layout), &spec_with(Archetype::plain(layout), fields.clone())).unwrap();
        let modal = assemble(Archetype::modal(layout), &spec_with(Archetype::modal(layout), fields.clone())).unwrap();
        assert!(plain.contains(&framed), "{layout:?} plain");
        assert!(modal.contains(&framed), "{layout:?} modal");
    }
}

#[test]
fn test_table_ends_with_edit_and_delete_columns() {
    for variant in [Variant::Plain, Variant::Modal] {
        let archetype = Archetype::new(Layout::Table, variant);
        let out = assemble(archetype, &spec_with(archetype, sample_fields())).unwrap();
        let last_field = out.find("dataIndex: 'notes'").unwrap();
        let edit = out.find("key: 'edit'").unwrap();
        let delete = out.find("key: 'delete'").unwrap();
        assert!(last_field < edit && edit < delete);
        assert_eq!(out.matches("dataIndex:").count(), 5);
        assert!(out.contains("history.push({ pathname: '/orders/new/edit'"));
    }
}

#[test]
fn test_long_form_wraps_items_in_grid() {
    let spec = spec_with(Archetype::plain(Layout::LongForm), sample_fields());
    let out = assemble(spec.archetype, &spec).unwrap();
    assert!(out.contains("        <Row gutter={24}>\n          <Col xl={8} lg={12} md={24}>\n            <Form.Item label=\"Customer\""));
    assert_eq!(out.matches("<Col ").count(), 5);
    assert!(out.contains("import { Button, Card, Col, DatePicker, Form, Input, Row, Select, Space, Switch } from 'antd';"));
}

#[test]
fn test_api_calls_render_in_order_without_repeats() {
    let mut spec = spec_with(Archetype::plain(Layout::ShortForm), sample_fields());
    spec.api = ApiSpec {
        initial_fetch: vec!["order.detail".into(), "customer.list".into(), "order.detail".into()],
        submit_fetch: vec!["order.save".into(), "audit.log".into()],
    };
    let out = assemble(spec.archetype, &spec).unwrap();
    assert_eq!(out.matches("API.order.detail.fetch").count(), 1);
    let detail = out.find("...(await API.order.detail.fetch({})),").unwrap();
    let customers = out.find("...(await API.customer.list.fetch({})),").unwrap();
    assert!(detail < customers);
    let save = out.find("await API.order.save.fetch(values);").unwrap();
    let audit = out.find("await API.audit.log.fetch(values);").unwrap();
    assert!(save < audit);
    assert!(out.starts_with("import React, { useEffect } from 'react';\n"));
    assert!(out.contains("message.success('Submitted successfully');"));
}

#[test]
fn test_detail_without_api_has_no_fetch_boilerplate() {
    let spec = spec_with(Archetype::plain(Layout::ShortDetail), sample_fields());
    let out = assemble(spec.archetype, &spec).unwrap();
    assert!(!out.contains("useEffect"));
    assert!(out.contains("  const [detail] = useState<Store>({});"));
    assert!(out.contains("<Descriptions.Item label=\"Urgent\">{detail.urgent ? 'Yes' : 'No'}</Descriptions.Item>"));
}

#[test]
fn test_title_needing_escapes_uses_expression_attribute() {
    let mut spec = spec_with(Archetype::modal(Layout::ShortDetail), sample_fields());
    spec.title = "Order \"draft\"".into();
    let out = assemble(spec.archetype, &spec).unwrap();
    assert!(out.contains("<Modal title={'Order \"draft\"'} visible={visible}"));
}

#[test]
fn test_validation_order() {
    let archetype = Archetype::plain(Layout::Table);

    let empty = spec_with(archetype, vec![]);
    assert_eq!(
        assemble(archetype, &empty).unwrap_err(),
        GenerateError::EmptySpec {
            archetype: "table".into()
        }
    );

    let dup = spec_with(
        archetype,
        vec![
            FormItemSpec::new(FieldKind::Unknown("colorpicker".into()), "A", "a"),
            FormItemSpec::new(FieldKind::Input, "A again", "a"),
        ],
    );
    assert_eq!(assemble(archetype, &dup).unwrap_err().kind(), "duplicate_field_name");

    let mut bad_key = spec_with(
        archetype,
        vec![FormItemSpec::new(FieldKind::Unknown("colorpicker".into()), "A", "a")],
    );
    bad_key.api.initial_fetch.push("order/list".into());
    assert_eq!(
        assemble(archetype, &bad_key).unwrap_err(),
        GenerateError::InvalidApiKey {
            key: "order/list".into()
        }
    );

    bad_key.api.initial_fetch.clear();
    assert_eq!(
        assemble(archetype, &bad_key).unwrap_err().kind(),
        "unsupported_field_kind"
    );
}

#[test]
fn test_companion_detail_artifact() {
    let mut spec = spec_with(Archetype::modal(Layout::LongForm), sample_fields());
    spec.generate_detail_page = true;
    let artifacts = assemble_artifacts(&spec).unwrap();
    assert_eq!(artifacts.len(), 2);
    assert_eq!(artifacts[0].role, ArtifactRole::Primary);
    assert_eq!(artifacts[1].role, ArtifactRole::Detail);
    assert_eq!(artifacts[1].archetype, Archetype::modal(Layout::LongDetail));
    assert!(artifacts[1].source.contains("<Descriptions column={3} bordered>"));

    let mut table = spec_with(Archetype::plain(Layout::Table), sample_fields());
    table.generate_detail_page = true;
    assert_eq!(assemble_artifacts(&table).unwrap().len(), 1);
}

#[test]
fn test_component_target_edit_path_uses_owner() {
    let mut spec = spec_with(Archetype::modal(Layout::Table), sample_fields());
    spec.target = Target::Component {
        owner_path: "/orders".into(),
        name: "OrderPicker".into(),
    };
    let out = assemble(spec.archetype, &spec).unwrap();
    assert!(out.contains("pathname: '/orders/edit'"));
}

#[test]
fn test_field_imports_follow_kinds() {
    let spec = spec_with(
        Archetype::plain(Layout::ShortForm),
        vec![
            FormItemSpec::new(FieldKind::Editor, "Body", "body"),
            FormItemSpec::new(FieldKind::Upload, "Attachments", "attachments"),
        ],
    );
    let out = assemble(spec.archetype, &spec).unwrap();
    let lines: Vec<&str> = out.lines().take(6).collect();
    assert_eq!(
        lines,
        vec![
            "import React from 'react';",
            "import { Button, Card, Form, Upload } from 'antd';",
            "import BraftEditor from 'braft-editor';",
            "import 'braft-editor/dist/index.css';",
            "import { UploadOutlined } from '@ant-design/icons';",
            "import { Store } from 'antd/es/form/interface';",
        ]
    );
}
