use form_builder::domain::{
    BuilderError, FieldAttribute, FieldType, FieldValue, FormBuilder, REQUIRED_RULE, WidgetKind,
    parse_fields,
};
use pretty_assertions::assert_eq;

fn field(builder: &mut FormBuilder, kind: &str, label: &str, name: &str) -> usize {
    let index = builder.add_field();
    builder.update_field(index, FieldAttribute::Type, kind).unwrap();
    builder.update_field(index, FieldAttribute::Label, label).unwrap();
    builder.update_field(index, FieldAttribute::Name, name).unwrap();
    index
}

#[test]
fn saved_config_loads_back_into_an_equal_field_list() {
    let mut builder = FormBuilder::new();
    field(&mut builder, "text", "Email", "email");
    let color = field(&mut builder, "dropdown", "Color", "color");
    builder
        .update_field(color, FieldAttribute::Options, "red,green,blue")
        .unwrap();
    builder.toggle_validation(0, REQUIRED_RULE, true).unwrap();

    builder.save_config().unwrap();
    let saved = builder.fields().to_vec();

    let mut other = FormBuilder::new();
    other.set_config_buffer(builder.config_buffer());
    assert_eq!(other.load_config().unwrap(), 2);
    assert_eq!(other.fields(), saved.as_slice());
}

#[test]
fn config_document_uses_the_documented_keys() {
    let mut builder = FormBuilder::new();
    field(&mut builder, "radio", "Size", "size");
    builder
        .update_field(0, FieldAttribute::Options, "s,m")
        .unwrap();
    builder.save_config().unwrap();
    let doc: serde_json::Value = serde_json::from_str(builder.config_buffer()).unwrap();
    assert_eq!(
        doc,
        serde_json::json!([{
            "type": "radio",
            "label": "Size",
            "name": "size",
            "options": ["s", "m"],
            "validation": {}
        }])
    );
}

#[test]
fn invalid_buffer_leaves_fields_untouched() {
    let mut builder = FormBuilder::new();
    field(&mut builder, "text", "Email", "email");
    let before = builder.fields().to_vec();

    for bad in ["", "{not json", r#"{"type": "text"}"#, r#"[{"label": 5}]"#] {
        builder.set_config_buffer(bad);
        let err = builder.load_config().unwrap_err();
        assert!(matches!(err, BuilderError::ConfigParse(_)), "{bad}");
        assert_eq!(err.to_string(), "Invalid JSON format");
        assert_eq!(builder.fields(), before.as_slice());
    }
}

#[test]
fn loading_keeps_unknown_types_and_fills_missing_keys() {
    let fields = parse_fields(r#"[{"type": "date", "name": "when"}, {}]"#).unwrap();
    assert_eq!(fields[0].field_type, FieldType::Unknown("date".into()));
    assert_eq!(fields[0].label, "");
    assert_eq!(fields[1].field_type, FieldType::Unset);
    assert!(fields[1].options.is_empty());
}

#[test]
fn submit_reports_the_first_failing_field_in_order() {
    let mut builder = FormBuilder::new();
    field(&mut builder, "text", "Email", "email");
    builder.toggle_validation(0, REQUIRED_RULE, true).unwrap();
    builder.add_field();

    let err = builder.submit().unwrap_err();
    assert!(matches!(err, BuilderError::RequiredField { index: 0, .. }));
    assert_eq!(err.to_string(), "Email is required.");

    builder.set_value("email", FieldValue::text("a@b.c"));
    let err = builder.submit().unwrap_err();
    assert!(matches!(err, BuilderError::IncompleteField { index: 1 }));
    assert_eq!(
        err.to_string(),
        "All fields must have a type, label, and name."
    );
}

#[test]
fn successful_submit_snapshots_every_value() {
    let mut builder = FormBuilder::new();
    field(&mut builder, "text", "Email", "email");
    field(&mut builder, "checkbox", "Subscribe", "subscribe");
    builder.set_value("email", FieldValue::text("a@b.c"));
    builder.set_value("subscribe", FieldValue::Flag(true));

    let submission = builder.submit().unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&submission.to_pretty_json().unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"email": "a@b.c", "subscribe": true})
    );
    assert!(submission.message().starts_with("Form submitted\n"));
}

#[test]
fn unchecked_required_checkbox_blocks_submit() {
    let mut builder = FormBuilder::new();
    field(&mut builder, "checkbox", "Terms", "tos");
    builder.toggle_validation(0, REQUIRED_RULE, true).unwrap();
    builder.set_value("tos", FieldValue::Flag(false));
    assert!(matches!(
        builder.submit(),
        Err(BuilderError::RequiredField { .. })
    ));
    builder.set_value("tos", FieldValue::Flag(true));
    assert!(builder.submit().is_ok());
}

#[test]
fn renaming_a_field_drops_its_stale_value() {
    let mut builder = FormBuilder::new();
    field(&mut builder, "text", "Email", "email");
    builder.set_value("email", FieldValue::text("a@b.c"));
    builder
        .update_field(0, FieldAttribute::Name, "mail")
        .unwrap();
    assert!(builder.values().get("email").is_none());
    assert_eq!(builder.fields()[0].field_type.kind(), Some(WidgetKind::Text));
}
