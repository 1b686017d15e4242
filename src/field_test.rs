use crate::memory::{MemoryField, MemoryForm};

use super::*;

// =============================================================
// FieldKind
// =============================================================

#[test]
fn kind_from_lowercase_tags() {
    assert_eq!(FieldKind::from_type_tag("checkbox"), FieldKind::Checkbox);
    assert_eq!(FieldKind::from_type_tag("radio"), FieldKind::Radio);
    assert_eq!(FieldKind::from_type_tag("text"), FieldKind::Other);
}

#[test]
fn kind_from_tag_ignores_case() {
    assert_eq!(FieldKind::from_type_tag("CHECKBOX"), FieldKind::Checkbox);
    assert_eq!(FieldKind::from_type_tag("Radio"), FieldKind::Radio);
}

#[test]
fn kind_from_other_tags() {
    for tag in ["", "select-one", "textarea", "email", "hidden", "checkboxes"] {
        assert_eq!(FieldKind::from_type_tag(tag), FieldKind::Other, "tag {tag:?}");
    }
}

// =============================================================
// submitted_value
// =============================================================

#[test]
fn text_contributes_its_value() {
    assert_eq!(MemoryField::text("name", "Alice").submitted_value().as_deref(), Some("Alice"));
}

#[test]
fn text_contributes_empty_value_as_is() {
    assert_eq!(MemoryField::text("name", "").submitted_value().as_deref(), Some(""));
}

#[test]
fn checked_checkbox_contributes_true() {
    assert_eq!(MemoryField::checkbox("subscribe", true).submitted_value().as_deref(), Some(CHECKED_VALUE));
}

#[test]
fn unchecked_checkbox_contributes_nothing() {
    assert_eq!(MemoryField::checkbox("subscribe", false).submitted_value(), None);
}

#[test]
fn checked_radio_contributes_its_value() {
    assert_eq!(MemoryField::radio("color", "green", true).submitted_value().as_deref(), Some("green"));
}

#[test]
fn unchecked_radio_contributes_nothing() {
    assert_eq!(MemoryField::radio("color", "green", false).submitted_value(), None);
}

#[test]
fn disabled_field_contributes_nothing() {
    let field = MemoryField::text("name", "Alice");
    field.set_disabled(true);
    assert_eq!(field.submitted_value(), None);
}

// =============================================================
// FormSurface defaults
// =============================================================

#[test]
fn submitted_values_in_document_order() {
    let form = MemoryForm::new()
        .with_field(MemoryField::text("name", "Alice"))
        .with_field(MemoryField::checkbox("subscribe", true))
        .with_field(MemoryField::checkbox("spam", false))
        .with_field(MemoryField::radio("color", "red", false))
        .with_field(MemoryField::radio("color", "green", true));
    assert_eq!(
        form.submitted_values(),
        vec![
            ("name".to_string(), "Alice".to_string()),
            ("subscribe".to_string(), "true".to_string()),
            ("color".to_string(), "green".to_string()),
        ]
    );
}

#[test]
fn fields_named_returns_every_match() {
    let form = MemoryForm::new()
        .with_field(MemoryField::radio("color", "red", false))
        .with_field(MemoryField::text("name", ""))
        .with_field(MemoryField::radio("color", "blue", false));
    let values: Vec<String> = form.fields_named("color").iter().map(FormField::value).collect();
    assert_eq!(values, vec!["red".to_string(), "blue".to_string()]);
    assert!(form.fields_named("missing").is_empty());
}
