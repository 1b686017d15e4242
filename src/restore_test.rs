use crate::field::FormSurface;
use crate::memory::{MemoryField, MemoryForm};
use crate::snapshot::serialize;

use super::*;

fn run(form: &MemoryForm, serialized: Option<&str>) -> Result<RestoreReport, LoadError> {
    restore(serialized, |name| form.fields_named(name))
}

fn color_form() -> MemoryForm {
    MemoryForm::new()
        .with_field(MemoryField::radio("color", "red", false))
        .with_field(MemoryField::radio("color", "green", false))
        .with_field(MemoryField::radio("color", "blue", false))
}

// =============================================================
// Parse failures restore nothing
// =============================================================

#[test]
fn restore_none_is_no_data() {
    let form = MemoryForm::new().with_field(MemoryField::text("name", ""));
    assert!(matches!(run(&form, None), Err(LoadError::NoData)));
}

#[test]
fn restore_empty_string_is_no_data() {
    let form = MemoryForm::new().with_field(MemoryField::text("name", ""));
    assert!(matches!(run(&form, Some("")), Err(LoadError::NoData)));
}

#[test]
fn restore_garbage_touches_nothing() {
    let form = MemoryForm::new().with_field(MemoryField::text("name", "keep"));
    assert!(matches!(run(&form, Some(r#"{"name":"Alice""#)), Err(LoadError::Malformed(_))));
    let field = form.field("name").unwrap();
    assert_eq!(field.value(), "keep");
    assert_eq!(field.change_count(), 0);
}

// =============================================================
// Text-like fields
// =============================================================

#[test]
fn restore_text_sets_value_and_notifies() {
    let form = MemoryForm::new().with_field(MemoryField::text("name", ""));
    let report = run(&form, Some(r#"{"name":"Alice"}"#)).unwrap();
    assert!(report.restored());
    assert_eq!(report.applied, 1);
    let field = form.field("name").unwrap();
    assert_eq!(field.value(), "Alice");
    assert_eq!(field.change_count(), 1);
}

#[test]
fn restore_text_writes_even_when_unchanged() {
    let form = MemoryForm::new().with_field(MemoryField::text("name", "Alice"));
    let report = run(&form, Some(r#"{"name":"Alice"}"#)).unwrap();
    assert_eq!(report.applied, 1);
    assert_eq!(form.field("name").unwrap().change_count(), 1);
}

#[test]
fn restore_text_first_match_wins() {
    let form = MemoryForm::new()
        .with_field(MemoryField::text("alias", ""))
        .with_field(MemoryField::text("alias", ""));
    run(&form, Some(r#"{"alias":"ally"}"#)).unwrap();
    let fields = form.fields_named("alias");
    assert_eq!(fields[0].value(), "ally");
    assert_eq!(fields[1].value(), "");
    assert_eq!(fields[1].change_count(), 0);
}

#[test]
fn restore_missing_field_is_skipped() {
    let form = MemoryForm::new().with_field(MemoryField::text("name", ""));
    let report = run(&form, Some(r#"{"ghost":"boo","name":"Alice"}"#)).unwrap();
    assert_eq!(report, RestoreReport { applied: 1, unchanged: 0, missing: 1 });
}

#[test]
fn restore_only_missing_fields_reports_nothing_restored() {
    let form = MemoryForm::new();
    let report = run(&form, Some(r#"{"ghost":"boo"}"#)).unwrap();
    assert!(!report.restored());
}

// =============================================================
// Checkboxes
// =============================================================

#[test]
fn restore_checkbox_true_checks_and_notifies_once() {
    let form = MemoryForm::new().with_field(MemoryField::checkbox("subscribe", false));
    let report = run(&form, Some(r#"{"subscribe":"true"}"#)).unwrap();
    assert!(report.restored());
    let field = form.field("subscribe").unwrap();
    assert!(field.is_checked());
    assert_eq!(field.change_count(), 1);
}

#[test]
fn restore_checkbox_false_leaves_unchecked() {
    let form = MemoryForm::new().with_field(MemoryField::checkbox("subscribe", false));
    let report = run(&form, Some(r#"{"subscribe":"false"}"#)).unwrap();
    assert!(!report.restored());
    assert!(!form.field("subscribe").unwrap().is_checked());
    assert_eq!(form.field("subscribe").unwrap().change_count(), 0);
}

#[test]
fn restore_checkbox_already_checked_is_unchanged() {
    let form = MemoryForm::new().with_field(MemoryField::checkbox("subscribe", true));
    let report = run(&form, Some(r#"{"subscribe":"true"}"#)).unwrap();
    assert_eq!(report, RestoreReport { applied: 0, unchanged: 1, missing: 0 });
    assert_eq!(form.field("subscribe").unwrap().change_count(), 0);
}

#[test]
fn restore_never_unchecks_checkbox() {
    let form = MemoryForm::new().with_field(MemoryField::checkbox("subscribe", true));
    run(&form, Some(r#"{"subscribe":"on"}"#)).unwrap();
    assert!(form.field("subscribe").unwrap().is_checked());
}

// =============================================================
// Radios
// =============================================================

#[test]
fn restore_radio_checks_only_matching_member() {
    let form = color_form();
    let report = run(&form, Some(r#"{"color":"green"}"#)).unwrap();
    assert!(report.restored());
    let checked: Vec<String> = form
        .fields_named("color")
        .iter()
        .filter(|f| f.is_checked())
        .map(FormField::value)
        .collect();
    assert_eq!(checked, vec!["green".to_string()]);
    let changes: Vec<usize> = form.fields_named("color").iter().map(MemoryField::change_count).collect();
    assert_eq!(changes, vec![0, 1, 0]);
}

#[test]
fn restore_radio_replaces_default_selection() {
    let form = MemoryForm::new()
        .with_field(MemoryField::radio("color", "red", true))
        .with_field(MemoryField::radio("color", "blue", false));
    run(&form, Some(r#"{"color":"blue"}"#)).unwrap();
    let radios = form.fields_named("color");
    assert!(!radios[0].is_checked());
    assert!(radios[1].is_checked());
}

#[test]
fn restore_radio_unknown_value_does_nothing() {
    let form = color_form();
    let report = run(&form, Some(r#"{"color":"purple"}"#)).unwrap();
    assert_eq!(report, RestoreReport { applied: 0, unchanged: 0, missing: 1 });
    assert!(form.fields_named("color").iter().all(|f| !f.is_checked()));
}

#[test]
fn restore_radio_already_checked_is_unchanged() {
    let form = MemoryForm::new().with_field(MemoryField::radio("color", "red", true));
    let report = run(&form, Some(r#"{"color":"red"}"#)).unwrap();
    assert!(!report.restored());
    assert_eq!(report.unchanged, 1);
}

// =============================================================
// Round trip through the serializer
// =============================================================

#[test]
fn serialize_then_restore_round_trips_into_fresh_form() {
    let source = MemoryForm::new()
        .with_field(MemoryField::text("name", "Alice"))
        .with_field(MemoryField::checkbox("subscribe", true))
        .with_field(MemoryField::radio("color", "red", false))
        .with_field(MemoryField::radio("color", "blue", true))
        .with_field(MemoryField::text("notes", ""));
    let raw = serialize(source.submitted_values());

    let target = MemoryForm::new()
        .with_field(MemoryField::text("name", ""))
        .with_field(MemoryField::checkbox("subscribe", false))
        .with_field(MemoryField::radio("color", "red", false))
        .with_field(MemoryField::radio("color", "blue", false))
        .with_field(MemoryField::text("notes", ""));
    let report = run(&target, Some(&raw)).unwrap();

    assert_eq!(report.applied, 3);
    assert_eq!(target.submitted_values(), source.submitted_values());
}

#[test]
fn restore_snapshot_skips_nothing_it_was_given() {
    let snapshot = FormSnapshot::from_fields([("name", "Alice")]);
    let form = MemoryForm::new().with_field(MemoryField::text("name", ""));
    let report = restore_snapshot(&snapshot, |name| form.fields_named(name));
    assert_eq!(report.applied, 1);
}
