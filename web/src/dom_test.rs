use super::*;

#[test]
fn button_like_inputs_are_excluded() {
    for t in ["submit", "button", "reset", "image", "file", "SUBMIT", " file "] {
        assert!(is_button_type(t), "type {t:?}");
    }
}

#[test]
fn data_inputs_are_kept() {
    for t in ["text", "email", "checkbox", "radio", "hidden", "number", "date", ""] {
        assert!(!is_button_type(t), "type {t:?}");
    }
}

#[test]
fn field_selector_covers_every_control_tag() {
    for tag in ["input", "select", "textarea"] {
        assert!(FIELD_SELECTOR.contains(&format!("{tag}[name]")));
    }
}
