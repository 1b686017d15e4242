//! Host-facing traits for forms, their fields, and the notification section.
//!
//! SYSTEM CONTEXT
//! ==============
//! The core never sees DOM nodes. The browser adapter wraps elements in types
//! implementing these traits; the [`crate::memory`] module provides plain
//! in-memory versions. Methods take `&self` because host handles (DOM
//! elements) are shared references with interior mutability.

/// Value a checked checkbox contributes, and the only value that re-checks one.
pub const CHECKED_VALUE: &str = "true";

/// Type tag that decides how a cached value is written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Checkbox,
    Radio,
    /// Text-like inputs, selects, textareas and anything else with a value.
    Other,
}

impl FieldKind {
    /// Classify an element type tag such as `"checkbox"` or `"RADIO"`.
    #[must_use]
    pub fn from_type_tag(tag: &str) -> Self {
        let tag = tag.trim();
        if tag.eq_ignore_ascii_case("checkbox") {
            Self::Checkbox
        } else if tag.eq_ignore_ascii_case("radio") {
            Self::Radio
        } else {
            Self::Other
        }
    }
}

/// One live form control.
pub trait FormField {
    fn name(&self) -> String;
    fn kind(&self) -> FieldKind;
    fn value(&self) -> String;
    fn set_value(&self, value: &str);
    fn is_checked(&self) -> bool;
    fn set_checked(&self, checked: bool);

    fn is_disabled(&self) -> bool {
        false
    }

    /// Emit a change notification so dependent page logic sees the new value.
    fn notify_change(&self);

    /// The value this field contributes to a cached snapshot, with checked
    /// state already resolved. `None` means the field contributes nothing.
    fn submitted_value(&self) -> Option<String> {
        if self.is_disabled() {
            return None;
        }
        match self.kind() {
            FieldKind::Checkbox => self.is_checked().then(|| CHECKED_VALUE.to_string()),
            FieldKind::Radio => self.is_checked().then(|| self.value()),
            FieldKind::Other => Some(self.value()),
        }
    }
}

/// Optional "your input was restored" section inside a form.
pub trait NoticeSection {
    fn show(&self);
    fn hide(&self);
}

/// A cache-enabled form container.
pub trait FormSurface {
    type Field: FormField;
    type Notice: NoticeSection;

    /// Every field in document order.
    fn fields(&self) -> Vec<Self::Field>;

    /// Fields sharing `name`, in document order.
    fn fields_named(&self, name: &str) -> Vec<Self::Field> {
        self.fields().into_iter().filter(|f| f.name() == name).collect()
    }

    fn notice_section(&self) -> Option<Self::Notice>;

    /// Whether the notice section contains a reset control.
    fn has_reset_control(&self) -> bool;

    /// Return every field to its blank or default state.
    fn reset(&self);

    /// `(name, value)` pairs the form would currently cache, in document order.
    fn submitted_values(&self) -> Vec<(String, String)> {
        self.fields()
            .iter()
            .filter_map(|f| f.submitted_value().map(|v| (f.name(), v)))
            .collect()
    }
}

#[cfg(test)]
#[path = "field_test.rs"]
mod tests;
