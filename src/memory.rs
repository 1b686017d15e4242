//! In-memory form model implementing the [`crate::field`] traits.
//!
//! Used by the test suite and by native hosts that want to drive a
//! [`crate::cache::FormCache`] without a browser. Fields are cheap shared
//! handles, like DOM elements: cloning a [`MemoryField`] yields another
//! handle to the same control.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::field::{FieldKind, FormField, FormSurface, NoticeSection};

#[derive(Debug)]
struct FieldState {
    name: String,
    kind: FieldKind,
    value: RefCell<String>,
    checked: Cell<bool>,
    disabled: Cell<bool>,
    changes: Cell<usize>,
    /// Other radios sharing this name in the same form.
    group: RefCell<Vec<Weak<FieldState>>>,
}

/// Handle to one in-memory form control.
#[derive(Debug, Clone)]
pub struct MemoryField {
    state: Rc<FieldState>,
}

impl MemoryField {
    fn build(name: &str, kind: FieldKind, value: &str, checked: bool) -> Self {
        Self {
            state: Rc::new(FieldState {
                name: name.to_string(),
                kind,
                value: RefCell::new(value.to_string()),
                checked: Cell::new(checked),
                disabled: Cell::new(false),
                changes: Cell::new(0),
                group: RefCell::new(Vec::new()),
            }),
        }
    }

    /// A text-like control holding `value`.
    #[must_use]
    pub fn text(name: &str, value: &str) -> Self {
        Self::build(name, FieldKind::Other, value, false)
    }

    /// A checkbox. Its `value` attribute is fixed at `"on"`, as browsers default it.
    #[must_use]
    pub fn checkbox(name: &str, checked: bool) -> Self {
        Self::build(name, FieldKind::Checkbox, "on", checked)
    }

    /// One radio button of the group `name`.
    #[must_use]
    pub fn radio(name: &str, value: &str, checked: bool) -> Self {
        Self::build(name, FieldKind::Radio, value, checked)
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.state.disabled.set(disabled);
    }

    /// How many change notifications this field has emitted.
    #[must_use]
    pub fn change_count(&self) -> usize {
        self.state.changes.get()
    }

    /// Whether two handles point at the same control.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl FormField for MemoryField {
    fn name(&self) -> String {
        self.state.name.clone()
    }

    fn kind(&self) -> FieldKind {
        self.state.kind
    }

    fn value(&self) -> String {
        self.state.value.borrow().clone()
    }

    fn set_value(&self, value: &str) {
        *self.state.value.borrow_mut() = value.to_string();
    }

    fn is_checked(&self) -> bool {
        self.state.checked.get()
    }

    fn set_checked(&self, checked: bool) {
        if checked && self.state.kind == FieldKind::Radio {
            for peer in self.state.group.borrow().iter().filter_map(Weak::upgrade) {
                peer.checked.set(false);
            }
        }
        self.state.checked.set(checked);
    }

    fn is_disabled(&self) -> bool {
        self.state.disabled.get()
    }

    fn notify_change(&self) {
        self.state.changes.set(self.state.changes.get() + 1);
    }
}

/// Handle to an in-memory notification section.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotice {
    visible: Rc<Cell<bool>>,
}

impl MemoryNotice {
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }
}

impl NoticeSection for MemoryNotice {
    fn show(&self) {
        self.visible.set(true);
    }

    fn hide(&self) {
        self.visible.set(false);
    }
}

/// An in-memory form: ordered fields plus an optional notice section.
#[derive(Debug, Clone, Default)]
pub struct MemoryForm {
    fields: Vec<MemoryField>,
    notice: Option<MemoryNotice>,
    reset_control: bool,
}

impl MemoryForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. Radios sharing a name form an exclusive group.
    #[must_use]
    pub fn with_field(mut self, field: MemoryField) -> Self {
        if field.state.kind == FieldKind::Radio {
            let peers = self
                .fields
                .iter()
                .filter(|f| f.state.kind == FieldKind::Radio && f.state.name == field.state.name);
            for peer in peers {
                peer.state.group.borrow_mut().push(Rc::downgrade(&field.state));
                field.state.group.borrow_mut().push(Rc::downgrade(&peer.state));
            }
        }
        self.fields.push(field);
        self
    }

    /// Add a notification section, optionally holding a reset control.
    #[must_use]
    pub fn with_notice(mut self, reset_control: bool) -> Self {
        self.notice = Some(MemoryNotice::default());
        self.reset_control = reset_control;
        self
    }

    /// The notice handle, if the form has one.
    #[must_use]
    pub fn notice(&self) -> Option<&MemoryNotice> {
        self.notice.as_ref()
    }

    /// First field called `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&MemoryField> {
        self.fields.iter().find(|f| f.state.name == name)
    }
}

impl FormSurface for MemoryForm {
    type Field = MemoryField;
    type Notice = MemoryNotice;

    fn fields(&self) -> Vec<MemoryField> {
        self.fields.clone()
    }

    fn notice_section(&self) -> Option<MemoryNotice> {
        self.notice.clone()
    }

    fn has_reset_control(&self) -> bool {
        self.notice.is_some() && self.reset_control
    }

    fn reset(&self) {
        for field in &self.fields {
            match field.kind() {
                FieldKind::Other => field.set_value(""),
                FieldKind::Checkbox | FieldKind::Radio => field.set_checked(false),
            }
        }
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
