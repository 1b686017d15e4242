//! DOM implementations of the form traits.
//!
//! A cache-enabled container is any element carrying the opt-in marker,
//! usually a `<form>`. Its fields are the named `input`, `select` and
//! `textarea` descendants with a non-empty name, minus button-like inputs
//! that never carry user data.

use formcache::{FieldKind, FormField, FormSurface, MarkupAttributes, NoticeSection};
use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event, EventInit, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
};

use crate::storage::describe;

const FIELD_SELECTOR: &str = "input[name], select[name], textarea[name]";

/// Input types that are controls rather than data.
const BUTTON_TYPES: [&str; 5] = ["submit", "button", "reset", "image", "file"];

pub(crate) fn is_button_type(input_type: &str) -> bool {
    BUTTON_TYPES.iter().any(|t| t.eq_ignore_ascii_case(input_type.trim()))
}

/// One named form control.
#[derive(Clone)]
pub enum DomField {
    Input(HtmlInputElement),
    Select(HtmlSelectElement),
    TextArea(HtmlTextAreaElement),
}

impl DomField {
    /// Wrap `element` if it is a data-carrying control.
    pub fn from_element(element: Element) -> Option<Self> {
        let element = match element.dyn_into::<HtmlInputElement>() {
            Ok(input) if is_button_type(&input.type_()) => return None,
            Ok(input) => return Some(Self::Input(input)),
            Err(other) => other,
        };
        let element = match element.dyn_into::<HtmlSelectElement>() {
            Ok(select) => return Some(Self::Select(select)),
            Err(other) => other,
        };
        match element.dyn_into::<HtmlTextAreaElement>() {
            Ok(area) => Some(Self::TextArea(area)),
            Err(_) => None,
        }
    }

    fn element(&self) -> &Element {
        match self {
            Self::Input(el) => el.as_ref(),
            Self::Select(el) => el.as_ref(),
            Self::TextArea(el) => el.as_ref(),
        }
    }

    /// Blank the control. Hidden inputs keep their value.
    fn clear(&self) {
        match self {
            Self::Input(input) => match FieldKind::from_type_tag(&input.type_()) {
                FieldKind::Checkbox | FieldKind::Radio => input.set_checked(false),
                FieldKind::Other if input.type_().eq_ignore_ascii_case("hidden") => {}
                FieldKind::Other => input.set_value(""),
            },
            Self::Select(select) => select.set_selected_index(-1),
            Self::TextArea(area) => area.set_value(""),
        }
    }
}

impl FormField for DomField {
    fn name(&self) -> String {
        match self {
            Self::Input(el) => el.name(),
            Self::Select(el) => el.name(),
            Self::TextArea(el) => el.name(),
        }
    }

    fn kind(&self) -> FieldKind {
        match self {
            Self::Input(el) => FieldKind::from_type_tag(&el.type_()),
            Self::Select(_) | Self::TextArea(_) => FieldKind::Other,
        }
    }

    fn value(&self) -> String {
        match self {
            Self::Input(el) => el.value(),
            Self::Select(el) => el.value(),
            Self::TextArea(el) => el.value(),
        }
    }

    fn set_value(&self, value: &str) {
        match self {
            Self::Input(el) => el.set_value(value),
            Self::Select(el) => el.set_value(value),
            Self::TextArea(el) => el.set_value(value),
        }
    }

    fn is_checked(&self) -> bool {
        match self {
            Self::Input(el) => el.checked(),
            Self::Select(_) | Self::TextArea(_) => false,
        }
    }

    fn set_checked(&self, checked: bool) {
        if let Self::Input(el) = self {
            el.set_checked(checked);
        }
    }

    /// Disabled either directly or through an ancestor `<fieldset disabled>`.
    fn is_disabled(&self) -> bool {
        match self.element().matches(":disabled") {
            Ok(disabled) => disabled,
            Err(e) => {
                log::debug!("formcache: :disabled check failed: {}", describe(&e));
                match self {
                    Self::Input(el) => el.disabled(),
                    Self::Select(el) => el.disabled(),
                    Self::TextArea(el) => el.disabled(),
                }
            }
        }
    }

    fn notify_change(&self) {
        let init = EventInit::new();
        init.set_bubbles(true);
        let event = match Event::new_with_event_init_dict("change", &init) {
            Ok(event) => event,
            Err(e) => {
                log::debug!("formcache: could not create change event: {}", describe(&e));
                return;
            }
        };
        if let Err(e) = self.element().dispatch_event(&event) {
            log::debug!("formcache: change listener threw: {}", describe(&e));
        }
    }
}

/// The "values restored" section inside a form.
#[derive(Clone)]
pub struct DomNotice {
    section: HtmlElement,
}

impl NoticeSection for DomNotice {
    fn show(&self) {
        if let Err(e) = self.section.style().remove_property("display") {
            log::debug!("formcache: could not show notice: {}", describe(&e));
        }
    }

    fn hide(&self) {
        if let Err(e) = self.section.style().set_property("display", "none") {
            log::debug!("formcache: could not hide notice: {}", describe(&e));
        }
    }
}

/// A cache-enabled container element.
#[derive(Clone)]
pub struct DomForm {
    root: Element,
    markup: MarkupAttributes,
}

impl DomForm {
    pub fn new(root: Element, markup: MarkupAttributes) -> Self {
        Self { root, markup }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    fn notice_element(&self) -> Option<Element> {
        match self.root.query_selector(&self.markup.notify_selector()) {
            Ok(found) => found,
            Err(e) => {
                log::debug!("formcache: notice lookup failed: {}", describe(&e));
                None
            }
        }
    }

    /// The reset control inside the notice section, if any.
    pub fn reset_control(&self) -> Option<Element> {
        let notice = self.notice_element()?;
        match notice.query_selector(&self.markup.clear_selector()) {
            Ok(found) => found,
            Err(e) => {
                log::debug!("formcache: reset control lookup failed: {}", describe(&e));
                None
            }
        }
    }
}

impl FormSurface for DomForm {
    type Field = DomField;
    type Notice = DomNotice;

    fn fields(&self) -> Vec<DomField> {
        let nodes = match self.root.query_selector_all(FIELD_SELECTOR) {
            Ok(nodes) => nodes,
            Err(e) => {
                log::debug!("formcache: field lookup failed: {}", describe(&e));
                return Vec::new();
            }
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| match node.dyn_into::<Element>() {
                Ok(element) => DomField::from_element(element),
                Err(_) => None,
            })
            .filter(|field| !field.name().is_empty())
            .collect()
    }

    fn notice_section(&self) -> Option<DomNotice> {
        match self.notice_element()?.dyn_into::<HtmlElement>() {
            Ok(section) => Some(DomNotice { section }),
            Err(_) => None,
        }
    }

    fn has_reset_control(&self) -> bool {
        self.reset_control().is_some()
    }

    fn reset(&self) {
        if let Some(form) = self.root.dyn_ref::<HtmlFormElement>() {
            form.reset();
            return;
        }
        for field in self.fields() {
            field.clear();
        }
    }
}

#[cfg(test)]
#[path = "dom_test.rs"]
mod tests;
