//! Restorer: write cached values back into live form fields.
//!
//! DESIGN
//! ======
//! The cached string is parsed in full before any field is touched, so a
//! malformed entry restores nothing instead of half a form. Each cached name
//! is then dispatched on the type tag of the first live element carrying it:
//!
//! - checkbox: checked only when the cached value is `"true"` and it is not
//!   already checked. Never unchecked.
//! - radio: the group member whose value equals the cached value is checked,
//!   unless it already is.
//! - anything else: the first element's value is overwritten, even when the
//!   value is unchanged.
//!
//! Every write is followed by a change notification on the written element.

use crate::field::{CHECKED_VALUE, FieldKind, FormField};
use crate::snapshot::{FormSnapshot, LoadError};

/// What a restore pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Fields written (and notified).
    pub applied: usize,
    /// Cached names whose field was found but left as is.
    pub unchanged: usize,
    /// Cached names with no live field, or a radio value no member carries.
    pub missing: usize,
}

impl RestoreReport {
    /// Whether anything was written back.
    #[must_use]
    pub fn restored(&self) -> bool {
        self.applied > 0
    }
}

enum Outcome {
    Applied,
    Unchanged,
    Missing,
}

/// Parse `serialized` and restore it into the fields `lookup` returns.
///
/// `lookup(name)` yields every live element carrying `name`, in document order.
///
/// # Errors
///
/// Any [`LoadError`] from parsing. Nothing is written in that case.
pub fn restore<F, L>(serialized: Option<&str>, lookup: L) -> Result<RestoreReport, LoadError>
where
    F: FormField,
    L: Fn(&str) -> Vec<F>,
{
    let raw = serialized.ok_or(LoadError::NoData)?;
    let snapshot = FormSnapshot::decode(raw)?;
    Ok(restore_snapshot(&snapshot, lookup))
}

/// Restore an already-parsed snapshot.
pub fn restore_snapshot<F, L>(snapshot: &FormSnapshot, lookup: L) -> RestoreReport
where
    F: FormField,
    L: Fn(&str) -> Vec<F>,
{
    let mut report = RestoreReport::default();
    for (name, value) in snapshot.iter() {
        if value.is_empty() {
            continue;
        }
        match restore_field(&lookup(name), value) {
            Outcome::Applied => report.applied += 1,
            Outcome::Unchanged => report.unchanged += 1,
            Outcome::Missing => report.missing += 1,
        }
    }
    report
}

fn restore_field<F: FormField>(elements: &[F], value: &str) -> Outcome {
    let Some(first) = elements.first() else {
        return Outcome::Missing;
    };
    match first.kind() {
        FieldKind::Checkbox => {
            if value != CHECKED_VALUE || first.is_checked() {
                return Outcome::Unchanged;
            }
            first.set_checked(true);
            first.notify_change();
            Outcome::Applied
        }
        FieldKind::Radio => {
            let Some(target) = elements.iter().find(|e| e.value() == value) else {
                return Outcome::Missing;
            };
            if target.is_checked() {
                return Outcome::Unchanged;
            }
            target.set_checked(true);
            target.notify_change();
            Outcome::Applied
        }
        FieldKind::Other => {
            first.set_value(value);
            first.notify_change();
            Outcome::Applied
        }
    }
}

#[cfg(test)]
#[path = "restore_test.rs"]
mod tests;
